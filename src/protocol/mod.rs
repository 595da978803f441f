//! Session protocol.
//!
//! Line-oriented commands on stdin (`parser`) and the text the session
//! writes back (`report`).

pub mod parser;
pub mod report;

pub use parser::{parse_command, Command};
pub use report::{format_event, format_level, format_status, render_board};
