//! Integration tests for the skirmish binary.
//!
//! Tests full sessions by spawning the engine process, sending commands via
//! stdin, and verifying stdout responses.

use std::io::{BufRead, Write};
use std::process::{Command, Stdio};

/// Sends a sequence of commands to the engine and collects stdout lines.
fn run_engine_with_args(args: &[&str], commands: &[&str]) -> Vec<String> {
    let exe = env!("CARGO_BIN_EXE_skirmish");
    let mut child = Command::new(exe)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("failed to start skirmish");

    let mut stdin = child.stdin.take().unwrap();
    let stdout = child.stdout.take().unwrap();
    let reader = std::io::BufReader::new(stdout);

    for cmd in commands {
        writeln!(stdin, "{}", cmd).unwrap();
    }
    stdin.flush().unwrap();
    drop(stdin);

    let lines: Vec<String> = reader.lines().map(|l| l.unwrap()).collect();
    let status = child.wait().expect("failed to wait on child");
    assert!(status.success());
    lines
}

fn run_engine(commands: &[&str]) -> Vec<String> {
    run_engine_with_args(&[], commands)
}

#[test]
fn levels_lists_builtin_table() {
    let lines = run_engine(&["levels", "quit"]);
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "level 0 20 5x5 red reward 1 name Level One");
    assert_eq!(lines[1], "level 1 20 7x5 yellow reward 2 name Level Two");
    assert_eq!(lines[2], "level 2 65 10x8 red,yellow reward 3 name Level Three");
}

#[test]
fn unknown_commands_are_ignored() {
    let lines = run_engine(&["foobar", "castle kingside", "quit"]);
    assert!(lines.is_empty());
}

#[test]
fn empty_lines_are_ignored() {
    let lines = run_engine(&["", "  ", "levels", "quit"]);
    assert_eq!(lines.len(), 3);
}

#[test]
fn commands_without_game_produce_no_output() {
    let lines = run_engine(&["step", "run", "board", "status", "newgame 9", "quit"]);
    assert!(lines.is_empty());
}

#[test]
fn quit_stops_reading() {
    let lines = run_engine(&["quit", "levels"]);
    assert!(lines.is_empty());
}

#[test]
fn run_ends_with_outcome() {
    let lines = run_engine(&["newgame 0 17", "run", "quit"]);
    let last = lines.last().expect("no output");
    assert!(
        ["outcome win", "outcome lose", "outcome draw"].contains(&last.as_str()),
        "unexpected last line: {}",
        last
    );
    for line in &lines[..lines.len() - 1] {
        assert!(
            line.starts_with("move ") || line.starts_with("eliminated "),
            "unexpected line: {}",
            line
        );
    }
    assert_eq!(lines.iter().filter(|l| l.starts_with("outcome ")).count(), 1);
}

#[test]
fn seeded_sessions_are_reproducible() {
    let commands = ["newgame 2 31337", "step 40", "board", "status", "quit"];
    assert_eq!(run_engine(&commands), run_engine(&commands));
}

#[test]
fn option_changes_apply_to_next_game() {
    let lines = run_engine(&[
        "option MaxQuietMoves 0",
        "newgame 1 5",
        "step",
        "status",
        "quit",
    ]);
    assert_eq!(lines[0], "outcome draw");
    assert!(lines[1].ends_with("outcome draw"), "status: {}", lines[1]);
}

#[test]
fn move_lines_have_coordinates() {
    let lines = run_engine(&["newgame 0 3", "step 10", "quit"]);
    for line in lines.iter().filter(|l| l.starts_with("move ")) {
        let parts: Vec<&str> = line.split(' ').collect();
        assert!(parts.len() == 5 || parts.len() == 8, "bad move line: {}", line);
        for coord in &parts[3..5] {
            let xy: Vec<i32> = coord.split(',').map(|v| v.parse().unwrap()).collect();
            assert_eq!(xy.len(), 2);
            assert!(xy[0] >= 0 && xy[1] >= 0);
        }
        if parts.len() == 8 {
            assert_eq!(parts[5], "capture");
        }
    }
}

#[test]
fn board_has_one_row_per_rank() {
    let lines = run_engine(&["newgame 2 8", "board", "quit"]);
    assert_eq!(lines.len(), 8);
    let text = lines.join("\n");
    assert!(text.contains("wK"));
}

#[test]
fn custom_level_file() {
    let path = std::env::temp_dir().join(format!("skirmish-levels-{}.json", std::process::id()));
    std::fs::write(
        &path,
        r#"[{"name": "Duel", "squares": 16, "width": 4, "height": 4,
            "opponents": [{"faction": "blue", "pieces": ["king", "rook"]}]}]"#,
    )
    .unwrap();
    let lines = run_engine_with_args(&[path.to_str().unwrap()], &["levels", "quit"]);
    std::fs::remove_file(&path).ok();
    assert_eq!(lines, vec!["level 0 16 4x4 blue reward 0 name Duel".to_string()]);
}
