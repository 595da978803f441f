//! Match state machine.
//!
//! A `Game` owns the position and the random stream of one match and
//! advances it one turn at a time. Factions move in roster order, skipping
//! eliminated ones. A faction that has no move when its turn comes is
//! eliminated; its pieces stay on the board as obstacles and targets.
//!
//! The match ends in a loss once the player (the first roster faction) is
//! eliminated, in a win once the player is the last active faction, and in
//! a draw after `max_quiet_moves` consecutive turns without a capture or
//! elimination.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::board::{Board, BoardState, Faction, Move, PieceKind, Region, Square, FACTION_COUNT};
use crate::execute::apply_move;
use crate::level::{LevelDef, LevelError};
use crate::search::{select_move, Tier};
use crate::setup::build_match;

/// Tunables for a single match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchConfig {
    /// Random seed (0 = use entropy).
    pub seed: u64,
    /// Turns without a capture or elimination before the match is drawn.
    pub max_quiet_moves: u32,
    /// Reject moves that leave the mover's king capturable.
    pub check_avoidance: bool,
    /// Put each army's king on its back line before scattering the rest.
    pub back_rank_kings: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig {
            seed: 0,
            max_quiet_moves: 200,
            check_avoidance: false,
            back_rank_kings: true,
        }
    }
}

/// Result of a finished match, from the player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Lose,
    Draw,
}

impl Outcome {
    pub fn name(self) -> &'static str {
        match self {
            Outcome::Win => "win",
            Outcome::Lose => "lose",
            Outcome::Draw => "draw",
        }
    }
}

/// What happened on one call to `Game::step`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnEvent {
    Moved {
        faction: Faction,
        mv: Move,
        piece: PieceKind,
        captured: Option<PieceKind>,
        tier: Tier,
    },
    Eliminated {
        faction: Faction,
    },
    Finished(Outcome),
}

fn seeded_rng(seed: u64) -> SmallRng {
    if seed != 0 {
        SmallRng::seed_from_u64(seed)
    } else {
        SmallRng::from_entropy()
    }
}

/// One match in progress.
pub struct Game {
    state: BoardState,
    regions: Vec<(Faction, Region)>,
    placed: Vec<(Faction, usize)>,
    rng: SmallRng,
    alive: [bool; FACTION_COUNT],
    cursor: usize,
    moves: u32,
    quiet_moves: u32,
    config: MatchConfig,
    outcome: Option<Outcome>,
}

impl Game {
    /// Grows a board for `level` and places its armies.
    pub fn new(level: &LevelDef, config: MatchConfig) -> Result<Game, LevelError> {
        level.validate()?;
        Ok(Game::build(level, config))
    }

    /// `new` for a level that has already been validated.
    pub(crate) fn build(level: &LevelDef, config: MatchConfig) -> Game {
        let mut rng = seeded_rng(config.seed);
        let setup = build_match(
            level.squares,
            level.width,
            level.height,
            &level.armies(),
            config.back_rank_kings,
            &mut rng,
        );
        tracing::debug!(
            level = %level.name,
            squares = setup.state.board().len(),
            "match set up"
        );
        Game::assemble(setup.state, setup.regions, setup.placed, rng, config)
    }

    /// Starts a match from a prepared position. The first roster faction is
    /// the player.
    pub fn from_position(state: BoardState, config: MatchConfig) -> Game {
        let placed = state
            .pieces()
            .roster()
            .iter()
            .map(|&f| (f, state.pieces().count(f)))
            .collect();
        let rng = seeded_rng(config.seed);
        Game::assemble(state, Vec::new(), placed, rng, config)
    }

    fn assemble(
        state: BoardState,
        regions: Vec<(Faction, Region)>,
        placed: Vec<(Faction, usize)>,
        rng: SmallRng,
        config: MatchConfig,
    ) -> Game {
        let mut alive = [false; FACTION_COUNT];
        for &f in state.pieces().roster() {
            alive[f as usize] = true;
        }
        Game {
            state,
            regions,
            placed,
            rng,
            alive,
            cursor: 0,
            moves: 0,
            quiet_moves: 0,
            config,
            outcome: None,
        }
    }

    /// Plays one turn.
    pub fn step(&mut self) -> TurnEvent {
        if let Some(outcome) = self.outcome {
            return TurnEvent::Finished(outcome);
        }
        if self.quiet_moves >= self.config.max_quiet_moves {
            return self.finish(Outcome::Draw);
        }
        let Some(faction) = self.take_turn() else {
            return self.finish(Outcome::Draw);
        };

        let check_avoidance = self.config.check_avoidance;
        let event = match select_move(&mut self.state, faction, check_avoidance, &mut self.rng) {
            Some((tier, mv)) => {
                let record = apply_move(&mut self.state, faction, mv);
                self.moves += 1;
                if record.captured.is_some() {
                    self.quiet_moves = 0;
                } else {
                    self.quiet_moves += 1;
                }
                TurnEvent::Moved {
                    faction,
                    mv,
                    piece: record.moved,
                    captured: record.captured_kind(),
                    tier,
                }
            }
            None => {
                self.alive[faction as usize] = false;
                self.quiet_moves = 0;
                tracing::debug!(faction = faction.name(), moves = self.moves, "faction eliminated");
                TurnEvent::Eliminated { faction }
            }
        };

        debug_assert!(
            self.state.verify().is_ok(),
            "occupancy out of sync: {:?}",
            self.state.verify()
        );

        if !self.is_alive(self.player()) {
            self.outcome = Some(Outcome::Lose);
        } else if self.alive_factions().len() == 1 {
            self.outcome = Some(Outcome::Win);
        }
        if let Some(outcome) = self.outcome {
            tracing::debug!(outcome = outcome.name(), moves = self.moves, "match over");
        }
        event
    }

    /// Steps until the match is decided.
    pub fn run(&mut self) -> Outcome {
        loop {
            if let TurnEvent::Finished(outcome) = self.step() {
                return outcome;
            }
        }
    }

    /// Next alive faction from the cursor; advances the cursor past it.
    fn take_turn(&mut self) -> Option<Faction> {
        let roster = self.state.pieces().roster();
        let n = roster.len();
        let offset = (0..n).find(|i| self.alive[roster[(self.cursor + i) % n] as usize])?;
        let index = (self.cursor + offset) % n;
        self.cursor = (index + 1) % n;
        Some(roster[index])
    }

    fn finish(&mut self, outcome: Outcome) -> TurnEvent {
        self.outcome = Some(outcome);
        tracing::debug!(outcome = outcome.name(), moves = self.moves, "match over");
        TurnEvent::Finished(outcome)
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn board(&self) -> &Board {
        self.state.board()
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn roster(&self) -> &[Faction] {
        self.state.pieces().roster()
    }

    /// The faction the outcome is reported for.
    pub fn player(&self) -> Faction {
        self.roster()[0]
    }

    pub fn pieces_of(&self, faction: Faction) -> &[Square] {
        self.state.pieces().squares_of(faction)
    }

    pub fn is_alive(&self, faction: Faction) -> bool {
        self.alive[faction as usize]
    }

    /// Active factions in roster order.
    pub fn alive_factions(&self) -> Vec<Faction> {
        self.roster().iter().copied().filter(|&f| self.is_alive(f)).collect()
    }

    /// The faction whose turn is next, if the match is still running.
    pub fn next_faction(&self) -> Option<Faction> {
        if self.outcome.is_some() {
            return None;
        }
        let roster = self.roster();
        let n = roster.len();
        (0..n)
            .map(|i| roster[(self.cursor + i) % n])
            .find(|&f| self.is_alive(f))
    }

    /// Owner as shown on a rendered board: eliminated factions show as
    /// `Faction::Dead`.
    pub fn display_owner(&self, sq: Square) -> Option<Faction> {
        self.state
            .owner_of(sq)
            .map(|f| if self.is_alive(f) { f } else { Faction::Dead })
    }

    pub fn regions(&self) -> &[(Faction, Region)] {
        &self.regions
    }

    pub fn placed(&self) -> &[(Faction, usize)] {
        &self.placed
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn move_count(&self) -> u32 {
        self.moves
    }

    pub fn quiet_moves(&self) -> u32 {
        self.quiet_moves
    }
}
