//! Board and piece-set state.
//!
//! `Board` maps playable squares to an optional piece kind. `PieceSets`
//! records which squares each registered faction occupies, as ordered lists
//! plus a reverse square -> faction index. `BoardState` pairs the two and is
//! the unit every other module reads and the executor mutates.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

use super::piece::{Faction, PieceKind, FACTION_COUNT};
use super::square::{Region, Square};

/// The playable squares of a match and what stands on them.
///
/// Off-board squares are absent keys; empty squares map to `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: i32,
    height: i32,
    cells: BTreeMap<Square, Option<PieceKind>>,
}

impl Board {
    /// Creates a board with the given bounds and no playable squares.
    /// Negative bounds are clamped to zero.
    pub fn empty(width: i32, height: i32) -> Self {
        Board {
            width: width.max(0),
            height: height.max(0),
            cells: BTreeMap::new(),
        }
    }

    /// Creates a board whose every square inside the bounds is playable.
    pub fn filled(width: i32, height: i32) -> Self {
        let mut board = Board::empty(width, height);
        for y in 0..height {
            for x in 0..width {
                board.add_square(Square::new(x, y));
            }
        }
        board
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// The rectangle the board was grown inside.
    pub fn bounds(&self) -> Region {
        Region::new(0, 0, self.width, self.height)
    }

    /// Writes the board as a diagram, one line per rank: `..` empty, blank
    /// off-board, otherwise the owner's colour character followed by the
    /// piece letter. `owner` decides which colour an occupied square shows;
    /// `?` marks a piece nobody claims.
    pub fn write_diagram<W, F>(&self, out: &mut W, owner: F) -> fmt::Result
    where
        W: fmt::Write,
        F: Fn(Square) -> Option<Faction>,
    {
        for y in 0..self.height {
            let mut row = String::new();
            for x in 0..self.width {
                let sq = Square::new(x, y);
                if x > 0 {
                    row.push(' ');
                }
                match self.cells.get(&sq) {
                    None => row.push_str("  "),
                    Some(None) => row.push_str(".."),
                    Some(Some(kind)) => {
                        row.push(owner(sq).map_or('?', |o| o.diagram_char()));
                        row.push(kind.letter());
                    }
                }
            }
            writeln!(out, "{}", row.trim_end())?;
        }
        Ok(())
    }

    /// Makes a square playable and empty. Returns false if it already was.
    pub fn add_square(&mut self, square: Square) -> bool {
        if self.cells.contains_key(&square) {
            return false;
        }
        self.cells.insert(square, None);
        true
    }

    /// The single board-membership query.
    pub fn is_playable(&self, square: Square) -> bool {
        self.cells.contains_key(&square)
    }

    /// Returns the piece on a square; `None` for empty or off-board squares.
    pub fn piece_at(&self, square: Square) -> Option<PieceKind> {
        self.cells.get(&square).copied().flatten()
    }

    /// Returns true if the square is playable and holds no piece.
    pub fn is_vacant(&self, square: Square) -> bool {
        matches!(self.cells.get(&square), Some(None))
    }

    /// Number of playable squares.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Playable squares in rank-then-file order.
    pub fn squares(&self) -> impl Iterator<Item = Square> + '_ {
        self.cells.keys().copied()
    }

    /// Playable squares with their contents, in rank-then-file order.
    pub fn cells(&self) -> impl Iterator<Item = (Square, Option<PieceKind>)> + '_ {
        self.cells.iter().map(|(sq, piece)| (*sq, *piece))
    }

    /// Number of squares holding a piece.
    pub fn occupied_count(&self) -> usize {
        self.cells.values().filter(|p| p.is_some()).count()
    }

    /// Overwrites a square's contents and returns what was there.
    ///
    /// Panics if the square is not playable.
    pub(crate) fn set(&mut self, square: Square, piece: Option<PieceKind>) -> Option<PieceKind> {
        match self.cells.get_mut(&square) {
            Some(cell) => std::mem::replace(cell, piece),
            None => panic!("write to off-board square {}", square),
        }
    }
}

/// Per-faction ordered square lists with a reverse ownership index.
///
/// Lists are indexed by `Faction as usize`. Order within a list is
/// significant: the executor substitutes and reinserts by index so undo
/// restores the exact sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceSets {
    roster: Vec<Faction>,
    squares: [Vec<Square>; FACTION_COUNT],
    owners: HashMap<Square, Faction>,
}

impl PieceSets {
    /// Registers the roster. The first faction is the player.
    ///
    /// Panics on duplicates or on the `Dead` sentinel.
    pub fn new(roster: &[Faction]) -> Self {
        for (i, f) in roster.iter().enumerate() {
            assert!(!f.is_sentinel(), "the dead sentinel cannot be registered");
            assert!(!roster[..i].contains(f), "faction {} registered twice", f.name());
        }
        PieceSets {
            roster: roster.to_vec(),
            squares: Default::default(),
            owners: HashMap::new(),
        }
    }

    /// Registered factions in turn order.
    pub fn roster(&self) -> &[Faction] {
        &self.roster
    }

    pub fn is_registered(&self, faction: Faction) -> bool {
        self.roster.contains(&faction)
    }

    /// Squares occupied by a faction, in list order.
    pub fn squares_of(&self, faction: Faction) -> &[Square] {
        &self.squares[faction as usize]
    }

    /// Number of pieces a faction has on the board.
    pub fn count(&self, faction: Faction) -> usize {
        self.squares[faction as usize].len()
    }

    /// Looks up which faction occupies a square.
    pub fn owner_of(&self, square: Square) -> Option<Faction> {
        self.owners.get(&square).copied()
    }

    /// Pawn forward step along y: the first-registered faction plays up the
    /// board, everyone else plays down.
    pub fn pawn_direction(&self, faction: Faction) -> i32 {
        if self.roster.first() == Some(&faction) {
            -1
        } else {
            1
        }
    }

    /// Position of a square in a faction's list.
    pub fn index_of(&self, faction: Faction, square: Square) -> Option<usize> {
        self.squares[faction as usize].iter().position(|s| *s == square)
    }

    pub(crate) fn push(&mut self, faction: Faction, square: Square) {
        debug_assert!(self.is_registered(faction));
        self.squares[faction as usize].push(square);
        self.owners.insert(square, faction);
    }

    /// Substitutes the square at `index` in place.
    pub(crate) fn replace(&mut self, faction: Faction, index: usize, square: Square) -> Square {
        let old = std::mem::replace(&mut self.squares[faction as usize][index], square);
        if self.owners.get(&old) == Some(&faction) {
            self.owners.remove(&old);
        }
        self.owners.insert(square, faction);
        old
    }

    pub(crate) fn remove_at(&mut self, faction: Faction, index: usize) -> Square {
        let square = self.squares[faction as usize].remove(index);
        if self.owners.get(&square) == Some(&faction) {
            self.owners.remove(&square);
        }
        square
    }

    pub(crate) fn insert_at(&mut self, faction: Faction, index: usize, square: Square) {
        self.squares[faction as usize].insert(index, square);
        self.owners.insert(square, faction);
    }
}

/// A broken pairing between `Board` and `PieceSets`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvariantViolation {
    #[error("square {0} is claimed by {1} but is not on the board")]
    OffBoard(Square, &'static str),

    #[error("square {0} is claimed by {1} but holds no piece")]
    EmptyClaim(Square, &'static str),

    #[error("square {0} is claimed by more than one faction")]
    DoubleClaim(Square),

    #[error("square {0} holds a piece nobody claims")]
    Unclaimed(Square),

    #[error("reverse index disagrees at square {0}")]
    IndexMismatch(Square),
}

/// Board contents paired with faction ownership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardState {
    board: Board,
    pieces: PieceSets,
}

impl BoardState {
    pub fn new(board: Board, roster: &[Faction]) -> Self {
        BoardState {
            board,
            pieces: PieceSets::new(roster),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn pieces(&self) -> &PieceSets {
        &self.pieces
    }

    pub fn piece_at(&self, square: Square) -> Option<PieceKind> {
        self.board.piece_at(square)
    }

    pub fn owner_of(&self, square: Square) -> Option<Faction> {
        self.pieces.owner_of(square)
    }

    /// Places a piece for a faction. Returns false if the square is
    /// off-board or occupied, or the faction is not registered.
    pub fn place(&mut self, faction: Faction, square: Square, kind: PieceKind) -> bool {
        if !self.pieces.is_registered(faction) || !self.board.is_vacant(square) {
            return false;
        }
        self.board.set(square, Some(kind));
        self.pieces.push(faction, square);
        true
    }

    /// First square in the faction's list holding a king.
    pub fn king_square(&self, faction: Faction) -> Option<Square> {
        self.pieces
            .squares_of(faction)
            .iter()
            .copied()
            .find(|sq| self.board.piece_at(*sq) == Some(PieceKind::King))
    }

    pub(crate) fn parts_mut(&mut self) -> (&mut Board, &mut PieceSets) {
        (&mut self.board, &mut self.pieces)
    }

    /// Checks that the claimed squares are exactly the occupied squares.
    pub fn verify(&self) -> Result<(), InvariantViolation> {
        let mut claimed: HashSet<Square> = HashSet::new();
        for &faction in self.pieces.roster() {
            for &sq in self.pieces.squares_of(faction) {
                if !self.board.is_playable(sq) {
                    return Err(InvariantViolation::OffBoard(sq, faction.name()));
                }
                if self.board.piece_at(sq).is_none() {
                    return Err(InvariantViolation::EmptyClaim(sq, faction.name()));
                }
                if !claimed.insert(sq) {
                    return Err(InvariantViolation::DoubleClaim(sq));
                }
                if self.pieces.owner_of(sq) != Some(faction) {
                    return Err(InvariantViolation::IndexMismatch(sq));
                }
            }
        }
        for (sq, piece) in self.board.cells() {
            if piece.is_some() && !claimed.contains(&sq) {
                return Err(InvariantViolation::Unclaimed(sq));
            }
        }
        if self.pieces.owners.len() != claimed.len() {
            let stray = self
                .pieces
                .owners
                .keys()
                .copied()
                .find(|sq| !claimed.contains(sq))
                .unwrap_or(Square::new(0, 0));
            return Err(InvariantViolation::IndexMismatch(stray));
        }
        Ok(())
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.board.write_diagram(f, |sq| self.pieces.owner_of(sq))
    }
}
