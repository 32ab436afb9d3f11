//! Player-side editing of decoding keys.
//!
//! A [`RotorBoard`] is the editable bottom or top row of one rotor: 26 cells
//! the player fills in while reading the partially decoded text. Boards are
//! values; every edit returns a new board and leaves the old one intact, so a
//! client can keep an undo history by holding on to previous boards.

use crate::alphabet::{self, SIZE};
use crate::error::{EnigmaError, Result};
use crate::grading::Answer;
use crate::hints::Hint;
use crate::key::Key;
use crate::rotor::RotorSpec;
use crate::transform;

/// One editable cell of a decoding key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cell {
    pub symbol: Option<char>,
    /// Locked cells ignore edits.
    pub locked: bool,
    /// Set on cells revealed by a hint; those are always locked.
    pub hinted: bool,
}

/// The 26 cells of one rotor's decoding key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotorBoard {
    cells: [Cell; SIZE],
}

impl Default for RotorBoard {
    fn default() -> Self {
        RotorBoard {
            cells: [Cell::default(); SIZE],
        }
    }
}

impl RotorBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cells(&self) -> &[Cell; SIZE] {
        &self.cells
    }

    pub fn cell(&self, rank: usize) -> Option<&Cell> {
        self.cells.get(rank)
    }

    /// Returns a board with the cell at `rank` set to `symbol`.
    ///
    /// Lowercase letters are accepted. Anything outside the alphabet, or
    /// `None`, clears the cell. Locked cells and out-of-range ranks leave the
    /// board unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigma_task::workspace::RotorBoard;
    ///
    /// let board = RotorBoard::new().edit_cell(0, Some('q'));
    /// assert_eq!(board.cell(0).unwrap().symbol, Some('Q'));
    /// assert_eq!(board.edit_cell(0, Some('?')).cell(0).unwrap().symbol, None);
    /// ```
    pub fn edit_cell(&self, rank: usize, symbol: Option<char>) -> Self {
        let mut next = *self;
        if let Some(cell) = next.cells.get_mut(rank) {
            if !cell.locked {
                cell.symbol = symbol
                    .map(|c| c.to_ascii_uppercase())
                    .filter(|&c| alphabet::rank(c).is_some());
            }
        }
        next
    }

    /// Returns a board with the cell at `rank` locked or unlocked.
    ///
    /// Hinted cells stay locked.
    pub fn lock_cell(&self, rank: usize, locked: bool) -> Self {
        let mut next = *self;
        if let Some(cell) = next.cells.get_mut(rank) {
            cell.locked = locked || cell.hinted;
        }
        next
    }

    /// Writes every hint addressed to rotor `rotor_index` and locks its cell.
    pub fn apply_hints(&self, rotor_index: usize, hints: &[Hint]) -> Self {
        let mut next = *self;
        for hint in hints.iter().filter(|h| h.rotor_index == rotor_index) {
            if let Some(cell) = next.cells.get_mut(hint.cell_rank) {
                *cell = Cell {
                    symbol: Some(hint.symbol),
                    locked: true,
                    hinted: true,
                };
            }
        }
        next
    }

    /// Ranks of the cells whose symbol is also used by another cell.
    pub fn conflicts(&self) -> Vec<usize> {
        let mut uses = [0u8; SIZE];
        for rank in self.cells.iter().filter_map(|c| c.symbol.and_then(alphabet::rank)) {
            uses[rank] += 1;
        }
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| {
                c.symbol
                    .and_then(alphabet::rank)
                    .is_some_and(|r| uses[r] > 1)
            })
            .map(|(rank, _)| rank)
            .collect()
    }

    pub fn to_key(&self) -> Key {
        self.cells
            .iter()
            .enumerate()
            .fold(Key::blank(), |key, (rank, cell)| key.with_cell(rank, cell.symbol))
    }

    /// The board as an answer row: one rank per cell, `-1` when empty.
    pub fn to_answer_ranks(&self) -> Vec<i64> {
        self.to_key().to_ranks()
    }
}

/// All boards of a task, in cascade order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    rotors: Vec<RotorSpec>,
    boards: Vec<RotorBoard>,
}

impl Workspace {
    /// Empty boards for `rotors`, with `hints` filled in and locked.
    pub fn new(rotors: &[RotorSpec], hints: &[Hint]) -> Self {
        let boards = (0..rotors.len())
            .map(|i| RotorBoard::new().apply_hints(i, hints))
            .collect();
        Workspace {
            rotors: rotors.to_vec(),
            boards,
        }
    }

    pub fn rotors(&self) -> &[RotorSpec] {
        &self.rotors
    }

    pub fn boards(&self) -> &[RotorBoard] {
        &self.boards
    }

    pub fn board(&self, rotor_index: usize) -> Option<&RotorBoard> {
        self.boards.get(rotor_index)
    }

    /// Replaces the board of rotor `rotor_index`.
    ///
    /// # Errors
    /// Returns [`EnigmaError::RotorOutOfRange`] if there is no such rotor.
    pub fn set_board(&mut self, rotor_index: usize, board: RotorBoard) -> Result<()> {
        let rotors = self.boards.len();
        let slot = self
            .boards
            .get_mut(rotor_index)
            .ok_or(EnigmaError::RotorOutOfRange {
                rotor_index,
                rotors,
            })?;
        *slot = board;
        Ok(())
    }

    pub fn keys(&self) -> Vec<Key> {
        self.boards.iter().map(RotorBoard::to_key).collect()
    }

    /// Decodes `cipher_text` with the keys entered so far.
    ///
    /// Letters that cross an empty cell come out as blanks.
    pub fn preview(&self, cipher_text: &str) -> Result<String> {
        transform::decode(&self.rotors, &self.keys(), cipher_text)
    }

    /// The boards as a gradable answer.
    pub fn answer(&self) -> Answer {
        Answer {
            rotors: self.boards.iter().map(RotorBoard::to_answer_ranks).collect(),
        }
    }
}
