//! Substitution keys over the alphabet.
//!
//! A [`Key`] holds one cell per alphabet rank; `key[i]` is the substitution
//! of the letter at rank `i`. Cells may be blank while a key is only
//! partially known (an unfinished answer, for instance). Generated keys are
//! always full permutations.
//!
//! Keys are immutable values: editing operations return a new key.

use std::fmt;

use crate::alphabet::{self, BLANK, SIZE};
use crate::error::{EnigmaError, Result};

/// A possibly partial substitution table over the alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key {
    cells: [Option<u8>; SIZE],
}

impl Key {
    /// The identity permutation (`A→A`, `B→B`, ...).
    pub fn identity() -> Self {
        let mut cells = [None; SIZE];
        for (i, cell) in cells.iter_mut().enumerate() {
            *cell = Some(i as u8);
        }
        Key { cells }
    }

    /// A key with every cell blank.
    pub fn blank() -> Self {
        Key { cells: [None; SIZE] }
    }

    /// Parses a key string of exactly 26 characters.
    ///
    /// Characters outside the alphabet become blank cells.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidKeyLength`] if `text` does not have
    /// exactly 26 characters.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigma_task::key::Key;
    ///
    /// let key = Key::parse("UWYGADFPVZBECKMTHXSLRINQOJ").unwrap();
    /// assert!(key.is_permutation());
    /// assert_eq!(key.get(0), Some('U'));
    ///
    /// assert!(Key::parse("ABC").is_err());
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        let count = text.chars().count();
        if count != SIZE {
            return Err(EnigmaError::InvalidKeyLength {
                expected: SIZE,
                got: count,
            });
        }
        let mut cells = [None; SIZE];
        for (cell, c) in cells.iter_mut().zip(text.chars()) {
            *cell = alphabet::rank(c).map(|r| r as u8);
        }
        Ok(Key { cells })
    }

    /// Builds a key from submitted ranks.
    ///
    /// `-1`, or any value outside `0..26`, becomes a blank cell. Missing
    /// trailing cells are blank and extra cells are ignored.
    pub fn from_ranks(ranks: &[i64]) -> Self {
        let mut cells = [None; SIZE];
        for (cell, &r) in cells.iter_mut().zip(ranks) {
            if (0..SIZE as i64).contains(&r) {
                *cell = Some(r as u8);
            }
        }
        Key { cells }
    }

    /// Returns the ranks of this key, `-1` for blank cells.
    pub fn to_ranks(&self) -> Vec<i64> {
        self.cells
            .iter()
            .map(|cell| cell.map_or(-1, |r| r as i64))
            .collect()
    }

    /// Returns the substitution rank at `rank`, if the cell is filled.
    pub fn rank_at(&self, rank: usize) -> Option<usize> {
        self.cells.get(rank).copied().flatten().map(|r| r as usize)
    }

    /// Returns the substitution letter at `rank`, if the cell is filled.
    pub fn get(&self, rank: usize) -> Option<char> {
        self.rank_at(rank).map(alphabet::symbol)
    }

    /// Returns the inverse table.
    ///
    /// For each source rank `i` holding letter `key[i]`, the inverse holds
    /// `alphabet[i]` at the rank of `key[i]`. Blank cells leave their target
    /// blank. If a letter appears twice, the later position wins.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigma_task::key::Key;
    ///
    /// let key = Key::parse("EKMFLGDQVZNTOWYHXUSPAIBRCJ").unwrap();
    /// assert_eq!(key.invert().to_string(), "UWYGADFPVZBECKMTHXSLRINQOJ");
    /// assert_eq!(key.invert().invert(), key);
    /// ```
    pub fn invert(&self) -> Self {
        let mut cells = [None; SIZE];
        for (i, cell) in self.cells.iter().enumerate() {
            if let Some(pos) = cell {
                cells[*pos as usize] = Some(i as u8);
            }
        }
        Key { cells }
    }

    /// Returns `true` if every letter appears in exactly one cell.
    pub fn is_permutation(&self) -> bool {
        let mut seen = [false; SIZE];
        for cell in &self.cells {
            match cell {
                Some(r) if !seen[*r as usize] => seen[*r as usize] = true,
                _ => return false,
            }
        }
        true
    }

    /// Returns `true` if no cell is blank.
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Returns a copy with the cell at `rank` set to `symbol`.
    ///
    /// `None`, or a symbol outside the alphabet, blanks the cell. An
    /// out-of-range `rank` returns the key unchanged.
    pub fn with_cell(&self, rank: usize, symbol: Option<char>) -> Self {
        let mut next = *self;
        if let Some(cell) = next.cells.get_mut(rank) {
            *cell = symbol.and_then(alphabet::rank).map(|r| r as u8);
        }
        next
    }

    /// Returns a copy with letters `a` and `b` exchanged wherever they appear.
    ///
    /// Exchanging two letters of a permutation yields a permutation.
    pub fn swap_symbols(&self, a: char, b: char) -> Self {
        let (Some(ra), Some(rb)) = (alphabet::rank(a), alphabet::rank(b)) else {
            return *self;
        };
        let (ra, rb) = (ra as u8, rb as u8);
        let mut next = *self;
        for cell in next.cells.iter_mut() {
            *cell = match *cell {
                Some(r) if r == ra => Some(rb),
                Some(r) if r == rb => Some(ra),
                other => other,
            };
        }
        next
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cell in &self.cells {
            let c = cell.map_or(BLANK, |r| alphabet::symbol(r as usize));
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}
