//! The fixed 26-letter uppercase Latin alphabet.
//!
//! Every position in a key, a frequency table or a rotor is a *rank*: the
//! zero-based index of a letter in [`ALPHABET`].

/// The alphabet, in rank order.
pub const ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Number of letters in the alphabet.
pub const SIZE: usize = 26;

/// Character written wherever a key cell is unfilled.
pub const BLANK: char = ' ';

const LETTERS: [u8; SIZE] = *b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Returns the rank of `c`, or `None` if `c` is not an alphabet letter.
///
/// # Examples
///
/// ```
/// use enigma_task::alphabet;
///
/// assert_eq!(alphabet::rank('A'), Some(0));
/// assert_eq!(alphabet::rank('E'), Some(4));
/// assert_eq!(alphabet::rank('e'), None);
/// ```
pub fn rank(c: char) -> Option<usize> {
    if c.is_ascii_uppercase() {
        Some((c as u8 - b'A') as usize)
    } else {
        None
    }
}

/// Returns the letter at `rank`.
///
/// # Panics
/// Panics if `rank >= SIZE`; callers only pass ranks produced by this module.
pub fn symbol(rank: usize) -> char {
    LETTERS[rank] as char
}

/// Rotates `rank` by `offset` positions, wrapping around the alphabet.
///
/// Negative offsets rotate leftward.
pub fn rotate(rank: usize, offset: i64) -> usize {
    (rank as i64 + offset).rem_euclid(SIZE as i64) as usize
}

/// Rank of `'E'`, the letter fixed rotors always map onto itself.
pub const E_RANK: usize = 4;
