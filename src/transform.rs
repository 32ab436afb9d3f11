//! Rotor transform engine.
//!
//! Each rotor combines a substitution key with a positional rotation. The
//! two primitive passes, [`rotate_and_substitute`] and
//! [`substitute_and_rotate`], both invert the key they are handed before
//! use; which pass a rotor runs, and with which rotation sign, depends on
//! its [`EditableRow`] and on the direction:
//!
//! ```text
//!                 decode (key = decoding key)     encode (key = encoding key)
//! top-editable    substitute_and_rotate(+1)       rotate_and_substitute(-1)
//! bottom-editable rotate_and_substitute(-1)       substitute_and_rotate(+1)
//! ```
//!
//! Decoding visits rotors first to last; encoding visits them last to first.
//!
//! Characters outside the alphabet pass through untouched, but they still
//! count as text positions for the rotation schedule. A lookup through a
//! blank key cell produces [`BLANK`].

use crate::alphabet::{self, BLANK};
use crate::error::{EnigmaError, Result};
use crate::key::Key;
use crate::rotor::{EditableRow, RotorSpec};

/// Rotates each letter by `sign * offset`, then substitutes it through the
/// inverse of `key`.
pub fn rotate_and_substitute(key: &Key, spec: &RotorSpec, sign: i64, text: &str) -> String {
    let table = key.invert();
    text.chars()
        .enumerate()
        .map(|(position, c)| match alphabet::rank(c) {
            Some(rank) => {
                let rotated = alphabet::rotate(rank, sign * spec.shift_at(position) as i64);
                table.get(rotated).unwrap_or(BLANK)
            }
            None => c,
        })
        .collect()
}

/// Substitutes each letter through the inverse of `key`, then rotates the
/// result by `sign * offset`.
pub fn substitute_and_rotate(key: &Key, spec: &RotorSpec, sign: i64, text: &str) -> String {
    let table = key.invert();
    text.chars()
        .enumerate()
        .map(|(position, c)| match alphabet::rank(c) {
            Some(rank) => match table.rank_at(rank) {
                Some(substituted) => alphabet::symbol(alphabet::rotate(
                    substituted,
                    sign * spec.shift_at(position) as i64,
                )),
                None => BLANK,
            },
            None => c,
        })
        .collect()
}

fn encode_rotor(spec: &RotorSpec, key: &Key, text: &str) -> String {
    match spec.editable_row {
        EditableRow::Top => rotate_and_substitute(key, spec, -1, text),
        EditableRow::Bottom => substitute_and_rotate(key, spec, 1, text),
    }
}

fn decode_rotor(spec: &RotorSpec, key: &Key, text: &str) -> String {
    match spec.editable_row {
        EditableRow::Top => substitute_and_rotate(key, spec, 1, text),
        EditableRow::Bottom => rotate_and_substitute(key, spec, -1, text),
    }
}

fn check_lengths(rotors: &[RotorSpec], keys: &[Key]) -> Result<()> {
    if rotors.len() != keys.len() {
        return Err(EnigmaError::RotorKeyMismatch {
            rotors: rotors.len(),
            keys: keys.len(),
        });
    }
    Ok(())
}

/// Encodes `text` through the full cascade, last rotor first.
///
/// `keys` are the encoding keys, one per rotor, in rotor order.
///
/// # Errors
/// Returns [`EnigmaError::RotorKeyMismatch`] if the counts differ.
pub fn encode(rotors: &[RotorSpec], keys: &[Key], text: &str) -> Result<String> {
    check_lengths(rotors, keys)?;
    let mut text = text.to_owned();
    for (spec, key) in rotors.iter().zip(keys).rev() {
        text = encode_rotor(spec, key, &text);
    }
    Ok(text)
}

/// Decodes `text` through the full cascade, first rotor first.
///
/// `keys` are the decoding keys, one per rotor, in rotor order.
///
/// # Errors
/// Returns [`EnigmaError::RotorKeyMismatch`] if the counts differ.
pub fn decode(rotors: &[RotorSpec], keys: &[Key], text: &str) -> Result<String> {
    check_lengths(rotors, keys)?;
    let mut text = text.to_owned();
    for (spec, key) in rotors.iter().zip(keys) {
        text = decode_rotor(spec, key, &text);
    }
    Ok(text)
}

/// A rotor set paired with its decoding keys.
///
/// Holds keys from the decoding side, the way a player edits them;
/// encoding keys are derived on demand.
///
/// # Examples
///
/// ```
/// use enigma_task::key::Key;
/// use enigma_task::rotor::{EditableRow, RotorSpec};
/// use enigma_task::transform::RotorCascade;
///
/// let cascade = RotorCascade::new(
///     vec![RotorSpec::new(1, EditableRow::Top)],
///     vec![Key::parse("UWYGADFPVZBECKMTHXSLRINQOJ").unwrap()],
/// )
/// .unwrap();
///
/// assert_eq!(cascade.encode("ENIGMA"), "ACFGVI");
/// assert_eq!(cascade.decode("ACFGVI"), "ENIGMA");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotorCascade {
    rotors: Vec<RotorSpec>,
    decoding_keys: Vec<Key>,
}

impl RotorCascade {
    /// Pairs `rotors` with their decoding keys.
    ///
    /// # Errors
    /// Returns [`EnigmaError::RotorKeyMismatch`] if the counts differ.
    pub fn new(rotors: Vec<RotorSpec>, decoding_keys: Vec<Key>) -> Result<Self> {
        check_lengths(&rotors, &decoding_keys)?;
        Ok(RotorCascade {
            rotors,
            decoding_keys,
        })
    }

    pub fn rotors(&self) -> &[RotorSpec] {
        &self.rotors
    }

    pub fn decoding_keys(&self) -> &[Key] {
        &self.decoding_keys
    }

    /// Encoding keys, i.e. the inverse of each decoding key.
    pub fn encoding_keys(&self) -> Vec<Key> {
        self.decoding_keys.iter().map(Key::invert).collect()
    }

    pub fn encode(&self, text: &str) -> String {
        let mut text = text.to_owned();
        for (spec, key) in self.rotors.iter().zip(self.encoding_keys()).rev() {
            text = encode_rotor(spec, &key, &text);
        }
        text
    }

    pub fn decode(&self, text: &str) -> String {
        let mut text = text.to_owned();
        for (spec, key) in self.rotors.iter().zip(&self.decoding_keys) {
            text = decode_rotor(spec, key, &text);
        }
        text
    }

    /// Decodes the single character found at text position `position`.
    ///
    /// Equivalent to the character at `position` in `decode(text)`; lets a
    /// caller step through a long ciphertext without decoding all of it.
    pub fn decode_symbol(&self, position: usize, c: char) -> char {
        let mut current = c;
        for (spec, key) in self.rotors.iter().zip(&self.decoding_keys) {
            let Some(rank) = alphabet::rank(current) else {
                return current;
            };
            let offset = spec.shift_at(position) as i64;
            let inverse = key.invert();
            current = match spec.editable_row {
                EditableRow::Top => match inverse.rank_at(rank) {
                    Some(r) => alphabet::symbol(alphabet::rotate(r, offset)),
                    None => BLANK,
                },
                EditableRow::Bottom => inverse
                    .get(alphabet::rotate(rank, -offset))
                    .unwrap_or(BLANK),
            };
        }
        current
    }

    /// Offsets of every rotor at text position `position`.
    pub fn shifts_at(&self, position: usize) -> Vec<usize> {
        self.rotors.iter().map(|r| r.shift_at(position)).collect()
    }
}
