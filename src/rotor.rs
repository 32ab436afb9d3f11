//! Rotor specifications and the built-in rotor sets.
//!
//! Rotors are described from the decoding side: rotor 0 is the first rotor
//! a ciphertext passes through while being decoded.

use serde::{Deserialize, Serialize};

use crate::alphabet::SIZE;
use crate::error::{EnigmaError, Result};

/// Which face of a rotor holds the editable substitution.
///
/// - `Top`: decoding substitutes then rotates.
/// - `Bottom`: decoding rotates then substitutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditableRow {
    Top,
    Bottom,
}

/// One stage of the cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RotorSpec {
    /// Text positions between two increments of the rotor offset; 0 for a
    /// rotor that never turns.
    pub schedule: u32,
    pub editable_row: EditableRow,
}

impl RotorSpec {
    pub const fn new(schedule: u32, editable_row: EditableRow) -> Self {
        RotorSpec {
            schedule,
            editable_row,
        }
    }

    /// Returns `true` for a rotor that never turns.
    pub fn is_fixed(&self) -> bool {
        self.schedule == 0
    }

    /// Rotor offset, in `0..26`, when processing text position `position`.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigma_task::rotor::{EditableRow, RotorSpec};
    ///
    /// let slow = RotorSpec::new(26, EditableRow::Top);
    /// assert_eq!(slow.shift_at(25), 0);
    /// assert_eq!(slow.shift_at(26), 1);
    /// assert_eq!(RotorSpec::new(0, EditableRow::Top).shift_at(1000), 0);
    /// ```
    pub fn shift_at(&self, position: usize) -> usize {
        if self.schedule == 0 {
            return 0;
        }
        (position / self.schedule as usize) % SIZE
    }
}

const TOP: EditableRow = EditableRow::Top;

/// Built-in rotor sets, indexed by task version.
const VERSION_ROTORS: [&[RotorSpec]; 4] = [
    &[],
    &[RotorSpec::new(1, TOP)],
    &[RotorSpec::new(1, TOP), RotorSpec::new(0, TOP)],
    &[
        RotorSpec::new(1, TOP),
        RotorSpec::new(26, TOP),
        RotorSpec::new(26 * 26, TOP),
    ],
];

/// Number of built-in task versions.
pub const VERSION_COUNT: u32 = VERSION_ROTORS.len() as u32;

/// Returns the rotor set of task version `version`.
///
/// # Errors
/// Returns [`EnigmaError::UnknownRotorsVersion`] for versions outside `0..4`.
pub fn rotors_for_version(version: u32) -> Result<&'static [RotorSpec]> {
    VERSION_ROTORS
        .get(version as usize)
        .copied()
        .ok_or(EnigmaError::UnknownRotorsVersion(version))
}
