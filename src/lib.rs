//! Rotor substitution cipher puzzle engine.
//!
//! A task is an "Enigma-like" cascade of substitution rotors applied to a
//! long French plaintext. The player sees the ciphertext, per-column letter
//! frequencies and a few revealed key cells, and must reconstruct every
//! rotor's decoding key. Everything is derived from a seed: the engine keeps
//! no state, and grading regenerates the task to compare against.
//!
//! # Architecture
//!
//! ```text
//! alphabet / key    (ranks, permutations, inversion)
//!     ↓
//! rotor             (schedule + editable row, built-in versions 0..=3)
//!     ↓
//! transform         (per-rotor rotate/substitute, cascade encode/decode)
//!     ↓
//! task              (seed ─► MT19937-64 ─► keys + plaintext ─► ciphertext,
//!                    frequency tables, granted hints)
//!     ↓
//! grading           (decode first 200 letters, all-or-nothing, hint penalty)
//!     ↓
//! api               (loosely typed host records ─► typed calls)
//! ```
//!
//! # Examples
//!
//! Encode and decode through a two-rotor cascade:
//!
//! ```
//! use enigma_task::key::Key;
//! use enigma_task::rotor::rotors_for_version;
//! use enigma_task::transform::RotorCascade;
//!
//! let rotors = rotors_for_version(2).unwrap().to_vec();
//! let keys = vec![
//!     Key::parse("UWYGADFPVZBECKMTHXSLRINQOJ").unwrap(),
//!     Key::identity(),
//! ];
//! let cascade = RotorCascade::new(rotors, keys).unwrap();
//!
//! let cipher = cascade.encode("ENIGMA");
//! assert_eq!(cascade.decode(&cipher), "ENIGMA");
//! ```
//!
//! Generate a task and grade the true keys:
//!
//! ```
//! use enigma_task::config::EngineConfig;
//! use enigma_task::grading::{grade, Answer};
//! use enigma_task::task::{TaskGenerator, TaskParams};
//!
//! let generator = TaskGenerator::new(EngineConfig::default()).unwrap();
//! let task = generator.generate(&TaskParams::new(300348454218987061, 2)).unwrap();
//!
//! let answer = Answer::from_keys(&task.private.decoding_keys);
//! let result = grade(&task, &answer, generator.config()).unwrap();
//! assert_eq!(result.score, 100);
//! ```

#![deny(clippy::all)]

pub mod alphabet;
pub mod api;
pub mod coerce;
pub mod config;
pub mod error;
pub mod frequency;
pub mod grading;
pub mod hints;
pub mod key;
pub mod random;
pub mod rotor;
pub mod task;
pub mod text;
pub mod transform;
pub mod workspace;

pub use config::EngineConfig;
pub use error::{EnigmaError, Result};
pub use grading::{Answer, Grade};
pub use hints::{Hint, HintRequest};
pub use key::Key;
pub use rotor::{EditableRow, RotorSpec};
pub use task::{PublicData, TaskGenerator, TaskInstance, TaskParams};
pub use transform::RotorCascade;
