//! Error types for the enigma-task engine.

use thiserror::Error;

/// Result type used throughout the engine.
pub type Result<T> = std::result::Result<T, EnigmaError>;

/// Errors produced by the enigma-task engine.
#[derive(Error, Debug)]
pub enum EnigmaError {
    /// The hint was already present in the task's requested hints.
    #[error("hint already requested")]
    HintAlreadyRequested,

    /// No built-in rotor set exists for this version.
    #[error("unknown rotors version {0}")]
    UnknownRotorsVersion(u32),

    /// A key string does not have one cell per alphabet letter.
    #[error("key must have {expected} cells, got {got}")]
    InvalidKeyLength { expected: usize, got: usize },

    /// The number of keys does not match the number of rotors.
    #[error("cascade has {rotors} rotors but {keys} keys")]
    RotorKeyMismatch { rotors: usize, keys: usize },

    /// A rotor index past the end of the cascade.
    #[error("no rotor {rotor_index} in a cascade of {rotors}")]
    RotorOutOfRange { rotor_index: usize, rotors: usize },

    /// A hint request points outside the rotor cascade or the alphabet.
    #[error("hint request out of range: rotor {rotor_index}, cell {cell_rank}")]
    HintOutOfRange { rotor_index: usize, cell_rank: usize },

    /// The hint request list could not be parsed at all.
    #[error("invalid hint requests: {0}")]
    InvalidHintRequests(#[source] serde_json::Error),

    /// The submitted answer is not a JSON object with a `rotors` list.
    #[error("invalid answer: {0}")]
    InvalidAnswer(String),

    /// A stored task record has no usable seed.
    #[error("invalid task record: {0}")]
    InvalidTaskRecord(String),

    /// Engine configuration is inconsistent.
    #[error("configuration error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
