//! Engine configuration.
//!
//! Every field has a default matching the reference puzzle, so an empty
//! JSON object (or no configuration file at all) yields the standard task.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{EnigmaError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Number of leading ciphertext characters decoded when grading.
    #[serde(default = "default_eval_length")]
    pub eval_length: usize,
    /// Points removed per hint used.
    #[serde(default = "default_hint_penalty")]
    pub hint_penalty: u32,
    /// Score of a correct answer with no hints.
    #[serde(default = "default_max_score")]
    pub max_score: u32,
    /// Shortest plaintext, inclusive.
    #[serde(default = "default_min_text_length")]
    pub min_text_length: usize,
    /// Longest plaintext, exclusive.
    #[serde(default = "default_max_text_length")]
    pub max_text_length: usize,
    #[serde(default = "default_frequency_decimals")]
    pub frequency_decimals: u32,
}

fn default_eval_length() -> usize {
    200
}

fn default_hint_penalty() -> u32 {
    5
}

fn default_max_score() -> u32 {
    100
}

fn default_min_text_length() -> usize {
    30000
}

fn default_max_text_length() -> usize {
    31000
}

fn default_frequency_decimals() -> u32 {
    4
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            eval_length: default_eval_length(),
            hint_penalty: default_hint_penalty(),
            max_score: default_max_score(),
            min_text_length: default_min_text_length(),
            max_text_length: default_max_text_length(),
            frequency_decimals: default_frequency_decimals(),
        }
    }
}

impl EngineConfig {
    /// Parses and validates a JSON configuration.
    ///
    /// # Errors
    /// Returns [`EnigmaError::Config`] on malformed JSON or invalid values.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: EngineConfig =
            serde_json::from_str(json).map_err(|e| EnigmaError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a JSON configuration file.
    ///
    /// # Errors
    /// Returns [`EnigmaError::Io`] if the file cannot be read, or
    /// [`EnigmaError::Config`] if its contents are invalid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Checks that the configuration can produce gradable tasks.
    ///
    /// The evaluated prefix must fit in the shortest plaintext.
    pub fn validate(&self) -> Result<()> {
        if self.min_text_length >= self.max_text_length {
            return Err(EnigmaError::Config(format!(
                "min_text_length ({}) must be below max_text_length ({})",
                self.min_text_length, self.max_text_length
            )));
        }
        if self.eval_length == 0 || self.eval_length > self.min_text_length {
            return Err(EnigmaError::Config(format!(
                "eval_length ({}) must be in 1..={}",
                self.eval_length, self.min_text_length
            )));
        }
        if self.frequency_decimals > 15 {
            return Err(EnigmaError::Config(
                "frequency_decimals must be at most 15".to_string(),
            ));
        }
        Ok(())
    }
}
