//! Task data generation.
//!
//! A task is fully determined by its seed and rotor-set version. Nothing is
//! stored between calls: every request rebuilds the plaintext, the keys and
//! the ciphertext by replaying the same seeded sequence.
//!
//! ```text
//! seed ─► root MT ─┬─► key MT  ─► shuffle one key per rotor (last rotor first)
//!                  └─► text MT ─► plaintext
//! plaintext ─► encode(encoding keys) ─► ciphertext ─► residue frequency tables
//! hint requests + fixed-rotor E→E ─► granted hints (read from decoding keys)
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::alphabet::{self, ALPHABET, SIZE};
use crate::config::EngineConfig;
use crate::error::Result;
use crate::frequency::{self, FrequencyEntry, REFERENCE_FREQUENCIES};
use crate::hints::{self, Hint, HintRequest};
use crate::key::Key;
use crate::random::{derive_sub_seeds, shuffle, MersenneTwister64, RandomSource};
use crate::rotor::{self, RotorSpec};
use crate::text::{SentenceGenerator, TextGenerator};
use crate::transform::{self, RotorCascade};

/// What identifies a task: its seed, its version and the hints asked so far.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskParams {
    pub seed: u64,
    pub version: u32,
    pub hints_requested: Vec<HintRequest>,
}

impl TaskParams {
    pub fn new(seed: u64, version: u32) -> Self {
        TaskParams {
            seed,
            version,
            hints_requested: Vec::new(),
        }
    }

    pub fn with_hints(mut self, hints_requested: Vec<HintRequest>) -> Self {
        self.hints_requested = hints_requested;
        self
    }
}

/// The part of a task sent to the player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicData {
    pub alphabet: String,
    pub cipher_text: String,
    pub rotors: Vec<RotorSpec>,
    pub hints: Vec<Hint>,
    /// One table per residue class of ciphertext positions modulo 26.
    pub frequencies: Vec<[f64; SIZE]>,
    pub reference_frequencies: Vec<FrequencyEntry>,
}

/// The part of a task that never leaves the server.
///
/// Has no serialization, and its `Debug` output hides the contents.
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateData {
    pub plaintext: String,
    pub encoding_keys: Vec<Key>,
    pub decoding_keys: Vec<Key>,
}

impl fmt::Debug for PrivateData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateData")
            .field("plaintext_len", &self.plaintext.len())
            .field("keys", &self.decoding_keys.len())
            .finish_non_exhaustive()
    }
}

/// A fully generated task.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskInstance {
    pub public: PublicData,
    pub private: PrivateData,
    /// Hints granted because the player asked for them (fixed-rotor hints
    /// are free and not counted).
    pub hints_used: usize,
}

impl TaskInstance {
    /// The task's rotors with their true decoding keys.
    pub fn cascade(&self) -> Result<RotorCascade> {
        RotorCascade::new(self.public.rotors.clone(), self.private.decoding_keys.clone())
    }
}

/// Generates one random encoding key per rotor.
///
/// Keys are drawn last rotor first. A fixed rotor's key is then adjusted so
/// that `E` maps to `E`, by exchanging `E` with whatever letter sat at `E`'s
/// rank.
pub fn generate_keys<R: RandomSource + ?Sized>(rng: &mut R, rotors: &[RotorSpec]) -> Vec<Key> {
    let mut keys = vec![Key::blank(); rotors.len()];
    for (spec, slot) in rotors.iter().zip(keys.iter_mut()).rev() {
        let mut deck: Vec<i64> = (0..SIZE as i64).collect();
        shuffle(rng, &mut deck);
        let mut key = Key::from_ranks(&deck);
        if spec.is_fixed() {
            if let Some(current) = key.get(alphabet::E_RANK) {
                key = key.swap_symbols('E', current);
            }
        }
        *slot = key;
    }
    keys
}

/// Builds tasks from seeds.
///
/// # Examples
///
/// ```
/// use enigma_task::config::EngineConfig;
/// use enigma_task::task::{TaskGenerator, TaskParams};
///
/// let generator = TaskGenerator::new(EngineConfig::default()).unwrap();
/// let task = generator.generate(&TaskParams::new(42, 2)).unwrap();
///
/// assert_eq!(task.public.rotors.len(), 2);
/// assert_eq!(task.public.cipher_text.len(), task.private.plaintext.len());
/// // The fixed rotor's E→E cell is always revealed.
/// assert_eq!(task.public.hints.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct TaskGenerator<T: TextGenerator = SentenceGenerator> {
    config: EngineConfig,
    text: T,
}

impl TaskGenerator<SentenceGenerator> {
    /// Builds a generator with the French sentence generator.
    ///
    /// # Errors
    /// Returns [`EnigmaError::Config`](crate::error::EnigmaError::Config) if
    /// `config` fails [`EngineConfig::validate`].
    pub fn new(config: EngineConfig) -> Result<Self> {
        Self::with_text_generator(config, SentenceGenerator)
    }
}

impl<T: TextGenerator> TaskGenerator<T> {
    pub fn with_text_generator(config: EngineConfig, text: T) -> Result<Self> {
        config.validate()?;
        Ok(TaskGenerator { config, text })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Rebuilds the task identified by `params`.
    ///
    /// # Errors
    /// Returns [`EnigmaError::UnknownRotorsVersion`](crate::error::EnigmaError::UnknownRotorsVersion)
    /// for versions without a built-in rotor set.
    pub fn generate(&self, params: &TaskParams) -> Result<TaskInstance> {
        let rotors = rotor::rotors_for_version(params.version)?;
        let seeds = derive_sub_seeds(params.seed);

        let mut key_rng = MersenneTwister64::with_seed(seeds.keys);
        let encoding_keys = generate_keys(&mut key_rng, rotors);
        let decoding_keys: Vec<Key> = encoding_keys.iter().map(Key::invert).collect();

        let mut text_rng = MersenneTwister64::with_seed(seeds.text);
        let plaintext = self.text.generate(
            &mut text_rng,
            self.config.min_text_length,
            self.config.max_text_length,
        );

        let cipher_text = transform::encode(rotors, &encoding_keys, &plaintext)?;
        let frequencies = frequency::frequency_tables(&cipher_text, self.config.frequency_decimals);

        let requested: Vec<HintRequest> = hints::dedup_requests(&params.hints_requested)
            .into_iter()
            .filter(|request| request.is_within(rotors.len()))
            .collect();
        let hints_used = requested.len();
        let mut all_requests = requested;
        for request in hints::fixed_rotor_requests(rotors) {
            if !all_requests.contains(&request) {
                all_requests.push(request);
            }
        }
        let hints = hints::grant_hints(&decoding_keys, &all_requests);

        debug!(
            seed = params.seed,
            version = params.version,
            text_len = plaintext.len(),
            hints = hints.len(),
            "generated task data"
        );

        Ok(TaskInstance {
            public: PublicData {
                alphabet: ALPHABET.to_string(),
                cipher_text,
                rotors: rotors.to_vec(),
                hints,
                frequencies,
                reference_frequencies: REFERENCE_FREQUENCIES.to_vec(),
            },
            private: PrivateData {
                plaintext,
                encoding_keys,
                decoding_keys,
            },
            hints_used,
        })
    }
}
