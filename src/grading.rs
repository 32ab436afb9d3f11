//! Answer grading.
//!
//! The grader trusts nothing but the seed: it regenerates the task, decodes
//! the start of the ciphertext with the submitted keys and compares the
//! result with the plaintext. Only a perfect match over the whole evaluated
//! prefix scores; there is no partial credit.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::coerce;
use crate::config::EngineConfig;
use crate::error::{EnigmaError, Result};
use crate::key::Key;
use crate::task::{TaskGenerator, TaskInstance, TaskParams};
use crate::text::TextGenerator;
use crate::transform;

/// A submitted answer: for each rotor, 26 ranks of the decoding key, `-1`
/// for an unfilled cell.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "RawAnswer")]
pub struct Answer {
    pub rotors: Vec<Vec<i64>>,
}

/// Wire shape of an answer, before cells are coerced to ranks.
#[derive(Deserialize)]
struct RawAnswer {
    #[serde(default)]
    rotors: Vec<Value>,
}

impl From<RawAnswer> for Answer {
    fn from(raw: RawAnswer) -> Self {
        let rotors = raw
            .rotors
            .iter()
            .map(|rotor| match rotor {
                Value::Array(cells) => cells.iter().map(|c| coerce::integer(c).unwrap_or(-1)).collect(),
                _ => Vec::new(),
            })
            .collect();
        Answer { rotors }
    }
}

impl Answer {
    /// Builds an answer from decoding keys.
    pub fn from_keys(keys: &[Key]) -> Self {
        Answer {
            rotors: keys.iter().map(Key::to_ranks).collect(),
        }
    }

    /// Parses a JSON answer.
    ///
    /// Integral floats and numeric strings are read as ranks; any other
    /// cell becomes a blank. The answer only has to be an object.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidAnswer`] if `json` is not an object
    /// with an optional `rotors` list.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| EnigmaError::InvalidAnswer(e.to_string()))
    }

    /// The submitted decoding keys for a cascade of `rotor_count` rotors.
    ///
    /// Missing rotors are entirely blank; extra rotors are ignored.
    pub fn keys(&self, rotor_count: usize) -> Vec<Key> {
        (0..rotor_count)
            .map(|i| self.rotors.get(i).map_or_else(Key::blank, |r| Key::from_ranks(r)))
            .collect()
    }
}

/// Outcome of a grading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grade {
    pub score: u32,
    pub message: String,
}

/// Score for a correct answer that used `hints_used` hints.
pub fn hint_penalized_score(config: &EngineConfig, hints_used: usize) -> u32 {
    let hints = u32::try_from(hints_used).unwrap_or(u32::MAX);
    config
        .max_score
        .saturating_sub(config.hint_penalty.saturating_mul(hints))
}

fn success_message(hints_used: usize) -> String {
    let plural = if hints_used > 1 { "s" } else { "" };
    format!(
        "Bravo, vous avez bien déchiffré le texte. Vous avez utilisé {} indice{}.",
        hints_used, plural
    )
}

fn failure_message(eval_length: usize) -> String {
    format!(
        "Il y a au moins une différence entre les {} premiers caractères de votre texte déchiffré et ceux du texte d'origine.",
        eval_length
    )
}

/// Grades `answer` against an already generated task.
///
/// # Errors
/// Returns [`EnigmaError::Config`] if `config` fails
/// [`EngineConfig::validate`]. Otherwise only transform errors propagate;
/// with keys built by [`Answer::keys`] the cascade sizes always agree.
pub fn grade(task: &TaskInstance, answer: &Answer, config: &EngineConfig) -> Result<Grade> {
    config.validate()?;
    let eval_length = config.eval_length;
    let rotors = &task.public.rotors;
    let keys = answer.keys(rotors.len());

    let eval_text: String = task.public.cipher_text.chars().take(eval_length).collect();
    let decoded = transform::decode(rotors, &keys, &eval_text)?;

    let expected = task.private.plaintext.chars().take(eval_length);
    let correct = decoded
        .chars()
        .zip(expected)
        .filter(|(got, want)| got == want)
        .count();

    let grade = if correct == eval_length {
        Grade {
            score: hint_penalized_score(config, task.hints_used),
            message: success_message(task.hints_used),
        }
    } else {
        Grade {
            score: 0,
            message: failure_message(eval_length),
        }
    };
    info!(
        score = grade.score,
        hints_used = task.hints_used,
        "graded answer"
    );
    Ok(grade)
}

/// Regenerates the task behind `params` and grades `answer` against it.
pub fn grade_answer<T: TextGenerator>(
    generator: &TaskGenerator<T>,
    params: &TaskParams,
    answer: &Answer,
) -> Result<Grade> {
    let task = generator.generate(params)?;
    grade(&task, answer, generator.config())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet;
    use crate::hints::HintRequest;

    fn generator() -> TaskGenerator {
        TaskGenerator::new(EngineConfig {
            min_text_length: 400,
            max_text_length: 500,
            ..EngineConfig::default()
        })
        .unwrap()
    }

    fn true_answer(generator: &TaskGenerator, params: &TaskParams) -> Answer {
        let task = generator.generate(params).unwrap();
        Answer::from_keys(&task.private.decoding_keys)
    }

    #[test]
    fn test_correct_answer_scores_full() {
        let generator = generator();
        let params = TaskParams::new(300348454218987061, 2);
        let answer = true_answer(&generator, &params);
        let grade = grade_answer(&generator, &params, &answer).unwrap();
        assert_eq!(grade.score, 100);
        assert!(grade.message.starts_with("Bravo"));
        assert!(grade.message.contains("0 indice."));
    }

    #[test]
    fn test_hint_penalty() {
        let generator = generator();
        let params = TaskParams::new(11, 1).with_hints(vec![
            HintRequest::new(0, 1),
            HintRequest::new(0, 2),
            HintRequest::new(0, 3),
        ]);
        let answer = true_answer(&generator, &params);
        let grade = grade_answer(&generator, &params, &answer).unwrap();
        assert_eq!(grade.score, 85);
        assert!(grade.message.contains("3 indices."));
    }

    #[test]
    fn test_penalty_floors_at_zero() {
        let config = EngineConfig::default();
        assert_eq!(hint_penalized_score(&config, 0), 100);
        assert_eq!(hint_penalized_score(&config, 19), 5);
        assert_eq!(hint_penalized_score(&config, 20), 0);
        assert_eq!(hint_penalized_score(&config, 26), 0);
        assert_eq!(hint_penalized_score(&config, usize::MAX), 0);
    }

    #[test]
    fn test_single_wrong_cell_scores_zero() {
        let generator = generator();
        let params = TaskParams::new(4242, 1);
        let task = generator.generate(&params).unwrap();
        let mut answer = Answer::from_keys(&task.private.decoding_keys);
        // Swap the first two cells: at least one evaluated letter changes.
        answer.rotors[0].swap(0, 1);
        let grade = grade(&task, &answer, generator.config()).unwrap();
        assert_eq!(grade.score, 0);
        assert!(grade.message.contains("200 premiers"));
    }

    #[test]
    fn test_grade_rejects_invalid_config() {
        let generator = generator();
        let task = generator.generate(&TaskParams::new(1, 3)).unwrap();
        for eval_length in [0, 100_000] {
            let config = EngineConfig {
                eval_length,
                ..generator.config().clone()
            };
            assert!(matches!(
                grade(&task, &Answer::default(), &config),
                Err(EnigmaError::Config(_))
            ));
        }
    }

    #[test]
    fn test_blank_answer_scores_zero() {
        let generator = generator();
        let params = TaskParams::new(1, 3);
        let grade = grade_answer(&generator, &params, &Answer::default()).unwrap();
        assert_eq!(grade.score, 0);
    }

    #[test]
    fn test_version_zero_needs_no_keys() {
        let generator = generator();
        let grade = grade_answer(&generator, &TaskParams::new(1, 0), &Answer::default()).unwrap();
        assert_eq!(grade.score, 100);
    }

    #[test]
    fn test_tolerant_answer_parsing() {
        let answer = Answer::from_json(r#"{"rotors": [[0, "x", null, 3.5, -1, 99], "junk"]}"#).unwrap();
        assert_eq!(answer.rotors, vec![vec![0, -1, -1, -1, -1, 99], vec![]]);

        let keys = answer.keys(3);
        assert_eq!(keys[0].get(0), Some('A'));
        assert_eq!(keys[0].get(5), None);
        assert_eq!(keys[1], Key::blank());
        assert_eq!(keys[2], Key::blank());

        let answer = Answer::from_json(r#"{"rotors": [[3.0, 4, "5", -1.0]]}"#).unwrap();
        assert_eq!(answer.rotors, vec![vec![3, 4, 5, -1]]);

        assert_eq!(Answer::from_json("{}").unwrap(), Answer::default());
        assert!(matches!(
            Answer::from_json("42"),
            Err(EnigmaError::InvalidAnswer(_))
        ));
    }

    #[test]
    fn test_answer_round_trips_keys() {
        let key = Key::parse("EKMFLGDQVZNTOWYHXUSPAIBRC ").unwrap();
        let answer = Answer::from_keys(&[key]);
        assert_eq!(answer.rotors[0][alphabet::SIZE - 1], -1);
        assert_eq!(answer.keys(1), vec![key]);
    }
}
