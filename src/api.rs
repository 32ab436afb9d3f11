//! Entry points for the host platform.
//!
//! The platform persists a task as a loosely typed record: a seed, a
//! `params.version` that may be a number or a string, and the requested
//! hints as a JSON-encoded string. These functions normalize that record
//! into [`TaskParams`] and call the engine. Transport is the caller's
//! business.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::coerce;
use crate::config::EngineConfig;
use crate::error::{EnigmaError, Result};
use crate::grading::{self, Answer, Grade};
use crate::hints::{self, HintRequest};
use crate::rotor;
use crate::task::{PublicData, TaskGenerator, TaskParams};

/// A task as stored by the host platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    #[serde(deserialize_with = "loose_seed")]
    pub random_seed: u64,
    #[serde(default)]
    pub params: RecordParams,
    #[serde(default, deserialize_with = "loose_hints")]
    pub hints_requested: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RecordParams {
    #[serde(default, deserialize_with = "loose_version")]
    pub version: u32,
}

fn loose_seed<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<u64, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_u64()
            .ok_or_else(|| de::Error::custom(format!("seed {} is not a non-negative integer", n))),
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("seed {:?} is not a non-negative integer", s))),
        other => Err(de::Error::custom(format!("unexpected seed {}", other))),
    }
}

/// Reads a version the way the platform always has: leading digits of a
/// string, or an integer (integral floats included), `0` for anything else.
fn loose_version<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<u32, D::Error> {
    let value = Value::deserialize(deserializer)?;
    let version = match &value {
        Value::Number(_) => coerce::integer(&value).and_then(|v| u32::try_from(v).ok()),
        Value::String(s) => {
            let digits: String = s
                .trim_start()
                .chars()
                .take_while(char::is_ascii_digit)
                .collect();
            digits.parse().ok()
        }
        _ => None,
    };
    Ok(version.unwrap_or_else(|| {
        warn!(version = %value, "unreadable task version, using 0");
        0
    }))
}

/// Accepts the hint list as a JSON string (the stored form) or as an
/// already-decoded array.
fn loose_hints<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        list @ Value::Array(_) => Ok(Some(list.to_string())),
        other => Err(de::Error::custom(format!("unexpected hints_requested {}", other))),
    }
}

impl TaskRecord {
    pub fn new(random_seed: u64, version: u32) -> Self {
        TaskRecord {
            random_seed,
            params: RecordParams { version },
            hints_requested: None,
        }
    }

    /// Parses a stored record.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidTaskRecord`] if the JSON is malformed
    /// or the seed is unusable.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| EnigmaError::InvalidTaskRecord(e.to_string()))
    }

    pub fn hint_requests(&self) -> Result<Vec<HintRequest>> {
        hints::parse_hints_requested(self.hints_requested.as_deref())
    }

    pub fn task_params(&self) -> Result<TaskParams> {
        Ok(TaskParams::new(self.random_seed, self.params.version).with_hints(self.hint_requests()?))
    }

    /// The record after `request` has been granted, ready to be stored.
    pub fn with_hint(&self, request: HintRequest) -> Result<TaskRecord> {
        let mut requests = self.hint_requests()?;
        requests.push(request);
        let encoded = serde_json::to_string(&requests).map_err(EnigmaError::InvalidHintRequests)?;
        Ok(TaskRecord {
            hints_requested: Some(encoded),
            ..self.clone()
        })
    }
}

/// Reads a hint request in any of the shapes the client sends.
///
/// # Errors
/// Returns [`EnigmaError::InvalidHintRequests`] if `value` holds no
/// `rotorIndex`/`cellRank` pair.
pub fn parse_hint_request(value: &Value) -> Result<HintRequest> {
    HintRequest::from_value(value).ok_or_else(|| {
        EnigmaError::InvalidHintRequests(de::Error::custom(format!(
            "not a hint request: {}",
            value
        )))
    })
}

/// Public data of the task behind `record`.
pub fn task_data(record: &TaskRecord, config: &EngineConfig) -> Result<PublicData> {
    let generator = TaskGenerator::new(config.clone())?;
    Ok(generator.generate(&record.task_params()?)?.public)
}

/// Checks that `request` may be granted for `record`.
///
/// # Errors
/// - [`EnigmaError::HintAlreadyRequested`] if the record already holds it.
/// - [`EnigmaError::HintOutOfRange`] if it addresses no cell of the task.
pub fn request_hint(record: &TaskRecord, request: &Value) -> Result<HintRequest> {
    let request = parse_hint_request(request)?;
    let rotors = rotor::rotors_for_version(record.params.version)?;
    hints::request_hint(rotors, &record.hint_requests()?, request)
}

/// Grades a submitted answer.
///
/// An answer that is not even a JSON object grades as an empty answer.
pub fn grade_answer(record: &TaskRecord, answer_json: &str, config: &EngineConfig) -> Result<Grade> {
    let answer = Answer::from_json(answer_json).unwrap_or_else(|err| {
        warn!(error = %err, "malformed answer graded as empty");
        Answer::default()
    });
    let generator = TaskGenerator::new(config.clone())?;
    grading::grade_answer(&generator, &record.task_params()?, &answer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config() -> EngineConfig {
        EngineConfig {
            min_text_length: 300,
            max_text_length: 350,
            ..EngineConfig::default()
        }
    }

    #[test]
    fn test_record_loose_shapes() {
        let record =
            TaskRecord::from_json(r#"{"random_seed": 300348454218987061, "params": {"version": "2"}, "hints_requested": "[]"}"#)
                .unwrap();
        assert_eq!(record.random_seed, 300348454218987061);
        assert_eq!(record.params.version, 2);
        assert_eq!(record.hints_requested.as_deref(), Some("[]"));

        let record = TaskRecord::from_json(r#"{"random_seed": "17", "params": {"version": 3}}"#).unwrap();
        assert_eq!((record.random_seed, record.params.version), (17, 3));
        assert_eq!(record.hints_requested, None);

        let record = TaskRecord::from_json(
            r#"{"random_seed": 1, "params": {"version": "beta"}, "hints_requested": [{"rotorIndex": 0, "cellRank": 2}]}"#,
        )
        .unwrap();
        assert_eq!(record.params.version, 0);
        assert_eq!(record.hint_requests().unwrap(), vec![HintRequest::new(0, 2)]);

        let record = TaskRecord::from_json(r#"{"random_seed": 1, "params": {"version": "1abc"}}"#).unwrap();
        assert_eq!(record.params.version, 1);

        let record = TaskRecord::from_json(r#"{"random_seed": 1, "params": {"version": 2.0}}"#).unwrap();
        assert_eq!(record.params.version, 2);
        let record = TaskRecord::from_json(r#"{"random_seed": 1, "params": {"version": 2.5}}"#).unwrap();
        assert_eq!(record.params.version, 0);
    }

    #[test]
    fn test_record_without_seed_rejected() {
        for json in [r#"{"params": {"version": 1}}"#, r#"{"random_seed": -4}"#, r#"{"random_seed": "x"}"#] {
            assert!(
                matches!(TaskRecord::from_json(json), Err(EnigmaError::InvalidTaskRecord(_))),
                "{}",
                json
            );
        }
    }

    #[test]
    fn test_task_data_matches_generator() {
        let record = TaskRecord::new(42, 2);
        let public = task_data(&record, &config()).unwrap();
        let direct = TaskGenerator::new(config())
            .unwrap()
            .generate(&TaskParams::new(42, 2))
            .unwrap()
            .public;
        assert_eq!(public, direct);
        assert_eq!(public.hints.len(), 1);
    }

    #[test]
    fn test_request_hint_flow() {
        let record = TaskRecord::new(9, 1);
        let granted = request_hint(&record, &json!({"rotorIndex": 0, "cellRank": "5"})).unwrap();
        assert_eq!(granted, HintRequest::new(0, 5));

        let record = record.with_hint(granted).unwrap();
        assert!(matches!(
            request_hint(&record, &json!("{\"rotorIndex\":0,\"cellRank\":5}")),
            Err(EnigmaError::HintAlreadyRequested)
        ));
        assert!(matches!(
            request_hint(&record, &json!({"rotorIndex": 1, "cellRank": 5})),
            Err(EnigmaError::HintOutOfRange { .. })
        ));
        assert!(matches!(
            request_hint(&record, &json!(null)),
            Err(EnigmaError::InvalidHintRequests(_))
        ));

        let public = task_data(&record, &config()).unwrap();
        assert_eq!(public.hints.len(), 1);
        assert_eq!((public.hints[0].rotor_index, public.hints[0].cell_rank), (0, 5));
    }

    #[test]
    fn test_grade_answer_end_to_end() {
        let config = config();
        let record = TaskRecord::new(300348454218987061, 2);
        let task = TaskGenerator::new(config.clone())
            .unwrap()
            .generate(&record.task_params().unwrap())
            .unwrap();
        let answer = serde_json::to_string(&Answer::from_keys(&task.private.decoding_keys)).unwrap();
        assert_eq!(grade_answer(&record, &answer, &config).unwrap().score, 100);

        let record = record
            .with_hint(HintRequest::new(0, 0))
            .unwrap()
            .with_hint(HintRequest::new(0, 1))
            .unwrap();
        assert_eq!(grade_answer(&record, &answer, &config).unwrap().score, 90);
    }

    #[test]
    fn test_malformed_answer_scores_zero() {
        let grade = grade_answer(&TaskRecord::new(5, 1), "not json", &config()).unwrap();
        assert_eq!(grade.score, 0);
    }

    #[test]
    fn test_stored_null_hint_list_still_grades() {
        let config = config();
        let record =
            TaskRecord::from_json(r#"{"random_seed": 5, "params": {"version": 1}, "hints_requested": "null"}"#)
                .unwrap();
        let public = task_data(&record, &config).unwrap();
        assert!(public.hints.is_empty());

        let task = TaskGenerator::new(config.clone())
            .unwrap()
            .generate(&record.task_params().unwrap())
            .unwrap();
        let answer = serde_json::to_string(&Answer::from_keys(&task.private.decoding_keys)).unwrap();
        assert_eq!(grade_answer(&record, &answer, &config).unwrap().score, 100);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = EngineConfig {
            eval_length: 0,
            ..config()
        };
        let record = TaskRecord::new(1, 3);
        assert!(matches!(task_data(&record, &config), Err(EnigmaError::Config(_))));
        assert!(matches!(
            grade_answer(&record, "{}", &config),
            Err(EnigmaError::Config(_))
        ));
    }

    #[test]
    fn test_unknown_version_is_an_error() {
        assert!(matches!(
            task_data(&TaskRecord::new(5, 7), &config()),
            Err(EnigmaError::UnknownRotorsVersion(7))
        ));
    }
}
