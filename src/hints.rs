//! Hint requests and granted hints.
//!
//! The host platform stores the requested hints as a JSON-encoded list whose
//! entries have drifted over time: most are objects, some are themselves
//! JSON strings, a few are `null`, and numbers sometimes arrive as strings.
//! [`parse_hints_requested`] folds all of these into typed
//! [`HintRequest`]s; nothing past this module sees the raw shapes.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::alphabet::{self, SIZE};
use crate::coerce;
use crate::error::{EnigmaError, Result};
use crate::key::Key;
use crate::rotor::RotorSpec;

/// A request to reveal one cell of one decoding key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HintRequest {
    pub rotor_index: usize,
    pub cell_rank: usize,
}

/// A revealed decoding-key cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hint {
    pub rotor_index: usize,
    pub cell_rank: usize,
    pub symbol: char,
}

impl HintRequest {
    pub fn new(rotor_index: usize, cell_rank: usize) -> Self {
        HintRequest {
            rotor_index,
            cell_rank,
        }
    }

    /// Reads a request from any of the shapes found in stored task data.
    ///
    /// Accepts an object with `rotorIndex` and `cellRank` (numbers or
    /// numeric strings), or a string containing such an object. Returns
    /// `None` for anything else, including `null`.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigma_task::hints::HintRequest;
    /// use serde_json::json;
    ///
    /// let expected = Some(HintRequest::new(1, 4));
    /// assert_eq!(HintRequest::from_value(&json!({"rotorIndex": 1, "cellRank": 4})), expected);
    /// assert_eq!(HintRequest::from_value(&json!({"rotorIndex": "1", "cellRank": "4"})), expected);
    /// assert_eq!(HintRequest::from_value(&json!("{\"rotorIndex\":1,\"cellRank\":4}")), expected);
    /// assert_eq!(HintRequest::from_value(&json!(null)), None);
    /// ```
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(HintRequest {
                rotor_index: coerce::index(map.get("rotorIndex")?)?,
                cell_rank: coerce::index(map.get("cellRank")?)?,
            }),
            Value::String(encoded) => {
                let inner: Value = serde_json::from_str(encoded).ok()?;
                match inner {
                    Value::Object(_) => Self::from_value(&inner),
                    _ => None,
                }
            }
            _ => None,
        }
    }

    /// Returns `true` if the request addresses a cell of the given cascade.
    pub fn is_within(&self, rotor_count: usize) -> bool {
        self.rotor_index < rotor_count && self.cell_rank < SIZE
    }
}

/// Parses the stored `hints_requested` list.
///
/// A missing or empty value, or a stored JSON `null`, means no hints.
/// Entries that cannot be read as requests are logged and skipped. Order is
/// preserved and duplicates are kept; see [`dedup_requests`].
///
/// # Errors
/// Returns [`EnigmaError::InvalidHintRequests`] if `raw` is neither a JSON
/// array nor `null`.
pub fn parse_hints_requested(raw: Option<&str>) -> Result<Vec<HintRequest>> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(Vec::new());
    };
    match serde_json::from_str(raw).map_err(EnigmaError::InvalidHintRequests)? {
        Value::Array(entries) => Ok(requests_from_values(&entries)),
        Value::Null => {
            warn!("hints_requested holds null, treated as empty");
            Ok(Vec::new())
        }
        other => Err(EnigmaError::InvalidHintRequests(serde::de::Error::custom(
            format!("expected a list of hint requests, got {}", other),
        ))),
    }
}

/// Converts already-decoded entries, skipping the unreadable ones.
pub fn requests_from_values(entries: &[Value]) -> Vec<HintRequest> {
    let mut requests = Vec::with_capacity(entries.len());
    for (position, entry) in entries.iter().enumerate() {
        match HintRequest::from_value(entry) {
            Some(request) => requests.push(request),
            None if entry.is_null() => {
                warn!(position, "null entry in hints_requested, skipped");
            }
            None => {
                warn!(position, entry = %entry, "unreadable entry in hints_requested, skipped");
            }
        }
    }
    requests
}

/// Removes repeated requests, keeping the first occurrence of each.
pub fn dedup_requests(requests: &[HintRequest]) -> Vec<HintRequest> {
    let mut unique: Vec<HintRequest> = Vec::with_capacity(requests.len());
    for request in requests {
        if unique.contains(request) {
            warn!(
                rotor_index = request.rotor_index,
                cell_rank = request.cell_rank,
                "duplicate hint request ignored"
            );
        } else {
            unique.push(*request);
        }
    }
    unique
}

/// Validates a new hint request against those already made.
///
/// Returns the request itself when it may be granted; the caller appends
/// it to the stored list.
///
/// # Errors
/// - [`EnigmaError::HintAlreadyRequested`] if an equal request exists.
/// - [`EnigmaError::HintOutOfRange`] if the cell is not part of the cascade.
pub fn request_hint(
    rotors: &[RotorSpec],
    existing: &[HintRequest],
    request: HintRequest,
) -> Result<HintRequest> {
    if existing.contains(&request) {
        return Err(EnigmaError::HintAlreadyRequested);
    }
    if !request.is_within(rotors.len()) {
        return Err(EnigmaError::HintOutOfRange {
            rotor_index: request.rotor_index,
            cell_rank: request.cell_rank,
        });
    }
    Ok(request)
}

/// The `E → E` requests granted automatically for every fixed rotor.
pub fn fixed_rotor_requests(rotors: &[RotorSpec]) -> Vec<HintRequest> {
    rotors
        .iter()
        .enumerate()
        .filter(|(_, spec)| spec.is_fixed())
        .map(|(rotor_index, _)| HintRequest::new(rotor_index, alphabet::E_RANK))
        .collect()
}

/// Reveals the decoding-key cell behind each request.
///
/// Requests outside the cascade, or pointing at a blank cell, are logged
/// and skipped.
pub fn grant_hints(decoding_keys: &[Key], requests: &[HintRequest]) -> Vec<Hint> {
    requests
        .iter()
        .filter_map(|request| {
            let symbol = decoding_keys
                .get(request.rotor_index)
                .and_then(|key| key.get(request.cell_rank));
            if symbol.is_none() {
                warn!(
                    rotor_index = request.rotor_index,
                    cell_rank = request.cell_rank,
                    "hint request does not address a key cell, skipped"
                );
            }
            symbol.map(|symbol| Hint {
                rotor_index: request.rotor_index,
                cell_rank: request.cell_rank,
                symbol,
            })
        })
        .collect()
}
