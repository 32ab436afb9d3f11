//! Loose numeric reads from JSON values.
//!
//! Stored task data and client payloads carry numbers as integers, as
//! integral floats (`3.0`) or as numeric strings. Every boundary reader goes
//! through these two functions so the shapes are accepted the same way
//! everywhere.

use serde_json::Value;

/// Reads an integer from a number, an integral float or a numeric string.
///
/// # Examples
///
/// ```
/// use enigma_task::coerce;
/// use serde_json::json;
///
/// assert_eq!(coerce::integer(&json!(3)), Some(3));
/// assert_eq!(coerce::integer(&json!(3.0)), Some(3));
/// assert_eq!(coerce::integer(&json!(" -2 ")), Some(-2));
/// assert_eq!(coerce::integer(&json!(3.5)), None);
/// assert_eq!(coerce::integer(&json!(null)), None);
/// ```
pub fn integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Some(i);
            }
            let f = n.as_f64()?;
            // i64::MAX as f64 rounds up to 2^63, hence the strict bound.
            (f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64).then_some(f as i64)
        }
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Reads a non-negative index; see [`integer`].
pub fn index(value: &Value) -> Option<usize> {
    integer(value).and_then(|i| usize::try_from(i).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_integer_shapes() {
        assert_eq!(integer(&json!(-1)), Some(-1));
        assert_eq!(integer(&json!(12.0)), Some(12));
        assert_eq!(integer(&json!("7")), Some(7));
        assert_eq!(integer(&json!("7.0")), None);
        assert_eq!(integer(&json!(true)), None);
        assert_eq!(integer(&json!([1])), None);
        assert_eq!(integer(&json!(1e300)), None);
    }

    #[test]
    fn test_index_rejects_negative_and_fractional() {
        assert_eq!(index(&json!(-1)), None);
        assert_eq!(index(&json!(-1.0)), None);
        assert_eq!(index(&json!(2.5)), None);
        assert_eq!(index(&json!(" 9 ")), Some(9));
        assert_eq!(index(&json!(4.0)), Some(4));
    }
}
