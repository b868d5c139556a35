//! Lossless widening of arbitrary-precision numbers.
//!
//! JSON consumers downstream of a log pipeline cannot be trusted with
//! numbers beyond the native 64-bit/double range; many parse them into
//! floats and silently lose digits. Before a record is serialized for
//! redaction, every number that is not representable as `i64`, `u64` or a
//! finite decimal `f64` is widened to its exact decimal text.
//!
//! Such numbers arise from serialized `i128`/`u128` values beyond 64-bit
//! range and from big integers parsed out of request JSON (the crate builds
//! `serde_json` with `arbitrary_precision`, so they survive parsing intact).
//!
//! Normalization is total and idempotent: it never fails, and widened
//! output contains nothing left to widen.

use serde_json::Value;

use crate::record::Fields;

/// Normalizes a value for safe serialization, recursively.
///
/// Numbers outside the native JSON range become their decimal text; every
/// other value passes through unchanged.
#[must_use]
pub fn normalize(value: Value) -> Value {
    match value {
        Value::Number(number) => {
            if number.is_i64() || number.is_u64() || number.is_f64() {
                Value::Number(number)
            } else {
                Value::String(number.to_string())
            }
        }
        Value::Array(items) => Value::Array(items.into_iter().map(normalize).collect()),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (key, normalize(value)))
                .collect(),
        ),
        other => other,
    }
}

/// Normalizes every value of a field map. See [`normalize`].
#[must_use]
pub fn normalize_fields(fields: Fields) -> Fields {
    fields
        .into_iter()
        .map(|(key, value)| (key, normalize(value)))
        .collect()
}
