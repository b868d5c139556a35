//! Dotted, wildcard-capable field-path patterns.
//!
//! A pattern addresses values inside the redactable part of a record:
//! dot-separated segments, each either an exact key (case-sensitive, no
//! partial matches) or the single-segment wildcard `*` matching any one
//! key or index at that depth. Numeric segments address sequence indices
//! as well as object keys.
//!
//! Patterns are parsed once at configuration time (malformed input is a
//! [`ConfigError`]) and applied per record. A pattern that matches nothing
//! in a given record is a silent no-op.

use serde_json::Value;

use super::censor::Censor;
use crate::error::ConfigError;

/// The wildcard segment.
pub const WILDCARD: &str = "*";

#[derive(Clone, Debug, PartialEq, Eq)]
enum Segment {
    Key(String),
    Wildcard,
}

/// A parsed field-path pattern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Parses a dotted pattern, failing fast on malformed input.
    pub fn parse(pattern: &str) -> Result<Self, ConfigError> {
        if pattern.is_empty() {
            return Err(ConfigError::EmptyPattern);
        }
        let mut segments = Vec::new();
        for part in pattern.split('.') {
            if part.is_empty() {
                return Err(ConfigError::EmptySegment {
                    pattern: pattern.to_string(),
                });
            }
            segments.push(if part == WILDCARD {
                Segment::Wildcard
            } else {
                Segment::Key(part.to_string())
            });
        }
        Ok(Self {
            raw: pattern.to_string(),
            segments,
        })
    }

    /// Returns the pattern as supplied.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Replaces every value this pattern addresses in `value` with the
    /// censor's result for it.
    pub(crate) fn apply(&self, value: &mut Value, censor: &Censor) {
        apply_segments(value, &self.segments, censor);
    }
}

fn censor_slot(slot: &mut Value, censor: &Censor) {
    let replacement = censor.apply(slot);
    *slot = replacement;
}

fn apply_segments(value: &mut Value, segments: &[Segment], censor: &Censor) {
    let Some((head, rest)) = segments.split_first() else {
        return;
    };
    if rest.is_empty() {
        match (head, value) {
            (Segment::Wildcard, Value::Object(map)) => {
                for slot in map.values_mut() {
                    censor_slot(slot, censor);
                }
            }
            (Segment::Wildcard, Value::Array(items)) => {
                for slot in items.iter_mut() {
                    censor_slot(slot, censor);
                }
            }
            (Segment::Key(key), Value::Object(map)) => {
                if let Some(slot) = map.get_mut(key) {
                    censor_slot(slot, censor);
                }
            }
            (Segment::Key(key), Value::Array(items)) => {
                if let Some(slot) = key.parse::<usize>().ok().and_then(|idx| items.get_mut(idx)) {
                    censor_slot(slot, censor);
                }
            }
            _ => {}
        }
    } else {
        match (head, value) {
            (Segment::Wildcard, Value::Object(map)) => {
                for child in map.values_mut() {
                    apply_segments(child, rest, censor);
                }
            }
            (Segment::Wildcard, Value::Array(items)) => {
                for child in items.iter_mut() {
                    apply_segments(child, rest, censor);
                }
            }
            (Segment::Key(key), Value::Object(map)) => {
                if let Some(child) = map.get_mut(key) {
                    apply_segments(child, rest, censor);
                }
            }
            (Segment::Key(key), Value::Array(items)) => {
                if let Some(child) = key.parse::<usize>().ok().and_then(|idx| items.get_mut(idx)) {
                    apply_segments(child, rest, censor);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::PathPattern;
    use crate::redact::Censor;

    fn redact(pattern: &str, mut value: serde_json::Value) -> serde_json::Value {
        let pattern = PathPattern::parse(pattern).unwrap();
        pattern.apply(&mut value, &Censor::default());
        value
    }

    #[test]
    fn exact_path_hits_the_leaf() {
        let out = redact("a.b", json!({"a": {"b": "secret", "c": "clear"}}));
        assert_eq!(out, json!({"a": {"b": "[REDACTED]", "c": "clear"}}));
    }

    #[test]
    fn wildcard_matches_any_single_key() {
        let out = redact(
            "a.*.c",
            json!({"a": {"b": {"c": "secret"}, "d": {"c": "also"}, "e": {"x": "clear"}}}),
        );
        assert_eq!(
            out,
            json!({"a": {"b": {"c": "[REDACTED]"}, "d": {"c": "[REDACTED]"}, "e": {"x": "clear"}}})
        );
    }

    #[test]
    fn wildcard_descends_into_sequences() {
        let out = redact("items.*.token", json!({"items": [{"token": "a"}, {"token": "b"}]}));
        assert_eq!(
            out,
            json!({"items": [{"token": "[REDACTED]"}, {"token": "[REDACTED]"}]})
        );
    }

    #[test]
    fn numeric_segment_addresses_an_index() {
        let out = redact("items.1", json!({"items": ["keep", "scrub", "keep"]}));
        assert_eq!(out, json!({"items": ["keep", "[REDACTED]", "keep"]}));
    }

    #[test]
    fn matching_a_subtree_replaces_it_whole() {
        let out = redact("req.headers", json!({"req": {"headers": {"cookie": "x"}, "url": "/"}}));
        assert_eq!(out, json!({"req": {"headers": "[REDACTED]", "url": "/"}}));
    }

    #[test]
    fn matching_is_case_sensitive_and_exact() {
        let out = redact("Token", json!({"token": "keep", "Token": "scrub", "TokenX": "keep"}));
        assert_eq!(
            out,
            json!({"token": "keep", "Token": "[REDACTED]", "TokenX": "keep"})
        );
    }

    #[test]
    fn missing_paths_are_a_no_op() {
        let input = json!({"a": 1});
        assert_eq!(redact("nope.deep.er", input.clone()), input);
    }

    #[test]
    fn malformed_patterns_fail_parse() {
        assert!(PathPattern::parse("").is_err());
        assert!(PathPattern::parse("a..b").is_err());
        assert!(PathPattern::parse(".a").is_err());
        assert!(PathPattern::parse("a.").is_err());
    }
}
