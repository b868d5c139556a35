//! Log record structure and the protocol-field contract.
//!
//! A record is an ordered JSON object. Six fields belong to the logger's
//! wire contract and are immune to redaction: `v`, `level`, `name`,
//! `hostname`, `pid`, `time`. Everything else, `msg` included, is caller
//! data and a redaction candidate.

use serde_json::{Map, Value};

/// One structured log entry, as handed to a [`crate::Sink`].
pub type Record = Map<String, Value>;

/// Caller-supplied fields merged into a record before the protocol fields.
pub type Fields = Map<String, Value>;

/// Wire-format version emitted in the `v` field.
pub const LOG_VERSION: u64 = 0;

/// Fields owned by the logger's wire contract, never subject to redaction.
///
/// `msg` is deliberately absent: message text routinely embeds sensitive
/// substrings and must flow through the redaction pipeline.
pub const PROTOCOL_FIELDS: [&str; 6] = ["v", "level", "name", "hostname", "pid", "time"];

/// Returns whether `key` names a protocol field.
#[must_use]
pub fn is_protocol_field(key: &str) -> bool {
    PROTOCOL_FIELDS.contains(&key)
}

/// Splits a record into its protocol fields and the redactable remainder.
///
/// Both halves preserve the record's field order.
#[must_use]
pub fn split_protocol(record: Record) -> (Record, Record) {
    let mut protocol = Record::new();
    let mut remainder = Record::new();
    for (key, value) in record {
        if is_protocol_field(&key) {
            protocol.insert(key, value);
        } else {
            remainder.insert(key, value);
        }
    }
    (protocol, remainder)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{Record, is_protocol_field, split_protocol};

    #[test]
    fn msg_is_not_a_protocol_field() {
        assert!(is_protocol_field("level"));
        assert!(is_protocol_field("time"));
        assert!(!is_protocol_field("msg"));
        assert!(!is_protocol_field("req"));
    }

    #[test]
    fn split_partitions_by_contract() {
        let mut record = Record::new();
        record.insert("v".to_string(), json!(0));
        record.insert("level".to_string(), json!(30));
        record.insert("msg".to_string(), json!("hello"));
        record.insert("user".to_string(), json!({"id": 7}));

        let (protocol, remainder) = split_protocol(record);
        assert_eq!(protocol.len(), 2);
        assert!(protocol.contains_key("v"));
        assert_eq!(remainder.len(), 2);
        assert!(remainder.contains_key("msg"));
        assert!(remainder.contains_key("user"));
    }
}
