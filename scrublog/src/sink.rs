//! Emission sinks and the record interceptor.
//!
//! This module exists to connect record assembly with redaction without
//! patching either: a [`Sink`] is the single emission seam (`write` one
//! record), and [`RedactingSink`] wraps any inner sink, transforming each
//! record before delegating.
//!
//! It is responsible for:
//! - Ensuring every record a wrapped sink receives has already been
//!   normalized, pattern-redacted and path-redacted.
//! - Keeping the logger's protocol fields out of the transform entirely.
//! - Emitting records in `write` call order (the writer sink performs one
//!   locked write per record).
//!
//! It does not decide severity thresholds, assemble records, or swallow
//! transform failures: any error propagates to the `log(...)` caller.

use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};

use serde_json::Value;

use crate::error::EmitError;
use crate::normalize::normalize_fields;
use crate::record::{Record, split_protocol};
use crate::redact::Redaction;

/// The emission seam: one operation, one record.
pub trait Sink: Send + Sync {
    /// Writes one record.
    fn write(&self, record: Record) -> Result<(), EmitError>;
}

impl<S: Sink + ?Sized> Sink for Arc<S> {
    fn write(&self, record: Record) -> Result<(), EmitError> {
        (**self).write(record)
    }
}

// =============================================================================
// WriterSink - line-delimited JSON over any io::Write
// =============================================================================

/// Writes records as line-delimited JSON to an [`io::Write`] target.
///
/// Each record is serialized outside the lock and written as a single
/// line while holding it, so concurrent callers cannot interleave output
/// and records land in `write` call order.
///
/// [`io::Write`]: std::io::Write
pub struct WriterSink<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterSink<W> {
    /// Wraps a writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }
}

impl WriterSink<std::io::Stdout> {
    /// A sink writing to standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl WriterSink<std::io::Stderr> {
    /// A sink writing to standard error.
    #[must_use]
    pub fn stderr() -> Self {
        Self::new(std::io::stderr())
    }
}

impl<W: Write + Send> Sink for WriterSink<W> {
    fn write(&self, record: Record) -> Result<(), EmitError> {
        let line = serde_json::to_string(&record)?;
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}

// =============================================================================
// MemorySink - capture for assertions
// =============================================================================

/// Captures records in memory; clones share the same buffer.
#[derive(Clone, Default)]
pub struct MemorySink {
    records: Arc<Mutex<Vec<Record>>>,
}

impl MemorySink {
    /// An empty capture sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of every captured record, in emission order.
    #[must_use]
    pub fn records(&self) -> Vec<Record> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of captured records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether nothing has been captured yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Sink for MemorySink {
    fn write(&self, record: Record) -> Result<(), EmitError> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record);
        Ok(())
    }
}

// =============================================================================
// RedactingSink - the record interceptor
// =============================================================================

/// Wraps an inner sink, redacting every record before delegating.
///
/// Per record: protocol fields are set aside untouched; the remainder is
/// normalized, serialized, rewritten by the global replace, parsed back,
/// path-redacted, and merged into a fresh record handed to the inner sink.
/// The transform only ever sees data the logger already owns: caller
/// values were borrowed and serialized at `log(...)` time, so no caller
/// object graph can be mutated here.
pub struct RedactingSink<S> {
    redaction: Arc<Redaction>,
    inner: S,
}

impl<S: Sink> RedactingSink<S> {
    /// Wraps `inner` with a redaction configuration.
    pub fn new(redaction: Redaction, inner: S) -> Self {
        Self {
            redaction: Arc::new(redaction),
            inner,
        }
    }

    fn transform(&self, record: Record) -> Result<Record, EmitError> {
        let (protocol, remainder) = split_protocol(record);

        let remainder = normalize_fields(remainder);
        let text = serde_json::to_string(&Value::Object(remainder))?;
        let text = self.redaction.apply_global(text);
        let mut remainder: Value = serde_json::from_str(&text).map_err(|err| {
            if self.redaction.has_global_replace() {
                EmitError::GlobalReplace(err)
            } else {
                EmitError::Serialize(err)
            }
        })?;

        self.redaction.apply_paths(&mut remainder);

        let mut fresh = protocol;
        if let Value::Object(map) = remainder {
            for (key, value) in map {
                fresh.insert(key, value);
            }
        }
        Ok(fresh)
    }
}

impl<S: Sink> Sink for RedactingSink<S> {
    fn write(&self, record: Record) -> Result<(), EmitError> {
        let record = self.transform(record)?;
        self.inner.write(record)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{MemorySink, RedactingSink, Sink};
    use crate::record::Record;
    use crate::redact::Redaction;

    fn record_with(entries: &[(&str, serde_json::Value)]) -> Record {
        let mut record = Record::new();
        for (key, value) in entries {
            record.insert((*key).to_string(), value.clone());
        }
        record
    }

    #[test]
    fn protocol_fields_bypass_the_transform() {
        let capture = MemorySink::new();
        let redaction = Redaction::builder().path("*").build().unwrap();
        let sink = RedactingSink::new(redaction, capture.clone());

        sink.write(record_with(&[
            ("v", json!(0)),
            ("level", json!(30)),
            ("name", json!("svc")),
            ("hostname", json!("host-1")),
            ("pid", json!(42)),
            ("time", json!("2026-01-01T00:00:00.000Z")),
            ("msg", json!("hello")),
            ("token", json!("secret")),
        ]))
        .unwrap();

        let records = capture.records();
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record["v"], json!(0));
        assert_eq!(record["level"], json!(30));
        assert_eq!(record["name"], json!("svc"));
        assert_eq!(record["hostname"], json!("host-1"));
        assert_eq!(record["pid"], json!(42));
        assert_eq!(record["time"], json!("2026-01-01T00:00:00.000Z"));
        // Everything else was within the top-level wildcard's reach
        assert_eq!(record["msg"], json!("[REDACTED]"));
        assert_eq!(record["token"], json!("[REDACTED]"));
    }

    #[test]
    fn global_replace_runs_before_path_redaction() {
        let capture = MemorySink::new();
        let redaction = Redaction::builder()
            .path("a.*.c")
            .global_replace(|text| text.replace("+1234567890", "+123456XXXX"))
            .build()
            .unwrap();
        let sink = RedactingSink::new(redaction, capture.clone());

        sink.write(record_with(&[
            ("msg", json!("dial +1234567890 now")),
            ("a", json!({"b": {"c": "Call me at +1234567890"}})),
        ]))
        .unwrap();

        let records = capture.records();
        let record = &records[0];
        // The path censor has the last word on matched leaves
        assert_eq!(record["a"]["b"]["c"], json!("[REDACTED]"));
        // Unmatched text still carries the global rewrite
        assert_eq!(record["msg"], json!("dial +123456XXXX now"));
    }

    #[test]
    fn broken_global_replace_fails_loud() {
        let capture = MemorySink::new();
        let redaction = Redaction::builder()
            .global_replace(|_| "not json at all".to_string())
            .build()
            .unwrap();
        let sink = RedactingSink::new(redaction, capture.clone());

        let result = sink.write(record_with(&[("msg", json!("hello"))]));
        assert!(result.is_err());
        assert!(capture.is_empty());
    }

    #[test]
    fn memory_sink_clones_share_the_buffer() {
        let sink = MemorySink::new();
        let handle = sink.clone();
        sink.write(record_with(&[("msg", json!("one"))])).unwrap();
        assert_eq!(handle.len(), 1);
    }
}
