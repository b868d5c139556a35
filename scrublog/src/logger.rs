//! Record assembly and leveled emission.
//!
//! A [`Logger`] owns its identity fields (`name`, `hostname`, `pid`), a
//! severity threshold and a shared [`Sink`] handle. Every `log(...)` call
//! below the threshold is a no-op; every call at or above it assembles a
//! fresh record and hands it to the sink synchronously. When a redaction
//! configuration is supplied at build time, the sink is wrapped in a
//! [`RedactingSink`] exactly once; there is no other interception point.
//!
//! Caller fields are taken by reference and serialized into the record, so
//! logging a value never mutates it, and logging the same value twice
//! produces two independent records.

use std::process;
use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::env::EnvironmentProbe;
use crate::error::{ConfigError, EmitError};
use crate::level::Level;
use crate::record::{Fields, LOG_VERSION, Record};
use crate::redact::Redaction;
use crate::sink::{RedactingSink, Sink, WriterSink};

/// A leveled, redacting JSON logger.
///
/// Cheap to clone; clones share the same sink and configuration.
#[derive(Clone)]
pub struct Logger {
    name: Arc<str>,
    hostname: Arc<str>,
    pid: u32,
    level: Level,
    sink: Arc<dyn Sink>,
}

impl Logger {
    /// Starts building a logger.
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::default()
    }

    /// The logger's service name, emitted in every record.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The severity threshold.
    #[must_use]
    pub fn level(&self) -> Level {
        self.level
    }

    /// Whether a record at `level` would be emitted.
    #[must_use]
    pub fn enabled(&self, level: Level) -> bool {
        level >= self.level
    }

    /// Emits one record at `level` with the given fields and message.
    ///
    /// `fields` must serialize to a JSON object (unit serializes to no
    /// fields). Protocol fields and `msg` always win over caller fields of
    /// the same name. Errors anywhere in serialization, redaction or the
    /// sink write propagate; a record is never silently dropped or emitted
    /// unredacted.
    pub fn log<F: Serialize>(
        &self,
        level: Level,
        fields: &F,
        message: &str,
    ) -> Result<(), EmitError> {
        if !self.enabled(level) {
            return Ok(());
        }
        let fields = match serde_json::to_value(fields)? {
            Value::Object(map) => map,
            Value::Null => Fields::new(),
            other => {
                return Err(EmitError::NonObjectFields {
                    kind: json_kind(&other),
                });
            }
        };

        let mut record = Record::new();
        record.insert("v".to_string(), Value::from(LOG_VERSION));
        record.insert("level".to_string(), Value::from(u64::from(level.code())));
        record.insert("name".to_string(), Value::String(self.name.to_string()));
        record.insert(
            "hostname".to_string(),
            Value::String(self.hostname.to_string()),
        );
        record.insert("pid".to_string(), Value::from(u64::from(self.pid)));
        record.insert(
            "time".to_string(),
            Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
        );
        record.insert("msg".to_string(), Value::String(message.to_string()));
        for (key, value) in fields {
            if !record.contains_key(&key) {
                record.insert(key, value);
            }
        }

        self.sink.write(record)
    }

    /// Emits a message-only record at trace level.
    pub fn trace(&self, message: &str) -> Result<(), EmitError> {
        self.log(Level::Trace, &(), message)
    }

    /// Emits a message-only record at debug level.
    pub fn debug(&self, message: &str) -> Result<(), EmitError> {
        self.log(Level::Debug, &(), message)
    }

    /// Emits a message-only record at info level.
    pub fn info(&self, message: &str) -> Result<(), EmitError> {
        self.log(Level::Info, &(), message)
    }

    /// Emits a message-only record at warn level.
    pub fn warn(&self, message: &str) -> Result<(), EmitError> {
        self.log(Level::Warn, &(), message)
    }

    /// Emits a message-only record at error level.
    pub fn error(&self, message: &str) -> Result<(), EmitError> {
        self.log(Level::Error, &(), message)
    }

    /// Emits a message-only record at fatal level.
    pub fn fatal(&self, message: &str) -> Result<(), EmitError> {
        self.log(Level::Fatal, &(), message)
    }

    /// Emits a record with fields at trace level.
    pub fn trace_with<F: Serialize>(&self, fields: &F, message: &str) -> Result<(), EmitError> {
        self.log(Level::Trace, fields, message)
    }

    /// Emits a record with fields at debug level.
    pub fn debug_with<F: Serialize>(&self, fields: &F, message: &str) -> Result<(), EmitError> {
        self.log(Level::Debug, fields, message)
    }

    /// Emits a record with fields at info level.
    pub fn info_with<F: Serialize>(&self, fields: &F, message: &str) -> Result<(), EmitError> {
        self.log(Level::Info, fields, message)
    }

    /// Emits a record with fields at warn level.
    pub fn warn_with<F: Serialize>(&self, fields: &F, message: &str) -> Result<(), EmitError> {
        self.log(Level::Warn, fields, message)
    }

    /// Emits a record with fields at error level.
    pub fn error_with<F: Serialize>(&self, fields: &F, message: &str) -> Result<(), EmitError> {
        self.log(Level::Error, fields, message)
    }

    /// Emits a record with fields at fatal level.
    pub fn fatal_with<F: Serialize>(&self, fields: &F, message: &str) -> Result<(), EmitError> {
        self.log(Level::Fatal, fields, message)
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("level", &self.level)
            .finish_non_exhaustive()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// =============================================================================
// LoggerBuilder
// =============================================================================

/// Builder for [`Logger`].
///
/// Defaults: name from the environment probe's service name, then the
/// executable stem, then `"app"`; level from `LOG_LEVEL`, then info; sink
/// to standard output; no redaction.
#[derive(Default)]
pub struct LoggerBuilder {
    name: Option<String>,
    level: Option<Level>,
    probe: Option<EnvironmentProbe>,
    redaction: Option<Redaction>,
    sink: Option<Arc<dyn Sink>>,
}

impl LoggerBuilder {
    /// Sets the service name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the severity threshold.
    #[must_use]
    pub fn level(mut self, level: Level) -> Self {
        self.level = Some(level);
        self
    }

    /// Sets the severity threshold from a level name, failing fast on an
    /// unknown name.
    pub fn level_str(mut self, level: &str) -> Result<Self, ConfigError> {
        self.level = Some(level.parse()?);
        Ok(self)
    }

    /// Injects an environment probe (defaults to probing the process
    /// environment).
    #[must_use]
    pub fn probe(mut self, probe: EnvironmentProbe) -> Self {
        self.probe = Some(probe);
        self
    }

    /// Configures redaction; the sink is wrapped once at build time.
    #[must_use]
    pub fn redaction(mut self, redaction: Redaction) -> Self {
        self.redaction = Some(redaction);
        self
    }

    /// Sets the emission sink.
    #[must_use]
    pub fn sink(mut self, sink: impl Sink + 'static) -> Self {
        self.sink = Some(Arc::new(sink));
        self
    }

    /// Builds the logger.
    #[must_use]
    pub fn build(self) -> Logger {
        let probe = self.probe.unwrap_or_else(EnvironmentProbe::from_env);
        let name = self
            .name
            .or_else(|| probe.service_name().map(str::to_string))
            .unwrap_or_else(default_name);
        let level = self.level.unwrap_or_else(Level::from_env);
        let hostname = hostname::get()
            .ok()
            .and_then(|host| host.into_string().ok())
            .unwrap_or_else(|| "localhost".to_string());
        let sink: Arc<dyn Sink> = self
            .sink
            .unwrap_or_else(|| Arc::new(WriterSink::stdout()));
        let sink: Arc<dyn Sink> = match self.redaction {
            Some(redaction) => Arc::new(RedactingSink::new(redaction, sink)),
            None => sink,
        };
        Logger {
            name: name.into(),
            hostname: hostname.into(),
            pid: process::id(),
            level,
            sink,
        }
    }
}

fn default_name() -> String {
    std::env::current_exe()
        .ok()
        .and_then(|path| {
            path.file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| "app".to_string())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::Logger;
    use crate::env::EnvironmentProbe;
    use crate::level::Level;
    use crate::sink::MemorySink;

    fn capture_logger(level: Level) -> (Logger, MemorySink) {
        let sink = MemorySink::new();
        let logger = Logger::builder()
            .name("test")
            .level(level)
            .probe(EnvironmentProbe::unmanaged())
            .sink(sink.clone())
            .build();
        (logger, sink)
    }

    #[test]
    fn protocol_fields_win_over_caller_fields() {
        let (logger, sink) = capture_logger(Level::Trace);
        logger
            .info_with(&json!({"level": 99, "msg": "spoof", "extra": 1}), "real")
            .unwrap();
        let records = sink.records();
        let record = &records[0];
        assert_eq!(record["level"], json!(30));
        assert_eq!(record["msg"], json!("real"));
        assert_eq!(record["extra"], json!(1));
    }

    #[test]
    fn non_object_fields_are_rejected() {
        let (logger, sink) = capture_logger(Level::Trace);
        assert!(logger.info_with(&5, "nope").is_err());
        assert!(logger.info_with(&vec![1, 2], "nope").is_err());
        assert!(sink.is_empty());
    }

    #[test]
    fn unit_fields_mean_no_fields() {
        let (logger, sink) = capture_logger(Level::Trace);
        logger.info("bare").unwrap();
        let records = sink.records();
        let record = &records[0];
        assert_eq!(record["msg"], json!("bare"));
        assert_eq!(record.len(), 7);
    }

    #[test]
    fn probe_service_name_becomes_the_default_name() {
        let sink = MemorySink::new();
        let logger = Logger::builder()
            .probe(EnvironmentProbe::fixed("checkout"))
            .level(Level::Info)
            .sink(sink.clone())
            .build();
        assert_eq!(logger.name(), "checkout");
        logger.info("named").unwrap();
        assert_eq!(sink.records()[0]["name"], json!("checkout"));
    }

    #[test]
    fn explicit_name_wins_over_the_probe() {
        let logger = Logger::builder()
            .name("explicit")
            .probe(EnvironmentProbe::fixed("probed"))
            .sink(MemorySink::new())
            .build();
        assert_eq!(logger.name(), "explicit");
    }
}
