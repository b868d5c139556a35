//! Error taxonomy.
//!
//! Two families, split along when they can surface:
//!
//! - [`ConfigError`]: construction-time problems (malformed path patterns,
//!   unknown level names). These fail fast: a logger that silently never
//!   redacts is worse than one that refuses to start.
//! - [`EmitError`]: emission-time problems inside `log(...)`. These
//!   propagate to the caller; the pipeline never falls back to emitting an
//!   unredacted record.

use thiserror::Error;

/// A problem with logger or redaction configuration, surfaced at
/// construction time.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A redaction path pattern was empty.
    #[error("empty redaction path pattern")]
    EmptyPattern,

    /// A redaction path pattern contained an empty segment (`a..b`, `.a`).
    #[error("redaction path pattern `{pattern}` has an empty segment")]
    EmptySegment {
        /// The offending pattern as supplied.
        pattern: String,
    },

    /// A rewrite pattern was not a valid regular expression.
    #[error("invalid rewrite pattern: {0}")]
    InvalidRewrite(#[from] regex::Error),

    /// A level name did not match any known severity.
    #[error("unknown log level `{0}`")]
    UnknownLevel(String),
}

/// A problem emitting a single record, surfaced from `log(...)`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EmitError {
    /// The caller-supplied fields did not serialize to a JSON object.
    #[error("log fields must serialize to a JSON object, got {kind}")]
    NonObjectFields {
        /// The JSON kind the fields serialized to.
        kind: &'static str,
    },

    /// A record value could not be serialized to JSON.
    #[error("failed to serialize log record: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The configured global replace rewrote the serialized record into
    /// text that is no longer valid JSON.
    #[error("global replace produced unparseable JSON: {0}")]
    GlobalReplace(#[source] serde_json::Error),

    /// The underlying sink failed to write the record.
    #[error("failed to write log record: {0}")]
    Io(#[from] std::io::Error),
}
