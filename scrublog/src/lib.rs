//! Redacting structured-log emission.
//!
//! This crate separates:
//! - **Record assembly**: a leveled logger producing line-delimited JSON
//!   records with a fixed protocol-field contract (`v`, `level`, `name`,
//!   `hostname`, `pid`, `time`, `msg`).
//! - **Redaction**: a sink-level interceptor that rewrites sensitive values
//!   in every record before it reaches the underlying sink.
//!
//! Redaction composes two independent strategies in one deterministic pass:
//! dotted/wildcarded field-path patterns resolved against the record's
//! structure, and an optional global text rewrite applied to the serialized
//! record irrespective of field boundaries. Protocol fields are never
//! touched; caller-owned data is only ever borrowed, so logging a value can
//! never mutate it.
//!
//! What this crate does:
//! - assembles and emits leveled JSON log records in call order
//! - normalizes arbitrary-precision numbers into lossless decimal text
//! - applies path- and pattern-driven redaction behind a [`Sink`] seam
//! - detects managed hosting environments for service naming
//!
//! What it does not do:
//! - pretty/console formatting
//! - trace-context propagation (see the companion HTTP crate)
//!
//! Redaction failures are loud by design: an error anywhere in the pipeline
//! propagates out of `log(...)` rather than falling back to unredacted
//! output.

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::dbg_macro,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::unwrap_used))]

// Module declarations
pub mod env;
pub mod error;
pub mod level;
mod logger;
pub mod mask;
pub mod normalize;
pub mod record;
pub mod redact;
pub mod sink;

pub use env::EnvironmentProbe;
pub use error::{ConfigError, EmitError};
pub use level::Level;
pub use logger::{Logger, LoggerBuilder};
pub use mask::{MASK_CHAR, REDACTED_PLACEHOLDER, TextMask};
pub use normalize::{normalize, normalize_fields};
pub use record::{Fields, LOG_VERSION, PROTOCOL_FIELDS, Record};
pub use redact::{
    Censor, CensorFn, GlobalReplace, PathPattern, PatternRewrite, Redaction, RedactionBuilder,
};
pub use sink::{MemorySink, RedactingSink, Sink, WriterSink};
