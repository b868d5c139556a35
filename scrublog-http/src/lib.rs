//! HTTP observability for `scrublog`.
//!
//! This crate connects an HTTP service with a [`scrublog::Logger`] by
//! providing a tower middleware that emits exactly one informational
//! "request finished" record per completed request, plus the read-only view
//! serializers that shape requests, responses and errors for logging.
//!
//! It is responsible for:
//! - Building plain-object views of requests/responses/errors without ever
//!   mutating the source values.
//! - Enriching the per-request record with a structured request summary and
//!   trace-correlation fields when running in a managed hosting
//!   environment.
//!
//! It does not redact anything itself (every record it emits flows through
//! the owning logger's redaction pipeline like any other caller's) and it
//! does not extract trace contexts from the wire: that stays with an
//! injected collaborator.

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
mod error_view;
mod middleware;
mod trace;
mod view;

pub use error_view::{ErrorAdapter, ErrorAdapters, error_view};
#[cfg(feature = "reqwest")]
pub use error_view::ReqwestAdapter;
pub use middleware::{REQUEST_FINISHED_MSG, RequestLogLayer, RequestLogService};
pub use trace::{SPAN_ID_KEY, TRACE_KEY, TRACE_SAMPLED_KEY, TraceContext, TraceContextFn};
pub use view::{RemoteAddr, request_view, request_view_with_body, response_view};
