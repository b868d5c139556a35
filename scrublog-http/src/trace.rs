//! Managed-environment trace correlation.
//!
//! The log platform reserves three record keys for trace correlation; when
//! a request carries a trace context and the service runs in a managed
//! environment, the middleware merges them into the "request finished"
//! record. How a context is extracted from the wire is not this crate's
//! concern: callers supply a [`TraceContextFn`] collaborator.

use std::sync::Arc;

use http::HeaderMap;
use serde_json::{Map, Value, json};

/// Reserved record key for the trace resource name.
pub const TRACE_KEY: &str = "logging.googleapis.com/trace";

/// Reserved record key for the span id.
pub const SPAN_ID_KEY: &str = "logging.googleapis.com/spanId";

/// Reserved record key for the sampling decision.
pub const TRACE_SAMPLED_KEY: &str = "logging.googleapis.com/trace_sampled";

/// Per-request trace correlation data, as supplied by the extractor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraceContext {
    /// The trace id, without the project prefix.
    pub trace_id: String,
    /// The span id within the trace, when known.
    pub span_id: Option<String>,
    /// Whether the trace was sampled.
    pub sampled: bool,
}

/// Collaborator extracting a trace context from request headers.
pub type TraceContextFn = Arc<dyn Fn(&HeaderMap) -> Option<TraceContext> + Send + Sync>;

impl TraceContext {
    /// The fully qualified trace resource name for `project_id`.
    #[must_use]
    pub fn trace_resource(&self, project_id: &str) -> String {
        format!("projects/{project_id}/traces/{}", self.trace_id)
    }

    /// Merges the three reserved keys into a record's fields.
    pub(crate) fn merge_into(&self, project_id: &str, fields: &mut Map<String, Value>) {
        fields.insert(TRACE_KEY.to_string(), json!(self.trace_resource(project_id)));
        if let Some(span_id) = &self.span_id {
            fields.insert(SPAN_ID_KEY.to_string(), json!(span_id));
        }
        fields.insert(TRACE_SAMPLED_KEY.to_string(), json!(self.sampled));
    }
}

/// The structured request summary the log platform renders natively.
pub(crate) fn http_request_summary(
    method: &str,
    url: &str,
    response_size: Option<u64>,
    status: u16,
) -> Value {
    let mut summary = Map::new();
    summary.insert("requestMethod".to_string(), json!(method));
    summary.insert("requestUrl".to_string(), json!(url));
    if let Some(size) = response_size {
        summary.insert("responseSize".to_string(), json!(size));
    }
    summary.insert("status".to_string(), json!(status));
    Value::Object(summary)
}
