//! Tower middleware emitting one record per finished request.
//!
//! The layer wraps any `http` service. Per request it captures the request
//! view up front, forwards the call without blocking, and once the response
//! is ready emits a single informational record through the configured
//! logger, which applies its own redaction pipeline to everything emitted
//! here, request headers included.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Instant;

use http::{HeaderMap, Request, Response, header};
use serde_json::{Map, Value, json};
use tower::{Layer, Service};
use uuid::Uuid;

use scrublog::{EnvironmentProbe, Level, Logger};

use crate::trace::{self, TraceContext, TraceContextFn};
use crate::view;

/// Message of the per-request record.
pub const REQUEST_FINISHED_MSG: &str = "request finished";

/// Layer configuration: which logger to emit through, which project scopes
/// trace resources, and the managed-environment collaborators.
#[derive(Clone)]
pub struct RequestLogLayer {
    logger: Logger,
    project_id: Arc<str>,
    exclude_http_request_field: bool,
    probe: EnvironmentProbe,
    trace_context: Option<TraceContextFn>,
}

impl RequestLogLayer {
    /// Creates a layer emitting through `logger`, scoping trace resources
    /// to `project_id`. The environment probe defaults to the process
    /// environment; no trace extractor is configured.
    #[must_use]
    pub fn new(project_id: impl Into<String>, logger: Logger) -> Self {
        Self {
            logger,
            project_id: project_id.into().into(),
            exclude_http_request_field: false,
            probe: EnvironmentProbe::from_env(),
            trace_context: None,
        }
    }

    /// Suppresses the structured `httpRequest` summary; the plain
    /// `req`/`res` views are always emitted.
    #[must_use]
    pub fn exclude_http_request_field(mut self, exclude: bool) -> Self {
        self.exclude_http_request_field = exclude;
        self
    }

    /// Injects an environment probe.
    #[must_use]
    pub fn probe(mut self, probe: EnvironmentProbe) -> Self {
        self.probe = probe;
        self
    }

    /// Injects the trace-context extractor collaborator.
    #[must_use]
    pub fn trace_context<F>(mut self, extract: F) -> Self
    where
        F: Fn(&HeaderMap) -> Option<TraceContext> + Send + Sync + 'static,
    {
        self.trace_context = Some(Arc::new(extract));
        self
    }
}

impl<S> Layer<S> for RequestLogLayer {
    type Service = RequestLogService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestLogService {
            inner,
            layer: self.clone(),
        }
    }
}

/// Service wrapper produced by [`RequestLogLayer`].
#[derive(Clone)]
pub struct RequestLogService<S> {
    inner: S,
    layer: RequestLogLayer,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for RequestLogService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    ReqBody: Send + 'static,
    ResBody: Send + 'static,
{
    type Response = Response<ResBody>;
    type Error = S::Error;
    type Future =
        Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send + 'static>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        let start = Instant::now();
        let req_view = view::request_view(&req);
        let req_id = request_id(req.headers());
        let method = req.method().as_str().to_string();
        let url = req.uri().to_string();
        let trace_context = self
            .layer
            .trace_context
            .as_ref()
            .and_then(|extract| extract(req.headers()));
        let layer = self.layer.clone();

        // Take the readied service, leave the clone for the next call.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        Box::pin(async move {
            let response = inner.call(req).await?;

            let mut fields = Map::new();
            fields.insert("req".to_string(), req_view);
            fields.insert("res".to_string(), view::response_view(&response));
            fields.insert("req_id".to_string(), json!(req_id));
            fields.insert(
                "responseTime".to_string(),
                json!(start.elapsed().as_secs_f64() * 1000.0),
            );
            if layer.probe.is_managed() {
                if !layer.exclude_http_request_field {
                    fields.insert(
                        "httpRequest".to_string(),
                        trace::http_request_summary(
                            &method,
                            &url,
                            response_size(&response),
                            response.status().as_u16(),
                        ),
                    );
                }
                if let Some(context) = &trace_context {
                    context.merge_into(&layer.project_id, &mut fields);
                }
            }

            if let Err(err) = layer
                .logger
                .log(Level::Info, &Value::Object(fields), REQUEST_FINISHED_MSG)
            {
                // The response is already on its way back; emission
                // failures here have no caller to propagate to.
                eprintln!("scrublog-http: failed to emit request record: {err}");
            }

            Ok(response)
        })
    }
}

fn request_id(headers: &HeaderMap) -> String {
    headers
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

fn response_size<B>(res: &Response<B>) -> Option<u64> {
    res.headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse().ok())
}
