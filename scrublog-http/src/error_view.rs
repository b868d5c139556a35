//! Error views and duck-typed HTTP-client enrichment.
//!
//! The base view is minimal: the error's message plus its source chain.
//! An [`ErrorAdapter`] registry recognizes errors from known HTTP client
//! libraries and augments the view with reconstructed `request`/`response`
//! sub-objects. This is a display convenience only; the resulting fields
//! flow through redaction like anything else. Unrecognized errors get the base
//! view, never a failure: one malformed field must not abort a log line.

use std::error::Error as StdError;

use serde_json::{Map, Value, json};

/// Recognizes one error shape and extracts display detail from it.
///
/// `can_handle` must be cheap; `extract` returns a JSON object merged over
/// the base view (typically `request` and `response` sub-objects).
pub trait ErrorAdapter: Send + Sync {
    /// Whether this adapter recognizes `err`.
    fn can_handle(&self, err: &(dyn StdError + 'static)) -> bool;

    /// Extracts extra view fields from a recognized error.
    fn extract(&self, err: &(dyn StdError + 'static)) -> Value;
}

/// An ordered adapter registry; the first matching adapter wins.
#[derive(Default)]
pub struct ErrorAdapters {
    adapters: Vec<Box<dyn ErrorAdapter>>,
}

impl ErrorAdapters {
    /// A registry preloaded with the built-in adapters.
    #[must_use]
    pub fn new() -> Self {
        #[allow(unused_mut)]
        let mut registry = Self::default();
        #[cfg(feature = "reqwest")]
        registry.register(ReqwestAdapter);
        registry
    }

    /// An empty registry.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Appends an adapter; earlier registrations take precedence.
    pub fn register(&mut self, adapter: impl ErrorAdapter + 'static) {
        self.adapters.push(Box::new(adapter));
    }

    /// Builds the `err` view, enriched by the first matching adapter.
    #[must_use]
    pub fn view(&self, err: &(dyn StdError + 'static)) -> Value {
        let mut view = base_view(err);
        if let Some(adapter) = self.adapters.iter().find(|adapter| adapter.can_handle(err)) {
            if let Value::Object(extra) = adapter.extract(err) {
                for (key, value) in extra {
                    view.insert(key, value);
                }
            }
        }
        Value::Object(view)
    }
}

/// Builds the plain `err` view without adapter enrichment.
#[must_use]
pub fn error_view(err: &(dyn StdError + 'static)) -> Value {
    Value::Object(base_view(err))
}

fn base_view(err: &(dyn StdError + 'static)) -> Map<String, Value> {
    let mut view = Map::new();
    view.insert("message".to_string(), json!(err.to_string()));
    let mut chain = Vec::new();
    let mut source = err.source();
    while let Some(cause) = source {
        chain.push(json!(cause.to_string()));
        source = cause.source();
    }
    if !chain.is_empty() {
        view.insert("chain".to_string(), Value::Array(chain));
    }
    view
}

// =============================================================================
// ReqwestAdapter - reconstructs request/response detail from reqwest errors
// =============================================================================

/// Adapter for [`reqwest::Error`]: rebuilds `request`/`response` detail
/// from the client's own error state (URL, status, failure class).
#[cfg(feature = "reqwest")]
#[derive(Clone, Copy, Debug, Default)]
pub struct ReqwestAdapter;

#[cfg(feature = "reqwest")]
impl ErrorAdapter for ReqwestAdapter {
    fn can_handle(&self, err: &(dyn StdError + 'static)) -> bool {
        err.downcast_ref::<reqwest::Error>().is_some()
    }

    fn extract(&self, err: &(dyn StdError + 'static)) -> Value {
        let Some(err) = err.downcast_ref::<reqwest::Error>() else {
            return Value::Object(Map::new());
        };
        let mut extra = Map::new();
        if let Some(url) = err.url() {
            extra.insert("request".to_string(), json!({"url": url.as_str()}));
        }
        if let Some(status) = err.status() {
            extra.insert(
                "response".to_string(),
                json!({"statusCode": status.as_u16()}),
            );
        }
        if err.is_timeout() {
            extra.insert("timeout".to_string(), json!(true));
        }
        if err.is_connect() {
            extra.insert("connect".to_string(), json!(true));
        }
        Value::Object(extra)
    }
}

#[cfg(test)]
mod tests {
    use std::fmt;

    use serde_json::json;

    use super::{ErrorAdapter, ErrorAdapters, error_view};

    #[derive(Debug)]
    struct Outer {
        inner: Inner,
    }

    #[derive(Debug)]
    struct Inner;

    impl fmt::Display for Outer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("request failed")
        }
    }

    impl fmt::Display for Inner {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("connection reset")
        }
    }

    impl std::error::Error for Outer {
        fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
            Some(&self.inner)
        }
    }

    impl std::error::Error for Inner {}

    #[test]
    fn base_view_has_message_and_chain() {
        let err = Outer { inner: Inner };
        let view = error_view(&err);
        assert_eq!(view["message"], json!("request failed"));
        assert_eq!(view["chain"], json!(["connection reset"]));
    }

    #[test]
    fn chainless_errors_omit_the_chain() {
        let view = error_view(&Inner);
        assert_eq!(view["message"], json!("connection reset"));
        assert!(view.get("chain").is_none());
    }

    #[test]
    fn unrecognized_errors_fall_back_to_the_base_view() {
        let registry = ErrorAdapters::empty();
        let err = Outer { inner: Inner };
        let view = registry.view(&err);
        assert_eq!(view["message"], json!("request failed"));
        assert!(view.get("request").is_none());
    }

    #[test]
    fn first_matching_adapter_wins() {
        struct Tagging(&'static str);

        impl ErrorAdapter for Tagging {
            fn can_handle(&self, _err: &(dyn std::error::Error + 'static)) -> bool {
                true
            }

            fn extract(&self, _err: &(dyn std::error::Error + 'static)) -> serde_json::Value {
                json!({"via": self.0})
            }
        }

        let mut registry = ErrorAdapters::empty();
        registry.register(Tagging("first"));
        registry.register(Tagging("second"));
        let view = registry.view(&Inner);
        assert_eq!(view["via"], json!("first"));
    }
}
