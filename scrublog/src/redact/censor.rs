//! Censor strategies: how a matched value is replaced.
//!
//! Modeled as a tagged variant so configuration can carry either a literal
//! replacement or a function computing one from the matched value. Both are
//! resolved uniformly at redact time.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::mask::{REDACTED_PLACEHOLDER, TextMask};

/// A function computing a replacement from the matched value.
pub type CensorFn = Arc<dyn Fn(&Value) -> Value + Send + Sync>;

/// The strategy producing a replacement value for a redacted leaf.
#[derive(Clone)]
pub enum Censor {
    /// Every match is replaced with this literal.
    Fixed(Value),
    /// Every match is replaced with the function's result for that value.
    Computed(CensorFn),
}

impl Censor {
    /// Constructs a fixed-replacement censor.
    #[must_use]
    pub fn fixed(value: impl Into<Value>) -> Self {
        Self::Fixed(value.into())
    }

    /// Constructs a censor computing the replacement per matched value.
    #[must_use]
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        Self::Computed(Arc::new(f))
    }

    /// Constructs a censor applying a [`TextMask`] to matched values.
    ///
    /// String values are masked directly; any other value is masked through
    /// its JSON text, so the strategy stays total over the full value
    /// domain.
    #[must_use]
    pub fn masked(mask: TextMask) -> Self {
        Self::computed(move |matched| match matched {
            Value::String(text) => Value::String(mask.apply_to(text)),
            other => Value::String(mask.apply_to(&other.to_string())),
        })
    }

    /// Resolves the replacement for a matched value.
    #[must_use]
    pub fn apply(&self, matched: &Value) -> Value {
        match self {
            Self::Fixed(value) => value.clone(),
            Self::Computed(f) => f(matched),
        }
    }
}

impl Default for Censor {
    /// The default sentinel: the string `"[REDACTED]"`.
    fn default() -> Self {
        Self::Fixed(Value::String(REDACTED_PLACEHOLDER.to_string()))
    }
}

impl fmt::Debug for Censor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(value) => f.debug_tuple("Fixed").field(value).finish(),
            Self::Computed(_) => f.debug_tuple("Computed").field(&"..").finish(),
        }
    }
}
