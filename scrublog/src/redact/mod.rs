//! Redaction configuration.
//!
//! This module provides the pieces the record interceptor composes:
//!
//! - **`path`**: dotted/wildcarded field-path patterns ([`PathPattern`])
//! - **`censor`**: fixed-or-computed replacement strategies ([`Censor`])
//! - **`pattern`**: regex-driven global text rewrites ([`PatternRewrite`])
//!
//! A [`Redaction`] bundles them: parsed paths, one censor, and an optional
//! global replace. It is built once, validated eagerly, and shared
//! read-only across every emission for the logger's lifetime.

mod censor;
mod path;
mod pattern;

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

pub use censor::{Censor, CensorFn};
pub use path::{PathPattern, WILDCARD};
pub use pattern::PatternRewrite;

use crate::error::ConfigError;

/// A text rewrite applied to the full serialized record, independent of
/// field structure. Identity when absent.
pub type GlobalReplace = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Redaction configuration, immutable once built.
#[derive(Clone, Default)]
pub struct Redaction {
    paths: Vec<PathPattern>,
    censor: Censor,
    global_replace: Option<GlobalReplace>,
}

impl Redaction {
    /// Starts building a redaction configuration.
    #[must_use]
    pub fn builder() -> RedactionBuilder {
        RedactionBuilder::default()
    }

    /// Returns the parsed path patterns.
    #[must_use]
    pub fn paths(&self) -> &[PathPattern] {
        &self.paths
    }

    pub(crate) fn has_global_replace(&self) -> bool {
        self.global_replace.is_some()
    }

    /// Applies the global replace to serialized record text.
    pub(crate) fn apply_global(&self, text: String) -> String {
        match &self.global_replace {
            Some(replace) => replace(&text),
            None => text,
        }
    }

    /// Applies every path pattern against `value`.
    ///
    /// Patterns matching the same leaf all resolve through the one censor,
    /// so application order cannot change the result.
    pub(crate) fn apply_paths(&self, value: &mut Value) {
        for pattern in &self.paths {
            pattern.apply(value, &self.censor);
        }
    }
}

impl fmt::Debug for Redaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Redaction")
            .field("paths", &self.paths)
            .field("censor", &self.censor)
            .field("global_replace", &self.global_replace.is_some())
            .finish()
    }
}

/// Builder for [`Redaction`]; validation happens in [`build`].
///
/// [`build`]: RedactionBuilder::build
#[derive(Default)]
pub struct RedactionBuilder {
    paths: Vec<String>,
    censor: Censor,
    global_replace: Option<GlobalReplace>,
}

impl RedactionBuilder {
    /// Adds one path pattern.
    #[must_use]
    pub fn path(mut self, pattern: impl Into<String>) -> Self {
        self.paths.push(pattern.into());
        self
    }

    /// Adds several path patterns.
    #[must_use]
    pub fn paths<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.paths.extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Sets the censor strategy.
    #[must_use]
    pub fn censor(mut self, censor: Censor) -> Self {
        self.censor = censor;
        self
    }

    /// Sets a fixed replacement value as the censor.
    #[must_use]
    pub fn censor_value(self, value: impl Into<Value>) -> Self {
        self.censor(Censor::fixed(value))
    }

    /// Sets a computed censor function.
    #[must_use]
    pub fn censor_with<F>(self, f: F) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        self.censor(Censor::computed(f))
    }

    /// Sets the global replace function.
    #[must_use]
    pub fn global_replace<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.global_replace = Some(Arc::new(f));
        self
    }

    /// Sets a [`PatternRewrite`] as the global replace.
    #[must_use]
    pub fn global_rewrite(self, rewrite: PatternRewrite) -> Self {
        self.global_replace(move |text| rewrite.rewrite(text))
    }

    /// Parses every configured pattern, failing fast on malformed input.
    pub fn build(self) -> Result<Redaction, ConfigError> {
        let paths = self
            .paths
            .iter()
            .map(|pattern| PathPattern::parse(pattern))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Redaction {
            paths,
            censor: self.censor,
            global_replace: self.global_replace,
        })
    }
}
