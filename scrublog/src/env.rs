//! Managed hosting environment detection.
//!
//! A probe is constructed once, at logger or middleware build time, and
//! injected wherever the managed-environment decision is needed. Nothing
//! else in the crate reads these variables ad hoc.

/// Service-name variable set by serverless container platforms.
pub const CLOUD_RUN_SERVICE_ENV: &str = "K_SERVICE";

/// Service-name variable set by managed application platforms.
pub const APP_ENGINE_SERVICE_ENV: &str = "GAE_SERVICE";

/// A snapshot of the managed-hosting signals, taken at construction.
#[derive(Clone, Debug, Default)]
pub struct EnvironmentProbe {
    service: Option<String>,
}

impl EnvironmentProbe {
    /// Probes the process environment.
    ///
    /// A non-empty [`CLOUD_RUN_SERVICE_ENV`] or [`APP_ENGINE_SERVICE_ENV`]
    /// marks a managed context and supplies the service name.
    #[must_use]
    pub fn from_env() -> Self {
        let service = [CLOUD_RUN_SERVICE_ENV, APP_ENGINE_SERVICE_ENV]
            .iter()
            .find_map(|var| std::env::var(var).ok().filter(|value| !value.is_empty()));
        Self { service }
    }

    /// A probe reporting a managed context with the given service name.
    ///
    /// For injection in tests and environments detected by other means.
    #[must_use]
    pub fn fixed(service: impl Into<String>) -> Self {
        Self {
            service: Some(service.into()),
        }
    }

    /// A probe reporting no managed context.
    #[must_use]
    pub fn unmanaged() -> Self {
        Self::default()
    }

    /// The detected service name, if any.
    #[must_use]
    pub fn service_name(&self) -> Option<&str> {
        self.service.as_deref()
    }

    /// Whether a managed hosting context was detected.
    #[must_use]
    pub const fn is_managed(&self) -> bool {
        self.service.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::EnvironmentProbe;

    #[test]
    fn fixed_probe_is_managed() {
        let probe = EnvironmentProbe::fixed("checkout");
        assert!(probe.is_managed());
        assert_eq!(probe.service_name(), Some("checkout"));
    }

    #[test]
    fn unmanaged_probe_has_no_service() {
        let probe = EnvironmentProbe::unmanaged();
        assert!(!probe.is_managed());
        assert_eq!(probe.service_name(), None);
    }
}
