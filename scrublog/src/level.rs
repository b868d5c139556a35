//! Log severity levels and their wire encoding.
//!
//! Levels follow the line-delimited JSON logging convention: six named
//! severities encoded as the integers 10 through 60 in the emitted record's
//! `level` field. Threshold comparisons use the same ordering.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Environment variable consulted for the default log level.
pub const LEVEL_ENV: &str = "LOG_LEVEL";

/// Log severity.
///
/// The discriminants are the wire codes emitted in the `level` field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Trace = 10,
    Debug = 20,
    Info = 30,
    Warn = 40,
    Error = 50,
    Fatal = 60,
}

impl Level {
    /// Returns the numeric wire code for this level.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Returns the lowercase name of this level.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Fatal => "fatal",
        }
    }

    /// Resolves the default level from [`LEVEL_ENV`], falling back to
    /// [`Level::Info`].
    ///
    /// An unset or unparseable variable falls back rather than failing:
    /// the variable is an ambient signal, not explicit configuration. Use
    /// [`crate::LoggerBuilder::level_str`] when a bad value should be a
    /// construction error instead.
    #[must_use]
    pub fn from_env() -> Self {
        std::env::var(LEVEL_ENV)
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(Self::Info)
    }
}

impl FromStr for Level {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            "fatal" => Ok(Self::Fatal),
            other => Err(ConfigError::UnknownLevel(other.to_string())),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::Level;

    #[test]
    fn wire_codes_match_convention() {
        assert_eq!(Level::Trace.code(), 10);
        assert_eq!(Level::Debug.code(), 20);
        assert_eq!(Level::Info.code(), 30);
        assert_eq!(Level::Warn.code(), 40);
        assert_eq!(Level::Error.code(), 50);
        assert_eq!(Level::Fatal.code(), 60);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("WARN".parse::<Level>().unwrap(), Level::Warn);
        assert_eq!("Info".parse::<Level>().unwrap(), Level::Info);
        assert_eq!("fatal".parse::<Level>().unwrap(), Level::Fatal);
    }

    #[test]
    fn parse_rejects_unknown_names() {
        assert!("verbose".parse::<Level>().is_err());
        assert!("".parse::<Level>().is_err());
    }

    #[test]
    fn ordering_follows_severity() {
        assert!(Level::Trace < Level::Debug);
        assert!(Level::Warn < Level::Fatal);
        assert!(Level::Info >= Level::Info);
    }
}
