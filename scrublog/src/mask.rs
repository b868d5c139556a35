//! Text masking strategies.
//!
//! A [`TextMask`] is a pure string transformation used to build censor
//! functions and pattern rewrites. Strategies operate on Unicode scalar
//! values and are total: they never fail, and empty input is fully redacted
//! to the placeholder.

use std::borrow::Cow;

/// Default placeholder used for full redaction.
pub const REDACTED_PLACEHOLDER: &str = "[REDACTED]";

/// Default character used to mask sensitive characters.
pub const MASK_CHAR: char = '*';

/// A redaction strategy for string values.
#[derive(Clone, Debug)]
pub enum TextMask {
    /// Replace the entire value with a fixed placeholder.
    Full {
        /// The placeholder text to use.
        placeholder: Cow<'static, str>,
    },
    /// Keep the first `prefix` and last `suffix` characters visible while
    /// masking everything between them.
    ///
    /// If `prefix + suffix` covers the whole value, the value is kept
    /// unchanged.
    Keep {
        /// Number of leading characters kept visible.
        prefix: usize,
        /// Number of trailing characters kept visible.
        suffix: usize,
        /// Symbol used to mask the middle.
        mask_char: char,
    },
    /// Mask the first `prefix` and last `suffix` characters while leaving
    /// the middle unchanged.
    ///
    /// If `prefix + suffix` covers the whole value, the entire value is
    /// masked.
    Mask {
        /// Number of leading characters masked.
        prefix: usize,
        /// Number of trailing characters masked.
        suffix: usize,
        /// Symbol used to mask the selected segments.
        mask_char: char,
    },
}

impl TextMask {
    /// Constructs [`TextMask::Full`] using [`REDACTED_PLACEHOLDER`].
    #[must_use]
    pub fn full() -> Self {
        Self::Full {
            placeholder: Cow::Borrowed(REDACTED_PLACEHOLDER),
        }
    }

    /// Constructs [`TextMask::Full`] using a custom placeholder.
    #[must_use]
    pub fn full_with<P>(placeholder: P) -> Self
    where
        P: Into<Cow<'static, str>>,
    {
        Self::Full {
            placeholder: placeholder.into(),
        }
    }

    /// Keeps only the first `prefix` scalar values in clear text.
    #[must_use]
    pub fn keep_first(prefix: usize) -> Self {
        Self::Keep {
            prefix,
            suffix: 0,
            mask_char: MASK_CHAR,
        }
    }

    /// Keeps only the last `suffix` scalar values in clear text.
    #[must_use]
    pub fn keep_last(suffix: usize) -> Self {
        Self::Keep {
            prefix: 0,
            suffix,
            mask_char: MASK_CHAR,
        }
    }

    /// Keeps both leading and trailing characters visible.
    #[must_use]
    pub fn keep_both(prefix: usize, suffix: usize) -> Self {
        Self::Keep {
            prefix,
            suffix,
            mask_char: MASK_CHAR,
        }
    }

    /// Masks only the initial `prefix` scalar values.
    #[must_use]
    pub fn mask_first(prefix: usize) -> Self {
        Self::Mask {
            prefix,
            suffix: 0,
            mask_char: MASK_CHAR,
        }
    }

    /// Masks only the final `suffix` scalar values.
    #[must_use]
    pub fn mask_last(suffix: usize) -> Self {
        Self::Mask {
            prefix: 0,
            suffix,
            mask_char: MASK_CHAR,
        }
    }

    /// Masks both leading and trailing characters.
    #[must_use]
    pub fn mask_both(prefix: usize, suffix: usize) -> Self {
        Self::Mask {
            prefix,
            suffix,
            mask_char: MASK_CHAR,
        }
    }

    /// Overrides the masking character used by keep/mask strategies.
    ///
    /// Has no effect on [`TextMask::Full`], which replaces the whole value
    /// with a placeholder rather than masking characters.
    #[must_use]
    pub fn with_mask_char(mut self, symbol: char) -> Self {
        match &mut self {
            Self::Full { .. } => {}
            Self::Keep { mask_char, .. } | Self::Mask { mask_char, .. } => {
                *mask_char = symbol;
            }
        }
        self
    }

    /// Applies the strategy to `value`.
    ///
    /// This method is total; empty input returns the placeholder.
    #[must_use]
    pub fn apply_to(&self, value: &str) -> String {
        match *self {
            Self::Full { ref placeholder } => placeholder.clone().into_owned(),
            Self::Keep {
                prefix,
                suffix,
                mask_char,
            } => {
                let mut chars: Vec<char> = value.chars().collect();
                let total = chars.len();
                if total == 0 {
                    return REDACTED_PLACEHOLDER.to_string();
                }
                // Keep spans covering the value leave it unchanged
                if prefix.saturating_add(suffix) >= total {
                    return chars.into_iter().collect();
                }
                for slot in &mut chars[prefix..(total - suffix)] {
                    *slot = mask_char;
                }
                chars.into_iter().collect()
            }
            Self::Mask {
                prefix,
                suffix,
                mask_char,
            } => {
                let mut chars: Vec<char> = value.chars().collect();
                let total = chars.len();
                if total == 0 {
                    return REDACTED_PLACEHOLDER.to_string();
                }
                // Mask spans covering the value mask all of it
                if prefix.saturating_add(suffix) >= total {
                    chars.fill(mask_char);
                    return chars.into_iter().collect();
                }
                for slot in &mut chars[..prefix] {
                    *slot = mask_char;
                }
                if suffix > 0 {
                    let start = total - suffix;
                    for slot in &mut chars[start..] {
                        *slot = mask_char;
                    }
                }
                chars.into_iter().collect()
            }
        }
    }
}

impl Default for TextMask {
    fn default() -> Self {
        Self::full()
    }
}
