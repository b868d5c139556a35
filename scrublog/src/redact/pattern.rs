//! Regex-driven global text rewrites.
//!
//! A [`PatternRewrite`] pairs a compiled regular expression with a
//! [`TextMask`], producing a ready-made global replace: every match in the
//! serialized record text is rewritten through the mask, whether it sits in
//! the message or inside a nested field's text content.

use regex::{Captures, Regex};

use crate::error::ConfigError;
use crate::mask::TextMask;

/// A text rewrite applied across an entire serialized record.
#[derive(Clone, Debug)]
pub struct PatternRewrite {
    regex: Regex,
    mask: TextMask,
}

impl PatternRewrite {
    /// Compiles `pattern` and pairs it with `mask`.
    ///
    /// Fails fast with [`ConfigError::InvalidRewrite`] on a malformed
    /// expression.
    pub fn new(pattern: &str, mask: TextMask) -> Result<Self, ConfigError> {
        Ok(Self {
            regex: Regex::new(pattern)?,
            mask,
        })
    }

    /// Rewrites every match in `text` through the mask.
    #[must_use]
    pub fn rewrite(&self, text: &str) -> String {
        self.regex
            .replace_all(text, |caps: &Captures<'_>| self.mask.apply_to(&caps[0]))
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::PatternRewrite;
    use crate::mask::TextMask;

    #[test]
    fn rewrites_every_occurrence() {
        let rewrite = PatternRewrite::new(
            r"\+\d{10}",
            TextMask::mask_last(4).with_mask_char('X'),
        )
        .unwrap();
        assert_eq!(
            rewrite.rewrite("call +1234567890 or +1098765432"),
            "call +123456XXXX or +109876XXXX"
        );
    }

    #[test]
    fn non_matching_text_is_unchanged() {
        let rewrite = PatternRewrite::new(r"\d{16}", TextMask::full()).unwrap();
        assert_eq!(rewrite.rewrite("no card here"), "no card here");
    }

    #[test]
    fn malformed_expressions_fail_fast() {
        assert!(PatternRewrite::new(r"(unclosed", TextMask::full()).is_err());
    }
}
