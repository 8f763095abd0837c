//! Per-call rendering options.

use clap::ValueEnum;
use std::fmt;

/// Link prefix that is never rewritten.
///
/// Article links on this platform pass through a redirect page and are
/// shown to readers as-is.
pub const DEFAULT_EXEMPT_PREFIX: &str = "https://mp.weixin.qq.com/s/";

/// How external links are presented in rendered output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LinkStyle {
    /// Link text followed by a numbered superscript, URLs listed at the end.
    #[default]
    Footnote,
    /// Link text followed by the bracketed URL.
    Inline,
}

impl fmt::Display for LinkStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkStyle::Footnote => f.write_str("footnote"),
            LinkStyle::Inline => f.write_str("inline"),
        }
    }
}

/// Options supplied with every render call.
///
/// Options are read by a single render and never stored between calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Emit a line-number gutter for code blocks.
    pub line_number: bool,
    /// Presentation of external links.
    pub link_style: LinkStyle,
    /// Links whose URL starts with one of these prefixes are left untouched.
    pub exempt_prefixes: Vec<String>,
}

impl ParseOptions {
    /// Creates options with the default exempt prefixes.
    pub fn new(line_number: bool, link_style: LinkStyle) -> Self {
        Self {
            line_number,
            link_style,
            ..Self::default()
        }
    }

    /// Returns true if the URL starts with any exempt prefix.
    pub fn is_exempt(&self, url: &str) -> bool {
        self.exempt_prefixes
            .iter()
            .any(|prefix| url.starts_with(prefix.as_str()))
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            line_number: true,
            link_style: LinkStyle::Footnote,
            exempt_prefixes: vec![DEFAULT_EXEMPT_PREFIX.to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        // Arrange & Act
        let options = ParseOptions::default();

        // Assert
        assert!(options.line_number);
        assert_eq!(options.link_style, LinkStyle::Footnote);
        assert_eq!(options.exempt_prefixes, vec![DEFAULT_EXEMPT_PREFIX]);
    }

    #[test]
    fn test_new_keeps_default_prefixes() {
        // Arrange & Act
        let options = ParseOptions::new(false, LinkStyle::Inline);

        // Assert
        assert!(!options.line_number);
        assert_eq!(options.link_style, LinkStyle::Inline);
        assert_eq!(options.exempt_prefixes.len(), 1);
    }

    #[test]
    fn test_is_exempt_matches_prefix_only() {
        // Arrange
        let options = ParseOptions::default();

        // Act & Assert
        assert!(options.is_exempt("https://mp.weixin.qq.com/s/abc"));
        assert!(!options.is_exempt("https://example.com/?u=https://mp.weixin.qq.com/s/"));
        assert!(!options.is_exempt("https://mp.weixin.qq.com/other"));
    }

    #[test]
    fn test_link_style_display() {
        // Arrange & Act & Assert
        assert_eq!(LinkStyle::Footnote.to_string(), "footnote");
        assert_eq!(LinkStyle::Inline.to_string(), "inline");
    }
}
