//! Syntax highlighting with syntect.

use anyhow::{Context, Result};
use syntect::highlighting::ThemeSet;
use syntect::html::{ClassStyle, ClassedHTMLGenerator, css_for_theme_with_class_style};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

/// CSS class style shared by highlighted markup and generated stylesheets.
///
/// The `hljs-` prefix keeps highlight.js stylesheets usable.
const CLASS_STYLE: ClassStyle = ClassStyle::SpacedPrefixed { prefix: "hljs-" };

/// Theme used when none is requested.
pub const DEFAULT_THEME: &str = "InspiredGitHub";

/// Highlights code blocks into HTML with CSS class names.
///
/// Highlighting never fails from the caller's point of view: the declared
/// language is tried first, then detection from the first line, and finally
/// the code is returned as escaped plain text.
pub struct Highlighter {
    syntax_set: SyntaxSet,
}

impl Highlighter {
    /// Creates highlighter with syntect's bundled syntax definitions.
    pub fn new() -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
        }
    }

    /// Highlights code, falling back through detection to plain text.
    ///
    /// # Arguments
    ///
    /// * `code`: Source code to highlight
    /// * `language`: Optional language token (rust, py, toml, etc)
    ///
    /// # Returns
    ///
    /// HTML string with `<span class="hljs-*">` tags, or escaped text
    pub fn highlight(&self, code: &str, language: Option<&str>) -> String {
        if code.is_empty() {
            return String::new();
        }

        if let Some(syntax) = language.and_then(|lang| self.find_syntax(lang)) {
            match self.highlight_with(code, syntax) {
                Ok(html) => return html,
                Err(e) => tracing::debug!(
                    language = language.unwrap_or_default(),
                    error = %e,
                    "Declared language failed, trying detection"
                ),
            }
        }

        if let Some(syntax) = self.syntax_set.find_syntax_by_first_line(code) {
            match self.highlight_with(code, syntax) {
                Ok(html) => return html,
                Err(e) => tracing::debug!(
                    syntax = %syntax.name,
                    error = %e,
                    "Detected syntax failed, using plain text"
                ),
            }
        }

        escape_html(code)
    }

    /// Generates a stylesheet for the highlight classes from a bundled theme.
    ///
    /// # Errors
    ///
    /// Returns error if the theme is unknown or CSS generation fails
    pub fn stylesheet(&self, theme: &str) -> Result<String> {
        let themes = ThemeSet::load_defaults();
        let selected = themes.themes.get(theme).with_context(|| {
            let known: Vec<&str> = themes.themes.keys().map(String::as_str).collect();
            format!("Unknown theme: {} (available: {})", theme, known.join(", "))
        })?;

        css_for_theme_with_class_style(selected, CLASS_STYLE)
            .with_context(|| format!("Failed to generate CSS for theme: {}", theme))
    }

    fn find_syntax(&self, language: &str) -> Option<&SyntaxReference> {
        self.syntax_set
            .find_syntax_by_token(language)
            .or_else(|| self.syntax_set.find_syntax_by_extension(language))
    }

    fn highlight_with(&self, code: &str, syntax: &SyntaxReference) -> Result<String> {
        let mut generator =
            ClassedHTMLGenerator::new_with_class_style(syntax, &self.syntax_set, CLASS_STYLE);

        for line in LinesWithEndings::from(code) {
            generator
                .parse_html_for_line_which_includes_newline(line)
                .context("Failed to parse line for syntax highlighting")?;
        }

        Ok(generator.finalize())
    }
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

/// Escapes HTML special characters.
pub(crate) fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
