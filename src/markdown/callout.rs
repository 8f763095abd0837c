//! Callout detection and rendering for blockquotes.
//!
//! A blockquote whose first line is `[!tag]` becomes a callout box:
//!
//! ```text
//! > [!warning]
//! > Mind the gap.
//! ```

use anyhow::Result;
use comrak::Arena;
use comrak::nodes::{AstNode, NodeValue};
use maud::{PreEscaped, html};

use super::ast::new_node;
use crate::callouts::CalloutResolver;

/// Marker found at the start of a blockquote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalloutMarker {
    /// Bracketed tag without the `[!` and `]` delimiters.
    pub tag: String,
    /// Number of bytes of leading text taken by the marker.
    pub consumed: usize,
}

/// Parses a `[!tag]` marker at the very start of text.
///
/// The tag must be non-empty. Text after the closing bracket is not
/// inspected.
pub fn parse_marker(text: &str) -> Option<CalloutMarker> {
    let rest = text.strip_prefix("[!")?;
    let end = rest.find(']')?;
    let tag = &rest[..end];
    if tag.is_empty() {
        return None;
    }

    Some(CalloutMarker {
        tag: tag.to_string(),
        consumed: "[!".len() + end + "]".len(),
    })
}

/// Detects a callout marker in a blockquote and removes it from the tree.
///
/// The marker must open the blockquote's first paragraph. Leading text nodes
/// up to the first line break are joined before parsing, since the parser
/// may split brackets into separate text nodes. Text following the marker on
/// the same line stays in the body; when nothing follows, the line break goes
/// too, and a paragraph left empty is removed.
///
/// # Returns
///
/// The marker if the blockquote is a callout, None otherwise (tree untouched)
pub fn strip_marker<'a>(
    arena: &'a Arena<AstNode<'a>>,
    blockquote: &'a AstNode<'a>,
) -> Option<CalloutMarker> {
    let paragraph = blockquote.first_child()?;
    if !matches!(paragraph.data.borrow().value, NodeValue::Paragraph) {
        return None;
    }

    let mut leading = Vec::new();
    let mut text = String::new();
    for child in paragraph.children() {
        match &child.data.borrow().value {
            NodeValue::Text(t) => text.push_str(t),
            _ => break,
        }
        leading.push(child);
    }

    let marker = parse_marker(&text)?;

    for node in leading {
        node.detach();
    }

    let remainder = text[marker.consumed..].trim_start();
    if remainder.is_empty() {
        if let Some(next) = paragraph.first_child()
            && matches!(
                next.data.borrow().value,
                NodeValue::SoftBreak | NodeValue::LineBreak
            )
        {
            next.detach();
        }
    } else {
        paragraph.prepend(new_node(arena, NodeValue::Text(remainder.to_string())));
    }

    if paragraph.first_child().is_none() {
        paragraph.detach();
    }

    Some(marker)
}

/// Wraps rendered callout bodies in callout markup.
pub struct CalloutRenderer<'r> {
    resolver: &'r dyn CalloutResolver,
}

impl<'r> CalloutRenderer<'r> {
    pub fn new(resolver: &'r dyn CalloutResolver) -> Self {
        Self { resolver }
    }

    /// Renders a callout box.
    ///
    /// Unrecognized tags render without icon or style class.
    ///
    /// # Arguments
    ///
    /// * `tag`: Callout tag from the marker
    /// * `render_body`: Renders the blockquote's remaining content to HTML
    ///
    /// # Errors
    ///
    /// Returns error if rendering the body fails
    pub fn render<F>(&self, tag: &str, render_body: F) -> Result<String>
    where
        F: FnOnce() -> Result<String>,
    {
        let body = render_body()?;

        let info = self.resolver.resolve(tag);
        if info.is_none() {
            tracing::debug!(tag, "Unrecognized callout tag");
        }

        let (icon, class) = match info {
            Some(info) if !info.style.is_empty() => {
                (info.icon, format!("note-callout {}", info.style))
            }
            Some(info) => (info.icon, "note-callout".to_string()),
            None => (String::new(), "note-callout".to_string()),
        };

        let markup = html! {
            section class=(class) {
                section class="note-callout-title-wrap" {
                    (PreEscaped(icon))
                    span class="note-callout-title" { (capitalize(tag)) }
                }
                section class="note-callout-content" {
                    (PreEscaped(body))
                }
            }
        };

        let mut rendered = markup.into_string();
        rendered.push('\n');
        Ok(rendered)
    }
}

/// Uppercases the first character.
fn capitalize(tag: &str) -> String {
    let mut chars = tag.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::callouts::{BuiltinCallouts, CalloutInfo};
    use crate::markdown::ast::collect_text;
    use comrak::{Options, parse_document};

    struct FixedResolver;

    impl CalloutResolver for FixedResolver {
        fn resolve(&self, tag: &str) -> Option<CalloutInfo> {
            (tag == "note").then(|| CalloutInfo::new("i", "s"))
        }
    }

    fn blockquote<'a>(root: &'a AstNode<'a>) -> &'a AstNode<'a> {
        root.descendants()
            .find(|n| matches!(n.data.borrow().value, NodeValue::BlockQuote))
            .expect("Should contain blockquote")
    }

    #[test]
    fn test_parse_marker() {
        // Arrange & Act
        let marker = parse_marker("[!note] rest").expect("Should parse");

        // Assert
        assert_eq!(marker.tag, "note");
        assert_eq!(marker.consumed, 7);
    }

    #[test]
    fn test_parse_marker_rejects_non_markers() {
        // Arrange & Act & Assert
        assert_eq!(parse_marker("text [!note]"), None);
        assert_eq!(parse_marker("[!]"), None);
        assert_eq!(parse_marker("[!note"), None);
        assert_eq!(parse_marker("[note]"), None);
    }

    #[test]
    fn test_strip_marker_on_own_line() {
        // Arrange
        let arena = Arena::new();
        let root = parse_document(&arena, "> [!tip]\n> Body text", &Options::default());
        let quote = blockquote(root);

        // Act
        let marker = strip_marker(&arena, quote).expect("Should detect marker");

        // Assert
        assert_eq!(marker.tag, "tip");
        assert_eq!(collect_text(quote), "Body text");
        let first = quote
            .first_child()
            .and_then(|p| p.first_child())
            .expect("Paragraph should keep content");
        assert!(matches!(first.data.borrow().value, NodeValue::Text(_)));
    }

    #[test]
    fn test_strip_marker_keeps_rest_of_line() {
        // Arrange
        let arena = Arena::new();
        let root = parse_document(&arena, "> [!info] Heads up\n> More", &Options::default());
        let quote = blockquote(root);

        // Act
        let marker = strip_marker(&arena, quote).expect("Should detect marker");

        // Assert
        assert_eq!(marker.tag, "info");
        assert_eq!(collect_text(quote), "Heads upMore");
        assert!(!collect_text(quote).contains("[!"), "Marker must not leak");
    }

    #[test]
    fn test_strip_marker_removes_empty_paragraph() {
        // Arrange
        let arena = Arena::new();
        let root = parse_document(&arena, "> [!note]\n>\n> Second", &Options::default());
        let quote = blockquote(root);

        // Act
        strip_marker(&arena, quote).expect("Should detect marker");

        // Assert
        assert_eq!(quote.children().count(), 1);
        assert_eq!(collect_text(quote), "Second");
    }

    #[test]
    fn test_strip_marker_without_marker_leaves_tree() {
        // Arrange
        let arena = Arena::new();
        let root = parse_document(&arena, "> plain [!note]\n> quote", &Options::default());
        let quote = blockquote(root);
        let before = collect_text(quote);

        // Act
        let marker = strip_marker(&arena, quote);

        // Assert
        assert_eq!(marker, None);
        assert_eq!(collect_text(quote), before);
    }

    #[test]
    fn test_render_with_resolved_tag() {
        // Arrange
        let resolver = FixedResolver;
        let renderer = CalloutRenderer::new(&resolver);

        // Act
        let html = renderer
            .render("note", || Ok("<p>Hello</p>\n".to_string()))
            .expect("Should render");

        // Assert
        assert_eq!(
            html,
            "<section class=\"note-callout s\"><section class=\"note-callout-title-wrap\">i<span class=\"note-callout-title\">Note</span></section><section class=\"note-callout-content\"><p>Hello</p>\n</section></section>\n"
        );
    }

    #[test]
    fn test_render_with_unknown_tag() {
        // Arrange
        let resolver = FixedResolver;
        let renderer = CalloutRenderer::new(&resolver);

        // Act
        let html = renderer
            .render("mystery", || Ok(String::new()))
            .expect("Should render");

        // Assert
        assert!(html.starts_with("<section class=\"note-callout\">"), "{}", html);
        assert!(html.contains(">Mystery</span>"));
    }

    #[test]
    fn test_render_with_builtin_icon() {
        // Arrange
        let resolver = BuiltinCallouts;
        let renderer = CalloutRenderer::new(&resolver);

        // Act
        let html = renderer
            .render("warning", || Ok(String::new()))
            .expect("Should render");

        // Assert
        assert!(html.contains("note-callout callout-warning"));
        assert!(html.contains("<i class=\"ph ph-warning note-callout-icon\"></i>"));
    }

    #[test]
    fn test_render_propagates_body_error() {
        // Arrange
        let resolver = FixedResolver;
        let renderer = CalloutRenderer::new(&resolver);

        // Act
        let result = renderer.render("note", || Err(anyhow::anyhow!("body failed")));

        // Assert
        assert!(result.is_err());
    }

    #[test]
    fn test_capitalize() {
        // Arrange & Act & Assert
        assert_eq!(capitalize("note"), "Note");
        assert_eq!(capitalize("Note"), "Note");
        assert_eq!(capitalize("ärger"), "Ärger");
        assert_eq!(capitalize(""), "");
    }
}
