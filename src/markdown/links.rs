//! External link rewriting.

use comrak::Arena;
use comrak::nodes::{AstNode, NodeValue};

use super::ast::{collect_text, merge_adjacent_text, new_node};
use crate::options::{LinkStyle, ParseOptions};

/// Rewrites external links to footnote or inline form.
///
/// A link is left untouched when its visible text already contains its URL
/// (autolinks, `[https://x](https://x)`) or when the URL starts with an
/// exempt prefix.
pub struct LinkRewriter<'o> {
    options: &'o ParseOptions,
}

impl<'o> LinkRewriter<'o> {
    pub fn new(options: &'o ParseOptions) -> Self {
        Self { options }
    }

    /// Rewrites a link node in place.
    ///
    /// In footnote style the URL is appended to `links` and the link's
    /// children become its plain text followed by `<sup>[n]</sup>`, where n
    /// is the URL's 1-based position in `links`. In inline style each run of
    /// direct text children becomes a single `text[url]`.
    ///
    /// # Arguments
    ///
    /// * `arena`: Arena owning the document
    /// * `node`: Node to rewrite, ignored unless it is a link
    /// * `links`: Footnoted URLs collected so far in this render
    ///
    /// # Returns
    ///
    /// True if the link was rewritten
    pub fn rewrite<'a>(
        &self,
        arena: &'a Arena<AstNode<'a>>,
        node: &'a AstNode<'a>,
        links: &mut Vec<String>,
    ) -> bool {
        let url = match &node.data.borrow().value {
            NodeValue::Link(link) => link.url.clone(),
            _ => return false,
        };

        let text = collect_text(node);
        if self.is_exempt(&text, &url) {
            return false;
        }

        match self.options.link_style {
            LinkStyle::Footnote => {
                links.push(url.clone());
                let number = links.len();

                let children: Vec<_> = node.children().collect();
                for child in children {
                    child.detach();
                }

                node.append(new_node(arena, NodeValue::Text(text)));
                node.append(new_node(
                    arena,
                    NodeValue::HtmlInline(format!("<sup>[{}]</sup>", number)),
                ));
                tracing::trace!(url = %url, number, "Footnoted link");
            }
            LinkStyle::Inline => {
                merge_adjacent_text(node);
                for child in node.children() {
                    if let NodeValue::Text(ref mut t) = child.data.borrow_mut().value {
                        *t = format!("{}[{}]", text, url);
                    }
                }
                tracing::trace!(url = %url, "Inlined link");
            }
        }

        true
    }

    fn is_exempt(&self, text: &str, url: &str) -> bool {
        text.contains(url) || self.options.is_exempt(url)
    }
}
