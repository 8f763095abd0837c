//! Markdown rendering with GitHub Flavored Markdown support.

use anyhow::{Context, Result};
use comrak::nodes::{AstNode, NodeValue};
use comrak::{Arena, Options, format_html, parse_document};
use std::path::Path;

use super::ast::replace_with_html;
use super::callout::{CalloutRenderer, strip_marker};
use super::code::CodeBlockRenderer;
use super::footnotes::render_footnotes;
use super::links::LinkRewriter;
use crate::callouts::{BuiltinCallouts, CalloutResolver};
use crate::highlight::Highlighter;
use crate::options::{LinkStyle, ParseOptions};

/// State owned by a single render call.
///
/// Every call starts from a fresh context, so footnote numbering and options
/// never leak between renders.
#[derive(Debug)]
pub(crate) struct RenderContext<'o> {
    options: &'o ParseOptions,
    /// Footnoted URLs in encounter order; footnote n is `links[n - 1]`.
    links: Vec<String>,
}

impl<'o> RenderContext<'o> {
    fn new(options: &'o ParseOptions) -> Self {
        Self {
            options,
            links: Vec::new(),
        }
    }
}

/// What the transform pass does with a node.
enum Visit {
    Link,
    Code { literal: String, info: String },
    BlockQuote,
    Descend,
}

/// Renders markdown to HTML with code gutters, callouts and footnoted links.
///
/// Uses comrak with GFM extensions and hard line breaks. After parsing, a
/// single depth-first pass in document order rewrites links, replaces code
/// blocks with highlighted code sections and turns marked blockquotes into
/// callouts. The renderer itself holds no per-call state and can be reused.
pub struct MarkdownRenderer<'a> {
    options: Options<'a>,
    highlighter: Highlighter,
    resolver: Box<dyn CalloutResolver>,
}

impl<'a> MarkdownRenderer<'a> {
    /// Creates renderer with GitHub Flavored Markdown options.
    ///
    /// Configures:
    /// - Tables, strikethrough, autolinks, task lists
    /// - Newlines inside paragraphs rendered as `<br />`
    /// - Raw HTML passthrough (rewritten nodes are emitted as raw HTML)
    /// - Built-in callout table
    pub fn new() -> Self {
        let mut options = Options::default();

        // Extension options (GFM features)
        options.extension.strikethrough = true;
        options.extension.table = true;
        options.extension.autolink = true;
        options.extension.tasklist = true;

        options.render.hardbreaks = true;

        // Render options (security: we trust)
        options.render.unsafe_ = true;

        Self {
            options,
            highlighter: Highlighter::new(),
            resolver: Box::new(BuiltinCallouts),
        }
    }

    /// Creates renderer that resolves callout tags with a custom table.
    pub fn with_callout_resolver(resolver: impl CalloutResolver + 'static) -> Self {
        let mut renderer = Self::new();
        renderer.resolver = Box::new(resolver);
        renderer
    }

    /// Returns the highlighter used for code blocks.
    pub fn highlighter(&self) -> &Highlighter {
        &self.highlighter
    }

    /// Renders markdown content to HTML string.
    ///
    /// With footnote link style, the footnote section is appended even when
    /// no link was footnoted.
    ///
    /// # Arguments
    ///
    /// * `content`: Markdown content to render
    /// * `options`: Options for this call only
    ///
    /// # Returns
    ///
    /// Rendered HTML
    ///
    /// # Errors
    ///
    /// Returns error if HTML formatting fails
    pub fn render(&self, content: &str, options: &ParseOptions) -> Result<String> {
        let arena = Arena::new();
        let root = parse_document(&arena, content, &self.options);
        let mut context = RenderContext::new(options);

        self.transform(&arena, root, &mut context)?;

        let mut html = self.render_nodes(std::iter::once(root))?;
        if options.link_style == LinkStyle::Footnote {
            html.push_str(&render_footnotes(&context.links));
        }

        tracing::debug!(
            bytes = content.len(),
            footnotes = context.links.len(),
            link_style = %options.link_style,
            "Rendered markdown"
        );

        Ok(html)
    }

    /// Renders markdown file at given path.
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or rendering fails
    pub fn render_file(&self, path: impl AsRef<Path>, options: &ParseOptions) -> Result<String> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read markdown file: {}", path.display()))?;
        self.render(&content, options)
    }

    /// Rewrites the children of `node` in document order, depth first.
    ///
    /// Callout bodies are transformed before the callout itself is rendered,
    /// so links inside callouts are numbered at their position and nested
    /// callouts render inside out.
    fn transform<'n>(
        &self,
        arena: &'n Arena<AstNode<'n>>,
        node: &'n AstNode<'n>,
        context: &mut RenderContext<'_>,
    ) -> Result<()> {
        let children: Vec<_> = node.children().collect();

        for child in children {
            let visit = match &child.data.borrow().value {
                NodeValue::Link(_) => Visit::Link,
                NodeValue::CodeBlock(block) => Visit::Code {
                    literal: block.literal.clone(),
                    info: block.info.clone(),
                },
                NodeValue::BlockQuote => Visit::BlockQuote,
                _ => Visit::Descend,
            };

            match visit {
                Visit::Link => {
                    LinkRewriter::new(context.options).rewrite(arena, child, &mut context.links);
                }
                Visit::Code { literal, info } => {
                    let html = CodeBlockRenderer::new(&self.highlighter, context.options.line_number)
                        .render(&literal, &info);
                    replace_with_html(child, html);
                }
                Visit::BlockQuote => {
                    let marker = strip_marker(arena, child);
                    self.transform(arena, child, context)?;

                    if let Some(marker) = marker {
                        let html = CalloutRenderer::new(self.resolver.as_ref())
                            .render(&marker.tag, || self.render_nodes(child.children()))?;
                        replace_with_html(child, html);
                    }
                }
                Visit::Descend => self.transform(arena, child, context)?,
            }
        }

        Ok(())
    }

    /// Formats nodes and their descendants as HTML, concatenated.
    fn render_nodes<'n>(&self, nodes: impl Iterator<Item = &'n AstNode<'n>>) -> Result<String> {
        let mut html = Vec::new();
        for node in nodes {
            format_html(node, &self.options, &mut html).context("Failed to format HTML")?;
        }
        String::from_utf8(html).context("Rendered HTML is not valid UTF-8")
    }
}

impl<'a> Default for MarkdownRenderer<'a> {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders markdown with a fresh renderer.
///
/// Convenience for one-off renders; reuse a [`MarkdownRenderer`] when
/// rendering many documents to avoid reloading syntax definitions.
pub fn render_markdown(content: &str, options: &ParseOptions) -> Result<String> {
    MarkdownRenderer::new().render(content, options)
}
