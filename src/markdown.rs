//! Markdown rendering with GitHub Flavored Markdown support.
//!
//! This module renders markdown using comrak with GFM extensions and
//! rewrites the parsed tree before formatting: code blocks get line-number
//! gutters and syntect highlighting, `[!tag]` blockquotes become callouts,
//! and external links become numbered footnotes or inline bracketed URLs.

mod ast;
mod callout;
mod code;
mod footnotes;
mod links;
mod renderer;

pub use footnotes::render_footnotes;
pub use renderer::{MarkdownRenderer, render_markdown};
