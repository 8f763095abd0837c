//! Markdown to HTML rendering with code gutters, callouts and footnoted links.

mod callouts;
mod config;
mod highlight;
mod markdown;
mod options;

pub use callouts::{BuiltinCallouts, CalloutInfo, CalloutResolver};
pub use config::Config;
pub use highlight::{DEFAULT_THEME, Highlighter};
pub use markdown::{MarkdownRenderer, render_footnotes, render_markdown};
pub use options::{DEFAULT_EXEMPT_PREFIX, LinkStyle, ParseOptions};
