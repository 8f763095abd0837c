//! Callout tag lookup.
//!
//! Maps callout tags such as `note` or `warning` to the icon and CSS class
//! used when rendering the callout box.

use maud::html;

/// Display metadata for a recognized callout tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalloutInfo {
    /// Icon markup placed before the title.
    pub icon: String,
    /// CSS class added to the callout wrapper.
    pub style: String,
}

impl CalloutInfo {
    pub fn new(icon: impl Into<String>, style: impl Into<String>) -> Self {
        Self {
            icon: icon.into(),
            style: style.into(),
        }
    }
}

/// Resolves callout tags to display metadata.
pub trait CalloutResolver: Send + Sync {
    /// Returns metadata for the tag, or None if the tag is not recognized.
    fn resolve(&self, tag: &str) -> Option<CalloutInfo>;
}

/// Built-in callout table.
///
/// Tags are matched case-insensitively and aliases share the style of their
/// canonical tag (`tip`, `hint` and `important` all render as `callout-tip`).
/// Icons are Phosphor icon elements.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinCallouts;

impl BuiltinCallouts {
    /// Returns Phosphor icon class and style class for a tag.
    fn classes(tag: &str) -> Option<(&'static str, &'static str)> {
        let entry = match tag.to_lowercase().as_str() {
            "note" => ("ph ph-pencil-simple", "callout-note"),
            "abstract" | "summary" | "tldr" => ("ph ph-clipboard-text", "callout-abstract"),
            "info" => ("ph ph-info", "callout-info"),
            "todo" => ("ph ph-check-circle", "callout-todo"),
            "tip" | "hint" | "important" => ("ph ph-fire", "callout-tip"),
            "success" | "check" | "done" => ("ph ph-check", "callout-success"),
            "question" | "help" | "faq" => ("ph ph-question", "callout-question"),
            "warning" | "caution" | "attention" => ("ph ph-warning", "callout-warning"),
            "failure" | "fail" | "missing" => ("ph ph-x", "callout-failure"),
            "danger" | "error" => ("ph ph-lightning", "callout-danger"),
            "bug" => ("ph ph-bug", "callout-bug"),
            "example" => ("ph ph-list", "callout-example"),
            "quote" | "cite" => ("ph ph-quotes", "callout-quote"),
            _ => return None,
        };
        Some(entry)
    }
}

impl CalloutResolver for BuiltinCallouts {
    fn resolve(&self, tag: &str) -> Option<CalloutInfo> {
        let (icon_class, style) = Self::classes(tag)?;
        let icon = html! {
            i class=(format!("{} note-callout-icon", icon_class)) {}
        };
        Some(CalloutInfo::new(icon.into_string(), style))
    }
}
