//! Code block rendering with line-number gutter.

use maud::{PreEscaped, html};

use crate::highlight::Highlighter;

/// Renders fenced and indented code blocks.
///
/// Output shape:
/// `<section class="code-section"><ul><li>1</li>…</ul><pre><code class="hljs language-X">…</code></pre></section>`
/// where the gutter is omitted when line numbers are off and the class is
/// omitted when the block has no language.
pub struct CodeBlockRenderer<'h> {
    highlighter: &'h Highlighter,
    line_numbers: bool,
}

impl<'h> CodeBlockRenderer<'h> {
    pub fn new(highlighter: &'h Highlighter, line_numbers: bool) -> Self {
        Self {
            highlighter,
            line_numbers,
        }
    }

    /// Renders a code block.
    ///
    /// # Arguments
    ///
    /// * `code`: Raw code block content
    /// * `info`: Info string following the opening fence (may be empty)
    ///
    /// # Returns
    ///
    /// Code section HTML terminated by a newline
    pub fn render(&self, code: &str, info: &str) -> String {
        let language = language_hint(info);
        let code = normalize_newline(code);
        let highlighted = self.highlighter.highlight(&code, language);

        // Splitting "a\nb\n" yields three pieces, the last one empty
        let gutter_end = code.split('\n').count();
        let class = language.map(|lang| format!("hljs language-{}", lang));

        let markup = html! {
            section class="code-section" {
                @if self.line_numbers {
                    ul {
                        @for number in 1..gutter_end {
                            li { (number) }
                        }
                    }
                }
                pre {
                    code class=[class] { (PreEscaped(highlighted)) }
                }
            }
        };

        let mut rendered = markup.into_string();
        rendered.push('\n');
        rendered
    }
}

/// Extracts the language from an info string: everything before the first
/// whitespace, case preserved.
pub fn language_hint(info: &str) -> Option<&str> {
    info.split_whitespace().next()
}

/// Strips one trailing newline if present, then appends exactly one.
fn normalize_newline(code: &str) -> String {
    let mut normalized = code.strip_suffix('\n').unwrap_or(code).to_string();
    normalized.push('\n');
    normalized
}
