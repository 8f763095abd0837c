//! Trailing list of footnoted links.

use maud::{PreEscaped, html};

const SECTION_OPEN: &str = "<seciton class=\"footnotes\">";
const SECTION_CLOSE: &str = "</section>";

/// Renders the footnote section for links collected during a render.
///
/// Item order matches footnote numbers: the first link is `[1]`. An empty
/// slice still produces the section with an empty list.
pub fn render_footnotes(links: &[String]) -> String {
    html! {
        (PreEscaped(SECTION_OPEN))
        hr;
        ol {
            @for href in links {
                li { (href) (PreEscaped("&nbsp;↩")) }
            }
        }
        (PreEscaped(SECTION_CLOSE))
    }
    .into_string()
}
