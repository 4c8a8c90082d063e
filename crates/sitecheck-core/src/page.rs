//! HTML page signals: visible text and the set of distinct tag names.

use scraper::{Html, Node};
use std::collections::BTreeSet;

/// Elements whose text content is never rendered.
const NON_VISIBLE: [&str; 3] = ["script", "style", "template"];

/// Elements the HTML5 tree builder creates on its own when the markup omits them.
const IMPLIED: [&str; 6] = ["html", "head", "body", "tbody", "tr", "colgroup"];

/// What the classifier needs to know about a fetched page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageSignals {
    /// Text nodes in document order, each trimmed, empties dropped, joined by one space.
    pub visible_text: String,
    /// Distinct element names written in the markup.
    pub tag_names: BTreeSet<String>,
}

impl PageSignals {
    /// Parses `html` leniently; malformed markup never fails, it just yields less.
    ///
    /// Elements the parser inserted by itself (a missing `html`, `head`,
    /// `body` or `tbody`, say) are not counted; only tags in the source are.
    pub fn from_html(html: &str) -> Self {
        let document = Html::parse_document(html);
        let mut pieces: Vec<&str> = Vec::new();
        let mut tag_names = BTreeSet::new();

        for node in document.tree.root().descendants() {
            match node.value() {
                Node::Element(el) => {
                    tag_names.insert(el.name().to_string());
                }
                Node::Text(text) => {
                    let hidden = node
                        .parent()
                        .and_then(|p| p.value().as_element())
                        .is_some_and(|el| NON_VISIBLE.contains(&el.name()));
                    if hidden {
                        continue;
                    }
                    let trimmed = text.trim();
                    if !trimmed.is_empty() {
                        pieces.push(trimmed);
                    }
                }
                _ => {}
            }
        }

        let lowered = html.to_ascii_lowercase();
        tag_names.retain(|name: &String| {
            !IMPLIED.contains(&name.as_str()) || opened_in_source(&lowered, name)
        });

        Self {
            visible_text: pieces.join(" "),
            tag_names,
        }
    }

    pub fn tag_count(&self) -> usize {
        self.tag_names.len()
    }

    /// Length of the visible text in characters (not bytes).
    pub fn text_len(&self) -> usize {
        self.visible_text.chars().count()
    }
}

/// Whether `<name` appears in `lowered` as a whole start tag.
fn opened_in_source(lowered: &str, name: &str) -> bool {
    let open = format!("<{name}");
    lowered.match_indices(&open).any(|(i, m)| {
        lowered[i + m.len()..]
            .chars()
            .next()
            .map_or(true, |c| c.is_ascii_whitespace() || c == '>' || c == '/')
    })
}
