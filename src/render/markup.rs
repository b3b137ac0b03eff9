//! Roadmap text to UI nodes
//!
//! The advice text uses three markers, applied in this order:
//! 1. `**text**` becomes a bold span (shortest match, never across lines)
//! 2. every literal `* ` becomes `• `
//! 3. every newline becomes a line break
//!
//! Bold runs first so a bold span's leading `**` is never read as a bullet.

use regex::Regex;
use std::sync::OnceLock;

use crate::render::ui::{Element, Node};

fn bold_pattern() -> &'static Regex {
    static BOLD: OnceLock<Regex> = OnceLock::new();
    BOLD.get_or_init(|| Regex::new(r"\*\*(.*?)\*\*").expect("bold pattern is valid"))
}

/// Converts advice text into inline nodes
pub fn roadmap_markup(advice: &str) -> Vec<Node> {
    let mut nodes = Vec::new();
    let mut last = 0;

    for caps in bold_pattern().captures_iter(advice) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        push_plain(&mut nodes, &advice[last..whole.start()]);
        nodes.push(Element::new("strong").children(inline_text(inner.as_str())).into());
        last = whole.end();
    }
    push_plain(&mut nodes, &advice[last..]);

    nodes
}

/// Wraps the converted advice in its content block
pub fn roadmap_content(advice: &str) -> Node {
    Element::new("div")
        .class("roadmap-content")
        .children(roadmap_markup(advice))
        .into()
}

fn push_plain(nodes: &mut Vec<Node>, text: &str) {
    nodes.extend(inline_text(text));
}

/// Applies the bullet and line-break rules to text without bold markers
fn inline_text(text: &str) -> Vec<Node> {
    let bulleted = text.replace("* ", "• ");
    let mut nodes = Vec::new();
    for (i, line) in bulleted.split('\n').enumerate() {
        if i > 0 {
            nodes.push(Element::new("br").into());
        }
        if !line.is_empty() {
            nodes.push(Node::text(line));
        }
    }
    nodes
}
