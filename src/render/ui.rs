//! Structured UI tree
//!
//! Views are built as [`Node`] trees instead of concatenated markup, so
//! subject names and service text are always escaped on output. A tree renders
//! to HTML ([`Node::to_html`]) or to plain terminal text ([`Node::to_text`]).

/// Tags that never have children or a closing tag
const VOID_TAGS: &[&str] = &["br", "input"];

/// Tags that end a line in the terminal rendering
const BLOCK_TAGS: &[&str] = &["div", "section", "h2", "h3", "h4", "p", "label", "li", "ul"];

/// UI tree node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// An element with attributes and children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: &'static str,
    /// `None` value renders as a bare boolean attribute
    pub attrs: Vec<(String, Option<String>)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), Some(value.into())));
        self
    }

    pub fn flag(mut self, name: impl Into<String>) -> Self {
        self.attrs.push((name.into(), None));
        self
    }

    /// Adds a boolean attribute only when `on` is set
    pub fn flag_if(self, name: impl Into<String>, on: bool) -> Self {
        if on {
            self.flag(name)
        } else {
            self
        }
    }

    pub fn class(self, class: impl Into<String>) -> Self {
        self.attr("class", class)
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn children(mut self, nodes: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(nodes);
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_deref().unwrap_or(""))
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.iter().any(|(n, _)| n == name)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .map(|c| c.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    /// Depth-first search for every element carrying `class`
    pub fn find_by_class<'a>(&'a self, class: &str) -> Vec<&'a Element> {
        let mut found = Vec::new();
        self.collect_by_class(class, &mut found);
        found
    }

    fn collect_by_class<'a>(&'a self, class: &str, found: &mut Vec<&'a Element>) {
        if let Node::Element(element) = self {
            if element.has_class(class) {
                found.push(element);
            }
            for child in &element.children {
                child.collect_by_class(class, found);
            }
        }
    }

    /// Concatenated text content, ignoring markup
    pub fn text_content(&self) -> String {
        match self {
            Node::Text(t) => t.clone(),
            Node::Element(e) => e.children.iter().map(Node::text_content).collect(),
        }
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Text(t) => out.push_str(&html_escape(t)),
            Node::Element(e) => {
                out.push('<');
                out.push_str(e.tag);
                for (name, value) in &e.attrs {
                    out.push(' ');
                    out.push_str(name);
                    if let Some(value) = value {
                        out.push_str("=\"");
                        out.push_str(&html_escape(value));
                        out.push('"');
                    }
                }
                out.push('>');
                if VOID_TAGS.contains(&e.tag) {
                    return;
                }
                for child in &e.children {
                    child.write_html(out);
                }
                out.push_str("</");
                out.push_str(e.tag);
                out.push('>');
            }
        }
    }

    /// Terminal rendering; hidden elements are skipped
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        self.write_text(&mut out);
        tidy_lines(&out)
    }

    fn write_text(&self, out: &mut String) {
        let e = match self {
            Node::Text(t) => {
                out.push_str(t);
                return;
            }
            Node::Element(e) => e,
        };

        if e.has_attr("hidden") {
            return;
        }

        match e.tag {
            "br" => out.push('\n'),
            "input" => match e.get_attr("type") {
                Some("checkbox") => {
                    out.push_str(if e.has_attr("checked") { "[x] " } else { "[ ] " })
                }
                _ => {
                    let value = e
                        .get_attr("value")
                        .filter(|v| !v.is_empty())
                        .or_else(|| e.get_attr("placeholder"))
                        .unwrap_or("");
                    out.push_str(&format!(" [{}]", value));
                }
            },
            "button" => {
                out.push_str("[ ");
                for child in &e.children {
                    child.write_text(out);
                }
                out.push_str(" ]");
                if e.has_attr("disabled") {
                    out.push_str(" (busy)");
                }
                out.push('\n');
            }
            tag => {
                for child in &e.children {
                    child.write_text(out);
                }
                if BLOCK_TAGS.contains(&tag) && !out.ends_with('\n') {
                    out.push('\n');
                }
            }
        }
    }
}

/// Escapes the five HTML-special characters
pub fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Trims trailing spaces and collapses runs of blank lines
fn tidy_lines(text: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();
    for line in text.lines().map(str::trim_end) {
        if line.is_empty() && lines.last().map_or(true, |l| l.is_empty()) {
            continue;
        }
        lines.push(line);
    }
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escapes_text_and_attributes() {
        let node: Node = Element::new("label")
            .attr("data-sub", "C++ \"adv\"")
            .text("<script>alert(1)</script> & co")
            .into();

        assert_eq!(
            node.to_html(),
            "<label data-sub=\"C++ &quot;adv&quot;\">&lt;script&gt;alert(1)&lt;/script&gt; &amp; co</label>"
        );
    }

    #[test]
    fn test_void_and_boolean_attributes() {
        let node: Node = Element::new("input")
            .attr("type", "checkbox")
            .flag("checked")
            .into();
        assert_eq!(node.to_html(), "<input type=\"checkbox\" checked>");
    }

    #[test]
    fn test_text_rendering_skips_hidden() {
        let node: Node = Element::new("div")
            .child(Element::new("h3").text("Data Analyst"))
            .child(Element::new("div").flag("hidden").text("secret"))
            .child(Element::new("button").flag("disabled").text("Go"))
            .into();

        assert_eq!(node.to_text(), "Data Analyst\n[ Go ] (busy)");
    }

    #[test]
    fn test_find_by_class() {
        let node: Node = Element::new("div")
            .child(Element::new("div").class("career-card x").text("a"))
            .child(Element::new("div").class("career-card").text("b"))
            .into();

        let cards = node.find_by_class("career-card");
        assert_eq!(cards.len(), 2);
        assert_eq!(Node::Element(cards[1].clone()).text_content(), "b");
    }
}
