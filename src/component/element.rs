use std::collections::BTreeMap;
use std::fmt::Write;

/// A minimal element node: a tag, optional text, attributes and children.
///
/// Components build their root element out of these; mount targets receive
/// them whole.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    tag: String,
    text: Option<String>,
    attributes: BTreeMap<String, String>,
    children: Vec<Element>,
}

impl Element {
    /// Create an empty element with the given tag name.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Builder form of [`Element::set_text`].
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.set_text(text);
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    pub fn append(&mut self, child: Element) {
        self.children.push(child);
    }

    pub fn clear_children(&mut self) {
        self.children.clear();
    }

    /// Serialize to HTML, escaping text and attribute values.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        let _ = write!(out, "<{}", self.tag);
        for (name, value) in &self.attributes {
            let _ = write!(out, " {}=\"{}\"", name, escape(value));
        }
        out.push('>');
        if let Some(text) = &self.text {
            out.push_str(&escape(text));
        }
        for child in &self.children {
            child.write_html(out);
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}

fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_output_is_escaped() {
        let mut root = Element::new("section");
        root.set_attribute("class", "a\"b");
        root.append(Element::new("h1").with_text("Tom & <Jerry>"));

        assert_eq!(
            root.to_html(),
            "<section class=\"a&quot;b\"><h1>Tom &amp; &lt;Jerry&gt;</h1></section>"
        );
    }

    #[test]
    fn clear_children_keeps_self() {
        let mut root = Element::new("div").with_text("x");
        root.append(Element::new("span"));
        root.clear_children();

        assert!(root.children().is_empty());
        assert_eq!(root.text(), Some("x"));
        assert_eq!(root.tag(), "div");
    }
}
