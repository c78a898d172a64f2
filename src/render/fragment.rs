//! Rendering tree

use crate::helpers::html_escape;

/// Elements written without a closing tag
const VOID_TAGS: &[&str] = &["img", "br", "hr"];

/// A node of the rendering tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: &'static str,
    pub attrs: Vec<(&'static str, String)>,
    pub children: Vec<Fragment>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn class(self, class: &str) -> Self {
        self.attr("class", class)
    }

    pub fn attr(mut self, name: &'static str, value: &str) -> Self {
        self.attrs.push((name, value.to_string()));
        self
    }

    pub fn child(mut self, child: Fragment) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: Vec<Fragment>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.tag);
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&html_escape(value));
            out.push('"');
        }
        out.push('>');

        if VOID_TAGS.contains(&self.tag) {
            return;
        }

        for child in &self.children {
            child.write_html(out);
        }
        out.push_str("</");
        out.push_str(self.tag);
        out.push('>');
    }
}

impl From<Element> for Fragment {
    fn from(element: Element) -> Self {
        Fragment::Element(element)
    }
}

impl Fragment {
    pub fn text(text: &str) -> Self {
        Fragment::Text(text.to_string())
    }

    /// Tag name, or `None` for text
    pub fn tag(&self) -> Option<&'static str> {
        match self {
            Fragment::Element(el) => Some(el.tag),
            Fragment::Text(_) => None,
        }
    }

    /// Serialize to HTML, escaping text and attribute values
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Fragment::Element(el) => el.write_html(out),
            Fragment::Text(text) => out.push_str(&html_escape(text)),
        }
    }

    /// Concatenated text content
    pub fn text_content(&self) -> String {
        match self {
            Fragment::Text(text) => text.clone(),
            Fragment::Element(el) => el.children.iter().map(|c| c.text_content()).collect(),
        }
    }
}
