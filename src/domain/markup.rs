//! Typed node tree for the rendered form.
//!
//! The renderer builds a tree of [`Node`] values instead of strings so the
//! same structure can be serialized to markup for export or inspected in
//! tests.

use std::fmt::Write;

/// Element kinds the form renderer emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Table,
    Tbody,
    Tr,
    Td,
    Input,
}

impl Tag {
    pub fn name(self) -> &'static str {
        match self {
            Tag::Table => "table",
            Tag::Tbody => "tbody",
            Tag::Tr => "tr",
            Tag::Td => "td",
            Tag::Input => "input",
        }
    }

    /// Void elements have no children and no closing tag.
    pub fn is_void(self) -> bool {
        matches!(self, Tag::Input)
    }
}

/// A node of the rendered tree.
///
/// # Examples
///
/// ```
/// use simplitrac::domain::{Node, Tag};
///
/// let cell = Node::element(Tag::Td).child(Node::text("Cost"));
/// assert_eq!(cell.to_markup(), "<td>Cost</td>");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element {
        tag: Tag,
        attributes: Vec<(String, String)>,
        children: Vec<Node>,
    },
    Text(String),
}

impl Node {
    pub fn element(tag: Tag) -> Self {
        Node::Element {
            tag,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Node::Text(content.into())
    }

    /// Appends an attribute. Has no effect on text nodes.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        if let Node::Element { attributes, .. } = &mut self {
            attributes.push((name.into(), value.into()));
        }
        self
    }

    /// Appends a child. Text nodes and void elements ignore children.
    pub fn child(mut self, node: Node) -> Self {
        if let Node::Element { tag, children, .. } = &mut self {
            if !tag.is_void() {
                children.push(node);
            }
        }
        self
    }

    pub fn children(self, nodes: impl IntoIterator<Item = Node>) -> Self {
        nodes.into_iter().fold(self, Node::child)
    }

    pub fn tag(&self) -> Option<Tag> {
        match self {
            Node::Element { tag, .. } => Some(*tag),
            Node::Text(_) => None,
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        match self {
            Node::Element { attributes, .. } => attributes
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str()),
            Node::Text(_) => None,
        }
    }

    pub fn child_nodes(&self) -> &[Node] {
        match self {
            Node::Element { children, .. } => children.as_slice(),
            Node::Text(_) => &[],
        }
    }

    /// Collects every element with the given tag, in document order.
    pub fn find_all(&self, wanted: Tag) -> Vec<&Node> {
        let mut found = Vec::new();
        self.collect(wanted, &mut found);
        found
    }

    fn collect<'a>(&'a self, wanted: Tag, found: &mut Vec<&'a Node>) {
        if self.tag() == Some(wanted) {
            found.push(self);
        }
        for child in self.child_nodes() {
            child.collect(wanted, found);
        }
    }

    /// Concatenated text of this node and its descendants.
    pub fn text_content(&self) -> String {
        match self {
            Node::Text(content) => content.clone(),
            Node::Element { children, .. } => children.iter().map(Node::text_content).collect(),
        }
    }

    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        self.write_markup(&mut out);
        out
    }

    fn write_markup(&self, out: &mut String) {
        match self {
            Node::Text(content) => out.push_str(&escape_text(content)),
            Node::Element {
                tag,
                attributes,
                children,
            } => {
                out.push('<');
                out.push_str(tag.name());
                for (name, value) in attributes {
                    // Writing into a String cannot fail.
                    let _ = write!(out, " {}=\"{}\"", name, escape_attribute(value));
                }
                out.push('>');
                if tag.is_void() {
                    return;
                }
                for child in children {
                    child.write_markup(out);
                }
                let _ = write!(out, "</{}>", tag.name());
            }
        }
    }
}

fn escape_text(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Escapes a value for use inside a double-quoted attribute.
pub fn escape_attribute(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
