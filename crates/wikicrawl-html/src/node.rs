//! HTML nodes.

use std::collections::HashMap;
use std::fmt;
use std::ops::Deref;

use html5ever::tendril::StrTendril;
use html5ever::{Attribute, LocalName, QualName};

/// An HTML node.
///
/// Only [`Node::Element`] carries a tag name and attributes, every other variant is
/// content or bookkeeping produced by the parser.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// The document root.
    Document,

    /// The fragment root.
    Fragment,

    /// A doctype.
    Doctype(Doctype),

    /// A comment.
    Comment(Comment),

    /// Text.
    Text(Text),

    /// An element.
    Element(Element),

    /// A processing instruction.
    ProcessingInstruction(ProcessingInstruction),
}

impl Node {
    pub fn is_element(&self) -> bool {
        matches!(*self, Node::Element(_))
    }

    pub fn as_text(&self) -> Option<&Text> {
        match *self {
            Node::Text(ref t) => Some(t),
            _ => None,
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match *self {
            Node::Element(ref e) => Some(e),
            _ => None,
        }
    }
}

/// A doctype.
#[derive(Debug, Clone, PartialEq)]
pub struct Doctype {
    pub name: StrTendril,
    pub public_id: StrTendril,
    pub system_id: StrTendril,
}

/// An HTML comment.
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub comment: StrTendril,
}

/// HTML text.
#[derive(Clone, PartialEq, Eq)]
pub struct Text {
    pub text: StrTendril,
}

impl Deref for Text {
    type Target = str;

    fn deref(&self) -> &str {
        self.text.deref()
    }
}

impl fmt::Debug for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.deref())
    }
}

/// An HTML element.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub name: QualName,
    pub attrs: HashMap<QualName, StrTendril>,
}

impl Element {
    pub fn new(name: QualName, attrs: Vec<Attribute>) -> Self {
        Element {
            name,
            attrs: attrs
                .into_iter()
                .map(|attr| (attr.name, attr.value))
                .collect(),
        }
    }

    /// Returns the local tag name, lowercased by the parser.
    pub fn name(&self) -> &str {
        self.name.local.deref()
    }

    /// Returns the value of a non-namespaced attribute.
    pub fn attr(&self, attr: &str) -> Option<&str> {
        let name = QualName::new(None, ns!(), LocalName::from(attr));
        self.attrs.get(&name).map(Deref::deref)
    }

    /// Returns the element ID.
    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }
}

/// HTML processing instruction.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessingInstruction {
    pub target: StrTendril,
    pub data: StrTendril,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchor(attrs: &[(&str, &str)]) -> Element {
        let attrs = attrs
            .iter()
            .map(|(k, v)| Attribute {
                name: QualName::new(None, ns!(), LocalName::from(*k)),
                value: StrTendril::from(*v),
            })
            .collect();
        Element::new(QualName::new(None, ns!(html), local_name!("a")), attrs)
    }

    #[test]
    fn element_name_and_attr() {
        let a = anchor(&[("href", "/wiki/Rust"), ("id", "first")]);
        assert_eq!("a", a.name());
        assert_eq!(Some("/wiki/Rust"), a.attr("href"));
        assert_eq!(Some("first"), a.id());
        assert_eq!(None, a.attr("title"));
    }

    #[test]
    fn node_classification() {
        let element = Node::Element(anchor(&[]));
        let text = Node::Text(Text {
            text: StrTendril::from("hello"),
        });
        assert!(element.is_element());
        assert!(element.as_text().is_none());
        assert_eq!(Some("hello"), text.as_text().map(Deref::deref));
        assert!(text.as_element().is_none());
    }
}
