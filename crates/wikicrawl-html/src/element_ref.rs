//! Element references.

use std::iter::FusedIterator;
use std::ops::Deref;

use wikicrawl_tree::iter::Descendants;
use wikicrawl_tree::NodeRef;

use crate::node::{Element, Node};

/// Wrapper around a reference to an element node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementRef<'a> {
    node: NodeRef<'a, Node>,
}

impl<'a> ElementRef<'a> {
    /// Wraps a `NodeRef` only if it references a `Node::Element`.
    pub fn wrap(node: NodeRef<'a, Node>) -> Option<Self> {
        if node.value().is_element() {
            Some(ElementRef { node })
        } else {
            None
        }
    }

    /// Returns the referenced element.
    pub fn value(&self) -> &'a Element {
        match self.node.value() {
            Node::Element(element) => element,
            _ => unreachable!("ElementRef always wraps an element"),
        }
    }

    /// Returns the local tag name.
    pub fn name(&self) -> &'a str {
        self.value().name()
    }

    /// Returns the value of an attribute.
    pub fn attr(&self, attr: &str) -> Option<&'a str> {
        self.value().attr(attr)
    }

    /// Returns an iterator over descendent elements, this element excluded.
    pub fn descendant_elements(&self) -> Elements<'a> {
        let mut inner = self.node.descendants();
        inner.next();
        Elements { inner }
    }

    /// Returns an iterator over descendent text nodes.
    pub fn text(&self) -> Text<'a> {
        Text {
            inner: self.node.descendants(),
        }
    }

    /// Returns all the descendent text nodes content concatenated.
    pub fn inner_text(&self) -> String {
        self.text().collect()
    }
}

impl<'a> Deref for ElementRef<'a> {
    type Target = NodeRef<'a, Node>;

    fn deref(&self) -> &NodeRef<'a, Node> {
        &self.node
    }
}

/// Iterator over elements, in document order.
#[derive(Debug, Clone)]
pub struct Elements<'a> {
    inner: Descendants<'a, Node>,
}

impl<'a> Elements<'a> {
    pub(crate) fn new(inner: Descendants<'a, Node>) -> Self {
        Elements { inner }
    }
}

impl<'a> Iterator for Elements<'a> {
    type Item = ElementRef<'a>;

    fn next(&mut self) -> Option<ElementRef<'a>> {
        self.inner.by_ref().find_map(ElementRef::wrap)
    }
}

impl FusedIterator for Elements<'_> {}

/// Iterator over descendent text nodes.
#[derive(Debug, Clone)]
pub struct Text<'a> {
    inner: Descendants<'a, Node>,
}

impl<'a> Text<'a> {
    pub(crate) fn new(inner: Descendants<'a, Node>) -> Self {
        Text { inner }
    }
}

impl<'a> Iterator for Text<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        self.inner
            .by_ref()
            .find_map(|node| node.value().as_text().map(Deref::deref))
    }
}

impl FusedIterator for Text<'_> {}
