//! HTML documents and fragments.

mod tree_sink;

use std::borrow::Cow;

use html5ever::driver;
use html5ever::tree_builder::QuirksMode;
use html5ever::QualName;
use tendril::TendrilSink;
use wikicrawl_tree::iter::Descendants;
use wikicrawl_tree::{NodeId, NodeRef, Tree};

use crate::element_ref::{ElementRef, Elements, Text};
use crate::node::Node;

/// An HTML tree.
///
/// Parsing does not fail hard. Instead, the `quirks_mode` is set and errors are added to the
/// `errors` field. The `tree` will still be populated as best as possible.
///
/// Implements the `TreeSink` trait from the `html5ever` crate, which allows HTML to be parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct Html {
    /// Parse errors.
    pub errors: Vec<Cow<'static, str>>,

    /// The quirks mode.
    pub quirks_mode: QuirksMode,

    /// The node tree.
    pub tree: Tree<Node>,
}

impl Html {
    /// Creates an empty HTML document.
    pub fn new_document() -> Self {
        Html {
            errors: Vec::new(),
            quirks_mode: QuirksMode::NoQuirks,
            tree: Tree::new(Node::Document),
        }
    }

    /// Creates an empty HTML fragment.
    pub fn new_fragment() -> Self {
        Html {
            errors: Vec::new(),
            quirks_mode: QuirksMode::NoQuirks,
            tree: Tree::new(Node::Fragment),
        }
    }

    /// Parses a string of HTML as a document.
    pub fn parse_document(document: &str) -> Self {
        let parser = driver::parse_document(Self::new_document(), Default::default());
        parser.one(document)
    }

    /// Parses a string of HTML as a fragment.
    pub fn parse_fragment(fragment: &str) -> Self {
        let parser = driver::parse_fragment(
            Self::new_fragment(),
            Default::default(),
            QualName::new(None, ns!(html), local_name!("body")),
            Vec::new(),
        );
        parser.one(fragment)
    }

    /// Returns the root node (`Node::Document` or `Node::Fragment`).
    pub fn root(&self) -> NodeRef<'_, Node> {
        self.tree.root()
    }

    /// Returns the first element below the root, `<html>` for parsed documents.
    pub fn root_element(&self) -> Option<ElementRef<'_>> {
        self.root().children().find_map(ElementRef::wrap)
    }

    /// Returns an iterator over every attached node, in document order.
    pub fn descendants(&self) -> Descendants<'_, Node> {
        self.root().descendants()
    }

    /// Returns an iterator over every element, in document order.
    pub fn elements(&self) -> Elements<'_> {
        Elements::new(self.descendants())
    }

    /// Returns an iterator over every text node, in document order.
    pub fn text(&self) -> Text<'_> {
        Text::new(self.descendants())
    }

    /// Returns the first element whose `id` attribute equals `id`.
    pub fn find_element_by_id(&self, id: &str) -> Option<ElementRef<'_>> {
        self.elements().find(|element| element.value().id() == Some(id))
    }

    /// Keeps only the `<p>` elements found below the element with the given id, making them the
    /// root's children in document order.
    ///
    /// Returns false, leaving the tree untouched, when no element has that id.
    pub fn narrow_to_paragraphs(&mut self, content_id: &str) -> bool {
        let paragraphs: Vec<NodeId> = match self.find_element_by_id(content_id) {
            Some(content) => content
                .descendant_elements()
                .filter(|element| element.name() == "p")
                .map(|element| element.id())
                .collect(),
            None => return false,
        };

        let root = self.tree.root_id();
        let top_level: Vec<NodeId> = self.root().children().map(|node| node.id()).collect();
        for id in top_level {
            self.tree.detach(id);
        }
        for id in paragraphs {
            self.tree.append_id(root, id);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::Html;

    #[test]
    fn root_element_fragment() {
        let html = Html::parse_fragment(r#"<a href="http://github.com">1</a>"#);
        let root_ref = html.root_element().unwrap();
        let href = root_ref
            .descendant_elements()
            .find(|e| e.name() == "a")
            .unwrap();
        assert_eq!(href.inner_text(), "1");
        assert_eq!(href.attr("href"), Some("http://github.com"));
    }

    #[test]
    fn root_element_document_doctype() {
        let html = Html::parse_document("<!DOCTYPE html>\n<title>abc</title>");
        let root_ref = html.root_element().unwrap();
        assert_eq!("html", root_ref.name());
        let title = root_ref
            .descendant_elements()
            .find(|e| e.name() == "title")
            .unwrap();
        assert_eq!(title.inner_text(), "abc");
    }

    #[test]
    fn root_element_document_comment() {
        let html = Html::parse_document("<!-- comment --><title>abc</title>");
        let title = html.elements().find(|e| e.name() == "title").unwrap();
        assert_eq!(title.inner_text(), "abc");
    }

    #[test]
    fn elements_in_document_order() {
        let html = Html::parse_document(
            "<html><head><title>t</title></head><body><p>a<i>b</i></p><ul><li>c</li></ul></body></html>",
        );
        let names = html.elements().map(|e| e.name()).collect::<Vec<_>>();
        assert_eq!(
            vec!["html", "head", "title", "body", "p", "i", "ul", "li"],
            names
        );
    }

    #[test]
    fn adjacent_text_is_merged() {
        let html = Html::parse_fragment("a&amp;b");
        assert_eq!(vec!["a&b"], html.text().collect::<Vec<_>>());
    }

    #[test]
    fn narrow_to_paragraphs_keeps_content_paragraphs() {
        let mut html = Html::parse_document(
            r#"<body>
                <div id="nav"><p>Navigation</p></div>
                <div id="mw-content-text">
                    <p>First</p>
                    <table><tr><td>Cell</td></tr></table>
                    <div><p>Second</p></div>
                </div>
            </body>"#,
        );

        assert!(html.narrow_to_paragraphs("mw-content-text"));

        let top = html
            .root()
            .children()
            .filter_map(crate::ElementRef::wrap)
            .map(|p| p.inner_text())
            .collect::<Vec<_>>();
        assert_eq!(vec!["First", "Second"], top);
        assert!(html.text().all(|t| t != "Navigation" && t != "Cell"));
    }

    #[test]
    fn narrow_to_paragraphs_without_content() {
        let mut html = Html::parse_document("<p>Lonely</p>");
        let before = html.clone();
        assert!(!html.narrow_to_paragraphs("mw-content-text"));
        assert_eq!(before, html);
    }
}
