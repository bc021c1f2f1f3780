//! Link extraction from parsed pages.

use std::iter::FusedIterator;

use wikicrawl_html::tree::iter::Descendants;
use wikicrawl_html::{Html, Node, NodeRef};

use crate::endpoint::is_internal_document;

/// An accepted anchor: its raw `href` and the absolute URL built from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link<'a> {
    pub href: &'a str,
    pub url: String,
}

/// Iterator over the internal links of a document, in document order.
#[derive(Debug, Clone)]
pub struct Links<'a> {
    nodes: Descendants<'a, Node>,
    site_base: &'a str,
}

impl<'a> Iterator for Links<'a> {
    type Item = Link<'a>;

    fn next(&mut self) -> Option<Link<'a>> {
        let site_base = self.site_base;
        self.nodes.by_ref().find_map(|node: NodeRef<'a, Node>| {
            let element = node.value().as_element()?;
            if element.name() != "a" {
                return None;
            }
            let href = element.attr("href").unwrap_or("");
            is_internal_document(href).then(|| Link {
                href,
                url: format!("{site_base}{href}"),
            })
        })
    }
}

impl FusedIterator for Links<'_> {}

/// Walks every node of `doc` and yields one [`Link`] per `<a>` element whose `href` is an
/// internal document reference. Repeated hrefs are yielded each time.
pub fn links<'a>(doc: &'a Html, site_base: &'a str) -> Links<'a> {
    Links {
        nodes: doc.descendants(),
        site_base,
    }
}

/// Absolute URLs of every internal link in `doc`.
pub fn extract_links(doc: &Html, site_base: &str) -> Vec<String> {
    links(doc, site_base).map(|link| link.url).collect()
}
