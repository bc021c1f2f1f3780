#[macro_use]
extern crate html5ever;

pub mod element_ref;
pub mod html;
pub mod node;

pub use crate::element_ref::ElementRef;
pub use crate::html::Html;
pub use crate::node::{Element, Node};

pub use wikicrawl_tree::{NodeId, NodeRef};
pub use wikicrawl_tree as tree;
