use std::borrow::Cow;

use html5ever::tendril::StrTendril;
use html5ever::tree_builder::{ElementFlags, NodeOrText, QuirksMode, TreeSink};
use html5ever::Attribute;
use html5ever::{ExpandedName, QualName};
use wikicrawl_tree::NodeId;

use super::Html;
use crate::node::{Comment, Doctype, Element, Node, ProcessingInstruction, Text};

impl Html {
    /// Appends text to `parent`, merging it into a trailing text node when there is one.
    fn append_text(&mut self, parent: NodeId, text: StrTendril) {
        let last_child = self
            .tree
            .get(parent)
            .and_then(|node| node.last_child())
            .map(|node| node.id());

        match last_child.and_then(|id| self.tree.value_mut(id)) {
            Some(Node::Text(t)) => t.text.push_tendril(&text),
            _ => {
                self.tree.append(parent, Node::Text(Text { text }));
            }
        }
    }

    /// Inserts text before `sibling`, merging it into a preceding text node when there is one.
    fn insert_text_before(&mut self, sibling: NodeId, text: StrTendril) {
        let prev_sibling = self
            .tree
            .get(sibling)
            .and_then(|node| node.prev_sibling())
            .map(|node| node.id());

        match prev_sibling.and_then(|id| self.tree.value_mut(id)) {
            Some(Node::Text(t)) => t.text.push_tendril(&text),
            _ => {
                self.tree.insert_before(sibling, Node::Text(Text { text }));
            }
        }
    }
}

/// Note: does not support the `<template>` element contents beyond creating them.
impl TreeSink for Html {
    type Output = Self;
    type Handle = NodeId;

    fn finish(self) -> Self {
        self
    }

    // Signal a parse error.
    fn parse_error(&mut self, msg: Cow<'static, str>) {
        self.errors.push(msg);
    }

    // Set the document's quirks mode.
    fn set_quirks_mode(&mut self, mode: QuirksMode) {
        self.quirks_mode = mode;
    }

    // Get a handle to the Document node.
    fn get_document(&mut self) -> Self::Handle {
        self.tree.root_id()
    }

    // Do two handles refer to the same node?
    fn same_node(&self, x: &Self::Handle, y: &Self::Handle) -> bool {
        x == y
    }

    // What is the name of this element?
    //
    // Should never be called on a non-element node; feel free to panic!.
    fn elem_name<'a>(&'a self, target: &'a Self::Handle) -> ExpandedName<'a> {
        self.tree
            .value(*target)
            .and_then(Node::as_element)
            .map(|element| element.name.expanded())
            .expect("elem_name called on a non-element node")
    }

    // Create an element.
    //
    // A template element gets an associated document fragment for its contents, returned by
    // `get_template_contents`.
    fn create_element(
        &mut self,
        name: QualName,
        attrs: Vec<Attribute>,
        _flags: ElementFlags,
    ) -> Self::Handle {
        let template = name.expanded() == expanded_name!(html "template");

        let node_id = self.tree.orphan(Node::Element(Element::new(name, attrs)));

        if template {
            self.tree.append(node_id, Node::Fragment);
        }

        node_id
    }

    // Create a comment node.
    fn create_comment(&mut self, text: StrTendril) -> Self::Handle {
        self.tree.orphan(Node::Comment(Comment { comment: text }))
    }

    // Create Processing Instruction.
    fn create_pi(&mut self, target: StrTendril, data: StrTendril) -> Self::Handle {
        self.tree
            .orphan(Node::ProcessingInstruction(ProcessingInstruction {
                target,
                data,
            }))
    }

    // Append a DOCTYPE element to the Document node.
    fn append_doctype_to_document(
        &mut self,
        name: StrTendril,
        public_id: StrTendril,
        system_id: StrTendril,
    ) {
        let root = self.tree.root_id();
        self.tree.append(
            root,
            Node::Doctype(Doctype {
                name,
                public_id,
                system_id,
            }),
        );
    }

    // Append a node as the last child of the given node. Adjacent text is concatenated.
    fn append(&mut self, parent: &Self::Handle, child: NodeOrText<Self::Handle>) {
        match child {
            NodeOrText::AppendNode(id) => {
                self.tree.append_id(*parent, id);
            }
            NodeOrText::AppendText(text) => self.append_text(*parent, text),
        }
    }

    // Append a node as the sibling immediately before the given node, doing nothing when that
    // node has no parent. The new node may have an old parent, from which it is removed.
    fn append_before_sibling(
        &mut self,
        sibling: &Self::Handle,
        new_node: NodeOrText<Self::Handle>,
    ) {
        if let NodeOrText::AppendNode(id) = new_node {
            self.tree.detach(id);
        }

        let has_parent = self
            .tree
            .get(*sibling)
            .map_or(false, |node| node.parent().is_some());
        if !has_parent {
            return;
        }

        match new_node {
            NodeOrText::AppendNode(id) => {
                self.tree.insert_id_before(*sibling, id);
            }
            NodeOrText::AppendText(text) => self.insert_text_before(*sibling, text),
        }
    }

    fn append_based_on_parent_node(
        &mut self,
        element: &Self::Handle,
        prev_element: &Self::Handle,
        child: NodeOrText<Self::Handle>,
    ) {
        let has_parent = self
            .tree
            .get(*element)
            .map_or(false, |node| node.parent().is_some());

        if has_parent {
            self.append_before_sibling(element, child)
        } else {
            self.append(prev_element, child)
        }
    }

    // Detach the given node from its parent.
    fn remove_from_parent(&mut self, target: &Self::Handle) {
        self.tree.detach(*target);
    }

    // Remove all the children from node and append them to new_parent.
    fn reparent_children(&mut self, node: &Self::Handle, new_parent: &Self::Handle) {
        self.tree.reparent_children(*node, *new_parent);
    }

    // Add each attribute to the given element, if no attribute with that name already exists.
    fn add_attrs_if_missing(&mut self, target: &Self::Handle, attrs: Vec<Attribute>) {
        if let Some(Node::Element(element)) = self.tree.value_mut(*target) {
            for attr in attrs {
                element.attrs.entry(attr.name).or_insert(attr.value);
            }
        }
    }

    // Get a handle to a template's template contents.
    fn get_template_contents(&mut self, target: &Self::Handle) -> Self::Handle {
        self.tree
            .get(*target)
            .and_then(|node| node.first_child())
            .map(|node| node.id())
            .expect("template element without contents")
    }

    // Mark a HTML <script> element as "already started".
    fn mark_script_already_started(&mut self, _node: &Self::Handle) {}
}
