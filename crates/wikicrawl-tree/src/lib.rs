//! [SlotMap](https://crates.io/crates/slotmap)-backed ID-tree.
//!
//! Nodes live in a single slotmap and refer to each other by [`NodeId`]. Structural
//! edits go through `&mut Tree`, reads go through borrowed [`NodeRef`] handles.

pub mod iter;

use std::fmt;
use std::ptr;

use slotmap::{new_key_type, Key, SlotMap};

new_key_type! {
    pub struct NodeId;
}

/// Slotmap-backed ID-tree.
///
/// Always contains at least a root node.
#[derive(Debug, Clone)]
pub struct Tree<T> {
    root: NodeId,
    sm: SlotMap<NodeId, Node<T>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Node<T> {
    parent: NodeId,
    prev_sibling: NodeId,
    next_sibling: NodeId,
    children: (NodeId, NodeId),
    value: T,
}

impl<T> Node<T> {
    fn new(value: T) -> Self {
        Node {
            parent: NodeId::null(),
            prev_sibling: NodeId::null(),
            next_sibling: NodeId::null(),
            children: (NodeId::null(), NodeId::null()),
            value,
        }
    }
}

/// Two trees are equal when their attached nodes hold equal values in document order.
impl<T> PartialEq for Tree<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        let mut ours = self.root().descendants();
        let mut theirs = other.root().descendants();
        loop {
            match (ours.next(), theirs.next()) {
                (Some(a), Some(b)) if a.value() == b.value() => continue,
                (None, None) => return true,
                _ => return false,
            }
        }
    }
}

impl<T> Tree<T> {
    /// Creates a tree with a root node.
    pub fn new(root: T) -> Self {
        let mut sm = SlotMap::with_key();
        let root = sm.insert(Node::new(root));
        Tree { root, sm }
    }

    /// Returns the ID of the root node.
    pub fn root_id(&self) -> NodeId {
        self.root
    }

    /// Returns a reference to the root node.
    pub fn root(&self) -> NodeRef<'_, T> {
        NodeRef {
            id: self.root,
            tree: self,
            node: &self.sm[self.root],
        }
    }

    /// Returns a reference to the specified node.
    pub fn get(&self, id: NodeId) -> Option<NodeRef<'_, T>> {
        self.sm.get(id).map(|node| NodeRef {
            id,
            tree: self,
            node,
        })
    }

    /// Returns the value of the specified node.
    pub fn value(&self, id: NodeId) -> Option<&T> {
        self.sm.get(id).map(|node| &node.value)
    }

    /// Returns the value of the specified node, mutably.
    pub fn value_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.sm.get_mut(id).map(|node| &mut node.value)
    }

    /// Number of nodes, attached or not.
    pub fn len(&self) -> usize {
        self.sm.len()
    }

    /// A tree is never empty, it always holds its root.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Creates an orphan node.
    pub fn orphan(&mut self, value: T) -> NodeId {
        self.sm.insert(Node::new(value))
    }

    /// Appends a new child to `parent`.
    pub fn append(&mut self, parent: NodeId, value: T) -> Option<NodeId> {
        if !self.sm.contains_key(parent) {
            return None;
        }
        let child = self.orphan(value);
        self.append_id(parent, child)
    }

    /// Appends an existing node as the last child of `parent`, detaching it first.
    pub fn append_id(&mut self, parent: NodeId, child: NodeId) -> Option<NodeId> {
        if parent == child || !self.sm.contains_key(parent) || !self.sm.contains_key(child) {
            return None;
        }
        self.detach(child);

        let last_child = self.sm[parent].children.1;

        let new_child = &mut self.sm[child];
        new_child.parent = parent;
        new_child.prev_sibling = last_child;

        if let Some(last) = self.sm.get_mut(last_child) {
            last.next_sibling = child;
        }

        let parent_node = &mut self.sm[parent];
        if parent_node.children.0.is_null() {
            parent_node.children = (child, child);
        } else {
            parent_node.children.1 = child;
        }

        Some(child)
    }

    /// Inserts a new sibling before `sibling`.
    pub fn insert_before(&mut self, sibling: NodeId, value: T) -> Option<NodeId> {
        if !self.sm.contains_key(sibling) {
            return None;
        }
        let new_sibling = self.orphan(value);
        self.insert_id_before(sibling, new_sibling)
    }

    /// Inserts an existing node before `sibling`, detaching it first.
    ///
    /// Fails when `sibling` has no parent.
    pub fn insert_id_before(&mut self, sibling: NodeId, new_sibling: NodeId) -> Option<NodeId> {
        if sibling == new_sibling || !self.sm.contains_key(new_sibling) {
            return None;
        }
        let parent = self.sm.get(sibling).map(|node| node.parent)?;
        if parent.is_null() {
            return None;
        }
        self.detach(new_sibling);

        let prev_sibling = self.sm[sibling].prev_sibling;

        let node = &mut self.sm[new_sibling];
        node.parent = parent;
        node.prev_sibling = prev_sibling;
        node.next_sibling = sibling;

        if let Some(prev) = self.sm.get_mut(prev_sibling) {
            prev.next_sibling = new_sibling;
        }
        self.sm[sibling].prev_sibling = new_sibling;

        let parent_node = &mut self.sm[parent];
        if parent_node.children.0 == sibling {
            parent_node.children.0 = new_sibling;
        }

        Some(new_sibling)
    }

    /// Detaches a node from its parent. The node and its subtree stay in the tree as orphans.
    pub fn detach(&mut self, id: NodeId) {
        let (parent, prev_sibling, next_sibling) = match self.sm.get_mut(id) {
            Some(node) if !node.parent.is_null() => {
                let links = (node.parent, node.prev_sibling, node.next_sibling);
                node.parent = NodeId::null();
                node.prev_sibling = NodeId::null();
                node.next_sibling = NodeId::null();
                links
            }
            _ => return,
        };

        if let Some(prev) = self.sm.get_mut(prev_sibling) {
            prev.next_sibling = next_sibling;
        }
        if let Some(next) = self.sm.get_mut(next_sibling) {
            next.prev_sibling = prev_sibling;
        }

        if let Some(parent) = self.sm.get_mut(parent) {
            let (first_child, last_child) = parent.children;
            if first_child == last_child {
                parent.children = (NodeId::null(), NodeId::null());
            } else if first_child == id {
                parent.children.0 = next_sibling;
            } else if last_child == id {
                parent.children.1 = prev_sibling;
            }
        }
    }

    /// Moves every child of `from` to the end of `new_parent`'s children.
    pub fn reparent_children(&mut self, from: NodeId, new_parent: NodeId) {
        if from == new_parent || !self.sm.contains_key(new_parent) {
            return;
        }
        let (first, last) = match self.sm.get_mut(from) {
            Some(node) => std::mem::replace(&mut node.children, (NodeId::null(), NodeId::null())),
            None => return,
        };
        if first.is_null() {
            return;
        }

        let mut cursor = first;
        while let Some(node) = self.sm.get_mut(cursor) {
            node.parent = new_parent;
            cursor = node.next_sibling;
        }

        let old_last = self.sm[new_parent].children.1;
        if old_last.is_null() {
            self.sm[new_parent].children = (first, last);
        } else {
            self.sm[old_last].next_sibling = first;
            self.sm[first].prev_sibling = old_last;
            self.sm[new_parent].children.1 = last;
        }
    }
}

/// Node reference.
pub struct NodeRef<'a, T> {
    id: NodeId,
    tree: &'a Tree<T>,
    node: &'a Node<T>,
}

impl<T> Clone for NodeRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NodeRef<'_, T> {}

impl<T> PartialEq for NodeRef<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && ptr::eq(self.tree, other.tree)
    }
}

impl<T> Eq for NodeRef<'_, T> {}

impl<T> fmt::Debug for NodeRef<'_, T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("value", &self.node.value)
            .finish()
    }
}

impl<'a, T> NodeRef<'a, T> {
    /// Returns the ID of this node.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Returns the tree this node belongs to.
    pub fn tree(&self) -> &'a Tree<T> {
        self.tree
    }

    /// Returns the value of this node.
    pub fn value(&self) -> &'a T {
        &self.node.value
    }

    fn axis(&self, id: NodeId) -> Option<Self> {
        self.tree.get(id)
    }

    /// Returns the parent of this node.
    pub fn parent(&self) -> Option<Self> {
        self.axis(self.node.parent)
    }

    /// Returns the previous sibling of this node.
    pub fn prev_sibling(&self) -> Option<Self> {
        self.axis(self.node.prev_sibling)
    }

    /// Returns the next sibling of this node.
    pub fn next_sibling(&self) -> Option<Self> {
        self.axis(self.node.next_sibling)
    }

    /// Returns the first child of this node.
    pub fn first_child(&self) -> Option<Self> {
        self.axis(self.node.children.0)
    }

    /// Returns the last child of this node.
    pub fn last_child(&self) -> Option<Self> {
        self.axis(self.node.children.1)
    }

    /// Returns true if this node has siblings.
    pub fn has_siblings(&self) -> bool {
        !self.node.prev_sibling.is_null() || !self.node.next_sibling.is_null()
    }

    /// Returns true if this node has children.
    pub fn has_children(&self) -> bool {
        !self.node.children.0.is_null()
    }
}

/// Creates a tree from expressions.
///
/// # Examples
///
/// ```
/// # use wikicrawl_tree::tree;
/// let tree = tree!("root");
/// ```
///
/// ```
/// # use wikicrawl_tree::tree;
/// let tree = tree! {
///     "root" => {
///         "child a",
///         "child b" => {
///             "grandchild a",
///             "grandchild b",
///         },
///         "child c",
///     }
/// };
/// assert_eq!(6, tree.len());
/// ```
#[macro_export]
macro_rules! tree {
    (@ $t:ident $n:ident { }) => { };

    // Last leaf.
    (@ $t:ident $n:ident { $value:expr }) => {
        { $t.append($n, $value).unwrap(); }
    };

    // Leaf.
    (@ $t:ident $n:ident { $value:expr, $($tail:tt)* }) => {
        {
            $t.append($n, $value).unwrap();
            $crate::tree!(@ $t $n { $($tail)* });
        }
    };

    // Last node with children.
    (@ $t:ident $n:ident { $value:expr => $children:tt }) => {
        {
            let node = $t.append($n, $value).unwrap();
            $crate::tree!(@ $t node $children);
        }
    };

    // Node with children.
    (@ $t:ident $n:ident { $value:expr => $children:tt, $($tail:tt)* }) => {
        {
            {
                let node = $t.append($n, $value).unwrap();
                $crate::tree!(@ $t node $children);
            }
            $crate::tree!(@ $t $n { $($tail)* });
        }
    };

    ($root:expr) => { $crate::Tree::new($root) };

    ($root:expr => $children:tt) => {
        {
            let mut tree = $crate::Tree::new($root);
            {
                let root = tree.root_id();
                $crate::tree!(@ tree root $children);
            }
            tree
        }
    };
}
