use std::iter::FusedIterator;

use crate::NodeRef;

macro_rules! axis_iterators {
    ($(#[$m:meta] $i:ident($f:path);)*) => {
        $(
            #[$m]
            #[derive(Debug)]
            pub struct $i<'a, T>(Option<NodeRef<'a, T>>);

            impl<T> Clone for $i<'_, T> {
                fn clone(&self) -> Self {
                    Self(self.0)
                }
            }

            impl<'a, T> Iterator for $i<'a, T> {
                type Item = NodeRef<'a, T>;

                fn next(&mut self) -> Option<Self::Item> {
                    let node = self.0.take();
                    self.0 = node.as_ref().and_then($f);
                    node
                }
            }

            impl<T> FusedIterator for $i<'_, T> {}
        )*
    };
}

axis_iterators! {
    /// Iterator over ancestors.
    Ancestors(NodeRef::parent);

    /// Iterator over previous siblings.
    PrevSiblings(NodeRef::prev_sibling);

    /// Iterator over next siblings.
    NextSiblings(NodeRef::next_sibling);
}

/// Iterator over children.
#[derive(Debug)]
pub struct Children<'a, T> {
    front: Option<NodeRef<'a, T>>,
    back: Option<NodeRef<'a, T>>,
}

impl<T> Clone for Children<'_, T> {
    fn clone(&self) -> Self {
        Self {
            front: self.front,
            back: self.back,
        }
    }
}

impl<'a, T> Iterator for Children<'a, T> {
    type Item = NodeRef<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            let node = self.front.take();
            self.back = None;
            node
        } else {
            let node = self.front.take();
            self.front = node.as_ref().and_then(NodeRef::next_sibling);
            node
        }
    }
}

impl<T> DoubleEndedIterator for Children<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.back == self.front {
            let node = self.back.take();
            self.front = None;
            node
        } else {
            let node = self.back.take();
            self.back = node.as_ref().and_then(NodeRef::prev_sibling);
            node
        }
    }
}

/// Open or close edge of a node.
#[derive(Debug)]
pub enum Edge<'a, T> {
    /// Open.
    Open(NodeRef<'a, T>),
    /// Close.
    Close(NodeRef<'a, T>),
}

impl<T> Clone for Edge<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Edge<'_, T> {}

impl<T> PartialEq for Edge<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Edge::Open(a), Edge::Open(b)) | (Edge::Close(a), Edge::Close(b)) => a == b,
            _ => false,
        }
    }
}

/// Iterator which traverses a subtree, yielding each node once on the way down
/// and once on the way back up.
#[derive(Debug)]
pub struct Traverse<'a, T> {
    root: NodeRef<'a, T>,
    edge: Option<Edge<'a, T>>,
    done: bool,
}

impl<T> Clone for Traverse<'_, T> {
    fn clone(&self) -> Self {
        Self {
            root: self.root,
            edge: self.edge,
            done: self.done,
        }
    }
}

impl<'a, T> Iterator for Traverse<'a, T> {
    type Item = Edge<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        self.edge = match self.edge {
            None => Some(Edge::Open(self.root)),
            Some(Edge::Open(node)) => match node.first_child() {
                Some(first_child) => Some(Edge::Open(first_child)),
                None => Some(Edge::Close(node)),
            },
            Some(Edge::Close(node)) => {
                if node == self.root {
                    None
                } else if let Some(next_sibling) = node.next_sibling() {
                    Some(Edge::Open(next_sibling))
                } else {
                    node.parent().map(Edge::Close)
                }
            }
        };
        if self.edge.is_none() {
            self.done = true;
        }
        self.edge
    }
}

impl<T> FusedIterator for Traverse<'_, T> {}

/// Iterator over a node and its descendants, in document order.
#[derive(Debug)]
pub struct Descendants<'a, T>(Traverse<'a, T>);

impl<T> Clone for Descendants<'_, T> {
    fn clone(&self) -> Self {
        Descendants(self.0.clone())
    }
}

impl<'a, T> Iterator for Descendants<'a, T> {
    type Item = NodeRef<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        for edge in &mut self.0 {
            if let Edge::Open(node) = edge {
                return Some(node);
            }
        }
        None
    }
}

impl<T> FusedIterator for Descendants<'_, T> {}

impl<'a, T> NodeRef<'a, T> {
    /// Returns an iterator over ancestors.
    pub fn ancestors(&self) -> Ancestors<'a, T> {
        Ancestors(self.parent())
    }

    /// Returns an iterator over previous siblings.
    pub fn prev_siblings(&self) -> PrevSiblings<'a, T> {
        PrevSiblings(self.prev_sibling())
    }

    /// Returns an iterator over next siblings.
    pub fn next_siblings(&self) -> NextSiblings<'a, T> {
        NextSiblings(self.next_sibling())
    }

    /// Returns an iterator over children.
    pub fn children(&self) -> Children<'a, T> {
        Children {
            front: self.first_child(),
            back: self.last_child(),
        }
    }

    /// Returns an iterator which traverses the subtree starting at this node.
    pub fn traverse(&self) -> Traverse<'a, T> {
        Traverse {
            root: *self,
            edge: None,
            done: false,
        }
    }

    /// Returns an iterator over this node and its descendants.
    pub fn descendants(&self) -> Descendants<'a, T> {
        Descendants(self.traverse())
    }
}
