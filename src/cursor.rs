//! Cursor-style navigation over a [`TextTree`].
//!
//! A [`NodePointer`] is a position plus a default movement direction; it
//! owns no data. It borrows the tree immutably, so the borrow checker
//! rejects any attempt to navigate across a structural mutation, so the
//! index-shifting hazard of insert/delete cannot reach a live pointer.
//! Mutations go through `&mut TextTree` methods instead, and pointers are
//! re-acquired afterwards.
//!
//! Out-of-range movement and failed lookups return `None`; navigation
//! never panics and never allocates.
//!
//! ## Examples
//!
//! ```rust
//! use texttree::{jsonex, NodePointer};
//!
//! let (tree, _) = jsonex::parse("user:{name:\"Alice\", age:30}");
//! let root = NodePointer::new(&tree);
//! let user = root.find("user").unwrap();
//! assert_eq!(user.key_value("name"), Some("Alice"));
//! assert_eq!(user.key_value("age"), Some("30"));
//! assert_eq!(user.find("missing"), None);
//! ```

use crate::node::Node;
use crate::tree::{AdvanceDirection, TextTree};

/// A movable cursor over a tree's flat node array.
#[derive(Clone, Copy, Debug)]
pub struct NodePointer<'t> {
    tree: &'t TextTree,
    index: usize,
    direction: AdvanceDirection,
}

impl<'t> PartialEq for NodePointer<'t> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.index == other.index
    }
}

impl<'t> NodePointer<'t> {
    /// A pointer at the synthetic root with `SiblingNext` as the default
    /// direction.
    #[must_use]
    pub fn new(tree: &'t TextTree) -> Self {
        NodePointer {
            tree,
            index: 0,
            direction: AdvanceDirection::SiblingNext,
        }
    }

    /// A pointer at an explicit index, or `None` out of range.
    #[must_use]
    pub fn at(tree: &'t TextTree, index: usize) -> Option<Self> {
        if index < tree.node_count() {
            Some(NodePointer {
                tree,
                index,
                direction: AdvanceDirection::SiblingNext,
            })
        } else {
            None
        }
    }

    /// Replaces the default direction used by [`NodePointer::advance`].
    #[must_use]
    pub fn with_direction(mut self, direction: AdvanceDirection) -> Self {
        self.direction = direction;
        self
    }

    /// The current index into the tree's node array.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// The tree this pointer walks.
    #[must_use]
    pub fn tree(&self) -> &'t TextTree {
        self.tree
    }

    /// The node under the cursor.
    #[must_use]
    pub fn node(&self) -> &'t Node {
        // The index is validated on construction and on every move.
        &self.tree.nodes()[self.index]
    }

    /// The node's decoded text.
    #[must_use]
    pub fn text(&self) -> &'t str {
        self.tree.node_text(self.index)
    }

    /// Moves `count` steps along the pointer's default direction,
    /// returning the new position or `None` if the count could not be
    /// fully satisfied.
    #[must_use]
    pub fn advance(&self, count: i32) -> Option<Self> {
        self.advance_in(self.direction, count)
    }

    /// Moves `count` steps in an explicit direction.
    #[must_use]
    pub fn advance_in(&self, direction: AdvanceDirection, count: i32) -> Option<Self> {
        let mut index = self.index;
        if self.tree.advance_node(direction, count, &mut index) {
            Some(NodePointer { index, ..*self })
        } else {
            None
        }
    }

    /// The next sibling, skipping over descendants in between.
    #[must_use]
    pub fn next_sibling(&self) -> Option<Self> {
        self.advance_in(AdvanceDirection::SiblingNext, 1)
    }

    /// The previous sibling.
    #[must_use]
    pub fn previous_sibling(&self) -> Option<Self> {
        self.advance_in(AdvanceDirection::SiblingPrevious, 1)
    }

    /// The first child, if the current node has one.
    #[must_use]
    pub fn first_child(&self) -> Option<Self> {
        self.advance_in(AdvanceDirection::Child, 1)
    }

    /// The parent, or `None` at the root.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.advance_in(AdvanceDirection::Parent, 1)
    }

    /// Finds a key named `name` among this node's children,
    /// case-insensitively. Linear and non-recursive: config trees are
    /// shallow, so no subtree search is offered.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<Self> {
        let index = self.tree.find_key(self.index, name)?;
        Some(NodePointer { index, ..*self })
    }

    /// The text of this node's sole child value, if it has exactly one.
    #[must_use]
    pub fn single_subvalue(&self) -> Option<&'t str> {
        self.tree.get_single_subvalue(self.index)
    }

    /// The scalar value of the child key `name`, if present.
    #[must_use]
    pub fn key_value(&self, name: &str) -> Option<&'t str> {
        self.tree.get_key_value(self.index, name)
    }

    /// Iterates over this node's children in document order.
    pub fn children(&self) -> impl Iterator<Item = NodePointer<'t>> + '_ {
        let mut next = self.first_child();
        std::iter::from_fn(move || {
            let current = next?;
            next = current.next_sibling();
            Some(current)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jsonex;
    use crate::node::NodeKind;

    #[test]
    fn walk_a_parsed_document() {
        let (tree, errors) = jsonex::parse("a:{x:1, y:2} b:[10, 20, 30]");
        assert!(errors.is_empty());

        let root = NodePointer::new(&tree);
        let a = root.find("a").unwrap();
        assert_eq!(a.node().kind, NodeKind::Object);
        assert_eq!(a.key_value("y"), Some("2"));

        let b = root.find("b").unwrap();
        assert_eq!(b.node().kind, NodeKind::Array);
        let values: Vec<&str> = b.children().map(|c| c.text()).collect();
        assert_eq!(values, ["10", "20", "30"]);
    }

    #[test]
    fn misses_leave_no_trace() {
        let (tree, _) = jsonex::parse("only:1");
        let root = NodePointer::new(&tree);
        assert!(root.find("other").is_none());
        assert!(root.parent().is_none());
        assert!(NodePointer::at(&tree, 999).is_none());

        let only = root.find("only").unwrap();
        assert!(only.next_sibling().is_none());
        assert!(only.previous_sibling().is_none());
    }

    #[test]
    fn default_direction_drives_advance() {
        let (tree, _) = jsonex::parse("a:1 b:2 c:3");
        let first = NodePointer::new(&tree).first_child().unwrap();
        let last = first
            .with_direction(crate::AdvanceDirection::SiblingNextEnd)
            .advance(10)
            .unwrap();
        assert_eq!(last.text(), "c");
    }
}
