//! The flat, level-encoded document tree.
//!
//! A [`TextTree`] owns two things: a vector of [`Node`]s and one shared
//! `String` holding every node's decoded text. Hierarchy is encoded purely
//! in each node's level, with no parent/child pointers, which makes bulk
//! serialization and linear scans of shallow config documents cheap.
//!
//! Construction starts with a synthetic root at level 0, so even an empty
//! document yields a non-empty tree. Along the node sequence the level
//! rises by at most one per step; it may drop by any amount, closing that
//! many scopes at once.
//!
//! Movement over the flat array is [`TextTree::advance_node`]: an explicit
//! index-plus-level-delta walk covering sibling and lineage directions.
//! Mutation (insert/delete/append) shifts the vector in place; it is O(n)
//! past the mutation point, which is fine at config-document sizes
//! (hundreds of nodes, not millions).
//!
//! ## Examples
//!
//! ```rust
//! use texttree::{jsonex, AdvanceDirection};
//!
//! let (tree, _errors) = jsonex::parse("settings:{width:800, height:600}");
//! let mut index = 0;
//! assert!(tree.advance_node(AdvanceDirection::Child, 1, &mut index));
//! assert_eq!(tree.node_text(index), "settings");
//! ```

use crate::error::{Error, Result};
use crate::node::{GenericKind, Node, NodeKind};

/// A movement direction for [`TextTree::advance_node`].
///
/// The `*End` variants clamp at the boundary instead of failing, which
/// keeps consumer loops free of special cases for the last position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdvanceDirection {
    /// Next node at the same level under the same parent.
    SiblingNext,
    /// Previous node at the same level under the same parent.
    SiblingPrevious,
    /// Like `SiblingNext`, clamping at the last sibling.
    SiblingNextEnd,
    /// Like `SiblingPrevious`, clamping at the first sibling.
    SiblingPreviousEnd,
    /// The first child (the immediately following node one level deeper).
    Child,
    /// The nearest preceding node one level shallower.
    Parent,
    /// Like `Child`, clamping at the deepest reachable first child.
    ChildEnd,
    /// Like `Parent`, clamping at the root.
    ParentEnd,
}

impl AdvanceDirection {
    /// The opposite direction; a negative count advances this way.
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            AdvanceDirection::SiblingNext => AdvanceDirection::SiblingPrevious,
            AdvanceDirection::SiblingPrevious => AdvanceDirection::SiblingNext,
            AdvanceDirection::SiblingNextEnd => AdvanceDirection::SiblingPreviousEnd,
            AdvanceDirection::SiblingPreviousEnd => AdvanceDirection::SiblingNextEnd,
            AdvanceDirection::Child => AdvanceDirection::Parent,
            AdvanceDirection::Parent => AdvanceDirection::Child,
            AdvanceDirection::ChildEnd => AdvanceDirection::ParentEnd,
            AdvanceDirection::ParentEnd => AdvanceDirection::ChildEnd,
        }
    }

    const fn clamps(self) -> bool {
        matches!(
            self,
            AdvanceDirection::SiblingNextEnd
                | AdvanceDirection::SiblingPreviousEnd
                | AdvanceDirection::ChildEnd
                | AdvanceDirection::ParentEnd
        )
    }
}

/// The flat node store plus the shared decoded text buffer.
#[derive(Clone, Debug)]
pub struct TextTree {
    nodes: Vec<Node>,
    text: String,
}

impl Default for TextTree {
    fn default() -> Self {
        Self::new()
    }
}

impl TextTree {
    /// Creates a tree holding only the synthetic root node.
    #[must_use]
    pub fn new() -> Self {
        TextTree {
            nodes: vec![Node::new(NodeKind::Root, 0)],
            text: String::new(),
        }
    }

    /// Number of nodes, always at least 1 (the root).
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// The node at `index`, or `None` past the end.
    #[must_use]
    pub fn node(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    /// All nodes, in document order.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// This node's own decoded text (empty for out-of-range indices).
    #[must_use]
    pub fn node_text(&self, index: usize) -> &str {
        match self.nodes.get(index) {
            Some(node) => {
                let start = node.start as usize;
                &self.text[start..start + node.length as usize]
            }
            None => "",
        }
    }

    /// Appends `text` to the shared buffer and returns its span.
    fn push_text(&mut self, text: &str) -> (u32, u32) {
        let start = self.text.len() as u32;
        self.text.push_str(text);
        (start, text.len() as u32)
    }

    /// Appends a node at the end of the sequence. Used by the parsers,
    /// which only ever grow the tree in document order.
    pub fn append(&mut self, kind: NodeKind, text: &str, level: u32) -> usize {
        let (start, length) = self.push_text(text);
        self.nodes.push(Node {
            kind,
            start,
            length,
            level,
        });
        self.nodes.len() - 1
    }

    /// Rewrites the kind of an existing node. The Jsonex parser retypes a
    /// key once lookahead reveals what follows it.
    pub(crate) fn set_node_kind(&mut self, index: usize, kind: NodeKind) {
        if let Some(node) = self.nodes.get_mut(index) {
            node.kind = kind;
        }
    }

    /// Rebinds a node's span to freshly appended text. The old text stays
    /// in the buffer unused; spans never shrink other nodes.
    pub fn set_node_text(&mut self, index: usize, text: &str) -> Result<()> {
        if index >= self.nodes.len() {
            return Err(Error::IndexOutOfRange {
                index,
                count: self.nodes.len(),
            });
        }
        let (start, length) = self.push_text(text);
        let node = &mut self.nodes[index];
        node.start = start;
        node.length = length;
        Ok(())
    }

    /// One past the last descendant of `index`: the first following node
    /// whose level is not deeper.
    #[must_use]
    pub fn descendant_end(&self, index: usize) -> usize {
        let level = match self.nodes.get(index) {
            Some(node) => node.level,
            None => return self.nodes.len(),
        };
        let mut end = index + 1;
        while end < self.nodes.len() && self.nodes[end].level > level {
            end += 1;
        }
        end
    }

    /// Inserts a node before `index`, shifting everything after it. The
    /// level is supplied by the caller; nothing is re-leveled. Existing
    /// indices at or past `index` shift by one.
    pub fn insert(&mut self, index: usize, kind: NodeKind, text: &str, level: u32) -> Result<usize> {
        if index == 0 || index > self.nodes.len() {
            return Err(Error::IndexOutOfRange {
                index,
                count: self.nodes.len(),
            });
        }
        let (start, length) = self.push_text(text);
        self.nodes.insert(
            index,
            Node {
                kind,
                start,
                length,
                level,
            },
        );
        Ok(index)
    }

    /// Deletes the node at `index` together with its contiguous run of
    /// descendants. Returns how many nodes were removed. The root cannot
    /// be deleted.
    pub fn delete(&mut self, index: usize) -> Result<usize> {
        if index == 0 || index >= self.nodes.len() {
            return Err(Error::IndexOutOfRange {
                index,
                count: self.nodes.len(),
            });
        }
        let end = self.descendant_end(index);
        self.nodes.drain(index..end);
        Ok(end - index)
    }

    /// Appends a new child after all existing children of `parent`,
    /// returning the new node's index.
    pub fn append_child(&mut self, parent: usize, kind: NodeKind, text: &str) -> Result<usize> {
        let level = match self.nodes.get(parent) {
            Some(node) => node.level + 1,
            None => {
                return Err(Error::IndexOutOfRange {
                    index: parent,
                    count: self.nodes.len(),
                })
            }
        };
        let position = self.descendant_end(parent);
        let (start, length) = self.push_text(text);
        self.nodes.insert(
            position,
            Node {
                kind,
                start,
                length,
                level,
            },
        );
        Ok(position)
    }

    fn next_sibling(&self, index: usize) -> Option<usize> {
        let level = self.nodes.get(index)?.level;
        let mut j = index + 1;
        while j < self.nodes.len() {
            match self.nodes[j].level.cmp(&level) {
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => return Some(j),
                std::cmp::Ordering::Less => return None,
            }
        }
        None
    }

    fn previous_sibling(&self, index: usize) -> Option<usize> {
        let level = self.nodes.get(index)?.level;
        let mut j = index;
        while j > 0 {
            j -= 1;
            match self.nodes[j].level.cmp(&level) {
                std::cmp::Ordering::Greater => {}
                std::cmp::Ordering::Equal => return Some(j),
                std::cmp::Ordering::Less => return None,
            }
        }
        None
    }

    fn first_child(&self, index: usize) -> Option<usize> {
        let level = self.nodes.get(index)?.level;
        match self.nodes.get(index + 1) {
            Some(next) if next.level == level + 1 => Some(index + 1),
            _ => None,
        }
    }

    fn parent(&self, index: usize) -> Option<usize> {
        let level = self.nodes.get(index)?.level;
        if level == 0 {
            return None;
        }
        let mut j = index;
        while j > 0 {
            j -= 1;
            if self.nodes[j].level < level {
                return Some(j);
            }
        }
        None
    }

    /// Moves `index` by `count` steps in `direction` across the flat
    /// array. A negative count reverses the direction (next↔previous,
    /// child↔parent).
    ///
    /// Returns `true` only when the full count was satisfied. On partial
    /// success the index still lands on the furthest reachable position;
    /// when no movement at all is possible the index is left unchanged.
    /// The `*End` directions clamp instead and always return `true`.
    pub fn advance_node(
        &self,
        direction: AdvanceDirection,
        count: i32,
        index: &mut usize,
    ) -> bool {
        if *index >= self.nodes.len() {
            return false;
        }
        let (direction, steps) = if count < 0 {
            (direction.reversed(), count.unsigned_abs())
        } else {
            (direction, count as u32)
        };
        let mut position = *index;
        let mut remaining = steps;
        while remaining > 0 {
            let next = match direction {
                AdvanceDirection::SiblingNext | AdvanceDirection::SiblingNextEnd => {
                    self.next_sibling(position)
                }
                AdvanceDirection::SiblingPrevious | AdvanceDirection::SiblingPreviousEnd => {
                    self.previous_sibling(position)
                }
                AdvanceDirection::Child | AdvanceDirection::ChildEnd => self.first_child(position),
                AdvanceDirection::Parent | AdvanceDirection::ParentEnd => self.parent(position),
            };
            match next {
                Some(j) => position = j,
                None => break,
            }
            remaining -= 1;
        }
        *index = position;
        remaining == 0 || direction.clamps()
    }

    /// Finds a key named `name` among the children of `parent`, comparing
    /// case-insensitively. The scan is linear and non-recursive: only the
    /// immediate children are examined.
    #[must_use]
    pub fn find_key(&self, parent: usize, name: &str) -> Option<usize> {
        let mut child = self.first_child(parent)?;
        loop {
            let node = &self.nodes[child];
            if node.generic() == GenericKind::Key && self.node_text(child).eq_ignore_ascii_case(name)
            {
                return Some(child);
            }
            child = self.next_sibling(child)?;
        }
    }

    /// The text of this node's sole child value. A key followed by exactly
    /// one value child is a scalar setting; zero children (`Key()`) or two
    /// or more (`Key:[a,b]`) yield `None`.
    #[must_use]
    pub fn get_single_subvalue(&self, index: usize) -> Option<&str> {
        let child = self.first_child(index)?;
        if self.next_sibling(child).is_some() {
            return None;
        }
        if self.nodes[child].generic() != GenericKind::Value {
            return None;
        }
        Some(self.node_text(child))
    }

    /// Looks up `name` among the children of `parent` and returns its
    /// scalar value, if both exist.
    #[must_use]
    pub fn get_key_value(&self, parent: usize, name: &str) -> Option<&str> {
        let key = self.find_key(parent, name)?;
        self.get_single_subvalue(key)
    }

    /// Sets `name` to `value` under `parent`, creating the key if absent
    /// and replacing any existing children otherwise. Returns the index of
    /// the value node.
    pub fn set_key_value(&mut self, parent: usize, name: &str, value: &str) -> Result<usize> {
        let kind = if crate::reader::looks_like_number(value) {
            NodeKind::Number
        } else {
            NodeKind::String
        };
        if let Some(key) = self.find_key(parent, name) {
            if let Some(child) = self.first_child(key) {
                if self.next_sibling(child).is_none() {
                    self.set_node_text(child, value)?;
                    self.set_node_kind(child, kind);
                    return Ok(child);
                }
                // Multi-valued key: collapse it back to a scalar.
                let end = self.descendant_end(key);
                self.nodes.drain(key + 1..end);
            }
            let level = self.nodes[key].level + 1;
            return self.insert(key + 1, kind, value, level);
        }
        let key = self.append_child(parent, NodeKind::Element, name)?;
        let level = self.nodes[key].level + 1;
        self.insert(key + 1, kind, value, level)
    }
}
