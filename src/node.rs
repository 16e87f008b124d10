//! Node types for the flat document tree.
//!
//! Every element of a [`TextTree`](crate::TextTree) is a [`Node`]: a type
//! tag, a text span into the tree's shared decoded buffer, and a nesting
//! level. The level is the only structural encoding; there are no
//! parent/child pointers; hierarchy is recovered by walking the flat array
//! and watching the level change.
//!
//! Node types live on two orthogonal axes:
//!
//! - [`GenericKind`]: the broad category (key, value, comment, ...)
//! - [`NodeKind`]: the specific kind within that category (an object key
//!   vs. an array key, a quoted string vs. a bare identifier, ...)
//!
//! ## Examples
//!
//! ```rust
//! use texttree::{GenericKind, NodeKind};
//!
//! assert_eq!(NodeKind::Object.generic(), GenericKind::Key);
//! assert_eq!(NodeKind::String.generic(), GenericKind::Value);
//! assert!(NodeKind::Section.is_key());
//! ```

use std::fmt;

/// The broad category of a node.
///
/// Categories group the specific [`NodeKind`]s: everything that names a
/// scope or a setting is a `Key`, everything that carries data is a
/// `Value`, comments and skippable text get their own categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum GenericKind {
    /// No category; unused placeholder nodes.
    #[default]
    None,
    /// Data-bearing nodes: text, strings, numbers, identifiers.
    Value,
    /// Structure-naming nodes: the root, objects, arrays, sections, keys.
    Key,
    /// Comment text carried through for round-tripping.
    Comment,
    /// Text present in the source but meaningless to consumers.
    Ignorable,
}

/// The specific kind of a node within its [`GenericKind`] category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum NodeKind {
    /// Placeholder; no kind.
    #[default]
    None,
    /// The synthetic document root, always the first node at level 0.
    Root,
    /// A key whose element is a scalar value (`name:value`).
    Element,
    /// A key rendered as an attribute (XML attribute syntax on output).
    Attribute,
    /// A key opening a `(` ... `)` scope.
    Function,
    /// A key opening a `[` ... `]` scope.
    Array,
    /// A key opening a `{` ... `}` scope, or a colon-chained key.
    Object,
    /// An INI `[section]` header.
    Section,
    /// Plain unquoted text (INI values).
    Text,
    /// A quoted string, escapes already decoded.
    String,
    /// An unquoted numeric run.
    Number,
    /// Raw data (hex blobs and similar opaque payloads).
    Data,
    /// An unquoted non-numeric word, including recovered malformed tokens.
    Identifier,
    /// A comment (`// ...` in Jsonex, `; ...` / `# ...` in INI).
    Comment,
    /// Present in the source but carrying no meaning.
    Ignorable,
}

impl NodeKind {
    /// Returns the broad category this kind belongs to.
    #[must_use]
    pub const fn generic(self) -> GenericKind {
        match self {
            NodeKind::None => GenericKind::None,
            NodeKind::Root
            | NodeKind::Element
            | NodeKind::Attribute
            | NodeKind::Function
            | NodeKind::Array
            | NodeKind::Object
            | NodeKind::Section => GenericKind::Key,
            NodeKind::Text
            | NodeKind::String
            | NodeKind::Number
            | NodeKind::Data
            | NodeKind::Identifier => GenericKind::Value,
            NodeKind::Comment => GenericKind::Comment,
            NodeKind::Ignorable => GenericKind::Ignorable,
        }
    }

    /// Returns `true` for kinds in the `Key` category.
    #[must_use]
    pub const fn is_key(self) -> bool {
        matches!(self.generic(), GenericKind::Key)
    }

    /// Returns `true` for kinds in the `Value` category.
    #[must_use]
    pub const fn is_value(self) -> bool {
        matches!(self.generic(), GenericKind::Value)
    }

    /// Returns `true` for keys that open a bracketed scope.
    #[must_use]
    pub const fn opens_scope(self) -> bool {
        matches!(
            self,
            NodeKind::Object | NodeKind::Array | NodeKind::Function
        )
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::None => "none",
            NodeKind::Root => "root",
            NodeKind::Element => "element",
            NodeKind::Attribute => "attribute",
            NodeKind::Function => "function",
            NodeKind::Array => "array",
            NodeKind::Object => "object",
            NodeKind::Section => "section",
            NodeKind::Text => "text",
            NodeKind::String => "string",
            NodeKind::Number => "number",
            NodeKind::Data => "data",
            NodeKind::Identifier => "identifier",
            NodeKind::Comment => "comment",
            NodeKind::Ignorable => "ignorable",
        };
        f.write_str(name)
    }
}

/// One flat tree element: a kind, a span into the shared decoded text
/// buffer, and a nesting level.
///
/// The span covers this node's own text only, never its descendants'.
/// Levels along the node sequence grow by at most one per step; a drop of
/// any size closes that many scopes at once.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Node {
    pub kind: NodeKind,
    /// Byte offset of this node's text in the tree buffer.
    pub start: u32,
    /// Byte length of this node's text.
    pub length: u32,
    /// Nesting depth; the synthetic root is level 0.
    pub level: u32,
}

impl Node {
    /// Creates a node with an empty span.
    #[must_use]
    pub const fn new(kind: NodeKind, level: u32) -> Self {
        Node {
            kind,
            start: 0,
            length: 0,
            level,
        }
    }

    /// The broad category of this node's kind.
    #[must_use]
    pub const fn generic(&self) -> GenericKind {
        self.kind.generic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_cover_every_kind() {
        let kinds = [
            NodeKind::None,
            NodeKind::Root,
            NodeKind::Element,
            NodeKind::Attribute,
            NodeKind::Function,
            NodeKind::Array,
            NodeKind::Object,
            NodeKind::Section,
            NodeKind::Text,
            NodeKind::String,
            NodeKind::Number,
            NodeKind::Data,
            NodeKind::Identifier,
            NodeKind::Comment,
            NodeKind::Ignorable,
        ];
        for kind in kinds {
            assert_eq!(kind.is_key(), kind.generic() == GenericKind::Key);
            assert_eq!(kind.is_value(), kind.generic() == GenericKind::Value);
        }
        assert_eq!(NodeKind::Root.generic(), GenericKind::Key);
        assert_eq!(NodeKind::Identifier.generic(), GenericKind::Value);
        assert_eq!(NodeKind::Comment.generic(), GenericKind::Comment);
    }

    #[test]
    fn scope_openers() {
        assert!(NodeKind::Object.opens_scope());
        assert!(NodeKind::Array.opens_scope());
        assert!(NodeKind::Function.opens_scope());
        assert!(!NodeKind::Element.opens_scope());
        assert!(!NodeKind::Section.opens_scope());
    }
}
