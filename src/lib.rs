//! # texttree
//!
//! A forgiving parser, flat document tree, and serializer family for
//! hierarchical text configuration formats.
//!
//! ## What is a TextTree?
//!
//! A [`TextTree`] is a document parsed into a flat array of nodes instead
//! of a pointer-linked tree. Each node carries its kind, a span into one
//! shared decoded-text buffer, and a nesting level; the level sequence is
//! the entire structure. That layout makes whole-document serialization a
//! single linear walk and keeps shallow config documents cheap to scan.
//!
//! Two dialect parsers feed the tree:
//!
//! - **Jsonex** ([`jsonex`]): JSON with the ceremony made optional:
//!   unquoted words, omitted colons and commas, colon-chained keys
//!   (`a:b:c:d` ≡ `a:{b:{c:d}}`), function-call syntax (`rgb(1,0,0)`),
//!   named closing tags (`{...}/name`), and `//` comments.
//! - **INI** ([`ini`]): Windows-INI sections, `key = value` lines, and
//!   `;`/`#` comments.
//!
//! Two writers regenerate text from any tree: [`JsonexWriter`] and
//! [`XmlWriter`], both behind the push-style [`TreeWriter`] trait.
//!
//! ## Key Features
//!
//! - **Never aborts on bad input**: syntax problems accumulate as
//!   [`ParseError`] diagnostics while parsing continues, so a partially
//!   malformed document still yields a usable tree
//! - **Flat, level-encoded tree**: no parent/child pointers; navigation
//!   is an index walk over one contiguous array
//! - **Cursor navigation**: [`NodePointer`] walks siblings, children,
//!   and parents, with case-insensitive keyed lookup
//! - **Round-trip safe**: parse → write → parse preserves node
//!   categories, levels, and decoded text
//! - **No Unsafe Code**: written entirely in safe Rust
//!
//! ## Quick Start
//!
//! ```rust
//! use texttree::{jsonex, NodePointer};
//!
//! let (tree, errors) = jsonex::parse(r#"
//!     window:{title:"Sampler", width:800}
//!     fonts:[consolas, "segoe ui"]
//! "#);
//! assert!(errors.is_empty());
//!
//! let root = NodePointer::new(&tree);
//! let window = root.find("window").unwrap();
//! assert_eq!(window.key_value("title"), Some("Sampler"));
//! assert_eq!(window.key_value("width"), Some("800"));
//! ```
//!
//! ## Writing a tree back out
//!
//! ```rust
//! use texttree::{jsonex, to_xml};
//!
//! let (tree, _) = jsonex::parse(r#"user:{name:"Alice"}"#);
//! assert_eq!(to_xml(&tree), "<user>\n  <name>Alice</name>\n</user>");
//! ```
//!
//! ## Settings documents
//!
//! The [`SettingsDocument`] layer reads and writes the application
//! settings-file convention (`content` format tag plus an `objects`
//! array), preserving attribute order across a load→save round trip.

pub mod cursor;
pub mod error;
pub mod ini;
pub mod jsonex;
pub mod node;
pub mod options;
pub mod reader;
pub mod settings;
pub mod tree;
pub mod writer;

pub use cursor::NodePointer;
pub use error::{Error, ParseError, Result};
pub use ini::IniParser;
pub use jsonex::JsonexParser;
pub use node::{GenericKind, Node, NodeKind};
pub use options::WriteOptions;
pub use settings::SettingsDocument;
pub use tree::{AdvanceDirection, TextTree};
pub use writer::{JsonexWriter, TreeWriter, XmlWriter};

/// Pull-model parsing surface shared by the dialect parsers.
///
/// A parser is bound to its input text at construction and appends nodes
/// to a caller-supplied [`TextTree`]. [`TreeParser::read_node`] appends at
/// most one node per call, so callers can interleave parsing with other
/// work; [`TreeParser::read_nodes`] drains the input in one call.
pub trait TreeParser {
    /// Appends the next node to `tree`.
    ///
    /// Returns `true` if a node was appended and `false` at end of input.
    /// Diagnostics recorded along the way do not stop the parse.
    fn read_node(&mut self, tree: &mut TextTree) -> bool;

    /// Parses the remaining input to completion.
    fn read_nodes(&mut self, tree: &mut TextTree) {
        while self.read_node(tree) {}
    }

    /// Diagnostics accumulated so far, in input order.
    fn errors(&self) -> &[ParseError];

    /// Number of diagnostics accumulated so far.
    fn error_count(&self) -> usize {
        self.errors().len()
    }
}

/// Parses Jsonex text into a tree plus any accumulated diagnostics.
///
/// Equivalent to [`jsonex::parse`]; re-exported here for discoverability.
///
/// # Examples
///
/// ```rust
/// let (tree, errors) = texttree::parse_jsonex("width:800");
/// assert!(errors.is_empty());
/// assert_eq!(tree.get_key_value(0, "width"), Some("800"));
/// ```
#[must_use]
pub fn parse_jsonex(text: &str) -> (TextTree, Vec<ParseError>) {
    jsonex::parse(text)
}

/// Parses INI text into a tree plus any accumulated diagnostics.
///
/// # Examples
///
/// ```rust
/// let (tree, errors) = texttree::parse_ini("[display]\nwidth = 800\n");
/// assert!(errors.is_empty());
/// ```
#[must_use]
pub fn parse_ini(text: &str) -> (TextTree, Vec<ParseError>) {
    ini::parse(text)
}

/// Serializes a tree to Jsonex text with default options.
///
/// # Examples
///
/// ```rust
/// let (tree, _) = texttree::parse_jsonex("a:{x:1}");
/// assert_eq!(texttree::to_jsonex(&tree), "a:{\n  x:1\n}");
/// ```
#[must_use]
pub fn to_jsonex(tree: &TextTree) -> String {
    let mut writer = JsonexWriter::new();
    writer.write_nodes(tree);
    writer.into_inner()
}

/// Serializes a tree to XML text with default options.
#[must_use]
pub fn to_xml(tree: &TextTree) -> String {
    let mut writer = XmlWriter::new();
    writer.write_nodes(tree);
    writer.into_inner()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_walk_write() {
        let (tree, errors) = parse_jsonex("a:{x:1, y:[2, 3]}");
        assert!(errors.is_empty());
        let text = to_jsonex(&tree);
        let (again, errors) = parse_jsonex(&text);
        assert!(errors.is_empty());
        assert_eq!(tree.node_count(), again.node_count());
    }

    #[test]
    fn both_dialects_share_the_navigation_surface() {
        let (from_ini, _) = parse_ini("[s]\nk = v\n");
        let (from_jsonex, _) = parse_jsonex("s:{k:v}");
        assert_eq!(
            from_ini.get_key_value(1, "k"),
            from_jsonex.get_key_value(1, "k")
        );
    }
}
