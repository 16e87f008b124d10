//! Error types for parsing, navigation, and the settings layer.
//!
//! Two distinct channels exist by design:
//!
//! - **Syntax diagnostics** ([`ParseError`]): recoverable problems found
//!   while parsing. The parsers never abort on malformed dialect syntax;
//!   they record an `(offset, message)` pair and continue from the best
//!   recovery point, so a document can be partially malformed and still
//!   partially usable. Callers decide whether any accumulated diagnostics
//!   are fatal to them.
//! - **Hard errors** ([`Error`]): conditions that make the result itself
//!   unusable, such as a settings file whose `content` tag identifies a
//!   different format. These are ordinary `Result` failures.
//!
//! Out-of-range navigation is neither: it is signaled by a boolean return
//! with the output left unchanged, keeping hot traversal loops free of
//! error plumbing.
//!
//! ## Examples
//!
//! ```rust
//! use texttree::jsonex;
//!
//! let (tree, errors) = jsonex::parse("{a:1}/wrongname");
//! assert!(tree.node_count() > 1); // the object still parsed
//! assert_eq!(errors.len(), 1);    // the bad closing tag was recorded
//! ```

use thiserror::Error;

/// A recoverable syntax diagnostic recorded during parsing.
///
/// The offset is a byte position into the source text. Messages are static
/// so accumulating diagnostics never allocates per error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("syntax error at offset {offset}: {message}")]
pub struct ParseError {
    /// Byte offset into the source text where the problem was noticed.
    pub offset: usize,
    /// A static description of the problem.
    pub message: &'static str,
}

impl ParseError {
    /// Creates a diagnostic at the given source offset.
    #[must_use]
    pub const fn new(offset: usize, message: &'static str) -> Self {
        ParseError { offset, message }
    }
}

/// Hard failures surfaced through `Result`.
///
/// Syntax problems never appear here; they accumulate as [`ParseError`]
/// records instead. See the module docs for the split.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// The text parsed validly but its `content` tag names a different
    /// format (or is missing), so the document cannot be trusted.
    #[error("unrecognized file format: expected content tag {expected:?}, found {found:?}")]
    UnrecognizedFormat {
        expected: &'static str,
        found: Option<String>,
    },

    /// A tree index outside the node array was passed to a mutation.
    #[error("node index {index} out of range (tree has {count} nodes)")]
    IndexOutOfRange { index: usize, count: usize },
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
