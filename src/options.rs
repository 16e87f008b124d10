//! Configuration options for serialization.
//!
//! [`WriteOptions`] controls the writers' formatting choices: indentation
//! width and whether Jsonex output carries named closing tags.
//!
//! ## Examples
//!
//! ```rust
//! use texttree::{jsonex, JsonexWriter, TreeWriter, WriteOptions};
//!
//! let (tree, _) = jsonex::parse("panel:{width:800}");
//!
//! let options = WriteOptions::new().with_closing_tags(true);
//! let mut writer = JsonexWriter::with_options(options);
//! writer.write_nodes(&tree);
//! assert!(writer.output().contains("}/panel"));
//! ```

/// Formatting options shared by the writers.
#[derive(Clone, Debug)]
pub struct WriteOptions {
    /// Spaces per nesting level.
    pub indent: usize,
    /// Emit `/name` after closing brackets of named Jsonex scopes.
    pub closing_tags: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        WriteOptions {
            indent: 2,
            closing_tags: false,
        }
    }
}

impl WriteOptions {
    /// Default options: 2-space indent, no closing tags.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the indentation width in spaces per level.
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Enables or disables named closing tags (`}/name`) in Jsonex output.
    /// Purely a readability aid; the parser accepts output either way.
    #[must_use]
    pub fn with_closing_tags(mut self, closing_tags: bool) -> Self {
        self.closing_tags = closing_tags;
        self
    }
}
