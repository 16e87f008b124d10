//! Serializers regenerating text from a [`TextTree`].
//!
//! [`TreeWriter`] is the shared surface: a push-style node stream
//! (`write_node`, `enter_node`/`exit_node` on scope changes) plus a
//! provided [`TreeWriter::write_nodes`] that walks a flat tree and drives
//! the push API from its level deltas. Callers building documents
//! incrementally can push nodes themselves; callers with a finished tree
//! hand it over whole.
//!
//! [`JsonexWriter`] emits the relaxed-JSON dialect: separator and quoting
//! decisions come from a stack of open scope kinds, and values stay
//! unquoted when they are legal bare words. [`XmlWriter`] emits XML:
//! attribute-kind keys render inside the open start tag, anything else
//! forces the tag closed and becomes child content.
//!
//! Output accumulates in one growing buffer; [`TreeWriter::output`]
//! borrows it, [`TreeWriter::into_inner`] moves it out.
//!
//! ## Examples
//!
//! ```rust
//! use texttree::{jsonex, JsonexWriter, TreeWriter};
//!
//! let (tree, _) = jsonex::parse("color:{r:1, g:0.5}");
//! let mut writer = JsonexWriter::new();
//! writer.write_nodes(&tree);
//! let text = writer.into_inner();
//!
//! let (reparsed, errors) = jsonex::parse(&text);
//! assert!(errors.is_empty());
//! assert_eq!(reparsed.node_count(), tree.node_count());
//! ```

use crate::node::{GenericKind, NodeKind};
use crate::options::WriteOptions;
use crate::reader::is_word_char;
use crate::tree::TextTree;

/// Push-style serialization surface shared by the dialect writers.
pub trait TreeWriter {
    /// Emits one node's content at the current scope depth.
    fn write_node(&mut self, kind: NodeKind, text: &str);

    /// Descends into the children of the most recently written node.
    fn enter_node(&mut self);

    /// Closes the current scope.
    fn exit_node(&mut self);

    /// The text produced so far.
    fn output(&self) -> &str;

    /// Consumes the writer, returning the produced text.
    fn into_inner(self) -> String
    where
        Self: Sized;

    /// Serializes a whole tree by replaying it through the push API.
    /// Level deltas along the flat node sequence become enter/exit calls.
    fn write_nodes(&mut self, tree: &TextTree) {
        let nodes = tree.nodes();
        for index in 1..nodes.len() {
            let node = &nodes[index];
            self.write_node(node.kind, tree.node_text(index));
            let next_level = nodes.get(index + 1).map_or(1, |next| next.level);
            if next_level > node.level {
                self.enter_node();
            } else {
                for _ in 0..node.level - next_level {
                    self.exit_node();
                }
            }
        }
    }
}

const fn scope_brackets(kind: NodeKind) -> (char, char) {
    match kind {
        NodeKind::Array => ('[', ']'),
        NodeKind::Function => ('(', ')'),
        _ => ('{', '}'),
    }
}

/// Whether this key kind opens a bracketed scope when serialized to
/// Jsonex. INI sections have no bracket of their own and render as
/// objects.
const fn renders_as_scope(kind: NodeKind) -> bool {
    kind.opens_scope() || matches!(kind, NodeKind::Section)
}

struct JsonexScope {
    kind: NodeKind,
    name: String,
    /// A scalar key's children render on the key's own line.
    inline: bool,
    saved_sibling: bool,
    saved_comment: bool,
}

/// Serializer for the Jsonex dialect.
pub struct JsonexWriter {
    output: String,
    options: WriteOptions,
    scopes: Vec<JsonexScope>,
    /// Key written but not yet entered; flushed as an empty scope if no
    /// children follow.
    pending: Option<(NodeKind, String)>,
    sibling_written: bool,
    last_was_comment: bool,
}

impl Default for JsonexWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonexWriter {
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(WriteOptions::default())
    }

    #[must_use]
    pub fn with_options(options: WriteOptions) -> Self {
        JsonexWriter {
            output: String::with_capacity(256),
            options,
            scopes: Vec::new(),
            pending: None,
            sibling_written: false,
            last_was_comment: false,
        }
    }

    fn indent_depth(&self) -> usize {
        self.scopes.iter().filter(|scope| !scope.inline).count()
    }

    /// Separator and indentation before a new entry. No comma after a
    /// comment: the comma would land inside the comment's line. Inside an
    /// inline scope a comment still ends its line, or the next entry would
    /// be absorbed into the comment text on reparse.
    fn begin_entry(&mut self) {
        if let Some(scope) = self.scopes.last() {
            if scope.inline {
                if self.last_was_comment {
                    self.output.push('\n');
                    let spaces = self.indent_depth() * self.options.indent;
                    for _ in 0..spaces {
                        self.output.push(' ');
                    }
                } else if self.sibling_written {
                    self.output.push(' ');
                }
                return;
            }
        }
        if self.sibling_written {
            if !self.scopes.is_empty() && !self.last_was_comment {
                self.output.push(',');
            }
            self.output.push('\n');
        } else if !self.output.is_empty() {
            self.output.push('\n');
        }
        let spaces = self.indent_depth() * self.options.indent;
        for _ in 0..spaces {
            self.output.push(' ');
        }
    }

    /// Key names are bare when they are legal words, quoted otherwise.
    /// Anonymous scopes have no name and no colon.
    fn write_name(&mut self, name: &str) {
        if name.is_empty() {
            return;
        }
        if name.chars().all(is_word_char) {
            self.output.push_str(name);
        } else {
            self.write_quoted(name);
        }
        self.output.push(':');
    }

    fn write_value(&mut self, kind: NodeKind, text: &str) {
        let bare = matches!(kind, NodeKind::Number | NodeKind::Identifier)
            && !text.is_empty()
            && text.chars().all(is_word_char);
        if bare {
            self.output.push_str(text);
        } else {
            self.write_quoted(text);
        }
    }

    fn write_quoted(&mut self, text: &str) {
        self.output.push('"');
        for ch in text.chars() {
            match ch {
                '"' => self.output.push_str("\\\""),
                '\\' => self.output.push_str("\\\\"),
                '\n' => self.output.push_str("\\n"),
                '\r' => self.output.push_str("\\r"),
                '\t' => self.output.push_str("\\t"),
                '\u{0008}' => self.output.push_str("\\b"),
                '\u{000C}' => self.output.push_str("\\f"),
                ch if (ch as u32) < 0x20 => {
                    self.output.push_str(&format!("\\u{:04X}", ch as u32));
                }
                ch => self.output.push(ch),
            }
        }
        self.output.push('"');
    }

    fn write_closure(&mut self, name: &str) {
        // `/name` cannot express names that are not bare words.
        if self.options.closing_tags && !name.is_empty() && name.chars().all(is_word_char) {
            self.output.push('/');
            self.output.push_str(name);
        }
    }

    /// A key written without children becomes an empty scope (`a:{}`) or
    /// a bare dangling key (`a:`).
    fn flush_pending(&mut self) {
        if let Some((kind, name)) = self.pending.take() {
            if renders_as_scope(kind) {
                let (open, close) = scope_brackets(kind);
                self.output.push(open);
                self.output.push(close);
                self.write_closure(&name);
            }
        }
    }
}

impl TreeWriter for JsonexWriter {
    fn write_node(&mut self, kind: NodeKind, text: &str) {
        self.flush_pending();
        match kind.generic() {
            GenericKind::Key => {
                self.begin_entry();
                self.write_name(text);
                self.pending = Some((kind, text.to_string()));
                self.sibling_written = true;
                self.last_was_comment = false;
            }
            GenericKind::Value => {
                self.begin_entry();
                self.write_value(kind, text);
                self.sibling_written = true;
                self.last_was_comment = false;
            }
            GenericKind::Comment => {
                self.begin_entry();
                self.output.push_str("//");
                self.output.push_str(text);
                self.sibling_written = true;
                self.last_was_comment = true;
            }
            GenericKind::None | GenericKind::Ignorable => {}
        }
    }

    fn enter_node(&mut self) {
        let (kind, name) = self
            .pending
            .take()
            .unwrap_or((NodeKind::Object, String::new()));
        let inline = !renders_as_scope(kind);
        if !inline {
            self.output.push(scope_brackets(kind).0);
        }
        self.scopes.push(JsonexScope {
            kind,
            name,
            inline,
            saved_sibling: self.sibling_written,
            saved_comment: self.last_was_comment,
        });
        self.sibling_written = false;
        self.last_was_comment = false;
    }

    fn exit_node(&mut self) {
        self.flush_pending();
        let Some(scope) = self.scopes.pop() else {
            return;
        };
        if !scope.inline {
            self.output.push('\n');
            let spaces = self.indent_depth() * self.options.indent;
            for _ in 0..spaces {
                self.output.push(' ');
            }
            self.output.push(scope_brackets(scope.kind).1);
            let name = scope.name;
            self.write_closure(&name);
        }
        self.sibling_written = scope.saved_sibling;
        self.last_was_comment = scope.saved_comment;
    }

    fn output(&self) -> &str {
        &self.output
    }

    fn into_inner(mut self) -> String {
        self.flush_pending();
        self.output
    }
}

struct XmlScope {
    name: String,
    is_attribute: bool,
    /// For attribute scopes: whether the `name="` prefix was emitted.
    value_started: bool,
    saved_inline: bool,
}

/// Serializer producing XML from a node stream.
///
/// Attribute-kind keys with a scalar value render as attributes inside
/// the enclosing element's start tag; every other child forces the start
/// tag closed and renders as a child element or text content. A document
/// with several top-level keys is emitted as an XML fragment.
pub struct XmlWriter {
    output: String,
    options: WriteOptions,
    scopes: Vec<XmlScope>,
    /// The innermost element's start tag has not been closed with `>`.
    tag_open: bool,
    pending: Option<XmlPending>,
    /// The current element holds inline text, so its end tag stays on the
    /// same line.
    inline_content: bool,
}

enum XmlPending {
    Element(String),
    Attribute(String),
}

impl Default for XmlWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl XmlWriter {
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(WriteOptions::default())
    }

    #[must_use]
    pub fn with_options(options: WriteOptions) -> Self {
        XmlWriter {
            output: String::with_capacity(256),
            options,
            scopes: Vec::new(),
            tag_open: false,
            pending: None,
            inline_content: false,
        }
    }

    fn element_depth(&self) -> usize {
        self.scopes.iter().filter(|scope| !scope.is_attribute).count()
    }

    fn close_start_tag(&mut self) {
        if self.tag_open {
            self.output.push('>');
            self.tag_open = false;
        }
    }

    fn newline_and_indent(&mut self) {
        if !self.output.is_empty() {
            self.output.push('\n');
        }
        let spaces = self.element_depth() * self.options.indent;
        for _ in 0..spaces {
            self.output.push(' ');
        }
    }

    fn write_escaped(&mut self, text: &str) {
        for ch in text.chars() {
            match ch {
                '&' => self.output.push_str("&amp;"),
                '<' => self.output.push_str("&lt;"),
                '>' => self.output.push_str("&gt;"),
                '"' => self.output.push_str("&quot;"),
                ch if (ch as u32) < 0x20 && !matches!(ch, '\t' | '\n' | '\r') => {
                    self.output.push_str(&format!("&#x{:X};", ch as u32));
                }
                ch => self.output.push(ch),
            }
        }
    }

    /// XML tag names cannot be empty or contain arbitrary punctuation;
    /// anonymous nodes become `<item>` and illegal characters degrade to
    /// underscores.
    fn tag_name(name: &str) -> String {
        if name.is_empty() {
            return "item".to_string();
        }
        let mut tag: String = name
            .chars()
            .map(|ch| {
                if ch.is_alphanumeric() || matches!(ch, '_' | '-' | '.') {
                    ch
                } else {
                    '_'
                }
            })
            .collect();
        if tag.starts_with(|c: char| c.is_ascii_digit()) {
            tag.insert(0, '_');
        }
        tag
    }

    /// A pending node that never got children: a childless element
    /// self-closes, a childless attribute becomes `name=""`.
    fn flush_pending(&mut self) {
        match self.pending.take() {
            Some(XmlPending::Element(_)) => {
                self.output.push_str("/>");
                self.tag_open = false;
            }
            Some(XmlPending::Attribute(name)) => {
                self.output.push(' ');
                self.output.push_str(&Self::tag_name(&name));
                self.output.push_str("=\"\"");
            }
            None => {}
        }
    }
}

impl TreeWriter for XmlWriter {
    fn write_node(&mut self, kind: NodeKind, text: &str) {
        self.flush_pending();
        match kind.generic() {
            GenericKind::Key => {
                if kind == NodeKind::Attribute && self.tag_open {
                    self.pending = Some(XmlPending::Attribute(text.to_string()));
                } else {
                    self.close_start_tag();
                    self.newline_and_indent();
                    let tag = Self::tag_name(text);
                    self.output.push('<');
                    self.output.push_str(&tag);
                    self.tag_open = true;
                    self.pending = Some(XmlPending::Element(tag));
                }
            }
            GenericKind::Value => {
                if let Some(scope) = self.scopes.last_mut() {
                    if scope.is_attribute && self.tag_open {
                        if !scope.value_started {
                            scope.value_started = true;
                            let name = Self::tag_name(&scope.name);
                            self.output.push(' ');
                            self.output.push_str(&name);
                            self.output.push_str("=\"");
                        }
                        self.write_escaped(text);
                        return;
                    }
                }
                let was_open = self.tag_open;
                self.close_start_tag();
                if was_open {
                    self.write_escaped(text);
                    self.inline_content = true;
                } else {
                    self.newline_and_indent();
                    self.write_escaped(text);
                }
            }
            GenericKind::Comment => {
                self.close_start_tag();
                self.newline_and_indent();
                self.output.push_str("<!--");
                self.write_escaped(text);
                self.output.push_str("-->");
            }
            GenericKind::None | GenericKind::Ignorable => {}
        }
    }

    fn enter_node(&mut self) {
        match self.pending.take() {
            Some(XmlPending::Element(name)) => {
                self.scopes.push(XmlScope {
                    name,
                    is_attribute: false,
                    value_started: false,
                    saved_inline: self.inline_content,
                });
                self.inline_content = false;
            }
            Some(XmlPending::Attribute(name)) => {
                self.scopes.push(XmlScope {
                    name,
                    is_attribute: true,
                    value_started: false,
                    saved_inline: self.inline_content,
                });
            }
            None => {}
        }
    }

    fn exit_node(&mut self) {
        self.flush_pending();
        let Some(scope) = self.scopes.pop() else {
            return;
        };
        if scope.is_attribute {
            if scope.value_started {
                self.output.push('"');
            } else {
                self.output.push(' ');
                self.output.push_str(&Self::tag_name(&scope.name));
                self.output.push_str("=\"\"");
            }
            return;
        }
        if self.tag_open {
            self.output.push_str("/>");
            self.tag_open = false;
        } else {
            if !self.inline_content {
                self.newline_and_indent();
            }
            self.output.push_str("</");
            self.output.push_str(&scope.name);
            self.output.push('>');
        }
        self.inline_content = scope.saved_inline;
    }

    fn output(&self) -> &str {
        &self.output
    }

    fn into_inner(mut self) -> String {
        self.flush_pending();
        self.output
    }
}
