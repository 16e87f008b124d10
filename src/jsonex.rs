//! Parser for the relaxed JSON-like "Jsonex" dialect.
//!
//! Jsonex is JSON with the ceremony made optional. Colons, quotes, and
//! commas may each be omitted where the result stays unambiguous:
//!
//! ```text
//! Key      = KeyName ':' Key | KeyName ':' Element Closure | KeyName Element Closure
//! Element  = Object | Array | Function | Value
//! Object   = '{' Elements '}'    Array = '[' Elements ']'    Function = '(' Elements ')'
//! Elements = (Element Separator?)*           Separator = ',' | whitespace
//! Value    = '"' chars '"' | unquoted-alphanumeric-run
//! Closure  = nothing | '/' Value
//! ```
//!
//! Notable relaxations, all deliberate:
//!
//! - `a:b:c:d` is shorthand for `a:{b:{c:d}}` (colon-chained keys nest).
//! - A trailing comma before a closing bracket is legal.
//! - `a{}` names the object `a`; `a {}` is the bare value `a` followed by
//!   an unnamed object. Whitespace before an opening bracket changes the
//!   meaning.
//! - A closing bracket may be followed by `/name`, a named closing tag
//!   checked against the opening key; a mismatch records a diagnostic and
//!   parsing continues.
//!
//! Disambiguation needs at most two tokens of lookahead, resolved against
//! an explicit stack of open scope kinds. Syntax problems never abort the
//! parse: each records a [`ParseError`] and scanning resumes from the best
//! recovery point, so partially-invalid documents still produce usable
//! trees.
//!
//! ## Examples
//!
//! ```rust
//! use texttree::jsonex;
//!
//! let (tree, errors) = jsonex::parse(r#"user:{name:"Alice", tags:[a,b,]}"#);
//! assert!(errors.is_empty());
//! let (chained, _) = jsonex::parse("a:b:c:d");
//! let (braced, _) = jsonex::parse("a:{b:{c:d}}");
//! assert_eq!(chained.node_count(), braced.node_count());
//! ```

use crate::error::ParseError;
use crate::node::NodeKind;
use crate::reader::{is_word_char, looks_like_number, TextReader};
use crate::tree::TextTree;
use crate::TreeParser;

/// Kinds of open scope tracked while parsing.
///
/// A closed enum rather than raw bracket characters, so the stack's
/// invariants stay checkable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ScopeKind {
    /// `{` ... `}`
    Object,
    /// `[` ... `]`
    Array,
    /// `(` ... `)`
    Function,
    /// An implicit scope opened by `key:`; closes after one element.
    KeyChain,
}

#[derive(Debug)]
struct Scope {
    kind: ScopeKind,
    /// Key name that opened the scope; empty for anonymous brackets.
    /// Validated against an optional `/name` closing tag.
    name: String,
}

/// Single-pass, forward-only parser producing a flat [`TextTree`].
///
/// Supports both batch ([`TreeParser::read_nodes`]) and incremental pull
/// ([`TreeParser::read_node`], one appended node per `true` return).
pub struct JsonexParser<'a> {
    reader: TextReader<'a>,
    stack: Vec<Scope>,
    errors: Vec<ParseError>,
    done: bool,
}

impl<'a> JsonexParser<'a> {
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        JsonexParser {
            reader: TextReader::new(text),
            stack: Vec::new(),
            errors: Vec::new(),
            done: false,
        }
    }

    /// Consumes the parser, yielding the accumulated diagnostics.
    #[must_use]
    pub fn into_errors(self) -> Vec<ParseError> {
        self.errors
    }

    /// Level for a node appended at the current position: the root is 0,
    /// every open scope (bracket or colon chain) adds one.
    fn level(&self) -> u32 {
        self.stack.len() as u32 + 1
    }

    /// Pops the colon-chain scopes whose single element just completed.
    fn complete_element(&mut self) {
        while matches!(
            self.stack.last(),
            Some(scope) if scope.kind == ScopeKind::KeyChain
        ) {
            self.stack.pop();
        }
    }

    /// Like [`Self::complete_element`], but each popped chain key may be
    /// closed by its own `/name` tag (`a:1/a`, `a:b:2/b/a`).
    fn complete_element_with_closures(&mut self) {
        while matches!(
            self.stack.last(),
            Some(scope) if scope.kind == ScopeKind::KeyChain
        ) {
            if let Some(scope) = self.stack.pop() {
                self.check_closing_tag(&scope.name);
            }
        }
    }

    /// Reads a quoted string (escapes decoded) or an unquoted word.
    /// Returns the decoded text and whether it was quoted.
    fn read_token(&mut self) -> (String, bool) {
        if self.reader.current() == Some('"') {
            let start = self.reader.offset();
            self.reader.next_char();
            let mut text = String::new();
            loop {
                match self.reader.current() {
                    None => {
                        self.errors
                            .push(ParseError::new(start, "unterminated string at end of input"));
                        break;
                    }
                    Some('"') => {
                        self.reader.next_char();
                        break;
                    }
                    Some('\\') => self.reader.decode_escape(&mut text),
                    Some(ch) => {
                        text.push(ch);
                        self.reader.next_char();
                    }
                }
            }
            (text, true)
        } else {
            let start = self.reader.offset();
            while matches!(self.reader.current(), Some(ch) if is_word_char(ch)) {
                self.reader.next_char();
            }
            let word = self.reader.slice(start, self.reader.offset());
            (word.to_string(), false)
        }
    }

    /// Two-token lookahead: does another key follow the colon we just
    /// consumed? True makes the current key an object (colon-chain
    /// shorthand). The reader position is restored afterwards.
    fn chained_key_follows(&mut self) -> bool {
        let mark = self.reader.offset();
        let chained = self.scan_chained_key();
        self.reader.seek(mark);
        chained
    }

    fn scan_chained_key(&mut self) -> bool {
        match self.reader.current() {
            Some('"') => {
                // Skip the quoted token without decoding.
                self.reader.next_char();
                loop {
                    match self.reader.current() {
                        None => return false,
                        Some('\\') => {
                            self.reader.next_char();
                            self.reader.next_char();
                        }
                        Some('"') => {
                            self.reader.next_char();
                            break;
                        }
                        Some(_) => {
                            self.reader.next_char();
                        }
                    }
                }
            }
            Some(ch) if is_word_char(ch) => {
                while matches!(self.reader.current(), Some(c) if is_word_char(c)) {
                    self.reader.next_char();
                }
            }
            _ => return false,
        }
        if matches!(self.reader.current(), Some('{' | '[' | '(')) {
            return true; // `a:b{...}`: b names the bracket, so b is a key
        }
        self.reader.skip_spaces_and_line_breaks();
        self.reader.current() == Some(':')
    }

    fn bracket_kind(open: char) -> (ScopeKind, NodeKind) {
        match open {
            '{' => (ScopeKind::Object, NodeKind::Object),
            '[' => (ScopeKind::Array, NodeKind::Array),
            _ => (ScopeKind::Function, NodeKind::Function),
        }
    }

    /// Appends a key node for `name`, consumes the opening bracket under
    /// the cursor, and pushes its scope.
    fn open_keyed_scope(&mut self, tree: &mut TextTree, name: String, open: char) {
        let (scope, node) = Self::bracket_kind(open);
        tree.append(node, &name, self.level());
        self.reader.next_char();
        self.stack.push(Scope { kind: scope, name });
    }

    /// Handles a `}` / `]` / `)` under the cursor. Produces no node.
    fn close_scope(&mut self, closing: char) {
        let offset = self.reader.offset();
        self.reader.next_char();
        // A dangling `key:` inside the bracket closes with it.
        self.complete_element();
        let expected = match closing {
            '}' => ScopeKind::Object,
            ']' => ScopeKind::Array,
            _ => ScopeKind::Function,
        };
        match self.stack.last() {
            Some(scope) if scope.kind == expected => {
                let scope = self.stack.pop().unwrap();
                self.check_closing_tag(&scope.name);
                self.complete_element_with_closures();
            }
            Some(_) => {
                // Best-guess recovery: close the innermost scope anyway.
                self.errors
                    .push(ParseError::new(offset, "mismatched closing bracket"));
                let scope = self.stack.pop().unwrap();
                self.check_closing_tag(&scope.name);
                self.complete_element_with_closures();
            }
            None => {
                self.errors
                    .push(ParseError::new(offset, "unexpected closing bracket"));
            }
        }
    }

    /// Consumes an optional `/name` closing tag and validates it against
    /// the name that opened the scope. A mismatch records a diagnostic at
    /// the tag name's offset; the parse continues either way.
    fn check_closing_tag(&mut self, scope_name: &str) {
        let mark = self.reader.offset();
        self.reader.skip_spaces_and_line_breaks();
        let is_tag = self.reader.current() == Some('/')
            && self.reader.peek().is_some_and(is_word_char);
        if !is_tag {
            self.reader.seek(mark);
            return;
        }
        self.reader.next_char(); // '/'
        let name_start = self.reader.offset();
        while matches!(self.reader.current(), Some(ch) if is_word_char(ch)) {
            self.reader.next_char();
        }
        let tag = self.reader.slice(name_start, self.reader.offset());
        if !tag.eq_ignore_ascii_case(scope_name) {
            self.errors
                .push(ParseError::new(name_start, "mismatched closing tag name"));
        }
    }

    /// Reads one key or value token and appends its node.
    fn read_element(&mut self, tree: &mut TextTree) -> bool {
        let (text, quoted) = self.read_token();
        // Bracket glued to the name: `a{` names the scope. With whitespace
        // in between the name is a bare value instead.
        if let Some(open @ ('{' | '[' | '(')) = self.reader.current() {
            self.open_keyed_scope(tree, text, open);
            return true;
        }
        self.reader.skip_spaces_and_line_breaks();
        if self.reader.current() == Some(':') {
            self.reader.next_char();
            self.reader.skip_spaces_and_line_breaks();
            if let Some(open @ ('{' | '[' | '(')) = self.reader.current() {
                self.open_keyed_scope(tree, text, open);
                return true;
            }
            // `a:b:...` nests like `a:{b:...}`; a scalar stays a plain key.
            let kind = if self.chained_key_follows() {
                NodeKind::Object
            } else {
                NodeKind::Element
            };
            tree.append(kind, &text, self.level());
            self.stack.push(Scope {
                kind: ScopeKind::KeyChain,
                name: text,
            });
            return true;
        }
        let kind = if quoted {
            NodeKind::String
        } else if looks_like_number(&text) {
            NodeKind::Number
        } else {
            NodeKind::Identifier
        };
        tree.append(kind, &text, self.level());
        self.complete_element_with_closures();
        true
    }

    /// Appends a comment node for a `//` line comment.
    fn read_comment(&mut self, tree: &mut TextTree) -> bool {
        self.reader.next_char();
        self.reader.next_char();
        let start = self.reader.offset();
        self.reader.skip_to_line_end();
        let text = self.reader.slice(start, self.reader.offset()).to_string();
        tree.append(NodeKind::Comment, &text, self.level());
        true
    }

    /// End of input: close any scopes still open, recording a diagnostic
    /// per unterminated bracket.
    fn finish(&mut self) -> bool {
        if !self.done {
            self.done = true;
            let offset = self.reader.offset();
            while let Some(scope) = self.stack.pop() {
                if scope.kind != ScopeKind::KeyChain {
                    self.errors
                        .push(ParseError::new(offset, "unclosed bracket at end of input"));
                }
            }
        }
        false
    }
}

impl<'a> TreeParser for JsonexParser<'a> {
    /// Appends at most one node per call; structural characters (brackets,
    /// commas, closing tags) are consumed silently in between.
    fn read_node(&mut self, tree: &mut TextTree) -> bool {
        loop {
            self.reader.skip_spaces_and_line_breaks();
            let Some(ch) = self.reader.current() else {
                return self.finish();
            };
            match ch {
                ',' => {
                    self.reader.next_char();
                }
                open @ ('{' | '[' | '(') => {
                    // Unnamed scope: the node carries an empty name.
                    self.open_keyed_scope(tree, String::new(), open);
                    return true;
                }
                closing @ ('}' | ']' | ')') => {
                    self.close_scope(closing);
                }
                '/' if self.reader.peek() == Some('/') => {
                    return self.read_comment(tree);
                }
                '"' => return self.read_element(tree),
                ch if is_word_char(ch) => return self.read_element(tree),
                _ => {
                    self.errors
                        .push(ParseError::new(self.reader.offset(), "unexpected character"));
                    self.reader.next_char();
                }
            }
        }
    }

    fn errors(&self) -> &[ParseError] {
        &self.errors
    }
}

/// Parses `text` into a tree, returning it together with any accumulated
/// diagnostics. The tree is usable even when diagnostics are present.
#[must_use]
pub fn parse(text: &str) -> (TextTree, Vec<ParseError>) {
    let mut tree = TextTree::new();
    let mut parser = JsonexParser::new(text);
    parser.read_nodes(&mut tree);
    (tree, parser.into_errors())
}
