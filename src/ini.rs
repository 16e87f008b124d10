//! Parser for the Windows-INI dialect.
//!
//! A two-level grammar: `[section]` headers at level 1 with their
//! `key = value` (or `key : value`) pairs nested one level below. Keys
//! appearing before any header sit directly under the root. Comments
//! start with `;` or `#` and become comment nodes.
//!
//! The dialect has no native array syntax; PHP-style repeated keys
//! (`phpversion[] = "5.0"`) are recorded as repeated sibling keys with the
//! `[]` suffix stripped, so a lookup plus sibling iteration enumerates the
//! pseudo-array.
//!
//! ## Examples
//!
//! ```rust
//! use texttree::{ini, NodePointer};
//!
//! let (tree, errors) = ini::parse("[display]\nwidth = 800\nheight = 600\n");
//! assert!(errors.is_empty());
//! let display = NodePointer::new(&tree).find("display").unwrap();
//! assert_eq!(display.key_value("width"), Some("800"));
//! ```

use crate::error::ParseError;
use crate::node::NodeKind;
use crate::reader::{looks_like_number, TextReader};
use crate::tree::TextTree;
use crate::TreeParser;

/// Line-oriented single-pass parser producing a flat [`TextTree`].
pub struct IniParser<'a> {
    reader: TextReader<'a>,
    errors: Vec<ParseError>,
    in_section: bool,
    /// A `key = value` line yields two nodes; the value waits here so the
    /// pull model still appends exactly one node per call.
    pending_value: Option<(String, NodeKind, u32)>,
}

impl<'a> IniParser<'a> {
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        IniParser {
            reader: TextReader::new(text),
            errors: Vec::new(),
            in_section: false,
            pending_value: None,
        }
    }

    /// Consumes the parser, yielding the accumulated diagnostics.
    #[must_use]
    pub fn into_errors(self) -> Vec<ParseError> {
        self.errors
    }

    fn key_level(&self) -> u32 {
        if self.in_section {
            2
        } else {
            1
        }
    }

    /// Reads the remainder of the line as a value: double-quoted with
    /// escapes decoded, or raw text trimmed of surrounding whitespace.
    fn read_value(&mut self) -> (String, NodeKind) {
        self.reader.skip_spaces();
        if self.reader.current() == Some('"') {
            let start = self.reader.offset();
            self.reader.next_char();
            let mut text = String::new();
            loop {
                match self.reader.current() {
                    None | Some('\n') | Some('\r') => {
                        self.errors
                            .push(ParseError::new(start, "unterminated quoted value"));
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
            self.reader.skip_to_line_end();
            (text, NodeKind::String)
        } else {
            let start = self.reader.offset();
            self.reader.skip_to_line_end();
            let raw = self.reader.slice(start, self.reader.offset()).trim_end();
            let kind = if looks_like_number(raw) {
                NodeKind::Number
            } else {
                NodeKind::Text
            };
            (raw.to_string(), kind)
        }
    }

    /// Handles a `[section]` header line.
    fn read_section(&mut self, tree: &mut TextTree) -> bool {
        let start = self.reader.offset();
        self.reader.next_char(); // '['
        let name_start = self.reader.offset();
        while !matches!(self.reader.current(), None | Some(']' | '\n' | '\r')) {
            self.reader.next_char();
        }
        let name = self
            .reader
            .slice(name_start, self.reader.offset())
            .trim()
            .to_string();
        if self.reader.current() == Some(']') {
            self.reader.next_char();
        } else {
            self.errors
                .push(ParseError::new(start, "unterminated section header"));
        }
        self.reader.skip_to_line_end();
        // A new header resets the nesting back to level 1.
        tree.append(NodeKind::Section, &name, 1);
        self.in_section = true;
        true
    }

    /// Handles a `key = value` line, leaving the value pending.
    fn read_key(&mut self, tree: &mut TextTree) -> bool {
        let start = self.reader.offset();
        while !matches!(
            self.reader.current(),
            None | Some('=' | ':' | '\n' | '\r')
        ) {
            self.reader.next_char();
        }
        let mut name = self.reader.slice(start, self.reader.offset()).trim_end();
        // Array-like repeated keys share the bare name.
        name = name.strip_suffix("[]").map_or(name, str::trim_end);
        let name = name.to_string();
        let level = self.key_level();
        match self.reader.current() {
            Some('=' | ':') => {
                self.reader.next_char();
                let (value, kind) = self.read_value();
                self.pending_value = Some((value, kind, level + 1));
            }
            _ => {
                self.errors
                    .push(ParseError::new(start, "expected '=' after key name"));
            }
        }
        tree.append(NodeKind::Element, &name, level);
        true
    }

    /// Handles a `;` or `#` comment line.
    fn read_comment(&mut self, tree: &mut TextTree) -> bool {
        self.reader.next_char();
        let start = self.reader.offset();
        self.reader.skip_to_line_end();
        let text = self.reader.slice(start, self.reader.offset()).to_string();
        tree.append(NodeKind::Comment, &text, self.key_level());
        true
    }
}

impl<'a> TreeParser for IniParser<'a> {
    fn read_node(&mut self, tree: &mut TextTree) -> bool {
        if let Some((value, kind, level)) = self.pending_value.take() {
            tree.append(kind, &value, level);
            return true;
        }
        self.reader.skip_spaces_and_line_breaks();
        match self.reader.current() {
            None => false,
            Some(';' | '#') => self.read_comment(tree),
            Some('[') => self.read_section(tree),
            Some(_) => self.read_key(tree),
        }
    }

    fn errors(&self) -> &[ParseError] {
        &self.errors
    }
}

/// Parses INI `text` into a tree, returning it together with any
/// accumulated diagnostics.
#[must_use]
pub fn parse(text: &str) -> (TextTree, Vec<ParseError>) {
    let mut tree = TextTree::new();
    let mut parser = IniParser::new(text);
    parser.read_nodes(&mut tree);
    (tree, parser.into_errors())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::NodePointer;
    use crate::node::GenericKind;

    #[test]
    fn sections_and_keys() {
        let input = "\
global = yes

[display]
width = 800
height: 600

[fonts]
family = \"Segoe UI\"
";
        let (tree, errors) = parse(input);
        assert!(errors.is_empty());

        let root = NodePointer::new(&tree);
        assert_eq!(root.key_value("global"), Some("yes"));

        let display = root.find("display").unwrap();
        assert_eq!(display.node().kind, NodeKind::Section);
        assert_eq!(display.node().level, 1);
        assert_eq!(display.key_value("width"), Some("800"));
        assert_eq!(display.key_value("height"), Some("600"));

        let fonts = root.find("fonts").unwrap();
        assert_eq!(fonts.key_value("family"), Some("Segoe UI"));
    }

    #[test]
    fn quoted_values_decode_escapes() {
        let (tree, errors) = parse("[s]\npath = \"C:\\\\temp\\\\x\"\n");
        assert!(errors.is_empty());
        let s = NodePointer::new(&tree).find("s").unwrap();
        assert_eq!(s.key_value("path"), Some("C:\\temp\\x"));
    }

    #[test]
    fn repeated_array_keys_become_siblings() {
        let input = "[php]\nphpversion[] = \"5.0\"\nphpversion[] = \"5.1\"\n";
        let (tree, errors) = parse(input);
        assert!(errors.is_empty());
        let php = NodePointer::new(&tree).find("php").unwrap();
        let first = php.find("phpversion").unwrap();
        assert_eq!(first.single_subvalue(), Some("5.0"));
        let second = first.next_sibling().unwrap();
        assert_eq!(second.text(), "phpversion");
        assert_eq!(second.single_subvalue(), Some("5.1"));
    }

    #[test]
    fn comments_become_nodes() {
        let (tree, errors) = parse("; top note\n[s]\n# inner\nk = v\n");
        assert!(errors.is_empty());
        let comments: Vec<(&str, u32)> = tree
            .nodes()
            .iter()
            .enumerate()
            .filter(|(_, n)| n.generic() == GenericKind::Comment)
            .map(|(i, n)| (tree.node_text(i), n.level))
            .collect();
        assert_eq!(comments, [(" top note", 1), (" inner", 2)]);
    }

    #[test]
    fn malformed_lines_are_recovered() {
        let (tree, errors) = parse("[broken\nkey-no-separator\nok = 1\n");
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].message, "unterminated section header");
        assert_eq!(errors[1].message, "expected '=' after key name");
        let broken = NodePointer::new(&tree).find("broken").unwrap();
        assert_eq!(broken.key_value("ok"), Some("1"));
    }

    #[test]
    fn unterminated_quote_is_recovered() {
        let (tree, errors) = parse("[s]\nk = \"oops\nnext = 2\n");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "unterminated quoted value");
        let s = NodePointer::new(&tree).find("s").unwrap();
        assert_eq!(s.key_value("next"), Some("2"));
    }

    #[test]
    fn level_invariant_holds() {
        let (tree, _) = parse("a=1\n[s]\nb=2\n[t]\nc=3\n");
        for pair in tree.nodes().windows(2) {
            assert!(pair[1].level <= pair[0].level + 1);
        }
    }
}
