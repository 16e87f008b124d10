//! Shared tokenizer primitives.
//!
//! Both dialect parsers scan with the same [`TextReader`]: a forward-only
//! cursor over a `&str` with single-character pushback and offset
//! save/restore for the two-token lookahead the Jsonex grammar needs.
//! The C-style escape codec also lives here, since quoted strings decode
//! the same way in every dialect.
//!
//! Escape handling is deliberately lenient: an unrecognized escape decodes
//! to a literal `?` rather than producing an error, and a lone UTF-16
//! surrogate escape degrades the same way. Tightening either would reject
//! previously-tolerated documents.
//!
//! ## Examples
//!
//! ```rust
//! use texttree::reader::{decode_escapes, escape_universal};
//!
//! assert_eq!(decode_escapes(r"a\tb"), "a\tb");
//! assert_eq!(decode_escapes(r"\uD83D\uDE00"), "\u{1F600}"); // surrogate pair
//! assert_eq!(decode_escapes(r"\q"), "?"); // leniency, not an error
//!
//! let encoded = escape_universal("A\u{1F600}");
//! assert_eq!(decode_escapes(&encoded), "A\u{1F600}");
//! ```

/// A forward-only character cursor with one-step pushback.
///
/// Positions are byte offsets into the source, suitable for recording in
/// diagnostics and for `seek`-based lookahead.
#[derive(Clone, Debug)]
pub struct TextReader<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> TextReader<'a> {
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        TextReader { text, pos: 0 }
    }

    /// Current byte offset into the source.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// Repositions the cursor; `offset` must lie on a character boundary
    /// previously returned by [`TextReader::offset`].
    pub fn seek(&mut self, offset: usize) {
        debug_assert!(self.text.is_char_boundary(offset));
        self.pos = offset;
    }

    #[must_use]
    pub fn at_end(&self) -> bool {
        self.pos >= self.text.len()
    }

    /// The character at the cursor, without consuming it.
    #[must_use]
    pub fn current(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    /// The character one past the cursor.
    #[must_use]
    pub fn peek(&self) -> Option<char> {
        self.peek_at(1)
    }

    /// The character `n` positions past the cursor.
    #[must_use]
    pub fn peek_at(&self, n: usize) -> Option<char> {
        self.text[self.pos..].chars().nth(n)
    }

    /// Consumes and returns the character at the cursor.
    pub fn next_char(&mut self) -> Option<char> {
        let ch = self.current()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    /// Steps back one character. Used for lookahead disambiguation where a
    /// token turns out to belong to the next production.
    pub fn back(&mut self) {
        while self.pos > 0 {
            self.pos -= 1;
            if self.text.is_char_boundary(self.pos) {
                break;
            }
        }
    }

    /// Skips spaces and tabs, staying on the current line.
    pub fn skip_spaces(&mut self) {
        while let Some(ch) = self.current() {
            if ch == ' ' || ch == '\t' {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    /// Skips all whitespace including line breaks.
    pub fn skip_spaces_and_line_breaks(&mut self) {
        while let Some(ch) = self.current() {
            if ch.is_whitespace() {
                self.pos += ch.len_utf8();
            } else {
                break;
            }
        }
    }

    /// Skips to the end of the current line, leaving the cursor on the
    /// line break (or at end of input).
    pub fn skip_to_line_end(&mut self) {
        while let Some(ch) = self.current() {
            if ch == '\n' || ch == '\r' {
                break;
            }
            self.pos += ch.len_utf8();
        }
    }

    /// Borrows the source slice between two offsets.
    #[must_use]
    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.text[start..end]
    }

    /// Decodes one escape sequence into `out`. The cursor must sit on the
    /// backslash; on return it sits past the sequence. Unrecognized
    /// escapes append a literal `?`.
    pub fn decode_escape(&mut self, out: &mut String) {
        debug_assert_eq!(self.current(), Some('\\'));
        self.pos += 1; // backslash
        let Some(ch) = self.next_char() else {
            out.push('?'); // trailing backslash at end of input
            return;
        };
        match ch {
            'r' => out.push('\r'),
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'b' => out.push('\u{0008}'),
            'f' => out.push('\u{000C}'),
            '0' => out.push('\0'),
            '"' => out.push('"'),
            '\'' => out.push('\''),
            '\\' => out.push('\\'),
            '/' => out.push('/'),
            'x' => {
                let value = self.read_hex(2);
                push_scalar(out, value);
            }
            'u' => {
                let value = self.read_hex(4);
                if (0xD800..0xDC00).contains(&value) {
                    // High surrogate: recombine with a following \u low
                    // surrogate into one scalar value.
                    let mark = self.pos;
                    if self.current() == Some('\\') && self.peek() == Some('u') {
                        self.pos += 2;
                        let low = self.read_hex(4);
                        if (0xDC00..0xE000).contains(&low) {
                            let scalar =
                                0x10000 + ((value - 0xD800) << 10) + (low - 0xDC00);
                            push_scalar(out, scalar);
                            return;
                        }
                        self.seek(mark);
                    }
                    out.push('?'); // lone high surrogate
                } else {
                    push_scalar(out, value);
                }
            }
            'U' => {
                let value = self.read_hex(8);
                push_scalar(out, value);
            }
            '1'..='9' => {
                // Bare decimal escape, up to three digits total.
                let mut value = ch as u32 - '0' as u32;
                for _ in 0..2 {
                    match self.current() {
                        Some(d @ '0'..='9') => {
                            value = value * 10 + (d as u32 - '0' as u32);
                            self.pos += 1;
                        }
                        _ => break,
                    }
                }
                push_scalar(out, value);
            }
            _ => out.push('?'),
        }
    }

    /// Reads up to `max` hex digits, returning their value.
    fn read_hex(&mut self, max: usize) -> u32 {
        let mut value = 0u32;
        for _ in 0..max {
            match self.current().and_then(|c| c.to_digit(16)) {
                Some(digit) => {
                    value = value * 16 + digit;
                    self.pos += 1;
                }
                None => break,
            }
        }
        value
    }
}

fn push_scalar(out: &mut String, value: u32) {
    match char::from_u32(value) {
        Some(ch) => out.push(ch),
        None => out.push('?'),
    }
}

/// Returns `true` for characters allowed in an unquoted word.
///
/// Everything else is either structure (`{}[]():,"/` and whitespace) or an
/// invalid word character the parsers skip with a diagnostic.
#[must_use]
pub fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || matches!(ch, '_' | '-' | '+' | '.' | '%' | '@')
}

/// Returns `true` if an unquoted word reads as a number.
///
/// Only digit-led runs qualify (after an optional sign or leading dot),
/// so words like `inf` and `NaN` stay identifiers even though they parse
/// as `f64`.
#[must_use]
pub fn looks_like_number(word: &str) -> bool {
    if let Some(hex) = word.strip_prefix("0x") {
        return !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit());
    }
    let digits = word.strip_prefix(['-', '+']).unwrap_or(word);
    digits.starts_with(|c: char| c.is_ascii_digit() || c == '.') && word.parse::<f64>().is_ok()
}

/// Decodes every escape sequence in `text` into a fresh string.
///
/// Convenience over [`TextReader::decode_escape`] for whole-string use.
#[must_use]
pub fn decode_escapes(text: &str) -> String {
    let mut reader = TextReader::new(text);
    let mut out = String::with_capacity(text.len());
    while let Some(ch) = reader.current() {
        if ch == '\\' {
            reader.decode_escape(&mut out);
        } else {
            out.push(ch);
            reader.next_char();
        }
    }
    out
}

/// Encodes `text` using C++-style universal character names: printable
/// ASCII passes through, everything else becomes `\uNNNN` (or `\UNNNNNNNN`
/// above the Basic Multilingual Plane). Decoding the result yields the
/// original scalar sequence exactly.
#[must_use]
pub fn escape_universal(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            ' '..='~' => out.push(ch),
            _ if (ch as u32) <= 0xFFFF => {
                out.push_str(&format!("\\u{:04X}", ch as u32));
            }
            _ => {
                out.push_str(&format!("\\U{:08X}", ch as u32));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_cursor_movement() {
        let mut r = TextReader::new("ab");
        assert_eq!(r.current(), Some('a'));
        assert_eq!(r.peek(), Some('b'));
        assert_eq!(r.next_char(), Some('a'));
        r.back();
        assert_eq!(r.current(), Some('a'));
        assert_eq!(r.next_char(), Some('a'));
        assert_eq!(r.next_char(), Some('b'));
        assert!(r.at_end());
        assert_eq!(r.next_char(), None);
    }

    #[test]
    fn pushback_over_multibyte() {
        let mut r = TextReader::new("é!");
        assert_eq!(r.next_char(), Some('é'));
        r.back();
        assert_eq!(r.current(), Some('é'));
    }

    #[test]
    fn simple_escapes() {
        assert_eq!(decode_escapes(r"\r\n\t\b\f\0"), "\r\n\t\u{8}\u{c}\0");
        assert_eq!(decode_escapes(r#"\"\\\'"#), "\"\\'");
    }

    #[test]
    fn hex_and_decimal_escapes() {
        assert_eq!(decode_escapes(r"\x41"), "A");
        assert_eq!(decode_escapes("\\u0041"), "A");
        assert_eq!(decode_escapes(r"\U0001F600"), "\u{1F600}");
        assert_eq!(decode_escapes(r"\65"), "A");
        assert_eq!(decode_escapes(r"\659"), "\u{293}");
    }

    #[test]
    fn surrogate_pair_recombines() {
        assert_eq!(decode_escapes(r"\uD83D\uDE00"), "\u{1F600}");
        assert_eq!(decode_escapes(r"x\uD83D\uDE00y"), "x\u{1F600}y");
    }

    #[test]
    fn lone_surrogate_degrades_to_question_mark() {
        assert_eq!(decode_escapes(r"\uD83Dx"), "?x");
        assert_eq!(decode_escapes(r"\uDE00"), "?");
    }

    #[test]
    fn unknown_escape_degrades_to_question_mark() {
        assert_eq!(decode_escapes(r"\q"), "?");
        assert_eq!(decode_escapes("tail\\"), "tail?");
    }

    #[test]
    fn escape_then_decode_is_identity() {
        let original = "A\u{0041} \"quoted\"\n\u{1F600}\u{0293}";
        assert_eq!(decode_escapes(&escape_universal(original)), original);
    }

    #[test]
    fn word_classification() {
        assert!(is_word_char('a'));
        assert!(is_word_char('_'));
        assert!(is_word_char('-'));
        assert!(!is_word_char('{'));
        assert!(!is_word_char(':'));
        assert!(!is_word_char(' '));

        assert!(looks_like_number("12"));
        assert!(looks_like_number("-1.5e3"));
        assert!(looks_like_number(".5"));
        assert!(looks_like_number("0x1F"));
        assert!(!looks_like_number("12px"));
        assert!(!looks_like_number("abc"));
        assert!(!looks_like_number(""));
        // f64-parseable words that are not digit-led stay identifiers.
        assert!(!looks_like_number("inf"));
        assert!(!looks_like_number("-inf"));
        assert!(!looks_like_number("NaN"));
    }
}
