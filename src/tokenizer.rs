// This file is part of the crochess-notation library.
// Copyright (C) 2024 The crochess-notation developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.

//! Splitting notation into tokens.
//!
//! All separators are ASCII, so every position returned here lies on a
//! `char` boundary of the scanned text, even when the text contains
//! multi-byte characters.
//!
//! # Examples
//!
//! ```
//! use crochess_notation::tokenizer::{tokens, Separators};
//!
//! let words: Vec<_> = tokens("Nc3 ~Bd5 e4", Separators::all())
//!     .map(|token| (token.text, token.offset))
//!     .collect();
//! assert_eq!(words, [("Nc3", 0), ("Bd5", 5), ("e4", 9)]);
//! ```

use bitflags::bitflags;

/// Characters separating plies without linking them.
pub const WHITESPACE_CHARS: &[u8] = b" \t\n\r\x0b\x0c";

/// Characters of ply link glyphs.
pub const PUNCTUATION_CHARS: &[u8] = b"~|@;\"'";

bitflags! {
    /// A set of separator classes.
    #[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
    pub struct Separators: u8 {
        const WHITESPACE = 1;
        const PUNCTUATION = 2;
    }
}

/// Checks if `byte` belongs to any of the separator classes.
#[inline]
pub fn is_separator(byte: u8, separators: Separators) -> bool {
    (separators.contains(Separators::WHITESPACE) && WHITESPACE_CHARS.contains(&byte))
        || (separators.contains(Separators::PUNCTUATION) && PUNCTUATION_CHARS.contains(&byte))
}

/// Whether [`traverse`] moves over separators or over everything else.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Traverse {
    /// Advance while looking at separators.
    Skip,
    /// Advance until looking at a separator.
    StopAt,
}

/// Advances from `pos` over the run of bytes selected by `mode`. Returns
/// the first position after the run, which is never past `bytes.len()`.
pub fn traverse(bytes: &[u8], pos: usize, separators: Separators, mode: Traverse) -> usize {
    let skip = mode == Traverse::Skip;
    let mut pos = pos.min(bytes.len());
    while pos < bytes.len() && is_separator(bytes[pos], separators) == skip {
        pos += 1;
    }
    pos
}

#[inline]
pub fn skip(bytes: &[u8], pos: usize, separators: Separators) -> usize {
    traverse(bytes, pos, separators, Traverse::Skip)
}

#[inline]
pub fn stop_at(bytes: &[u8], pos: usize, separators: Separators) -> usize {
    traverse(bytes, pos, separators, Traverse::StopAt)
}

/// A run of non-separator characters.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Token<'a> {
    pub text: &'a str,
    /// Byte offset of the token in the scanned text.
    pub offset: usize,
}

impl Token<'_> {
    /// Byte offset just past the token.
    #[inline]
    pub fn end(&self) -> usize {
        self.offset + self.text.len()
    }
}

/// Cursor over a text.
#[derive(Clone, Debug)]
pub struct Tokenizer<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    pub fn new(text: &'a str) -> Tokenizer<'a> {
        Tokenizer { text, pos: 0 }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn text(&self) -> &'a str {
        self.text
    }

    #[inline]
    pub fn remaining(&self) -> &'a str {
        &self.text[self.pos..]
    }

    /// Skips separators, then returns the following run of other
    /// characters. Returns `None` once the text is exhausted.
    pub fn next_token(&mut self, separators: Separators) -> Option<Token<'a>> {
        let bytes = self.text.as_bytes();
        let start = skip(bytes, self.pos, separators);
        let end = stop_at(bytes, start, separators);
        self.pos = end;
        (start < end).then(|| Token {
            text: &self.text[start..end],
            offset: start,
        })
    }
}

/// Iterator over the tokens of a text, see [`tokens()`].
#[derive(Clone, Debug)]
pub struct Tokens<'a> {
    tokenizer: Tokenizer<'a>,
    separators: Separators,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        self.tokenizer.next_token(self.separators)
    }
}

/// Iterates over the runs of `text` between separators.
pub fn tokens(text: &str, separators: Separators) -> Tokens<'_> {
    Tokens {
        tokenizer: Tokenizer::new(text),
        separators,
    }
}

/// Strips all leading and trailing ASCII `chars` from `text`.
///
/// Non-ASCII bytes in `chars` never match, so multi-byte characters of
/// `text` are kept whole.
pub fn trim<'a>(text: &'a str, chars: &[u8]) -> &'a str {
    text.trim_matches(|ch: char| {
        u8::try_from(ch).is_ok_and(|b| b.is_ascii() && chars.contains(&b))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_separator() {
        assert!(is_separator(b' ', Separators::WHITESPACE));
        assert!(!is_separator(b'~', Separators::WHITESPACE));
        assert!(is_separator(b'~', Separators::PUNCTUATION));
        assert!(is_separator(b'\t', Separators::all()));
        assert!(!is_separator(b'a', Separators::all()));
        assert!(!is_separator(b' ', Separators::empty()));
    }

    #[test]
    fn test_traverse_stops_at_end() {
        let bytes = b"  ab";
        assert_eq!(skip(bytes, 0, Separators::WHITESPACE), 2);
        assert_eq!(stop_at(bytes, 2, Separators::WHITESPACE), 4);
        assert_eq!(skip(bytes, 4, Separators::WHITESPACE), 4);
        assert_eq!(stop_at(bytes, 99, Separators::WHITESPACE), 4);
        assert_eq!(skip(b"   ", 0, Separators::WHITESPACE), 3);
    }

    #[test]
    fn test_next_token() {
        let mut tokenizer = Tokenizer::new(" a1-b2 \t||c3 ");
        let first = tokenizer.next_token(Separators::all());
        assert_eq!(first, Some(Token { text: "a1-b2", offset: 1 }));
        assert_eq!(tokenizer.position(), 6);
        let second = tokenizer.next_token(Separators::all());
        assert_eq!(second.map(|t| (t.text, t.end())), Some(("c3", 12)));
        assert_eq!(tokenizer.next_token(Separators::all()), None);
        assert_eq!(tokenizer.next_token(Separators::all()), None);
        assert_eq!(tokenizer.position(), 13);
    }

    #[test]
    fn test_tokens_multibyte() {
        let words: Vec<&str> = tokens("é1 ü2", Separators::WHITESPACE)
            .map(|t| t.text)
            .collect();
        assert_eq!(words, ["é1", "ü2"]);
        assert_eq!(tokens("", Separators::all()).count(), 0);
    }

    #[test]
    fn test_trim() {
        assert_eq!(trim("  a1  ", WHITESPACE_CHARS), "a1");
        assert_eq!(trim("~~a1|", PUNCTUATION_CHARS), "a1");
        assert_eq!(trim("    ", WHITESPACE_CHARS), "");
        assert_eq!(trim("", WHITESPACE_CHARS), "");
        assert_eq!(trim("a b", WHITESPACE_CHARS), "a b");
    }

    #[test]
    fn test_trim_keeps_multibyte_chars() {
        // 'é' is 0xc3 0xa9, 'Ã' is U+00C3.
        assert_eq!(trim("éa1é", b"\xc3\xa9"), "éa1é");
        assert_eq!(trim("Ãa1", b"\xc3"), "Ãa1");
        assert_eq!(trim(" é ", b" "), "é");
    }
}
