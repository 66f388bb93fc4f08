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

use std::{error::Error, fmt, ops::Range, str::FromStr};

use tracing::{debug, trace};

use crate::{
    board::{Board, Chessboard},
    diagnostic::Diagnostics,
    ply::{parse_ply_at, Ply, PlyLink},
    step::Step,
    tokenizer::{is_separator, skip, stop_at, Separators},
    util::AppendAscii,
};

/// Longer notation is rejected with a [`Severity::Fatal`] diagnostic.
///
/// [`Severity::Fatal`]: crate::Severity::Fatal
pub const MAX_NOTATION_LEN: usize = 8192;

/// All plies of one turn.
///
/// # Examples
///
/// ```
/// use crochess_notation::{Move, PlyLink};
///
/// let m: Move = "Nc3-d5 ~b7-b6".parse()?;
/// assert_eq!(m.plies.len(), 2);
/// assert_eq!(m.plies[1].link, PlyLink::Cascading);
/// assert_eq!(m.to_string(), "Nc3-d5~b7-b6");
/// # Ok::<_, crochess_notation::ParseMoveError>(())
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct Move {
    /// The parsed text.
    pub notation: String,
    /// Plies in notation order.
    pub plies: Vec<Ply>,
    /// Spans of plies that could not be parsed.
    pub skipped: Vec<Range<usize>>,
}

impl Move {
    /// Checks if every ply of the notation was parsed.
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }

    /// All steps of all plies, in order.
    pub fn steps(&self) -> impl Iterator<Item = &Step> {
        self.plies.iter().flat_map(|ply| ply.steps.iter())
    }

    pub(crate) fn append_to<W: AppendAscii>(&self, f: &mut W) -> Result<(), W::Error> {
        for (i, ply) in self.plies.iter().enumerate() {
            // A move never starts with a link, even if its first ply was
            // skipped.
            if i > 0 {
                if ply.link == PlyLink::Ply {
                    f.append_ascii(' ')?;
                }
                f.append_str(ply.link.glyph())?;
            }
            ply.append_to(f)?;
        }
        Ok(())
    }
}

/// Writes the move in canonical notation. Skipped plies are left out, and
/// the first ply written is never linked.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.append_to(f)
    }
}

/// Error when parsing notation that does not fully describe a move.
#[derive(Clone, Debug)]
pub struct ParseMoveError {
    diagnostics: Diagnostics,
}

impl ParseMoveError {
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Diagnostics {
        self.diagnostics
    }
}

impl fmt::Display for ParseMoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid move notation")?;
        if let Some(error) = self.diagnostics.errors().next() {
            write!(f, ": {error}")?;
        }
        Ok(())
    }
}

impl Error for ParseMoveError {}

/// Parses against the default board: classical chess, light to move.
/// Warnings are accepted, errors are not.
impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Move, ParseMoveError> {
        let mut diagnostics = Diagnostics::new();
        match parse_move(s, &Chessboard::default(), &mut diagnostics) {
            Some(m) if !diagnostics.has_errors() => Ok(m),
            _ => Err(ParseMoveError { diagnostics }),
        }
    }
}

/// The notation of one ply within a move.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct PlyToken<'a> {
    /// `None` if the link glyphs before the ply are unknown.
    pub link: Option<PlyLink>,
    /// Byte offset of the link glyphs, or of the ply if there are none.
    pub link_offset: usize,
    pub text: &'a str,
    /// Byte offset of the ply.
    pub offset: usize,
}

impl PlyToken<'_> {
    pub fn span(&self) -> Range<usize> {
        self.offset..self.offset + self.text.len()
    }
}

/// Finds the next ply in `move_text`, starting at `cursor`, and advances
/// `cursor` past it.
///
/// Link glyphs that are unknown or not followed by a ply are reported as
/// errors. Returns `None` once no ply is left.
pub fn next_ply_str<'a>(
    move_text: &'a str,
    cursor: &mut usize,
    diagnostics: &mut Diagnostics,
) -> Option<PlyToken<'a>> {
    let bytes = move_text.as_bytes();
    let mut pos = *cursor;
    loop {
        let link_offset = skip(bytes, pos, Separators::WHITESPACE);
        let link_end = skip(bytes, link_offset, Separators::PUNCTUATION);
        pos = skip(bytes, link_end, Separators::WHITESPACE);

        if pos == bytes.len() || is_separator(bytes[pos], Separators::PUNCTUATION) {
            if link_offset < link_end {
                diagnostics.error(link_offset, "ply link without a ply");
            }
            if pos == bytes.len() {
                *cursor = pos;
                return None;
            }
            continue;
        }

        let glyph = &bytes[link_offset..link_end];
        let link = if glyph.is_empty() {
            Some(PlyLink::Ply)
        } else {
            let link = PlyLink::from_glyph(glyph);
            if link.is_none() {
                diagnostics.error(
                    link_offset,
                    format!("unknown ply link '{}'", &move_text[link_offset..link_end]),
                );
            }
            link
        };

        let end = stop_at(bytes, pos, Separators::all());
        *cursor = end;
        return Some(PlyToken {
            link,
            link_offset,
            text: &move_text[pos..end],
            offset: pos,
        });
    }
}

/// Cursor over the plies of a move, see [`next_ply_str()`].
#[derive(Clone, Debug)]
pub struct PlyTokens<'a> {
    text: &'a str,
    cursor: usize,
}

impl<'a> PlyTokens<'a> {
    pub fn new(text: &'a str) -> PlyTokens<'a> {
        PlyTokens { text, cursor: 0 }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn next_ply(&mut self, diagnostics: &mut Diagnostics) -> Option<PlyToken<'a>> {
        next_ply_str(self.text, &mut self.cursor, diagnostics)
    }
}

/// Parses the notation of a move.
///
/// A ply that fails to parse is skipped and recorded in
/// [`Move::skipped`], the remaining plies are still parsed. Returns `None`
/// if no ply could be parsed at all.
///
/// # Examples
///
/// ```
/// use crochess_notation::{parse_move, Chessboard, Diagnostics, Severity};
///
/// let mut diagnostics = Diagnostics::new();
/// let m = parse_move("A1-B2 ??? C3xD4", &Chessboard::default(), &mut diagnostics)
///     .expect("two plies parsed");
///
/// assert_eq!(m.plies.len(), 2);
/// assert_eq!(m.skipped, [6..9]);
/// assert!(!m.is_complete());
///
/// assert_eq!(diagnostics.len(), 1);
/// assert_eq!(diagnostics[0].severity(), Severity::Error);
/// assert_eq!(diagnostics[0].position(), 6);
/// ```
pub fn parse_move<B: Board + ?Sized>(
    move_text: &str,
    board: &B,
    diagnostics: &mut Diagnostics,
) -> Option<Move> {
    if move_text.len() > MAX_NOTATION_LEN {
        diagnostics.fatal(
            MAX_NOTATION_LEN,
            format!("notation longer than {MAX_NOTATION_LEN} bytes"),
        );
        return None;
    }

    let reported = diagnostics.len();
    let mut tokens = PlyTokens::new(move_text);
    let mut plies = Vec::new();
    let mut skipped = Vec::new();
    let mut first = true;

    while let Some(token) = tokens.next_ply(diagnostics) {
        trace!(ply = token.text, offset = token.offset, "ply token");

        let link = match token.link {
            Some(PlyLink::Ply) => Some(PlyLink::Ply),
            Some(link) if first => {
                diagnostics.error(
                    token.link_offset,
                    format!("first ply can not be linked with '{}'", link.glyph()),
                );
                None
            }
            link => link,
        };
        first = false;

        match link.and_then(|link| parse_ply_at(token.text, token.offset, link, board, diagnostics))
        {
            Some(ply) => plies.push(ply),
            None => {
                debug!(ply = token.text, offset = token.offset, "skipped ply");
                skipped.push(token.span());
            }
        }
    }

    if first && diagnostics.len() == reported {
        diagnostics.error(0, "no ply in notation");
    }
    if plies.is_empty() {
        debug!(notation = move_text, "no ply parsed");
        return None;
    }

    debug!(
        notation = move_text,
        plies = plies.len(),
        skipped = skipped.len(),
        "parsed move"
    );
    Some(Move {
        notation: move_text.to_owned(),
        plies,
        skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        color::Color,
        diagnostic::Severity,
        square::Square,
        step::{SideEffectKind, StepLink},
        variant::Variant,
    };

    fn tokens(text: &str) -> (Vec<(Option<PlyLink>, &str, usize)>, Diagnostics) {
        let mut diagnostics = Diagnostics::new();
        let mut cursor = 0;
        let mut found = Vec::new();
        while let Some(token) = next_ply_str(text, &mut cursor, &mut diagnostics) {
            found.push((token.link, token.text, token.offset));
        }
        assert_eq!(cursor, text.len());
        (found, diagnostics)
    }

    #[test]
    fn test_next_ply_str() {
        let (found, diagnostics) = tokens(" Nc3-d5 ~b7-b6||Ba1 @@ c2 ");
        assert!(diagnostics.is_empty());
        assert_eq!(found, [
            (Some(PlyLink::Ply), "Nc3-d5", 1),
            (Some(PlyLink::Cascading), "b7-b6", 9),
            (Some(PlyLink::TeleportationReemergence), "Ba1", 16),
            (Some(PlyLink::DualTranceJourney), "c2", 23),
        ]);
    }

    #[test]
    fn test_next_ply_str_errors() {
        let (found, diagnostics) = tokens("a1 ~|b2");
        assert_eq!(found, [(Some(PlyLink::Ply), "a1", 0), (None, "b2", 5)]);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].position(), 3);

        let (found, diagnostics) = tokens("a1 ~ ~b2 @");
        assert_eq!(found, [(Some(PlyLink::Ply), "a1", 0), (Some(PlyLink::Cascading), "b2", 6)]);
        let positions: Vec<usize> = diagnostics.iter().map(|d| d.position()).collect();
        assert_eq!(positions, [3, 9]);

        let (found, diagnostics) = tokens("");
        assert!(found.is_empty());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_cursor_advances() {
        let text = "a1 b2";
        let mut diagnostics = Diagnostics::new();
        let mut plies = PlyTokens::new(text);
        assert_eq!(plies.next_ply(&mut diagnostics).map(|t| t.text), Some("a1"));
        assert_eq!(plies.position(), 2);
        assert_eq!(plies.next_ply(&mut diagnostics).map(|t| t.text), Some("b2"));
        assert_eq!(plies.next_ply(&mut diagnostics), None);
        assert_eq!(plies.position(), 5);
    }

    #[test]
    fn test_malformed_ply_among_valid() {
        let mut diagnostics = Diagnostics::new();
        let m = parse_move("A1-B2 ??? C3xD4", &Chessboard::default(), &mut diagnostics)
            .expect("valid plies");
        assert_eq!(m.plies.len(), 2);
        assert_eq!(m.plies[1].span, 10..15);
        assert_eq!(m.skipped, [6..9]);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity(), Severity::Error);
        assert_eq!(diagnostics[0].position(), 6);
        assert_eq!(m.to_string(), "a1-b2 c3xd4");
    }

    #[test]
    fn test_capture_move() {
        let m: Move = "E5xF6".parse().expect("valid move");
        let last = m.steps().last().expect("steps");
        assert_eq!(last.side_effect.kind(), SideEffectKind::Capture);
        assert_eq!(last.square, "f6".parse::<Square>().expect("valid square"));
        assert_eq!(last.link, StepLink::Destination);
    }

    #[test]
    fn test_castling_move() {
        let m: Move = "O-O".parse().expect("valid move");
        let castles: Vec<&Step> = m
            .steps()
            .filter(|step| step.side_effect.kind() == SideEffectKind::Castle)
            .collect();
        assert_eq!(castles.len(), 1);
        assert_eq!(m.to_string(), "O-O");
    }

    #[test]
    fn test_first_ply_linked() {
        let mut diagnostics = Diagnostics::new();
        let m = parse_move("~a1 b2", &Chessboard::default(), &mut diagnostics)
            .expect("second ply parsed");
        assert_eq!(m.plies.len(), 1);
        assert_eq!(m.plies[0].link, PlyLink::Ply);
        assert_eq!(m.skipped, [1..3]);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].position(), 0);
    }

    #[test]
    fn test_display_after_skipped_first_ply() {
        let board = Chessboard::default();
        let mut diagnostics = Diagnostics::new();
        let m = parse_move("?? ~a1 @b2", &board, &mut diagnostics).expect("later plies parsed");
        assert_eq!(m.skipped, [0..2]);
        assert_eq!(m.plies[0].link, PlyLink::Cascading);
        assert_eq!(m.to_string(), "a1@b2");

        let mut diagnostics = Diagnostics::new();
        let reparsed = parse_move(&m.to_string(), &board, &mut diagnostics).expect("reparsed");
        assert!(diagnostics.is_empty(), "{diagnostics}");
        assert!(reparsed.is_complete());
        assert_eq!(reparsed.plies.len(), 2);
        assert_eq!(reparsed.plies[0].steps, m.plies[0].steps);
        assert_eq!(reparsed.to_string(), "a1@b2");
    }

    #[test]
    fn test_empty_and_short() {
        for text in ["", " ", "a", "~", "?", "\n"] {
            let mut diagnostics = Diagnostics::new();
            assert_eq!(parse_move(text, &Chessboard::default(), &mut diagnostics), None);
            assert!(diagnostics.has_errors(), "{text:?}");
            assert!(diagnostics.iter().all(|d| d.position() <= text.len()), "{text:?}");
        }
    }

    #[test]
    fn test_too_long() {
        let text = "a1 ".repeat(MAX_NOTATION_LEN);
        let mut diagnostics = Diagnostics::new();
        assert_eq!(parse_move(&text, &Chessboard::default(), &mut diagnostics), None);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity(), Severity::Fatal);
        assert!(diagnostics[0].position() <= text.len());
    }

    #[test]
    fn test_warnings_are_accepted() {
        let board = Chessboard::new(Variant::ClassicalChess, Color::Dark);
        let mut diagnostics = Diagnostics::new();
        let m = parse_move("Nb8-i6", &board, &mut diagnostics).expect("still parsed");
        assert!(m.is_complete());
        assert_eq!(diagnostics.max_severity(), Some(Severity::Warning));

        assert!("Nb1-i3".parse::<Move>().is_ok());
        let err = "Nb1-i3 ?".parse::<Move>().expect_err("error recorded");
        assert_eq!(err.diagnostics().len(), 2);
        assert!(err.to_string().starts_with("invalid move notation: error at 7"));
    }
}
