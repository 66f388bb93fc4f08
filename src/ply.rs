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

//! Parse a single ply.
//!
//! A ply names the moving piece (pawns are not named), the square it
//! starts from and every further square it visits. Each further square is
//! introduced by a separator, which is a step link (`.` next, `..`
//! distant, `-` destination), a side effect glyph, or both:
//!
//! | glyph | side effect |
//! | --- | --- |
//! | `x`, `X`, `*` | capture |
//! | `<` | displacement, followed by the destination of the displaced piece |
//! | `:` | en passant, optionally followed by the square of the captured pawn |
//! | `&` | castling, optionally followed by the rook destination |
//! | `%`, `%%` | conversion, failed conversion |
//! | `>` | demotion |
//! | `$`, `$$` | resurrection, failed resurrection |
//!
//! A step may end with `=` and a piece letter (promotion), a lone `=` (tag
//! for promotion) or `==` (the affected piece loses its tag for
//! promotion).
//!
//! # Examples
//!
//! ```
//! use crochess_notation::{
//!     parse_ply, Chessboard, Diagnostics, Role, SideEffect, Square, StepLink,
//! };
//!
//! let mut diagnostics = Diagnostics::new();
//! let ply = parse_ply("Nc3.d5xe7", &Chessboard::default(), &mut diagnostics)
//!     .expect("valid ply");
//!
//! assert!(diagnostics.is_empty());
//! assert_eq!(ply.piece.role, Role::Knight);
//! assert_eq!(ply.steps.len(), 3);
//! assert_eq!(ply.steps[1].link, StepLink::Next);
//!
//! let last = ply.steps[2];
//! assert_eq!(last.link, StepLink::Destination);
//! assert_eq!(last.square, "e7".parse::<Square>()?);
//! assert_eq!(last.side_effect, SideEffect::capture(None, false));
//! # Ok::<_, crochess_notation::ParseSquareError>(())
//! ```

use std::{fmt, ops::Range};

use crate::{
    board::Board,
    castling_side::CastlingSide,
    color::Color,
    diagnostic::Diagnostics,
    role::Role,
    square::{File, Rank, Square},
    step::{
        castling_rook_side, default_castling_rook_square, default_en_passant_square, SideEffect,
        SideEffectKind, Step, StepLink,
    },
    types::Piece,
    util::AppendAscii,
    variant::KINGS_MIN_CASTLING_DISTANCE,
};

/// Why a ply is activated.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum PlyLink {
    /// Played directly, separated by whitespace or first in a move.
    Ply,
    /// Activated by the piece of the previous ply, `~`.
    Cascading,
    /// Teleported through a portal, `|`.
    Teleportation,
    /// A teleported piece re-emerges, `||`.
    TeleportationReemergence,
    /// A teleported piece is oblated, `|||`.
    TeleportationOblation,
    /// `@`
    TranceJourney,
    /// `@@`
    DualTranceJourney,
    /// `@@@`
    FailedTranceJourney,
    /// `;;`
    PawnSacrifice,
    /// `"`
    SenseJourney,
    /// `'`
    FailedSenseJourney,
}

impl PlyLink {
    pub const fn glyph(self) -> &'static str {
        match self {
            PlyLink::Ply => "",
            PlyLink::Cascading => "~",
            PlyLink::Teleportation => "|",
            PlyLink::TeleportationReemergence => "||",
            PlyLink::TeleportationOblation => "|||",
            PlyLink::TranceJourney => "@",
            PlyLink::DualTranceJourney => "@@",
            PlyLink::FailedTranceJourney => "@@@",
            PlyLink::PawnSacrifice => ";;",
            PlyLink::SenseJourney => "\"",
            PlyLink::FailedSenseJourney => "'",
        }
    }

    /// Gets the link written as `glyph`. Whitespace is not a glyph, so
    /// [`PlyLink::Ply`] is never returned.
    pub fn from_glyph(glyph: &[u8]) -> Option<PlyLink> {
        Some(match glyph {
            b"~" => PlyLink::Cascading,
            b"|" => PlyLink::Teleportation,
            b"||" => PlyLink::TeleportationReemergence,
            b"|||" => PlyLink::TeleportationOblation,
            b"@" => PlyLink::TranceJourney,
            b"@@" => PlyLink::DualTranceJourney,
            b"@@@" => PlyLink::FailedTranceJourney,
            b";;" => PlyLink::PawnSacrifice,
            b"\"" => PlyLink::SenseJourney,
            b"'" => PlyLink::FailedSenseJourney,
            _ => return None,
        })
    }
}

/// The path of one piece during a move.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct Ply {
    pub link: PlyLink,
    pub piece: Piece,
    /// Never empty. The first step, and only the first, is linked with
    /// [`StepLink::Start`].
    pub steps: Vec<Step>,
    /// Byte range of the ply in the parsed text.
    pub span: Range<usize>,
    /// Set if the ply was written as `O-O` or `O-O-O`.
    pub castling: Option<CastlingSide>,
}

impl Ply {
    pub fn start(&self) -> Option<&Step> {
        self.steps.first()
    }

    pub fn destination(&self) -> Option<&Step> {
        self.steps.last()
    }

    /// Iterates over the steps with a side effect.
    pub fn side_effects(&self) -> impl Iterator<Item = &Step> {
        self.steps.iter().filter(|step| !step.side_effect.is_none())
    }

    pub(crate) fn append_to<W: AppendAscii>(&self, f: &mut W) -> Result<(), W::Error> {
        if let Some(side) = self.castling {
            return f.append_str(match side {
                CastlingSide::KingSide => "O-O",
                CastlingSide::QueenSide => "O-O-O",
            });
        }

        if self.piece.role != Role::Pawn {
            f.append_ascii(self.piece.char())?;
        }
        let mut prev = None;
        for (i, step) in self.steps.iter().enumerate() {
            step.append_to(f, prev, i + 1 == self.steps.len())?;
            prev = Some(step.square);
        }
        Ok(())
    }
}

/// Writes the ply in canonical notation, without its link.
impl fmt::Display for Ply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.append_to(f)
    }
}

/// Parses the notation of a single ply.
///
/// Structural problems are reported as [`Severity::Error`] and abandon the
/// ply, returning `None`. Squares and castlings the `board` does not
/// consider plausible are reported as [`Severity::Warning`], and the ply
/// is still returned.
///
/// [`Severity::Error`]: crate::Severity::Error
/// [`Severity::Warning`]: crate::Severity::Warning
pub fn parse_ply<B: Board + ?Sized>(
    text: &str,
    board: &B,
    diagnostics: &mut Diagnostics,
) -> Option<Ply> {
    parse_ply_at(text, 0, PlyLink::Ply, board, diagnostics)
}

/// Parses a ply found at `offset` of a larger text. Positions of
/// diagnostics are relative to the larger text.
pub(crate) fn parse_ply_at<B: Board + ?Sized>(
    text: &str,
    offset: usize,
    link: PlyLink,
    board: &B,
    diagnostics: &mut Diagnostics,
) -> Option<Ply> {
    let mut parser = PlyParser::new(text.as_bytes(), offset, board, diagnostics);
    parser.run()?;
    Some(Ply {
        link,
        piece: parser.piece,
        steps: parser.steps,
        span: offset..offset + text.len(),
        castling: parser.castling,
    })
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum State {
    ExpectPiece,
    ExpectSquare,
    ExpectSeparator,
    Done,
}

#[derive(Copy, Clone, Debug)]
struct Separator {
    link: Option<StepLink>,
    kind: SideEffectKind,
    pos: usize,
}

struct PlyParser<'a, B: ?Sized> {
    bytes: &'a [u8],
    pos: usize,
    offset: usize,
    board: &'a B,
    diagnostics: &'a mut Diagnostics,
    turn: Color,
    piece: Piece,
    castling: Option<CastlingSide>,
    steps: Vec<Step>,
    pending: Option<Separator>,
    last: Option<Separator>,
}

impl<'a, B: Board + ?Sized> PlyParser<'a, B> {
    fn new(
        bytes: &'a [u8],
        offset: usize,
        board: &'a B,
        diagnostics: &'a mut Diagnostics,
    ) -> PlyParser<'a, B> {
        let turn = board.turn();
        PlyParser {
            bytes,
            pos: 0,
            offset,
            board,
            diagnostics,
            turn,
            piece: Role::Pawn.of(turn),
            castling: None,
            steps: Vec::new(),
            pending: None,
            last: None,
        }
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    #[inline]
    fn peek_at(&self, ahead: usize) -> Option<u8> {
        self.bytes.get(self.pos + ahead).copied()
    }

    #[inline]
    fn bump(&mut self) {
        self.pos += 1;
    }

    #[inline]
    fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn fail<T>(&mut self, pos: usize, message: impl Into<Box<str>>) -> Option<T> {
        self.diagnostics.error(self.offset + pos, message);
        None
    }

    fn unexpected<T>(&mut self, pos: usize, expected: &str) -> Option<T> {
        let message = match self.bytes.get(pos) {
            None => format!("unexpected end of ply, expected {expected}"),
            Some(byte) if !byte.is_ascii() => {
                format!("unexpected non-ascii character, expected {expected}")
            }
            Some(&byte) => format!("unexpected '{}', expected {expected}", char::from(byte)),
        };
        self.fail(pos, message)
    }

    fn warn(&mut self, pos: usize, message: impl Into<Box<str>>) {
        self.diagnostics.warning(self.offset + pos, message);
    }

    /// An uppercase piece letter directly followed by a letter. Otherwise
    /// the letter is the file of a square.
    fn at_piece(&self) -> bool {
        matches!(
            (self.peek(), self.peek_at(1)),
            (Some(ch), Some(next)) if ch.is_ascii_uppercase() && next.is_ascii_alphabetic()
        )
    }

    fn at_square(&self) -> bool {
        matches!(
            (self.peek(), self.peek_at(1)),
            (Some(ch), Some(next)) if ch.is_ascii_alphabetic() && next.is_ascii_digit()
        )
    }

    fn run(&mut self) -> Option<()> {
        let mut state = State::ExpectPiece;
        while state != State::Done {
            state = match state {
                State::ExpectPiece => self.read_piece()?,
                State::ExpectSquare => self.read_step()?,
                State::ExpectSeparator => self.read_separator()?,
                State::Done => State::Done,
            };
        }

        if let Some(Separator { link: None, .. }) = self.last {
            if let Some(step) = self.steps.last_mut() {
                step.link = StepLink::implied(true);
            }
        }
        Some(())
    }

    fn read_piece(&mut self) -> Option<State> {
        match (self.peek(), self.peek_at(1)) {
            (None, _) => self.fail(0, "empty ply"),
            (Some(b'O' | b'o' | b'0'), Some(b'-')) => self.read_castling(),
            _ if self.at_piece() => {
                let role = self.read_role()?;
                self.piece = role.of(self.turn);
                Some(State::ExpectSquare)
            }
            _ => Some(State::ExpectSquare),
        }
    }

    fn read_role(&mut self) -> Option<Role> {
        let pos = self.pos;
        let ch = char::from(self.peek()?);
        match Role::from_char(ch) {
            Some(role) => {
                self.bump();
                Some(role)
            }
            None => self.fail(pos, format!("unknown piece '{ch}'")),
        }
    }

    fn read_square(&mut self) -> Option<Square> {
        let start = self.pos;
        let Some(file) = self
            .peek()
            .filter(u8::is_ascii_alphabetic)
            .and_then(|ch| File::from_char(char::from(ch)))
        else {
            return self.unexpected(start, "square");
        };
        self.bump();

        let digits_start = self.pos;
        while self.peek().is_some_and(|ch| ch.is_ascii_digit()) {
            self.bump();
        }
        let digits = &self.bytes[digits_start..self.pos];
        if digits.is_empty() {
            return self.unexpected(digits_start, "rank");
        }
        if digits.len() > 2 {
            return self.fail(digits_start, "rank has more than two digits");
        }
        let Some(rank) = Rank::from_ascii(digits) else {
            return self.fail(digits_start, "rank out of range");
        };

        let sq = Square::from_coords(file, rank);
        if !self.board.is_on_board(sq) {
            self.warn(start, format!("square {sq} is off the board"));
        }
        Some(sq)
    }

    fn read_separator(&mut self) -> Option<State> {
        let start = self.pos;
        if self.peek().is_none() {
            return Some(State::Done);
        }

        if let Some(Separator {
            link: Some(StepLink::Destination),
            pos,
            ..
        }) = self.last
        {
            return self.fail(pos, "destination must be the last step");
        }

        let link = match self.peek() {
            Some(b'.') => {
                self.bump();
                Some(if self.eat(b'.') {
                    StepLink::Distant
                } else {
                    StepLink::Next
                })
            }
            Some(b'-') => {
                self.bump();
                Some(StepLink::Destination)
            }
            _ => None,
        };

        let kind = match self.peek() {
            // After a link, x followed by a rank is a square on file x.
            Some(b'x' | b'X')
                if link.is_some() && self.peek_at(1).is_some_and(|ch| ch.is_ascii_digit()) =>
            {
                SideEffectKind::None
            }
            Some(b'x' | b'X' | b'*') => SideEffectKind::Capture,
            Some(b'<') => SideEffectKind::Displacement,
            Some(b':') => SideEffectKind::EnPassant,
            Some(b'&') => SideEffectKind::Castle,
            Some(b'%') => SideEffectKind::Conversion,
            Some(b'>') => SideEffectKind::Demotion,
            Some(b'$') => SideEffectKind::Resurrection,
            _ => SideEffectKind::None,
        };
        let kind = if kind == SideEffectKind::None {
            if link.is_none() {
                return self.unexpected(start, "step");
            }
            kind
        } else {
            self.bump();
            match kind {
                SideEffectKind::Conversion if self.eat(b'%') => SideEffectKind::FailedConversion,
                SideEffectKind::Resurrection if self.eat(b'$') => {
                    SideEffectKind::FailedResurrection
                }
                _ => kind,
            }
        };

        self.pending = Some(Separator {
            link,
            kind,
            pos: start,
        });
        Some(State::ExpectSquare)
    }

    fn read_step(&mut self) -> Option<State> {
        let Some(separator) = self.pending.take() else {
            let sq = self.read_square()?;
            if self.peek() == Some(b'=') {
                return self.fail(self.pos, "no promotion on the start square");
            }
            self.steps.push(Step::start(sq));
            return Some(State::ExpectSeparator);
        };
        let kind = separator.kind;

        let piece_pos = self.pos;
        let piece = if self.at_piece() {
            if !kind.allows_piece() {
                return self.unexpected(piece_pos, "square");
            }
            let role = self.read_role()?;
            Some(role.of(if kind == SideEffectKind::Resurrection {
                self.turn
            } else {
                !self.turn
            }))
        } else {
            None
        };

        let sq = self.read_square()?;
        let extra = if kind.allows_destination() && self.at_square() {
            Some(self.read_square()?)
        } else {
            None
        };

        let suffix_pos = self.pos;
        let mut lost_promotion_tag = false;
        let mut promotion = None;
        if self.eat(b'=') {
            if self.eat(b'=') {
                if !kind.allows_lost_promotion_tag() {
                    return self.fail(
                        suffix_pos,
                        "only captured, displaced or converted pieces lose their promotion tag",
                    );
                }
                lost_promotion_tag = true;
            } else if kind != SideEffectKind::None {
                return self.fail(suffix_pos, "promotion on a step with another side effect");
            } else if self.peek().is_some_and(|ch| ch.is_ascii_uppercase()) {
                let role = self.read_role()?;
                promotion = Some(SideEffect::promotion(role.of(self.turn)));
            } else {
                promotion = Some(SideEffect::tag_for_promotion());
            }
        }

        let prev = self.steps.last().map_or(sq, |step| step.square);
        let side_effect = match kind {
            SideEffectKind::None | SideEffectKind::Promotion | SideEffectKind::TagForPromotion => {
                promotion.unwrap_or(SideEffect::None)
            }
            SideEffectKind::Capture => SideEffect::capture(piece, lost_promotion_tag),
            SideEffectKind::Displacement => match extra {
                Some(to) => SideEffect::displacement(piece, lost_promotion_tag, to),
                None => {
                    return self.unexpected(suffix_pos, "destination of the displaced piece")
                }
            },
            SideEffectKind::EnPassant => {
                SideEffect::en_passant(extra.unwrap_or_else(|| default_en_passant_square(prev, sq)))
            }
            SideEffectKind::Castle => self.castle(prev, sq, extra, separator.pos),
            SideEffectKind::Conversion => SideEffect::conversion(piece, lost_promotion_tag),
            SideEffectKind::FailedConversion => SideEffect::failed_conversion(),
            SideEffectKind::Demotion => SideEffect::demotion(piece, extra.unwrap_or(sq)),
            SideEffectKind::Resurrection => SideEffect::resurrection(piece, extra.unwrap_or(sq)),
            SideEffectKind::FailedResurrection => SideEffect::failed_resurrection(),
        };

        self.steps.push(Step::new(
            separator.link.unwrap_or(StepLink::implied(false)),
            sq,
            side_effect,
        ));
        self.last = Some(separator);
        Some(State::ExpectSeparator)
    }

    /// `O-O` or `O-O-O`. The king starts from its square in the initial
    /// setup.
    fn read_castling(&mut self) -> Option<State> {
        let start = self.pos;
        self.bump();
        self.bump();
        if !matches!(self.peek(), Some(b'O' | b'o' | b'0')) {
            return self.unexpected(self.pos, "castling");
        }
        self.bump();
        let side = if self.eat(b'-') {
            if !matches!(self.peek(), Some(b'O' | b'o' | b'0')) {
                return self.unexpected(self.pos, "castling");
            }
            self.bump();
            CastlingSide::QueenSide
        } else {
            CastlingSide::KingSide
        };
        if self.peek().is_some() {
            return self.unexpected(self.pos, "end of castling");
        }

        let (Some(file), Some(rank)) = (
            self.board
                .figure_initial_file(Role::King, side.is_queen_side()),
            self.board.figure_initial_rank(self.turn),
        ) else {
            return self.fail(start, "no king in the initial setup");
        };
        let Some(king_to_file) =
            file.offset(i32::from(KINGS_MIN_CASTLING_DISTANCE) * side.direction())
        else {
            return self.fail(start, "castling king would leave the board");
        };
        let king_from = Square::from_coords(file, rank);
        let king_to = Square::from_coords(king_to_file, rank);

        self.piece = self.turn.king();
        self.castling = Some(side);
        let side_effect = self.castle(king_from, king_to, None, start);
        self.steps.push(Step::start(king_from));
        self.steps.push(Step::new(StepLink::Destination, king_to, side_effect));
        Some(State::Done)
    }

    fn castle(
        &mut self,
        king_from: Square,
        king_to: Square,
        rook_to: Option<Square>,
        pos: usize,
    ) -> SideEffect {
        if self.piece.role != Role::King {
            self.warn(pos, "only the king castles");
        }
        if !self.board.is_king_castling_step(self.turn, king_to) {
            self.warn(pos, format!("king can not castle to {king_to}"));
        }

        let side = CastlingSide::of_king_step(king_from.file(), king_to.file());
        let rook_from = match self.board.figure_initial_file(Role::Rook, side.is_queen_side()) {
            Some(file) => Square::from_coords(file, king_to.rank()),
            None => {
                self.warn(pos, "no castling rook in the initial setup");
                let corner = if side.is_queen_side() { File::A } else { File::Z };
                Square::from_coords(corner, king_to.rank())
            }
        };
        let rook_to = match rook_to.or_else(|| {
            default_castling_rook_square(castling_rook_side(rook_from, king_to), king_to)
        }) {
            Some(sq) => sq,
            None => {
                self.warn(pos, "no square for the castling rook next to the king");
                king_to
            }
        };

        for sq in [rook_from, rook_to] {
            if !self.board.is_on_board(sq) {
                self.warn(pos, format!("castling rook square {sq} is off the board"));
            }
        }

        SideEffect::castle(self.turn.rook(), rook_from, rook_to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{board::Chessboard, diagnostic::Severity, variant::Variant};

    fn sq(name: &str) -> Square {
        name.parse().expect("valid square")
    }

    fn parse(text: &str) -> (Option<Ply>, Diagnostics) {
        parse_on(&Chessboard::default(), text)
    }

    fn parse_on<B: Board>(board: &B, text: &str) -> (Option<Ply>, Diagnostics) {
        let mut diagnostics = Diagnostics::new();
        let ply = parse_ply(text, board, &mut diagnostics);
        (ply, diagnostics)
    }

    fn valid(text: &str) -> Ply {
        let (ply, diagnostics) = parse(text);
        assert!(diagnostics.is_empty(), "{text}: {diagnostics}");
        ply.expect("valid ply")
    }

    fn error_at(text: &str) -> usize {
        let (ply, diagnostics) = parse(text);
        assert!(ply.is_none(), "{text} should be abandoned");
        let errors: Vec<_> = diagnostics.errors().collect();
        assert_eq!(errors.len(), 1, "{text}: {diagnostics}");
        errors[0].position()
    }

    #[test]
    fn test_plain_steps() {
        let ply = valid("A1-B2");
        assert_eq!(ply.piece, Role::Pawn.of(Color::Light));
        assert_eq!(ply.steps, [
            Step::start(sq("a1")),
            Step::new(StepLink::Destination, sq("b2"), SideEffect::None),
        ]);
        assert_eq!(ply.span, 0..5);

        let ply = valid("Bc1.d2..g5.h6");
        assert_eq!(ply.piece.role, Role::Bishop);
        let links: Vec<StepLink> = ply.steps.iter().map(|step| step.link).collect();
        assert_eq!(links, [StepLink::Start, StepLink::Next, StepLink::Distant, StepLink::Next]);
    }

    #[test]
    fn test_single_square() {
        let ply = valid("e4");
        assert_eq!(ply.steps, [Step::start(sq("e4"))]);
        assert_eq!(ply.to_string(), "e4");
    }

    #[test]
    fn test_capture() {
        let ply = valid("E5xF6");
        let last = ply.destination().expect("steps");
        assert_eq!(last.link, StepLink::Destination);
        assert_eq!(last.square, sq("f6"));
        assert_eq!(last.side_effect.kind(), SideEffectKind::Capture);
        assert_eq!(ply.to_string(), "e5xf6");

        let ply = valid("Qd1*Nd7==");
        assert_eq!(
            ply.steps[1].side_effect,
            SideEffect::capture(Some(Role::Knight.of(Color::Dark)), true)
        );
    }

    #[test]
    fn test_implied_links() {
        let ply = valid("Rb1xb3xb5");
        assert_eq!(ply.steps[1].link, StepLink::Next);
        assert_eq!(ply.steps[2].link, StepLink::Destination);
        assert_eq!(ply.side_effects().count(), 2);
    }

    #[test]
    fn test_file_x_after_link() {
        let board = Chessboard::new(Variant::One, Color::Light);
        let (ply, diagnostics) = parse_on(&board, "w4.x5-X6");
        assert!(diagnostics.is_empty(), "{diagnostics}");
        let ply = ply.expect("valid ply");
        assert_eq!(ply.steps[1], Step::new(StepLink::Next, sq("x5"), SideEffect::None));
        assert_eq!(ply.steps[2].square, sq("x6"));

        let (ply, _) = parse_on(&board, "w4.xx5");
        let ply = ply.expect("valid ply");
        assert_eq!(ply.steps[1].link, StepLink::Next);
        assert_eq!(ply.steps[1].side_effect, SideEffect::capture(None, false));
        assert_eq!(ply.to_string(), "w4.xx5");
    }

    #[test]
    fn test_side_effects() {
        let dark = Color::Dark;
        let light = Color::Light;

        let ply = valid("Nc3<Bd5e6");
        assert_eq!(
            ply.steps[1].side_effect,
            SideEffect::displacement(Some(Role::Bishop.of(dark)), false, sq("e6"))
        );

        let ply = valid("e5:d6");
        assert_eq!(ply.steps[1].side_effect, SideEffect::en_passant(sq("d5")));
        let ply = valid("e5:d6d5");
        assert_eq!(ply.to_string(), "e5:d6");

        assert_eq!(
            valid("Ba1%Nb2").steps[1].side_effect,
            SideEffect::conversion(Some(Role::Knight.of(dark)), false)
        );
        assert_eq!(valid("Ba1%%b2").steps[1].side_effect, SideEffect::FailedConversion);
        assert_eq!(
            valid("Qd1>Qd4").steps[1].side_effect,
            SideEffect::demotion(Some(Role::Queen.of(dark)), sq("d4"))
        );
        assert_eq!(
            valid("Ic3$Nd4c1").steps[1].side_effect,
            SideEffect::resurrection(Some(Role::Knight.of(light)), sq("c1"))
        );
        assert_eq!(valid("Ic3$$d4").steps[1].side_effect, SideEffect::FailedResurrection);
    }

    #[test]
    fn test_promotion_suffixes() {
        let ply = valid("e7-e8=Q");
        assert_eq!(ply.steps[1].side_effect, SideEffect::promotion(Role::Queen.of(Color::Light)));
        assert_eq!(ply.to_string(), "e7-e8=Q");

        let ply = valid("b6.b7=");
        assert_eq!(ply.steps[1].side_effect, SideEffect::TagForPromotion);

        assert_eq!(error_at("e8=Q"), 2);
        assert_eq!(error_at("e7xd8=Q"), 5);
        assert_eq!(error_at("e7-e8=="), 5);
        assert_eq!(error_at("e7-e8=X"), 6);
    }

    #[test]
    fn test_castling() {
        let ply = valid("O-O");
        assert_eq!(ply.piece, Color::Light.king());
        assert_eq!(ply.castling, Some(CastlingSide::KingSide));
        assert_eq!(ply.steps.len(), 2);
        assert_eq!(ply.steps[0], Step::start(sq("e1")));
        assert_eq!(
            ply.steps[1],
            Step::new(
                StepLink::Destination,
                sq("g1"),
                SideEffect::castle(Color::Light.rook(), sq("h1"), sq("f1"))
            )
        );
        assert_eq!(ply.side_effects().count(), 1);
        assert_eq!(ply.to_string(), "O-O");

        let dark = Chessboard::new(Variant::ClassicalChess, Color::Dark);
        let (ply, diagnostics) = parse_on(&dark, "0-0-0");
        assert!(diagnostics.is_empty());
        let ply = ply.expect("valid castling");
        assert_eq!(ply.castling, Some(CastlingSide::QueenSide));
        assert_eq!(
            ply.steps[1].side_effect,
            SideEffect::castle(Color::Dark.rook(), sq("a8"), sq("d8"))
        );
        assert_eq!(ply.to_string(), "O-O-O");
    }

    #[test]
    fn test_castling_step() {
        let ply = valid("Ke1&g1");
        assert_eq!(ply.castling, None);
        assert_eq!(
            ply.steps[1].side_effect,
            SideEffect::castle(Color::Light.rook(), sq("h1"), sq("f1"))
        );
        assert_eq!(ply.to_string(), "Ke1&g1");

        let board = Chessboard::new(Variant::One, Color::Light);
        let (ply, diagnostics) = parse_on(&board, "Kn1&w1v1");
        assert!(diagnostics.is_empty(), "{diagnostics}");
        let ply = ply.expect("valid castling");
        assert_eq!(
            ply.steps[1].side_effect,
            SideEffect::castle(Color::Light.rook(), sq("z1"), sq("v1"))
        );
    }

    #[test]
    fn test_castling_warnings() {
        let (ply, diagnostics) = parse("Ke1&f1");
        assert!(ply.is_some());
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity(), Severity::Warning);
        assert_eq!(diagnostics[0].position(), 3);

        let (ply, diagnostics) = parse("Qe1&g1");
        assert!(ply.is_some());
        assert_eq!(diagnostics.max_severity(), Some(Severity::Warning));
        assert_eq!(diagnostics.warnings().count(), 1);
    }

    #[test]
    fn test_off_board_warning() {
        let (ply, diagnostics) = parse("Nb1-i3");
        let ply = ply.expect("still parsed");
        assert_eq!(ply.steps[1].square, sq("i3"));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity(), Severity::Warning);
        assert_eq!(diagnostics[0].position(), 4);
    }

    #[test]
    fn test_structural_errors() {
        assert_eq!(error_at("???"), 0);
        assert_eq!(error_at(""), 0);
        assert_eq!(error_at("a0"), 1);
        assert_eq!(error_at("a27"), 1);
        assert_eq!(error_at("a100"), 1);
        assert_eq!(error_at("Xa1"), 0);
        assert_eq!(error_at("a1b2"), 2);
        assert_eq!(error_at("a1-"), 3);
        assert_eq!(error_at("a1-b2.c3"), 2);
        assert_eq!(error_at("a1-Nb2"), 3);
        assert_eq!(error_at("a1<b2"), 5);
        assert_eq!(error_at("a1-é2"), 3);
        assert_eq!(error_at("O-X"), 2);
        assert_eq!(error_at("O-O-O-O"), 5);
    }

    #[test]
    fn test_error_offset() {
        let mut diagnostics = Diagnostics::new();
        let board = Chessboard::default();
        let ply = parse_ply_at("a1?", 10, PlyLink::Cascading, &board, &mut diagnostics);
        assert!(ply.is_none());
        assert_eq!(diagnostics[0].position(), 12);

        let ply = parse_ply_at("b2", 4, PlyLink::Cascading, &board, &mut diagnostics)
            .expect("valid ply");
        assert_eq!(ply.span, 4..6);
        assert_eq!(ply.link, PlyLink::Cascading);
    }

    #[test]
    fn test_ply_link_glyphs() {
        for link in [
            PlyLink::Cascading,
            PlyLink::Teleportation,
            PlyLink::TeleportationReemergence,
            PlyLink::TeleportationOblation,
            PlyLink::TranceJourney,
            PlyLink::DualTranceJourney,
            PlyLink::FailedTranceJourney,
            PlyLink::PawnSacrifice,
            PlyLink::SenseJourney,
            PlyLink::FailedSenseJourney,
        ] {
            assert_eq!(PlyLink::from_glyph(link.glyph().as_bytes()), Some(link));
        }
        assert_eq!(PlyLink::from_glyph(b""), None);
        assert_eq!(PlyLink::from_glyph(b"||||"), None);
        assert_eq!(PlyLink::from_glyph(b";"), None);
    }
}
