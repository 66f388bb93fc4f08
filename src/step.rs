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

//! Steps and the side effects they carry.

use std::fmt;

use crate::{castling_side::CastlingSide, square::Square, types::Piece, util::AppendAscii};

/// How a step is reached from the previous one.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum StepLink {
    /// The square a piece starts from. Only the first step of a ply.
    Start,
    /// An adjacent step, `.`.
    Next,
    /// A step reached by a non-adjacent jump, `..`.
    Distant,
    /// The last step of a ply, `-`.
    Destination,
}

impl StepLink {
    pub const fn glyph(self) -> &'static str {
        match self {
            StepLink::Start => "",
            StepLink::Next => ".",
            StepLink::Distant => "..",
            StepLink::Destination => "-",
        }
    }

    /// Link of a step written with a side effect glyph but without a link
    /// glyph.
    #[inline]
    pub const fn implied(is_last: bool) -> StepLink {
        if is_last {
            StepLink::Destination
        } else {
            StepLink::Next
        }
    }
}

/// Kind of a [`SideEffect`], without payload.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum SideEffectKind {
    None,
    Capture,
    Displacement,
    EnPassant,
    Castle,
    Promotion,
    TagForPromotion,
    Conversion,
    FailedConversion,
    Demotion,
    Resurrection,
    FailedResurrection,
}

impl SideEffectKind {
    /// Separator glyph of the side effect. Promotions are written as a
    /// suffix instead.
    pub const fn glyph(self) -> Option<&'static str> {
        Some(match self {
            SideEffectKind::Capture => "x",
            SideEffectKind::Displacement => "<",
            SideEffectKind::EnPassant => ":",
            SideEffectKind::Castle => "&",
            SideEffectKind::Conversion => "%",
            SideEffectKind::FailedConversion => "%%",
            SideEffectKind::Demotion => ">",
            SideEffectKind::Resurrection => "$",
            SideEffectKind::FailedResurrection => "$$",
            SideEffectKind::None | SideEffectKind::Promotion | SideEffectKind::TagForPromotion => {
                return None
            }
        })
    }

    /// Checks if the piece affected by the step may be named before its
    /// square.
    pub const fn allows_piece(self) -> bool {
        matches!(
            self,
            SideEffectKind::Capture
                | SideEffectKind::Displacement
                | SideEffectKind::Conversion
                | SideEffectKind::Demotion
                | SideEffectKind::Resurrection
        )
    }

    /// Checks if the step square may be followed by a second square.
    pub const fn allows_destination(self) -> bool {
        matches!(
            self,
            SideEffectKind::Displacement
                | SideEffectKind::EnPassant
                | SideEffectKind::Castle
                | SideEffectKind::Demotion
                | SideEffectKind::Resurrection
        )
    }

    /// Checks if the affected piece may lose its tag for promotion (`==`).
    pub const fn allows_lost_promotion_tag(self) -> bool {
        matches!(
            self,
            SideEffectKind::Capture | SideEffectKind::Displacement | SideEffectKind::Conversion
        )
    }
}

/// What happens on a step besides the moving piece arriving there.
///
/// Pieces named in notation are optional, `None` means the notation left
/// them out.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum SideEffect {
    None,
    Capture {
        piece: Option<Piece>,
        lost_promotion_tag: bool,
    },
    Displacement {
        piece: Option<Piece>,
        lost_promotion_tag: bool,
        to: Square,
    },
    EnPassant {
        /// Square of the pawn captured en passant.
        to: Square,
    },
    Castle {
        rook: Piece,
        from: Square,
        to: Square,
    },
    Promotion {
        piece: Piece,
    },
    TagForPromotion,
    Conversion {
        piece: Option<Piece>,
        lost_promotion_tag: bool,
    },
    FailedConversion,
    Demotion {
        piece: Option<Piece>,
        to: Square,
    },
    Resurrection {
        piece: Option<Piece>,
        to: Square,
    },
    FailedResurrection,
}

impl SideEffect {
    pub const fn capture(piece: Option<Piece>, lost_promotion_tag: bool) -> SideEffect {
        SideEffect::Capture {
            piece,
            lost_promotion_tag,
        }
    }

    pub const fn displacement(piece: Option<Piece>, lost_promotion_tag: bool, to: Square) -> SideEffect {
        SideEffect::Displacement {
            piece,
            lost_promotion_tag,
            to,
        }
    }

    pub const fn en_passant(to: Square) -> SideEffect {
        SideEffect::EnPassant { to }
    }

    pub const fn castle(rook: Piece, from: Square, to: Square) -> SideEffect {
        SideEffect::Castle { rook, from, to }
    }

    pub const fn promotion(piece: Piece) -> SideEffect {
        SideEffect::Promotion { piece }
    }

    pub const fn tag_for_promotion() -> SideEffect {
        SideEffect::TagForPromotion
    }

    pub const fn conversion(piece: Option<Piece>, lost_promotion_tag: bool) -> SideEffect {
        SideEffect::Conversion {
            piece,
            lost_promotion_tag,
        }
    }

    pub const fn failed_conversion() -> SideEffect {
        SideEffect::FailedConversion
    }

    pub const fn demotion(piece: Option<Piece>, to: Square) -> SideEffect {
        SideEffect::Demotion { piece, to }
    }

    pub const fn resurrection(piece: Option<Piece>, to: Square) -> SideEffect {
        SideEffect::Resurrection { piece, to }
    }

    pub const fn failed_resurrection() -> SideEffect {
        SideEffect::FailedResurrection
    }

    pub const fn kind(&self) -> SideEffectKind {
        match *self {
            SideEffect::None => SideEffectKind::None,
            SideEffect::Capture { .. } => SideEffectKind::Capture,
            SideEffect::Displacement { .. } => SideEffectKind::Displacement,
            SideEffect::EnPassant { .. } => SideEffectKind::EnPassant,
            SideEffect::Castle { .. } => SideEffectKind::Castle,
            SideEffect::Promotion { .. } => SideEffectKind::Promotion,
            SideEffect::TagForPromotion => SideEffectKind::TagForPromotion,
            SideEffect::Conversion { .. } => SideEffectKind::Conversion,
            SideEffect::FailedConversion => SideEffectKind::FailedConversion,
            SideEffect::Demotion { .. } => SideEffectKind::Demotion,
            SideEffect::Resurrection { .. } => SideEffectKind::Resurrection,
            SideEffect::FailedResurrection => SideEffectKind::FailedResurrection,
        }
    }

    #[inline]
    pub const fn is_none(&self) -> bool {
        matches!(self, SideEffect::None)
    }

    /// The piece the side effect names, if any: the affected piece, the
    /// castling rook or the promoted piece.
    pub const fn piece(&self) -> Option<Piece> {
        match *self {
            SideEffect::Capture { piece, .. }
            | SideEffect::Displacement { piece, .. }
            | SideEffect::Conversion { piece, .. }
            | SideEffect::Demotion { piece, .. }
            | SideEffect::Resurrection { piece, .. } => piece,
            SideEffect::Castle { rook, .. } => Some(rook),
            SideEffect::Promotion { piece } => Some(piece),
            _ => None,
        }
    }

    pub const fn lost_promotion_tag(&self) -> bool {
        match *self {
            SideEffect::Capture {
                lost_promotion_tag, ..
            }
            | SideEffect::Displacement {
                lost_promotion_tag, ..
            }
            | SideEffect::Conversion {
                lost_promotion_tag, ..
            } => lost_promotion_tag,
            _ => false,
        }
    }
}

/// Second square of an en passant step when notation leaves it out: the
/// captured pawn stands on the file of the step and the rank the capturing
/// pawn came from.
pub(crate) fn default_en_passant_square(prev: Square, sq: Square) -> Square {
    Square::from_coords(sq.file(), prev.rank())
}

/// Rook destination of a castling step when notation leaves it out: next
/// to the king, on the inner side.
pub(crate) fn default_castling_rook_square(side: CastlingSide, king_to: Square) -> Option<Square> {
    side.rook_to_file(king_to.file())
        .map(|file| Square::from_coords(file, king_to.rank()))
}

/// Side of the king the castling rook starts on.
pub(crate) fn castling_rook_side(rook_from: Square, king_to: Square) -> CastlingSide {
    CastlingSide::from_queen_side(rook_from.file() < king_to.file())
}

/// A square visited by a piece during a ply.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct Step {
    pub link: StepLink,
    pub square: Square,
    pub side_effect: SideEffect,
}

impl Step {
    pub const fn new(link: StepLink, square: Square, side_effect: SideEffect) -> Step {
        Step {
            link,
            square,
            side_effect,
        }
    }

    /// The first step of a ply.
    pub const fn start(square: Square) -> Step {
        Step::new(StepLink::Start, square, SideEffect::None)
    }

    /// Writes the step in canonical notation. Defaults that can be
    /// recovered while parsing are left out, so the previous square and
    /// the position of the step in its ply are needed.
    pub(crate) fn append_to<W: AppendAscii>(
        &self,
        f: &mut W,
        prev: Option<Square>,
        is_last: bool,
    ) -> Result<(), W::Error> {
        let kind = self.side_effect.kind();
        let glyph = kind.glyph();
        if glyph.is_none() || self.link != StepLink::implied(is_last) {
            f.append_str(self.link.glyph())?;
        }
        if let Some(glyph) = glyph {
            f.append_str(glyph)?;
        }

        if kind.allows_piece() {
            if let Some(piece) = self.side_effect.piece() {
                f.append_ascii(piece.char())?;
            }
        }

        self.square.append_to(f)?;

        match self.side_effect {
            SideEffect::Displacement { to, .. } => to.append_to(f)?,
            SideEffect::EnPassant { to } => {
                if prev.map(|prev| default_en_passant_square(prev, self.square)) != Some(to) {
                    to.append_to(f)?;
                }
            }
            SideEffect::Castle { from, to, .. } => {
                let side = castling_rook_side(from, self.square);
                if default_castling_rook_square(side, self.square) != Some(to) {
                    to.append_to(f)?;
                }
            }
            SideEffect::Demotion { to, .. } | SideEffect::Resurrection { to, .. } => {
                if to != self.square {
                    to.append_to(f)?;
                }
            }
            _ => {}
        }

        match self.side_effect {
            SideEffect::Promotion { piece } => {
                f.append_ascii('=')?;
                f.append_ascii(piece.char())?;
            }
            SideEffect::TagForPromotion => f.append_ascii('=')?,
            _ if self.side_effect.lost_promotion_tag() => f.append_str("==")?,
            _ => {}
        }

        Ok(())
    }
}

/// Writes the step as the last step of a ply, with every second square
/// spelled out unless it equals the step square.
impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.append_to(f, None, true)
    }
}
