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

//! The board as seen by the notation parser.
//!
//! Parsing never asks the board whether a move is legal. It only asks a
//! few plausibility questions, and a negative answer is reported as a
//! warning rather than a parse failure.

use crate::{
    color::Color,
    role::Role,
    square::{File, Rank, Square},
    variant::Variant,
};

/// Plausibility oracle consulted while parsing notation.
pub trait Board {
    /// Side to move. Decides the color of pieces named in notation.
    fn turn(&self) -> Color;

    /// Checks if the square lies within the extents of the board.
    fn is_on_board(&self, sq: Square) -> bool;

    /// File of a figure in the initial setup, searching the queen side
    /// first if `queen_side_first` is set, or `None` if the figure is not
    /// found on the figure rank.
    fn figure_initial_file(&self, role: Role, queen_side_first: bool) -> Option<File>;

    /// Rank of the figures of the given color in the initial setup.
    fn figure_initial_rank(&self, color: Color) -> Option<Rank>;

    /// Checks if a castling king of the given color may step to `sq`.
    fn is_king_castling_step(&self, color: Color, sq: Square) -> bool;
}

/// A board of a [`Variant`] with a side to move.
///
/// # Examples
///
/// ```
/// use crochess_notation::{Board, Chessboard, Color, Variant};
///
/// let board = Chessboard::new(Variant::CroatianTies, Color::Dark);
/// assert!(board.is_on_board("j10".parse()?));
/// assert!(!board.is_on_board("k10".parse()?));
/// # Ok::<_, crochess_notation::ParseSquareError>(())
/// ```
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub struct Chessboard {
    pub variant: Variant,
    pub turn: Color,
}

impl Chessboard {
    pub const fn new(variant: Variant, turn: Color) -> Chessboard {
        Chessboard { variant, turn }
    }

    /// The same board with the other side to move.
    #[must_use]
    pub const fn swap_turn(self) -> Chessboard {
        Chessboard {
            variant: self.variant,
            turn: self.turn.other(),
        }
    }
}

impl Board for Chessboard {
    fn turn(&self) -> Color {
        self.turn
    }

    fn is_on_board(&self, sq: Square) -> bool {
        self.variant.is_on_board(sq)
    }

    fn figure_initial_file(&self, role: Role, queen_side_first: bool) -> Option<File> {
        self.variant.figure_initial_file(role, queen_side_first)
    }

    fn figure_initial_rank(&self, color: Color) -> Option<Rank> {
        Some(self.variant.initial_figure_rank(color))
    }

    fn is_king_castling_step(&self, color: Color, sq: Square) -> bool {
        self.variant.is_king_castling_step(color, sq)
    }
}

impl<B: Board + ?Sized> Board for &B {
    fn turn(&self) -> Color {
        (**self).turn()
    }

    fn is_on_board(&self, sq: Square) -> bool {
        (**self).is_on_board(sq)
    }

    fn figure_initial_file(&self, role: Role, queen_side_first: bool) -> Option<File> {
        (**self).figure_initial_file(role, queen_side_first)
    }

    fn figure_initial_rank(&self, color: Color) -> Option<Rank> {
        (**self).figure_initial_rank(color)
    }

    fn is_king_castling_step(&self, color: Color, sq: Square) -> bool {
        (**self).is_king_castling_step(color, sq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_board() {
        let board = Chessboard::default();
        assert_eq!(board.variant, Variant::ClassicalChess);
        assert_eq!(board.turn(), Color::Light);
        assert_eq!(board.swap_turn().turn(), Color::Dark);
        assert_eq!(
            board.figure_initial_rank(Color::Dark).map(Rank::number),
            Some(8)
        );
    }

    #[test]
    fn test_board_by_reference() {
        fn king_file<B: Board>(board: B) -> Option<char> {
            board.figure_initial_file(Role::King, false).map(File::char)
        }

        let board = Chessboard::new(Variant::MayanAscendancy, Color::Light);
        assert_eq!(king_file(&board), Some('g'));
        assert_eq!(king_file(board), Some('g'));
    }
}
