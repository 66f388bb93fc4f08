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

use std::ops;

use crate::square::File;

/// `KingSide` (O-O) or `QueenSide` (O-O-O).
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum CastlingSide {
    KingSide,
    QueenSide,
}

impl CastlingSide {
    #[inline]
    pub const fn is_queen_side(self) -> bool {
        matches!(self, CastlingSide::QueenSide)
    }

    #[inline]
    pub const fn is_king_side(self) -> bool {
        matches!(self, CastlingSide::KingSide)
    }

    #[inline]
    pub const fn from_queen_side(queen_side: bool) -> CastlingSide {
        if queen_side {
            CastlingSide::QueenSide
        } else {
            CastlingSide::KingSide
        }
    }

    /// The side a king lands on when moving from `from` to `to`.
    pub fn of_king_step(from: File, to: File) -> CastlingSide {
        CastlingSide::from_queen_side(to < from)
    }

    /// Direction of the king along the rank, `+1` towards the king side.
    #[inline]
    pub const fn direction(self) -> i32 {
        match self {
            CastlingSide::KingSide => 1,
            CastlingSide::QueenSide => -1,
        }
    }

    /// The rook lands next to the king, on the side the king came from.
    pub const fn rook_to_file(self, king_to: File) -> Option<File> {
        king_to.offset(-self.direction())
    }

    #[inline]
    pub const fn other(self) -> CastlingSide {
        match self {
            CastlingSide::KingSide => CastlingSide::QueenSide,
            CastlingSide::QueenSide => CastlingSide::KingSide,
        }
    }

    pub const ALL: [CastlingSide; 2] = [CastlingSide::KingSide, CastlingSide::QueenSide];
}

impl ops::Not for CastlingSide {
    type Output = CastlingSide;

    #[inline]
    fn not(self) -> CastlingSide {
        self.other()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rook_to_file() {
        let g = File::new(6).expect("file g");
        let c = File::new(2).expect("file c");
        assert_eq!(CastlingSide::KingSide.rook_to_file(g).map(File::char), Some('f'));
        assert_eq!(CastlingSide::QueenSide.rook_to_file(c).map(File::char), Some('d'));
        assert_eq!(CastlingSide::KingSide.rook_to_file(File::A), None);
    }

    #[test]
    fn test_of_king_step() {
        let e = File::new(4).expect("file e");
        let g = File::new(6).expect("file g");
        assert_eq!(CastlingSide::of_king_step(e, g), CastlingSide::KingSide);
        assert_eq!(CastlingSide::of_king_step(g, e), CastlingSide::QueenSide);
        assert_eq!(!CastlingSide::KingSide, CastlingSide::QueenSide);
    }
}
