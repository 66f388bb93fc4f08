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

use std::num;

use crate::{color::Color, types::Piece, util::out_of_range_error};

/// Piece types of the Croatian chess family.
///
/// Classical chess uses the first six. The larger variants add the rest.
///
/// # Examples
///
/// ```
/// use crochess_notation::Role;
///
/// // Piece types are indexed from 1.
/// assert_eq!(u32::from(Role::Pawn), 1);
/// assert_eq!(u32::from(Role::Grenadier), 18);
/// ```
#[allow(missing_docs)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub enum Role {
    Pawn = 1,
    Knight = 2,
    Bishop = 3,
    Rook = 4,
    Queen = 5,
    King = 6,
    Pegasus = 7,
    Pyramid = 8,
    Unicorn = 9,
    Wave = 10,
    Star = 11,
    Centaur = 12,
    Serpent = 13,
    Shaman = 14,
    Monolith = 15,
    Starchild = 16,
    Scout = 17,
    Grenadier = 18,
}

impl Role {
    /// Gets the piece type from its uppercase letter.
    ///
    /// Lowercase letters are files in move notation, so they are never
    /// pieces.
    ///
    /// # Examples
    ///
    /// ```
    /// use crochess_notation::Role;
    ///
    /// assert_eq!(Role::from_char('E'), Some(Role::Pegasus));
    /// assert_eq!(Role::from_char('e'), None);
    /// assert_eq!(Role::from_char('X'), None);
    /// ```
    pub const fn from_char(ch: char) -> Option<Role> {
        Some(match ch {
            'P' => Role::Pawn,
            'N' => Role::Knight,
            'B' => Role::Bishop,
            'R' => Role::Rook,
            'Q' => Role::Queen,
            'K' => Role::King,
            'E' => Role::Pegasus,
            'A' => Role::Pyramid,
            'U' => Role::Unicorn,
            'W' => Role::Wave,
            'T' => Role::Star,
            'C' => Role::Centaur,
            'S' => Role::Serpent,
            'H' => Role::Shaman,
            'M' => Role::Monolith,
            'I' => Role::Starchild,
            'O' => Role::Scout,
            'G' => Role::Grenadier,
            _ => return None,
        })
    }

    /// Gets the uppercase letter for the piece type.
    pub const fn upper_char(self) -> char {
        match self {
            Role::Pawn => 'P',
            Role::Knight => 'N',
            Role::Bishop => 'B',
            Role::Rook => 'R',
            Role::Queen => 'Q',
            Role::King => 'K',
            Role::Pegasus => 'E',
            Role::Pyramid => 'A',
            Role::Unicorn => 'U',
            Role::Wave => 'W',
            Role::Star => 'T',
            Role::Centaur => 'C',
            Role::Serpent => 'S',
            Role::Shaman => 'H',
            Role::Monolith => 'M',
            Role::Starchild => 'I',
            Role::Scout => 'O',
            Role::Grenadier => 'G',
        }
    }

    /// Gets a [`Piece`] of the given color.
    #[inline]
    pub const fn of(self, color: Color) -> Piece {
        Piece { color, role: self }
    }

    pub const ALL: [Role; 18] = [
        Role::Pawn,
        Role::Knight,
        Role::Bishop,
        Role::Rook,
        Role::Queen,
        Role::King,
        Role::Pegasus,
        Role::Pyramid,
        Role::Unicorn,
        Role::Wave,
        Role::Star,
        Role::Centaur,
        Role::Serpent,
        Role::Shaman,
        Role::Monolith,
        Role::Starchild,
        Role::Scout,
        Role::Grenadier,
    ];
}

macro_rules! int_from_role_impl {
    ($($t:ty)+) => {
        $(impl From<Role> for $t {
            #[inline]
            fn from(role: Role) -> $t {
                role as $t
            }
        })+
    }
}

int_from_role_impl! { u8 i8 u16 i16 u32 i32 u64 i64 usize isize }

macro_rules! try_role_from_int_impl {
    ($($t:ty)+) => {
        $(impl TryFrom<$t> for Role {
            type Error = num::TryFromIntError;

            #[inline]
            fn try_from(value: $t) -> Result<Role, Self::Error> {
                usize::try_from(value)
                    .ok()
                    .and_then(|index| index.checked_sub(1))
                    .and_then(|index| Role::ALL.get(index).copied())
                    .ok_or_else(out_of_range_error)
            }
        })+
    }
}

try_role_from_int_impl! { u8 i8 u16 i16 u32 i32 u64 i64 usize isize }
