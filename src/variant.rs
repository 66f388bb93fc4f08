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

//! Variants of the Croatian chess family.
//!
//! Every variant is played on a square board, from 8 × 8 in classical chess
//! up to 26 × 26 in One. Only the parts of the initial setup that notation
//! parsing relies on are described here: the ranks of the figures and the
//! files of rooks, queen and king.

use std::{error::Error, fmt, str::FromStr};

use crate::{
    castling_side::CastlingSide,
    color::Color,
    role::Role,
    square::{File, Rank, Square},
};

/// Minimum distance a king travels when castling, in any variant.
pub const KINGS_MIN_CASTLING_DISTANCE: u8 = 2;

/// A variant of the Croatian chess family.
#[allow(missing_docs)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[derive(Debug, Eq, PartialEq, Hash, Clone, Copy, Default)]
pub enum Variant {
    #[default]
    ClassicalChess,
    CroatianTies,
    MayanAscendancy,
    AgeOfAquarius,
    MirandasVeil,
    Nineteen,
    HemerasDawn,
    TamoanchanRevisited,
    ConquestOfTlalocan,
    Discovery,
    One,
}

impl Variant {
    /// Short symbol of the variant, e.g. `ct` for Croatian Ties.
    pub const fn symbol(self) -> &'static str {
        match self {
            Variant::ClassicalChess => "cc",
            Variant::CroatianTies => "ct",
            Variant::MayanAscendancy => "ma",
            Variant::AgeOfAquarius => "aoa",
            Variant::MirandasVeil => "mv",
            Variant::Nineteen => "n",
            Variant::HemerasDawn => "hd",
            Variant::TamoanchanRevisited => "tr",
            Variant::ConquestOfTlalocan => "cot",
            Variant::Discovery => "d",
            Variant::One => "o",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Variant> {
        Variant::ALL
            .into_iter()
            .find(|variant| variant.symbol().eq_ignore_ascii_case(symbol))
    }

    pub const fn name(self) -> &'static str {
        match self {
            Variant::ClassicalChess => "Classical Chess",
            Variant::CroatianTies => "Croatian Ties",
            Variant::MayanAscendancy => "Mayan Ascendancy",
            Variant::AgeOfAquarius => "Age Of Aquarius",
            Variant::MirandasVeil => "Miranda's Veil",
            Variant::Nineteen => "Nineteen",
            Variant::HemerasDawn => "Hemera's Dawn",
            Variant::TamoanchanRevisited => "Tamoanchan Revisited",
            Variant::ConquestOfTlalocan => "Conquest Of Tlalocan",
            Variant::Discovery => "Discovery",
            Variant::One => "One",
        }
    }

    /// Number of files (and ranks) of the board.
    pub const fn board_size(self) -> u8 {
        match self {
            Variant::ClassicalChess => 8,
            Variant::CroatianTies => 10,
            Variant::MayanAscendancy => 12,
            Variant::AgeOfAquarius => 14,
            Variant::MirandasVeil => 16,
            Variant::Nineteen => 18,
            Variant::HemerasDawn => 20,
            Variant::TamoanchanRevisited => 22,
            Variant::ConquestOfTlalocan | Variant::Discovery => 24,
            Variant::One => 26,
        }
    }

    pub const fn is_on_board(self, sq: Square) -> bool {
        sq.file().index() < self.board_size() && sq.rank().index() < self.board_size()
    }

    /// Rank of the figures of the given color in the initial setup.
    pub const fn initial_figure_rank(self, color: Color) -> Rank {
        match color {
            Color::Light => Rank::FIRST,
            // Board sizes never exceed 26, so the last rank always exists.
            Color::Dark => match Rank::new(self.board_size() - 1) {
                Some(rank) => rank,
                None => Rank::FIRST,
            },
        }
    }

    pub const fn kings_initial_file(self) -> File {
        match File::new(self.board_size() / 2) {
            Some(file) => file,
            None => File::A,
        }
    }

    /// Farthest a king may travel when castling.
    pub const fn kings_max_castling_distance(self) -> u8 {
        self.board_size() / 2 - 2
    }

    /// File of a figure in the initial setup.
    ///
    /// This is a simplified setup, not the full initial position of the
    /// variant: it only knows what castling needs. Rooks are placed on both
    /// corners, so `queen_side_first` picks the one to report, the queen
    /// and the king on the two center files. Every other role, including
    /// knights and bishops, yields `None`. Implement [`Board`] to answer
    /// from a real setup.
    ///
    /// [`Board`]: crate::Board
    pub const fn figure_initial_file(self, role: Role, queen_side_first: bool) -> Option<File> {
        let size = self.board_size();
        match role {
            Role::Rook if queen_side_first => Some(File::A),
            Role::Rook => File::new(size - 1),
            Role::Queen => File::new(size / 2 - 1),
            Role::King => File::new(size / 2),
            _ => None,
        }
    }

    /// Checks if `sq` is a square a castling king of the given color may
    /// step to.
    pub fn is_king_castling_step(self, color: Color, sq: Square) -> bool {
        if !self.is_on_board(sq) || sq.rank() != self.initial_figure_rank(color) {
            return false;
        }
        let distance = sq.file().distance(self.kings_initial_file());
        (KINGS_MIN_CASTLING_DISTANCE..=self.kings_max_castling_distance()).contains(&distance)
    }

    /// Square of the castling rook before castling.
    pub fn rook_initial_square(self, color: Color, side: CastlingSide) -> Option<Square> {
        self.figure_initial_file(Role::Rook, side.is_queen_side())
            .map(|file| Square::from_coords(file, self.initial_figure_rank(color)))
    }

    pub const ALL: [Variant; 11] = [
        Variant::ClassicalChess,
        Variant::CroatianTies,
        Variant::MayanAscendancy,
        Variant::AgeOfAquarius,
        Variant::MirandasVeil,
        Variant::Nineteen,
        Variant::HemerasDawn,
        Variant::TamoanchanRevisited,
        Variant::ConquestOfTlalocan,
        Variant::Discovery,
        Variant::One,
    ];
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Error when parsing an unknown variant symbol.
#[derive(Clone, Debug)]
pub struct ParseVariantError;

impl fmt::Display for ParseVariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unknown variant")
    }
}

impl Error for ParseVariantError {}

impl FromStr for Variant {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Variant, ParseVariantError> {
        Variant::from_symbol(s).ok_or(ParseVariantError)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Variant {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.symbol())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Variant {
    fn deserialize<D>(deserializer: D) -> Result<Variant, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct VariantVisitor;

        impl serde::de::Visitor<'_> for VariantVisitor {
            type Value = Variant;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("variant symbol")
            }

            fn visit_str<E>(self, value: &str) -> Result<Variant, E>
            where
                E: serde::de::Error,
            {
                value.parse().map_err(serde::de::Error::custom)
            }
        }

        deserializer.deserialize_str(VariantVisitor)
    }
}
