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

use std::{error::Error, fmt, ops, str::FromStr};

use crate::{role::Role, types::Piece};

/// `Light` or `Dark`. Light moves first.
#[allow(missing_docs)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash, Default)]
pub enum Color {
    Dark = 0,
    #[default]
    Light = 1,
}

impl Color {
    pub const fn from_char(ch: char) -> Option<Color> {
        match ch {
            'l' => Some(Color::Light),
            'd' => Some(Color::Dark),
            _ => None,
        }
    }

    #[inline]
    pub const fn from_light(light: bool) -> Color {
        if light {
            Color::Light
        } else {
            Color::Dark
        }
    }

    #[inline]
    pub fn fold_ld<T>(self, light: T, dark: T) -> T {
        match self {
            Color::Light => light,
            Color::Dark => dark,
        }
    }

    #[inline]
    pub const fn is_light(self) -> bool {
        matches!(self, Color::Light)
    }

    #[inline]
    pub const fn is_dark(self) -> bool {
        matches!(self, Color::Dark)
    }

    #[inline]
    pub const fn other(self) -> Color {
        match self {
            Color::Light => Color::Dark,
            Color::Dark => Color::Light,
        }
    }

    pub const fn char(self) -> char {
        match self {
            Color::Light => 'l',
            Color::Dark => 'd',
        }
    }

    #[inline]
    pub const fn king(self) -> Piece {
        Role::King.of(self)
    }

    #[inline]
    pub const fn rook(self) -> Piece {
        Role::Rook.of(self)
    }

    /// `Light` and `Dark`, in this order.
    pub const ALL: [Color; 2] = [Color::Light, Color::Dark];
}

impl ops::Not for Color {
    type Output = Color;

    #[inline]
    fn not(self) -> Color {
        self.other()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.fold_ld("light", "dark"))
    }
}

/// Error when parsing an invalid color name.
#[derive(Clone, Debug)]
pub struct ParseColorError;

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid color")
    }
}

impl Error for ParseColorError {}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Color, ParseColorError> {
        Ok(match s {
            "light" | "l" => Color::Light,
            "dark" | "d" => Color::Dark,
            _ => return Err(ParseColorError),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color() {
        assert_eq!(!Color::Light, Color::Dark);
        assert_eq!(Color::Dark.other(), Color::Light);
        assert_eq!("dark".parse::<Color>().ok(), Some(Color::Dark));
        assert_eq!(Color::from_char(Color::Light.char()), Some(Color::Light));
        assert!("white".parse::<Color>().is_err());
    }
}
