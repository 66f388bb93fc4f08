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

use std::{error::Error, fmt, str::FromStr};

use crate::util::AppendAscii;

/// Largest board of the variant family is 26 × 26.
pub const MAX_BOARD_SIZE: u8 = 26;

/// Error when parsing an invalid square name.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseSquareError;

impl fmt::Display for ParseSquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid square name")
    }
}

impl Error for ParseSquareError {}

/// A file of the board, `a` to `z`.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub struct File(u8);

impl File {
    pub const A: File = File(0);
    pub const Z: File = File(MAX_BOARD_SIZE - 1);

    #[inline]
    pub const fn new(index: u8) -> Option<File> {
        if index < MAX_BOARD_SIZE {
            Some(File(index))
        } else {
            None
        }
    }

    /// Accepts both cases, `A` and `a` are the same file.
    #[inline]
    pub const fn from_char(ch: char) -> Option<File> {
        if ch.is_ascii_alphabetic() {
            File::new(ch.to_ascii_lowercase() as u8 - b'a')
        } else {
            None
        }
    }

    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn char(self) -> char {
        (b'a' + self.0) as char
    }

    #[must_use]
    #[inline]
    pub const fn offset(self, delta: i32) -> Option<File> {
        let index = self.0 as i32 + delta;
        if 0 <= index && index < MAX_BOARD_SIZE as i32 {
            Some(File(index as u8))
        } else {
            None
        }
    }

    #[inline]
    pub const fn distance(self, other: File) -> u8 {
        self.0.abs_diff(other.0)
    }
}

/// A rank of the board, `1` to `26`.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub struct Rank(u8);

impl Rank {
    pub const FIRST: Rank = Rank(0);

    /// Zero-based, i.e. `Rank::new(0)` is the first rank.
    #[inline]
    pub const fn new(index: u8) -> Option<Rank> {
        if index < MAX_BOARD_SIZE {
            Some(Rank(index))
        } else {
            None
        }
    }

    /// Parses the decimal rank number as written in notation, `1` to `26`.
    pub fn from_ascii(digits: &[u8]) -> Option<Rank> {
        if digits.is_empty() || digits.len() > 2 {
            return None;
        }
        let number: u8 = btoi::btou(digits).ok()?;
        number.checked_sub(1).and_then(Rank::new)
    }

    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn number(self) -> u8 {
        self.0 + 1
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.append_ascii(self.char())
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.append_u8(self.number())
    }
}

/// A square of a board up to 26 × 26.
///
/// # Examples
///
/// ```
/// use crochess_notation::Square;
///
/// let sq: Square = "z26".parse()?;
/// assert_eq!(sq.file().index(), 25);
/// assert_eq!(sq.rank().number(), 26);
///
/// // Files are case insensitive in notation.
/// assert_eq!("E5".parse::<Square>()?, "e5".parse::<Square>()?);
/// # Ok::<_, crochess_notation::ParseSquareError>(())
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Square {
    file: File,
    rank: Rank,
}

impl Square {
    #[inline]
    pub const fn from_coords(file: File, rank: Rank) -> Square {
        Square { file, rank }
    }

    /// Square from zero-based indexes, `None` beyond the largest board.
    pub const fn new(file: u8, rank: u8) -> Option<Square> {
        match (File::new(file), Rank::new(rank)) {
            (Some(file), Some(rank)) => Some(Square { file, rank }),
            _ => None,
        }
    }

    /// Parses a square name, a file letter followed by one or two rank
    /// digits.
    ///
    /// # Errors
    ///
    /// Returns [`ParseSquareError`] if `ascii` is not a square name.
    pub fn from_ascii(ascii: &[u8]) -> Result<Square, ParseSquareError> {
        let (&file, digits) = ascii.split_first().ok_or(ParseSquareError)?;
        Ok(Square::from_coords(
            File::from_char(char::from(file)).ok_or(ParseSquareError)?,
            Rank::from_ascii(digits).ok_or(ParseSquareError)?,
        ))
    }

    #[inline]
    pub const fn file(self) -> File {
        self.file
    }

    #[inline]
    pub const fn rank(self) -> Rank {
        self.rank
    }

    pub(crate) fn append_to<W: AppendAscii>(self, f: &mut W) -> Result<(), W::Error> {
        f.append_ascii(self.file.char())?;
        f.append_u8(self.rank.number())
    }
}

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Square, ParseSquareError> {
        Square::from_ascii(s.as_bytes())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.append_to(f)
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.append_ascii(self.file.char().to_ascii_uppercase())?;
        f.append_u8(self.rank.number())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Square {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Longest square name: z26
        let mut s = arrayvec::ArrayString::<3>::new();
        let _ = self.append_to(&mut s);
        serializer.serialize_str(&s)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Square {
    fn deserialize<D>(deserializer: D) -> Result<Square, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct SquareVisitor;

        impl serde::de::Visitor<'_> for SquareVisitor {
            type Value = Square;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("square name")
            }

            fn visit_str<E>(self, value: &str) -> Result<Square, E>
            where
                E: serde::de::Error,
            {
                value.parse().map_err(serde::de::Error::custom)
            }
        }

        deserializer.deserialize_str(SquareVisitor)
    }
}
