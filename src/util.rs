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

use std::{convert::Infallible, fmt, fmt::Write as _, num::TryFromIntError};

pub(crate) fn out_of_range_error() -> TryFromIntError {
    // TryFromIntError has a private constructor, so produce one from a
    // conversion that always overflows.
    u32::try_from(u64::MAX).unwrap_err()
}

/// Sink for ascii notation. Lets the same rendering code target a
/// [`fmt::Formatter`], a [`String`] or a fixed-size
/// [`ArrayString`](arrayvec::ArrayString).
pub(crate) trait AppendAscii {
    type Error;

    fn append_ascii(&mut self, ascii_char: char) -> Result<(), Self::Error>;

    fn append_str(&mut self, ascii: &str) -> Result<(), Self::Error> {
        for ch in ascii.chars() {
            self.append_ascii(ch)?;
        }
        Ok(())
    }

    fn append_u8(&mut self, n: u8) -> Result<(), Self::Error> {
        if n >= 100 {
            self.append_ascii(char::from(b'0' + n / 100))?;
        }
        if n >= 10 {
            self.append_ascii(char::from(b'0' + n / 10 % 10))?;
        }
        self.append_ascii(char::from(b'0' + n % 10))
    }
}

impl AppendAscii for fmt::Formatter<'_> {
    type Error = fmt::Error;

    fn append_ascii(&mut self, ascii_char: char) -> Result<(), Self::Error> {
        self.write_char(ascii_char)
    }
}

impl AppendAscii for String {
    type Error = Infallible;

    fn append_ascii(&mut self, ascii_char: char) -> Result<(), Self::Error> {
        self.push(ascii_char);
        Ok(())
    }
}

impl<const CAP: usize> AppendAscii for arrayvec::ArrayString<CAP> {
    type Error = arrayvec::CapacityError<char>;

    fn append_ascii(&mut self, ascii_char: char) -> Result<(), Self::Error> {
        self.try_push(ascii_char)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_u8() {
        let mut s = String::new();
        for n in [0, 7, 10, 26, 100, 255] {
            let _ = s.append_u8(n);
            s.push(' ');
        }
        assert_eq!(s, "0 7 10 26 100 255 ");
    }

    #[test]
    fn test_array_string_capacity() {
        let mut s = arrayvec::ArrayString::<2>::new();
        assert!(s.append_str("ab").is_ok());
        assert!(s.append_ascii('c').is_err());
        assert_eq!(s.as_str(), "ab");
    }
}
