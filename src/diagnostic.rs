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

//! Diagnostics reported while parsing notation.
//!
//! Parsing does not stop at the first problem. Every observation is
//! appended to a [`Diagnostics`] log owned by the caller, tagged with a
//! [`Severity`] and the byte offset into the parsed text where it was made.
//!
//! # Examples
//!
//! ```
//! use crochess_notation::diagnostic::{Diagnostics, Severity};
//!
//! let mut log = None;
//! Diagnostics::append_or_init(&mut log, Severity::Warning, 3, "square off board");
//! Diagnostics::append_or_init(&mut log, Severity::Error, 7, "expected square");
//!
//! let log = log.expect("initialized");
//! assert_eq!(log.len(), 2);
//! assert_eq!(log.max_severity(), Some(Severity::Error));
//! assert_eq!(log[0].position(), 3);
//! ```

use std::{fmt, ops, slice, vec};

/// Severity of a [`Diagnostic`], from least to most severe.
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub enum Severity {
    /// Tracing detail. Never blocks a result.
    Debug,
    /// Informational note. Never blocks a result.
    Info,
    /// The board oracle disagrees with the notation. The structure was
    /// still produced.
    Warning,
    /// The notation of a ply is malformed. Only that ply is abandoned.
    Error,
    /// The whole move is abandoned.
    Fatal,
}

impl Severity {
    pub const fn as_str(self) -> &'static str {
        match self {
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Fatal => "fatal",
        }
    }

    /// `Error` and `Fatal` mean that something was not parsed.
    #[inline]
    pub const fn is_failure(self) -> bool {
        matches!(self, Severity::Error | Severity::Fatal)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message about the parsed text at a byte offset.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Diagnostic {
    severity: Severity,
    position: usize,
    message: Box<str>,
}

impl Diagnostic {
    pub fn new(severity: Severity, position: usize, message: impl Into<Box<str>>) -> Diagnostic {
        Diagnostic {
            severity,
            position,
            message: message.into(),
        }
    }

    #[inline]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Byte offset into the text given to the parser, as recorded.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}: {}", self.severity, self.position, self.message)
    }
}

/// Append-only log of [`Diagnostic`]s in the order they were reported.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub const fn new() -> Diagnostics {
        Diagnostics {
            entries: Vec::new(),
        }
    }

    /// A log holding a single diagnostic.
    pub fn single(severity: Severity, position: usize, message: impl Into<Box<str>>) -> Diagnostics {
        Diagnostics {
            entries: vec![Diagnostic::new(severity, position, message)],
        }
    }

    /// Appends a diagnostic after all existing entries and returns it.
    pub fn append(
        &mut self,
        severity: Severity,
        position: usize,
        message: impl Into<Box<str>>,
    ) -> &Diagnostic {
        self.push(Diagnostic::new(severity, position, message))
    }

    /// Appends a diagnostic, initializing the log first if it is absent.
    /// `log` is never `None` afterwards.
    pub fn append_or_init<'a>(
        log: &'a mut Option<Diagnostics>,
        severity: Severity,
        position: usize,
        message: impl Into<Box<str>>,
    ) -> &'a Diagnostic {
        log.get_or_insert_with(Diagnostics::new)
            .append(severity, position, message)
    }

    /// Drops all entries of the log and clears the reference. Returns the
    /// number of entries released.
    pub fn release(log: &mut Option<Diagnostics>) -> usize {
        log.take().map_or(0, |log| log.len())
    }

    pub fn push(&mut self, diagnostic: Diagnostic) -> &Diagnostic {
        self.entries.push(diagnostic);
        &self.entries[self.entries.len() - 1]
    }

    pub(crate) fn warning(&mut self, position: usize, message: impl Into<Box<str>>) {
        self.append(Severity::Warning, position, message);
    }

    pub(crate) fn error(&mut self, position: usize, message: impl Into<Box<str>>) {
        self.append(Severity::Error, position, message);
    }

    pub(crate) fn fatal(&mut self, position: usize, message: impl Into<Box<str>>) {
        self.append(Severity::Fatal, position, message);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, Diagnostic> {
        self.entries.iter()
    }

    pub fn first(&self) -> Option<&Diagnostic> {
        self.entries.first()
    }

    /// The most severe entry, or `None` for an empty log.
    pub fn max_severity(&self) -> Option<Severity> {
        self.entries.iter().map(Diagnostic::severity).max()
    }

    /// Checks if anything was reported as [`Severity::Error`] or
    /// [`Severity::Fatal`].
    pub fn has_errors(&self) -> bool {
        self.entries.iter().any(|d| d.severity.is_failure())
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().filter(|d| d.severity.is_failure())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries
            .iter()
            .filter(|d| d.severity == Severity::Warning)
    }

    /// Moves all entries of `other` to the end of this log.
    pub fn extend_from(&mut self, other: Diagnostics) {
        self.entries.extend(other.entries);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl ops::Index<usize> for Diagnostics {
    type Output = Diagnostic;

    fn index(&self, index: usize) -> &Diagnostic {
        &self.entries[index]
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Extend<Diagnostic> for Diagnostics {
    fn extend<T: IntoIterator<Item = Diagnostic>>(&mut self, iter: T) {
        self.entries.extend(iter);
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, diagnostic) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{diagnostic}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_or_init() {
        let mut log = None;

        Diagnostics::append_or_init(&mut log, Severity::Info, 0, "first");
        assert_eq!(log.as_ref().map(Diagnostics::len), Some(1));

        let second = Diagnostics::append_or_init(&mut log, Severity::Error, 5, "second");
        assert_eq!(second.message(), "second");

        let log = log.expect("initialized");
        let messages: Vec<&str> = log.iter().map(Diagnostic::message).collect();
        assert_eq!(messages, ["first", "second"]);
    }

    #[test]
    fn test_append_keeps_order() {
        let mut log = Diagnostics::single(Severity::Warning, 9, "late offset");
        log.append(Severity::Debug, 1, "early offset");
        assert_eq!(log[0].position(), 9);
        assert_eq!(log[1].position(), 1);
        assert_eq!(log.max_severity(), Some(Severity::Warning));
        assert!(!log.has_errors());
        assert_eq!(log.warnings().count(), 1);
    }

    #[test]
    fn test_position_is_verbatim() {
        let mut log = Diagnostics::new();
        log.append(Severity::Error, usize::MAX, "far away");
        assert_eq!(log[0].position(), usize::MAX);
        assert!(log.has_errors());
    }

    #[test]
    fn test_release() {
        let mut log = None;
        assert_eq!(Diagnostics::release(&mut log), 0);

        for i in 0..5 {
            Diagnostics::append_or_init(&mut log, Severity::Fatal, i, "boom");
        }
        assert_eq!(Diagnostics::release(&mut log), 5);
        assert!(log.is_none());
        assert_eq!(Diagnostics::release(&mut log), 0);
    }

    #[test]
    fn test_display() {
        let mut log = Diagnostics::new();
        log.warning(2, "square i9 is off the board");
        log.error(6, "unexpected character '?'");
        assert_eq!(
            log.to_string(),
            "warning at 2: square i9 is off the board\nerror at 6: unexpected character '?'"
        );
    }
}
