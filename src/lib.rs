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

//! A library for the move notation of the Croatian chess family of
//! variants.
//!
//! A [`Move`] is every [`Ply`] of one turn. A ply is the path of a single
//! piece, a chain of [`Step`]s, and each step may carry one
//! [`SideEffect`].
//!
//! # Examples
//!
//! Parse a move:
//!
//! ```
//! use crochess_notation::{Move, Role, SideEffectKind};
//!
//! let m: Move = "Nb1-c3 ~e5xf6".parse()?;
//! assert_eq!(m.plies.len(), 2);
//! assert_eq!(m.plies[0].piece.role, Role::Knight);
//!
//! let last = m.steps().last().expect("at least one step");
//! assert_eq!(last.side_effect.kind(), SideEffectKind::Capture);
//! # Ok::<_, crochess_notation::ParseMoveError>(())
//! ```
//!
//! Parse against a board of another variant, and keep going past errors:
//!
//! ```
//! use crochess_notation::{parse_move, Chessboard, Color, Diagnostics, Severity, Variant};
//!
//! let board = Chessboard::new(Variant::CroatianTies, Color::Dark);
//! let mut diagnostics = Diagnostics::new();
//!
//! let m = parse_move("Nc10-d8 ??? k9", &board, &mut diagnostics).expect("some plies parsed");
//! assert_eq!(m.plies.len(), 2);
//! assert_eq!(m.skipped, [8..11]);
//!
//! // k9 is off the 10 × 10 board, which is only a warning.
//! let severities: Vec<Severity> = diagnostics.iter().map(|d| d.severity()).collect();
//! assert_eq!(severities, [Severity::Error, Severity::Warning]);
//! ```
//!
//! Parsed moves display in canonical notation:
//!
//! ```
//! # use crochess_notation::Move;
//! let m: Move = "  A1.B2..D4  |  O-O ".parse()?;
//! assert_eq!(m.to_string(), "a1.b2..d4|O-O");
//! # Ok::<_, crochess_notation::ParseMoveError>(())
//! ```
//!
//! # Feature flags
//!
//! * `serde`: Implements [`serde::Serialize`](https://docs.rs/serde/1/serde/trait.Serialize.html)
//!   and [`serde::Deserialize`](https://docs.rs/serde/1/serde/trait.Deserialize.html) for
//!   the parsed tree and the diagnostics. Squares and variants use their
//!   natural string representations.
//! * `arbitrary`: Implements
//!   [`arbitrary::Arbitrary`](https://docs.rs/arbitrary/1/arbitrary/trait.Arbitrary.html)
//!   for the piece and board vocabulary.
//! * `nohash-hasher`: Implements
//!   [`nohash_hasher::IsEnabled`](https://docs.rs/nohash-hasher/0.2/nohash_hasher/trait.IsEnabled.html)
//!   for sensible types.

#![doc(html_root_url = "https://docs.rs/crochess-notation/0.1.0")]
#![forbid(unsafe_code)]
#![warn(missing_debug_implementations)]
#![cfg_attr(docs_rs, feature(doc_auto_cfg))]

mod castling_side;
mod color;
mod m;
mod role;
mod square;
mod types;
mod util;

pub mod board;
pub mod diagnostic;
pub mod ply;
pub mod step;
pub mod tokenizer;
pub mod variant;

pub use board::{Board, Chessboard};
pub use castling_side::CastlingSide;
pub use color::{Color, ParseColorError};
pub use diagnostic::{Diagnostic, Diagnostics, Severity};
pub use m::{next_ply_str, parse_move, Move, ParseMoveError, PlyToken, PlyTokens, MAX_NOTATION_LEN};
pub use ply::{parse_ply, Ply, PlyLink};
pub use role::Role;
pub use square::{File, ParseSquareError, Rank, Square, MAX_BOARD_SIZE};
pub use step::{SideEffect, SideEffectKind, Step, StepLink};
pub use types::Piece;
pub use variant::{ParseVariantError, Variant};

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for File {}

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for Rank {}

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for Role {}

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for Color {}
