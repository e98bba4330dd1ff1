//! Library to scramble an image by rearranging its blocks.
//!
//! An image is partitioned into square blocks of a chosen size (blocks in
//! the last column/row are clipped to the image bounds), and the blocks are
//! moved into randomly permuted grid cells such that:
//!
//! * No pixel is duplicated nor removed.
//! * All pixels in a block move together.
//! * The permutation, returned as a [PermutationRecord], undoes the
//!   scramble exactly: [unscramble] restores the original pixel-for-pixel.
//!
//! This is a visual shuffle, not a cipher. The record is a lookup table,
//! not a secret-strength key.

// Copyright (C) 2023 Dheatly23
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Lesser General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Lesser General Public License for more details.
//
// You should have received a copy of the GNU Lesser General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.
//

mod error;
mod grid;
mod key;
mod permutation;
mod scramble;

pub use crate::error::{Result, ScrambleError};
pub use crate::grid::{Block, Grid};
pub use crate::key::PermutationRecord;
pub use crate::permutation::random_permutation;
#[doc(inline)]
pub use crate::scramble::{scramble, unscramble};
