// Copyright (C) 2023 Dheatly23
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScrambleError>;

/// Errors produced by the scramble/unscramble core and key persistence.
#[derive(Debug, Error)]
pub enum ScrambleError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The key's permutation length disagrees with the grid derived from
    /// the presented image.
    #[error("permutation has {found} entries, expected {expected}")]
    PermutationSizeMismatch { expected: usize, found: usize },

    /// The permutation is not a bijection over the block indices.
    #[error("invalid permutation: {0}")]
    InvalidPermutation(String),

    /// A block is mapped into a cell of a different pixel size.
    #[error(
        "block {index} ({src_w}x{src_h}) does not fit its target cell ({dst_w}x{dst_h})"
    )]
    GeometryMismatch {
        index: usize,
        src_w: usize,
        src_h: usize,
        dst_w: usize,
        dst_h: usize,
    },

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
