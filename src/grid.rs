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

use crate::error::{Result, ScrambleError};

/// Pixel extent of a single grid cell.
///
/// `index` is the cell's row-major position (`row * cols + col`). Cells in
/// the last column/row are clipped to the remaining pixels, so `w`/`h` may
/// be smaller than the grid's block size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub index: usize,
    pub x: usize,
    pub y: usize,
    pub w: usize,
    pub h: usize,
}

/// Block geometry derived from image dimensions and a block size.
///
/// The grid depends on nothing else, so scrambling and unscrambling can
/// recompute it independently and always agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    block_size: usize,
    cols: usize,
    rows: usize,
}

impl Grid {
    pub fn new(width: usize, height: usize, block_size: usize) -> Result<Self> {
        if block_size == 0 {
            return Err(ScrambleError::InvalidParameter(
                "block size must be at least 1".into(),
            ));
        }

        Ok(Grid {
            width,
            height,
            block_size,
            cols: width.div_ceil(block_size),
            rows: height.div_ceil(block_size),
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cols * self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Extent of the cell at `index`. Requires `index < self.len()`.
    pub fn cell(&self, index: usize) -> Block {
        debug_assert!(index < self.len());

        let x = (index % self.cols) * self.block_size;
        let y = (index / self.cols) * self.block_size;
        Block {
            index,
            x,
            y,
            w: self.block_size.min(self.width - x),
            h: self.block_size.min(self.height - y),
        }
    }

    /// All cells in row-major order (left-to-right, top-to-bottom).
    pub fn blocks(&self) -> impl Iterator<Item = Block> + '_ {
        (0..self.len()).map(|i| self.cell(i))
    }
}
