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

use rand::prelude::*;

use crate::error::{Result, ScrambleError};
use crate::grid::Grid;

/// Draw a random bijection over the grid's cell indices.
///
/// The value at position `dest` is the index of the block that lands in cell
/// `dest`. Cells are only exchanged with cells of identical pixel size, so a
/// clipped edge block never has to fill a full-size cell (and vice versa);
/// with dimensions that are exact multiples of the block size every cell has
/// the same size and all orderings are equally likely.
pub fn random_permutation<R>(grid: &Grid, random: &mut R) -> Vec<usize>
where
    R: Rng + ?Sized,
{
    // At most four size classes: interior, right edge, bottom edge, corner.
    let mut classes: Vec<((usize, usize), Vec<usize>)> = Vec::with_capacity(4);
    for block in grid.blocks() {
        let size = (block.w, block.h);
        match classes.iter_mut().find(|(s, _)| *s == size) {
            Some((_, cells)) => cells.push(block.index),
            None => classes.push((size, vec![block.index])),
        }
    }

    let mut perm = vec![0usize; grid.len()];
    for (_, cells) in &classes {
        let mut sources = cells.clone();
        sources.shuffle(&mut *random);
        for (&dest, &src) in cells.iter().zip(&sources) {
            perm[dest] = src;
        }
    }
    perm
}

/// Check that `perm` can place blocks on `grid`.
///
/// Rejects wrong lengths, non-bijections, and permutations that map a block
/// into a cell of a different pixel size.
pub fn validate(perm: &[usize], grid: &Grid) -> Result<()> {
    let n = grid.len();
    if perm.len() != n {
        return Err(ScrambleError::PermutationSizeMismatch {
            expected: n,
            found: perm.len(),
        });
    }

    let mut seen = vec![false; n];
    for &src in perm {
        if src >= n {
            return Err(ScrambleError::InvalidPermutation(format!(
                "index {src} out of range for {n} blocks"
            )));
        }
        if seen[src] {
            return Err(ScrambleError::InvalidPermutation(format!(
                "index {src} appears more than once"
            )));
        }
        seen[src] = true;
    }

    for (dest, &src) in perm.iter().enumerate() {
        let s = grid.cell(src);
        let d = grid.cell(dest);
        if (s.w, s.h) != (d.w, d.h) {
            return Err(ScrambleError::GeometryMismatch {
                index: src,
                src_w: s.w,
                src_h: s.h,
                dst_w: d.w,
                dst_h: d.h,
            });
        }
    }

    Ok(())
}
