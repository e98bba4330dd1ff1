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

use ndarray::parallel::prelude::*;
use ndarray::prelude::*;
use ndarray::Slice;
use rand::Rng;

use crate::error::{Result, ScrambleError};
use crate::grid::Grid;
use crate::key::PermutationRecord;
use crate::permutation;

#[derive(Debug, Clone, Copy)]
enum Direction {
    Scramble,
    Unscramble,
}

/// Scramble an image by rearranging its blocks into a random order.
///
/// Parameters:
/// * `arr` : Input array view in `(height, width, ...)` layout.
///   Can be multidimensional, but only the first 2 dimensions are
///   partitioned; trailing dimensions travel with their pixel.
/// * `block_size` : Edge length of the square blocks, in pixels.
///   Blocks in the last column/row are clipped to the image bounds.
/// * `random` : Random number generator.
///
/// Returns the scrambled array together with the key needed to undo it.
/// Persisting the key is the caller's responsibility.
pub fn scramble<A, D, R>(
    arr: ArrayView<'_, A, D>,
    block_size: usize,
    random: &mut R,
) -> Result<(Array<A, D>, PermutationRecord)>
where
    A: Clone + Send + Sync,
    D: Dimension,
    R: Rng + ?Sized,
{
    let grid = image_grid(&arr, block_size)?;
    let perm = permutation::random_permutation(&grid, random);
    let out = place_blocks(arr, &grid, &perm, Direction::Scramble);
    let record = PermutationRecord::new(perm, &grid);
    Ok((out, record))
}

/// Restore a scrambled image from its key.
///
/// The grid is recomputed from the presented image's own dimensions and the
/// recorded block size, so the result is pixel-identical to the pre-scramble
/// image exactly when the key belongs to it. Keys whose permutation does not
/// match the grid are rejected; a key recorded with dimensions that disagree
/// with the image is rejected up front.
pub fn unscramble<A, D>(
    arr: ArrayView<'_, A, D>,
    record: &PermutationRecord,
) -> Result<Array<A, D>>
where
    A: Clone + Send + Sync,
    D: Dimension,
{
    let grid = image_grid(&arr, record.block_size)?;

    if let (Some(w), Some(h)) = (record.width, record.height) {
        if (w, h) != (grid.width(), grid.height()) {
            return Err(ScrambleError::InvalidParameter(format!(
                "key was made for a {w}x{h} image, got {}x{}",
                grid.width(),
                grid.height(),
            )));
        }
    }
    permutation::validate(&record.permutation, &grid)?;

    Ok(place_blocks(
        arr,
        &grid,
        &record.permutation,
        Direction::Unscramble,
    ))
}

fn image_grid<A, D>(arr: &ArrayView<'_, A, D>, block_size: usize) -> Result<Grid>
where
    D: Dimension,
{
    let shape = arr.shape();
    if shape.len() < 2 {
        return Err(ScrambleError::InvalidParameter(format!(
            "image array must have at least 2 dimensions, got {}",
            shape.len()
        )));
    }
    Grid::new(shape[1], shape[0], block_size)
}

/// Copy every block to its permuted cell.
///
/// `perm[dest] = src` when scrambling; unscrambling runs the same mapping
/// backwards. `perm` must be a bijection that only maps between cells of
/// identical pixel size.
fn place_blocks<A, D>(
    arr: ArrayView<'_, A, D>,
    grid: &Grid,
    perm: &[usize],
    direction: Direction,
) -> Array<A, D>
where
    A: Clone + Send + Sync,
    D: Dimension,
{
    let moves: Vec<_> = (0..grid.len())
        .map(|i| match direction {
            Direction::Scramble => (grid.cell(perm[i]), grid.cell(i)),
            Direction::Unscramble => (grid.cell(i), grid.cell(perm[i])),
        })
        .collect();

    let mut out = arr.to_owned();

    let arr = arr.view();
    let out_view = out.view_mut();

    moves.par_iter().for_each(move |&(from, to)| {
        debug_assert_eq!((from.w, from.h), (to.w, to.h));

        let mut arr = arr.view();
        arr.slice_axis_inplace(Axis(0), Slice::from(from.y..from.y + from.h));
        arr.slice_axis_inplace(Axis(1), Slice::from(from.x..from.x + from.w));

        let mut out = out_view.raw_view();
        out.slice_axis_inplace(Axis(0), Slice::from(to.y..to.y + to.h));
        out.slice_axis_inplace(Axis(1), Slice::from(to.x..to.x + to.w));

        // SAFETY: `perm` is a bijection, so destination cells are
        // guaranteed to be non-overlapping.
        azip!((d in out, s in arr) unsafe {
            (*(d as *mut A)).clone_from(s)
        });
    });

    out
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    use super::*;

    fn test_image(width: usize, height: usize) -> Array3<u8> {
        Array3::from_shape_fn((height, width, 3), |(y, x, c)| {
            ((x * 3 + y * 7 + c * 11) % 251) as u8
        })
    }

    #[test]
    fn round_trip_exact_multiple() {
        let img = test_image(64, 64);
        let mut random = Xoshiro256StarStar::seed_from_u64(1);
        let (scrambled, record) = scramble(img.view(), 32, &mut random).unwrap();
        assert_eq!(unscramble(scrambled.view(), &record).unwrap(), img);
    }

    #[test]
    fn round_trip_ragged_edges() {
        for (w, h, bs) in [(100, 100, 32), (37, 23, 8), (5, 5, 3)] {
            let img = test_image(w, h);
            let mut random = Xoshiro256StarStar::seed_from_u64(2);
            let (scrambled, record) = scramble(img.view(), bs, &mut random).unwrap();
            assert_eq!(
                unscramble(scrambled.view(), &record).unwrap(),
                img,
                "round trip failed for {w}x{h} blocks of {bs}"
            );
        }
    }

    #[test]
    fn round_trip_block_larger_than_image() {
        let img = test_image(10, 7);
        let mut random = Xoshiro256StarStar::seed_from_u64(3);
        let (scrambled, record) = scramble(img.view(), 32, &mut random).unwrap();
        // Single block, so scrambling is the identity.
        assert_eq!(scrambled, img);
        assert_eq!(record.permutation, [0]);
        assert_eq!(unscramble(scrambled.view(), &record).unwrap(), img);
    }

    #[test]
    fn round_trip_two_dimensional_array() {
        let img = Array2::from_shape_fn((48, 80), |(y, x)| (x * 31 + y * 17) as u16);
        let mut random = Xoshiro256StarStar::seed_from_u64(4);
        let (scrambled, record) = scramble(img.view(), 16, &mut random).unwrap();
        assert_eq!(unscramble(scrambled.view(), &record).unwrap(), img);
    }

    #[test]
    fn scrambled_output_differs_from_input() {
        let img = test_image(128, 128);
        let mut random = Xoshiro256StarStar::seed_from_u64(5);
        let (scrambled, _) = scramble(img.view(), 16, &mut random).unwrap();
        assert_ne!(scrambled, img);
    }

    #[test]
    fn record_carries_grid_parameters() {
        let img = test_image(100, 60);
        let mut random = Xoshiro256StarStar::seed_from_u64(6);
        let (_, record) = scramble(img.view(), 32, &mut random).unwrap();
        assert_eq!(record.block_size, 32);
        assert_eq!(record.width, Some(100));
        assert_eq!(record.height, Some(60));
        assert_eq!(record.permutation.len(), 4 * 2);
    }

    #[test]
    fn same_seed_reproduces_scramble() {
        let img = test_image(96, 64);
        let run = |seed| {
            let mut random = Xoshiro256StarStar::seed_from_u64(seed);
            scramble(img.view(), 16, &mut random).unwrap()
        };
        let (a, ra) = run(9);
        let (b, rb) = run(9);
        assert_eq!(a, b);
        assert_eq!(ra, rb);
    }

    #[test]
    fn four_block_scenario() {
        // 2x2 grid of 32 pixel blocks, each quadrant filled with its own
        // index value.
        let grid = Grid::new(64, 64, 32).unwrap();
        let mut img = Array3::<u8>::zeros((64, 64, 3));
        for block in grid.blocks() {
            img.slice_mut(s![
                block.y..block.y + block.h,
                block.x..block.x + block.w,
                ..
            ])
            .fill(block.index as u8);
        }

        let record = PermutationRecord {
            permutation: vec![2, 0, 3, 1],
            block_size: 32,
            width: Some(64),
            height: Some(64),
        };

        let scrambled = place_blocks(img.view(), &grid, &record.permutation, Direction::Scramble);
        for (dest, &src) in record.permutation.iter().enumerate() {
            let b = grid.cell(dest);
            let cell = scrambled.slice(s![b.y..b.y + b.h, b.x..b.x + b.w, ..]);
            assert!(
                cell.iter().all(|&v| v == src as u8),
                "cell {dest} should hold block {src}"
            );
        }

        assert_eq!(unscramble(scrambled.view(), &record).unwrap(), img);
    }

    #[test]
    fn zero_block_size_rejected() {
        let img = test_image(64, 64);
        let mut random = Xoshiro256StarStar::seed_from_u64(10);
        assert!(matches!(
            scramble(img.view(), 0, &mut random),
            Err(ScrambleError::InvalidParameter(_))
        ));
    }

    #[test]
    fn unscramble_rejects_wrong_length_key() {
        let img = test_image(64, 64);
        let record = PermutationRecord {
            permutation: vec![0, 1, 2],
            block_size: 32,
            width: None,
            height: None,
        };
        assert!(matches!(
            unscramble(img.view(), &record),
            Err(ScrambleError::PermutationSizeMismatch {
                expected: 4,
                found: 3,
            })
        ));
    }

    #[test]
    fn unscramble_rejects_non_bijective_key() {
        let img = test_image(64, 64);
        let record = PermutationRecord {
            permutation: vec![0, 1, 2, 2],
            block_size: 32,
            width: None,
            height: None,
        };
        assert!(matches!(
            unscramble(img.view(), &record),
            Err(ScrambleError::InvalidPermutation(_))
        ));
    }

    #[test]
    fn unscramble_rejects_wrong_dimensions() {
        let img = test_image(64, 64);
        let record = PermutationRecord {
            permutation: vec![0, 1, 2, 3],
            block_size: 32,
            width: Some(128),
            height: Some(128),
        };
        assert!(matches!(
            unscramble(img.view(), &record),
            Err(ScrambleError::InvalidParameter(_))
        ));
    }

    #[test]
    fn unscramble_rejects_cross_size_key() {
        let img = test_image(100, 100);
        let grid = Grid::new(100, 100, 32).unwrap();
        let mut perm: Vec<usize> = (0..grid.len()).collect();
        perm.swap(0, 3);
        let record = PermutationRecord::new(perm, &grid);
        assert!(matches!(
            unscramble(img.view(), &record),
            Err(ScrambleError::GeometryMismatch { .. })
        ));
    }

    #[test]
    fn key_without_dimensions_still_unscrambles() {
        let img = test_image(100, 100);
        let mut random = Xoshiro256StarStar::seed_from_u64(12);
        let (scrambled, mut record) = scramble(img.view(), 32, &mut random).unwrap();
        record.width = None;
        record.height = None;
        assert_eq!(unscramble(scrambled.view(), &record).unwrap(), img);
    }
}
