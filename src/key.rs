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

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::grid::Grid;

/// Persisted scramble key: the permutation plus the grid parameters needed
/// to rebuild block geometry.
///
/// `permutation[dest_position] = source_index`. Width and height are always
/// written; they are optional on load so a trimmed key still works, at the
/// cost of skipping the dimension check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermutationRecord {
    pub permutation: Vec<usize>,
    pub block_size: usize,
    #[serde(default)]
    pub width: Option<usize>,
    #[serde(default)]
    pub height: Option<usize>,
}

impl PermutationRecord {
    pub fn new(permutation: Vec<usize>, grid: &Grid) -> Self {
        PermutationRecord {
            permutation,
            block_size: grid.block_size(),
            width: Some(grid.width()),
            height: Some(grid.height()),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let file = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(file)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let file = BufWriter::new(File::create(path)?);
        serde_json::to_writer(file, self)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> PermutationRecord {
        PermutationRecord {
            permutation: vec![2, 0, 3, 1],
            block_size: 32,
            width: Some(64),
            height: Some(64),
        }
    }

    #[test]
    fn json_round_trip_is_lossless() {
        let json = serde_json::to_string(&record()).unwrap();
        let back: PermutationRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record());
    }

    #[test]
    fn dimensions_are_optional_on_load() {
        let back: PermutationRecord =
            serde_json::from_str(r#"{"permutation":[1,0],"block_size":16}"#).unwrap();
        assert_eq!(back.permutation, [1, 0]);
        assert_eq!(back.block_size, 16);
        assert_eq!(back.width, None);
        assert_eq!(back.height, None);
    }

    #[test]
    fn save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png.key.json");
        record().save(&path).unwrap();
        assert_eq!(PermutationRecord::load(&path).unwrap(), record());
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = PermutationRecord::load(&dir.path().join("nope.key.json")).unwrap_err();
        assert!(matches!(err, crate::error::ScrambleError::Io(_)));
    }
}
