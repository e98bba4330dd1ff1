//! Main Program for Blockscramble
//! Run with `--help` for more instruction

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
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Error};
use clap::{Parser, Subcommand};
use image::io::Reader as ImageReader;
use image::{save_buffer, ColorType};
use ndarray::Array3;
use rand::SeedableRng;
use sha2::{Digest, Sha256};

use blockscramble::{scramble, unscramble, PermutationRecord};

#[derive(Parser, Debug)]
#[command(author, version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Shuffle the blocks of an image, writing the key needed to undo it
    Scramble {
        /// Input file
        input: PathBuf,

        /// Output file
        #[arg(short = 'o', long)]
        output: PathBuf,

        /// Block size in pixels
        #[arg(short = 'b', long, default_value_t = 32)]
        block_size: usize,

        /// Key file (defaults to `<output>.key.json`)
        #[arg(short = 'k', long)]
        key: Option<PathBuf>,

        /// Random seed
        #[arg(long)]
        seed: Option<String>,
    },

    /// Restore a scrambled image from its key file
    Unscramble {
        /// Input file
        input: PathBuf,

        /// Output file
        #[arg(short = 'o', long)]
        output: PathBuf,

        /// Key file (defaults to `<input>.key.json`)
        #[arg(short = 'k', long)]
        key: Option<PathBuf>,
    },
}

fn main() -> Result<(), Error> {
    let args = Args::parse();

    match args.command {
        Command::Scramble {
            input,
            output,
            block_size,
            key,
            seed,
        } => {
            let mut random = if let Some(seed) = seed {
                let mut hasher = Sha256::new();
                hasher.update(seed);

                rand_xoshiro::Xoshiro256StarStar::from_seed(hasher.finalize().into())
            } else {
                rand_xoshiro::Xoshiro256StarStar::from_entropy()
            };

            let (arr, width, height) = load_rgb(&input)?;
            let (out, record) = scramble(arr.view(), block_size, &mut random)?;

            save_buffer(
                &output,
                out.as_slice().expect("Should be standard-layout"),
                width,
                height,
                ColorType::Rgb8,
            )?;

            let key = key.unwrap_or_else(|| default_key_path(&output));
            record
                .save(&key)
                .with_context(|| format!("Failed to write key file {}", key.display()))?;
            println!("Key saved to {}", key.display());
        }
        Command::Unscramble { input, output, key } => {
            let key = key.unwrap_or_else(|| default_key_path(&input));
            let record = PermutationRecord::load(&key)
                .with_context(|| format!("Failed to read key file {}", key.display()))?;

            let (arr, width, height) = load_rgb(&input)?;
            let out = unscramble(arr.view(), &record)?;

            save_buffer(
                &output,
                out.as_slice().expect("Should be standard-layout"),
                width,
                height,
                ColorType::Rgb8,
            )?;
        }
    }

    Ok(())
}

/// Decode an image and flatten it to a `(height, width, 3)` RGB array.
fn load_rgb(path: &Path) -> Result<(Array3<u8>, u32, u32), Error> {
    let file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let im = ImageReader::new(BufReader::new(file))
        .with_guessed_format()?
        .decode()?
        .into_rgb8();

    let (width, height) = im.dimensions();
    let arr = Array3::from_shape_vec((height as usize, width as usize, 3), im.into_raw())?;
    Ok((arr, width, height))
}

fn default_key_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".key.json");
    PathBuf::from(name)
}
