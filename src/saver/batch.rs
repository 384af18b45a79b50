/*
batch.rs

Copyright 2025 Hervé Quatremain

This file is part of Puzzlebox.

Puzzlebox is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Puzzlebox is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Puzzlebox. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Save and restore batches of generated puzzle boxes.
//!
//! A batch records the generation parameters and the puzzle string of each puzzle box.
//! The saved object is a serialization of the [`PuzzleBatch`] object in JSON format by
//! using [`serde`].

use chrono::Local;
use log::debug;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::PathBuf;

use crate::generator::difficulty::Difficulty;
use crate::model::Puzzle;
use crate::puzzle_parse::parse_puzzle;

/// Puzzle boxes generated together.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PuzzleBatch {
    /// Local date and time of the generation, in RFC 3339 format.
    pub created: String,

    pub difficulty: Difficulty,

    /// Seed of the first puzzle box. The following boxes use the next seeds.
    pub seed: Option<u64>,

    /// Puzzle strings.
    pub puzzles: Vec<String>,
}

impl PuzzleBatch {
    /// Create a [`PuzzleBatch`] object, dated now.
    pub fn new(difficulty: Difficulty, seed: Option<u64>, puzzles: &[Puzzle]) -> Self {
        Self {
            created: Local::now().to_rfc3339(),
            difficulty,
            seed,
            puzzles: puzzles.iter().map(|p| p.to_string()).collect(),
        }
    }

    /// Parse the puzzle strings of the batch.
    pub fn puzzles(&self) -> Result<Vec<Puzzle>, Box<dyn Error>> {
        let mut puzzles: Vec<Puzzle> = Vec::new();
        for s in &self.puzzles {
            puzzles.push(parse_puzzle(s)?);
        }
        Ok(puzzles)
    }
}

/// Object to save and restore a batch of puzzle boxes.
pub struct SaverBatch {
    /// Path to the save file.
    save_file: PathBuf,
}

impl SaverBatch {
    /// Create a [`SaverBatch`] object for the given file.
    pub fn new(save_file: PathBuf) -> Self {
        debug!("Batch file: {save_file:?}");
        Self { save_file }
    }

    /// Retrieve the [`PuzzleBatch`] object from the file.
    ///
    /// Return None if the file does not exist.
    pub fn get_batch(&self) -> Result<Option<PuzzleBatch>, Box<dyn Error>> {
        let file: File = match File::open(&self.save_file) {
            Ok(f) => f,
            Err(error) => match error.kind() {
                ErrorKind::NotFound => return Ok(None),
                _ => return Err(Box::new(error)),
            },
        };
        let reader: BufReader<File> = BufReader::new(file);
        let batch: PuzzleBatch = serde_json::from_reader(reader)?;
        Ok(Some(batch))
    }

    /// Save the provided [`PuzzleBatch`] object.
    pub fn save_batch(&self, batch: &PuzzleBatch) -> Result<(), Box<dyn Error>> {
        let file: File = File::create(&self.save_file)?;
        let mut writer: BufWriter<File> = BufWriter::new(file);

        serde_json::to_writer_pretty(&mut writer, batch)?;
        writer.flush()?;
        Ok(())
    }
}
