/*
cli_options.rs

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

//! Process command-line options.
//!
//! These options are intended for developers creating puzzle boxes.
//!
//! # Examples
//!
//! Generate three puzzle boxes at the hard difficulty level, reproducibly:
//!
//! ```text
//! $ puzzlebox -c 3 -f hard --seed 42
//! Well done!/blue:c1 1x1 2x3- 0 2 =,...
//! ```
//!
//! Check a puzzle string and print it back in its canonical form:
//!
//! ```text
//! $ puzzlebox --check "Great job! [star]/blue:w1 1x1 3x3 0 0-6-3 tap state 1"
//! Great job! [star]/blue:w1 1x1 3x3 0 0-6-3 tap state 1
//! ```

use clap::Parser;
use log::{debug, error};
use std::env;
use std::path::PathBuf;

use puzzlebox::config::COPYRIGHT_NOTICE;
use puzzlebox::generator::box_generator::{BoxGenerator, GeneratorConfig};
use puzzlebox::generator::difficulty::Difficulty;
use puzzlebox::model::Puzzle;
use puzzlebox::puzzle_parse::PuzzleParse;
use puzzlebox::saver::batch::{PuzzleBatch, SaverBatch};

/// Generate random puzzle boxes.
#[derive(Parser)]
#[command(about, long_about = None, version, long_version = COPYRIGHT_NOTICE)]
struct Args {
    /// Number of puzzle boxes to generate
    #[arg(short, long, default_value_t = 1)]
    count: usize,

    /// Difficulty level for the puzzle boxes
    #[arg(value_enum, short = 'f', long, default_value_t = Difficulty::Medium)]
    difficulty: Difficulty,

    /// Number of panels, not counting the extra panels for the leftover plugs
    #[arg(short, long)]
    panels: Option<usize>,

    /// Seed for the first puzzle box. The following boxes use the next seeds
    #[arg(long)]
    seed: Option<u64>,

    /// Cover every element that can be covered
    #[arg(long, default_value_t = false)]
    force_covers: bool,

    /// Victory message
    #[arg(short, long, default_value = "Well done!")]
    message: String,

    /// Reward revealed with the victory message
    #[arg(short, long)]
    reward: Option<String>,

    /// Print the puzzle boxes in JSON instead of puzzle strings
    #[arg(short, long, default_value_t = false)]
    json: bool,

    /// Parse a puzzle string and print it back
    #[arg(long, value_name = "PUZZLE", conflicts_with = "count")]
    check: Option<String>,

    /// Read the puzzle boxes back from a file saved with --output, and print them
    #[arg(short, long, value_name = "FILE", conflicts_with_all = ["count", "check"])]
    batch: Option<PathBuf>,

    /// Save the puzzle strings in a JSON file
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Print some statistics after generating the puzzle boxes
    #[arg(short, long, default_value_t = false)]
    summary: bool,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

/// Parse a puzzle string and print it in its canonical form.
fn check(source: &str, json: bool) -> u8 {
    let mut parser: PuzzleParse = PuzzleParse::new(source);
    let puzzle: Puzzle = match parser.parse() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("{e}");
            return 1;
        }
    };
    for warning in &parser.warnings {
        eprintln!("Warning: {warning}");
    }
    print_puzzle(&puzzle, json);
    if parser.warnings.is_empty() { 0 } else { 2 }
}

/// Print the puzzle boxes of a saved batch.
fn read_batch(path: PathBuf, json: bool) -> u8 {
    let batch: PuzzleBatch = match SaverBatch::new(path.clone()).get_batch() {
        Ok(Some(b)) => b,
        Ok(None) => {
            eprintln!("{}: no such file", path.display());
            return 1;
        }
        Err(e) => {
            eprintln!("Cannot read {}: {e}", path.display());
            return 1;
        }
    };
    debug!(
        "Batch of {} puzzle box(es), {}, created {}",
        batch.puzzles.len(),
        batch.difficulty,
        batch.created
    );
    match batch.puzzles() {
        Ok(puzzles) => {
            for puzzle in &puzzles {
                print_puzzle(puzzle, json);
            }
            0
        }
        Err(e) => {
            eprintln!("Invalid puzzle in {}: {e}", path.display());
            1
        }
    }
}

/// Print the puzzle as a puzzle string or in JSON.
fn print_puzzle(puzzle: &Puzzle, json: bool) {
    if !json {
        println!("{puzzle}");
        return;
    }
    match serde_json::to_string_pretty(puzzle) {
        Ok(s) => println!("{s}"),
        Err(e) => error!("Cannot convert the puzzle to JSON: {e}"),
    }
}

/// Parse and process command-line options.
///
/// Return the exit code.
pub fn run() -> u8 {
    let args: Args = Args::parse();

    if args.debug {
        unsafe {
            env::set_var("RUST_LOG", "debug");
        }
    }
    env_logger::init();

    if let Some(source) = &args.check {
        return check(source, args.json);
    }
    if let Some(path) = args.batch {
        return read_batch(path, args.json);
    }

    let mut puzzles: Vec<Puzzle> = Vec::new();
    let mut extra_panels: usize = 0;
    let mut dropped: usize = 0;
    for i in 0..args.count {
        debug!("Puzzle box {i}");
        let mut generator: BoxGenerator = BoxGenerator::new(GeneratorConfig {
            difficulty: args.difficulty,
            panels: args.panels,
            seed: args.seed.map(|s| s.wrapping_add(i as u64)),
            force_covers: args.force_covers,
            message: args.message.clone(),
            reward: args.reward.clone(),
        });
        let puzzle: Puzzle = generator.generate();
        extra_panels += generator.report.last_resort_panels;
        dropped += generator.report.dropped_plugs.len();
        print_puzzle(&puzzle, args.json);
        puzzles.push(puzzle);
    }

    if let Some(path) = args.output {
        let batch: PuzzleBatch = PuzzleBatch::new(args.difficulty, args.seed, &puzzles);
        if let Err(e) = SaverBatch::new(path.clone()).save_batch(&batch) {
            eprintln!("Cannot save the puzzle boxes to {}: {e}", path.display());
            return 1;
        }
    }

    if args.summary {
        let panels: usize = puzzles.iter().map(|p| p.panels.len()).sum();
        let elements: usize = puzzles.iter().map(|p| p.num_elements()).sum();
        eprintln!(
            "
      puzzle boxes = {}
            panels = {panels}
      extra panels = {extra_panels}
          elements = {elements}
     dropped plugs = {dropped}",
            puzzles.len()
        );
    }
    0
}
