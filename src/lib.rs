/*
lib.rs

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

//! Generate mechanical puzzle boxes.
//!
//! A puzzle box is a stack of panels.
//! Each panel is an 8x8 grid of elements (sockets, plugs, switches, screws...) that the player
//! must solve to open the panel and reach the next one.
//! Plugs found on the outer panels fill the sockets of the inner panels.
//!
//! A puzzle box is stored as a single puzzle string.
//! [`puzzle_parse`] reads puzzle strings, [`puzzle_format`] writes them, and [`generator`]
//! creates random puzzle boxes.

pub mod config;
pub mod generator;
pub mod model;
pub mod puzzle_format;
pub mod puzzle_parse;
pub mod saver;

pub use generator::box_generator::{BoxGenerator, GenerationReport, GeneratorConfig};
pub use generator::difficulty::Difficulty;
pub use model::{Element, Panel, Puzzle};
pub use puzzle_parse::{ParseError, parse_puzzle};
