/*
generator.rs

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

//! Generate random puzzle boxes.
//!
//! The [`box_generator::BoxGenerator`] object drives the generation.
//! It builds the panels one after the other, from the innermost to the outermost, in
//! [`session::PanelDraft`] objects:
//!
//! * The [`techniques`] add mechanisms to the panel.
//!   Techniques that create sockets deposit the matching plugs in the [`plugs::PlugPool`].
//! * Plugs from the pool are placed on the panel.
//!   A plug is never placed on the panel of its socket.
//! * The [`covers`] hide or lock some of the elements.
//!
//! Every element reserves cells in the [`grid::Grid`] of its panel, so that elements never
//! overlap.
//! All the random choices come from the random number generator of the [`session::Session`],
//! which makes the generation reproducible when a seed is provided.

pub mod box_generator;
pub mod covers;
pub mod difficulty;
pub mod goal;
pub mod grid;
pub mod plugs;
pub mod remote;
pub mod session;
pub mod techniques;
