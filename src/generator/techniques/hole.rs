/*
hole.rs

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

//! Holes: sunken sockets waiting for a plug from another panel.

use log::debug;
use rand::Rng;
use rand::seq::IndexedRandom;

use super::{Technique, deposit_plug, new_socket};
use crate::generator::session::{CoverRole, PanelDraft, Session};
use crate::model::{Element, Shape, SizeComparison};

/// Shapes and sizes of the holes.
const HOLES: [(Shape, f64, f64); 9] = [
    (Shape::Circle, 1.0, 1.0),
    (Shape::Circle, 1.5, 1.5),
    (Shape::Circle, 2.0, 2.0),
    (Shape::Rectangle, 1.0, 1.0),
    (Shape::Rectangle, 1.0, 2.0),
    (Shape::Rectangle, 2.0, 1.0),
    (Shape::Triangle, 1.0, 1.0),
    (Shape::Plus, 1.5, 1.5),
    (Shape::Diamond, 1.0, 1.0),
];

pub struct Hole;

impl Technique for Hole {
    fn name(&self) -> &'static str {
        "hole"
    }

    fn priority(&self) -> i32 {
        3
    }

    fn has_plug_and_socket(&self) -> bool {
        true
    }

    fn apply(&self, panel: &mut PanelDraft, session: &mut Session) -> bool {
        let count: usize = session.rng.random_range(1..=3);
        let mut placed: usize = 0;

        for _ in 0..count {
            let Some(&(shape, width, height)) = HOLES.choose(&mut session.rng) else {
                break;
            };
            let Some(rect) = panel.allocate(shape, width, height, &mut session.rng) else {
                break;
            };
            let color: u8 = session.random_color();
            let mut socket: Element = new_socket(session, shape, width, height, color, rect);
            socket.comparison = Some(SizeComparison::Equal);
            debug!(
                "    Hole {} {width}x{height} at {},{}",
                socket.id, socket.x, socket.y
            );
            let idx: usize = panel.push(socket);
            panel.add_coverable(idx, CoverRole::Socket);
            deposit_plug(session, panel.index, shape, width, height, color);
            placed += 1;
        }
        placed > 0
    }
}
