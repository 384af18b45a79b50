/*
semicircle.rs

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

//! Semicircle sockets.
//!
//! A circular socket is only filled by two complementary halves, both coming from other
//! panels.
//! With the loose comparison the halves can have any color.
//! With the strict comparison both halves have the color of the socket.

use log::debug;
use rand::seq::IndexedRandom;

use super::{Technique, deposit_plug, new_socket};
use crate::generator::session::{CoverRole, PanelDraft, Session};
use crate::model::{Element, Shape, SizeComparison};

/// Diameters of the sockets.
const SIZES: [f64; 2] = [1.5, 2.0];

pub struct Semicircle;

impl Technique for Semicircle {
    fn name(&self) -> &'static str {
        "semicircle"
    }

    fn priority(&self) -> i32 {
        5
    }

    fn has_plug_and_socket(&self) -> bool {
        true
    }

    fn apply(&self, panel: &mut PanelDraft, session: &mut Session) -> bool {
        let size: f64 = *SIZES.choose(&mut session.rng).unwrap_or(&SIZES[0]);
        let Some(rect) = panel.allocate(Shape::Circle, size, size, &mut session.rng) else {
            debug!("    No room for a semicircle socket");
            return false;
        };
        let color: u8 = session.random_color();
        let strict: bool = session.chance(0.5);
        let mut socket: Element = new_socket(session, Shape::Circle, size, size, color, rect);
        socket.comparison = Some(if strict {
            SizeComparison::Strict
        } else {
            SizeComparison::Equal
        });
        debug!("    Semicircle socket {} {size}x{size}", socket.id);
        let idx: usize = panel.push(socket);
        panel.add_coverable(idx, CoverRole::Socket);

        let half: f64 = size / 2.0;
        let halves: [(Shape, f64, f64); 2] = if session.chance(0.5) {
            [
                (Shape::SemicircleLeft, half, size),
                (Shape::SemicircleRight, half, size),
            ]
        } else {
            [
                (Shape::SemicircleTop, size, half),
                (Shape::SemicircleBottom, size, half),
            ]
        };
        for (shape, width, height) in halves {
            let c: u8 = if strict { color } else { session.random_color() };
            deposit_plug(session, panel.index, shape, width, height, c);
        }
        true
    }
}
