/*
screw.rs

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

//! Screws.
//!
//! A screw sits on top of a small hole.
//! The player unscrews it by holding it while it turns, and can then drag it away to reveal
//! the hole.
//! The hole is either empty or a socket that waits for a plug from another panel.

use log::debug;
use rand::Rng;

use super::{Technique, deposit_plug};
use crate::generator::session::{CoverRole, PanelDraft, Session};
use crate::model::{
    ChangeKind, Element, ElementColor, Elevation, InteractionMethod, RemoteAction, Shape,
    SizeComparison,
};

/// Diameter of the screws.
const SCREW_SIZE: f64 = 1.6;

/// Diameter of the holes under the screws.
const HOLE_SIZE: f64 = SCREW_SIZE / 2.0;

pub struct Screw;

impl Technique for Screw {
    fn name(&self) -> &'static str {
        "screw"
    }

    fn priority(&self) -> i32 {
        4
    }

    fn has_plug_and_socket(&self) -> bool {
        true
    }

    fn apply(&self, panel: &mut PanelDraft, session: &mut Session) -> bool {
        let count: usize = session.rng.random_range(1..=3);
        let mut placed: usize = 0;

        for i in 0..count {
            let Some(rect) =
                panel.allocate(Shape::Screw, SCREW_SIZE, SCREW_SIZE, &mut session.rng)
            else {
                break;
            };

            // Hole, centered under the screw
            let offset: f64 = (rect.w as f64 - HOLE_SIZE) / 2.0;
            let color: u8 = session.random_color();
            let mut hole: Element = session.new_element(Shape::Circle, HOLE_SIZE, HOLE_SIZE);
            hole.set_position(rect.x as f64 + offset, rect.y as f64 + offset);
            hole.elevation = Elevation::Sunken;
            hole.color = ElementColor::Plain(color);
            let is_socket: bool = (session.require_plug && i == 0) || session.chance(0.5);
            if is_socket {
                let strict: f64 = session.profile.strict_probability;
                hole.comparison = Some(if session.chance(strict) {
                    SizeComparison::Strict
                } else {
                    SizeComparison::Equal
                });
                deposit_plug(session, panel.index, Shape::Circle, HOLE_SIZE, HOLE_SIZE, color);
                panel.filled_sockets.push(hole.id.clone());
            }
            let hole_id: String = hole.id.clone();
            panel.push(hole);

            // Screw
            let mut screw: Element = session.new_element(Shape::Screw, SCREW_SIZE, SCREW_SIZE);
            screw.set_position(rect.x as f64, rect.y as f64);
            screw.elevation = Elevation::Raised;
            screw.color = ElementColor::Plain(session.random_color());
            screw.rotation = session.rng.random_range(0..8);
            let turns: i32 = session.rng.random_range(2..=4);
            screw.set_interaction(InteractionMethod::Hold, ChangeKind::Rotate, turns);
            let release: RemoteAction = RemoteAction::release(&screw.id);
            screw.remote_actions.push(release);
            debug!(
                "    Screw {} over hole {hole_id} at {},{}",
                screw.id, rect.x, rect.y
            );
            let idx: usize = panel.push(screw);
            panel.add_coverable(idx, CoverRole::Mechanism);
            placed += 1;
        }
        placed > 0
    }
}
