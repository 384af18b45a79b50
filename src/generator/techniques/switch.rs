/*
switch.rs

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

//! Switches.
//!
//! A switch cycles through four states each time the player taps it.
//! A switch with a target of 0 is a decoy: it is already satisfied.

use log::debug;
use rand::Rng;

use super::Technique;
use crate::generator::grid::Rect;
use crate::generator::session::{CoverRole, PanelDraft, Session};
use crate::model::{ChangeKind, Element, ElementColor, InteractionMethod, Shape};

/// Number of states of a switch.
pub const SWITCH_STATES: i32 = 4;

pub struct Switch;

/// Create a tap switch at the top-left corner of the rectangle.
pub(crate) fn new_switch(session: &mut Session, rect: Rect, target: i32) -> Element {
    let mut switch: Element = session.new_element(Shape::Switch, 1.0, 1.0);
    switch.set_position(rect.x as f64, rect.y as f64);
    let unsatisfied: u8 = session.random_color();
    let mut satisfied: u8 = session.random_color();
    while satisfied == unsatisfied {
        satisfied = session.random_color();
    }
    switch.color = ElementColor::Switch {
        unsatisfied,
        satisfied,
        ball: Some(session.random_color()),
    };
    switch.set_interaction(InteractionMethod::Tap, ChangeKind::State, target);
    switch
}

impl Technique for Switch {
    fn name(&self) -> &'static str {
        "switch"
    }

    fn priority(&self) -> i32 {
        1
    }

    fn apply(&self, panel: &mut PanelDraft, session: &mut Session) -> bool {
        let count: usize = session.rng.random_range(1..=4);
        let mut placed: usize = 0;

        for _ in 0..count {
            let Some(rect) = panel.allocate(Shape::Switch, 1.0, 1.0, &mut session.rng) else {
                break;
            };
            // The first switch is never a decoy
            let target: i32 = if placed == 0 {
                session.rng.random_range(1..SWITCH_STATES)
            } else {
                session.rng.random_range(0..SWITCH_STATES)
            };
            let switch: Element = new_switch(session, rect, target);
            debug!("    Switch {} with target {target}", switch.id);
            let idx: usize = panel.push(switch);
            panel.add_coverable(idx, CoverRole::Switch);
            placed += 1;
        }
        placed > 0
    }
}
