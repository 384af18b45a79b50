/*
remote.rs

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

//! Remote controls.
//!
//! A remote-control quartet is a 2x2 block of four triangle buttons.
//! Tapping a button moves its target element by one grid unit in the direction that the
//! triangle points to.
//! A single control button applies one remote action, such as a reset or a size change.

use log::debug;

use super::grid::Rect;
use super::session::{PanelDraft, Session};
use crate::model::{
    ChangeKind, Element, ElementColor, Elevation, InteractionMethod, RemoteAction, Shape,
};

/// Size of the control buttons.
const BUTTON_SIZE: f64 = 0.8;

/// Offset that centers a button in its cell.
const BUTTON_OFFSET: f64 = 0.1;

/// Quartet buttons: column and row in the 2x2 block, move vector, and rotation of the
/// triangle (in 45° steps).
const QUARTET: [(usize, usize, f64, f64, i32); 4] = [
    (0, 0, 0.0, -1.0, 0), // up
    (1, 0, 1.0, 0.0, 2),  // right
    (0, 1, -1.0, 0.0, 6), // left
    (1, 1, 0.0, 1.0, 4),  // down
];

/// Place a remote-control quartet that moves the given element.
///
/// Return `false`, and leave the panel untouched, when the panel has no remote slot left or
/// no room for the quartet.
pub fn add_remote_controllers(
    panel: &mut PanelDraft,
    session: &mut Session,
    target_id: &str,
) -> bool {
    if !panel.has_remote_slot() {
        debug!("    No remote slot left for {target_id}");
        return false;
    }
    let Some(rect) = panel.grid.allocate(2, 2, &mut session.rng) else {
        debug!("    No room for the remote controls of {target_id}");
        return false;
    };
    let color: u8 = session.random_color();
    for (col, row, dx, dy, rotation) in QUARTET {
        let mut button: Element = session.new_element(Shape::Triangle, BUTTON_SIZE, BUTTON_SIZE);
        button.set_position(
            (rect.x + col) as f64 + BUTTON_OFFSET,
            (rect.y + row) as f64 + BUTTON_OFFSET,
        );
        button.elevation = Elevation::Raised;
        button.color = ElementColor::Plain(color);
        button.rotation = rotation;
        button.set_interaction(InteractionMethod::Tap, ChangeKind::None, 0);
        button.remote_actions.push(RemoteAction::MoveStep {
            target_id: String::from(target_id),
            dx,
            dy,
        });
        panel.push(button);
    }
    panel.remote_sets += 1;
    debug!("    Remote controls for {target_id} at {},{}", rect.x, rect.y);
    true
}

/// Place a single tap button that applies the given action.
///
/// Return the index of the button in the panel, or [`None`] when there is no room.
pub fn add_control_button(
    panel: &mut PanelDraft,
    session: &mut Session,
    action: RemoteAction,
) -> Option<usize> {
    let rect: Rect = panel.allocate(Shape::Circle, BUTTON_SIZE, BUTTON_SIZE, &mut session.rng)?;
    let mut button: Element = session.new_element(Shape::Circle, BUTTON_SIZE, BUTTON_SIZE);
    button.set_position(rect.x as f64 + BUTTON_OFFSET, rect.y as f64 + BUTTON_OFFSET);
    button.elevation = Elevation::Raised;
    button.color = ElementColor::Plain(session.random_color());
    button.set_interaction(InteractionMethod::Tap, ChangeKind::None, 0);
    button.remote_actions.push(action);
    Some(panel.push(button))
}
