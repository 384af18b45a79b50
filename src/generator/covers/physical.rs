/*
physical.rs

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

//! Lids over the elements.

use rand::Rng;
use strum_macros::FromRepr;

use super::{Cover, CoverStyle};
use crate::generator::grid::Rect;
use crate::generator::remote::add_remote_controllers;
use crate::generator::session::{Coverable, PanelDraft, Session};
use crate::model::{
    ChangeKind, Element, ElementColor, Elevation, InteractionMethod, RemoteAction, Shape,
};

/// Probability for a lid to use remote controls, when the panel has a remote slot left.
const REMOTE_PROBABILITY: f64 = 0.5;

/// How the player removes the lid.
#[derive(Debug, Copy, Clone, PartialEq, Eq, FromRepr)]
#[repr(usize)]
enum Gate {
    /// The lid is moved away with remote controls.
    Remote,

    /// The lid is dragged away.
    Drag,

    /// A tap loosens the lid, which can then be dragged away.
    Tap,

    /// The lid is unlocked by holding it while it turns.
    Rotate,
}

pub struct Physical;

impl Cover for Physical {
    fn style(&self) -> CoverStyle {
        CoverStyle::Physical
    }

    fn is_legal(&self, _target: &Coverable, _panel: &PanelDraft) -> bool {
        true
    }

    fn apply(&self, target: usize, panel: &mut PanelDraft, session: &mut Session) -> bool {
        let footprint: Rect = panel.coverables[target].footprint;
        let mut lid: Element =
            session.new_element(Shape::Rectangle, footprint.w as f64, footprint.h as f64);
        lid.set_position(footprint.x as f64, footprint.y as f64);
        lid.elevation = Elevation::Raised;
        lid.color = ElementColor::Plain(session.random_color());

        let gate: Gate = if panel.has_remote_slot() && session.chance(REMOTE_PROBABILITY) {
            Gate::Remote
        } else {
            Gate::from_repr(session.rng.random_range(1..4)).unwrap_or(Gate::Drag)
        };
        let id: String = lid.id.clone();
        match gate {
            Gate::Remote => {}
            Gate::Drag => lid.set_interaction(InteractionMethod::Drag, ChangeKind::None, 0),
            Gate::Tap => {
                lid.set_interaction(InteractionMethod::Tap, ChangeKind::State, 1);
                lid.remote_actions.push(RemoteAction::release(&id));
            }
            Gate::Rotate => {
                lid.set_interaction(InteractionMethod::Hold, ChangeKind::Rotate, 2);
                lid.remote_actions.push(RemoteAction::release(&id));
            }
        }
        let idx: usize = panel.push(lid);
        if gate == Gate::Remote && !add_remote_controllers(panel, session, &id) {
            panel
                .element_mut(idx)
                .set_interaction(InteractionMethod::Drag, ChangeKind::None, 0);
        }
        true
    }
}
