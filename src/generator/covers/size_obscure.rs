/*
size_obscure.rs

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

//! Elements with a wrong starting size.
//!
//! A control button steps the size of the element through a cycle of sizes.
//! The player must find the size at which the plug fits its socket.

use rand::seq::IndexedRandom;

use super::{Cover, CoverStyle};
use crate::generator::grid::Rect;
use crate::generator::remote::add_control_button;
use crate::generator::session::{CoverRole, Coverable, PanelDraft, Session};
use crate::generator::techniques::center_in;
use crate::model::{Element, RemoteAction};

/// Sizes that the control button goes through, back and forth.
pub const SIZE_CYCLE: [f64; 8] = [1.0, 1.25, 1.5, 1.75, 2.0, 1.75, 1.5, 1.25];

const EPSILON: f64 = 1e-6;

pub struct SizeObscure;

/// Sizes of the cycle, other than the size of the element, that stay inside the cells
/// reserved for the element.
fn wrong_sizes(element: &Element, footprint: Rect) -> Vec<f64> {
    let mut sizes: Vec<f64> = Vec::new();
    for size in SIZE_CYCLE {
        if (size - element.width).abs() < EPSILON || sizes.contains(&size) {
            continue;
        }
        let (w, h) = element.shape.footprint(size, size);
        if w <= footprint.w && h <= footprint.h {
            sizes.push(size);
        }
    }
    sizes
}

impl Cover for SizeObscure {
    fn style(&self) -> CoverStyle {
        CoverStyle::SizeObscure
    }

    fn is_legal(&self, target: &Coverable, panel: &PanelDraft) -> bool {
        if target.size_obscured || !matches!(target.role, CoverRole::Plug | CoverRole::Socket) {
            return false;
        }
        let Some(source) = target.source else {
            return false;
        };
        let e: &Element = panel.element(source);
        (e.width - e.height).abs() < EPSILON
            && SIZE_CYCLE.iter().any(|s| (s - e.width).abs() < EPSILON)
            && !wrong_sizes(e, target.footprint).is_empty()
    }

    fn apply(&self, target: usize, panel: &mut PanelDraft, session: &mut Session) -> bool {
        let Some(source) = panel.coverables[target].source else {
            return false;
        };
        let footprint: Rect = panel.coverables[target].footprint;
        let sizes: Vec<f64> = wrong_sizes(panel.element(source), footprint);
        let Some(&size) = sizes.choose(&mut session.rng) else {
            return false;
        };
        let id: String = panel.element(source).id.clone();
        let action: RemoteAction = RemoteAction::Size {
            target_id: id.clone(),
        };
        if add_control_button(panel, session, action).is_none() {
            return false;
        }
        let e: &mut Element = panel.element_mut(source);
        e.width = size;
        e.height = size;
        center_in(e, footprint);
        panel.coverables[target].size_obscured = true;
        true
    }
}
