/*
tumbler.rs

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

//! Tumbler locks.
//!
//! A tumbler is a sunken socket that only accepts a key of its color.
//! Once the key is in, the player holds the tumbler to turn it.

use log::debug;

use super::{Technique, deposit_plug, new_socket};
use crate::generator::session::{CoverRole, PanelDraft, Session};
use crate::model::{ChangeKind, Element, InteractionMethod, Shape, SizeComparison};

/// Size of the tumblers and of their keys.
const TUMBLER_SIZE: f64 = 2.0;

/// 45° steps (a half-turn) needed to open the lock.
const TURNS: i32 = 4;

pub struct Tumbler;

impl Technique for Tumbler {
    fn name(&self) -> &'static str {
        "tumbler"
    }

    fn priority(&self) -> i32 {
        6
    }

    fn has_plug_and_socket(&self) -> bool {
        true
    }

    fn apply(&self, panel: &mut PanelDraft, session: &mut Session) -> bool {
        let Some(rect) =
            panel.allocate(Shape::Tumbler, TUMBLER_SIZE, TUMBLER_SIZE, &mut session.rng)
        else {
            debug!("    No room for a tumbler");
            return false;
        };
        let color: u8 = session.random_color();
        let mut tumbler: Element =
            new_socket(session, Shape::Tumbler, TUMBLER_SIZE, TUMBLER_SIZE, color, rect);
        tumbler.comparison = Some(SizeComparison::Strict);
        tumbler.set_interaction(InteractionMethod::Hold, ChangeKind::Rotate, TURNS);
        debug!("    Tumbler {} at {},{}", tumbler.id, tumbler.x, tumbler.y);
        let idx: usize = panel.push(tumbler);
        panel.add_coverable(idx, CoverRole::Socket);
        deposit_plug(session, panel.index, Shape::Key, TUMBLER_SIZE, TUMBLER_SIZE, color);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::difficulty::{Difficulty, DifficultyProfile};
    use crate::generator::plugs::Plug;

    #[test]
    fn key_fits_the_tumbler() {
        let mut session: Session =
            Session::new(DifficultyProfile::new(Difficulty::Easy), Some(3), false);
        let mut panel: PanelDraft = PanelDraft::new(0, "purple");
        assert!(Tumbler.apply(&mut panel, &mut session));

        let tumbler: &Element = &panel.panel.elements[0];
        assert_eq!(tumbler.footprint(), (3, 3));
        assert_eq!(tumbler.target, TURNS);
        let key: Plug = session.pool.drain().remove(0);
        assert_eq!(key.element.shape, Shape::Key);
        assert_eq!(key.element.footprint(), (2, 2));
        assert!(SizeComparison::Strict.matches(tumbler, &key.element));
    }
}
