/*
reset.rs

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

//! Reset traps.
//!
//! A reset button returns a socket, and whatever fills it, to its initial configuration.
//! Pressing it at the wrong time undoes the progress of the player.

use log::debug;
use rand::seq::IndexedRandom;

use crate::generator::remote::add_control_button;
use crate::generator::session::{PanelDraft, Session};
use crate::model::{InteractionMethod, RemoteAction};

pub struct ResetTrap;

impl ResetTrap {
    /// IDs of the sockets that a reset trap can target.
    ///
    /// A reset only matters for a socket that the player manipulates or that starts filled.
    pub fn candidates(panel: &PanelDraft) -> Vec<String> {
        panel
            .panel
            .elements
            .iter()
            .filter(|e| {
                e.is_socket()
                    && !panel.reset_targets.contains(&e.id)
                    && (e.method != InteractionMethod::None || panel.filled_sockets.contains(&e.id))
            })
            .map(|e| e.id.clone())
            .collect()
    }

    /// Add a reset button for a random socket of the panel.
    pub fn apply(&self, panel: &mut PanelDraft, session: &mut Session) -> bool {
        let candidates: Vec<String> = Self::candidates(panel);
        let Some(id) = candidates.choose(&mut session.rng) else {
            return false;
        };
        let action: RemoteAction = RemoteAction::Reset {
            target_id: id.clone(),
        };
        if add_control_button(panel, session, action).is_none() {
            return false;
        }
        debug!("    Reset trap on {id}");
        panel.reset_targets.push(id.clone());
        true
    }
}
