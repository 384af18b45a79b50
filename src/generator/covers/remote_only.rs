/*
remote_only.rs

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

//! Elements that only move with remote controls.

use super::{Cover, CoverStyle, can_take_over};
use crate::generator::remote::add_remote_controllers;
use crate::generator::session::{Coverable, PanelDraft, Session};
use crate::model::InteractionMethod;

pub struct RemoteOnly;

impl Cover for RemoteOnly {
    fn style(&self) -> CoverStyle {
        CoverStyle::RemoteOnly
    }

    fn is_legal(&self, target: &Coverable, panel: &PanelDraft) -> bool {
        can_take_over(target, panel)
    }

    fn apply(&self, target: usize, panel: &mut PanelDraft, session: &mut Session) -> bool {
        let Some(source) = panel.coverables[target].source else {
            return false;
        };
        let id: String = panel.element(source).id.clone();
        if !add_remote_controllers(panel, session, &id) {
            return false;
        }
        panel.element_mut(source).method = InteractionMethod::None;
        panel.coverables[target].has_remote = true;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::difficulty::{Difficulty, DifficultyProfile};
    use crate::generator::session::CoverRole;
    use crate::model::{ChangeKind, Element, Elevation, RemoteAction, Shape};

    fn plug_panel(session: &mut Session) -> PanelDraft {
        let mut panel: PanelDraft = PanelDraft::new(1, "blue");
        let mut plug: Element = session.new_element(Shape::Circle, 1.0, 1.0);
        plug.elevation = Elevation::Raised;
        plug.set_interaction(InteractionMethod::Drag, ChangeKind::None, 0);
        let i: usize = panel.push(plug);
        panel.add_coverable(i, CoverRole::Plug);
        panel
    }

    #[test]
    fn plug_becomes_remote_controlled() {
        let mut session: Session =
            Session::new(DifficultyProfile::new(Difficulty::Hard), Some(2), false);
        let mut panel: PanelDraft = plug_panel(&mut session);
        assert!(RemoteOnly.is_legal(&panel.coverables[0], &panel));
        assert!(RemoteOnly.apply(0, &mut panel, &mut session));

        let plug: &Element = panel.element(0);
        assert_eq!(plug.method, InteractionMethod::None);
        assert!(plug.has_remote_move(&panel.panel));
        assert!(matches!(
            panel.panel.elements[1].remote_actions[0],
            RemoteAction::MoveStep { .. }
        ));
        // Already remote-controlled
        assert!(!RemoteOnly.is_legal(&panel.coverables[0], &panel));
    }

    #[test]
    fn rollback_without_room() {
        let mut session: Session =
            Session::new(DifficultyProfile::new(Difficulty::Hard), Some(2), false);
        let mut panel: PanelDraft = plug_panel(&mut session);
        panel.grid.reserve_rect(0, 0, 8, 8);
        assert!(!RemoteOnly.apply(0, &mut panel, &mut session));
        assert_eq!(panel.element(0).method, InteractionMethod::Drag);
        assert!(!panel.coverables[0].has_remote);
        assert_eq!(panel.panel.elements.len(), 1);
    }

    #[test]
    fn only_raised_plugs() {
        let mut session: Session =
            Session::new(DifficultyProfile::new(Difficulty::Hard), Some(2), false);
        let mut panel: PanelDraft = plug_panel(&mut session);
        panel.coverables[0].role = CoverRole::Socket;
        assert!(!RemoteOnly.is_legal(&panel.coverables[0], &panel));
        panel.coverables[0].role = CoverRole::Plug;
        panel.remote_sets = 2;
        assert!(!RemoteOnly.is_legal(&panel.coverables[0], &panel));
    }
}
