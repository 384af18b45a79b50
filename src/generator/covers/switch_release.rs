/*
switch_release.rs

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

//! Elements locked until a switch releases them.

use log::debug;

use super::{Cover, CoverStyle, can_take_over};
use crate::generator::session::{Coverable, PanelDraft, Session};
use crate::generator::techniques::switch::new_switch;
use crate::model::{Element, InteractionMethod, RemoteAction, Shape};

pub struct SwitchRelease;

impl Cover for SwitchRelease {
    fn style(&self) -> CoverStyle {
        CoverStyle::SwitchRelease
    }

    fn is_legal(&self, target: &Coverable, panel: &PanelDraft) -> bool {
        can_take_over(target, panel)
    }

    fn apply(&self, target: usize, panel: &mut PanelDraft, session: &mut Session) -> bool {
        let Some(source) = panel.coverables[target].source else {
            return false;
        };
        let Some(rect) = panel.allocate(Shape::Switch, 1.0, 1.0, &mut session.rng) else {
            return false;
        };
        let id: String = panel.element(source).id.clone();
        let mut switch: Element = new_switch(session, rect, 1);
        switch.remote_actions.push(RemoteAction::release(&id));
        debug!("    Switch {} releases {id}", switch.id);
        panel.push(switch);
        panel.element_mut(source).method = InteractionMethod::None;
        panel.remote_sets += 1;
        panel.coverables[target].has_remote = true;
        true
    }
}
