/*
switch_pattern.rs

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

//! Linked switches.
//!
//! A master switch can only be satisfied once all its linked switches are.
//! The targets of the linked switches follow a pattern that the player must discover.

use log::debug;
use rand::Rng;
use strum_macros::FromRepr;

use super::Technique;
use super::switch::{SWITCH_STATES, new_switch};
use crate::generator::remote::add_control_button;
use crate::generator::session::{CoverRole, PanelDraft, Session};
use crate::model::{ChangeKind, Element, ElementColor, InteractionMethod, RemoteAction, Shape};

/// How the targets of the linked switches are chosen.
#[derive(Debug, Copy, Clone, PartialEq, Eq, FromRepr)]
#[repr(usize)]
pub enum PatternStrategy {
    /// All the switches share the same target.
    Identical,

    /// The targets go up, from left to right.
    Increasing,

    /// The targets go down.
    Decreasing,

    /// Each switch shows the theme color of its state and is driven by a cycle button.
    ThemeColored,
}

impl PatternStrategy {
    /// Return the targets for `count` switches.
    ///
    /// Ordered patterns never repeat a target, so they hold at most one switch per non-zero
    /// state.
    fn targets<R: Rng>(self, count: usize, rng: &mut R) -> Vec<i32> {
        let top: i32 = SWITCH_STATES - 1;
        let ordered: i32 = count.min(top as usize) as i32;
        match self {
            PatternStrategy::Identical => vec![rng.random_range(1..=top); count],
            PatternStrategy::Increasing => (1..=ordered).collect(),
            PatternStrategy::Decreasing => (0..ordered).map(|i| top - i).collect(),
            PatternStrategy::ThemeColored => {
                (0..count).map(|_| rng.random_range(1..=top)).collect()
            }
        }
    }
}

/// Color number that a theme-colored switch shows in the given state.
pub fn theme_state_color(state: i32) -> u8 {
    (state + 1) as u8
}

pub struct SwitchPattern;

impl Technique for SwitchPattern {
    fn name(&self) -> &'static str {
        "switch_pattern"
    }

    fn priority(&self) -> i32 {
        2
    }

    fn apply(&self, panel: &mut PanelDraft, session: &mut Session) -> bool {
        let strategy: PatternStrategy = PatternStrategy::from_repr(session.rng.random_range(0..4))
            .unwrap_or(PatternStrategy::Identical);
        let count: usize = session.rng.random_range(2..=4);
        let targets: Vec<i32> = strategy.targets(count, &mut session.rng);
        debug!("    Switch pattern {strategy:?} {targets:?}");

        let mut linked: Vec<String> = Vec::new();
        for target in targets {
            let Some(rect) = panel.allocate(Shape::Switch, 1.0, 1.0, &mut session.rng) else {
                break;
            };
            let mut switch: Element = new_switch(session, rect, target);
            let id: String = switch.id.clone();
            if strategy == PatternStrategy::ThemeColored {
                switch.color = ElementColor::ThemeCycle {
                    target: theme_state_color(target),
                    ball: session.random_color(),
                };
            }
            let idx: usize = panel.push(switch);
            if strategy == PatternStrategy::ThemeColored {
                let cycle: RemoteAction = RemoteAction::Cycle {
                    target_id: id.clone(),
                };
                if add_control_button(panel, session, cycle).is_some() {
                    panel
                        .element_mut(idx)
                        .set_interaction(InteractionMethod::None, ChangeKind::State, target);
                }
            }
            panel.add_coverable(idx, CoverRole::Switch);
            linked.push(id);
        }
        if linked.is_empty() {
            return false;
        }

        // The master switch
        let Some(rect) = panel.allocate(Shape::Switch, 1.0, 1.0, &mut session.rng) else {
            debug!("    No room for the master switch");
            return true;
        };
        let mut master: Element = new_switch(session, rect, 1);
        for id in linked {
            master.remote_actions.push(RemoteAction::Link { target_id: id });
        }
        let idx: usize = panel.push(master);
        panel.add_coverable(idx, CoverRole::Switch);
        true
    }
}
