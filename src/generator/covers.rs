/*
covers.rs

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

//! Covers.
//!
//! Covers make the mechanisms of a panel harder to find or to reach: a lid over a socket, a
//! ring of identical tiles around a plug, a plug that only moves with remote controls...
//! Each cover style implements the [`Cover`] trait.
//! The [`CoverManager`] picks, for every coverable element of a panel, a random legal style.
//! Covers can stack on the same element.

mod group_obscure;
mod physical;
mod remote_only;
mod reset;
mod size_obscure;
mod switch_release;

pub use self::{
    group_obscure::GroupObscure, physical::Physical, remote_only::RemoteOnly, reset::ResetTrap,
    size_obscure::SizeObscure, switch_release::SwitchRelease,
};

use log::debug;
use rand::Rng;
use rand::seq::IndexedRandom;
use strum_macros::FromRepr;

use super::session::{CoverRole, Coverable, PanelDraft, Session};
use crate::model::Elevation;

/// Cover styles.
#[derive(Debug, Copy, Clone, PartialEq, Eq, FromRepr)]
#[repr(usize)]
pub enum CoverStyle {
    /// Lid over the element.
    Physical,

    /// Ring of identical tiles, one of them over the element.
    GroupObscure,

    /// The element only moves with remote controls.
    RemoteOnly,

    /// The element is locked until a switch releases it.
    SwitchRelease,

    /// The element starts with a wrong size.
    SizeObscure,
}

/// Way of obscuring a coverable element.
pub trait Cover {
    fn style(&self) -> CoverStyle;

    /// Whether the cover can apply to the element.
    fn is_legal(&self, target: &Coverable, panel: &PanelDraft) -> bool;

    /// Cover the element at index `target` in [`PanelDraft::coverables`].
    ///
    /// Return `false`, with the panel left untouched, when the cover cannot be placed.
    fn apply(&self, target: usize, panel: &mut PanelDraft, session: &mut Session) -> bool;
}

pub type BoxedCover = Box<dyn Cover>;

/// Whether the element can be turned into an element that the player does not move directly.
pub(crate) fn can_take_over(target: &Coverable, panel: &PanelDraft) -> bool {
    target.role == CoverRole::Plug
        && target.source.is_some()
        && target.elevation == Elevation::Raised
        && !target.has_remote
        && panel.has_remote_slot()
}

/// Apply covers to panels.
pub struct CoverManager {
    /// Cover styles, indexed by [`CoverStyle`].
    covers: Vec<BoxedCover>,

    reset: ResetTrap,
}

impl Default for CoverManager {
    fn default() -> Self {
        Self::new()
    }
}

impl CoverManager {
    /// Create a [`CoverManager`] object with all the cover styles.
    pub fn new() -> Self {
        let covers: Vec<BoxedCover> = (0..)
            .map_while(CoverStyle::from_repr)
            .map(|style| -> BoxedCover {
                match style {
                    CoverStyle::Physical => Box::new(Physical),
                    CoverStyle::GroupObscure => Box::new(GroupObscure),
                    CoverStyle::RemoteOnly => Box::new(RemoteOnly),
                    CoverStyle::SwitchRelease => Box::new(SwitchRelease),
                    CoverStyle::SizeObscure => Box::new(SizeObscure),
                }
            })
            .collect();
        Self {
            covers,
            reset: ResetTrap,
        }
    }

    /// Return the cover for the given style.
    pub fn cover(&self, style: CoverStyle) -> &dyn Cover {
        self.covers[style as usize].as_ref()
    }

    /// Styles that can apply to the coverable element at the given index.
    pub fn legal_styles(&self, target: usize, panel: &PanelDraft) -> Vec<CoverStyle> {
        self.covers
            .iter()
            .filter(|c| c.is_legal(&panel.coverables[target], panel))
            .map(|c| c.style())
            .collect()
    }

    /// Cover the coverable elements of the panel, each with the given probability, and maybe
    /// add a reset trap.
    ///
    /// Return the number of covers placed.
    pub fn add_coverings(
        &self,
        panel: &mut PanelDraft,
        session: &mut Session,
        probability: f64,
    ) -> usize {
        let mut applied: usize = 0;
        // Covers do not register new coverable elements
        let count: usize = panel.coverables.len();

        for target in 0..count {
            if !session.force_covers && !session.chance(probability) {
                continue;
            }
            let stack: usize = session.rng.random_range(1..=session.profile.stack_limit.max(1));
            for _ in 0..stack {
                let styles: Vec<CoverStyle> = self.legal_styles(target, panel);
                let Some(&style) = styles.choose(&mut session.rng) else {
                    break;
                };
                if self.cover(style).apply(target, panel, session) {
                    debug!(
                        "    Cover {style:?} on {} ({:?})",
                        panel.coverables[target].id, panel.coverables[target].role
                    );
                    applied += 1;
                } else {
                    debug!(
                        "    Cover {style:?} on {} not possible",
                        panel.coverables[target].id
                    );
                }
            }
        }

        let reset: f64 = session.profile.reset_probability;
        if session.chance(reset) {
            self.reset.apply(panel, session);
        }
        applied
    }
}
