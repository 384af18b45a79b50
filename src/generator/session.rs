/*
session.rs

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

//! Generation state shared by the techniques and the covers.
//!
//! A [`Session`] owns everything that a generation run mutates besides the panels: the random
//! number generator, the element ID counter, and the plug pool.
//! A [`PanelDraft`] is a panel being generated, with its occupancy grid and its bookkeeping.
//! It becomes a plain [`Panel`] once the generation is complete.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::difficulty::DifficultyProfile;
use super::grid::{Grid, Rect};
use super::plugs::{Plug, PlugPlacement, PlugPool};
use crate::config::{COLORS, NEUTRAL_COLOR};
use crate::model::{Element, Elevation, Panel, Shape};

/// Maximum number of remote-control mechanisms on a panel.
pub const MAX_REMOTE_SETS: usize = 2;

/// What a coverable element is to the puzzle.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CoverRole {
    /// A plug that the player must carry to a socket.
    Plug,

    /// A socket that receives a plug.
    Socket,

    /// A switch.
    Switch,

    /// Any other interactive element (screw, tumbler...).
    Mechanism,

    /// A grid area that is not an element, such as a maze corridor.
    Virtual,
}

/// Element, or grid area, that covers can obscure.
#[derive(Debug, Clone)]
pub struct Coverable {
    /// ID of the element. For a virtual area, ID of the element that goes through it.
    pub id: String,

    /// Cells covered by the element.
    pub footprint: Rect,

    pub elevation: Elevation,

    /// Whether the element is already controlled by a remote mechanism.
    pub has_remote: bool,

    /// Index of the element in the panel, or [`None`] for a virtual area.
    pub source: Option<usize>,

    pub role: CoverRole,

    /// Whether the starting size of the element has been altered.
    pub size_obscured: bool,
}

/// Panel being generated.
#[derive(Debug, Clone)]
pub struct PanelDraft {
    /// Generation index of the panel. Panel 0 is generated first and seen last.
    pub index: usize,

    pub panel: Panel,

    pub grid: Grid,

    /// Number of remote-control mechanisms already on the panel.
    pub remote_sets: usize,

    pub coverables: Vec<Coverable>,

    /// IDs of the sockets already targeted by a reset trap.
    pub reset_targets: Vec<String>,

    /// IDs of the sockets that start filled, such as the holes under the screws.
    pub filled_sockets: Vec<String>,
}

impl PanelDraft {
    /// Create an empty draft.
    pub fn new(index: usize, color_theme: &str) -> Self {
        Self {
            index,
            panel: Panel::new(color_theme),
            grid: Grid::new(),
            remote_sets: 0,
            coverables: Vec::new(),
            reset_targets: Vec::new(),
            filled_sockets: Vec::new(),
        }
    }

    /// Append an element on top of the others and return its index.
    pub fn push(&mut self, element: Element) -> usize {
        self.panel.elements.push(element);
        self.panel.elements.len() - 1
    }

    /// Find and claim room for an element of the given shape and size.
    ///
    /// Return the top-left cell and the claimed rectangle.
    pub fn allocate(
        &mut self,
        shape: Shape,
        width: f64,
        height: f64,
        rng: &mut StdRng,
    ) -> Option<Rect> {
        let (w, h) = shape.footprint(width, height);
        self.grid.allocate(w, h, rng)
    }

    /// Register the element at the given index as coverable.
    pub fn add_coverable(&mut self, source: usize, role: CoverRole) {
        let e: &Element = &self.panel.elements[source];
        let (w, h) = e.footprint();
        self.coverables.push(Coverable {
            id: e.id.clone(),
            footprint: Rect::new(e.x.floor() as usize, e.y.floor() as usize, w, h),
            elevation: e.elevation,
            has_remote: false,
            source: Some(source),
            role,
            size_obscured: false,
        });
    }

    /// Whether the panel can hold another remote-control mechanism.
    pub fn has_remote_slot(&self) -> bool {
        self.remote_sets < MAX_REMOTE_SETS
    }

    /// Return the element at the given index.
    pub fn element(&self, index: usize) -> &Element {
        &self.panel.elements[index]
    }

    /// Return the element at the given index.
    pub fn element_mut(&mut self, index: usize) -> &mut Element {
        &mut self.panel.elements[index]
    }

    /// Return the index of the element with the given ID.
    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.panel.elements.iter().position(|e| e.id == id)
    }

    /// Drop the generation data and return the panel.
    pub fn finalize(self) -> Panel {
        self.panel
    }
}

/// State of a generation run.
#[derive(Debug)]
pub struct Session {
    pub rng: StdRng,

    pub pool: PlugPool,

    pub profile: DifficultyProfile,

    /// Cover every coverable element (debugging aid).
    pub force_covers: bool,

    /// The panel being generated must create at least one plug.
    pub require_plug: bool,

    /// Plugs placed so far.
    pub placements: Vec<PlugPlacement>,

    /// Last number used for an element ID.
    last_id: usize,
}

impl Session {
    /// Create a session. Without a seed, the random number generator is seeded from the
    /// operating system.
    pub fn new(profile: DifficultyProfile, seed: Option<u64>, force_covers: bool) -> Self {
        let rng: StdRng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng,
            pool: PlugPool::new(),
            profile,
            force_covers,
            require_plug: false,
            placements: Vec::new(),
            last_id: 0,
        }
    }

    /// Return a new element ID for the shape.
    pub fn new_id(&mut self, shape: Shape) -> String {
        self.last_id += 1;
        format!("{}{}", shape.code(), self.last_id)
    }

    /// Create an element with a new ID.
    pub fn new_element(&mut self, shape: Shape, width: f64, height: f64) -> Element {
        let id: String = self.new_id(shape);
        Element::new(&id, shape, width, height)
    }

    /// Return a random, non-neutral, color number.
    pub fn random_color(&mut self) -> u8 {
        loop {
            let c: u8 = self.rng.random_range(0..COLORS.len() as u8);
            if c != NEUTRAL_COLOR {
                return c;
            }
        }
    }

    /// Record that a plug is now on the given panel.
    pub fn record_placement(&mut self, plug: &Plug, panel: usize) {
        self.placements.push(PlugPlacement {
            id: plug.element.id.clone(),
            origin: plug.origin,
            panel,
        });
    }

    /// Return `true` with the given probability.
    pub fn chance(&mut self, probability: f64) -> bool {
        self.rng.random_bool(probability.clamp(0.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::difficulty::Difficulty;

    #[test]
    fn ids_are_unique_and_prefixed() {
        let mut session: Session =
            Session::new(DifficultyProfile::new(Difficulty::Easy), Some(1), false);
        let a: String = session.new_id(Shape::Circle);
        let b: String = session.new_id(Shape::Switch);
        assert_eq!(a, "c1");
        assert_eq!(b, "w2");
        assert!(session.random_color() != NEUTRAL_COLOR);
    }

    #[test]
    fn coverable_footprint() {
        let mut session: Session =
            Session::new(DifficultyProfile::new(Difficulty::Easy), Some(1), false);
        let mut draft: PanelDraft = PanelDraft::new(0, "blue");
        let rect: Rect = draft
            .allocate(Shape::Tumbler, 2.0, 2.0, &mut session.rng)
            .unwrap();
        assert_eq!((rect.w, rect.h), (3, 3));

        let mut e: Element = session.new_element(Shape::Tumbler, 2.0, 2.0);
        e.set_position(rect.x as f64, rect.y as f64);
        let i: usize = draft.push(e);
        draft.add_coverable(i, CoverRole::Socket);
        assert_eq!(draft.coverables[0].footprint, rect);
        assert_eq!(draft.position_of("u1"), Some(0));
        assert_eq!(draft.finalize().elements.len(), 1);
    }
}
