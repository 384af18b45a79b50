/*
techniques.rs

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

//! Puzzle techniques.
//!
//! A technique adds a self-contained mechanism to a panel: sockets and their plugs, switches,
//! a maze, a group of tiles...
//! Each technique implements the [`Technique`] trait and is registered by name in the table
//! returned by [`technique_table`].
//!
//! Techniques that create sockets deposit the matching plugs in the plug pool of the
//! [`Session`].
//! The generator places these plugs on the panels it generates afterwards.

pub use self::{
    group::Group, hole::Hole, maze::Maze, screw::Screw, semicircle::Semicircle, switch::Switch,
    switch_pattern::SwitchPattern, tumbler::Tumbler,
};

mod group;
mod hole;
pub mod maze;
mod screw;
mod semicircle;
pub(crate) mod switch;
mod switch_pattern;
mod tumbler;

use std::collections::BTreeMap;

use super::grid::Rect;
use super::plugs::Plug;
use super::session::{PanelDraft, Session};
use crate::model::{ChangeKind, Element, ElementColor, Elevation, InteractionMethod, Shape};

/// Mechanism that a panel can receive.
pub trait Technique {
    /// Name used in the difficulty profiles.
    fn name(&self) -> &'static str;

    /// Techniques with a higher priority are applied first, while the panel is still empty.
    fn priority(&self) -> i32;

    /// Whether the technique creates sockets and deposits plugs.
    fn has_plug_and_socket(&self) -> bool {
        false
    }

    /// Add the mechanism to the panel.
    ///
    /// Return `false` when nothing could be placed.
    fn apply(&self, panel: &mut PanelDraft, session: &mut Session) -> bool;
}

pub type BoxedTechnique = Box<dyn Technique>;

/// Return all the techniques, keyed by name.
pub fn technique_table() -> BTreeMap<&'static str, BoxedTechnique> {
    let techniques: Vec<BoxedTechnique> = vec![
        Box::new(Hole),
        Box::new(Screw),
        Box::new(Switch),
        Box::new(SwitchPattern),
        Box::new(Maze),
        Box::new(Group),
        Box::new(Tumbler),
        Box::new(Semicircle),
    ];
    techniques.into_iter().map(|t| (t.name(), t)).collect()
}

/// Move the element to the center of the rectangle.
pub(crate) fn center_in(element: &mut Element, rect: Rect) {
    let scale: f64 = element.shape.scale();
    let (extra_w, extra_h) = match element.shape {
        Shape::Switch => (1.0, 0.0),
        _ => (0.0, 0.0),
    };
    let w: f64 = element.width * scale + extra_w;
    let h: f64 = element.height * scale + extra_h;
    element.set_position(
        rect.x as f64 + ((rect.w as f64 - w) / 2.0).max(0.0),
        rect.y as f64 + ((rect.h as f64 - h) / 2.0).max(0.0),
    );
}

/// Create a sunken socket in the rectangle.
pub(crate) fn new_socket(
    session: &mut Session,
    shape: Shape,
    width: f64,
    height: f64,
    color: u8,
    rect: Rect,
) -> Element {
    let mut socket: Element = session.new_element(shape, width, height);
    center_in(&mut socket, rect);
    socket.elevation = Elevation::Sunken;
    socket.color = ElementColor::Plain(color);
    socket
}

/// Create a draggable plug and deposit it in the pool.
///
/// Return the ID of the plug.
pub(crate) fn deposit_plug(
    session: &mut Session,
    origin: usize,
    shape: Shape,
    width: f64,
    height: f64,
    color: u8,
) -> String {
    let mut element: Element = session.new_element(shape, width, height);
    element.elevation = Elevation::Raised;
    element.color = ElementColor::Plain(color);
    element.set_interaction(InteractionMethod::Drag, ChangeKind::None, 0);
    let id: String = element.id.clone();
    let probability: f64 = session.profile.remote_plug_probability;
    let remote: bool = session.chance(probability);
    session.pool.deposit(Plug {
        element,
        origin,
        remote,
    });
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_keyed_by_name() {
        let table: BTreeMap<&'static str, BoxedTechnique> = technique_table();
        assert_eq!(table.len(), 8);
        assert_eq!(table["maze"].priority(), 10);
        assert_eq!(table["switch"].priority(), 1);
        assert!(table["hole"].has_plug_and_socket());
        assert!(!table["switch_pattern"].has_plug_and_socket());
        for (name, technique) in &table {
            assert_eq!(*name, technique.name());
        }
    }

    #[test]
    fn centering() {
        let mut e: Element = Element::new("c1", Shape::Circle, 1.5, 1.5);
        center_in(&mut e, Rect::new(2, 3, 2, 2));
        assert_eq!((e.x, e.y), (2.25, 3.25));

        let mut s: Element = Element::new("w2", Shape::Switch, 1.0, 1.0);
        center_in(&mut s, Rect::new(0, 0, 2, 1));
        assert_eq!((s.x, s.y), (0.0, 0.0));
    }
}
