/*
group_obscure.rs

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

//! Rings of identical tiles.
//!
//! The element is hidden under a tile, surrounded by identical tiles, so that the player does
//! not know which tile to remove.
//! Switches get a single, oversized, lid instead.

use log::debug;

use super::{Cover, CoverStyle};
use crate::generator::grid::Rect;
use crate::generator::session::{CoverRole, Coverable, PanelDraft, Session};
use crate::model::{ChangeKind, Element, ElementColor, Elevation, InteractionMethod, Shape};

/// Minimum number of tiles around the element.
const MIN_RING: usize = 2;

/// Neighbor positions, in footprint units.
const RING: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

pub struct GroupObscure;

/// Create a draggable tile over the rectangle.
fn new_tile(session: &mut Session, rect: Rect, color: u8) -> Element {
    let mut tile: Element = session.new_element(Shape::Rectangle, rect.w as f64, rect.h as f64);
    tile.set_position(rect.x as f64, rect.y as f64);
    tile.elevation = Elevation::Raised;
    tile.color = ElementColor::Plain(color);
    tile.set_interaction(InteractionMethod::Drag, ChangeKind::None, 0);
    tile
}

/// Free rectangles, of the same size, around the given one.
fn ring_around(panel: &PanelDraft, rect: Rect) -> Vec<Rect> {
    RING.iter()
        .filter_map(|(dx, dy)| {
            let x: isize = rect.x as isize + dx * rect.w as isize;
            let y: isize = rect.y as isize + dy * rect.h as isize;
            if x < 0 || y < 0 || !panel.grid.is_free(x as usize, y as usize, rect.w, rect.h) {
                return None;
            }
            Some(Rect::new(x as usize, y as usize, rect.w, rect.h))
        })
        .collect()
}

/// Free strip along one side of the rectangle, and the rectangle enlarged by that strip.
fn margin(panel: &PanelDraft, rect: Rect) -> Option<(Rect, Rect)> {
    let mut strips: Vec<(Rect, Rect)> = vec![
        (
            Rect::new(rect.x + rect.w, rect.y, 1, rect.h),
            Rect::new(rect.x, rect.y, rect.w + 1, rect.h),
        ),
        (
            Rect::new(rect.x, rect.y + rect.h, rect.w, 1),
            Rect::new(rect.x, rect.y, rect.w, rect.h + 1),
        ),
    ];
    if rect.x > 0 {
        strips.push((
            Rect::new(rect.x - 1, rect.y, 1, rect.h),
            Rect::new(rect.x - 1, rect.y, rect.w + 1, rect.h),
        ));
    }
    if rect.y > 0 {
        strips.push((
            Rect::new(rect.x, rect.y - 1, rect.w, 1),
            Rect::new(rect.x, rect.y - 1, rect.w, rect.h + 1),
        ));
    }
    strips
        .into_iter()
        .find(|(s, _)| panel.grid.is_free(s.x, s.y, s.w, s.h))
        .inspect(|(s, _)| debug!("    Lid enlarged over {},{}", s.x, s.y))
}

impl Cover for GroupObscure {
    fn style(&self) -> CoverStyle {
        CoverStyle::GroupObscure
    }

    fn is_legal(&self, _target: &Coverable, _panel: &PanelDraft) -> bool {
        true
    }

    fn apply(&self, target: usize, panel: &mut PanelDraft, session: &mut Session) -> bool {
        let footprint: Rect = panel.coverables[target].footprint;
        let color: u8 = session.random_color();

        if panel.coverables[target].role == CoverRole::Switch {
            let rect: Rect = match margin(panel, footprint) {
                Some((strip, grown)) => {
                    // The switch already holds its own cells
                    panel.grid.claim(strip);
                    grown
                }
                None => footprint,
            };
            let lid: Element = new_tile(session, rect, color);
            panel.push(lid);
            return true;
        }

        let ring: Vec<Rect> = ring_around(panel, footprint);
        if ring.len() < MIN_RING {
            return false;
        }
        for rect in ring {
            panel.grid.claim(rect);
            let tile: Element = new_tile(session, rect, color);
            panel.push(tile);
        }
        let lid: Element = new_tile(session, footprint, color);
        panel.push(lid);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::difficulty::{Difficulty, DifficultyProfile};

    fn draft_with(session: &mut Session, shape: Shape, rect: Rect, role: CoverRole) -> PanelDraft {
        let mut panel: PanelDraft = PanelDraft::new(0, "blue");
        let mut e: Element = session.new_element(shape, 1.0, 1.0);
        e.set_position(rect.x as f64, rect.y as f64);
        let i: usize = panel.push(e);
        panel.grid.claim(rect);
        panel.add_coverable(i, role);
        panel
    }

    #[test]
    fn ring_of_identical_tiles() {
        let mut session: Session =
            Session::new(DifficultyProfile::new(Difficulty::Hard), Some(1), false);
        let mut panel: PanelDraft =
            draft_with(&mut session, Shape::Circle, Rect::new(0, 0, 1, 1), CoverRole::Socket);
        assert!(GroupObscure.apply(0, &mut panel, &mut session));

        // Corner: three neighbors, plus the tile over the socket
        let tiles: &[Element] = &panel.panel.elements[1..];
        assert_eq!(tiles.len(), 4);
        assert!(tiles.iter().all(|t| t.color == tiles[0].color && t.width == 1.0));
        assert_eq!((tiles[3].x, tiles[3].y), (0.0, 0.0));
    }

    #[test]
    fn ring_needs_room() {
        let mut session: Session =
            Session::new(DifficultyProfile::new(Difficulty::Hard), Some(1), false);
        let mut panel: PanelDraft =
            draft_with(&mut session, Shape::Circle, Rect::new(0, 0, 1, 1), CoverRole::Plug);
        panel.grid.claim(Rect::new(1, 0, 7, 8));
        assert!(!GroupObscure.apply(0, &mut panel, &mut session));
        assert_eq!(panel.panel.elements.len(), 1);
    }

    #[test]
    fn switches_get_an_oversized_lid() {
        let mut session: Session =
            Session::new(DifficultyProfile::new(Difficulty::Hard), Some(1), false);
        let mut panel: PanelDraft =
            draft_with(&mut session, Shape::Switch, Rect::new(2, 2, 2, 1), CoverRole::Switch);
        assert!(GroupObscure.apply(0, &mut panel, &mut session));
        let lid: &Element = &panel.panel.elements[1];
        assert_eq!(panel.panel.elements.len(), 2);
        assert!(lid.width * lid.height > 2.0);

        let claims: &[Rect] = panel.grid.claims();
        assert_eq!(claims.len(), 2);
        for (i, a) in claims.iter().enumerate() {
            for b in &claims[i + 1..] {
                assert!(!a.overlaps(b), "{a:?} overlaps {b:?}");
            }
        }
    }
}
