/*
group.rs

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

//! Groups of identical tiles.
//!
//! A block of flat, gray tiles hides one or two plugs.
//! Tapping a key tile reveals the color of the plug and raises it, so that the player can drag
//! it to its socket on another panel.
//! The other tiles are decoys and do nothing.

use log::debug;
use rand::Rng;
use rand::seq::SliceRandom;
use strum_macros::FromRepr;

use super::{Technique, center_in};
use crate::config::NEUTRAL_COLOR;
use crate::generator::grid::Rect;
use crate::generator::plugs::Plug;
use crate::generator::session::{PanelDraft, Session};
use crate::model::{
    ChangeKind, Element, ElementColor, Elevation, InteractionMethod, RemoteAction, Shape,
};

/// Probability for a cell to get a tile with the sparse pattern.
const SPARSE_PROBABILITY: f64 = 0.3;

/// Which cells of the block get a tile.
#[derive(Debug, Copy, Clone, PartialEq, Eq, FromRepr)]
#[repr(usize)]
pub enum TilePattern {
    All,
    Checkerboard,
    Sparse,
}

impl TilePattern {
    /// Return the row and column of the cells with a tile, in row order.
    fn cells<R: Rng>(self, rows: usize, cols: usize, rng: &mut R) -> Vec<(usize, usize)> {
        let all = (0..rows).flat_map(|r| (0..cols).map(move |c| (r, c)));
        let mut cells: Vec<(usize, usize)> = match self {
            TilePattern::All => all.collect(),
            TilePattern::Checkerboard => all.filter(|(r, c)| (r + c) % 2 == 0).collect(),
            TilePattern::Sparse => all.filter(|_| rng.random_bool(SPARSE_PROBABILITY)).collect(),
        };

        // Always leave at least one decoy next to the keys
        let mut r: usize = 0;
        while cells.len() < 3 && r < rows * cols {
            let cell: (usize, usize) = (r / cols, r % cols);
            if !cells.contains(&cell) {
                cells.push(cell);
            }
            r += 1;
        }
        cells.sort();
        cells
    }
}

pub struct Group;

impl Technique for Group {
    fn name(&self) -> &'static str {
        "group"
    }

    fn priority(&self) -> i32 {
        8
    }

    fn apply(&self, panel: &mut PanelDraft, session: &mut Session) -> bool {
        let index: usize = panel.index;
        let backlog: usize = session.pool.eligible(index);
        let Some(plug) = session.pool.withdraw(index, &mut session.rng) else {
            debug!("    No plug to hide in a group");
            return false;
        };

        // Smaller blocks when many plugs are still waiting for a panel
        let (fw, fh) = plug.element.footprint();
        let max_rows: usize = 4usize.saturating_sub(backlog / 3).max(2);
        let max_cols: usize = 5usize.saturating_sub(backlog / 4).max(3);
        let rows: usize = session.rng.random_range(2..=max_rows);
        let cols: usize = session.rng.random_range(3..=max_cols);
        let mut found: Option<(usize, usize, Rect)> = None;
        for (r, c) in [(rows, cols), (2, 3)] {
            if let Some(rect) = panel.grid.allocate(c * fw, r * fh, &mut session.rng) {
                found = Some((r, c, rect));
                break;
            }
        }
        let Some((rows, cols, rect)) = found else {
            debug!("    No room for a group of {}", plug.element.id);
            session.pool.deposit(plug);
            return false;
        };

        let pattern: TilePattern = TilePattern::from_repr(session.rng.random_range(0..3))
            .unwrap_or(TilePattern::All);
        let cells: Vec<(usize, usize)> = pattern.cells(rows, cols, &mut session.rng);

        // Optional second key, identical to the first one
        let mut keys: Vec<Plug> = vec![plug];
        if cells.len() > 3 && session.chance(0.5) {
            let model: Element = keys[0].element.clone();
            if let Some(second) = session.pool.withdraw_where(index, &mut session.rng, |p| {
                p.element.shape == model.shape
                    && p.element.width == model.width
                    && p.element.height == model.height
            }) {
                keys.push(second);
            }
        }
        let mut key_cells: Vec<(usize, usize)> = cells.clone();
        key_cells.shuffle(&mut session.rng);
        key_cells.truncate(keys.len());
        debug!(
            "    Group {rows}x{cols} {pattern:?} at {},{} with {} key(s)",
            rect.x,
            rect.y,
            keys.len()
        );

        let shape: Shape = keys[0].element.shape;
        let (width, height) = (keys[0].element.width, keys[0].element.height);
        for (r, c) in cells {
            let cell: Rect = Rect::new(rect.x + c * fw, rect.y + r * fh, fw, fh);
            let mut tile: Element = match key_cells.iter().position(|k| *k == (r, c)) {
                Some(k) => {
                    session.record_placement(&keys[k], index);
                    disguise(&keys[k].element)
                }
                None => {
                    let mut decoy: Element = session.new_element(shape, width, height);
                    decoy.color = ElementColor::Plain(NEUTRAL_COLOR);
                    decoy.set_interaction(InteractionMethod::Tap, ChangeKind::None, 0);
                    decoy
                }
            };
            center_in(&mut tile, cell);
            panel.push(tile);
        }
        true
    }
}

/// Turn a plug into a flat gray tile that reveals the plug when tapped.
fn disguise(plug: &Element) -> Element {
    let mut key: Element = plug.clone();
    let color: u8 = plug.color.primary();
    key.color = ElementColor::Plain(NEUTRAL_COLOR);
    key.elevation = Elevation::Flat;
    key.elevation_target = Some(Elevation::Raised);
    key.set_interaction(InteractionMethod::Tap, ChangeKind::Color, color as i32);
    key.remote_actions.push(RemoteAction::release(&key.id));
    key
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::difficulty::{Difficulty, DifficultyProfile};

    fn plug(session: &mut Session, color: u8) -> Plug {
        let mut element: Element = session.new_element(Shape::Circle, 1.0, 1.0);
        element.color = ElementColor::Plain(color);
        element.elevation = Elevation::Raised;
        element.set_interaction(InteractionMethod::Drag, ChangeKind::None, 0);
        Plug {
            element,
            origin: 0,
            remote: false,
        }
    }

    #[test]
    fn group_needs_a_plug() {
        let mut session: Session =
            Session::new(DifficultyProfile::new(Difficulty::Medium), Some(1), false);
        let mut panel: PanelDraft = PanelDraft::new(1, "blue");
        assert!(!Group.apply(&mut panel, &mut session));

        // Plugs from the same panel are not eligible
        let p: Plug = plug(&mut session, 4);
        session.pool.deposit(p);
        let mut panel: PanelDraft = PanelDraft::new(0, "blue");
        assert!(!Group.apply(&mut panel, &mut session));
        assert_eq!(session.pool.len(), 1);
    }

    #[test]
    fn keys_are_disguised_plugs() {
        let mut session: Session =
            Session::new(DifficultyProfile::new(Difficulty::Medium), Some(1), false);
        let p: Plug = plug(&mut session, 4);
        let id: String = p.element.id.clone();
        session.pool.deposit(p);
        let mut panel: PanelDraft = PanelDraft::new(1, "blue");
        assert!(Group.apply(&mut panel, &mut session));
        assert!(session.pool.is_empty());
        assert_eq!(session.placements.len(), 1);
        assert_eq!(session.placements[0].panel, 1);

        let tiles: &[Element] = &panel.panel.elements;
        assert!(tiles.len() >= 3);
        let key: &Element = panel.panel.get(&id).unwrap();
        assert_eq!(key.color, ElementColor::Plain(NEUTRAL_COLOR));
        assert_eq!(key.elevation, Elevation::Flat);
        assert_eq!(key.elevation_target, Some(Elevation::Raised));
        assert_eq!((key.change, key.target), (ChangeKind::Color, 4));
        assert_eq!(key.remote_actions, vec![RemoteAction::release(&id)]);
        for tile in tiles {
            assert_eq!(tile.shape, key.shape);
            assert_eq!(tile.color, key.color);
            assert_eq!(tile.method, InteractionMethod::Tap);
        }
    }

    #[test]
    fn only_withdrawn_plugs_become_keys() {
        for seed in 0..20 {
            let mut session: Session =
                Session::new(DifficultyProfile::new(Difficulty::Medium), Some(seed), false);
            let mut pooled: Vec<String> = Vec::new();
            for color in 1..5 {
                let p: Plug = plug(&mut session, color);
                pooled.push(p.element.id.clone());
                session.pool.deposit(p);
            }
            let mut panel: PanelDraft = PanelDraft::new(1, "blue");
            assert!(Group.apply(&mut panel, &mut session));

            let left: Vec<String> = session.pool.iter().map(|p| p.element.id.clone()).collect();
            let mut withdrawn: Vec<String> =
                pooled.into_iter().filter(|id| !left.contains(id)).collect();
            let mut keys: Vec<String> = panel
                .panel
                .elements
                .iter()
                .filter(|e| e.change == ChangeKind::Color)
                .map(|e| e.id.clone())
                .collect();
            withdrawn.sort();
            keys.sort();
            assert!(!keys.is_empty() && keys.len() <= 2, "seed {seed}");
            assert_eq!(keys, withdrawn, "seed {seed}");

            for decoy in panel.panel.elements.iter().filter(|e| !keys.contains(&e.id)) {
                assert_eq!(decoy.color, ElementColor::Plain(NEUTRAL_COLOR));
                assert_eq!(decoy.method, InteractionMethod::Tap);
                assert_eq!(decoy.change, ChangeKind::None);
                assert_eq!(decoy.elevation_target, None);
                assert!(decoy.remote_actions.is_empty());
            }
        }
    }

    #[test]
    fn patterns() {
        let mut session: Session =
            Session::new(DifficultyProfile::new(Difficulty::Medium), Some(1), false);
        assert_eq!(TilePattern::All.cells(2, 3, &mut session.rng).len(), 6);
        assert_eq!(TilePattern::Checkerboard.cells(2, 3, &mut session.rng).len(), 3);
        assert!(TilePattern::Sparse.cells(2, 3, &mut session.rng).len() >= 3);
    }
}
