/*
grid.rs

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

//! Occupancy grid of a panel.
//!
//! Each panel is an 8x8 grid of cells.
//! Techniques and covers use the grid to find room for their elements, and then reserve the
//! cells that the elements cover.

use log::{Level, debug, log_enabled};
use rand::Rng;

use crate::config::GRID_SIZE;
use crate::model::{Element, Shape};

/// Number of random placements tried before scanning the grid.
const RANDOM_TRIES: usize = 20;

/// Rectangle of grid cells.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Rect {
    pub x: usize,
    pub y: usize,
    pub w: usize,
    pub h: usize,
}

impl Rect {
    /// Create a [`Rect`] object.
    pub fn new(x: usize, y: usize, w: usize, h: usize) -> Self {
        Self { x, y, w, h }
    }

    /// Whether the two rectangles share at least one cell.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }

    /// Whether the rectangle lies inside the grid.
    pub fn in_bounds(&self) -> bool {
        self.x + self.w <= GRID_SIZE && self.y + self.h <= GRID_SIZE
    }
}

/// Occupancy grid.
#[derive(Debug, Clone, Default)]
pub struct Grid {
    /// Occupied cells, indexed by row and then by column.
    cells: [[bool; GRID_SIZE]; GRID_SIZE],

    /// Rectangles claimed through [`Grid::claim`], in claim order.
    claims: Vec<Rect>,
}

impl Grid {
    /// Create an empty grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the cell is occupied. Cells outside the grid are reported occupied.
    pub fn is_occupied(&self, x: usize, y: usize) -> bool {
        x >= GRID_SIZE || y >= GRID_SIZE || self.cells[y][x]
    }

    /// Mark the cells of the rectangle as occupied.
    ///
    /// The part of the rectangle outside the grid is ignored.
    pub fn reserve_rect(&mut self, x: i64, y: i64, w: usize, h: usize) {
        for cy in y..y + h as i64 {
            for cx in x..x + w as i64 {
                if (0..GRID_SIZE as i64).contains(&cx) && (0..GRID_SIZE as i64).contains(&cy) {
                    self.cells[cy as usize][cx as usize] = true;
                }
            }
        }
    }

    /// Mark the cells covered by the element as occupied.
    ///
    /// The top-left corner of the element is rounded down to the cell that contains it.
    pub fn reserve(&mut self, element: &Element) {
        let (w, h) = element.footprint();
        self.reserve_rect(element.x.floor() as i64, element.y.floor() as i64, w, h);
    }

    /// Reserve the rectangle and record it as a claim.
    pub fn claim(&mut self, rect: Rect) {
        self.reserve_rect(rect.x as i64, rect.y as i64, rect.w, rect.h);
        self.claims.push(rect);
    }

    /// Rectangles claimed so far.
    pub fn claims(&self) -> &[Rect] {
        &self.claims
    }

    /// Whether the rectangle is inside the grid and all its cells are free.
    pub fn is_free(&self, x: usize, y: usize, w: usize, h: usize) -> bool {
        if x + w > GRID_SIZE || y + h > GRID_SIZE {
            return false;
        }
        (y..y + h).all(|cy| (x..x + w).all(|cx| !self.cells[cy][cx]))
    }

    /// Number of free cells.
    pub fn free_cells(&self) -> usize {
        self.cells.iter().flatten().filter(|c| !**c).count()
    }

    /// Find room for an element of the given shape and size.
    ///
    /// Return the top-left cell, or [`None`] if the element does not fit anywhere.
    pub fn find_free_space<R: Rng>(
        &self,
        width: f64,
        height: f64,
        shape: Shape,
        rng: &mut R,
    ) -> Option<(usize, usize)> {
        let (w, h) = shape.footprint(width, height);
        self.find_free_cells(w, h, rng)
    }

    /// Find a free rectangle of `w` x `h` cells.
    ///
    /// A few random positions are tried first, and then the grid is scanned row by row.
    pub fn find_free_cells<R: Rng>(&self, w: usize, h: usize, rng: &mut R) -> Option<(usize, usize)> {
        if w == 0 || h == 0 || w > GRID_SIZE || h > GRID_SIZE {
            return None;
        }
        for _ in 0..RANDOM_TRIES {
            let x: usize = rng.random_range(0..=GRID_SIZE - w);
            let y: usize = rng.random_range(0..=GRID_SIZE - h);
            if self.is_free(x, y, w, h) {
                return Some((x, y));
            }
        }
        for y in 0..=GRID_SIZE - h {
            for x in 0..=GRID_SIZE - w {
                if self.is_free(x, y, w, h) {
                    return Some((x, y));
                }
            }
        }
        debug!("No room for {w}x{h} cells");
        None
    }

    /// Find and claim room for `w` x `h` cells.
    pub fn allocate<R: Rng>(&mut self, w: usize, h: usize, rng: &mut R) -> Option<Rect> {
        let (x, y) = self.find_free_cells(w, h, rng)?;
        let rect: Rect = Rect::new(x, y, w, h);
        self.claim(rect);
        Some(rect)
    }

    /// Print the grid.
    pub fn debug(&self) {
        if !log_enabled!(Level::Debug) {
            return;
        }
        for row in &self.cells {
            let s: String = row.iter().map(|c| if *c { '#' } else { '.' }).collect();
            debug!("    {s}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn reserve_uses_scaled_footprint() {
        let mut grid: Grid = Grid::new();
        let mut screw: Element = Element::new("s1", Shape::Screw, 1.6, 1.6);
        screw.set_position(2.0, 3.0);
        grid.reserve(&screw);
        assert!(grid.is_occupied(2, 3));
        assert!(grid.is_occupied(3, 4));
        assert!(!grid.is_occupied(4, 3));
        assert_eq!(grid.free_cells(), 60);
    }

    #[test]
    fn switch_reserves_ball_column() {
        let mut grid: Grid = Grid::new();
        let mut switch: Element = Element::new("w1", Shape::Switch, 1.0, 1.0);
        switch.set_position(0.0, 0.0);
        grid.reserve(&switch);
        assert!(grid.is_occupied(1, 0));
        assert!(!grid.is_occupied(2, 0));
    }

    #[test]
    fn reservation_is_clipped() {
        let mut grid: Grid = Grid::new();
        grid.reserve_rect(6, -1, 4, 3);
        assert!(grid.is_occupied(7, 1));
        assert!(!grid.is_occupied(0, 0));
        assert!(!grid.is_occupied(5, 0));
        assert_eq!(grid.free_cells(), 60);
    }

    #[test]
    fn is_free_checks_bounds() {
        let grid: Grid = Grid::new();
        assert!(grid.is_free(0, 0, 8, 8));
        assert!(!grid.is_free(1, 0, 8, 1));
        assert!(!grid.is_free(0, 7, 1, 2));
    }

    #[test]
    fn find_free_space_falls_back_to_scan() {
        let mut rng: StdRng = StdRng::seed_from_u64(7);
        let mut grid: Grid = Grid::new();
        // Leave a single free 2x2 area at the bottom-right corner
        grid.reserve_rect(0, 0, 8, 6);
        grid.reserve_rect(0, 6, 6, 2);
        assert_eq!(
            grid.find_free_space(2.0, 2.0, Shape::Rectangle, &mut rng),
            Some((6, 6))
        );
        assert_eq!(grid.find_free_space(2.0, 2.0, Shape::Tumbler, &mut rng), None);
    }

    #[test]
    fn allocations_never_overlap() {
        let mut rng: StdRng = StdRng::seed_from_u64(3);
        let mut grid: Grid = Grid::new();
        while grid.allocate(2, 1, &mut rng).is_some() {}
        let claims: &[Rect] = grid.claims();
        assert!(claims.len() >= 24);
        assert_eq!(grid.free_cells(), 64 - 2 * claims.len());
        for (i, a) in claims.iter().enumerate() {
            assert!(a.in_bounds());
            for b in &claims[i + 1..] {
                assert!(!a.overlaps(b));
            }
        }
    }
}
