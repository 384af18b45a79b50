/*
maze.rs

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

//! Mazes.
//!
//! The player drags a ball from the entrance of the maze, on its bottom edge, to the exit
//! socket.
//! The maze is carved with a randomized depth-first search on a grid of odd dimensions, moving
//! two cells at a time so that walls stay one cell thick.
//! The exit is the open cell that is the most distant from the entrance.

use log::{Level, debug, log_enabled};
use rand::Rng;
use rand::seq::IndexedRandom;
use std::collections::VecDeque;

use super::Technique;
use crate::generator::grid::Rect;
use crate::generator::session::{CoverRole, Coverable, PanelDraft, Session};
use crate::model::{
    ChangeKind, Element, ElementColor, Elevation, InteractionMethod, Shape, SizeComparison,
};

/// Maze dimensions, in cells, from the largest to the smallest.
const SIZES: [(usize, usize); 4] = [(7, 7), (7, 5), (5, 7), (5, 5)];

/// Size of the ball and of the exit socket.
const BALL_SIZE: f64 = 0.8;

/// Carving directions.
const STEPS: [(isize, isize); 4] = [(0, -2), (2, 0), (0, 2), (-2, 0)];

/// Carved maze.
#[derive(Debug, Clone)]
pub struct MazeLayout {
    pub width: usize,

    pub height: usize,

    /// Open cells, indexed by row and then by column. Closed cells are walls.
    pub open: Vec<Vec<bool>>,

    /// Opening in the bottom wall where the ball starts.
    pub entrance: (usize, usize),

    /// Open cell where the exit socket is.
    pub exit: (usize, usize),
}

impl MazeLayout {
    /// Distance, in steps, from the given cell to every reachable open cell.
    pub fn distances(&self, from: (usize, usize)) -> Vec<Vec<Option<usize>>> {
        let mut dist: Vec<Vec<Option<usize>>> = vec![vec![None; self.width]; self.height];
        let mut queue: VecDeque<(usize, usize)> = VecDeque::new();
        dist[from.1][from.0] = Some(0);
        queue.push_back(from);

        while let Some((x, y)) = queue.pop_front() {
            let d: usize = dist[y][x].unwrap_or(0);
            for (dx, dy) in [(0, -1), (1, 0), (0, 1), (-1, 0)] {
                let nx: isize = x as isize + dx;
                let ny: isize = y as isize + dy;
                if nx < 0 || ny < 0 || nx >= self.width as isize || ny >= self.height as isize {
                    continue;
                }
                let (nx, ny) = (nx as usize, ny as usize);
                if self.open[ny][nx] && dist[ny][nx].is_none() {
                    dist[ny][nx] = Some(d + 1);
                    queue.push_back((nx, ny));
                }
            }
        }
        dist
    }

    /// Whether the ball can roll from the entrance to the exit.
    pub fn is_connected(&self) -> bool {
        self.distances(self.entrance)[self.exit.1][self.exit.0].is_some()
    }

    /// Walls, merged in horizontal runs: column, row, and length.
    pub fn wall_runs(&self) -> Vec<(usize, usize, usize)> {
        let mut runs: Vec<(usize, usize, usize)> = Vec::new();
        for (y, row) in self.open.iter().enumerate() {
            let mut x: usize = 0;
            while x < self.width {
                if row[x] {
                    x += 1;
                    continue;
                }
                let start: usize = x;
                while x < self.width && !row[x] {
                    x += 1;
                }
                runs.push((start, y, x - start));
            }
        }
        runs
    }

    /// Open cells, excluding the entrance and the exit.
    pub fn corridors(&self) -> Vec<(usize, usize)> {
        let mut cells: Vec<(usize, usize)> = Vec::new();
        for (y, row) in self.open.iter().enumerate() {
            for (x, open) in row.iter().enumerate() {
                if *open && (x, y) != self.entrance && (x, y) != self.exit {
                    cells.push((x, y));
                }
            }
        }
        cells
    }

    /// Print the maze.
    pub fn debug(&self) {
        if !log_enabled!(Level::Debug) {
            return;
        }
        for (y, row) in self.open.iter().enumerate() {
            let s: String = row
                .iter()
                .enumerate()
                .map(|(x, open)| {
                    if (x, y) == self.entrance {
                        'E'
                    } else if (x, y) == self.exit {
                        'X'
                    } else if *open {
                        '.'
                    } else {
                        '#'
                    }
                })
                .collect();
            debug!("    {s}");
        }
    }
}

/// Carve a maze of `width` x `height` cells. Both dimensions must be odd and at least 3.
pub fn carve_maze<R: Rng>(width: usize, height: usize, rng: &mut R) -> MazeLayout {
    let mut open: Vec<Vec<bool>> = vec![vec![false; width]; height];

    // Depth-first carving, from a random odd cell
    let start: (usize, usize) = (
        1 + 2 * rng.random_range(0..(width - 1) / 2),
        1 + 2 * rng.random_range(0..(height - 1) / 2),
    );
    open[start.1][start.0] = true;
    let mut stack: Vec<(usize, usize)> = vec![start];
    while let Some(&(x, y)) = stack.last() {
        let next: Vec<(usize, usize)> = STEPS
            .iter()
            .filter_map(|(dx, dy)| {
                let nx: isize = x as isize + dx;
                let ny: isize = y as isize + dy;
                if nx < 1 || ny < 1 || nx > width as isize - 2 || ny > height as isize - 2 {
                    return None;
                }
                let (nx, ny) = (nx as usize, ny as usize);
                if open[ny][nx] { None } else { Some((nx, ny)) }
            })
            .collect();
        match next.choose(rng) {
            Some(&(nx, ny)) => {
                open[(y + ny) / 2][(x + nx) / 2] = true;
                open[ny][nx] = true;
                stack.push((nx, ny));
            }
            None => {
                stack.pop();
            }
        }
    }

    // Entrance in the bottom wall, under a carved cell
    let bottom: usize = height - 1;
    let candidates: Vec<usize> = (1..width - 1)
        .step_by(2)
        .filter(|x| open[bottom - 1][*x])
        .collect();
    let entrance_x: usize = match candidates.choose(rng) {
        Some(x) => *x,
        None => {
            // Straight tunnel up to the first open cell
            let mut y: usize = bottom - 1;
            while y > 0 && !open[y][1] {
                open[y][1] = true;
                y -= 1;
            }
            1
        }
    };
    open[bottom][entrance_x] = true;
    let entrance: (usize, usize) = (entrance_x, bottom);

    let mut layout: MazeLayout = MazeLayout {
        width,
        height,
        open,
        entrance,
        exit: entrance,
    };

    // The exit is the most distant cell
    let dist: Vec<Vec<Option<usize>>> = layout.distances(entrance);
    let mut best: usize = 0;
    for (y, row) in dist.iter().enumerate() {
        for (x, d) in row.iter().enumerate() {
            if let Some(d) = d
                && *d > best
            {
                best = *d;
                layout.exit = (x, y);
            }
        }
    }
    layout
}

pub struct Maze;

impl Technique for Maze {
    fn name(&self) -> &'static str {
        "maze"
    }

    fn priority(&self) -> i32 {
        10
    }

    fn apply(&self, panel: &mut PanelDraft, session: &mut Session) -> bool {
        let first: usize = session.rng.random_range(0..SIZES.len());
        let mut found: Option<(usize, usize, Rect)> = None;
        for &(w, h) in SIZES.iter().skip(first) {
            // One free row under the maze keeps the entrance reachable
            if let Some(rect) = panel.grid.allocate(w, h + 1, &mut session.rng) {
                found = Some((w, h, rect));
                break;
            }
        }
        let Some((width, height, rect)) = found else {
            debug!("    No room for a maze");
            return false;
        };

        let layout: MazeLayout = carve_maze(width, height, &mut session.rng);
        debug!(
            "    Maze {width}x{height} at {},{} entrance {:?} exit {:?}",
            rect.x, rect.y, layout.entrance, layout.exit
        );
        layout.debug();

        let wall_color: u8 = session.random_color();
        for (x, y, len) in layout.wall_runs() {
            let mut wall: Element = session.new_element(Shape::Rectangle, len as f64, 1.0);
            wall.set_position((rect.x + x) as f64, (rect.y + y) as f64);
            wall.elevation = Elevation::Raised;
            wall.color = ElementColor::Plain(wall_color);
            panel.push(wall);
        }

        let offset: f64 = (1.0 - BALL_SIZE) / 2.0;
        let ball_color: u8 = session.random_color();

        let mut socket: Element = session.new_element(Shape::Circle, BALL_SIZE, BALL_SIZE);
        socket.set_position(
            (rect.x + layout.exit.0) as f64 + offset,
            (rect.y + layout.exit.1) as f64 + offset,
        );
        socket.elevation = Elevation::Sunken;
        socket.color = ElementColor::Plain(ball_color);
        socket.comparison = Some(SizeComparison::Equal);
        panel.push(socket);

        let mut ball: Element = session.new_element(Shape::Circle, BALL_SIZE, BALL_SIZE);
        ball.set_position(
            (rect.x + layout.entrance.0) as f64 + offset,
            (rect.y + layout.entrance.1) as f64 + offset,
        );
        ball.elevation = Elevation::Raised;
        ball.color = ElementColor::Plain(ball_color);
        ball.set_interaction(InteractionMethod::Drag, ChangeKind::Move, 1);
        let ball_id: String = ball.id.clone();
        panel.push(ball);

        // A corridor cell that covers can block
        if let Some(&(x, y)) = layout.corridors().choose(&mut session.rng) {
            panel.coverables.push(Coverable {
                id: ball_id,
                footprint: Rect::new(rect.x + x, rect.y + y, 1, 1),
                elevation: Elevation::Flat,
                has_remote: false,
                source: None,
                role: CoverRole::Virtual,
                size_obscured: false,
            });
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::difficulty::{Difficulty, DifficultyProfile};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn mazes_are_connected() {
        for seed in 0..50 {
            let mut rng: StdRng = StdRng::seed_from_u64(seed);
            for (w, h) in SIZES {
                let layout: MazeLayout = carve_maze(w, h, &mut rng);
                assert!(layout.is_connected(), "seed {seed} {w}x{h}");
                assert_eq!(layout.entrance.1, h - 1);
                assert_ne!(layout.entrance, layout.exit);
                // The outer walls stay closed, except for the entrance
                for x in 0..w {
                    assert!(!layout.open[0][x]);
                    assert_eq!(layout.open[h - 1][x], x == layout.entrance.0);
                }
            }
        }
    }

    #[test]
    fn exit_is_the_farthest_cell() {
        for seed in 0..30 {
            let mut rng: StdRng = StdRng::seed_from_u64(seed);
            for (w, h) in SIZES {
                let layout: MazeLayout = carve_maze(w, h, &mut rng);
                let dist: Vec<Vec<Option<usize>>> = layout.distances(layout.entrance);
                let farthest: usize = dist.iter().flatten().flatten().copied().max().unwrap();
                assert_eq!(dist[layout.exit.1][layout.exit.0], Some(farthest), "seed {seed}");
            }
        }
    }

    #[test]
    fn every_odd_cell_is_carved() {
        let mut rng: StdRng = StdRng::seed_from_u64(9);
        let layout: MazeLayout = carve_maze(7, 7, &mut rng);
        let dist: Vec<Vec<Option<usize>>> = layout.distances(layout.entrance);
        for y in (1..6).step_by(2) {
            for x in (1..6).step_by(2) {
                assert!(dist[y][x].is_some());
            }
        }
    }

    #[test]
    fn wall_runs_cover_closed_cells() {
        let mut rng: StdRng = StdRng::seed_from_u64(4);
        let layout: MazeLayout = carve_maze(5, 5, &mut rng);
        let walls: usize = layout.wall_runs().iter().map(|(_, _, len)| len).sum();
        let closed: usize = layout.open.iter().flatten().filter(|o| !**o).count();
        assert_eq!(walls, closed);
        // Top row is a single run
        assert_eq!(layout.wall_runs()[0], (0, 0, 5));
    }

    #[test]
    fn maze_on_a_panel() {
        let mut session: Session =
            Session::new(DifficultyProfile::new(Difficulty::Medium), Some(8), false);
        let mut panel: PanelDraft = PanelDraft::new(1, "teal");
        assert!(Maze.apply(&mut panel, &mut session));

        let rect: Rect = panel.grid.claims()[0];
        assert!(rect.h >= 6 && rect.in_bounds());
        let ball: &Element = panel.panel.elements.last().unwrap();
        assert_eq!(ball.change, ChangeKind::Move);
        assert_eq!(ball.method, InteractionMethod::Drag);
        let coverable: &Coverable = &panel.coverables[0];
        assert_eq!(coverable.role, CoverRole::Virtual);
        assert_eq!(coverable.id, ball.id);

        // A second maze never fits next to the first one
        assert!(!Maze.apply(&mut panel, &mut session));
    }
}
