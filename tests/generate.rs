/*
generate.rs

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

//! Properties of the generated puzzle boxes, checked over many seeds.

use std::collections::HashSet;

use puzzlebox::generator::box_generator::{
    BoxGenerator, GenerationReport, GeneratorConfig, MAX_LAST_RESORT,
};
use puzzlebox::generator::difficulty::{Difficulty, DifficultyProfile};
use puzzlebox::generator::grid::Rect;
use puzzlebox::generator::techniques::maze::{MazeLayout, carve_maze};
use puzzlebox::model::{ChangeKind, Elevation, InteractionMethod, Puzzle, Shape};
use puzzlebox::parse_puzzle;
use rand::SeedableRng;
use rand::rngs::StdRng;

const DIFFICULTIES: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

fn generate(difficulty: Difficulty, seed: u64) -> (Puzzle, GenerationReport) {
    let mut generator: BoxGenerator = BoxGenerator::new(GeneratorConfig {
        difficulty,
        seed: Some(seed),
        reward: Some(String::from("star")),
        ..GeneratorConfig::default()
    });
    let puzzle: Puzzle = generator.generate();
    (puzzle, generator.report)
}

#[test]
fn puzzle_strings_are_stable() {
    for difficulty in DIFFICULTIES {
        for seed in 0..30 {
            let (puzzle, _) = generate(difficulty, seed);
            let s: String = puzzle.to_string();
            let parsed: Puzzle = parse_puzzle(&s).unwrap();
            assert_eq!(parsed.to_string(), s, "{difficulty} seed {seed}");
            assert_eq!(parsed.panels.len(), puzzle.panels.len());
            assert_eq!(parsed.reward.as_deref(), Some("star"));
        }
    }
}

#[test]
fn claims_never_overlap() {
    for difficulty in DIFFICULTIES {
        for seed in 0..30 {
            let (_, report) = generate(difficulty, seed);
            for claims in &report.claims {
                for (i, a) in claims.iter().enumerate() {
                    assert!(a.in_bounds(), "{difficulty} seed {seed}: {a:?}");
                    let others: &[Rect] = &claims[i + 1..];
                    assert!(
                        others.iter().all(|b| !a.overlaps(b)),
                        "{difficulty} seed {seed}: {a:?}"
                    );
                }
            }
        }
    }
}

#[test]
fn plugs_never_land_on_their_own_panel() {
    for seed in 0..50 {
        let (puzzle, report) = generate(Difficulty::Hard, seed);
        for placement in &report.placements {
            assert_ne!(placement.panel, placement.origin);
            assert!(placement.panel > placement.origin);
            if placement.origin == 0 {
                assert!(puzzle.panels[0].get(&placement.id).is_none());
            }
        }
    }
}

#[test]
fn element_ids_are_unique() {
    for seed in 0..20 {
        let (puzzle, _) = generate(Difficulty::Hard, seed);
        let mut ids: HashSet<&str> = HashSet::new();
        for panel in &puzzle.panels {
            for e in &panel.elements {
                assert!(ids.insert(&e.id), "seed {seed}: duplicated {}", e.id);
                assert_eq!(Some(e.shape), Shape::from_code(e.id.chars().next().unwrap()));
            }
        }
    }
}

#[test]
fn first_panel_waits_for_a_plug() {
    for difficulty in DIFFICULTIES {
        for seed in 0..20 {
            let (puzzle, _) = generate(difficulty, seed);
            let first = &puzzle.panels[0];
            assert!(
                first
                    .elements
                    .iter()
                    .any(|e| e.is_socket() && e.elevation == Elevation::Sunken),
                "{difficulty} seed {seed}"
            );
        }
    }
}

#[test]
fn generation_is_bounded() {
    for seed in 0..100 {
        let mut generator: BoxGenerator = BoxGenerator::new(GeneratorConfig {
            difficulty: Difficulty::Hard,
            panels: Some(1 + seed as usize % 3),
            seed: Some(seed),
            force_covers: seed % 2 == 0,
            ..GeneratorConfig::default()
        });
        let planned: usize = 1 + seed as usize % 3;
        let puzzle: Puzzle = generator.generate();
        assert!(generator.report.panel_iterations <= planned + MAX_LAST_RESORT);
        assert_eq!(
            puzzle.panels.len(),
            planned + generator.report.last_resort_panels
        );
    }
}

#[test]
fn remote_plugs_stay_reachable() {
    for seed in 0..30 {
        let (puzzle, report) = generate(Difficulty::Hard, seed);
        for placement in &report.placements {
            let panel = &puzzle.panels[placement.panel];
            let Some(plug) = panel.get(&placement.id) else {
                continue;
            };
            // A plug is either draggable, revealed by a tap, or driven by something else
            let driven: bool = plug.has_remote_move(panel)
                || panel.elements.iter().any(|e| {
                    e.remote_actions
                        .iter()
                        .any(|a| a.target_id() == plug.id && e.id != plug.id)
                });
            assert!(
                plug.method != InteractionMethod::None || driven,
                "seed {seed}: {plug}"
            );
        }
    }
}

#[test]
fn mazes_are_solvable() {
    let mut rng: StdRng = StdRng::seed_from_u64(2024);
    for _ in 0..200 {
        for (w, h) in [(5, 5), (5, 7), (7, 5), (7, 7)] {
            let layout: MazeLayout = carve_maze(w, h, &mut rng);
            assert!(layout.is_connected());
            let corridors: usize = layout.corridors().len();
            assert!(corridors >= (w / 2) * (h / 2) - 1);
        }
    }
}

#[test]
fn maze_balls_roll_to_their_exit() {
    let profile: DifficultyProfile = DifficultyProfile::new(Difficulty::Hard);
    assert!(profile.techniques.contains(&"maze"));
    for seed in 0..30 {
        let (puzzle, _) = generate(Difficulty::Hard, seed);
        for panel in &puzzle.panels {
            for ball in panel.elements.iter().filter(|e| e.change == ChangeKind::Move) {
                assert_eq!(ball.method, InteractionMethod::Drag);
                assert_eq!(ball.shape, Shape::Circle);
                // The exit socket has the color of the ball
                assert!(panel.elements.iter().any(|e| e.is_socket()
                    && e.shape == Shape::Circle
                    && e.width == ball.width
                    && e.color == ball.color));
            }
        }
    }
}

#[test]
fn victory_message() {
    let puzzle: Puzzle = parse_puzzle("Great job! [star]/blue:w1 1x1 3x3 0 0-6-3 tap state 1")
        .unwrap();
    assert_eq!(puzzle.message, "Great job!");
    assert_eq!(puzzle.reward.as_deref(), Some("star"));
    assert_eq!(puzzle.panels.len(), 1);
    assert_eq!(
        puzzle.to_string(),
        "Great job! [star]/blue:w1 1x1 3x3 0 0-6-3 tap state 1"
    );
}
