/*
box_generator.rs

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

//! Generate a puzzle box.
//!
//! Panels are generated from the innermost, which the player opens last, to the outermost.
//! Each panel receives a few techniques, then some of the plugs that the previous panels left
//! in the pool, and finally covers.
//! Because a plug is always placed on a panel generated after the panel of its socket, the
//! player always meets the plug before the socket.
//!
//! The plugs that are still in the pool after the planned panels go to extra panels, built
//! around a switch.
//! The number of extra panels is bounded: plugs that do not fit are dropped.

use log::{debug, warn};
use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};
use std::cmp::Reverse;
use std::collections::BTreeMap;

use super::covers::CoverManager;
use super::difficulty::{Difficulty, DifficultyProfile};
use super::goal::has_active_goal;
use super::grid::Rect;
use super::plugs::{Plug, PlugPlacement};
use super::remote::add_remote_controllers;
use super::session::{CoverRole, PanelDraft, Session};
use super::techniques::{BoxedTechnique, center_in, technique_table};
use crate::config::THEMES;
use crate::model::{Element, InteractionMethod, Panel, Puzzle};

/// Maximum number of extra panels created for the leftover plugs.
pub const MAX_LAST_RESORT: usize = 8;

/// Maximum number of extra holes added to the first panel when its techniques did not create
/// any plug.
const MAX_PLUG_ATTEMPTS: usize = 3;

/// Generation parameters.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub difficulty: Difficulty,

    /// Number of panels before the extra panels. The difficulty level decides when not set.
    pub panels: Option<usize>,

    /// Seed for reproducible puzzles. A random seed is used when not set.
    pub seed: Option<u64>,

    /// Cover every coverable element.
    pub force_covers: bool,

    /// Victory message.
    pub message: String,

    /// Optional reward revealed with the victory message.
    pub reward: Option<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            panels: None,
            seed: None,
            force_covers: false,
            message: String::from("Well done!"),
            reward: None,
        }
    }
}

/// What happened during the last generation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationReport {
    /// Number of panels built, including the discarded extra panel, if any.
    pub panel_iterations: usize,

    /// Number of extra panels kept for the leftover plugs.
    pub last_resort_panels: usize,

    /// IDs of the plugs that no panel could hold.
    pub dropped_plugs: Vec<String>,

    /// Where each plug was placed.
    pub placements: Vec<PlugPlacement>,

    /// Rectangles claimed on each panel.
    pub claims: Vec<Vec<Rect>>,
}

/// Puzzle box generator.
pub struct BoxGenerator {
    pub config: GeneratorConfig,

    /// Report of the last call to [`BoxGenerator::generate`].
    pub report: GenerationReport,

    techniques: BTreeMap<&'static str, BoxedTechnique>,

    covers: CoverManager,
}

impl BoxGenerator {
    /// Create a [`BoxGenerator`] object.
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            report: GenerationReport::default(),
            techniques: technique_table(),
            covers: CoverManager::new(),
        }
    }

    /// Create a generator with the default parameters and the given seed.
    pub fn with_seed(seed: u64) -> Self {
        Self::new(GeneratorConfig {
            seed: Some(seed),
            ..GeneratorConfig::default()
        })
    }

    /// Generate a puzzle box.
    ///
    /// The generation always succeeds. See [`BoxGenerator::report`] for the plugs that might
    /// have been dropped.
    pub fn generate(&mut self) -> Puzzle {
        let profile: DifficultyProfile = DifficultyProfile::new(self.config.difficulty);
        let planned: usize = self.config.panels.unwrap_or(profile.panels).max(1);
        let mut session: Session =
            Session::new(profile, self.config.seed, self.config.force_covers);
        self.report = GenerationReport::default();
        debug!(
            "Generating {planned} panels, difficulty {}",
            self.config.difficulty
        );

        let mut drafts: Vec<PanelDraft> = Vec::new();
        for index in 0..planned {
            let theme: &str = pick_theme(drafts.last(), &mut session);
            debug!("Panel {index}, theme {theme}");
            let mut draft: PanelDraft = PanelDraft::new(index, theme);

            self.populate(&mut draft, &mut session);
            let eligible: usize = session.pool.eligible(index);
            let quota: usize = session.profile.plug_quota(index, planned, eligible);
            let placed: usize = distribute_plugs(&mut draft, &mut session, quota);
            debug!("  {placed}/{quota} plug(s) placed, {} in the pool", session.pool.len());
            self.ensure_goal(&mut draft, &mut session);
            let probability: f64 = session.profile.cover_probability;
            self.covers.add_coverings(&mut draft, &mut session, probability);

            draft.grid.debug();
            self.report.panel_iterations += 1;
            drafts.push(draft);
        }
        self.last_resort(&mut drafts, &mut session);

        for plug in session.pool.drain() {
            warn!(
                "Plug {} from panel {} dropped: no panel can hold it",
                plug.element.id, plug.origin
            );
            self.report.dropped_plugs.push(plug.element.id);
        }
        self.report.placements = std::mem::take(&mut session.placements);
        self.report.claims = drafts.iter().map(|d| d.grid.claims().to_vec()).collect();

        Puzzle {
            message: self.config.message.clone(),
            reward: self.config.reward.clone(),
            panels: drafts.into_iter().map(PanelDraft::finalize).collect::<Vec<Panel>>(),
        }
    }

    /// Apply random techniques to the panel, in priority order.
    fn populate(&self, draft: &mut PanelDraft, session: &mut Session) {
        let mut names: Vec<&'static str> = session.profile.techniques.to_vec();
        names.shuffle(&mut session.rng);
        let count: usize = session
            .rng
            .random_range(session.profile.techniques_per_panel.clone());
        names.truncate(count);
        let mut selected: Vec<&BoxedTechnique> =
            names.iter().filter_map(|n| self.techniques.get(n)).collect();

        // The innermost panel must create at least one plug for the other panels
        let first: bool = draft.index == 0;
        if first && !selected.iter().any(|t| t.has_plug_and_socket()) {
            let candidates: Vec<&BoxedTechnique> = session
                .profile
                .techniques
                .iter()
                .filter_map(|n| self.techniques.get(n))
                .filter(|t| t.has_plug_and_socket())
                .collect();
            if let Some(t) = candidates.choose(&mut session.rng) {
                if !selected.is_empty() {
                    selected.remove(0);
                }
                selected.push(*t);
            }
        }
        selected.sort_by_key(|t| Reverse(t.priority()));

        session.require_plug = first;
        for technique in selected {
            let applied: bool = technique.apply(draft, session);
            debug!(
                "  Technique {}: {}",
                technique.name(),
                if applied { "applied" } else { "skipped" }
            );
        }
        if first
            && session.pool.is_empty()
            && let Some(hole) = self.techniques.get("hole")
        {
            for _ in 0..MAX_PLUG_ATTEMPTS {
                hole.apply(draft, session);
                if !session.pool.is_empty() {
                    break;
                }
            }
        }
        session.require_plug = false;
    }

    /// Add a switch to a panel that would otherwise open immediately.
    fn ensure_goal(&self, draft: &mut PanelDraft, session: &mut Session) {
        if has_active_goal(&draft.panel) {
            return;
        }
        debug!("  No goal, adding a switch");
        if let Some(switch) = self.techniques.get("switch") {
            switch.apply(draft, session);
        }
    }

    /// Create extra panels for the plugs left in the pool.
    fn last_resort(&mut self, drafts: &mut Vec<PanelDraft>, session: &mut Session) {
        let mut iterations: usize = 0;
        while !session.pool.is_empty() && iterations < MAX_LAST_RESORT {
            iterations += 1;
            let index: usize = drafts.len();
            let theme: &str = pick_theme(drafts.last(), session);
            debug!(
                "Extra panel {index}, theme {theme}, {} plug(s) left",
                session.pool.len()
            );
            let mut draft: PanelDraft = PanelDraft::new(index, theme);
            if let Some(switch) = self.techniques.get("switch") {
                switch.apply(&mut draft, session);
            }
            let quota: usize = session.pool.len();
            let placed: usize = distribute_plugs(&mut draft, session, quota);
            self.report.panel_iterations += 1;
            if placed == 0 {
                warn!("Extra panel {index} cannot hold any of the leftover plugs");
                break;
            }
            draft.grid.debug();
            drafts.push(draft);
            self.report.last_resort_panels += 1;
        }
    }
}

/// Pick a color theme that differs from the theme of the previous panel.
fn pick_theme(previous: Option<&PanelDraft>, session: &mut Session) -> &'static str {
    let previous: Option<&str> = previous.map(|d| d.panel.color_theme.as_str());
    let themes: Vec<&'static str> = THEMES
        .iter()
        .copied()
        .filter(|t| Some(*t) != previous)
        .collect();
    themes.choose(&mut session.rng).copied().unwrap_or(THEMES[0])
}

/// Place up to `quota` plugs from the pool on the panel.
///
/// Return the number of plugs placed. The plugs that do not fit go back to the pool.
fn distribute_plugs(draft: &mut PanelDraft, session: &mut Session, quota: usize) -> usize {
    let mut placed: usize = 0;
    let mut rejected: Vec<Plug> = Vec::new();
    for _ in 0..quota {
        let Some(plug) = session.pool.withdraw(draft.index, &mut session.rng) else {
            break;
        };
        if place_plug(draft, session, &plug) {
            session.record_placement(&plug, draft.index);
            placed += 1;
        } else {
            rejected.push(plug);
        }
    }
    for plug in rejected {
        session.pool.deposit(plug);
    }
    placed
}

/// Place a plug on the panel.
///
/// A plug flagged as remote gets remote controls instead of being draggable, unless the
/// controls do not fit.
fn place_plug(draft: &mut PanelDraft, session: &mut Session, plug: &Plug) -> bool {
    let mut element: Element = plug.element.clone();
    let Some(rect) = draft.allocate(element.shape, element.width, element.height, &mut session.rng)
    else {
        debug!("    No room for plug {}", element.id);
        return false;
    };
    center_in(&mut element, rect);
    let id: String = element.id.clone();
    if plug.remote {
        element.method = InteractionMethod::None;
    }
    let idx: usize = draft.push(element);

    let mut remote: bool = false;
    if plug.remote {
        remote = add_remote_controllers(draft, session, &id);
        if !remote {
            debug!("    Plug {id} is draggable: no room for its remote controls");
            draft.element_mut(idx).method = InteractionMethod::Drag;
        }
    }
    draft.add_coverable(idx, CoverRole::Plug);
    if let Some(coverable) = draft.coverables.last_mut() {
        coverable.has_remote = remote;
    }
    debug!("    Plug {id} from panel {} at {},{}", plug.origin, rect.x, rect.y);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(difficulty: Difficulty, seed: u64) -> GeneratorConfig {
        GeneratorConfig {
            difficulty,
            seed: Some(seed),
            ..GeneratorConfig::default()
        }
    }

    #[test]
    fn same_seed_same_puzzle() {
        let a: Puzzle = BoxGenerator::with_seed(42).generate();
        let b: Puzzle = BoxGenerator::with_seed(42).generate();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), b.to_string());
    }

    #[test]
    fn first_panel_has_a_socket() {
        for seed in 0..20 {
            let mut generator: BoxGenerator = BoxGenerator::new(config(Difficulty::Easy, seed));
            let puzzle: Puzzle = generator.generate();
            assert!(puzzle.panels[0].elements.iter().any(|e| e.is_socket()));
        }
    }

    #[test]
    fn plugs_are_placed_on_later_panels() {
        for seed in 0..20 {
            let mut generator: BoxGenerator = BoxGenerator::new(config(Difficulty::Hard, seed));
            let puzzle: Puzzle = generator.generate();
            for placement in &generator.report.placements {
                assert!(placement.panel > placement.origin, "seed {seed}: {placement:?}");
                let (panel, _) = puzzle.find(&placement.id).unwrap();
                assert_eq!(panel, placement.panel);
            }
        }
    }

    #[test]
    fn every_panel_has_a_goal() {
        for seed in 0..20 {
            let puzzle: Puzzle = BoxGenerator::new(config(Difficulty::Medium, seed)).generate();
            for panel in &puzzle.panels {
                assert!(has_active_goal(panel), "seed {seed}: {panel}");
            }
        }
    }

    #[test]
    fn bounded_panels() {
        for seed in 0..20 {
            let mut generator: BoxGenerator = BoxGenerator::new(GeneratorConfig {
                panels: Some(2),
                force_covers: true,
                ..config(Difficulty::Hard, seed)
            });
            let puzzle: Puzzle = generator.generate();
            let report: &GenerationReport = &generator.report;
            assert!(puzzle.panels.len() >= 2);
            assert!(puzzle.panels.len() <= 2 + MAX_LAST_RESORT);
            assert!(report.panel_iterations <= 2 + MAX_LAST_RESORT);
            assert_eq!(puzzle.panels.len(), 2 + report.last_resort_panels);
            assert_eq!(report.claims.len(), puzzle.panels.len());
        }
    }

    #[test]
    fn themes_change_between_panels() {
        let puzzle: Puzzle = BoxGenerator::with_seed(7).generate();
        for pair in puzzle.panels.windows(2) {
            assert_ne!(pair[0].color_theme, pair[1].color_theme);
        }
        assert_eq!(puzzle.message, "Well done!");
    }
}
