/*
difficulty.rs

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

//! Difficulty levels and their generation parameters.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use strum_macros::FromRepr;

/// Puzzle difficulty level.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Copy,
    Clone,
    PartialOrd,
    PartialEq,
    Eq,
    Hash,
    ValueEnum,
    FromRepr,
    Default,
)]
#[repr(i32)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

/// Generation parameters for a difficulty level.
#[derive(Debug, Clone)]
pub struct DifficultyProfile {
    /// Number of content panels planned before the last-resort loop.
    pub panels: usize,

    /// Number of techniques applied to each panel.
    pub techniques_per_panel: RangeInclusive<usize>,

    /// Names of the techniques allowed at that level.
    pub techniques: &'static [&'static str],

    /// Probability for a coverable element to get covers.
    pub cover_probability: f64,

    /// Maximum number of covers stacked on one element.
    pub stack_limit: usize,

    /// Share of the pooled plugs placed on each intermediate panel.
    pub plug_quota: f64,

    /// Probability for a new plug to be moved by remote controls instead of being dragged.
    pub remote_plug_probability: f64,

    /// Probability for a panel to get a reset trap.
    pub reset_probability: f64,

    /// Probability for a screw socket or a hole to use the strict comparison.
    pub strict_probability: f64,
}

impl DifficultyProfile {
    /// Return the profile for the given difficulty level.
    pub fn new(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Self {
                panels: 3,
                techniques_per_panel: 1..=2,
                techniques: &["hole", "screw", "switch", "tumbler"],
                cover_probability: 0.2,
                stack_limit: 1,
                plug_quota: 1.0,
                remote_plug_probability: 0.1,
                reset_probability: 0.0,
                strict_probability: 0.1,
            },
            Difficulty::Medium => Self {
                panels: 4,
                techniques_per_panel: 2..=3,
                techniques: &[
                    "hole",
                    "screw",
                    "switch",
                    "tumbler",
                    "maze",
                    "group",
                    "semicircle",
                ],
                cover_probability: 0.4,
                stack_limit: 2,
                plug_quota: 0.6,
                remote_plug_probability: 0.15,
                reset_probability: 0.1,
                strict_probability: 0.2,
            },
            Difficulty::Hard => Self {
                panels: 5,
                techniques_per_panel: 2..=4,
                techniques: &[
                    "hole",
                    "screw",
                    "switch",
                    "tumbler",
                    "maze",
                    "group",
                    "semicircle",
                    "switch_pattern",
                ],
                cover_probability: 0.6,
                stack_limit: 3,
                plug_quota: 0.5,
                remote_plug_probability: 0.25,
                reset_probability: 0.25,
                strict_probability: 0.3,
            },
        }
    }

    /// Number of pooled plugs to place on the panel at `index` out of `panels`, for a pool of
    /// `pooled` plugs.
    ///
    /// The quota grows with the index of the panel, and the last planned panel takes the whole
    /// pool.
    pub fn plug_quota(&self, index: usize, panels: usize, pooled: usize) -> usize {
        if pooled == 0 {
            return 0;
        }
        if index + 1 >= panels {
            return pooled;
        }
        let share: f64 = self.plug_quota * (index + 1) as f64 / panels as f64;
        ((pooled as f64 * share).ceil() as usize).clamp(1, pooled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_panel_takes_the_whole_pool() {
        let p: DifficultyProfile = DifficultyProfile::new(Difficulty::Hard);
        assert_eq!(p.plug_quota(4, 5, 7), 7);
        assert_eq!(p.plug_quota(9, 5, 3), 3);
        assert_eq!(p.plug_quota(1, 5, 0), 0);
    }

    #[test]
    fn intermediate_quota() {
        let p: DifficultyProfile = DifficultyProfile::new(Difficulty::Medium);
        // 0.6 * 2/4 = 0.3 of 7 plugs, rounded up
        assert_eq!(p.plug_quota(1, 4, 7), 3);
        // Never less than one plug
        assert_eq!(p.plug_quota(0, 4, 1), 1);
    }

    #[test]
    fn from_repr() {
        assert_eq!(Difficulty::from_repr(2), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_repr(3), None);
    }
}
