/*
puzzle_format.rs

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

//! Convert the in-memory model into a puzzle string.
//!
//! The conversion is the inverse of [`crate::puzzle_parse`]: the output of
//! `puzzle.to_string()` can be parsed back into an equal [`Puzzle`] object.
//!
//! An element is written as:
//!
//! ```text
//! id WxH XxY[+-^_] rotation color [comparison] [method [change [target]]] [remoteId tail]...
//! ```

use std::fmt;

use crate::config::GRID_SIZE;
use crate::model::{
    ChangeKind, Element, ElementColor, Elevation, InteractionMethod, Panel, Puzzle, RemoteAction,
    Shape, round2,
};

/// Format a grid value with at most two decimals and no trailing zeros.
pub fn format_number(value: f64) -> String {
    let s: String = format!("{:.2}", round2(value));
    String::from(s.trim_end_matches('0').trim_end_matches('.'))
}

/// Return the position suffix for the elevation of an element.
fn elevation_suffix(elevation: Elevation, elevation_target: Option<Elevation>) -> &'static str {
    match (elevation, elevation_target) {
        (Elevation::Raised, _) => "+",
        (Elevation::Sunken, _) => "-",
        (Elevation::Flat, Some(Elevation::Raised)) => "^",
        (Elevation::Flat, Some(Elevation::Sunken)) => "_",
        (Elevation::Flat, _) => "",
    }
}

/// Return the size and position of an element, clamped to the grid.
fn clamped_geometry(element: &Element) -> (f64, f64, f64, f64) {
    let max: f64 = GRID_SIZE as f64;
    let scale: f64 = element.shape.scale();
    let width: f64 = element.width.clamp(0.01, max / scale);
    let height: f64 = element.height.clamp(0.01, max / scale);
    let mut extent_w: f64 = width * scale;
    if element.shape == Shape::Switch {
        extent_w += 1.0;
    }
    let x: f64 = element.x.clamp(0.0, (max - extent_w).max(0.0));
    let y: f64 = element.y.clamp(0.0, (max - height * scale).max(0.0));
    (width, height, x, y)
}

/// Write an interaction: `method [change [target]]`.
fn write_interaction(
    f: &mut fmt::Formatter,
    method: InteractionMethod,
    change: ChangeKind,
    target: i32,
) -> fmt::Result {
    write!(f, " {}", method.keyword())?;
    match change {
        ChangeKind::None => Ok(()),
        ChangeKind::Move => write!(f, " {}", change.keyword()),
        _ => write!(f, " {} {}", change.keyword(), target),
    }
}

impl fmt::Display for ElementColor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ElementColor::Plain(c) => write!(f, "{c}"),
            ElementColor::Switch {
                unsatisfied,
                satisfied,
                ball: None,
            } => write!(f, "{unsatisfied}-{satisfied}"),
            ElementColor::Switch {
                unsatisfied,
                satisfied,
                ball: Some(ball),
            } => write!(f, "{unsatisfied}-{satisfied}-{ball}"),
            ElementColor::ThemeCycle { target, ball } => write!(f, "x-{target}-{ball}"),
        }
    }
}

impl fmt::Display for RemoteAction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RemoteAction::MoveStep { target_id, dx, dy } => {
                write!(f, "{target_id} {}x{}", format_number(*dx), format_number(*dy))
            }
            RemoteAction::Configure {
                target_id,
                method,
                change,
                target,
            } => {
                write!(f, "{target_id}")?;
                write_interaction(f, *method, *change, *target)
            }
            RemoteAction::Reset { target_id } => write!(f, "{target_id} reset"),
            RemoteAction::Size { target_id } => write!(f, "{target_id} size"),
            RemoteAction::Cycle { target_id } => write!(f, "{target_id} cycle"),
            RemoteAction::Link { target_id } => write!(f, "{target_id} link"),
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let (width, height, x, y) = clamped_geometry(self);
        write!(
            f,
            "{} {}x{} {}x{}{} {} {}",
            self.id,
            format_number(width),
            format_number(height),
            format_number(x),
            format_number(y),
            elevation_suffix(self.elevation, self.elevation_target),
            self.rotation,
            self.color
        )?;
        if let Some(comparison) = self.comparison {
            write!(f, " {}", comparison.symbol())?;
        }
        if self.method != InteractionMethod::None
            || self.change != ChangeKind::None
            || !self.remote_actions.is_empty()
        {
            write_interaction(f, self.method, self.change, self.target)?;
        }
        for action in &self.remote_actions {
            write!(f, " {action}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Panel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:", self.color_theme)?;
        for (i, element) in self.elements.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{element}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(reward) = &self.reward {
            write!(f, " [{reward}]")?;
        }
        for panel in &self.panels {
            write!(f, "/{panel}")?;
        }
        Ok(())
    }
}
