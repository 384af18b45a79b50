/*
model.rs

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

//! In-memory representation of a puzzle box.
//!
//! A [`Puzzle`] is a victory message followed by a list of [`Panel`] objects.
//! Each panel is a list of [`Element`] objects. The order of the elements is significant: later
//! elements are drawn on top of earlier ones.
//!
//! Elements reference each other by ID through their [`RemoteAction`] list, so that references
//! across panels survive the conversion to and from the puzzle string.

use serde::{Deserialize, Serialize};

use crate::config;

/// Tolerance used when comparing grid dimensions.
const EPSILON: f64 = 1e-6;

/// Round a grid value to two decimals, which is the precision of the puzzle strings.
pub fn round2(value: f64) -> f64 {
    let v: f64 = (value * 100.0).round() / 100.0;
    // Avoid negative zeros
    if v == 0.0 { 0.0 } else { v }
}

/// Element shapes.
///
/// The order of the variants matches the [`config::SHAPES`] table.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Shape {
    Circle,
    Rectangle,
    Triangle,
    Screw,
    Switch,
    Plus,
    Diamond,
    Tumbler,
    Key,
    SemicircleLeft,
    SemicircleRight,
    SemicircleTop,
    SemicircleBottom,
}

impl Shape {
    /// Letter used as the prefix of the element IDs.
    pub fn code(self) -> char {
        config::shape_info(self).code
    }

    /// Visual scale multiplier.
    pub fn scale(self) -> f64 {
        config::shape_info(self).scale
    }

    /// Whether elements of that shape can be dragged as plugs.
    pub fn draggable(self) -> bool {
        config::shape_info(self).draggable
    }

    /// Return the shape for the given code letter.
    pub fn from_code(code: char) -> Option<Self> {
        config::shape_from_code(code)
    }

    /// Number of grid cells covered by an element of that shape and of the given size.
    ///
    /// Switches get an extra column for their slider ball.
    pub fn footprint(self, width: f64, height: f64) -> (usize, usize) {
        let scale: f64 = self.scale();
        let cells = |d: f64| -> usize { ((d * scale - EPSILON).ceil() as usize).max(1) };
        let mut w: usize = cells(width);
        if self == Shape::Switch {
            w += 1;
        }
        (w, cells(height))
    }

    /// Whether a socket of this shape accepts a plug of the given shape.
    pub fn accepts(self, plug: Shape) -> bool {
        self == plug || (self == Shape::Tumbler && plug == Shape::Key)
    }

    /// Whether the shape is one of the semicircle halves.
    pub fn is_half(self) -> bool {
        matches!(
            self,
            Shape::SemicircleLeft
                | Shape::SemicircleRight
                | Shape::SemicircleTop
                | Shape::SemicircleBottom
        )
    }
}

/// Elevation of an element.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Elevation {
    #[default]
    Flat,
    Raised,
    Sunken,
}

/// Color of an element.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ElementColor {
    /// Color number from the [`config::COLORS`] table.
    Plain(u8),

    /// Switch colors: the color when unsatisfied, when satisfied, and the optional slider ball.
    Switch {
        unsatisfied: u8,
        satisfied: u8,
        ball: Option<u8>,
    },

    /// Theme cycling color: the color of the target state and the slider ball.
    ThemeCycle { target: u8, ball: u8 },
}

impl Default for ElementColor {
    fn default() -> Self {
        ElementColor::Plain(0)
    }
}

impl ElementColor {
    /// Color that identifies the element when matched against a socket.
    pub fn primary(&self) -> u8 {
        match self {
            ElementColor::Plain(c) => *c,
            ElementColor::Switch { satisfied, .. } => *satisfied,
            ElementColor::ThemeCycle { target, .. } => *target,
        }
    }
}

/// How the player interacts with an element.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum InteractionMethod {
    #[default]
    None,
    Tap,
    Hold,
    Drag,
}

impl InteractionMethod {
    /// Keyword used in the puzzle strings.
    pub fn keyword(self) -> &'static str {
        match self {
            InteractionMethod::None => "none",
            InteractionMethod::Tap => "tap",
            InteractionMethod::Hold => "hold",
            InteractionMethod::Drag => "drag",
        }
    }

    /// Return the method for the given keyword.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "none" => Some(InteractionMethod::None),
            "tap" => Some(InteractionMethod::Tap),
            "hold" => Some(InteractionMethod::Hold),
            "drag" => Some(InteractionMethod::Drag),
            _ => None,
        }
    }
}

/// What an interaction changes on the element.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum ChangeKind {
    #[default]
    None,
    Color,
    Rotate,
    State,
    Size,
    Move,
}

impl ChangeKind {
    /// Keyword used in the puzzle strings.
    pub fn keyword(self) -> &'static str {
        match self {
            ChangeKind::None => "none",
            ChangeKind::Color => "color",
            ChangeKind::Rotate => "rotate",
            ChangeKind::State => "state",
            ChangeKind::Size => "size",
            ChangeKind::Move => "move",
        }
    }

    /// Return the change for the given keyword.
    ///
    /// `none` is not accepted: an absent change is expressed by omitting the token.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "color" => Some(ChangeKind::Color),
            "rotate" => Some(ChangeKind::Rotate),
            "state" => Some(ChangeKind::State),
            "size" => Some(ChangeKind::Size),
            "move" => Some(ChangeKind::Move),
            _ => None,
        }
    }
}

/// Comparison used to decide whether a plug fits a socket.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub enum SizeComparison {
    /// Same shape and size, any color.
    Equal,

    /// Same shape, size, and color.
    Strict,

    /// Plug at least as large as the socket.
    GreaterOrEqual,

    /// Plug at most as large as the socket.
    LessOrEqual,
}

impl SizeComparison {
    /// Symbol used in the puzzle strings.
    pub fn symbol(self) -> &'static str {
        match self {
            SizeComparison::Equal => "=",
            SizeComparison::Strict => "==",
            SizeComparison::GreaterOrEqual => ">=",
            SizeComparison::LessOrEqual => "<=",
        }
    }

    /// Return the comparison for the given symbol.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "=" => Some(SizeComparison::Equal),
            "==" => Some(SizeComparison::Strict),
            ">=" => Some(SizeComparison::GreaterOrEqual),
            "<=" => Some(SizeComparison::LessOrEqual),
            _ => None,
        }
    }

    /// Whether the given plug fits the socket.
    pub fn matches(self, socket: &Element, plug: &Element) -> bool {
        if !socket.shape.accepts(plug.shape) {
            return false;
        }
        self.compare_size(socket.width, socket.height, plug.width, plug.height)
            && (self != SizeComparison::Strict || socket.color.primary() == plug.color.primary())
    }

    /// Whether two complementary semicircle halves fill the circular socket.
    pub fn matches_pair(self, socket: &Element, a: &Element, b: &Element) -> bool {
        if socket.shape != Shape::Circle {
            return false;
        }
        let (width, height) = match (a.shape, b.shape) {
            (Shape::SemicircleLeft, Shape::SemicircleRight)
            | (Shape::SemicircleRight, Shape::SemicircleLeft) => {
                if (a.height - b.height).abs() > EPSILON {
                    return false;
                }
                (a.width + b.width, a.height)
            }
            (Shape::SemicircleTop, Shape::SemicircleBottom)
            | (Shape::SemicircleBottom, Shape::SemicircleTop) => {
                if (a.width - b.width).abs() > EPSILON {
                    return false;
                }
                (a.width, a.height + b.height)
            }
            _ => return false,
        };
        if !self.compare_size(socket.width, socket.height, width, height) {
            return false;
        }
        self != SizeComparison::Strict
            || (a.color.primary() == socket.color.primary()
                && b.color.primary() == socket.color.primary())
    }

    fn compare_size(self, socket_w: f64, socket_h: f64, plug_w: f64, plug_h: f64) -> bool {
        match self {
            SizeComparison::Equal | SizeComparison::Strict => {
                (socket_w - plug_w).abs() < EPSILON && (socket_h - plug_h).abs() < EPSILON
            }
            SizeComparison::GreaterOrEqual => {
                plug_w > socket_w - EPSILON && plug_h > socket_h - EPSILON
            }
            SizeComparison::LessOrEqual => {
                plug_w < socket_w + EPSILON && plug_h < socket_h + EPSILON
            }
        }
    }
}

/// Effect that an element applies to another element when it reaches its target.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum RemoteAction {
    /// Move the target element by a vector (grid units).
    MoveStep { target_id: String, dx: f64, dy: f64 },

    /// Change how the target element interacts.
    Configure {
        target_id: String,
        method: InteractionMethod,
        change: ChangeKind,
        target: i32,
    },

    /// Return the target element (and whatever fills it) to its initial configuration.
    Reset { target_id: String },

    /// Advance the target element to the next size of the size cycle.
    Size { target_id: String },

    /// Advance the target element to the next color of the theme.
    Cycle { target_id: String },

    /// The target switch must be satisfied before this element can be.
    Link { target_id: String },
}

impl RemoteAction {
    /// ID of the element the action applies to.
    pub fn target_id(&self) -> &str {
        match self {
            RemoteAction::MoveStep { target_id, .. }
            | RemoteAction::Configure { target_id, .. }
            | RemoteAction::Reset { target_id }
            | RemoteAction::Size { target_id }
            | RemoteAction::Cycle { target_id }
            | RemoteAction::Link { target_id } => target_id,
        }
    }

    /// Action that makes the target element draggable.
    pub fn release(target_id: &str) -> Self {
        RemoteAction::Configure {
            target_id: String::from(target_id),
            method: InteractionMethod::Drag,
            change: ChangeKind::None,
            target: 0,
        }
    }
}

/// Interactive or decorative element of a panel.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Element {
    /// Shape code letter followed by a number.
    pub id: String,

    pub shape: Shape,

    /// Width in grid units, before applying the shape scale.
    pub width: f64,

    /// Height in grid units, before applying the shape scale.
    pub height: f64,

    /// Left position in the grid.
    pub x: f64,

    /// Top position in the grid.
    pub y: f64,

    pub elevation: Elevation,

    /// Elevation the element adopts once the player first interacts with it.
    pub elevation_target: Option<Elevation>,

    pub color: ElementColor,

    /// Rotation in 45° steps.
    pub rotation: i32,

    pub method: InteractionMethod,

    pub change: ChangeKind,

    /// Target state, for the [`Element::change`] kind.
    pub target: i32,

    /// When set, the element is a socket and this comparison decides which plugs fit.
    pub comparison: Option<SizeComparison>,

    pub remote_actions: Vec<RemoteAction>,
}

impl Element {
    /// Create a flat, inert element at the top-left corner of the grid.
    pub fn new(id: &str, shape: Shape, width: f64, height: f64) -> Self {
        Self {
            id: String::from(id),
            shape,
            width,
            height,
            x: 0.0,
            y: 0.0,
            elevation: Elevation::Flat,
            elevation_target: None,
            color: ElementColor::default(),
            rotation: 0,
            method: InteractionMethod::None,
            change: ChangeKind::None,
            target: 0,
            comparison: None,
            remote_actions: Vec::new(),
        }
    }

    /// Number of grid cells covered by the element.
    pub fn footprint(&self) -> (usize, usize) {
        self.shape.footprint(self.width, self.height)
    }

    /// Set the position, rounded to the precision of the puzzle strings.
    pub fn set_position(&mut self, x: f64, y: f64) {
        self.x = round2(x);
        self.y = round2(y);
    }

    /// Set how the element reacts to the player.
    pub fn set_interaction(&mut self, method: InteractionMethod, change: ChangeKind, target: i32) {
        self.method = method;
        self.change = change;
        self.target = match change {
            ChangeKind::None => 0,
            ChangeKind::Move => 1,
            _ => target,
        };
    }

    /// Whether the element is a socket.
    pub fn is_socket(&self) -> bool {
        self.comparison.is_some()
    }

    /// Whether the element is moved by remote controls.
    pub fn has_remote_move(&self, panel: &Panel) -> bool {
        panel.elements.iter().any(|e| {
            e.remote_actions
                .iter()
                .any(|a| matches!(a, RemoteAction::MoveStep { target_id, .. } if *target_id == self.id))
        })
    }
}

/// Layer of the puzzle box.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Panel {
    /// Name of the color theme.
    pub color_theme: String,

    /// Elements, from the bottom to the top.
    pub elements: Vec<Element>,
}

impl Panel {
    /// Create an empty panel.
    pub fn new(color_theme: &str) -> Self {
        Self {
            color_theme: String::from(color_theme),
            elements: Vec::new(),
        }
    }

    /// Return the element with the given ID.
    pub fn get(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }
}

/// Complete puzzle box.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Puzzle {
    /// Message displayed on the victory panel.
    pub message: String,

    /// Optional reward name revealed with the message.
    pub reward: Option<String>,

    /// Content panels, from the innermost (seen last) to the outermost (seen first).
    pub panels: Vec<Panel>,
}

impl Puzzle {
    /// Return the element with the given ID, looking into all the panels.
    pub fn find(&self, id: &str) -> Option<(usize, &Element)> {
        self.panels
            .iter()
            .enumerate()
            .find_map(|(i, p)| p.get(id).map(|e| (i, e)))
    }

    /// Total number of elements in the puzzle.
    pub fn num_elements(&self) -> usize {
        self.panels.iter().map(|p| p.elements.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn socket(comparison: SizeComparison, color: u8) -> Element {
        let mut e: Element = Element::new("c1", Shape::Circle, 1.0, 1.0);
        e.elevation = Elevation::Sunken;
        e.color = ElementColor::Plain(color);
        e.comparison = Some(comparison);
        e
    }

    #[test]
    fn strict_comparison_checks_color() {
        let s: Element = socket(SizeComparison::Strict, 2);
        let mut plug: Element = Element::new("c2", Shape::Circle, 1.0, 1.0);
        plug.color = ElementColor::Plain(5);
        assert!(!SizeComparison::Strict.matches(&s, &plug));
        plug.color = ElementColor::Plain(2);
        assert!(SizeComparison::Strict.matches(&s, &plug));
    }

    #[test]
    fn equal_comparison_ignores_color() {
        let s: Element = socket(SizeComparison::Equal, 2);
        let mut plug: Element = Element::new("c2", Shape::Circle, 1.0, 1.0);
        plug.color = ElementColor::Plain(7);
        assert!(SizeComparison::Equal.matches(&s, &plug));

        let wrong_size: Element = Element::new("c3", Shape::Circle, 1.5, 1.5);
        assert!(!SizeComparison::Equal.matches(&s, &wrong_size));
        let wrong_shape: Element = Element::new("r4", Shape::Rectangle, 1.0, 1.0);
        assert!(!SizeComparison::Equal.matches(&s, &wrong_shape));
    }

    #[test]
    fn ordered_comparisons() {
        let s: Element = socket(SizeComparison::GreaterOrEqual, 0);
        let big: Element = Element::new("c2", Shape::Circle, 1.5, 1.5);
        let small: Element = Element::new("c3", Shape::Circle, 0.5, 0.5);
        assert!(SizeComparison::GreaterOrEqual.matches(&s, &big));
        assert!(!SizeComparison::GreaterOrEqual.matches(&s, &small));
        assert!(SizeComparison::LessOrEqual.matches(&s, &small));
        assert!(!SizeComparison::LessOrEqual.matches(&s, &big));
    }

    #[test]
    fn tumbler_accepts_key() {
        let mut tumbler: Element = Element::new("u1", Shape::Tumbler, 2.0, 2.0);
        tumbler.color = ElementColor::Plain(3);
        let mut key: Element = Element::new("k2", Shape::Key, 2.0, 2.0);
        key.color = ElementColor::Plain(3);
        assert!(SizeComparison::Strict.matches(&tumbler, &key));
        key.color = ElementColor::Plain(4);
        assert!(!SizeComparison::Strict.matches(&tumbler, &key));
    }

    #[test]
    fn semicircle_pair() {
        let mut s: Element = socket(SizeComparison::Strict, 4);
        s.width = 2.0;
        s.height = 2.0;
        let mut left: Element = Element::new("l1", Shape::SemicircleLeft, 1.0, 2.0);
        let mut right: Element = Element::new("g2", Shape::SemicircleRight, 1.0, 2.0);
        left.color = ElementColor::Plain(4);
        right.color = ElementColor::Plain(4);
        assert!(SizeComparison::Strict.matches_pair(&s, &left, &right));
        assert!(SizeComparison::Strict.matches_pair(&s, &right, &left));

        right.color = ElementColor::Plain(1);
        assert!(!SizeComparison::Strict.matches_pair(&s, &left, &right));
        assert!(SizeComparison::Equal.matches_pair(&s, &left, &right));

        let top: Element = Element::new("m3", Shape::SemicircleTop, 2.0, 1.0);
        assert!(!SizeComparison::Equal.matches_pair(&s, &left, &top));
    }

    #[test]
    fn footprint_uses_scale() {
        assert_eq!(Shape::Circle.footprint(1.0, 1.0), (1, 1));
        assert_eq!(Shape::Switch.footprint(1.0, 1.0), (2, 1));
        assert_eq!(Shape::Screw.footprint(1.6, 1.6), (2, 2));
        assert_eq!(Shape::Tumbler.footprint(2.0, 2.0), (3, 3));
        assert_eq!(Shape::Key.footprint(2.0, 2.0), (2, 2));
        assert_eq!(Shape::Circle.footprint(0.8, 0.8), (1, 1));
    }

    #[test]
    fn interaction_defaults_target() {
        let mut e: Element = Element::new("c1", Shape::Circle, 1.0, 1.0);
        e.set_interaction(InteractionMethod::Drag, ChangeKind::Move, 7);
        assert_eq!(e.target, 1);
        e.set_interaction(InteractionMethod::Tap, ChangeKind::None, 7);
        assert_eq!(e.target, 0);
    }

    #[test]
    fn rounding() {
        assert_eq!(round2(1.005_1), 1.01);
        assert_eq!(round2(-0.001), 0.0);
        assert_eq!(round2(2.4), 2.4);
    }
}
