/*
puzzle_parse.rs

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

//! Parse a puzzle string.
//!
//! A puzzle string is the victory message followed by the panels, separated by `/`:
//!
//! ```text
//! Great job! [star]/blue:w1 1x1 3x3 0 0-6-3 tap state 1,c2 1x1 5x5- 0 2 =/red:...
//! ```
//!
//! Each panel is a color theme, a colon, and a comma-separated list of elements.
//! The first five tokens of an element are fixed (ID, size, position, rotation, and color).
//! The trailing tokens are consumed by a small state machine (see [`PuzzleParse::parse_element`]).
//!
//! Structural errors abort the parsing with a [`ParseError`].
//! Tokens that the state machine cannot classify are only reported as warnings, in
//! [`PuzzleParse::warnings`], and the parsing continues.

use log::{debug, warn};
use std::error::Error;
use std::fmt;

use crate::model::{
    ChangeKind, Element, ElementColor, Elevation, InteractionMethod, Panel, Puzzle, RemoteAction,
    Shape, SizeComparison, round2,
};

/// Structural errors in a puzzle string.
#[derive(Debug, PartialEq)]
pub enum ParseError {
    /// The string does not contain any `/`-separated panel section.
    NoPanels,

    /// The panel section (numbered from 1) does not have a `:` after its color theme.
    NoColorTheme(usize),

    /// The position of the element is missing or is not shaped as `XxY`.
    BadPosition { element: String, token: String },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParseError::NoPanels => write!(f, "Malformed puzzle: no panel section"),
            ParseError::NoColorTheme(section) => {
                write!(f, "Malformed puzzle: panel {section} has no color theme")
            }
            ParseError::BadPosition { element, token } => write!(
                f,
                "Malformed puzzle: element {element} has an invalid position `{token}`"
            ),
        }
    }
}

impl Error for ParseError {}

/// Token that the parser could not interpret.
#[derive(Debug, Clone, PartialEq)]
pub struct UnrecognizedToken {
    /// ID of the element that contains the token.
    pub element: String,

    /// The token itself.
    pub token: String,
}

impl fmt::Display for UnrecognizedToken {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Element {}: unrecognized token `{}`", self.element, self.token)
    }
}

/// State of the trailing token consumer.
enum State<'a> {
    /// Optional socket comparison.
    Comparison,

    /// Optional interaction method.
    Method,

    /// Optional change kind, after a method.
    Change,

    /// Optional numeric target, after a change.
    Target,

    /// Start of a remote clause (an element ID).
    Remote,

    /// Remote element ID read, waiting for its vector, keyword, or method.
    RemoteTail(&'a str),

    /// Remote configuration method read, waiting for an optional change.
    ConfigChange(&'a str, InteractionMethod),

    /// Remote configuration change read, waiting for an optional target.
    ConfigTarget(&'a str, InteractionMethod, ChangeKind),
}

/// Cursor over the whitespace-separated tokens of an element.
struct Tokens<'a> {
    tokens: Vec<&'a str>,
    pos: usize,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            tokens: text.split_whitespace().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<&'a str> {
        self.tokens.get(self.pos).copied()
    }

    fn next(&mut self) -> Option<&'a str> {
        let t: Option<&'a str> = self.peek();
        if t.is_some() {
            self.pos += 1;
        }
        t
    }
}

/// Parse a `AxB` pair of numbers. A single number `A` is accepted when `allow_single` is set
/// and returns `(A, A)`.
fn parse_pair(token: &str, allow_single: bool) -> Option<(f64, f64)> {
    let number = |s: &str| -> Option<f64> { s.parse::<f64>().ok().filter(|v| v.is_finite()) };
    match token.split_once('x') {
        Some((a, b)) => Some((number(a)?, number(b)?)),
        None if allow_single => number(token).map(|v| (v, v)),
        None => None,
    }
}

/// Whether the token is an element ID: a shape code letter followed by digits.
pub fn is_element_id(token: &str) -> bool {
    let mut chars = token.chars();
    match chars.next() {
        Some(c) if Shape::from_code(c).is_some() => {
            let rest: &str = chars.as_str();
            !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit())
        }
        _ => false,
    }
}

/// Parse a position token with its optional elevation suffix.
fn parse_position(token: &str) -> Option<(f64, f64, Elevation, Option<Elevation>)> {
    let (coordinates, elevation, elevation_target) = match token.chars().last()? {
        '+' => (&token[..token.len() - 1], Elevation::Raised, None),
        '-' => (&token[..token.len() - 1], Elevation::Sunken, None),
        '^' => (
            &token[..token.len() - 1],
            Elevation::Flat,
            Some(Elevation::Raised),
        ),
        '_' => (
            &token[..token.len() - 1],
            Elevation::Flat,
            Some(Elevation::Sunken),
        ),
        _ => (token, Elevation::Flat, None),
    };
    let (x, y) = parse_pair(coordinates, false)?;
    Some((x, y, elevation, elevation_target))
}

/// Parse a color token.
fn parse_color(token: &str) -> Option<ElementColor> {
    let parts: Vec<&str> = token.split('-').collect();
    match parts.as_slice() {
        [c] => c.parse::<u8>().ok().map(ElementColor::Plain),
        ["x", target, ball] => Some(ElementColor::ThemeCycle {
            target: target.parse::<u8>().ok()?,
            ball: ball.parse::<u8>().ok()?,
        }),
        [unsatisfied, satisfied] => Some(ElementColor::Switch {
            unsatisfied: unsatisfied.parse::<u8>().ok()?,
            satisfied: satisfied.parse::<u8>().ok()?,
            ball: None,
        }),
        [unsatisfied, satisfied, ball] => Some(ElementColor::Switch {
            unsatisfied: unsatisfied.parse::<u8>().ok()?,
            satisfied: satisfied.parse::<u8>().ok()?,
            ball: Some(ball.parse::<u8>().ok()?),
        }),
        _ => None,
    }
}

/// Split the victory message and its optional `[reward]` tag.
fn parse_message(section: &str) -> (String, Option<String>) {
    let s: &str = section.trim();
    if let Some(stripped) = s.strip_suffix(']')
        && let Some(start) = stripped.rfind('[')
    {
        let reward: &str = stripped[start + 1..].trim();
        let message: &str = stripped[..start].trim_end();
        return (String::from(message), Some(String::from(reward)));
    }
    (String::from(s), None)
}

/// Puzzle string parser.
#[derive(Debug, Clone, Default)]
pub struct PuzzleParse {
    /// Source puzzle string.
    source: String,

    /// Tokens that could not be interpreted during the last parsing.
    pub warnings: Vec<UnrecognizedToken>,
}

impl PuzzleParse {
    /// Create a [`PuzzleParse`] object for the given puzzle string.
    pub fn new(source: &str) -> Self {
        Self {
            source: String::from(source),
            warnings: Vec::new(),
        }
    }

    /// Parse the source string and build the puzzle.
    ///
    /// # Errors
    ///
    /// The method returns an error when the string has no panel section, when a panel has no
    /// color theme, or when an element has an invalid position.
    pub fn parse(&mut self) -> Result<Puzzle, ParseError> {
        self.warnings.clear();
        let source: String = self.source.clone();
        let mut sections = source.split('/');

        let (message, reward) = parse_message(sections.next().unwrap_or_default());
        let mut panels: Vec<Panel> = Vec::new();
        for (i, section) in sections.enumerate() {
            panels.push(self.parse_panel(section, i + 1)?);
        }
        if panels.is_empty() {
            return Err(ParseError::NoPanels);
        }

        debug!(
            "Parsed {} panels, {} warnings",
            panels.len(),
            self.warnings.len()
        );
        Ok(Puzzle {
            message,
            reward,
            panels,
        })
    }

    /// Parse a `theme:element,element,...` section.
    fn parse_panel(&mut self, section: &str, index: usize) -> Result<Panel, ParseError> {
        let (theme, elements) = section
            .split_once(':')
            .ok_or(ParseError::NoColorTheme(index))?;
        let mut panel: Panel = Panel::new(theme.trim());
        for text in elements.split(',') {
            if let Some(element) = self.parse_element(text)? {
                panel.elements.push(element);
            }
        }
        Ok(panel)
    }

    /// Record a token that could not be interpreted.
    fn unrecognized(&mut self, element: &str, token: &str) {
        let w: UnrecognizedToken = UnrecognizedToken {
            element: String::from(element),
            token: String::from(token),
        };
        warn!("{w}");
        self.warnings.push(w);
    }

    /// Parse an element.
    ///
    /// Returns [`None`] for an empty element string.
    ///
    /// After the five fixed tokens, the trailing tokens are consumed left to right: an optional
    /// comparison, an optional method, an optional change (only after a method), an optional
    /// target (only after a change other than `move`, which implies a target of 1), and then any
    /// number of remote clauses. A remote clause is an element ID followed by a movement vector,
    /// by one of the `reset`, `size`, `cycle`, or `link` keywords, or by a
    /// `method [change [target]]` configuration.
    ///
    /// # Errors
    ///
    /// The method returns an error when the position token is missing or invalid.
    pub fn parse_element(&mut self, text: &str) -> Result<Option<Element>, ParseError> {
        let mut tokens: Tokens = Tokens::new(text);
        let id: &str = match tokens.next() {
            Some(id) => id,
            None => return Ok(None),
        };

        let shape: Shape = match id.chars().next().and_then(Shape::from_code) {
            Some(s) => s,
            None => {
                self.unrecognized(id, id);
                Shape::Rectangle
            }
        };
        let mut element: Element = Element::new(id, shape, 1.0, 1.0);

        // Size
        if let Some(token) = tokens.next() {
            match parse_pair(token, true) {
                Some((w, h)) => {
                    element.width = round2(w);
                    element.height = round2(h);
                }
                None => self.unrecognized(id, token),
            }
        }

        // Position (mandatory)
        let token: &str = tokens.next().unwrap_or_default();
        let (x, y, elevation, elevation_target) =
            parse_position(token).ok_or_else(|| ParseError::BadPosition {
                element: String::from(id),
                token: String::from(token),
            })?;
        element.set_position(x, y);
        element.elevation = elevation;
        element.elevation_target = elevation_target;

        // Rotation
        if let Some(token) = tokens.next() {
            match token.parse::<i32>() {
                Ok(r) => element.rotation = r,
                Err(_) => self.unrecognized(id, token),
            }
        }

        // Color
        if let Some(token) = tokens.next() {
            match parse_color(token) {
                Some(c) => element.color = c,
                None => self.unrecognized(id, token),
            }
        }

        self.consume_trailing(&mut element, &mut tokens);
        Ok(Some(element))
    }

    /// Run the state machine over the trailing tokens.
    fn consume_trailing(&mut self, element: &mut Element, tokens: &mut Tokens) {
        let mut state: State = State::Comparison;

        while let Some(token) = tokens.peek() {
            state = match state {
                State::Comparison => {
                    if let Some(c) = SizeComparison::from_symbol(token) {
                        element.comparison = Some(c);
                        tokens.next();
                    }
                    State::Method
                }
                State::Method => match InteractionMethod::from_keyword(token) {
                    Some(m) => {
                        element.method = m;
                        tokens.next();
                        State::Change
                    }
                    None => State::Remote,
                },
                State::Change => match ChangeKind::from_keyword(token) {
                    Some(ChangeKind::Move) => {
                        element.change = ChangeKind::Move;
                        element.target = 1;
                        tokens.next();
                        State::Remote
                    }
                    Some(c) => {
                        element.change = c;
                        tokens.next();
                        State::Target
                    }
                    None => State::Remote,
                },
                State::Target => {
                    if let Ok(t) = token.parse::<i32>() {
                        element.target = t;
                        tokens.next();
                    }
                    State::Remote
                }
                State::Remote => {
                    tokens.next();
                    if is_element_id(token) {
                        State::RemoteTail(token)
                    } else {
                        self.unrecognized(&element.id, token);
                        State::Remote
                    }
                }
                State::RemoteTail(target_id) => {
                    let target_id_string: String = String::from(target_id);
                    if let Some((dx, dy)) = parse_pair(token, false) {
                        tokens.next();
                        element.remote_actions.push(RemoteAction::MoveStep {
                            target_id: target_id_string,
                            dx: round2(dx),
                            dy: round2(dy),
                        });
                        State::Remote
                    } else if let Some(m) = InteractionMethod::from_keyword(token) {
                        tokens.next();
                        State::ConfigChange(target_id, m)
                    } else {
                        let action: Option<RemoteAction> = match token {
                            "reset" => Some(RemoteAction::Reset {
                                target_id: target_id_string,
                            }),
                            "size" => Some(RemoteAction::Size {
                                target_id: target_id_string,
                            }),
                            "cycle" => Some(RemoteAction::Cycle {
                                target_id: target_id_string,
                            }),
                            "link" => Some(RemoteAction::Link {
                                target_id: target_id_string,
                            }),
                            _ => None,
                        };
                        match action {
                            Some(a) => {
                                tokens.next();
                                element.remote_actions.push(a);
                            }
                            // The remote ID has no action: report it, and let the
                            // next iteration look at the token again.
                            None => self.unrecognized(&element.id, target_id),
                        }
                        State::Remote
                    }
                }
                State::ConfigChange(target_id, method) => match ChangeKind::from_keyword(token) {
                    Some(ChangeKind::Move) => {
                        tokens.next();
                        element.remote_actions.push(RemoteAction::Configure {
                            target_id: String::from(target_id),
                            method,
                            change: ChangeKind::Move,
                            target: 1,
                        });
                        State::Remote
                    }
                    Some(c) => {
                        tokens.next();
                        State::ConfigTarget(target_id, method, c)
                    }
                    None => {
                        element.remote_actions.push(RemoteAction::Configure {
                            target_id: String::from(target_id),
                            method,
                            change: ChangeKind::None,
                            target: 0,
                        });
                        State::Remote
                    }
                },
                State::ConfigTarget(target_id, method, change) => {
                    let mut target: i32 = 0;
                    if let Ok(t) = token.parse::<i32>() {
                        target = t;
                        tokens.next();
                    }
                    element.remote_actions.push(RemoteAction::Configure {
                        target_id: String::from(target_id),
                        method,
                        change,
                        target,
                    });
                    State::Remote
                }
            };
        }

        // Flush a clause interrupted by the end of the element
        match state {
            State::RemoteTail(target_id) => self.unrecognized(&element.id, target_id),
            State::ConfigChange(target_id, method) => {
                element.remote_actions.push(RemoteAction::Configure {
                    target_id: String::from(target_id),
                    method,
                    change: ChangeKind::None,
                    target: 0,
                })
            }
            State::ConfigTarget(target_id, method, change) => {
                element.remote_actions.push(RemoteAction::Configure {
                    target_id: String::from(target_id),
                    method,
                    change,
                    target: 0,
                })
            }
            _ => (),
        }
    }
}

/// Parse a puzzle string, logging the warnings.
///
/// # Errors
///
/// See [`PuzzleParse::parse`].
pub fn parse_puzzle(source: &str) -> Result<Puzzle, ParseError> {
    PuzzleParse::new(source).parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(text: &str) -> Element {
        PuzzleParse::new("")
            .parse_element(text)
            .expect("valid element")
            .expect("non-empty element")
    }

    #[test]
    fn victory_message_and_switch() {
        let puzzle: Puzzle =
            parse_puzzle("Great job! [star]/blue:w1 1x1 3x3 0 0-6-3 tap state 1").unwrap();
        assert_eq!(puzzle.message, "Great job!");
        assert_eq!(puzzle.reward.as_deref(), Some("star"));
        assert_eq!(puzzle.panels.len(), 1);

        let panel: &Panel = &puzzle.panels[0];
        assert_eq!(panel.color_theme, "blue");
        assert_eq!(panel.elements.len(), 1);

        let e: &Element = &panel.elements[0];
        assert_eq!(e.id, "w1");
        assert_eq!(e.shape, Shape::Switch);
        assert_eq!((e.x, e.y), (3.0, 3.0));
        assert_eq!((e.width, e.height), (1.0, 1.0));
        assert_eq!(
            e.color,
            ElementColor::Switch {
                unsatisfied: 0,
                satisfied: 6,
                ball: Some(3)
            }
        );
        assert_eq!(e.method, InteractionMethod::Tap);
        assert_eq!(e.change, ChangeKind::State);
        assert_eq!(e.target, 1);
    }

    #[test]
    fn structural_errors() {
        assert_eq!(parse_puzzle("Hello"), Err(ParseError::NoPanels));
        assert_eq!(
            parse_puzzle("Hello/blue c1 1 1x1 0 0"),
            Err(ParseError::NoColorTheme(1))
        );
        assert_eq!(
            parse_puzzle("Hello/blue:c1 1 1x1 0 0/red:c2 1 11 0 0"),
            Err(ParseError::BadPosition {
                element: String::from("c2"),
                token: String::from("11")
            })
        );
        assert!(matches!(
            parse_puzzle("Hello/blue:c1 1"),
            Err(ParseError::BadPosition { .. })
        ));
    }

    #[test]
    fn unrecognized_tokens_are_warnings() {
        let mut parser: PuzzleParse =
            PuzzleParse::new("Hi/red:c1 1 2x2 0 4 drag bogus,r2 1x2 4x4+ 1 3");
        let puzzle: Puzzle = parser.parse().unwrap();
        assert_eq!(puzzle.num_elements(), 2);
        assert_eq!(parser.warnings.len(), 1);
        assert_eq!(parser.warnings[0].element, "c1");
        assert_eq!(parser.warnings[0].token, "bogus");

        let e: &Element = &puzzle.panels[0].elements[0];
        assert_eq!(e.method, InteractionMethod::Drag);
        assert!(e.remote_actions.is_empty());
    }

    #[test]
    fn remote_id_without_action_is_reported() {
        let mut parser: PuzzleParse = PuzzleParse::new("");
        let e: Element = parser
            .parse_element("t1 0.8 0x0 0 0 tap c2 c3 0x1")
            .unwrap()
            .unwrap();
        assert_eq!(parser.warnings.len(), 1);
        assert_eq!(parser.warnings[0].token, "c2");
        assert_eq!(
            e.remote_actions,
            vec![RemoteAction::MoveStep {
                target_id: String::from("c3"),
                dx: 0.0,
                dy: 1.0
            }]
        );
    }

    #[test]
    fn elevation_suffixes() {
        assert_eq!(element("c1 1 1x1+ 0 0").elevation, Elevation::Raised);
        assert_eq!(element("c1 1 1x1- 0 0").elevation, Elevation::Sunken);
        let e: Element = element("c1 1 1x1^ 0 0");
        assert_eq!(e.elevation, Elevation::Flat);
        assert_eq!(e.elevation_target, Some(Elevation::Raised));
        assert_eq!(
            element("c1 1 1x1_ 0 0").elevation_target,
            Some(Elevation::Sunken)
        );
    }

    #[test]
    fn single_size_and_colors() {
        let e: Element = element("r4 1.5 2x0 2 x-3-1");
        assert_eq!((e.width, e.height), (1.5, 1.5));
        assert_eq!(e.rotation, 2);
        assert_eq!(e.color, ElementColor::ThemeCycle { target: 3, ball: 1 });

        let e: Element = element("w5 1 0x0 0 2-4");
        assert_eq!(
            e.color,
            ElementColor::Switch {
                unsatisfied: 2,
                satisfied: 4,
                ball: None
            }
        );
    }

    #[test]
    fn move_implies_target() {
        let e: Element = element("c1 0.8 1x1+ 0 0 drag move");
        assert_eq!(e.change, ChangeKind::Move);
        assert_eq!(e.target, 1);
    }

    #[test]
    fn remote_clauses() {
        let e: Element =
            element("w1 1 0x0 0 0-1 tap state 1 c2 drag c3 hold rotate 4 c4 reset c5 size c6 cycle w7 link c8 -1x0");
        assert_eq!(
            e.remote_actions,
            vec![
                RemoteAction::release("c2"),
                RemoteAction::Configure {
                    target_id: String::from("c3"),
                    method: InteractionMethod::Hold,
                    change: ChangeKind::Rotate,
                    target: 4
                },
                RemoteAction::Reset {
                    target_id: String::from("c4")
                },
                RemoteAction::Size {
                    target_id: String::from("c5")
                },
                RemoteAction::Cycle {
                    target_id: String::from("c6")
                },
                RemoteAction::Link {
                    target_id: String::from("w7")
                },
                RemoteAction::MoveStep {
                    target_id: String::from("c8"),
                    dx: -1.0,
                    dy: 0.0
                },
            ]
        );
    }

    #[test]
    fn element_round_trip() {
        let mut socket: Element = Element::new("u3", Shape::Tumbler, 2.0, 2.0);
        socket.set_position(4.25, 1.0);
        socket.elevation = Elevation::Sunken;
        socket.color = ElementColor::Plain(5);
        socket.comparison = Some(SizeComparison::Strict);
        socket.set_interaction(InteractionMethod::Hold, ChangeKind::Rotate, 4);

        let mut button: Element = Element::new("t9", Shape::Triangle, 0.8, 0.8);
        button.set_position(0.1, 6.1);
        button.rotation = 6;
        button.elevation = Elevation::Raised;
        button.set_interaction(InteractionMethod::Tap, ChangeKind::None, 0);
        button.remote_actions.push(RemoteAction::MoveStep {
            target_id: String::from("c2"),
            dx: 1.0,
            dy: 0.0,
        });
        button.remote_actions.push(RemoteAction::Configure {
            target_id: String::from("s4"),
            method: InteractionMethod::Drag,
            change: ChangeKind::Move,
            target: 1,
        });

        let mut tile: Element = Element::new("r12", Shape::Rectangle, 1.0, 1.0);
        tile.elevation_target = Some(Elevation::Raised);
        tile.set_interaction(InteractionMethod::Tap, ChangeKind::Color, 7);
        tile.remote_actions.push(RemoteAction::release("r12"));

        let mut idle: Element = Element::new("c1", Shape::Circle, 1.0, 1.0);
        idle.remote_actions.push(RemoteAction::Cycle {
            target_id: String::from("w2"),
        });

        for e in [socket, button, tile, idle] {
            let text: String = e.to_string();
            let mut parser: PuzzleParse = PuzzleParse::new("");
            let parsed: Element = parser.parse_element(&text).unwrap().unwrap();
            assert!(parser.warnings.is_empty(), "{text}");
            assert_eq!(parsed, e, "{text}");
        }
    }

    #[test]
    fn puzzle_round_trip() {
        let source: &str = "Open me/gold:c1 1x1 2x3- 0 2 =,c2 1x1 2x3+ 0 2 drag/teal:w3 1x1 0x0 0 0-6 tap state 2 w3 none";
        let puzzle: Puzzle = parse_puzzle(source).unwrap();
        assert_eq!(puzzle.reward, None);
        let text: String = puzzle.to_string();
        assert_eq!(parse_puzzle(&text).unwrap(), puzzle);
    }

    #[test]
    fn empty_elements_are_skipped() {
        let puzzle: Puzzle = parse_puzzle("Done/blue:c1 1 0x0 0 1, ,/red:").unwrap();
        assert_eq!(puzzle.panels[0].elements.len(), 1);
        assert!(puzzle.panels[1].elements.is_empty());
    }

    #[test]
    fn element_ids() {
        assert!(is_element_id("w12"));
        assert!(!is_element_id("w"));
        assert!(!is_element_id("x1"));
        assert!(!is_element_id("12"));
        assert!(!is_element_id("c1a"));
    }
}
