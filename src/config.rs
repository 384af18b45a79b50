/*
config.rs

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

//! Fixed configuration tables.
//!
//! The shape metadata table and the color table are consumed by the parser, the serializer, and
//! the generator.
//! The rendering runtime uses the same tables to draw the elements.

use crate::model::Shape;

/// Version notice displayed by `puzzlebox --version`.
pub const COPYRIGHT_NOTICE: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\nCopyright 2025 Hervé Quatremain\n",
    "License GPLv3+: GNU GPL version 3 or later <https://gnu.org/licenses/gpl.html>"
);

/// Number of cells on each side of a panel.
pub const GRID_SIZE: usize = 8;

/// Metadata for a shape.
#[derive(Debug, Copy, Clone)]
pub struct ShapeInfo {
    /// Shape described by this entry.
    pub shape: Shape,

    /// Letter used as the prefix of the element IDs.
    pub code: char,

    /// Whether an element of that shape can be used as a draggable plug.
    pub draggable: bool,

    /// Visual scale multiplier. The footprint of an element in the grid is its dimension
    /// multiplied by this factor.
    pub scale: f64,
}

/// Shape metadata table.
pub const SHAPES: [ShapeInfo; 13] = [
    ShapeInfo {
        shape: Shape::Circle,
        code: 'c',
        draggable: true,
        scale: 1.0,
    },
    ShapeInfo {
        shape: Shape::Rectangle,
        code: 'r',
        draggable: true,
        scale: 1.0,
    },
    ShapeInfo {
        shape: Shape::Triangle,
        code: 't',
        draggable: true,
        scale: 1.0,
    },
    ShapeInfo {
        shape: Shape::Screw,
        code: 's',
        draggable: false,
        scale: 1.25,
    },
    ShapeInfo {
        shape: Shape::Switch,
        code: 'w',
        draggable: false,
        scale: 1.0,
    },
    ShapeInfo {
        shape: Shape::Plus,
        code: 'p',
        draggable: true,
        scale: 1.0,
    },
    ShapeInfo {
        shape: Shape::Diamond,
        code: 'd',
        draggable: true,
        scale: 1.0,
    },
    ShapeInfo {
        shape: Shape::Tumbler,
        code: 'u',
        draggable: false,
        scale: 1.5,
    },
    ShapeInfo {
        shape: Shape::Key,
        code: 'k',
        draggable: true,
        scale: 0.75,
    },
    ShapeInfo {
        shape: Shape::SemicircleLeft,
        code: 'l',
        draggable: true,
        scale: 1.0,
    },
    ShapeInfo {
        shape: Shape::SemicircleRight,
        code: 'g',
        draggable: true,
        scale: 1.0,
    },
    ShapeInfo {
        shape: Shape::SemicircleTop,
        code: 'm',
        draggable: true,
        scale: 1.0,
    },
    ShapeInfo {
        shape: Shape::SemicircleBottom,
        code: 'v',
        draggable: true,
        scale: 1.0,
    },
];

/// Color table: the index in the table is the color number used in the puzzle strings.
pub const COLORS: [(&str, &str); 10] = [
    ("gray", "#9a9996"),
    ("red", "#e01b24"),
    ("orange", "#ff7800"),
    ("yellow", "#f6d32d"),
    ("green", "#33d17a"),
    ("teal", "#2190a4"),
    ("blue", "#3584e4"),
    ("purple", "#9141ac"),
    ("brown", "#986a44"),
    ("white", "#ffffff"),
];

/// Panel color themes.
pub const THEMES: [&str; 8] = [
    "blue", "red", "green", "purple", "orange", "teal", "pink", "gold",
];

/// Color used for tiles and covers that must not give away what they hide.
pub const NEUTRAL_COLOR: u8 = 0;

/// Return the shape metadata for the given shape.
pub fn shape_info(shape: Shape) -> &'static ShapeInfo {
    // The table has one entry per shape, in the same order as the enum
    &SHAPES[shape as usize]
}

/// Return the shape that uses the given code letter.
pub fn shape_from_code(code: char) -> Option<Shape> {
    SHAPES.iter().find(|s| s.code == code).map(|s| s.shape)
}

/// Return the display name of a color number.
pub fn color_name(color: u8) -> Option<&'static str> {
    COLORS.get(color as usize).map(|c| c.0)
}
