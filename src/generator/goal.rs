/*
goal.rs

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

//! Panel goals.
//!
//! A panel opens when all its goals are met.
//! A panel without any goal would open immediately, so the generator adds a switch to it.

use crate::model::{ChangeKind, Element, Panel};

/// Whether the element is something the player must achieve.
pub fn is_goal(element: &Element) -> bool {
    element.is_socket()
        || element.change == ChangeKind::Move
        || (element.change != ChangeKind::None && element.target > 0)
}

/// Whether the panel has at least one goal.
pub fn has_active_goal(panel: &Panel) -> bool {
    panel.elements.iter().any(is_goal)
}
