/*
plugs.rs

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

//! Pool of the plugs waiting for a panel.
//!
//! Techniques that create sockets deposit the matching plugs in the pool.
//! The plugs are then withdrawn, at random, when the following panels are generated.
//! A plug is never withdrawn for the panel that created it.

use log::debug;
use rand::Rng;

use crate::model::Element;

/// Plug waiting for a panel.
#[derive(Debug, Clone)]
pub struct Plug {
    /// Plug element, not yet positioned.
    pub element: Element,

    /// Index of the panel that holds the socket.
    pub origin: usize,

    /// Whether the plug is moved by remote controls instead of being dragged.
    pub remote: bool,
}

/// Record of a plug placed on a panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PlugPlacement {
    /// ID of the plug.
    pub id: String,

    /// Index of the panel that holds the socket.
    pub origin: usize,

    /// Index of the panel where the plug was placed.
    pub panel: usize,
}

/// Plug pool.
#[derive(Debug, Clone, Default)]
pub struct PlugPool {
    plugs: Vec<Plug>,
}

impl PlugPool {
    /// Create an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a plug to the pool.
    pub fn deposit(&mut self, plug: Plug) {
        debug!(
            "    Plug {} deposited by panel {}",
            plug.element.id, plug.origin
        );
        self.plugs.push(plug);
    }

    /// Number of plugs in the pool.
    pub fn len(&self) -> usize {
        self.plugs.len()
    }

    /// Whether the pool is empty.
    pub fn is_empty(&self) -> bool {
        self.plugs.is_empty()
    }

    /// Number of plugs that can be placed on the given panel.
    pub fn eligible(&self, panel: usize) -> usize {
        self.plugs.iter().filter(|p| p.origin != panel).count()
    }

    /// Withdraw a random plug that can be placed on the given panel.
    pub fn withdraw<R: Rng>(&mut self, panel: usize, rng: &mut R) -> Option<Plug> {
        self.withdraw_where(panel, rng, |_| true)
    }

    /// Withdraw a random plug that can be placed on the given panel and that satisfies the
    /// predicate.
    pub fn withdraw_where<R, F>(&mut self, panel: usize, rng: &mut R, predicate: F) -> Option<Plug>
    where
        R: Rng,
        F: Fn(&Plug) -> bool,
    {
        let candidates: Vec<usize> = self
            .plugs
            .iter()
            .enumerate()
            .filter(|(_, p)| p.origin != panel && predicate(p))
            .map(|(i, _)| i)
            .collect();
        if candidates.is_empty() {
            return None;
        }
        let i: usize = candidates[rng.random_range(0..candidates.len())];
        Some(self.plugs.swap_remove(i))
    }

    /// Remove and return all the plugs.
    pub fn drain(&mut self) -> Vec<Plug> {
        std::mem::take(&mut self.plugs)
    }

    /// Iterate over the pooled plugs.
    pub fn iter(&self) -> impl Iterator<Item = &Plug> {
        self.plugs.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Shape;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn plug(id: &str, origin: usize) -> Plug {
        Plug {
            element: Element::new(id, Shape::Circle, 1.0, 1.0),
            origin,
            remote: false,
        }
    }

    #[test]
    fn plugs_never_return_to_their_origin() {
        let mut rng: StdRng = StdRng::seed_from_u64(1);
        let mut pool: PlugPool = PlugPool::new();
        pool.deposit(plug("c1", 0));
        pool.deposit(plug("c2", 0));
        pool.deposit(plug("c3", 1));

        assert_eq!(pool.eligible(0), 1);
        let p: Plug = pool.withdraw(0, &mut rng).unwrap();
        assert_eq!(p.element.id, "c3");
        assert!(pool.withdraw(0, &mut rng).is_none());
        assert_eq!(pool.len(), 2);

        assert!(pool.withdraw(2, &mut rng).is_some());
        assert!(pool.withdraw(2, &mut rng).is_some());
        assert!(pool.is_empty());
    }

    #[test]
    fn withdraw_with_predicate() {
        let mut rng: StdRng = StdRng::seed_from_u64(1);
        let mut pool: PlugPool = PlugPool::new();
        pool.deposit(plug("c1", 0));
        let mut square: Plug = plug("r2", 0);
        square.element.shape = Shape::Rectangle;
        pool.deposit(square);

        let p: Plug = pool
            .withdraw_where(1, &mut rng, |p| p.element.shape == Shape::Rectangle)
            .unwrap();
        assert_eq!(p.element.id, "r2");
        assert_eq!(pool.drain().len(), 1);
        assert!(pool.is_empty());
    }
}
