//! Canonical edge records and their direction bookkeeping.
//!
//! A segment's identity is its ordered endpoint pair `(u, v)` with `u < v`;
//! the direction mask is a value-level attribute that gets merged when the
//! same pair is inserted again. The segment set is the authority on
//! connectivity: the per-entity neighbor maps are kept consistent with it by
//! the store's connect/disconnect operations.

use std::collections::BTreeMap;

/// Traversal direction mask of a segment, expressed in canonical `(u, v)`
/// order: `FORWARD` is `u -> v`, `BACKWARD` is `v -> u`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Direction(u8);

impl Direction {
    pub const NONE: Direction = Direction(0);
    pub const FORWARD: Direction = Direction(1);
    pub const BACKWARD: Direction = Direction(2);
    pub const BIDIRECTIONAL: Direction = Direction(3);

    /// True when every bit of `other` is present in `self`.
    pub fn contains(self, other: Direction) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn union(self, other: Direction) -> Direction {
        Direction(self.0 | other.0)
    }

    pub fn difference(self, other: Direction) -> Direction {
        Direction(self.0 & !other.0)
    }

    pub fn is_none(self) -> bool {
        self.0 == 0
    }
}

/// Canonical key for an endpoint pair plus the direction bit that the given
/// `(from, to)` ordering maps onto.
pub(crate) fn canonical(from: i64, to: i64) -> ((i64, i64), Direction) {
    if from < to {
        ((from, to), Direction::FORWARD)
    } else {
        ((to, from), Direction::BACKWARD)
    }
}

/// Set of canonicalized segments. Used once for point edges and once for
/// octant edges.
///
/// Backed by a `BTreeMap` so iteration order is a pure function of the stored
/// keys, which keeps tie-breaking in the spatial queries deterministic.
#[derive(Debug, Clone, Default)]
pub(crate) struct SegmentSet {
    edges: BTreeMap<(i64, i64), Direction>,
}

impl SegmentSet {
    /// Stored direction mask for the pair, if a segment exists.
    pub fn get(&self, a: i64, b: i64) -> Option<Direction> {
        let (key, _) = canonical(a, b);
        self.edges.get(&key).copied()
    }

    /// Merge a new connection into the set and return the resulting mask.
    ///
    /// A one-way insert in the opposite direction of an existing one-way
    /// segment upgrades it to `BIDIRECTIONAL`.
    pub fn merge(&mut self, from: i64, to: i64, bidirectional: bool) -> Direction {
        let (key, canon) = canonical(from, to);
        let mut direction = if bidirectional {
            Direction::BIDIRECTIONAL
        } else {
            canon
        };
        if let Some(existing) = self.edges.get(&key) {
            direction = direction.union(*existing);
        }
        self.edges.insert(key, direction);
        direction
    }

    /// Overwrite the stored mask for a pair, removing the entry when the mask
    /// is empty.
    pub fn set(&mut self, a: i64, b: i64, direction: Direction) {
        let (key, _) = canonical(a, b);
        if direction.is_none() {
            self.edges.remove(&key);
        } else {
            self.edges.insert(key, direction);
        }
    }

    pub fn remove(&mut self, a: i64, b: i64) {
        let (key, _) = canonical(a, b);
        self.edges.remove(&key);
    }

    /// Connectivity test. With `bidirectional` any segment joining the pair
    /// counts; otherwise the stored mask must cover the `from -> to` direction.
    pub fn connected(&self, from: i64, to: i64, bidirectional: bool) -> bool {
        let (key, canon) = canonical(from, to);
        match self.edges.get(&key) {
            Some(direction) => bidirectional || direction.contains(canon),
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&(i64, i64), &Direction)> {
        self.edges.iter()
    }

    pub fn clear(&mut self) {
        self.edges.clear();
    }
}
