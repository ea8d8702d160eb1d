//! Octant records: coarse regions owning a set of points.

use std::collections::BTreeMap;

use glam::Vec3;

use crate::{OctantId, PointId};

/// A coarse region of the graph used by the hierarchical solver.
///
/// `weight_scale` is the rolling average of the members' weight scales
/// (`1 + sum((w - 1) / member_count)`), snapped back to exactly `1` whenever
/// the last weighted member leaves so float error cannot accumulate.
/// `layers` is the bitwise OR of the members' masks.
#[derive(Debug, Clone)]
pub(crate) struct Octant {
    pub id: OctantId,
    pub pos: Vec3,
    /// Arena index of the distinguished entry/exit anchor; always one of
    /// `points` for a live octant.
    pub origin: Option<usize>,

    /// Member points: id -> arena index.
    pub points: BTreeMap<PointId, usize>,
    /// Ids of members whose weight scale differs from 1.
    pub weighted_points: Vec<PointId>,
    pub weight_scale: f32,
    pub layers: u32,

    /// Octant-level edges: neighbor id -> arena index.
    pub neighbors: BTreeMap<OctantId, usize>,
    pub unlinked_neighbors: BTreeMap<OctantId, usize>,

    // Transient pathfinding state, valid while the pass marks match the
    // store's octant pass counter.
    pub prev_octant: Option<usize>,
    /// Candidate predecessors accumulated this pass, tried front-first until
    /// one yields a point-level connection.
    pub prev_octants: Vec<usize>,
    /// Member point through which the current hierarchical path enters.
    pub search_point: Option<usize>,
    pub g_score: f32,
    pub f_score: f32,
    pub open_pass: u64,
    pub closed_pass: u64,
}

impl Octant {
    pub fn new(id: OctantId, pos: Vec3) -> Self {
        Self {
            id,
            pos,
            origin: None,
            points: BTreeMap::new(),
            weighted_points: Vec::new(),
            weight_scale: 1.0,
            layers: 0,
            neighbors: BTreeMap::new(),
            unlinked_neighbors: BTreeMap::new(),
            prev_octant: None,
            prev_octants: Vec::new(),
            search_point: None,
            g_score: 0.0,
            f_score: 0.0,
            open_pass: 0,
            closed_pass: 0,
        }
    }

    /// Layer filter with `0` as the wildcard mask.
    pub fn supports_layers(&self, relevant_layers: u32) -> bool {
        relevant_layers == 0 || (relevant_layers & self.layers) != 0
    }

    /// Drop all member bookkeeping ahead of re-attachment; connectivity to
    /// other octants is preserved across a replacement.
    pub fn reset_members(&mut self) {
        self.origin = None;
        self.points.clear();
        self.weighted_points.clear();
        self.weight_scale = 1.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_keeps_connectivity() {
        let mut o = Octant::new(1, Vec3::ZERO);
        o.points.insert(5, 0);
        o.weighted_points.push(5);
        o.weight_scale = 2.0;
        o.origin = Some(0);
        o.neighbors.insert(2, 1);

        o.reset_members();
        assert!(o.points.is_empty());
        assert!(o.weighted_points.is_empty());
        assert_eq!(o.weight_scale, 1.0);
        assert!(o.origin.is_none());
        assert_eq!(o.neighbors.len(), 1);
    }
}
