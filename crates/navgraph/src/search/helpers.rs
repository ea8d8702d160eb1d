//! Cost-hook dispatch and the closest-reachable tracker.

use slab::Slab;

use crate::cost::CostPoint;
use crate::error::NavResult;
use crate::graph::{NavGraph, OctantId, Point, PointId};

impl NavGraph {
    fn cost_point(&self, index: usize) -> CostPoint {
        let point = &self.points[index];
        CostPoint {
            id: point.id,
            pos: point.pos,
        }
    }

    fn octant_cost_point(&self, index: usize) -> CostPoint {
        let octant = &self.octants[index];
        CostPoint {
            id: octant.id,
            pos: octant.pos,
        }
    }

    pub(crate) fn estimate_between(&self, from: usize, to: usize) -> f32 {
        self.cost_model
            .estimate_cost(self.cost_point(from), self.cost_point(to))
    }

    pub(crate) fn compute_between(&self, from: usize, to: usize) -> f32 {
        self.cost_model
            .compute_cost(self.cost_point(from), self.cost_point(to))
    }

    pub(crate) fn estimate_octant_between(&self, from: usize, to: usize) -> f32 {
        self.cost_model
            .estimate_octant_cost(self.octant_cost_point(from), self.octant_cost_point(to))
    }

    pub(crate) fn compute_octant_between(&self, from: usize, to: usize) -> f32 {
        self.cost_model
            .compute_octant_cost(self.octant_cost_point(from), self.octant_cost_point(to))
    }

    /// Heuristic cost between two points, through the installed
    /// [`CostModel`](crate::cost::CostModel).
    pub fn estimate_cost(&self, from_id: PointId, to_id: PointId) -> NavResult<f32> {
        let from = self.point_index(from_id)?;
        let to = self.point_index(to_id)?;
        Ok(self.estimate_between(from, to))
    }

    /// Edge cost between two points, through the installed
    /// [`CostModel`](crate::cost::CostModel).
    pub fn compute_cost(&self, from_id: PointId, to_id: PointId) -> NavResult<f32> {
        let from = self.point_index(from_id)?;
        let to = self.point_index(to_id)?;
        Ok(self.compute_between(from, to))
    }

    /// Heuristic cost between two octants.
    pub fn estimate_octant_cost(&self, from_id: OctantId, to_id: OctantId) -> NavResult<f32> {
        let from = self.octant_index(from_id)?;
        let to = self.octant_index(to_id)?;
        Ok(self.estimate_octant_between(from, to))
    }

    /// Hop cost between two octants.
    pub fn compute_octant_cost(&self, from_id: OctantId, to_id: OctantId) -> NavResult<f32> {
        let from = self.octant_index(from_id)?;
        let to = self.octant_index(to_id)?;
        Ok(self.compute_octant_between(from, to))
    }
}

/// Keep `closest` pointing at the best-scoring point seen so far, by absolute
/// scores: closer to the end wins, and on equal distance to the end the point
/// cheaper to reach from the begin wins.
pub(crate) fn track_closest(closest: &mut Option<usize>, points: &Slab<Point>, candidate: usize) {
    let replace = match *closest {
        None => true,
        Some(best_index) => {
            let best = &points[best_index];
            let observed = &points[candidate];
            best.abs_f_score > observed.abs_f_score
                || (best.abs_f_score >= observed.abs_f_score
                    && best.abs_g_score > observed.abs_g_score)
        }
    };
    if replace {
        *closest = Some(candidate);
    }
}
