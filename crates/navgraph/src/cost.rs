//! Overridable cost hooks for both search levels.
//!
//! The solvers consult a [`CostModel`] for every heuristic estimate and edge
//! cost, at point granularity and again at octant granularity. The default
//! model is Euclidean distance between positions, which keeps the point-level
//! heuristic admissible. A custom model replaces any subset of the four hooks;
//! values it returns are used as-is, without sanitation.

use glam::Vec3;

/// Endpoint handed to a [`CostModel`] hook: the entity id plus its position.
///
/// The same shape is used for points and octants; which one it refers to
/// follows from the hook being called.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostPoint {
    pub id: i64,
    pub pos: Vec3,
}

/// Cost hooks consulted by the flat and hierarchical solvers.
pub trait CostModel {
    /// Heuristic estimate of the remaining cost from `from` to `to`.
    fn estimate_cost(&self, from: CostPoint, to: CostPoint) -> f32 {
        from.pos.distance(to.pos)
    }

    /// Cost of traversing the edge from `from` to `to`.
    fn compute_cost(&self, from: CostPoint, to: CostPoint) -> f32 {
        from.pos.distance(to.pos)
    }

    /// Heuristic estimate between two octants.
    fn estimate_octant_cost(&self, from: CostPoint, to: CostPoint) -> f32 {
        from.pos.distance(to.pos)
    }

    /// Cost of hopping between two connected octants.
    fn compute_octant_cost(&self, from: CostPoint, to: CostPoint) -> f32 {
        from.pos.distance(to.pos)
    }
}

/// Default model: straight Euclidean distance for every hook.
#[derive(Debug, Clone, Copy, Default)]
pub struct EuclideanCost;

impl CostModel for EuclideanCost {}
