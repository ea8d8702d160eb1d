//! The mutable graph store: points, octants, and directional segments.
//!
//! All entities live in `slab` arenas with dense `id -> index` maps on the
//! side, so handles stay stable across unrelated mutations and lookups are
//! insertion-order independent. Every mutating call restores the data-model
//! invariants before returning.

mod bulk;
mod octant;
mod octants;
mod point;
mod points;
mod segment;

#[cfg(test)]
mod tests;

use std::collections::HashMap;

use glam::Vec3;
use slab::Slab;

pub use segment::Direction;

pub(crate) use octant::Octant;
pub(crate) use point::Point;
pub(crate) use segment::SegmentSet;

use crate::cost::{CostModel, EuclideanCost};
use crate::error::{NavError, NavResult};
use crate::search::StraightLine;

/// Identifier of a point. Non-negative; unique within a store.
pub type PointId = i64;

/// Identifier of an octant. Non-negative; unique within a store.
pub type OctantId = i64;

/// Exclusive upper bound for a layers value (bit 31 is reserved).
pub(crate) const LAYERS_VALUE_LIMIT: u32 = (1 << 31) - 1;

/// Number of addressable layer bits.
pub(crate) const LAYER_INDEX_LIMIT: u32 = 31;

/// A* pathfinding engine over points in 3D space, optionally grouped into
/// octants for two-level hierarchical search.
///
/// Points are registered with stable integer ids, connected with directed or
/// bidirectional segments, and queried through [`get_id_path`] /
/// [`get_point_path`]. The store is single-threaded; callers provide external
/// exclusion.
///
/// [`get_id_path`]: NavGraph::get_id_path
/// [`get_point_path`]: NavGraph::get_point_path
pub struct NavGraph {
    pub(crate) points: Slab<Point>,
    pub(crate) point_ids: HashMap<PointId, usize>,
    pub(crate) octants: Slab<Octant>,
    pub(crate) octant_ids: HashMap<OctantId, usize>,
    pub(crate) segments: SegmentSet,
    pub(crate) oct_segments: SegmentSet,

    pub(crate) last_free_id: PointId,
    /// Current point-level solve, compared against per-point pass marks.
    pub(crate) pass: u64,
    /// Current octant-level solve.
    pub(crate) oct_pass: u64,

    pub(crate) cost_model: Box<dyn CostModel>,
    pub(crate) straight_line: Option<Box<dyn StraightLine>>,

    pub(crate) id_path_of_last_pathing_call: Vec<PointId>,
    pub(crate) point_path_of_last_pathing_call: Vec<Vec3>,
    pub(crate) closest_point_of_last_pathing_call: Option<usize>,
}

impl Default for NavGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl NavGraph {
    pub fn new() -> Self {
        Self {
            points: Slab::new(),
            point_ids: HashMap::new(),
            octants: Slab::new(),
            octant_ids: HashMap::new(),
            segments: SegmentSet::default(),
            oct_segments: SegmentSet::default(),
            last_free_id: 0,
            pass: 1,
            oct_pass: 1,
            cost_model: Box::new(EuclideanCost),
            straight_line: None,
            id_path_of_last_pathing_call: Vec::new(),
            point_path_of_last_pathing_call: Vec::new(),
            closest_point_of_last_pathing_call: None,
        }
    }

    /// Install a custom [`CostModel`]; the default is Euclidean distance for
    /// every hook.
    pub fn set_cost_model(&mut self, model: Box<dyn CostModel>) {
        self.cost_model = model;
    }

    /// The id the next `add_point` call may use without colliding: the most
    /// recently freed id if it is still unused, otherwise the first free id
    /// found scanning upward from it.
    pub fn get_available_point_id(&mut self) -> PointId {
        if self.point_ids.contains_key(&self.last_free_id) {
            let mut candidate = self.last_free_id + 1;
            while self.point_ids.contains_key(&candidate) {
                candidate += 1;
            }
            self.last_free_id = candidate;
        }
        self.last_free_id
    }

    pub fn has_point(&self, id: PointId) -> bool {
        self.point_ids.contains_key(&id)
    }

    /// All point ids, ascending.
    pub fn get_point_ids(&self) -> Vec<PointId> {
        let mut ids: Vec<PointId> = self.point_ids.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn get_point_count(&self) -> usize {
        self.points.len()
    }

    pub fn get_point_capacity(&self) -> usize {
        self.points.capacity()
    }

    /// Grow the point store. The new capacity must exceed the current one.
    pub fn reserve_space(&mut self, num_nodes: usize) -> NavResult<()> {
        let current = self.points.capacity();
        if num_nodes <= current {
            return Err(NavError::CapacityTooSmall {
                current,
                requested: num_nodes,
            });
        }
        self.points.reserve(num_nodes - self.points.len());
        Ok(())
    }

    /// Remove every point, octant, and segment and reset the id/pass
    /// counters.
    pub fn clear(&mut self) {
        self.last_free_id = 0;
        self.pass = 1;
        self.oct_pass = 1;
        self.points.clear();
        self.point_ids.clear();
        self.octants.clear();
        self.octant_ids.clear();
        self.segments.clear();
        self.oct_segments.clear();
        self.closest_point_of_last_pathing_call = None;
    }

    pub(crate) fn point_index(&self, id: PointId) -> NavResult<usize> {
        self.point_ids
            .get(&id)
            .copied()
            .ok_or(NavError::PointNotFound(id))
    }

    pub(crate) fn octant_index(&self, id: OctantId) -> NavResult<usize> {
        self.octant_ids
            .get(&id)
            .copied()
            .ok_or(NavError::OctantNotFound(id))
    }

    pub(crate) fn check_layers_value(layers: i64) -> NavResult<u32> {
        if !(0..LAYERS_VALUE_LIMIT as i64).contains(&layers) {
            return Err(NavError::InvalidLayersValue(layers));
        }
        Ok(layers as u32)
    }
}
