//! Point records, including the search state embedded in each node.

use std::collections::{BTreeMap, HashMap};

use glam::Vec3;

use crate::PointId;

/// A node of the navigation graph.
///
/// Neighbor maps hold arena indices keyed by point id. `BTreeMap` keeps
/// expansion order a pure function of the graph's contents, which makes
/// equal-cost tie-breaking reproducible across identical stores.
///
/// The trailing score/pass fields are transient per-solve state: they are
/// only meaningful while the matching pass counter is current, so no reset
/// between solves is needed.
#[derive(Debug, Clone)]
pub(crate) struct Point {
    pub id: PointId,
    pub pos: Vec3,
    pub weight_scale: f32,
    pub enabled: bool,
    pub layers: u32,

    /// Outgoing edges: neighbor id -> arena index.
    pub neighbors: BTreeMap<PointId, usize>,
    /// Points with an edge *to* this one that is not traversable from here;
    /// kept so removal can scrub back-references symmetrically.
    pub unlinked_neighbors: BTreeMap<PointId, usize>,

    /// Arena index of the owning octant, if any.
    pub octant: Option<usize>,
    /// Hierarchical back-pointers, keyed by previous-octant id (`-1` marks the
    /// head of the chain). Consumed and cleared during path reconstruction.
    pub octant_source_prev_point: HashMap<i64, usize>,

    // Transient pathfinding state, valid while `open_pass`/`closed_pass`
    // match the store's current pass.
    pub prev_point: Option<usize>,
    pub g_score: f32,
    pub f_score: f32,
    pub open_pass: u64,
    pub closed_pass: u64,

    // Scores relative to the original begin/end of the outer search, feeding
    // the closest-reachable tracker.
    pub abs_g_score: f32,
    pub abs_f_score: f32,
}

impl Point {
    pub fn new(id: PointId, pos: Vec3, weight_scale: f32, layers: u32) -> Self {
        Self {
            id,
            pos,
            weight_scale,
            enabled: true,
            layers,
            neighbors: BTreeMap::new(),
            unlinked_neighbors: BTreeMap::new(),
            octant: None,
            octant_source_prev_point: HashMap::new(),
            prev_point: None,
            g_score: 0.0,
            f_score: 0.0,
            open_pass: 0,
            closed_pass: 0,
            abs_g_score: 0.0,
            abs_f_score: 0.0,
        }
    }

    /// Layer filter with `0` as the wildcard mask.
    pub fn supports_layers(&self, relevant_layers: u32) -> bool {
        relevant_layers == 0 || (relevant_layers & self.layers) != 0
    }
}
