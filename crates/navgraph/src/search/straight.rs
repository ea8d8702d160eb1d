//! Client-supplied straight-line shortcut hook.

use crate::error::{NavError, NavResult};
use crate::graph::{NavGraph, PointId};

/// Proposes a candidate linear path of point ids, tried by the hierarchical
/// solver before its bounded inner search.
///
/// The returned sequence is advisory: the engine re-validates every hop
/// (segment existence and direction, enabled flag, layer support, unit weight
/// scale) and falls back to the inner A* the moment a hop fails.
pub trait StraightLine {
    /// Ordered id sequence from `from` to `to`, including both endpoints.
    fn line(&self, from: PointId, to: PointId) -> Vec<PointId>;
}

impl NavGraph {
    /// Register the straight-line hook used by hierarchical searches.
    ///
    /// Registration probes the hook once with point ids 0 and 1, which must
    /// both exist in the store; without them the hook is rejected and the
    /// previous registration (if any) is kept.
    pub fn set_straight_line_function(&mut self, hook: Box<dyn StraightLine>) -> NavResult<()> {
        if !self.has_point(0) || !self.has_point(1) {
            return Err(NavError::StraightLineProbe);
        }
        let _ = hook.line(0, 1);
        self.straight_line = Some(hook);
        Ok(())
    }
}
