//! Public path queries and hierarchical path reconstruction.

use glam::Vec3;
use tracing::warn;

use crate::error::{NavError, NavResult};
use crate::graph::{NavGraph, PointId, LAYERS_VALUE_LIMIT};

impl NavGraph {
    fn solve(
        &mut self,
        begin_index: usize,
        end_index: usize,
        relevant_layers: u32,
        use_octants: bool,
    ) -> bool {
        self.id_path_of_last_pathing_call.clear();
        self.point_path_of_last_pathing_call.clear();
        self.closest_point_of_last_pathing_call = None;

        if use_octants {
            return self.octants_solve(begin_index, end_index, relevant_layers);
        }
        self.flat_solve(begin_index, end_index, relevant_layers)
    }

    /// Shortest path as point ids, or an empty vector when no route exists.
    ///
    /// On failure, the path to the closest reachable point (when one was
    /// seen) is held for
    /// [`get_proximity_id_path_of_last_pathing_call`](NavGraph::get_proximity_id_path_of_last_pathing_call).
    ///
    /// With `use_octants`, both endpoints must belong to octants; endpoints
    /// sharing an octant fall back to the flat solver.
    pub fn get_id_path(
        &mut self,
        from_id: PointId,
        to_id: PointId,
        relevant_layers: u32,
        use_octants: bool,
    ) -> NavResult<Vec<PointId>> {
        let (chain, found_route) = self.trace(from_id, to_id, relevant_layers, use_octants)?;
        let ids: Vec<PointId> = chain.iter().map(|&index| self.points[index].id).collect();
        if !found_route {
            self.id_path_of_last_pathing_call = ids;
            self.point_path_of_last_pathing_call =
                chain.iter().map(|&index| self.points[index].pos).collect();
            return Ok(Vec::new());
        }
        Ok(ids)
    }

    /// Shortest path as positions; same contract as
    /// [`get_id_path`](NavGraph::get_id_path).
    pub fn get_point_path(
        &mut self,
        from_id: PointId,
        to_id: PointId,
        relevant_layers: u32,
        use_octants: bool,
    ) -> NavResult<Vec<Vec3>> {
        let (chain, found_route) = self.trace(from_id, to_id, relevant_layers, use_octants)?;
        let positions: Vec<Vec3> = chain.iter().map(|&index| self.points[index].pos).collect();
        if !found_route {
            self.id_path_of_last_pathing_call =
                chain.iter().map(|&index| self.points[index].id).collect();
            self.point_path_of_last_pathing_call = positions;
            return Ok(Vec::new());
        }
        Ok(positions)
    }

    /// Best-effort path of the last failed query, as ids. Empty when the last
    /// query succeeded or saw no reachable point at all.
    pub fn get_proximity_id_path_of_last_pathing_call(&self) -> Vec<PointId> {
        self.id_path_of_last_pathing_call.clone()
    }

    /// Best-effort path of the last failed query, as positions.
    pub fn get_proximity_point_path_of_last_pathing_call(&self) -> Vec<Vec3> {
        self.point_path_of_last_pathing_call.clone()
    }

    /// Solve and walk the back-pointers into a begin-to-end chain of arena
    /// indices. The second return tells whether the chain reaches the true
    /// end (`false` means it leads to the closest reachable point instead).
    fn trace(
        &mut self,
        from_id: PointId,
        to_id: PointId,
        relevant_layers: u32,
        use_octants: bool,
    ) -> NavResult<(Vec<usize>, bool)> {
        let begin_index = self.point_index(from_id)?;
        let end_index = self.point_index(to_id)?;

        if use_octants {
            if self.points[begin_index].octant.is_none() {
                return Err(NavError::PointNotInOctant(from_id));
            }
            if self.points[end_index].octant.is_none() {
                return Err(NavError::PointNotInOctant(to_id));
            }
        }

        if begin_index == end_index {
            return Ok((vec![begin_index], true));
        }

        // endpoints sharing an octant cannot use the hierarchical solver
        let use_octants =
            use_octants && self.points[begin_index].octant != self.points[end_index].octant;

        if relevant_layers >= LAYERS_VALUE_LIMIT {
            return Err(NavError::InvalidLayersValue(relevant_layers as i64));
        }

        let found_route = self.solve(begin_index, end_index, relevant_layers, use_octants);

        let end_index = if found_route {
            end_index
        } else {
            match self.closest_point_of_last_pathing_call {
                None => return Ok((Vec::new(), false)),
                Some(closest) => {
                    let pos = self.points[closest].pos;
                    warn!(
                        x = pos.x,
                        y = pos.y,
                        z = pos.z,
                        "no route found; tracing path to closest reachable point"
                    );
                    closest
                }
            }
        };

        if use_octants {
            self.link_octant_chain(begin_index, end_index);
        }
        Ok((self.collect_chain(begin_index, end_index, use_octants), found_route))
    }

    /// Rewrite `prev_point` links along the hierarchical route by following
    /// each octant hop's `octant_source_prev_point` entries, keyed by the id
    /// of the octant preceding the hop (`-1` at the chain head).
    ///
    /// A missing entry is a broken solver contract; it panics rather than
    /// returning a corrupt path.
    fn link_octant_chain(&mut self, begin_index: usize, end_index: usize) {
        let mut octant = self.points[end_index].octant;
        let mut p = end_index;

        while p != begin_index {
            let Some(current) = octant else {
                panic!("path failed: hierarchical chain left octant space");
            };
            let prev_octant = self.octants[current].prev_octant;
            let prev_octant_id = prev_octant
                .map(|index| self.octants[index].id)
                .unwrap_or(-1);

            // the route may cut across octants that are not on the octant
            // path, so walk until the *previous* octant is reached
            while self.points[p].octant != prev_octant && p != begin_index {
                let source_prev = self.points[p]
                    .octant_source_prev_point
                    .get(&prev_octant_id)
                    .copied();
                self.points[p].octant_source_prev_point.clear();

                let Some(prev_point) = source_prev else {
                    panic!("path failed: missing hierarchical back-pointer");
                };
                self.points[p].prev_point = Some(prev_point);
                p = prev_point;
            }

            octant = prev_octant;
        }
    }

    /// Walk `prev_point` links from the end back to the begin and return the
    /// chain in forward order. Under octants, middle points of triples whose
    /// outer points are directly connected are elided.
    fn collect_chain(
        &mut self,
        begin_index: usize,
        end_index: usize,
        use_octants: bool,
    ) -> Vec<usize> {
        let mut reversed = Vec::new();
        let mut p = end_index;

        while p != begin_index {
            reversed.push(p);

            let prev = self.points[p]
                .prev_point
                .unwrap_or_else(|| panic!("path failed: broken back-pointer chain"));

            if use_octants && prev != begin_index {
                let skip = self.points[prev]
                    .prev_point
                    .unwrap_or_else(|| panic!("path failed: broken back-pointer chain"));
                let skip_id = self.points[skip].id;
                let p_id = self.points[p].id;
                if self.segments.connected(skip_id, p_id, false) {
                    p = skip;
                    continue;
                }
            }
            p = prev;
        }

        reversed.push(begin_index);
        reversed.reverse();
        reversed
    }
}
