//! Octant surface of the store: construction, removal, and octant-level
//! connectivity.

use glam::Vec3;

use crate::error::{NavError, NavResult};
use crate::graph::{Direction, NavGraph, Octant, OctantId, PointId};

impl NavGraph {
    /// Create an octant from a set of member points, or replace an existing
    /// one (a replacement detaches the old members first; connectivity to
    /// other octants survives).
    ///
    /// Rules, enforced in order: the member list must be non-empty, every
    /// member must exist, no member may belong to another octant, and
    /// `center_point` must appear in the list (it becomes the origin). Any
    /// violation removes the partially built octant and reports the first
    /// conflict encountered.
    pub fn add_octant(
        &mut self,
        id: OctantId,
        member_ids: &[PointId],
        pos: Vec3,
        center_point: PointId,
    ) -> NavResult<()> {
        if id < 0 {
            return Err(NavError::NegativeId(id));
        }
        if member_ids.is_empty() {
            return Err(NavError::EmptyOctant(id));
        }

        let octant_index = match self.octant_ids.get(&id).copied() {
            Some(index) => {
                let member_indices: Vec<usize> =
                    self.octants[index].points.values().copied().collect();
                for point_index in member_indices {
                    self.points[point_index].octant = None;
                }
                let octant = &mut self.octants[index];
                octant.pos = pos;
                octant.reset_members();
                index
            }
            None => {
                let index = self.octants.insert(Octant::new(id, pos));
                self.octant_ids.insert(id, index);
                index
            }
        };

        let member_count = member_ids.len() as f32;
        let mut layers: u32 = 0;
        let mut failure: Option<NavError> = None;

        for &point_id in member_ids {
            let Some(&point_index) = self.point_ids.get(&point_id) else {
                failure = Some(NavError::OctantMissingPoint {
                    octant: id,
                    point: point_id,
                });
                break;
            };

            if point_id == center_point {
                self.octants[octant_index].origin = Some(point_index);
            }
            let (point_layers, point_octant, point_weight) = {
                let p = &self.points[point_index];
                (p.layers, p.octant, p.weight_scale)
            };
            layers |= point_layers;

            if point_octant.is_some() {
                failure = Some(NavError::OctantOverlap {
                    octant: id,
                    point: point_id,
                });
                break;
            }
            self.points[point_index].octant = Some(octant_index);

            let octant = &mut self.octants[octant_index];
            octant.points.insert(point_id, point_index);
            if point_weight != 1.0 {
                octant.weighted_points.push(point_id);
                octant.weight_scale += (point_weight - 1.0) / member_count;
            }
        }

        if failure.is_none() && self.octants[octant_index].origin.is_none() {
            failure = Some(NavError::OctantMissingCenter {
                octant: id,
                center: center_point,
            });
        }
        self.octants[octant_index].layers = layers;

        if let Some(error) = failure {
            self.remove_octant(id)?;
            return Err(error);
        }
        Ok(())
    }

    /// Remove an octant: detaches all member points, erases every
    /// octant-level segment touching it, and deletes it.
    pub fn remove_octant(&mut self, id: OctantId) -> NavResult<()> {
        let index = self.octant_index(id)?;

        let member_indices: Vec<usize> = self.octants[index].points.values().copied().collect();
        for point_index in member_indices {
            self.points[point_index].octant = None;
        }

        let partners: Vec<(OctantId, usize)> = {
            let o = &self.octants[index];
            o.neighbors
                .iter()
                .chain(o.unlinked_neighbors.iter())
                .map(|(&oid, &oidx)| (oid, oidx))
                .collect()
        };
        for (partner_id, partner_index) in partners {
            self.oct_segments.remove(id, partner_id);
            let partner = &mut self.octants[partner_index];
            partner.neighbors.remove(&id);
            partner.unlinked_neighbors.remove(&id);
        }

        self.octants.remove(index);
        self.octant_ids.remove(&id);
        Ok(())
    }

    /// Diagnostic dump of an octant: `[layers]`, extended with
    /// `[0, weighted_ids...]` when it has weighted members.
    pub fn debug_octant(&self, id: OctantId) -> NavResult<Vec<i64>> {
        let index = self.octant_index(id)?;
        let octant = &self.octants[index];

        let mut data = vec![octant.layers as i64];
        if !octant.weighted_points.is_empty() {
            data.push(0);
            data.extend_from_slice(&octant.weighted_points);
        }
        Ok(data)
    }

    /// Id of the octant owning a point, or `None` when unowned.
    pub fn get_point_octant_id(&self, id: PointId) -> NavResult<Option<OctantId>> {
        let index = self.point_index(id)?;
        Ok(self.points[index]
            .octant
            .map(|octant_index| self.octants[octant_index].id))
    }

    /// All octant ids, ascending.
    pub fn get_octant_ids(&self) -> Vec<OctantId> {
        let mut ids: Vec<OctantId> = self.octant_ids.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Connect two octants; same direction semantics as
    /// [`connect_points`](NavGraph::connect_points).
    pub fn connect_octants(
        &mut self,
        id: OctantId,
        with_id: OctantId,
        bidirectional: bool,
    ) -> NavResult<()> {
        if id == with_id {
            return Err(NavError::SelfConnection(id));
        }
        let a = self.octant_index(id)?;
        let b = self.octant_index(with_id)?;

        self.octants[a].neighbors.insert(with_id, b);
        if bidirectional {
            self.octants[b].neighbors.insert(id, a);
        } else {
            self.octants[b].unlinked_neighbors.insert(id, a);
        }

        let merged = self.oct_segments.merge(id, with_id, bidirectional);
        if merged == Direction::BIDIRECTIONAL {
            self.octants[a].unlinked_neighbors.remove(&with_id);
            self.octants[b].unlinked_neighbors.remove(&id);
        }
        Ok(())
    }

    /// Connectivity test on the octant segment set; same contract as
    /// [`are_points_connected`](NavGraph::are_points_connected).
    pub fn are_octants_connected(
        &self,
        id: OctantId,
        with_id: OctantId,
        bidirectional: bool,
    ) -> bool {
        self.oct_segments.connected(id, with_id, bidirectional)
    }
}
