//! Point surface of the store: registration, attributes, connectivity, and
//! the spatial closest-point queries.

use glam::Vec3;

use crate::error::{NavError, NavResult};
use crate::geometry;
use crate::graph::segment::canonical;
use crate::graph::{Direction, NavGraph, Point, PointId};

impl NavGraph {
    /// Register a point, or update an existing one.
    ///
    /// Re-adding an existing id updates its position, weight scale, and layer
    /// mask; the weight update propagates into an owning octant's rolling
    /// average, and the layer update invalidates (removes) an owning octant.
    pub fn add_point(
        &mut self,
        id: PointId,
        pos: Vec3,
        weight_scale: f32,
        layers: u32,
    ) -> NavResult<()> {
        if id < 0 {
            return Err(NavError::NegativeId(id));
        }
        if weight_scale < 0.0 {
            return Err(NavError::InvalidWeightScale(weight_scale));
        }
        Self::check_layers_value(layers as i64)?;

        match self.point_ids.get(&id).copied() {
            None => {
                let index = self.points.insert(Point::new(id, pos, weight_scale, layers));
                self.point_ids.insert(id, index);
            }
            Some(index) => {
                self.points[index].pos = pos;
                self.set_point_weight_scale(id, weight_scale)?;
                self.set_point_layers_value(id, layers)?;
            }
        }
        Ok(())
    }

    /// Remove a point, every segment it participates in, its entries in all
    /// partners' neighbor maps, and its owning octant (if any). The freed id
    /// becomes the next candidate for [`get_available_point_id`].
    ///
    /// [`get_available_point_id`]: NavGraph::get_available_point_id
    pub fn remove_point(&mut self, id: PointId) -> NavResult<()> {
        let index = self.point_index(id)?;

        let partners: Vec<(PointId, usize)> = {
            let p = &self.points[index];
            p.neighbors
                .iter()
                .chain(p.unlinked_neighbors.iter())
                .map(|(&pid, &pidx)| (pid, pidx))
                .collect()
        };
        for (partner_id, partner_index) in partners {
            self.segments.remove(id, partner_id);
            let partner = &mut self.points[partner_index];
            partner.neighbors.remove(&id);
            partner.unlinked_neighbors.remove(&id);
        }

        if let Some(octant_index) = self.points[index].octant {
            let octant_id = self.octants[octant_index].id;
            self.remove_octant(octant_id)?;
        }

        self.points.remove(index);
        self.point_ids.remove(&id);
        self.last_free_id = id;
        Ok(())
    }

    pub fn get_point_position(&self, id: PointId) -> NavResult<Vec3> {
        Ok(self.points[self.point_index(id)?].pos)
    }

    pub fn set_point_position(&mut self, id: PointId, pos: Vec3) -> NavResult<()> {
        let index = self.point_index(id)?;
        self.points[index].pos = pos;
        Ok(())
    }

    pub fn get_point_weight_scale(&self, id: PointId) -> NavResult<f32> {
        Ok(self.points[self.point_index(id)?].weight_scale)
    }

    /// Update a point's weight scale, keeping an owning octant's rolling
    /// average in sync. When the octant's last weighted member returns to 1,
    /// the average is snapped back to exactly 1.
    pub fn set_point_weight_scale(&mut self, id: PointId, weight_scale: f32) -> NavResult<()> {
        let index = self.point_index(id)?;
        if weight_scale < 0.0 {
            return Err(NavError::InvalidWeightScale(weight_scale));
        }

        let original = self.points[index].weight_scale;
        self.points[index].weight_scale = weight_scale;

        if let Some(octant_index) = self.points[index].octant {
            let octant = &mut self.octants[octant_index];
            let member_count = octant.points.len() as f32;

            octant.weight_scale -= (original - 1.0) / member_count;
            octant.weighted_points.retain(|&pid| pid != id);

            if weight_scale != 1.0 {
                octant.weighted_points.push(id);
                octant.weight_scale += (weight_scale - 1.0) / member_count;
            } else if octant.weighted_points.is_empty() {
                octant.weight_scale = 1.0;
            }
        }
        Ok(())
    }

    pub fn set_point_disabled(&mut self, id: PointId, disabled: bool) -> NavResult<()> {
        let index = self.point_index(id)?;
        self.points[index].enabled = !disabled;
        Ok(())
    }

    pub fn is_point_disabled(&self, id: PointId) -> NavResult<bool> {
        Ok(!self.points[self.point_index(id)?].enabled)
    }

    /// Toggle a single layer bit. Mutating a member's layers invalidates its
    /// owning octant, since the octant's aggregate mask can no longer be
    /// trusted.
    pub fn set_point_layer(&mut self, id: PointId, layer_index: u32, enabled: bool) -> NavResult<()> {
        let index = self.point_index(id)?;
        if layer_index >= super::LAYER_INDEX_LIMIT {
            return Err(NavError::InvalidLayerIndex(layer_index));
        }

        let point = &mut self.points[index];
        if enabled {
            point.layers |= 1 << layer_index;
        } else {
            point.layers &= !(1 << layer_index);
        }

        self.detach_owning_octant(index)?;
        Ok(())
    }

    /// Replace a point's whole layer mask. Invalidates an owning octant, like
    /// [`set_point_layer`].
    ///
    /// [`set_point_layer`]: NavGraph::set_point_layer
    pub fn set_point_layers_value(&mut self, id: PointId, layers: u32) -> NavResult<()> {
        let index = self.point_index(id)?;
        Self::check_layers_value(layers as i64)?;

        self.points[index].layers = layers;
        self.detach_owning_octant(index)?;
        Ok(())
    }

    pub fn get_point_layer(&self, id: PointId, layer_index: u32) -> NavResult<bool> {
        let index = self.point_index(id)?;
        if layer_index >= super::LAYER_INDEX_LIMIT {
            return Err(NavError::InvalidLayerIndex(layer_index));
        }
        Ok(self.points[index].layers & (1 << layer_index) != 0)
    }

    pub fn get_point_layers_value(&self, id: PointId) -> NavResult<u32> {
        Ok(self.points[self.point_index(id)?].layers)
    }

    /// Ids this point has outgoing edges to, ascending.
    pub fn get_point_connections(&self, id: PointId) -> NavResult<Vec<PointId>> {
        let index = self.point_index(id)?;
        Ok(self.points[index].neighbors.keys().copied().collect())
    }

    /// Connect two points. One-way edges are traversable from `id` to
    /// `with_id` only; inserting the opposite one-way later upgrades the
    /// segment to bidirectional.
    pub fn connect_points(
        &mut self,
        id: PointId,
        with_id: PointId,
        bidirectional: bool,
    ) -> NavResult<()> {
        if id == with_id {
            return Err(NavError::SelfConnection(id));
        }
        let a = self.point_index(id)?;
        let b = self.point_index(with_id)?;

        self.points[a].neighbors.insert(with_id, b);
        if bidirectional {
            self.points[b].neighbors.insert(id, a);
        } else {
            self.points[b].unlinked_neighbors.insert(id, a);
        }

        let merged = self.segments.merge(id, with_id, bidirectional);
        if merged == Direction::BIDIRECTIONAL {
            // both ends are full neighbors of each other now
            self.points[a].unlinked_neighbors.remove(&with_id);
            self.points[b].unlinked_neighbors.remove(&id);
        }
        Ok(())
    }

    /// Remove the requested direction bits from the segment joining two
    /// points; the segment disappears once no bits remain. Disconnecting a
    /// non-existent edge is a no-op.
    pub fn disconnect_points(
        &mut self,
        id: PointId,
        with_id: PointId,
        bidirectional: bool,
    ) -> NavResult<()> {
        let a = self.point_index(id)?;
        let b = self.point_index(with_id)?;

        let Some(existing) = self.segments.get(id, with_id) else {
            return Ok(());
        };
        let (_, canon) = canonical(id, with_id);
        let removed = if bidirectional {
            Direction::BIDIRECTIONAL
        } else {
            canon
        };
        let residual = existing.difference(removed);

        self.points[a].neighbors.remove(&with_id);
        if bidirectional {
            self.points[b].neighbors.remove(&id);
            if existing != Direction::BIDIRECTIONAL {
                self.points[a].unlinked_neighbors.remove(&with_id);
                self.points[b].unlinked_neighbors.remove(&id);
            }
        } else if residual.is_none() {
            self.points[b].unlinked_neighbors.remove(&id);
        } else {
            // the surviving direction runs toward `id`, so it becomes the
            // unlinked end
            self.points[a].unlinked_neighbors.insert(with_id, b);
        }

        self.segments.set(id, with_id, residual);
        Ok(())
    }

    /// Connectivity test. With `bidirectional` any segment joining the pair
    /// counts; otherwise the segment must be traversable from `id` to
    /// `with_id`.
    pub fn are_points_connected(&self, id: PointId, with_id: PointId, bidirectional: bool) -> bool {
        self.segments.connected(id, with_id, bidirectional)
    }

    /// Closest registered point to a position, preferring the lowest id on
    /// exact distance ties. Disabled points are skipped unless
    /// `include_disabled`; `relevant_layers == 0` matches any layer.
    pub fn get_closest_point(
        &self,
        to_position: Vec3,
        include_disabled: bool,
        relevant_layers: u32,
    ) -> Option<PointId> {
        let mut closest_id: Option<PointId> = None;
        let mut closest_dist = f32::INFINITY;

        for (_, point) in self.points.iter() {
            if (!include_disabled && !point.enabled) || !point.supports_layers(relevant_layers) {
                continue;
            }

            let d = to_position.distance_squared(point.pos);
            if d <= closest_dist {
                if d == closest_dist && closest_id.is_some_and(|best| point.id > best) {
                    continue; // keep the lowest id
                }
                closest_dist = d;
                closest_id = Some(point.id);
            }
        }
        closest_id
    }

    /// Closest position lying on any segment whose two endpoints are both
    /// enabled. Returns the origin when the store has no such segment.
    pub fn get_closest_position_in_segment(&self, to_position: Vec3) -> Vec3 {
        let mut closest_dist = f32::INFINITY;
        let mut closest_point = Vec3::ZERO;

        for (&(u, v), _) in self.segments.iter() {
            let (Some(&from), Some(&to)) = (self.point_ids.get(&u), self.point_ids.get(&v)) else {
                continue;
            };
            let from = &self.points[from];
            let to = &self.points[to];
            if !(from.enabled && to.enabled) {
                continue;
            }

            let candidate = geometry::closest_point_on_segment(to_position, from.pos, to.pos);
            let d = to_position.distance_squared(candidate);
            if d < closest_dist {
                closest_point = candidate;
                closest_dist = d;
            }
        }
        closest_point
    }

    /// Remove the octant owning `index`, if any.
    fn detach_owning_octant(&mut self, index: usize) -> NavResult<()> {
        if let Some(octant_index) = self.points[index].octant {
            let octant_id = self.octants[octant_index].id;
            self.remove_octant(octant_id)?;
        }
        Ok(())
    }
}
