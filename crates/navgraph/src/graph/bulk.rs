//! Bulk graph construction from flat arrays.
//!
//! Point rows are 6 wide (`id, x, y, z, weight_scale, layers`); connection
//! rows are `max_connections + 1` wide (`id, n1, ..`), padded with `-1` for
//! unused slots. Rows must tile the arrays exactly.

use glam::Vec3;

use crate::error::{NavError, NavResult};
use crate::graph::NavGraph;

/// Width of one point row.
const POINT_STRIDE: usize = 6;

impl NavGraph {
    /// Append points and bidirectional connections from flat arrays, on top
    /// of whatever the store already holds.
    pub fn append_as_bulk_array(
        &mut self,
        pool_points: &[f64],
        max_connections: usize,
        pool_connections: &[i64],
    ) -> NavResult<()> {
        self.import_bulk(pool_points, max_connections, pool_connections)
    }

    /// Replace the whole store with the given flat arrays; equivalent to
    /// [`clear`](NavGraph::clear) followed by
    /// [`append_as_bulk_array`](NavGraph::append_as_bulk_array).
    pub fn set_as_bulk_array(
        &mut self,
        pool_points: &[f64],
        max_connections: usize,
        pool_connections: &[i64],
    ) -> NavResult<()> {
        self.clear();
        self.import_bulk(pool_points, max_connections, pool_connections)
    }

    fn import_bulk(
        &mut self,
        pool_points: &[f64],
        max_connections: usize,
        pool_connections: &[i64],
    ) -> NavResult<()> {
        if pool_points.len() % POINT_STRIDE != 0 {
            return Err(NavError::BulkRowMismatch {
                len: pool_points.len(),
                stride: POINT_STRIDE,
            });
        }
        let connection_stride = max_connections + 1;
        if pool_connections.len() % connection_stride != 0 {
            return Err(NavError::BulkRowMismatch {
                len: pool_connections.len(),
                stride: connection_stride,
            });
        }

        for row in pool_points.chunks_exact(POINT_STRIDE) {
            let id = row[0] as i64;
            let pos = Vec3::new(row[1] as f32, row[2] as f32, row[3] as f32);
            let weight_scale = row[4] as f32;
            let layers = Self::check_layers_value(row[5] as i64)?;
            self.add_point(id, pos, weight_scale, layers)?;
        }

        for row in pool_connections.chunks_exact(connection_stride) {
            let id = row[0];
            for &with_id in &row[1..] {
                if with_id >= 0 {
                    self.connect_points(id, with_id, true)?;
                }
            }
        }
        Ok(())
    }
}
