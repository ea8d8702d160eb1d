//! Store-level tests: registration, connectivity bookkeeping, octant
//! construction, and the spatial queries.

use glam::Vec3;

use crate::error::NavError;
use crate::graph::NavGraph;

fn v(x: f32, y: f32, z: f32) -> Vec3 {
    Vec3::new(x, y, z)
}

fn graph_with_points(count: i64) -> NavGraph {
    let mut graph = NavGraph::new();
    for id in 0..count {
        graph.add_point(id, v(id as f32, 0.0, 0.0), 1.0, 0).unwrap();
    }
    graph
}

#[test]
fn add_point_rejects_bad_input() {
    let mut graph = NavGraph::new();
    assert_eq!(
        graph.add_point(-1, Vec3::ZERO, 1.0, 0),
        Err(NavError::NegativeId(-1))
    );
    assert_eq!(
        graph.add_point(1, Vec3::ZERO, -0.5, 0),
        Err(NavError::InvalidWeightScale(-0.5))
    );
    assert_eq!(
        graph.add_point(1, Vec3::ZERO, 1.0, u32::MAX >> 1),
        Err(NavError::InvalidLayersValue((u32::MAX >> 1) as i64))
    );
    assert_eq!(graph.get_point_count(), 0);
}

#[test]
fn add_point_updates_existing() {
    let mut graph = NavGraph::new();
    graph.add_point(1, v(1.0, 0.0, 0.0), 1.0, 0b01).unwrap();
    graph.add_point(1, v(2.0, 0.0, 0.0), 3.0, 0b10).unwrap();

    assert_eq!(graph.get_point_count(), 1);
    assert_eq!(graph.get_point_position(1).unwrap(), v(2.0, 0.0, 0.0));
    assert_eq!(graph.get_point_weight_scale(1).unwrap(), 3.0);
    assert_eq!(graph.get_point_layers_value(1).unwrap(), 0b10);
}

#[test]
fn readding_octant_member_invalidates_octant() {
    let mut graph = graph_with_points(2);
    graph.add_octant(7, &[0, 1], Vec3::ZERO, 0).unwrap();
    assert_eq!(graph.get_point_octant_id(0).unwrap(), Some(7));

    // the layer update path can no longer trust the octant's aggregate mask
    graph.add_point(0, Vec3::ZERO, 1.0, 0b1).unwrap();
    assert_eq!(graph.get_point_octant_id(0).unwrap(), None);
    assert!(graph.get_octant_ids().is_empty());
}

#[test]
fn available_id_recycles_removed_ids() {
    let mut graph = graph_with_points(3);
    assert_eq!(graph.get_available_point_id(), 3);

    graph.remove_point(1).unwrap();
    assert_eq!(graph.get_available_point_id(), 1);

    graph.add_point(1, Vec3::ZERO, 1.0, 0).unwrap();
    assert_eq!(graph.get_available_point_id(), 3);
}

#[test]
fn connect_points_directional_bookkeeping() {
    let mut graph = graph_with_points(2);
    graph.connect_points(0, 1, false).unwrap();

    assert!(graph.are_points_connected(0, 1, false));
    assert!(!graph.are_points_connected(1, 0, false));
    assert!(graph.are_points_connected(0, 1, true));
    assert!(graph.are_points_connected(1, 0, true));
    assert_eq!(graph.get_point_connections(0).unwrap(), vec![1]);
    assert!(graph.get_point_connections(1).unwrap().is_empty());
}

#[test]
fn opposite_one_ways_upgrade_to_bidirectional() {
    let mut graph = graph_with_points(2);
    graph.connect_points(0, 1, false).unwrap();
    graph.connect_points(1, 0, false).unwrap();

    assert!(graph.are_points_connected(0, 1, false));
    assert!(graph.are_points_connected(1, 0, false));
    assert_eq!(graph.get_point_connections(0).unwrap(), vec![1]);
    assert_eq!(graph.get_point_connections(1).unwrap(), vec![0]);
}

#[test]
fn connect_is_idempotent() {
    let mut graph = graph_with_points(2);
    graph.connect_points(0, 1, true).unwrap();
    graph.connect_points(0, 1, true).unwrap();

    assert!(graph.are_points_connected(0, 1, false));
    assert!(graph.are_points_connected(1, 0, false));
    assert_eq!(graph.get_point_connections(0).unwrap(), vec![1]);
}

#[test]
fn connect_rejects_self_and_unknown() {
    let mut graph = graph_with_points(1);
    assert_eq!(
        graph.connect_points(0, 0, true),
        Err(NavError::SelfConnection(0))
    );
    assert_eq!(
        graph.connect_points(0, 9, true),
        Err(NavError::PointNotFound(9))
    );
}

#[test]
fn disconnect_removes_edge() {
    let mut graph = graph_with_points(2);
    graph.connect_points(0, 1, true).unwrap();
    graph.disconnect_points(0, 1, true).unwrap();

    assert!(!graph.are_points_connected(0, 1, true));
    assert!(graph.get_point_connections(0).unwrap().is_empty());
    assert!(graph.get_point_connections(1).unwrap().is_empty());
}

#[test]
fn disconnect_missing_edge_is_noop() {
    let mut graph = graph_with_points(2);
    graph.disconnect_points(0, 1, true).unwrap();
    graph.disconnect_points(0, 1, false).unwrap();
    assert!(!graph.are_points_connected(0, 1, true));
}

#[test]
fn partial_disconnect_leaves_residual_direction() {
    let mut graph = graph_with_points(2);
    graph.connect_points(0, 1, true).unwrap();
    graph.disconnect_points(0, 1, false).unwrap();

    assert!(!graph.are_points_connected(0, 1, false));
    assert!(graph.are_points_connected(1, 0, false));
    assert!(graph.are_points_connected(0, 1, true));
    assert_eq!(graph.get_point_connections(1).unwrap(), vec![0]);
}

#[test]
fn remove_point_scrubs_all_references() {
    let mut graph = graph_with_points(3);
    graph.connect_points(0, 1, true).unwrap();
    graph.connect_points(1, 2, false).unwrap();
    graph.connect_points(2, 1, true).unwrap();

    graph.remove_point(1).unwrap();

    assert!(!graph.has_point(1));
    for id in [0, 2] {
        assert!(!graph.get_point_connections(id).unwrap().contains(&1));
        assert!(!graph.are_points_connected(id, 1, true));
    }
}

#[test]
fn remove_point_drops_owning_octant() {
    let mut graph = graph_with_points(3);
    graph.add_octant(5, &[0, 1], Vec3::ZERO, 0).unwrap();

    graph.remove_point(1).unwrap();

    assert!(graph.get_octant_ids().is_empty());
    // the surviving member is detached, not deleted
    assert!(graph.has_point(0));
    assert_eq!(graph.get_point_octant_id(0).unwrap(), None);
}

#[test]
fn point_layers_by_index() {
    let mut graph = graph_with_points(1);
    graph.set_point_layer(0, 3, true).unwrap();
    graph.set_point_layer(0, 5, true).unwrap();

    assert!(graph.get_point_layer(0, 3).unwrap());
    assert!(!graph.get_point_layer(0, 4).unwrap());
    assert_eq!(graph.get_point_layers_value(0).unwrap(), 0b101000);

    graph.set_point_layer(0, 3, false).unwrap();
    assert_eq!(graph.get_point_layers_value(0).unwrap(), 0b100000);

    assert_eq!(
        graph.set_point_layer(0, 31, true),
        Err(NavError::InvalidLayerIndex(31))
    );
}

#[test]
fn layer_mutation_invalidates_octant() {
    let mut graph = graph_with_points(2);
    graph.add_octant(1, &[0, 1], Vec3::ZERO, 0).unwrap();

    graph.set_point_layer(0, 2, true).unwrap();
    assert_eq!(graph.get_point_octant_id(0).unwrap(), None);
    assert_eq!(graph.get_point_octant_id(1).unwrap(), None);
    assert!(graph.get_octant_ids().is_empty());
}

#[test]
fn disabled_flag_round_trip() {
    let mut graph = graph_with_points(1);
    assert!(!graph.is_point_disabled(0).unwrap());
    graph.set_point_disabled(0, true).unwrap();
    assert!(graph.is_point_disabled(0).unwrap());
    graph.set_point_disabled(0, false).unwrap();
    assert!(!graph.is_point_disabled(0).unwrap());
}

#[test]
fn octant_layers_are_member_union() {
    let mut graph = NavGraph::new();
    graph.add_point(0, Vec3::ZERO, 1.0, 0b001).unwrap();
    graph.add_point(1, Vec3::ZERO, 1.0, 0b100).unwrap();
    graph.add_octant(9, &[0, 1], Vec3::ZERO, 0).unwrap();

    assert_eq!(graph.debug_octant(9).unwrap(), vec![0b101]);
}

#[test]
fn octant_weight_scale_is_rolling_average() {
    let mut graph = graph_with_points(4);
    graph.add_octant(1, &[0, 1, 2, 3], Vec3::ZERO, 0).unwrap();

    graph.set_point_weight_scale(2, 5.0).unwrap();
    let octant = &graph.octants[graph.octant_ids[&1]];
    assert_eq!(octant.weight_scale, 2.0); // 1 + (5 - 1) / 4
    assert_eq!(octant.weighted_points, vec![2]);

    // snapping back to 1 suppresses accumulated float drift
    graph.set_point_weight_scale(2, 1.0).unwrap();
    let octant = &graph.octants[graph.octant_ids[&1]];
    assert_eq!(octant.weight_scale, 1.0);
    assert!(octant.weighted_points.is_empty());
}

#[test]
fn octant_construction_with_weighted_members() {
    let mut graph = NavGraph::new();
    graph.add_point(0, Vec3::ZERO, 1.0, 0).unwrap();
    graph.add_point(1, Vec3::ZERO, 3.0, 0).unwrap();
    graph.add_octant(4, &[0, 1], Vec3::ZERO, 0).unwrap();

    let octant = &graph.octants[graph.octant_ids[&4]];
    assert_eq!(octant.weight_scale, 2.0); // 1 + (3 - 1) / 2
    assert_eq!(graph.debug_octant(4).unwrap(), vec![0, 0, 1]);
}

#[test]
fn octant_rejects_missing_point() {
    let mut graph = graph_with_points(2);
    assert_eq!(
        graph.add_octant(1, &[0, 1, 9], Vec3::ZERO, 0),
        Err(NavError::OctantMissingPoint { octant: 1, point: 9 })
    );
    // the partially built octant is removed to preserve invariants
    assert!(graph.get_octant_ids().is_empty());
    assert_eq!(graph.get_point_octant_id(0).unwrap(), None);
}

#[test]
fn octant_rejects_overlap() {
    let mut graph = graph_with_points(3);
    graph.add_octant(1, &[0], Vec3::ZERO, 0).unwrap();
    assert_eq!(
        graph.add_octant(2, &[1, 0], Vec3::ZERO, 1),
        Err(NavError::OctantOverlap { octant: 2, point: 0 })
    );
    assert_eq!(graph.get_octant_ids(), vec![1]);
    // the overlapped octant keeps its member
    assert_eq!(graph.get_point_octant_id(0).unwrap(), Some(1));
    assert_eq!(graph.get_point_octant_id(1).unwrap(), None);
}

#[test]
fn octant_rejects_missing_center() {
    let mut graph = graph_with_points(2);
    assert_eq!(
        graph.add_octant(1, &[0, 1], Vec3::ZERO, 5),
        Err(NavError::OctantMissingCenter { octant: 1, center: 5 })
    );
    assert!(graph.get_octant_ids().is_empty());
}

#[test]
fn octant_rejects_empty_member_list() {
    let mut graph = NavGraph::new();
    assert_eq!(
        graph.add_octant(1, &[], Vec3::ZERO, 0),
        Err(NavError::EmptyOctant(1))
    );
}

#[test]
fn octant_replacement_detaches_old_members() {
    let mut graph = graph_with_points(4);
    graph.add_octant(1, &[0, 1], Vec3::ZERO, 0).unwrap();
    graph.add_octant(1, &[2, 3], Vec3::ZERO, 2).unwrap();

    assert_eq!(graph.get_point_octant_id(0).unwrap(), None);
    assert_eq!(graph.get_point_octant_id(1).unwrap(), None);
    assert_eq!(graph.get_point_octant_id(2).unwrap(), Some(1));
    assert_eq!(graph.get_point_octant_id(3).unwrap(), Some(1));
}

#[test]
fn octant_connectivity() {
    let mut graph = graph_with_points(4);
    graph.add_octant(1, &[0, 1], Vec3::ZERO, 0).unwrap();
    graph.add_octant(2, &[2, 3], Vec3::ZERO, 2).unwrap();

    graph.connect_octants(1, 2, false).unwrap();
    assert!(graph.are_octants_connected(1, 2, false));
    assert!(!graph.are_octants_connected(2, 1, false));
    assert!(graph.are_octants_connected(2, 1, true));

    graph.connect_octants(2, 1, false).unwrap();
    assert!(graph.are_octants_connected(2, 1, false));
}

#[test]
fn remove_octant_erases_octant_segments() {
    let mut graph = graph_with_points(4);
    graph.add_octant(1, &[0, 1], Vec3::ZERO, 0).unwrap();
    graph.add_octant(2, &[2, 3], Vec3::ZERO, 2).unwrap();
    graph.connect_octants(1, 2, true).unwrap();

    graph.remove_octant(1).unwrap();

    assert!(!graph.are_octants_connected(1, 2, true));
    assert_eq!(graph.get_octant_ids(), vec![2]);
    assert_eq!(graph.get_point_octant_id(0).unwrap(), None);
}

#[test]
fn closest_point_prefers_lowest_id_on_tie() {
    let mut graph = NavGraph::new();
    graph.add_point(4, v(1.0, 0.0, 0.0), 1.0, 0).unwrap();
    graph.add_point(2, v(-1.0, 0.0, 0.0), 1.0, 0).unwrap();
    graph.add_point(7, v(-1.0, 0.0, 0.0), 1.0, 0).unwrap();

    assert_eq!(graph.get_closest_point(Vec3::ZERO, false, 0), Some(2));
}

#[test]
fn closest_point_skips_disabled_unless_included() {
    let mut graph = NavGraph::new();
    graph.add_point(1, v(0.1, 0.0, 0.0), 1.0, 0).unwrap();
    graph.add_point(2, v(5.0, 0.0, 0.0), 1.0, 0).unwrap();
    graph.set_point_disabled(1, true).unwrap();

    assert_eq!(graph.get_closest_point(Vec3::ZERO, false, 0), Some(2));
    assert_eq!(graph.get_closest_point(Vec3::ZERO, true, 0), Some(1));
}

#[test]
fn closest_point_honors_layer_filter() {
    let mut graph = NavGraph::new();
    graph.add_point(1, v(0.1, 0.0, 0.0), 1.0, 0b01).unwrap();
    graph.add_point(2, v(5.0, 0.0, 0.0), 1.0, 0b10).unwrap();

    assert_eq!(graph.get_closest_point(Vec3::ZERO, false, 0b10), Some(2));
    assert_eq!(graph.get_closest_point(Vec3::ZERO, false, 0), Some(1));
    assert_eq!(graph.get_closest_point(Vec3::ZERO, false, 0b100), None);
}

#[test]
fn closest_position_in_segment_projects() {
    let mut graph = NavGraph::new();
    graph.add_point(1, v(0.0, 0.0, 0.0), 1.0, 0).unwrap();
    graph.add_point(2, v(4.0, 0.0, 0.0), 1.0, 0).unwrap();
    graph.connect_points(1, 2, true).unwrap();

    let p = graph.get_closest_position_in_segment(v(1.0, 3.0, 0.0));
    assert_eq!(p, v(1.0, 0.0, 0.0));
}

#[test]
fn closest_position_in_segment_needs_enabled_endpoints() {
    let mut graph = NavGraph::new();
    graph.add_point(1, v(0.0, 0.0, 0.0), 1.0, 0).unwrap();
    graph.add_point(2, v(4.0, 0.0, 0.0), 1.0, 0).unwrap();
    graph.add_point(3, v(0.0, 10.0, 0.0), 1.0, 0).unwrap();
    graph.add_point(4, v(4.0, 10.0, 0.0), 1.0, 0).unwrap();
    graph.connect_points(1, 2, true).unwrap();
    graph.connect_points(3, 4, true).unwrap();
    graph.set_point_disabled(2, true).unwrap();

    // the near segment is skipped because one endpoint is disabled
    let p = graph.get_closest_position_in_segment(v(2.0, 1.0, 0.0));
    assert_eq!(p, v(2.0, 10.0, 0.0));
}

#[test]
fn reserve_space_must_grow() {
    let mut graph = NavGraph::new();
    graph.reserve_space(8).unwrap();
    assert!(graph.get_point_capacity() >= 8);

    let current = graph.get_point_capacity();
    assert_eq!(
        graph.reserve_space(current),
        Err(NavError::CapacityTooSmall {
            current,
            requested: current,
        })
    );
    assert_eq!(
        graph.reserve_space(0),
        Err(NavError::CapacityTooSmall {
            current,
            requested: 0,
        })
    );
}

#[test]
fn clear_resets_everything() {
    let mut graph = graph_with_points(3);
    graph.connect_points(0, 1, true).unwrap();
    graph.add_octant(1, &[0, 1], Vec3::ZERO, 0).unwrap();
    graph.remove_point(2).unwrap();

    graph.clear();

    assert_eq!(graph.get_point_count(), 0);
    assert!(graph.get_point_ids().is_empty());
    assert!(graph.get_octant_ids().is_empty());
    assert_eq!(graph.get_available_point_id(), 0);
    assert!(!graph.are_points_connected(0, 1, true));
}

#[test]
fn bulk_append_builds_points_and_connections() {
    let mut graph = NavGraph::new();
    #[rustfmt::skip]
    let points = [
        1.0, 0.0, 0.0, 0.0, 1.0, 0.0,
        2.0, 1.0, 0.0, 0.0, 1.0, 0.0,
        3.0, 2.0, 0.0, 0.0, 2.0, 3.0,
    ];
    // one row per point: id, then up to two neighbors padded with -1
    let connections = [1i64, 2, -1, 2, 3, -1, 3, -1, -1];

    graph.append_as_bulk_array(&points, 2, &connections).unwrap();

    assert_eq!(graph.get_point_count(), 3);
    assert_eq!(graph.get_point_position(2).unwrap(), v(1.0, 0.0, 0.0));
    assert_eq!(graph.get_point_weight_scale(3).unwrap(), 2.0);
    assert_eq!(graph.get_point_layers_value(3).unwrap(), 3);
    assert!(graph.are_points_connected(1, 2, false));
    assert!(graph.are_points_connected(2, 1, false));
    assert!(graph.are_points_connected(2, 3, false));
    assert!(!graph.are_points_connected(1, 3, true));
}

#[test]
fn bulk_rejects_ragged_rows() {
    let mut graph = NavGraph::new();
    assert_eq!(
        graph.append_as_bulk_array(&[1.0, 2.0], 2, &[]),
        Err(NavError::BulkRowMismatch { len: 2, stride: 6 })
    );
    assert_eq!(
        graph.append_as_bulk_array(&[], 2, &[1, 2]),
        Err(NavError::BulkRowMismatch { len: 2, stride: 3 })
    );
}

#[test]
fn bulk_set_replaces_store() {
    let mut graph = graph_with_points(5);
    let points = [9.0, 0.0, 0.0, 0.0, 1.0, 0.0];
    graph.set_as_bulk_array(&points, 0, &[]).unwrap();

    assert_eq!(graph.get_point_ids(), vec![9]);
}
