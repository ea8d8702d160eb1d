#![deny(deprecated)]

//! A* pathfinding over waypoint graphs in 3D space, with an optional
//! two-level hierarchical search across coarse "octant" regions.
//!
//! Clients register points with stable integer ids, connect them with
//! directed or bidirectional segments, optionally partition them into octants
//! with their own connectivity, then query shortest paths. Points carry
//! weight scales (multiplying incoming edge costs), 31-bit layer masks for
//! channel filtering, and an enabled flag.
//!
//! # Architecture
//!
//! - **error**: typed errors for every fallible operation
//! - **cost**: overridable cost hooks, defaulting to Euclidean distance
//! - **graph**: the mutable store of points, octants, and segments
//! - **search**: flat A*, hierarchical octant A*, and path reconstruction
//!
//! # Example
//!
//! ```
//! use glam::Vec3;
//! use navgraph::NavGraph;
//!
//! let mut graph = NavGraph::new();
//! graph.add_point(1, Vec3::new(0.0, 0.0, 0.0), 1.0, 0).unwrap();
//! graph.add_point(2, Vec3::new(1.0, 1.0, 0.0), 1.0, 0).unwrap();
//! graph.add_point(3, Vec3::new(2.0, 0.0, 0.0), 1.0, 0).unwrap();
//! graph.connect_points(1, 2, true).unwrap();
//! graph.connect_points(2, 3, true).unwrap();
//!
//! let path = graph.get_id_path(1, 3, 0, false).unwrap();
//! assert_eq!(path, vec![1, 2, 3]);
//! ```
//!
//! When a route cannot be completed, the queries return an empty path and
//! keep the best-effort path to the closest reachable point available through
//! [`NavGraph::get_proximity_id_path_of_last_pathing_call`].

pub mod cost;
pub mod error;
mod geometry;
pub mod graph;
pub mod search;

pub use cost::{CostModel, CostPoint, EuclideanCost};
pub use error::{NavError, NavResult};
pub use graph::{Direction, NavGraph, OctantId, PointId};
pub use search::StraightLine;
