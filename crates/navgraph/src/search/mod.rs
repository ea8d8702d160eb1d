//! Flat and hierarchical A* solvers and the path query surface.
//!
//! # Pass counters
//!
//! Transient search state (scores, back-pointers, open/closed marks) lives
//! inside the graph's own point and octant records, disambiguated by
//! monotonically increasing pass counters: a mark is only meaningful while it
//! equals the current pass, so starting a new solve is a counter increment
//! rather than a sweep over the graph.
//!
//! # Hierarchy
//!
//! The hierarchical solver runs A* over octants and proves each octant hop
//! with a nested point-level search (`can_path`) bounded to the two octants
//! involved, or with a client-supplied straight-line shortcut. It trades
//! global optimality for locality and speed: routes are optimal within each
//! hop, not across the whole hierarchy.

mod flat;
mod heap;
mod helpers;
mod octants;
mod path;
mod straight;


pub use straight::StraightLine;
