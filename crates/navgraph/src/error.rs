//! Error types for graph mutations and path queries.
//!
//! Precondition violations abort the operation before any state change; the
//! offending value is carried in the error. Search failure is *not* an error
//! (the path queries return an empty path instead), so none of these variants
//! is produced by the solvers themselves.

use thiserror::Error;

/// Result type alias for graph operations.
pub type NavResult<T> = Result<T, NavError>;

/// Error type for all fallible graph operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NavError {
    /// Ids must be non-negative.
    #[error("invalid id: {0} (ids must be non-negative)")]
    NegativeId(i64),

    /// Point not found in the store.
    #[error("point with id {0} doesn't exist")]
    PointNotFound(i64),

    /// Octant not found in the store.
    #[error("octant with id {0} doesn't exist")]
    OctantNotFound(i64),

    /// Hierarchical queries require both endpoints to belong to an octant.
    #[error("point with id {0} isn't attached to an octant")]
    PointNotInOctant(i64),

    /// Weight scales multiply edge costs and must stay non-negative.
    #[error("invalid weight scale {0} (must be at least 0.0)")]
    InvalidWeightScale(f32),

    /// Layers values use bits 0..31 and must be less than 2^31 - 1.
    #[error("invalid layers value {0} (must be less than 2^31 - 1)")]
    InvalidLayersValue(i64),

    /// Layer indices address a single bit and must be less than 31.
    #[error("invalid layer index {0} (must be less than 31)")]
    InvalidLayerIndex(u32),

    /// Self-loops are rejected on connect.
    #[error("can't connect id {0} to itself")]
    SelfConnection(i64),

    /// An octant must own at least one point.
    #[error("octant {0} has no member points")]
    EmptyOctant(i64),

    /// An octant referenced a point that does not exist; the octant was removed.
    #[error("octant {octant} references point {point}, which doesn't exist; octant removed")]
    OctantMissingPoint { octant: i64, point: i64 },

    /// An octant claimed a point already owned by another octant; the octant
    /// was removed.
    #[error("octant {octant} overlaps another octant at point {point}; octant removed")]
    OctantOverlap { octant: i64, point: i64 },

    /// An octant's member list did not contain its center point; the octant
    /// was removed.
    #[error("octant {octant} doesn't contain its center point {center}; octant removed")]
    OctantMissingCenter { octant: i64, center: i64 },

    /// `reserve_space` only grows the point store.
    #[error("new capacity {requested} must exceed current capacity {current}")]
    CapacityTooSmall { current: usize, requested: usize },

    /// A bulk array's length was not a whole number of rows.
    #[error("bulk data length {len} is not a multiple of the row width {stride}")]
    BulkRowMismatch { len: usize, stride: usize },

    /// Straight-line registration probes the hook with point ids 0 and 1.
    #[error("straight-line probe requires points with ids 0 and 1 to exist")]
    StraightLineProbe,
}

// Compile-time verification that NavError is thread-safe.
static_assertions::assert_impl_all!(NavError: Send, Sync, std::error::Error);
