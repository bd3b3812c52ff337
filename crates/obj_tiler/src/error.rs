//! Split error types.

use glam::DVec3;
use thiserror::Error;

use crate::types::AttributeKind;

/// Split error type.
#[derive(Debug, Error, PartialEq)]
pub enum SplitError {
  /// Model has no positions, so there is no bounding box to subdivide.
  #[error("model has no vertex positions")]
  EmptyModel,

  /// `level³` grid cells cannot be counted in a `usize`.
  #[error("grid level {level} is too large")]
  LevelTooLarge { level: u32 },

  /// A coordinate is NaN or infinite.
  #[error("non-finite {kind} coordinate at index {index}")]
  NonFiniteCoordinate { kind: AttributeKind, index: u32 },

  /// A face references an attribute outside of its buffer.
  #[error("geometry {geometry}: {kind} index {index} out of range (buffer holds {len})")]
  IndexOutOfRange {
    geometry: usize,
    kind: AttributeKind,
    index: u32,
    len: usize,
  },

  /// A buffer entry no face references (compact models only).
  #[error("{kind} {index} is not referenced by any face")]
  UnusedAttribute { kind: AttributeKind, index: u32 },

  /// Geometry references no positions, its centroid is undefined.
  #[error("geometry {geometry} ({id:?}) has no triangles")]
  DegenerateGeometry { geometry: usize, id: String },

  /// Centroid lies in no grid cell and the policy forbids fallback.
  #[error("geometry {geometry} ({id:?}) centroid {centroid} lies outside every grid cell")]
  Unassignable {
    geometry: usize,
    id: String,
    centroid: DVec3,
  },

  /// A face index was never registered in its cell's compaction table.
  #[error("{kind} index {index} missing from cell compaction table")]
  UnmappedIndex { kind: AttributeKind, index: u32 },
}

/// Result type for split operations.
pub type SplitResult<T> = Result<T, SplitError>;
