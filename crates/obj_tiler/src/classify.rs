//! Geometry classification: centroid + referenced index sets, then cell
//! lookup.
//!
//! The centroid is the mean of the geometry's *distinct* positions, so a
//! vertex shared by many triangles counts once. Index sets are `BTreeSet`s:
//! ascending iteration order feeds the compaction in [`crate::remap`] and is
//! what makes tile numbering deterministic.

use std::collections::BTreeSet;

use glam::DVec3;

use crate::error::{SplitError, SplitResult};
use crate::grid::{Grid, GridCell};
use crate::types::{AttributeKind, Geometry};

/// Everything the split needs to know about one geometry.
#[derive(Clone, Debug, PartialEq)]
pub struct GeometryFootprint {
  /// Mean of the distinct referenced positions.
  pub centroid: DVec3,
  /// Distinct position indices, ascending.
  pub positions: BTreeSet<u32>,
  /// Distinct normal indices (absent excluded), ascending.
  pub normals: BTreeSet<u32>,
  /// Distinct texcoord indices (absent excluded), ascending.
  pub texcoords: BTreeSet<u32>,
}

/// Where a centroid landed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Placement {
  /// First cell whose bounds contain the centroid.
  Contained(GridCell),
  /// No cell contains the centroid.
  Outside,
}

/// Scan a geometry once, collecting its footprint.
///
/// `geometry_index` is only used for error reporting.
///
/// # Errors
///
/// - [`SplitError::IndexOutOfRange`] if a position index is 0 or past the
///   end of `positions`.
/// - [`SplitError::DegenerateGeometry`] if the geometry has no triangles, in
///   which case the centroid would be 0 / 0.
pub fn footprint(
  geometry_index: usize,
  geometry: &Geometry,
  positions: &[DVec3],
) -> SplitResult<GeometryFootprint> {
  let mut position_set = BTreeSet::new();
  let mut normals = BTreeSet::new();
  let mut texcoords = BTreeSet::new();
  let mut sum = DVec3::ZERO;

  for triangle in geometry.triangles() {
    for vertex in &triangle.vertices {
      if position_set.insert(vertex.position) {
        let point = (vertex.position as usize)
          .checked_sub(1)
          .and_then(|offset| positions.get(offset))
          .ok_or(SplitError::IndexOutOfRange {
            geometry: geometry_index,
            kind: AttributeKind::Position,
            index: vertex.position,
            len: positions.len(),
          })?;
        sum += *point;
      }
      if let Some(normal) = vertex.normal {
        normals.insert(normal);
      }
      if let Some(texcoord) = vertex.texcoord {
        texcoords.insert(texcoord);
      }
    }
  }

  if position_set.is_empty() {
    return Err(SplitError::DegenerateGeometry {
      geometry: geometry_index,
      id: geometry.id.clone(),
    });
  }

  Ok(GeometryFootprint {
    centroid: sum / position_set.len() as f64,
    positions: position_set,
    normals,
    texcoords,
  })
}

/// Assign a centroid to the first grid cell that contains it.
pub fn classify(centroid: DVec3, grid: &Grid) -> Placement {
  match grid.locate(centroid) {
    Some(cell) => Placement::Contained(cell),
    None => Placement::Outside,
  }
}

#[cfg(test)]
#[path = "classify_test.rs"]
mod classify_test;
