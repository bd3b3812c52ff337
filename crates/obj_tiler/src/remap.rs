//! Per-cell index compaction.
//!
//! Each destination cell owns a [`CellTables`]: one [`IndexTable`] per
//! attribute stream. Geometries are appended in their original order and
//! each appends its ascending distinct index sets, so the geometry that
//! reaches a cell first claims the lowest new indices.
//!
//! ```text
//! cell tables (positions)        geometry A {2, 7, 9}    geometry B {7, 11}
//!   order:  []              ──►  [2, 7, 9]          ──►  [2, 7, 9, 11]
//!   new:                          1  2  3                 1  2  3  4
//! ```

use std::collections::HashMap;

use crate::classify::GeometryFootprint;
use crate::error::{SplitError, SplitResult};
use crate::types::{AttributeKind, Face, FaceVertex, Geometry, Triangle};

/// Insertion-ordered mapping from original 1-based ids to compact 1-based
/// ids.
///
/// `order[i]` is the original id that received new index `i + 1`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IndexTable {
  order: Vec<u32>,
  lookup: HashMap<u32, u32>,
}

impl IndexTable {
  pub fn new() -> Self {
    Self::default()
  }

  /// New index for `original`, assigning the next one if unseen.
  pub fn claim(&mut self, original: u32) -> u32 {
    if let Some(&index) = self.lookup.get(&original) {
      return index;
    }
    self.order.push(original);
    let index = self.order.len() as u32;
    self.lookup.insert(original, index);
    index
  }

  /// Claim every id in iteration order.
  pub fn claim_all(&mut self, originals: impl IntoIterator<Item = u32>) {
    for original in originals {
      self.claim(original);
    }
  }

  /// New index for `original`, if it was claimed.
  #[inline]
  pub fn get(&self, original: u32) -> Option<u32> {
    self.lookup.get(&original).copied()
  }

  /// Original ids in new-index order.
  pub fn originals(&self) -> &[u32] {
    &self.order
  }

  pub fn into_originals(self) -> Vec<u32> {
    self.order
  }

  pub fn len(&self) -> usize {
    self.order.len()
  }

  pub fn is_empty(&self) -> bool {
    self.order.is_empty()
  }
}

/// Compaction state for one destination cell.
#[derive(Clone, Debug, Default)]
pub struct CellTables {
  pub positions: IndexTable,
  pub normals: IndexTable,
  pub texcoords: IndexTable,
}

impl CellTables {
  pub fn new() -> Self {
    Self::default()
  }

  /// Register a geometry's referenced indices with this cell.
  pub fn append(&mut self, footprint: &GeometryFootprint) {
    self.positions.claim_all(footprint.positions.iter().copied());
    self.normals.claim_all(footprint.normals.iter().copied());
    self.texcoords.claim_all(footprint.texcoords.iter().copied());
  }

  pub fn table(&self, kind: AttributeKind) -> &IndexTable {
    match kind {
      AttributeKind::Position => &self.positions,
      AttributeKind::Normal => &self.normals,
      AttributeKind::Texcoord => &self.texcoords,
    }
  }

  /// Rewrite a whole geometry into this cell's index space.
  pub fn remap_geometry(&self, geometry: &Geometry) -> SplitResult<Geometry> {
    let faces = geometry
      .faces
      .iter()
      .map(|face| {
        let triangles = face
          .triangles
          .iter()
          .map(|triangle| {
            let [a, b, c] = triangle.vertices;
            Ok(Triangle::new(
              self.remap_vertex(a)?,
              self.remap_vertex(b)?,
              self.remap_vertex(c)?,
            ))
          })
          .collect::<SplitResult<Vec<_>>>()?;
        Ok(Face {
          material: face.material.clone(),
          triangles,
        })
      })
      .collect::<SplitResult<Vec<_>>>()?;

    Ok(Geometry {
      id: geometry.id.clone(),
      faces,
    })
  }

  #[inline]
  pub fn remap_vertex(&self, vertex: FaceVertex) -> SplitResult<FaceVertex> {
    remap_vertex(vertex, &self.positions, &self.normals, &self.texcoords)
  }
}

/// Rewrite one corner through the cell's tables.
///
/// Present indices are substituted; absent normals / UVs stay absent.
pub fn remap_vertex(
  vertex: FaceVertex,
  positions: &IndexTable,
  normals: &IndexTable,
  texcoords: &IndexTable,
) -> SplitResult<FaceVertex> {
  let lookup = |table: &IndexTable, kind: AttributeKind, index: u32| {
    table
      .get(index)
      .ok_or(SplitError::UnmappedIndex { kind, index })
  };

  Ok(FaceVertex {
    position: lookup(positions, AttributeKind::Position, vertex.position)?,
    texcoord: vertex
      .texcoord
      .map(|t| lookup(texcoords, AttributeKind::Texcoord, t))
      .transpose()?,
    normal: vertex
      .normal
      .map(|n| lookup(normals, AttributeKind::Normal, n))
      .transpose()?,
  })
}

#[cfg(test)]
#[path = "remap_test.rs"]
mod remap_test;
