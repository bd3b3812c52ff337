//! Structural checks on a [`Model`].
//!
//! [`validate`] is what a split requires of its input: every index in range,
//! every coordinate finite. [`validate_compact`] additionally requires that
//! every buffer entry is used, which holds for every tile a split produces.

use crate::error::{SplitError, SplitResult};
use crate::types::{AttributeKind, Model};

/// Check that every face index is in range and every coordinate is finite.
pub fn validate(model: &Model) -> SplitResult<()> {
  check_indices(model, |_, _| {})?;
  check_finite(model)
}

/// [`validate`], plus: no buffer entry goes unreferenced.
pub fn validate_compact(model: &Model) -> SplitResult<()> {
  let mut used_positions = vec![false; model.positions.len()];
  let mut used_normals = vec![false; model.normals.len()];
  let mut used_texcoords = vec![false; model.texcoords.len()];

  check_indices(model, |kind, index| {
    let used = match kind {
      AttributeKind::Position => &mut used_positions,
      AttributeKind::Normal => &mut used_normals,
      AttributeKind::Texcoord => &mut used_texcoords,
    };
    used[index as usize - 1] = true;
  })?;
  check_finite(model)?;

  for (kind, used) in [
    (AttributeKind::Position, &used_positions),
    (AttributeKind::Normal, &used_normals),
    (AttributeKind::Texcoord, &used_texcoords),
  ] {
    if let Some(offset) = used.iter().position(|&u| !u) {
      return Err(SplitError::UnusedAttribute {
        kind,
        index: offset as u32 + 1,
      });
    }
  }
  Ok(())
}

/// Walk every face index, calling `visit` for each one that is in range.
fn check_indices(model: &Model, mut visit: impl FnMut(AttributeKind, u32)) -> SplitResult<()> {
  for (geometry_index, geometry) in model.geometries.iter().enumerate() {
    for triangle in geometry.triangles() {
      for vertex in &triangle.vertices {
        let slots = [
          (AttributeKind::Position, Some(vertex.position)),
          (AttributeKind::Normal, vertex.normal),
          (AttributeKind::Texcoord, vertex.texcoord),
        ];
        for (kind, index) in slots {
          let Some(index) = index else { continue };
          let len = model.attribute_len(kind);
          if index == 0 || index as usize > len {
            return Err(SplitError::IndexOutOfRange {
              geometry: geometry_index,
              kind,
              index,
              len,
            });
          }
          visit(kind, index);
        }
      }
    }
  }
  Ok(())
}

fn check_finite(model: &Model) -> SplitResult<()> {
  let non_finite = |kind: AttributeKind, offset: usize| SplitError::NonFiniteCoordinate {
    kind,
    index: offset as u32 + 1,
  };

  if let Some(offset) = model.positions.iter().position(|p| !p.is_finite()) {
    return Err(non_finite(AttributeKind::Position, offset));
  }
  if let Some(offset) = model.normals.iter().position(|n| !n.is_finite()) {
    return Err(non_finite(AttributeKind::Normal, offset));
  }
  if let Some(offset) = model.texcoords.iter().position(|t| !t.is_finite()) {
    return Err(non_finite(AttributeKind::Texcoord, offset));
  }
  Ok(())
}

#[cfg(test)]
#[path = "validate_test.rs"]
mod validate_test;
