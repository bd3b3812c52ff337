//! Tile assembly: turn one cell's geometries into a self-contained model.

use std::sync::Arc;

use tracing::debug;

use crate::classify::GeometryFootprint;
use crate::error::SplitResult;
use crate::grid::GridCell;
use crate::remap::CellTables;
use crate::types::{Geometry, Model};

/// A geometry routed to a cell, with the footprint computed for it.
#[derive(Clone, Debug)]
pub struct Member<'a> {
  pub geometry: &'a Geometry,
  pub footprint: GeometryFootprint,
}

/// Geometries assigned to one grid cell, in original model order.
#[derive(Clone, Debug)]
pub struct CellBucket<'a> {
  pub cell: GridCell,
  pub members: Vec<Member<'a>>,
}

impl<'a> CellBucket<'a> {
  pub fn new(cell: GridCell) -> Self {
    Self {
      cell,
      members: Vec::new(),
    }
  }

  pub fn push(&mut self, geometry: &'a Geometry, footprint: GeometryFootprint) {
    self.members.push(Member {
      geometry,
      footprint,
    });
  }

  pub fn is_empty(&self) -> bool {
    self.members.is_empty()
  }
}

/// Original 1-based ids backing each tile buffer entry.
///
/// `positions[i]` is the source position index copied into tile position
/// `i + 1`; same for normals and texcoords.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SourceIndices {
  pub positions: Vec<u32>,
  pub normals: Vec<u32>,
  pub texcoords: Vec<u32>,
}

/// Where a tile came from in the source model.
#[derive(Clone, Debug, PartialEq)]
pub struct TileOrigin {
  /// Grid cell the tile's geometries were classified into.
  pub cell: GridCell,
  /// Compaction order, for mapping tile data back to the source.
  pub source: SourceIndices,
}

/// One output model of a split.
#[derive(Clone, Debug, PartialEq)]
pub struct Tile {
  pub model: Model,
  /// `None` when the source was passed through unsplit (`level <= 1`).
  pub origin: Option<TileOrigin>,
}

/// Build the tile for a non-empty bucket.
///
/// The source model must already satisfy [`crate::validate::validate`]; every
/// index the footprints name is then in range.
pub fn assemble_cell(source: &Model, name: String, bucket: CellBucket<'_>) -> SplitResult<Tile> {
  let mut tables = CellTables::new();
  for member in &bucket.members {
    tables.append(&member.footprint);
  }

  let geometries = bucket
    .members
    .iter()
    .map(|member| tables.remap_geometry(member.geometry))
    .collect::<SplitResult<Vec<_>>>()?;

  let positions = gather(&source.positions, tables.positions.originals());
  let normals = gather(&source.normals, tables.normals.originals());
  let texcoords = gather(&source.texcoords, tables.texcoords.originals());

  debug!(
    tile = %name,
    cell = bucket.cell.index,
    geometries = geometries.len(),
    positions = positions.len(),
    normals = normals.len(),
    texcoords = texcoords.len(),
    "assembled tile"
  );

  let model = Model {
    name,
    material_file: source.material_file.clone(),
    positions,
    normals,
    texcoords,
    geometries,
    materials: Arc::clone(&source.materials),
  };

  Ok(Tile {
    model,
    origin: Some(TileOrigin {
      cell: bucket.cell,
      source: SourceIndices {
        positions: tables.positions.into_originals(),
        normals: tables.normals.into_originals(),
        texcoords: tables.texcoords.into_originals(),
      },
    }),
  })
}

/// Copy `buffer` entries at 1-based `originals`, in order.
fn gather<T: Copy>(buffer: &[T], originals: &[u32]) -> Vec<T> {
  originals
    .iter()
    .map(|&original| buffer[original as usize - 1])
    .collect()
}

#[cfg(test)]
#[path = "assemble_test.rs"]
mod assemble_test;
