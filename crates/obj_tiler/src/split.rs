//! Split orchestrator.
//!
//! Runs bounds → grid → footprints → classification → per-cell assembly.
//! Footprints (per geometry) and assembly (per cell) fan out over rayon;
//! results are collected in input order, so output does not depend on the
//! thread count.
//!
//! ```text
//! ┌────────┐   ┌──────┐   ┌────────────┐   ┌──────────┐   ┌──────────┐
//! │ Bounds ├──►│ Grid ├──►│ Footprints ├──►│ Classify ├──►│ Assemble │
//! └────────┘   └──────┘   └────────────┘   └──────────┘   └──────────┘
//!    Aabb3     level³ cells  (parallel)     bucket/cell     (parallel)
//! ```
//!
//! # Usage
//!
//! ```ignore
//! let config = SplitConfig::new()
//!   .with_level(4)
//!   .with_unassigned(UnassignedPolicy::Error);
//!
//! let report = split_timed(&model, &config)?;
//! println!("{} tiles in {}us", report.tiles.len(), report.stats.total_us);
//! ```

use std::collections::BTreeMap;

use rayon::prelude::*;
use tracing::{debug, info_span, warn};
use web_time::Instant;

use crate::assemble::{assemble_cell, CellBucket, Tile};
use crate::classify::{classify, footprint, Placement};
use crate::error::{SplitError, SplitResult};
use crate::grid::Grid;
use crate::types::Model;
use crate::validate::validate;

/// What to do with a geometry whose centroid lies in no grid cell.
///
/// The model bounds contain every centroid, so this only triggers through
/// floating-point rounding at the outer faces of the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UnassignedPolicy {
  /// Assign to the cell with the nearest center.
  #[default]
  Nearest,
  /// Fail the split with [`SplitError::Unassignable`].
  Error,
  /// Leave the geometry out of every tile. Logged and counted.
  Drop,
}

/// Configuration for a split.
#[derive(Clone, Debug, PartialEq)]
pub struct SplitConfig {
  /// Cells per axis. `level <= 1` returns the source model unsplit.
  pub level: u32,

  /// Fallback for centroids outside every cell.
  pub unassigned: UnassignedPolicy,

  /// Skip geometries with no triangles instead of failing.
  pub skip_empty_geometries: bool,
}

impl Default for SplitConfig {
  fn default() -> Self {
    Self {
      level: 2,
      unassigned: UnassignedPolicy::default(),
      skip_empty_geometries: false,
    }
  }
}

impl SplitConfig {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_level(mut self, level: u32) -> Self {
    self.level = level;
    self
  }

  pub fn with_unassigned(mut self, policy: UnassignedPolicy) -> Self {
    self.unassigned = policy;
    self
  }

  pub fn with_skip_empty_geometries(mut self, skip: bool) -> Self {
    self.skip_empty_geometries = skip;
    self
  }
}

/// Statistics from a split.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SplitStats {
  /// Grid cells (`level³`), 1 for an unsplit pass-through.
  pub cell_count: usize,
  /// Cells that produced a tile.
  pub occupied_cells: usize,
  /// Geometries that ended up in a tile.
  pub assigned_geometries: usize,
  /// Of those, geometries placed by the nearest-cell fallback.
  pub nearest_geometries: usize,
  /// Geometries discarded under [`UnassignedPolicy::Drop`].
  pub dropped_geometries: usize,
  /// Empty geometries skipped under `skip_empty_geometries`.
  pub skipped_geometries: usize,
  /// Triangles in the source model.
  pub input_triangles: usize,
  /// Triangles across all tiles.
  pub output_triangles: usize,
  /// Total processing time in microseconds.
  pub total_us: u64,
}

/// Tiles plus statistics.
#[derive(Debug, Clone)]
pub struct SplitReport {
  pub tiles: Vec<Tile>,
  pub stats: SplitStats,
}

/// Split `model` into a grid of self-contained sub-models.
///
/// Returns the non-empty tiles in ascending cell order, named
/// `{model.name}_0`, `{model.name}_1`, … For `level <= 1` the result is a
/// single clone of `model`.
pub fn split(model: &Model, config: &SplitConfig) -> SplitResult<Vec<Model>> {
  let report = split_timed(model, config)?;
  Ok(report.tiles.into_iter().map(|tile| tile.model).collect())
}

/// Split with tile origins and timing information.
///
/// Same as [`split`] but keeps each tile's grid cell and compaction order,
/// and returns [`SplitStats`].
pub fn split_timed(model: &Model, config: &SplitConfig) -> SplitResult<SplitReport> {
  let start = Instant::now();
  let input_triangles = model.triangle_count();

  if config.level <= 1 {
    debug!(model = %model.name, "level <= 1, passing model through unsplit");
    let stats = SplitStats {
      cell_count: 1,
      occupied_cells: 1,
      assigned_geometries: model.geometries.len(),
      input_triangles,
      output_triangles: input_triangles,
      total_us: start.elapsed().as_micros() as u64,
      ..Default::default()
    };
    return Ok(SplitReport {
      tiles: vec![Tile {
        model: model.clone(),
        origin: None,
      }],
      stats,
    });
  }

  if model.positions.is_empty() {
    return Err(SplitError::EmptyModel);
  }
  validate(model)?;

  let grid = Grid::subdivide(model.bounding_box(), config.level)?;
  let mut stats = SplitStats {
    cell_count: grid.len(),
    input_triangles,
    ..Default::default()
  };

  let footprints = {
    let _span = info_span!("footprints").entered();
    model
      .geometries
      .par_iter()
      .enumerate()
      .map(|(index, geometry)| footprint(index, geometry, &model.positions))
      .collect::<Vec<_>>()
  };

  // Only occupied cells get a bucket; keyed by cell index so iteration is in
  // grid order
  let mut buckets: BTreeMap<usize, CellBucket<'_>> = BTreeMap::new();
  {
    let _span = info_span!("classify").entered();
    for (index, (geometry, footprint)) in model.geometries.iter().zip(footprints).enumerate() {
      let footprint = match footprint {
        Ok(footprint) => footprint,
        Err(SplitError::DegenerateGeometry { .. }) if config.skip_empty_geometries => {
          warn!(geometry = index, id = %geometry.id, "skipping geometry without triangles");
          stats.skipped_geometries += 1;
          continue;
        }
        Err(err) => return Err(err),
      };

      let cell = match classify(footprint.centroid, &grid) {
        Placement::Contained(cell) => cell,
        Placement::Outside => match config.unassigned {
          UnassignedPolicy::Nearest => {
            let cell = grid.nearest(footprint.centroid);
            debug!(
              geometry = index,
              id = %geometry.id,
              cell = cell.index,
              "centroid outside grid, using nearest cell"
            );
            stats.nearest_geometries += 1;
            cell
          }
          UnassignedPolicy::Error => {
            return Err(SplitError::Unassignable {
              geometry: index,
              id: geometry.id.clone(),
              centroid: footprint.centroid,
            });
          }
          UnassignedPolicy::Drop => {
            warn!(
              geometry = index,
              id = %geometry.id,
              triangles = geometry.triangle_count(),
              "centroid outside grid, dropping geometry"
            );
            stats.dropped_geometries += 1;
            continue;
          }
        },
      };

      buckets
        .entry(cell.index)
        .or_insert_with(|| CellBucket::new(cell))
        .push(geometry, footprint);
      stats.assigned_geometries += 1;
    }
  }

  let occupied: Vec<CellBucket<'_>> = buckets.into_values().collect();

  let tiles = {
    let _span = info_span!("assemble").entered();
    occupied
      .into_par_iter()
      .enumerate()
      .map(|(n, bucket)| assemble_cell(model, format!("{}_{}", model.name, n), bucket))
      .collect::<SplitResult<Vec<_>>>()?
  };

  stats.occupied_cells = tiles.len();
  stats.output_triangles = tiles.iter().map(|tile| tile.model.triangle_count()).sum();
  stats.total_us = start.elapsed().as_micros() as u64;

  debug!(
    model = %model.name,
    level = config.level,
    tiles = stats.occupied_cells,
    dropped = stats.dropped_geometries,
    skipped = stats.skipped_geometries,
    total_us = stats.total_us,
    "split complete"
  );
  if stats.dropped_geometries > 0 {
    warn!(
      dropped = stats.dropped_geometries,
      lost_triangles = stats.input_triangles - stats.output_triangles,
      "split dropped geometries outside the grid"
    );
  }

  Ok(SplitReport { tiles, stats })
}

impl Model {
  /// Shorthand for [`split`] with default policies.
  pub fn split(&self, level: u32) -> SplitResult<Vec<Model>> {
    split(self, &SplitConfig::new().with_level(level))
  }
}

#[cfg(test)]
#[path = "split_test.rs"]
mod split_test;
