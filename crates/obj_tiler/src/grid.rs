//! Regular `level³` subdivision of a bounding box.
//!
//! Cells are ordered x-major, z-minor:
//!
//! ```text
//! index = (ix * level + iy) * level + iz
//! ```
//!
//! Containment is inclusive on both bounds, so neighbouring cells share their
//! common face. [`Grid::locate`] returns the first cell in index order that
//! contains the point, which hands boundary points to the lower-indexed cell.
//!
//! Only the slice edges are stored (`level + 1` per axis); cells are built on
//! demand. Because containment is a per-axis test and index order is
//! lexicographic in `(ix, iy, iz)`, the first containing cell is the lowest
//! containing slice on each axis.

use glam::DVec3;

use crate::bounds::Aabb3;
use crate::error::{SplitError, SplitResult};

/// One axis-aligned cell of the grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridCell {
  /// Linear index in grid order.
  pub index: usize,
  pub bounds: Aabb3,
}

impl GridCell {
  /// Cell center point.
  #[inline]
  pub fn center(&self) -> DVec3 {
    self.bounds.center()
  }

  #[inline]
  pub fn contains_point(&self, point: DVec3) -> bool {
    self.bounds.contains_point(point)
  }
}

/// Ordered grid cells covering a bounding box.
#[derive(Clone, Debug)]
pub struct Grid {
  level: u32,
  bounds: Aabb3,
  /// Slice edges per axis, ascending, `level + 1` each.
  edges: [Vec<f64>; 3],
  len: usize,
}

impl Grid {
  /// Divide `bounds` into `level` equal slices per axis.
  ///
  /// `level` 0 is treated as 1. The last slice on each axis ends exactly at
  /// `bounds.max` so the whole box stays covered despite rounding.
  ///
  /// # Errors
  ///
  /// - [`SplitError::EmptyModel`] if `bounds` is empty.
  /// - [`SplitError::LevelTooLarge`] if `level³` does not fit in `usize`.
  pub fn subdivide(bounds: Aabb3, level: u32) -> SplitResult<Self> {
    if bounds.is_empty() {
      return Err(SplitError::EmptyModel);
    }
    let level = level.max(1);
    let n = level as usize;
    let len = n.checked_pow(3).ok_or(SplitError::LevelTooLarge { level })?;

    let edges = |axis: usize| -> Vec<f64> {
      let min = bounds.min[axis];
      let max = bounds.max[axis];
      let extent = max - min;
      (0..=n)
        .map(|i| {
          if i == n {
            max
          } else {
            min + extent * (i as f64 / n as f64)
          }
        })
        .collect()
    };

    Ok(Self {
      level,
      bounds,
      edges: [edges(0), edges(1), edges(2)],
      len,
    })
  }

  /// Cells per axis.
  pub fn level(&self) -> u32 {
    self.level
  }

  /// Box that was subdivided.
  pub fn bounds(&self) -> Aabb3 {
    self.bounds
  }

  /// Number of cells, `level³`.
  pub fn len(&self) -> usize {
    self.len
  }

  pub fn is_empty(&self) -> bool {
    self.len == 0
  }

  /// Cell at a linear index.
  pub fn cell(&self, index: usize) -> Option<GridCell> {
    if index >= self.len {
      return None;
    }
    let n = self.level as usize;
    Some(self.cell_at([index / (n * n), (index / n) % n, index % n]))
  }

  /// First cell (in index order) containing `point`.
  pub fn locate(&self, point: DVec3) -> Option<GridCell> {
    let ix = slice_containing(&self.edges[0], point.x)?;
    let iy = slice_containing(&self.edges[1], point.y)?;
    let iz = slice_containing(&self.edges[2], point.z)?;
    Some(self.cell_at([ix, iy, iz]))
  }

  /// Cell whose center is closest to `point`, ties go to the lower index.
  pub fn nearest(&self, point: DVec3) -> GridCell {
    self.cell_at([
      nearest_slice(&self.edges[0], point.x),
      nearest_slice(&self.edges[1], point.y),
      nearest_slice(&self.edges[2], point.z),
    ])
  }

  #[inline]
  fn cell_index(&self, ix: usize, iy: usize, iz: usize) -> usize {
    let n = self.level as usize;
    (ix * n + iy) * n + iz
  }

  /// Callers guarantee every coordinate is below `level`.
  fn cell_at(&self, [ix, iy, iz]: [usize; 3]) -> GridCell {
    let [xs, ys, zs] = &self.edges;
    GridCell {
      index: self.cell_index(ix, iy, iz),
      bounds: Aabb3::new(
        DVec3::new(xs[ix], ys[iy], zs[iz]),
        DVec3::new(xs[ix + 1], ys[iy + 1], zs[iz + 1]),
      ),
    }
  }
}

/// Lowest slice `i` with `edges[i] <= value <= edges[i + 1]`.
fn slice_containing(edges: &[f64], value: f64) -> Option<usize> {
  let (&first, &last) = (edges.first()?, edges.last()?);
  if !(first <= value && value <= last) {
    return None;
  }
  // First edge not below `value`; the slice ending there contains it
  let above = edges.partition_point(|&edge| edge < value);
  Some(above.saturating_sub(1))
}

/// Slice whose center is closest to `value`, ties go to the lower slice.
fn nearest_slice(edges: &[f64], value: f64) -> usize {
  let mut best = (0, f64::INFINITY);
  for (i, pair) in edges.windows(2).enumerate() {
    let distance = ((pair[0] + pair[1]) * 0.5 - value).abs();
    if distance < best.1 {
      best = (i, distance);
    }
  }
  best.0
}

#[cfg(test)]
#[path = "grid_test.rs"]
mod grid_test;
