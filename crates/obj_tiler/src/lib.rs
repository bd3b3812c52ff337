//! obj_tiler - spatial grid splitting for WaveFront-style meshes
//!
//! Takes a single large [`Model`] (separate position / normal / texcoord
//! streams, faces indexing into them, faces grouped into named geometries)
//! and partitions it into a regular `level³` grid of smaller models. Each
//! output tile is self-contained: its attribute buffers hold only what its
//! own faces reference, renumbered from 1 without gaps.
//!
//! # Pipeline
//!
//! ```text
//! Model ─► Aabb3 ─► Grid (level³ cells) ─► footprint per Geometry
//!                                             │ (centroid + distinct indices)
//!                                             ▼
//!                            first containing cell (or policy fallback)
//!                                             │
//!                                             ▼
//!                         CellTables (compaction) ─► Tile { model, ... }
//! ```
//!
//! Geometries are the unit of classification: a group is never cut in half,
//! it goes whole to the cell that contains its centroid.
//!
//! # Example
//!
//! ```ignore
//! use obj_tiler::{obj, split, SplitConfig};
//!
//! let model = obj::read_obj_file("city.obj")?;
//! let tiles = split(&model, &SplitConfig::new().with_level(4))?;
//!
//! // Tiles share the source's material list
//! for tile in &tiles {
//!     println!("{}: {} triangles", tile.name, tile.triangle_count());
//! }
//! ```

pub mod bounds;
pub mod error;
pub mod grid;
pub mod types;
pub mod validate;

// Split stages
pub mod assemble;
pub mod classify;
pub mod remap;
pub mod split;

// Text format collaborators (reader + writer)
pub mod obj;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used items
pub use bounds::Aabb3;
pub use error::{SplitError, SplitResult};
pub use grid::{Grid, GridCell};
pub use assemble::{SourceIndices, Tile, TileOrigin};
pub use split::{split, split_timed, SplitConfig, SplitReport, SplitStats, UnassignedPolicy};
pub use types::{AttributeKind, Face, FaceVertex, Geometry, Material, Model, Triangle};
