//! WaveFront OBJ text collaborators.
//!
//! - [`reader`]: text → [`Model`](crate::Model). Groups, materials,
//!   polygon faces (fan-triangulated) and relative indices.
//! - [`writer`]: [`Model`](crate::Model) → text, one `g` / `s off` block per
//!   geometry.
//!
//! Material libraries (`.mtl`) are referenced by name only and never parsed.

pub mod reader;
pub mod writer;

use thiserror::Error;

pub use reader::{read_obj, read_obj_file, read_obj_str};
pub use writer::{to_obj_string, write_obj, write_obj_file};

/// OBJ I/O error type.
#[derive(Debug, Error)]
pub enum ObjError {
  /// IO error.
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  /// Malformed statement.
  #[error("line {line}: {message}")]
  Parse { line: usize, message: String },
}

/// Result type for OBJ I/O.
pub type ObjResult<T> = Result<T, ObjError>;
