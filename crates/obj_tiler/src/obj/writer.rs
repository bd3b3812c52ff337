//! WaveFront OBJ writer.
//!
//! Output layout:
//!
//! ```text
//! # <name>: <n> geometries, <n> triangles
//! mtllib <file>          (when set)
//! v  x y z               (positions)
//! vt u v                 (texcoords)
//! vn x y z               (normals)
//! g <id>                 (per geometry, `default` when the id is empty)
//! s off
//! usemtl <material>      (when the face material changes)
//! f p/t/n p/t/n p/t/n
//! ```
//!
//! Coordinates use Rust's shortest round-trip float formatting, so reading
//! the output back yields bit-identical buffers.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use super::reader::DEFAULT_GROUP;
use super::{ObjError, ObjResult};
use crate::types::{FaceVertex, Model};

/// Write `model` as OBJ text.
pub fn write_obj<W: Write>(model: &Model, writer: W) -> ObjResult<()> {
  let mut out = BufWriter::new(writer);

  writeln!(
    out,
    "# {}: {} geometries, {} triangles",
    model.name,
    model.geometries.len(),
    model.triangle_count()
  )?;
  if let Some(file) = &model.material_file {
    writeln!(out, "mtllib {file}")?;
  }

  for p in &model.positions {
    writeln!(out, "v {} {} {}", p.x, p.y, p.z)?;
  }
  for t in &model.texcoords {
    writeln!(out, "vt {} {}", t.x, t.y)?;
  }
  for n in &model.normals {
    writeln!(out, "vn {} {} {}", n.x, n.y, n.z)?;
  }

  // Material state carries across groups, so only changes are emitted
  let mut material = "";
  for geometry in &model.geometries {
    // Empty ids are written as the group the reader assigns to bare `g`
    let id = if geometry.id.is_empty() {
      DEFAULT_GROUP
    } else {
      geometry.id.as_str()
    };
    writeln!(out, "g {id}")?;
    writeln!(out, "s off")?;
    for face in &geometry.faces {
      if face.material != material {
        material = face.material.as_str();
        if material.is_empty() {
          writeln!(out, "usemtl")?;
        } else {
          writeln!(out, "usemtl {material}")?;
        }
      }
      for triangle in &face.triangles {
        let [a, b, c] = triangle.vertices;
        writeln!(out, "f {} {} {}", corner(a), corner(b), corner(c))?;
      }
    }
  }

  out.flush()?;
  Ok(())
}

/// Write `model` to `path`, creating or truncating the file.
pub fn write_obj_file(model: &Model, path: impl AsRef<Path>) -> ObjResult<()> {
  let file = File::create(path)?;
  write_obj(model, file)
}

/// Render `model` to an in-memory string.
pub fn to_obj_string(model: &Model) -> ObjResult<String> {
  let mut bytes = Vec::new();
  write_obj(model, &mut bytes)?;
  String::from_utf8(bytes)
    .map_err(|err| ObjError::Io(io::Error::new(io::ErrorKind::InvalidData, err)))
}

/// `p`, `p/t`, `p//n` or `p/t/n`.
fn corner(vertex: FaceVertex) -> String {
  let p = vertex.position;
  match (vertex.texcoord, vertex.normal) {
    (None, None) => p.to_string(),
    (Some(t), None) => format!("{p}/{t}"),
    (None, Some(n)) => format!("{p}//{n}"),
    (Some(t), Some(n)) => format!("{p}/{t}/{n}"),
  }
}

#[cfg(test)]
#[path = "writer_test.rs"]
mod writer_test;
