//! Minimal WaveFront OBJ reader.
//!
//! Supported statements: `v`, `vt`, `vn`, `f`, `g`, `o`, `usemtl`, `mtllib`.
//! Everything else (`s`, `l`, `p`, comments, free-form surfaces) is ignored.
//! A `#` opens a comment at the start of a line or after whitespace; inside a
//! token (`usemtl glass#2`) it is part of the name.
//!
//! Faces with more than three corners are fan-triangulated around their first
//! corner. Negative indices are resolved against the buffer length at the
//! point of the face statement.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use glam::{DVec2, DVec3};
use smallvec::SmallVec;

use super::{ObjError, ObjResult};
use crate::types::{Face, FaceVertex, Geometry, Model, Triangle};

/// Group used for faces that appear before any `g` / `o` statement.
pub const DEFAULT_GROUP: &str = "default";

/// Corners of one `f` statement. Quads are the common case.
type Polygon = SmallVec<[FaceVertex; 4]>;

/// Parse OBJ text from a buffered reader.
pub fn read_obj<R: BufRead>(reader: R, name: &str) -> ObjResult<Model> {
  let mut builder = ModelBuilder::new(name);
  for (number, line) in reader.lines().enumerate() {
    builder.statement(number + 1, &line?)?;
  }
  Ok(builder.finish())
}

/// Parse OBJ text held in memory.
pub fn read_obj_str(text: &str, name: &str) -> ObjResult<Model> {
  read_obj(text.as_bytes(), name)
}

/// Parse an OBJ file. The model is named after the file stem.
pub fn read_obj_file(path: impl AsRef<Path>) -> ObjResult<Model> {
  let path = path.as_ref();
  let name = path
    .file_stem()
    .map(|stem| stem.to_string_lossy().into_owned())
    .unwrap_or_else(|| "model".to_string());
  let file = File::open(path)?;
  read_obj(BufReader::new(file), &name)
}

struct ModelBuilder {
  model: Model,
  group: String,
  material: String,
  /// Group name → index into `model.geometries`.
  geometry_lookup: HashMap<String, usize>,
}

impl ModelBuilder {
  fn new(name: &str) -> Self {
    Self {
      model: Model::new(name),
      group: DEFAULT_GROUP.to_string(),
      material: String::new(),
      geometry_lookup: HashMap::new(),
    }
  }

  fn statement(&mut self, line: usize, text: &str) -> ObjResult<()> {
    let text = strip_comment(text).trim();
    let mut tokens = text.split_whitespace();
    let Some(keyword) = tokens.next() else {
      return Ok(());
    };

    match keyword {
      "v" => {
        let position = next_vec3(line, &mut tokens)?;
        self.model.positions.push(position);
      }
      "vn" => {
        let normal = next_vec3(line, &mut tokens)?;
        self.model.normals.push(normal);
      }
      "vt" => {
        let u = next_float(line, &mut tokens)?;
        let v = match tokens.next() {
          Some(token) => parse_float(line, token)?,
          None => 0.0,
        };
        self.model.texcoords.push(DVec2::new(u, v));
      }
      "g" | "o" => {
        let name = tokens.collect::<Vec<_>>().join(" ");
        self.group = if name.is_empty() {
          DEFAULT_GROUP.to_string()
        } else {
          name
        };
      }
      "usemtl" => {
        self.material = tokens.collect::<Vec<_>>().join(" ");
      }
      "mtllib" => {
        let file = tokens.collect::<Vec<_>>().join(" ");
        if !file.is_empty() {
          self.model.material_file = Some(file.into());
        }
      }
      "f" => {
        let polygon = tokens
          .map(|token| self.face_vertex(line, token))
          .collect::<ObjResult<Polygon>>()?;
        if polygon.len() < 3 {
          return Err(parse_error(line, format!("face needs 3 corners, got {}", polygon.len())));
        }
        let triangles = polygon[1..]
          .windows(2)
          .map(|pair| Triangle::new(polygon[0], pair[0], pair[1]));
        self.current_face().triangles.extend(triangles);
      }
      _ => {}
    }
    Ok(())
  }

  /// Parse `p`, `p/t`, `p//n` or `p/t/n`.
  fn face_vertex(&self, line: usize, token: &str) -> ObjResult<FaceVertex> {
    let mut parts = token.split('/');
    let position = parts
      .next()
      .filter(|p| !p.is_empty())
      .ok_or_else(|| parse_error(line, format!("missing position in {token:?}")))?;
    let texcoord = parts.next().filter(|t| !t.is_empty());
    let normal = parts.next().filter(|n| !n.is_empty());

    let resolve = |raw: &str, len: usize| -> ObjResult<u32> {
      let value: i64 = raw
        .parse()
        .map_err(|_| parse_error(line, format!("invalid index {raw:?}")))?;
      let index = if value < 0 { len as i64 + 1 + value } else { value };
      if index < 1 || index > len as i64 {
        return Err(parse_error(
          line,
          format!("index {value} out of range ({len} defined)"),
        ));
      }
      Ok(index as u32)
    };

    Ok(FaceVertex {
      position: resolve(position, self.model.positions.len())?,
      texcoord: texcoord
        .map(|t| resolve(t, self.model.texcoords.len()))
        .transpose()?,
      normal: normal
        .map(|n| resolve(n, self.model.normals.len()))
        .transpose()?,
    })
  }

  /// Face receiving triangles for the active group and material.
  ///
  /// Geometries are created lazily so a `g` without faces leaves no empty
  /// group behind.
  fn current_face(&mut self) -> &mut Face {
    let index = match self.geometry_lookup.get(&self.group) {
      Some(&index) => index,
      None => {
        let index = self.model.geometries.len();
        self.model.geometries.push(Geometry::new(self.group.clone()));
        self.geometry_lookup.insert(self.group.clone(), index);
        index
      }
    };

    let geometry = &mut self.model.geometries[index];
    let reuse = geometry
      .faces
      .last()
      .is_some_and(|face| face.material == self.material);
    if !reuse {
      geometry.faces.push(Face::new(self.material.clone()));
    }
    let last = geometry.faces.len() - 1;
    &mut geometry.faces[last]
  }

  fn finish(self) -> Model {
    self.model
  }
}

/// Drop a trailing comment. `#` starts one only at the beginning of the line
/// or after whitespace, so names like `glass#2` survive.
fn strip_comment(text: &str) -> &str {
  let mut previous: Option<char> = None;
  for (offset, c) in text.char_indices() {
    if c == '#' && previous.map_or(true, char::is_whitespace) {
      return &text[..offset];
    }
    previous = Some(c);
  }
  text
}

fn parse_float(line: usize, token: &str) -> ObjResult<f64> {
  token
    .parse()
    .map_err(|_| parse_error(line, format!("invalid number {token:?}")))
}

fn next_float<'a>(line: usize, tokens: &mut impl Iterator<Item = &'a str>) -> ObjResult<f64> {
  let token = tokens
    .next()
    .ok_or_else(|| parse_error(line, "missing coordinate".to_string()))?;
  parse_float(line, token)
}

/// Three leading coordinates; trailing `w` or vertex colors are ignored.
fn next_vec3<'a>(line: usize, tokens: &mut impl Iterator<Item = &'a str>) -> ObjResult<DVec3> {
  let x = next_float(line, tokens)?;
  let y = next_float(line, tokens)?;
  let z = next_float(line, tokens)?;
  Ok(DVec3::new(x, y, z))
}

fn parse_error(line: usize, message: String) -> ObjError {
  ObjError::Parse { line, message }
}

#[cfg(test)]
#[path = "reader_test.rs"]
mod reader_test;
