//! Core mesh data types.
//!
//! Indices follow the WaveFront convention: 1-based offsets into the owning
//! [`Model`]'s attribute buffers.

use std::fmt;
use std::sync::Arc;

use glam::{DVec2, DVec3};

use crate::bounds::Aabb3;

/// The three indexed attribute streams of a model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AttributeKind {
  Position,
  Normal,
  Texcoord,
}

impl fmt::Display for AttributeKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      AttributeKind::Position => "position",
      AttributeKind::Normal => "normal",
      AttributeKind::Texcoord => "texcoord",
    })
  }
}

/// One corner of a triangle: 1-based indices into the model buffers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FaceVertex {
  /// Position index (always present, >= 1).
  pub position: u32,
  /// Texture coordinate index, `None` when the corner has no UV.
  pub texcoord: Option<u32>,
  /// Normal index, `None` when the corner has no normal.
  pub normal: Option<u32>,
}

impl FaceVertex {
  pub fn new(position: u32, texcoord: Option<u32>, normal: Option<u32>) -> Self {
    Self {
      position,
      texcoord,
      normal,
    }
  }

  /// Corner with a position only.
  pub fn position_only(position: u32) -> Self {
    Self::new(position, None, None)
  }
}

/// Exactly three corners.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Triangle {
  pub vertices: [FaceVertex; 3],
}

impl Triangle {
  pub fn new(a: FaceVertex, b: FaceVertex, c: FaceVertex) -> Self {
    Self {
      vertices: [a, b, c],
    }
  }

  /// Triangle from three position indices, no normals or UVs.
  pub fn from_positions(a: u32, b: u32, c: u32) -> Self {
    Self::new(
      FaceVertex::position_only(a),
      FaceVertex::position_only(b),
      FaceVertex::position_only(c),
    )
  }
}

/// Triangles sharing a material.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Face {
  /// Material name (`usemtl`), empty when none was set.
  pub material: String,
  pub triangles: Vec<Triangle>,
}

impl Face {
  pub fn new(material: impl Into<String>) -> Self {
    Self {
      material: material.into(),
      triangles: Vec::new(),
    }
  }

  pub fn with_triangles(mut self, triangles: Vec<Triangle>) -> Self {
    self.triangles = triangles;
    self
  }
}

/// Named group of faces. The unit of spatial classification.
///
/// Geometries do not own attribute data; they index the model buffers.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Geometry {
  /// Group name (`g`).
  pub id: String,
  pub faces: Vec<Face>,
}

impl Geometry {
  pub fn new(id: impl Into<String>) -> Self {
    Self {
      id: id.into(),
      faces: Vec::new(),
    }
  }

  pub fn with_face(mut self, face: Face) -> Self {
    self.faces.push(face);
    self
  }

  /// Iterate every triangle across all faces, in order.
  pub fn triangles(&self) -> impl Iterator<Item = &Triangle> {
    self.faces.iter().flat_map(|face| face.triangles.iter())
  }

  pub fn triangle_count(&self) -> usize {
    self.faces.iter().map(|face| face.triangles.len()).sum()
  }

  /// True when the geometry has no triangles at all.
  pub fn is_empty(&self) -> bool {
    self.triangle_count() == 0
  }
}

/// Material record from the material library.
///
/// Carried through splits untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Material {
  pub name: String,
  /// Ambient color (`Ka`).
  pub ambient: Option<DVec3>,
  /// Diffuse color (`Kd`).
  pub diffuse: Option<DVec3>,
  /// Specular color (`Ks`).
  pub specular: Option<DVec3>,
  /// Specular exponent (`Ns`).
  pub shininess: Option<f64>,
  /// Opacity (`d`), 1.0 = opaque.
  pub dissolve: Option<f64>,
  /// Diffuse texture path (`map_Kd`).
  pub diffuse_texture: Option<String>,
}

impl Material {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      ..Default::default()
    }
  }
}

/// A complete mesh: global attribute buffers plus grouped faces.
#[derive(Clone, Debug, PartialEq)]
pub struct Model {
  pub name: String,
  /// Material library file (`mtllib`), shared between split tiles.
  pub material_file: Option<Arc<str>>,
  pub positions: Vec<DVec3>,
  pub normals: Vec<DVec3>,
  pub texcoords: Vec<DVec2>,
  pub geometries: Vec<Geometry>,
  /// Materials, shared between split tiles.
  pub materials: Arc<[Material]>,
}

impl Model {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      material_file: None,
      positions: Vec::new(),
      normals: Vec::new(),
      texcoords: Vec::new(),
      geometries: Vec::new(),
      materials: Arc::from(Vec::new()),
    }
  }

  pub fn with_material_file(mut self, file: impl Into<Arc<str>>) -> Self {
    self.material_file = Some(file.into());
    self
  }

  pub fn with_materials(mut self, materials: Vec<Material>) -> Self {
    self.materials = Arc::from(materials);
    self
  }

  /// Length of the buffer backing `kind`.
  pub fn attribute_len(&self, kind: AttributeKind) -> usize {
    match kind {
      AttributeKind::Position => self.positions.len(),
      AttributeKind::Normal => self.normals.len(),
      AttributeKind::Texcoord => self.texcoords.len(),
    }
  }

  /// Total triangles across all geometries.
  pub fn triangle_count(&self) -> usize {
    self.geometries.iter().map(Geometry::triangle_count).sum()
  }

  /// Axis-aligned bounds of the position buffer.
  ///
  /// Empty (inverted) when the model has no positions.
  pub fn bounding_box(&self) -> Aabb3 {
    Aabb3::from_points(&self.positions)
  }

  /// True when both models point at the same material allocation.
  pub fn shares_materials_with(&self, other: &Model) -> bool {
    Arc::ptr_eq(&self.materials, &other.materials)
  }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
