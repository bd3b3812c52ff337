//! Shared model builders for tests.

use glam::{DVec2, DVec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::{Face, FaceVertex, Geometry, Material, Model, Triangle};

/// Geometry with a single face holding `triangles`.
pub fn geometry(id: &str, material: &str, triangles: Vec<Triangle>) -> Geometry {
  Geometry::new(id).with_face(Face::new(material).with_triangles(triangles))
}

/// Model with the given positions and geometries, no normals or UVs.
pub fn model_with(positions: &[[f64; 3]], geometries: Vec<Geometry>) -> Model {
  let mut model = Model::new("scene")
    .with_material_file("scene.mtl")
    .with_materials(vec![Material::new("brick"), Material::new("glass")]);
  model.positions = positions.iter().map(|&p| DVec3::from_array(p)).collect();
  model.geometries = geometries;
  model
}

/// Two well separated single-triangle geometries inside a [0, 10]³ box.
///
/// With `level = 2`, "near" lands in cell 0 and "far" in cell 7.
pub fn two_cluster_model() -> Model {
  model_with(
    &[
      [0.0, 0.0, 0.0],
      [10.0, 10.0, 10.0],
      [9.0, 9.0, 9.0],
      [1.0, 0.0, 0.0],
      [0.0, 1.0, 0.0],
      [9.0, 10.0, 9.0],
      [10.0, 9.0, 10.0],
    ],
    vec![
      geometry("near", "brick", vec![Triangle::from_positions(1, 4, 5)]),
      geometry("far", "glass", vec![Triangle::from_positions(3, 6, 7)]),
    ],
  )
}

/// Seeded random model with full position / UV / normal indices.
///
/// Each geometry draws its corners from a random window of the position
/// buffer, so geometries overlap in the indices they use and land in a
/// spread of cells. Some corners omit normals or UVs.
pub fn random_model(seed: u64, geometry_count: usize, vertex_count: usize) -> Model {
  let mut rng = StdRng::seed_from_u64(seed);

  let mut model = Model::new("random")
    .with_material_file("random.mtl")
    .with_materials(vec![Material::new("a"), Material::new("b")]);

  model.positions = (0..vertex_count)
    .map(|_| {
      DVec3::new(
        rng.random_range(-50.0..50.0),
        rng.random_range(-50.0..50.0),
        rng.random_range(0.0..20.0),
      )
    })
    .collect();
  model.normals = (0..vertex_count / 2)
    .map(|_| DVec3::new(rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0), 1.0).normalize())
    .collect();
  model.texcoords = (0..vertex_count / 3)
    .map(|_| DVec2::new(rng.random_range(0.0..1.0), rng.random_range(0.0..1.0)))
    .collect();

  let window = 12.min(vertex_count);
  for g in 0..geometry_count {
    let start = rng.random_range(0..=vertex_count - window);
    let mut faces = Vec::new();
    for f in 0..rng.random_range(1..=3) {
      let material = if (g + f) % 2 == 0 { "a" } else { "b" };
      let triangles = (0..rng.random_range(1..=6))
        .map(|_| {
          let mut corner = || {
            let position = (start + rng.random_range(0..window)) as u32 + 1;
            let normal = (!model.normals.is_empty() && rng.random_bool(0.7))
              .then(|| rng.random_range(1..=model.normals.len() as u32));
            let texcoord = (!model.texcoords.is_empty() && rng.random_bool(0.5))
              .then(|| rng.random_range(1..=model.texcoords.len() as u32));
            FaceVertex::new(position, texcoord, normal)
          };
          Triangle::new(corner(), corner(), corner())
        })
        .collect();
      faces.push(Face::new(material).with_triangles(triangles));
    }
    model.geometries.push(Geometry {
      id: format!("g{g}"),
      faces,
    });
  }

  model
}
