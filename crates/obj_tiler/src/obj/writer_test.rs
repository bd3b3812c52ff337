use super::*;
use crate::obj::read_obj_str;
use crate::split::{split, SplitConfig};
use crate::test_utils::{geometry, model_with, random_model, two_cluster_model};
use crate::types::{Face, Geometry, Triangle};

fn assert_same_mesh(a: &Model, b: &Model) {
  assert_eq!(a.material_file, b.material_file);
  assert_eq!(a.positions, b.positions);
  assert_eq!(a.normals, b.normals);
  assert_eq!(a.texcoords, b.texcoords);
  assert_eq!(a.geometries, b.geometries);
}

#[test]
fn test_layout() {
  let text = to_obj_string(&two_cluster_model()).expect("write");
  let lines: Vec<&str> = text.lines().collect();

  assert_eq!(lines[0], "# scene: 2 geometries, 2 triangles");
  assert_eq!(lines[1], "mtllib scene.mtl");
  assert_eq!(lines[2], "v 0 0 0");
  assert_eq!(lines[3], "v 10 10 10");
  assert_eq!(
    &lines[9..],
    &[
      "g near", "s off", "usemtl brick", "f 1 4 5", "g far", "s off", "usemtl glass", "f 3 6 7",
    ]
  );
}

#[test]
fn test_corner_forms() {
  assert_eq!(corner(FaceVertex::position_only(3)), "3");
  assert_eq!(corner(FaceVertex::new(3, Some(2), None)), "3/2");
  assert_eq!(corner(FaceVertex::new(3, None, Some(1))), "3//1");
  assert_eq!(corner(FaceVertex::new(3, Some(2), Some(1))), "3/2/1");
}

#[test]
fn test_no_mtllib_without_material_file() {
  let mut model = two_cluster_model();
  model.material_file = None;
  assert!(!to_obj_string(&model).expect("write").contains("mtllib"));
}

#[test]
fn test_material_only_emitted_on_change() {
  let model = model_with(
    &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
    vec![
      geometry("a", "brick", vec![Triangle::from_positions(1, 2, 3)]),
      geometry("b", "brick", vec![Triangle::from_positions(1, 2, 3)]),
      Geometry::new("c")
        .with_face(Face::new("").with_triangles(vec![Triangle::from_positions(3, 2, 1)])),
    ],
  );
  let text = to_obj_string(&model).expect("write");
  assert_eq!(text.matches("usemtl brick").count(), 1);
  assert!(text.lines().any(|line| line == "usemtl"));

  let back = read_obj_str(&text, "scene").expect("parse");
  assert_same_mesh(&model, &back);
}

#[test]
fn test_empty_id_written_as_default_group() {
  let model = model_with(
    &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
    vec![geometry("", "brick", vec![Triangle::from_positions(1, 2, 3)])],
  );
  let text = to_obj_string(&model).expect("write");
  assert!(text.lines().any(|line| line == "g default"));
  assert!(!text.lines().any(|line| line.trim_end() == "g"));

  let back = read_obj_str(&text, "scene").expect("parse");
  assert_eq!(back.geometries[0].id, crate::obj::reader::DEFAULT_GROUP);
  assert_eq!(back.geometries[0].faces, model.geometries[0].faces);
}

// =============================================================================
// Round trips through the reader
// =============================================================================

#[test]
fn test_hash_inside_names_round_trip() {
  let model = model_with(
    &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
    vec![
      geometry("wall#1", "glass#2", vec![Triangle::from_positions(1, 2, 3)]),
      geometry("wall#2", "brick", vec![Triangle::from_positions(3, 2, 1)]),
    ],
  )
  .with_material_file("scene#v2.mtl");
  let back = read_obj_str(&to_obj_string(&model).expect("write"), "scene").expect("parse");
  assert_same_mesh(&model, &back);
}

#[test]
fn test_random_model_round_trip() {
  let model = random_model(7, 20, 90);
  let back = read_obj_str(&to_obj_string(&model).expect("write"), "random").expect("parse");
  assert_same_mesh(&model, &back);
}

#[test]
fn test_fractional_coordinates_round_trip() {
  let model = model_with(
    &[[0.1, -2.5e-7, 1.0 / 3.0], [1e12, 0.0, -0.0], [3.25, 7.0, 1.5]],
    vec![geometry("g", "brick", vec![Triangle::from_positions(1, 2, 3)])],
  );
  let back = read_obj_str(&to_obj_string(&model).expect("write"), "scene").expect("parse");
  assert_eq!(model.positions, back.positions);
}

#[test]
fn test_split_tiles_round_trip() {
  let model = random_model(11, 30, 120);
  let tiles = split(&model, &SplitConfig::new().with_level(4)).expect("split");
  assert!(tiles.len() > 1);

  for tile in &tiles {
    let back = read_obj_str(&to_obj_string(tile).expect("write"), &tile.name).expect("parse");
    assert_same_mesh(tile, &back);
  }
}

#[test]
fn test_write_file() {
  let dir = tempfile::tempdir().expect("temp dir");
  let path = dir.path().join("scene.obj");

  let model = two_cluster_model();
  write_obj_file(&model, &path).expect("write");
  let back = crate::obj::read_obj_file(&path).expect("read");
  assert_eq!(back.name, "scene");
  assert_same_mesh(&model, &back);
}
