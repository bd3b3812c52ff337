//! Split benchmarks.
//!
//! Scenes are synthetic "cities": an `n × n` block of box buildings, each box
//! its own geometry with 8 positions and 12 triangles. Normals and texcoords
//! are shared by every building, so compaction has to dedupe across cells.
//!
//! - **split/level**: full split at increasing grid levels
//! - **split/scene_size**: fixed level, growing scene
//! - **stages**: footprint + classification alone
//! - **obj**: text round trip of the largest scene

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use glam::{DVec2, DVec3};
use obj_tiler::{
  classify::{classify, footprint},
  obj::{read_obj_str, to_obj_string},
  split, Face, FaceVertex, Geometry, Grid, Material, Model, SplitConfig, Triangle,
};

// =============================================================================
// Synthetic scenes
// =============================================================================

/// Box corners, indexed `x | y << 1 | z << 2`.
const BOX_FACES: [([usize; 4], u32); 6] = [
  ([0, 2, 6, 4], 1), // -x
  ([1, 5, 7, 3], 2), // +x
  ([0, 4, 5, 1], 3), // -y
  ([2, 3, 7, 6], 4), // +y
  ([0, 1, 3, 2], 5), // -z
  ([4, 6, 7, 5], 6), // +z
];

fn city(blocks: usize) -> Model {
  let mut model = Model::new("city")
    .with_material_file("city.mtl")
    .with_materials(vec![Material::new("concrete"), Material::new("glass")]);

  model.normals = vec![
    DVec3::NEG_X,
    DVec3::X,
    DVec3::NEG_Y,
    DVec3::Y,
    DVec3::NEG_Z,
    DVec3::Z,
  ];
  model.texcoords = vec![
    DVec2::new(0.0, 0.0),
    DVec2::new(1.0, 0.0),
    DVec2::new(1.0, 1.0),
    DVec2::new(0.0, 1.0),
  ];

  for bx in 0..blocks {
    for bz in 0..blocks {
      let base = model.positions.len() as u32;
      // Height varies so the grid is used on all three axes
      let height = 4.0 + ((bx * 7 + bz * 13) % 11) as f64 * 3.0;
      let origin = DVec3::new(bx as f64 * 10.0, 0.0, bz as f64 * 10.0);
      for corner in 0..8 {
        let offset = DVec3::new(
          (corner & 1) as f64 * 6.0,
          ((corner >> 1) & 1) as f64 * height,
          ((corner >> 2) & 1) as f64 * 6.0,
        );
        model.positions.push(origin + offset);
      }

      let mut walls = Face::new("concrete");
      let mut roof = Face::new("glass");
      for (quad, normal) in BOX_FACES {
        let v = |i: usize, uv: u32| FaceVertex::new(base + quad[i] as u32 + 1, Some(uv), Some(normal));
        let triangles = [
          Triangle::new(v(0, 1), v(1, 2), v(2, 3)),
          Triangle::new(v(0, 1), v(2, 3), v(3, 4)),
        ];
        let face = if normal == 4 { &mut roof } else { &mut walls };
        face.triangles.extend(triangles);
      }

      model.geometries.push(
        Geometry::new(format!("building_{bx}_{bz}"))
          .with_face(walls)
          .with_face(roof),
      );
    }
  }

  model
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_split_levels(c: &mut Criterion) {
  let mut group = c.benchmark_group("split/level");
  let model = city(64);
  group.throughput(Throughput::Elements(model.geometries.len() as u64));

  for level in [1u32, 2, 4, 8, 16] {
    let config = SplitConfig::new().with_level(level);
    group.bench_with_input(BenchmarkId::from_parameter(level), &level, |b, _| {
      b.iter(|| split(black_box(&model), &config))
    });
  }

  group.finish();
}

fn bench_split_scene_size(c: &mut Criterion) {
  let mut group = c.benchmark_group("split/scene_size");
  let config = SplitConfig::new().with_level(4);

  for blocks in [16usize, 32, 64, 128] {
    let model = city(blocks);
    group.throughput(Throughput::Elements(model.triangle_count() as u64));
    group.bench_with_input(
      BenchmarkId::new("buildings", blocks * blocks),
      &blocks,
      |b, _| b.iter(|| split(black_box(&model), &config)),
    );
  }

  group.finish();
}

fn bench_stages(c: &mut Criterion) {
  let mut group = c.benchmark_group("stages");
  let model = city(64);
  let grid = Grid::subdivide(model.bounding_box(), 8).expect("grid");

  group.bench_function("footprint", |b| {
    b.iter(|| {
      let footprints: Vec<_> = model
        .geometries
        .iter()
        .enumerate()
        .map(|(i, geometry)| footprint(i, geometry, &model.positions))
        .collect();
      black_box(footprints)
    })
  });

  let centroids: Vec<DVec3> = model
    .geometries
    .iter()
    .enumerate()
    .filter_map(|(i, geometry)| footprint(i, geometry, &model.positions).ok())
    .map(|footprint| footprint.centroid)
    .collect();

  group.bench_function("classify/level_8", |b| {
    b.iter(|| {
      let placements: Vec<_> = centroids.iter().map(|&c| classify(c, &grid)).collect();
      black_box(placements)
    })
  });

  group.finish();
}

fn bench_obj(c: &mut Criterion) {
  let mut group = c.benchmark_group("obj");
  let model = city(64);
  let text = to_obj_string(&model).expect("write");
  group.throughput(Throughput::Bytes(text.len() as u64));

  group.bench_function("write", |b| b.iter(|| to_obj_string(black_box(&model))));
  group.bench_function("read", |b| {
    b.iter(|| read_obj_str(black_box(&text), "city"))
  });

  group.finish();
}

criterion_group!(split_benches, bench_split_levels, bench_split_scene_size);
criterion_group!(component_benches, bench_stages, bench_obj);

criterion_main!(split_benches, component_benches);
