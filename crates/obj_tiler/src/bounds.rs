//! Axis-aligned bounding box with double precision for large models.

use glam::DVec3;

/// Double-precision axis-aligned bounding box.
///
/// Used both for the whole-model bounds and for every grid cell.
/// An empty box has inverted extents (`min = +∞`, `max = -∞`) so that the
/// first [`encapsulate`](Self::encapsulate) call snaps it onto the point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb3 {
	/// Minimum corner (inclusive).
	pub min: DVec3,
	/// Maximum corner (inclusive).
	pub max: DVec3,
}

impl Aabb3 {
	/// Box spanning `min..=max`; corners are taken as given.
	pub fn new(min: DVec3, max: DVec3) -> Self {
		Self { min, max }
	}

	/// Inverted box that contains nothing until a point is encapsulated.
	pub fn empty() -> Self {
		Self {
			min: DVec3::INFINITY,
			max: DVec3::NEG_INFINITY,
		}
	}

	/// Bounds of a point cloud in one linear scan.
	///
	/// Returns [`Aabb3::empty`] for an empty slice.
	pub fn from_points(points: &[DVec3]) -> Self {
		let Some((first, rest)) = points.split_first() else {
			return Self::empty();
		};

		let mut aabb = Self {
			min: *first,
			max: *first,
		};
		for &point in rest {
			aabb.encapsulate(point);
		}
		aabb
	}

	/// Grow to include `point`.
	#[inline]
	pub fn encapsulate(&mut self, point: DVec3) {
		self.min = self.min.min(point);
		self.max = self.max.max(point);
	}

	/// True when no point has been encapsulated (inverted extents).
	pub fn is_empty(&self) -> bool {
		!self.min.cmple(self.max).all()
	}

	/// True when both corners are finite numbers.
	pub fn is_finite(&self) -> bool {
		self.min.is_finite() && self.max.is_finite()
	}

	/// Inclusive on both bounds: a point on a face shared by two boxes is
	/// contained by both. NaN components are never contained.
	#[inline]
	pub fn contains_point(&self, point: DVec3) -> bool {
		point.cmpge(self.min).all() && point.cmple(self.max).all()
	}

	/// Extent per axis; zero on the flat axes of a degenerate box.
	#[inline]
	pub fn size(&self) -> DVec3 {
		self.max - self.min
	}

	#[inline]
	pub fn center(&self) -> DVec3 {
		(self.min + self.max) * 0.5
	}
}

impl Default for Aabb3 {
	fn default() -> Self {
		Self::empty()
	}
}
