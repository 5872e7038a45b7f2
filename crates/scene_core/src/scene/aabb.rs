//! Axis-aligned bounding boxes
//!
//! Boxes are frame-relative: a node's mesh box and cumulative box live in the
//! node's local frame until they are explicitly carried into a parent frame
//! with [`AABB::transformed`].

use crate::foundation::math::{Point3, RigidTransform, Vec3};

/// Axis-Aligned Bounding Box
///
/// The empty box has `min = +inf` and `max = -inf` on every axis, which makes
/// it the identity element of [`AABB::union`]. A box with `min == max` is a
/// legitimate degenerate (point) box and is not empty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    /// Minimum corner of the bounding box
    pub min: Vec3,
    /// Maximum corner of the bounding box
    pub max: Vec3,
}

impl AABB {
    /// Create a new AABB from min and max points
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// The empty box
    pub fn empty() -> Self {
        Self {
            min: Vec3::repeat(f32::INFINITY),
            max: Vec3::repeat(f32::NEG_INFINITY),
        }
    }

    /// Create an AABB centered at a point with given extents
    pub fn from_center_extents(center: Vec3, extents: Vec3) -> Self {
        Self {
            min: center - extents,
            max: center + extents,
        }
    }

    /// Smallest box containing every point, empty for no points
    pub fn from_points<I: IntoIterator<Item = Vec3>>(points: I) -> Self {
        points.into_iter().fold(Self::empty(), |bounds, point| bounds.extend_point(point))
    }

    /// Whether this box contains no points at all
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Get the center of the AABB
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get the extents (half-size) of the AABB
    pub fn extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Get the full size of the AABB, zero for the empty box
    pub fn size(&self) -> Vec3 {
        if self.is_empty() {
            Vec3::zeros()
        } else {
            self.max - self.min
        }
    }

    /// Check if this AABB contains a point
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.x >= self.min.x && point.x <= self.max.x &&
        point.y >= self.min.y && point.y <= self.max.y &&
        point.z >= self.min.z && point.z <= self.max.z
    }

    /// Check if this AABB fully contains another one
    pub fn contains(&self, other: &AABB) -> bool {
        other.is_empty() || (self.contains_point(other.min) && self.contains_point(other.max))
    }

    /// Check if this AABB intersects another AABB
    pub fn intersects(&self, other: &AABB) -> bool {
        self.min.x <= other.max.x && self.max.x >= other.min.x &&
        self.min.y <= other.max.y && self.max.y >= other.min.y &&
        self.min.z <= other.max.z && self.max.z >= other.min.z
    }

    /// Per-axis min of the minimums and max of the maximums
    pub fn union(&self, other: &AABB) -> AABB {
        AABB {
            min: self.min.inf(&other.min),
            max: self.max.sup(&other.max),
        }
    }

    /// Grow the box so it contains `point`
    pub fn extend_point(&self, point: Vec3) -> AABB {
        AABB {
            min: self.min.inf(&point),
            max: self.max.sup(&point),
        }
    }

    /// The eight corners, min corner first
    pub fn corners(&self) -> [Vec3; 8] {
        let (min, max) = (self.min, self.max);
        [
            Vec3::new(min.x, min.y, min.z),
            Vec3::new(max.x, min.y, min.z),
            Vec3::new(min.x, max.y, min.z),
            Vec3::new(max.x, max.y, min.z),
            Vec3::new(min.x, min.y, max.z),
            Vec3::new(max.x, min.y, max.z),
            Vec3::new(min.x, max.y, max.z),
            Vec3::new(max.x, max.y, max.z),
        ]
    }

    /// Box enclosing this box after carrying it through `transformation`
    ///
    /// All eight corners are transformed, so a rotated box grows to the
    /// axis-aligned hull of its rotated corners. The empty box stays empty.
    pub fn transformed(&self, transformation: &RigidTransform) -> AABB {
        if self.is_empty() {
            return *self;
        }
        AABB::from_points(
            self.corners()
                .iter()
                .map(|corner| transformation.transform_point(&Point3::from(*corner)).coords),
        )
    }
}

impl Default for AABB {
    fn default() -> Self {
        Self::empty()
    }
}
