//! Math utilities and types
//!
//! Provides the vector and rigid-transform types shared by the scene graph,
//! plus the `Transformable` interface that nodes implement instead of
//! inheriting transform composition from a rendering engine.

pub use nalgebra::{
    Vector3,
    Isometry3,
    Translation3,
    UnitQuaternion,
};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Quaternion type for rotations
pub type Quat = UnitQuaternion<f32>;

/// Rigid transform (rotation followed by translation, no scale)
pub type RigidTransform = Isometry3<f32>;

/// Local transform access for anything that lives in a transform hierarchy
///
/// Implementors only store their transform relative to the parent frame.
/// Composition up to the world frame is done by the owning hierarchy, see
/// [`compose`].
pub trait Transformable {
    /// Transform relative to the parent frame
    fn transformation(&self) -> &RigidTransform;

    /// Replace the transform relative to the parent frame
    fn set_transformation(&mut self, transformation: RigidTransform);

    /// Translation component of the local transform
    fn translation(&self) -> Vec3 {
        self.transformation().translation.vector
    }

    /// Rotation component of the local transform
    fn rotation(&self) -> Quat {
        self.transformation().rotation
    }

    /// Translate in the parent frame
    fn translate(&mut self, offset: Vec3) {
        let mut transformation = *self.transformation();
        transformation.append_translation_mut(&Translation3::from(offset));
        self.set_transformation(transformation);
    }

    /// Rotate about the parent frame origin (rotates the translation too)
    fn rotate(&mut self, rotation: Quat) {
        let mut transformation = *self.transformation();
        transformation.append_rotation_mut(&rotation);
        self.set_transformation(transformation);
    }

    /// Rotate about the local origin, keeping the translation
    fn rotate_local(&mut self, rotation: Quat) {
        let mut transformation = *self.transformation();
        transformation.rotation *= rotation;
        self.set_transformation(transformation);
    }

    /// Reset to the identity transform
    fn reset_transformation(&mut self) {
        self.set_transformation(RigidTransform::identity());
    }
}

/// Compose a parent's absolute transform with a child's local transform
pub fn compose(parent_absolute: &RigidTransform, local: &RigidTransform) -> RigidTransform {
    parent_absolute * local
}

/// Create a rigid transform from a translation only
pub fn from_translation(translation: Vec3) -> RigidTransform {
    RigidTransform::from_parts(Translation3::from(translation), Quat::identity())
}

/// Create a rigid transform from translation and rotation
pub fn from_translation_rotation(translation: Vec3, rotation: Quat) -> RigidTransform {
    RigidTransform::from_parts(Translation3::from(translation), rotation)
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Pi / 2
    pub const HALF_PI: f32 = PI * 0.5;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;
}

/// Math utility functions
pub mod utils {
    use super::constants;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-6;

    struct Frame {
        transformation: RigidTransform,
    }

    impl Transformable for Frame {
        fn transformation(&self) -> &RigidTransform {
            &self.transformation
        }

        fn set_transformation(&mut self, transformation: RigidTransform) {
            self.transformation = transformation;
        }
    }

    #[test]
    fn test_translate_accumulates_in_parent_frame() {
        let mut frame = Frame { transformation: RigidTransform::identity() };
        frame.translate(Vec3::new(1.0, 0.0, 0.0));
        frame.translate(Vec3::new(0.0, 2.0, 0.0));

        assert_relative_eq!(frame.translation(), Vec3::new(1.0, 2.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_rotate_moves_translation_but_rotate_local_does_not() {
        let quarter_turn = Quat::from_axis_angle(&Vec3::z_axis(), constants::HALF_PI);

        let offset = from_translation(Vec3::new(1.0, 0.0, 0.0));

        let mut parent_rotated = Frame { transformation: offset };
        parent_rotated.rotate(quarter_turn);
        let translation = parent_rotated.translation();
        assert_relative_eq!(translation, Vec3::new(0.0, 1.0, 0.0), epsilon = EPSILON);

        let mut local_rotated = Frame { transformation: offset };
        local_rotated.rotate_local(quarter_turn);
        let translation = local_rotated.translation();
        assert_relative_eq!(translation, Vec3::new(1.0, 0.0, 0.0), epsilon = EPSILON);
        assert_relative_eq!(local_rotated.rotation(), quarter_turn, epsilon = EPSILON);
    }

    #[test]
    fn test_compose_applies_parent_after_child() {
        let quarter_turn = Quat::from_axis_angle(&Vec3::z_axis(), constants::HALF_PI);
        let parent = from_translation_rotation(Vec3::new(5.0, 0.0, 0.0), quarter_turn);
        let child = from_translation(Vec3::new(1.0, 0.0, 0.0));

        let world = compose(&parent, &child);
        assert_relative_eq!(world.translation.vector, Vec3::new(5.0, 1.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_reset_transformation() {
        let mut frame = Frame { transformation: from_translation(Vec3::new(3.0, 3.0, 3.0)) };
        frame.reset_transformation();
        assert_eq!(frame.transformation, RigidTransform::identity());
        assert_relative_eq!(utils::deg_to_rad(180.0), constants::PI, epsilon = EPSILON);
    }
}
