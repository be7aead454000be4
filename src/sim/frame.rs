//! Tangent frames built from a surface normal
//!
//! `{right, forward, normal}` is an orthonormal basis with the normal as
//! "up" and `forward × right == normal`. Every arc of an agent is oriented
//! from this frame.

use glam::Vec3;

use crate::consts::{EPSILON, WORLD_FORWARD, WORLD_UP};
use crate::rotate_about;

/// Orthonormal basis around a surface normal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TangentFrame {
    pub right: Vec3,
    pub forward: Vec3,
    pub normal: Vec3,
}

impl TangentFrame {
    /// Build a frame from a unit normal.
    ///
    /// `right = normal × up`; when the normal is within ~0.06° of ±up the
    /// cross product collapses and `forward` is used as the reference axis.
    pub fn from_normal(normal: Vec3) -> Self {
        let mut right = normal.cross(WORLD_UP);
        if right.length() < EPSILON {
            right = normal.cross(WORLD_FORWARD);
        }
        let right = right.normalize();
        let forward = right.cross(normal).normalize();

        Self {
            right,
            forward,
            normal,
        }
    }

    /// Same frame with `right` and `forward` turned about the normal
    pub fn rotated(&self, degrees: f32) -> Self {
        Self {
            right: rotate_about(self.right, self.normal, degrees),
            forward: rotate_about(self.forward, self.normal, degrees),
            normal: self.normal,
        }
    }

    /// Largest deviation from orthonormality (0 for a perfect basis)
    pub fn orthonormal_error(&self) -> f32 {
        let dots = [
            self.right.dot(self.forward).abs(),
            self.right.dot(self.normal).abs(),
            self.forward.dot(self.normal).abs(),
        ];
        let lengths = [
            (self.right.length() - 1.0).abs(),
            (self.forward.length() - 1.0).abs(),
            (self.normal.length() - 1.0).abs(),
        ];
        dots.into_iter().chain(lengths).fold(0.0, f32::max)
    }
}
