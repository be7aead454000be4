//! Mesh Shell - arc-sweep agents for hole detection
//!
//! Core modules:
//! - `sim`: Deterministic sweep core (tangent frames, arc marching, agents)
//! - `renderer`: Debug-draw capability and recording draw list
//! - `settings`: Data-driven sweep parameters
//! - `error`: Error taxonomy

pub mod error;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::SweepError;
pub use settings::{Gradient, ManagerSettings, SweepParameters};

use glam::Vec3;

/// Sweep configuration constants
pub mod consts {
    use glam::Vec3;

    /// Shortest segment (and smallest cross product) treated as non-degenerate
    pub const EPSILON: f32 = 0.001;

    /// Primary reference axis for tangent frames
    pub const WORLD_UP: Vec3 = Vec3::Y;
    /// Fallback reference axis when the normal is parallel to `WORLD_UP`
    pub const WORLD_FORWARD: Vec3 = Vec3::Z;

    /// Half size of the cross drawn at a hit point
    pub const HIT_MARKER_SIZE: f32 = 0.02;
    /// Length of the hit normal ray
    pub const HIT_NORMAL_LENGTH: f32 = 0.1;
    /// Length of the hole warning ray at the last arc point
    pub const HOLE_RAY_LENGTH: f32 = 0.2;
    /// Half length of each hole warning cross arm
    pub const HOLE_CROSS_SIZE: f32 = 0.1;
    /// Warning cross sits this fraction of the radius above the circle center
    pub const HOLE_MARKER_LIFT: f32 = 0.5;
}

/// Rotate `v` about unit `axis` by `degrees`
#[inline]
pub fn rotate_about(v: Vec3, axis: Vec3, degrees: f32) -> Vec3 {
    glam::Quat::from_axis_angle(axis, degrees.to_radians()) * v
}

/// Check that two vectors agree within `tol` per component
#[inline]
pub fn approx_eq(a: Vec3, b: Vec3, tol: f32) -> bool {
    (a - b).abs().max_element() <= tol
}
