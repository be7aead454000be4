//! Debug-draw capability
//!
//! The sweep core never renders. It emits draw intents through
//! [`DebugRenderer`]; hosts decide what to do with them.

pub mod draw_list;

pub use draw_list::{DrawCommand, DrawList, LineVertex};

use glam::Vec3;

/// RGBA color
pub type Color = [f32; 4];

/// Line segments per circle of a wire sphere
pub const WIRE_SEGMENTS: usize = 16;

/// Sink for debug overlay primitives
pub trait DebugRenderer {
    /// Segment from `start` to `end`
    fn draw_line(&mut self, start: Vec3, end: Vec3, color: Color);

    /// Segment from `origin` to `origin + direction`
    fn draw_ray(&mut self, origin: Vec3, direction: Vec3, color: Color) {
        self.draw_line(origin, origin + direction, color);
    }

    /// Axis-aligned 3-line cross centred on `position`
    fn draw_marker(&mut self, position: Vec3, half_size: f32, color: Color) {
        for axis in [Vec3::X, Vec3::Y, Vec3::Z] {
            self.draw_line(position - axis * half_size, position + axis * half_size, color);
        }
    }

    /// Three axis-aligned great circles approximating a sphere
    fn draw_wire_sphere(&mut self, center: Vec3, radius: f32, color: Color) {
        let point = |u: Vec3, v: Vec3, i: usize| {
            let a = i as f32 / WIRE_SEGMENTS as f32 * std::f32::consts::TAU;
            center + (u * a.cos() + v * a.sin()) * radius
        };
        for (u, v) in [(Vec3::X, Vec3::Y), (Vec3::Y, Vec3::Z), (Vec3::Z, Vec3::X)] {
            for i in 0..WIRE_SEGMENTS {
                self.draw_line(point(u, v, i), point(u, v, i + 1), color);
            }
        }
    }
}

/// Linear blend between two colors
#[inline]
pub fn lerp_color(a: Color, b: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
        a[3] + (b[3] - a[3]) * t,
    ]
}

/// Same color with a different alpha
#[inline]
pub fn with_alpha(color: Color, alpha: f32) -> Color {
    [color[0], color[1], color[2], alpha]
}

/// Named debug colors
pub mod colors {
    use super::Color;

    pub const WHITE: Color = [1.0, 1.0, 1.0, 1.0];
    pub const RED: Color = [1.0, 0.0, 0.0, 1.0];
    pub const GREEN: Color = [0.0, 1.0, 0.0, 1.0];
    pub const CYAN: Color = [0.0, 1.0, 1.0, 1.0];
    pub const MAGENTA: Color = [1.0, 0.0, 1.0, 1.0];
    // Matches the common engine "yellow" (1, 0.92, 0.016)
    pub const YELLOW: Color = [1.0, 0.92, 0.016, 1.0];
}
