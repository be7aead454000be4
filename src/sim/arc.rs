//! Sweep circle geometry
//!
//! Each arc lies on a circle in the plane spanned by the arc's forward axis
//! and the surface normal. The circle center sits `radius` behind the anchor
//! so that the anchor itself is the point at angle 0:
//!
//! `P(θ) = center + forward·r·cos θ + normal·r·sin θ`

use glam::Vec3;

use super::frame::TangentFrame;

/// Evenly spaced base angles (degrees) for `count` sweep planes
pub fn base_angles(count: u32) -> impl Iterator<Item = f32> {
    let step = 360.0 / count.max(1) as f32;
    (0..count).map(move |i| i as f32 * step)
}

/// Circle one arc marches along
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcCircle {
    /// Base angle of this sweep plane around the normal (degrees)
    pub base_angle: f32,
    /// Point the march starts from (`P(0)`)
    pub anchor: Vec3,
    pub center: Vec3,
    pub radius: f32,
    /// Frame rotated by `base_angle`
    pub frame: TangentFrame,
}

impl ArcCircle {
    /// Circle through `anchor` for the sweep plane at `base_angle`
    pub fn new(anchor: Vec3, frame: &TangentFrame, base_angle: f32, radius: f32) -> Self {
        let frame = frame.rotated(base_angle);
        Self {
            base_angle,
            anchor,
            center: anchor - frame.forward * radius,
            radius,
            frame,
        }
    }

    /// Point at `degrees` swept from the anchor
    #[inline]
    pub fn point_at(&self, degrees: f32) -> Vec3 {
        let (sin, cos) = degrees.to_radians().sin_cos();
        self.center
            + self.frame.forward * self.radius * cos
            + self.frame.normal * self.radius * sin
    }

    /// Hole warning cue, independent of how far the arc got
    #[inline]
    pub fn warning_point(&self, lift: f32) -> Vec3 {
        self.center + self.frame.normal * self.radius * lift
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::approx_eq;

    #[test]
    fn test_base_angles_even_spacing() {
        let angles: Vec<f32> = base_angles(4).collect();
        assert_eq!(angles, vec![0.0, 90.0, 180.0, 270.0]);

        let single: Vec<f32> = base_angles(1).collect();
        assert_eq!(single, vec![0.0]);

        let six: Vec<f32> = base_angles(6).collect();
        assert_eq!(six.len(), 6);
        for pair in six.windows(2) {
            assert!((pair[1] - pair[0] - 60.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_anchor_lies_on_circle() {
        let anchor = Vec3::new(3.0, -1.0, 2.5);
        let frame = TangentFrame::from_normal(Vec3::new(0.2, 0.9, -0.1).normalize());
        for base in base_angles(5) {
            let circle = ArcCircle::new(anchor, &frame, base, 0.75);
            assert!(approx_eq(circle.point_at(0.0), anchor, 1e-5));
            assert!(((circle.center - anchor).length() - 0.75).abs() < 1e-5);
        }
    }

    #[test]
    fn test_quarter_points_for_up_normal() {
        let frame = TangentFrame::from_normal(Vec3::Y);
        let circle = ArcCircle::new(Vec3::ZERO, &frame, 0.0, 1.0);
        assert!(approx_eq(circle.center, Vec3::new(0.0, 0.0, -1.0), 1e-6));
        assert!(approx_eq(circle.point_at(90.0), Vec3::new(0.0, 1.0, -1.0), 1e-6));
        assert!(approx_eq(circle.point_at(180.0), Vec3::new(0.0, 0.0, -2.0), 1e-6));
        assert!(approx_eq(circle.point_at(270.0), Vec3::new(0.0, -1.0, -1.0), 1e-6));
        assert!(approx_eq(circle.point_at(360.0), Vec3::ZERO, 1e-5));
    }

    #[test]
    fn test_warning_point() {
        let frame = TangentFrame::from_normal(Vec3::Y);
        let circle = ArcCircle::new(Vec3::ZERO, &frame, 0.0, 2.0);
        assert!(approx_eq(circle.warning_point(0.5), Vec3::new(0.0, 1.0, -2.0), 1e-6));
    }
}
