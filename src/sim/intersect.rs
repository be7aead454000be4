//! Ray queries against scene geometry
//!
//! The sweep core only ever talks to geometry through [`SurfaceIntersector`].

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Opaque handle to the object a ray hit (or an agent was placed on)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TargetId(pub u32);

/// A ray with a unit direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray; `direction` is normalized. Returns `None` for a zero direction.
    pub fn new(origin: Vec3, direction: Vec3) -> Option<Self> {
        direction.try_normalize().map(|direction| Self { origin, direction })
    }

    /// Point at distance `t` along the ray
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Nearest surface hit along a ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub point: Vec3,
    /// Unit surface normal at `point`
    pub normal: Vec3,
    /// Distance from the ray origin
    pub distance: f32,
    pub target: TargetId,
}

/// Synchronous ray-vs-scene query service
pub trait SurfaceIntersector {
    /// Nearest hit within `max_distance` of `origin` along unit `direction`
    fn query(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit>;

    /// Query with a [`Ray`]
    fn cast(&self, ray: &Ray, max_distance: f32) -> Option<RayHit> {
        self.query(ray.origin, ray.direction, max_distance)
    }
}

impl<T: SurfaceIntersector + ?Sized> SurfaceIntersector for &T {
    fn query(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
        (**self).query(origin, direction, max_distance)
    }
}

/// Intersector with no geometry at all
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyScene;

impl SurfaceIntersector for EmptyScene {
    fn query(&self, _origin: Vec3, _direction: Vec3, _max_distance: f32) -> Option<RayHit> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_normalizes_direction() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 3.0, 4.0)).unwrap();
        assert!((ray.direction.length() - 1.0).abs() < 1e-6);
        assert!((ray.at(5.0) - Vec3::new(0.0, 3.0, 4.0)).length() < 1e-5);
    }

    #[test]
    fn test_ray_rejects_zero_direction() {
        assert!(Ray::new(Vec3::ONE, Vec3::ZERO).is_none());
    }

    #[test]
    fn test_empty_scene_never_hits() {
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Y).unwrap();
        assert!(EmptyScene.cast(&ray, f32::INFINITY).is_none());
        assert!((&EmptyScene).query(Vec3::ZERO, Vec3::X, 1.0).is_none());
    }
}
