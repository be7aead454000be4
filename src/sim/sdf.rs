//! SDF scene for ray queries
//!
//! A small signed-distance scene that implements [`SurfaceIntersector`] by
//! sphere tracing. Good enough to drive agents in the demo and in tests.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::intersect::{RayHit, SurfaceIntersector, TargetId};

/// Surface contact threshold
const HIT_EPSILON: f32 = 1e-4;
/// Smallest march step (keeps progress when skipping past a surface)
const MIN_STEP: f32 = 1e-4;
/// Central-difference offset for normals
const GRADIENT_EPSILON: f32 = 1e-3;
const MAX_STEPS: usize = 512;
/// Unbounded queries stop here
const FAR_CLIP: f32 = 1000.0;

/// Signed distance to a sphere
#[inline]
pub fn sd_sphere(p: Vec3, center: Vec3, radius: f32) -> f32 {
    (p - center).length() - radius
}

/// Signed distance to a horizontal plate of given thickness (0 for a sheet)
#[inline]
pub fn sd_slab(p: Vec3, height: f32, thickness: f32) -> f32 {
    (p.y - height).abs() - thickness * 0.5
}

/// Signed distance to an axis-aligned box
pub fn sd_cuboid(p: Vec3, center: Vec3, half_extents: Vec3) -> f32 {
    let q = (p - center).abs() - half_extents;
    q.max(Vec3::ZERO).length() + q.max_element().min(0.0)
}

/// Signed distance to an infinite vertical cylinder
#[inline]
pub fn sd_vertical_cylinder(p: Vec3, center: Vec3, radius: f32) -> f32 {
    Vec2::new(p.x - center.x, p.z - center.z).length() - radius
}

/// Scene primitive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SdfShape {
    Sphere {
        center: Vec3,
        radius: f32,
    },
    /// Horizontal plate; thickness 0 makes a single-sided sheet facing +Y
    Slab {
        height: f32,
        thickness: f32,
    },
    Cuboid {
        center: Vec3,
        half_extents: Vec3,
    },
    /// Vertical, unbounded; mostly useful as a hole punch
    Cylinder {
        center: Vec3,
        radius: f32,
    },
    /// `base` with `cut` carved out
    Subtract {
        base: Box<SdfShape>,
        cut: Box<SdfShape>,
    },
}

impl SdfShape {
    pub fn distance(&self, p: Vec3) -> f32 {
        match self {
            SdfShape::Sphere { center, radius } => sd_sphere(p, *center, *radius),
            SdfShape::Slab { height, thickness } => sd_slab(p, *height, *thickness),
            SdfShape::Cuboid {
                center,
                half_extents,
            } => sd_cuboid(p, *center, *half_extents),
            SdfShape::Cylinder { center, radius } => sd_vertical_cylinder(p, *center, *radius),
            SdfShape::Subtract { base, cut } => base.distance(p).max(-cut.distance(p)),
        }
    }

    /// Whether a ray arriving from `from` sees a front face.
    ///
    /// Only zero-thickness sheets are one-sided; everything else is closed.
    pub fn front_facing(&self, from: Vec3) -> bool {
        match self {
            SdfShape::Slab { height, thickness } if *thickness <= 0.0 => from.y > *height,
            SdfShape::Subtract { base, .. } => base.front_facing(from),
            _ => true,
        }
    }

    /// `self` with a vertical cylindrical hole punched through it
    pub fn with_hole(self, center: Vec3, radius: f32) -> Self {
        SdfShape::Subtract {
            base: Box::new(self),
            cut: Box::new(SdfShape::Cylinder { center, radius }),
        }
    }
}

/// A shape tagged with the handle reported on hits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub target: TargetId,
    pub shape: SdfShape,
}

/// Collection of SDF objects, unioned
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SdfScene {
    objects: Vec<SceneObject>,
}

impl SdfScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a shape, returning its handle
    pub fn add(&mut self, shape: SdfShape) -> TargetId {
        let target = TargetId(self.objects.len() as u32);
        self.objects.push(SceneObject { target, shape });
        target
    }

    /// Distance to the nearest object, with that object's index
    fn nearest(&self, p: Vec3) -> Option<(f32, usize)> {
        self.objects
            .iter()
            .enumerate()
            .map(|(i, o)| (o.shape.distance(p), i))
            .min_by(|a, b| a.0.total_cmp(&b.0))
    }

    /// Scene signed distance (infinite when empty)
    pub fn distance(&self, p: Vec3) -> f32 {
        self.nearest(p).map_or(f32::INFINITY, |(d, _)| d)
    }

    /// SDF gradient by central differences
    pub fn gradient(&self, p: Vec3) -> Vec3 {
        let e = GRADIENT_EPSILON;
        let dx = self.distance(p + Vec3::X * e) - self.distance(p - Vec3::X * e);
        let dy = self.distance(p + Vec3::Y * e) - self.distance(p - Vec3::Y * e);
        let dz = self.distance(p + Vec3::Z * e) - self.distance(p - Vec3::Z * e);
        Vec3::new(dx, dy, dz).normalize_or_zero()
    }
}

impl SurfaceIntersector for SdfScene {
    /// Sphere-trace along the ray.
    ///
    /// A hit is only reported when the ray reaches a surface from outside,
    /// so rays starting on a surface (or inside a solid) pass through it
    /// the same way back faces are ignored by mesh raycasts.
    fn query(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
        let limit = max_distance.min(FAR_CLIP);
        let mut t = 0.0;
        let mut prev_point = origin;
        let mut prev_outside = false;

        for _ in 0..MAX_STEPS {
            if t > limit {
                break;
            }
            let p = origin + direction * t;
            let (d, index) = self.nearest(p)?;

            if d < HIT_EPSILON {
                let object = &self.objects[index];
                if prev_outside && object.shape.front_facing(prev_point) {
                    // Sheets have no usable gradient exactly on the surface
                    let normal = [p, prev_point]
                        .into_iter()
                        .map(|q| self.gradient(q))
                        .find(|n| n.dot(direction) < 0.0)
                        .unwrap_or(-direction);
                    return Some(RayHit {
                        point: p,
                        normal,
                        distance: t,
                        target: object.target,
                    });
                }
                prev_outside = false;
            } else {
                prev_outside = true;
            }

            prev_point = p;
            t += d.abs().max(MIN_STEP);
        }

        None
    }
}
