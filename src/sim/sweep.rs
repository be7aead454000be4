//! Arc marching
//!
//! Each arc walks its circle in fixed angular steps, casting a short ray
//! between consecutive points. The first hit ends the arc. An arc that
//! sweeps all the way to `max_arc_angle` without touching anything is
//! flagged as a suspected hole.
//!
//! Marching is a pure function of `(anchor, normal, parameters)` plus
//! whatever the intersector answers; nothing carries over between sweeps.

use glam::Vec3;

use super::arc::{ArcCircle, base_angles};
use super::frame::TangentFrame;
use super::intersect::{RayHit, SurfaceIntersector};
use crate::consts::{
    EPSILON, HIT_MARKER_SIZE, HIT_NORMAL_LENGTH, HOLE_CROSS_SIZE, HOLE_MARKER_LIFT,
    HOLE_RAY_LENGTH,
};
use crate::renderer::{DebugRenderer, colors, with_alpha};
use crate::settings::SweepParameters;

/// Terminal state of one arc
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArcOutcome {
    /// A ray segment reached a surface
    Hit {
        /// Start of the segment that hit
        from: Vec3,
        hit: RayHit,
    },
    /// The arc completed its range without touching anything
    HoleSuspected {
        /// Last point reached on the circle
        point: Vec3,
        /// Fixed cue above the circle center
        warning_point: Vec3,
    },
}

impl ArcOutcome {
    pub fn is_hit(&self) -> bool {
        matches!(self, ArcOutcome::Hit { .. })
    }

    pub fn is_hole(&self) -> bool {
        matches!(self, ArcOutcome::HoleSuspected { .. })
    }
}

/// A queried segment that missed everything
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MissSegment {
    pub start: Vec3,
    pub end: Vec3,
    /// `angle / max_arc_angle` at `end`
    pub progress: f32,
}

/// Everything one arc did during a sweep
#[derive(Debug, Clone, PartialEq)]
pub struct ArcTrace {
    pub circle: ArcCircle,
    pub misses: Vec<MissSegment>,
    /// Ray queries issued (degenerate steps are skipped and not counted)
    pub queries: usize,
    /// Swept angle when the arc stopped (degrees)
    pub final_angle: f32,
    pub outcome: ArcOutcome,
}

/// Result of sweeping every arc of an agent
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SweepOutcome {
    pub arcs: Vec<ArcTrace>,
}

impl SweepOutcome {
    pub fn hit_count(&self) -> usize {
        self.arcs.iter().filter(|a| a.outcome.is_hit()).count()
    }

    pub fn hole_count(&self) -> usize {
        self.arcs.iter().filter(|a| a.outcome.is_hole()).count()
    }

    /// Any arc came back empty
    pub fn hole_suspected(&self) -> bool {
        self.hole_count() > 0
    }

    pub fn total_queries(&self) -> usize {
        self.arcs.iter().map(|a| a.queries).sum()
    }
}

/// March a single arc until it hits or runs out of angle.
///
/// Takes exactly [`SweepParameters::steps_per_arc`] steps unless a query
/// hits first. A non-positive or non-finite step marches nothing.
pub fn march_arc<I>(circle: &ArcCircle, params: &SweepParameters, intersector: &I) -> ArcTrace
where
    I: SurfaceIntersector + ?Sized,
{
    let max_angle = params.max_arc_angle;
    let steps = params.steps_per_arc();
    if steps == 0 {
        log::warn!(
            "arc {:.1}: unusable step {} for range {}, not marching",
            circle.base_angle,
            params.arc_step_angle,
            max_angle
        );
    }
    let step = f64::from(params.arc_step_angle);

    let mut last = circle.anchor;
    let mut angle = 0.0;
    let mut queries = 0;
    let mut misses = Vec::new();

    // Angles come from the step index so tiny steps cannot stall in f32
    for i in 1..=steps {
        angle = (i as f64 * step) as f32;
        let next = circle.point_at(angle);
        let delta = next - last;
        let distance = delta.length();

        // Degenerate step: advance without a query
        if distance > EPSILON {
            queries += 1;
            let direction = delta / distance;
            if let Some(hit) = intersector.query(last, direction, distance) {
                log::trace!(
                    "arc {:.1}: hit at {:.1}° after {} queries",
                    circle.base_angle,
                    angle,
                    queries
                );
                return ArcTrace {
                    circle: *circle,
                    misses,
                    queries,
                    final_angle: angle,
                    outcome: ArcOutcome::Hit { from: last, hit },
                };
            }
            misses.push(MissSegment {
                start: last,
                end: next,
                progress: angle / max_angle,
            });
        }

        last = next;
    }

    log::trace!(
        "arc {:.1}: no hit after {} queries, hole suspected",
        circle.base_angle,
        queries
    );
    ArcTrace {
        circle: *circle,
        misses,
        queries,
        final_angle: angle,
        outcome: ArcOutcome::HoleSuspected {
            point: last,
            warning_point: circle.warning_point(HOLE_MARKER_LIFT),
        },
    }
}

/// Build the frame for `normal` and march every arc around it.
///
/// `normal` must be unit length; `params` must already be validated.
pub fn sweep<I>(
    anchor: Vec3,
    normal: Vec3,
    params: &SweepParameters,
    intersector: &I,
) -> SweepOutcome
where
    I: SurfaceIntersector + ?Sized,
{
    let frame = TangentFrame::from_normal(normal);
    let arcs = base_angles(params.number_of_arcs)
        .map(|base| {
            let circle = ArcCircle::new(anchor, &frame, base, params.arc_radius);
            march_arc(&circle, params, intersector)
        })
        .collect();
    SweepOutcome { arcs }
}

/// Emit the debug overlay for one arc
pub fn render_arc(trace: &ArcTrace, params: &SweepParameters, renderer: &mut dyn DebugRenderer) {
    for seg in &trace.misses {
        renderer.draw_line(seg.start, seg.end, params.arc_gradient.evaluate(seg.progress));
    }

    let circle = &trace.circle;
    match trace.outcome {
        ArcOutcome::Hit { from, hit } => {
            renderer.draw_line(from, hit.point, params.hit_color);
            renderer.draw_ray(hit.point, hit.normal * HIT_NORMAL_LENGTH, params.normal_color);
            renderer.draw_marker(hit.point, HIT_MARKER_SIZE, colors::RED);
        }
        ArcOutcome::HoleSuspected {
            point,
            warning_point,
        } => {
            let outward = (point - circle.center).normalize_or_zero();
            renderer.draw_ray(point, outward * HOLE_RAY_LENGTH, params.hole_warning_color);

            let right = circle.frame.right * HOLE_CROSS_SIZE;
            let forward = circle.frame.forward * HOLE_CROSS_SIZE;
            renderer.draw_line(
                warning_point - right,
                warning_point + right,
                params.hole_warning_color,
            );
            renderer.draw_line(
                warning_point - forward,
                warning_point + forward,
                params.hole_warning_color,
            );
        }
    }

    if params.show_circle_center {
        renderer.draw_line(
            circle.anchor,
            circle.center,
            with_alpha(colors::RED, params.circle_center_alpha),
        );
    }
}

/// Emit the debug overlay for every arc of a sweep
pub fn render_sweep(
    outcome: &SweepOutcome,
    params: &SweepParameters,
    renderer: &mut dyn DebugRenderer,
) {
    for trace in &outcome.arcs {
        render_arc(trace, params, renderer);
    }
}
