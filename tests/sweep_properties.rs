//! Property and scenario tests for the sweep core

use std::cell::{Cell, RefCell};
use std::sync::Arc;

use glam::Vec3;
use proptest::prelude::*;

use mesh_shell::SweepParameters;
use mesh_shell::renderer::DrawList;
use mesh_shell::sim::{
    ArcCircle, ArcOutcome, ArcSweepAgent, EmptyScene, RayHit, SdfScene, SdfShape,
    SurfaceIntersector, TangentFrame, TargetId, base_angles, sweep,
};

/// Records every query and answers from a script (`true` = hit)
struct Scripted {
    hits_on: Vec<usize>,
    calls: Cell<usize>,
    origins: RefCell<Vec<Vec3>>,
}

impl Scripted {
    fn new(hits_on: Vec<usize>) -> Self {
        Self {
            hits_on,
            calls: Cell::new(0),
            origins: RefCell::new(Vec::new()),
        }
    }
}

impl SurfaceIntersector for Scripted {
    fn query(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
        let call = self.calls.get() + 1;
        self.calls.set(call);
        self.origins.borrow_mut().push(origin);
        self.hits_on.contains(&call).then(|| RayHit {
            point: origin + direction * max_distance * 0.5,
            normal: -direction,
            distance: max_distance * 0.5,
            target: TargetId(call as u32),
        })
    }
}

fn unit_vector() -> impl Strategy<Value = Vec3> {
    (-1.0f32..1.0, -1.0f32..1.0, -1.0f32..1.0)
        .prop_filter("non-zero", |(x, y, z)| x * x + y * y + z * z > 1e-4)
        .prop_map(|(x, y, z)| Vec3::new(x, y, z).normalize())
}

fn point() -> impl Strategy<Value = Vec3> {
    (-50.0f32..50.0, -50.0f32..50.0, -50.0f32..50.0).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

proptest! {
    #[test]
    fn frame_is_orthonormal(normal in unit_vector()) {
        let frame = TangentFrame::from_normal(normal);
        prop_assert!(frame.orthonormal_error() < 1e-4, "{frame:?}");
    }

    #[test]
    fn every_arc_starts_at_anchor(
        anchor in point(),
        normal in unit_vector(),
        radius in 0.01f32..5.0,
        arcs in 1u32..16,
    ) {
        let frame = TangentFrame::from_normal(normal);
        for base in base_angles(arcs) {
            let circle = ArcCircle::new(anchor, &frame, base, radius);
            let p0 = circle.point_at(0.0);
            prop_assert!((p0 - anchor).length() < 1e-3 * (1.0 + anchor.length()));
        }
    }

    #[test]
    fn sweep_is_repeatable(
        anchor in point(),
        normal in unit_vector(),
        step in 1.0f32..30.0,
        hit_on in 1usize..40,
    ) {
        let params = SweepParameters { arc_step_angle: step, ..Default::default() };
        let first = Scripted::new(vec![hit_on]);
        let second = Scripted::new(vec![hit_on]);
        let a = sweep(anchor, normal, &params, &first);
        let b = sweep(anchor, normal, &params, &second);
        prop_assert_eq!(a, b);
        prop_assert_eq!(first.origins.borrow().clone(), second.origins.borrow().clone());
    }

    #[test]
    fn all_miss_query_count_is_ceil(step in 0.1f32..30.0, max in 45.0f32..359.0) {
        // Large enough that no chord falls under the degenerate-step epsilon
        let params = SweepParameters {
            arc_radius: 100.0,
            arc_step_angle: step,
            max_arc_angle: max,
            number_of_arcs: 1,
            ..Default::default()
        };
        let outcome = sweep(Vec3::ZERO, Vec3::Y, &params, &EmptyScene);
        let trace = &outcome.arcs[0];
        prop_assert!(trace.outcome.is_hole());
        let expected = (f64::from(max) / f64::from(step)).ceil() as usize;
        prop_assert_eq!(trace.queries, expected);
        prop_assert!(trace.final_angle >= max);
    }
}

#[test]
fn quarter_steps_all_miss_is_hole_after_four_queries() {
    let params = SweepParameters {
        arc_radius: 1.0,
        arc_step_angle: 90.0,
        max_arc_angle: 359.0,
        number_of_arcs: 1,
        ..Default::default()
    };
    let agent = ArcSweepAgent::new(Vec3::ZERO, Vec3::Y, TargetId(0), Some(Arc::new(params)));
    let intersector = Scripted::new(Vec::new());
    let outcome = agent.sweep(&intersector).unwrap();

    assert_eq!(intersector.calls.get(), 4);
    assert_eq!(outcome.arcs.len(), 1);
    match outcome.arcs[0].outcome {
        ArcOutcome::HoleSuspected { point, .. } => {
            // A full turn lands back on the anchor
            assert!(point.length() < 1e-5);
        }
        other => panic!("expected hole, got {other:?}"),
    }
}

#[test]
fn quarter_steps_hit_on_second_query() {
    let params = SweepParameters {
        arc_radius: 1.0,
        arc_step_angle: 90.0,
        max_arc_angle: 359.0,
        number_of_arcs: 1,
        ..Default::default()
    };
    let agent = ArcSweepAgent::new(Vec3::ZERO, Vec3::Y, TargetId(0), Some(Arc::new(params)));
    let intersector = Scripted::new(vec![2]);
    let outcome = agent.sweep(&intersector).unwrap();

    assert_eq!(intersector.calls.get(), 2);
    match outcome.arcs[0].outcome {
        ArcOutcome::Hit { hit, .. } => {
            assert_eq!(hit.target, TargetId(2));
            // Segment P(90) -> P(180) is (0,1,-1) -> (0,0,-2); hit is its midpoint
            assert!((hit.point - Vec3::new(0.0, 0.5, -1.5)).length() < 1e-5);
        }
        other => panic!("expected hit, got {other:?}"),
    }
}

#[test]
fn one_failing_agent_does_not_block_siblings() {
    let configured = ArcSweepAgent::new(
        Vec3::ZERO,
        Vec3::Y,
        TargetId(0),
        Some(Arc::new(SweepParameters::default())),
    );
    let unconfigured = ArcSweepAgent::new(Vec3::ONE, Vec3::Y, TargetId(0), None);

    let mut list = DrawList::new();
    assert!(unconfigured.draw_debug_arcs(&EmptyScene, &mut list).is_err());
    let outcome = configured.draw_debug_arcs(&EmptyScene, &mut list).unwrap();
    assert_eq!(outcome.hole_count(), 4);
}

#[test]
fn closed_box_surface_is_never_a_hole() {
    let mut scene = SdfScene::new();
    scene.add(SdfShape::Cuboid {
        center: Vec3::new(0.0, -1.0, 0.0),
        half_extents: Vec3::new(5.0, 1.0, 5.0),
    });
    let params = SweepParameters {
        number_of_arcs: 8,
        ..Default::default()
    };
    let agent = ArcSweepAgent::new(Vec3::ZERO, Vec3::Y, TargetId(0), Some(Arc::new(params)));
    let outcome = agent.sweep(&scene).unwrap();
    assert_eq!(outcome.hit_count(), 8);
    for trace in &outcome.arcs {
        if let ArcOutcome::Hit { hit, .. } = trace.outcome {
            assert!(hit.point.y.abs() < 1e-3);
            assert!((hit.normal - Vec3::Y).length() < 1e-2);
        }
    }
}
