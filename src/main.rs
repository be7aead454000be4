//! Mesh Shell demo host
//!
//! Builds a small scene, scatters agents over it and runs a few ticks,
//! logging which arcs found surfaces and which suspect a hole.
//!
//! Usage: `mesh-shell [settings.json]`

use std::process::ExitCode;
use std::sync::Arc;

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use mesh_shell::renderer::DrawList;
use mesh_shell::sim::{Ray, SdfScene, SdfShape, ShellManager, TickInput};
use mesh_shell::{ManagerSettings, SweepParameters};

/// Deterministic scatter seed
const SEED: u64 = 0x5eed_ab1e;
const AGENT_COUNT: usize = 12;
const TICKS: u32 = 3;

fn build_scene() -> SdfScene {
    let mut scene = SdfScene::new();
    // Single-sided floor with a hole punched through it
    scene.add(
        SdfShape::Slab {
            height: 0.0,
            thickness: 0.0,
        }
        .with_hole(Vec3::new(0.0, 0.0, -1.0), 0.3),
    );
    scene.add(SdfShape::Sphere {
        center: Vec3::new(2.5, 0.6, 2.5),
        radius: 0.6,
    });
    scene
}

fn load_params() -> Result<SweepParameters, mesh_shell::SweepError> {
    match std::env::args().nth(1) {
        Some(path) => SweepParameters::load(path),
        None => Ok(SweepParameters::default()),
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let params = match load_params() {
        Ok(params) => params,
        Err(err) => {
            log::error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let scene = build_scene();
    let mut manager = ShellManager::new(Some(Arc::new(params)), ManagerSettings::default());

    let mut rng = Pcg32::seed_from_u64(SEED);
    let place = (0..AGENT_COUNT)
        .filter_map(|_| {
            let x = rng.random_range(-3.0..3.0);
            let z = rng.random_range(-3.0..3.0);
            Ray::new(Vec3::new(x, 10.0, z), Vec3::NEG_Y)
        })
        .collect();

    let mut draw_list = DrawList::new();
    let mut input = TickInput {
        place,
        ..Default::default()
    };

    for frame in 0..TICKS {
        draw_list.clear();
        let report = manager.tick(&input, &scene, &mut draw_list);
        manager.draw_gizmos(&mut draw_list);

        log::info!(
            "tick {frame}: {} agents, {} arcs hit, {} arcs hole suspected, {} queries, {} line vertices",
            report.swept,
            report.arcs_hit,
            report.arcs_hole_suspected,
            report.queries,
            draw_list.line_vertices().len()
        );

        // Placement is a one-shot input
        input = TickInput::default();
    }

    for (i, agent) in manager.agents().iter().enumerate() {
        match agent.sweep(&scene) {
            Ok(outcome) if outcome.hole_suspected() => {
                log::warn!(
                    "agent #{i} at {}: {} of {} arcs suspect a hole",
                    agent.position(),
                    outcome.hole_count(),
                    outcome.arcs.len()
                );
            }
            Ok(_) => {}
            Err(err) => log::error!("agent #{i}: {err}"),
        }
    }

    manager.clear();
    ExitCode::SUCCESS
}
