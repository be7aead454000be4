//! Per-frame entry point
//!
//! The host owns the loop and calls [`ShellManager::tick`] once per frame.
//! Agents are only added or removed at the start of a tick, never while
//! they are being swept.

use std::sync::Arc;

use glam::Vec3;

use super::agent::{AgentVisual, ArcSweepAgent, align_up_to};
use super::intersect::{Ray, SurfaceIntersector};
use crate::renderer::DebugRenderer;
use crate::settings::{ManagerSettings, SweepParameters};

/// Creates host visuals for newly placed agents
pub trait VisualSpawner {
    fn spawn(&mut self, position: Vec3, rotation: glam::Quat, scale: f32) -> Box<dyn AgentVisual>;
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Place an agent wherever each ray lands (clicks/taps)
    pub place: Vec<Ray>,
    /// Destroy every agent before placing
    pub clear: bool,
}

/// What happened during a tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub placed: usize,
    pub cleared: usize,
    pub swept: usize,
    /// Agents whose sweep was refused (missing or invalid parameters)
    pub failed: usize,
    pub arcs_hit: usize,
    pub arcs_hole_suspected: usize,
    pub queries: usize,
}

/// Owns every agent and the shared sweep parameters
pub struct ShellManager {
    agents: Vec<ArcSweepAgent>,
    params: Option<Arc<SweepParameters>>,
    settings: ManagerSettings,
    spawner: Option<Box<dyn VisualSpawner>>,
}

impl ShellManager {
    pub fn new(params: Option<Arc<SweepParameters>>, settings: ManagerSettings) -> Self {
        Self {
            agents: Vec::new(),
            params,
            settings,
            spawner: None,
        }
    }

    /// Spawn visuals for agents placed from now on
    pub fn with_spawner(mut self, spawner: Box<dyn VisualSpawner>) -> Self {
        self.spawner = Some(spawner);
        self
    }

    pub fn agents(&self) -> &[ArcSweepAgent] {
        &self.agents
    }

    pub fn settings(&self) -> &ManagerSettings {
        &self.settings
    }

    /// Swap the parameter bundle for new and existing agents
    pub fn set_params(&mut self, params: Option<Arc<SweepParameters>>) {
        for agent in &mut self.agents {
            agent.set_params(params.clone());
        }
        self.params = params;
    }

    /// Raycast into the scene and drop an agent where the ray lands.
    ///
    /// Returns the new agent's index, or `None` when nothing was hit.
    pub fn place_agent<I>(&mut self, ray: &Ray, scene: &I) -> Option<usize>
    where
        I: SurfaceIntersector + ?Sized,
    {
        let hit = scene.cast(ray, f32::INFINITY)?;
        let mut agent = ArcSweepAgent::new(hit.point, hit.normal, hit.target, self.params.clone());

        if let Some(spawner) = self.spawner.as_mut() {
            let rotation = align_up_to(agent.normal());
            let visual = spawner.spawn(hit.point, rotation, self.settings.agent_scale);
            agent.set_visual(visual);
        }

        self.agents.push(agent);
        log::info!(
            "Created agent #{} at {} on {:?}",
            self.agents.len(),
            hit.point,
            hit.target
        );
        Some(self.agents.len() - 1)
    }

    /// Destroy every agent; returns how many were removed
    pub fn clear(&mut self) -> usize {
        let count = self.agents.len();
        for agent in self.agents.drain(..) {
            agent.destroy();
        }
        log::info!("Cleared all agents ({count})");
        count
    }

    /// Apply input, then sweep and draw every agent
    pub fn tick<I>(
        &mut self,
        input: &TickInput,
        scene: &I,
        renderer: &mut dyn DebugRenderer,
    ) -> TickReport
    where
        I: SurfaceIntersector + ?Sized,
    {
        let mut report = TickReport::default();

        if input.clear {
            report.cleared = self.clear();
        }
        for ray in &input.place {
            if self.place_agent(ray, scene).is_some() {
                report.placed += 1;
            }
        }

        for agent in &self.agents {
            match agent.draw_debug_arcs(scene, renderer) {
                Ok(outcome) => {
                    report.swept += 1;
                    report.arcs_hit += outcome.hit_count();
                    report.arcs_hole_suspected += outcome.hole_count();
                    report.queries += outcome.total_queries();
                }
                Err(err) => {
                    log::warn!("skipping agent at {}: {err}", agent.position());
                    report.failed += 1;
                }
            }
        }

        report
    }

    /// Wire sphere at each agent plus a ray along its normal
    pub fn draw_gizmos(&self, renderer: &mut dyn DebugRenderer) {
        let scale = self.settings.agent_scale;
        let color = self.settings.agent_color;
        for agent in &self.agents {
            renderer.draw_wire_sphere(agent.position(), scale * 0.5, color);
            renderer.draw_ray(agent.position(), agent.normal() * scale * 2.0, color);
        }
    }
}
