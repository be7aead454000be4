//! Arc-sweep agents
//!
//! An agent is pinned to a surface point and normal. Every tick it rebuilds
//! its tangent frame and sweeps its arcs from scratch.

use std::sync::Arc;

use glam::{Quat, Vec3};

use super::intersect::{SurfaceIntersector, TargetId};
use super::sweep::{SweepOutcome, render_sweep, sweep};
use crate::consts::WORLD_UP;
use crate::error::{Result, SweepError};
use crate::renderer::DebugRenderer;
use crate::settings::SweepParameters;

/// Host-side visual attached to an agent (a marker mesh, gizmo, ...)
pub trait AgentVisual {
    fn set_position(&mut self, position: Vec3);
    fn set_rotation(&mut self, rotation: Quat);
    /// Release the host resource
    fn destroy(&mut self);
}

/// Orientation that turns local up onto `normal`
#[inline]
pub fn align_up_to(normal: Vec3) -> Quat {
    Quat::from_rotation_arc(WORLD_UP, normal)
}

/// Normalize, falling back to world up for zero-length input
fn unit_normal(normal: Vec3) -> Vec3 {
    normal.try_normalize().unwrap_or_else(|| {
        log::warn!("degenerate normal {normal}, using world up");
        WORLD_UP
    })
}

/// A surface point that sweeps arcs around its normal
pub struct ArcSweepAgent {
    position: Vec3,
    /// Always unit length
    normal: Vec3,
    target: TargetId,
    params: Option<Arc<SweepParameters>>,
    visual: Option<Box<dyn AgentVisual>>,
}

impl std::fmt::Debug for ArcSweepAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArcSweepAgent")
            .field("position", &self.position)
            .field("normal", &self.normal)
            .field("target", &self.target)
            .field("has_params", &self.params.is_some())
            .field("has_visual", &self.visual.is_some())
            .finish()
    }
}

impl ArcSweepAgent {
    pub fn new(
        position: Vec3,
        normal: Vec3,
        target: TargetId,
        params: Option<Arc<SweepParameters>>,
    ) -> Self {
        Self {
            position,
            normal: unit_normal(normal),
            target,
            params,
            visual: None,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    pub fn target(&self) -> TargetId {
        self.target
    }

    pub fn params(&self) -> Option<&SweepParameters> {
        self.params.as_deref()
    }

    /// Swap the parameter bundle used by later sweeps
    pub fn set_params(&mut self, params: Option<Arc<SweepParameters>>) {
        self.params = params;
    }

    pub fn has_visual(&self) -> bool {
        self.visual.is_some()
    }

    /// Attach a visual, destroying any previous one
    pub fn set_visual(&mut self, mut visual: Box<dyn AgentVisual>) {
        visual.set_position(self.position);
        visual.set_rotation(align_up_to(self.normal));
        if let Some(mut old) = self.visual.replace(visual) {
            old.destroy();
        }
    }

    /// Sweep every arc and classify it
    pub fn sweep<I>(&self, intersector: &I) -> Result<SweepOutcome>
    where
        I: SurfaceIntersector + ?Sized,
    {
        let Some(params) = self.params.as_deref() else {
            log::error!("agent at {} has no sweep parameters assigned", self.position);
            return Err(SweepError::MissingConfiguration);
        };
        params.validate()?;

        let outcome = sweep(self.position, self.normal, params, intersector);
        log::debug!(
            "agent at {}: {} hit, {} hole suspected, {} queries",
            self.position,
            outcome.hit_count(),
            outcome.hole_count(),
            outcome.total_queries()
        );
        Ok(outcome)
    }

    /// Sweep and emit the debug overlay
    pub fn draw_debug_arcs<I>(
        &self,
        intersector: &I,
        renderer: &mut dyn DebugRenderer,
    ) -> Result<SweepOutcome>
    where
        I: SurfaceIntersector + ?Sized,
    {
        let outcome = self.sweep(intersector)?;
        if let Some(params) = self.params.as_deref() {
            render_sweep(&outcome, params, renderer);
        }
        Ok(outcome)
    }

    /// Move the agent and re-align its visual
    pub fn update_position(&mut self, position: Vec3, normal: Vec3) {
        self.position = position;
        self.normal = unit_normal(normal);

        if let Some(visual) = self.visual.as_mut() {
            visual.set_position(self.position);
            visual.set_rotation(align_up_to(self.normal));
        }
    }

    /// Neighbor discovery is not implemented yet; always empty
    pub fn search_for_neighbors(&self) -> Vec<TargetId> {
        Vec::new()
    }

    /// Release the agent and its visual
    pub fn destroy(mut self) {
        if let Some(mut visual) = self.visual.take() {
            visual.destroy();
        }
    }
}
