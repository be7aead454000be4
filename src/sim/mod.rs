//! Deterministic sweep core
//!
//! All hole-detection logic lives here. This module must stay pure:
//! - No rendering (draw intents go through `DebugRenderer`)
//! - No scheduling (the host calls `tick`)
//! - Geometry only through `SurfaceIntersector`

pub mod agent;
pub mod arc;
pub mod frame;
pub mod intersect;
pub mod sdf;
pub mod sweep;
pub mod tick;

pub use agent::{AgentVisual, ArcSweepAgent, align_up_to};
pub use arc::{ArcCircle, base_angles};
pub use frame::TangentFrame;
pub use intersect::{EmptyScene, Ray, RayHit, SurfaceIntersector, TargetId};
pub use sdf::{SdfScene, SdfShape, SceneObject};
pub use sweep::{
    ArcOutcome, ArcTrace, MissSegment, SweepOutcome, march_arc, render_arc, render_sweep, sweep,
};
pub use tick::{ShellManager, TickInput, TickReport, VisualSpawner};
