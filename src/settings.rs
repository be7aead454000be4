//! Sweep parameters and manager preferences
//!
//! Loaded from JSON; any field left out keeps its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SweepError};
use crate::renderer::{Color, colors, lerp_color};

/// A color stop in a gradient
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientKey {
    pub color: Color,
    /// Position in [0, 1]
    pub time: f32,
}

/// Piecewise-linear color gradient
///
/// Serialized as its list of keys; deserializing sorts them like [`Gradient::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<GradientKey>", into = "Vec<GradientKey>")]
pub struct Gradient {
    keys: Vec<GradientKey>,
}

impl From<Vec<GradientKey>> for Gradient {
    fn from(keys: Vec<GradientKey>) -> Self {
        Self::new(keys)
    }
}

impl From<Gradient> for Vec<GradientKey> {
    fn from(gradient: Gradient) -> Self {
        gradient.keys
    }
}

impl Default for Gradient {
    fn default() -> Self {
        Self::two_color(colors::YELLOW, colors::MAGENTA)
    }
}

impl Gradient {
    /// Build from keys (sorted by time)
    pub fn new(mut keys: Vec<GradientKey>) -> Self {
        keys.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self { keys }
    }

    /// Two-stop gradient from `start` at 0 to `end` at 1
    pub fn two_color(start: Color, end: Color) -> Self {
        Self::new(vec![
            GradientKey { color: start, time: 0.0 },
            GradientKey { color: end, time: 1.0 },
        ])
    }

    pub fn keys(&self) -> &[GradientKey] {
        &self.keys
    }

    /// Sample the gradient at `t` (clamped to [0, 1])
    pub fn evaluate(&self, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        let (first, last) = match (self.keys.first(), self.keys.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return colors::WHITE,
        };

        if t <= first.time {
            return first.color;
        }
        if t >= last.time {
            return last.color;
        }

        for pair in self.keys.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            if t <= b.time {
                let span = b.time - a.time;
                if span <= f32::EPSILON {
                    return b.color;
                }
                return lerp_color(a.color, b.color, (t - a.time) / span);
            }
        }

        last.color
    }
}

/// Tunable constants for one agent's arc sweep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepParameters {
    // === Arc Configuration ===
    /// Radius of the search arcs
    pub arc_radius: f32,
    /// Degrees per step along an arc
    pub arc_step_angle: f32,
    /// Maximum degrees an arc may travel (just under 360 for a near-closed loop)
    pub max_arc_angle: f32,
    /// Number of sweep planes, evenly spaced around the normal
    pub number_of_arcs: u32,

    // === Visuals ===
    /// Miss segments, sampled by sweep progress
    pub arc_gradient: Gradient,
    /// Segment ending on a hit
    pub hit_color: Color,
    /// Hit normal ray
    pub normal_color: Color,
    /// Hole warning ray and cross
    pub hole_warning_color: Color,

    // === Debug ===
    /// Draw a helper line from the agent to each circle center
    pub show_circle_center: bool,
    /// Alpha for the circle center line
    pub circle_center_alpha: f32,
}

impl Default for SweepParameters {
    fn default() -> Self {
        Self {
            arc_radius: 0.5,
            arc_step_angle: 5.0,
            max_arc_angle: 359.0,
            number_of_arcs: 4,

            arc_gradient: Gradient::default(),
            hit_color: colors::GREEN,
            normal_color: colors::CYAN,
            hole_warning_color: colors::MAGENTA,

            show_circle_center: true,
            circle_center_alpha: 0.1,
        }
    }
}

impl SweepParameters {
    /// Check range invariants. NaN fails every check.
    pub fn validate(&self) -> Result<()> {
        if !(self.arc_radius > 0.0) || !self.arc_radius.is_finite() {
            return Err(SweepError::InvalidParameter {
                name: "arc_radius",
                value: self.arc_radius,
                reason: "must be a finite value > 0",
            });
        }
        if !(self.max_arc_angle > 0.0 && self.max_arc_angle <= 360.0) {
            return Err(SweepError::InvalidParameter {
                name: "max_arc_angle",
                value: self.max_arc_angle,
                reason: "must be in (0, 360]",
            });
        }
        if !(self.arc_step_angle > 0.0 && self.arc_step_angle <= self.max_arc_angle) {
            return Err(SweepError::InvalidParameter {
                name: "arc_step_angle",
                value: self.arc_step_angle,
                reason: "must be in (0, max_arc_angle]",
            });
        }
        if self.number_of_arcs == 0 {
            return Err(SweepError::InvalidParameter {
                name: "number_of_arcs",
                value: 0.0,
                reason: "must be at least 1",
            });
        }
        if !(0.0..=1.0).contains(&self.circle_center_alpha) {
            return Err(SweepError::InvalidParameter {
                name: "circle_center_alpha",
                value: self.circle_center_alpha,
                reason: "must be in [0, 1]",
            });
        }
        Ok(())
    }

    /// Steps an arc takes to cover `max_arc_angle`, i.e. `ceil(max / step)`.
    ///
    /// Zero when either angle is non-positive or not finite.
    pub fn steps_per_arc(&self) -> usize {
        let max = f64::from(self.max_arc_angle);
        let step = f64::from(self.arc_step_angle);
        if !(max > 0.0 && step > 0.0) || !max.is_finite() || !step.is_finite() {
            return 0;
        }
        (max / step).ceil() as usize
    }

    /// Degrees between neighbouring sweep planes
    pub fn base_angle_step(&self) -> f32 {
        360.0 / self.number_of_arcs as f32
    }

    /// Parse and validate from JSON text
    pub fn from_json_str(json: &str) -> Result<Self> {
        let params: Self = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    /// Load and validate from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let params = Self::from_json_str(&json)?;
        log::info!("Loaded sweep parameters from {}", path.display());
        Ok(params)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Placement and gizmo preferences for the agent collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagerSettings {
    /// Uniform scale for spawned agent visuals
    pub agent_scale: f32,
    /// Gizmo color for agent positions and normals
    pub agent_color: Color,
}

impl Default for ManagerSettings {
    fn default() -> Self {
        Self {
            agent_scale: 0.1,
            agent_color: colors::CYAN,
        }
    }
}
