//! Recording renderer
//!
//! Keeps every draw intent so hosts can flush them to their own line
//! pipeline once per frame, and so tests can inspect what a sweep drew.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use super::{Color, DebugRenderer};

/// One recorded draw intent
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Line { start: Vec3, end: Vec3, color: Color },
    Ray { origin: Vec3, direction: Vec3, color: Color },
    Marker { position: Vec3, half_size: f32, color: Color },
}

impl DrawCommand {
    pub fn color(&self) -> Color {
        match *self {
            DrawCommand::Line { color, .. }
            | DrawCommand::Ray { color, .. }
            | DrawCommand::Marker { color, .. } => color,
        }
    }

    /// Expand into line-list endpoint pairs
    pub fn endpoints(&self) -> Vec<(Vec3, Vec3)> {
        match *self {
            DrawCommand::Line { start, end, .. } => vec![(start, end)],
            DrawCommand::Ray {
                origin, direction, ..
            } => vec![(origin, origin + direction)],
            DrawCommand::Marker {
                position,
                half_size,
                ..
            } => [Vec3::X, Vec3::Y, Vec3::Z]
                .into_iter()
                .map(|axis| (position - axis * half_size, position + axis * half_size))
                .collect(),
        }
    }
}

/// Line-list vertex with position and color, laid out for GPU upload
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl LineVertex {
    pub const fn new(position: Vec3, color: Color) -> Self {
        Self {
            position: [position.x, position.y, position.z],
            color,
        }
    }
}

/// Draw intents recorded during one tick
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Drop everything recorded so far (call at the start of each frame)
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Number of commands drawn in exactly `color`
    pub fn count_with_color(&self, color: Color) -> usize {
        self.commands.iter().filter(|c| c.color() == color).count()
    }

    /// Flatten into a line list (two vertices per segment)
    pub fn line_vertices(&self) -> Vec<LineVertex> {
        let mut vertices = Vec::with_capacity(self.commands.len() * 2);
        for command in &self.commands {
            let color = command.color();
            for (a, b) in command.endpoints() {
                vertices.push(LineVertex::new(a, color));
                vertices.push(LineVertex::new(b, color));
            }
        }
        vertices
    }

    /// Raw bytes of [`Self::line_vertices`] for a vertex buffer
    pub fn vertex_bytes(&self) -> Vec<u8> {
        bytemuck::cast_slice(&self.line_vertices()).to_vec()
    }
}

impl DebugRenderer for DrawList {
    fn draw_line(&mut self, start: Vec3, end: Vec3, color: Color) {
        self.commands.push(DrawCommand::Line { start, end, color });
    }

    fn draw_ray(&mut self, origin: Vec3, direction: Vec3, color: Color) {
        self.commands.push(DrawCommand::Ray {
            origin,
            direction,
            color,
        });
    }

    fn draw_marker(&mut self, position: Vec3, half_size: f32, color: Color) {
        self.commands.push(DrawCommand::Marker {
            position,
            half_size,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::colors;

    #[test]
    fn test_records_semantic_commands() {
        let mut list = DrawList::new();
        list.draw_line(Vec3::ZERO, Vec3::X, colors::RED);
        list.draw_ray(Vec3::ZERO, Vec3::Y, colors::CYAN);
        list.draw_marker(Vec3::ONE, 0.02, colors::RED);

        assert_eq!(list.len(), 3);
        assert_eq!(list.count_with_color(colors::RED), 2);
        assert!(matches!(list.commands()[2], DrawCommand::Marker { .. }));
    }

    #[test]
    fn test_line_vertices_expand_markers() {
        let mut list = DrawList::new();
        list.draw_line(Vec3::ZERO, Vec3::X, colors::RED);
        list.draw_marker(Vec3::ZERO, 0.5, colors::GREEN);

        // 1 line + 3 marker arms, two vertices each
        let verts = list.line_vertices();
        assert_eq!(verts.len(), 8);
        assert_eq!(verts[1].position, [1.0, 0.0, 0.0]);
        assert_eq!(verts[2].position, [-0.5, 0.0, 0.0]);

        let bytes = list.vertex_bytes();
        assert_eq!(bytes.len(), 8 * std::mem::size_of::<LineVertex>());
    }

    #[test]
    fn test_clear() {
        let mut list = DrawList::new();
        list.draw_line(Vec3::ZERO, Vec3::X, colors::RED);
        list.clear();
        assert!(list.is_empty());
    }
}
