//=========================================================================
// Overlay
//=========================================================================
//
// Screen-anchored 2D panels drawn on top of the 3D scene.
//
// A panel is authored in its own pixel space (origin top-left, y down,
// like a canvas) and placed at a corner of the window. `tessellate()`
// turns it into NDC triangles for the overlay pipeline.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::f32::consts::TAU;

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

//=== Internal Dependencies ===============================================

use super::color::Color;

//=== Constants ===========================================================

/// Segments used for discs and rings.
const CIRCLE_SEGMENTS: u32 = 48;

//=== Shapes ==============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    TopLeft,
    TopRight,
}

/// Filled or stroked primitive in panel pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Rect {
        origin: Vec2,
        size: Vec2,
        color: Color,
        alpha: f32,
    },
    Disc {
        center: Vec2,
        radius: f32,
        color: Color,
        alpha: f32,
    },
    Ring {
        center: Vec2,
        radius: f32,
        width: f32,
        color: Color,
        alpha: f32,
    },
}

//=== OverlayPanel ========================================================

#[derive(Debug, Clone, PartialEq)]
pub struct OverlayPanel {
    pub anchor: Anchor,
    /// Distance from the anchored window edges, in pixels.
    pub margin: f32,
    pub size: Vec2,
    pub background: Color,
    pub border: Option<(Color, f32)>,
    pub shapes: Vec<Shape>,
}

impl OverlayPanel {
    pub fn new(anchor: Anchor, size: Vec2, background: Color) -> Self {
        Self {
            anchor,
            margin: 10.0,
            size,
            background,
            border: None,
            shapes: Vec::new(),
        }
    }

    pub fn with_border(mut self, color: Color, width: f32) -> Self {
        self.border = Some((color, width));
        self
    }

    pub fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    /// Top-left corner of the panel in window pixels.
    pub fn window_origin(&self, viewport: Vec2) -> Vec2 {
        match self.anchor {
            Anchor::TopLeft => Vec2::splat(self.margin),
            Anchor::TopRight => Vec2::new(viewport.x - self.margin - self.size.x, self.margin),
        }
    }
}

//=== Vertex ==============================================================

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct OverlayVertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl OverlayVertex {
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<OverlayVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: 8,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

//=== Tessellation ========================================================

/// Converts a panel into a triangle list in normalized device coordinates.
///
/// Shapes are not clipped; callers keep them inside the panel. Returns an empty list for a zero-sized viewport.
pub fn tessellate(panel: &OverlayPanel, viewport: Vec2) -> Vec<OverlayVertex> {
    if viewport.x <= 0.0 || viewport.y <= 0.0 {
        return Vec::new();
    }

    let origin = panel.window_origin(viewport);
    let mut out = Tessellator {
        origin,
        viewport,
        vertices: Vec::with_capacity(64 + panel.shapes.len() * CIRCLE_SEGMENTS as usize * 6),
    };

    if let Some((color, width)) = panel.border {
        out.rect(Vec2::splat(-width), panel.size + Vec2::splat(2.0 * width), color, 1.0);
    }
    out.rect(Vec2::ZERO, panel.size, panel.background, 1.0);

    for shape in &panel.shapes {
        match *shape {
            Shape::Rect { origin, size, color, alpha } => out.rect(origin, size, color, alpha),
            Shape::Disc { center, radius, color, alpha } => out.disc(center, radius, color, alpha),
            Shape::Ring { center, radius, width, color, alpha } => {
                out.ring(center, radius, width, color, alpha)
            }
        }
    }

    out.vertices
}

struct Tessellator {
    origin: Vec2,
    viewport: Vec2,
    vertices: Vec<OverlayVertex>,
}

impl Tessellator {
    fn to_ndc(&self, local: Vec2) -> [f32; 2] {
        let p = self.origin + local;
        [p.x / self.viewport.x * 2.0 - 1.0, 1.0 - p.y / self.viewport.y * 2.0]
    }

    fn push(&mut self, local: Vec2, color: [f32; 4]) {
        let position = self.to_ndc(local);
        self.vertices.push(OverlayVertex { position, color });
    }

    fn quad(&mut self, corners: [Vec2; 4], color: [f32; 4]) {
        for i in [0, 1, 2, 0, 2, 3] {
            self.push(corners[i], color);
        }
    }

    fn rect(&mut self, origin: Vec2, size: Vec2, color: Color, alpha: f32) {
        let c = color.with_alpha(alpha);
        self.quad(
            [
                origin,
                origin + Vec2::new(size.x, 0.0),
                origin + size,
                origin + Vec2::new(0.0, size.y),
            ],
            c,
        );
    }

    fn disc(&mut self, center: Vec2, radius: f32, color: Color, alpha: f32) {
        if radius <= 0.0 {
            return;
        }
        let c = color.with_alpha(alpha);
        for i in 0..CIRCLE_SEGMENTS {
            let a0 = i as f32 / CIRCLE_SEGMENTS as f32 * TAU;
            let a1 = (i + 1) as f32 / CIRCLE_SEGMENTS as f32 * TAU;
            self.push(center, c);
            self.push(center + Vec2::from_angle(a0) * radius, c);
            self.push(center + Vec2::from_angle(a1) * radius, c);
        }
    }

    /// Stroke centered on `radius`.
    fn ring(&mut self, center: Vec2, radius: f32, width: f32, color: Color, alpha: f32) {
        if radius <= 0.0 || width <= 0.0 {
            return;
        }
        let c = color.with_alpha(alpha);
        let inner = (radius - width * 0.5).max(0.0);
        let outer = radius + width * 0.5;
        for i in 0..CIRCLE_SEGMENTS {
            let d0 = Vec2::from_angle(i as f32 / CIRCLE_SEGMENTS as f32 * TAU);
            let d1 = Vec2::from_angle((i + 1) as f32 / CIRCLE_SEGMENTS as f32 * TAU);
            self.quad(
                [center + d0 * inner, center + d0 * outer, center + d1 * outer, center + d1 * inner],
                c,
            );
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn camera_panel() -> OverlayPanel {
        OverlayPanel::new(Anchor::TopRight, Vec2::new(200.0, 150.0), Color::BLACK)
    }

    #[test]
    fn top_right_anchor_respects_margin() {
        let origin = camera_panel().window_origin(Vec2::new(800.0, 600.0));
        assert_eq!(origin, Vec2::new(590.0, 10.0));
    }

    #[test]
    fn background_maps_into_top_right_ndc() {
        let verts = tessellate(&camera_panel(), Vec2::new(800.0, 600.0));
        assert_eq!(verts.len(), 6);
        for v in &verts {
            assert!(v.position[0] >= 0.47 && v.position[0] <= 0.976);
            assert!(v.position[1] <= 0.967 && v.position[1] >= 0.466);
        }
    }

    #[test]
    fn panel_origin_is_upper_left_in_ndc() {
        let verts = tessellate(&camera_panel(), Vec2::new(800.0, 600.0));
        let first = verts[0].position;
        assert_relative_eq!(first[0], 590.0 / 400.0 - 1.0);
        assert_relative_eq!(first[1], 1.0 - 10.0 / 300.0);
    }

    #[test]
    fn disc_and_ring_emit_triangles() {
        let mut panel = camera_panel();
        panel.push(Shape::Disc { center: Vec2::new(100.0, 75.0), radius: 40.0, color: Color::WHITE, alpha: 1.0 });
        panel.push(Shape::Ring { center: Vec2::new(100.0, 75.0), radius: 45.0, width: 2.0, color: Color::RED, alpha: 1.0 });
        let verts = tessellate(&panel, Vec2::new(800.0, 600.0));
        let expected = 6 + CIRCLE_SEGMENTS as usize * 3 + CIRCLE_SEGMENTS as usize * 6;
        assert_eq!(verts.len(), expected);
    }

    #[test]
    fn zero_radius_disc_is_skipped() {
        let mut panel = camera_panel();
        panel.push(Shape::Disc { center: Vec2::ZERO, radius: 0.0, color: Color::WHITE, alpha: 1.0 });
        assert_eq!(tessellate(&panel, Vec2::new(800.0, 600.0)).len(), 6);
    }

    #[test]
    fn border_adds_a_quad_behind_background() {
        let panel = camera_panel().with_border(Color::from_hex(0x444444), 2.0);
        let verts = tessellate(&panel, Vec2::new(800.0, 600.0));
        assert_eq!(verts.len(), 12);
    }

    #[test]
    fn empty_viewport_yields_nothing() {
        assert!(tessellate(&camera_panel(), Vec2::ZERO).is_empty());
    }
}
