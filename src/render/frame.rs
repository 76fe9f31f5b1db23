//=========================================================================
// Frame Snapshot
//=========================================================================
//
// Immutable description of one rendered frame, produced by the logic
// thread and consumed by the renderer on the platform thread.
//
// Architecture:
// ```text
//  Scene::compose(&mut FrameBuilder)
//        ↓ mesh() / line() / arrow() / overlay()
//  FrameBuilder::finish() → FrameSnapshot ──channel──► Renderer
// ```
//
// Meshes are shared through `Arc` so static scene parts cost a pointer
// copy per frame. Everything else is plain data.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::Arc;

use glam::{Mat4, Vec3};

//=== Internal Dependencies ===============================================

use super::color::Color;
use super::overlay::OverlayPanel;
use crate::geometry::{Arrow, Mesh};

//=== Constants ===========================================================

/// Vertical field of view in degrees.
pub const FIELD_OF_VIEW_DEG: f32 = 60.0;
pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 1000.0;

//=== Material ============================================================

/// How a surface responds to scene lights.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shading {
    /// Ambient + directional lighting with a specular highlight.
    Lit,
    /// Flat color, ignores lights.
    Unlit,
}

/// Surface appearance for a [`DrawItem`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: Color,
    pub opacity: f32,
    pub emissive: Color,
    pub emissive_intensity: f32,
    pub shading: Shading,
}

impl Material {
    pub fn lit(color: Color) -> Self {
        Self {
            color,
            opacity: 1.0,
            emissive: Color::BLACK,
            emissive_intensity: 1.0,
            shading: Shading::Lit,
        }
    }

    pub fn unlit(color: Color) -> Self {
        Self {
            shading: Shading::Unlit,
            ..Self::lit(color)
        }
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub fn with_emissive(mut self, emissive: Color, intensity: f32) -> Self {
        self.emissive = emissive;
        self.emissive_intensity = intensity;
        self
    }

    /// Translucent surfaces are blended and drawn after opaque ones.
    pub fn is_translucent(&self) -> bool {
        self.opacity < 1.0
    }
}

//=== Draw Primitives =====================================================

/// A mesh placed in the world with a material.
#[derive(Debug, Clone)]
pub struct DrawItem {
    pub mesh: Arc<Mesh>,
    pub model: Mat4,
    pub material: Material,
}

/// Unlit polyline in world space.
#[derive(Debug, Clone, PartialEq)]
pub struct LineStrip {
    pub points: Vec<Vec3>,
    pub color: Color,
    pub opacity: f32,
}

//=== Viewpoint ===========================================================

/// Perspective camera looking from `eye` at `target`, Y up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewpoint {
    pub eye: Vec3,
    pub target: Vec3,
}

impl Viewpoint {
    pub fn new(eye: Vec3, target: Vec3) -> Self {
        Self { eye, target }
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, Vec3::Y)
    }

    /// Combined projection · view for the given aspect ratio (width / height).
    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        let aspect = if aspect.is_finite() && aspect > 0.0 { aspect } else { 1.0 };
        let proj = Mat4::perspective_rh(
            FIELD_OF_VIEW_DEG.to_radians(),
            aspect,
            NEAR_PLANE,
            FAR_PLANE,
        );
        proj * self.view()
    }
}

impl Default for Viewpoint {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 5.0, 10.0), Vec3::ZERO)
    }
}

//=== FrameSnapshot =======================================================

/// Everything the renderer needs to draw one frame.
#[derive(Debug, Clone)]
pub struct FrameSnapshot {
    /// Logic tick that produced this frame.
    pub tick: u64,
    pub background: Color,
    pub viewpoint: Viewpoint,
    pub items: Vec<DrawItem>,
    pub lines: Vec<LineStrip>,
    pub overlay: Option<OverlayPanel>,
    /// Window caption text (scene name, readouts, key help).
    pub caption: String,
}

impl FrameSnapshot {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.lines.is_empty() && self.overlay.is_none()
    }
}

//=== FrameBuilder ========================================================

/// Accumulates draw commands while a scene composes its frame.
#[derive(Debug, Default)]
pub struct FrameBuilder {
    items: Vec<DrawItem>,
    lines: Vec<LineStrip>,
    overlay: Option<OverlayPanel>,
}

impl FrameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Meshes -----------------------------------------------------------

    pub fn mesh(&mut self, mesh: &Arc<Mesh>, model: impl Into<Mat4>, material: Material) {
        self.items.push(DrawItem {
            mesh: Arc::clone(mesh),
            model: model.into(),
            material,
        });
    }

    //--- Lines ------------------------------------------------------------

    pub fn line(&mut self, points: Vec<Vec3>, color: Color, opacity: f32) {
        if points.len() < 2 {
            return;
        }
        self.lines.push(LineStrip {
            points,
            color,
            opacity: opacity.clamp(0.0, 1.0),
        });
    }

    pub fn segment(&mut self, from: Vec3, to: Vec3, color: Color, opacity: f32) {
        self.line(vec![from, to], color, opacity);
    }

    /// Unlit shaft line plus cone head.
    pub fn arrow(&mut self, arrow: &Arrow, head: &Arc<Mesh>, color: Color) {
        let [from, to] = arrow.shaft();
        self.segment(from, to, color, 1.0);
        self.mesh(head, arrow.head_matrix(), Material::unlit(color));
    }

    //--- Overlay ----------------------------------------------------------

    pub fn overlay(&mut self, panel: OverlayPanel) {
        self.overlay = Some(panel);
    }

    //--- Queries ----------------------------------------------------------

    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    pub fn lines(&self) -> &[LineStrip] {
        &self.lines
    }

    //--- Completion -------------------------------------------------------

    pub fn finish(self, tick: u64, background: Color, viewpoint: Viewpoint, caption: String) -> FrameSnapshot {
        FrameSnapshot {
            tick,
            background,
            viewpoint,
            items: self.items,
            lines: self.lines,
            overlay: self.overlay,
            caption,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
