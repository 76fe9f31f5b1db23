//=========================================================================
// Rendering
//=========================================================================
//
// Frame description types (built on the logic thread) and the wgpu
// renderer that consumes them (on the platform thread).
//
// Architecture:
// ```text
//  Logic thread                         Platform thread
//  ┌───────────────────────┐            ┌──────────────────────────┐
//  │ Scene::compose()      │            │ Renderer::render()       │
//  │   ↓                   │  snapshot  │   ├─ FrameBatch::build() │
//  │ FrameBuilder          │ ─────────► │   ├─ overlay tessellate  │
//  │   ↓ finish()          │ (crossbeam)│   └─ one render pass     │
//  │ FrameSnapshot         │            └──────────────────────────┘
//  └───────────────────────┘
// ```
//
//=========================================================================

//=== Module Declarations =================================================

pub mod batch;
pub mod color;
pub mod frame;
pub mod overlay;
pub(crate) mod renderer;

//=== Public API ==========================================================

pub use color::Color;
pub use frame::{DrawItem, FrameBuilder, FrameSnapshot, LineStrip, Material, Shading, Viewpoint};
pub use overlay::{Anchor, OverlayPanel, Shape};
pub use renderer::RenderError;

pub(crate) use renderer::Renderer;
