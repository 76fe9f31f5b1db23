//=========================================================================
// Tactile Viz: Library Root
//=========================================================================
//
// Interactive 3D visualizations of five tactile sensing principles
// (capacitive, resistive, electromagnetic, visual-tactile, six-axis
// force/torque) on a two-thread winit/wgpu runtime.
//
// Module map:
// - `core`:     logic-thread systems (input, camera, scenes, clock)
// - `sensors`:  the five sensor scenes
// - `geometry`: meshes, curves, tubes and arrows
// - `render`:   frame snapshots and the wgpu renderer
// - `platform`: winit window and input capture (private)
// - `engine`:   builder and runtime entry point
// - `cli`:      command-line arguments for the binary
//
// Typical usage:
// ```no_run
// use tactile_viz::EngineBuilder;
//
// EngineBuilder::new().build().run().ok();
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------

pub mod cli;
pub mod core;
pub mod geometry;
pub mod prelude;
pub mod render;
pub mod sensors;

//--- Internal Modules ----------------------------------------------------

mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder, EngineError};
