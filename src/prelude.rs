//=========================================================================
// Prelude
//=========================================================================
//
// Usage:
//   use tactile_viz::prelude::*;
//
//=========================================================================

// Engine
pub use crate::engine::{Engine, EngineBuilder, EngineError};

// Logic-thread systems
pub use crate::core::globals::{GlobalContext, GlobalSystems};
pub use crate::core::input::{Action, Direction, KeyCode, LoadAxis, Modifiers, MouseButton};
pub use crate::core::scene::{Scene, SceneKey, SceneManager, SceneTransition};

// Drawing
pub use crate::geometry::{Arrow, Mesh};
pub use crate::render::{Color, FrameBuilder, Material, Viewpoint};

// Sensors
pub use crate::sensors::SensorKind;
