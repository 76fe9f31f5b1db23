//=========================================================================
// Sensors
//=========================================================================
//
// The five tactile sensing scenes and the key that identifies them.
//
// Registration order defines Tab / Shift+Tab cycling:
//   capacitive → resistive → electromagnetic → visual-tactile → six-axis
//
// Scenes share only the animation primitives in `common`; each owns its
// meshes, its scalars and its composition.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod capacitive;
pub mod common;
pub mod electromagnetic;
pub mod resistive;
pub mod six_axis;
pub mod visual_tactile;

//=== Public API ==========================================================

pub use capacitive::CapacitiveScene;
pub use electromagnetic::{ElectromagneticScene, LoadState};
pub use resistive::ResistiveScene;
pub use six_axis::{GaugeFace, SixAxisScene};
pub use visual_tactile::VisualTactileScene;

//=== External Dependencies ===============================================

use std::fmt;

use clap::ValueEnum;
use log::debug;

//=== Internal Dependencies ===============================================

use crate::core::{SceneKey, SceneManager};

//=== SensorKind ==========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum SensorKind {
    #[default]
    Capacitive,
    Resistive,
    Electromagnetic,
    VisualTactile,
    SixAxis,
}

impl SceneKey for SensorKind {}

impl SensorKind {
    pub const ALL: [Self; 5] = [
        Self::Capacitive,
        Self::Resistive,
        Self::Electromagnetic,
        Self::VisualTactile,
        Self::SixAxis,
    ];

    /// Command-line name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Capacitive => "capacitive",
            Self::Resistive => "resistive",
            Self::Electromagnetic => "electromagnetic",
            Self::VisualTactile => "visual-tactile",
            Self::SixAxis => "six-axis",
        }
    }
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

//=== Registration ========================================================

/// Registers every sensor scene and makes `initial` the active one.
pub fn register_all(manager: &mut SceneManager<SensorKind>, initial: SensorKind) {
    manager.register_scene(SensorKind::Capacitive, CapacitiveScene::new());
    manager.register_scene(SensorKind::Resistive, ResistiveScene::new());
    manager.register_scene(SensorKind::Electromagnetic, ElectromagneticScene::new());
    manager.register_scene(SensorKind::VisualTactile, VisualTactileScene::new());
    manager.register_scene(SensorKind::SixAxis, SixAxisScene::new());
    manager.set_default(initial);
    debug!(target: "scene", "Registered {} sensor scenes, starting with {}", manager.len(), initial);
}

//=========================================================================
// Test Helpers
//=========================================================================


//=========================================================================
// Unit Tests
//=========================================================================
