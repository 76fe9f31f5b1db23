//=========================================================================
// Scene System
//=========================================================================
//
// Registry of sensor scenes with exactly one active at a time.
//
// Architecture:
//   SceneManager
//     ├─ scenes: HashMap<S, Box<dyn Scene>>
//     ├─ order:  Vec<S>        (registration order, for Next/Previous)
//     └─ active: Option<S>
//
// Flow per tick:
//   update() → Scene::update()
//   process_transitions() → on_exit() / reset() / on_enter()
//   compose() → Scene::compose()
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt::Debug;
use std::hash::Hash;

//=== Internal Dependencies ===============================================

use crate::core::globals::GlobalContext;
use crate::render::{FrameBuilder, Viewpoint};

//=== Module Declarations =================================================

mod scene_manager;
mod transition_queue;

//=== Public API ==========================================================

pub use scene_manager::{SceneManager, SceneTransition};
pub use transition_queue::TransitionQueue;

//=== Scene Key Trait =====================================================

/// Marker trait for scene identifiers.
pub trait SceneKey: Clone + Copy + Eq + Hash + Debug + Send + 'static {}

//=== Scene Trait =========================================================

/// One interactive visualization.
///
/// A scene keeps its state while inactive; only
/// [`SceneTransition::Restart`] returns it to its initial state.
pub trait Scene<S: SceneKey>: Send {
    /// Heading shown first in the window caption.
    fn title(&self) -> &str;

    /// Key help for this scene.
    fn instructions(&self) -> &str;

    /// Live readout (state, pressure, derived quantities).
    fn status(&self) -> String;

    /// Camera placement when the scene is entered or the view is reset.
    fn home_view(&self) -> Viewpoint {
        Viewpoint::default()
    }

    fn on_enter(&mut self, _context: &GlobalContext<S>) {}

    fn on_exit(&mut self, _context: &GlobalContext<S>) {}

    /// Advances the scene by one tick.
    fn update(&mut self, context: &GlobalContext<S>);

    /// Emits this tick's draw commands.
    fn compose(&self, frame: &mut FrameBuilder);

    /// Returns to the state the scene had when it was constructed.
    fn reset(&mut self);
}
