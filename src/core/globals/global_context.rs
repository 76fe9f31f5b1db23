//=========================================================================
// Global Context
//=========================================================================
//
// Shared data container for scenes.
//
// Contains the per-tick data scenes read:
// - input_state: held keys, drag delta, scroll
// - actions: this tick's mapped actions, in arrival order
// - clock: fixed-step tick counter and simulated time
// - viewport: current drawable size in physical pixels
//
// and the queue global systems write scene changes into.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::clock::FrameClock;
use crate::core::input::{Action, InputEvent, StateTracker};
use crate::core::scene::{SceneKey, TransitionQueue};

//=== GlobalContext =======================================================

/// Shared context data accessible to scenes during updates.
pub struct GlobalContext<S: SceneKey> {
    pub input_state: StateTracker,

    /// Actions mapped from this tick's key presses.
    pub actions: Vec<Action>,

    /// Scene changes applied at the end of the tick.
    pub scene_transitions: TransitionQueue<S>,

    pub clock: FrameClock,

    /// Drawable size in physical pixels, updated on resize.
    pub viewport: (u32, u32),

    /// Raw input batches for the tick; consumed by the input system.
    pub(crate) frame_events: Vec<Vec<InputEvent>>,
}

impl<S: SceneKey> GlobalContext<S> {
    pub fn new(tps: f64) -> Self {
        Self {
            input_state: StateTracker::new(),
            actions: Vec::new(),
            scene_transitions: TransitionQueue::new(),
            clock: FrameClock::new(tps),
            viewport: (1280, 720),
            frame_events: Vec::new(),
        }
    }

    /// Seconds per tick.
    pub fn dt(&self) -> f32 {
        self.clock.dt()
    }

    /// Simulated milliseconds since start.
    pub fn time_ms(&self) -> f32 {
        self.clock.time_ms()
    }

    pub fn pressed(&self, action: Action) -> bool {
        self.actions.contains(&action)
    }
}
