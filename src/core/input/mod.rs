//=========================================================================
// Input System
//=========================================================================
//
// Turns a tick's worth of platform input into state and actions.
//
// Architecture:
// ```text
//  Vec<Vec<InputEvent>> (from EventCollector)
//        │
//        ├─► StateTracker   held keys, drag delta, scroll
//        └─► ActionMapper   KeyDown → Action, in arrival order
// ```
//
//=========================================================================

//=== Module Declarations =================================================

pub mod action;
pub mod action_mapper;
pub mod event;
pub mod state_tracker;

//=== Public API ==========================================================

pub use action::{Action, Direction, LoadAxis};
pub use action_mapper::ActionMapper;
pub use event::{InputEvent, KeyCode, Modifiers, MouseButton};
pub use state_tracker::StateTracker;

//=== External Dependencies ===============================================

use log::trace;

//=== InputSystem =========================================================

/// Action mapping plus the actions produced by the current tick.
#[derive(Debug)]
pub struct InputSystem {
    mapper: ActionMapper,
    actions: Vec<Action>,
}

impl InputSystem {
    /// Input system with the standard bindings.
    pub fn new() -> Self {
        Self::with_mapper(ActionMapper::with_default_bindings())
    }

    pub fn with_mapper(mapper: ActionMapper) -> Self {
        Self {
            mapper,
            actions: Vec::new(),
        }
    }

    //--- Tick Processing --------------------------------------------------

    /// Feeds one tick of input batches through the tracker and the mapper.
    ///
    /// Actions from the previous tick are discarded first.
    pub fn process_frame(&mut self, state: &mut StateTracker, batches: &[Vec<InputEvent>]) {
        self.actions.clear();
        state.clear();

        for batch in batches {
            state.process_events(batch);
            self.actions
                .extend(batch.iter().filter_map(|event| self.mapper.map_event(event)));
        }

        state.finalize_frame();

        if !self.actions.is_empty() {
            trace!(target: "core", "Actions this tick: {:?}", self.actions);
        }
    }

    /// Actions produced by the last [`process_frame`](Self::process_frame).
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }
}

impl Default for InputSystem {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
