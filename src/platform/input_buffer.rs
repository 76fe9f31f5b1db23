//=========================================================================
// Input Buffer
//=========================================================================
//
// Per-frame store for converted input between two redraws.
//
// Events fall into two groups:
// - discrete:   key and button transitions, kept in arrival order;
//               a repeat of the immediately preceding event is dropped
// - continuous: one slot per kind; the cursor position keeps the latest
//               sample, wheel deltas are summed
//
// `drain()` hands both groups to the platform for sending and leaves the
// buffer empty with its capacity intact.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::input::event::InputEvent;

//=== Constants ===========================================================

const DISCRETE_CAPACITY: usize = 64;
const CONTINUOUS_CAPACITY: usize = 4;

//=== InputBuffer =========================================================

pub(crate) struct InputBuffer {
    discrete: Vec<InputEvent>,
    continuous: Vec<InputEvent>,
}

impl InputBuffer {
    pub(crate) fn new() -> Self {
        Self {
            discrete: Vec::with_capacity(DISCRETE_CAPACITY),
            continuous: Vec::with_capacity(CONTINUOUS_CAPACITY),
        }
    }

    //--- Discrete ---------------------------------------------------------

    pub(crate) fn push_discrete(&mut self, event: InputEvent) {
        if self.discrete.last() != Some(&event) {
            self.discrete.push(event);
        }
    }

    //--- Continuous -------------------------------------------------------

    /// Stores a continuous sample. Equality is by kind, so the slot for
    /// this kind is found with `==`.
    pub(crate) fn push_continuous(&mut self, event: InputEvent) {
        let Some(index) = self.continuous.iter().position(|e| *e == event) else {
            self.continuous.push(event);
            return;
        };

        match (&mut self.continuous[index], event) {
            (InputEvent::MouseWheel { delta: total }, InputEvent::MouseWheel { delta }) => *total += delta,
            (slot, event) => *slot = event,
        }
    }

    //--- Drain ------------------------------------------------------------

    /// Takes this frame's events, or `None` when nothing arrived.
    pub(crate) fn drain(&mut self) -> Option<(Vec<InputEvent>, Vec<InputEvent>)> {
        if self.is_empty() {
            return None;
        }
        let discrete = self.discrete.drain(..).collect();
        let continuous = self.continuous.drain(..).collect();
        Some((discrete, continuous))
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.discrete.len() + self.continuous.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.discrete.is_empty() && self.continuous.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
