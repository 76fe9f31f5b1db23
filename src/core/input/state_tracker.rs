//=========================================================================
// State Tracker
//=========================================================================
//
// Held keys and buttons plus the per-tick deltas derived from them.
//
// Architecture:
//   InputEvent → process_events() → HashSet (keys/buttons held) → query
//
// Tick lifecycle: clear() → process_events() → finalize_frame() → query
//
// The orbit camera reads the drag delta and the scroll total from here;
// discrete commands go through the ActionMapper instead.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

//=== Internal Dependencies ===============================================

use super::event::{Modifiers, InputEvent, KeyCode, MouseButton};

//=== StateTracker ========================================================

/// Persistent held state plus per-tick pressed/released deltas.
#[derive(Debug)]
pub struct StateTracker {
    //--- Persistent State (survives tick boundary) ----------------------
    held_keys: HashSet<KeyCode>,
    held_buttons: HashSet<MouseButton>,
    mouse_position: (f32, f32),
    modifiers: Modifiers,

    //--- Tick Deltas (reset via clear()) ---------------------------------
    pressed_keys: HashSet<KeyCode>,
    released_keys: HashSet<KeyCode>,
    pressed_buttons: HashSet<MouseButton>,
    released_buttons: HashSet<MouseButton>,

    //--- Continuous Input (accumulated/calculated) -----------------------
    mouse_delta: (f32, f32),
    last_mouse_position: (f32, f32),
    scroll_delta: f32,
}

impl StateTracker {
    /// Creates a new state tracker with empty state.
    pub fn new() -> Self {
        Self {
            held_keys: HashSet::new(),
            held_buttons: HashSet::new(),
            mouse_position: (0.0, 0.0),
            modifiers: Modifiers::NONE,
            pressed_keys: HashSet::new(),
            released_keys: HashSet::new(),
            pressed_buttons: HashSet::new(),
            released_buttons: HashSet::new(),
            mouse_delta: (0.0, 0.0),
            last_mouse_position: (0.0, 0.0),
            scroll_delta: 0.0,
        }
    }

    //--- Tick Processing --------------------------------------------------

    /// Clears tick deltas (pressed/released flags, scroll).
    pub(super) fn clear(&mut self) {
        self.scroll_delta = 0.0;
        self.pressed_keys.clear();
        self.released_keys.clear();
        self.pressed_buttons.clear();
        self.released_buttons.clear();
        self.last_mouse_position = self.mouse_position;
    }

    /// Processes input events, updating internal state.
    pub(super) fn process_events(&mut self, events: &[InputEvent]) {
        for event in events {
            self.process_event(event);
        }
    }

    /// Computes the mouse delta for the tick.
    pub(super) fn finalize_frame(&mut self) {
        self.mouse_delta = (
            self.mouse_position.0 - self.last_mouse_position.0,
            self.mouse_position.1 - self.last_mouse_position.1,
        );
    }

    //--- Internal Helpers -------------------------------------------------
    fn process_event(&mut self, event: &InputEvent) {
        match event {
            InputEvent::KeyDown { key, modifiers } => {
                self.modifiers = *modifiers;
                if self.held_keys.insert(*key) {
                    self.pressed_keys.insert(*key);
                }
            }

            InputEvent::KeyUp { key, modifiers } => {
                self.modifiers = *modifiers;
                if self.held_keys.remove(key) {
                    self.released_keys.insert(*key);
                }
            }

            InputEvent::MouseButtonDown { button, modifiers } => {
                self.modifiers = *modifiers;
                if self.held_buttons.insert(*button) {
                    self.pressed_buttons.insert(*button);
                }
            }

            InputEvent::MouseButtonUp { button, modifiers } => {
                self.modifiers = *modifiers;
                if self.held_buttons.remove(button) {
                    self.released_buttons.insert(*button);
                }
            }

            InputEvent::MouseMoved { x, y } => {
                self.mouse_position = (*x, *y);
            }

            InputEvent::MouseWheel { delta } => {
                self.scroll_delta += *delta;
            }

            InputEvent::Unidentified => {}
        }
    }

    //=====================================================================
    // Query API - Keyboard
    //=====================================================================

    /// Returns `true` if key transitioned UP → DOWN this tick.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.pressed_keys.contains(&key)
    }

    /// Returns `true` while key is held.
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.held_keys.contains(&key)
    }

    /// Returns `true` if key transitioned DOWN → UP this tick.
    pub fn is_key_released(&self, key: KeyCode) -> bool {
        self.released_keys.contains(&key)
    }

    //=====================================================================
    // Query API - Mouse Buttons
    //=====================================================================

    /// Like [`is_key_pressed`](Self::is_key_pressed) but for mouse buttons.
    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.pressed_buttons.contains(&button)
    }

    /// Like [`is_key_down`](Self::is_key_down) but for mouse buttons.
    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.held_buttons.contains(&button)
    }

    /// Like [`is_key_released`](Self::is_key_released) but for mouse buttons.
    pub fn is_button_released(&self, button: MouseButton) -> bool {
        self.released_buttons.contains(&button)
    }

    //=====================================================================
    // Query API - Mouse Position & Movement
    //=====================================================================

    /// Returns mouse position in screen coordinates (pixels, top-left origin).
    pub fn mouse_position(&self) -> (f32, f32) {
        self.mouse_position
    }

    /// Cursor movement since the previous tick, in pixels.
    pub fn mouse_delta(&self) -> (f32, f32) {
        self.mouse_delta
    }

    /// Wheel lines scrolled this tick; positive scrolls away from the user.
    pub fn scroll_delta(&self) -> f32 {
        self.scroll_delta
    }


    //=====================================================================
    // Query API - Modifiers
    //=====================================================================

    /// Returns the current modifier key state.
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Returns `true` if Shift is currently held.
    pub fn shift_held(&self) -> bool {
        self.modifiers.shift
    }

    pub fn ctrl_held(&self) -> bool {
        self.modifiers.ctrl
    }

    //=====================================================================
    // Query API - Iteration
    //=====================================================================

    /// Returns an iterator over all keys pressed.
    pub fn keys_pressed(&self) -> impl Iterator<Item = &KeyCode> {
        self.pressed_keys.iter()
    }

    /// Returns an iterator over all mouse buttons pressed.
    pub fn buttons_pressed(&self) -> impl Iterator<Item = &MouseButton> {
        self.pressed_buttons.iter()
    }
}

//--- Trait Implementations -----------------------------------------------

impl Default for StateTracker {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    //--- Test Helpers -----------------------------------------------------

    fn key_down(key: KeyCode) -> InputEvent {
        InputEvent::KeyDown { key, modifiers: Modifiers::NONE }
    }

    fn key_up(key: KeyCode) -> InputEvent {
        InputEvent::KeyUp { key, modifiers: Modifiers::NONE }
    }

    fn mouse_down(btn: MouseButton) -> InputEvent {
        InputEvent::MouseButtonDown { button: btn, modifiers: Modifiers::NONE }
    }

    fn mouse_up(btn: MouseButton) -> InputEvent {
        InputEvent::MouseButtonUp { button: btn, modifiers: Modifiers::NONE }
    }

    fn mouse_move(x: f32, y: f32) -> InputEvent {
        InputEvent::MouseMoved { x, y }
    }

    //=====================================================================
    // Keyboard Tests
    //=====================================================================

    fn tick(tracker: &mut StateTracker, events: &[InputEvent]) {
        tracker.clear();
        tracker.process_events(events);
        tracker.finalize_frame();
    }

    #[test]
    fn space_press_lasts_one_tick() {
        let mut tracker = StateTracker::new();

        tick(&mut tracker, &[key_down(KeyCode::Space)]);
        assert!(tracker.is_key_pressed(KeyCode::Space));
        assert!(tracker.is_key_down(KeyCode::Space));

        tick(&mut tracker, &[]);
        assert!(!tracker.is_key_pressed(KeyCode::Space));
        assert!(tracker.is_key_down(KeyCode::Space));

        tick(&mut tracker, &[key_up(KeyCode::Space)]);
        assert!(!tracker.is_key_down(KeyCode::Space));
        assert!(tracker.is_key_released(KeyCode::Space));
    }

    #[test]
    fn arrows_tracked_independently() {
        let mut tracker = StateTracker::new();

        tick(&mut tracker, &[key_down(KeyCode::ArrowLeft), key_down(KeyCode::ArrowUp)]);
        tick(&mut tracker, &[key_up(KeyCode::ArrowLeft)]);

        assert!(!tracker.is_key_down(KeyCode::ArrowLeft));
        assert!(tracker.is_key_down(KeyCode::ArrowUp));
        assert!(!tracker.is_key_down(KeyCode::ArrowDown));
    }

    #[test]
    fn tap_within_one_tick_records_both_edges() {
        let mut tracker = StateTracker::new();

        tick(&mut tracker, &[key_down(KeyCode::Tab), key_up(KeyCode::Tab)]);

        assert!(tracker.is_key_pressed(KeyCode::Tab));
        assert!(tracker.is_key_released(KeyCode::Tab));
        assert!(!tracker.is_key_down(KeyCode::Tab));
    }

    #[test]
    fn repeated_key_down_is_not_a_new_press() {
        let mut tracker = StateTracker::new();

        tick(&mut tracker, &[key_down(KeyCode::Digit3)]);
        tick(&mut tracker, &[key_down(KeyCode::Digit3)]);

        assert!(!tracker.is_key_pressed(KeyCode::Digit3));
        assert!(tracker.is_key_down(KeyCode::Digit3));
    }

    #[test]
    fn release_without_press_is_ignored() {
        let mut tracker = StateTracker::new();
        tick(&mut tracker, &[key_up(KeyCode::KeyZ)]);
        assert!(!tracker.is_key_released(KeyCode::KeyZ));
    }

    //=====================================================================
    // Mouse Tests
    //=====================================================================

    #[test]
    fn left_drag_reports_held_button_and_delta() {
        let mut tracker = StateTracker::new();

        tick(&mut tracker, &[mouse_move(100.0, 100.0), mouse_down(MouseButton::Left)]);
        assert!(tracker.is_button_pressed(MouseButton::Left));

        tick(&mut tracker, &[mouse_move(130.0, 90.0)]);
        assert!(tracker.is_button_down(MouseButton::Left));
        assert!(!tracker.is_button_pressed(MouseButton::Left));
        assert_eq!(tracker.mouse_delta(), (30.0, -10.0));

        tick(&mut tracker, &[mouse_up(MouseButton::Left)]);
        assert!(tracker.is_button_released(MouseButton::Left));
        assert_eq!(tracker.mouse_delta(), (0.0, 0.0));
    }

    #[test]
    fn first_move_is_measured_from_origin() {
        let mut tracker = StateTracker::new();
        tick(&mut tracker, &[mouse_move(100.0, 200.0)]);
        assert_eq!(tracker.mouse_position(), (100.0, 200.0));
        assert_eq!(tracker.mouse_delta(), (100.0, 200.0));
    }

    #[test]
    fn only_last_move_of_a_tick_counts() {
        let mut tracker = StateTracker::new();
        tick(&mut tracker, &[mouse_move(10.0, 10.0)]);
        tick(&mut tracker, &[mouse_move(50.0, 50.0), mouse_move(20.0, 15.0)]);
        assert_eq!(tracker.mouse_delta(), (10.0, 5.0));
    }

    #[test]
    fn buttons_pressed_lists_new_buttons() {
        let mut tracker = StateTracker::new();
        tick(&mut tracker, &[mouse_down(MouseButton::Left), mouse_down(MouseButton::Right)]);
        assert_eq!(tracker.buttons_pressed().count(), 2);
    }

    //=====================================================================
    // Scroll Tests
    //=====================================================================

    #[test]
    fn scroll_accumulates_within_a_tick() {
        let mut tracker = StateTracker::new();

        tick(
            &mut tracker,
            &[InputEvent::MouseWheel { delta: 1.0 }, InputEvent::MouseWheel { delta: 2.0 }],
        );
        assert_eq!(tracker.scroll_delta(), 3.0);

        tick(&mut tracker, &[]);
        assert_eq!(tracker.scroll_delta(), 0.0);
    }

    #[test]
    fn scroll_does_not_move_the_cursor() {
        let mut tracker = StateTracker::new();
        tick(&mut tracker, &[mouse_move(10.0, 10.0)]);
        tick(&mut tracker, &[InputEvent::MouseWheel { delta: -1.0 }]);
        assert_eq!(tracker.mouse_delta(), (0.0, 0.0));
        assert_eq!(tracker.mouse_position(), (10.0, 10.0));
    }

    //=====================================================================
    // Modifier Tests
    //=====================================================================

    #[test]
    fn shift_tab_updates_modifier_state() {
        let mut tracker = StateTracker::new();

        tick(&mut tracker, &[InputEvent::KeyDown { key: KeyCode::Tab, modifiers: Modifiers::SHIFT }]);
        assert!(tracker.shift_held());
        assert!(!tracker.ctrl_held());

        tick(&mut tracker, &[key_up(KeyCode::Tab)]);
        assert_eq!(tracker.modifiers(), Modifiers::NONE);
    }

    #[test]
    fn keys_pressed_lists_new_keys() {
        let mut tracker = StateTracker::new();
        tick(&mut tracker, &[key_down(KeyCode::Digit1), key_down(KeyCode::Space)]);

        let pressed: Vec<_> = tracker.keys_pressed().copied().collect();
        assert_eq!(pressed.len(), 2);
        assert!(pressed.contains(&KeyCode::Digit1));
        assert!(pressed.contains(&KeyCode::Space));
    }

    //=====================================================================
    // Edge Cases
    //=====================================================================

    #[test]
    fn unidentified_events_change_nothing() {
        let mut tracker = StateTracker::new();
        tick(&mut tracker, &[InputEvent::Unidentified]);
        assert_eq!(tracker.mouse_position(), (0.0, 0.0));
        assert_eq!(tracker.keys_pressed().count(), 0);
    }
}
