//=========================================================================
// Action Mapper
//=========================================================================
//
// Maps key presses to actions.
//
// Architecture:
//   (key, modifiers) → HashMap → Action
//
// Modifiers must match exactly: Tab and Shift+Tab are separate bindings.
// Only KeyDown events resolve to actions.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

//=== Internal Dependencies ===============================================

use super::action::{Action, Direction, LoadAxis};
use super::event::{InputEvent, KeyCode, Modifiers};

//=== ActionMapper ========================================================

#[derive(Debug, Clone, Default)]
pub struct ActionMapper {
    key_bindings: HashMap<(KeyCode, Modifiers), Action>,
}

impl ActionMapper {
    /// Mapper with no bindings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mapper with the standard viewer bindings.
    ///
    /// | Key            | Action              |
    /// |----------------|---------------------|
    /// | Space          | `Press`             |
    /// | Arrows         | `Nudge(direction)`  |
    /// | 1–6            | `SelectLoad(axis)`  |
    /// | Tab / ⇧Tab     | next / previous     |
    /// | Backspace      | `RestartSensor`     |
    /// | R              | `ResetView`         |
    /// | Escape         | `Quit`              |
    pub fn with_default_bindings() -> Self {
        let mut mapper = Self::new();

        mapper.bind_key(KeyCode::Space, Action::Press);

        mapper.bind_key(KeyCode::ArrowLeft, Action::Nudge(Direction::Left));
        mapper.bind_key(KeyCode::ArrowRight, Action::Nudge(Direction::Right));
        mapper.bind_key(KeyCode::ArrowUp, Action::Nudge(Direction::Up));
        mapper.bind_key(KeyCode::ArrowDown, Action::Nudge(Direction::Down));

        let digits = [
            KeyCode::Digit1,
            KeyCode::Digit2,
            KeyCode::Digit3,
            KeyCode::Digit4,
            KeyCode::Digit5,
            KeyCode::Digit6,
        ];
        for (key, axis) in digits.into_iter().zip(LoadAxis::ALL) {
            mapper.bind_key(key, Action::SelectLoad(axis));
        }

        mapper.bind_key(KeyCode::Tab, Action::NextSensor);
        mapper.bind_key_with_mods(KeyCode::Tab, Modifiers::SHIFT, Action::PreviousSensor);
        mapper.bind_key(KeyCode::Backspace, Action::RestartSensor);
        mapper.bind_key(KeyCode::KeyR, Action::ResetView);
        mapper.bind_key(KeyCode::Escape, Action::Quit);

        mapper
    }

    //--- Binding API ------------------------------------------------------

    /// Binds a key without modifiers, replacing any previous binding.
    pub fn bind_key(&mut self, key: KeyCode, action: Action) {
        self.bind_key_with_mods(key, Modifiers::NONE, action);
    }

    pub fn bind_key_with_mods(&mut self, key: KeyCode, modifiers: Modifiers, action: Action) {
        self.key_bindings.insert((key, modifiers), action);
    }

    pub fn unbind_key(&mut self, key: KeyCode, modifiers: Modifiers) {
        self.key_bindings.remove(&(key, modifiers));
    }

    pub fn binding_count(&self) -> usize {
        self.key_bindings.len()
    }

    //--- Event Mapping ----------------------------------------------------

    pub fn map_event(&self, event: &InputEvent) -> Option<Action> {
        match event {
            InputEvent::KeyDown { key, modifiers } => self.map_key(*key, *modifiers),
            _ => None,
        }
    }

    pub fn map_key(&self, key: KeyCode, modifiers: Modifiers) -> Option<Action> {
        self.key_bindings.get(&(key, modifiers)).copied()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn key_down(key: KeyCode) -> InputEvent {
        InputEvent::KeyDown { key, modifiers: Modifiers::NONE }
    }

    //=====================================================================
    // Binding Tests
    //=====================================================================

    #[test]
    fn bind_and_map_simple_key() {
        let mut mapper = ActionMapper::new();
        mapper.bind_key(KeyCode::Space, Action::Press);
        assert_eq!(mapper.map_event(&key_down(KeyCode::Space)), Some(Action::Press));
    }

    #[test]
    fn unbound_key_maps_to_nothing() {
        let mapper = ActionMapper::new();
        assert_eq!(mapper.map_event(&key_down(KeyCode::Space)), None);
    }

    #[test]
    fn rebinding_replaces_action() {
        let mut mapper = ActionMapper::new();
        mapper.bind_key(KeyCode::KeyQ, Action::Press);
        mapper.bind_key(KeyCode::KeyQ, Action::Quit);
        assert_eq!(mapper.map_key(KeyCode::KeyQ, Modifiers::NONE), Some(Action::Quit));
        assert_eq!(mapper.binding_count(), 1);
    }

    #[test]
    fn unbind_removes_only_that_variant() {
        let mut mapper = ActionMapper::with_default_bindings();
        mapper.unbind_key(KeyCode::Tab, Modifiers::NONE);
        assert_eq!(mapper.map_key(KeyCode::Tab, Modifiers::NONE), None);
        assert_eq!(mapper.map_key(KeyCode::Tab, Modifiers::SHIFT), Some(Action::PreviousSensor));
    }

    //=====================================================================
    // Modifier Tests
    //=====================================================================

    #[test]
    fn modifiers_must_match_exactly() {
        let mapper = ActionMapper::with_default_bindings();
        assert_eq!(mapper.map_key(KeyCode::Space, Modifiers::CTRL), None);
        assert_eq!(mapper.map_key(KeyCode::Tab, Modifiers::ALT), None);
    }

    #[test]
    fn shift_tab_goes_backwards() {
        let mapper = ActionMapper::with_default_bindings();
        let event = InputEvent::KeyDown { key: KeyCode::Tab, modifiers: Modifiers::SHIFT };
        assert_eq!(mapper.map_event(&event), Some(Action::PreviousSensor));
        assert_eq!(mapper.map_event(&key_down(KeyCode::Tab)), Some(Action::NextSensor));
    }

    //=====================================================================
    // Default Binding Tests
    //=====================================================================

    #[test]
    fn digits_select_load_axes_in_order() {
        let mapper = ActionMapper::with_default_bindings();
        assert_eq!(
            mapper.map_key(KeyCode::Digit1, Modifiers::NONE),
            Some(Action::SelectLoad(LoadAxis::ForceX))
        );
        assert_eq!(
            mapper.map_key(KeyCode::Digit6, Modifiers::NONE),
            Some(Action::SelectLoad(LoadAxis::TorqueZ))
        );
        assert_eq!(mapper.map_key(KeyCode::Digit7, Modifiers::NONE), None);
    }

    #[test]
    fn arrows_nudge() {
        let mapper = ActionMapper::with_default_bindings();
        assert_eq!(
            mapper.map_key(KeyCode::ArrowUp, Modifiers::NONE),
            Some(Action::Nudge(Direction::Up))
        );
    }

    #[test]
    fn escape_quits() {
        let mapper = ActionMapper::with_default_bindings();
        assert_eq!(mapper.map_key(KeyCode::Escape, Modifiers::NONE), Some(Action::Quit));
    }

    //=====================================================================
    // Event Type Tests
    //=====================================================================

    #[test]
    fn only_key_down_produces_actions() {
        let mapper = ActionMapper::with_default_bindings();
        let up = InputEvent::KeyUp { key: KeyCode::Space, modifiers: Modifiers::NONE };
        assert_eq!(mapper.map_event(&up), None);
        assert_eq!(mapper.map_event(&InputEvent::MouseWheel { delta: 1.0 }), None);
        assert_eq!(mapper.map_event(&InputEvent::MouseMoved { x: 1.0, y: 1.0 }), None);
    }
}
