//=========================================================================
// Global Systems
//=========================================================================
//
// Container for engine-level systems with logic.
//
// Tick pipeline:
//   1. input     batches → StateTracker + actions
//   2. globals   Quit / sensor switching / view reset
//   3. camera    drag + wheel → damped orbit
//   4. scene     active scene update
//   5. scenes    queued transitions; camera re-homed on a fresh scene
//
//=========================================================================

//=== External Dependencies ===============================================

use log::info;

//=== Internal Dependencies ===============================================

use super::GlobalContext;
use crate::core::camera::OrbitController;
use crate::core::input::{Action, InputSystem};
use crate::core::platform_bridge::TickControl;
use crate::core::scene::{SceneKey, SceneManager, SceneTransition};
use crate::render::{Color, FrameBuilder, FrameSnapshot};

//=== Constants ===========================================================

pub const BACKGROUND: Color = Color::WHITE;

//=== GlobalSystems =======================================================

pub struct GlobalSystems<S: SceneKey> {
    pub input: InputSystem,
    pub camera: OrbitController,
    pub scene_manager: SceneManager<S>,
}

impl<S: SceneKey> GlobalSystems<S> {
    pub(crate) fn new() -> Self {
        Self {
            input: InputSystem::new(),
            camera: OrbitController::default(),
            scene_manager: SceneManager::new(),
        }
    }

    /// Enters the initial scene and places the camera at its home view.
    pub(crate) fn start(&mut self, context: &GlobalContext<S>) {
        self.scene_manager.start(context);
        if let Some(home) = self.scene_manager.home_view() {
            self.camera.reset(home);
        }
    }

    //--- Update Loop ------------------------------------------------------

    /// Runs one tick. Returns [`TickControl::Exit`] when Quit was pressed.
    pub(crate) fn update(&mut self, context: &mut GlobalContext<S>) -> TickControl {
        // 1. Input events into state and actions
        self.input.process_frame(&mut context.input_state, &context.frame_events);
        context.frame_events.clear();
        context.actions.clear();
        context.actions.extend_from_slice(self.input.actions());

        // 2. Actions handled above scene level
        let mut reset_view = false;
        for action in &context.actions {
            match action {
                Action::Quit => {
                    info!(target: "core", "Quit requested");
                    return TickControl::Exit;
                }
                Action::NextSensor => context.scene_transitions.push(SceneTransition::Next),
                Action::PreviousSensor => context.scene_transitions.push(SceneTransition::Previous),
                Action::RestartSensor => context.scene_transitions.push(SceneTransition::Restart),
                Action::ResetView => reset_view = true,
                Action::Press | Action::Nudge(_) | Action::SelectLoad(_) => {}
            }
        }

        // 3. Camera
        self.camera.handle_input(&context.input_state, context.viewport.1);
        self.camera.update();

        // 4. Active scene
        self.scene_manager.update(context);

        // 5. Transitions
        let entered = self.scene_manager.process_transitions(context);
        if entered || reset_view {
            if let Some(home) = self.scene_manager.home_view() {
                self.camera.reset(home);
            }
        }

        TickControl::Continue
    }

    //--- Composition ------------------------------------------------------

    /// Builds the frame for the current tick.
    pub(crate) fn compose(&self, context: &GlobalContext<S>) -> FrameSnapshot {
        let mut frame = FrameBuilder::new();
        self.scene_manager.compose(&mut frame);
        frame.finish(context.clock.tick(), BACKGROUND, self.camera.viewpoint(), self.caption())
    }

    /// Window caption: title, key help and live readout of the active scene.
    pub fn caption(&self) -> String {
        match self.scene_manager.active_scene() {
            Some(scene) => {
                let status = scene.status();
                [scene.title(), scene.instructions(), status.as_str()]
                    .into_iter()
                    .filter(|part| !part.is_empty())
                    .collect::<Vec<_>>()
                    .join(" | ")
            }
            None => String::from("No sensor selected"),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{InputEvent, KeyCode, Modifiers};
    use crate::core::scene::Scene;
    use crate::render::Viewpoint;
    use glam::Vec3;

    //--- Test Helpers -----------------------------------------------------

    #[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
    enum Key {
        First,
        Second,
    }

    impl SceneKey for Key {}

    struct Counter {
        title: &'static str,
        presses: u32,
        home: Viewpoint,
    }

    impl Counter {
        fn new(title: &'static str, eye: Vec3) -> Self {
            Self { title, presses: 0, home: Viewpoint::new(eye, Vec3::ZERO) }
        }
    }

    impl Scene<Key> for Counter {
        fn title(&self) -> &str {
            self.title
        }

        fn instructions(&self) -> &str {
            "Press SPACE"
        }

        fn status(&self) -> String {
            format!("presses {}", self.presses)
        }

        fn home_view(&self) -> Viewpoint {
            self.home
        }

        fn update(&mut self, context: &GlobalContext<Key>) {
            if context.pressed(Action::Press) {
                self.presses += 1;
            }
        }

        fn compose(&self, _frame: &mut FrameBuilder) {}

        fn reset(&mut self) {
            self.presses = 0;
        }
    }

    fn systems() -> (GlobalSystems<Key>, GlobalContext<Key>) {
        let mut systems = GlobalSystems::new();
        systems.scene_manager.register_scene(Key::First, Counter::new("First", Vec3::new(0.0, 5.0, 10.0)));
        systems.scene_manager.register_scene(Key::Second, Counter::new("Second", Vec3::new(5.0, 3.0, 0.0)));
        let context = GlobalContext::new(60.0);
        systems.start(&context);
        (systems, context)
    }

    fn press(systems: &mut GlobalSystems<Key>, context: &mut GlobalContext<Key>, key: KeyCode, modifiers: Modifiers) -> TickControl {
        context.frame_events = vec![vec![
            InputEvent::KeyDown { key, modifiers },
            InputEvent::KeyUp { key, modifiers },
        ]];
        systems.update(context)
    }

    //=====================================================================
    // Tick Pipeline
    //=====================================================================

    #[test]
    fn space_reaches_active_scene() {
        let (mut systems, mut context) = systems();

        press(&mut systems, &mut context, KeyCode::Space, Modifiers::NONE);

        assert_eq!(systems.caption(), "First | Press SPACE | presses 1");
        assert!(context.frame_events.is_empty());
    }

    #[test]
    fn escape_exits() {
        let (mut systems, mut context) = systems();
        assert_eq!(press(&mut systems, &mut context, KeyCode::Escape, Modifiers::NONE), TickControl::Exit);
    }

    #[test]
    fn tab_switches_and_rehomes_camera() {
        let (mut systems, mut context) = systems();

        press(&mut systems, &mut context, KeyCode::Tab, Modifiers::NONE);

        assert_eq!(systems.scene_manager.active(), Some(Key::Second));
        let eye = systems.camera.viewpoint().eye;
        assert!((eye - Vec3::new(5.0, 3.0, 0.0)).length() < 1e-3);
    }

    #[test]
    fn shift_tab_goes_back() {
        let (mut systems, mut context) = systems();
        press(&mut systems, &mut context, KeyCode::Tab, Modifiers::SHIFT);
        assert_eq!(systems.scene_manager.active(), Some(Key::Second));
        press(&mut systems, &mut context, KeyCode::Tab, Modifiers::SHIFT);
        assert_eq!(systems.scene_manager.active(), Some(Key::First));
    }

    #[test]
    fn backspace_restarts_scene() {
        let (mut systems, mut context) = systems();
        press(&mut systems, &mut context, KeyCode::Space, Modifiers::NONE);
        press(&mut systems, &mut context, KeyCode::Backspace, Modifiers::NONE);
        assert!(systems.caption().ends_with("presses 0"));
    }

    #[test]
    fn reset_view_returns_camera_home() {
        let (mut systems, mut context) = systems();
        systems.camera.zoom(10.0);

        press(&mut systems, &mut context, KeyCode::KeyR, Modifiers::NONE);

        let eye = systems.camera.viewpoint().eye;
        assert!((eye - Vec3::new(0.0, 5.0, 10.0)).length() < 1e-3);
    }

    //=====================================================================
    // Composition
    //=====================================================================

    #[test]
    fn compose_stamps_tick_and_background() {
        let (systems, mut context) = systems();
        context.clock.advance();
        context.clock.advance();

        let frame = systems.compose(&context);

        assert_eq!(frame.tick, 2);
        assert_eq!(frame.background, Color::WHITE);
        assert!(frame.caption.starts_with("First"));
    }

    #[test]
    fn caption_without_scenes() {
        let systems = GlobalSystems::<Key>::new();
        assert_eq!(systems.caption(), "No sensor selected");
    }
}
