//=========================================================================
// Scene Manager
//=========================================================================
//
// Owns every registered scene and switches the single active one.
//
// Scenes are stored by key and keep their state between activations.
// Next/Previous cycle through registration order and wrap around.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use super::{Scene, SceneKey};
use crate::core::globals::GlobalContext;
use crate::render::{FrameBuilder, Viewpoint};

//=== Scene Transition ====================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneTransition<K: SceneKey> {
    /// Activates a specific scene.
    Switch(K),

    /// Activates the scene registered after the current one.
    Next,

    /// Activates the scene registered before the current one.
    Previous,

    /// Resets the active scene to its initial state.
    Restart,
}

//=== Scene Manager =======================================================

pub struct SceneManager<S: SceneKey> {
    scenes: HashMap<S, Box<dyn Scene<S>>>,
    order: Vec<S>,
    active: Option<S>,
}

impl<S: SceneKey> SceneManager<S> {
    pub fn new() -> Self {
        Self {
            scenes: HashMap::new(),
            order: Vec::new(),
            active: None,
        }
    }

    //--- Registration -----------------------------------------------------

    /// Registers a scene. Re-registering a key replaces the scene but keeps
    /// its place in the cycle order.
    pub fn register_scene<T>(&mut self, key: S, scene: T)
    where
        T: Scene<S> + 'static,
    {
        if self.scenes.insert(key, Box::new(scene)).is_some() {
            warn!(target: "scene", "Scene {:?} was already registered and has been replaced", key);
        } else {
            self.order.push(key);
        }
    }

    /// Registers a scene and makes it the one [`start`](Self::start) enters.
    pub fn register_default<T>(&mut self, key: S, scene: T)
    where
        T: Scene<S> + 'static,
    {
        self.register_scene(key, scene);
        self.set_default(key);
    }

    /// Chooses an already registered scene as the one entered on start.
    /// Returns false if `key` is unknown.
    pub fn set_default(&mut self, key: S) -> bool {
        if !self.scenes.contains_key(&key) {
            warn!(target: "scene", "Cannot make unregistered scene {:?} the default", key);
            return false;
        }
        if let Some(previous) = self.active.replace(key) {
            if previous != key {
                warn!(target: "scene", "Default scene changed from {:?} to {:?}", previous, key);
            }
        }
        debug!(target: "scene", "Registered {:?} as default scene", key);
        true
    }

    /// Enters the default scene, or the first registered one.
    pub fn start(&mut self, context: &GlobalContext<S>) {
        if self.active.is_none() {
            self.active = self.order.first().copied();
        }

        let Some(initial) = self.active else {
            warn!(target: "scene", "Scene manager started with no scenes registered");
            return;
        };

        info!(target: "scene", "Starting with scene {:?}", initial);
        if let Some(scene) = self.scenes.get_mut(&initial) {
            scene.on_enter(context);
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn active(&self) -> Option<S> {
        self.active
    }

    pub fn active_scene(&self) -> Option<&dyn Scene<S>> {
        self.active
            .and_then(|key| self.scenes.get(&key))
            .map(|scene| scene.as_ref())
    }

    pub fn home_view(&self) -> Option<Viewpoint> {
        self.active_scene().map(|scene| scene.home_view())
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    //--- Tick -------------------------------------------------------------

    pub fn update(&mut self, context: &GlobalContext<S>) {
        if let Some(scene) = self.active.and_then(|key| self.scenes.get_mut(&key)) {
            scene.update(context);
        }
    }

    pub fn compose(&self, frame: &mut FrameBuilder) {
        if let Some(scene) = self.active_scene() {
            scene.compose(frame);
        }
    }

    //--- Transition Processing --------------------------------------------

    /// Applies every queued transition in FIFO order.
    ///
    /// Returns `true` if any scene was entered afresh (switched to or
    /// restarted), so callers can move the camera to its home view.
    pub fn process_transitions(&mut self, context: &mut GlobalContext<S>) -> bool {
        let transitions = context.scene_transitions.take();
        let context: &GlobalContext<S> = context;
        let mut entered = false;

        for transition in transitions {
            entered |= match transition {
                SceneTransition::Switch(key) => self.switch_internal(key, context),
                SceneTransition::Next => self.cycle_internal(1, context),
                SceneTransition::Previous => self.cycle_internal(-1, context),
                SceneTransition::Restart => self.restart_internal(context),
            };
        }

        entered
    }

    //--- Internal Helpers -------------------------------------------------

    fn switch_internal(&mut self, key: S, context: &GlobalContext<S>) -> bool {
        if self.active == Some(key) {
            debug!(target: "scene", "Scene {:?} is already active", key);
            return false;
        }

        if !self.scenes.contains_key(&key) {
            warn!(target: "scene", "Attempted to switch to unregistered scene {:?}", key);
            return false;
        }

        if let Some(scene) = self.active.and_then(|old| self.scenes.get_mut(&old)) {
            scene.on_exit(context);
        }

        info!(target: "scene", "Switching scene {:?} -> {:?}", self.active, key);
        self.active = Some(key);

        if let Some(scene) = self.scenes.get_mut(&key) {
            scene.on_enter(context);
        }
        true
    }

    fn cycle_internal(&mut self, step: isize, context: &GlobalContext<S>) -> bool {
        let count = self.order.len() as isize;
        if count == 0 {
            return false;
        }

        let current = self
            .active
            .and_then(|key| self.order.iter().position(|&k| k == key))
            .map_or(0, |index| index as isize);
        let next = self.order[(current + step).rem_euclid(count) as usize];

        self.switch_internal(next, context)
    }

    fn restart_internal(&mut self, context: &GlobalContext<S>) -> bool {
        let Some(key) = self.active else {
            return false;
        };
        let Some(scene) = self.scenes.get_mut(&key) else {
            return false;
        };

        info!(target: "scene", "Restarting scene {:?}", key);
        scene.on_exit(context);
        scene.reset();
        scene.on_enter(context);
        true
    }
}

impl<S: SceneKey> Default for SceneManager<S> {
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
    use std::sync::{Arc, Mutex};

    //--- Test Helpers -----------------------------------------------------

    #[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
    enum TestScene {
        A,
        B,
        C,
    }

    impl SceneKey for TestScene {}

    type Log = Arc<Mutex<Vec<String>>>;

    struct Recording {
        name: &'static str,
        log: Log,
        ticks: u32,
    }

    impl Recording {
        fn new(name: &'static str, log: &Log) -> Self {
            Self { name, log: Arc::clone(log), ticks: 0 }
        }

        fn record(&self, what: &str) {
            self.log.lock().unwrap().push(format!("{}:{}", self.name, what));
        }
    }

    impl Scene<TestScene> for Recording {
        fn title(&self) -> &str {
            self.name
        }

        fn instructions(&self) -> &str {
            ""
        }

        fn status(&self) -> String {
            format!("ticks {}", self.ticks)
        }

        fn on_enter(&mut self, _context: &GlobalContext<TestScene>) {
            self.record("enter");
        }

        fn on_exit(&mut self, _context: &GlobalContext<TestScene>) {
            self.record("exit");
        }

        fn update(&mut self, _context: &GlobalContext<TestScene>) {
            self.ticks += 1;
        }

        fn compose(&self, _frame: &mut FrameBuilder) {}

        fn reset(&mut self) {
            self.ticks = 0;
            self.record("reset");
        }
    }

    fn manager_with_three(log: &Log) -> SceneManager<TestScene> {
        let mut manager = SceneManager::new();
        manager.register_scene(TestScene::A, Recording::new("A", log));
        manager.register_scene(TestScene::B, Recording::new("B", log));
        manager.register_scene(TestScene::C, Recording::new("C", log));
        manager
    }

    fn entries(log: &Log) -> Vec<String> {
        std::mem::take(&mut *log.lock().unwrap())
    }

    fn transition(
        manager: &mut SceneManager<TestScene>,
        context: &mut GlobalContext<TestScene>,
        transition: SceneTransition<TestScene>,
    ) -> bool {
        context.scene_transitions.push(transition);
        manager.process_transitions(context)
    }

    //=====================================================================
    // Startup
    //=====================================================================

    #[test]
    fn start_enters_first_registered_scene() {
        let log = Log::default();
        let mut manager = manager_with_three(&log);
        let context = GlobalContext::new(60.0);

        manager.start(&context);

        assert_eq!(manager.active(), Some(TestScene::A));
        assert_eq!(entries(&log), vec!["A:enter"]);
    }

    #[test]
    fn start_prefers_default_scene() {
        let log = Log::default();
        let mut manager = manager_with_three(&log);
        manager.register_default(TestScene::C, Recording::new("C", &log));
        let context = GlobalContext::new(60.0);

        manager.start(&context);

        assert_eq!(manager.active(), Some(TestScene::C));
        assert_eq!(manager.len(), 3);
    }

    #[test]
    fn set_default_rejects_unregistered_key() {
        let log = Log::default();
        let mut manager = SceneManager::new();
        manager.register_scene(TestScene::A, Recording::new("A", &log));

        assert!(!manager.set_default(TestScene::B));
        assert!(manager.active().is_none());

        assert!(manager.set_default(TestScene::A));
        assert_eq!(manager.active(), Some(TestScene::A));
    }

    #[test]
    fn start_without_scenes_is_harmless() {
        let mut manager = SceneManager::<TestScene>::new();
        let context = GlobalContext::new(60.0);
        manager.start(&context);
        assert!(manager.active().is_none());
        assert!(manager.active_scene().is_none());
    }

    //=====================================================================
    // Switching
    //=====================================================================

    #[test]
    fn switch_runs_exit_then_enter() {
        let log = Log::default();
        let mut manager = manager_with_three(&log);
        let mut context = GlobalContext::new(60.0);
        manager.start(&context);
        entries(&log);

        assert!(transition(&mut manager, &mut context, SceneTransition::Switch(TestScene::B)));

        assert_eq!(manager.active(), Some(TestScene::B));
        assert_eq!(entries(&log), vec!["A:exit", "B:enter"]);
    }

    #[test]
    fn switch_to_active_scene_is_ignored() {
        let log = Log::default();
        let mut manager = manager_with_three(&log);
        let mut context = GlobalContext::new(60.0);
        manager.start(&context);
        entries(&log);

        assert!(!transition(&mut manager, &mut context, SceneTransition::Switch(TestScene::A)));
        assert!(entries(&log).is_empty());
    }

    #[test]
    fn next_and_previous_wrap_around() {
        let log = Log::default();
        let mut manager = manager_with_three(&log);
        let mut context = GlobalContext::new(60.0);
        manager.start(&context);

        transition(&mut manager, &mut context, SceneTransition::Previous);
        assert_eq!(manager.active(), Some(TestScene::C));

        transition(&mut manager, &mut context, SceneTransition::Next);
        assert_eq!(manager.active(), Some(TestScene::A));

        transition(&mut manager, &mut context, SceneTransition::Next);
        assert_eq!(manager.active(), Some(TestScene::B));
    }

    #[test]
    fn queued_transitions_apply_in_order() {
        let log = Log::default();
        let mut manager = manager_with_three(&log);
        let mut context = GlobalContext::new(60.0);
        manager.start(&context);

        context.scene_transitions.push(SceneTransition::Next);
        context.scene_transitions.push(SceneTransition::Next);
        manager.process_transitions(&mut context);

        assert_eq!(manager.active(), Some(TestScene::C));
        assert!(context.scene_transitions.is_empty());
    }

    //=====================================================================
    // State Retention & Restart
    //=====================================================================

    #[test]
    fn scenes_keep_state_while_inactive() {
        let log = Log::default();
        let mut manager = manager_with_three(&log);
        let mut context = GlobalContext::new(60.0);
        manager.start(&context);

        manager.update(&context);
        manager.update(&context);
        transition(&mut manager, &mut context, SceneTransition::Next);
        transition(&mut manager, &mut context, SceneTransition::Previous);

        assert_eq!(manager.active_scene().map(|s| s.status()), Some("ticks 2".to_string()));
    }

    #[test]
    fn restart_resets_active_scene() {
        let log = Log::default();
        let mut manager = manager_with_three(&log);
        let mut context = GlobalContext::new(60.0);
        manager.start(&context);
        manager.update(&context);
        entries(&log);

        assert!(transition(&mut manager, &mut context, SceneTransition::Restart));

        assert_eq!(entries(&log), vec!["A:exit", "A:reset", "A:enter"]);
        assert_eq!(manager.active_scene().map(|s| s.status()), Some("ticks 0".to_string()));
    }
}
