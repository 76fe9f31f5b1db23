//=========================================================================
// Engine
//=========================================================================
//
// Entry point that wires the visualizer together.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──run()──>  [Runtime]
//         │                          │
//         ├─ with_tps()              ├─ spawns the logic thread
//         ├─ with_channel_capacity() ├─ runs the platform (blocks)
//         ├─ with_initial_sensor()   └─ joins the logic thread
//         ├─ with_window_size()
//         └─ with_title()
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::bounded;
use log::{error, info};
use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::platform_bridge::PlatformError;
use crate::core::CoreSystemsOrchestrator;
use crate::platform::{Platform, WindowConfig};
use crate::sensors::{self, SensorKind};

//=== Constants ===========================================================

pub const DEFAULT_TPS: f64 = 60.0;
pub const DEFAULT_CHANNEL_CAPACITY: usize = 128;
pub const DEFAULT_WINDOW_SIZE: (u32, u32) = (1280, 720);
pub const DEFAULT_TITLE: &str = "Tactile Sensors";

/// Snapshots in flight; the logic thread drops frames beyond this.
const FRAME_QUEUE: usize = 2;

//=== EngineError =========================================================

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error("logic thread panicked")]
    LogicThreadPanicked,
}

//=== EngineBuilder =======================================================

/// Fluent configuration for an [`Engine`].
///
/// # Default Values
///
/// - **TPS**: 60.0 (logic ticks per second)
/// - **Channel capacity**: 128 platform events
/// - **Initial sensor**: capacitive
/// - **Window**: 1280×720, titled "Tactile Sensors" until the first frame
///
/// # Examples
///
/// ```no_run
/// use tactile_viz::{EngineBuilder, sensors::SensorKind};
///
/// EngineBuilder::new()
///     .with_tps(120.0)
///     .with_initial_sensor(SensorKind::SixAxis)
///     .build()
///     .run()
///     .ok();
/// ```
#[derive(Debug, Clone)]
pub struct EngineBuilder {
    tps: f64,
    channel_capacity: usize,
    initial_sensor: SensorKind,
    window: WindowConfig,
}

impl EngineBuilder {
    pub fn new() -> Self {
        let (width, height) = DEFAULT_WINDOW_SIZE;
        Self {
            tps: DEFAULT_TPS,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            initial_sensor: SensorKind::default(),
            window: WindowConfig { title: String::from(DEFAULT_TITLE), width, height },
        }
    }

    /// Sets the logic tick rate. Animation is dt-scaled, so this changes
    /// smoothness and latency, not speed.
    ///
    /// # Panics
    ///
    /// Panics if `tps` is not a positive finite number.
    pub fn with_tps(mut self, tps: f64) -> Self {
        assert!(tps.is_finite() && tps > 0.0, "TPS must be positive, got {}", tps);
        self.tps = tps;
        self
    }

    /// Sets the platform → logic channel capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    pub fn with_initial_sensor(mut self, sensor: SensorKind) -> Self {
        self.initial_sensor = sensor;
        self
    }

    /// Sets the initial drawable size in physical pixels.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "Window size must be non-zero, got {}x{}", width, height);
        self.window.width = width;
        self.window.height = height;
        self
    }

    /// Caption shown until the first frame replaces it.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.window.title = title.into();
        self
    }

    /// Creates the systems and registers every sensor scene.
    pub fn build(self) -> Engine {
        info!(
            "Building engine (TPS: {}, channel: {}, sensor: {})",
            self.tps, self.channel_capacity, self.initial_sensor
        );

        let mut orchestrator = CoreSystemsOrchestrator::new(self.tps);
        orchestrator.init_systems(|systems| sensors::register_all(&mut systems.scene_manager, self.initial_sensor));
        orchestrator.set_viewport(self.window.width, self.window.height);

        Engine {
            orchestrator,
            tps: self.tps,
            channel_capacity: self.channel_capacity,
            window: self.window,
        }
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// Configured runtime, ready to [`run`](Engine::run).
///
/// ```text
/// Engine (main thread)
///   ├─► CoreSystemsOrchestrator (logic thread @ TPS)
///   │     └─► input, camera, active sensor scene
///   └─► Platform (event loop)
///         └─► window, renderer, input buffering
/// ```
pub struct Engine {
    orchestrator: CoreSystemsOrchestrator<SensorKind>,
    tps: f64,
    channel_capacity: usize,
    window: WindowConfig,
}

impl Engine {
    /// Runs until the window closes or Escape is pressed.
    ///
    /// 1. Creates the event channel (platform → logic) and the frame
    ///    channel (logic → platform)
    /// 2. Spawns the logic thread
    /// 3. Runs the platform event loop on this thread
    /// 4. Joins the logic thread once the platform has exited
    pub fn run(self) -> Result<(), EngineError> {
        info!("Starting engine runtime (TPS: {})", self.tps);

        //--- 1. Channels ---------------------------------------------------
        let (event_tx, event_rx) = bounded(self.channel_capacity);
        let (frame_tx, frame_rx) = bounded(FRAME_QUEUE);

        //--- 2. Logic thread -----------------------------------------------
        let core_handle = self.orchestrator.spawn_core_thread(event_rx, frame_tx);
        info!("Core logic thread spawned");

        //--- 3. Platform ---------------------------------------------------
        let platform_result = Platform::new(self.window, event_tx, frame_rx).run();
        if let Err(e) = &platform_result {
            error!("Platform error: {e}");
        }
        info!("Platform event loop exited");

        //--- 4. Join -------------------------------------------------------
        let joined = core_handle.join();
        platform_result?;
        joined.map_err(|_| {
            error!("Core thread panicked");
            EngineError::LogicThreadPanicked
        })?;

        info!("Engine shutdown complete");
        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
