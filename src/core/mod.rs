//=========================================================================
// Core Systems Orchestrator
//=========================================================================
//
// Drives every logic-side system on a dedicated thread at a fixed tick
// rate, independent of the display refresh rate.
//
// Architecture:
// ```text
//  PlatformEvent ──► EventCollector ──► GlobalContext
//                                           │
//                         GlobalSystems::update()
//                                           │
//                         GlobalSystems::compose() ──► FrameSnapshot ──► platform
// ```
//
// Shutdown:
//   - WindowClosed or platform disconnect  → loop exits
//   - Quit action                          → loop exits, frame channel
//                                            drops, platform closes
//   - frame receiver gone                  → loop exits
//
//=========================================================================

//=== Module Declarations =================================================

pub mod camera;
pub mod clock;
pub mod globals;
pub mod input;
pub mod platform_bridge;
pub mod scene;

//=== Public API ==========================================================

pub use camera::OrbitController;
pub use clock::FrameClock;
pub use globals::{GlobalContext, GlobalSystems};
pub use input::{Action, InputSystem};
pub use scene::{Scene, SceneKey, SceneManager, SceneTransition};

//=== External Dependencies ===============================================

use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender, TrySendError};
use log::{debug, info, trace, warn};

//=== Internal Dependencies ===============================================

use crate::render::FrameSnapshot;
use platform_bridge::{EventCollector, PlatformEvent, TickControl};

//=== CoreSystemsOrchestrator =============================================

pub(crate) struct CoreSystemsOrchestrator<S: SceneKey> {
    systems: GlobalSystems<S>,
    context: GlobalContext<S>,
    tps: f64,
}

impl<S: SceneKey> CoreSystemsOrchestrator<S> {
    pub(crate) fn new(tps: f64) -> Self {
        Self {
            systems: GlobalSystems::new(),
            context: GlobalContext::new(tps),
            tps,
        }
    }

    /// Gives mutable access to the systems before the thread starts.
    pub(crate) fn init_systems<F>(&mut self, init_fn: F)
    where
        F: FnOnce(&mut GlobalSystems<S>),
    {
        init_fn(&mut self.systems);
    }

    /// Sets the initial viewport so the first ticks use the real size.
    pub(crate) fn set_viewport(&mut self, width: u32, height: u32) {
        self.context.viewport = (width, height);
    }

    //--- Thread -----------------------------------------------------------

    /// Spawns the logic thread.
    ///
    /// Each tick:
    ///  1. Collects platform events
    ///  2. Updates input, camera and the active scene
    ///  3. Publishes a frame (dropped if the platform is behind)
    ///  4. Sleeps to maintain fixed pacing
    pub(crate) fn spawn_core_thread(
        self,
        receiver: Receiver<PlatformEvent>,
        frames: Sender<FrameSnapshot>,
    ) -> thread::JoinHandle<()> {
        let frame_duration = Duration::from_secs_f64(1.0 / self.tps);

        thread::spawn(move || {
            let Self { mut systems, mut context, .. } = self;
            let mut collector = EventCollector::new(receiver);

            systems.start(&context);

            loop {
                let frame_start = Instant::now();

                //--- Step 1: Gather platform events ------------------------
                if collector.collect_frame() == TickControl::Exit {
                    break;
                }
                if let Some(viewport) = collector.take_resize() {
                    context.viewport = viewport;
                }
                context.frame_events = collector.take_batches();

                //--- Step 2: Update systems --------------------------------
                if systems.update(&mut context) == TickControl::Exit {
                    break;
                }

                //--- Step 3: Publish the frame -----------------------------
                match frames.try_send(systems.compose(&context)) {
                    Ok(()) => {}
                    Err(TrySendError::Full(_)) => {
                        trace!(target: "core", "Renderer behind, dropped frame {}", context.clock.tick());
                    }
                    Err(TrySendError::Disconnected(_)) => {
                        debug!(target: "core", "Frame receiver gone");
                        break;
                    }
                }
                context.clock.advance();

                //--- Step 4: Maintain fixed pacing -------------------------
                let elapsed = frame_start.elapsed();
                if elapsed < frame_duration {
                    thread::sleep(frame_duration - elapsed);
                } else {
                    warn!(target: "core", "Tick overran budget: {:?}", elapsed);
                }
            }

            info!(target: "core", "Core thread exiting after {} ticks", context.clock.tick());
        })
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
