//=========================================================================
// Platform Subsystem
//=========================================================================
//
// Owns the winit event loop, the window and the wgpu renderer on the
// main thread, and talks to the logic thread through two channels.
//
// Architecture:
// ```text
//  Main Thread                                Logic Thread
//  ┌───────────────────────────────┐         ┌────────────────────┐
//  │ winit event loop              │         │                    │
//  │   ↓ InputProcessor            │         │                    │
//  │ InputBuffer                   │         │                    │
//  │   ↓ RedrawRequested (flush)   │ Platform│                    │
//  │ Sender<PlatformEvent> ────────┼────────►│ orchestrator @ TPS │
//  │                               │  Event  │        │           │
//  │ Receiver<FrameSnapshot> ◄─────┼─────────┼────────┘           │
//  │   ↓ newest frame              │ Frame   └────────────────────┘
//  │ Renderer::render()            │ Snapshot
//  └───────────────────────────────┘
// ```
//
// Frame boundary is RedrawRequested: input gathered since the previous
// redraw is sent as one batch, every queued frame is drained and only the
// newest is drawn, then the next redraw is requested.
//
// Shutdown:
//   - window close        → WindowClosed sent, loop exits
//   - frame channel gone  → logic thread finished (Quit), loop exits
//   - renderer init fails → WindowClosed sent, loop exits
//
//=========================================================================

//=== Submodules ==========================================================

mod input_buffer;
mod input_processor;

//=== External Dependencies ===============================================

use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender, TryRecvError};
use log::{debug, error, info, trace, warn};
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowId},
};

//=== Internal Dependencies ===============================================

use crate::core::platform_bridge::{PlatformError, PlatformEvent};
use crate::render::{FrameSnapshot, Renderer};
use input_buffer::InputBuffer;
use input_processor::InputProcessor;

//=== WindowConfig ========================================================

/// Initial window settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

//=== FramePoll ===========================================================

#[derive(Debug, PartialEq, Eq)]
enum FramePoll {
    Ready,
    Disconnected,
}

//=== Platform ============================================================

pub(crate) struct Platform {
    config: WindowConfig,
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    input_processor: InputProcessor,
    buffer: InputBuffer,
    event_sender: Sender<PlatformEvent>,
    frames: Receiver<FrameSnapshot>,
    latest: Option<FrameSnapshot>,
    caption: String,
}

impl Platform {
    pub(crate) fn new(
        config: WindowConfig,
        event_sender: Sender<PlatformEvent>,
        frames: Receiver<FrameSnapshot>,
    ) -> Self {
        Self {
            config,
            window: None,
            renderer: None,
            input_processor: InputProcessor::new(),
            buffer: InputBuffer::new(),
            event_sender,
            frames,
            latest: None,
            caption: String::new(),
        }
    }

    /// Runs the event loop on the calling thread until the window closes
    /// or the logic thread finishes.
    pub(crate) fn run(mut self) -> Result<(), PlatformError> {
        let event_loop = EventLoop::new().map_err(PlatformError::EventLoopCreation)?;
        event_loop.run_app(&mut self).map_err(PlatformError::EventLoopExecution)
    }

    //--- Outbound ---------------------------------------------------------

    fn send(&self, event: PlatformEvent) {
        if self.event_sender.send(event).is_err() {
            warn!(target: "platform", "Logic thread disconnected, event dropped");
        }
    }

    /// Sends this frame's input. Empty frames send nothing.
    fn flush_input_buffer(&mut self) {
        if let Some((discrete, continuous)) = self.buffer.drain() {
            trace!(target: "platform", "Flushing {} discrete, {} continuous", discrete.len(), continuous.len());
            self.send(PlatformEvent::Inputs { discrete, continuous });
        }
    }

    fn close(&mut self, event_loop: &ActiveEventLoop) {
        self.send(PlatformEvent::WindowClosed);
        event_loop.exit();
    }

    //--- Inbound ----------------------------------------------------------

    /// Keeps the newest published frame.
    fn poll_frames(&mut self) -> FramePoll {
        loop {
            match self.frames.try_recv() {
                Ok(frame) => self.latest = Some(frame),
                Err(TryRecvError::Empty) => return FramePoll::Ready,
                Err(TryRecvError::Disconnected) => return FramePoll::Disconnected,
            }
        }
    }

    /// Draws the newest frame. Returns false on an unrecoverable GPU error.
    fn present(&mut self) -> bool {
        let (Some(window), Some(renderer), Some(frame)) = (&self.window, &mut self.renderer, &self.latest) else {
            return true;
        };

        if frame.caption != self.caption {
            window.set_title(&frame.caption);
            self.caption.clone_from(&frame.caption);
        }

        match renderer.render(frame) {
            Ok(()) => true,
            Err(e) => {
                error!(target: "platform", "Render failed: {e}");
                false
            }
        }
    }
}

//=== ApplicationHandler ==================================================

impl ApplicationHandler for Platform {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(PhysicalSize::new(self.config.width, self.config.height));

        let window = match event_loop.create_window(attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                error!(target: "platform", "Window creation failed: {e}");
                self.close(event_loop);
                return;
            }
        };

        match Renderer::new(Arc::clone(&window)) {
            Ok(renderer) => {
                let (width, height) = renderer.size();
                info!(target: "platform", "Window and renderer ready ({width}x{height})");
                self.send(PlatformEvent::Resized { width, height });
                self.renderer = Some(renderer);
            }
            Err(e) => {
                error!(target: "platform", "Renderer initialization failed: {e}");
                self.close(event_loop);
                return;
            }
        }

        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Close requested");
                self.close(event_loop);
            }

            WindowEvent::Resized(size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(size.width, size.height);
                }
                if size.width > 0 && size.height > 0 {
                    self.send(PlatformEvent::Resized { width: size.width, height: size.height });
                }
            }

            WindowEvent::ModifiersChanged(modifiers) => {
                self.input_processor.update_modifiers(modifiers.state());
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let Some(input) = self.input_processor.process_key_event(&event) {
                    self.buffer.push_discrete(input);
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let input = self.input_processor.process_mouse_button(button, state);
                self.buffer.push_discrete(input);
            }

            WindowEvent::CursorMoved { position, .. } => {
                let input = self.input_processor.process_mouse_move(position.x as f32, position.y as f32);
                self.buffer.push_continuous(input);
            }

            WindowEvent::MouseWheel { delta, .. } => {
                if let Some(input) = self.input_processor.process_wheel(delta) {
                    self.buffer.push_continuous(input);
                }
            }

            WindowEvent::RedrawRequested => {
                self.flush_input_buffer();

                if self.poll_frames() == FramePoll::Disconnected {
                    info!(target: "platform", "Logic thread finished, closing window");
                    event_loop.exit();
                    return;
                }

                if !self.present() {
                    self.close(event_loop);
                    return;
                }

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        debug!(target: "platform", "Event loop exiting");
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
