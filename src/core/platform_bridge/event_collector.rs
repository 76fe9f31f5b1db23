//=========================================================================
// Event Collector
//=========================================================================
//
// Platform event collector with bounded polling and shutdown detection.
//
// Architecture:
//   Receiver<PlatformEvent> → collect_frame() → input batches
//                                             → latest resize
//                                             → TickControl
//
// Bounded polling prevents starvation. The collector never blocks; tick
// pacing belongs to the orchestrator loop.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, TryRecvError};
use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use super::PlatformEvent;
use crate::core::input::event::InputEvent;

//=== Constants ===========================================================

const MAX_EVENTS_PER_FRAME: usize = 100;

//=== TickControl =========================================================

/// Update loop control signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TickControl {
    Continue,
    Exit,
}

//=== EventCollector ======================================================

/// Collects platform events with bounded polling and batch extraction.
pub(crate) struct EventCollector {
    receiver: Receiver<PlatformEvent>,
    input_batches: Vec<Vec<InputEvent>>,
    resize: Option<(u32, u32)>,
}

impl EventCollector {
    pub(crate) fn new(receiver: Receiver<PlatformEvent>) -> Self {
        Self {
            receiver,
            input_batches: Vec::with_capacity(4),
            resize: None,
        }
    }

    /// Collects pending platform events, at most `MAX_EVENTS_PER_FRAME`.
    ///
    /// Returns [`TickControl::Exit`] on `WindowClosed` or when the platform
    /// side of the channel is gone.
    pub(crate) fn collect_frame(&mut self) -> TickControl {
        self.input_batches.clear();
        let mut drained = 0;

        while drained < MAX_EVENTS_PER_FRAME {
            match self.receiver.try_recv() {
                Ok(event) => {
                    drained += 1;
                    if self.handle_event(event) == TickControl::Exit {
                        return TickControl::Exit;
                    }
                }
                Err(TryRecvError::Disconnected) => {
                    info!(target: "core", "Platform channel disconnected");
                    return TickControl::Exit;
                }
                Err(TryRecvError::Empty) => break,
            }
        }

        if drained >= MAX_EVENTS_PER_FRAME {
            warn!(target: "core", "Event queue backlog: drained {} events this frame", drained);
        }

        TickControl::Continue
    }

    /// Returns collected input batches for this frame.
    #[cfg(test)]
    pub(crate) fn batches(&self) -> &[Vec<InputEvent>] {
        &self.input_batches
    }

    /// Takes ownership of collected input batches, leaving an empty vec.
    pub(crate) fn take_batches(&mut self) -> Vec<Vec<InputEvent>> {
        std::mem::take(&mut self.input_batches)
    }

    /// Most recent drawable size reported since the last call.
    pub(crate) fn take_resize(&mut self) -> Option<(u32, u32)> {
        self.resize.take()
    }

    fn handle_event(&mut self, event: PlatformEvent) -> TickControl {
        match event {
            PlatformEvent::Inputs { discrete, continuous } => {
                if !discrete.is_empty() {
                    self.input_batches.push(discrete);
                }
                if !continuous.is_empty() {
                    self.input_batches.push(continuous);
                }
                TickControl::Continue
            }
            PlatformEvent::Resized { width, height } => {
                debug!(target: "core", "Viewport resized to {}x{}", width, height);
                self.resize = Some((width, height));
                TickControl::Continue
            }
            PlatformEvent::WindowClosed => {
                info!(target: "core", "Window closed");
                TickControl::Exit
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{KeyCode, Modifiers};
    use crossbeam_channel::unbounded;

    fn space() -> InputEvent {
        InputEvent::KeyDown { key: KeyCode::Space, modifiers: Modifiers::NONE }
    }

    #[test]
    fn empty_queue_continues_without_batches() {
        let (_tx, rx) = unbounded::<PlatformEvent>();
        let mut collector = EventCollector::new(rx);

        assert_eq!(collector.collect_frame(), TickControl::Continue);
        assert!(collector.batches().is_empty());
        assert!(collector.take_resize().is_none());
    }

    #[test]
    fn empty_queue_returns_without_waiting() {
        let (_tx, rx) = unbounded::<PlatformEvent>();
        let mut collector = EventCollector::new(rx);

        let start = std::time::Instant::now();
        for _ in 0..100 {
            assert_eq!(collector.collect_frame(), TickControl::Continue);
        }
        assert!(start.elapsed() < std::time::Duration::from_millis(100));
    }

    #[test]
    fn discrete_and_continuous_become_separate_batches() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        tx.send(PlatformEvent::Inputs {
            discrete: vec![space()],
            continuous: vec![InputEvent::MouseMoved { x: 10.0, y: 20.0 }],
        })
        .unwrap();
        tx.send(PlatformEvent::Inputs { discrete: vec![], continuous: vec![] }).unwrap();

        assert_eq!(collector.collect_frame(), TickControl::Continue);
        assert_eq!(collector.batches().len(), 2);
    }

    #[test]
    fn batches_do_not_leak_into_next_frame() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        tx.send(PlatformEvent::Inputs { discrete: vec![space()], continuous: vec![] }).unwrap();
        collector.collect_frame();
        assert_eq!(collector.take_batches().len(), 1);

        collector.collect_frame();
        assert!(collector.batches().is_empty());
    }

    #[test]
    fn keeps_only_latest_resize() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        tx.send(PlatformEvent::Resized { width: 800, height: 600 }).unwrap();
        tx.send(PlatformEvent::Resized { width: 1024, height: 768 }).unwrap();
        collector.collect_frame();

        assert_eq!(collector.take_resize(), Some((1024, 768)));
        assert_eq!(collector.take_resize(), None);
    }

    #[test]
    fn window_closed_exits() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        tx.send(PlatformEvent::Inputs { discrete: vec![space()], continuous: vec![] }).unwrap();
        tx.send(PlatformEvent::WindowClosed).unwrap();

        assert_eq!(collector.collect_frame(), TickControl::Exit);
    }

    #[test]
    fn disconnect_exits() {
        let (tx, rx) = unbounded::<PlatformEvent>();
        let mut collector = EventCollector::new(rx);
        drop(tx);

        assert_eq!(collector.collect_frame(), TickControl::Exit);
    }

    #[test]
    fn drain_is_bounded_per_frame() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        for _ in 0..(MAX_EVENTS_PER_FRAME + 20) {
            tx.send(PlatformEvent::Inputs { discrete: vec![space()], continuous: vec![] }).unwrap();
        }

        collector.collect_frame();
        assert_eq!(collector.batches().len(), MAX_EVENTS_PER_FRAME);

        collector.collect_frame();
        assert_eq!(collector.batches().len(), 20);
    }
}
