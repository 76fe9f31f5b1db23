//=========================================================================
// Platform Bridge
//=========================================================================
//
// Bridges the winit platform layer with the logic thread.
//
// Components:
// - `interface`: event and error types (the contract)
// - `event_collector`: core-side event collection and buffering
//
//=========================================================================

//=== Module Declarations =================================================

pub(crate) mod event_collector;
pub(crate) mod interface;

//=== Internal API ========================================================

pub(crate) use event_collector::{EventCollector, TickControl};
pub(crate) use interface::PlatformEvent;
pub use interface::PlatformError;
