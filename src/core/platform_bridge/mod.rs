//=========================================================================
// Platform Bridge
//=========================================================================
//
// Bridges the platform layer (winit today) with core systems.
//
// The platform owns the event queue and drains it once per frame; what
// crosses this bridge is the already-ordered result, so the core never
// sees OS callbacks or the queue itself.
//
// Components:
// - `interface`: Event types and error definitions (the contract)
// - `event_collector`: Core-side event collection
//
//=========================================================================

//=== Module Declarations =================================================

pub(crate) mod event_collector;
pub(crate) mod interface;

//=== Internal API ========================================================

pub(crate) use event_collector::{EventCollector, TickControl};
pub(crate) use interface::{PlatformError, PlatformEvent};
