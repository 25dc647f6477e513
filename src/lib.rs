//=========================================================================
// Neo Platform — Library Root
//
// This crate defines the public API surface of the Neo platform layer.
//
// Responsibilities:
// - Expose the engine facade (`Engine`, `EngineBuilder`)
// - Expose the input vocabulary, event queue and translator in `core`
// - Keep the winit integration (`platform`) hidden from end users
//
// Typical usage:
// ```no_run
// use neo_platform::EngineBuilder;
//
// fn main() {
//     EngineBuilder::new().build().run(|input| {
//         let (dx, dy) = input.mouse_delta();
//         let _ = (dx, dy);
//     });
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the input system: event types, the fixed-capacity event
// queue, the input translator and the core-thread orchestration.
//
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` contains OS-specific logic (window, winit integration,
// pointer grab) and is kept private.
//
// `engine` defines the main engine entry point and configuration.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder};
