//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// Platform-to-core interface types (events and errors).
//
// Defines the contract for communication between platform and core threads.
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::input::InputFrame;

//=== PlatformEvent =======================================================

/// Events sent from platform to core over the bridge channel.
///
/// Not `Clone`: frames own their event payloads.
#[derive(Debug)]
pub(crate) enum PlatformEvent {
    /// Queue contents and poll samples drained at one frame boundary.
    Frame(InputFrame),

    /// Window focus gained (`true`) or lost (`false`).
    FocusChanged(bool),

    /// Window close requested.
    WindowClosed,
}

//=== PlatformError =======================================================

/// Platform initialization and runtime errors.
#[derive(Debug, Error)]
pub(crate) enum PlatformError {
    /// Event loop creation failed (OS-level issue).
    #[error("Event loop creation failed: {0}")]
    EventLoopCreation(#[source] winit::error::EventLoopError),

    /// Event loop execution error.
    #[error("Event loop error: {0}")]
    EventLoopExecution(#[source] winit::error::EventLoopError),
}

//=========================================================================
// Unit Tests
//=========================================================================
