//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use neo_platform::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine core
pub use crate::engine::{Engine, EngineBuilder};

// Input system
pub use crate::core::input::{InputFrame, InputSystem, PollSnapshot};

// Event vocabulary and queue
pub use crate::core::input::{EventPayload, EventQueue, SysEvent, SysEventKind};

// Translation
pub use crate::core::input::{InputSource, InputTranslator, PointerHost, RawInput};

// Key numbers
pub use crate::core::input::keys;
pub use crate::core::input::KeyNum;
