//=========================================================================
// Window Pointer
//
// Pointer control backed by a winit window: viewport size for the
// translator's re-centring, cursor warping, and grab/visibility toggling.
//
// Coordinates are physical pixels throughout, matching the positions
// winit reports in `CursorMoved`.
//
//=========================================================================

use log::{debug, warn};
use winit::dpi::PhysicalPosition;
use winit::window::{CursorGrabMode, Window};

use crate::core::input::PointerHost;

//=== WindowPointer =======================================================

pub(crate) struct WindowPointer<'a> {
    window: &'a Window,
}

impl<'a> WindowPointer<'a> {
    pub(crate) fn new(window: &'a Window) -> Self {
        Self { window }
    }
}

impl PointerHost for WindowPointer<'_> {
    fn viewport_size(&self) -> (i32, i32) {
        let size = self.window.inner_size();
        (
            i32::try_from(size.width).unwrap_or(i32::MAX),
            i32::try_from(size.height).unwrap_or(i32::MAX),
        )
    }

    fn warp_pointer(&mut self, x: i32, y: i32) {
        if let Err(e) = self.window.set_cursor_position(PhysicalPosition::new(x, y)) {
            debug!(target: "platform::input", "Pointer warp to ({}, {}) failed: {}", x, y, e);
        }
    }
}

//=== Grab ================================================================

/// Confines and hides the cursor, or releases it.
///
/// Platforms without confinement fall back to locking.
pub(crate) fn apply_grab(window: &Window, grabbed: bool) {
    let result = if grabbed {
        window
            .set_cursor_grab(CursorGrabMode::Confined)
            .or_else(|_| window.set_cursor_grab(CursorGrabMode::Locked))
    } else {
        window.set_cursor_grab(CursorGrabMode::None)
    };

    if let Err(e) = result {
        warn!(target: "platform", "Cursor grab change ({}) failed: {}", grabbed, e);
    }

    window.set_cursor_visible(!grabbed);
    debug!(target: "platform", "Input grab {}", if grabbed { "engaged" } else { "released" });
}
