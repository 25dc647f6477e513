//=========================================================================
// Neo Platform Engine
//
// Main entry point and coordinator for the platform layer.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──run(on_tick)──>  [Runtime]
//         │                          │
//         ├─ with_tps()              └─ spawns core thread
//         ├─ with_channel_capacity()    runs platform
//         ├─ with_event_queue_capacity()  blocks until exit
//         ├─ with_title() / with_window_size()
//         └─ with_input_grab()
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{bounded, Receiver, Sender};
use log::{error, info};

//=== Internal Dependencies ===============================================

use crate::core::input::{EventQueue, InputSystem, DEFAULT_EVENT_QUEUE_CAPACITY};
use crate::core::platform_bridge::PlatformEvent;
use crate::core::CoreSystemsOrchestrator;
use crate::platform::{Platform, WindowSettings};

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **TPS**: 60.0 (logic updates per second)
/// - **Channel capacity**: 128 frames
/// - **Event queue capacity**: 256 events
/// - **Window**: "Neo Platform", 800x600
/// - **Input grab**: on
///
/// # Examples
///
/// ```no_run
/// use neo_platform::EngineBuilder;
///
/// EngineBuilder::new()
///     .with_tps(120.0)
///     .with_event_queue_capacity(512)
///     .build()
///     .run(|input| {
///         if !input.typed_text().is_empty() {
///             println!("typed: {}", input.typed_text());
///         }
///     });
/// ```
pub struct EngineBuilder {
    tps: f64,
    channel_capacity: usize,
    event_queue_capacity: usize,
    window: WindowSettings,
}

impl EngineBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            tps: 60.0,
            channel_capacity: 128,
            event_queue_capacity: DEFAULT_EVENT_QUEUE_CAPACITY,
            window: WindowSettings::default(),
        }
    }

    /// Sets the target ticks per second for the logic thread.
    ///
    /// Default: 60.0
    ///
    /// # Panics
    ///
    /// Panics if `tps <= 0.0`.
    pub fn with_tps(mut self, tps: f64) -> Self {
        assert!(tps > 0.0, "TPS must be positive, got {}", tps);
        self.tps = tps;
        self
    }

    /// Sets the channel capacity (in frames) for platform → core
    /// communication.
    ///
    /// Default: 128
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    /// Sets how many events one frame can hold before the oldest are
    /// dropped.
    ///
    /// Default: 256
    ///
    /// # Panics
    ///
    /// Panics unless `capacity` is a power of two.
    pub fn with_event_queue_capacity(mut self, capacity: usize) -> Self {
        assert!(
            capacity.is_power_of_two(),
            "Event queue capacity must be a power of two, got {}",
            capacity
        );
        self.event_queue_capacity = capacity;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.window.title = title.into();
        self
    }

    /// Initial inner size in logical pixels.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "Window size must be non-zero");
        self.window.width = width;
        self.window.height = height;
        self
    }

    /// Whether the pointer is confined and hidden for relative mouse look.
    ///
    /// Default: true
    pub fn with_input_grab(mut self, grab: bool) -> Self {
        self.window.grab_input = grab;
        self
    }

    /// Builds the engine instance.
    pub fn build(self) -> Engine {
        info!(
            "Building engine (TPS: {}, channel: {}, event queue: {})",
            self.tps, self.channel_capacity, self.event_queue_capacity
        );

        Engine {
            orchestrator: CoreSystemsOrchestrator::new(),
            tps: self.tps,
            channel_capacity: self.channel_capacity,
            event_queue_capacity: self.event_queue_capacity,
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

/// Platform layer runtime.
///
/// # Architecture
///
/// ```text
/// Engine (Main Thread)
///   ├─► CoreSystemsOrchestrator (Logic Thread @ TPS)
///   │     └─► InputSystem → on_tick
///   │
///   └─► Platform (Event Loop)
///         └─► Window, InputTranslator, EventQueue
///
/// Communication: bounded channel (PlatformEvent)
/// ```
pub struct Engine {
    orchestrator: CoreSystemsOrchestrator,
    tps: f64,
    channel_capacity: usize,
    event_queue_capacity: usize,
    window: WindowSettings,
}

impl Engine {
    //--- Execution --------------------------------------------------------

    /// Starts the runtime and blocks until the window closes.
    ///
    /// `on_tick` runs on the logic thread once per tick, after that tick's
    /// input has been applied.
    ///
    /// # Lifecycle
    ///
    /// 1. Creates the event queue and the platform → core channel
    /// 2. Spawns the logic thread running at the configured TPS
    /// 3. Runs the platform event loop (blocks here)
    /// 4. On window close: platform exits → channel disconnects → logic
    ///    thread terminates
    pub fn run<F>(self, on_tick: F)
    where
        F: FnMut(&mut InputSystem) + Send + 'static,
    {
        info!("Starting engine runtime (TPS: {})", self.tps);

        //--- 1. Create queue and communication channel --------------------
        let queue = match EventQueue::with_capacity(self.event_queue_capacity) {
            Ok(queue) => queue,
            Err(e) => {
                error!("Event queue creation failed: {}", e);
                return;
            }
        };

        let (tx, rx): (Sender<PlatformEvent>, Receiver<PlatformEvent>) =
            bounded(self.channel_capacity);

        info!("Channel created (capacity: {})", self.channel_capacity);

        //--- 2. Spawn the core logic thread -------------------------------
        let core_handle = self.orchestrator.spawn_core_thread(rx, self.tps, on_tick);
        info!("Core logic thread spawned");

        //--- 3. Launch the platform subsystem -----------------------------
        let platform = Platform::new(tx, queue, self.window);
        info!("Platform initialized, entering event loop");

        if let Err(e) = platform.run() {
            error!("Platform error: {}", e);
        }

        info!("Platform event loop exited");

        //--- 4. Cleanup: Wait for logic thread to terminate --------------
        match core_handle.join() {
            Ok(()) => {
                info!("Core thread terminated cleanly");
            }
            Err(e) => {
                error!("Core thread panicked: {:?}", e);
            }
        }

        info!("Engine shutdown complete");
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
