//=========================================================================
// Core Systems Orchestrator
//
// Coordinator for engine systems running on the logic (non-platform)
// thread.
//
// Responsibilities:
// - Receive drained input frames from the platform via the bridge channel
// - Apply them to the InputSystem once per tick, in arrival order
// - Hand the updated input to the simulation callback
// - Maintain pacing using a fixed tick rate (TPS)
//
// Notes:
// The platform thread owns the event queue; this thread only ever sees
// the ordered frames it produced. Communication is message passing only.
//
//=========================================================================

//=== Standard Library Imports ============================================
use std::thread;
use std::time::{Duration, Instant};

//=== External Crates =====================================================
use crossbeam_channel::Receiver;
use log::info;

//=== Modules =============================================================
pub mod input;
pub(crate) mod platform_bridge;

//=== Internal Modules ====================================================
use input::InputSystem;
use platform_bridge::{EventCollector, PlatformEvent, TickControl};

//=== CoreSystemsOrchestrator =============================================

pub(crate) struct CoreSystemsOrchestrator {
    input_system: InputSystem,
}

impl CoreSystemsOrchestrator {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new() -> Self {
        Self {
            input_system: InputSystem::new(),
        }
    }

    //--- spawn_core_thread() ---------------------------------------------
    //
    // Each tick:
    //  1. Collects frames sent by the platform
    //  2. Applies them to the InputSystem
    //  3. Runs the simulation callback
    //  4. Sleeps to maintain fixed pacing
    //
    pub(crate) fn spawn_core_thread<F>(
        mut self,
        receiver: Receiver<PlatformEvent>,
        tps: f64,
        mut on_tick: F,
    ) -> thread::JoinHandle<()>
    where
        F: FnMut(&mut InputSystem) + Send + 'static,
    {
        let tick_duration = Duration::from_secs_f64(1.0 / tps);

        thread::spawn(move || {
            let mut collector = EventCollector::new(receiver);

            loop {
                let tick_start = Instant::now();

                if self.tick(&mut collector, &mut on_tick) == TickControl::Exit {
                    info!(target: "core", "Core thread exiting");
                    break;
                }

                let elapsed = tick_start.elapsed();
                if elapsed < tick_duration {
                    thread::sleep(tick_duration - elapsed);
                }
            }
        })
    }

    //--- tick() -----------------------------------------------------------

    fn tick<F>(&mut self, collector: &mut EventCollector, on_tick: &mut F) -> TickControl
    where
        F: FnMut(&mut InputSystem),
    {
        if collector.collect_frame() == TickControl::Exit {
            return TickControl::Exit;
        }

        self.input_system.update(collector.frames_mut());
        on_tick(&mut self.input_system);

        TickControl::Continue
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
