//=========================================================================
// Input Echo
//
// Opens a window, grabs the pointer and prints what the input system sees
// each tick: typed text, key transitions, mouse look deltas and wheel.
//
// Registered as a cargo example from demos/ (see Cargo.toml).
//
// Run with:
//   RUST_LOG=debug cargo run --example input_echo
//
//=========================================================================

use neo_platform::prelude::*;

fn main() {
    env_logger::init();

    EngineBuilder::new()
        .with_title("Input Echo")
        .with_tps(30.0)
        .build()
        .run(|input| {
            if !input.has_changed() {
                return;
            }

            for event in input.events() {
                match event.kind {
                    SysEventKind::Key => println!(
                        "key {:>3} {}",
                        event.value,
                        if event.key_down() { "down" } else { "up" }
                    ),
                    SysEventKind::Char => println!("char {:?}", char::from(event.value as u8)),
                    _ => {}
                }
            }

            let (dx, dy) = input.mouse_delta();
            if dx != 0 || dy != 0 {
                println!("look {:+} {:+}", dx, dy);
            }

            if input.wheel() != 0 {
                println!("wheel {:+}", input.wheel());
            }

            if input.is_key_down(keys::K_ESCAPE) {
                println!("escape held");
            }
        });
}
