//! Stick Leap entry point
//!
//! On the web this installs logging and the panic hook; the game loop itself
//! lives in JavaScript and drives `web::LevelGenerator`. Natively it is a
//! level preview tool: `stick-leap [seed] [levels]`.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to init logger");
    log::info!("Stick Leap starting...");
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use stick_leap::levelgen::{GenerationSession, tutorial_len, tutorial_level};
    use stick_leap::palette;
    use stick_leap::platform::clock_seed;
    use stick_leap::settings::GeneratorSettings;

    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or_else(clock_seed);
    let levels = args
        .next()
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(5);

    log::info!("Stick Leap (native) previewing {} levels with seed: {}", levels, seed);

    for index in 0..tutorial_len() {
        if let Some(level) = tutorial_level(index) {
            println!("tutorial {}: {} platforms", index + 1, level.platforms.len());
        }
    }

    let mut session = GenerationSession::new(seed, GeneratorSettings::default());
    for number in 1..=levels {
        let generated = session.generate_level(number, number as f64 * 1000.0);
        let report = &generated.report;
        println!(
            "level {}: {} ({} attempts{})",
            number,
            report.pattern_names(),
            report.attempts,
            if report.is_fallback { ", fallback" } else { "" }
        );
        for p in &generated.level.platforms {
            println!(
                "  {:<10} {:>6.1} {:>6.1} {:>6.1}  {}",
                p.category.as_str(),
                p.x,
                p.y,
                p.width,
                palette::color(p.category)
            );
        }
    }

    let next = levels + 1;
    let preview = session.generate_level(next, f64::from(next) * 1000.0);
    match preview.level.to_json() {
        Ok(json) => println!("{json}"),
        Err(e) => log::warn!("Failed to export level {}: {}", next, e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
