//! Candle Flap entry point
//!
//! On the web the library's `wasm_main` is the entry point and the JS front
//! end drives a `WebGame`. Natively this runs a headless autopilot game.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::time::{SystemTime, UNIX_EPOCH};

    use candle_flap::sim::autopilot;
    use candle_flap::{Difficulty, GameConfig, GameEvent, GameLoop, GameSession, ManualScheduler};

    /// Give up after this many frames (about ten minutes at 60 Hz)
    const FRAME_BUDGET: u32 = 36_000;

    struct Args {
        seed: u64,
        difficulty: Difficulty,
    }

    fn parse_args() -> Args {
        let mut seed = None;
        let mut difficulty = Difficulty::Normal;
        for arg in std::env::args().skip(1) {
            if let Some(name) = arg.strip_prefix("--") {
                match Difficulty::from_str(name) {
                    Some(d) => difficulty = d,
                    None => log::warn!("Ignoring unknown flag --{}", name),
                }
            } else {
                match arg.parse::<u64>() {
                    Ok(s) => seed = Some(s),
                    Err(_) => log::warn!("Ignoring non-numeric seed {:?}", arg),
                }
            }
        }
        let seed = seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or_default()
        });
        Args { seed, difficulty }
    }

    pub fn run() {
        let args = parse_args();
        let config = GameConfig::for_difficulty(args.difficulty);
        let session = match GameSession::new(config, args.seed) {
            Ok(session) => session,
            Err(e) => {
                log::error!("Invalid config: {}", e);
                std::process::exit(1);
            }
        };

        log::info!(
            "Candle Flap (headless) seed {} on {}",
            args.seed,
            args.difficulty.as_str()
        );

        let game = GameLoop::new(session, ManualScheduler::new());
        game.start();

        let mut frames = 0;
        while frames < FRAME_BUDGET && game.is_scheduled() {
            if game.with_session(|s| autopilot::should_jump(s)) {
                game.jump();
            }
            game.scheduler().advance_frame();
            frames += 1;

            for event in game.drain_events() {
                if let GameEvent::GameOver { cause, .. } = event {
                    log::info!("Crashed into {:?} after {} frames", cause, frames);
                }
            }
        }
        game.stop();

        let snapshot = game.snapshot();
        println!(
            "seed {} | frames {} | score {} | high score {}",
            args.seed, frames, snapshot.score, snapshot.high_score
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is candle_flap::web::wasm_main, this is just to satisfy the compiler
}
