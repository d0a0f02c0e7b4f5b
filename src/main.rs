//! Nova Strike entry point
//!
//! The browser build is driven from JavaScript through `nova_strike::wasm`.
//! Natively this runs a headless session with an autopilot, which is handy for
//! checking how a tuning file plays out.

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use clap::Parser;

    env_logger::init();
    headless::run(headless::CliArgs::parse())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is nova_strike::wasm::start, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;

    use clap::Parser;
    use nova_strike::consts::{FRAME_MS, TICKS_PER_SECOND};
    use nova_strike::sim::GameEvent;
    use nova_strike::{GameState, SessionSnapshot, TickInput, Tuning, advance};

    /// Run a headless Nova Strike session driven by an autopilot.
    #[derive(Debug, Parser)]
    #[command(author, version, about, long_about = None)]
    pub struct CliArgs {
        /// Seed for enemy and power-up spawns.
        #[arg(long, default_value_t = 1)]
        pub seed: u64,
        /// Stop after this many ticks if the session is still running.
        #[arg(
            long,
            value_name = "TICKS",
            default_value_t = 18_000,
            value_parser = clap::value_parser!(u64).range(1..)
        )]
        pub ticks: u64,
        /// JSON balance file; missing fields keep their defaults.
        #[arg(long, value_name = "FILE")]
        pub tuning: Option<PathBuf>,
    }

    /// Chase the lowest enemy and keep the trigger held
    fn autopilot(snapshot: &SessionSnapshot) -> TickInput {
        let ship_center = snapshot.player.pos.x + snapshot.player.size.x / 2.0;
        let target = snapshot
            .power_ups
            .first()
            .map(|p| p.pos.x + p.size.x / 2.0)
            .or_else(|| {
                snapshot
                    .enemies
                    .iter()
                    .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
                    .map(|e| e.pos.x + e.size.x / 2.0)
            });

        let (left, right) = match target {
            Some(x) if x < ship_center - 4.0 => (true, false),
            Some(x) if x > ship_center + 4.0 => (false, true),
            _ => (false, false),
        };
        TickInput {
            left,
            right,
            fire: true,
        }
    }

    pub fn run(args: CliArgs) -> anyhow::Result<()> {
        let tuning = match &args.tuning {
            Some(path) => Tuning::load(path)?,
            None => Tuning::default(),
        };

        log::info!("Nova Strike (headless) starting, seed {}", args.seed);
        let mut state = GameState::with_tuning(tuning, args.seed)?;
        state.start();

        let mut snapshot = SessionSnapshot::capture(&state);
        let mut kills = 0u32;
        let mut power_ups = 0u32;
        while snapshot.tick < args.ticks && !snapshot.is_game_over() {
            let input = autopilot(&snapshot);
            snapshot = advance(&mut state, &input, FRAME_MS);
            for event in &snapshot.events {
                match event {
                    GameEvent::EnemyDestroyed { .. } => kills += 1,
                    GameEvent::PowerUpCollected => power_ups += 1,
                    _ => {}
                }
            }
        }

        let seconds = snapshot.tick as f32 / TICKS_PER_SECOND as f32;
        println!(
            "{} after {:.1}s: score {}, level {}, lives {}, {} kills, {} power-ups",
            if snapshot.is_game_over() { "Game over" } else { "Stopped" },
            seconds,
            snapshot.score,
            snapshot.level,
            snapshot.lives,
            kills,
            power_ups
        );
        Ok(())
    }

}
