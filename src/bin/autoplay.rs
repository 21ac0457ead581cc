//! Headless autoplay runner.
//!
//! Plays seeded rounds with a simple bot and prints one JSON summary per
//! round on stdout. Logs go to stderr (`RUST_LOG` filters them).
//!
//! ```text
//! autoplay [--rounds N] [--seed S] [--reaction-ms MS] [--tap-bombs]
//! ```

use std::io::{self, Write};

use anyhow::Result;

use tui_fruit_whack::autoplay::{parse_autoplay_args, run};
use tui_fruit_whack::core::GameConfig;
use tui_fruit_whack::logging;

fn main() -> Result<()> {
    logging::init_stderr();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = parse_autoplay_args(&args)?;
    let game_config = GameConfig::from_env()?;
    tracing::info!(rounds = config.rounds, seed = config.seed, "autoplay starting");

    let reports = run(&config, game_config)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for report in &reports {
        serde_json::to_writer(&mut out, report)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}
