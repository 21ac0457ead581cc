//! Headless autoplay: a simple bot plays seeded rounds without a terminal.
//!
//! The bot watches the snapshot every tick and taps whatever appears once
//! its reaction time has passed, skipping bombs unless told otherwise.
//! Same seed, same config, same summaries.

use anyhow::{anyhow, Result};
use serde::Serialize;

use crate::core::{GameConfig, GameSnapshot, GameState, RoundSummary};
use crate::types::{ItemKind, ScreenPoint, TICK_MS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoplayConfig {
    pub rounds: u32,
    pub seed: u64,
    /// Delay between an item appearing and the bot tapping it.
    pub reaction_ms: u32,
    pub tap_bombs: bool,
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        Self {
            rounds: 5,
            seed: 1,
            reaction_ms: 250,
            tap_bombs: false,
        }
    }
}

pub fn parse_autoplay_args(args: &[String]) -> Result<AutoplayConfig> {
    let mut config = AutoplayConfig::default();
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--rounds" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("autoplay: missing value for --rounds"))?;
                config.rounds = v
                    .parse::<u32>()
                    .map_err(|_| anyhow!("autoplay: invalid --rounds value: {}", v))?;
            }
            "--seed" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("autoplay: missing value for --seed"))?;
                config.seed = v
                    .parse::<u64>()
                    .map_err(|_| anyhow!("autoplay: invalid --seed value: {}", v))?;
            }
            "--reaction-ms" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("autoplay: missing value for --reaction-ms"))?;
                config.reaction_ms = v
                    .parse::<u32>()
                    .map_err(|_| anyhow!("autoplay: invalid --reaction-ms value: {}", v))?;
            }
            "--tap-bombs" => config.tap_bombs = true,
            other => {
                return Err(anyhow!("autoplay: unknown argument: {}", other));
            }
        }
        i += 1;
    }

    Ok(config)
}

/// One finished round, as printed by the autoplay binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoundReport {
    pub round: u32,
    pub seed: u64,
    #[serde(flatten)]
    pub summary: RoundSummary,
}

#[derive(Debug, Clone)]
pub struct Bot {
    reaction_ms: u32,
    tap_bombs: bool,
    /// Cell being watched and how long it has been occupied.
    target: Option<u8>,
    waited_ms: u32,
    snap: GameSnapshot,
}

impl Bot {
    pub fn new(reaction_ms: u32, tap_bombs: bool) -> Self {
        Self {
            reaction_ms,
            tap_bombs,
            target: None,
            waited_ms: 0,
            snap: GameSnapshot::default(),
        }
    }

    /// Forget the watched cell (between rounds).
    pub fn reset(&mut self) {
        self.target = None;
        self.waited_ms = 0;
    }

    /// Look at the board and maybe tap; call once per tick.
    pub fn step(&mut self, game: &mut GameState, elapsed_ms: u32) {
        game.snapshot_into(&mut self.snap);
        let occupied = self.snap.occupied_cell();
        if occupied != self.target {
            self.target = occupied;
            self.waited_ms = 0;
            return;
        }

        let Some(cell) = self.target else {
            return;
        };
        self.waited_ms = self.waited_ms.saturating_add(elapsed_ms);
        if self.waited_ms < self.reaction_ms {
            return;
        }

        let is_bomb = self.snap.cells[cell as usize].is_some_and(|c| c.kind == ItemKind::Bomb);
        if is_bomb && !self.tap_bombs {
            return;
        }
        if let Some(effect) = game.tap(cell, ScreenPoint::default()) {
            tracing::debug!(cell, kind = effect.kind.as_str(), "bot tap");
        }
        self.target = None;
        self.waited_ms = 0;
    }
}

/// Play one round to completion.
pub fn play_round(game: &mut GameState, bot: &mut Bot) -> Result<RoundSummary> {
    game.start();
    loop {
        bot.step(game, TICK_MS);
        if game.tick(TICK_MS) {
            break;
        }
    }
    bot.reset();
    game.last_summary()
        .ok_or_else(|| anyhow!("autoplay: round ended without a summary"))
}

/// Play `config.rounds` rounds on one seeded game.
pub fn run(config: &AutoplayConfig, game_config: GameConfig) -> Result<Vec<RoundReport>> {
    let mut game = GameState::with_config(game_config, config.seed)?;
    let mut bot = Bot::new(config.reaction_ms, config.tap_bombs);

    let mut reports = Vec::with_capacity(config.rounds as usize);
    for round in 1..=config.rounds {
        let summary = play_round(&mut game, &mut bot)?;
        tracing::info!(
            round,
            score = summary.score,
            currency = summary.currency,
            ended_by = summary.ended_by.as_str(),
            "autoplay round finished"
        );
        reports.push(RoundReport {
            round,
            seed: config.seed,
            summary,
        });
    }
    Ok(reports)
}
