//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the round rules, state management, and simulation logic.
//! It has **no dependencies** on terminal, input, or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical rounds (autoplay, tests)
//! - **Testable**: Every timed behaviour is driven by an explicit `tick`
//! - **Portable**: Runs in the terminal front end and headless alike
//!
//! # Module Structure
//!
//! - [`board`]: 3x3 grid of cells with generation-tagged occupants
//! - [`classify`]: Maps a uniform draw to fruit, coin, or bomb
//! - [`scheduler`]: Spawns items on a cadence and clears them after their dwell
//! - [`game_state`]: Round state machine (Idle, Running, Over), counters, clock
//! - [`resolver`]: Turns a tap on a cell into a counted hit
//! - [`feedback`]: Confetti and shake timers
//! - [`rng`]: Seeded spawn source, plus a scripted one for tests
//! - [`config`]: Tunable timings and odds, with environment overrides
//! - [`wallet`] / [`reward`]: Connection gate and claim acknowledgment
//!
//! # Round Rules
//!
//! - A round lasts 30 seconds; the clock counts down once per second
//! - Every 1.2s one item spawns in a random cell, never the previous one
//! - An untouched item clears itself after 0.9s
//! - Fruit scores, coins collect currency, bombs count a penalty
//! - Two penalties or an empty clock end the round
//!
//! # Example
//!
//! ```
//! use tui_fruit_whack_core::GameState;
//! use tui_fruit_whack_core::types::{ItemKind, RoundPhase};
//!
//! let mut game = GameState::new(12345);
//! game.start();
//! assert_eq!(game.phase(), RoundPhase::Running);
//!
//! // One item is on the board right away.
//! assert_eq!(game.board().occupied_count(), 1);
//!
//! game.record_hit(ItemKind::Bomb);
//! game.record_hit(ItemKind::Bomb);
//! assert_eq!(game.phase(), RoundPhase::Over);
//! ```
//!
//! # Timing
//!
//! The game uses a fixed timestep system:
//! - **Tick Rate**: 16ms (approximately 60 FPS)
//! - **Clock**: 1000ms per second of round time
//!
//! Call [`GameState::tick`](game_state::GameState::tick) every frame with elapsed time.

pub mod board;
pub mod classify;
pub mod config;
pub mod error;
pub mod feedback;
pub mod game_state;
pub mod resolver;
pub mod reward;
pub mod rng;
pub mod scheduler;
pub mod snapshot;
pub mod summary;
pub mod wallet;

pub use tui_fruit_whack_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, Occupant, OccupantId};
pub use classify::{classify, classify_with, Item};
pub use config::GameConfig;
pub use error::{ConfigError, WalletError};
pub use feedback::Feedback;
pub use game_state::{Counters, GameState};
pub use resolver::{resolve_tap, TapEffect};
pub use reward::ClaimReceipt;
pub use rng::{GameRng, ScriptedSource, SpawnSource};
pub use scheduler::{CellScheduler, DespawnTicket, SpawnEvent};
pub use snapshot::{CellSnapshot, GameSnapshot};
pub use summary::RoundSummary;
pub use wallet::{LocalWallet, Wallet};
