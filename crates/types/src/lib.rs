//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, headless autoplay).
//!
//! # Board Dimensions
//!
//! The board is a fixed 3x3 grid:
//!
//! - **Side**: 3 cells
//! - **Cells**: 9, indexed 0-8 in reading order (row-major, top-left first)
//!
//! # Round Timing Constants
//!
//! Timing values are in milliseconds unless the name says otherwise:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `CLOCK_TICK_MS` | 1000 | One round-clock second |
//! | `ROUND_LENGTH_SECS` | 30 | Seconds on the clock at round start |
//! | `SPAWN_CADENCE_MS` | 1200 | Interval between spawn decisions |
//! | `DWELL_MS` | 900 | Time an item stays before auto-clearing |
//! | `PENALTY_CAP` | 2 | Bomb hits that end the round |
//! | `REWARD_VISUAL_MS` | 3000 | Confetti display after a coin tap |
//! | `SHAKE_VISUAL_MS` | 500 | Board shake after a bomb tap |
//! | `LOW_TIME_WARNING_SECS` | 7 | Timer bar switches to warning colour below this |
//!
//! `DWELL_MS` must stay strictly below `SPAWN_CADENCE_MS`: an item is always
//! gone before the next spawn decision is made.
//!
//! # Item Odds
//!
//! | Kind | Share | Token |
//! |------|-------|-------|
//! | Coin | 20% | 🪙 |
//! | Bomb | 30% | 💣 |
//! | Fruit | 50% | one of 🍎 🍌 🍒 🍇 |
//!
//! # Examples
//!
//! ```
//! use tui_fruit_whack_types::{GameAction, ItemKind, RoundPhase, CELL_COUNT};
//!
//! assert_eq!(ItemKind::from_str("coin"), Some(ItemKind::Coin));
//! assert_eq!(ItemKind::Bomb.as_str(), "bomb");
//!
//! assert_eq!(GameAction::tap(4), Some(GameAction::Tap(4)));
//! assert_eq!(GameAction::tap(9), None);
//!
//! assert!(RoundPhase::Running.is_running());
//! assert_eq!(CELL_COUNT, 9);
//! ```

/// Board side length in cells (3x3 grid)
pub const GRID_SIDE: u8 = 3;

/// Total number of cells on the board
pub const CELL_COUNT: usize = (GRID_SIDE as usize) * (GRID_SIDE as usize);

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Length of one round-clock tick (1 second)
pub const CLOCK_TICK_MS: u32 = 1000;

/// Seconds on the clock when a round starts
pub const ROUND_LENGTH_SECS: u32 = 30;

/// Interval between spawn decisions
pub const SPAWN_CADENCE_MS: u32 = 1200;

/// Time an item stays in its cell before it clears itself
pub const DWELL_MS: u32 = 900;

/// Bomb hits that end the round
pub const PENALTY_CAP: u32 = 2;

/// Probability that a spawn is a coin
pub const COIN_P: f64 = 0.2;

/// Probability that a spawn is a bomb
pub const BOMB_P: f64 = 0.3;

/// Confetti display duration after a coin tap
pub const REWARD_VISUAL_MS: u32 = 3000;

/// Board shake duration after a bomb tap
pub const SHAKE_VISUAL_MS: u32 = 500;

/// The timer bar switches to its warning colour below this many seconds
pub const LOW_TIME_WARNING_SECS: u32 = 7;

/// Display tokens for fruit, chosen uniformly
pub const FRUIT_TOKENS: [&str; 4] = ["🍎", "🍌", "🍒", "🍇"];

/// Display token for a coin
pub const COIN_TOKEN: &str = "🪙";

/// Display token for a bomb
pub const BOMB_TOKEN: &str = "💣";


/// The three kinds of item a cell can hold
///
/// - **Fruit**: scores a point
/// - **Coin**: collects one unit of currency
/// - **Bomb**: counts a penalty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Fruit,
    Coin,
    Bomb,
}

impl ItemKind {
    /// Parse item kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_fruit_whack_types::ItemKind;
    ///
    /// assert_eq!(ItemKind::from_str("Fruit"), Some(ItemKind::Fruit));
    /// assert_eq!(ItemKind::from_str("BOMB"), Some(ItemKind::Bomb));
    /// assert_eq!(ItemKind::from_str("gem"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "fruit" => Some(ItemKind::Fruit),
            "coin" => Some(ItemKind::Coin),
            "bomb" => Some(ItemKind::Bomb),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Fruit => "fruit",
            ItemKind::Coin => "coin",
            ItemKind::Bomb => "bomb",
        }
    }
}

/// Round lifecycle
///
/// `Idle → Running → Over → Running → ...`; there is no path from `Idle`
/// straight to `Over`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RoundPhase {
    #[default]
    Idle,
    Running,
    Over,
}

impl RoundPhase {
    pub fn is_running(&self) -> bool {
        matches!(self, RoundPhase::Running)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RoundPhase::Idle => "idle",
            RoundPhase::Running => "running",
            RoundPhase::Over => "over",
        }
    }
}

/// Why a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndReason {
    /// The clock reached zero
    TimeUp,
    /// Bomb hits reached the penalty cap
    PenaltyCap,
}

impl EndReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            EndReason::TimeUp => "timeUp",
            EndReason::PenaltyCap => "penaltyCap",
        }
    }
}

/// Terminal screen coordinates (column, row)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ScreenPoint {
    pub x: u16,
    pub y: u16,
}

impl ScreenPoint {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// Player actions
///
/// These are produced by the keyboard/mouse mapping and by the autoplay bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Start a round (also replays after the round is over)
    Start,
    /// Tap a cell (0-8, reading order)
    Tap(u8),
    /// Claim the collected coins once the round is over
    Claim,
}

impl GameAction {
    /// Build a tap action, rejecting indices outside the board
    pub fn tap(cell: u8) -> Option<Self> {
        if (cell as usize) < CELL_COUNT {
            Some(GameAction::Tap(cell))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::Start => "start",
            GameAction::Tap(_) => "tap",
            GameAction::Claim => "claim",
        }
    }
}

/// Transient visual feedback emitted by a tap
///
/// The core only times these; drawing them is up to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackEvent {
    /// Coin collected: confetti centred on the tap point
    Reward { at: ScreenPoint, duration_ms: u32 },
    /// Bomb hit: shake the board
    Shake { duration_ms: u32 },
}

/// Reward display trigger consumed by the confetti renderer.
///
/// `active == false` means nothing should be drawn; `x`/`y` are then zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RewardTrigger {
    pub x: u16,
    pub y: u16,
    pub active: bool,
}
