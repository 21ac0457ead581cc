//! Terminal "game renderer" module.
//!
//! This is a small, game-oriented rendering layer for terminal gameplay.
//! It intentionally avoids ratatui widgets/layout and instead renders into a
//! simple framebuffer that can be flushed to a terminal backend.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Diff frames so a 60 FPS loop writes only what changed
//! - Keep emoji tokens aligned (double-width glyphs reserve two columns)

pub mod fb;
pub mod game_view;
pub mod render_throttle;
pub mod renderer;

pub use tui_fruit_whack_core as core;
pub use tui_fruit_whack_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, SessionView, Viewport};
pub use render_throttle::RenderThrottle;
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
