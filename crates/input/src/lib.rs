//! Terminal input module.
//!
//! Maps `crossterm` key and mouse events into [`crate::types::GameAction`]
//! values and tap positions. Resolving a screen position to a cell needs the
//! board layout and lives in the terminal crate.

pub mod map;

pub use tui_fruit_whack_types as types;

pub use map::{cell_for_key, handle_key_event, handle_mouse_event, should_quit};
