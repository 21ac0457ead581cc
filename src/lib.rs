//! Fruit Whack (workspace facade crate).
//!
//! Re-exports the `tui_fruit_whack::{core,input,term,types}` API from the
//! crates under `crates/`, and hosts the glue shared by both binaries: the
//! session around the round ([`app`]), the headless bot ([`autoplay`]) and
//! log setup ([`logging`]).

pub mod app;
pub mod autoplay;
pub mod logging;

pub use tui_fruit_whack_core as core;
pub use tui_fruit_whack_input as input;
pub use tui_fruit_whack_term as term;
pub use tui_fruit_whack_types as types;
