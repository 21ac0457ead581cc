//! Terminal Fruit Whack runner (default binary).
//!
//! It uses crossterm for keyboard and mouse input and a custom
//! framebuffer-based renderer (no ratatui widgets/layout).
//!
//! Environment:
//! - `FRUIT_WHACK_SEED`: spawn RNG seed (defaults to the clock)
//! - `FRUIT_WHACK_WALLET`: address the wallet gate connects with
//! - `FRUIT_WHACK_LOG_PATH`: log file; nothing is logged without it
//! - `FRUIT_WHACK_ROUND_SECS`, `FRUIT_WHACK_SPAWN_MS`, `FRUIT_WHACK_DWELL_MS`,
//!   `FRUIT_WHACK_PENALTY_CAP`: round tuning

use std::path::PathBuf;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Result};
use crossterm::event::{self, Event, KeyEventKind};

use tui_fruit_whack::app::App;
use tui_fruit_whack::core::{GameConfig, GameSnapshot, GameState, LocalWallet};
use tui_fruit_whack::input::{handle_key_event, handle_mouse_event, should_quit};
use tui_fruit_whack::logging;
use tui_fruit_whack::term::{FrameBuffer, GameView, RenderThrottle, TerminalRenderer, Viewport};
use tui_fruit_whack::types::{GameAction, RoundPhase, TICK_MS};

/// Redraw interval for screens with nothing animating.
const STATIC_REDRAW_MS: u64 = 250;

fn main() -> Result<()> {
    let log_path = std::env::var_os("FRUIT_WHACK_LOG_PATH").map(PathBuf::from);
    logging::init_file(log_path.as_deref())?;

    let config = GameConfig::from_env()?;
    let seed = seed_from_env()?;
    tracing::info!(seed, ?config, "starting");

    let game = GameState::with_config(config, seed)?;
    let mut app = App::new(game, LocalWallet::from_env());

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut app);

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(e) = &result {
        tracing::error!(error = %e, "exited with error");
    }
    result
}

fn seed_from_env() -> Result<u64> {
    match std::env::var("FRUIT_WHACK_SEED") {
        Ok(v) => v
            .trim()
            .parse::<u64>()
            .map_err(|_| anyhow!("invalid FRUIT_WHACK_SEED value: {}", v)),
        Err(_) => Ok(SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(1)),
    }
}

fn run(term: &mut TerminalRenderer, app: &mut App<LocalWallet>) -> Result<()> {
    let view = GameView::default();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut throttle = RenderThrottle::new(STATIC_REDRAW_MS);

    let started = Instant::now();
    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);
        app.snapshot_into(&mut snap);
        let animating = snap.phase == RoundPhase::Running || snap.reward.active || snap.shaking();
        let now_ms = started.elapsed().as_millis() as u64;
        if throttle.should_render(now_ms, snap.fingerprint(), !animating) {
            view.render_into(&snap, &app.session(), viewport, &mut fb);
            term.draw_swap(&mut fb)?;
        }

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        // Keyboard taps land on the cell centre.
                        let at = match action {
                            GameAction::Tap(cell) => view.cell_center(viewport, cell),
                            _ => Default::default(),
                        };
                        app.dispatch(action, at);
                        // Wallet and status changes are not in the snapshot.
                        throttle.reset();
                    }
                }
                Event::Mouse(mouse) => {
                    if let Some(point) = handle_mouse_event(mouse) {
                        if let Some(cell) = view.cell_at(viewport, point) {
                            app.dispatch(GameAction::Tap(cell), point);
                            throttle.reset();
                        }
                    }
                }
                Event::Resize(_, _) => {
                    term.invalidate();
                    throttle.reset();
                }
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            if app.tick(TICK_MS) {
                if let Some(summary) = app.game().last_summary() {
                    tracing::info!(
                        score = summary.score,
                        currency = summary.currency,
                        ended_by = summary.ended_by.as_str(),
                        "round finished"
                    );
                }
            }
        }
    }
}
