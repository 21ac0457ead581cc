use tui_fruit_whack::core::{GameConfig, GameSnapshot, GameState, ScriptedSource};
use tui_fruit_whack::term::{FrameBuffer, GameView, Rgb, SessionView, Viewport};
use tui_fruit_whack::types::{ItemKind, RoundPhase, ScreenPoint};

const VP: Viewport = Viewport {
    width: 80,
    height: 30,
};

fn connected() -> SessionView<'static> {
    SessionView {
        wallet_connected: true,
        address: Some("0x52908400098527886E0F7030069857D2E4169EE7"),
        status: None,
    }
}

fn contains(fb: &FrameBuffer, needle: &str) -> bool {
    (0..fb.height()).any(|y| fb.row_text(y).contains(needle))
}

fn running_with(spawns: &[(usize, f64)]) -> GameState<ScriptedSource> {
    let mut state =
        GameState::with_source(GameConfig::default(), ScriptedSource::with_spawns(1, spawns))
            .unwrap();
    state.start();
    state
}

#[test]
fn wallet_gate_hides_the_board() {
    let snap = GameSnapshot::default();
    let fb = GameView::default().render(&snap, &SessionView::default(), VP);

    assert!(contains(&fb, "Connect your wallet to play"));
    assert!(!contains(&fb, "Press Enter to start"));
    assert!(!fb.cells().iter().any(|c| c.ch == '┌'));
}

#[test]
fn wallet_gate_shows_connect_error() {
    let snap = GameSnapshot::default();
    let session = SessionView {
        status: Some("no wallet account configured"),
        ..SessionView::default()
    };
    let fb = GameView::default().render(&snap, &session, VP);
    assert!(contains(&fb, "no wallet account configured"));
}

#[test]
fn idle_screen_prompts_to_start() {
    let snap = GameState::new(1).snapshot();
    let fb = GameView::default().render(&snap, &connected(), VP);

    assert!(contains(&fb, "FRUIT WHACK"));
    assert!(contains(&fb, "0x5290…9EE7"));
    assert!(contains(&fb, "Press Enter to start"));
}

#[test]
fn running_screen_draws_token_in_its_cell() {
    let state = running_with(&[(4, 0.1)]);
    let snap = state.snapshot();
    let view = GameView::default();
    let fb = view.render(&snap, &connected(), VP);

    let center = view.cell_center(VP, 4);
    assert_eq!(fb.get(center.x - 1, center.y).map(|c| c.ch), Some('🪙'));
    assert!(fb.get(center.x, center.y).unwrap().is_continuation());
    assert!(contains(&fb, "Score 0"));
    assert!(contains(&fb, "30s"));
}

#[test]
fn timer_bar_turns_red_when_time_is_low() {
    let mut snap = running_with(&[(0, 0.9)]).snapshot();
    let view = GameView::default();

    let bar_color = |snap: &GameSnapshot| {
        let fb = view.render(snap, &connected(), VP);
        fb.cells().iter().find(|c| c.ch == '█').map(|c| c.style.fg)
    };

    let calm = bar_color(&snap).unwrap();
    snap.time_remaining_secs = 6;
    let warn = bar_color(&snap).unwrap();
    assert_ne!(calm, warn);
    assert_eq!(warn, Rgb::new(230, 70, 70));

    // Nothing left: no filled segment at all.
    snap.time_remaining_secs = 0;
    assert_eq!(bar_color(&snap), None);
}

#[test]
fn over_screen_shows_final_counts_and_actions() {
    let mut state = running_with(&[(0, 0.9)]);
    state.record_hit(ItemKind::Fruit);
    state.record_hit(ItemKind::Coin);
    state.record_hit(ItemKind::Bomb);
    state.record_hit(ItemKind::Bomb);
    assert_eq!(state.phase(), RoundPhase::Over);

    let session = SessionView {
        status: Some("Reward claimed! Sending 1 coin to 0xabc..."),
        ..connected()
    };
    let fb = GameView::default().render(&state.snapshot(), &session, VP);
    assert!(contains(&fb, "GAME OVER"));
    assert!(contains(&fb, "Final score: 1"));
    assert!(contains(&fb, "[p] Claim  [r] Replay"));
    assert!(contains(&fb, "Reward claimed! Sending 1 coin to 0xabc..."));
}

#[test]
fn coin_tap_draws_confetti_around_tap_point() {
    let mut state = running_with(&[(4, 0.1)]);
    let view = GameView::default();
    let at = view.cell_center(VP, 4);
    state.tap(4, at).unwrap();

    let fb = view.render(&state.snapshot(), &connected(), VP);
    assert!(fb.cells().iter().any(|c| c.ch == '✦'));

    state.tick(3000);
    let fb = view.render(&state.snapshot(), &connected(), VP);
    assert!(!fb.cells().iter().any(|c| c.ch == '✦'));
}

#[test]
fn shake_moves_the_grid() {
    let mut snap = running_with(&[(0, 0.9)]).snapshot();
    let view = GameView::default();
    let corner = |fb: &FrameBuffer| {
        fb.cells()
            .iter()
            .position(|c| c.ch == '┌')
            .map(|i| i as u16 % VP.width)
    };

    let still = corner(&view.render(&snap, &connected(), VP)).unwrap();
    snap.shake_ms = 400;
    let shaken = corner(&view.render(&snap, &connected(), VP)).unwrap();
    assert_ne!(still, shaken);

    // Hit-testing ignores the shake.
    let p = view.cell_center(VP, 0);
    assert_eq!(view.cell_at(VP, ScreenPoint::new(p.x, p.y)), Some(0));
}

#[test]
fn render_into_reuses_buffer_across_sizes() {
    let snap = GameSnapshot::default();
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    view.render_into(&snap, &connected(), Viewport::new(40, 20), &mut fb);
    assert_eq!((fb.width(), fb.height()), (40, 20));
    view.render_into(&snap, &connected(), VP, &mut fb);
    assert_eq!((fb.width(), fb.height()), (80, 30));
}
