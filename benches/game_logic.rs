use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tui_fruit_whack::core::{classify, GameSnapshot, GameState};
use tui_fruit_whack::term::{FrameBuffer, GameView, SessionView, Viewport};
use tui_fruit_whack::types::{ItemKind, ScreenPoint};

fn bench_tick(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start();

    c.bench_function("game_tick_16ms", |b| {
        b.iter(|| {
            if state.tick(black_box(16)) {
                state.start();
            }
        })
    });
}

fn bench_full_round(c: &mut Criterion) {
    let mut state = GameState::new(12345);

    c.bench_function("full_round_30s", |b| {
        b.iter(|| {
            state.start();
            while !state.tick(black_box(16)) {}
        })
    });
}

fn bench_tap(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start();

    c.bench_function("tap_occupied_cell", |b| {
        b.iter(|| {
            let cell = state.scheduler().last_spawned().unwrap_or(0);
            if state.tap(black_box(cell), ScreenPoint::default()).is_none() {
                // Nothing left to hit: jump to the next spawn.
                if state.tick(1200) || state.penalties() > 0 {
                    state.start();
                }
            }
        })
    });
}

fn bench_classify(c: &mut Criterion) {
    c.bench_function("classify", |b| {
        b.iter(|| {
            let mut fruit = 0u32;
            for i in 0..100 {
                if classify(black_box(i as f64 / 100.0)).kind == ItemKind::Fruit {
                    fruit += 1;
                }
            }
            fruit
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start();
    let view = GameView::default();
    let session = SessionView {
        wallet_connected: true,
        address: None,
        status: None,
    };
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(80, 30);

    c.bench_function("snapshot_and_render", |b| {
        b.iter(|| {
            state.snapshot_into(&mut snap);
            view.render_into(black_box(&snap), &session, Viewport::new(80, 30), &mut fb);
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_full_round,
    bench_tap,
    bench_classify,
    bench_render
);
criterion_main!(benches);
