//! RNG module - seeded randomness for spawns
//!
//! The scheduler draws through the [`SpawnSource`] trait: [`GameRng`] is the
//! real, seeded source; [`ScriptedSource`] replays queued cells and draws
//! (falling back to a seeded RNG once the script runs dry) so tests and
//! benches can pin exact spawns.

use std::collections::VecDeque;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Randomness consumed by the cell scheduler
pub trait SpawnSource {
    /// Uniform cell index in `[0, cells)`
    fn next_cell(&mut self, cells: usize) -> usize;

    /// Uniform draw in `[0, 1)` handed to the classifier
    fn next_draw(&mut self) -> f64;
}

/// Seeded game RNG
#[derive(Debug, Clone)]
pub struct GameRng {
    seed: u64,
    inner: SmallRng,
}

impl GameRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            inner: SmallRng::seed_from_u64(seed),
        }
    }

    /// Seed this RNG was created with
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl SpawnSource for GameRng {
    fn next_cell(&mut self, cells: usize) -> usize {
        self.inner.gen_range(0..cells)
    }

    fn next_draw(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Replays scripted cells and draws, then defers to a seeded RNG
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    cells: VecDeque<usize>,
    draws: VecDeque<f64>,
    fallback: GameRng,
}

impl ScriptedSource {
    pub fn new(seed: u64) -> Self {
        Self {
            cells: VecDeque::new(),
            draws: VecDeque::new(),
            fallback: GameRng::new(seed),
        }
    }

    /// Queue one spawn: the cell it should pick and the classifier draw
    pub fn push_spawn(&mut self, cell: usize, draw: f64) {
        self.cells.push_back(cell);
        self.draws.push_back(draw);
    }

    /// Queue a cell pick without a draw (used to exercise rejection)
    pub fn push_cell(&mut self, cell: usize) {
        self.cells.push_back(cell);
    }

    pub fn with_spawns(seed: u64, spawns: &[(usize, f64)]) -> Self {
        let mut source = Self::new(seed);
        for &(cell, draw) in spawns {
            source.push_spawn(cell, draw);
        }
        source
    }
}

impl SpawnSource for ScriptedSource {
    fn next_cell(&mut self, cells: usize) -> usize {
        match self.cells.pop_front() {
            Some(cell) if cell < cells => cell,
            _ => self.fallback.next_cell(cells),
        }
    }

    fn next_draw(&mut self) -> f64 {
        self.draws
            .pop_front()
            .unwrap_or_else(|| self.fallback.next_draw())
    }
}
