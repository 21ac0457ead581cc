use std::hash::{Hash, Hasher};

use crate::types::{
    EndReason, ItemKind, RewardTrigger, RoundPhase, CELL_COUNT, PENALTY_CAP, ROUND_LENGTH_SECS,
};

/// Stable 64-bit FNV-1a hasher for [`GameSnapshot::fingerprint`].
///
/// `DefaultHasher` output is not guaranteed stable across Rust versions.
#[derive(Debug, Clone)]
struct Fnv1aHasher {
    state: u64,
}

impl Fnv1aHasher {
    const OFFSET_BASIS: u64 = 0xcbf29ce484222325;
    const PRIME: u64 = 0x100000001b3;

    fn new() -> Self {
        Self {
            state: Self::OFFSET_BASIS,
        }
    }
}

impl Hasher for Fnv1aHasher {
    fn finish(&self) -> u64 {
        self.state
    }

    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.state ^= b as u64;
            self.state = self.state.wrapping_mul(Self::PRIME);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellSnapshot {
    pub kind: ItemKind,
    pub token: &'static str,
}

/// Read-only copy of everything a renderer or bot needs for one frame.
///
/// Plain `Copy` data, refilled in place by
/// [`GameState::snapshot_into`](crate::GameState::snapshot_into) so the frame
/// loop never allocates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub cells: [Option<CellSnapshot>; CELL_COUNT],
    pub phase: RoundPhase,
    pub score: u32,
    pub currency: u32,
    pub penalties: u32,
    pub penalty_cap: u32,
    pub time_remaining_secs: u32,
    pub round_length_secs: u32,
    pub generation: u32,
    pub reward: RewardTrigger,
    /// Remaining shake time, zero when still
    pub shake_ms: u32,
    pub end_reason: Option<EndReason>,
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            cells: [None; CELL_COUNT],
            phase: RoundPhase::Idle,
            score: 0,
            currency: 0,
            penalties: 0,
            penalty_cap: PENALTY_CAP,
            time_remaining_secs: ROUND_LENGTH_SECS,
            round_length_secs: ROUND_LENGTH_SECS,
            generation: 0,
            reward: RewardTrigger::default(),
            shake_ms: 0,
            end_reason: None,
        }
    }
}

impl GameSnapshot {
    pub fn shaking(&self) -> bool {
        self.shake_ms > 0
    }

    /// Fraction of the round still on the clock, in `0.0..=1.0`
    pub fn time_fraction(&self) -> f32 {
        if self.round_length_secs == 0 {
            return 0.0;
        }
        (self.time_remaining_secs as f32 / self.round_length_secs as f32).clamp(0.0, 1.0)
    }

    /// Index of the occupied cell, if any
    pub fn occupied_cell(&self) -> Option<u8> {
        self.cells.iter().position(Option::is_some).map(|i| i as u8)
    }

    /// Deterministic hash of the gameplay-relevant fields.
    ///
    /// Visual timers are left out so two runs that only differ in when the
    /// confetti was drawn still compare equal.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = Fnv1aHasher::new();
        self.cells.hash(&mut hasher);
        self.phase.hash(&mut hasher);
        self.score.hash(&mut hasher);
        self.currency.hash(&mut hasher);
        self.penalties.hash(&mut hasher);
        self.time_remaining_secs.hash(&mut hasher);
        self.generation.hash(&mut hasher);
        self.end_reason.hash(&mut hasher);
        hasher.finish()
    }
}
