//! Game state module - the round state machine
//!
//! [`GameState`] is the single authority over a round: it owns the phase,
//! the counters, the round clock, the cell scheduler and the feedback
//! timers. Every mutation goes through it, so the termination check lives in
//! exactly one place ([`GameState::check_termination`]) and runs after every
//! counter change and every clock second.
//!
//! Each [`GameState::start`] bumps a generation number. Occupants and their
//! despawn tickets are tagged with it, so nothing left over from an earlier
//! round can touch the board of a later one.

use crate::board::Board;
use crate::config::GameConfig;
use crate::error::ConfigError;
use crate::feedback::Feedback;
use crate::resolver::{resolve_tap, TapEffect};
use crate::reward::ClaimReceipt;
use crate::rng::{GameRng, SpawnSource};
use crate::scheduler::{CellScheduler, DespawnTicket};
use crate::snapshot::{CellSnapshot, GameSnapshot};
use crate::summary::RoundSummary;
use crate::types::*;

/// Per-round counters. Only ever incremented while running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Counters {
    pub score: u32,
    pub currency: u32,
    pub penalties: u32,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState<S = GameRng> {
    pub(crate) config: GameConfig,
    pub(crate) phase: RoundPhase,
    pub(crate) counters: Counters,
    time_remaining_secs: u32,
    /// Milliseconds accumulated toward the next clock second.
    clock_timer_ms: u32,
    /// Monotonic round id (increments on every start).
    generation: u32,
    pub(crate) scheduler: CellScheduler<S>,
    pub(crate) feedback: Feedback,
    end_reason: Option<EndReason>,
    last_summary: Option<RoundSummary>,
}

impl GameState<GameRng> {
    /// Create an idle game with default configuration and the given seed
    pub fn new(seed: u64) -> Self {
        let config = GameConfig::default();
        let scheduler = CellScheduler::new(&config, GameRng::new(seed));
        Self::assemble(config, scheduler)
    }

    /// Create an idle game with a custom configuration
    pub fn with_config(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_source(config, GameRng::new(seed))
    }

    /// Seed of the spawn RNG
    pub fn seed(&self) -> u64 {
        self.scheduler.source().seed()
    }
}

impl<S: SpawnSource> GameState<S> {
    /// Create an idle game drawing spawns from `source`
    pub fn with_source(config: GameConfig, source: S) -> Result<Self, ConfigError> {
        config.validate()?;
        let scheduler = CellScheduler::new(&config, source);
        Ok(Self::assemble(config, scheduler))
    }

    fn assemble(config: GameConfig, scheduler: CellScheduler<S>) -> Self {
        Self {
            time_remaining_secs: config.round_length_secs,
            config,
            phase: RoundPhase::Idle,
            counters: Counters::default(),
            clock_timer_ms: 0,
            generation: 0,
            scheduler,
            feedback: Feedback::new(),
            end_reason: None,
            last_summary: None,
        }
    }

    /// Start a fresh round.
    ///
    /// Valid from any phase: from `Idle` it starts the first round, from
    /// `Over` it replays, and while `Running` it restarts. Counters, clock and
    /// board are reset, and every spawn or despawn belonging to the previous
    /// round is invalidated by the generation bump.
    pub fn start(&mut self) {
        let from = self.phase;
        self.generation = self.generation.wrapping_add(1);
        self.counters = Counters::default();
        self.time_remaining_secs = self.config.round_length_secs;
        self.clock_timer_ms = 0;
        self.end_reason = None;
        self.phase = RoundPhase::Running;
        self.scheduler.activate(self.generation);

        tracing::info!(
            generation = self.generation,
            from = from.as_str(),
            "round started"
        );
    }

    /// Count a hit of `kind`.
    ///
    /// Returns `false` and changes nothing unless the round is running.
    pub fn record_hit(&mut self, kind: ItemKind) -> bool {
        if !self.phase.is_running() {
            tracing::debug!(kind = kind.as_str(), "hit ignored outside a running round");
            return false;
        }

        match kind {
            ItemKind::Fruit => self.counters.score += 1,
            ItemKind::Coin => self.counters.currency += 1,
            ItemKind::Bomb => self.counters.penalties += 1,
        }
        self.check_termination();
        true
    }

    /// Main game tick - advance clock, scheduler and feedback timers.
    ///
    /// Within one instant the clock goes first: scheduler events due strictly
    /// before a clock second fire before it, events due exactly on it fire
    /// after it, and only if the round is still running.
    ///
    /// Returns `true` if the round ended during this tick.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        self.feedback.tick(elapsed_ms);

        if !self.phase.is_running() {
            return false;
        }

        let mut remaining = elapsed_ms;
        while self.phase.is_running() && remaining > 0 {
            let to_second = CLOCK_TICK_MS - self.clock_timer_ms;
            if remaining < to_second {
                self.clock_timer_ms += remaining;
                self.scheduler.advance(remaining);
                break;
            }

            self.scheduler.advance(to_second - 1);
            remaining -= to_second;
            self.clock_timer_ms = 0;
            self.time_remaining_secs = self.time_remaining_secs.saturating_sub(1);
            self.check_termination();

            if self.phase.is_running() {
                self.scheduler.advance(1);
            }
        }

        !self.phase.is_running()
    }

    /// Resolve a tap on `cell`; see [`crate::resolver`].
    pub fn tap(&mut self, cell: u8, at: ScreenPoint) -> Option<TapEffect> {
        resolve_tap(self, cell, at)
    }

    /// End the round if the clock ran out or the penalty cap was reached.
    pub(crate) fn check_termination(&mut self) {
        if !self.phase.is_running() {
            return;
        }

        let reason = if self.counters.penalties >= self.config.penalty_cap {
            EndReason::PenaltyCap
        } else if self.time_remaining_secs == 0 {
            EndReason::TimeUp
        } else {
            return;
        };

        self.phase = RoundPhase::Over;
        self.end_reason = Some(reason);
        self.scheduler.deactivate();

        let summary = RoundSummary {
            generation: self.generation,
            score: self.counters.score,
            currency: self.counters.currency,
            penalties: self.counters.penalties,
            time_remaining_secs: self.time_remaining_secs,
            ended_by: reason,
        };
        self.last_summary = Some(summary);

        tracing::info!(
            generation = self.generation,
            reason = reason.as_str(),
            score = summary.score,
            currency = summary.currency,
            penalties = summary.penalties,
            "round over"
        );
    }

    /// Acknowledge a reward claim for the coins of the finished round.
    ///
    /// Only available once the round is over.
    pub fn claim_reward(&self, address: Option<&str>) -> Option<ClaimReceipt> {
        if self.phase != RoundPhase::Over {
            return None;
        }
        let receipt = ClaimReceipt::new(self.counters.currency, address);
        tracing::info!(amount = receipt.amount, "reward claimed");
        Some(receipt)
    }

    /// Fire a despawn ticket (possibly a stale one); see
    /// [`CellScheduler::despawn`].
    pub fn fire_despawn(&mut self, ticket: DespawnTicket) -> bool {
        self.scheduler.despawn(ticket)
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn counters(&self) -> Counters {
        self.counters
    }

    pub fn score(&self) -> u32 {
        self.counters.score
    }

    pub fn currency(&self) -> u32 {
        self.counters.currency
    }

    pub fn penalties(&self) -> u32 {
        self.counters.penalties
    }

    pub fn time_remaining_secs(&self) -> u32 {
        self.time_remaining_secs
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn end_reason(&self) -> Option<EndReason> {
        self.end_reason
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        self.scheduler.board()
    }

    pub fn scheduler(&self) -> &CellScheduler<S> {
        &self.scheduler
    }

    pub fn reward_trigger(&self) -> RewardTrigger {
        self.feedback.reward_trigger()
    }

    pub fn shaking(&self) -> bool {
        self.feedback.shaking()
    }

    /// Feedback events emitted since the last drain
    pub fn drain_feedback(&mut self) -> impl Iterator<Item = FeedbackEvent> + '_ {
        self.feedback.drain_events()
    }

    /// Summary of the most recently finished round
    pub fn last_summary(&self) -> Option<RoundSummary> {
        self.last_summary
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        for (slot, cell) in out.cells.iter_mut().zip(self.board().cells().iter()) {
            *slot = cell.map(|o| CellSnapshot {
                kind: o.item.kind,
                token: o.item.token,
            });
        }
        out.phase = self.phase;
        out.score = self.counters.score;
        out.currency = self.counters.currency;
        out.penalties = self.counters.penalties;
        out.penalty_cap = self.config.penalty_cap;
        out.time_remaining_secs = self.time_remaining_secs;
        out.round_length_secs = self.config.round_length_secs;
        out.generation = self.generation;
        out.reward = self.feedback.reward_trigger();
        out.shake_ms = self.feedback.shake_remaining_ms();
        out.end_reason = self.end_reason;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedSource;

    fn scripted(spawns: &[(usize, f64)]) -> GameState<ScriptedSource> {
        GameState::with_source(GameConfig::default(), ScriptedSource::with_spawns(1, spawns))
            .unwrap()
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(12345);
        assert_eq!(state.phase(), RoundPhase::Idle);
        assert_eq!(state.counters(), Counters::default());
        assert_eq!(state.time_remaining_secs(), ROUND_LENGTH_SECS);
        assert_eq!(state.generation(), 0);
        assert_eq!(state.board().occupied_count(), 0);
        assert!(!state.scheduler().is_active());
    }

    #[test]
    fn test_idle_ignores_tick_and_hits() {
        let mut state = GameState::new(1);
        assert!(!state.tick(60_000));
        assert!(!state.record_hit(ItemKind::Bomb));
        assert!(!state.record_hit(ItemKind::Bomb));
        assert_eq!(state.phase(), RoundPhase::Idle);
        assert_eq!(state.time_remaining_secs(), ROUND_LENGTH_SECS);
        assert_eq!(state.counters(), Counters::default());
    }

    #[test]
    fn test_start_activates_scheduler() {
        let mut state = GameState::new(1);
        state.start();
        assert_eq!(state.phase(), RoundPhase::Running);
        assert_eq!(state.generation(), 1);
        assert!(state.scheduler().is_active());
        assert_eq!(state.board().occupied_count(), 1);
    }

    #[test]
    fn test_record_hit_increments_matching_counter() {
        let mut state = GameState::new(1);
        state.start();
        assert!(state.record_hit(ItemKind::Fruit));
        assert!(state.record_hit(ItemKind::Fruit));
        assert!(state.record_hit(ItemKind::Coin));
        assert_eq!(
            state.counters(),
            Counters {
                score: 2,
                currency: 1,
                penalties: 0
            }
        );
    }

    #[test]
    fn test_clock_counts_down_per_second() {
        let mut state = GameState::new(1);
        state.start();
        state.tick(999);
        assert_eq!(state.time_remaining_secs(), 30);
        state.tick(1);
        assert_eq!(state.time_remaining_secs(), 29);
        state.tick(2500);
        assert_eq!(state.time_remaining_secs(), 27);
    }

    #[test]
    fn test_round_ends_when_clock_hits_zero() {
        let mut state = GameState::new(1);
        state.start();
        assert!(!state.tick(29_999));
        assert!(state.phase().is_running());
        assert!(state.tick(1));
        assert_eq!(state.phase(), RoundPhase::Over);
        assert_eq!(state.time_remaining_secs(), 0);
        assert_eq!(state.end_reason(), Some(EndReason::TimeUp));
        assert_eq!(state.board().occupied_count(), 0);
    }

    #[test]
    fn test_clock_never_goes_negative() {
        let mut state = GameState::new(1);
        state.start();
        state.tick(120_000);
        assert_eq!(state.time_remaining_secs(), 0);
        state.tick(5_000);
        assert_eq!(state.time_remaining_secs(), 0);
    }

    #[test]
    fn test_spawn_on_final_boundary_does_not_fire() {
        // With a 1200ms cadence the 25th spawn falls exactly at 30s, the
        // same instant the clock runs out.
        let mut state = GameState::new(5);
        state.start();
        state.tick(29_999);
        let before = state.scheduler().spawn_timer_ms();
        assert_eq!(before, 1199);
        state.tick(1);
        assert_eq!(state.phase(), RoundPhase::Over);
        assert_eq!(state.board().occupied_count(), 0);
    }

    #[test]
    fn test_tap_resolves_through_state() {
        let mut state = scripted(&[(4, 0.1)]);
        state.start();
        let effect = state.tap(4, ScreenPoint::new(3, 3)).unwrap();
        assert_eq!(effect.kind, ItemKind::Coin);
        assert_eq!(state.currency(), 1);
    }

    #[test]
    fn test_claim_only_when_over() {
        let mut state = GameState::new(1);
        assert!(state.claim_reward(None).is_none());
        state.start();
        state.record_hit(ItemKind::Coin);
        assert!(state.claim_reward(None).is_none());
        state.record_hit(ItemKind::Bomb);
        state.record_hit(ItemKind::Bomb);
        let receipt = state.claim_reward(Some("0xabc")).unwrap();
        assert_eq!(receipt.amount, 1);
        assert_eq!(receipt.address.as_deref(), Some("0xabc"));
    }

    #[test]
    fn test_summary_recorded_on_round_end() {
        let mut state = GameState::new(1);
        state.start();
        assert!(state.last_summary().is_none());
        state.record_hit(ItemKind::Fruit);
        state.record_hit(ItemKind::Bomb);
        state.record_hit(ItemKind::Bomb);

        let summary = state.last_summary().unwrap();
        assert_eq!(summary.generation, 1);
        assert_eq!(summary.score, 1);
        assert_eq!(summary.penalties, 2);
        assert_eq!(summary.ended_by, EndReason::PenaltyCap);
        assert_eq!(summary.time_remaining_secs, ROUND_LENGTH_SECS);
    }

    #[test]
    fn test_snapshot_mirrors_state() {
        let mut state = scripted(&[(7, 0.35)]);
        state.start();
        state.record_hit(ItemKind::Fruit);
        let snap = state.snapshot();
        assert_eq!(snap.phase, RoundPhase::Running);
        assert_eq!(snap.score, 1);
        assert_eq!(snap.generation, 1);
        assert_eq!(snap.penalty_cap, PENALTY_CAP);
        assert_eq!(
            snap.cells[7],
            Some(CellSnapshot {
                kind: ItemKind::Bomb,
                token: BOMB_TOKEN
            })
        );
        assert!(snap.cells.iter().enumerate().all(|(i, c)| i == 7 || c.is_none()));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = GameConfig {
            dwell_ms: 2000,
            ..GameConfig::default()
        };
        assert!(GameState::with_config(config, 1).is_err());
    }
}
