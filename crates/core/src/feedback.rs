//! Visual feedback timers (confetti after a coin, shake after a bomb).
//!
//! The core decides when an effect starts and when it expires; drawing is
//! left to the renderer, which reads [`Feedback::reward_trigger`] and
//! [`Feedback::shaking`].

use arrayvec::ArrayVec;

use crate::types::{FeedbackEvent, RewardTrigger, ScreenPoint};

/// Most events buffered between two drains
const EVENT_CAPACITY: usize = 8;

#[derive(Debug, Clone, Default)]
pub struct Feedback {
    reward_at: ScreenPoint,
    reward_ms: u32,
    shake_ms: u32,
    events: ArrayVec<FeedbackEvent, EVENT_CAPACITY>,
}

impl Feedback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) the confetti at `at`
    pub fn reward(&mut self, at: ScreenPoint, duration_ms: u32) {
        self.reward_at = at;
        self.reward_ms = duration_ms;
        self.push(FeedbackEvent::Reward { at, duration_ms });
    }

    /// Start (or restart) the shake
    pub fn shake(&mut self, duration_ms: u32) {
        self.shake_ms = duration_ms;
        self.push(FeedbackEvent::Shake { duration_ms });
    }

    fn push(&mut self, event: FeedbackEvent) {
        // Oldest event is dropped if nobody drains the buffer.
        if self.events.is_full() {
            self.events.remove(0);
        }
        self.events.push(event);
    }

    /// Count down both effects
    pub fn tick(&mut self, elapsed_ms: u32) {
        self.reward_ms = self.reward_ms.saturating_sub(elapsed_ms);
        self.shake_ms = self.shake_ms.saturating_sub(elapsed_ms);
    }

    pub fn reward_trigger(&self) -> RewardTrigger {
        if self.reward_ms > 0 {
            RewardTrigger {
                x: self.reward_at.x,
                y: self.reward_at.y,
                active: true,
            }
        } else {
            RewardTrigger::default()
        }
    }

    pub fn shaking(&self) -> bool {
        self.shake_ms > 0
    }

    pub fn shake_remaining_ms(&self) -> u32 {
        self.shake_ms
    }

    /// Drain events emitted since the last call
    pub fn drain_events(&mut self) -> impl Iterator<Item = FeedbackEvent> + '_ {
        self.events.drain(..)
    }
}
