//! Round configuration.
//!
//! Every timing and odds value the round uses lives here instead of inline
//! literals. Defaults come from [`crate::types`].

use std::env;

use crate::error::ConfigError;
use crate::types::{
    BOMB_P, COIN_P, DWELL_MS, PENALTY_CAP, REWARD_VISUAL_MS, ROUND_LENGTH_SECS, SHAKE_VISUAL_MS,
    SPAWN_CADENCE_MS,
};

/// Tunable round parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameConfig {
    pub round_length_secs: u32,
    pub spawn_cadence_ms: u32,
    pub dwell_ms: u32,
    pub penalty_cap: u32,
    pub coin_p: f64,
    pub bomb_p: f64,
    pub reward_visual_ms: u32,
    pub shake_ms: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            round_length_secs: ROUND_LENGTH_SECS,
            spawn_cadence_ms: SPAWN_CADENCE_MS,
            dwell_ms: DWELL_MS,
            penalty_cap: PENALTY_CAP,
            coin_p: COIN_P,
            bomb_p: BOMB_P,
            reward_visual_ms: REWARD_VISUAL_MS,
            shake_ms: SHAKE_VISUAL_MS,
        }
    }
}

impl GameConfig {
    /// Check the invariants the scheduler and clock rely on.
    ///
    /// `dwell_ms < spawn_cadence_ms` is what guarantees a spawn never lands on
    /// an occupied cell.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("round length", self.round_length_secs),
            ("spawn cadence", self.spawn_cadence_ms),
            ("dwell", self.dwell_ms),
            ("reward visual duration", self.reward_visual_ms),
            ("shake duration", self.shake_ms),
        ] {
            if value == 0 {
                return Err(ConfigError::ZeroDuration { name });
            }
        }

        if self.penalty_cap == 0 {
            return Err(ConfigError::ZeroPenaltyCap);
        }

        let in_unit = |p: f64| (0.0..=1.0).contains(&p);
        if !in_unit(self.coin_p) || !in_unit(self.bomb_p) || self.coin_p + self.bomb_p > 1.0 {
            return Err(ConfigError::InvalidOdds {
                coin_p: self.coin_p,
                bomb_p: self.bomb_p,
            });
        }

        if self.dwell_ms >= self.spawn_cadence_ms {
            return Err(ConfigError::DwellNotShorterThanCadence {
                dwell_ms: self.dwell_ms,
                cadence_ms: self.spawn_cadence_ms,
            });
        }

        Ok(())
    }

    /// Build from defaults plus environment overrides, then validate.
    ///
    /// Recognised variables: `FRUIT_WHACK_ROUND_SECS`, `FRUIT_WHACK_SPAWN_MS`,
    /// `FRUIT_WHACK_DWELL_MS`, `FRUIT_WHACK_PENALTY_CAP`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`GameConfig::from_env`] with an injectable variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let read = |key: &'static str, slot: &mut u32| -> Result<(), ConfigError> {
            let Some(raw) = lookup(key) else {
                return Ok(());
            };
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return Ok(());
            }
            *slot = trimmed.parse().map_err(|_| ConfigError::InvalidEnv {
                key,
                value: raw.clone(),
            })?;
            Ok(())
        };

        read("FRUIT_WHACK_ROUND_SECS", &mut config.round_length_secs)?;
        read("FRUIT_WHACK_SPAWN_MS", &mut config.spawn_cadence_ms)?;
        read("FRUIT_WHACK_DWELL_MS", &mut config.dwell_ms)?;
        read("FRUIT_WHACK_PENALTY_CAP", &mut config.penalty_cap)?;

        config.validate()?;
        Ok(config)
    }
}
