use thiserror::Error;

/// Rejected game configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be greater than zero")]
    ZeroDuration { name: &'static str },
    #[error("penalty cap must be at least 1")]
    ZeroPenaltyCap,
    #[error("invalid item odds: coin={coin_p}, bomb={bomb_p} (each in [0, 1], sum at most 1)")]
    InvalidOdds { coin_p: f64, bomb_p: f64 },
    #[error("dwell ({dwell_ms}ms) must be shorter than the spawn cadence ({cadence_ms}ms)")]
    DwellNotShorterThanCadence { dwell_ms: u32, cadence_ms: u32 },
    #[error("invalid value {value:?} for {key}")]
    InvalidEnv { key: &'static str, value: String },
}

/// Wallet collaborator failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WalletError {
    #[error("no wallet account configured")]
    NoAccount,
}
