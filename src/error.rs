//! Error types
//!
//! The simulation itself has no I/O; errors only come from bad configuration
//! (stage ids, tuning, saved data) and from the upgrade shop.

use thiserror::Error;

use crate::upgrades::UpgradeTrack;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("stage id must be a positive integer (got {value})")]
    InvalidStageId { value: f64 },
    #[error("{field} must be positive and finite (got {value})")]
    InvalidTuning { field: &'static str, value: f32 },
    #[error("malformed JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PurchaseError {
    #[error("{} is already at max level", .track.key())]
    MaxLevel { track: UpgradeTrack },
    #[error("upgrade costs {cost} coins but only {coins} available")]
    InsufficientCoins { cost: u64, coins: u64 },
}
