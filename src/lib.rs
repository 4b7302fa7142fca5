//! Crowd Runner - A lane-based crowd runner game
//!
//! Core modules:
//! - `sim`: Deterministic run simulation (movement, collisions, combat, boss fight, rewards)
//! - `stages`: Stage catalog (curated table + seeded generator)
//! - `upgrades`: Upgrade ledger (effects and costs per upgrade track)
//! - `persistence`: Saved progress (stages, coins, upgrade levels)
//! - `settings`: Host preferences that filter effect events
//! - `presentation`: Entity-id to visual handle index fed by the event stream
//! - `platform`: Browser host bindings
//! - `tuning`: Data-driven cadence and speed parameters

pub mod error;
pub mod persistence;
pub mod platform;
pub mod presentation;
pub mod settings;
pub mod sim;
pub mod stages;
pub mod tuning;
pub mod upgrades;

pub use error::{ConfigError, PurchaseError};
pub use persistence::ProgressData;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Squad size cap (allies double as hit points)
    pub const MAX_ALLIES: u32 = 100;
    /// Clearing this stage rolls the ending instead of the stage-complete screen
    pub const FINAL_STAGE: u32 = 10;

    /// Forward speed while running (units/s)
    pub const FORWARD_SPEED: f32 = 5.0;
    /// Exponential approach rate of the squad toward the steering target (1/s)
    pub const LATERAL_EASE_RATE: f32 = 8.0;
    /// Half-width of the road; lateral position is clamped to [-LANE_LIMIT, LANE_LIMIT]
    pub const LANE_LIMIT: f32 = 3.0;

    /// Seconds between auto-attack volleys while running
    pub const AUTO_ATTACK_INTERVAL: f32 = 0.4;
    /// Seconds between boss exchanges
    pub const BOSS_EXCHANGE_INTERVAL: f32 = 0.5;
    /// The boss fight begins this far before the boss
    pub const BOSS_TRIGGER_DISTANCE: f32 = 5.0;

    /// Frame delta cap (seconds) to survive tab suspension
    pub const MAX_FRAME_DT: f32 = 0.05;

    /// Coins granted for finishing a zombie with auto-attack
    pub const KILL_BONUS_COINS: u32 = 5;
}

/// Clamp a lateral position to the road
#[inline]
pub fn clamp_lane(x: f32, limit: f32) -> f32 {
    x.clamp(-limit, limit)
}
