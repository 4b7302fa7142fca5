//! Data-driven run tuning
//!
//! Defaults reproduce the shipped balance. A JSON override only needs the
//! fields it changes.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Forward speed while running (units/s)
    pub forward_speed: f32,
    /// Lateral approach rate toward the steering target (1/s)
    pub lateral_ease_rate: f32,
    /// Lateral clamp
    pub lane_limit: f32,
    /// Seconds between auto-attack volleys
    pub auto_attack_interval: f32,
    /// Seconds between boss exchanges
    pub boss_exchange_interval: f32,
    /// Distance before the boss at which the fight starts
    pub boss_trigger_distance: f32,
    /// Largest frame delta accepted by `update`
    pub max_frame_dt: f32,
    /// Coins for an auto-attack kill
    pub kill_bonus_coins: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            forward_speed: FORWARD_SPEED,
            lateral_ease_rate: LATERAL_EASE_RATE,
            lane_limit: LANE_LIMIT,
            auto_attack_interval: AUTO_ATTACK_INTERVAL,
            boss_exchange_interval: BOSS_EXCHANGE_INTERVAL,
            boss_trigger_distance: BOSS_TRIGGER_DISTANCE,
            max_frame_dt: MAX_FRAME_DT,
            kill_bonus_coins: KILL_BONUS_COINS,
        }
    }
}

impl Tuning {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values that would stall or explode the simulation
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("forward_speed", self.forward_speed),
            ("lateral_ease_rate", self.lateral_ease_rate),
            ("lane_limit", self.lane_limit),
            ("auto_attack_interval", self.auto_attack_interval),
            ("boss_exchange_interval", self.boss_exchange_interval),
            ("max_frame_dt", self.max_frame_dt),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidTuning { field, value });
            }
        }
        if !self.boss_trigger_distance.is_finite() || self.boss_trigger_distance < 0.0 {
            return Err(ConfigError::InvalidTuning {
                field: "boss_trigger_distance",
                value: self.boss_trigger_distance,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_contract() {
        let tuning = Tuning::default();
        assert_eq!(tuning.forward_speed, 5.0);
        assert_eq!(tuning.auto_attack_interval, 0.4);
        assert_eq!(tuning.boss_exchange_interval, 0.5);
        assert_eq!(tuning.max_frame_dt, 0.05);
        assert!(tuning.validate().is_ok());
    }

    #[test]
    fn test_partial_override() {
        let tuning = Tuning::from_json(r#"{"forward_speed": 7.5}"#).unwrap();
        assert_eq!(tuning.forward_speed, 7.5);
        assert_eq!(tuning.lateral_ease_rate, 8.0);
    }

    #[test]
    fn test_rejects_zero_cadence() {
        let err = Tuning::from_json(r#"{"boss_exchange_interval": 0.0}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidTuning {
                field: "boss_exchange_interval",
                ..
            }
        ));
        assert!(matches!(
            Tuning::from_json("{").unwrap_err(),
            ConfigError::Parse(_)
        ));
    }
}
