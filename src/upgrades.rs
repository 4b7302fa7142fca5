//! Upgrade ledger
//!
//! Five persistent upgrade tracks bought with coins between runs. Each track
//! maps its level to a numeric effect and to the price of the next level.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_ALLIES;
use crate::error::PurchaseError;

/// Upgrade tracks, in shop order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UpgradeTrack {
    /// Allies at the start of each run
    StartAllies,
    /// Base attack power before the weapon multiplier
    AttackPower,
    /// Additive boost to weapon multipliers
    WeaponBonus,
    /// Multiplier on the stage-clear payout
    CoinBonus,
    /// Damage reduction on ally losses while running
    Health,
}

impl UpgradeTrack {
    pub const ALL: [UpgradeTrack; 5] = [
        UpgradeTrack::StartAllies,
        UpgradeTrack::AttackPower,
        UpgradeTrack::WeaponBonus,
        UpgradeTrack::CoinBonus,
        UpgradeTrack::Health,
    ];

    /// Save-file key
    pub fn key(&self) -> &'static str {
        match self {
            UpgradeTrack::StartAllies => "startAllies",
            UpgradeTrack::AttackPower => "attackPower",
            UpgradeTrack::WeaponBonus => "weaponBonus",
            UpgradeTrack::CoinBonus => "coinBonus",
            UpgradeTrack::Health => "health",
        }
    }

    pub fn from_key(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.key().eq_ignore_ascii_case(s))
    }

    /// Display name for the shop
    pub fn name(&self) -> &'static str {
        match self {
            UpgradeTrack::StartAllies => "Starting Allies",
            UpgradeTrack::AttackPower => "Attack Power",
            UpgradeTrack::WeaponBonus => "Weapon Mastery",
            UpgradeTrack::CoinBonus => "Coin Bonus",
            UpgradeTrack::Health => "Toughness",
        }
    }

    pub fn max_level(&self) -> u32 {
        match self {
            UpgradeTrack::CoinBonus => 5,
            _ => 10,
        }
    }

    fn base_cost(&self) -> f64 {
        match self {
            UpgradeTrack::StartAllies => 100.0,
            UpgradeTrack::AttackPower => 150.0,
            UpgradeTrack::WeaponBonus => 200.0,
            UpgradeTrack::CoinBonus => 300.0,
            UpgradeTrack::Health => 250.0,
        }
    }

    fn growth(&self) -> f64 {
        match self {
            UpgradeTrack::CoinBonus => 2.0,
            _ => 1.8,
        }
    }

    /// Price of buying the next level when currently at `level`
    pub fn cost(&self, level: u32) -> u64 {
        (self.base_cost() * self.growth().powi(level as i32)).floor() as u64
    }

    /// Numeric effect at `level`
    pub fn effect(&self, level: u32) -> f64 {
        let level = level as f64;
        match self {
            UpgradeTrack::StartAllies => 5.0 + 2.0 * level,
            UpgradeTrack::AttackPower => 10.0 + 5.0 * level,
            UpgradeTrack::WeaponBonus => 0.5 + 0.15 * level,
            UpgradeTrack::CoinBonus => 1.0 + (10.0 + 10.0 * level) / 100.0,
            UpgradeTrack::Health => 1.0 - (5.0 + 3.0 * level) / 100.0,
        }
    }

    /// Shop description of the effect at `level`
    pub fn describe(&self, level: u32) -> String {
        match self {
            UpgradeTrack::StartAllies => format!("Start with {} allies", 5 + level * 2),
            UpgradeTrack::AttackPower => format!("Base attack: {}", 10 + level * 5),
            UpgradeTrack::WeaponBonus => format!("Weapon bonus: +{}%", 50 + level * 15),
            UpgradeTrack::CoinBonus => format!("Coin gain: +{}%", 10 + level * 10),
            UpgradeTrack::Health => format!("Damage taken: -{}%", 5 + level * 3),
        }
    }
}

/// Current level of every track (persisted)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpgradeLevels {
    pub start_allies: u32,
    pub attack_power: u32,
    pub weapon_bonus: u32,
    pub coin_bonus: u32,
    pub health: u32,
}

impl UpgradeLevels {
    pub fn level(&self, track: UpgradeTrack) -> u32 {
        match track {
            UpgradeTrack::StartAllies => self.start_allies,
            UpgradeTrack::AttackPower => self.attack_power,
            UpgradeTrack::WeaponBonus => self.weapon_bonus,
            UpgradeTrack::CoinBonus => self.coin_bonus,
            UpgradeTrack::Health => self.health,
        }
    }

    fn level_mut(&mut self, track: UpgradeTrack) -> &mut u32 {
        match track {
            UpgradeTrack::StartAllies => &mut self.start_allies,
            UpgradeTrack::AttackPower => &mut self.attack_power,
            UpgradeTrack::WeaponBonus => &mut self.weapon_bonus,
            UpgradeTrack::CoinBonus => &mut self.coin_bonus,
            UpgradeTrack::Health => &mut self.health,
        }
    }

    /// Cost of the next level, `None` once maxed
    pub fn next_cost(&self, track: UpgradeTrack) -> Option<u64> {
        let level = self.level(track);
        (level < track.max_level()).then(|| track.cost(level))
    }

    /// Buy one level of `track`, paying from `coins`. Returns the price paid.
    ///
    /// Nothing changes on error. Callers must not interleave two purchases
    /// against the same wallet.
    pub fn purchase(&mut self, track: UpgradeTrack, coins: &mut u64) -> Result<u64, PurchaseError> {
        let cost = self
            .next_cost(track)
            .ok_or(PurchaseError::MaxLevel { track })?;
        if *coins < cost {
            return Err(PurchaseError::InsufficientCoins {
                cost,
                coins: *coins,
            });
        }
        *coins -= cost;
        *self.level_mut(track) += 1;
        log::info!(
            "Upgraded {} to level {} for {} coins",
            track.key(),
            self.level(track),
            cost
        );
        Ok(cost)
    }
}

/// Per-run stats derived from upgrade levels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Loadout {
    pub start_allies: u32,
    pub base_attack: f64,
    /// Added to (weapon multiplier - 1) scaling
    pub weapon_bonus: f64,
    pub coin_bonus: f64,
    /// Multiplier on ally losses while running (< 1 means reduction)
    pub health_mult: f64,
}

impl Loadout {
    pub fn from_levels(levels: &UpgradeLevels) -> Self {
        let effect = |track: UpgradeTrack| track.effect(levels.level(track));
        Self {
            start_allies: (effect(UpgradeTrack::StartAllies) as u32).min(MAX_ALLIES),
            base_attack: effect(UpgradeTrack::AttackPower),
            weapon_bonus: effect(UpgradeTrack::WeaponBonus),
            coin_bonus: effect(UpgradeTrack::CoinBonus),
            health_mult: effect(UpgradeTrack::Health),
        }
    }
}

impl Default for Loadout {
    fn default() -> Self {
        Self::from_levels(&UpgradeLevels::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_loadout() {
        let loadout = Loadout::default();
        assert_eq!(loadout.start_allies, 5);
        assert_eq!(loadout.base_attack, 10.0);
        assert!((loadout.weapon_bonus - 0.5).abs() < 1e-9);
        assert!((loadout.coin_bonus - 1.1).abs() < 1e-9);
        assert!((loadout.health_mult - 0.95).abs() < 1e-9);
    }

    #[test]
    fn test_effects_at_level() {
        assert_eq!(UpgradeTrack::StartAllies.effect(10), 25.0);
        assert_eq!(UpgradeTrack::AttackPower.effect(3), 25.0);
        assert!((UpgradeTrack::WeaponBonus.effect(2) - 0.8).abs() < 1e-9);
        assert!((UpgradeTrack::CoinBonus.effect(5) - 1.6).abs() < 1e-9);
        assert!((UpgradeTrack::Health.effect(10) - 0.65).abs() < 1e-9);
    }

    #[test]
    fn test_costs_grow() {
        assert_eq!(UpgradeTrack::StartAllies.cost(0), 100);
        assert_eq!(UpgradeTrack::StartAllies.cost(1), 180);
        assert_eq!(UpgradeTrack::StartAllies.cost(2), 324);
        assert_eq!(UpgradeTrack::CoinBonus.cost(3), 2400);
        for track in UpgradeTrack::ALL {
            for level in 0..track.max_level() {
                assert!(track.cost(level + 1) > track.cost(level));
            }
        }
    }

    #[test]
    fn test_purchase_deducts_and_levels() {
        let mut levels = UpgradeLevels::default();
        let mut coins = 250;
        assert_eq!(levels.purchase(UpgradeTrack::StartAllies, &mut coins), Ok(100));
        assert_eq!(coins, 150);
        assert_eq!(levels.start_allies, 1);

        // Next level costs 180
        assert_eq!(
            levels.purchase(UpgradeTrack::StartAllies, &mut coins),
            Err(PurchaseError::InsufficientCoins {
                cost: 180,
                coins: 150
            })
        );
        assert_eq!(coins, 150);
        assert_eq!(levels.start_allies, 1);
    }

    #[test]
    fn test_purchase_refused_at_max() {
        let mut levels = UpgradeLevels {
            coin_bonus: 5,
            ..Default::default()
        };
        let mut coins = 1_000_000;
        assert_eq!(
            levels.purchase(UpgradeTrack::CoinBonus, &mut coins),
            Err(PurchaseError::MaxLevel {
                track: UpgradeTrack::CoinBonus
            })
        );
        assert_eq!(coins, 1_000_000);
        assert_eq!(levels.next_cost(UpgradeTrack::CoinBonus), None);
    }

    #[test]
    fn test_track_keys_round_trip() {
        for track in UpgradeTrack::ALL {
            assert_eq!(UpgradeTrack::from_key(track.key()), Some(track));
        }
        assert_eq!(UpgradeTrack::from_key("nope"), None);
        assert_eq!(UpgradeTrack::Health.describe(1), "Damage taken: -8%");
    }
}
