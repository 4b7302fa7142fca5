//! Run state and core simulation types
//!
//! One `RunState` lives for exactly one attempt at a stage. The ally count is
//! both the squad size and the hit-point pool: losing allies is taking damage.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::MAX_ALLIES;
use crate::upgrades::Loadout;

/// Stable id for anything with a visual (player squad, pickups, boss...)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// The player's squad
    pub const PLAYER: EntityId = EntityId(0);
}

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    /// Moving down the road
    Running,
    /// Stopped in front of the boss, trading volleys
    BossFight,
    /// Boss defeated (terminal)
    Victory,
    /// Squad wiped out (terminal)
    Fail,
}

impl RunPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunPhase::Victory | RunPhase::Fail)
    }

    /// Allowed transitions: Running -> BossFight -> {Victory, Fail}, Running -> Fail
    pub fn can_advance_to(&self, next: RunPhase) -> bool {
        matches!(
            (self, next),
            (RunPhase::Running, RunPhase::BossFight)
                | (RunPhase::Running, RunPhase::Fail)
                | (RunPhase::BossFight, RunPhase::Victory)
                | (RunPhase::BossFight, RunPhase::Fail)
        )
    }
}

/// Weapons picked up on the road
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weapon {
    #[default]
    Fist,
    Gun,
    Shotgun,
    Rocket,
}

impl Weapon {
    pub fn base_multiplier(&self) -> f64 {
        match self {
            Weapon::Fist => 1.0,
            Weapon::Gun => 1.5,
            Weapon::Shotgun => 2.0,
            Weapon::Rocket => 3.0,
        }
    }

    /// Multiplier after the weapon-bonus upgrade scales the part above 1.0
    pub fn effective_multiplier(&self, weapon_bonus: f64) -> f64 {
        1.0 + (self.base_multiplier() - 1.0) * (1.0 + weapon_bonus)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Weapon::Fist => "Fist",
            Weapon::Gun => "Pistol",
            Weapon::Shotgun => "Shotgun",
            Weapon::Rocket => "Rocket",
        }
    }
}

/// Mutable state of one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunState {
    /// Squad size, clamped to [0, MAX_ALLIES]
    pub allies: u32,
    /// Squad size when the run began (survival ratio denominator)
    pub start_allies: u32,
    /// Lateral position (x)
    pub lateral: f32,
    /// Where steering input wants the squad
    pub lateral_target: f32,
    /// Distance travelled (z)
    pub forward: f32,
    /// Zero once the boss fight starts
    pub forward_speed: f32,
    /// Coins picked up or earned from kills this run
    pub coins_collected: u64,
    pub weapon: Weapon,
    pub weapon_multiplier: f64,
    /// base attack * weapon multiplier
    pub attack_power: f64,
    pub phase: RunPhase,
    /// Seconds accumulated toward the next auto-attack
    pub auto_attack_timer: f32,
    /// Upgrade-derived stats fixed for the run
    pub loadout: Loadout,
}

impl RunState {
    pub fn new(loadout: Loadout, forward_speed: f32) -> Self {
        let allies = loadout.start_allies.min(MAX_ALLIES);
        let mut state = Self {
            allies,
            start_allies: allies,
            lateral: 0.0,
            lateral_target: 0.0,
            forward: 0.0,
            forward_speed,
            coins_collected: 0,
            weapon: Weapon::Fist,
            weapon_multiplier: 1.0,
            attack_power: loadout.base_attack,
            phase: RunPhase::Running,
            auto_attack_timer: 0.0,
            loadout,
        };
        state.set_weapon(Weapon::Fist);
        state
    }

    /// Squad position (x = lateral, y = forward)
    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.lateral, self.forward)
    }

    /// Equip a weapon and recompute attack power
    pub fn set_weapon(&mut self, weapon: Weapon) {
        self.weapon = weapon;
        self.weapon_multiplier = weapon.effective_multiplier(self.loadout.weapon_bonus);
        self.attack_power = self.loadout.base_attack * self.weapon_multiplier;
    }

    /// Add allies up to the cap, returning how many actually joined
    pub fn add_allies(&mut self, count: u32) -> u32 {
        let before = self.allies;
        self.allies = self.allies.saturating_add(count).min(MAX_ALLIES);
        self.allies - before
    }

    /// Multiply the squad up to the cap, returning how many actually joined
    pub fn multiply_allies(&mut self, factor: u32) -> u32 {
        let before = self.allies;
        self.allies = self.allies.saturating_mul(factor).min(MAX_ALLIES);
        self.allies.saturating_sub(before)
    }

    /// Advance the phase if the transition is legal. Returns false otherwise,
    /// which makes repeated Fail/Victory requests no-ops.
    pub fn enter(&mut self, next: RunPhase) -> bool {
        if !self.phase.can_advance_to(next) {
            return false;
        }
        log::info!("Run phase {:?} -> {:?}", self.phase, next);
        self.phase = next;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weapon_multipliers_with_default_bonus() {
        // Default weapon bonus is 0.5
        assert_eq!(Weapon::Fist.effective_multiplier(0.5), 1.0);
        assert_eq!(Weapon::Gun.effective_multiplier(0.5), 1.75);
        assert_eq!(Weapon::Shotgun.effective_multiplier(0.5), 2.5);
        assert_eq!(Weapon::Rocket.effective_multiplier(0.5), 4.0);
    }

    #[test]
    fn test_set_weapon_updates_attack() {
        let mut state = RunState::new(Loadout::default(), 5.0);
        assert_eq!(state.attack_power, 10.0);
        state.set_weapon(Weapon::Rocket);
        assert_eq!(state.weapon, Weapon::Rocket);
        assert_eq!(state.attack_power, 40.0);
    }

    #[test]
    fn test_ally_cap() {
        let mut state = RunState::new(Loadout::default(), 5.0);
        assert_eq!(state.allies, 5);
        assert_eq!(state.multiply_allies(2), 5);
        assert_eq!(state.add_allies(90), 85);
        assert_eq!(state.allies, 100);
        assert_eq!(state.add_allies(1), 0);
        assert_eq!(state.multiply_allies(3), 0);
        assert_eq!(state.allies, 100);
    }

    #[test]
    fn test_phase_transitions_are_monotonic() {
        let mut state = RunState::new(Loadout::default(), 5.0);
        assert!(!state.enter(RunPhase::Victory));
        assert!(state.enter(RunPhase::BossFight));
        assert!(!state.enter(RunPhase::Running));
        assert!(state.enter(RunPhase::Fail));
        assert!(!state.enter(RunPhase::Fail));
        assert!(!state.enter(RunPhase::Victory));
        assert_eq!(state.phase, RunPhase::Fail);
    }
}
