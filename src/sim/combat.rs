//! Damage, pickups, gates and the boss exchange
//!
//! Every function here mutates `RunState`/`EntityRegistry` and appends the
//! matching effect events. Phase changes to `Fail` happen inside the ally
//! loss funnels; the tick loop turns them into terminal events.

use super::events::{BurstKind, DamageStyle, GameEvent, SoundEffect};
use super::registry::{Boss, EntityRegistry};
use super::state::{RunPhase, RunState};
use crate::stages::{CollectibleKind, EnemyKind, GateKind};

/// Auto-attack damage: attack power scaled up 10% per ally
pub fn volley_damage(attack_power: f64, allies: u32) -> i64 {
    (attack_power * (1.0 + allies as f64 * 0.1)).floor() as i64
}

/// Allies lost walking into a zombie that is still standing
pub fn zombie_contact_damage(remaining_health: i64, attack_power: f64) -> u32 {
    ((remaining_health as f64 / attack_power).ceil() as i64).max(1) as u32
}

/// Loss after the health upgrade, never below one ally
pub fn reduced_loss(requested: u32, health_mult: f64) -> u32 {
    ((requested as f64 * health_mult).floor() as u32).max(1)
}

/// Player-side damage per boss exchange
pub fn boss_volley_damage(allies: u32, attack_power: f64) -> i64 {
    (allies as f64 * attack_power * 0.1).floor() as i64
}

/// Allies the boss takes per exchange
pub fn boss_attack(stage_id: u32) -> u32 {
    ((stage_id as f64 * 0.3 + 1.0).floor() as u32).max(1)
}

/// Tracer count for an auto-attack volley
fn auto_attack_shots(allies: u32) -> u32 {
    allies.div_ceil(3).min(3)
}

/// Running-phase ally loss (contact damage). Returns the allies actually lost.
pub fn apply_ally_loss(state: &mut RunState, requested: u32) -> u32 {
    let loss = reduced_loss(requested, state.loadout.health_mult);
    remove_allies(state, loss)
}

/// Boss-phase ally loss. Not reduced by the health upgrade.
pub fn apply_boss_loss(state: &mut RunState, amount: u32) -> u32 {
    remove_allies(state, amount)
}

fn remove_allies(state: &mut RunState, loss: u32) -> u32 {
    let lost = loss.min(state.allies);
    state.allies -= lost;
    if state.allies == 0 {
        state.enter(RunPhase::Fail);
    }
    lost
}

/// Fire one volley at the first zombie in the attack cone, if any.
/// Returns true when a target was engaged.
pub fn auto_attack(
    state: &mut RunState,
    registry: &mut EntityRegistry,
    kill_bonus: u32,
    events: &mut Vec<GameEvent>,
) -> bool {
    let player = state.pos();
    let Some(idx) = registry.attack_target(player) else {
        return false;
    };

    let damage = volley_damage(state.attack_power, state.allies);
    let zombie = &mut registry.obstacles[idx];
    let Some(health) = zombie.engage() else {
        return false;
    };
    *health -= damage;
    let remaining = *health;

    events.push(GameEvent::Volley {
        from: player,
        to: zombie.pos,
        shots: auto_attack_shots(state.allies),
    });
    events.push(GameEvent::sound(SoundEffect::Shoot));
    events.push(GameEvent::number(
        zombie.pos,
        format!("-{damage}"),
        DamageStyle::Damage,
    ));
    events.push(GameEvent::Flash { entity: zombie.id });

    if remaining <= 0 && zombie.consume() {
        state.coins_collected += kill_bonus as u64;
        log::debug!("Zombie {:?} killed, +{} coins", zombie.id, kill_bonus);
        events.push(GameEvent::burst(zombie.pos, BurstKind::Kill, 12));
        events.push(GameEvent::sound(SoundEffect::Hit));
        events.push(GameEvent::shake(0.2, 0.15));
        events.push(GameEvent::number(
            zombie.pos,
            format!("+{kill_bonus}"),
            DamageStyle::Coin,
        ));
        events.push(GameEvent::RemoveVisual { entity: zombie.id });
    }
    true
}

/// Contact damage from red boxes and standing zombies. Stops as soon as the
/// squad is wiped out.
pub fn resolve_contacts(
    state: &mut RunState,
    registry: &mut EntityRegistry,
    events: &mut Vec<GameEvent>,
) {
    for idx in registry.contact_obstacles(state.pos()) {
        if state.phase.is_terminal() {
            break;
        }
        let obstacle = &mut registry.obstacles[idx];
        if !obstacle.consume() {
            continue;
        }

        let (requested, burst, (intensity, duration)) = match obstacle.kind {
            EnemyKind::RedBox { damage } => (damage, BurstKind::Impact, (0.3, 0.2)),
            EnemyKind::Zombie { health } => {
                let remaining = obstacle.engage().map_or(health as i64, |h| *h);
                (
                    zombie_contact_damage(remaining, state.attack_power),
                    BurstKind::Bite,
                    (0.4, 0.25),
                )
            }
        };
        let lost = apply_ally_loss(state, requested);
        log::debug!(
            "Contact with {:?} at {:?}: -{} allies ({} left)",
            obstacle.id,
            obstacle.pos,
            lost,
            state.allies
        );

        events.push(GameEvent::burst(obstacle.pos, burst, 8));
        events.push(GameEvent::number(
            obstacle.pos,
            format!("-{lost}"),
            DamageStyle::Damage,
        ));
        events.push(GameEvent::sound(SoundEffect::Hit));
        events.push(GameEvent::shake(intensity, duration));
        events.push(GameEvent::RemoveVisual {
            entity: obstacle.id,
        });
    }
}

/// Ally, coin and weapon pickups
pub fn resolve_collectibles(
    state: &mut RunState,
    registry: &mut EntityRegistry,
    events: &mut Vec<GameEvent>,
) {
    for idx in registry.touched_collectibles(state.pos()) {
        let item = &mut registry.collectibles[idx];
        if !item.consume() {
            continue;
        }

        match item.kind {
            CollectibleKind::Ally => {
                let gained = state.add_allies(1);
                log::debug!("Ally picked up ({} total)", state.allies);
                events.push(GameEvent::burst(item.pos, BurstKind::Ally, 5));
                events.push(GameEvent::number(
                    item.pos,
                    format!("+{gained}"),
                    DamageStyle::Heal,
                ));
                events.push(GameEvent::sound(SoundEffect::AllyPickup));
            }
            CollectibleKind::Coin { value } => {
                state.coins_collected += value as u64;
                events.push(GameEvent::burst(item.pos, BurstKind::Coin, 5));
                events.push(GameEvent::number(
                    item.pos,
                    format!("+{value}"),
                    DamageStyle::Coin,
                ));
                events.push(GameEvent::sound(SoundEffect::Coin));
            }
            CollectibleKind::Weapon(weapon) => {
                state.set_weapon(weapon);
                log::debug!(
                    "Weapon {} equipped, attack {:.1}",
                    weapon.name(),
                    state.attack_power
                );
                events.push(GameEvent::burst(item.pos, BurstKind::Weapon, 8));
                events.push(GameEvent::sound(SoundEffect::Weapon));
            }
        }
        events.push(GameEvent::RemoveVisual { entity: item.id });
    }
}

/// Add/multiply gates. Used gates are dimmed, not removed.
pub fn resolve_gates(
    state: &mut RunState,
    registry: &mut EntityRegistry,
    events: &mut Vec<GameEvent>,
) {
    for idx in registry.touched_gates(state.pos()) {
        let gate = &mut registry.gates[idx];
        if !gate.consume() {
            continue;
        }

        let (gained, count) = match gate.kind {
            GateKind::Multiply => (state.multiply_allies(gate.value), 12),
            GateKind::Add => (state.add_allies(gate.value), 10),
        };
        log::debug!(
            "Gate {:?} {:?} {}: +{} allies ({} total)",
            gate.id,
            gate.kind,
            gate.value,
            gained,
            state.allies
        );

        events.push(GameEvent::burst(gate.pos, BurstKind::Gate, count));
        if gained > 0 {
            events.push(GameEvent::number(
                gate.pos,
                format!("+{gained}"),
                DamageStyle::Heal,
            ));
        }
        events.push(GameEvent::sound(SoundEffect::Gate));
        events.push(GameEvent::DimVisual { entity: gate.id });
    }
}

/// Result of one boss exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeResult {
    Continue,
    BossDefeated,
    PartyWiped,
}

/// One mutual damage exchange. The squad shoots first; a boss that dies to
/// the volley does not hit back.
pub fn boss_exchange(
    state: &mut RunState,
    boss: &mut Boss,
    stage_id: u32,
    events: &mut Vec<GameEvent>,
) -> ExchangeResult {
    let damage = boss_volley_damage(state.allies, state.attack_power);
    boss.current_health -= damage;

    events.push(GameEvent::Volley {
        from: state.pos(),
        to: boss.pos,
        shots: state.allies.min(8),
    });
    events.push(GameEvent::number(
        boss.pos,
        format!("-{damage}"),
        DamageStyle::Damage,
    ));
    events.push(GameEvent::sound(SoundEffect::BossHit));
    events.push(GameEvent::sound(SoundEffect::Shoot));
    events.push(GameEvent::shake(0.15, 0.1));
    events.push(GameEvent::Flash { entity: boss.id });

    let result = if boss.current_health <= 0 {
        boss.defeated = true;
        ExchangeResult::BossDefeated
    } else {
        let lost = apply_boss_loss(state, boss_attack(stage_id));
        events.push(GameEvent::number(
            state.pos(),
            format!("-{lost}"),
            DamageStyle::Damage,
        ));
        if state.allies == 0 {
            ExchangeResult::PartyWiped
        } else {
            ExchangeResult::Continue
        }
    };

    events.push(GameEvent::BossHudUpdate {
        name: boss.name.clone(),
        health_percent: boss.health_percent(),
    });
    log::debug!(
        "Boss exchange: -{} boss hp ({} left), {} allies",
        damage,
        boss.current_health,
        state.allies
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stages::{
        BossDescriptor, BossKind, CollectiblePlacement, EnemyPlacement, GatePlacement, Stage,
    };
    use crate::sim::state::Weapon;
    use crate::upgrades::Loadout;
    use glam::Vec2;

    fn stage_with(
        enemies: Vec<EnemyPlacement>,
        collectibles: Vec<CollectiblePlacement>,
        gates: Vec<GatePlacement>,
    ) -> Stage {
        Stage {
            id: 1,
            name: "Test".into(),
            length: 100.0,
            enemies,
            collectibles,
            gates,
            boss: BossDescriptor {
                kind: BossKind::ZombieBoss,
                name: "Test Boss".into(),
                z: 95.0,
                health: 200,
            },
            reward_coins: 100,
        }
    }

    fn loadout(start_allies: u32, health_mult: f64) -> Loadout {
        Loadout {
            start_allies,
            health_mult,
            ..Loadout::default()
        }
    }

    fn red_box(z: f32, damage: u32) -> EnemyPlacement {
        EnemyPlacement {
            kind: EnemyKind::RedBox { damage },
            pos: Vec2::new(0.0, z),
        }
    }

    fn zombie(z: f32, health: u32) -> EnemyPlacement {
        EnemyPlacement {
            kind: EnemyKind::Zombie { health },
            pos: Vec2::new(0.0, z),
        }
    }

    #[test]
    fn test_formulas() {
        assert_eq!(volley_damage(10.0, 7), 17);
        assert_eq!(volley_damage(17.5, 20), 52);
        assert_eq!(zombie_contact_damage(30, 10.0), 3);
        assert_eq!(zombie_contact_damage(13, 10.0), 2);
        assert_eq!(zombie_contact_damage(-4, 10.0), 1);
        assert_eq!(reduced_loss(3, 0.95), 2);
        assert_eq!(reduced_loss(1, 0.5), 1);
        assert_eq!(boss_volley_damage(7, 10.0), 7);
        assert_eq!(boss_attack(1), 1);
        assert_eq!(boss_attack(4), 2);
        assert_eq!(boss_attack(10), 4);
        assert_eq!(auto_attack_shots(1), 1);
        assert_eq!(auto_attack_shots(7), 3);
    }

    #[test]
    fn test_damage_reduction_asymmetry() {
        // Health multiplier 0.9: contact loss reduced, boss loss raw
        let mut state = RunState::new(loadout(50, 0.9), 5.0);
        assert_eq!(apply_ally_loss(&mut state, 10), 9);
        assert_eq!(state.allies, 41);
        assert_eq!(apply_boss_loss(&mut state, 10), 10);
        assert_eq!(state.allies, 31);
    }

    #[test]
    fn test_red_box_contact() {
        let stage = stage_with(vec![red_box(10.0, 10)], vec![], vec![]);
        let mut registry = EntityRegistry::from_stage(&stage);
        let mut state = RunState::new(loadout(20, 0.9), 5.0);
        state.forward = 10.5;
        let mut events = Vec::new();

        resolve_contacts(&mut state, &mut registry, &mut events);
        assert_eq!(state.allies, 11);
        assert!(registry.obstacles[0].consumed);
        assert!(events.contains(&GameEvent::number(
            Vec2::new(0.0, 10.0),
            "-9",
            DamageStyle::Damage
        )));

        // Standing in the same spot again does nothing
        events.clear();
        resolve_contacts(&mut state, &mut registry, &mut events);
        assert_eq!(state.allies, 11);
        assert!(events.is_empty());
    }

    #[test]
    fn test_zombie_contact_uses_remaining_health() {
        let stage = stage_with(vec![zombie(10.0, 30), zombie(20.0, 30)], vec![], vec![]);
        let mut registry = EntityRegistry::from_stage(&stage);
        let mut state = RunState::new(loadout(20, 1.0), 5.0);
        let mut events = Vec::new();

        // Untouched zombie: ceil(30 / 10) = 3
        state.forward = 10.0;
        resolve_contacts(&mut state, &mut registry, &mut events);
        assert_eq!(state.allies, 17);
        assert_eq!(registry.obstacles[0].current_health, Some(30));

        // Wounded zombie: ceil(4 / 10) = 1
        *registry.obstacles[1].engage().unwrap() = 4;
        state.forward = 20.0;
        resolve_contacts(&mut state, &mut registry, &mut events);
        assert_eq!(state.allies, 16);
    }

    #[test]
    fn test_auto_attack_lazy_health_and_kill() {
        let stage = stage_with(vec![zombie(15.0, 25)], vec![], vec![]);
        let mut registry = EntityRegistry::from_stage(&stage);
        let mut state = RunState::new(Loadout::default(), 5.0);
        state.forward = 10.0;
        let mut events = Vec::new();

        assert_eq!(registry.obstacles[0].current_health, None);
        // 5 allies, attack 10: 15 damage
        assert!(auto_attack(&mut state, &mut registry, 5, &mut events));
        assert_eq!(registry.obstacles[0].current_health, Some(10));
        assert!(!registry.obstacles[0].consumed);
        assert_eq!(state.coins_collected, 0);

        assert!(auto_attack(&mut state, &mut registry, 5, &mut events));
        assert_eq!(registry.obstacles[0].current_health, Some(-5));
        assert!(registry.obstacles[0].consumed);
        assert_eq!(state.coins_collected, 5);
        assert!(events.contains(&GameEvent::RemoveVisual {
            entity: registry.obstacles[0].id
        }));

        // Nothing left to shoot
        assert!(!auto_attack(&mut state, &mut registry, 5, &mut events));
    }

    #[test]
    fn test_auto_attack_ignores_red_boxes() {
        let stage = stage_with(vec![red_box(15.0, 5)], vec![], vec![]);
        let mut registry = EntityRegistry::from_stage(&stage);
        let mut state = RunState::new(Loadout::default(), 5.0);
        state.forward = 10.0;
        let mut events = Vec::new();
        assert!(!auto_attack(&mut state, &mut registry, 5, &mut events));
        assert!(events.is_empty());
    }

    #[test]
    fn test_contacts_stop_after_wipe() {
        let mut second = red_box(10.0, 5);
        second.pos.x = 0.5;
        let stage = stage_with(vec![red_box(10.0, 50), second], vec![], vec![]);
        let mut registry = EntityRegistry::from_stage(&stage);
        let mut state = RunState::new(loadout(5, 1.0), 5.0);
        state.forward = 10.0;
        let mut events = Vec::new();

        resolve_contacts(&mut state, &mut registry, &mut events);
        assert_eq!(state.allies, 0);
        assert_eq!(state.phase, RunPhase::Fail);
        assert!(!registry.obstacles[1].consumed);
    }

    #[test]
    fn test_collectibles() {
        let at = |kind, z| CollectiblePlacement {
            kind,
            pos: Vec2::new(0.0, z),
        };
        let stage = stage_with(
            vec![],
            vec![
                at(CollectibleKind::Ally, 10.0),
                at(CollectibleKind::Coin { value: 15 }, 10.5),
                at(CollectibleKind::Weapon(Weapon::Shotgun), 11.0),
            ],
            vec![],
        );
        let mut registry = EntityRegistry::from_stage(&stage);
        let mut state = RunState::new(Loadout::default(), 5.0);
        state.forward = 10.5;
        let mut events = Vec::new();

        resolve_collectibles(&mut state, &mut registry, &mut events);
        assert_eq!(state.allies, 6);
        assert_eq!(state.coins_collected, 15);
        assert_eq!(state.weapon, Weapon::Shotgun);
        assert_eq!(state.attack_power, 25.0);
        assert!(registry.collectibles.iter().all(|c| c.consumed));
        let removed = events
            .iter()
            .filter(|e| matches!(e, GameEvent::RemoveVisual { .. }))
            .count();
        assert_eq!(removed, 3);
    }

    #[test]
    fn test_gates_are_one_shot_and_capped() {
        let gate = |kind, value| GatePlacement {
            kind,
            pos: Vec2::new(0.0, 20.0),
            value,
        };
        let stage = stage_with(
            vec![],
            vec![],
            vec![gate(GateKind::Multiply, 2), gate(GateKind::Add, 95)],
        );
        let mut registry = EntityRegistry::from_stage(&stage);
        let mut state = RunState::new(Loadout::default(), 5.0);
        state.forward = 20.0;
        let mut events = Vec::new();

        resolve_gates(&mut state, &mut registry, &mut events);
        // 5 * 2 = 10, then 10 + 95 capped at 100
        assert_eq!(state.allies, 100);
        let dims = events
            .iter()
            .filter(|e| matches!(e, GameEvent::DimVisual { .. }))
            .count();
        assert_eq!(dims, 2);

        events.clear();
        resolve_gates(&mut state, &mut registry, &mut events);
        assert!(events.is_empty());
    }

    #[test]
    fn test_boss_exchange_atomicity() {
        let stage = stage_with(vec![], vec![], vec![]);
        let mut registry = EntityRegistry::from_stage(&stage);
        let mut state = RunState::new(loadout(20, 1.0), 5.0);
        let mut events = Vec::new();

        // 20 allies * 10 attack * 0.1 = 20 per exchange
        registry.boss.current_health = 20;
        let result = boss_exchange(&mut state, &mut registry.boss, 1, &mut events);
        assert_eq!(result, ExchangeResult::BossDefeated);
        assert!(registry.boss.defeated);
        // The dying boss does not hit back
        assert_eq!(state.allies, 20);
    }

    #[test]
    fn test_boss_exchange_wipe() {
        let stage = stage_with(vec![], vec![], vec![]);
        let mut registry = EntityRegistry::from_stage(&stage);
        let mut state = RunState::new(loadout(1, 0.5), 5.0);
        state.enter(RunPhase::BossFight);
        let mut events = Vec::new();

        let result = boss_exchange(&mut state, &mut registry.boss, 10, &mut events);
        assert_eq!(result, ExchangeResult::PartyWiped);
        assert_eq!(state.allies, 0);
        assert_eq!(state.phase, RunPhase::Fail);
        assert_eq!(registry.boss.current_health, 199);
    }
}
