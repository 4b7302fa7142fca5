//! Procedural stages past the curated table
//!
//! Shape (length, entity counts, boss health, reward) is a pure function of
//! the stage number; positions, enemy types and some values come from the
//! injected RNG, drawn in a fixed order so a seeded source replays exactly.

use glam::Vec2;
use rand::Rng;

use super::{
    BossDescriptor, BossKind, CollectibleKind, CollectiblePlacement, EnemyKind, EnemyPlacement,
    GateKind, GatePlacement, Stage,
};
use crate::sim::Weapon;

/// Boss roster, cycled by stage number
const BOSS_ROSTER: [(BossKind, &str); 8] = [
    (BossKind::ZombieBoss, "Zombie Warlord"),
    (BossKind::DarkKnight, "Dark Knight"),
    (BossKind::FireDemon, "Flame Beast"),
    (BossKind::ShadowLord, "Shadow Ruler"),
    (BossKind::DragonKing, "Reaper of Death"),
    (BossKind::ZombieKing, "King of Chaos"),
    (BossKind::FireDemon, "Void Walker"),
    (BossKind::DarkKnight, "Storm Giant"),
];

/// Weapon tiers handed out by generated stages
const WEAPON_TIERS: [Weapon; 3] = [Weapon::Gun, Weapon::Shotgun, Weapon::Rocket];

/// Chance that a generated enemy is a red box rather than a zombie
const RED_BOX_CHANCE: f64 = 0.6;

pub fn stage_length(id: u32) -> f32 {
    (100 + id * 15) as f32
}

pub fn enemy_count(id: u32) -> usize {
    (4.0 + id as f64 * 0.8).floor() as usize
}

pub fn ally_pickup_count(id: u32) -> usize {
    (6.0 + id as f64 * 0.5).floor() as usize
}

pub fn coin_pickup_count(id: u32) -> usize {
    (2.0 + id as f64 * 0.3).floor() as usize
}

pub fn boss_health(id: u32) -> u32 {
    (300.0 * (id as f64).powf(1.2)).floor() as u32
}

/// Random lateral slot in {-1, 0, 1} (rarely -2), truncated toward zero
fn random_lane<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    (rng.random::<f64>() * 4.0 - 2.0).trunc() as f32
}

/// Build a stage for any stage number (normally only used past the table)
pub fn generate_stage<R: Rng + ?Sized>(id: u32, rng: &mut R) -> Stage {
    let length = stage_length(id);
    let len = length as f64;
    let num_enemies = enemy_count(id);
    let num_allies = ally_pickup_count(id);
    let num_coins = coin_pickup_count(id);

    let mut collectibles = Vec::with_capacity(num_allies + num_coins + 2);

    // Allies spread evenly over the first 60% of the road
    for i in 0..num_allies {
        let x = random_lane(rng);
        let z = 8.0 + (i as f64 / num_allies as f64) * len * 0.6;
        collectibles.push(CollectiblePlacement {
            kind: CollectibleKind::Ally,
            pos: Vec2::new(x, z as f32),
        });
    }

    for _ in 0..num_coins {
        let x = random_lane(rng);
        let z = 15.0 + rng.random::<f64>() * len * 0.6;
        collectibles.push(CollectiblePlacement {
            kind: CollectibleKind::Coin { value: 10 + id * 3 },
            pos: Vec2::new(x, z as f32),
        });
    }

    let tier = ((id / 3) as usize).min(2);
    let x = random_lane(rng);
    let z = len * 0.4 + rng.random::<f64>() * len * 0.2;
    collectibles.push(CollectiblePlacement {
        kind: CollectibleKind::Weapon(WEAPON_TIERS[tier]),
        pos: Vec2::new(x, z as f32),
    });
    if id > 8 {
        let tier = ((id / 5) as usize).min(2);
        let x = random_lane(rng);
        let z = len * 0.65 + rng.random::<f64>() * len * 0.1;
        collectibles.push(CollectiblePlacement {
            kind: CollectibleKind::Weapon(WEAPON_TIERS[tier]),
            pos: Vec2::new(x, z as f32),
        });
    }

    // Enemies spread evenly over the first 65%
    let mut enemies = Vec::with_capacity(num_enemies);
    for i in 0..num_enemies {
        let z = 15.0 + (i as f64 / num_enemies as f64) * len * 0.65;
        let (kind, x) = if rng.random::<f64>() < RED_BOX_CHANCE {
            let x = random_lane(rng);
            let damage = (5.0 + id as f64 * 1.2 + rng.random::<f64>() * 5.0).floor() as u32;
            (EnemyKind::RedBox { damage }, x)
        } else {
            let x = random_lane(rng);
            let health = (20.0 + id as f64 * 8.0).floor() as u32;
            (EnemyKind::Zombie { health }, x)
        };
        enemies.push(EnemyPlacement {
            kind,
            pos: Vec2::new(x, z as f32),
        });
    }

    let gate_z = (len * 0.7) as f32;
    let gates = vec![
        GatePlacement {
            kind: GateKind::Multiply,
            pos: Vec2::new(-1.5, gate_z),
            value: 2,
        },
        GatePlacement {
            kind: GateKind::Add,
            pos: Vec2::new(1.5, gate_z),
            value: (5.0 + id as f64 * 1.5).floor() as u32,
        },
    ];

    let (kind, name) = BOSS_ROSTER[(id.saturating_sub(1) as usize) % BOSS_ROSTER.len()];
    log::debug!(
        "Generated stage {}: length={}, enemies={}, allies={}, coins={}",
        id,
        length,
        num_enemies,
        num_allies,
        num_coins
    );

    Stage {
        id,
        name: format!("Stage {id}"),
        length,
        enemies,
        collectibles,
        gates,
        boss: BossDescriptor {
            kind,
            name: name.to_string(),
            z: length - 5.0,
            health: boss_health(id),
        },
        reward_coins: 50 * id,
    }
}
