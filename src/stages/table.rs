//! Hand-authored stages 1-10

use glam::Vec2;

use super::{
    BossDescriptor, BossKind, CollectibleKind, CollectiblePlacement, EnemyKind, EnemyPlacement,
    GateKind, GatePlacement, Stage,
};
use crate::sim::Weapon;

/// Number of stages in the curated table
pub const CURATED_STAGE_COUNT: u32 = 10;

fn red_box(x: f32, z: f32, damage: u32) -> EnemyPlacement {
    EnemyPlacement {
        kind: EnemyKind::RedBox { damage },
        pos: Vec2::new(x, z),
    }
}

fn zombie(x: f32, z: f32, health: u32) -> EnemyPlacement {
    EnemyPlacement {
        kind: EnemyKind::Zombie { health },
        pos: Vec2::new(x, z),
    }
}

fn ally(x: f32, z: f32) -> CollectiblePlacement {
    CollectiblePlacement {
        kind: CollectibleKind::Ally,
        pos: Vec2::new(x, z),
    }
}

fn coin(x: f32, z: f32, value: u32) -> CollectiblePlacement {
    CollectiblePlacement {
        kind: CollectibleKind::Coin { value },
        pos: Vec2::new(x, z),
    }
}

fn weapon(x: f32, z: f32, weapon: Weapon) -> CollectiblePlacement {
    CollectiblePlacement {
        kind: CollectibleKind::Weapon(weapon),
        pos: Vec2::new(x, z),
    }
}

fn add_gate(z: f32, lane: f32, value: u32) -> GatePlacement {
    GatePlacement {
        kind: GateKind::Add,
        pos: Vec2::new(lane, z),
        value,
    }
}

fn multiply_gate(z: f32, lane: f32, value: u32) -> GatePlacement {
    GatePlacement {
        kind: GateKind::Multiply,
        pos: Vec2::new(lane, z),
        value,
    }
}

fn boss(kind: BossKind, name: &str, z: f32, health: u32) -> BossDescriptor {
    BossDescriptor {
        kind,
        name: name.to_string(),
        z,
        health,
    }
}

/// Curated stage by number, `None` past the table
pub(super) fn curated_stage(id: u32) -> Option<Stage> {
    let stage = match id {
        1 => Stage {
            id: 1,
            name: "First Challenge".into(),
            length: 100.0,
            enemies: vec![
                red_box(0.0, 25.0, 3),
                red_box(-2.0, 40.0, 5),
            ],
            collectibles: vec![
                ally(1.0, 10.0),
                ally(-1.0, 15.0),
                ally(0.0, 20.0),
                ally(2.0, 30.0),
                ally(-1.0, 35.0),
                coin(1.0, 18.0, 10),
                coin(-2.0, 28.0, 10),
                weapon(0.0, 45.0, Weapon::Gun),
            ],
            gates: vec![
                add_gate(55.0, -1.0, 5),
                multiply_gate(55.0, 1.5, 2),
            ],
            boss: boss(BossKind::ZombieBoss, "Zombie Captain", 95.0, 200),
            reward_coins: 100,
        },
        2 => Stage {
            id: 2,
            name: "Zombie Raid".into(),
            length: 120.0,
            enemies: vec![
                red_box(1.0, 25.0, 5),
                red_box(-1.0, 35.0, 8),
                red_box(0.0, 50.0, 6),
                zombie(2.0, 55.0, 30),
                zombie(-2.0, 60.0, 30),
            ],
            collectibles: vec![
                ally(0.0, 10.0),
                ally(1.0, 15.0),
                ally(-1.0, 20.0),
                ally(0.0, 30.0),
                ally(2.0, 40.0),
                ally(-2.0, 45.0),
                coin(0.0, 22.0, 10),
                coin(1.0, 42.0, 15),
                weapon(-1.0, 65.0, Weapon::Shotgun),
            ],
            gates: vec![
                multiply_gate(75.0, -1.5, 2),
                add_gate(75.0, 1.5, 8),
            ],
            boss: boss(BossKind::ZombieKing, "Zombie King", 115.0, 400),
            reward_coins: 150,
        },
        3 => Stage {
            id: 3,
            name: "Road of Fire".into(),
            length: 140.0,
            enemies: vec![
                red_box(-1.0, 20.0, 6),
                red_box(1.0, 30.0, 8),
                red_box(0.0, 45.0, 10),
                red_box(-2.0, 60.0, 7),
                zombie(1.0, 65.0, 40),
                zombie(-1.0, 70.0, 40),
                zombie(0.0, 80.0, 50),
            ],
            collectibles: vec![
                ally(0.0, 8.0),
                ally(1.0, 12.0),
                ally(-1.0, 16.0),
                ally(2.0, 25.0),
                ally(-2.0, 35.0),
                ally(0.0, 50.0),
                ally(1.0, 55.0),
                ally(-1.0, 75.0),
                coin(0.0, 28.0, 15),
                coin(2.0, 48.0, 20),
                coin(-1.0, 68.0, 15),
                weapon(0.0, 85.0, Weapon::Rocket),
            ],
            gates: vec![
                multiply_gate(90.0, -1.5, 2),
                add_gate(90.0, 1.5, 12),
            ],
            boss: boss(BossKind::FireDemon, "Fire Demon", 135.0, 700),
            reward_coins: 200,
        },
        4 => Stage {
            id: 4,
            name: "Valley of Darkness".into(),
            length: 150.0,
            enemies: vec![
                red_box(0.0, 18.0, 7),
                red_box(2.0, 28.0, 9),
                red_box(-2.0, 38.0, 11),
                red_box(1.0, 55.0, 8),
                red_box(-1.0, 65.0, 12),
                zombie(0.0, 75.0, 50),
                zombie(2.0, 80.0, 60),
                zombie(-2.0, 85.0, 55),
            ],
            collectibles: vec![
                ally(-1.0, 8.0),
                ally(1.0, 12.0),
                ally(0.0, 22.0),
                ally(-2.0, 32.0),
                ally(2.0, 42.0),
                ally(0.0, 50.0),
                ally(1.0, 60.0),
                ally(-1.0, 70.0),
                ally(0.0, 90.0),
                ally(2.0, 95.0),
                coin(1.0, 25.0, 15),
                coin(-1.0, 45.0, 20),
                coin(0.0, 72.0, 20),
                weapon(-1.0, 48.0, Weapon::Shotgun),
                weapon(1.0, 92.0, Weapon::Rocket),
            ],
            gates: vec![
                add_gate(100.0, -1.5, 10),
                multiply_gate(100.0, 1.5, 2),
            ],
            boss: boss(BossKind::ShadowLord, "Shadow Lord", 145.0, 1000),
            reward_coins: 300,
        },
        5 => Stage {
            id: 5,
            name: "Last Stand".into(),
            length: 170.0,
            enemies: vec![
                red_box(1.0, 15.0, 8),
                red_box(-1.0, 25.0, 10),
                red_box(0.0, 35.0, 12),
                red_box(2.0, 50.0, 9),
                red_box(-2.0, 60.0, 14),
                red_box(0.0, 75.0, 10),
                zombie(1.0, 80.0, 60),
                zombie(-1.0, 85.0, 70),
                zombie(0.0, 95.0, 80),
                zombie(2.0, 100.0, 60),
            ],
            collectibles: vec![
                ally(0.0, 8.0),
                ally(-1.0, 12.0),
                ally(1.0, 18.0),
                ally(-2.0, 22.0),
                ally(2.0, 30.0),
                ally(0.0, 40.0),
                ally(-1.0, 45.0),
                ally(1.0, 55.0),
                ally(0.0, 65.0),
                ally(-2.0, 70.0),
                ally(2.0, 90.0),
                ally(0.0, 105.0),
                coin(1.0, 20.0, 20),
                coin(-1.0, 42.0, 25),
                coin(0.0, 68.0, 25),
                coin(2.0, 92.0, 30),
                weapon(-1.0, 38.0, Weapon::Gun),
                weapon(0.0, 72.0, Weapon::Shotgun),
                weapon(1.0, 108.0, Weapon::Rocket),
            ],
            gates: vec![
                multiply_gate(115.0, -1.5, 2),
                add_gate(115.0, 1.5, 15),
                multiply_gate(130.0, 0.0, 2),
            ],
            boss: boss(BossKind::DragonKing, "Dragon King", 165.0, 1800),
            reward_coins: 500,
        },
        6 => Stage {
            id: 6,
            name: "Ice Kingdom".into(),
            length: 150.0,
            enemies: vec![
                red_box(0.0, 15.0, 10),
                red_box(2.0, 30.0, 12),
                red_box(-2.0, 45.0, 10),
                red_box(1.0, 60.0, 14),
                zombie(-1.0, 50.0, 70),
                zombie(0.0, 70.0, 80),
                zombie(2.0, 85.0, 70),
            ],
            collectibles: vec![
                ally(0.0, 8.0),
                ally(1.0, 14.0),
                ally(-1.0, 20.0),
                ally(2.0, 28.0),
                ally(-2.0, 38.0),
                ally(0.0, 48.0),
                ally(1.0, 58.0),
                ally(-1.0, 75.0),
                coin(0.0, 25.0, 20),
                coin(-1.0, 55.0, 25),
                weapon(1.0, 40.0, Weapon::Shotgun),
                weapon(-1.0, 90.0, Weapon::Rocket),
            ],
            gates: vec![
                multiply_gate(100.0, -1.5, 2),
                add_gate(100.0, 1.5, 12),
            ],
            boss: boss(BossKind::ShadowLord, "Ice Giant", 145.0, 2200),
            reward_coins: 600,
        },
        7 => Stage {
            id: 7,
            name: "Desert of Storms".into(),
            length: 160.0,
            enemies: vec![
                red_box(-1.0, 18.0, 11),
                red_box(1.0, 32.0, 13),
                red_box(0.0, 48.0, 15),
                red_box(-2.0, 65.0, 12),
                red_box(2.0, 78.0, 14),
                zombie(0.0, 55.0, 80),
                zombie(-1.0, 72.0, 90),
                zombie(1.0, 88.0, 85),
            ],
            collectibles: vec![
                ally(1.0, 8.0),
                ally(-1.0, 14.0),
                ally(0.0, 22.0),
                ally(2.0, 30.0),
                ally(-2.0, 40.0),
                ally(0.0, 52.0),
                ally(1.0, 62.0),
                ally(-1.0, 76.0),
                ally(0.0, 85.0),
                coin(-2.0, 28.0, 25),
                coin(2.0, 60.0, 30),
                weapon(0.0, 45.0, Weapon::Gun),
                weapon(-1.0, 95.0, Weapon::Rocket),
            ],
            gates: vec![
                add_gate(105.0, -1.5, 15),
                multiply_gate(105.0, 1.5, 2),
            ],
            boss: boss(BossKind::FireDemon, "Storm Fiend", 155.0, 2800),
            reward_coins: 700,
        },
        8 => Stage {
            id: 8,
            name: "Dungeon of Death".into(),
            length: 170.0,
            enemies: vec![
                red_box(0.0, 15.0, 12),
                red_box(-2.0, 28.0, 14),
                red_box(2.0, 42.0, 16),
                red_box(-1.0, 58.0, 13),
                red_box(1.0, 72.0, 15),
                red_box(0.0, 88.0, 18),
                zombie(1.0, 60.0, 90),
                zombie(-1.0, 78.0, 100),
                zombie(0.0, 95.0, 95),
            ],
            collectibles: vec![
                ally(-1.0, 8.0),
                ally(1.0, 14.0),
                ally(0.0, 20.0),
                ally(-2.0, 30.0),
                ally(2.0, 38.0),
                ally(0.0, 48.0),
                ally(1.0, 55.0),
                ally(-1.0, 68.0),
                ally(0.0, 82.0),
                ally(2.0, 92.0),
                coin(1.0, 25.0, 25),
                coin(-1.0, 50.0, 30),
                coin(0.0, 80.0, 30),
                weapon(-2.0, 35.0, Weapon::Shotgun),
                weapon(1.0, 100.0, Weapon::Rocket),
            ],
            gates: vec![
                multiply_gate(110.0, -1.5, 2),
                add_gate(110.0, 1.5, 18),
            ],
            boss: boss(BossKind::ZombieKing, "Death Knight", 165.0, 3500),
            reward_coins: 800,
        },
        9 => Stage {
            id: 9,
            name: "Gate of Chaos".into(),
            length: 180.0,
            enemies: vec![
                red_box(1.0, 15.0, 14),
                red_box(-1.0, 28.0, 16),
                red_box(0.0, 42.0, 18),
                red_box(2.0, 55.0, 14),
                red_box(-2.0, 68.0, 20),
                red_box(0.0, 82.0, 16),
                red_box(1.0, 98.0, 18),
                zombie(-1.0, 65.0, 100),
                zombie(0.0, 85.0, 110),
                zombie(2.0, 105.0, 100),
            ],
            collectibles: vec![
                ally(0.0, 8.0),
                ally(-1.0, 14.0),
                ally(1.0, 20.0),
                ally(-2.0, 28.0),
                ally(2.0, 35.0),
                ally(0.0, 45.0),
                ally(-1.0, 55.0),
                ally(1.0, 65.0),
                ally(0.0, 78.0),
                ally(2.0, 88.0),
                ally(-2.0, 100.0),
                coin(1.0, 22.0, 30),
                coin(-1.0, 52.0, 35),
                coin(0.0, 75.0, 35),
                coin(2.0, 95.0, 40),
                weapon(0.0, 38.0, Weapon::Shotgun),
                weapon(-1.0, 90.0, Weapon::Rocket),
            ],
            gates: vec![
                multiply_gate(120.0, -1.5, 2),
                add_gate(120.0, 1.5, 20),
                multiply_gate(140.0, 0.0, 2),
            ],
            boss: boss(BossKind::ShadowLord, "Lord of Chaos", 175.0, 4500),
            reward_coins: 1000,
        },
        10 => Stage {
            id: 10,
            name: "Final Battle".into(),
            length: 200.0,
            enemies: vec![
                red_box(0.0, 15.0, 15),
                red_box(-2.0, 25.0, 18),
                red_box(2.0, 35.0, 20),
                red_box(-1.0, 48.0, 16),
                red_box(1.0, 60.0, 22),
                red_box(0.0, 75.0, 18),
                red_box(-2.0, 90.0, 20),
                red_box(2.0, 105.0, 25),
                zombie(-1.0, 55.0, 110),
                zombie(1.0, 70.0, 120),
                zombie(0.0, 88.0, 130),
                zombie(-2.0, 108.0, 120),
            ],
            collectibles: vec![
                ally(0.0, 8.0),
                ally(-1.0, 12.0),
                ally(1.0, 18.0),
                ally(-2.0, 24.0),
                ally(2.0, 30.0),
                ally(0.0, 40.0),
                ally(-1.0, 48.0),
                ally(1.0, 56.0),
                ally(0.0, 65.0),
                ally(-2.0, 72.0),
                ally(2.0, 82.0),
                ally(0.0, 95.0),
                ally(-1.0, 110.0),
                ally(1.0, 118.0),
                coin(1.0, 20.0, 30),
                coin(-1.0, 45.0, 40),
                coin(0.0, 68.0, 40),
                coin(2.0, 92.0, 50),
                coin(-2.0, 115.0, 50),
                weapon(0.0, 32.0, Weapon::Gun),
                weapon(-1.0, 78.0, Weapon::Shotgun),
                weapon(1.0, 120.0, Weapon::Rocket),
            ],
            gates: vec![
                multiply_gate(130.0, -1.5, 2),
                add_gate(130.0, 1.5, 20),
                multiply_gate(155.0, -1.5, 2),
                add_gate(155.0, 1.5, 25),
            ],
            boss: boss(BossKind::DragonKing, "Final Boss - Dragon King of Ruin", 195.0, 6000),
            reward_coins: 2000,
        },
        _ => return None,
    };
    Some(stage)
}
