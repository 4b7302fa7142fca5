//! Live entities of the active stage
//!
//! Each placement in the stage descriptor becomes one live entity with a
//! `consumed` flag. Once consumed an entity is inert: queries skip it and it
//! can never pay out or hurt again. Iteration is in registration order
//! (descriptor order), which is also the tie-break when several entities
//! qualify in the same tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{COLLECTIBLE_PICKUP, GATE_PASS, OBSTACLE_CONTACT, in_attack_cone};
use super::events::{EntityKind, GameEvent};
use super::state::EntityId;
use crate::stages::{BossKind, CollectibleKind, EnemyKind, GateKind, Stage};

/// Flip a consumed flag. Returns false (and logs) if it was already set.
fn mark_consumed(consumed: &mut bool, id: EntityId) -> bool {
    if *consumed {
        log::error!("Entity {:?} resolved twice; ignoring", id);
        debug_assert!(false, "entity {id:?} resolved after being consumed");
        return false;
    }
    *consumed = true;
    true
}

/// Red box or zombie
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: EntityId,
    pub kind: EnemyKind,
    pub pos: Vec2,
    /// Zombie health, materialized on first engagement only
    pub current_health: Option<i64>,
    pub consumed: bool,
}

impl Obstacle {
    pub fn is_zombie(&self) -> bool {
        matches!(self.kind, EnemyKind::Zombie { .. })
    }

    /// Zombie health, initializing it from the descriptor on first use.
    /// Red boxes have no health and return `None`.
    pub fn engage(&mut self) -> Option<&mut i64> {
        match self.kind {
            EnemyKind::Zombie { health } => Some(self.current_health.get_or_insert(health as i64)),
            EnemyKind::RedBox { .. } => None,
        }
    }

    pub fn consume(&mut self) -> bool {
        mark_consumed(&mut self.consumed, self.id)
    }

    fn visual_kind(&self) -> EntityKind {
        match self.kind {
            EnemyKind::RedBox { .. } => EntityKind::RedBox,
            EnemyKind::Zombie { .. } => EntityKind::Zombie,
        }
    }
}

/// Ally, coin or weapon pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collectible {
    pub id: EntityId,
    pub kind: CollectibleKind,
    pub pos: Vec2,
    pub consumed: bool,
}

impl Collectible {
    pub fn consume(&mut self) -> bool {
        mark_consumed(&mut self.consumed, self.id)
    }

    fn visual_kind(&self) -> EntityKind {
        match self.kind {
            CollectibleKind::Ally => EntityKind::AllyPickup,
            CollectibleKind::Coin { .. } => EntityKind::Coin,
            CollectibleKind::Weapon(w) => EntityKind::Weapon(w),
        }
    }
}

/// One-shot add/multiply gate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gate {
    pub id: EntityId,
    pub kind: GateKind,
    pub pos: Vec2,
    pub value: u32,
    pub consumed: bool,
}

impl Gate {
    pub fn consume(&mut self) -> bool {
        mark_consumed(&mut self.consumed, self.id)
    }

    fn visual_kind(&self) -> EntityKind {
        match self.kind {
            GateKind::Add => EntityKind::AddGate,
            GateKind::Multiply => EntityKind::MultiplyGate,
        }
    }
}

/// Boss runtime state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boss {
    pub id: EntityId,
    pub kind: BossKind,
    pub name: String,
    pub pos: Vec2,
    pub max_health: i64,
    pub current_health: i64,
    /// Seconds accumulated toward the next exchange
    pub attack_timer: f32,
    pub defeated: bool,
}

impl Boss {
    /// Remaining health for the HUD, 0-100
    pub fn health_percent(&self) -> f32 {
        if self.max_health <= 0 {
            return 0.0;
        }
        (self.current_health.max(0) as f64 / self.max_health as f64 * 100.0) as f32
    }
}

/// All live entities for one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityRegistry {
    pub obstacles: Vec<Obstacle>,
    pub collectibles: Vec<Collectible>,
    pub gates: Vec<Gate>,
    pub boss: Boss,
    /// Next entity ID
    next_id: u32,
}

impl EntityRegistry {
    /// Instantiate every placement of a stage. Ids start after the player's.
    pub fn from_stage(stage: &Stage) -> Self {
        let mut next_id = EntityId::PLAYER.0 + 1;
        let mut alloc = || {
            let id = EntityId(next_id);
            next_id += 1;
            id
        };

        let obstacles = stage
            .enemies
            .iter()
            .map(|e| Obstacle {
                id: alloc(),
                kind: e.kind,
                pos: e.pos,
                current_health: None,
                consumed: false,
            })
            .collect();
        let collectibles = stage
            .collectibles
            .iter()
            .map(|c| Collectible {
                id: alloc(),
                kind: c.kind,
                pos: c.pos,
                consumed: false,
            })
            .collect();
        let gates = stage
            .gates
            .iter()
            .map(|g| Gate {
                id: alloc(),
                kind: g.kind,
                pos: g.pos,
                value: g.value,
                consumed: false,
            })
            .collect();
        let boss = Boss {
            id: alloc(),
            kind: stage.boss.kind,
            name: stage.boss.name.clone(),
            pos: Vec2::new(0.0, stage.boss.z),
            max_health: stage.boss.health as i64,
            current_health: stage.boss.health as i64,
            attack_timer: 0.0,
            defeated: false,
        };

        Self {
            obstacles,
            collectibles,
            gates,
            boss,
            next_id,
        }
    }

    /// Number of ids handed out (player included)
    pub fn entity_count(&self) -> u32 {
        self.next_id
    }

    /// Obstacles whose contact box holds the squad
    pub fn contact_obstacles(&self, player: Vec2) -> Vec<usize> {
        self.obstacles
            .iter()
            .enumerate()
            .filter(|(_, o)| !o.consumed && OBSTACLE_CONTACT.contains(player, o.pos))
            .map(|(i, _)| i)
            .collect()
    }

    /// Pickups the squad is touching
    pub fn touched_collectibles(&self, player: Vec2) -> Vec<usize> {
        self.collectibles
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.consumed && COLLECTIBLE_PICKUP.contains(player, c.pos))
            .map(|(i, _)| i)
            .collect()
    }

    /// Gates the squad is passing through
    pub fn touched_gates(&self, player: Vec2) -> Vec<usize> {
        self.gates
            .iter()
            .enumerate()
            .filter(|(_, g)| !g.consumed && GATE_PASS.contains(player, g.pos))
            .map(|(i, _)| i)
            .collect()
    }

    /// First live zombie (registration order) in the auto-attack cone
    pub fn attack_target(&self, player: Vec2) -> Option<usize> {
        self.obstacles
            .iter()
            .position(|o| !o.consumed && o.is_zombie() && in_attack_cone(player, o.pos))
    }

    /// Spawn events for every entity, boss last
    pub fn spawn_events(&self, events: &mut Vec<GameEvent>) {
        let spawn = |entity, kind, pos| GameEvent::SpawnVisual { entity, kind, pos };
        events.extend(self.obstacles.iter().map(|o| spawn(o.id, o.visual_kind(), o.pos)));
        events.extend(
            self.collectibles
                .iter()
                .map(|c| spawn(c.id, c.visual_kind(), c.pos)),
        );
        events.extend(self.gates.iter().map(|g| spawn(g.id, g.visual_kind(), g.pos)));
        events.push(spawn(
            self.boss.id,
            EntityKind::Boss(self.boss.kind),
            self.boss.pos,
        ));
    }

    /// Entities that still have a visual on screen. Used gates stay (dimmed).
    pub fn live_visuals(&self) -> Vec<EntityId> {
        let mut ids: Vec<EntityId> = self
            .obstacles
            .iter()
            .filter(|o| !o.consumed)
            .map(|o| o.id)
            .chain(self.collectibles.iter().filter(|c| !c.consumed).map(|c| c.id))
            .chain(self.gates.iter().map(|g| g.id))
            .collect();
        if !self.boss.defeated {
            ids.push(self.boss.id);
        }
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stages::get_stage;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn stage_two() -> EntityRegistry {
        let mut rng = Pcg32::seed_from_u64(1);
        EntityRegistry::from_stage(&get_stage(2, &mut rng).unwrap())
    }

    #[test]
    fn test_ids_are_unique_and_skip_player() {
        let registry = stage_two();
        let mut ids = registry.live_visuals();
        assert!(!ids.contains(&EntityId::PLAYER));
        let n = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), n);
        // 5 enemies + 9 collectibles + 2 gates + boss, plus the player
        assert_eq!(registry.entity_count(), 18);
    }

    #[test]
    fn test_zombie_health_is_lazy() {
        let mut registry = stage_two();
        let zombie = registry.obstacles.iter_mut().find(|o| o.is_zombie()).unwrap();
        assert_eq!(zombie.current_health, None);
        *zombie.engage().unwrap() -= 12;
        assert_eq!(zombie.current_health, Some(18));
        // Second engage keeps the damaged value
        assert_eq!(zombie.engage().copied(), Some(18));

        let red_box = registry.obstacles.iter_mut().find(|o| !o.is_zombie()).unwrap();
        assert!(red_box.engage().is_none());
        assert_eq!(red_box.current_health, None);
    }

    #[test]
    fn test_consumed_entities_drop_out_of_queries() {
        let mut registry = stage_two();
        // Red box at (1, 25)
        let player = Vec2::new(1.0, 25.0);
        assert_eq!(registry.contact_obstacles(player), vec![0]);
        assert!(registry.obstacles[0].consume());
        assert!(registry.contact_obstacles(player).is_empty());
        assert!(!registry.live_visuals().contains(&registry.obstacles[0].id));
    }

    #[test]
    fn test_attack_target_is_first_registered() {
        let registry = stage_two();
        // Zombie at (2, 55) is in the cone from (0, 50); (-2, 60) sits on the range edge
        let target = registry.attack_target(Vec2::new(0.0, 50.0)).unwrap();
        assert_eq!(registry.obstacles[target].pos, Vec2::new(2.0, 55.0));
        // Zombies past range
        assert!(registry.attack_target(Vec2::new(0.0, 40.0)).is_none());
    }

    #[test]
    fn test_multiple_pickups_resolve_in_order() {
        let registry = stage_two();
        // Ally at (-1, 20) and coin at (0, 22) are both in reach
        let touched = registry.touched_collectibles(Vec2::new(0.0, 21.0));
        let kinds: Vec<_> = touched.iter().map(|&i| registry.collectibles[i].kind).collect();
        assert_eq!(kinds, vec![CollectibleKind::Ally, CollectibleKind::Coin { value: 10 }]);
    }

    #[test]
    fn test_gates_stay_visible_after_use() {
        let mut registry = stage_two();
        assert!(registry.gates[0].consume());
        assert!(registry.live_visuals().contains(&registry.gates[0].id));
        registry.boss.defeated = true;
        assert!(!registry.live_visuals().contains(&registry.boss.id));
    }
}
