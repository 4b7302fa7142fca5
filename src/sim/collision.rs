//! Proximity tests between the squad and road entities
//!
//! Everything on the road is an axis-aligned box around its position; the
//! squad is a point. Windows are strict (`<`), so touching the exact edge
//! does not count.

use glam::Vec2;

/// Half-extents of a proximity box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximityWindow {
    /// Lateral half-width (x)
    pub lateral: f32,
    /// Forward half-depth (z)
    pub forward: f32,
}

impl ProximityWindow {
    pub const fn new(lateral: f32, forward: f32) -> Self {
        Self { lateral, forward }
    }

    /// Is the squad at `player` inside the box centered on `entity`?
    #[inline]
    pub fn contains(&self, player: Vec2, entity: Vec2) -> bool {
        (player.x - entity.x).abs() < self.lateral && (player.y - entity.y).abs() < self.forward
    }
}

/// Red boxes and zombies deal contact damage inside this box
pub const OBSTACLE_CONTACT: ProximityWindow = ProximityWindow::new(1.0, 0.8);
/// Ally, coin and weapon pickups
pub const COLLECTIBLE_PICKUP: ProximityWindow = ProximityWindow::new(1.5, 1.5);
/// Gates
pub const GATE_PASS: ProximityWindow = ProximityWindow::new(1.5, 1.0);

/// How far ahead auto-attack reaches
pub const ATTACK_RANGE: f32 = 10.0;
/// Lateral half-width of the auto-attack cone
pub const ATTACK_HALF_WIDTH: f32 = 3.0;

/// Zombie strictly ahead of the squad, within range and roughly in lane
#[inline]
pub fn in_attack_cone(player: Vec2, target: Vec2) -> bool {
    let dx = player.x - target.x;
    let dz = player.y - target.y;
    dz < 0.0 && dz > -ATTACK_RANGE && dx.abs() < ATTACK_HALF_WIDTH
}
