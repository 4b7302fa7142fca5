//! Demo steering
//!
//! Picks a lateral target from what is on the road ahead: the better gate
//! first, then the nearest useful pickup, then sidestep anything that would
//! cost allies. Used by the headless runner and the idle/demo mode.

use glam::Vec2;

use super::registry::{Collectible, Gate};
use super::state::RunState;
use super::tick::RunSimulation;
use crate::clamp_lane;
use crate::consts::MAX_ALLIES;
use crate::stages::{CollectibleKind, GateKind};

/// How far ahead the autopilot plans (units)
const LOOKAHEAD: f32 = 12.0;
/// Obstacles closer than this get dodged
const DODGE_AHEAD: f32 = 6.0;
/// Lateral gap kept from obstacle centers (contact half-width is 1.0)
const DODGE_CLEARANCE: f32 = 1.4;
/// Gates within this forward distance of each other form one row
const GATE_ROW: f32 = 0.5;

/// Allies a gate would actually add right now
fn gate_yield(gate: &Gate, allies: u32) -> u32 {
    let after = match gate.kind {
        GateKind::Add => allies.saturating_add(gate.value),
        GateKind::Multiply => allies.saturating_mul(gate.value),
    };
    after.min(MAX_ALLIES).saturating_sub(allies)
}

fn is_useful(item: &Collectible, state: &RunState) -> bool {
    match item.kind {
        CollectibleKind::Weapon(w) => w.base_multiplier() > state.weapon.base_multiplier(),
        CollectibleKind::Ally | CollectibleKind::Coin { .. } => true,
    }
}

/// Suggested steering target for the current frame
pub fn suggest_lateral_target(sim: &RunSimulation) -> f32 {
    let state = sim.state();
    let registry = sim.registry();
    let limit = sim.tuning().lane_limit;
    let player = state.pos();
    let ahead = |pos: Vec2, range: f32| pos.y > player.y && pos.y - player.y < range;

    // Best gate in the nearest row ahead
    let row = registry
        .gates
        .iter()
        .filter(|g| !g.consumed && ahead(g.pos, LOOKAHEAD))
        .map(|g| g.pos.y)
        .reduce(f32::min);
    let gate_target = row.and_then(|z| {
        registry
            .gates
            .iter()
            .filter(|g| !g.consumed && (g.pos.y - z).abs() < GATE_ROW)
            .max_by_key(|g| gate_yield(g, state.allies))
            .map(|g| g.pos.x)
    });

    let pickup_target = || {
        registry
            .collectibles
            .iter()
            .filter(|c| !c.consumed && ahead(c.pos, LOOKAHEAD) && is_useful(c, state))
            .min_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            .map(|c| c.pos.x)
    };

    let mut target = gate_target
        .or_else(pickup_target)
        .unwrap_or(state.lateral_target);

    // Sidestep, nearest threat first
    let mut threats: Vec<Vec2> = registry
        .obstacles
        .iter()
        .filter(|o| !o.consumed && ahead(o.pos, DODGE_AHEAD))
        .map(|o| o.pos)
        .collect();
    threats.sort_by(|a, b| a.y.total_cmp(&b.y));
    for threat in threats {
        if (target - threat.x).abs() >= DODGE_CLEARANCE {
            continue;
        }
        let left = threat.x - DODGE_CLEARANCE;
        let right = threat.x + DODGE_CLEARANCE;
        target = match (left >= -limit, right <= limit) {
            (true, true) if (left - target).abs() <= (right - target).abs() => left,
            (true, true) => right,
            (true, false) => left,
            (false, _) => right,
        };
    }

    clamp_lane(target, limit)
}
