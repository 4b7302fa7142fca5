//! Effect events emitted by the simulation for the host.
//!
//! The simulation never touches rendering or audio. Everything the player
//! should see or hear goes out as one of these, in emission order.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::reward::StageReward;
use super::state::{EntityId, Weapon};
use crate::stages::BossKind;

/// Named sound cues (synthesis is the host's business)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SoundEffect {
    Coin,
    AllyPickup,
    Hit,
    Weapon,
    Gate,
    BossHit,
    Victory,
    Fail,
    Click,
    Upgrade,
    Shoot,
}

/// What a visual should look like when spawned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntityKind {
    Player,
    RedBox,
    Zombie,
    AllyPickup,
    Coin,
    Weapon(Weapon),
    AddGate,
    MultiplyGate,
    Boss(BossKind),
}

/// Floating number styling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DamageStyle {
    Damage,
    Heal,
    Coin,
}

/// Particle burst flavors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BurstKind {
    /// Zombie finished by auto-attack
    Kill,
    /// Contact with a red box
    Impact,
    /// Contact with a live zombie
    Bite,
    Ally,
    Coin,
    Weapon,
    Gate,
    BossDefeat,
}

/// How a run ended
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum RunOutcome {
    /// Stage cleared
    Victory(StageReward),
    /// Final stage cleared (roll credits)
    Ending(StageReward),
    /// Squad wiped out
    Fail { message: String },
}

impl RunOutcome {
    pub fn reward(&self) -> Option<&StageReward> {
        match self {
            RunOutcome::Victory(r) | RunOutcome::Ending(r) => Some(r),
            RunOutcome::Fail { .. } => None,
        }
    }
}

/// Events the simulation emits during `update`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GameEvent {
    /// Create a visual for an entity
    SpawnVisual {
        entity: EntityId,
        kind: EntityKind,
        pos: Vec2,
    },
    /// Reposition an entity's visual
    MoveVisual { entity: EntityId, pos: Vec2 },
    /// Fade a used gate
    DimVisual { entity: EntityId },
    /// Brief hit flash on a zombie or the boss
    Flash { entity: EntityId },
    /// Destroy an entity's visual
    RemoveVisual { entity: EntityId },
    PlaySound { sound: SoundEffect },
    /// Floating text ("-3", "+5")
    DamageNumber {
        pos: Vec2,
        text: String,
        style: DamageStyle,
    },
    Burst {
        pos: Vec2,
        kind: BurstKind,
        count: u32,
    },
    /// Tracer shots from the squad toward a target
    Volley { from: Vec2, to: Vec2, shots: u32 },
    ScreenShake { intensity: f32, duration: f32 },
    HudUpdate { allies: u32, progress_percent: f32 },
    BossHudUpdate { name: String, health_percent: f32 },
    /// The run is over; nothing follows this
    Terminal { outcome: RunOutcome },
}

impl GameEvent {
    pub fn sound(sound: SoundEffect) -> Self {
        GameEvent::PlaySound { sound }
    }

    pub fn shake(intensity: f32, duration: f32) -> Self {
        GameEvent::ScreenShake {
            intensity,
            duration,
        }
    }

    pub fn number(pos: Vec2, text: impl Into<String>, style: DamageStyle) -> Self {
        GameEvent::DamageNumber {
            pos,
            text: text.into(),
            style,
        }
    }

    pub fn burst(pos: Vec2, kind: BurstKind, count: u32) -> Self {
        GameEvent::Burst { pos, kind, count }
    }
}
