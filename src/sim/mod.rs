//! Deterministic run simulation
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Time only advances through `RunSimulation::update`
//! - Randomness only enters through the stage generator's injected RNG
//! - Stable iteration order (registration order of entities)
//! - No rendering, audio or storage; effects leave as `GameEvent`s

pub mod autopilot;
pub mod collision;
pub mod combat;
pub mod events;
pub mod registry;
pub mod reward;
pub mod state;
pub mod tick;

pub use autopilot::suggest_lateral_target;
pub use events::{BurstKind, DamageStyle, EntityKind, GameEvent, RunOutcome, SoundEffect};
pub use registry::EntityRegistry;
pub use reward::StageReward;
pub use state::{EntityId, RunPhase, RunState, Weapon};
pub use tick::{FAIL_MESSAGE, RunSimulation};
