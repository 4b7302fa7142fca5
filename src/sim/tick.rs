//! Run simulation
//!
//! `RunSimulation` owns one attempt at a stage. The host calls `update` once
//! per rendered frame and drains the effect events afterwards. All cadences
//! are accumulators advanced by the (clamped) frame delta, so a fixed dt
//! sequence always replays the same run.

use rand::Rng;

use super::combat::{self, ExchangeResult};
use super::events::{BurstKind, EntityKind, GameEvent, RunOutcome, SoundEffect};
use super::registry::EntityRegistry;
use super::reward::{compute_reward, outcome_for};
use super::state::{EntityId, RunPhase, RunState};
use crate::clamp_lane;
use crate::error::ConfigError;
use crate::persistence::ProgressData;
use crate::stages::{Stage, get_stage};
use crate::tuning::Tuning;
use crate::upgrades::Loadout;

/// Terminal message when the squad is wiped out
pub const FAIL_MESSAGE: &str = "All allies have fallen!";

/// One live run of a stage
#[derive(Debug, Clone)]
pub struct RunSimulation {
    stage: Stage,
    tuning: Tuning,
    state: RunState,
    registry: EntityRegistry,
    /// Pending effect events, in emission order
    events: Vec<GameEvent>,
    /// Set once, together with the terminal event
    outcome: Option<RunOutcome>,
    /// Seconds spent in the boss fight
    boss_fight_time: f32,
    /// Boss exchanges resolved so far
    exchanges: u32,
}

impl RunSimulation {
    /// Start a run on an already resolved stage
    pub fn new(stage: Stage, loadout: Loadout, tuning: Tuning) -> Result<Self, ConfigError> {
        tuning.validate()?;
        let state = RunState::new(loadout, tuning.forward_speed);
        let registry = EntityRegistry::from_stage(&stage);

        let mut events = vec![GameEvent::SpawnVisual {
            entity: EntityId::PLAYER,
            kind: EntityKind::Player,
            pos: state.pos(),
        }];
        registry.spawn_events(&mut events);
        events.push(GameEvent::HudUpdate {
            allies: state.allies,
            progress_percent: 0.0,
        });

        log::info!(
            "Run created: stage {} \"{}\" (length {}, {} allies, attack {:.1})",
            stage.id,
            stage.name,
            stage.length,
            state.allies,
            state.attack_power
        );

        Ok(Self {
            stage,
            tuning,
            state,
            registry,
            events,
            outcome: None,
            boss_fight_time: 0.0,
            exchanges: 0,
        })
    }

    /// Look up the stage and derive the loadout from saved progress
    pub fn create<R: Rng + ?Sized>(
        stage_id: u32,
        progress: &ProgressData,
        tuning: Tuning,
        rng: &mut R,
    ) -> Result<Self, ConfigError> {
        let stage = get_stage(stage_id, rng)?;
        Self::new(stage, progress.loadout(), tuning)
    }

    /// Steering input. Non-finite values are ignored.
    pub fn set_lateral_target(&mut self, target: f32) {
        if !target.is_finite() {
            return;
        }
        self.state.lateral_target = clamp_lane(target, self.tuning.lane_limit);
    }

    /// Advance the run by one frame
    pub fn update(&mut self, dt: f32) {
        if self.is_finished() || !dt.is_finite() || dt <= 0.0 {
            return;
        }
        let dt = dt.min(self.tuning.max_frame_dt);

        match self.state.phase {
            RunPhase::Running => self.tick_running(dt),
            RunPhase::BossFight => self.tick_boss(dt),
            RunPhase::Victory | RunPhase::Fail => {}
        }

        if self.state.phase == RunPhase::Fail {
            self.finish_fail();
        }
    }

    fn tick_running(&mut self, dt: f32) {
        let state = &mut self.state;
        state.forward += state.forward_speed * dt;
        let gap = state.lateral_target - state.lateral;
        state.lateral = clamp_lane(
            state.lateral + gap * self.tuning.lateral_ease_rate * dt,
            self.tuning.lane_limit,
        );
        self.events.push(GameEvent::MoveVisual {
            entity: EntityId::PLAYER,
            pos: state.pos(),
        });

        state.auto_attack_timer += dt;
        if state.auto_attack_timer >= self.tuning.auto_attack_interval {
            state.auto_attack_timer = 0.0;
            combat::auto_attack(
                state,
                &mut self.registry,
                self.tuning.kill_bonus_coins,
                &mut self.events,
            );
        }

        combat::resolve_contacts(state, &mut self.registry, &mut self.events);
        if !state.phase.is_terminal() {
            combat::resolve_collectibles(state, &mut self.registry, &mut self.events);
            combat::resolve_gates(state, &mut self.registry, &mut self.events);

            let trigger = self.stage.boss_trigger_z(self.tuning.boss_trigger_distance);
            if state.forward >= trigger {
                self.start_boss_fight();
            }
        }

        self.push_hud();
    }

    fn start_boss_fight(&mut self) {
        if !self.state.enter(RunPhase::BossFight) {
            return;
        }
        self.state.forward_speed = 0.0;
        self.registry.boss.attack_timer = 0.0;
        log::info!(
            "Boss fight: {} ({} hp) vs {} allies at z={:.2}",
            self.registry.boss.name,
            self.registry.boss.current_health,
            self.state.allies,
            self.state.forward
        );
        self.events.push(GameEvent::BossHudUpdate {
            name: self.registry.boss.name.clone(),
            health_percent: self.registry.boss.health_percent(),
        });
    }

    fn tick_boss(&mut self, dt: f32) {
        self.boss_fight_time += dt;
        let boss = &mut self.registry.boss;
        boss.attack_timer += dt;
        if boss.attack_timer < self.tuning.boss_exchange_interval {
            return;
        }
        boss.attack_timer = 0.0;
        self.exchanges += 1;

        let result = combat::boss_exchange(&mut self.state, boss, self.stage.id, &mut self.events);
        self.push_hud();
        if result == ExchangeResult::BossDefeated {
            self.finish_victory();
        }
    }

    fn finish_victory(&mut self) {
        if !self.state.enter(RunPhase::Victory) {
            return;
        }
        let boss = &self.registry.boss;
        self.events
            .push(GameEvent::burst(boss.pos, BurstKind::BossDefeat, 30));
        self.events.push(GameEvent::RemoveVisual { entity: boss.id });
        self.events.push(GameEvent::sound(SoundEffect::Victory));
        self.events.push(GameEvent::shake(0.5, 0.4));

        let reward = compute_reward(
            self.stage.reward_coins,
            self.state.coins_collected,
            self.state.loadout.coin_bonus,
            self.state.allies,
            self.state.start_allies,
        );
        log::info!(
            "Stage {} cleared after {} exchanges: {} coins, {} stars ({}/{} allies)",
            self.stage.id,
            self.exchanges,
            reward.total_coins,
            reward.stars,
            reward.surviving_allies,
            reward.start_allies
        );
        self.finish(outcome_for(self.stage.id, reward));
    }

    fn finish_fail(&mut self) {
        if self.outcome.is_some() {
            return;
        }
        log::info!(
            "Stage {} failed at z={:.2} ({:?})",
            self.stage.id,
            self.state.forward,
            self.state.phase
        );
        self.events.push(GameEvent::sound(SoundEffect::Fail));
        self.events.push(GameEvent::shake(0.6, 0.5));
        self.finish(RunOutcome::Fail {
            message: FAIL_MESSAGE.to_string(),
        });
    }

    fn finish(&mut self, outcome: RunOutcome) {
        self.events.push(GameEvent::Terminal {
            outcome: outcome.clone(),
        });
        self.outcome = Some(outcome);
    }

    fn push_hud(&mut self) {
        self.events.push(GameEvent::HudUpdate {
            allies: self.state.allies,
            progress_percent: self.progress_percent(),
        });
    }

    /// Take all events emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Abandon (or close) the run. Returns removal events for every visual
    /// still alive; undrained events are dropped.
    pub fn destroy(self) -> Vec<GameEvent> {
        log::info!(
            "Run on stage {} destroyed in phase {:?}",
            self.stage.id,
            self.state.phase
        );
        std::iter::once(EntityId::PLAYER)
            .chain(self.registry.live_visuals())
            .map(|entity| GameEvent::RemoveVisual { entity })
            .collect()
    }

    /// Road progress for the HUD, 0-100
    pub fn progress_percent(&self) -> f32 {
        if self.stage.length <= 0.0 {
            return 100.0;
        }
        (self.state.forward / self.stage.length * 100.0).min(100.0)
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn phase(&self) -> RunPhase {
        self.state.phase
    }

    pub fn allies(&self) -> u32 {
        self.state.allies
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn outcome(&self) -> Option<&RunOutcome> {
        self.outcome.as_ref()
    }

    pub fn boss_fight_time(&self) -> f32 {
        self.boss_fight_time
    }

    pub fn exchanges(&self) -> u32 {
        self.exchanges
    }
}
