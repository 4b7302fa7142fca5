//! wasm-bindgen surface for the browser host
//!
//! The page owns rendering, audio and input. It creates a `WebRun`, feeds it
//! frame deltas and steering, and applies the JSON event batches it drains.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::error::PurchaseError;
use crate::persistence::ProgressData;
use crate::settings::Settings;
use crate::sim::{RunOutcome, RunSimulation, suggest_lateral_target};
use crate::stages::stage_id_from_f64;
use crate::tuning::Tuning;
use crate::upgrades::UpgradeTrack;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Crowd Runner core loaded");
}

/// One row of the upgrade shop
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ShopEntry {
    key: &'static str,
    name: &'static str,
    level: u32,
    max_level: u32,
    next_cost: Option<u64>,
    description: String,
}

fn track_from_key(key: &str) -> Result<UpgradeTrack, JsError> {
    UpgradeTrack::from_key(key).ok_or_else(|| JsError::new(&format!("unknown upgrade: {key}")))
}

/// A run handle owned by the page
#[wasm_bindgen]
pub struct WebRun {
    sim: Option<RunSimulation>,
    settings: Settings,
    /// Let the autopilot steer (idle/demo mode)
    idle_mode: bool,
}

#[wasm_bindgen]
impl WebRun {
    #[wasm_bindgen(constructor)]
    pub fn new(stage_id: f64) -> Result<WebRun, JsError> {
        let stage_id = stage_id_from_f64(stage_id)?;
        let progress = ProgressData::load();
        let mut rng = Pcg32::try_from_os_rng()
            .unwrap_or_else(|_| Pcg32::seed_from_u64(js_sys::Date::now() as u64));
        let sim = RunSimulation::create(stage_id, &progress, Tuning::default(), &mut rng)?;
        Ok(WebRun {
            sim: Some(sim),
            settings: Settings::load(),
            idle_mode: false,
        })
    }

    /// Advance one frame (seconds). Banks the reward when the run is won.
    pub fn update(&mut self, dt: f32) {
        let Some(sim) = self.sim.as_mut() else {
            return;
        };
        if self.idle_mode {
            sim.set_lateral_target(suggest_lateral_target(sim));
        }
        let was_finished = sim.is_finished();
        sim.update(dt);
        if was_finished {
            return;
        }
        if let Some(reward) = sim.outcome().and_then(RunOutcome::reward) {
            ProgressData::update_saved(|progress| progress.record_victory(reward));
        }
    }

    #[wasm_bindgen(js_name = setLateralTarget)]
    pub fn set_lateral_target(&mut self, x: f32) {
        if let Some(sim) = self.sim.as_mut() {
            sim.set_lateral_target(x);
        }
    }

    #[wasm_bindgen(js_name = setIdleMode)]
    pub fn set_idle_mode(&mut self, enabled: bool) {
        log::info!("Idle mode: {}", enabled);
        self.idle_mode = enabled;
    }

    /// Pending events as a JSON array, minus what the settings mute
    #[wasm_bindgen(js_name = drainEvents)]
    pub fn drain_events(&mut self) -> Result<String, JsError> {
        let events = match self.sim.as_mut() {
            Some(sim) => self.settings.filter(sim.drain_events()),
            None => Vec::new(),
        };
        Ok(serde_json::to_string(&events)?)
    }

    #[wasm_bindgen(js_name = isFinished)]
    pub fn is_finished(&self) -> bool {
        self.sim.as_ref().is_none_or(RunSimulation::is_finished)
    }

    /// End the run. Returns the removal events for every live visual.
    pub fn destroy(&mut self) -> Result<String, JsError> {
        let events = self.sim.take().map(RunSimulation::destroy).unwrap_or_default();
        Ok(serde_json::to_string(&events)?)
    }

    #[wasm_bindgen(js_name = toggleSound)]
    pub fn toggle_sound(&mut self) -> bool {
        let enabled = self.settings.toggle_sound();
        self.settings.save();
        enabled
    }

    /// Saved progress as JSON
    #[wasm_bindgen(js_name = progressJson)]
    pub fn progress_json() -> Result<String, JsError> {
        Ok(ProgressData::load().to_json()?)
    }

    /// Upgrade shop rows as JSON
    #[wasm_bindgen(js_name = shopJson)]
    pub fn shop_json() -> Result<String, JsError> {
        let progress = ProgressData::load();
        let entries: Vec<ShopEntry> = UpgradeTrack::ALL
            .iter()
            .map(|&track| {
                let level = progress.upgrades.level(track);
                ShopEntry {
                    key: track.key(),
                    name: track.name(),
                    level,
                    max_level: track.max_level(),
                    next_cost: progress.upgrades.next_cost(track),
                    description: track.describe(level),
                }
            })
            .collect();
        Ok(serde_json::to_string(&entries)?)
    }

    /// Buy one level of an upgrade; returns the coins left
    #[wasm_bindgen(js_name = purchaseUpgrade)]
    pub fn purchase_upgrade(key: &str) -> Result<f64, JsError> {
        let track = track_from_key(key)?;
        let (cost, level, coins) = ProgressData::update_saved(|progress| {
            let cost = progress.purchase_upgrade(track)?;
            Ok::<_, PurchaseError>((cost, progress.upgrades.level(track), progress.coins))
        })?;
        log::info!("Bought {} level {} for {} coins", track.key(), level, cost);
        Ok(coins as f64)
    }
}
