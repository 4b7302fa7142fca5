//! Saved progress
//!
//! Stage progression, coin wallet and upgrade levels. Persisted to
//! LocalStorage as JSON on the web; missing fields fall back to defaults so
//! older saves keep loading.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, PurchaseError};
use crate::sim::reward::{StageReward, advance_progression};
use crate::upgrades::{Loadout, UpgradeLevels, UpgradeTrack};

/// Everything that survives between runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProgressData {
    /// Stage the next run will start
    pub current_stage: u32,
    /// Highest stage unlocked
    pub max_stage: u32,
    pub coins: u64,
    pub upgrades: UpgradeLevels,
}

impl Default for ProgressData {
    fn default() -> Self {
        Self {
            current_stage: 1,
            max_stage: 1,
            coins: 0,
            upgrades: UpgradeLevels::default(),
        }
    }
}

impl ProgressData {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "crowdRunnerSave";

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Run stats from the current upgrade levels
    pub fn loadout(&self) -> Loadout {
        Loadout::from_levels(&self.upgrades)
    }

    /// Menu level badge (one level per five stages unlocked)
    pub fn player_level(&self) -> u32 {
        self.max_stage / 5 + 1
    }

    /// Buy one upgrade level with saved coins
    pub fn purchase_upgrade(&mut self, track: UpgradeTrack) -> Result<u64, PurchaseError> {
        self.upgrades.purchase(track, &mut self.coins)
    }

    /// Bank a stage-clear payout and unlock the next stage
    pub fn record_victory(&mut self, reward: &StageReward) {
        self.coins += reward.total_coins;
        let (current, max) = advance_progression(self.current_stage, self.max_stage);
        log::info!(
            "Progress: stage {} -> {} (max {} -> {}), coins {}",
            self.current_stage,
            current,
            self.max_stage,
            max,
            self.coins
        );
        self.current_stage = current;
        self.max_stage = max;
    }

    /// Load the saved copy, change it and write it back. Every change made
    /// between runs or at the end of a run goes through here.
    pub fn update_saved<R>(f: impl FnOnce(&mut Self) -> R) -> R {
        let mut progress = Self::load();
        let result = f(&mut progress);
        progress.save();
        result
    }

    /// Load progress from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        if let Some(storage) = crate::platform::local_storage() {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(progress) => {
                        log::info!("Loaded progress (stage {})", progress.current_stage);
                        return progress;
                    }
                    Err(e) => log::warn!("Discarding unreadable save: {}", e),
                }
            }
        }

        log::info!("No saved progress, starting fresh");
        Self::default()
    }

    /// Save progress to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        if let Some(storage) = crate::platform::local_storage() {
            match self.to_json() {
                Ok(json) => {
                    let _ = storage.set_item(Self::STORAGE_KEY, &json);
                    log::info!("Progress saved");
                }
                Err(e) => log::warn!("Failed to encode progress: {}", e),
            }
        }
    }

    /// Native: in-memory save for the current thread
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        NATIVE_SAVE
            .with_borrow(|saved| saved.as_deref().map(Self::from_json))
            .and_then(Result::ok)
            .unwrap_or_default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        match self.to_json() {
            Ok(json) => NATIVE_SAVE.set(Some(json)),
            Err(e) => log::warn!("Failed to encode progress: {}", e),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
thread_local! {
    static NATIVE_SAVE: std::cell::RefCell<Option<String>> = const { std::cell::RefCell::new(None) };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reward(total_coins: u64) -> StageReward {
        StageReward {
            total_coins,
            stars: 3,
            surviving_allies: 7,
            start_allies: 7,
        }
    }

    #[test]
    fn test_partial_save_fills_defaults() {
        let progress = ProgressData::from_json(r#"{"coins": 420, "upgrades": {"health": 2}}"#).unwrap();
        assert_eq!(progress.coins, 420);
        assert_eq!(progress.current_stage, 1);
        assert_eq!(progress.max_stage, 1);
        assert_eq!(progress.upgrades.health, 2);
        assert_eq!(progress.upgrades.start_allies, 0);
    }

    #[test]
    fn test_json_uses_camel_case_keys() {
        let json = ProgressData::default().to_json().unwrap();
        assert!(json.contains("\"currentStage\":1"));
        assert!(json.contains("\"maxStage\":1"));
        assert!(json.contains("\"startAllies\":0"));
        assert!(ProgressData::from_json("not json").is_err());
    }

    #[test]
    fn test_existing_browser_save_loads() {
        assert_eq!(ProgressData::STORAGE_KEY, "crowdRunnerSave");
        let json = r#"{"currentStage":4,"maxStage":6,"coins":1310,
            "upgrades":{"startAllies":2,"attackPower":1,"weaponBonus":0,"coinBonus":3,"health":0}}"#;
        let progress = ProgressData::from_json(json).unwrap();
        assert_eq!(progress.current_stage, 4);
        assert_eq!(progress.max_stage, 6);
        assert_eq!(progress.coins, 1310);
        assert_eq!(progress.loadout().start_allies, 9);
        assert_eq!(progress.upgrades.coin_bonus, 3);
    }

    #[test]
    fn test_record_victory_on_frontier() {
        let mut progress = ProgressData {
            current_stage: 3,
            max_stage: 3,
            ..Default::default()
        };
        progress.record_victory(&reward(120));
        assert_eq!(progress.current_stage, 4);
        assert_eq!(progress.max_stage, 4);
        assert_eq!(progress.coins, 120);
    }

    #[test]
    fn test_record_victory_replaying_old_stage() {
        let mut progress = ProgressData {
            current_stage: 2,
            max_stage: 5,
            coins: 10,
            ..Default::default()
        };
        progress.record_victory(&reward(50));
        assert_eq!(progress.current_stage, 3);
        assert_eq!(progress.max_stage, 5);
        assert_eq!(progress.coins, 60);
    }

    #[test]
    fn test_purchase_through_progress() {
        let mut progress = ProgressData {
            coins: 150,
            ..Default::default()
        };
        assert_eq!(progress.purchase_upgrade(UpgradeTrack::AttackPower), Ok(150));
        assert_eq!(progress.coins, 0);
        assert_eq!(progress.loadout().base_attack, 15.0);
        assert!(progress.purchase_upgrade(UpgradeTrack::AttackPower).is_err());
    }

    #[test]
    fn test_purchase_during_run_survives_victory() {
        ProgressData {
            coins: 500,
            ..Default::default()
        }
        .save();
        let at_run_start = ProgressData::load();

        // Shop purchase while the run is in progress, then the run is won
        let cost = ProgressData::update_saved(|p| p.purchase_upgrade(UpgradeTrack::Health));
        assert_eq!(cost, Ok(250));
        ProgressData::update_saved(|p| p.record_victory(&reward(120)));

        let saved = ProgressData::load();
        assert_eq!(saved.upgrades.health, 1);
        assert_eq!(saved.coins, 370);
        assert_eq!(saved.current_stage, 2);
        assert_eq!(at_run_start.upgrades.health, 0);
    }

    #[test]
    fn test_native_load_without_save_is_default() {
        assert_eq!(ProgressData::load(), ProgressData::default());
    }

    #[test]
    fn test_player_level() {
        let mut progress = ProgressData::default();
        assert_eq!(progress.player_level(), 1);
        progress.max_stage = 10;
        assert_eq!(progress.player_level(), 3);
    }
}
