//! Game settings and preferences
//!
//! Persisted separately from progress in LocalStorage. The simulation never
//! reads these; they only gate which effect events the host acts on.

use serde::{Deserialize, Serialize};

use crate::sim::GameEvent;

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Play sound effects
    pub sound_enabled: bool,
    /// Camera shake on hits and kills
    pub screen_shake: bool,
    /// Floating damage/heal/coin numbers
    pub damage_numbers: bool,
    /// Reduced motion (no shake, no particle bursts)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            screen_shake: true,
            damage_numbers: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Flip sound on/off, returning the new state
    pub fn toggle_sound(&mut self) -> bool {
        self.sound_enabled = !self.sound_enabled;
        self.sound_enabled
    }

    /// Whether an effect event should reach the host.
    ///
    /// Visual lifecycle, HUD and terminal events always pass so the
    /// presentation never desyncs from the simulation.
    pub fn allows(&self, event: &GameEvent) -> bool {
        match event {
            GameEvent::PlaySound { .. } => self.sound_enabled,
            GameEvent::ScreenShake { .. } => self.effective_screen_shake(),
            GameEvent::DamageNumber { .. } => self.damage_numbers,
            GameEvent::Burst { .. } | GameEvent::Volley { .. } => !self.reduced_motion,
            _ => true,
        }
    }

    /// Drop the events these settings mute
    pub fn filter(&self, events: Vec<GameEvent>) -> Vec<GameEvent> {
        events.into_iter().filter(|e| self.allows(e)).collect()
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "crowdRunnerSettings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        if let Some(storage) = crate::platform::local_storage() {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = serde_json::from_str(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
                log::warn!("Stored settings unreadable, using defaults");
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        if let Some(storage) = crate::platform::local_storage() {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{DamageStyle, RunOutcome, SoundEffect};
    use glam::Vec2;

    #[test]
    fn test_sound_toggle_mutes_sounds_only() {
        let mut settings = Settings::default();
        assert!(settings.allows(&GameEvent::sound(SoundEffect::Coin)));
        assert!(!settings.toggle_sound());
        assert!(!settings.allows(&GameEvent::sound(SoundEffect::Coin)));
        assert!(settings.allows(&GameEvent::HudUpdate {
            allies: 3,
            progress_percent: 10.0
        }));
    }

    #[test]
    fn test_reduced_motion_drops_shake_keeps_terminal() {
        let settings = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        let events = vec![
            GameEvent::ScreenShake {
                intensity: 0.3,
                duration: 0.2,
            },
            GameEvent::DamageNumber {
                pos: Vec2::ZERO,
                text: "-3".into(),
                style: DamageStyle::Damage,
            },
            GameEvent::Terminal {
                outcome: RunOutcome::Fail {
                    message: "x".into(),
                },
            },
        ];
        let kept = settings.filter(events);
        assert_eq!(kept.len(), 2);
        assert!(matches!(kept[1], GameEvent::Terminal { .. }));
    }
}
