use serde::{Deserialize, Serialize};

/// Notification-center entries kept before the oldest are evicted.
pub const DEFAULT_MAX_NOTIFICATIONS: usize = 50;

/// Global notification preferences, part of the persisted state.
/// Channel toggles here gate delivery for every rule; per-rule
/// preferences can only narrow further.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertSettings {
    /// Master switch for the visual channel (desktop/browser popups).
    pub visual_enabled: bool,
    /// Master switch for the audio channel.
    pub sound_enabled: bool,
    /// Reserved; no email channel ships yet.
    #[serde(default)]
    pub email_enabled: bool,
    pub max_notifications: usize,
}

impl Default for AlertSettings {
    fn default() -> Self {
        Self {
            visual_enabled: true,
            sound_enabled: true,
            email_enabled: false,
            max_notifications: DEFAULT_MAX_NOTIFICATIONS,
        }
    }
}

impl AlertSettings {
    /// Apply a partial update; `None` fields keep their current value.
    pub fn apply(&mut self, update: &SettingsUpdate) {
        if let Some(visual) = update.visual_enabled {
            self.visual_enabled = visual;
        }
        if let Some(sound) = update.sound_enabled {
            self.sound_enabled = sound;
        }
        if let Some(email) = update.email_enabled {
            self.email_enabled = email;
        }
        if let Some(max) = update.max_notifications {
            self.max_notifications = max;
        }
    }
}

/// Partial settings change; unset fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsUpdate {
    pub visual_enabled: Option<bool>,
    pub sound_enabled: Option<bool>,
    pub email_enabled: Option<bool>,
    pub max_notifications: Option<usize>,
}
