//! TOML-based application settings.
//!
//! Stores the daily focus goal and the global Pomodoro defaults applied to
//! newly created tasks. Every field carries a serde default so a partial or
//! stale file degrades to documented defaults instead of failing the load.
//!
//! Settings are stored at `~/.config/focusflow/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::task::PomodoroState;

/// Global Pomodoro defaults for new tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PomodoroDefaults {
    /// When true, new tasks default to Pomodoro mode.
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_focus_minutes")]
    pub focus_minutes: u32,
    #[serde(default = "default_break_minutes")]
    pub break_minutes: u32,
}

/// Application settings.
///
/// Serialized to/from TOML at `~/.config/focusflow/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Daily focus goal in minutes.
    #[serde(default = "default_daily_goal")]
    pub daily_goal_minutes: u32,
    #[serde(default)]
    pub pomodoro: PomodoroDefaults,
}

fn default_daily_goal() -> u32 {
    240
}
fn default_focus_minutes() -> u32 {
    25
}
fn default_break_minutes() -> u32 {
    5
}

impl Default for PomodoroDefaults {
    fn default() -> Self {
        Self {
            enabled: false,
            focus_minutes: default_focus_minutes(),
            break_minutes: default_break_minutes(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            daily_goal_minutes: default_daily_goal(),
            pomodoro: PomodoroDefaults::default(),
        }
    }
}

impl Settings {
    fn path() -> Result<PathBuf, Box<dyn std::error::Error>> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or return default.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings file exists but cannot be parsed,
    /// or if the default settings cannot be written to disk.
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let settings: Settings = toml::from_str(&content)?;
                Ok(settings)
            }
            Err(_) => {
                let settings = Self::default();
                settings.save()?;
                Ok(settings)
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings cannot be serialized or written.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(Self::path()?, content)?;
        Ok(())
    }

    /// Load from disk, returning defaults on any error. Never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Fresh per-task Pomodoro sub-state from the global defaults.
    pub fn default_pomodoro_state(&self) -> PomodoroState {
        PomodoroState::new(self.pomodoro.focus_minutes, self.pomodoro.break_minutes)
    }

    /// Progress toward the daily goal, clamped to `[0, 100]`.
    pub fn goal_progress_percent(&self, total_elapsed_seconds: u64) -> f64 {
        let goal_seconds = u64::from(self.daily_goal_minutes).saturating_mul(60);
        if goal_seconds == 0 {
            return 0.0;
        }
        (total_elapsed_seconds as f64 / goal_seconds as f64 * 100.0).clamp(0.0, 100.0)
    }
}
