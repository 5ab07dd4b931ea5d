//! Configuration settings for pomofocus.
//!
//! Settings are loaded from `~/.pomofocus/config.yaml`.

use serde::{Deserialize, Serialize};

use crate::error::PomoError;
use crate::features::focus::SessionType;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// General settings.
    pub general: GeneralConfig,
    /// Timer durations and cycle length.
    pub timer: TimerConfig,
    /// Notification settings.
    pub notifications: NotificationConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Color output setting.
    #[serde(default = "default_color")]
    pub color: ColorSetting,
    /// Default log filter, overridden by `POMOFOCUS_LOG`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Color output setting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorSetting {
    /// Auto-detect based on terminal.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

/// Timer settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TimerConfig {
    /// Focus session duration in minutes.
    #[serde(default = "default_focus_minutes")]
    pub focus_minutes: u32,
    /// Short break duration in minutes.
    #[serde(default = "default_short_break")]
    pub short_break_minutes: u32,
    /// Long break duration in minutes.
    #[serde(default = "default_long_break")]
    pub long_break_minutes: u32,
    /// Number of completed focus sessions before a long break.
    #[serde(default = "default_pomodoros_per_cycle")]
    pub pomodoros_per_cycle: u32,
}

/// Notification settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NotificationConfig {
    /// Schedule a notification for the end of every running session.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Ring the terminal bell when a notification fires.
    #[serde(default = "default_true")]
    pub sound: bool,
}

// Default value functions for serde
const fn default_color() -> ColorSetting {
    ColorSetting::Auto
}

fn default_log_level() -> String {
    "info".to_string()
}

const fn default_focus_minutes() -> u32 {
    25
}

const fn default_short_break() -> u32 {
    5
}

const fn default_long_break() -> u32 {
    15
}

const fn default_pomodoros_per_cycle() -> u32 {
    4
}

const fn default_true() -> bool {
    true
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            color: default_color(),
            log_level: default_log_level(),
        }
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            focus_minutes: default_focus_minutes(),
            short_break_minutes: default_short_break(),
            long_break_minutes: default_long_break(),
            pomodoros_per_cycle: default_pomodoros_per_cycle(),
        }
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            sound: default_true(),
        }
    }
}

impl TimerConfig {
    /// Configured length of a session type, in seconds.
    #[must_use]
    pub const fn duration_secs(&self, session_type: SessionType) -> u32 {
        let minutes = match session_type {
            SessionType::Focus => self.focus_minutes,
            SessionType::ShortBreak => self.short_break_minutes,
            SessionType::LongBreak => self.long_break_minutes,
        };
        minutes.saturating_mul(60)
    }

    /// Reject durations or cycle lengths of zero.
    ///
    /// # Errors
    ///
    /// Returns `PomoError::Config` naming the offending field.
    pub fn validate(&self) -> Result<(), PomoError> {
        let fields = [
            ("timer.focus_minutes", self.focus_minutes),
            ("timer.short_break_minutes", self.short_break_minutes),
            ("timer.long_break_minutes", self.long_break_minutes),
            ("timer.pomodoros_per_cycle", self.pomodoros_per_cycle),
        ];

        for (name, value) in fields {
            if value == 0 {
                return Err(PomoError::Config(format!("{name} must be greater than zero")));
            }
        }

        Ok(())
    }
}

impl Config {
    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed or
    /// holds invalid timer values.
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, PomoError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            PomoError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        let config: Self = serde_yaml::from_str(&contents).map_err(|e| {
            PomoError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })?;

        config.timer.validate()?;
        Ok(config)
    }

    /// Load configuration, writing the defaults to `path` on first run.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or created.
    pub fn load_or_init(path: &std::path::Path) -> Result<Self, PomoError> {
        if path.exists() {
            return Self::load_from_path(path);
        }

        let config = Self::default();
        config.save_to_path(path)?;
        Ok(config)
    }

    /// Save configuration to a specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save_to_path(&self, path: &std::path::Path) -> Result<(), PomoError> {
        let contents = serde_yaml::to_string(self)
            .map_err(|e| PomoError::Config(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, contents).map_err(|e| {
            PomoError::Config(format!(
                "Failed to write config file {}: {e}",
                path.display()
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.general.color, ColorSetting::Auto);
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.timer.focus_minutes, 25);
        assert_eq!(config.timer.short_break_minutes, 5);
        assert_eq!(config.timer.long_break_minutes, 15);
        assert_eq!(config.timer.pomodoros_per_cycle, 4);
        assert!(config.notifications.enabled);
    }

    #[test]
    fn test_duration_secs() {
        let timer = TimerConfig::default();
        assert_eq!(timer.duration_secs(SessionType::Focus), 1500);
        assert_eq!(timer.duration_secs(SessionType::ShortBreak), 300);
        assert_eq!(timer.duration_secs(SessionType::LongBreak), 900);
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let config = Config::load_from_path(&config_path).unwrap();

        assert_eq!(config.timer, TimerConfig::default());
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut config = Config::default();
        config.timer.focus_minutes = 50;
        config.notifications.sound = false;

        config.save_to_path(&config_path).unwrap();

        let loaded = Config::load_from_path(&config_path).unwrap();

        assert_eq!(loaded.timer.focus_minutes, 50);
        assert!(!loaded.notifications.sound);
    }

    #[test]
    fn test_load_or_init_writes_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let config = Config::load_or_init(&config_path).unwrap();
        assert!(config_path.exists());
        assert_eq!(config.timer, TimerConfig::default());

        std::fs::write(&config_path, "timer:\n  focus_minutes: 30\n").unwrap();
        let config = Config::load_or_init(&config_path).unwrap();
        assert_eq!(config.timer.focus_minutes, 30);
    }

    #[test]
    fn test_partial_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let partial_yaml = r"
timer:
  long_break_minutes: 20
";
        std::fs::write(&config_path, partial_yaml).unwrap();

        let config = Config::load_from_path(&config_path).unwrap();

        assert_eq!(config.timer.long_break_minutes, 20);
        assert_eq!(config.timer.focus_minutes, 25);
        assert_eq!(config.general.log_level, "info");
    }

    #[test]
    fn test_zero_duration_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        std::fs::write(&config_path, "timer:\n  pomodoros_per_cycle: 0\n").unwrap();

        let err = Config::load_from_path(&config_path).unwrap_err();
        assert!(err.to_string().contains("pomodoros_per_cycle"));
    }
}
