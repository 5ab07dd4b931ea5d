//! Configuration management for pomofocus.
//!
//! This module handles loading and saving configuration from `~/.pomofocus/`.

mod paths;
mod settings;

pub use paths::{Paths, HOME_ENV};
pub use settings::{ColorSetting, Config, GeneralConfig, NotificationConfig, TimerConfig};
