//! Device state and configuration key types.
//!
//! This module defines the vocabulary shared by every device backend:
//! - `DeviceState` - Power state of a device under test
//! - `ConfigKey` - Recognized configuration keys
//! - `PowerOnMode` - Whether power-on completes immediately or on `tick()`

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Power state of a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeviceState {
    /// Powered off (initial state)
    #[default]
    Off,
    /// Power-on sequence in progress
    Initializing,
    /// Powered on and operational
    On,
    /// Faulted; recovered by powering on again
    Error,
}

impl fmt::Display for DeviceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DeviceState::Off => "OFF",
            DeviceState::Initializing => "INITIALIZING",
            DeviceState::On => "ON",
            DeviceState::Error => "ERROR",
        };
        f.write_str(s)
    }
}

/// Configuration key recognized by a device.
///
/// Keys travel as their upper-case wire names (`"TARGET_VOLTAGE"`); anything
/// that does not parse into a `ConfigKey` is an unknown key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConfigKey {
    /// Target supply voltage
    #[serde(rename = "TARGET_VOLTAGE")]
    TargetVoltage,
}

impl ConfigKey {
    /// Every recognized key, in store order.
    pub const ALL: [ConfigKey; 1] = [ConfigKey::TargetVoltage];

    /// Number of recognized keys.
    pub const COUNT: usize = Self::ALL.len();

    /// Wire name of the key.
    pub const fn as_str(self) -> &'static str {
        match self {
            ConfigKey::TargetVoltage => "TARGET_VOLTAGE",
        }
    }

    /// Position of the key in a fixed-size store.
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a recognized [`ConfigKey`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownConfigKey(pub String);

impl fmt::Display for UnknownConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown config key '{}'", self.0)
    }
}

impl std::error::Error for UnknownConfigKey {}

impl FromStr for ConfigKey {
    type Err = UnknownConfigKey;

    /// Matching is exact: key names are case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConfigKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| UnknownConfigKey(s.to_string()))
    }
}

/// How a power-on request reaches `DeviceState::On`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PowerOnMode {
    /// Pass through `Initializing` within the call; callers only ever see `On`.
    #[default]
    Immediate,
    /// Stop in `Initializing`; an explicit `tick()` completes the sequence.
    Stepped,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_state_default_is_off() {
        assert_eq!(DeviceState::default(), DeviceState::Off);
        assert_eq!(DeviceState::Initializing.to_string(), "INITIALIZING");
    }

    #[test]
    fn test_config_key_parse() {
        assert_eq!(
            "TARGET_VOLTAGE".parse::<ConfigKey>(),
            Ok(ConfigKey::TargetVoltage)
        );
        assert_eq!(ConfigKey::TargetVoltage.to_string(), "TARGET_VOLTAGE");
    }

    #[test]
    fn test_config_key_parse_is_case_sensitive() {
        let err = "target_voltage".parse::<ConfigKey>().unwrap_err();
        assert_eq!(err, UnknownConfigKey("target_voltage".to_string()));
        assert!("UNKNOWN_CONFIG".parse::<ConfigKey>().is_err());
        assert!("".parse::<ConfigKey>().is_err());
    }

    #[test]
    fn test_config_key_indices_are_dense() {
        for (i, key) in ConfigKey::ALL.iter().enumerate() {
            assert_eq!(key.index(), i);
        }
        assert_eq!(ConfigKey::COUNT, 1);
    }
}
