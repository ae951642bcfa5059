//! Fixed-key configuration store for the mock device.

use tracing::{debug, warn};
use vts_common::hal::driver::HalError;
use vts_common::hal::types::ConfigKey;

/// Integer values for every recognized [`ConfigKey`], zeroed on creation.
///
/// Only keys that parse into a `ConfigKey` can be stored, so an unknown key
/// never reaches the store.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConfigStore {
    values: [i32; ConfigKey::COUNT],
}

impl ConfigStore {
    /// Create a store with every key set to 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under `key`.
    ///
    /// # Errors
    /// Returns `HalError::UnknownKey` if `key` is not recognized; the store is unchanged.
    pub fn set(&mut self, key: &str, value: i32) -> Result<(), HalError> {
        let key = resolve(key)?;
        self.values[key.index()] = value;
        debug!("Config {} = {}", key, value);
        Ok(())
    }

    /// Read the value stored under `key`.
    ///
    /// # Errors
    /// Returns `HalError::UnknownKey` if `key` is not recognized.
    pub fn get(&self, key: &str) -> Result<i32, HalError> {
        let key = resolve(key)?;
        Ok(self.values[key.index()])
    }

    /// Read by typed key; always succeeds.
    pub fn value(&self, key: ConfigKey) -> i32 {
        self.values[key.index()]
    }

    /// Zero every key.
    pub fn clear(&mut self) {
        self.values = [0; ConfigKey::COUNT];
    }
}

fn resolve(key: &str) -> Result<ConfigKey, HalError> {
    key.parse::<ConfigKey>().map_err(|e| {
        warn!("{}", e);
        HalError::UnknownKey(e.0)
    })
}
