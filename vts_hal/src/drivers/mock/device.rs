//! Mock device state machine.
//!
//! Simulates the power and configuration behaviour of a hardware device,
//! deterministically and synchronously, so higher-level logic can be tested
//! without hardware.
//!
//! ```text
//!            power_on                  (tick in Stepped mode)
//!   OFF ─────────────────► INITIALIZING ─────────────────────► ON
//!    ▲                                                          │
//!    └──────────────────────────  power_off  ◄──────────────────┘
//!
//!   ERROR ── power_on ──► (same path as OFF)
//!   any   ── inject_fault ──► ERROR
//! ```

use super::config_store::ConfigStore;
use tracing::{debug, warn};
use vts_common::hal::driver::{DeviceDriver, DeviceOperation, HalError};
use vts_common::hal::types::{ConfigKey, DeviceState, PowerOnMode};

/// In-memory device mock.
///
/// Each test owns its own instance; there is no shared state between
/// instances and no internal locking.
#[derive(Debug, Clone)]
pub struct DeviceStateMock {
    /// Current power state
    state: DeviceState,
    /// Recognized config values
    config: ConfigStore,
    /// Power-on completion behaviour
    mode: PowerOnMode,
}

impl DeviceStateMock {
    /// Create a mock that is `Off` with zeroed config and immediate power-on.
    pub fn new() -> Self {
        Self::with_mode(PowerOnMode::Immediate)
    }

    /// Create a mock with the given power-on behaviour.
    pub fn with_mode(mode: PowerOnMode) -> Self {
        Self {
            state: DeviceState::Off,
            config: ConfigStore::new(),
            mode,
        }
    }

    /// Power-on behaviour of this instance.
    pub fn mode(&self) -> PowerOnMode {
        self.mode
    }

    /// Typed read of a config value.
    pub fn config_value(&self, key: ConfigKey) -> i32 {
        self.config.value(key)
    }

    fn transition(&mut self, to: DeviceState) {
        debug!("Device state {} -> {}", self.state, to);
        self.state = to;
    }

    fn reject(&self, operation: DeviceOperation) -> HalError {
        warn!("{} rejected in state {}", operation, self.state);
        HalError::RejectedOperation {
            operation,
            state: self.state,
        }
    }
}

impl Default for DeviceStateMock {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceDriver for DeviceStateMock {
    fn name(&self) -> &'static str {
        match self.mode {
            PowerOnMode::Immediate => "mock",
            PowerOnMode::Stepped => "mock-stepped",
        }
    }

    fn version(&self) -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    fn power_on(&mut self) -> Result<(), HalError> {
        match self.state {
            DeviceState::Off | DeviceState::Error => {
                self.transition(DeviceState::Initializing);
                if self.mode == PowerOnMode::Immediate {
                    self.transition(DeviceState::On);
                }
                Ok(())
            }
            DeviceState::On | DeviceState::Initializing => {
                Err(self.reject(DeviceOperation::PowerOn))
            }
        }
    }

    fn power_off(&mut self) -> Result<(), HalError> {
        if self.state != DeviceState::On {
            return Err(self.reject(DeviceOperation::PowerOff));
        }
        self.transition(DeviceState::Off);
        Ok(())
    }

    fn status(&self) -> DeviceState {
        self.state
    }

    fn set_config(&mut self, key: &str, value: i32) -> Result<(), HalError> {
        self.config.set(key, value)
    }

    fn get_config(&self, key: &str) -> Result<i32, HalError> {
        self.config.get(key)
    }

    fn reset(&mut self) -> Result<(), HalError> {
        debug!("Device reset");
        self.state = DeviceState::Off;
        self.config.clear();
        Ok(())
    }

    fn inject_fault(&mut self) -> Result<(), HalError> {
        self.transition(DeviceState::Error);
        Ok(())
    }

    fn tick(&mut self) -> Result<(), HalError> {
        if self.state != DeviceState::Initializing {
            return Err(self.reject(DeviceOperation::Tick));
        }
        self.transition(DeviceState::On);
        Ok(())
    }
}
