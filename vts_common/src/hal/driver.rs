//! Device driver trait and error types.
//!
//! This module defines:
//! - `DeviceDriver` trait - Interface shared by device mocks and real HAL backends
//! - `HalError` enum - Error types for device operations
//! - `DeviceOperation` enum - State-changing operations named in errors
//! - `DriverFactory` type alias - Factory function type

use crate::hal::types::DeviceState;
use std::fmt;
use thiserror::Error;

/// State-changing device operation, as named in [`HalError::RejectedOperation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceOperation {
    /// Power-on request
    PowerOn,
    /// Power-off request
    PowerOff,
    /// Completion step of a stepped power-on
    Tick,
}

impl fmt::Display for DeviceOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DeviceOperation::PowerOn => "power_on",
            DeviceOperation::PowerOff => "power_off",
            DeviceOperation::Tick => "tick",
        };
        f.write_str(s)
    }
}

/// Error types for device operations.
///
/// Every variant is local and recoverable: the device is left exactly as it
/// was before the failed call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HalError {
    /// The current state does not allow the operation
    #[error("{operation} rejected in state {state}")]
    RejectedOperation {
        /// Operation that was attempted
        operation: DeviceOperation,
        /// State the device was (and still is) in
        state: DeviceState,
    },

    /// Configuration key is not recognized by the device
    #[error("Unknown config key: {0}")]
    UnknownKey(String),

    /// The backend does not implement this operation
    #[error("Operation not supported by driver: {0}")]
    Unsupported(&'static str),

    /// Driver not found
    #[error("Driver not found: {0}")]
    DriverNotFound(String),
}

/// Factory function type for creating driver instances.
pub type DriverFactory = fn() -> Box<dyn DeviceDriver>;

/// Trait defining the interface for device drivers under test.
///
/// The mock device implements it; a real HAL backend implementing it can be
/// run through the same tests.
///
/// # State machine
///
/// | From | Operation | To |
/// |------|-----------|----|
/// | `Off`, `Error` | `power_on()` | `On` (via `Initializing`) |
/// | `On` | `power_off()` | `Off` |
/// | any | `inject_fault()` | `Error` |
///
/// Any other combination fails with `HalError::RejectedOperation` and leaves
/// the state unchanged.
pub trait DeviceDriver: Send {
    /// Returns the driver's unique identifier (e.g., "mock").
    fn name(&self) -> &'static str;

    /// Returns the driver's semantic version.
    fn version(&self) -> &'static str;

    /// Power the device on.
    fn power_on(&mut self) -> Result<(), HalError>;

    /// Power the device off.
    fn power_off(&mut self) -> Result<(), HalError>;

    /// Current power state. No side effects.
    fn status(&self) -> DeviceState;

    /// Store a configuration value under a recognized key.
    fn set_config(&mut self, key: &str, value: i32) -> Result<(), HalError>;

    /// Read the configuration value stored under a recognized key.
    fn get_config(&self, key: &str) -> Result<i32, HalError>;

    /// Return to the initial state (`Off`, all config zeroed).
    /// Default: unsupported
    fn reset(&mut self) -> Result<(), HalError> {
        Err(HalError::Unsupported("reset"))
    }

    /// Drive the device into `Error`.
    /// Default: unsupported
    fn inject_fault(&mut self) -> Result<(), HalError> {
        Err(HalError::Unsupported("inject_fault"))
    }

    /// Advance a pending power-on sequence.
    /// Default: unsupported
    fn tick(&mut self) -> Result<(), HalError> {
        Err(HalError::Unsupported("tick"))
    }
}
