//! Prelude module for common re-exports.
//!
//! ```rust
//! use vts_common::prelude::*;
//! ```

// ─── Logging ────────────────────────────────────────────────────────
pub use crate::config::LogLevel;

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{ConfigError, ConfigLoader, SharedConfig};

// ─── Devices ────────────────────────────────────────────────────────
pub use crate::hal::driver::{DeviceDriver, DeviceOperation, DriverFactory, HalError};
pub use crate::hal::types::{ConfigKey, DeviceState, PowerOnMode};
