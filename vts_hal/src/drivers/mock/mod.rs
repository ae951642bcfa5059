//! Mock device driver module.
//!
//! This module provides an in-memory device for authoring tests without
//! physical hardware.

mod config_store;
mod device;

pub use config_store::ConfigStore;
pub use device::DeviceStateMock;

use vts_common::hal::driver::DeviceDriver;
use vts_common::hal::types::PowerOnMode;

/// Factory function to create a mock device with immediate power-on.
pub fn create_driver() -> Box<dyn DeviceDriver> {
    Box::new(DeviceStateMock::new())
}

/// Factory function to create a mock device whose power-on completes on `tick()`.
pub fn create_stepped_driver() -> Box<dyn DeviceDriver> {
    Box::new(DeviceStateMock::with_mode(PowerOnMode::Stepped))
}
