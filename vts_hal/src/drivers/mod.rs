//! Device driver implementations.
//!
//! - [`mock`] - In-memory device mock for test authoring
//!
//! # Adding New Drivers
//!
//! 1. Create a new submodule under `drivers/`
//! 2. Implement the `DeviceDriver` trait from `vts_common::hal::driver`
//! 3. Register its factory in [`register_all_drivers`]

pub mod mock;

use crate::driver_registry::DriverRegistry;

/// Register all built-in drivers into `registry`.
pub fn register_all_drivers(registry: &mut DriverRegistry) {
    registry.register("mock", mock::create_driver);
    registry.register("mock-stepped", mock::create_stepped_driver);
}
