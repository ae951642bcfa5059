//! # VTS HAL Library
//!
//! Device mocks and kernel interface probes for authoring vendor test suites.
//!
//! Devices implement the `DeviceDriver` trait defined in
//! `vts_common::hal::driver`; the in-memory mock is one such driver, so
//! tests written against the trait also run against real HAL backends.
//!
//! # Module Structure
//!
//! - [`driver_registry`] - Driver factory registration
//! - [`drivers`] - Device driver implementations
//! - [`kernel`] - procfs/sysfs file probes and probe suites
//! - [`script`] - Scripted operation sequences for the `vts` binary
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     vts_hal (single crate)                   │
//! │  ┌─────────────────┐       ┌──────────────────────────────┐  │
//! │  │ Driver Registry │──────►│ DeviceDriver (trait object)  │  │
//! │  └─────────────────┘       │   └─ DeviceStateMock         │  │
//! │                            └──────────────────────────────┘  │
//! │  ┌─────────────────┐       ┌──────────────────────────────┐  │
//! │  │ ProbeSuite      │──────►│ FileProbe (read / capped)    │  │
//! │  └─────────────────┘       └──────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```

#![deny(missing_docs)]

pub mod driver_registry;
pub mod drivers;
pub mod kernel;
pub mod script;

// Re-export key types for convenience
pub use crate::driver_registry::DriverRegistry;
pub use crate::drivers::mock::DeviceStateMock;
pub use crate::kernel::{ProbeContent, ProbeError, ProbeSuite, SuiteReport};
