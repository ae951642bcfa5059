//! VTS Common Library
//!
//! This crate provides the device vocabulary, the `DeviceDriver` trait and
//! configuration loading shared by all VTS workspace crates.
//!
//! # Module Structure
//!
//! - [`hal`] - Device state, config keys, driver trait and errors
//! - [`config`] - Configuration loading traits and types
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! ```rust
//! use vts_common::prelude::*;
//!
//! fn powered(driver: &dyn DeviceDriver) -> bool {
//!     driver.status() == DeviceState::On
//! }
//! ```

#![deny(missing_docs)]

pub mod config;
pub mod hal;
pub mod prelude;
