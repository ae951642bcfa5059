//! Device abstraction shared by mocks and real HAL backends.
//!
//! This module contains the device vocabulary (`types`) and the
//! `DeviceDriver` trait with its error type (`driver`).

pub mod driver;
pub mod types;
