//! Scripted device operation sequences.
//!
//! Drives any [`DeviceDriver`] through a list of operations written as short
//! tokens, as used by `vts device`:
//!
//! | Token | Operation |
//! |-------|-----------|
//! | `on` / `off` | `power_on()` / `power_off()` |
//! | `status` | `status()` |
//! | `fault` | `inject_fault()` |
//! | `tick` | `tick()` |
//! | `reset` | `reset()` |
//! | `set:KEY=VALUE` | `set_config(KEY, VALUE)` |
//! | `get:KEY` | `get_config(KEY)` |

use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;
use vts_common::hal::driver::{DeviceDriver, HalError};
use vts_common::hal::types::DeviceState;

/// Error parsing an operation token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    /// Token is not a known operation
    #[error("Unknown operation '{0}'")]
    UnknownOperation(String),

    /// `set:` token without `KEY=VALUE`, or a value that is not an i32
    #[error("Malformed set operation '{0}', expected set:KEY=VALUE")]
    MalformedSet(String),
}

/// One device operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceOp {
    /// `power_on()`
    PowerOn,
    /// `power_off()`
    PowerOff,
    /// `status()`
    Status,
    /// `inject_fault()`
    Fault,
    /// `tick()`
    Tick,
    /// `reset()`
    Reset,
    /// `set_config(key, value)`
    Set {
        /// Config key as given
        key: String,
        /// Value to store
        value: i32,
    },
    /// `get_config(key)`
    Get {
        /// Config key as given
        key: String,
    },
}

impl FromStr for DeviceOp {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "on" => return Ok(DeviceOp::PowerOn),
            "off" => return Ok(DeviceOp::PowerOff),
            "status" => return Ok(DeviceOp::Status),
            "fault" => return Ok(DeviceOp::Fault),
            "tick" => return Ok(DeviceOp::Tick),
            "reset" => return Ok(DeviceOp::Reset),
            _ => {}
        }

        if let Some(rest) = s.strip_prefix("set:") {
            let (key, value) = rest
                .split_once('=')
                .ok_or_else(|| ScriptError::MalformedSet(s.to_string()))?;
            let value = value
                .trim()
                .parse::<i32>()
                .map_err(|_| ScriptError::MalformedSet(s.to_string()))?;
            return Ok(DeviceOp::Set {
                key: key.to_string(),
                value,
            });
        }
        if let Some(key) = s.strip_prefix("get:") {
            return Ok(DeviceOp::Get {
                key: key.to_string(),
            });
        }
        Err(ScriptError::UnknownOperation(s.to_string()))
    }
}

impl fmt::Display for DeviceOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceOp::PowerOn => f.write_str("on"),
            DeviceOp::PowerOff => f.write_str("off"),
            DeviceOp::Status => f.write_str("status"),
            DeviceOp::Fault => f.write_str("fault"),
            DeviceOp::Tick => f.write_str("tick"),
            DeviceOp::Reset => f.write_str("reset"),
            DeviceOp::Set { key, value } => write!(f, "set:{key}={value}"),
            DeviceOp::Get { key } => write!(f, "get:{key}"),
        }
    }
}

/// Successful result of one operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpOutput {
    /// State-changing operation accepted
    Done,
    /// Result of `status`
    State(DeviceState),
    /// Result of `get`
    Value(i32),
}

/// One executed step of a script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepResult {
    /// Operation that ran
    pub op: DeviceOp,
    /// What it returned
    pub result: Result<OpOutput, HalError>,
}

/// Apply one operation to `driver`.
pub fn apply(driver: &mut dyn DeviceDriver, op: &DeviceOp) -> Result<OpOutput, HalError> {
    debug!("Applying '{}' to {}", op, driver.name());
    match op {
        DeviceOp::PowerOn => driver.power_on().map(|_| OpOutput::Done),
        DeviceOp::PowerOff => driver.power_off().map(|_| OpOutput::Done),
        DeviceOp::Status => Ok(OpOutput::State(driver.status())),
        DeviceOp::Fault => driver.inject_fault().map(|_| OpOutput::Done),
        DeviceOp::Tick => driver.tick().map(|_| OpOutput::Done),
        DeviceOp::Reset => driver.reset().map(|_| OpOutput::Done),
        DeviceOp::Set { key, value } => driver.set_config(key, *value).map(|_| OpOutput::Done),
        DeviceOp::Get { key } => driver.get_config(key).map(OpOutput::Value),
    }
}

/// Run `ops` in order.
///
/// Stops after the first failing step unless `keep_going` is set; the failing
/// step is included in the returned list.
pub fn run_script(
    driver: &mut dyn DeviceDriver,
    ops: &[DeviceOp],
    keep_going: bool,
) -> Vec<StepResult> {
    let mut steps = Vec::with_capacity(ops.len());
    for op in ops {
        let result = apply(driver, op);
        let failed = result.is_err();
        steps.push(StepResult {
            op: op.clone(),
            result,
        });
        if failed && !keep_going {
            break;
        }
    }
    steps
}
