//! # VTS Binary
//!
//! Command-line front end for device mocks and kernel file probes.
//!
//! # Usage
//!
//! ```bash
//! # Read a kernel node
//! vts read /proc/version
//!
//! # Read at most 64 bytes
//! vts read /sys/devices/virtual/tty/tty0/active --max-bytes 64
//!
//! # Run a probe suite, JSON report
//! vts --json probe suites/kernel_nodes.toml
//!
//! # Drive the mock device through a sequence
//! vts device on status set:TARGET_VOLTAGE=120 get:TARGET_VOLTAGE off
//!
//! # Stepped power-on, verbose logging
//! vts -v device --driver mock-stepped on status tick status
//! ```

#![deny(warnings)]

use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use vts_common::config::LogLevel;
use vts_hal::kernel::{ProbeContent, ProbeSuite, read_capped, read_to_string};
use vts_hal::script::{DeviceOp, OpOutput, StepResult, run_script};
use vts_hal::DriverRegistry;

/// VTS - device mocks and kernel interface probes for vendor test suites
#[derive(Parser, Debug)]
#[command(name = "vts")]
#[command(version)]
#[command(about = "Device state mocks and kernel interface probes")]
#[command(long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs and reports in JSON format
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Read a file and print its content
    Read {
        /// Path to read
        path: PathBuf,

        /// Read at most this many bytes
        #[arg(long, value_name = "N")]
        max_bytes: Option<u64>,
    },

    /// Run a probe suite and print its report
    Probe {
        /// Path to the suite TOML file
        suite: PathBuf,
    },

    /// Run a sequence of operations against a device driver
    Device {
        /// Registered driver to instantiate
        #[arg(short, long, default_value = "mock")]
        driver: String,

        /// Continue after a rejected operation
        #[arg(short, long)]
        keep_going: bool,

        /// Operations: on, off, status, fault, tick, reset, set:KEY=VALUE, get:KEY
        #[arg(required = true)]
        ops: Vec<DeviceOp>,
    },

    /// List registered device drivers
    Drivers,
}

fn main() {
    match run() {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            error!("vts failed: {}", e);
            std::process::exit(1);
        }
    }
}

/// Returns `Ok(false)` when the command ran but a probe or operation failed.
fn run() -> Result<bool, Box<dyn std::error::Error>> {
    let args = Args::parse();

    let suite = match &args.command {
        Command::Probe { suite } => Some(load_suite(suite)),
        _ => None,
    };
    let base_level = suite
        .as_ref()
        .and_then(|s| s.as_ref().ok())
        .map(|s| s.shared.log_level)
        .unwrap_or_default();
    setup_tracing(&args, base_level);

    match &args.command {
        Command::Read { path, max_bytes } => {
            let content = match max_bytes {
                Some(max) => read_capped(path, *max)?,
                None => ProbeContent::Complete(read_to_string(path)?),
            };
            if content.is_truncated() {
                warn!("{} truncated at {:?} bytes", path.display(), max_bytes);
            }
            if args.json {
                let doc = json!({
                    "path": path,
                    "truncated": content.is_truncated(),
                    "content": content.text(),
                });
                println!("{}", serde_json::to_string_pretty(&doc)?);
            } else {
                print!("{}", content.into_text());
            }
            Ok(true)
        }
        Command::Probe { .. } => {
            let suite = suite.ok_or("probe suite was not loaded")??;
            let report = suite.run();
            if args.json {
                println!("{}", report.to_json()?);
            } else {
                println!("{report}");
            }
            Ok(report.success())
        }
        Command::Device {
            driver,
            keep_going,
            ops,
        } => {
            let registry = DriverRegistry::with_builtin();
            let mut device = registry.create_driver(driver)?;
            info!("Driver {} v{} created", device.name(), device.version());

            let steps = run_script(device.as_mut(), ops, *keep_going);
            print_steps(&steps, args.json)?;
            Ok(steps.iter().all(|s| s.result.is_ok()))
        }
        Command::Drivers => {
            let registry = DriverRegistry::with_builtin();
            for name in registry.list_drivers() {
                let device = registry.create_driver(name)?;
                println!("{name} {}", device.version());
            }
            Ok(true)
        }
    }
}

/// Load a suite, naming the path in any error.
fn load_suite(path: &Path) -> Result<ProbeSuite, Box<dyn std::error::Error>> {
    ProbeSuite::load(path).map_err(|e| format!("suite {}: {e}", path.display()).into())
}

fn print_steps(steps: &[StepResult], as_json: bool) -> Result<(), serde_json::Error> {
    if as_json {
        let doc: Vec<_> = steps
            .iter()
            .map(|step| match &step.result {
                Ok(OpOutput::Done) => json!({ "op": step.op.to_string(), "ok": true }),
                Ok(OpOutput::State(state)) => {
                    json!({ "op": step.op.to_string(), "ok": true, "state": state })
                }
                Ok(OpOutput::Value(value)) => {
                    json!({ "op": step.op.to_string(), "ok": true, "value": value })
                }
                Err(e) => {
                    json!({ "op": step.op.to_string(), "ok": false, "error": e.to_string() })
                }
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    for step in steps {
        match &step.result {
            Ok(OpOutput::Done) => println!("{} -> ok", step.op),
            Ok(OpOutput::State(state)) => println!("{} -> {}", step.op, state),
            Ok(OpOutput::Value(value)) => println!("{} -> {}", step.op, value),
            Err(e) => println!("{} -> error: {}", step.op, e),
        }
    }
    Ok(())
}

/// Setup tracing subscriber based on CLI arguments.
///
/// Logs go to stderr so reports on stdout stay machine-readable.
fn setup_tracing(args: &Args, base: LogLevel) {
    let level = if args.verbose {
        LevelFilter::DEBUG
    } else {
        base.as_directive().parse().unwrap_or(LevelFilter::INFO)
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}
