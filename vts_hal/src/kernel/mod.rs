//! Kernel interface probes.
//!
//! - [`probe`] - Read procfs/sysfs nodes as text, optionally size-capped
//! - [`suite`] - TOML-described probe suites with pass/absent/fail reports

pub mod probe;
pub mod suite;

pub use probe::{ProbeContent, ProbeError, read_capped, read_to_string};
pub use suite::{Expectation, ProbeOutcome, ProbeSuite, SuiteReport};
