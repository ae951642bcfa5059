//! Declarative probe suites and their reports.
//!
//! A suite is a TOML file listing kernel nodes to probe, each with its own
//! expectation. `Required` probes must exist and match; `Optional` probes may
//! be absent, and absence is reported as such rather than as a pass.
//!
//! # TOML Example
//!
//! ```toml
//! [shared]
//! service_name = "kernel-nodes"
//!
//! [[probe]]
//! name = "proc_version"
//! path = "/proc/version"
//! contains = "Linux version"
//! non_empty = true
//!
//! [[probe]]
//! name = "feature_x_param"
//! path = "/sys/module/core_features/parameters/feature_x_enabled"
//! expect = "optional"
//! max_bytes = 64
//! ```

use crate::kernel::probe::{self, ProbeContent, ProbeError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};
use vts_common::config::{ConfigError, ConfigLoader, SharedConfig};

/// Whether a probed path has to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Expectation {
    /// Path must be readable and match every check
    #[default]
    Required,
    /// Path may be absent; if present it must match every check
    Optional,
}

/// One probe entry of a suite.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProbeSpec {
    /// Unique name within the suite
    pub name: String,
    /// Path to read
    pub path: PathBuf,
    /// Whether the path has to exist
    #[serde(default)]
    pub expect: Expectation,
    /// Substring the content must contain
    #[serde(default)]
    pub contains: Option<String>,
    /// Content must not be empty
    #[serde(default)]
    pub non_empty: bool,
    /// Read at most this many bytes
    #[serde(default)]
    pub max_bytes: Option<u64>,
}

/// A named list of probes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProbeSuite {
    /// Suite name and log level
    pub shared: SharedConfig,
    /// Probes, run in file order
    #[serde(default, rename = "probe")]
    pub probes: Vec<ProbeSpec>,
}

impl ProbeSuite {
    /// Load and validate a suite file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let suite = <Self as ConfigLoader>::load(path)?;
        suite.validate()?;
        Ok(suite)
    }

    /// Parse and validate suite TOML.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let suite = <Self as ConfigLoader>::from_toml_str(content)?;
        suite.validate()?;
        Ok(suite)
    }

    /// Check names, paths and caps.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if:
    /// - `service_name` is empty
    /// - a probe name is empty or duplicated
    /// - a probe path is empty
    /// - `max_bytes` is 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.shared.validate()?;

        let mut seen = HashSet::new();
        for spec in &self.probes {
            if spec.name.trim().is_empty() {
                return Err(ConfigError::ValidationError(
                    "probe name cannot be empty".to_string(),
                ));
            }
            if !seen.insert(spec.name.as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "duplicate probe name '{}'",
                    spec.name
                )));
            }
            if spec.path.as_os_str().is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "probe '{}' has an empty path",
                    spec.name
                )));
            }
            if spec.max_bytes == Some(0) {
                return Err(ConfigError::ValidationError(format!(
                    "probe '{}': max_bytes must be greater than 0",
                    spec.name
                )));
            }
        }
        Ok(())
    }

    /// Run every probe in order and collect the report.
    pub fn run(&self) -> SuiteReport {
        info!(
            "Running suite '{}' ({} probes)",
            self.shared.service_name,
            self.probes.len()
        );
        let started = Instant::now();

        let results: Vec<ProbeResult> = self.probes.iter().map(run_probe).collect();
        let summary = SuiteSummary::tally(&results, started.elapsed().as_secs_f64() * 1000.0);

        info!(
            "Suite '{}' finished: {} passed, {} absent, {} failed",
            self.shared.service_name, summary.passed, summary.absent, summary.failed
        );
        SuiteReport {
            suite: self.shared.service_name.clone(),
            results,
            summary,
        }
    }
}

/// Result of evaluating one probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ProbeOutcome {
    /// Read succeeded and every check matched
    Passed,
    /// Optional path does not exist
    Absent,
    /// Required path unreadable, or a check did not match
    Failed {
        /// Why the probe failed
        reason: String,
    },
}

/// Per-probe entry of a [`SuiteReport`].
#[derive(Debug, Clone, Serialize)]
pub struct ProbeResult {
    /// Probe name
    pub name: String,
    /// Probed path
    pub path: PathBuf,
    /// Expectation the probe ran under
    pub expect: Expectation,
    /// Verdict
    pub outcome: ProbeOutcome,
    /// Bytes of content read
    pub bytes_read: usize,
    /// Whether `max_bytes` cut the read short
    pub truncated: bool,
    /// Wall time of the probe in microseconds
    pub elapsed_us: u64,
}

/// Counts over all probes of a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SuiteSummary {
    /// Probes run
    pub total: usize,
    /// Probes that passed
    pub passed: usize,
    /// Optional probes whose path was absent
    pub absent: usize,
    /// Probes that failed
    pub failed: usize,
    /// Wall time of the run in milliseconds
    pub elapsed_ms: f64,
}

impl SuiteSummary {
    fn tally(results: &[ProbeResult], elapsed_ms: f64) -> Self {
        let mut summary = SuiteSummary {
            total: results.len(),
            elapsed_ms,
            ..Default::default()
        };
        for result in results {
            match result.outcome {
                ProbeOutcome::Passed => summary.passed += 1,
                ProbeOutcome::Absent => summary.absent += 1,
                ProbeOutcome::Failed { .. } => summary.failed += 1,
            }
        }
        summary
    }
}

/// Report of one suite run.
#[derive(Debug, Clone, Serialize)]
pub struct SuiteReport {
    /// Suite name
    pub suite: String,
    /// Per-probe results in suite order
    pub results: Vec<ProbeResult>,
    /// Counts
    pub summary: SuiteSummary,
}

impl SuiteReport {
    /// True when no probe failed.
    pub fn success(&self) -> bool {
        self.summary.failed == 0
    }

    /// Look up a result by probe name.
    pub fn result(&self, name: &str) -> Option<&ProbeResult> {
        self.results.iter().find(|r| r.name == name)
    }

    /// Render the report as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for SuiteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Suite: {}", self.suite)?;
        for r in &self.results {
            let verdict = match &r.outcome {
                ProbeOutcome::Passed => "PASS".to_string(),
                ProbeOutcome::Absent => "ABSENT".to_string(),
                ProbeOutcome::Failed { reason } => format!("FAIL ({reason})"),
            };
            writeln!(f, "  {:<8} {} [{}]", verdict, r.name, r.path.display())?;
        }
        write!(
            f,
            "Total: {}, Passed: {}, Absent: {}, Failed: {}, Time: {:.3} ms",
            self.summary.total,
            self.summary.passed,
            self.summary.absent,
            self.summary.failed,
            self.summary.elapsed_ms
        )
    }
}

fn run_probe(spec: &ProbeSpec) -> ProbeResult {
    let started = Instant::now();
    let read = match spec.max_bytes {
        Some(max) => probe::read_capped(&spec.path, max),
        None => probe::read_to_string(&spec.path).map(ProbeContent::Complete),
    };

    let (outcome, bytes_read, truncated) = match read {
        Ok(content) => (
            check_content(spec, &content),
            content.text().len(),
            content.is_truncated(),
        ),
        Err(err) => (unreadable_outcome(spec, &err), 0, false),
    };

    match &outcome {
        ProbeOutcome::Failed { reason } => warn!("Probe '{}' failed: {}", spec.name, reason),
        other => debug!("Probe '{}': {:?}", spec.name, other),
    }

    ProbeResult {
        name: spec.name.clone(),
        path: spec.path.clone(),
        expect: spec.expect,
        outcome,
        bytes_read,
        truncated,
        elapsed_us: started.elapsed().as_micros() as u64,
    }
}

fn unreadable_outcome(spec: &ProbeSpec, err: &ProbeError) -> ProbeOutcome {
    if spec.expect == Expectation::Optional && err.is_not_found() {
        return ProbeOutcome::Absent;
    }
    ProbeOutcome::Failed {
        reason: err.to_string(),
    }
}

fn check_content(spec: &ProbeSpec, content: &ProbeContent) -> ProbeOutcome {
    let text = content.text();
    if spec.non_empty && text.is_empty() {
        return ProbeOutcome::Failed {
            reason: "content is empty".to_string(),
        };
    }
    if let Some(needle) = &spec.contains {
        if !text.contains(needle.as_str()) {
            let suffix = if content.is_truncated() {
                " within max_bytes"
            } else {
                ""
            };
            return ProbeOutcome::Failed {
                reason: format!("content does not contain '{needle}'{suffix}"),
            };
        }
    }
    ProbeOutcome::Passed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(name: &str, path: &str) -> ProbeSpec {
        ProbeSpec {
            name: name.to_string(),
            path: PathBuf::from(path),
            expect: Expectation::Required,
            contains: None,
            non_empty: false,
            max_bytes: None,
        }
    }

    #[test]
    fn test_parse_minimal_suite() {
        let suite = ProbeSuite::from_toml(
            r#"
[shared]
service_name = "kernel-nodes"

[[probe]]
name = "version"
path = "/proc/version"
"#,
        )
        .unwrap();
        assert_eq!(suite.probes.len(), 1);
        assert_eq!(suite.probes[0].expect, Expectation::Required);
        assert!(suite.probes[0].contains.is_none());
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let result = ProbeSuite::from_toml(
            r#"
[shared]
service_name = "dup"

[[probe]]
name = "a"
path = "/x"

[[probe]]
name = "a"
path = "/y"
"#,
        );
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_zero_max_bytes_rejected() {
        let result = ProbeSuite::from_toml(
            "[shared]\nservice_name = \"s\"\n[[probe]]\nname = \"a\"\npath = \"/x\"\nmax_bytes = 0\n",
        );
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_unknown_probe_field_rejected() {
        let result = ProbeSuite::from_toml(
            "[shared]\nservice_name = \"s\"\n[[probe]]\nname = \"a\"\npath = \"/x\"\nretries = 3\n",
        );
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_missing_required_fails_missing_optional_absent() {
        let required = spec("req", "/definitely/missing/path");
        let mut optional = spec("opt", "/definitely/missing/path");
        optional.expect = Expectation::Optional;

        assert!(matches!(
            run_probe(&required).outcome,
            ProbeOutcome::Failed { .. }
        ));
        assert_eq!(run_probe(&optional).outcome, ProbeOutcome::Absent);
    }

    #[test]
    fn test_check_content() {
        let mut s = spec("c", "/unused");
        s.contains = Some("Linux version".to_string());
        s.non_empty = true;

        let ok = ProbeContent::Complete("Linux version 6.1.0".to_string());
        assert_eq!(check_content(&s, &ok), ProbeOutcome::Passed);

        let empty = ProbeContent::Complete(String::new());
        assert_eq!(
            check_content(&s, &empty),
            ProbeOutcome::Failed {
                reason: "content is empty".to_string()
            }
        );

        let cut = ProbeContent::Truncated("Linux".to_string());
        assert_eq!(
            check_content(&s, &cut),
            ProbeOutcome::Failed {
                reason: "content does not contain 'Linux version' within max_bytes".to_string()
            }
        );
    }

    #[test]
    fn test_summary_tally() {
        let base = ProbeResult {
            name: String::new(),
            path: PathBuf::new(),
            expect: Expectation::Required,
            outcome: ProbeOutcome::Passed,
            bytes_read: 0,
            truncated: false,
            elapsed_us: 0,
        };
        let results = vec![
            base.clone(),
            ProbeResult {
                outcome: ProbeOutcome::Absent,
                ..base.clone()
            },
            ProbeResult {
                outcome: ProbeOutcome::Failed {
                    reason: "x".to_string(),
                },
                ..base
            },
        ];
        let summary = SuiteSummary::tally(&results, 1.5);
        assert_eq!(
            summary,
            SuiteSummary {
                total: 3,
                passed: 1,
                absent: 1,
                failed: 1,
                elapsed_ms: 1.5,
            }
        );
    }
}
