//! File probes for kernel-exposed text (procfs, sysfs).
//!
//! Every call opens a fresh handle and holds no state, so probes are safe to
//! run repeatedly and from concurrent tests. Reads are blocking and are never
//! retried or cached.

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Error returned when a path cannot be opened or fully read as text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    /// Missing, permission denied, not a readable node, or not UTF-8 text
    #[error("Unreadable path {}: {reason}", .path.display())]
    UnreadablePath {
        /// Path that was probed
        path: PathBuf,
        /// Kind of the underlying I/O failure
        kind: io::ErrorKind,
        /// Human-readable cause
        reason: String,
    },
}

impl ProbeError {
    fn from_io(path: &Path, err: io::Error) -> Self {
        ProbeError::UnreadablePath {
            path: path.to_path_buf(),
            kind: err.kind(),
            reason: err.to_string(),
        }
    }

    /// True when the path does not exist at all.
    pub fn is_not_found(&self) -> bool {
        match self {
            ProbeError::UnreadablePath { kind, .. } => *kind == io::ErrorKind::NotFound,
        }
    }
}

/// Content returned by a size-capped read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeContent {
    /// The whole file fit within the cap
    Complete(String),
    /// The file was longer than the cap; holds the leading part
    Truncated(String),
}

impl ProbeContent {
    /// The text that was read, complete or not.
    pub fn text(&self) -> &str {
        match self {
            ProbeContent::Complete(s) | ProbeContent::Truncated(s) => s,
        }
    }

    /// Whether the cap cut the read short.
    pub fn is_truncated(&self) -> bool {
        matches!(self, ProbeContent::Truncated(_))
    }

    /// Consume into the text that was read.
    pub fn into_text(self) -> String {
        match self {
            ProbeContent::Complete(s) | ProbeContent::Truncated(s) => s,
        }
    }
}

/// Read the entire content of `path` as text.
///
/// # Errors
/// Returns `ProbeError::UnreadablePath` if the path cannot be opened or read
/// to end-of-stream as UTF-8. No partial content is returned.
pub fn read_to_string(path: impl AsRef<Path>) -> Result<String, ProbeError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        debug!("Probe {} failed: {}", path.display(), e);
        ProbeError::from_io(path, e)
    })?;
    debug!("Probe {} read {} bytes", path.display(), content.len());
    Ok(content)
}

/// Read at most `max_bytes` bytes of `path` as text.
///
/// A file longer than the cap yields `ProbeContent::Truncated` with the
/// leading bytes, cut back to the last complete UTF-8 character.
///
/// # Errors
/// Returns `ProbeError::UnreadablePath` if the path cannot be opened or read,
/// or if the bytes read are not UTF-8 text.
pub fn read_capped(path: impl AsRef<Path>, max_bytes: u64) -> Result<ProbeContent, ProbeError> {
    let path = path.as_ref();
    let mut buf = Vec::new();
    File::open(path)
        .and_then(|file| file.take(max_bytes.saturating_add(1)).read_to_end(&mut buf))
        .map_err(|e| {
            debug!("Probe {} failed: {}", path.display(), e);
            ProbeError::from_io(path, e)
        })?;

    let truncated = buf.len() as u64 > max_bytes;
    if truncated {
        buf.truncate(max_bytes as usize);
        if let Err(e) = std::str::from_utf8(&buf) {
            // Only a character split at the cut is forgiven.
            if e.error_len().is_none() {
                buf.truncate(e.valid_up_to());
            }
        }
    }

    let text = String::from_utf8(buf).map_err(|e| {
        ProbeError::from_io(path, io::Error::new(io::ErrorKind::InvalidData, e))
    })?;
    debug!(
        "Probe {} read {} bytes (truncated={})",
        path.display(),
        text.len(),
        truncated
    );

    Ok(if truncated {
        ProbeContent::Truncated(text)
    } else {
        ProbeContent::Complete(text)
    })
}
