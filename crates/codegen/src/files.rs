//! File-state protocol
//!
//! Decides whether a generated file is `Missing`, `Outdated`, or `Ok`, and
//! performs policy-governed atomic writes:
//!
//! - Gateway and abstract-entity files embed an `@VERSION <N>` token in
//!   their header comment; a mismatched, malformed, or unreadable token
//!   degrades to `Outdated` (regenerate), never a hard error.
//! - Entity files are discovered, not version-checked: presence alone means
//!   `Ok`, and an existing entity file is never overwritten.
//! - Writes are whole-file replaces via a temp file in the target directory
//!   plus rename, then permissions are relaxed so the hosting application
//!   can read and execute the artifact.
//! - Permission and disk failures surface as [`WriteOutcome::Failed`], not
//!   as errors, so batch runs continue past a single bad target.

use std::io::Write;
use std::path::Path;

use tablewright_core::{ArtifactKind, FileState, GenError, GenResult, WriteOutcome};

use crate::doc::VERSION_TOKEN;

/// Header lines scanned for the version token.
const HEADER_SCAN_LINES: usize = 12;

// ============================================================================
// Version extraction
// ============================================================================

/// Extract the embedded `@VERSION <N>` value from a generated file's header.
///
/// Returns `None` when the token is absent or malformed; callers treat both
/// as stale.
pub fn extract_version(content: &str) -> Option<u32> {
    for line in content.lines().take(HEADER_SCAN_LINES) {
        if let Some(idx) = line.find(VERSION_TOKEN) {
            let rest = line[idx + VERSION_TOKEN.len()..].trim();
            return rest.split_whitespace().next()?.parse().ok();
        }
    }
    None
}

// ============================================================================
// Status
// ============================================================================

/// Determine the file state for one artifact.
///
/// For versioned kinds a missing file's parent directory is created as a
/// side effect, so a subsequent write can succeed. Entity files never
/// auto-create directories — they are only ever written after their
/// abstract sibling has created the directory.
pub fn artifact_status(kind: ArtifactKind, path: &Path, version: u32) -> GenResult<FileState> {
    if !path.exists() {
        if kind.is_versioned() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| GenError::DirectoryCreate {
                    path: parent.to_path_buf(),
                    message: e.to_string(),
                })?;
            }
        }
        return Ok(FileState::Missing);
    }

    if !kind.is_versioned() {
        // Entity files: presence alone is sufficient.
        return Ok(FileState::Ok);
    }

    match std::fs::read_to_string(path) {
        Ok(content) if extract_version(&content) == Some(version) => Ok(FileState::Ok),
        // Mismatch, malformed token, or unreadable content: regenerate.
        _ => Ok(FileState::Outdated),
    }
}

// ============================================================================
// Write policy
// ============================================================================

/// Write an artifact under the kind's overwrite policy.
///
/// `render` is only invoked when the write proceeds.
pub fn write_with_policy(
    kind: ArtifactKind,
    path: &Path,
    version: u32,
    overwrite: bool,
    render: impl FnOnce() -> String,
) -> GenResult<WriteOutcome> {
    // Entity files ignore the caller's overwrite intent entirely.
    let overwrite = overwrite && kind.is_versioned();

    let status = match artifact_status(kind, path, version) {
        Ok(status) => status,
        Err(e) if e.is_io() => {
            tracing::warn!(kind = %kind, path = %path.display(), error = %e, "status check failed");
            return Ok(WriteOutcome::Failed);
        }
        Err(e) => return Err(e),
    };

    let proceed = match status {
        FileState::Missing | FileState::Outdated => true,
        FileState::Ok => overwrite,
    };
    if !proceed {
        tracing::debug!(kind = %kind, path = %path.display(), "write skipped by policy");
        return Ok(WriteOutcome::Skipped);
    }

    match write_atomic(path, &render()) {
        Ok(()) => {
            tracing::info!(kind = %kind, path = %path.display(), "artifact written");
            Ok(WriteOutcome::Written)
        }
        Err(e) => {
            tracing::warn!(kind = %kind, path = %path.display(), error = %e, "artifact write failed");
            Ok(WriteOutcome::Failed)
        }
    }
}

/// Whole-file replace: temp file in the target directory, then rename over
/// the destination, then relax permissions.
fn write_atomic(path: &Path, content: &str) -> std::io::Result<()> {
    let dir = path.parent().ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, "path has no parent")
    })?;
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    relax_permissions(path)
}

/// Let the hosting application read and execute the artifact.
fn relax_permissions(path: &Path) -> std::io::Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))?;
    }
    #[cfg(not(unix))]
    {
        let _ = path;
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
