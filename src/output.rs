//! Output directory preparation and run summaries

use crate::error::{Error, Result};
use crate::qr::Generated;
use serde_json::{Value, json};
use std::fs;
use std::path::Path;

/// Ensure `directory` exists, creating it and any parents.
///
/// Succeeds when the directory already exists.
pub fn prepare_directory(directory: &Path) -> Result<()> {
    if directory.as_os_str().is_empty() {
        return Ok(());
    }

    fs::create_dir_all(directory).map_err(|source| Error::Directory {
        path: directory.to_path_buf(),
        source,
    })?;

    tracing::debug!(directory = %directory.display(), "Output directory ready");
    Ok(())
}

/// Outcome of one run, rendered for `--json`
#[derive(Debug)]
pub enum RunSummary<'a> {
    /// Image written
    Saved(&'a Generated),
    /// Input rejected before encoding
    Skipped {
        /// Rejected input
        data: &'a str,
        /// Reason shown to the user
        reason: String,
    },
    /// Encoding or writing failed
    Failed {
        /// Intended output path
        path: &'a Path,
        /// Reason shown to the user
        reason: String,
    },
}

impl RunSummary<'_> {
    /// Structured JSON representation
    pub fn to_json(&self) -> Value {
        match self {
            RunSummary::Saved(generated) => json!({
                "status": "saved",
                "path": generated.path.display().to_string(),
                "version": generated.version,
                "modules": generated.modules,
                "width": generated.width,
                "height": generated.height,
                "bytes_written": generated.bytes_written,
            }),
            RunSummary::Skipped { data, reason } => json!({
                "status": "skipped",
                "data": data,
                "error": reason,
            }),
            RunSummary::Failed { path, reason } => json!({
                "status": "failed",
                "path": path.display().to_string(),
                "error": reason,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_prepare_creates_nested_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let target = tmp.path().join("a").join("b");
        prepare_directory(&target).unwrap();
        assert!(target.is_dir());

        // Second call is a no-op
        prepare_directory(&target).unwrap();
    }

    #[test]
    fn test_prepare_fails_when_path_is_file() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("qr_codes");
        fs::write(&blocker, b"not a directory").unwrap();

        let err = prepare_directory(&blocker).unwrap_err();
        assert!(matches!(err, Error::Directory { .. }));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_summary_json() {
        let generated = Generated {
            path: PathBuf::from("qr_codes/github_qr.png"),
            version: 2,
            modules: 25,
            width: 350,
            height: 350,
            bytes_written: 1234,
        };
        let value = RunSummary::Saved(&generated).to_json();
        assert_eq!(value["status"], "saved");
        assert_eq!(value["width"], 350);

        let skipped = RunSummary::Skipped {
            data: "not-a-url",
            reason: "Invalid URL provided: not-a-url".to_string(),
        }
        .to_json();
        assert_eq!(skipped["status"], "skipped");
        assert_eq!(skipped["data"], "not-a-url");
    }
}
