//! Output directory lifecycle: reset before a run, inspection after it.

use super::EXPECTED_ARTIFACTS;
use crate::error::ReportError;
use log::{debug, warn};
use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Delete every regular file directly inside `dir`
///
/// A missing directory is not an error. Subdirectories are left alone.
/// Returns the number of files removed.
pub fn clear_files(dir: &Path) -> Result<usize, ReportError> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("output directory {} does not exist yet", dir.display());
            return Ok(0);
        }
        Err(e) => return Err(ReportError::io(dir, e)),
    };

    let mut removed = 0;
    for entry in entries {
        let entry = entry.map_err(|e| ReportError::io(dir, e))?;
        let path = entry.path();
        let file_type = entry.file_type().map_err(|e| ReportError::io(&path, e))?;
        if file_type.is_dir() {
            warn!("leaving subdirectory {} in place", path.display());
            continue;
        }
        fs::remove_file(&path).map_err(|e| ReportError::io(&path, e))?;
        removed += 1;
    }

    Ok(removed)
}

/// What the output directory holds compared to the expected artifact set
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OutputCheck {
    pub missing: Vec<&'static str>,
    pub unexpected: Vec<String>,
}

impl OutputCheck {
    /// True iff the files present are exactly the expected artifacts
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty() && self.unexpected.is_empty()
    }
}

/// Compare the files directly inside `dir` against the expected artifacts
pub fn inspect(dir: &Path) -> Result<OutputCheck, ReportError> {
    let mut present = BTreeSet::new();
    for entry in fs::read_dir(dir).map_err(|e| ReportError::io(dir, e))? {
        let entry = entry.map_err(|e| ReportError::io(dir, e))?;
        if entry.file_type().map_err(|e| ReportError::io(entry.path(), e))?.is_dir() {
            continue;
        }
        present.insert(entry.file_name().to_string_lossy().into_owned());
    }

    let missing = EXPECTED_ARTIFACTS.iter().copied().filter(|name| !present.contains(*name)).collect();
    let unexpected = present.into_iter().filter(|name| !EXPECTED_ARTIFACTS.contains(&name.as_str())).collect();

    Ok(OutputCheck { missing, unexpected })
}
