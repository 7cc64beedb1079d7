use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

/// Status label PIT writes for a mutant detected by the test suite
pub const KILLED_STATUS: &str = "KILLED";

/// A candidate `mutations.xml` found under the scanned root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportFile {
    pub path: PathBuf,
    /// Only populated when reports are ranked by recency
    pub modified: Option<DateTime<Utc>>,
}

impl ReportFile {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            modified: None,
        }
    }

    /// Path below the current directory when it lies there, for log lines
    pub fn display(&self) -> String {
        let relative = std::env::current_dir()
            .ok()
            .and_then(|cwd| self.path.strip_prefix(cwd).ok().map(Path::to_path_buf));
        match relative {
            Some(rel) if !rel.as_os_str().is_empty() => rel.display().to_string(),
            _ => self.path.display().to_string(),
        }
    }
}

/// One `<mutation>` element of a report
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MutationRecord {
    pub status: Option<String>,
}

impl MutationRecord {
    pub fn with_status(status: &str) -> Self {
        Self {
            status: Some(status.to_string()),
        }
    }

    pub fn is_killed(&self) -> bool {
        self.status
            .as_deref()
            .is_some_and(|status| status.to_uppercase() == KILLED_STATUS)
    }
}

/// All mutation records of a single parsed report
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MutationData {
    pub records: Vec<MutationRecord>,
}

impl MutationData {
    pub fn total(&self) -> usize {
        self.records.len()
    }

    pub fn killed(&self) -> usize {
        self.records.iter().filter(|r| r.is_killed()).count()
    }
}
