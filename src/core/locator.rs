use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Utc};
use globset::{GlobBuilder, GlobMatcher};
use log::{debug, trace};

use crate::types::{LocateError, ReportFile};

/// Layouts PIT writes reports in, with and without a timestamped subdirectory
pub const DEFAULT_PATTERNS: &[&str] = &[
    "**/target/pit-reports/mutations.xml",
    "**/target/pit-reports/*/mutations.xml",
];

/// Source of file listings and timestamps for the locator
pub trait ReportListing {
    /// Every regular file below `root`. A root that does not exist lists nothing.
    fn files(&self, root: &Path) -> Result<Vec<PathBuf>, LocateError>;

    /// Last modification time of a listed file
    fn modified(&self, path: &Path) -> Result<SystemTime, LocateError>;
}

/// Lists the real filesystem, sorted per directory
#[derive(Debug, Clone, Copy, Default)]
pub struct FsListing;

impl FsListing {
    fn walk(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), LocateError> {
        let mut entries = fs::read_dir(dir)
            .and_then(|entries| entries.collect::<Result<Vec<_>, _>>())
            .map_err(|source| LocateError::Traversal {
                path: dir.to_path_buf(),
                source,
            })?;
        entries.sort_by_key(|entry| entry.file_name());

        for entry in entries {
            let path = entry.path();
            let file_type = entry
                .file_type()
                .map_err(|source| LocateError::Traversal {
                    path: path.clone(),
                    source,
                })?;
            // symlinked directories are not descended into
            if file_type.is_dir() {
                Self::walk(&path, files)?;
            } else if path.is_file() {
                files.push(path);
            }
        }
        Ok(())
    }
}

impl ReportListing for FsListing {
    fn files(&self, root: &Path) -> Result<Vec<PathBuf>, LocateError> {
        if !root.is_dir() {
            debug!("Report root {} is not a directory", root.display());
            return Ok(vec![]);
        }
        let mut files = vec![];
        Self::walk(root, &mut files)?;
        Ok(files)
    }

    fn modified(&self, path: &Path) -> Result<SystemTime, LocateError> {
        fs::metadata(path)
            .and_then(|meta| meta.modified())
            .map_err(|source| LocateError::Metadata {
                path: path.to_path_buf(),
                source,
            })
    }
}

/// A root-relative glob where `*` stays within one path component
#[derive(Debug, Clone)]
pub struct ReportPattern {
    glob: String,
    matcher: GlobMatcher,
}

impl ReportPattern {
    pub fn new(glob: &str) -> Result<Self, LocateError> {
        let matcher = GlobBuilder::new(glob)
            .literal_separator(true)
            .build()
            .map_err(|source| LocateError::InvalidPattern {
                pattern: glob.to_string(),
                source,
            })?
            .compile_matcher();
        Ok(Self {
            glob: glob.to_string(),
            matcher,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.glob
    }

    pub fn matches(&self, relative: &Path) -> bool {
        self.matcher.is_match(relative)
    }
}

/// Finds report files under a root across every configured layout
pub struct ReportLocator {
    listing: Box<dyn ReportListing>,
    patterns: Vec<ReportPattern>,
}

impl ReportLocator {
    /// Locator over the real filesystem
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, LocateError> {
        Self::with_listing(FsListing, patterns)
    }

    pub fn with_listing<L, S>(listing: L, patterns: &[S]) -> Result<Self, LocateError>
    where
        L: ReportListing + 'static,
        S: AsRef<str>,
    {
        let patterns = patterns
            .iter()
            .map(|p| ReportPattern::new(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            listing: Box::new(listing),
            patterns,
        })
    }

    pub fn patterns(&self) -> &[ReportPattern] {
        &self.patterns
    }

    /// Distinct report paths, pattern by pattern, in first-seen order
    pub fn locate(&self, root: &Path) -> Result<Vec<PathBuf>, LocateError> {
        let files = self.listing.files(root)?;
        let mut seen: HashSet<&Path> = HashSet::new();
        let mut found = vec![];

        for pattern in &self.patterns {
            for file in &files {
                let Ok(relative) = file.strip_prefix(root) else {
                    continue;
                };
                if pattern.matches(relative) && seen.insert(file.as_path()) {
                    trace!("{} matched {}", file.display(), pattern.as_str());
                    found.push(file.clone());
                }
            }
        }

        debug!(
            "Located {} report(s) under {}",
            found.len(),
            root.display()
        );
        Ok(found)
    }

    /// The most recently modified report; ties keep the earliest located
    pub fn latest(&self, root: &Path) -> Result<Option<ReportFile>, LocateError> {
        let mut newest: Option<(PathBuf, SystemTime)> = None;
        for path in self.locate(root)? {
            let modified = self.listing.modified(&path)?;
            if newest.as_ref().is_none_or(|(_, best)| modified > *best) {
                newest = Some((path, modified));
            }
        }

        Ok(newest.map(|(path, modified)| ReportFile {
            path,
            modified: Some(DateTime::<Utc>::from(modified)),
        }))
    }
}
