use once_cell::unsync::OnceCell;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::error::Result;
use crate::hashing;

/// A file visited by the walker.
///
/// The content hash is computed lazily on first use and cached for the
/// lifetime of the record, so a file is never read twice for hashing.
#[derive(Debug)]
pub struct FileRecord {
    /// Full path to the file
    pub path: PathBuf,

    /// File size in bytes
    pub size: u64,

    /// Last modified timestamp
    pub modified: SystemTime,

    hash: OnceCell<[u8; 32]>,
}

impl FileRecord {
    pub fn new(path: PathBuf, size: u64, modified: SystemTime) -> Self {
        Self {
            path,
            size,
            modified,
            hash: OnceCell::new(),
        }
    }

    /// BLAKE3 digest of the file content, computed once and cached.
    pub fn content_hash(&self) -> Result<&[u8; 32]> {
        self.hash
            .get_or_try_init(|| hashing::compute_content_hash(&self.path))
    }

    /// The file name component of the path.
    ///
    /// Walker entries are regular files, so a missing file name cannot occur;
    /// an empty name is returned rather than panicking if it somehow does.
    pub fn file_name(&self) -> &std::ffi::OsStr {
        self.path.file_name().unwrap_or_default()
    }
}

/// Two-level destination folder produced by the classifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    /// Date folder, formatted `%Y-%m-%d`
    pub date_folder: String,

    /// Sanitized device/lens folder, "Unknown" when absent
    pub device_folder: String,
}

impl Destination {
    /// Resolve the destination directory under the given base root.
    pub fn dir_under(&self, base: &Path) -> PathBuf {
        base.join(&self.date_folder).join(&self.device_folder)
    }
}

/// How a run places files
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunMode {
    /// Move files out of the source tree into a new root
    MoveTo(PathBuf),

    /// Reorganize files in place under the source root
    InPlace,
}

impl RunMode {
    /// Base root that classified folders are created under.
    pub fn base_root<'a>(&'a self, source: &'a Path) -> &'a Path {
        match self {
            RunMode::MoveTo(dest) => dest.as_path(),
            RunMode::InPlace => source,
        }
    }
}

/// Decision reached for a single file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Placed at the destination in move mode
    Moved(PathBuf),

    /// Placed under a `_N` suffix to avoid a name collision
    Renamed(PathBuf),

    /// Placed at the destination in in-place mode
    Reorganized(PathBuf),

    /// Identical content already present, no filesystem change
    SkippedDuplicate,
}

impl Outcome {
    /// Action label written to the audit log.
    pub fn action_label(&self) -> &'static str {
        match self {
            Outcome::Moved(_) => "Moved",
            Outcome::Renamed(_) => "Renamed",
            Outcome::Reorganized(_) => "Reorganized",
            Outcome::SkippedDuplicate => "Skipped Duplicate",
        }
    }

    /// Final destination path, if the file was placed somewhere.
    pub fn destination(&self) -> Option<&Path> {
        match self {
            Outcome::Moved(p) | Outcome::Renamed(p) | Outcome::Reorganized(p) => Some(p),
            Outcome::SkippedDuplicate => None,
        }
    }
}

/// Per-run decision counts, returned by `PhotoOrganizer::run`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub moved: usize,
    pub renamed: usize,
    pub reorganized: usize,
    pub skipped_duplicates: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Moved(_) => self.moved += 1,
            Outcome::Renamed(_) => self.renamed += 1,
            Outcome::Reorganized(_) => self.reorganized += 1,
            Outcome::SkippedDuplicate => self.skipped_duplicates += 1,
        }
    }

    /// Total number of files that reached a decision or failed.
    pub fn processed(&self) -> usize {
        self.moved + self.renamed + self.reorganized + self.skipped_duplicates + self.failed
    }
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} moved, {} renamed, {} reorganized, {} skipped as duplicates, {} failed",
            self.moved, self.renamed, self.reorganized, self.skipped_duplicates, self.failed
        )
    }
}
