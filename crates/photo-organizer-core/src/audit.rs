use std::fs::File;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::types::Outcome;

/// Append-only CSV record of every relocation decision.
///
/// One row per processed file, written and flushed immediately so a crash
/// loses at most the in-flight entry. A write failure is fatal to the run:
/// the log is the only record of side effects already performed.
pub struct AuditLog {
    writer: csv::Writer<File>,
    path: PathBuf,
}

impl AuditLog {
    /// Create the log file and write the header row.
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .map_err(|e| Error::AuditLog(format!("could not create {}: {}", path.display(), e)))?;
        let mut log = Self {
            writer: csv::Writer::from_writer(file),
            path: path.to_path_buf(),
        };
        log.write_row(&["Action", "Source Path", "Destination Path"])?;
        Ok(log)
    }

    /// Record the decision reached for one file.
    pub fn record(&mut self, source: &Path, outcome: &Outcome) -> Result<()> {
        let destination = outcome
            .destination()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.write_row(&[
            outcome.action_label(),
            &source.to_string_lossy(),
            &destination,
        ])
    }

    /// Path of the log file on disk.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_row(&mut self, fields: &[&str]) -> Result<()> {
        self.writer
            .write_record(fields)
            .map_err(|e| Error::AuditLog(format!("could not write {}: {}", self.path.display(), e)))?;
        self.writer
            .flush()
            .map_err(|e| Error::AuditLog(format!("could not flush {}: {}", self.path.display(), e)))
    }
}

/// Timestamped default log file name in the working directory
pub fn default_log_path() -> PathBuf {
    PathBuf::from(format!(
        "photo_organizer_log_{}.csv",
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    ))
}

// -- Tests --

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_header_written_on_create() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("audit.csv");
        AuditLog::create(&path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.trim(), "Action,Source Path,Destination Path");
    }

    #[test]
    fn test_rows_flushed_immediately() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("audit.csv");
        let mut log = AuditLog::create(&path).unwrap();

        log.record(
            Path::new("/in/IMG_001.jpg"),
            &Outcome::Moved(PathBuf::from("/out/2024-03-01/Unknown/IMG_001.jpg")),
        )
        .unwrap();

        // Readable before the log is dropped
        let content = fs::read_to_string(&path).unwrap();
        assert!(content
            .contains("Moved,/in/IMG_001.jpg,/out/2024-03-01/Unknown/IMG_001.jpg"));
    }

    #[test]
    fn test_skip_row_has_empty_destination() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("audit.csv");
        let mut log = AuditLog::create(&path).unwrap();

        log.record(Path::new("/in/IMG_001_copy.jpg"), &Outcome::SkippedDuplicate)
            .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let last = content.lines().last().unwrap();
        assert_eq!(last, "Skipped Duplicate,/in/IMG_001_copy.jpg,");
    }

    #[test]
    fn test_create_fails_in_missing_directory() {
        let result = AuditLog::create(Path::new("/no/such/dir/audit.csv"));
        assert!(matches!(result, Err(Error::AuditLog(_))));
    }
}
