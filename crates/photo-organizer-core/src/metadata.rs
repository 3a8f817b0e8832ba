//! Narrow interface to the capture-metadata collaborator.
//!
//! The organizer only ever needs two facts about a file: when it was captured
//! and what device or lens produced it. Providers map whatever tool they wrap
//! onto that pair; absence of either field is a normal outcome, not an error.

use chrono::NaiveDateTime;
use std::path::Path;
use std::process::Command;

/// Capture facts supplied by the metadata collaborator
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaptureMetadata {
    /// When the file was captured, if the collaborator knows
    pub capture_time: Option<NaiveDateTime>,

    /// Device or lens identifier, if the collaborator knows
    pub device_label: Option<String>,
}

/// Source of capture metadata for files being organized
pub trait MetadataProvider {
    /// Metadata for the given file. Never fails; unknown fields stay `None`.
    fn metadata_for(&self, path: &Path) -> CaptureMetadata;
}

/// Provider that knows nothing, exercising the fallback paths
#[derive(Debug, Clone, Copy, Default)]
pub struct NullProvider;

impl MetadataProvider for NullProvider {
    fn metadata_for(&self, _path: &Path) -> CaptureMetadata {
        CaptureMetadata::default()
    }
}

/// Provider backed by the `exiftool` command-line utility.
///
/// Runs `exiftool -j <path>` and reads the JSON output. Field precedence for
/// the capture time is DateTimeOriginal, then CreateDate, then MediaCreateDate;
/// for the device label it is LensModel, then LensID, then LensMake. Any
/// subprocess or parse failure degrades to empty metadata.
#[derive(Debug, Clone)]
pub struct ExiftoolProvider {
    command: String,
}

impl ExiftoolProvider {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    fn raw_fields(&self, path: &Path) -> Option<serde_json::Value> {
        let output = match Command::new(&self.command).arg("-j").arg(path).output() {
            Ok(output) => output,
            Err(e) => {
                log::debug!("exiftool not available for {}: {}", path.display(), e);
                return None;
            }
        };
        if !output.status.success() {
            log::debug!(
                "exiftool failed for {}: {}",
                path.display(),
                String::from_utf8_lossy(&output.stderr).trim()
            );
            return None;
        }

        // exiftool -j emits a one-element array of tag objects
        match serde_json::from_slice::<serde_json::Value>(&output.stdout) {
            Ok(serde_json::Value::Array(mut items)) if !items.is_empty() => {
                Some(items.remove(0))
            }
            Ok(_) => None,
            Err(e) => {
                log::debug!("exiftool output unparsable for {}: {}", path.display(), e);
                None
            }
        }
    }
}

impl MetadataProvider for ExiftoolProvider {
    fn metadata_for(&self, path: &Path) -> CaptureMetadata {
        let fields = match self.raw_fields(path) {
            Some(fields) => fields,
            None => return CaptureMetadata::default(),
        };

        let capture_time = ["DateTimeOriginal", "CreateDate", "MediaCreateDate"]
            .iter()
            .filter_map(|key| fields.get(key).and_then(|v| v.as_str()))
            .find_map(parse_exif_datetime);

        let device_label = ["LensModel", "LensID", "LensMake"]
            .iter()
            .filter_map(|key| fields.get(key).and_then(|v| v.as_str()))
            .find(|s| !s.trim().is_empty())
            .map(|s| s.to_string());

        CaptureMetadata {
            capture_time,
            device_label,
        }
    }
}

/// Parse an EXIF date string of the form `YYYY:MM:DD HH:MM:SS`
pub fn parse_exif_datetime(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, "%Y:%m:%d %H:%M:%S").ok()
}

// -- Tests --
