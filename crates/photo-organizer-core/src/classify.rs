use chrono::{DateTime, Local, NaiveDate};

use crate::metadata::CaptureMetadata;
use crate::types::{Destination, FileRecord};

/// Derive the `{date}/{device}` destination folder for a file.
///
/// Capture time from the metadata collaborator wins; otherwise the file's
/// modification time is used, so a date is always available. The device label
/// is sanitized for use as a folder name and falls back to "Unknown". Total
/// function, no error path.
pub fn classify(record: &FileRecord, meta: &CaptureMetadata) -> Destination {
    let date = meta
        .capture_time
        .map(|t| t.date())
        .unwrap_or_else(|| modification_date(record));

    let device_folder = meta
        .device_label
        .as_deref()
        .map(sanitize_folder_name)
        .unwrap_or_else(|| "Unknown".to_string());

    Destination {
        date_folder: date.format("%Y-%m-%d").to_string(),
        device_folder,
    }
}

fn modification_date(record: &FileRecord) -> NaiveDate {
    DateTime::<Local>::from(record.modified).date_naive()
}

/// Sanitize a device label for use as a folder name.
///
/// Characters outside alphanumeric, space, underscore and hyphen become
/// underscores; a name that sanitizes to nothing maps to "Unknown".
pub fn sanitize_folder_name(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == ' ' || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();

    let trimmed = cleaned.trim();
    if trimmed.is_empty() {
        "Unknown".to_string()
    } else {
        trimmed.to_string()
    }
}

// -- Tests --
