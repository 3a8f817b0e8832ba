//! Core functionality for organizing photo collections.
//!
//! This library provides the foundational components for photo organization:
//! - File discovery under a source root
//! - Classification into date/device destination folders
//! - Deduplicating relocation with collision-safe renaming
//! - An append-only audit log of every decision

// -- External Dependencies --

use indicatif::{ProgressBar, ProgressStyle};
use log::info;

// -- Standard Library --
use std::path::Path;

// -- Internal Modules --
mod error;

// -- Public Re-exports --
pub use config::Config;
pub use error::{Error, Result};
pub use types::*;

// -- Public Modules --
pub mod audit;
pub mod classify;
pub mod config;
pub mod discovery;
pub mod hashing;
pub mod logging;
pub mod metadata;
pub mod relocate;
pub mod types;

use metadata::{ExiftoolProvider, MetadataProvider, NullProvider};

/// Main entry point for the organization process.
///
/// Walks the source root, classifies each file, relocates it with
/// deduplication, and records every decision. One file at a time, fully
/// sequential; the relocator's seen-hash set and the audit log handle are
/// constructed per run and dropped at its end.
pub struct PhotoOrganizer {
    config: Config,
    provider: Box<dyn MetadataProvider>,
}

impl PhotoOrganizer {
    /// Create a new PhotoOrganizer with the provided configuration and
    /// metadata collaborator
    pub fn new(config: Config, provider: Box<dyn MetadataProvider>) -> Self {
        Self { config, provider }
    }

    /// Create a new PhotoOrganizer with the metadata collaborator the
    /// configuration asks for
    pub fn from_config(config: Config) -> Self {
        let provider: Box<dyn MetadataProvider> = if config.use_exiftool {
            Box::new(ExiftoolProvider::new(config.exiftool_path.clone()))
        } else {
            Box::new(NullProvider)
        };
        Self::new(config, provider)
    }

    /// Discover all candidate files under the source root
    pub fn discover(&self, source: &Path) -> Result<Vec<FileRecord>> {
        discovery::discover_files(source, &self.config)
    }

    /// Run the full organization pipeline over one source tree
    pub fn run(&self, source: &Path, mode: &RunMode) -> Result<RunSummary> {
        if let RunMode::MoveTo(dest) = mode {
            if !self.config.dry_run {
                std::fs::create_dir_all(dest)?;
            }
        }

        // Discover candidates before any file is touched
        info!("Discovering files in {}...", source.display());
        let records = self.discover(source)?;
        info!("Found {} files", records.len());

        let audit_path = self
            .config
            .audit_log
            .clone()
            .unwrap_or_else(audit::default_log_path);
        let mut audit_log = audit::AuditLog::create(&audit_path)?;
        info!("Audit log: {}", audit_path.display());

        let mut relocator = relocate::Relocator::new(self.config.dry_run);
        let mut summary = RunSummary::default();
        let base_root = mode.base_root(source);

        // Create a progress bar with style
        let progress_bar = ProgressBar::new(records.len() as u64);
        progress_bar.set_style(
            ProgressStyle::default_bar()
                .template("[{eta}] {bar:40.cyan/blue} {pos}/{len} ({percent}%) {msg}")
                .unwrap()
                .progress_chars("##-"),
        );

        for record in &records {
            progress_bar.set_message(record.file_name().to_string_lossy().into_owned());

            let capture = self.provider.metadata_for(&record.path);
            let destination = classify::classify(record, &capture);
            let target_dir = destination.dir_under(base_root);

            match relocator.relocate(record, &target_dir, mode) {
                Ok(outcome) => {
                    // A log-write failure aborts the run
                    audit_log.record(&record.path, &outcome)?;
                    match outcome.destination() {
                        Some(dest) => info!(
                            "{}: {} -> {}",
                            outcome.action_label(),
                            record.path.display(),
                            dest.display()
                        ),
                        None => info!(
                            "{}: {}",
                            outcome.action_label(),
                            record.path.display()
                        ),
                    }
                    summary.record(&outcome);
                }
                Err(e) => {
                    // Per-file failure: skip the file, keep going
                    logging::log_file_error(&record.path, "relocate", &e);
                    summary.failed += 1;
                }
            }

            progress_bar.inc(1);
        }

        progress_bar.finish_with_message(summary.to_string());
        info!("Run complete: {}", summary);

        Ok(summary)
    }
}
