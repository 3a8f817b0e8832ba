use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::hashing;
use crate::logging;
use crate::types::{FileRecord, Outcome, RunMode};

/// Where a file can go once collisions are accounted for
enum Placement {
    /// A free slot, possibly under a `_N` suffix
    At(PathBuf),

    /// Identical content already on disk at the slot
    Duplicate,
}

/// Decides whether to place, rename, or skip each file at its destination.
///
/// Owns the set of content hashes relocated during the current run; the set
/// lives exactly as long as the relocator, so every run starts empty. The
/// first file encountered in walk order wins a destination slot; later files
/// with the same content are skipped, later files with the same name and
/// different content are suffixed.
pub struct Relocator {
    seen: HashSet<[u8; 32]>,
    dry_run: bool,
}

impl Relocator {
    pub fn new(dry_run: bool) -> Self {
        Self {
            seen: HashSet::new(),
            dry_run,
        }
    }

    /// Relocate one file into `target_dir`, deduplicating by content hash.
    ///
    /// Invariant: the returned destination is never an existing path holding
    /// different content than the source. Any I/O failure while hashing or
    /// moving is returned to the caller, which skips the file and continues.
    pub fn relocate(
        &mut self,
        record: &FileRecord,
        target_dir: &Path,
        mode: &RunMode,
    ) -> Result<Outcome> {
        let source_hash = *record.content_hash()?;

        // Content already relocated earlier in this run: skip before
        // touching the filesystem at all
        if self.seen.contains(&source_hash) {
            return Ok(Outcome::SkippedDuplicate);
        }

        let desired = target_dir.join(record.file_name());
        let final_path = match resolve_destination(&desired, &source_hash)? {
            Placement::Duplicate => return Ok(Outcome::SkippedDuplicate),
            Placement::At(path) => path,
        };

        if !self.dry_run {
            fs::create_dir_all(target_dir)?;
            move_file(&record.path, &final_path)?;
            logging::log_fs_modification(
                "move",
                &record.path,
                Some(&final_path.display().to_string()),
            );
        }
        self.seen.insert(source_hash);

        if final_path != desired {
            Ok(Outcome::Renamed(final_path))
        } else {
            match mode {
                RunMode::MoveTo(_) => Ok(Outcome::Moved(final_path)),
                RunMode::InPlace => Ok(Outcome::Reorganized(final_path)),
            }
        }
    }
}

/// Find a free slot for the file, or detect that its content is already there.
///
/// Probes the desired name first, then `name_1`, `name_2`, ... before the
/// extension. Each occupied candidate is hashed once and compared against the
/// source; a duplicate may already exist under a prior suffix.
fn resolve_destination(desired: &Path, source_hash: &[u8; 32]) -> Result<Placement> {
    if !desired.exists() {
        return Ok(Placement::At(desired.to_path_buf()));
    }
    if hashing::compute_content_hash(desired)? == *source_hash {
        return Ok(Placement::Duplicate);
    }

    let mut counter: u32 = 1;
    loop {
        let candidate = suffixed_path(desired, counter);
        if !candidate.exists() {
            return Ok(Placement::At(candidate));
        }
        if hashing::compute_content_hash(&candidate)? == *source_hash {
            return Ok(Placement::Duplicate);
        }
        counter += 1;
    }
}

/// Append `_N` to the file stem, keeping the extension
fn suffixed_path(path: &Path, counter: u32) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let name = match path.extension() {
        Some(ext) => format!("{}_{}.{}", stem, counter, ext.to_string_lossy()),
        None => format!("{}_{}", stem, counter),
    };

    path.with_file_name(name)
}

/// Move a file, degrading to copy+delete across volumes.
///
/// A failed copy leaves the source intact; only after the copy succeeds is
/// the source removed.
fn move_file(source: &Path, dest: &Path) -> Result<()> {
    match fs::rename(source, dest) {
        Ok(()) => Ok(()),
        Err(e) => {
            log::debug!(
                "rename {} -> {} failed ({}), falling back to copy",
                source.display(),
                dest.display(),
                e
            );
            fs::copy(source, dest)?;
            fs::remove_file(source)?;
            Ok(())
        }
    }
}

// -- Tests --
