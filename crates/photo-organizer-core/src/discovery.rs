use std::fs;
use std::io;
use std::path::Path;
use walkdir::WalkDir;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::types::FileRecord;

/// Discover candidate files under the source root.
///
/// The walk is sorted by file name so that "first encountered wins" in the
/// relocator is deterministic, and the full list is collected before any file
/// is touched so in-place reorganization never revisits a file it has already
/// placed.
pub fn discover_files(source: &Path, config: &Config) -> Result<Vec<FileRecord>> {
    // Check if directory exists
    if !source.is_dir() {
        return Err(Error::DirectoryNotFound(source.to_path_buf()));
    }

    // Determine max depth for directory traversal
    let max_depth = config.max_depth.unwrap_or(usize::MAX);

    // Walk the source root and collect candidate files
    let mut records = Vec::new();

    for entry in WalkDir::new(source)
        .max_depth(max_depth)
        .follow_links(config.follow_links)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
    {
        let path = entry.path();

        if is_hidden_file(path) {
            log::debug!("Skipping hidden/system file: {}", path.display());
            continue;
        }

        // Get file metadata
        match get_file_metadata(path) {
            Ok((size, modified)) => {
                records.push(FileRecord::new(path.to_path_buf(), size, modified));
            }
            Err(e) => {
                // Log error but continue with other files
                log::warn!("Error reading metadata for {}: {}", path.display(), e);
            }
        }
    }

    Ok(records)
}

/// Returns whether the file is a dotfile or a macOS resource fork ("._" prefix)
pub fn is_hidden_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Get file metadata
fn get_file_metadata(path: &Path) -> io::Result<(u64, std::time::SystemTime)> {
    let metadata = fs::metadata(path)?;
    let size = metadata.len();
    let modified = metadata.modified()?;

    Ok((size, modified))
}

// -- Tests --

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn create_test_file(dir: &Path, name: &str) -> PathBuf {
        let file_path = dir.join(name);
        let mut file = File::create(&file_path).unwrap();
        // Write some dummy data to simulate an image
        file.write_all(b"DUMMY IMAGE DATA").unwrap();
        file_path
    }

    fn setup_test_directory() -> (tempfile::TempDir, Vec<PathBuf>) {
        // Create a temporary directory for test files
        let dir = tempdir().unwrap();

        // Create a subdirectory
        let subdir_path = dir.path().join("subdir");
        fs::create_dir(&subdir_path).unwrap();

        // Create various candidate files
        let files = vec![
            create_test_file(dir.path(), "image1.jpg"),
            create_test_file(dir.path(), "image2.png"),
            create_test_file(dir.path(), "clip1.mov"),
            create_test_file(&subdir_path, "subdir_image1.jpg"),
            create_test_file(&subdir_path, "subdir_image2.png"),
        ];

        // Create hidden files that must be filtered out
        create_test_file(dir.path(), ".DS_Store");
        create_test_file(dir.path(), "._image1.jpg");

        (dir, files)
    }

    #[test]
    fn test_is_hidden_file() {
        assert!(is_hidden_file(Path::new("/photos/.DS_Store")));
        assert!(is_hidden_file(Path::new("/photos/._IMG_001.jpg")));
        assert!(is_hidden_file(Path::new(".hidden")));
        assert!(!is_hidden_file(Path::new("/photos/IMG_001.jpg")));
        assert!(!is_hidden_file(Path::new("relative.png")));
    }

    #[test]
    fn test_discover_files_filters_hidden() {
        let (dir, files) = setup_test_directory();
        let config = Config::default();

        let discovered = discover_files(dir.path(), &config).unwrap();

        // The 5 visible files, not the 2 hidden ones
        assert_eq!(discovered.len(), 5);

        let discovered_paths: Vec<PathBuf> =
            discovered.iter().map(|r| r.path.clone()).collect();
        for file_path in &files {
            assert!(discovered_paths.contains(file_path));
        }
        assert!(!discovered_paths.contains(&dir.path().join(".DS_Store")));
        assert!(!discovered_paths.contains(&dir.path().join("._image1.jpg")));
    }

    #[test]
    fn test_discover_files_sorted_by_name() {
        let (dir, _) = setup_test_directory();
        let config = Config::default();

        let discovered = discover_files(dir.path(), &config).unwrap();
        let names: Vec<String> = discovered
            .iter()
            .filter(|r| r.path.parent() == Some(dir.path()))
            .map(|r| r.file_name().to_string_lossy().into_owned())
            .collect();

        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_discover_files_with_depth_limit() {
        let (dir, _) = setup_test_directory();

        // max_depth of 1 only scans the root directory itself
        let config = Config {
            max_depth: Some(1),
            ..Config::default()
        };

        let discovered = discover_files(dir.path(), &config).unwrap();

        assert_eq!(discovered.len(), 3);
        for record in &discovered {
            assert_eq!(record.path.parent().unwrap(), dir.path());
        }
    }

    #[test]
    fn test_discover_files_nonexistent_directory() {
        let config = Config::default();
        let result = discover_files(Path::new("/path/that/does/not/exist"), &config);

        // Should return a DirectoryNotFound error
        assert!(matches!(result, Err(Error::DirectoryNotFound(_))));
    }

    #[test]
    fn test_records_carry_size_and_mtime() {
        let dir = tempdir().unwrap();
        let path = create_test_file(dir.path(), "sized.jpg");
        let config = Config::default();

        let discovered = discover_files(dir.path(), &config).unwrap();
        assert_eq!(discovered.len(), 1);
        assert_eq!(discovered[0].path, path);
        assert_eq!(discovered[0].size, b"DUMMY IMAGE DATA".len() as u64);
    }
}
