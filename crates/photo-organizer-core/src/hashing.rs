/// Functions for hashing file content for duplicate detection
use crate::error::Result;

use std::{fs::File, io::Read, path::Path};

/// Compute the content hash of a file using the BLAKE3 algorithm
pub fn compute_content_hash<P: AsRef<Path>>(path: P) -> Result<[u8; 32]> {
    // Open the file with explicit scope to ensure it's closed promptly
    let hash = {
        let mut file = File::open(&path)?;

        // Create a BLAKE3 hasher
        let mut hasher = blake3::Hasher::new();

        // Read the file in chunks and update the hasher
        let mut buffer = [0; 8192]; // 8KB buffer
        loop {
            let bytes_read = file.read(&mut buffer)?;
            if bytes_read == 0 {
                break;
            }
            hasher.update(&buffer[..bytes_read]);
        }

        // File will be automatically closed when this scope ends
        hasher.finalize()
    };

    Ok(*hash.as_bytes())
}

// -- Tests --

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_empty_file_hash() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.jpg");
        File::create(&path).unwrap();

        let hash = compute_content_hash(&path).unwrap();
        // Published BLAKE3 digest of empty input
        assert_eq!(
            blake3::Hash::from(hash).to_string(),
            "af1349b9f5f9a1a6a0404dea36dcc9499bcb25c9adc112b7cc9a93cae41f3262"
        );
    }

    #[test]
    fn test_identical_content_same_hash() {
        let dir = tempdir().unwrap();
        let path_a = dir.path().join("a.jpg");
        let path_b = dir.path().join("b.jpg");
        File::create(&path_a).unwrap().write_all(b"PIXELS").unwrap();
        File::create(&path_b).unwrap().write_all(b"PIXELS").unwrap();

        assert_eq!(
            compute_content_hash(&path_a).unwrap(),
            compute_content_hash(&path_b).unwrap()
        );
    }

    #[test]
    fn test_different_content_different_hash() {
        let dir = tempdir().unwrap();
        let path_a = dir.path().join("a.jpg");
        let path_b = dir.path().join("b.jpg");
        File::create(&path_a).unwrap().write_all(b"PIXELS").unwrap();
        File::create(&path_b).unwrap().write_all(b"OTHER PIXELS").unwrap();

        assert_ne!(
            compute_content_hash(&path_a).unwrap(),
            compute_content_hash(&path_b).unwrap()
        );
    }

    #[test]
    fn test_missing_file_is_error() {
        assert!(compute_content_hash(Path::new("/no/such/file.jpg")).is_err());
    }
}
