// src/content/scan.rs
// =============================================================================
// Finds content files on disk.
//
// Every subcommand that touches pages starts here: walk a directory
// recursively and keep the files whose name ends with the content extension.
// Results are sorted so reports come out in a stable order.
// =============================================================================

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// All files under `dir` ending in `suffix` (e.g. ".mdx"), sorted by path.
///
/// Unreadable directory entries are logged and skipped.
pub fn content_files(dir: &Path, suffix: &str) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::warn!("skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.file_name().to_string_lossy().ends_with(suffix))
        .map(|e| e.into_path())
        .collect();

    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_finds_nested_content_files_in_order() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("b/nested")).unwrap();
        fs::write(dir.path().join("b/nested/page.mdx"), "").unwrap();
        fs::write(dir.path().join("a.mdx"), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();

        let files = content_files(dir.path(), ".mdx");
        assert_eq!(
            files,
            vec![dir.path().join("a.mdx"), dir.path().join("b/nested/page.mdx")]
        );
    }

    #[test]
    fn test_missing_directory_yields_nothing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(content_files(&dir.path().join("nope"), ".mdx").is_empty());
    }
}
