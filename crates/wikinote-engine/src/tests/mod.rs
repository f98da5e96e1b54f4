use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a temporary wiki directory for page files
pub fn create_test_wiki_dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

/// Create a test page file with content, creating parent folders as needed
pub fn create_test_file(wiki_dir: &TempDir, filename: &str, content: &str) -> PathBuf {
    let file_path = wiki_dir.path().join(filename);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&file_path, content).unwrap();
    file_path
}
