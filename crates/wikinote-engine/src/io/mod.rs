use crate::models::{NEW_PAGE_CONTENT, StoreError, WikiId, WikiStore};
use relative_path::{RelativePath, RelativePathBuf};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid wiki directory: {0}")]
    InvalidWikiDir(String),
    #[error("Page path is not representable as a title: {0}")]
    InvalidPagePath(PathBuf),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Read a page file and return its content
pub fn read_file(relative_path: &RelativePath, wiki_root: &Path) -> Result<String, IoError> {
    let absolute_path = relative_path.to_path(wiki_root);
    if !absolute_path.exists() {
        return Err(IoError::NotFound(absolute_path));
    }
    fs::read_to_string(&absolute_path).map_err(IoError::Io)
}

/// Scan for page files (`.md`) in the wiki directory, sorted by path
pub fn scan_page_files(wiki_root: &Path) -> Result<Vec<PathBuf>, IoError> {
    validate_wiki_dir(wiki_root)?;

    let mut files = Vec::new();
    scan_directory_recursive(wiki_root, &mut files)?;
    files.sort();
    Ok(files)
}

/// Load a directory as a wiki: one page per file, titled by its relative
/// path without the `.md` extension.
///
/// The wiki is named after the directory. Every file is read before the
/// store is touched, so a failed load leaves the store unchanged.
pub fn load_wiki_dir(store: &mut WikiStore, wiki_root: &Path) -> Result<WikiId, IoError> {
    let files = scan_page_files(wiki_root)?;

    let mut pages = Vec::with_capacity(files.len());
    for path in &files {
        let relative = path
            .strip_prefix(wiki_root)
            .ok()
            .and_then(|p| RelativePathBuf::from_path(p).ok())
            .ok_or_else(|| IoError::InvalidPagePath(path.clone()))?;
        let content = read_file(&relative, wiki_root)?;
        pages.push((page_title(&relative), content));
    }

    let name = wiki_root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| wiki_root.display().to_string());
    let wiki = store.create_wiki(&name)?;

    for (title, content) in &pages {
        let content = if content.is_empty() {
            NEW_PAGE_CONTENT
        } else {
            content.as_str()
        };
        if let Err(e) = store.create_page(wiki, title, content) {
            store.delete_wiki(wiki)?;
            return Err(e.into());
        }
    }

    log::info!(
        "loaded wiki {name:?} with {} pages from {}",
        pages.len(),
        wiki_root.display()
    );
    Ok(wiki)
}

/// Page title for a file: its relative path without the `.md` extension
pub fn page_title(relative_path: &RelativePath) -> String {
    let path_str = relative_path.as_str();
    path_str.strip_suffix(".md").unwrap_or(path_str).to_string()
}

fn scan_directory_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), IoError> {
    let entries = fs::read_dir(dir).map_err(IoError::Io)?;

    for entry in entries {
        let entry = entry.map_err(IoError::Io)?;
        let path = entry.path();

        if path.is_dir() {
            scan_directory_recursive(&path, files)?;
        } else if let Some(ext) = path.extension()
            && ext == "md"
        {
            files.push(path);
        }
    }

    Ok(())
}

pub fn validate_wiki_dir(path: &Path) -> Result<(), IoError> {
    if !path.exists() || !path.is_dir() {
        return Err(IoError::InvalidWikiDir(
            "Directory does not exist".to_string(),
        ));
    }

    Ok(())
}
