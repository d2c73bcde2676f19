use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("file not found: {0}")]
    NotFound(PathBuf),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid documents directory: {0}")]
    InvalidDocsDir(PathBuf),
}

/// Read a document fully into memory.
pub fn read_file(path: &Path) -> Result<String, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(IoError::Io)
}

/// Overwrite a document in place. Callers only reach this after the whole
/// pipeline succeeded for the document.
pub fn write_file(path: &Path, content: &str) -> Result<(), IoError> {
    fs::write(path, content).map_err(IoError::Io)
}

/// Enumerate every markdown file under `root`, recursively, sorted.
pub fn scan_markdown_files(root: &Path) -> Result<Vec<PathBuf>, IoError> {
    if !root.is_dir() {
        return Err(IoError::InvalidDocsDir(root.to_path_buf()));
    }
    let mut files = Vec::new();
    scan_directory_recursive(root, &mut files)?;
    files.sort();
    Ok(files)
}

fn scan_directory_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), IoError> {
    for entry in fs::read_dir(dir).map_err(IoError::Io)? {
        let path = entry.map_err(IoError::Io)?.path();
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

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn read_write_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = create_file(&dir, "doc.md", "# Title\n\n[a](http://a.com)\n");

        let content = read_file(&path).unwrap();
        assert_eq!(content, "# Title\n\n[a](http://a.com)\n");

        write_file(&path, "rewritten\n").unwrap();
        assert_eq!(read_file(&path).unwrap(), "rewritten\n");
    }

    #[test]
    fn read_missing_file_is_not_found() {
        let result = read_file(Path::new("/this/path/does/not/exist.md"));
        assert!(matches!(result, Err(IoError::NotFound(_))));
    }

    #[test]
    fn scan_finds_nested_markdown_only() {
        let dir = TempDir::new().unwrap();
        create_file(&dir, "root.md", "root");
        create_file(&dir, "image.png", "not markdown");
        let sub = dir.path().join("nested");
        fs::create_dir(&sub).unwrap();
        fs::write(sub.join("inner.md"), "inner").unwrap();

        let files = scan_markdown_files(dir.path()).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files.iter().any(|f| f.ends_with("root.md")));
        assert!(files.iter().any(|f| f.ends_with("nested/inner.md")));
    }

    #[test]
    fn scan_of_missing_directory_fails() {
        let result = scan_markdown_files(Path::new("/does/not/exist"));
        assert!(matches!(result, Err(IoError::InvalidDocsDir(_))));
    }
}
