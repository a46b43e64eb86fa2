use std::fs;
use std::path::{Path, PathBuf};

/// Creates the upload directory when missing and returns it.
pub fn ensure_uploads_dir(dir: &Path) -> std::io::Result<PathBuf> {
    ensure_dir(dir)?;
    Ok(dir.to_path_buf())
}

fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_uploads_dir_creates_nested_dirs() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("var").join("uploads");

        let created = ensure_uploads_dir(&dir).unwrap();
        assert!(created.is_dir());

        // Idempotent
        ensure_uploads_dir(&dir).unwrap();
    }
}
