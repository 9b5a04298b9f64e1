use crate::domain::ports::FileSystem;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::Path;

/// `std::fs` backed filesystem. Renames stay within one root, so no
/// cross-volume copy fallback is attempted.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl LocalFileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for LocalFileSystem {
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<OsString>> {
        fs::read_dir(dir)?
            .map(|entry| entry.map(|e| e.file_name()))
            .collect()
    }

    fn exists(&self, path: &Path) -> bool {
        // symlink_metadata so a dangling link still counts as occupied
        fs::symlink_metadata(path).is_ok()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn create_dir(&self, path: &Path) -> io::Result<()> {
        fs::create_dir(path)
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::rename(from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_list_dir_is_not_recursive() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("Arms")).unwrap();
        fs::write(temp_dir.path().join("Arms").join("inner.png"), b"").unwrap();
        fs::write(temp_dir.path().join("Body.png"), b"").unwrap();

        let mut names = LocalFileSystem::new().list_dir(temp_dir.path()).unwrap();
        names.sort();

        assert_eq!(names, vec![OsString::from("Arms"), OsString::from("Body.png")]);
    }

    #[test]
    fn test_list_missing_dir_fails() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope");
        assert!(LocalFileSystem::new().list_dir(&missing).is_err());
    }
}
