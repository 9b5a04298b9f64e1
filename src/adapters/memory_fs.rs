use crate::domain::ports::FileSystem;
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

/// In-memory filesystem with deterministic (sorted) listings. Rename follows
/// POSIX semantics: it overwrites an existing file and fails when the target's
/// parent directory is missing.
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    dirs: RefCell<BTreeSet<PathBuf>>,
    files: RefCell<BTreeSet<PathBuf>>,
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("{} not found", path.display()),
    )
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a directory and all of its ancestors.
    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let mut dirs = self.dirs.borrow_mut();
        for ancestor in path.as_ref().ancestors() {
            if ancestor.as_os_str().is_empty() {
                continue;
            }
            dirs.insert(ancestor.to_path_buf());
        }
    }

    /// Adds a file, creating its parent directories.
    pub fn add_file(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            self.add_dir(parent);
        }
        self.files.borrow_mut().insert(path.to_path_buf());
    }

    pub fn files(&self) -> Vec<PathBuf> {
        self.files.borrow().iter().cloned().collect()
    }
}

impl FileSystem for MemoryFileSystem {
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<OsString>> {
        if !self.dirs.borrow().contains(dir) {
            return Err(not_found(dir));
        }
        let mut names: BTreeSet<OsString> = BTreeSet::new();
        let dirs = self.dirs.borrow();
        let files = self.files.borrow();
        for path in dirs.iter().chain(files.iter()) {
            if path.parent() == Some(dir) {
                if let Some(name) = path.file_name() {
                    names.insert(name.to_os_string());
                }
            }
        }
        Ok(names.into_iter().collect())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.borrow().contains(path) || self.dirs.borrow().contains(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.borrow().contains(path)
    }

    fn create_dir(&self, path: &Path) -> io::Result<()> {
        if self.exists(path) {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{} already exists", path.display()),
            ));
        }
        match path.parent() {
            Some(parent) if self.is_dir(parent) => {
                self.dirs.borrow_mut().insert(path.to_path_buf());
                Ok(())
            }
            Some(parent) => Err(not_found(parent)),
            None => Err(not_found(path)),
        }
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        if !self.files.borrow().contains(from) {
            return Err(not_found(from));
        }
        match to.parent() {
            Some(parent) if self.is_dir(parent) => {}
            Some(parent) => return Err(not_found(parent)),
            None => return Err(not_found(to)),
        }
        if self.is_dir(to) {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                format!("{} is a directory", to.display()),
            ));
        }
        let mut files = self.files.borrow_mut();
        files.remove(from);
        files.insert(to.to_path_buf());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_is_sorted_and_shallow() {
        let fs = MemoryFileSystem::new();
        fs.add_file("/layers/b.png");
        fs.add_file("/layers/a.png");
        fs.add_file("/layers/Arms/inner.png");

        let names = fs.list_dir(Path::new("/layers")).unwrap();
        assert_eq!(
            names,
            vec![
                OsString::from("Arms"),
                OsString::from("a.png"),
                OsString::from("b.png")
            ]
        );
    }

    #[test]
    fn test_rename_requires_parent() {
        let fs = MemoryFileSystem::new();
        fs.add_file("/layers/a.png");

        let err = fs
            .rename(Path::new("/layers/a.png"), Path::new("/layers/Arms/a.png"))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert!(fs.exists(Path::new("/layers/a.png")));
    }

    #[test]
    fn test_rename_overwrites_existing_file() {
        let fs = MemoryFileSystem::new();
        fs.add_file("/layers/a.png");
        fs.add_file("/layers/b.png");

        fs.rename(Path::new("/layers/a.png"), Path::new("/layers/b.png"))
            .unwrap();
        assert_eq!(fs.files(), vec![PathBuf::from("/layers/b.png")]);
    }
}
