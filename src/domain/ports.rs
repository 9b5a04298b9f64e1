use crate::domain::model::Replacement;
use std::ffi::OsString;
use std::io;
use std::path::Path;

/// Filesystem operations the reorganizer needs. Listings are non-recursive
/// and returned in whatever order the backend enumerates them.
pub trait FileSystem {
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<OsString>>;
    fn exists(&self, path: &Path) -> bool;
    fn is_dir(&self, path: &Path) -> bool;
    fn create_dir(&self, path: &Path) -> io::Result<()>;
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;
}

impl<F: FileSystem + ?Sized> FileSystem for &F {
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<OsString>> {
        (**self).list_dir(dir)
    }

    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        (**self).is_dir(path)
    }

    fn create_dir(&self, path: &Path) -> io::Result<()> {
        (**self).create_dir(path)
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        (**self).rename(from, to)
    }
}

pub trait ConfigProvider {
    fn layers_dir(&self) -> &Path;
    fn color_tag(&self) -> &str;
    fn color_name(&self) -> &str;
    fn dir_delimiter(&self) -> char;
    fn extension(&self) -> &str;
    fn replace_all(&self) -> bool;
    fn extra_replacements(&self) -> &[Replacement];
    fn create_missing_dirs(&self) -> bool;
    fn overwrite_existing(&self) -> bool;
    fn dry_run(&self) -> bool;
}
