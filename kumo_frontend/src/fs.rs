use std::path::{Component, Path};

/// The only question resolution ever asks the file system.
pub trait FileSystem {
    fn is_dir(&self, path: &Path) -> bool;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    #[inline]
    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }
}

impl<F: FileSystem + ?Sized> FileSystem for &F {
    #[inline]
    fn is_dir(&self, path: &Path) -> bool {
        (**self).is_dir(path)
    }
}

/// Whether `path` names a directory by its spelling alone: a trailing separator, `.` or `..`.
pub fn is_directory_like(path: &Path) -> bool {
    let trailing_separator = path
        .as_os_str()
        .to_string_lossy()
        .ends_with(std::path::is_separator);

    trailing_separator
        || matches!(
            path.components().next_back(),
            Some(Component::CurDir | Component::ParentDir | Component::RootDir)
        )
}
