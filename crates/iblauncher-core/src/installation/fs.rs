//! Filesystem provider trait for testable installation discovery.

use std::io;
use std::path::Path;

/// Trait for filesystem operations (injectable for testing).
pub trait FsProvider: Send + Sync {
    /// Whether anything (file or directory) exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Whether `path` is an existing regular file.
    fn is_file(&self, path: &Path) -> bool;

    /// Read a whole file as UTF-8 text.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

impl<T: FsProvider + ?Sized> FsProvider for std::sync::Arc<T> {
    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        (**self).is_file(path)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        (**self).read_to_string(path)
    }
}

/// Production filesystem provider that uses real filesystem operations.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemFs;

impl FsProvider for SystemFs {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }
}

/// Test/mock filesystem provider with predefined directories and files.
///
/// Adding a file or directory implicitly creates all of its ancestors.
#[cfg(test)]
#[derive(Default)]
pub struct MockFs {
    dirs: std::sync::Mutex<std::collections::HashSet<std::path::PathBuf>>,
    files: std::sync::Mutex<std::collections::HashMap<std::path::PathBuf, String>>,
}

#[cfg(test)]
impl MockFs {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_dir(self, path: impl AsRef<Path>) -> Self {
        self.add_ancestors(path.as_ref());
        self
    }

    #[must_use]
    pub fn with_file(self, path: impl AsRef<Path>, contents: impl Into<String>) -> Self {
        self.add_file(path, contents);
        self
    }

    /// Create a file after construction, simulating a later install.
    pub fn add_file(&self, path: impl AsRef<Path>, contents: impl Into<String>) {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            self.add_ancestors(parent);
        }
        self.files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), contents.into());
    }

    /// Create a directory after construction.
    pub fn add_dir(&self, path: impl AsRef<Path>) {
        self.add_ancestors(path.as_ref());
    }

    /// Delete a file or a directory subtree, simulating a vanished installation.
    pub fn remove(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        self.dirs.lock().unwrap().retain(|d| !d.starts_with(path));
        self.files.lock().unwrap().retain(|f, _| !f.starts_with(path));
    }

    fn add_ancestors(&self, path: &Path) {
        let mut dirs = self.dirs.lock().unwrap();
        for ancestor in path.ancestors() {
            if !ancestor.as_os_str().is_empty() {
                dirs.insert(ancestor.to_path_buf());
            }
        }
    }
}

#[cfg(test)]
impl FsProvider for MockFs {
    fn exists(&self, path: &Path) -> bool {
        self.dirs.lock().unwrap().contains(path) || self.files.lock().unwrap().contains_key(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains_key(path)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "mock file not found"))
    }
}
