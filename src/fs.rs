//! Filesystem access seam
//!
//! The reconciler talks to the filesystem through this trait so tests can
//! inject stat and removal failures. `LocalFs` is the real implementation.

use std::ffi::OsString;
use std::io;
use std::path::Path;

use crate::error::SweepResult;

/// What a path turned out to be, after following symlinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    Other,
}

/// Abstract file system interface
pub trait FileSystem {
    /// List the entry names of a directory
    fn list_dir(&self, path: &Path) -> io::Result<Vec<OsString>>;

    /// Classify a path, following symlinks
    fn entry_kind(&self, path: &Path) -> io::Result<EntryKind>;

    /// Remove a file
    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Remove an empty directory
    fn remove_dir(&self, path: &Path) -> io::Result<()>;
}

/// Check whether `path` names an existing regular file.
///
/// "Not found" is a normal negative answer. Any other failure is returned to
/// the caller; it must not be read as "file absent". A same-named directory
/// is not a match.
pub fn file_exists<F: FileSystem + ?Sized>(fs: &F, path: &Path) -> SweepResult<bool> {
    match fs.entry_kind(path) {
        Ok(kind) => Ok(kind == EntryKind::File),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}

/// Local file system implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for LocalFs {
    fn list_dir(&self, path: &Path) -> io::Result<Vec<OsString>> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(path)? {
            names.push(entry?.file_name());
        }
        Ok(names)
    }

    fn entry_kind(&self, path: &Path) -> io::Result<EntryKind> {
        let metadata = std::fs::metadata(path)?;
        Ok(if metadata.is_dir() {
            EntryKind::Directory
        } else if metadata.is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        })
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        std::fs::remove_file(path)
    }

    fn remove_dir(&self, path: &Path) -> io::Result<()> {
        std::fs::remove_dir(path)
    }
}

/// Mock file system for testing
///
/// Holds a flat set of file and directory paths, plus per-path failures to
/// inject into `entry_kind` and the removal calls.
#[cfg(test)]
pub struct MockFileSystem {
    state: std::sync::Mutex<MockState>,
}

#[cfg(test)]
#[derive(Default)]
struct MockState {
    files: std::collections::BTreeSet<std::path::PathBuf>,
    dirs: std::collections::BTreeSet<std::path::PathBuf>,
    stat_errors: std::collections::BTreeMap<std::path::PathBuf, io::ErrorKind>,
    remove_errors: std::collections::BTreeSet<std::path::PathBuf>,
}

#[cfg(test)]
impl MockFileSystem {
    pub fn new() -> Self {
        Self {
            state: std::sync::Mutex::new(MockState::default()),
        }
    }

    /// Register a directory, including all its ancestors.
    pub fn add_dir(&self, path: &Path) {
        let mut state = self.state.lock().unwrap();
        let mut current = path.to_path_buf();
        loop {
            state.dirs.insert(current.clone());
            match current.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => {
                    current = parent.to_path_buf();
                }
                _ => break,
            }
        }
    }

    /// Register a file, creating its parent directories.
    pub fn add_file(&self, path: &Path) {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                self.add_dir(parent);
            }
        }
        self.state.lock().unwrap().files.insert(path.to_path_buf());
    }

    /// Make `entry_kind` fail for this path.
    pub fn fail_stat(&self, path: &Path, kind: io::ErrorKind) {
        self.state
            .lock()
            .unwrap()
            .stat_errors
            .insert(path.to_path_buf(), kind);
    }

    /// Make `remove_file`/`remove_dir` fail for this path.
    pub fn fail_remove(&self, path: &Path) {
        self.state
            .lock()
            .unwrap()
            .remove_errors
            .insert(path.to_path_buf());
    }

    pub fn has_file(&self, path: &Path) -> bool {
        self.state.lock().unwrap().files.contains(path)
    }

    pub fn has_dir(&self, path: &Path) -> bool {
        self.state.lock().unwrap().dirs.contains(path)
    }
}

#[cfg(test)]
impl FileSystem for MockFileSystem {
    fn list_dir(&self, path: &Path) -> io::Result<Vec<OsString>> {
        let state = self.state.lock().unwrap();
        if !state.dirs.contains(path) {
            return Err(io::Error::new(io::ErrorKind::NotFound, "no such directory"));
        }
        let children = state
            .files
            .iter()
            .chain(state.dirs.iter())
            .filter(|p| p.parent() == Some(path))
            .filter_map(|p| p.file_name().map(OsString::from))
            .collect();
        Ok(children)
    }

    fn entry_kind(&self, path: &Path) -> io::Result<EntryKind> {
        let state = self.state.lock().unwrap();
        if let Some(kind) = state.stat_errors.get(path) {
            return Err(io::Error::new(*kind, "injected stat failure"));
        }
        if state.files.contains(path) {
            Ok(EntryKind::File)
        } else if state.dirs.contains(path) {
            Ok(EntryKind::Directory)
        } else {
            Err(io::Error::new(io::ErrorKind::NotFound, "no such entry"))
        }
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.remove_errors.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "injected removal failure",
            ));
        }
        if state.files.remove(path) {
            Ok(())
        } else {
            Err(io::Error::new(io::ErrorKind::NotFound, "no such file"))
        }
    }

    fn remove_dir(&self, path: &Path) -> io::Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.remove_errors.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "injected removal failure",
            ));
        }
        let occupied = state
            .files
            .iter()
            .chain(state.dirs.iter())
            .any(|p| p.parent() == Some(path));
        if occupied {
            return Err(io::Error::other("directory not empty"));
        }
        if state.dirs.remove(path) {
            Ok(())
        } else {
            Err(io::Error::new(io::ErrorKind::NotFound, "no such directory"))
        }
    }
}
