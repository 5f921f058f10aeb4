// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::collections::HashMap;
use std::io;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

use crate::storage::Storage;

/// An in-memory [`Storage`], useful for tests.
///
/// Clones share the same files, so a handle kept by the caller observes what the logger wrote.
/// Directories are implicit; creating one fails only if a file sits on its path.
///
/// # Examples
///
/// ```
/// use filelog::LogLevel;
/// use filelog::storage::MemoryStorage;
///
/// let storage = MemoryStorage::default();
/// let logger = filelog::builder().storage(storage.clone()).build().unwrap();
/// logger.log_message("boot ok", LogLevel::Info, LogLevel::Info.into());
/// assert_eq!(storage.read_to_string(&logger.location()).unwrap(), "[INFO] boot ok\n");
/// ```
#[derive(Debug, Clone)]
pub struct MemoryStorage {
    inner: Arc<MemoryInner>,
}

#[derive(Debug)]
struct MemoryInner {
    default_dir: Option<PathBuf>,
    read_only: AtomicBool,
    files: Mutex<HashMap<PathBuf, Vec<u8>>>,
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::with_default_dir(Some(PathBuf::from("/memory")))
    }
}

impl MemoryStorage {
    fn with_default_dir(default_dir: Option<PathBuf>) -> Self {
        Self {
            inner: Arc::new(MemoryInner {
                default_dir,
                read_only: AtomicBool::new(false),
                files: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Create a storage whose default directory is `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_default_dir(Some(dir.into()))
    }

    /// Create a storage that cannot resolve a default directory.
    pub fn without_default_dir() -> Self {
        Self::with_default_dir(None)
    }

    /// Make every mutating operation fail with [`io::ErrorKind::PermissionDenied`].
    pub fn set_read_only(&self, read_only: bool) {
        self.inner.read_only.store(read_only, Ordering::SeqCst);
    }

    /// Return a copy of the file content at `path`.
    pub fn contents(&self, path: &Path) -> Option<Vec<u8>> {
        self.files().get(path).cloned()
    }

    /// Return the file content at `path` as a string.
    pub fn read_to_string(&self, path: &Path) -> Option<String> {
        self.contents(path)
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Put a file at `path`, replacing any existing content.
    pub fn insert(&self, path: impl Into<PathBuf>, bytes: impl Into<Vec<u8>>) {
        self.files().insert(path.into(), bytes.into());
    }

    /// Return the paths of all files, sorted.
    pub fn paths(&self) -> Vec<PathBuf> {
        let mut paths = self.files().keys().cloned().collect::<Vec<_>>();
        paths.sort();
        paths
    }

    fn files(&self) -> MutexGuard<'_, HashMap<PathBuf, Vec<u8>>> {
        self.inner.files.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn check_writable(&self, path: &Path) -> io::Result<()> {
        if self.inner.read_only.load(Ordering::SeqCst) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("{} is read-only", path.display()),
            ));
        }
        Ok(())
    }
}

impl Storage for MemoryStorage {
    fn default_dir(&self) -> io::Result<PathBuf> {
        self.inner
            .default_dir
            .clone()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no default directory"))
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        let files = self.files();
        match path.ancestors().find(|dir| files.contains_key(*dir)) {
            Some(file) => Err(io::Error::new(
                io::ErrorKind::NotADirectory,
                format!("{} is a file", file.display()),
            )),
            None => Ok(()),
        }
    }

    fn append(&self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        self.check_writable(path)?;
        self.files()
            .entry(path.to_path_buf())
            .or_default()
            .extend_from_slice(bytes);
        Ok(())
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        self.check_writable(from)?;
        let mut files = self.files();
        if files.contains_key(to) {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{} already exists", to.display()),
            ));
        }
        let bytes = files.remove(from).ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("{} not found", from.display()))
        })?;
        files.insert(to.to_path_buf(), bytes);
        Ok(())
    }

    fn remove(&self, path: &Path) -> io::Result<()> {
        self.check_writable(path)?;
        match self.files().remove(path) {
            Some(_) => Ok(()),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} not found", path.display()),
            )),
        }
    }

    fn exists(&self, path: &Path) -> io::Result<bool> {
        Ok(self.files().contains_key(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_files() {
        let storage = MemoryStorage::new("/logs");
        let handle = storage.clone();
        let path = Path::new("/logs/Logging.txt");

        storage.append(path, b"a\n").unwrap();
        storage.append(path, b"b\n").unwrap();
        assert_eq!(handle.read_to_string(path).unwrap(), "a\nb\n");

        handle.rename(path, Path::new("/other/Logging.txt")).unwrap();
        assert!(!storage.exists(path).unwrap());
        assert_eq!(storage.paths(), vec![PathBuf::from("/other/Logging.txt")]);
    }

    #[test]
    fn test_read_only_rejects_mutation() {
        let storage = MemoryStorage::default();
        let path = Path::new("/memory/Logging.txt");
        storage.insert(path, "kept\n");
        storage.set_read_only(true);

        let err = storage.append(path, b"lost\n").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
        assert!(storage.remove(path).is_err());
        assert_eq!(storage.read_to_string(path).unwrap(), "kept\n");
    }

    #[test]
    fn test_create_dir_under_file_fails() {
        let storage = MemoryStorage::default();
        storage.insert("/memory/blocker", "");

        storage.create_dir_all(Path::new("/memory/logs")).unwrap();
        let err = storage
            .create_dir_all(Path::new("/memory/blocker/sub"))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotADirectory);
    }

    #[test]
    fn test_without_default_dir() {
        let storage = MemoryStorage::without_default_dir();
        assert_eq!(storage.default_dir().unwrap_err().kind(), io::ErrorKind::NotFound);
    }
}
