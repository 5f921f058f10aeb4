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

//! Persistent storage providers backing the log file.

use std::fmt;
use std::io;
use std::path::Path;
use std::path::PathBuf;

mod fs;
mod memory;

pub use self::fs::FileSystem;
pub use self::memory::MemoryStorage;

/// A provider of the file primitives the logger relies on.
///
/// Every operation may fail with a storage-level [`io::Error`]; the logger maps those failures
/// onto its own [`ErrorKind`](crate::ErrorKind).
pub trait Storage: fmt::Debug + Send + Sync + 'static {
    /// Resolve the default writable directory for the log file.
    fn default_dir(&self) -> io::Result<PathBuf>;

    /// Create the directory at `path` and all of its missing ancestors.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Append `bytes` to the file at `path`, creating the file if it does not exist.
    ///
    /// The parent directory is expected to exist.
    fn append(&self, path: &Path, bytes: &[u8]) -> io::Result<()>;

    /// Move the file at `from` to `to`.
    ///
    /// Must fail with [`io::ErrorKind::AlreadyExists`] if `to` is already present, leaving both
    /// files untouched. The parent directory of `to` is expected to exist.
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// Remove the file at `path`.
    fn remove(&self, path: &Path) -> io::Result<()>;

    /// Return `true` if a file exists at `path`.
    fn exists(&self, path: &Path) -> io::Result<bool>;
}

impl<T: Storage> From<T> for Box<dyn Storage> {
    fn from(value: T) -> Self {
        Box::new(value)
    }
}
