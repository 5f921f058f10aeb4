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

use std::fs;
use std::fs::File;
use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use crate::storage::Storage;

/// A [`Storage`] backed by the local filesystem.
///
/// The default directory is the user's documents directory, falling back to the local data
/// directory on platforms without one.
#[derive(Debug, Clone, Default)]
pub struct FileSystem {
    base_dir: Option<PathBuf>,
}

impl FileSystem {
    /// Create a filesystem storage resolving the default directory from the platform.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a filesystem storage whose default directory is `base_dir`.
    ///
    /// # Examples
    ///
    /// ```
    /// use filelog::storage::FileSystem;
    /// use filelog::storage::Storage;
    ///
    /// let storage = FileSystem::with_base_dir("/var/log/my_app");
    /// assert_eq!(storage.default_dir().unwrap().to_str(), Some("/var/log/my_app"));
    /// ```
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: Some(base_dir.into()),
        }
    }
}

impl Storage for FileSystem {
    fn default_dir(&self) -> io::Result<PathBuf> {
        if let Some(dir) = &self.base_dir {
            return Ok(dir.clone());
        }
        dirs::document_dir()
            .or_else(dirs::data_local_dir)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no documents directory"))
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn append(&self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        let mut file = OpenOptions::new().append(true).create(true).open(path)?;
        file.write_all(bytes)?;
        file.flush()
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        // fs::rename replaces an existing target on unix; linking fails atomically instead
        match fs::hard_link(from, to) {
            Ok(()) => {}
            Err(err)
                if matches!(
                    err.kind(),
                    io::ErrorKind::CrossesDevices | io::ErrorKind::Unsupported
                ) =>
            {
                return copy_exclusive(from, to);
            }
            Err(err) => return Err(err),
        }
        if let Err(err) = fs::remove_file(from) {
            let _ = fs::remove_file(to);
            return Err(err);
        }
        Ok(())
    }

    fn remove(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }

    fn exists(&self, path: &Path) -> io::Result<bool> {
        fs::exists(path)
    }
}

fn copy_exclusive(from: &Path, to: &Path) -> io::Result<()> {
    let mut source = File::open(from)?;
    let mut target = OpenOptions::new().write(true).create_new(true).open(to)?;
    let copied = io::copy(&mut source, &mut target).and_then(|_| target.sync_all());
    if let Err(err) = copied {
        drop(target);
        let _ = fs::remove_file(to);
        return Err(err);
    }
    drop(target);
    drop(source);
    fs::remove_file(from)
}
