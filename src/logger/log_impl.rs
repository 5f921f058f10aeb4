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

use std::io;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::OnceLock;

use crate::Error;
use crate::ErrorKind;
use crate::LevelMask;
use crate::LogLevel;
use crate::Trap;
use crate::layout::Layout;
use crate::layout::TagLayout;
use crate::storage::FileSystem;
use crate::storage::Storage;
use crate::trap::DefaultTrap;

/// The file name used when no location is configured.
pub const DEFAULT_FILE_NAME: &str = "Logging.txt";

static DEFAULT_LOGGER: OnceLock<Logger> = OnceLock::new();

/// Return the process-wide [`Logger`].
///
/// If no logger was installed by [`set_default_logger`] or [`LoggerBuilder::apply`], one is
/// created on the first call, writing to `Logging.txt` in the documents directory. Subsequent
/// calls return the same instance.
///
/// [`LoggerBuilder::apply`]: crate::LoggerBuilder::apply
pub fn default_logger() -> &'static Logger {
    DEFAULT_LOGGER.get_or_init(Logger::fallback)
}

/// Install `logger` as the process-wide [`Logger`].
///
/// # Errors
///
/// Return the given logger back if a process-wide logger has already been set or created.
pub fn set_default_logger(logger: Logger) -> Result<&'static Logger, Logger> {
    DEFAULT_LOGGER.set(logger)?;
    Ok(default_logger())
}

/// A logger appending leveled lines to a single log file.
///
/// The location and every access to the file are guarded by one lock, so appends never
/// interleave and a relocation never races an append.
///
/// # Examples
///
/// ```
/// use filelog::LogLevel;
/// use filelog::storage::MemoryStorage;
///
/// let logger = filelog::builder()
///     .storage(MemoryStorage::default())
///     .build()
///     .unwrap();
///
/// let mask = LogLevel::Info | LogLevel::Error;
/// logger.log_message("boot ok", LogLevel::Info, mask);
/// logger.log_message("disk fail", LogLevel::Warning, mask);
/// logger.log_message("disk fail", LogLevel::Error, mask);
/// ```
#[derive(Debug)]
pub struct Logger {
    location: Mutex<PathBuf>,
    storage: Box<dyn Storage>,
    layout: Box<dyn Layout>,
    trap: Box<dyn Trap>,
}

impl Logger {
    pub(super) fn new(
        location: PathBuf,
        storage: Box<dyn Storage>,
        layout: Box<dyn Layout>,
        trap: Box<dyn Trap>,
    ) -> Self {
        Self {
            location: Mutex::new(location),
            storage,
            layout,
            trap,
        }
    }

    // An unresolvable default directory falls back to the working directory.
    fn fallback() -> Logger {
        let storage = FileSystem::new();
        let trap = DefaultTrap::default();
        let location = match storage.default_dir() {
            Ok(dir) => dir.join(DEFAULT_FILE_NAME),
            Err(err) => {
                let err = Error::from_io_error(
                    ErrorKind::StorageUnavailable,
                    "failed to resolve default log directory",
                    err,
                );
                trap.trap(&err);
                PathBuf::from(DEFAULT_FILE_NAME)
            }
        };
        Logger::new(
            location,
            Box::new(storage),
            Box::new(TagLayout::default()),
            Box::new(trap),
        )
    }

    fn lock(&self) -> MutexGuard<'_, PathBuf> {
        self.location.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Return the current location of the log file.
    pub fn location(&self) -> PathBuf {
        self.lock().clone()
    }

    /// Change the location of the log file.
    ///
    /// A file present at the current location is moved to `location` with its content. If no
    /// file exists yet, only the stored location changes.
    ///
    /// # Errors
    ///
    /// Return a [`ErrorKind::MoveFailed`] error if the existing file cannot be moved, including
    /// when a file is already present at `location`. The location is left unchanged and the
    /// existing file stays where it was.
    pub fn set_location(&self, location: impl Into<PathBuf>) -> Result<(), Error> {
        let to = location.into();
        let mut current = self.lock();
        if *current == to {
            return Ok(());
        }

        let move_error = |message: &str, from: &Path, err: io::Error| {
            Error::from_io_error(ErrorKind::MoveFailed, message, err)
                .with_context("from", from.display())
                .with_context("to", to.display())
        };

        let exists = self
            .storage
            .exists(&current)
            .map_err(|err| {
                move_error("failed to check current log file", current.as_path(), err)
            })?;
        if exists {
            if let Some(dir) = parent_dir(&to) {
                self.storage.create_dir_all(dir).map_err(|err| {
                    move_error("failed to create target directory", current.as_path(), err)
                })?;
            }
            self.storage
                .rename(&current, &to)
                .map_err(|err| {
                    move_error("failed to relocate log file", current.as_path(), err)
                })?;
        }

        *current = to;
        Ok(())
    }

    /// Append `message` to the log file if `level` passes the `enabled` mask.
    ///
    /// A message with a concrete level is prefixed with its tag; a [`LogLevel::None`] message is
    /// written as-is. Failures are reported to the trap and never returned.
    pub fn log_message(&self, message: &str, level: LogLevel, enabled: LevelMask) {
        if !enabled.allows(level) {
            return;
        }

        let mut bytes = self.layout.format(level, message);
        bytes.push(b'\n');

        let result = {
            let location = self.lock();
            self.append(&location, &bytes)
        };

        if let Err(err) = result {
            self.trap.trap(&err);
        }
    }

    fn append(&self, location: &Path, bytes: &[u8]) -> Result<(), Error> {
        if let Some(dir) = parent_dir(location) {
            self.storage.create_dir_all(dir).map_err(|err| {
                Error::from_io_error(
                    ErrorKind::StorageUnavailable,
                    "failed to create log directory",
                    err,
                )
                .with_context("path", dir.display())
            })?;
        }
        self.storage.append(location, bytes).map_err(|err| {
            Error::from_io_error(ErrorKind::WriteFailed, "failed to append log file", err)
                .with_context("path", location.display())
        })
    }

    /// Remove the log file at the current location.
    ///
    /// The location is kept, so the next write recreates the file. Removing an absent file is a
    /// no-op. Failures are reported to the trap and never returned.
    pub fn delete_log_file(&self) {
        let result = {
            let location = self.lock();
            match self.storage.remove(&location) {
                Ok(()) => Ok(()),
                Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
                Err(err) => Err((location.clone(), err)),
            }
        };

        if let Err((location, err)) = result {
            let err =
                Error::from_io_error(ErrorKind::DeleteFailed, "failed to delete log file", err)
                    .with_context("path", location.display());
            self.trap.trap(&err);
        }
    }
}

fn parent_dir(path: &Path) -> Option<&Path> {
    path.parent().filter(|dir| !dir.as_os_str().is_empty())
}
