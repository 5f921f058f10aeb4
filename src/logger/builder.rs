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

use std::path::PathBuf;

use crate::Error;
use crate::ErrorKind;
use crate::Logger;
use crate::Trap;
use crate::layout::Layout;
use crate::layout::TagLayout;
use crate::logger::DEFAULT_FILE_NAME;
use crate::logger::set_default_logger;
use crate::storage::FileSystem;
use crate::storage::Storage;
use crate::trap::DefaultTrap;

/// Create a new empty [`LoggerBuilder`] instance for configuring a logger.
///
/// # Examples
///
/// ```
/// use filelog::storage::MemoryStorage;
///
/// let logger = filelog::builder()
///     .storage(MemoryStorage::default())
///     .location("/memory/app.log")
///     .build()
///     .unwrap();
/// assert_eq!(logger.location().to_str(), Some("/memory/app.log"));
/// ```
pub fn builder() -> LoggerBuilder {
    LoggerBuilder {
        location: None,
        storage: Box::new(FileSystem::default()),
        layout: Box::new(TagLayout::default()),
        trap: Box::new(DefaultTrap::default()),
    }
}

/// A builder for configuring a [`Logger`].
#[must_use = "call `apply` to set the default logger or `build` to construct a logger instance"]
#[derive(Debug)]
pub struct LoggerBuilder {
    location: Option<PathBuf>,
    storage: Box<dyn Storage>,
    layout: Box<dyn Layout>,
    trap: Box<dyn Trap>,
}

impl LoggerBuilder {
    /// Set the initial location of the log file.
    ///
    /// Default to `Logging.txt` in the storage's default directory.
    pub fn location(mut self, location: impl Into<PathBuf>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Set the storage backing the log file.
    ///
    /// Default to [`FileSystem`].
    pub fn storage(mut self, storage: impl Into<Box<dyn Storage>>) -> Self {
        self.storage = storage.into();
        self
    }

    /// Set the layout of each line.
    ///
    /// Default to [`TagLayout`].
    ///
    /// # Examples
    ///
    /// ```
    /// use filelog::layout::TagLayout;
    ///
    /// let builder = filelog::builder().layout(TagLayout::default());
    /// ```
    pub fn layout(mut self, layout: impl Into<Box<dyn Layout>>) -> Self {
        self.layout = layout.into();
        self
    }

    /// Set the trap receiving write and delete failures.
    ///
    /// Default to [`DefaultTrap`].
    pub fn trap(mut self, trap: impl Into<Box<dyn Trap>>) -> Self {
        self.trap = trap.into();
        self
    }

    /// Build the [`Logger`].
    ///
    /// # Errors
    ///
    /// Return a [`ErrorKind::StorageUnavailable`] error if no location is set and the storage
    /// cannot resolve its default directory.
    pub fn build(self) -> Result<Logger, Error> {
        let LoggerBuilder {
            location,
            storage,
            layout,
            trap,
        } = self;

        let location = match location {
            Some(location) => location,
            None => storage
                .default_dir()
                .map_err(|err| {
                    Error::from_io_error(
                        ErrorKind::StorageUnavailable,
                        "failed to resolve default log directory",
                        err,
                    )
                })?
                .join(DEFAULT_FILE_NAME),
        };

        Ok(Logger::new(location, storage, layout, trap))
    }

    /// Build the logger and install it as the process-wide logger.
    ///
    /// This should be called early in the execution of a program, before anything calls
    /// [`default_logger`](crate::default_logger).
    ///
    /// # Errors
    ///
    /// Return an error if the logger cannot be built, or if the process-wide logger has already
    /// been set.
    pub fn try_apply(self) -> anyhow::Result<&'static Logger> {
        let logger = self.build()?;
        set_default_logger(logger)
            .map_err(|_| anyhow::anyhow!("the default logger has already been initialized"))
    }

    /// Build the logger and install it as the process-wide logger.
    ///
    /// # Panics
    ///
    /// Panic if the logger cannot be built or the process-wide logger has already been set.
    pub fn apply(self) -> &'static Logger {
        self.try_apply()
            .expect("LoggerBuilder::apply must be called before the default logger initialized")
    }
}
