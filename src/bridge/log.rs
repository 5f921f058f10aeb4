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

//! Bridge from the [`log`] crate facade into a [`Logger`].

use std::borrow::Cow;

use crate::LevelMask;
use crate::LogLevel;
use crate::Logger;
use crate::default_logger;

impl From<log::Level> for LogLevel {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => LogLevel::Error,
            log::Level::Warn => LogLevel::Warning,
            log::Level::Info => LogLevel::Info,
            log::Level::Debug | log::Level::Trace => LogLevel::Debug,
        }
    }
}

impl From<LevelMask> for log::LevelFilter {
    fn from(mask: LevelMask) -> Self {
        if mask.contains(LogLevel::Debug) {
            log::LevelFilter::Trace
        } else if mask.contains(LogLevel::Info) {
            log::LevelFilter::Info
        } else if mask.contains(LogLevel::Warning) {
            log::LevelFilter::Warn
        } else if mask.contains(LogLevel::Error) {
            log::LevelFilter::Error
        } else {
            log::LevelFilter::Off
        }
    }
}

/// A [`log::Log`] implementation writing `log` records through a [`Logger`] with a fixed mask.
///
/// Records at `trace` are written as [`LogLevel::Debug`].
#[derive(Debug)]
pub struct LogCrateLogger {
    logger: Option<&'static Logger>,
    mask: LevelMask,
}

impl LogCrateLogger {
    /// Create a bridge to the process-wide [`default_logger`].
    pub fn new(mask: LevelMask) -> Self {
        Self { logger: None, mask }
    }

    /// Create a bridge to the given logger.
    pub fn with_logger(logger: &'static Logger, mask: LevelMask) -> Self {
        Self {
            logger: Some(logger),
            mask,
        }
    }

    fn logger(&self) -> &'static Logger {
        self.logger.unwrap_or_else(default_logger)
    }
}

impl log::Log for LogCrateLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        self.mask.allows(metadata.level().into())
    }

    fn log(&self, record: &log::Record) {
        if !log::Log::enabled(self, record.metadata()) {
            return;
        }

        let message = match record.args().as_str() {
            Some(message) => Cow::Borrowed(message),
            None => Cow::Owned(record.args().to_string()),
        };
        self.logger()
            .log_message(&message, record.level().into(), self.mask);
    }

    fn flush(&self) {}
}

/// Set up the log crate global logger, forwarding records enabled by `mask`.
///
/// # Errors
///
/// Return an error if the log crate global logger has already been set.
///
/// # Examples
///
/// ```
/// use filelog::LogLevel;
///
/// if filelog::bridge::try_setup_log_crate(LogLevel::Info | LogLevel::Error).is_err() {
///     eprintln!("failed to set up the log crate");
/// }
/// ```
pub fn try_setup_log_crate(mask: LevelMask) -> Result<(), log::SetLoggerError> {
    try_setup_log_crate_with(LogCrateLogger::new(mask))
}

/// Set up the log crate global logger with the given bridge.
///
/// # Errors
///
/// Return an error if the log crate global logger has already been set.
pub fn try_setup_log_crate_with(bridge: LogCrateLogger) -> Result<(), log::SetLoggerError> {
    let max_level = log::LevelFilter::from(bridge.mask);
    log::set_boxed_logger(Box::new(bridge))?;
    log::set_max_level(max_level);
    Ok(())
}

/// Set up the log crate global logger, forwarding records enabled by `mask`.
///
/// # Panics
///
/// Panic if the log crate global logger has already been set.
pub fn setup_log_crate(mask: LevelMask) {
    try_setup_log_crate(mask)
        .expect("setup_log_crate must be called before the log crate global logger initialized")
}
