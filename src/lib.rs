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

//! A leveled logger appending human-readable lines to a single log file.
//!
//! # Overview
//!
//! Each call carries its own [`LogLevel`] and the [`LevelMask`] of levels the caller currently
//! enables. Accepted messages are tagged, terminated with a line break and appended to the log
//! file. The file can be relocated at any time, carrying its content along, or deleted.
//!
//! # Examples
//!
//! Use the process-wide logger, writing to `Logging.txt` in the documents directory:
//!
//! ```no_run
//! use filelog::LogLevel;
//!
//! let mask = LogLevel::Info | LogLevel::Error;
//! filelog::default_logger().log_message("boot ok", LogLevel::Info, mask);
//! ```
//!
//! Construct a logger explicitly and pass it to the code that logs:
//!
//! ```
//! use filelog::LevelMask;
//! use filelog::LogLevel;
//! use filelog::storage::MemoryStorage;
//!
//! let storage = MemoryStorage::default();
//! let logger = filelog::builder().storage(storage.clone()).build().unwrap();
//!
//! let mask: LevelMask = "info,error".parse().unwrap();
//! logger.log_message("boot ok", LogLevel::Info, mask);
//! logger.log_message("disk fail", LogLevel::Warning, mask);
//! logger.set_location("/memory/archive/Logging.txt").unwrap();
//! logger.log_message("disk fail", LogLevel::Error, mask);
//!
//! assert_eq!(
//!     storage.read_to_string(&logger.location()).unwrap(),
//!     "[INFO] boot ok\n[ERROR] disk fail\n",
//! );
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod layout;
pub mod level;
pub mod storage;
pub mod trap;

#[cfg(feature = "bridge-log")]
pub mod bridge;

mod error;
pub use self::error::Error;
pub use self::error::ErrorKind;

pub use self::layout::Layout;
pub use self::level::LevelMask;
pub use self::level::LogLevel;
pub use self::storage::Storage;
pub use self::trap::Trap;

mod logger;
pub use self::logger::*;
