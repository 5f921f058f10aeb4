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

//! Layouts for formatting a log call into the bytes of one line.

use std::fmt;

#[cfg(feature = "jiff")]
use jiff::Zoned;
#[cfg(feature = "jiff")]
use jiff::tz::TimeZone;

use crate::level::LogLevel;

/// A layout for formatting log calls.
///
/// The returned bytes must not contain the line terminator; the logger appends it.
pub trait Layout: fmt::Debug + Send + Sync + 'static {
    /// Format a message of the given level.
    fn format(&self, level: LogLevel, message: &str) -> Vec<u8>;
}

impl<T: Layout> From<T> for Box<dyn Layout> {
    fn from(value: T) -> Self {
        Box::new(value)
    }
}

fn write_tagged(text: &mut String, level: LogLevel, message: &str) {
    if let Some(tag) = level.tag() {
        text.push('[');
        text.push_str(tag);
        text.push_str("] ");
    }
    text.push_str(message);
}

/// A layout that prefixes the message with a bracketed level tag.
///
/// Output format:
///
/// ```text
/// [INFO] boot ok
/// [ERROR] disk fail
/// untagged message
/// ```
#[derive(Debug, Clone, Default)]
#[non_exhaustive]
pub struct TagLayout {}

impl Layout for TagLayout {
    fn format(&self, level: LogLevel, message: &str) -> Vec<u8> {
        let mut text = String::with_capacity(message.len() + 10);
        write_tagged(&mut text, level, message);
        text.into_bytes()
    }
}

/// A layout that prepends a timestamp to the tagged message.
///
/// Output format:
///
/// ```text
/// 2024-08-11T22:44:57.172105+08:00 [INFO] boot ok
/// ```
///
/// By default, the system timezone is used.
#[cfg(feature = "jiff")]
#[derive(Debug, Clone, Default)]
pub struct TimestampLayout {
    tz: Option<TimeZone>,
}

#[cfg(feature = "jiff")]
impl TimestampLayout {
    /// Set the timezone for timestamps.
    ///
    /// # Examples
    ///
    /// ```
    /// use filelog::layout::TimestampLayout;
    /// use jiff::tz::TimeZone;
    ///
    /// let layout = TimestampLayout::default().timezone(TimeZone::UTC);
    /// ```
    pub fn timezone(mut self, tz: TimeZone) -> Self {
        self.tz = Some(tz);
        self
    }
}

#[cfg(feature = "jiff")]
impl Layout for TimestampLayout {
    fn format(&self, level: LogLevel, message: &str) -> Vec<u8> {
        let time = match self.tz.clone() {
            Some(tz) => Zoned::now().with_time_zone(tz),
            None => Zoned::now(),
        };
        let mut text = format!("{} ", time.strftime("%Y-%m-%dT%H:%M:%S.%6f%:z"));
        write_tagged(&mut text, level, message);
        text.into_bytes()
    }
}
