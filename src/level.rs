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

//! Severity levels and the enabled-level mask.

use std::fmt;
use std::ops::BitOr;
use std::ops::BitOrAssign;
use std::str::FromStr;

/// The severity of a single log call.
///
/// [`LogLevel::None`] marks an untagged message: it carries no level of its own and is written
/// whenever any level is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum LogLevel {
    /// No level; the message is written as-is.
    #[default]
    None = 0,
    /// Debug information.
    Debug = 1 << 0,
    /// General information.
    Info = 1 << 1,
    /// Warnings.
    Warning = 1 << 2,
    /// Errors.
    Error = 1 << 3,
}

impl LogLevel {
    /// All concrete levels, from the least to the most severe.
    pub const ALL: [LogLevel; 4] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warning,
        LogLevel::Error,
    ];

    /// Return the bit of this level.
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Return the short tag written in front of messages of this level.
    pub const fn tag(self) -> Option<&'static str> {
        match self {
            LogLevel::None => None,
            LogLevel::Debug => Some("DEBUG"),
            LogLevel::Info => Some("INFO"),
            LogLevel::Warning => Some("WARNING"),
            LogLevel::Error => Some("ERROR"),
        }
    }

    /// Return the lowercase name of this level, as accepted by [`FromStr`].
    pub const fn as_str(self) -> &'static str {
        match self {
            LogLevel::None => "none",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "off" => Ok(LogLevel::None),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warning),
            "error" => Ok(LogLevel::Error),
            _ => Err(anyhow::anyhow!("unknown log level: {s:?}")),
        }
    }
}

/// A set of enabled levels.
///
/// # Examples
///
/// ```
/// use filelog::LevelMask;
/// use filelog::LogLevel;
///
/// let mask = LogLevel::Info | LogLevel::Error;
/// assert!(mask.allows(LogLevel::Info));
/// assert!(!mask.allows(LogLevel::Warning));
/// assert!(mask.allows(LogLevel::None));
/// assert!(!LevelMask::NONE.allows(LogLevel::None));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LevelMask(u8);

impl LevelMask {
    /// No level is enabled; nothing is written.
    pub const NONE: LevelMask = LevelMask(0);
    /// Only [`LogLevel::Debug`].
    pub const DEBUG: LevelMask = LevelMask(LogLevel::Debug.bits());
    /// Only [`LogLevel::Info`].
    pub const INFO: LevelMask = LevelMask(LogLevel::Info.bits());
    /// Only [`LogLevel::Warning`].
    pub const WARNING: LevelMask = LevelMask(LogLevel::Warning.bits());
    /// Only [`LogLevel::Error`].
    pub const ERROR: LevelMask = LevelMask(LogLevel::Error.bits());
    /// Every level.
    pub const ALL: LevelMask = LevelMask(0b1111);

    /// Create a mask from raw bits, dropping bits that name no level.
    pub const fn from_bits_truncate(bits: u8) -> LevelMask {
        LevelMask(bits & Self::ALL.0)
    }

    /// Return the raw bits of this mask.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Return `true` if no level is enabled.
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    /// Return `true` if the bit of `level` is set. [`LogLevel::None`] is never contained.
    pub const fn contains(self, level: LogLevel) -> bool {
        self.0 & level.bits() != 0
    }

    /// Return a copy of this mask with `level` enabled.
    #[must_use]
    pub const fn with(self, level: LogLevel) -> LevelMask {
        LevelMask(self.0 | level.bits())
    }

    /// Return a copy of this mask with `level` disabled.
    #[must_use]
    pub const fn without(self, level: LogLevel) -> LevelMask {
        LevelMask(self.0 & !level.bits())
    }

    /// Decide whether a call at `level` passes this mask.
    ///
    /// Nothing passes an empty mask. Otherwise an untagged call always passes and a tagged call
    /// passes if its level is enabled.
    pub const fn allows(self, level: LogLevel) -> bool {
        !self.is_none() && (matches!(level, LogLevel::None) || self.contains(level))
    }

    /// Iterate over the enabled levels, from the least to the most severe.
    pub fn levels(self) -> impl Iterator<Item = LogLevel> {
        LogLevel::ALL.into_iter().filter(move |l| self.contains(*l))
    }
}

impl From<LogLevel> for LevelMask {
    fn from(level: LogLevel) -> Self {
        LevelMask(level.bits())
    }
}

impl BitOr for LevelMask {
    type Output = LevelMask;

    fn bitor(self, rhs: LevelMask) -> LevelMask {
        LevelMask(self.0 | rhs.0)
    }
}

impl BitOr<LogLevel> for LevelMask {
    type Output = LevelMask;

    fn bitor(self, rhs: LogLevel) -> LevelMask {
        self.with(rhs)
    }
}

impl BitOr for LogLevel {
    type Output = LevelMask;

    fn bitor(self, rhs: LogLevel) -> LevelMask {
        LevelMask::from(self).with(rhs)
    }
}

impl BitOrAssign<LogLevel> for LevelMask {
    fn bitor_assign(&mut self, rhs: LogLevel) {
        *self = self.with(rhs);
    }
}

impl FromIterator<LogLevel> for LevelMask {
    fn from_iter<I: IntoIterator<Item = LogLevel>>(iter: I) -> Self {
        iter.into_iter().fold(LevelMask::NONE, LevelMask::with)
    }
}

impl fmt::Debug for LevelMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LevelMask({self})")
    }
}

impl fmt::Display for LevelMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            return f.write_str("none");
        }
        let names = self.levels().map(LogLevel::as_str).collect::<Vec<_>>();
        f.write_str(&names.join(","))
    }
}

/// Parse a mask from a list of level names separated by `,` or `|`.
///
/// `all` enables every level; `none` and `off` contribute nothing.
impl FromStr for LevelMask {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut mask = LevelMask::NONE;
        for part in s.split([',', '|']).map(str::trim).filter(|p| !p.is_empty()) {
            if part.eq_ignore_ascii_case("all") {
                mask = LevelMask::ALL;
                continue;
            }
            mask |= part.parse::<LogLevel>()?;
        }
        Ok(mask)
    }
}
