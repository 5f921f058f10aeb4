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

//! Traps observe failures that the fire-and-forget operations swallow.

use std::fmt;
use std::io;
use std::io::Write;

use crate::Error;

/// A trap for handling errors that cannot be returned to the caller.
pub trait Trap: fmt::Debug + Send + Sync + 'static {
    /// Handle an error.
    fn trap(&self, err: &Error);
}

impl<T: Trap> From<T> for Box<dyn Trap> {
    fn from(value: T) -> Self {
        Box::new(value)
    }
}

/// A trap that writes the error to stderr.
#[derive(Debug, Default)]
#[non_exhaustive]
pub struct DefaultTrap {}

impl Trap for DefaultTrap {
    fn trap(&self, err: &Error) {
        let _ = writeln!(io::stderr(), "{err}");
    }
}

/// A trap that ignores every error.
#[derive(Debug, Default)]
#[non_exhaustive]
pub struct SilentTrap {}

impl Trap for SilentTrap {
    fn trap(&self, _: &Error) {}
}

/// A trap backed by a closure.
///
/// # Examples
///
/// ```
/// use filelog::trap::CustomTrap;
///
/// let trap = CustomTrap::new(|err| eprintln!("log file failure: {err}"));
/// ```
pub struct CustomTrap {
    f: Box<dyn Fn(&Error) + Send + Sync + 'static>,
}

impl fmt::Debug for CustomTrap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CustomTrap {{ ... }}")
    }
}

impl CustomTrap {
    /// Create a trap calling `f` on every error.
    pub fn new(f: impl Fn(&Error) + Send + Sync + 'static) -> Self {
        CustomTrap { f: Box::new(f) }
    }
}

impl Trap for CustomTrap {
    fn trap(&self, err: &Error) {
        (self.f)(err)
    }
}
