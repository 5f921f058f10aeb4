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

use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;
use std::thread;

use filelog::ErrorKind;
use filelog::LevelMask;
use filelog::LogLevel;
use filelog::Logger;
use filelog::storage::FileSystem;
use filelog::trap::CustomTrap;
use rand::Rng;
use rand::distr::Alphanumeric;
use tempfile::TempDir;

fn file_logger(temp_dir: &TempDir) -> Logger {
    filelog::builder()
        .storage(FileSystem::with_base_dir(temp_dir.path()))
        .build()
        .unwrap()
}

fn generate_random_string() -> String {
    let mut rng = rand::rng();
    let len = rng.random_range(50..=100);
    std::iter::repeat(())
        .map(|()| rng.sample(Alphanumeric))
        .map(char::from)
        .take(len)
        .collect()
}

#[test]
fn test_default_logger_is_shared() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let installed = filelog::builder()
        .storage(FileSystem::with_base_dir(temp_dir.path()))
        .try_apply()
        .unwrap();

    let first = filelog::default_logger();
    let second = filelog::default_logger();
    assert!(std::ptr::eq(installed, first));
    assert!(std::ptr::eq(first, second));
    assert_eq!(first.location(), temp_dir.path().join("Logging.txt"));

    assert!(filelog::builder().try_apply().is_err());
}

#[test]
fn test_append_to_real_file() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let logger = file_logger(&temp_dir);
    let mask = LogLevel::Info | LogLevel::Error;

    logger.log_message("boot ok", LogLevel::Info, mask);
    logger.log_message("disk fail", LogLevel::Warning, mask);
    logger.log_message("disk fail", LogLevel::Error, mask);
    logger.log_message("untagged", LogLevel::None, mask);

    let content = fs::read_to_string(temp_dir.path().join("Logging.txt")).unwrap();
    assert_eq!(content, "[INFO] boot ok\n[ERROR] disk fail\nuntagged\n");
}

#[test]
fn test_filtered_debug_keeps_file_identical() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let logger = file_logger(&temp_dir);
    let path = temp_dir.path().join("Logging.txt");

    logger.log_message("seed", LogLevel::Error, LevelMask::ERROR);
    let before = fs::read(&path).unwrap();
    logger.log_message("noise", LogLevel::Debug, LevelMask::ALL.without(LogLevel::Debug));
    assert_eq!(fs::read(&path).unwrap(), before);

    logger.log_message("noise", LogLevel::Debug, LevelMask::NONE);
    assert_eq!(fs::read(&path).unwrap(), before);
}

#[test]
fn test_relocation_preserves_content() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let logger = file_logger(&temp_dir);
    let old = temp_dir.path().join("Logging.txt");
    let new = temp_dir.path().join("moved/into/Logging.txt");

    logger.log_message("A", LogLevel::None, LevelMask::ALL);
    logger.set_location(&new).unwrap();

    assert!(!old.exists());
    assert_eq!(fs::read_to_string(&new).unwrap(), "A\n");
    assert_eq!(logger.location(), new);
}

#[test]
fn test_relocation_onto_existing_file_is_rejected() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let logger = file_logger(&temp_dir);
    let old = temp_dir.path().join("Logging.txt");
    let taken = temp_dir.path().join("taken.txt");
    fs::write(&taken, "someone else\n").unwrap();

    logger.log_message("mine", LogLevel::Info, LevelMask::ALL);
    let err = logger.set_location(&taken).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::MoveFailed);
    assert_eq!(logger.location(), old);
    assert_eq!(fs::read_to_string(&old).unwrap(), "[INFO] mine\n");
    assert_eq!(fs::read_to_string(&taken).unwrap(), "someone else\n");
}

#[test]
fn test_delete_then_write() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let logger = file_logger(&temp_dir);
    let path = temp_dir.path().join("Logging.txt");

    logger.log_message("old", LogLevel::Info, LevelMask::ALL);
    logger.delete_log_file();
    assert!(!path.exists());

    logger.delete_log_file();
    logger.log_message("new", LogLevel::Info, LevelMask::ALL);
    assert_eq!(fs::read_to_string(&path).unwrap(), "[INFO] new\n");
}

#[test]
fn test_failures_are_trapped_by_kind() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    // a regular file where the parent directory should be
    let blocker = temp_dir.path().join("blocker");
    fs::write(&blocker, "").unwrap();
    // a directory where the log file should be
    let occupied = temp_dir.path().join("occupied");
    fs::create_dir(&occupied).unwrap();

    let seen = Arc::new(Mutex::new(vec![]));
    let recording_logger = |location: PathBuf| {
        let seen = seen.clone();
        filelog::builder()
            .location(location)
            .trap(CustomTrap::new(move |err| seen.lock().unwrap().push(err.kind())))
            .build()
            .unwrap()
    };

    recording_logger(blocker.join("sub/Logging.txt")).log_message(
        "lost",
        LogLevel::Error,
        LevelMask::ALL,
    );
    recording_logger(occupied).log_message("lost", LogLevel::Error, LevelMask::ALL);

    assert_eq!(
        *seen.lock().unwrap(),
        vec![ErrorKind::StorageUnavailable, ErrorKind::WriteFailed]
    );
}

#[test]
fn test_delete_races_appends() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let logger = file_logger(&temp_dir);
    let path = temp_dir.path().join("Logging.txt");

    let messages = (0..200)
        .map(|i| format!("{i}-{}", generate_random_string()))
        .collect::<Vec<_>>();

    let logger = &logger;
    let batch = &messages;
    thread::scope(|s| {
        s.spawn(move || {
            for message in batch {
                logger.log_message(message, LogLevel::Info, LevelMask::ALL);
            }
        });
        s.spawn(move || {
            for _ in 0..50 {
                logger.delete_log_file();
                thread::yield_now();
            }
        });
    });

    let expected = messages
        .iter()
        .map(|m| format!("[INFO] {m}"))
        .collect::<HashSet<_>>();
    if let Ok(content) = fs::read_to_string(&path) {
        assert!(content.is_empty() || content.ends_with('\n'));
        for line in content.lines() {
            assert!(expected.contains(line), "corrupted line: {line:?}");
        }
    }

    logger.log_message("after", LogLevel::Info, LevelMask::ALL);
    assert!(fs::read_to_string(&path).unwrap().ends_with("[INFO] after\n"));
}

#[test]
fn test_concurrent_appends_do_not_interleave() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let logger = file_logger(&temp_dir);
    let mask = LogLevel::Info | LogLevel::Warning;

    let threads = 8;
    let per_thread = 50;
    let messages = (0..threads)
        .map(|t| {
            (0..per_thread)
                .map(|i| format!("t{t}-{i}-{}", generate_random_string()))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    thread::scope(|s| {
        for (t, batch) in messages.iter().enumerate() {
            let logger = &logger;
            s.spawn(move || {
                let level = if t % 2 == 0 { LogLevel::Info } else { LogLevel::Warning };
                for message in batch {
                    logger.log_message(message, level, mask);
                }
            });
        }
    });

    let content = fs::read_to_string(temp_dir.path().join("Logging.txt")).unwrap();
    assert!(content.ends_with('\n'));
    let lines = content.lines().collect::<Vec<_>>();
    assert_eq!(lines.len(), threads * per_thread);

    let expected = messages
        .iter()
        .enumerate()
        .flat_map(|(t, batch)| {
            let tag = if t % 2 == 0 { "[INFO]" } else { "[WARNING]" };
            batch.iter().map(move |m| format!("{tag} {m}"))
        })
        .collect::<HashSet<_>>();
    let actual = lines.iter().map(|l| l.to_string()).collect::<HashSet<_>>();
    assert_eq!(actual, expected);
}

#[test]
fn test_relocation_races_appends() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let logger = file_logger(&temp_dir);
    let target = temp_dir.path().join("archive/Logging.txt");

    let logger = &logger;
    let moved_to = &target;
    thread::scope(|s| {
        s.spawn(move || {
            for i in 0..200 {
                logger.log_message(&format!("line {i}"), LogLevel::None, LevelMask::ALL);
            }
        });
        s.spawn(move || logger.set_location(moved_to).unwrap());
    });

    // appends before the move travel with the file, appends after it land at the target
    assert!(!temp_dir.path().join("Logging.txt").exists());
    let content = fs::read_to_string(&target).unwrap();
    assert_eq!(content.lines().count(), 200);
    assert_eq!(logger.location(), target);
}
