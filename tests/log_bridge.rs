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

use filelog::LogLevel;
use filelog::storage::FileSystem;
use tempfile::TempDir;

#[test]
fn test_log_crate_records_reach_default_logger() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let logger = filelog::builder()
        .storage(FileSystem::with_base_dir(temp_dir.path()))
        .apply();

    filelog::bridge::setup_log_crate(LogLevel::Info | LogLevel::Error);
    assert_eq!(log::max_level(), log::LevelFilter::Info);

    log::info!("boot {}", "ok");
    log::warn!("disk fail");
    log::error!("disk fail");
    log::debug!("never written");

    let content = fs::read_to_string(logger.location()).unwrap();
    assert_eq!(content, "[INFO] boot ok\n[ERROR] disk fail\n");

    assert!(filelog::bridge::try_setup_log_crate(LogLevel::Debug.into()).is_err());
}
