// Copyright 2025 eraflo
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

//! Installs the process-wide `log` sink.
//!
//! Android builds write to logcat under the configured tag. Every other target
//! uses `env_logger`, with `RUST_LOG` taking precedence over the configured
//! filter.

use anyhow::Result;
use drift_core::LoggingConfig;
use log::LevelFilter;

/// Installs the logger described by `config`.
///
/// # Errors
///
/// On non-Android targets, fails if a logger is already installed.
#[cfg(not(target_os = "android"))]
pub fn init(config: &LoggingConfig) -> Result<()> {
    use anyhow::Context;
    use env_logger::{Builder, Env};
    use std::io::Write;

    let tag = config.tag.clone();
    Builder::from_env(Env::default().default_filter_or(config.filter.as_str()))
        .format(move |buf, record| {
            writeln!(
                buf,
                "[{}] {:<5} {}: {}",
                tag,
                record.level(),
                record.target(),
                record.args()
            )
        })
        .try_init()
        .context("a logger is already installed")
}

/// Installs the logger described by `config`.
///
/// Repeated calls are ignored.
#[cfg(target_os = "android")]
pub fn init(config: &LoggingConfig) -> Result<()> {
    android_logger::init_once(
        android_logger::Config::default()
            .with_tag(config.tag.as_str())
            .with_max_level(max_level(&config.filter)),
    );
    Ok(())
}

/// The most verbose level named anywhere in an `env_logger`-style filter.
///
/// `"warn,drift_bridge=debug"` yields `Debug`. Directives without a level
/// (a bare module name) enable everything for that module, as `env_logger`
/// does. An empty or unreadable filter falls back to `Info`.
pub fn max_level(filter: &str) -> LevelFilter {
    filter
        .split(',')
        .map(str::trim)
        .filter(|directive| !directive.is_empty())
        .map(|directive| {
            let level = directive.rsplit('=').next().unwrap_or(directive);
            match level.parse::<LevelFilter>() {
                Ok(level) => level,
                // A bare module path.
                Err(_) if !directive.contains('=') => LevelFilter::Trace,
                Err(_) => LevelFilter::Info,
            }
        })
        .max()
        .unwrap_or(LevelFilter::Info)
}
