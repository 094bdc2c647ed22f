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

//! Bridge configuration.
//!
//! The defaults reproduce the host application the bridge was written for: an
//! SDL-based Android activity exposing its asset manager through a static
//! accessor. Hosts with a different activity class override the names in a
//! RON file.

use crate::error::BridgeError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Fully-qualified name of the default host activity class.
pub const DEFAULT_ACTIVITY_CLASS: &str = "org/libsdl/app/SDLActivity";
/// Name of the default static asset-manager accessor.
pub const DEFAULT_ASSET_MANAGER_METHOD: &str = "getAssetManager";
/// Signature of the default static asset-manager accessor.
pub const DEFAULT_ASSET_MANAGER_SIGNATURE: &str = "()Landroid/content/res/AssetManager;";

/// Names the bridge needs to locate the host's resource manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Fully-qualified, slash-separated name of the host activity class.
    pub activity_class: String,
    /// Static method on the activity returning the resource manager object.
    pub asset_manager_method: String,
    /// Runtime signature of [`Self::asset_manager_method`].
    pub asset_manager_signature: String,
    /// Log sink settings.
    pub logging: LoggingConfig,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            activity_class: DEFAULT_ACTIVITY_CLASS.to_string(),
            asset_manager_method: DEFAULT_ASSET_MANAGER_METHOD.to_string(),
            asset_manager_signature: DEFAULT_ASSET_MANAGER_SIGNATURE.to_string(),
            logging: LoggingConfig::default(),
        }
    }
}

impl BridgeConfig {
    /// Parses a configuration from RON text. Missing fields take their defaults.
    pub fn from_ron_str(text: &str) -> Result<Self, BridgeError> {
        Ok(ron::from_str(text)?)
    }

    /// Reads and parses a RON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, BridgeError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_ron_str(&text)
    }
}

/// Settings for the log sink installed by the platform backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Tag attached to every line written to the platform log.
    pub tag: String,
    /// Default filter, in `env_logger` syntax (e.g. `"info"` or `"drift_bridge=debug"`).
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            tag: "drift".to_string(),
            filter: "info".to_string(),
        }
    }
}
