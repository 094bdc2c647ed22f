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

//! Android backend: JNI environment, NDK asset manager, host integration.
//!
//! The usual wiring for an SDL-hosted app is:
//!
//! ```ignore
//! let config = drift_core::BridgeConfig::load("bridge.ron").unwrap_or_default();
//! drift_infra::logging::init(&config.logging)?;
//! let platform = drift_infra::android::sdl_platform(config);
//! platform.init()?;
//! let bytes = platform.bridge().read_asset_bytes("textures/atlas.png");
//! ```

mod assets;
mod env;
#[cfg(feature = "openal")]
mod openal;
#[cfg(feature = "sdl")]
mod sdl;

pub use assets::{NdkAssetManager, NdkAssetStream};
pub use env::{JniEnvironment, VmEnvironmentSource};
#[cfg(feature = "openal")]
pub use openal::OpenAlHook;
#[cfg(feature = "sdl")]
pub use sdl::SdlEnvironmentSource;

#[cfg(feature = "sdl")]
use drift_bridge::{Bridge, CorePlatform};
#[cfg(feature = "sdl")]
use drift_core::BridgeConfig;

/// Composes the platform for an SDL-hosted activity with this build's hooks.
#[cfg(feature = "sdl")]
pub fn sdl_platform(config: BridgeConfig) -> CorePlatform<SdlEnvironmentSource> {
    CorePlatform::new(
        Bridge::with_config(SdlEnvironmentSource, config),
        super::default_hooks(),
    )
}
