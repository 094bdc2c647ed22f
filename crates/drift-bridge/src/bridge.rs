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

//! The [`Bridge`] entry points used by native application code.

use crate::assets::AssetStreamHandle;
use crate::class_cache::{self, ClassCache};
use crate::exception::{self, FaultPolicy};
use crate::resource_manager::{self, ResourceManagerBinding};
use drift_core::asset::{AccessMode, AssetFileInfo, AssetManager};
use drift_core::platform::{EnvironmentSource, PromotedRef};
use drift_core::{BridgeConfig, BridgeError};
use std::sync::Arc;

/// Process-scoped bridge state plus the operations that use it.
///
/// A host creates one `Bridge` at startup and shares it (e.g. behind an `Arc`)
/// with every thread that needs assets or class lookups. Callers never see the
/// managed type names involved in asset access; only [`find_class`] takes one.
///
/// [`find_class`]: Bridge::find_class
pub struct Bridge<S: EnvironmentSource> {
    source: S,
    config: BridgeConfig,
    classes: ClassCache,
    resources: ResourceManagerBinding,
}

impl<S: EnvironmentSource> Bridge<S> {
    /// Creates a bridge with the default host configuration.
    pub fn new(source: S) -> Self {
        Self::with_config(source, BridgeConfig::default())
    }

    /// Creates a bridge with an explicit configuration.
    pub fn with_config(source: S, config: BridgeConfig) -> Self {
        Self {
            source,
            config,
            classes: ClassCache::new(),
            resources: ResourceManagerBinding::new(),
        }
    }

    /// The configuration this bridge was built with.
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// The environment source backing this bridge.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// The class descriptor cache.
    pub fn class_cache(&self) -> &ClassCache {
        &self.classes
    }

    /// The resource-manager slot.
    pub fn resource_binding(&self) -> &ResourceManagerBinding {
        &self.resources
    }

    /// Returns the current thread's managed-runtime environment.
    ///
    /// The environment is only valid for the calling frame. `None` means no
    /// runtime is attached to this thread.
    pub fn environment(&self) -> Option<S::Env<'_>> {
        self.source.environment()
    }

    /// Checks the current thread's environment for a pending exception and
    /// clears it. With `throw_native` a pending exception becomes an error.
    pub fn check_exception(&self, throw_native: bool) -> Result<(), BridgeError> {
        match self.environment() {
            Some(mut env) => exception::check_exception(&mut env, throw_native),
            None => Ok(()),
        }
    }

    /// Resolves a fully-qualified type name (e.g. `"org/libsdl/app/SDLActivity"`).
    ///
    /// Lookups are cached for the lifetime of the bridge. With `quiet`, a
    /// failed lookup clears the runtime's exception without reporting it.
    pub fn find_class(&self, name: &str, quiet: bool) -> Option<PromotedRef> {
        // Only `FaultPolicy::Raise` can fail.
        self.find_class_with(name, FaultPolicy::from_quiet(quiet))
            .ok()
            .flatten()
    }

    /// Resolves a type name, settling a failed lookup according to `policy`.
    ///
    /// # Errors
    ///
    /// With [`FaultPolicy::Raise`], returns [`BridgeError::ForeignException`]
    /// when the lookup left an exception pending,
    /// [`BridgeError::PromotionFailed`] when the runtime refused a
    /// process-lifetime reference, and [`BridgeError::EnvironmentUnavailable`]
    /// when no environment exists.
    pub fn find_class_with(
        &self,
        name: &str,
        policy: FaultPolicy,
    ) -> Result<Option<PromotedRef>, BridgeError> {
        if let Some(descriptor) = self.classes.get(name) {
            return Ok(Some(descriptor));
        }

        let Some(mut env) = self.environment() else {
            log::warn!("No managed-runtime environment to resolve class {}", name);
            return match policy {
                FaultPolicy::Raise => Err(BridgeError::EnvironmentUnavailable),
                _ => Ok(None),
            };
        };
        class_cache::resolve(&mut env, &self.classes, name, policy)
    }

    /// Returns the host's resource manager, binding it on first use.
    ///
    /// `for_path` names the asset that triggered the request and is only used
    /// in diagnostics. A failed binding is retried on the next call.
    pub fn resource_manager(&self, for_path: &str) -> Option<Arc<dyn AssetManager>> {
        self.resources.get_or_bind(|| {
            let Some(mut env) = self.environment() else {
                log::warn!(
                    "No managed-runtime environment to bind asset manager for asset {}",
                    for_path
                );
                return None;
            };
            resource_manager::bind(&mut env, &self.classes, &self.config, for_path)
        })
    }

    /// Opens an asset for reading. `None` if the resource manager cannot be
    /// bound or the asset does not exist.
    pub fn open_asset(&self, path: &str) -> Option<AssetStreamHandle> {
        let manager = self.resource_manager(path)?;
        match manager.open(path, AccessMode::Unknown) {
            Some(stream) => Some(AssetStreamHandle::new(path, stream)),
            None => {
                log::debug!("Asset not found: {}", path);
                None
            }
        }
    }

    /// Reads an asset fully into memory.
    ///
    /// Returns an empty buffer if the asset is unavailable or cannot be read
    /// in full; never a partially filled one.
    pub fn read_asset_bytes(&self, path: &str) -> Vec<u8> {
        let Some(mut handle) = self.open_asset(path) else {
            return Vec::new();
        };

        let bytes = match handle.read_to_vec() {
            Ok(bytes) => bytes,
            Err(err) => {
                log::warn!("Could not read asset {}: {}", path, err);
                Vec::new()
            }
        };
        handle.close();
        bytes
    }

    /// Returns a raw descriptor/offset/length view onto an asset for direct
    /// native I/O.
    ///
    /// Returns [`AssetFileInfo::NONE`] if the asset is unavailable or stored in
    /// a way that cannot be viewed through a descriptor (e.g. compressed).
    pub fn asset_file_info(&self, path: &str) -> AssetFileInfo {
        let Some(mut handle) = self.open_asset(path) else {
            return AssetFileInfo::NONE;
        };

        let info = handle.open_file_descriptor();
        // The descriptor is a duplicate and stays valid after this.
        handle.close();

        if info.is_valid() {
            info
        } else {
            log::warn!("Bad asset: {}", path);
            AssetFileInfo::NONE
        }
    }
}
