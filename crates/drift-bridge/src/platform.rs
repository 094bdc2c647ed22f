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

//! Core platform lifecycle: init, per-frame update and shutdown.

use crate::bridge::Bridge;
use drift_core::platform::{EnvironmentSource, HookRegistry, ManagedEnv, RawHandle};
use drift_core::BridgeError;
use std::sync::{Mutex, PoisonError};

/// Owns the [`Bridge`] and the subsystem hooks chosen at compose time.
///
/// `init` captures the runtime's VM handle and loads every hook; `shutdown`
/// unloads them with the same handle, in reverse order.
pub struct CorePlatform<S: EnvironmentSource> {
    bridge: Bridge<S>,
    hooks: HookRegistry,
    vm: Mutex<Option<RawHandle>>,
}

impl<S: EnvironmentSource> CorePlatform<S> {
    /// Creates a platform around `bridge` with the given hooks.
    pub fn new(bridge: Bridge<S>, hooks: HookRegistry) -> Self {
        Self {
            bridge,
            hooks,
            vm: Mutex::new(None),
        }
    }

    /// The bridge used for class and asset access.
    pub fn bridge(&self) -> &Bridge<S> {
        &self.bridge
    }

    /// The registered subsystem hooks.
    pub fn hooks(&self) -> &HookRegistry {
        &self.hooks
    }

    /// Returns `true` between a successful `init` and the matching `shutdown`.
    pub fn is_initialized(&self) -> bool {
        self.vm.lock().unwrap_or_else(PoisonError::into_inner).is_some()
    }

    /// Starts the platform layer on the current thread.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::EnvironmentUnavailable`] if the current thread
    /// has no managed-runtime environment or the environment has no VM.
    pub fn init(&self) -> Result<(), BridgeError> {
        log::info!("Android core platform init");
        self.bridge.class_cache().clear();

        let vm = {
            let mut env = self
                .bridge
                .environment()
                .ok_or(BridgeError::EnvironmentUnavailable)?;
            env.vm_handle().ok_or(BridgeError::EnvironmentUnavailable)?
        };

        *self.vm.lock().unwrap_or_else(PoisonError::into_inner) = Some(vm);
        self.hooks.load_all(vm);
        Ok(())
    }

    /// Per-frame platform work. There is none today.
    pub fn update(&self) {}

    /// Stops the platform layer. A shutdown without a prior `init` does nothing.
    pub fn shutdown(&self) {
        let vm = self.vm.lock().unwrap_or_else(PoisonError::into_inner).take();
        match vm {
            Some(vm) => {
                self.hooks.unload_all(vm);
                log::info!("Android core platform shut down");
            }
            None => log::debug!("Core platform shutdown without init"),
        }
    }
}
