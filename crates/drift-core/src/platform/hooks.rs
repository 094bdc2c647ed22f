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

//! Lifecycle hooks for optional native subsystems that need the runtime VM.

use super::handle::RawHandle;

/// A native subsystem that must be told about the managed runtime's VM when
/// the platform starts and stops (e.g. an audio library that calls back into
/// the runtime on its own threads).
///
/// Load and unload are distinct calls: the platform invokes
/// [`on_load`](SubsystemHook::on_load) once at init and
/// [`on_unload`](SubsystemHook::on_unload) once at shutdown.
pub trait SubsystemHook: Send + Sync {
    /// A short name used in log lines.
    fn name(&self) -> &str;

    /// Called during platform init with the runtime's VM handle.
    fn on_load(&self, vm: RawHandle);

    /// Called during platform shutdown with the same VM handle.
    fn on_unload(&self, vm: RawHandle);
}

/// The set of subsystem hooks chosen when the platform is composed.
#[derive(Default)]
pub struct HookRegistry {
    hooks: Vec<Box<dyn SubsystemHook>>,
}

impl HookRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self { hooks: Vec::new() }
    }

    /// Appends a hook. Hooks load in registration order and unload in reverse.
    pub fn register<H: SubsystemHook + 'static>(&mut self, hook: H) {
        self.hooks.push(Box::new(hook));
    }

    /// Builder-style variant of [`register`](Self::register).
    #[must_use]
    pub fn with<H: SubsystemHook + 'static>(mut self, hook: H) -> Self {
        self.register(hook);
        self
    }

    /// Runs every hook's `on_load`, in registration order.
    pub fn load_all(&self, vm: RawHandle) {
        for hook in &self.hooks {
            log::debug!("Loading subsystem hook '{}'", hook.name());
            hook.on_load(vm);
        }
    }

    /// Runs every hook's `on_unload`, in reverse registration order.
    pub fn unload_all(&self, vm: RawHandle) {
        for hook in self.hooks.iter().rev() {
            log::debug!("Unloading subsystem hook '{}'", hook.name());
            hook.on_unload(vm);
        }
    }

    /// Returns the names of the registered hooks.
    pub fn names(&self) -> Vec<&str> {
        self.hooks.iter().map(|h| h.name()).collect()
    }

    /// Returns the number of registered hooks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// Returns `true` if no hooks are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}
