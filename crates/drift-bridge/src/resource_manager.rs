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

//! Lazy binding of the host's resource manager.
//!
//! The host activity exposes its resource manager through a static accessor.
//! The first asset request walks the chain class → accessor → object → native
//! manager and keeps the result for the rest of the process. A failure at any
//! step commits nothing, so the next request walks the chain again.

use crate::class_cache::{self, ClassCache};
use crate::exception::{self, FaultPolicy};
use crate::gate::ResolveGate;
use drift_core::asset::AssetManager;
use drift_core::platform::{ManagedEnv, PromotedRef, TransientRef};
use drift_core::BridgeConfig;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A successfully bound resource manager.
#[derive(Clone)]
pub struct BoundResourceManager {
    object: PromotedRef,
    manager: Arc<dyn AssetManager>,
}

impl BoundResourceManager {
    /// The managed resource-manager object, kept alive for the process.
    pub fn object(&self) -> PromotedRef {
        self.object
    }

    /// The native view of the resource manager.
    pub fn manager(&self) -> &Arc<dyn AssetManager> {
        &self.manager
    }
}

impl fmt::Debug for BoundResourceManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundResourceManager")
            .field("object", &self.object)
            .finish_non_exhaustive()
    }
}

/// The process-scoped resource-manager slot.
#[derive(Debug, Default)]
pub struct ResourceManagerBinding {
    slot: Mutex<Option<BoundResourceManager>>,
    binding: ResolveGate,
}

impl ResourceManagerBinding {
    /// Creates an unbound slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self) -> MutexGuard<'_, Option<BoundResourceManager>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the bound manager without attempting to bind.
    pub fn current(&self) -> Option<BoundResourceManager> {
        self.slot().clone()
    }

    /// Returns `true` once binding has succeeded.
    pub fn is_bound(&self) -> bool {
        self.slot().is_some()
    }

    /// Returns the bound manager, running `bind` first if the slot is empty.
    ///
    /// Concurrent first requests wait for one `bind` and share its result. The
    /// slot itself is not locked while `bind` runs: managed code called from
    /// `bind` that requests an asset on the same thread gets `None` rather than
    /// a deadlock. A `None` from `bind` leaves the slot empty.
    pub(crate) fn get_or_bind(
        &self,
        bind: impl FnOnce() -> Option<BoundResourceManager>,
    ) -> Option<Arc<dyn AssetManager>> {
        if let Some(bound) = self.current() {
            return Some(bound.manager);
        }

        let Some(_pass) = self.binding.enter() else {
            log::warn!("Asset requested while binding the asset manager on this thread");
            return None;
        };
        if let Some(bound) = self.current() {
            return Some(bound.manager);
        }

        let bound = bind()?;
        let manager = bound.manager.clone();
        *self.slot() = Some(bound);
        Some(manager)
    }
}

/// Walks the binding chain once. `for_path` only feeds the diagnostics.
pub(crate) fn bind<E: ManagedEnv + ?Sized>(
    env: &mut E,
    classes: &ClassCache,
    config: &BridgeConfig,
    for_path: &str,
) -> Option<BoundResourceManager> {
    let activity = class_cache::resolve(env, classes, &config.activity_class, FaultPolicy::Describe)
        .ok()
        .flatten()?;

    // A host without the accessor is an expected configuration, not a fault.
    let method = match exception::guarded(env, true, |env| {
        env.static_method(
            activity.raw(),
            &config.asset_manager_method,
            &config.asset_manager_signature,
        )
    }) {
        Ok(method) => method,
        Err(_) => {
            log::debug!(
                "{}.{} is not available",
                config.activity_class,
                config.asset_manager_method
            );
            return None;
        }
    };

    let object = match exception::guarded(env, false, |env| {
        env.call_static_object_method(activity.raw(), method)
    }) {
        Ok(object) => TransientRef::new(object),
        Err(_) => {
            log::error!("Could not find asset manager for asset {}", for_path);
            return None;
        }
    };

    let Some(manager) = env.asset_manager_from_object(object.raw()) else {
        log::error!("Could not create asset manager for asset {}", for_path);
        object.release(env);
        return None;
    };

    // The native manager is only valid while the managed object is reachable.
    let object = match object.promote(env) {
        Ok(object) => object,
        Err(err) => {
            let _ = exception::check_exception(env, false);
            log::error!("Could not keep asset manager for asset {}: {}", for_path, err);
            return None;
        }
    };

    log::debug!(
        "Bound asset manager via {}.{}",
        config.activity_class,
        config.asset_manager_method
    );
    Some(BoundResourceManager { object, manager })
}
