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

//! Memoized resolution of managed type names to type descriptors.
//!
//! Resolving a class through the runtime is comparatively expensive and only
//! yields a local reference, so the first successful lookup of a name promotes
//! the descriptor to a process-lifetime reference and remembers it. Entries are
//! never evicted and their references are never released.

use crate::exception::FaultPolicy;
use crate::gate::ResolveGate;
use drift_core::platform::{ManagedEnv, PromotedRef, TransientRef};
use drift_core::BridgeError;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Process-scoped map from fully-qualified type name to promoted descriptor.
///
/// Hits only take the map lock, which is never held across a foreign call.
/// Misses are serialized behind a separate gate, so concurrent lookups from a
/// UI thread and runtime callback threads resolve and promote a name once.
#[derive(Debug, Default)]
pub struct ClassCache {
    entries: Mutex<HashMap<String, PromotedRef>>,
    resolving: ResolveGate,
}

impl ClassCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, PromotedRef>> {
        // The map is only ever mutated by single inserts, so a poisoned lock
        // still guards a consistent map.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the cached descriptor for `name`, if any.
    pub fn get(&self, name: &str) -> Option<PromotedRef> {
        self.entries().get(name).copied()
    }

    /// Stores `descriptor` under `name` unless another thread got there first,
    /// and returns whichever descriptor is now cached.
    pub fn insert(&self, name: &str, descriptor: PromotedRef) -> PromotedRef {
        *self
            .entries()
            .entry(name.to_string())
            .or_insert(descriptor)
    }

    /// Forgets every entry. The promoted references themselves stay alive.
    pub fn clear(&self) {
        self.entries().clear();
    }

    /// Returns `true` if `name` has been resolved before.
    pub fn contains(&self, name: &str) -> bool {
        self.entries().contains_key(name)
    }

    /// Returns the number of cached descriptors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    /// Returns `true` if nothing has been cached yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

/// Resolves `name` through `cache`, falling back to the runtime on a miss.
///
/// On a failed resolution the pending exception is settled according to
/// `policy`; only [`FaultPolicy::Raise`] turns it into an error.
pub(crate) fn resolve<E: ManagedEnv + ?Sized>(
    env: &mut E,
    cache: &ClassCache,
    name: &str,
    policy: FaultPolicy,
) -> Result<Option<PromotedRef>, BridgeError> {
    if let Some(descriptor) = cache.get(name) {
        return Ok(Some(descriptor));
    }

    // A class initializer that looks up classes from native code re-enters
    // here on the same thread and goes through unserialized.
    let _pass = cache.resolving.enter();
    if let Some(descriptor) = cache.get(name) {
        return Ok(Some(descriptor));
    }

    let Some(local) = env.find_class(name) else {
        if policy != FaultPolicy::Silent {
            log::error!("Could not resolve class {}", name);
        }
        policy.settle(env)?;
        return Ok(None);
    };

    match TransientRef::new(local).promote(env) {
        Ok(descriptor) => {
            log::trace!("Cached class descriptor for {}", name);
            Ok(Some(cache.insert(name, descriptor)))
        }
        Err(err) => {
            log::error!("Could not keep class {} alive: {}", name, err);
            policy.settle(env)?;
            match policy {
                FaultPolicy::Raise => Err(err),
                _ => Ok(None),
            }
        }
    }
}
