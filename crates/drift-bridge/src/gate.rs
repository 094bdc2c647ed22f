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

//! Serialization of slow-path resolutions that run managed code.
//!
//! Managed code running under the gate (a class initializer, the resource
//! accessor) may call straight back into native code on the same thread. A
//! plain mutex would deadlock there, so the gate remembers its holder and
//! turns such a re-entry away instead of blocking.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::thread::{self, ThreadId};

/// A lock that other threads wait on and the holding thread passes through.
#[derive(Debug, Default)]
pub(crate) struct ResolveGate {
    lock: Mutex<()>,
    holder: Mutex<Option<ThreadId>>,
}

/// Proof of holding a [`ResolveGate`]. Dropping it opens the gate.
pub(crate) struct GatePass<'a> {
    gate: &'a ResolveGate,
    _guard: MutexGuard<'a, ()>,
}

impl ResolveGate {
    fn holder(&self) -> MutexGuard<'_, Option<ThreadId>> {
        self.holder.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Waits for the gate. Returns `None` without waiting when the calling
    /// thread already holds it.
    pub(crate) fn enter(&self) -> Option<GatePass<'_>> {
        let current = thread::current().id();
        if *self.holder() == Some(current) {
            return None;
        }

        let guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        *self.holder() = Some(current);
        Some(GatePass {
            gate: self,
            _guard: guard,
        })
    }
}

impl Drop for GatePass<'_> {
    fn drop(&mut self) {
        // Runs before `_guard` unlocks.
        *self.gate.holder() = None;
    }
}
