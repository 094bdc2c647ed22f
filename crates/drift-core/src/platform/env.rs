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

//! Defines the per-thread managed-runtime environment contract.

use super::handle::{MethodId, RawHandle};
use crate::asset::AssetManager;
use std::sync::Arc;

/// The calling context of the managed runtime for the current thread.
///
/// This trait is the boundary between the bridge's algorithms and the actual
/// foreign-function interface. Every method maps to a single foreign call.
/// Methods never clear a pending exception on their own; the bridge decides
/// when to check and clear after each call.
///
/// Object handles returned by [`find_class`](ManagedEnv::find_class),
/// [`call_static_object_method`](ManagedEnv::call_static_object_method) are
/// *local* references owned by the caller.
pub trait ManagedEnv {
    /// Resolves a fully-qualified, slash-separated type name to a local class
    /// reference. Returns `None` on failure, usually leaving an exception pending.
    fn find_class(&mut self, name: &str) -> Option<RawHandle>;

    /// Looks up a static method by name and signature.
    fn static_method(&mut self, class: RawHandle, name: &str, signature: &str)
        -> Option<MethodId>;

    /// Invokes a static, zero-argument, object-returning method.
    fn call_static_object_method(&mut self, class: RawHandle, method: MethodId)
        -> Option<RawHandle>;

    /// Creates a process-lifetime strong reference to `obj`.
    fn new_global_ref(&mut self, obj: RawHandle) -> Option<RawHandle>;

    /// Deletes a local reference.
    fn delete_local_ref(&mut self, obj: RawHandle);

    /// Returns `true` if an exception is pending on this environment.
    fn exception_check(&mut self) -> bool;

    /// Reports the pending exception through the runtime's own channel.
    ///
    /// Returns a textual description when the backend can produce one cheaply.
    fn exception_describe(&mut self) -> Option<String>;

    /// Clears the pending exception, if any.
    fn exception_clear(&mut self);

    /// Converts a managed resource-manager object into its native counterpart.
    fn asset_manager_from_object(&mut self, obj: RawHandle) -> Option<Arc<dyn AssetManager>>;

    /// Returns the handle of the virtual machine owning this environment.
    fn vm_handle(&mut self) -> Option<RawHandle>;
}

/// Supplies the current thread's [`ManagedEnv`].
///
/// The returned environment borrows the source, so it cannot outlive the call
/// that fetched it. Implementations must not cache environments across
/// threads; each call asks the underlying subsystem afresh.
pub trait EnvironmentSource: Send + Sync {
    /// The environment type handed out for one calling frame.
    type Env<'a>: ManagedEnv
    where
        Self: 'a;

    /// Returns the current thread's environment, or `None` when no managed
    /// runtime is attached to it.
    fn environment(&self) -> Option<Self::Env<'_>>;
}
