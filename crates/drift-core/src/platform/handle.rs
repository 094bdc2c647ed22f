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

//! Opaque foreign handles and ownership-tagged object references.

use super::env::ManagedEnv;
use crate::error::BridgeError;
use std::fmt;
use std::marker::PhantomData;
use std::num::NonZeroUsize;

/// An opaque, non-null pointer-sized value handed out by the managed runtime.
///
/// A null foreign pointer is never represented as a `RawHandle`; APIs that may
/// yield null return `Option<RawHandle>` instead.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct RawHandle(NonZeroUsize);

impl RawHandle {
    /// Wraps a raw foreign value, returning `None` for null.
    pub fn from_raw(raw: usize) -> Option<Self> {
        NonZeroUsize::new(raw).map(Self)
    }

    /// Wraps a raw foreign pointer, returning `None` for null.
    pub fn from_ptr<T>(ptr: *mut T) -> Option<Self> {
        Self::from_raw(ptr as usize)
    }

    /// Returns the raw foreign value.
    pub fn as_raw(self) -> usize {
        self.0.get()
    }

    /// Returns the raw foreign value as a pointer.
    pub fn as_ptr<T>(self) -> *mut T {
        self.0.get() as *mut T
    }
}

impl fmt::Debug for RawHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RawHandle({:#x})", self.0)
    }
}

/// Identifier of a resolved static method on a managed type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MethodId(pub RawHandle);

mod sealed {
    pub trait Sealed {}
}

/// Marker for the lifetime scope of a [`ForeignRef`].
pub trait RefScope: sealed::Sealed {}

/// Call-scoped reference. Valid only until the native frame that received it
/// returns, and must be released or promoted before then.
#[derive(Debug)]
pub enum Transient {}

/// Process-lifetime strong reference. Never released by the bridge.
#[derive(Debug)]
pub enum Promoted {}

impl sealed::Sealed for Transient {}
impl sealed::Sealed for Promoted {}
impl RefScope for Transient {}
impl RefScope for Promoted {}

/// A reference to a managed object, tagged with who owns its lifetime.
pub struct ForeignRef<S: RefScope> {
    raw: RawHandle,
    _scope: PhantomData<S>,
}

/// A transient, call-scoped reference.
pub type TransientRef = ForeignRef<Transient>;
/// A promoted, process-lifetime reference.
pub type PromotedRef = ForeignRef<Promoted>;

impl<S: RefScope> ForeignRef<S> {
    /// Returns the underlying foreign handle.
    pub fn raw(&self) -> RawHandle {
        self.raw
    }
}

impl<S: RefScope> fmt::Debug for ForeignRef<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple(std::any::type_name::<S>().rsplit("::").next().unwrap_or("Ref"))
            .field(&self.raw)
            .finish()
    }
}

impl TransientRef {
    /// Takes ownership of a local reference just returned by the runtime.
    #[must_use = "a transient reference must be released or promoted"]
    pub fn new(raw: RawHandle) -> Self {
        Self {
            raw,
            _scope: PhantomData,
        }
    }

    /// Deletes the local reference.
    pub fn release<E: ManagedEnv + ?Sized>(self, env: &mut E) {
        env.delete_local_ref(self.raw);
    }

    /// Creates a process-lifetime reference to the same object and releases
    /// this transient one. The transient reference is released even when the
    /// runtime refuses to create the strong reference.
    pub fn promote<E: ManagedEnv + ?Sized>(self, env: &mut E) -> Result<PromotedRef, BridgeError> {
        let global = env.new_global_ref(self.raw);
        env.delete_local_ref(self.raw);
        global
            .map(|raw| PromotedRef {
                raw,
                _scope: PhantomData,
            })
            .ok_or(BridgeError::PromotionFailed)
    }
}

impl Clone for PromotedRef {
    fn clone(&self) -> Self {
        *self
    }
}

impl Copy for PromotedRef {}

impl PartialEq for PromotedRef {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for PromotedRef {}
