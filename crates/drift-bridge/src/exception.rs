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

//! Propagation of pending managed-runtime exceptions into native results.
//!
//! A failed foreign call leaves an exception attached to the environment
//! instead of returning it. Any further foreign call made while it is pending
//! is undefined, so every call site in the bridge clears it before moving on,
//! and decides separately whether the native caller hears about it.

use drift_core::platform::ManagedEnv;
use drift_core::BridgeError;

/// What a call site does with a pending exception after clearing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FaultPolicy {
    /// Clear without describing or logging.
    Silent,
    /// Describe and log, then clear. The caller is not notified.
    #[default]
    Describe,
    /// Describe, log, clear, and return [`BridgeError::ForeignException`].
    Raise,
}

impl FaultPolicy {
    /// The policy matching a `quiet` flag on a lookup.
    pub fn from_quiet(quiet: bool) -> Self {
        if quiet {
            Self::Silent
        } else {
            Self::Describe
        }
    }

    /// Applies this policy to whatever is pending on `env`.
    pub fn settle<E: ManagedEnv + ?Sized>(self, env: &mut E) -> Result<(), BridgeError> {
        match self {
            Self::Silent => {
                clear_pending_silently(env);
                Ok(())
            }
            Self::Describe => check_exception(env, false),
            Self::Raise => check_exception(env, true),
        }
    }
}

/// Checks `env` for a pending exception. If one is pending it is described,
/// logged and cleared; with `throw_native` the call then fails with the fixed
/// [`BridgeError::ForeignException`] message.
pub fn check_exception<E: ManagedEnv + ?Sized>(
    env: &mut E,
    throw_native: bool,
) -> Result<(), BridgeError> {
    if !env.exception_check() {
        return Ok(());
    }

    match env.exception_describe() {
        Some(description) => log::error!("Managed runtime exception: {}", description),
        None => log::error!("Managed runtime exception (see the runtime's error output)"),
    }
    env.exception_clear();

    if throw_native {
        Err(BridgeError::foreign_exception())
    } else {
        Ok(())
    }
}

/// Clears a pending exception without reporting it.
///
/// Returns `true` if one was pending.
pub fn clear_pending_silently<E: ManagedEnv + ?Sized>(env: &mut E) -> bool {
    if env.exception_check() {
        env.exception_clear();
        true
    } else {
        false
    }
}

/// Why a guarded foreign call produced no value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallFault {
    /// The call returned null and left nothing pending.
    Absent,
    /// The call left an exception pending. It has been cleared.
    Faulted,
}

/// Runs one foreign call and always checks-and-clears afterwards.
///
/// With `quiet` the pending exception is dropped silently; otherwise it is
/// described and logged first. A value returned alongside a pending exception
/// is still handed back, so a local reference is never lost.
pub fn guarded<E, T, F>(env: &mut E, quiet: bool, call: F) -> Result<T, CallFault>
where
    E: ManagedEnv + ?Sized,
    F: FnOnce(&mut E) -> Option<T>,
{
    let value = call(env);
    let faulted = if quiet {
        clear_pending_silently(env)
    } else {
        let pending = env.exception_check();
        // Never raises with `throw_native = false`.
        let _ = check_exception(env, false);
        pending
    };

    match (value, faulted) {
        (Some(value), _) => Ok(value),
        (None, true) => Err(CallFault::Faulted),
        (None, false) => Err(CallFault::Absent),
    }
}
