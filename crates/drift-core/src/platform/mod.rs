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

//! Abstractions over the managed runtime reachable through the foreign boundary.
//!
//! The types here define a common interface for the things the bridge needs
//! from the host runtime: a per-thread calling environment, opaque object and
//! method handles, and lifecycle hooks for optional native subsystems.

pub mod env;
pub mod handle;
pub mod hooks;

pub use env::{EnvironmentSource, ManagedEnv};
pub use handle::{ForeignRef, MethodId, Promoted, PromotedRef, RawHandle, Transient, TransientRef};
pub use hooks::{HookRegistry, SubsystemHook};
