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

//! # Drift Bridge
//!
//! The bridge layer between native application code and the managed runtime.
//!
//! - [`Bridge`] - Owns the process-scoped caches and exposes the entry points
//!   (class lookup, asset reads, file-descriptor extraction).
//! - [`ClassCache`] - Type descriptors promoted to process-lifetime references.
//! - [`ResourceManagerBinding`] - The lazily bound host asset manager.
//! - [`exception`] - Check-and-clear of pending runtime exceptions.
//! - [`CorePlatform`] - Init/update/shutdown sequencing and subsystem hooks.
//!
//! Nothing here is a hidden static: every piece of state lives in a value the
//! host creates once and passes around, so each test builds its own.

#![warn(missing_docs)]

pub mod assets;
pub mod bridge;
pub mod class_cache;
pub mod exception;
mod gate;
pub mod platform;
pub mod resource_manager;

pub use assets::AssetStreamHandle;
pub use bridge::Bridge;
pub use class_cache::ClassCache;
pub use exception::{check_exception, CallFault, FaultPolicy};
pub use platform::CorePlatform;
pub use resource_manager::{BoundResourceManager, ResourceManagerBinding};
