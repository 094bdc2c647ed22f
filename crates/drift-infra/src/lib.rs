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

//! # Drift Infra
//!
//! Concrete implementations of the contracts in `drift-core`:
//! the JNI environment, the NDK asset manager, the SDL environment accessor,
//! subsystem hooks, and log sink setup.
//!
//! Platform code only builds for `target_os = "android"`. On other targets the
//! crate still provides logging and an empty hook set, so host tools and tests
//! link against the same API.

#![warn(missing_docs)]

pub mod logging;
pub mod platform;

pub use platform::default_hooks;

#[cfg(target_os = "android")]
pub use platform::android;
