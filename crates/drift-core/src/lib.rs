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

//! # Drift Core
//!
//! Foundational crate containing the traits, handle types, and interface
//! contracts shared by the bridge layer and its platform backends.
//!
//! Nothing in this crate talks to a managed runtime directly. It only describes
//! what a runtime environment, an asset manager, and a subsystem hook must be
//! able to do, so that the bridge can be driven by the real Android backend in
//! production and by scripted fakes in tests.

#![warn(missing_docs)]

pub mod asset;
pub mod config;
pub mod error;
pub mod platform;

pub use config::{BridgeConfig, LoggingConfig};
pub use error::BridgeError;
