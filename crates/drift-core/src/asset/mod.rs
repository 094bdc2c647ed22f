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

//! Contracts for reading bundled assets through the host's resource manager.
//!
//! The host runtime resolves asset names to streams; this module only describes
//! what such a manager and its streams can do. The bridge owns the policy of
//! opening, extracting, and closing them.

mod file_info;

pub use file_info::AssetFileInfo;

use std::io;

/// How the caller intends to read an opened asset. Mirrors the NDK open modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccessMode {
    /// No assumption about the access pattern.
    #[default]
    Unknown,
    /// Random access with forward and backward seeks.
    Random,
    /// Sequential reads with occasional forward seeks.
    Streaming,
    /// The whole content will be mapped or read at once.
    Buffer,
}

/// The native side of the host's asset-resolution service.
///
/// Implementations must be usable from any thread, which holds for the NDK
/// asset manager once its owning managed object is kept alive.
pub trait AssetManager: Send + Sync {
    /// Opens `path` (relative to the bundle's asset root).
    ///
    /// Returns `None` if the asset does not exist or cannot be opened.
    fn open(&self, path: &str, mode: AccessMode) -> Option<Box<dyn AssetStream>>;
}

/// An open asset entry. Single use; closed by consuming it.
pub trait AssetStream: Send {
    /// Total length of the asset in bytes.
    fn length(&self) -> u64;

    /// Reads up to `buf.len()` bytes. Returns `Ok(0)` at end of asset.
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    /// Opens a raw descriptor onto the asset's bytes inside its container file.
    ///
    /// On failure the returned descriptor is non-positive. A valid descriptor
    /// is an independent duplicate owned by the caller and outlives the stream.
    fn open_file_descriptor(&mut self) -> AssetFileInfo;

    /// Closes the stream and frees its foreign resources.
    fn close(self: Box<Self>);
}
