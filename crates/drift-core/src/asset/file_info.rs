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

/// A raw, shareable view onto an asset stored inside a container file.
///
/// `descriptor` is only meaningful when positive; a non-positive descriptor
/// means the view could not be opened and `offset`/`length` carry no data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AssetFileInfo {
    /// The file descriptor, or a non-positive value on failure.
    pub descriptor: i32,
    /// Byte offset of the asset within the descriptor's file.
    pub offset: i64,
    /// Length of the asset in bytes.
    pub length: i64,
}

impl AssetFileInfo {
    /// The zeroed triple returned when no view is available.
    pub const NONE: Self = Self {
        descriptor: 0,
        offset: 0,
        length: 0,
    };

    /// Returns `true` if the descriptor can be used for I/O.
    pub fn is_valid(&self) -> bool {
        self.descriptor > 0
    }
}
