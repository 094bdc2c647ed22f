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

//! Platform backends and compose-time hook selection.

#[cfg(target_os = "android")]
pub mod android;

use drift_core::platform::HookRegistry;

/// The subsystem hooks enabled by this build's cargo features.
///
/// With the `openal` feature on Android this contains the OpenAL hook;
/// otherwise it is empty.
pub fn default_hooks() -> HookRegistry {
    #[allow(unused_mut)]
    let mut hooks = HookRegistry::new();

    #[cfg(all(feature = "openal", target_os = "android"))]
    hooks.register(android::OpenAlHook);

    hooks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(all(feature = "openal", target_os = "android")))]
    #[test]
    fn test_no_hooks_without_features() {
        assert!(default_hooks().is_empty());
    }

    #[cfg(all(feature = "openal", target_os = "android"))]
    #[test]
    fn test_openal_hook_registered() {
        assert_eq!(default_hooks().names(), vec!["openal"]);
    }
}
