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

use drift_core::platform::{RawHandle, SubsystemHook};
use std::ffi::c_void;

extern "C" {
    fn alcandroid_OnLoad(vm: *mut c_void);
    fn alcandroid_OnUnload(vm: *mut c_void);
}

/// Hands the JVM to the Android OpenAL backend, which calls back into Java
/// from its mixer thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct OpenAlHook;

impl SubsystemHook for OpenAlHook {
    fn name(&self) -> &str {
        "openal"
    }

    fn on_load(&self, vm: RawHandle) {
        // SAFETY: `vm` is the process JavaVM pointer.
        unsafe { alcandroid_OnLoad(vm.as_ptr()) }
    }

    fn on_unload(&self, vm: RawHandle) {
        // SAFETY: called once, after `on_load` with the same VM.
        unsafe { alcandroid_OnUnload(vm.as_ptr()) }
    }
}
