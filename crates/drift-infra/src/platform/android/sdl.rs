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

//! Integration with an SDL-hosted activity.

use super::env::JniEnvironment;
use drift_core::platform::EnvironmentSource;
use jni::JNIEnv;
use std::ffi::{c_char, c_int, c_void};

extern "C" {
    fn SDL_AndroidGetJNIEnv() -> *mut c_void;
}

/// Takes the current thread's JNI environment from SDL.
///
/// SDL attaches its own threads; on a thread it does not know about this
/// yields `None`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SdlEnvironmentSource;

impl EnvironmentSource for SdlEnvironmentSource {
    type Env<'a> = JniEnvironment<'a>;

    fn environment(&self) -> Option<JniEnvironment<'_>> {
        // SAFETY: plain query into SDL; null when no environment exists.
        let raw = unsafe { SDL_AndroidGetJNIEnv() };
        if raw.is_null() {
            return None;
        }
        // SAFETY: SDL returns the JNIEnv of the calling thread.
        let env = unsafe { JNIEnv::from_raw(raw.cast()) }.ok()?;
        Some(JniEnvironment::new(env))
    }
}

/// Entry point SDL calls once its own Android init is done.
///
/// The application drives the engine from the activity callbacks, so there is
/// nothing to run here.
#[no_mangle]
#[allow(non_snake_case)]
pub extern "C" fn SDL_main(_argc: c_int, _argv: *mut *mut c_char) -> c_int {
    log::info!("Android post-init SDL_main");
    0
}
