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

//! `AssetManager` and `AssetStream` over the NDK's `AAssetManager`.

use drift_core::asset::{AccessMode, AssetFileInfo, AssetManager, AssetStream};
use std::ffi::{c_int, CString};
use std::io;
use std::ptr::NonNull;

/// The native asset manager of the host activity.
pub struct NdkAssetManager {
    ptr: NonNull<ndk_sys::AAssetManager>,
}

// SAFETY: AAssetManager is documented as thread-safe, and the bridge keeps
// its owning Java object alive through a global reference.
unsafe impl Send for NdkAssetManager {}
unsafe impl Sync for NdkAssetManager {}

impl NdkAssetManager {
    /// Wraps a pointer obtained from `AAssetManager_fromJava`.
    pub fn from_ptr(ptr: NonNull<ndk_sys::AAssetManager>) -> Self {
        Self { ptr }
    }
}

fn mode_flag(mode: AccessMode) -> c_int {
    (match mode {
        AccessMode::Unknown => ndk_sys::AASSET_MODE_UNKNOWN,
        AccessMode::Random => ndk_sys::AASSET_MODE_RANDOM,
        AccessMode::Streaming => ndk_sys::AASSET_MODE_STREAMING,
        AccessMode::Buffer => ndk_sys::AASSET_MODE_BUFFER,
    }) as c_int
}

impl AssetManager for NdkAssetManager {
    fn open(&self, path: &str, mode: AccessMode) -> Option<Box<dyn AssetStream>> {
        let Ok(c_path) = CString::new(path) else {
            log::warn!("Asset path contains a NUL byte: {:?}", path);
            return None;
        };
        // SAFETY: `ptr` is a live manager and `c_path` a valid C string.
        let asset = unsafe {
            ndk_sys::AAssetManager_open(self.ptr.as_ptr(), c_path.as_ptr(), mode_flag(mode))
        };
        let ptr = NonNull::new(asset)?;
        Some(Box::new(NdkAssetStream { ptr }))
    }
}

/// An open `AAsset`. Closed on drop.
pub struct NdkAssetStream {
    ptr: NonNull<ndk_sys::AAsset>,
}

// SAFETY: an AAsset is only ever used by the one thread holding this value.
unsafe impl Send for NdkAssetStream {}

impl AssetStream for NdkAssetStream {
    fn length(&self) -> u64 {
        // SAFETY: `ptr` is open until drop.
        let length = unsafe { ndk_sys::AAsset_getLength64(self.ptr.as_ptr()) };
        u64::try_from(length).unwrap_or(0)
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        // SAFETY: `buf` is valid for `buf.len()` writable bytes.
        let read = unsafe {
            ndk_sys::AAsset_read(self.ptr.as_ptr(), buf.as_mut_ptr().cast(), buf.len() as _)
        };
        usize::try_from(read).map_err(|_| io::Error::other("AAsset_read failed"))
    }

    fn open_file_descriptor(&mut self) -> AssetFileInfo {
        let mut offset = 0;
        let mut length = 0;
        // SAFETY: both out-pointers are valid for writes.
        let descriptor = unsafe {
            ndk_sys::AAsset_openFileDescriptor64(self.ptr.as_ptr(), &mut offset, &mut length)
        };
        AssetFileInfo {
            descriptor,
            offset: i64::from(offset),
            length: i64::from(length),
        }
    }

    fn close(self: Box<Self>) {
        drop(self);
    }
}

impl Drop for NdkAssetStream {
    fn drop(&mut self) {
        // SAFETY: `ptr` was returned by AAssetManager_open and is closed once.
        unsafe { ndk_sys::AAsset_close(self.ptr.as_ptr()) }
    }
}
