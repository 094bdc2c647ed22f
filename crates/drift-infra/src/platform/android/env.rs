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

//! `ManagedEnv` over a raw JNI environment.

use super::assets::NdkAssetManager;
use drift_core::asset::AssetManager;
use drift_core::platform::{EnvironmentSource, ManagedEnv, MethodId, RawHandle};
use jni::objects::{JClass, JObject, JStaticMethodID};
use jni::signature::ReturnType;
use jni::{JNIEnv, JavaVM};
use std::ptr::NonNull;
use std::sync::Arc;

/// A JNI environment for one calling frame.
pub struct JniEnvironment<'a> {
    env: JNIEnv<'a>,
}

impl<'a> JniEnvironment<'a> {
    /// Wraps an environment obtained for the current thread.
    pub fn new(env: JNIEnv<'a>) -> Self {
        Self { env }
    }

    fn class(class: RawHandle) -> JClass<'static> {
        // SAFETY: `class` came from `find_class` or a promoted global reference
        // and is a live jclass. `JClass` does not delete references on drop.
        unsafe { JClass::from_raw(class.as_ptr()) }
    }
}

impl ManagedEnv for JniEnvironment<'_> {
    fn find_class(&mut self, name: &str) -> Option<RawHandle> {
        let class = self.env.find_class(name).ok()?;
        RawHandle::from_ptr(JObject::from(class).into_raw())
    }

    fn static_method(
        &mut self,
        class: RawHandle,
        name: &str,
        signature: &str,
    ) -> Option<MethodId> {
        let class = Self::class(class);
        let method = self.env.get_static_method_id(&class, name, signature).ok()?;
        RawHandle::from_ptr(method.into_raw()).map(MethodId)
    }

    fn call_static_object_method(
        &mut self,
        class: RawHandle,
        method: MethodId,
    ) -> Option<RawHandle> {
        let class = Self::class(class);
        // SAFETY: `method` was resolved by `static_method` on this class.
        let method = unsafe { JStaticMethodID::from_raw(method.0.as_ptr()) };
        // SAFETY: the accessor takes no arguments and returns an object, as
        // its configured signature states.
        let value = unsafe {
            self.env
                .call_static_method_unchecked(&class, method, ReturnType::Object, &[])
        }
        .ok()?;
        let object = value.l().ok()?;
        RawHandle::from_ptr(object.into_raw())
    }

    fn new_global_ref(&mut self, obj: RawHandle) -> Option<RawHandle> {
        // `jni::objects::GlobalRef` deletes itself on drop; promoted references
        // must live for the whole process, so go through the raw table.
        let raw = self.env.get_raw();
        // SAFETY: `raw` is the live environment of this thread and `obj` a
        // live reference obtained from it.
        unsafe {
            let new_global_ref = (**raw).NewGlobalRef?;
            RawHandle::from_ptr(new_global_ref(raw, obj.as_ptr()))
        }
    }

    fn delete_local_ref(&mut self, obj: RawHandle) {
        // SAFETY: `obj` is a local reference owned by the caller, which gives
        // it up here.
        let object = unsafe { JObject::from_raw(obj.as_ptr()) };
        if let Err(err) = self.env.delete_local_ref(object) {
            log::warn!("DeleteLocalRef failed: {}", err);
        }
    }

    fn exception_check(&mut self) -> bool {
        self.env.exception_check().unwrap_or(false)
    }

    fn exception_describe(&mut self) -> Option<String> {
        // Prints to logcat with a stack trace.
        let _ = self.env.exception_describe();
        None
    }

    fn exception_clear(&mut self) {
        let _ = self.env.exception_clear();
    }

    fn asset_manager_from_object(&mut self, obj: RawHandle) -> Option<Arc<dyn AssetManager>> {
        // SAFETY: `obj` is a live android.content.res.AssetManager reference.
        let ptr = unsafe {
            ndk_sys::AAssetManager_fromJava(self.env.get_raw().cast(), obj.as_ptr())
        };
        let manager = NdkAssetManager::from_ptr(NonNull::new(ptr)?);
        Some(Arc::new(manager) as Arc<dyn AssetManager>)
    }

    fn vm_handle(&mut self) -> Option<RawHandle> {
        let vm = self.env.get_java_vm().ok()?;
        RawHandle::from_ptr(vm.get_java_vm_pointer())
    }
}

/// Fetches environments by attaching the current thread to a `JavaVM`.
///
/// For hosts that hand native code the VM (e.g. from `JNI_OnLoad`) rather
/// than going through SDL. Threads stay attached until they exit.
pub struct VmEnvironmentSource {
    vm: JavaVM,
}

impl VmEnvironmentSource {
    /// Creates a source over `vm`.
    pub fn new(vm: JavaVM) -> Self {
        Self { vm }
    }
}

impl EnvironmentSource for VmEnvironmentSource {
    type Env<'a> = JniEnvironment<'a>;

    fn environment(&self) -> Option<JniEnvironment<'_>> {
        match self.vm.attach_current_thread_permanently() {
            Ok(env) => Some(JniEnvironment::new(env)),
            Err(err) => {
                log::error!("Could not attach thread to the JVM: {}", err);
                None
            }
        }
    }
}
