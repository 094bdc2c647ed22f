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

//! A scriptable stand-in for the managed runtime, shared by the integration tests.

#![allow(dead_code)]

use drift_core::asset::{AccessMode, AssetFileInfo, AssetManager, AssetStream};
use drift_core::platform::{EnvironmentSource, ManagedEnv, MethodId, RawHandle};
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::collections::{HashMap, HashSet};
use std::io;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, Once};
use std::time::Duration;

pub const ACTIVITY: &str = "org/libsdl/app/SDLActivity";
pub const VM: usize = 0x5EED;

/// Everything the fake runtime can be told to do, and everything it counts.
#[derive(Debug, Default)]
pub struct RuntimeState {
    pub attached: bool,
    pub resolvable: HashSet<String>,
    pub resolver_calls: HashMap<String, usize>,
    /// Time each class resolution takes, to widen races between threads.
    pub resolve_delay: Option<Duration>,
    pub pending: bool,
    pub describes: usize,
    pub clears: usize,
    pub method_lookups: usize,
    pub failing_method_lookups: usize,
    pub accessor_calls: usize,
    pub accessor_returns_null: bool,
    pub conversion_fails: bool,
    pub refuse_globals: bool,
    pub next_handle: usize,
    pub live_locals: HashSet<usize>,
    pub globals: HashSet<usize>,
}

pub struct FakeRuntime {
    state: Mutex<RuntimeState>,
    pub assets: Arc<FakeAssets>,
}

impl FakeRuntime {
    /// An attached runtime that knows the default activity class and bundles no assets.
    pub fn new() -> Self {
        let state = RuntimeState {
            attached: true,
            resolvable: [ACTIVITY.to_string()].into_iter().collect(),
            next_handle: 0x100,
            ..Default::default()
        };
        Self {
            state: Mutex::new(state),
            assets: Arc::new(FakeAssets::default()),
        }
    }

    pub fn with_class(self, name: &str) -> Self {
        self.state().resolvable.insert(name.to_string());
        self
    }

    pub fn with_asset(self, path: &str, bytes: &[u8]) -> Self {
        self.assets.insert(path, bytes);
        self
    }

    pub fn state(&self) -> MutexGuard<'_, RuntimeState> {
        self.state.lock().unwrap()
    }

    pub fn resolver_calls(&self, name: &str) -> usize {
        self.state().resolver_calls.get(name).copied().unwrap_or(0)
    }

    pub fn live_locals(&self) -> usize {
        self.state().live_locals.len()
    }
}

impl EnvironmentSource for FakeRuntime {
    type Env<'a> = FakeEnv<'a>;

    fn environment(&self) -> Option<FakeEnv<'_>> {
        if self.state().attached {
            Some(FakeEnv { runtime: self })
        } else {
            None
        }
    }
}

pub struct FakeEnv<'a> {
    runtime: &'a FakeRuntime,
}

impl FakeEnv<'_> {
    fn new_local(state: &mut RuntimeState) -> RawHandle {
        state.next_handle += 1;
        state.live_locals.insert(state.next_handle);
        RawHandle::from_raw(state.next_handle).unwrap()
    }
}

impl ManagedEnv for FakeEnv<'_> {
    fn find_class(&mut self, name: &str) -> Option<RawHandle> {
        let delay = self.runtime.state().resolve_delay;
        if let Some(delay) = delay {
            std::thread::sleep(delay);
        }

        let mut state = self.runtime.state();
        assert!(!state.pending, "foreign call made with an exception pending");
        *state.resolver_calls.entry(name.to_string()).or_default() += 1;
        if state.resolvable.contains(name) {
            Some(Self::new_local(&mut state))
        } else {
            state.pending = true;
            None
        }
    }

    fn static_method(&mut self, _class: RawHandle, _name: &str, _sig: &str) -> Option<MethodId> {
        let mut state = self.runtime.state();
        assert!(!state.pending, "foreign call made with an exception pending");
        state.method_lookups += 1;
        if state.failing_method_lookups > 0 {
            state.failing_method_lookups -= 1;
            state.pending = true;
            return None;
        }
        Some(MethodId(RawHandle::from_raw(0xBEEF).unwrap()))
    }

    fn call_static_object_method(&mut self, _class: RawHandle, _method: MethodId) -> Option<RawHandle> {
        let mut state = self.runtime.state();
        assert!(!state.pending, "foreign call made with an exception pending");
        state.accessor_calls += 1;
        if state.accessor_returns_null {
            None
        } else {
            Some(Self::new_local(&mut state))
        }
    }

    fn new_global_ref(&mut self, _obj: RawHandle) -> Option<RawHandle> {
        let mut state = self.runtime.state();
        if state.refuse_globals {
            return None;
        }
        state.next_handle += 1;
        let raw = state.next_handle;
        state.globals.insert(raw);
        RawHandle::from_raw(raw)
    }

    fn delete_local_ref(&mut self, obj: RawHandle) {
        let removed = self.runtime.state().live_locals.remove(&obj.as_raw());
        assert!(removed, "deleted a local reference that is not live");
    }

    fn exception_check(&mut self) -> bool {
        self.runtime.state().pending
    }

    fn exception_describe(&mut self) -> Option<String> {
        self.runtime.state().describes += 1;
        Some("java.lang.NoClassDefFoundError".to_string())
    }

    fn exception_clear(&mut self) {
        let mut state = self.runtime.state();
        state.clears += 1;
        state.pending = false;
    }

    fn asset_manager_from_object(&mut self, _obj: RawHandle) -> Option<Arc<dyn AssetManager>> {
        if self.runtime.state().conversion_fails {
            return None;
        }
        let manager: Arc<dyn AssetManager> = self.runtime.assets.clone();
        Some(manager)
    }

    fn vm_handle(&mut self) -> Option<RawHandle> {
        RawHandle::from_raw(VM)
    }
}

/// A fake native asset manager with open/close bookkeeping.
#[derive(Default)]
pub struct FakeAssets {
    files: Mutex<HashMap<String, Vec<u8>>>,
    pub deny_all: AtomicBool,
    pub descriptor_fails: AtomicBool,
    pub truncate_reads: AtomicBool,
    pub opened: AtomicUsize,
    pub closed: Arc<AtomicUsize>,
    pub last_mode: Mutex<Option<AccessMode>>,
}

impl FakeAssets {
    pub fn insert(&self, path: &str, bytes: &[u8]) {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_string(), bytes.to_vec());
    }

    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }
}

impl AssetManager for FakeAssets {
    fn open(&self, path: &str, mode: AccessMode) -> Option<Box<dyn AssetStream>> {
        *self.last_mode.lock().unwrap() = Some(mode);
        if self.deny_all.load(Ordering::SeqCst) {
            return None;
        }
        let data = self.files.lock().unwrap().get(path).cloned()?;
        self.opened.fetch_add(1, Ordering::SeqCst);
        Some(Box::new(FakeStream {
            data,
            pos: 0,
            descriptor_fails: self.descriptor_fails.load(Ordering::SeqCst),
            truncate: self.truncate_reads.load(Ordering::SeqCst),
            closed: self.closed.clone(),
        }))
    }
}

struct FakeStream {
    data: Vec<u8>,
    pos: usize,
    descriptor_fails: bool,
    truncate: bool,
    closed: Arc<AtomicUsize>,
}

impl AssetStream for FakeStream {
    fn length(&self) -> u64 {
        self.data.len() as u64
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let available = if self.truncate {
            (self.data.len() / 2).saturating_sub(self.pos)
        } else {
            self.data.len() - self.pos
        };
        let n = buf.len().min(available);
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }

    fn open_file_descriptor(&mut self) -> AssetFileInfo {
        if self.descriptor_fails {
            AssetFileInfo {
                descriptor: -1,
                offset: 0,
                length: 0,
            }
        } else {
            AssetFileInfo {
                descriptor: 42,
                offset: 4096,
                length: self.data.len() as i64,
            }
        }
    }

    fn close(self: Box<Self>) {
        self.closed.fetch_add(1, Ordering::SeqCst);
    }
}

// --- Log capture ---

struct CaptureLogger;

static RECORDS: Mutex<Vec<(Level, String)>> = Mutex::new(Vec::new());
static LOGGER: CaptureLogger = CaptureLogger;
static INIT: Once = Once::new();

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        RECORDS
            .lock()
            .unwrap()
            .push((record.level(), record.args().to_string()));
    }

    fn flush(&self) {}
}

/// Routes `log` records into an in-memory list for the rest of the test binary.
pub fn capture_logs() {
    INIT.call_once(|| {
        log::set_logger(&LOGGER).unwrap();
        log::set_max_level(LevelFilter::Trace);
    });
}

/// Counts captured warnings and errors whose message contains `needle`.
///
/// Tests run in parallel, so each test uses paths unique to itself.
pub fn diagnostics_mentioning(needle: &str) -> usize {
    RECORDS
        .lock()
        .unwrap()
        .iter()
        .filter(|(level, message)| *level <= Level::Warn && message.contains(needle))
        .count()
}
