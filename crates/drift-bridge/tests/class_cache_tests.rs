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

mod common;

use common::{capture_logs, diagnostics_mentioning, FakeRuntime};
use drift_bridge::{Bridge, FaultPolicy};
use drift_core::BridgeError;
use std::sync::Barrier;
use std::thread;
use std::time::Duration;

#[test]
fn test_second_lookup_hits_cache() {
    let bridge = Bridge::new(FakeRuntime::new().with_class("com/example/Audio"));

    let first = bridge.find_class("com/example/Audio", false).unwrap();
    let second = bridge.find_class("com/example/Audio", false).unwrap();

    assert_eq!(first, second);
    assert_eq!(bridge.source().resolver_calls("com/example/Audio"), 1);
    assert_eq!(bridge.class_cache().len(), 1);
}

#[test]
fn test_lookup_promotes_and_releases_transient() {
    let bridge = Bridge::new(FakeRuntime::new().with_class("com/example/Audio"));

    let descriptor = bridge.find_class("com/example/Audio", false).unwrap();

    let state = bridge.source().state();
    assert!(state.globals.contains(&descriptor.raw().as_raw()));
    assert!(state.live_locals.is_empty());
}

#[test]
fn test_distinct_names_resolve_independently() {
    let bridge = Bridge::new(
        FakeRuntime::new()
            .with_class("com/example/A")
            .with_class("com/example/B"),
    );

    let a = bridge.find_class("com/example/A", false).unwrap();
    let b = bridge.find_class("com/example/B", false).unwrap();

    assert_ne!(a, b);
    assert_eq!(bridge.source().resolver_calls("com/example/A"), 1);
    assert_eq!(bridge.source().resolver_calls("com/example/B"), 1);
}

#[test]
fn test_quiet_miss_clears_without_describing() {
    let bridge = Bridge::new(FakeRuntime::new());

    assert!(bridge.find_class("com/example/Missing", true).is_none());

    let state = bridge.source().state();
    assert!(!state.pending);
    assert_eq!(state.describes, 0);
    assert_eq!(state.clears, 1);
}

#[test]
fn test_loud_miss_describes_and_clears() {
    let bridge = Bridge::new(FakeRuntime::new());

    assert!(bridge.find_class("com/example/Missing", false).is_none());

    let state = bridge.source().state();
    assert!(!state.pending);
    assert_eq!(state.describes, 1);
}

#[test]
fn test_misses_are_not_cached() {
    let bridge = Bridge::new(FakeRuntime::new());

    assert!(bridge.find_class("com/example/Late", true).is_none());
    bridge
        .source()
        .state()
        .resolvable
        .insert("com/example/Late".to_string());
    assert!(bridge.find_class("com/example/Late", true).is_some());

    assert_eq!(bridge.source().resolver_calls("com/example/Late"), 2);
}

#[test]
fn test_silent_policy_never_escalates() {
    let bridge = Bridge::new(FakeRuntime::new());

    let result = bridge.find_class_with("com/example/Missing", FaultPolicy::Silent);

    assert!(matches!(result, Ok(None)));
}

#[test]
fn test_raise_policy_escalates_fault() {
    let bridge = Bridge::new(FakeRuntime::new());

    let result = bridge.find_class_with("com/example/Missing", FaultPolicy::Raise);

    match result {
        Err(BridgeError::ForeignException(message)) => assert_eq!(message, "JNI Exception"),
        other => panic!("expected a foreign exception, got {:?}", other),
    }
    assert!(!bridge.source().state().pending);
}

#[test]
fn test_raise_policy_hit_is_ok() {
    let bridge = Bridge::new(FakeRuntime::new().with_class("com/example/A"));

    let result = bridge.find_class_with("com/example/A", FaultPolicy::Raise);

    assert!(matches!(result, Ok(Some(_))));
}

#[test]
fn test_detached_thread_resolves_nothing() {
    let runtime = FakeRuntime::new().with_class("com/example/A");
    runtime.state().attached = false;
    let bridge = Bridge::new(runtime);

    assert!(bridge.find_class("com/example/A", false).is_none());
    assert!(matches!(
        bridge.find_class_with("com/example/A", FaultPolicy::Raise),
        Err(BridgeError::EnvironmentUnavailable)
    ));
    assert_eq!(bridge.source().resolver_calls("com/example/A"), 0);
}

#[test]
fn test_cache_hit_needs_no_environment() {
    let bridge = Bridge::new(FakeRuntime::new().with_class("com/example/A"));
    let descriptor = bridge.find_class("com/example/A", false).unwrap();

    bridge.source().state().attached = false;

    assert_eq!(bridge.find_class("com/example/A", false), Some(descriptor));
}

#[test]
fn test_concurrent_misses_resolve_once() {
    let runtime = FakeRuntime::new().with_class("com/example/Shared");
    runtime.state().resolve_delay = Some(Duration::from_millis(50));
    let bridge = Bridge::new(runtime);
    let start = Barrier::new(2);

    let (first, second) = thread::scope(|s| {
        let lookup = || {
            start.wait();
            bridge.find_class("com/example/Shared", false)
        };
        let first = s.spawn(lookup);
        let second = s.spawn(lookup);
        (first.join().unwrap(), second.join().unwrap())
    });

    assert!(first.is_some());
    assert_eq!(first, second);
    assert_eq!(bridge.source().resolver_calls("com/example/Shared"), 1);
    let state = bridge.source().state();
    assert_eq!(state.globals.len(), 1);
    assert!(state.live_locals.is_empty());
}

#[test]
fn test_refused_promotion_releases_local_and_caches_nothing() {
    capture_logs();
    let runtime = FakeRuntime::new().with_class("com/example/Refused");
    runtime.state().refuse_globals = true;
    let bridge = Bridge::new(runtime);

    assert!(bridge.find_class("com/example/Refused", false).is_none());

    assert_eq!(diagnostics_mentioning("com/example/Refused"), 1);
    assert!(!bridge.class_cache().contains("com/example/Refused"));
    let state = bridge.source().state();
    assert!(state.live_locals.is_empty());
    assert!(state.globals.is_empty());
    assert!(!state.pending);
}

#[test]
fn test_refused_promotion_raises_under_raise_policy() {
    let runtime = FakeRuntime::new().with_class("com/example/Unpinned");
    runtime.state().refuse_globals = true;
    let bridge = Bridge::new(runtime);

    let result = bridge.find_class_with("com/example/Unpinned", FaultPolicy::Raise);

    assert!(matches!(result, Err(BridgeError::PromotionFailed)));
    assert_eq!(bridge.source().live_locals(), 0);

    bridge.source().state().refuse_globals = false;
    assert!(bridge.find_class("com/example/Unpinned", false).is_some());
    assert_eq!(bridge.source().resolver_calls("com/example/Unpinned"), 2);
}
