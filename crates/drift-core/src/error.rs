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

//! The native-side error type of the bridge.
//!
//! Most failures at the foreign boundary are *recoverable absences* and are
//! reported as `None` or empty values plus a log line. [`BridgeError`] is kept
//! for the cases a call site explicitly opts into escalating.

use thiserror::Error;

/// The fixed message carried by an escalated foreign-runtime exception.
pub const FOREIGN_EXCEPTION_MESSAGE: &str = "JNI Exception";

/// Errors surfaced by the bridge to native callers.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// A managed-runtime exception was pending and the call site asked for it
    /// to be raised on the native side. The exception itself has already been
    /// cleared from the environment.
    #[error("{0}")]
    ForeignException(String),

    /// The windowing subsystem returned no environment for the current thread.
    #[error("no managed-runtime environment is attached to the current thread")]
    EnvironmentUnavailable,

    /// The runtime refused to create a process-lifetime reference.
    #[error("failed to promote a transient foreign reference")]
    PromotionFailed,

    /// The configuration file could not be read.
    #[error("failed to read bridge configuration: {0}")]
    ConfigIo(#[from] std::io::Error),

    /// The configuration text is not valid RON for [`crate::BridgeConfig`].
    #[error("invalid bridge configuration: {0}")]
    ConfigParse(#[from] ron::error::SpannedError),
}

impl BridgeError {
    /// Builds the error raised for an escalated pending exception.
    pub fn foreign_exception() -> Self {
        Self::ForeignException(FOREIGN_EXCEPTION_MESSAGE.to_string())
    }
}
