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

//! Scoped ownership of open asset streams.

use drift_core::asset::{AssetFileInfo, AssetStream};
use std::fmt;
use std::io::{self, Read};

/// An open asset entry owned by native code.
///
/// Implements [`Read`], so it can be handed to any decoder that reads from a
/// stream.
///
/// The stream is closed exactly once: either by [`close`](Self::close) or, if
/// the handle is dropped on an early-return path, by `Drop`.
pub struct AssetStreamHandle {
    path: String,
    stream: Option<Box<dyn AssetStream>>,
}

impl AssetStreamHandle {
    pub(crate) fn new(path: &str, stream: Box<dyn AssetStream>) -> Self {
        Self {
            path: path.to_string(),
            stream: Some(stream),
        }
    }

    /// The asset path this handle was opened with.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Total length of the asset in bytes.
    pub fn length(&self) -> u64 {
        self.stream.as_ref().map_or(0, |stream| stream.length())
    }

    /// Reads the whole asset into a buffer of exactly [`length`](Self::length)
    /// bytes. Fails rather than returning a partially filled buffer.
    pub fn read_to_vec(&mut self) -> io::Result<Vec<u8>> {
        let length = usize::try_from(self.length()).map_err(|_| {
            io::Error::new(io::ErrorKind::OutOfMemory, "asset does not fit in memory")
        })?;

        let mut buffer = vec![0u8; length];
        let mut filled = 0;
        while filled < length {
            match self.read(&mut buffer[filled..]) {
                Ok(0) => {
                    return Err(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        format!("read {} of {} bytes", filled, length),
                    ))
                }
                Ok(n) => filled += n,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) => return Err(err),
            }
        }
        Ok(buffer)
    }

    /// Opens a raw descriptor view onto the asset.
    pub fn open_file_descriptor(&mut self) -> AssetFileInfo {
        self.stream
            .as_mut()
            .map_or(AssetFileInfo::NONE, |stream| stream.open_file_descriptor())
    }

    /// Closes the stream.
    pub fn close(mut self) {
        self.close_stream();
    }

    fn close_stream(&mut self) {
        if let Some(stream) = self.stream.take() {
            stream.close();
        }
    }
}

impl Read for AssetStreamHandle {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.stream.as_mut() {
            Some(stream) => AssetStream::read(&mut **stream, buf),
            None => Ok(0),
        }
    }
}

impl Drop for AssetStreamHandle {
    fn drop(&mut self) {
        self.close_stream();
    }
}

impl fmt::Debug for AssetStreamHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssetStreamHandle")
            .field("path", &self.path)
            .field("open", &self.stream.is_some())
            .finish()
    }
}
