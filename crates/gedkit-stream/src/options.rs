// Dweve GEDKIT - Genealogical Data Ingestion Toolkit
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Read configuration.

use gedkit_core::{Limits, Password};

/// Configuration for a document read.
///
/// # Examples
///
/// ```rust
/// use gedkit_stream::ReadOptions;
/// use gedkit_core::Password;
///
/// let options = ReadOptions::builder()
///     .password(Password::secret("s3cret"))
///     .max_depth(32)
///     .size_hint(4096)
///     .build();
/// assert_eq!(options.limits.max_depth, 32);
/// assert_eq!(options.size_hint, Some(4096));
/// ```
#[derive(Debug, Clone)]
pub struct ReadOptions {
    /// Password state the session starts in.
    ///
    /// Default: [`Password::Unknown`]
    pub password: Password,

    /// Resource limits.
    pub limits: Limits,

    /// Size of the raw read buffer in bytes.
    ///
    /// Default: 64KB
    pub buffer_size: usize,

    /// Total input size in bytes, when known.
    ///
    /// Drives the byte-based share of progress. Without it the parse phase
    /// reports nothing until linking starts.
    ///
    /// Default: None
    pub size_hint: Option<u64>,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            password: Password::Unknown,
            limits: Limits::default(),
            buffer_size: 64 * 1024,
            size_hint: None,
        }
    }
}

impl ReadOptions {
    /// Start a builder from the defaults.
    pub fn builder() -> ReadOptionsBuilder {
        ReadOptionsBuilder::new()
    }
}

/// Builder for [`ReadOptions`].
#[derive(Debug, Clone, Default)]
pub struct ReadOptionsBuilder {
    options: ReadOptions,
}

impl ReadOptionsBuilder {
    /// Create a builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the starting password state.
    pub fn password(mut self, password: Password) -> Self {
        self.options.password = password;
        self
    }

    /// Replace all limits.
    pub fn limits(mut self, limits: Limits) -> Self {
        self.options.limits = limits;
        self
    }

    /// Set the maximum decoded line length.
    pub fn max_line_length(mut self, max: usize) -> Self {
        self.options.limits.max_line_length = max;
        self
    }

    /// Set the maximum nesting depth within a record.
    pub fn max_depth(mut self, max: usize) -> Self {
        self.options.limits.max_depth = max;
        self
    }

    /// Set the maximum number of level-0 records.
    pub fn max_records(mut self, max: usize) -> Self {
        self.options.limits.max_records = max;
        self
    }

    /// Set the raw read buffer size. Zero is raised to one byte.
    pub fn buffer_size(mut self, size: usize) -> Self {
        self.options.buffer_size = size.max(1);
        self
    }

    /// Set the expected input size.
    pub fn size_hint(mut self, bytes: u64) -> Self {
        self.options.size_hint = Some(bytes);
        self
    }

    /// Build the options.
    pub fn build(self) -> ReadOptions {
        self.options
    }
}
