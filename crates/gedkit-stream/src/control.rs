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

//! Progress reporting and cooperative cancellation.
//!
//! A read publishes its progress and listens for cancellation through a
//! shared [`ReadControl`]. Callers hold it through a [`ReadHandle`], which can
//! be cloned and sent to other threads.
//!
//! Progress is split in two phases: parsing fills 0 to 80 in proportion to
//! the bytes consumed (when the input size is known), linking fills 80 to 100
//! in proportion to the references resolved. The value never decreases.

use std::io::{self, Read};
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;

/// Share of the progress range given to the parse phase.
pub(crate) const PARSE_SHARE: u8 = 80;

/// Shared state between a running read and its handles.
#[derive(Debug, Default)]
pub(crate) struct ReadControl {
    cancelled: AtomicBool,
    percent: AtomicU8,
}

impl ReadControl {
    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    fn percent(&self) -> u8 {
        self.percent.load(Ordering::Relaxed)
    }

    fn advance(&self, percent: u8) {
        self.percent.fetch_max(percent.min(100), Ordering::Relaxed);
    }

    /// Report parse-phase progress from bytes consumed.
    pub(crate) fn report_bytes(&self, consumed: u64, total: Option<u64>) {
        if let Some(total) = total.filter(|&t| t > 0) {
            let share = consumed.min(total) * u64::from(PARSE_SHARE) / total;
            self.advance(share as u8);
        }
    }

    /// Report link-phase progress from references resolved.
    pub(crate) fn report_links(&self, done: usize, total: usize) {
        let rest = u64::from(100 - PARSE_SHARE);
        let share = if total == 0 {
            rest
        } else {
            done.min(total) as u64 * rest / total as u64
        };
        self.advance(PARSE_SHARE + share as u8);
    }

    /// Mark the read as complete.
    pub(crate) fn finish(&self) {
        self.advance(100);
    }
}

/// Handle to observe and cancel a read from any thread.
///
/// # Examples
///
/// ```rust
/// use gedkit_stream::{GedcomReader, ReadOptions};
/// use std::io::Cursor;
///
/// let reader = GedcomReader::new(ReadOptions::default());
/// let handle = reader.handle();
/// assert_eq!(handle.progress(), 0);
///
/// let doc = reader.read(Cursor::new("0 HEAD\n0 TRLR\n")).unwrap();
/// assert_eq!(handle.progress(), 100);
/// assert_eq!(doc.records().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct ReadHandle {
    control: Arc<ReadControl>,
}

impl ReadHandle {
    pub(crate) fn new(control: Arc<ReadControl>) -> Self {
        Self { control }
    }

    /// Current progress, 0 to 100.
    pub fn progress(&self) -> u8 {
        self.control.percent()
    }

    /// Ask the read to stop.
    ///
    /// The read notices at its next line boundary or raw read and fails with
    /// [`GedcomError::Cancelled`](gedkit_core::GedcomError::Cancelled).
    pub fn cancel(&self) {
        self.control.cancel();
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.control.is_cancelled()
    }
}

/// Byte source that counts consumption and refuses to read once cancelled.
pub(crate) struct Monitored<R> {
    inner: R,
    control: Arc<ReadControl>,
    consumed: u64,
    total: Option<u64>,
}

impl<R: Read> Monitored<R> {
    pub(crate) fn new(inner: R, control: Arc<ReadControl>, total: Option<u64>) -> Self {
        Self {
            inner,
            control,
            consumed: 0,
            total,
        }
    }
}

impl<R: Read> Read for Monitored<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.control.is_cancelled() {
            return Err(io::Error::new(io::ErrorKind::Other, "read cancelled"));
        }
        let n = self.inner.read(buf)?;
        if self.control.is_cancelled() {
            return Err(io::Error::new(io::ErrorKind::Other, "read cancelled"));
        }
        self.consumed += n as u64;
        self.control.report_bytes(self.consumed, self.total);
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    // ==================== Progress ====================

    #[test]
    fn test_progress_is_monotonic() {
        let control = ReadControl::default();
        control.report_bytes(50, Some(100));
        assert_eq!(control.percent(), 40);
        control.report_bytes(10, Some(100));
        assert_eq!(control.percent(), 40);
        control.report_links(1, 2);
        assert_eq!(control.percent(), 90);
        control.finish();
        assert_eq!(control.percent(), 100);
    }

    #[test]
    fn test_unknown_size_reports_nothing_while_parsing() {
        let control = ReadControl::default();
        control.report_bytes(1_000, None);
        control.report_bytes(1_000, Some(0));
        assert_eq!(control.percent(), 0);
    }

    #[test]
    fn test_overshooting_size_hint_caps_parse_share() {
        let control = ReadControl::default();
        control.report_bytes(500, Some(100));
        assert_eq!(control.percent(), PARSE_SHARE);
    }

    #[test]
    fn test_empty_worklist_completes_link_share() {
        let control = ReadControl::default();
        control.report_links(0, 0);
        assert_eq!(control.percent(), 100);
    }

    // ==================== Cancellation ====================

    #[test]
    fn test_handle_cancel_is_shared() {
        let control = Arc::new(ReadControl::default());
        let handle = ReadHandle::new(control.clone());
        let other = handle.clone();
        assert!(!control.is_cancelled());
        other.cancel();
        assert!(handle.is_cancelled());
        assert!(control.is_cancelled());
    }

    #[test]
    fn test_monitored_counts_and_refuses_after_cancel() {
        let control = Arc::new(ReadControl::default());
        let mut reader = Monitored::new(Cursor::new(vec![0u8; 10]), control.clone(), Some(20));
        let mut buf = [0u8; 10];
        assert_eq!(reader.read(&mut buf).unwrap(), 10);
        assert_eq!(control.percent(), 40);

        ReadHandle::new(control).cancel();
        assert!(reader.read(&mut buf).is_err());
    }
}
