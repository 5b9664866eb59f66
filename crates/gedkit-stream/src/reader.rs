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

//! Physical line reading.
//!
//! [`LineReader`] turns a byte stream into numbered physical lines: bytes are
//! decoded with a [`TextDecoder`], then split on LF, CRLF or a bare CR. Line
//! numbers count every physical line, blank ones included, starting at 1.
//!
//! The tokenizer consumes lines through the [`LineSource`] trait, which
//! [`TextLines`] also implements for in-memory fragments.

use crate::control::ReadControl;
use crate::decode::TextDecoder;
use gedkit_core::{Charset, GedcomError, GedcomResult};
use std::io::{ErrorKind, Read};
use std::sync::Arc;

/// Default raw buffer size.
const DEFAULT_BUFFER: usize = 64 * 1024;

/// Decoded text kept before compacting consumed lines away.
const COMPACT_AT: usize = 16 * 1024;

/// A source of numbered physical lines.
pub trait LineSource {
    /// Read the next line without its terminator.
    fn next_line(&mut self) -> GedcomResult<Option<(usize, String)>>;

    /// Number of the last line returned.
    fn line_number(&self) -> usize;
}

/// Buffered, decoding line reader with line number tracking.
///
/// # Examples
///
/// ```rust
/// use gedkit_stream::{LineReader, LineSource};
/// use gedkit_core::Charset;
/// use std::io::Cursor;
///
/// let mut reader = LineReader::new(Cursor::new("0 HEAD\r\n1 CHAR ASCII\r0 TRLR"), Charset::Ascii);
///
/// assert_eq!(reader.next_line().unwrap(), Some((1, "0 HEAD".to_string())));
/// assert_eq!(reader.next_line().unwrap(), Some((2, "1 CHAR ASCII".to_string())));
/// assert_eq!(reader.next_line().unwrap(), Some((3, "0 TRLR".to_string())));
/// assert_eq!(reader.next_line().unwrap(), None);
/// ```
pub struct LineReader<R: Read> {
    reader: R,
    decoder: TextDecoder,
    chunk: Vec<u8>,
    text: String,
    cursor: usize,
    eof: bool,
    line_number: usize,
    control: Option<Arc<ReadControl>>,
}

impl<R: Read> LineReader<R> {
    /// Create a new line reader.
    pub fn new(reader: R, charset: Charset) -> Self {
        Self::with_capacity(reader, charset, DEFAULT_BUFFER)
    }

    /// Create with a specific raw buffer capacity.
    pub fn with_capacity(reader: R, charset: Charset, capacity: usize) -> Self {
        Self {
            reader,
            decoder: TextDecoder::for_charset(charset),
            chunk: vec![0; capacity.max(1)],
            text: String::new(),
            cursor: 0,
            eof: false,
            line_number: 0,
            control: None,
        }
    }

    /// Feed bytes that were read ahead of the stream (e.g. for sniffing).
    pub(crate) fn with_prefix(mut self, prefix: &[u8]) -> Self {
        self.decoder.decode(prefix, &mut self.text);
        self
    }

    /// Check a shared cancellation flag before every line.
    pub(crate) fn with_control(mut self, control: Arc<ReadControl>) -> Self {
        self.control = Some(control);
        self
    }

    /// Get the current line number.
    #[inline]
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Read the next line.
    pub fn next_line(&mut self) -> GedcomResult<Option<(usize, String)>> {
        self.check_cancelled()?;
        loop {
            if let Some(line) = self.split_line() {
                self.line_number += 1;
                return Ok(Some((self.line_number, line)));
            }
            if self.eof {
                if self.cursor < self.text.len() {
                    let line = self.text[self.cursor..].to_string();
                    self.cursor = self.text.len();
                    self.line_number += 1;
                    return Ok(Some((self.line_number, line)));
                }
                return Ok(None);
            }
            self.fill()?;
        }
    }

    fn check_cancelled(&self) -> GedcomResult<()> {
        match &self.control {
            Some(control) if control.is_cancelled() => Err(GedcomError::Cancelled {
                line: self.line_number,
            }),
            _ => Ok(()),
        }
    }

    /// Take one terminated line out of the decoded buffer.
    fn split_line(&mut self) -> Option<String> {
        let rest = &self.text.as_bytes()[self.cursor..];
        let end = memchr::memchr2(b'\n', b'\r', rest)?;
        let mut advance = end + 1;
        if rest[end] == b'\r' {
            match rest.get(end + 1) {
                Some(b'\n') => advance += 1,
                Some(_) => {}
                // A CR at the end of the buffer may be half of a CRLF.
                None if !self.eof => return None,
                None => {}
            }
        }
        let line = self.text[self.cursor..self.cursor + end].to_string();
        self.cursor += advance;
        if self.cursor >= COMPACT_AT && self.cursor * 2 >= self.text.len() {
            self.text.drain(..self.cursor);
            self.cursor = 0;
        }
        Some(line)
    }

    fn fill(&mut self) -> GedcomResult<()> {
        let n = match self.reader.read(&mut self.chunk) {
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => return Ok(()),
            Err(e) => {
                self.check_cancelled()?;
                return Err(GedcomError::Io(e));
            }
        };
        if n == 0 {
            self.eof = true;
            self.decoder.finish(&mut self.text);
        } else {
            self.decoder.decode(&self.chunk[..n], &mut self.text);
        }
        Ok(())
    }
}

impl<R: Read> LineSource for LineReader<R> {
    fn next_line(&mut self) -> GedcomResult<Option<(usize, String)>> {
        LineReader::next_line(self)
    }

    fn line_number(&self) -> usize {
        self.line_number
    }
}

impl<R: Read> Iterator for LineReader<R> {
    type Item = GedcomResult<(usize, String)>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line().transpose()
    }
}

/// Numbered lines over an in-memory string.
///
/// Lines end at LF, CRLF or a bare CR, as in [`LineReader`].
pub struct TextLines<'a> {
    rest: &'a str,
    line_number: usize,
}

impl<'a> TextLines<'a> {
    /// Create a line source over `text`.
    pub fn new(text: &'a str) -> Self {
        Self {
            rest: text,
            line_number: 0,
        }
    }
}

impl LineSource for TextLines<'_> {
    fn next_line(&mut self) -> GedcomResult<Option<(usize, String)>> {
        if self.rest.is_empty() {
            return Ok(None);
        }
        let bytes = self.rest.as_bytes();
        let (line, rest) = match memchr::memchr2(b'\n', b'\r', bytes) {
            Some(end) => {
                let crlf = bytes[end] == b'\r' && bytes.get(end + 1) == Some(&b'\n');
                let next = end + if crlf { 2 } else { 1 };
                (&self.rest[..end], &self.rest[next..])
            }
            None => (self.rest, ""),
        };
        self.rest = rest;
        self.line_number += 1;
        Ok(Some((self.line_number, line.to_string())))
    }

    fn line_number(&self) -> usize {
        self.line_number
    }
}
