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

//! Streaming GEDCOM reader.
//!
//! This crate reads a GEDCOM byte stream into a [`gedkit_core::Document`]
//! in one sequential pass plus a linking pass. Defects confined to one
//! record are recovered and reported as diagnostics instead of failing the
//! read.
//!
//! # Features
//!
//! - **Charset detection**: byte-order mark, then the header's `CHAR` line,
//!   then ANSEL. UTF-8, UTF-16, ASCII, Latin-1 and ANSEL are decoded.
//! - **Error recovery**: a malformed record is skipped up to the next level-0
//!   line; irregular nesting is accepted and flagged.
//! - **Multi-line values**: `CONT`/`CONC` continuations are folded into the
//!   field they continue.
//! - **Private fields**: encrypted values are decrypted with the session
//!   password, or left sealed with a diagnostic when it is unknown.
//! - **Reference linking**: pointers are bound to their records after the
//!   whole file is read; dangling ones are reported.
//! - **Progress and cancellation**: a [`ReadHandle`] reports 0 to 100 and
//!   stops the read from another thread.
//!
//! # Reading a document
//!
//! ```rust
//! use gedkit_stream::{read_document, ReadOptions};
//! use std::io::Cursor;
//!
//! let input = "\
//! 0 HEAD
//! 1 CHAR UTF-8
//! 1 SUBM @U1@
//! 0 @U1@ SUBM
//! 1 NAME Archivist
//! 0 @I1@ INDI
//! 1 NAME Ann /Lee/
//! 1 NOTE Born at sea,
//! 2 CONT raised in Leiden.
//! 0 TRLR
//! ";
//!
//! let doc = read_document(Cursor::new(input), ReadOptions::default()).unwrap();
//! assert_eq!(doc.submitter().unwrap().child("NAME").unwrap().value, "Archivist");
//!
//! let ann = doc.record_by_xref("I1").unwrap();
//! assert_eq!(ann.child("NOTE").unwrap().value, "Born at sea,\nraised in Leiden.");
//! assert!(doc.diagnostics().is_empty());
//! ```
//!
//! # Cancelling from another thread
//!
//! ```rust,no_run
//! use gedkit_stream::{GedcomReader, ReadOptions};
//! use std::fs::File;
//! use std::thread;
//!
//! let reader = GedcomReader::new(ReadOptions::default());
//! let handle = reader.handle();
//!
//! let worker = thread::spawn(move || reader.read(File::open("large.ged").unwrap()));
//! println!("{}%", handle.progress());
//! handle.cancel();
//!
//! match worker.join().unwrap() {
//!     Ok(doc) => println!("finished first: {} records", doc.records().len()),
//!     Err(failure) if failure.is_cancelled() => println!("cancelled"),
//!     Err(failure) => eprintln!("{}", failure),
//! }
//! ```

mod builder;
mod control;
mod crypto;
mod decode;
mod engine;
mod error;
mod fragment;
mod gate;
mod linker;
mod multiline;
mod options;
mod reader;
mod sniff;
mod tokenizer;

pub use control::ReadHandle;
pub use crypto::{CipherError, Enigma, MARKER};
pub use decode::{AnselDecoder, TextDecoder};
pub use engine::{read_document, read_file, GedcomReader};
pub use error::{LineError, ReadFailure, RecordError};
pub use fragment::{read_fragment, Fragment};
pub use linker::PendingRef;
pub use options::{ReadOptions, ReadOptionsBuilder};
pub use reader::{LineReader, LineSource, TextLines};
pub use sniff::{sniff, Sniffed, SNIFF_LEN};
pub use tokenizer::{tokenize_line, LevelMode, Token, Tokenizer};
