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

//! Record model and shared types for GEDCOM ingestion.
//!
//! This crate holds what outlives a read: the [`Document`] with its tree of
//! [`Node`]s, the static tag registry, the id index and the reference
//! resolution primitive, plus the types every stage of the reader shares
//! ([`GedcomError`], [`Diagnostic`], [`Limits`], [`Password`], [`Charset`]).
//!
//! The reader itself lives in `gedkit-stream`.

mod charset;
mod diagnostic;
mod document;
mod error;
mod limits;
mod node;
mod password;
mod reference;
pub mod tags;

pub use charset::Charset;
pub use diagnostic::{Diagnostic, DiagnosticKind, Diagnostics};
pub use document::{Document, NodePath};
pub use error::{GedcomError, GedcomResult, LinkError};
pub use limits::Limits;
pub use node::{Descendants, Node, NodeKind, Pointer, RecordId, Secrecy};
pub use password::Password;
pub use reference::{XrefEntry, XrefIndex};
