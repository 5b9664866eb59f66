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

//! Decryption gate.
//!
//! Every node passes through [`DecryptionGate::apply`] once its value is
//! complete. Values without the encryption marker pass untouched. For
//! encrypted values the outcome depends on the session password:
//!
//! | Password   | Outcome                                                   |
//! |------------|-----------------------------------------------------------|
//! | `Unknown`  | value stays sealed, "password unknown" diagnostic         |
//! | `Rejected` | fatal [`GedcomError::PasswordRequired`]                   |
//! | `Secret`   | engine built on first use; on mismatch a "password        |
//! |            | mismatch" diagnostic and the session falls back to        |
//! |            | `Unknown`; otherwise the value is decrypted, and a failure|
//! |            | to decrypt is fatal corruption                            |

use crate::crypto::{CipherError, Enigma};
use gedkit_core::{DiagnosticKind, Diagnostics, GedcomError, GedcomResult, Node, Password};
use tracing::debug;

/// Lifecycle of the session's decryption engine.
#[derive(Debug)]
enum Engine {
    /// Not built yet.
    Uninitialized,
    /// Built and validated against the file.
    Ready(Enigma),
    /// Construction failed; the password did not match.
    Failed,
}

/// Per-read decryption state.
#[derive(Debug)]
pub(crate) struct DecryptionGate {
    password: Password,
    engine: Engine,
}

impl DecryptionGate {
    pub(crate) fn new(password: Password) -> Self {
        Self {
            password,
            engine: Engine::Uninitialized,
        }
    }

    /// The password state the session is in now.
    pub(crate) fn into_password(self) -> Password {
        self.password
    }

    /// Decrypt a node's value if it is encrypted.
    pub(crate) fn apply(&mut self, node: &mut Node, diagnostics: &mut Diagnostics) -> GedcomResult<()> {
        if !Enigma::is_encrypted(&node.value) {
            return Ok(());
        }
        node.seal();

        if self.password == Password::Rejected {
            return Err(GedcomError::PasswordRequired { line: node.line });
        }
        let Some(secret) = self.password.as_secret() else {
            diagnostics.push(
                node.line,
                DiagnosticKind::PasswordUnknown,
                format!("encrypted {} value left sealed: password unknown", node.tag),
            );
            return Ok(());
        };

        if let Engine::Uninitialized = self.engine {
            self.engine = match Enigma::open(secret, &node.value) {
                Ok(enigma) => {
                    debug!(line = node.line, "decryption engine ready");
                    Engine::Ready(enigma)
                }
                Err(CipherError::WrongKey) => Engine::Failed,
                Err(e) => return Err(GedcomError::decryption(node.line, e.to_string())),
            };
        }

        match &self.engine {
            Engine::Ready(enigma) => {
                let plain = enigma
                    .decrypt(&node.value)
                    .map_err(|e| GedcomError::decryption(node.line, e.to_string()))?;
                node.open(plain);
            }
            Engine::Failed | Engine::Uninitialized => {
                diagnostics.push(
                    node.line,
                    DiagnosticKind::PasswordMismatch,
                    format!("encrypted {} value left sealed: password mismatch", node.tag),
                );
                self.password = Password::Unknown;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gedkit_core::Secrecy;

    fn sealed_note(password: &str, plain: &str, line: usize) -> Node {
        Node::new(1, "NOTE", None, Enigma::new(password).encrypt(plain), line)
    }

    #[test]
    fn test_plain_value_untouched() {
        let mut gate = DecryptionGate::new(Password::Rejected);
        let mut diagnostics = Diagnostics::new();
        let mut node = Node::new(1, "NOTE", None, "public", 1);
        gate.apply(&mut node, &mut diagnostics).unwrap();
        assert_eq!(node.secrecy, Secrecy::Plain);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_unknown_password_leaves_sealed() {
        let mut gate = DecryptionGate::new(Password::Unknown);
        let mut diagnostics = Diagnostics::new();
        let mut a = sealed_note("pw", "a", 3);
        let mut b = sealed_note("pw", "b", 5);
        gate.apply(&mut a, &mut diagnostics).unwrap();
        gate.apply(&mut b, &mut diagnostics).unwrap();
        assert_eq!(a.secrecy, Secrecy::Sealed);
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics.as_slice()[1].line, 5);
        assert_eq!(diagnostics.as_slice()[0].kind, DiagnosticKind::PasswordUnknown);
    }

    #[test]
    fn test_rejected_password_is_fatal() {
        let mut gate = DecryptionGate::new(Password::Rejected);
        let mut node = sealed_note("pw", "a", 8);
        let err = gate.apply(&mut node, &mut Diagnostics::new()).unwrap_err();
        assert!(matches!(err, GedcomError::PasswordRequired { line: 8 }));
        assert!(node.is_private());
    }

    #[test]
    fn test_right_password_opens_every_field() {
        let mut gate = DecryptionGate::new(Password::secret("pw"));
        let mut diagnostics = Diagnostics::new();
        let mut a = sealed_note("pw", "first", 3);
        let mut b = sealed_note("pw", "second", 4);
        gate.apply(&mut a, &mut diagnostics).unwrap();
        gate.apply(&mut b, &mut diagnostics).unwrap();
        assert_eq!((a.value.as_str(), a.secrecy), ("first", Secrecy::Opened));
        assert_eq!(b.value, "second");
        assert!(diagnostics.is_empty());
        assert!(matches!(gate.engine, Engine::Ready(_)));
    }

    #[test]
    fn test_wrong_password_downgrades_to_unknown() {
        let mut gate = DecryptionGate::new(Password::secret("guess"));
        let mut diagnostics = Diagnostics::new();
        let mut a = sealed_note("pw", "first", 3);
        let mut b = sealed_note("pw", "second", 4);
        gate.apply(&mut a, &mut diagnostics).unwrap();
        gate.apply(&mut b, &mut diagnostics).unwrap();
        assert_eq!(a.secrecy, Secrecy::Sealed);
        assert_eq!(b.secrecy, Secrecy::Sealed);
        let kinds: Vec<_> = diagnostics.as_slice().iter().map(|d| d.kind).collect();
        assert_eq!(
            kinds,
            vec![DiagnosticKind::PasswordMismatch, DiagnosticKind::PasswordUnknown]
        );
        assert_eq!(gate.into_password(), Password::Unknown);
    }

    #[test]
    fn test_corruption_after_success_is_fatal() {
        let mut gate = DecryptionGate::new(Password::secret("pw"));
        let mut diagnostics = Diagnostics::new();
        let mut good = sealed_note("pw", "first", 3);
        gate.apply(&mut good, &mut diagnostics).unwrap();

        let mut other = sealed_note("other", "second", 9);
        let err = gate.apply(&mut other, &mut diagnostics).unwrap_err();
        assert!(matches!(err, GedcomError::Decryption { line: 9, .. }));
    }

    #[test]
    fn test_garbled_first_field_is_fatal() {
        let mut gate = DecryptionGate::new(Password::secret("pw"));
        let mut node = Node::new(1, "NOTE", None, "[private]###", 2);
        let err = gate.apply(&mut node, &mut Diagnostics::new()).unwrap_err();
        assert!(matches!(err, GedcomError::Decryption { line: 2, .. }));
    }
}
