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

//! Field encryption.
//!
//! Private field values are stored as the marker `[private]` followed by
//! standard base64 of:
//!
//! ```text
//! check (4) | nonce (8) | cipher text | tag (4)
//! ```
//!
//! - key   = SHA-256(password)[..16]
//! - check = SHA-256("gedkit-check" | key)[..4], identical for every field
//!   written under one password, so the first field validates the password.
//! - tag   = SHA-256(key | plain text)[..4]
//!
//! The cipher is Salsa20/20 with a 128-bit key and a per-field 64-bit nonce.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use byteorder::{ByteOrder, LittleEndian};
use rand::Rng;
use sha2::{Digest, Sha256};
use std::fmt;
use thiserror::Error;
use tracing::trace;

/// Prefix of an encrypted field value.
pub const MARKER: &str = "[private]";

const CHECK_LEN: usize = 4;
const NONCE_LEN: usize = 8;
const TAG_LEN: usize = 4;
const CHECK_CONTEXT: &[u8] = b"gedkit-check";

/// Why a value could not be decrypted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CipherError {
    /// The value does not carry the encryption marker.
    #[error("value is not encrypted")]
    NotEncrypted,
    /// The payload is not valid base64.
    #[error("cipher text is not valid base64: {0}")]
    Encoding(String),
    /// The payload is too short to hold its framing.
    #[error("cipher text is truncated ({0} bytes)")]
    Truncated(usize),
    /// The password check does not match.
    #[error("password does not match")]
    WrongKey,
    /// The plain text does not match its tag.
    #[error("cipher text is corrupt")]
    Corrupt,
    /// The plain text is not UTF-8.
    #[error("decrypted value is not valid UTF-8")]
    Utf8,
}

/// Encryption engine for one password.
///
/// # Examples
///
/// ```rust
/// use gedkit_stream::Enigma;
///
/// let sealed = Enigma::new("s3cret").encrypt("born in Leiden");
/// assert!(Enigma::is_encrypted(&sealed));
///
/// let enigma = Enigma::open("s3cret", &sealed).unwrap();
/// assert_eq!(enigma.decrypt(&sealed).unwrap(), "born in Leiden");
/// assert!(Enigma::open("guess", &sealed).is_err());
/// ```
#[derive(Clone)]
pub struct Enigma {
    key: [u8; 16],
    check: [u8; CHECK_LEN],
}

impl fmt::Debug for Enigma {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Enigma").finish_non_exhaustive()
    }
}

impl Enigma {
    /// Derive an engine from a password.
    pub fn new(password: &str) -> Self {
        let digest = Sha256::digest(password.as_bytes());
        let mut key = [0u8; 16];
        key.copy_from_slice(&digest[..16]);
        let check = digest4(&[CHECK_CONTEXT, &key]);
        Self { key, check }
    }

    /// Derive an engine and validate it against an encrypted sample value.
    pub fn open(password: &str, sample: &str) -> Result<Self, CipherError> {
        let enigma = Self::new(password);
        let payload = decode_payload(sample)?;
        if payload[..CHECK_LEN] != enigma.check {
            return Err(CipherError::WrongKey);
        }
        Ok(enigma)
    }

    /// Whether a value carries the encryption marker.
    pub fn is_encrypted(value: &str) -> bool {
        value.starts_with(MARKER)
    }

    /// Encrypt a value under a fresh random nonce.
    pub fn encrypt(&self, plain: &str) -> String {
        let mut nonce = [0u8; NONCE_LEN];
        rand::thread_rng().fill(&mut nonce[..]);

        let mut body = plain.as_bytes().to_vec();
        salsa20_xor(&mut body, &self.key, &nonce);

        let mut payload = Vec::with_capacity(CHECK_LEN + NONCE_LEN + body.len() + TAG_LEN);
        payload.extend_from_slice(&self.check);
        payload.extend_from_slice(&nonce);
        payload.extend_from_slice(&body);
        payload.extend_from_slice(&digest4(&[&self.key, plain.as_bytes()]));

        format!("{}{}", MARKER, STANDARD.encode(payload))
    }

    /// Decrypt an encrypted value.
    pub fn decrypt(&self, value: &str) -> Result<String, CipherError> {
        let payload = decode_payload(value)?;
        let (check, rest) = payload.split_at(CHECK_LEN);
        if check != self.check {
            return Err(CipherError::WrongKey);
        }
        let (nonce, rest) = rest.split_at(NONCE_LEN);
        let (body, tag) = rest.split_at(rest.len() - TAG_LEN);

        let mut nonce_bytes = [0u8; NONCE_LEN];
        nonce_bytes.copy_from_slice(nonce);
        let mut plain = body.to_vec();
        salsa20_xor(&mut plain, &self.key, &nonce_bytes);

        if digest4(&[&self.key, &plain]) != tag {
            return Err(CipherError::Corrupt);
        }
        String::from_utf8(plain).map_err(|_| CipherError::Utf8)
    }
}

fn decode_payload(value: &str) -> Result<Vec<u8>, CipherError> {
    let encoded = value.strip_prefix(MARKER).ok_or(CipherError::NotEncrypted)?;
    let compact: String = encoded.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let payload = STANDARD
        .decode(compact)
        .map_err(|e| CipherError::Encoding(e.to_string()))?;
    if payload.len() < CHECK_LEN + NONCE_LEN + TAG_LEN {
        return Err(CipherError::Truncated(payload.len()));
    }
    Ok(payload)
}

fn digest4(parts: &[&[u8]]) -> [u8; 4] {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    let digest = hasher.finalize();
    let mut out = [0u8; 4];
    out.copy_from_slice(&digest[..4]);
    out
}

/// XOR data in place with the Salsa20/20 key stream.
///
/// The 64-byte state is a 4x4 matrix of little-endian words:
///
/// ```text
/// [c0,  k0,  k1, k2]
/// [k3,  c1,  n0, n1]
/// [ctr0, ctr1, c2, k0]
/// [k1,  k2,  k3, c3]
/// ```
///
/// A 128-bit key fills both key slots, with the "expand 16-byte k" constants.
fn salsa20_xor(data: &mut [u8], key16: &[u8; 16], nonce: &[u8; NONCE_LEN]) {
    trace!(bytes = data.len(), "salsa20");

    let mut state = [0u32; 16];
    state[0] = 0x61707865;
    state[5] = 0x3120646e;
    state[10] = 0x79622d36;
    state[15] = 0x6b206574;
    for i in 0..4 {
        let word = LittleEndian::read_u32(&key16[i * 4..]);
        state[1 + i] = word;
        state[11 + i] = word;
    }
    state[6] = LittleEndian::read_u32(&nonce[..4]);
    state[7] = LittleEndian::read_u32(&nonce[4..]);

    let mut block = [0u8; 64];
    for (counter, chunk) in data.chunks_mut(64).enumerate() {
        let counter = counter as u64;
        state[8] = counter as u32;
        state[9] = (counter >> 32) as u32;

        let mut x = state;
        for _ in 0..10 {
            quarter_round(&mut x, 0, 4, 8, 12);
            quarter_round(&mut x, 5, 9, 13, 1);
            quarter_round(&mut x, 10, 14, 2, 6);
            quarter_round(&mut x, 15, 3, 7, 11);

            quarter_round(&mut x, 0, 1, 2, 3);
            quarter_round(&mut x, 5, 6, 7, 4);
            quarter_round(&mut x, 10, 11, 8, 9);
            quarter_round(&mut x, 15, 12, 13, 14);
        }
        for (word, initial) in x.iter_mut().zip(state.iter()) {
            *word = word.wrapping_add(*initial);
        }
        for (i, word) in x.iter().enumerate() {
            LittleEndian::write_u32(&mut block[i * 4..], *word);
        }
        for (byte, key) in chunk.iter_mut().zip(block.iter()) {
            *byte ^= key;
        }
    }
}

#[inline(always)]
fn quarter_round(x: &mut [u32; 16], a: usize, b: usize, c: usize, d: usize) {
    x[b] ^= x[a].wrapping_add(x[d]).rotate_left(7);
    x[c] ^= x[b].wrapping_add(x[a]).rotate_left(9);
    x[d] ^= x[c].wrapping_add(x[b]).rotate_left(13);
    x[a] ^= x[d].wrapping_add(x[c]).rotate_left(18);
}
