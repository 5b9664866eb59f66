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

//! Incremental byte-to-text decoding.
//!
//! Unicode and Latin-1 input goes through `encoding_rs`. ASCII and ANSEL are
//! decoded here: ASCII maps every byte above `0x7F` to U+FFFD, ANSEL maps its
//! upper half through a fixed table and moves each combining mark behind the
//! character it modifies, then composes to NFC.
//!
//! Decoders are streaming: input may be split at any byte and a multi-byte
//! sequence (or an ANSEL mark waiting for its base) carries over to the next
//! call.

use encoding_rs::{CoderResult, Decoder, UTF_16BE, UTF_16LE, UTF_8, WINDOWS_1252};
use gedkit_core::Charset;
use unicode_normalization::UnicodeNormalization;

const REPLACEMENT: char = '\u{FFFD}';

/// A streaming decoder for one of the supported charsets.
pub enum TextDecoder {
    /// An `encoding_rs` decoder (UTF-8, UTF-16, Latin-1).
    Standard(Decoder),
    /// 7-bit US-ASCII.
    Ascii,
    /// ANSEL with combining-mark reordering.
    Ansel(AnselDecoder),
}

impl TextDecoder {
    /// Create a decoder for a charset. Any byte-order mark must already have
    /// been removed.
    pub fn for_charset(charset: Charset) -> Self {
        match charset {
            Charset::Utf8 => Self::Standard(UTF_8.new_decoder_without_bom_handling()),
            Charset::Utf16Be => Self::Standard(UTF_16BE.new_decoder_without_bom_handling()),
            Charset::Utf16Le => Self::Standard(UTF_16LE.new_decoder_without_bom_handling()),
            Charset::Latin1 => Self::Standard(WINDOWS_1252.new_decoder_without_bom_handling()),
            Charset::Ascii => Self::Ascii,
            Charset::Ansel => Self::Ansel(AnselDecoder::new()),
        }
    }

    /// Decode a chunk, appending to `out`.
    pub fn decode(&mut self, bytes: &[u8], out: &mut String) {
        self.run(bytes, out, false);
    }

    /// Flush any carried-over state at end of input.
    ///
    /// Must be called once, after the last chunk.
    pub fn finish(&mut self, out: &mut String) {
        self.run(&[], out, true);
    }

    fn run(&mut self, bytes: &[u8], out: &mut String, last: bool) {
        match self {
            Self::Standard(decoder) => decode_standard(decoder, bytes, out, last),
            Self::Ascii => out.extend(
                bytes
                    .iter()
                    .map(|&b| if b.is_ascii() { b as char } else { REPLACEMENT }),
            ),
            Self::Ansel(decoder) => {
                decoder.decode(bytes, out);
                if last {
                    decoder.finish(out);
                }
            }
        }
    }
}

fn decode_standard(decoder: &mut Decoder, mut src: &[u8], out: &mut String, last: bool) {
    loop {
        let needed = decoder
            .max_utf8_buffer_length(src.len())
            .unwrap_or(src.len().saturating_mul(3).saturating_add(16));
        out.reserve(needed);
        let (result, read, _replaced) = decoder.decode_to_string(src, out, last);
        src = &src[read..];
        match result {
            CoderResult::InputEmpty => break,
            CoderResult::OutputFull => continue,
        }
    }
}

/// Streaming ANSEL decoder.
///
/// ANSEL writes combining marks before the base character; Unicode wants
/// them after. Marks are held until the next base character arrives.
#[derive(Debug, Default)]
pub struct AnselDecoder {
    pending: Vec<char>,
}

impl AnselDecoder {
    /// Create a decoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a chunk, appending NFC text to `out`.
    pub fn decode(&mut self, bytes: &[u8], out: &mut String) {
        let mut buf = String::with_capacity(bytes.len());
        for &b in bytes {
            if let Some(mark) = combining_mark(b) {
                self.pending.push(mark);
                continue;
            }
            let c = match b {
                0x00..=0x7F => b as char,
                _ => spacing_char(b).unwrap_or(REPLACEMENT),
            };
            if c == '\n' || c == '\r' {
                // Marks never attach to a line break.
                buf.extend(self.pending.drain(..));
                buf.push(c);
            } else {
                buf.push(c);
                buf.extend(self.pending.drain(..));
            }
        }
        out.extend(buf.nfc());
    }

    /// Emit marks still waiting for a base character.
    pub fn finish(&mut self, out: &mut String) {
        out.extend(self.pending.drain(..));
    }
}

/// ANSEL spacing characters in the upper half.
fn spacing_char(b: u8) -> Option<char> {
    let c = match b {
        0x8D => '\u{200D}',
        0x8E => '\u{200C}',
        0xA1 => 'Ł',
        0xA2 => 'Ø',
        0xA3 => 'Đ',
        0xA4 => 'Þ',
        0xA5 => 'Æ',
        0xA6 => 'Œ',
        0xA7 => 'ʹ',
        0xA8 => '·',
        0xA9 => '♭',
        0xAA => '®',
        0xAB => '±',
        0xAC => 'Ơ',
        0xAD => 'Ư',
        0xAE => 'ʼ',
        0xB0 => 'ʻ',
        0xB1 => 'ł',
        0xB2 => 'ø',
        0xB3 => 'đ',
        0xB4 => 'þ',
        0xB5 => 'æ',
        0xB6 => 'œ',
        0xB7 => 'ʺ',
        0xB8 => 'ı',
        0xB9 => '£',
        0xBA => 'ð',
        0xBC => 'ơ',
        0xBD => 'ư',
        0xC0 => '°',
        0xC1 => 'ℓ',
        0xC2 => '℗',
        0xC3 => '©',
        0xC4 => '♯',
        0xC5 => '¿',
        0xC6 => '¡',
        0xC7 => 'ß',
        0xC8 => '€',
        _ => return None,
    };
    Some(c)
}

/// ANSEL combining marks (`0xE0..=0xFE`).
fn combining_mark(b: u8) -> Option<char> {
    let c = match b {
        0xE0 => '\u{0309}', // hook above
        0xE1 => '\u{0300}', // grave
        0xE2 => '\u{0301}', // acute
        0xE3 => '\u{0302}', // circumflex
        0xE4 => '\u{0303}', // tilde
        0xE5 => '\u{0304}', // macron
        0xE6 => '\u{0306}', // breve
        0xE7 => '\u{0307}', // dot above
        0xE8 => '\u{0308}', // diaeresis
        0xE9 => '\u{030C}', // caron
        0xEA => '\u{030A}', // ring above
        0xEB => '\u{FE20}', // ligature, left half
        0xEC => '\u{FE21}', // ligature, right half
        0xED => '\u{0315}', // comma above right
        0xEE => '\u{030B}', // double acute
        0xEF => '\u{0310}', // candrabindu
        0xF0 => '\u{0327}', // cedilla
        0xF1 => '\u{0328}', // ogonek
        0xF2 => '\u{0323}', // dot below
        0xF3 => '\u{0324}', // diaeresis below
        0xF4 => '\u{0325}', // ring below
        0xF5 => '\u{0333}', // double low line
        0xF6 => '\u{0332}', // low line
        0xF7 => '\u{0326}', // comma below
        0xF8 => '\u{031C}', // left half ring below
        0xF9 => '\u{032E}', // breve below
        0xFA => '\u{FE22}', // double tilde, left half
        0xFB => '\u{FE23}', // double tilde, right half
        0xFE => '\u{0313}', // comma above
        _ => return None,
    };
    Some(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_all(charset: Charset, chunks: &[&[u8]]) -> String {
        let mut decoder = TextDecoder::for_charset(charset);
        let mut out = String::new();
        for chunk in chunks {
            decoder.decode(chunk, &mut out);
        }
        decoder.finish(&mut out);
        out
    }

    // ==================== Standard charsets ====================

    #[test]
    fn test_utf8_split_sequence() {
        let bytes = "Zoë".as_bytes();
        let out = decode_all(Charset::Utf8, &[&bytes[..3], &bytes[3..]]);
        assert_eq!(out, "Zoë");
    }

    #[test]
    fn test_utf8_invalid_is_replaced() {
        assert_eq!(decode_all(Charset::Utf8, &[b"a\xFFb"]), "a\u{FFFD}b");
    }

    #[test]
    fn test_utf16le() {
        let bytes: Vec<u8> = "0 HEAD".encode_utf16().flat_map(|u| u.to_le_bytes()).collect();
        assert_eq!(decode_all(Charset::Utf16Le, &[&bytes]), "0 HEAD");
    }

    #[test]
    fn test_utf16be_odd_split() {
        let bytes: Vec<u8> = "Ünï".encode_utf16().flat_map(|u| u.to_be_bytes()).collect();
        assert_eq!(decode_all(Charset::Utf16Be, &[&bytes[..1], &bytes[1..]]), "Ünï");
    }

    #[test]
    fn test_latin1() {
        assert_eq!(decode_all(Charset::Latin1, &[b"M\xFCller"]), "Müller");
    }

    #[test]
    fn test_ascii_replaces_high_bytes() {
        assert_eq!(decode_all(Charset::Ascii, &[b"M\xFCller"]), "M\u{FFFD}ller");
    }

    // ==================== ANSEL ====================

    #[test]
    fn test_ansel_plain_ascii() {
        assert_eq!(decode_all(Charset::Ansel, &[b"0 HEAD\n"]), "0 HEAD\n");
    }

    #[test]
    fn test_ansel_combining_mark_composes() {
        // acute + e
        assert_eq!(decode_all(Charset::Ansel, &[b"Ren\xE2e"]), "René");
    }

    #[test]
    fn test_ansel_mark_across_chunks() {
        assert_eq!(decode_all(Charset::Ansel, &[b"M\xE8", b"uller"]), "Müller");
    }

    #[test]
    fn test_ansel_multiple_marks_keep_order() {
        // dot below + circumflex on 'a' composes to U+1EAD
        assert_eq!(decode_all(Charset::Ansel, &[b"\xF2\xE3a"]), "\u{1EAD}");
    }

    #[test]
    fn test_ansel_spacing_characters() {
        assert_eq!(decode_all(Charset::Ansel, &[b"\xA1od\xB6"]), "Łodœ");
        assert_eq!(decode_all(Charset::Ansel, &[b"\xC7"]), "ß");
    }

    #[test]
    fn test_ansel_undefined_byte_is_replaced() {
        assert_eq!(decode_all(Charset::Ansel, &[b"a\x90b"]), "a\u{FFFD}b");
    }

    #[test]
    fn test_ansel_mark_before_newline_is_not_attached_to_it() {
        assert_eq!(decode_all(Charset::Ansel, &[b"x\xE2\ny"]), "x\u{0301}\ny");
    }

    #[test]
    fn test_ansel_dangling_mark_flushed_at_end() {
        assert_eq!(decode_all(Charset::Ansel, &[b"x\xE8"]), "x\u{0308}");
    }
}
