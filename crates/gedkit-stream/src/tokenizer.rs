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

//! Line tokenizer.
//!
//! Splits each physical line into a [`Token`]: level, optional cross-reference
//! id, tag and value. Two level modes are supported:
//!
//! - [`LevelMode::Numbered`]: `LEVEL [@XREF@] TAG [VALUE]`, the file format.
//! - [`LevelMode::Indented`]: `<spaces>TAG [VALUE]`, where the level is the
//!   number of leading spaces. Used for hand-written fragments, which carry
//!   no cross-reference ids.
//!
//! Fields are separated by runs of spaces or tabs. The value is the rest of
//! the line after the tag with exactly one separator removed, so leading
//! spaces beyond the first are kept. Blank lines produce no token.
//!
//! The [`Tokenizer`] holds at most one pushed-back token, which the builder
//! uses to hand a sibling or ancestor line back to an enclosing level.

use crate::error::{LineError, RecordError};
use crate::reader::LineSource;
use gedkit_core::GedcomResult;

/// How the level of a line is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LevelMode {
    /// A leading decimal level number.
    #[default]
    Numbered,
    /// Leading-space indentation.
    Indented,
}

/// One tokenized line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Nesting level.
    pub level: usize,
    /// Cross-reference id without `@` delimiters. Empty for a bare `@@`.
    pub xref: Option<String>,
    /// The tag.
    pub tag: String,
    /// Everything after the tag, minus one separator.
    pub value: String,
    /// Physical line number.
    pub line: usize,
}

#[inline]
fn is_separator(c: char) -> bool {
    c == ' ' || c == '\t'
}

fn split_field(s: &str) -> (&str, &str) {
    match s.find(is_separator) {
        Some(i) => (&s[..i], &s[i..]),
        None => (s, ""),
    }
}

fn xref_field(field: &str) -> Option<&str> {
    if field.len() >= 2 && field.starts_with('@') && field.ends_with('@') {
        Some(&field[1..field.len() - 1])
    } else {
        None
    }
}

/// Tokenize one physical line.
///
/// Returns `Ok(None)` for a blank line.
///
/// # Examples
///
/// ```rust
/// use gedkit_stream::{tokenize_line, LevelMode};
///
/// let token = tokenize_line("0 @I1@ INDI", 1, LevelMode::Numbered).unwrap().unwrap();
/// assert_eq!(token.level, 0);
/// assert_eq!(token.xref.as_deref(), Some("I1"));
/// assert_eq!(token.tag, "INDI");
///
/// let token = tokenize_line("  GIVN  Ann", 2, LevelMode::Indented).unwrap().unwrap();
/// assert_eq!(token.level, 2);
/// assert_eq!(token.value, " Ann");
///
/// assert!(tokenize_line("x NAME", 3, LevelMode::Numbered).is_err());
/// ```
pub fn tokenize_line(line: &str, number: usize, mode: LevelMode) -> Result<Option<Token>, LineError> {
    if line.trim().is_empty() {
        return Ok(None);
    }

    let (level, rest) = match mode {
        LevelMode::Numbered => {
            let (field, rest) = split_field(line.trim_start_matches(is_separator));
            if !field.bytes().all(|b| b.is_ascii_digit()) {
                return Err(LineError::new(
                    number,
                    format!("expected a level number, found '{}'", field),
                ));
            }
            let level = field.parse::<usize>().map_err(|_| {
                LineError::new(number, format!("level number '{}' is out of range", field))
            })?;
            (level, rest)
        }
        LevelMode::Indented => {
            let trimmed = line.trim_start_matches(' ');
            (line.len() - trimmed.len(), trimmed)
        }
    };

    let (mut field, mut rest) = split_field(rest.trim_start_matches(is_separator));
    if field.is_empty() {
        return Err(LineError::new(number, "missing tag"));
    }

    let mut xref = None;
    if let Some(id) = xref_field(field).filter(|_| mode == LevelMode::Numbered) {
        xref = Some(id.to_string());
        (field, rest) = split_field(rest.trim_start_matches(is_separator));
        if field.is_empty() {
            return Err(LineError::new(number, "missing tag after cross-reference id"));
        }
    }

    let value = match rest.chars().next() {
        Some(c) => &rest[c.len_utf8()..],
        None => "",
    };

    Ok(Some(Token {
        level,
        xref,
        tag: field.to_string(),
        value: value.to_string(),
        line: number,
    }))
}

/// Token stream over a [`LineSource`] with one token of pushback.
pub struct Tokenizer<S> {
    source: S,
    mode: LevelMode,
    max_line_length: usize,
    pushed: Option<Token>,
    consumed: usize,
}

impl<S: LineSource> Tokenizer<S> {
    /// Create a tokenizer.
    pub fn new(source: S, mode: LevelMode, max_line_length: usize) -> Self {
        Self {
            source,
            mode,
            max_line_length,
            pushed: None,
            consumed: 0,
        }
    }

    /// The next token, skipping blank lines.
    ///
    /// A line that cannot be tokenized is consumed and reported as
    /// [`RecordError::Malformed`]; stream failures are
    /// [`RecordError::Fatal`].
    pub fn next_token(&mut self) -> Result<Option<Token>, RecordError> {
        if let Some(token) = self.pushed.take() {
            self.consumed += 1;
            return Ok(Some(token));
        }
        loop {
            let Some((number, line)) = self.source.next_line()? else {
                return Ok(None);
            };
            if line.trim().is_empty() {
                continue;
            }
            self.consumed += 1;
            if line.len() > self.max_line_length {
                return Err(LineError::new(
                    number,
                    format!(
                        "line is {} bytes long, the limit is {}",
                        line.len(),
                        self.max_line_length
                    ),
                )
                .into());
            }
            if let Some(token) = tokenize_line(&line, number, self.mode)? {
                return Ok(Some(token));
            }
        }
    }

    /// Hand a token back to be returned by the next [`next_token`](Self::next_token).
    ///
    /// # Panics
    ///
    /// Panics if a token is already pushed back.
    pub fn push_back(&mut self, token: Token) {
        assert!(self.pushed.is_none(), "tokenizer holds one pushed-back token at most");
        self.consumed = self.consumed.saturating_sub(1);
        self.pushed = Some(token);
    }

    /// Discard lines up to the next level-0 line, which is pushed back.
    ///
    /// Returns the number of the last discarded line, if any was discarded.
    pub fn skip_to_level_zero(&mut self) -> GedcomResult<Option<usize>> {
        let mut last = None;
        if let Some(token) = self.pushed.take() {
            if token.level == 0 {
                self.pushed = Some(token);
                return Ok(None);
            }
            self.consumed += 1;
            last = Some(token.line);
        }
        while let Some((number, line)) = self.source.next_line()? {
            if line.trim().is_empty() {
                continue;
            }
            if let Ok(Some(token)) = tokenize_line(&line, number, self.mode) {
                if token.level == 0 {
                    self.pushed = Some(token);
                    return Ok(last);
                }
            }
            self.consumed += 1;
            last = Some(number);
        }
        Ok(last)
    }

    /// Non-blank lines handed out so far, not counting a pushed-back token.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Number of the last physical line read from the source.
    pub fn line_number(&self) -> usize {
        self.source.line_number()
    }

    /// Whether a token is waiting to be re-read.
    pub fn has_pushed_back(&self) -> bool {
        self.pushed.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::TextLines;

    fn tok(line: &str) -> Token {
        tokenize_line(line, 1, LevelMode::Numbered).unwrap().unwrap()
    }

    fn tokenizer(text: &str) -> Tokenizer<TextLines<'_>> {
        Tokenizer::new(TextLines::new(text), LevelMode::Numbered, 1024)
    }

    // ==================== Line tokenizing ====================

    #[test]
    fn test_level_tag_value() {
        let t = tok("1 NAME John /Smith/");
        assert_eq!(t.level, 1);
        assert_eq!(t.xref, None);
        assert_eq!(t.tag, "NAME");
        assert_eq!(t.value, "John /Smith/");
    }

    #[test]
    fn test_xref_record() {
        let t = tok("0 @F12@ FAM");
        assert_eq!(t.xref.as_deref(), Some("F12"));
        assert_eq!(t.tag, "FAM");
        assert_eq!(t.value, "");
    }

    #[test]
    fn test_empty_xref() {
        let t = tok("0 @@ INDI");
        assert_eq!(t.xref.as_deref(), Some(""));
        assert_eq!(t.tag, "INDI");
    }

    #[test]
    fn test_pointer_value_is_not_an_xref() {
        let t = tok("1 FAMC @F1@");
        assert_eq!(t.xref, None);
        assert_eq!(t.value, "@F1@");
    }

    #[test]
    fn test_value_keeps_extra_spaces() {
        assert_eq!(tok("2 CONC  two spaces").value, " two spaces");
        assert_eq!(tok("2 CONT trailing ").value, "trailing ");
        assert_eq!(tok("1 NOTE\tx").value, "x");
    }

    #[test]
    fn test_tabs_and_leading_whitespace() {
        let t = tok("  1\t\tNAME\tx");
        assert_eq!(t.level, 1);
        assert_eq!(t.tag, "NAME");
        assert_eq!(t.value, "x");
    }

    #[test]
    fn test_blank_line() {
        assert_eq!(tokenize_line("   \t", 1, LevelMode::Numbered).unwrap(), None);
    }

    #[test]
    fn test_malformed_lines() {
        for line in ["NAME x", "+1 NAME", "1", "1 @I1@", "99999999999999999999999 X"] {
            let err = tokenize_line(line, 4, LevelMode::Numbered).unwrap_err();
            assert_eq!(err.line, 4, "{}", line);
        }
    }

    #[test]
    fn test_indented_mode() {
        let t = tokenize_line("NAME Ann", 1, LevelMode::Indented).unwrap().unwrap();
        assert_eq!((t.level, t.tag.as_str(), t.value.as_str()), (0, "NAME", "Ann"));
        let t = tokenize_line("   DATE 1900", 2, LevelMode::Indented).unwrap().unwrap();
        assert_eq!(t.level, 3);
        // In indent mode a leading number is a tag, not a level.
        let t = tokenize_line("1 NAME", 3, LevelMode::Indented).unwrap().unwrap();
        assert_eq!((t.level, t.tag.as_str()), (0, "1"));
        let t = tokenize_line("@I1@ INDI", 4, LevelMode::Indented).unwrap().unwrap();
        assert_eq!((t.xref, t.tag.as_str()), (None, "@I1@"));
    }

    // ==================== Token stream ====================

    #[test]
    fn test_push_back_returns_same_token() {
        let mut tokens = tokenizer("0 HEAD\n1 CHAR ASCII\n");
        let first = tokens.next_token().unwrap().unwrap();
        assert_eq!(tokens.consumed(), 1);
        tokens.push_back(first.clone());
        assert_eq!(tokens.consumed(), 0);
        assert_eq!(tokens.next_token().unwrap(), Some(first));
        assert_eq!(tokens.next_token().unwrap().unwrap().tag, "CHAR");
        assert_eq!(tokens.next_token().unwrap(), None);
    }

    #[test]
    #[should_panic(expected = "one pushed-back token")]
    fn test_double_push_back_panics() {
        let mut tokens = tokenizer("0 HEAD\n1 CHAR ASCII\n");
        let a = tokens.next_token().unwrap().unwrap();
        let b = tokens.next_token().unwrap().unwrap();
        tokens.push_back(b);
        tokens.push_back(a);
    }

    #[test]
    fn test_blank_lines_skipped_but_numbered() {
        let mut tokens = tokenizer("\n\n0 HEAD\n");
        let t = tokens.next_token().unwrap().unwrap();
        assert_eq!(t.line, 3);
        assert_eq!(tokens.consumed(), 1);
    }

    #[test]
    fn test_malformed_line_is_consumed() {
        let mut tokens = tokenizer("oops\n0 TRLR\n");
        assert!(matches!(tokens.next_token(), Err(RecordError::Malformed(_))));
        assert_eq!(tokens.next_token().unwrap().unwrap().tag, "TRLR");
    }

    #[test]
    fn test_line_length_limit() {
        let mut tokens = Tokenizer::new(TextLines::new("1 NOTE 0123456789\n"), LevelMode::Numbered, 10);
        match tokens.next_token() {
            Err(RecordError::Malformed(e)) => assert_eq!(e.line, 1),
            other => panic!("expected malformed line, got {:?}", other),
        }
    }

    // ==================== Recovery ====================

    #[test]
    fn test_skip_to_level_zero() {
        let mut tokens = tokenizer("1 A\nbad line\n2 B\n\n0 @I2@ INDI\n");
        tokens.next_token().unwrap();
        let last = tokens.skip_to_level_zero().unwrap();
        assert_eq!(last, Some(3));
        assert_eq!(tokens.consumed(), 3);
        let next = tokens.next_token().unwrap().unwrap();
        assert_eq!((next.line, next.tag.as_str()), (5, "INDI"));
    }

    #[test]
    fn test_skip_keeps_pushed_level_zero() {
        let mut tokens = tokenizer("0 TRLR\n");
        let t = tokens.next_token().unwrap().unwrap();
        tokens.push_back(t);
        assert_eq!(tokens.skip_to_level_zero().unwrap(), None);
        assert!(tokens.has_pushed_back());
    }

    #[test]
    fn test_skip_discards_pushed_deeper_token() {
        let mut tokens = tokenizer("2 X\n0 TRLR\n");
        let t = tokens.next_token().unwrap().unwrap();
        tokens.push_back(t);
        assert_eq!(tokens.skip_to_level_zero().unwrap(), Some(1));
        assert_eq!(tokens.consumed(), 1);
    }

    #[test]
    fn test_skip_to_eof() {
        let mut tokens = tokenizer("1 A\n2 B\n");
        assert_eq!(tokens.skip_to_level_zero().unwrap(), Some(2));
        assert_eq!(tokens.next_token().unwrap(), None);
    }
}
