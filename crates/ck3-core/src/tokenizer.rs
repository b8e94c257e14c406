// CK3 Save - Crusader Kings III save-file reader
//
// Copyright (c) 2025 ck3-save contributors.
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

//! Tokenizer for the save-file text format.
//!
//! Each line is scanned on its own. At every position the rules below are
//! tried in order and the first one that matches wins:
//!
//! | rule         | pattern                                   |
//! |--------------|-------------------------------------------|
//! | whitespace   | skipped                                   |
//! | `=` `{` `}`  | single character                          |
//! | date         | `digits.digits.digits`                    |
//! | number       | `-?digits[.digits*]` or `-?.digits`       |
//! | bare string  | `[A-Za-z0-9_.:][A-Za-z0-9_.:-]*`          |
//! | quoted       | `"..."` closed on the same line           |
//! | error        | any single character                      |
//!
//! Unmatched characters become [`TokenKind::Error`] tokens rather than
//! failures; the parser decides what to do with them.

use crate::date::Date;
use crate::error::{SaveError, SaveErrorKind, SaveResult};
use crate::reader::LineReader;
use crate::token::{Token, TokenKind, Value};
use std::io::Read;

/// Lazy, forward-only token stream over a line-oriented reader.
///
/// # Examples
///
/// ```rust
/// use ck3_core::{Tokenizer, TokenKind};
/// use std::io::Cursor;
///
/// let tokens: Vec<_> = Tokenizer::new(Cursor::new("birth=1.2.3"))
///     .collect::<Result<_, _>>()
///     .unwrap();
///
/// let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
/// assert_eq!(kinds, [TokenKind::BareString, TokenKind::Equals, TokenKind::Date]);
/// ```
pub struct Tokenizer<R: Read> {
    reader: LineReader<R>,
    line: String,
    line_number: usize,
    pos: usize,
    finished: bool,
}

impl<R: Read> Tokenizer<R> {
    /// Tokenize `reader` with default reader settings.
    pub fn new(reader: R) -> Self {
        Self::from_lines(LineReader::new(reader))
    }

    /// Tokenize an already configured line reader.
    pub fn from_lines(reader: LineReader<R>) -> Self {
        Self {
            reader,
            line: String::new(),
            line_number: 0,
            pos: 0,
            finished: false,
        }
    }

    /// Line of the most recently read input line.
    #[inline]
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Produce the next token, or `None` at end of input.
    pub fn next_token(&mut self) -> SaveResult<Option<Token>> {
        loop {
            if self.finished {
                return Ok(None);
            }

            self.pos = skip_whitespace(self.line.as_bytes(), self.pos);
            if self.pos < self.line.len() {
                let (token, end) = lex_token(&self.line, self.pos, self.line_number)?;
                self.pos = end;
                return Ok(Some(token));
            }

            match self.reader.next_line()? {
                Some((number, line)) => {
                    self.line_number = number;
                    self.line = line;
                    self.pos = 0;
                }
                None => self.finished = true,
            }
        }
    }
}

impl<R: Read> Iterator for Tokenizer<R> {
    type Item = SaveResult<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.next_token().transpose();
        if matches!(item, Some(Err(_))) {
            self.finished = true;
        }
        item
    }
}

/// Tokenize a whole string.
pub fn tokenize(input: &str) -> SaveResult<Vec<Token>> {
    Tokenizer::new(input.as_bytes()).collect()
}

#[inline]
fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c)
}

#[inline]
fn is_word(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'_' | b'.' | b':')
}

#[inline]
fn skip_whitespace(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && is_space(bytes[pos]) {
        pos += 1;
    }
    pos
}

#[inline]
fn digits_end(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    pos
}

/// End of a `digits.digits.digits` match starting at `start`.
fn match_date(bytes: &[u8], start: usize) -> Option<usize> {
    let mut pos = start;
    for part in 0..3 {
        let end = digits_end(bytes, pos);
        if end == pos {
            return None;
        }
        pos = end;
        if part < 2 {
            if bytes.get(pos) != Some(&b'.') {
                return None;
            }
            pos += 1;
        }
    }
    Some(pos)
}

/// End of a number match starting at `start`.
fn match_number(bytes: &[u8], start: usize) -> Option<usize> {
    let mut pos = start;
    if matches!(bytes.get(pos), Some(b'-')) {
        pos += 1;
    }
    let int_end = digits_end(bytes, pos);
    if int_end > pos {
        pos = int_end;
        if bytes.get(pos) == Some(&b'.') {
            pos = digits_end(bytes, pos + 1);
        }
        return Some(pos);
    }
    if bytes.get(pos) == Some(&b'.') {
        let frac_end = digits_end(bytes, pos + 1);
        if frac_end > pos + 1 {
            return Some(frac_end);
        }
    }
    None
}

fn match_bare(bytes: &[u8], start: usize) -> Option<usize> {
    if !is_word(bytes[start]) {
        return None;
    }
    let mut pos = start + 1;
    while pos < bytes.len() && (is_word(bytes[pos]) || bytes[pos] == b'-') {
        pos += 1;
    }
    Some(pos)
}

fn decode_number(text: &str) -> Value {
    if !text.contains('.') {
        if let Ok(i) = text.parse::<i64>() {
            return Value::Int(i);
        }
    }
    // The lexical form guarantees at least one digit, so this only fails for
    // forms Rust's float grammar rejects, which the matcher never produces.
    Value::Float(text.parse::<f64>().unwrap_or(f64::NAN))
}

/// Lex one token at `pos`, which must not be whitespace or end of line.
fn lex_token(line: &str, pos: usize, line_number: usize) -> SaveResult<(Token, usize)> {
    let bytes = line.as_bytes();
    let single = |kind| {
        let text = &line[pos..pos + 1];
        Ok((Token::new(kind, text, Value::from(text), line_number), pos + 1))
    };

    match bytes[pos] {
        b'=' => return single(TokenKind::Equals),
        b'{' => return single(TokenKind::OpenBrace),
        b'}' => return single(TokenKind::CloseBrace),
        _ => {}
    }

    if let Some(end) = match_date(bytes, pos) {
        let text = &line[pos..end];
        let date: Date = text.parse().map_err(|e| {
            SaveError::new(SaveErrorKind::Lexical, format!("{}", e), line_number)
        })?;
        return Ok((
            Token::new(TokenKind::Date, text, Value::Date(date), line_number),
            end,
        ));
    }

    if let Some(end) = match_number(bytes, pos) {
        let text = &line[pos..end];
        return Ok((
            Token::new(TokenKind::Number, text, decode_number(text), line_number),
            end,
        ));
    }

    if let Some(end) = match_bare(bytes, pos) {
        let text = &line[pos..end];
        return Ok((
            Token::new(TokenKind::BareString, text, Value::from(text), line_number),
            end,
        ));
    }

    if bytes[pos] == b'"' {
        if let Some(len) = memchr::memchr(b'"', &bytes[pos + 1..]) {
            let end = pos + 1 + len;
            let text = &line[pos + 1..end];
            return Ok((
                Token::new(TokenKind::QuotedString, text, Value::from(text), line_number),
                end + 1,
            ));
        }
    }

    // Safe: `pos` is on a char boundary because every rule above advances by
    // whole ASCII bytes or stops at an ASCII quote.
    let ch = line[pos..].chars().next().unwrap_or('\u{fffd}');
    let end = pos + ch.len_utf8();
    Ok((
        Token::new(TokenKind::Error, &line[pos..end], Value::Char(ch), line_number),
        end,
    ))
}
