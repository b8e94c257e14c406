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

//! Scope-tracking event parser.
//!
//! The grammar is
//!
//! ```text
//! document := entry*
//! entry    := value | key '=' value | key '=' '{' entry* '}' | '{' entry* '}'
//! value    := BareString | Number | Date | QuotedString
//! key      := BareString | Number | Date
//! ```
//!
//! A bare value, a `key = value` pair and a `key = { ... }` header share a
//! prefix, so the parser holds up to two tokens (`key` and `=`) before it
//! knows which one it is looking at. A buffered key is only confirmed to be a
//! bare value once the next token turns out not to be `=`.
//!
//! # Basic Usage
//!
//! ```rust
//! use ck3_core::{Event, ScopeParser};
//!
//! let parser = ScopeParser::new("a={ b=1 c=2 }".as_bytes());
//! let events: Vec<Event> = parser.collect::<Result<_, _>>().unwrap();
//!
//! assert!(events[0].is_open());
//! assert!(events[3].is_close());
//! assert_eq!(events[4], Event::Done);
//! ```

use crate::error::{SaveError, SaveResult};
use crate::event::Event;
use crate::reader::LineReader;
use crate::scanner::Scanner;
use crate::scope::ScopePath;
use crate::token::{Token, TokenKind, Value};
use crate::tokenizer::Tokenizer;
use std::collections::VecDeque;
use std::io::Read;

/// Configuration options for the parser.
///
/// ```rust
/// use ck3_core::ParserConfig;
///
/// let config = ParserConfig::default();
/// assert_eq!(config.buffer_size, 64 * 1024);
/// assert_eq!(config.max_scope_depth, 256);
/// assert_eq!(config.first_line, 1);
/// assert_eq!(config.name, None);
/// ```
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Read buffer size in bytes.
    ///
    /// Default: 64KB
    pub buffer_size: usize,

    /// Maximum line length in bytes. Longer lines fail with a limit error.
    ///
    /// Default: 16MB
    pub max_line_length: usize,

    /// Maximum scope nesting depth. Deeper input fails with a limit error.
    ///
    /// Default: 256
    pub max_scope_depth: usize,

    /// Line number given to the first line read. Set to 2 when the caller
    /// already consumed a checksum header line.
    ///
    /// Default: 1
    pub first_line: usize,

    /// Save name attached to every error.
    ///
    /// Default: None
    pub name: Option<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            buffer_size: 64 * 1024,
            max_line_length: 16 * 1024 * 1024,
            max_scope_depth: 256,
            first_line: 1,
            name: None,
        }
    }
}

impl ParserConfig {
    /// Default configuration with a save name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

/// Tokens held back until the next token disambiguates them.
#[derive(Debug)]
enum Pending {
    Empty,
    /// A key-capable token: a bare value, or the start of `key =`.
    Key(Token),
    /// `key =`, waiting for a value or `{`.
    KeyEquals(Token),
}

/// Streaming scope-tracking parser.
///
/// Yields [`Event`]s in file order; the last item of a successful parse is
/// [`Event::Done`]. After the first error the iterator is exhausted.
pub struct ScopeParser<R: Read> {
    tokens: Tokenizer<R>,
    config: ParserConfig,
    scope: ScopePath,
    pending: Pending,
    queue: VecDeque<Event>,
    finished: bool,
}

impl<R: Read> ScopeParser<R> {
    /// Create a parser with default configuration.
    pub fn new(reader: R) -> Self {
        Self::with_config(reader, ParserConfig::default())
    }

    /// Create a parser with custom configuration.
    pub fn with_config(reader: R, config: ParserConfig) -> Self {
        let lines = LineReader::with_capacity(reader, config.buffer_size)
            .max_line_length(config.max_line_length)
            .first_line(config.first_line);
        Self {
            tokens: Tokenizer::from_lines(lines),
            config,
            scope: ScopePath::new(),
            pending: Pending::Empty,
            queue: VecDeque::with_capacity(2),
            finished: false,
        }
    }

    /// The current scope path.
    #[inline]
    pub fn scope(&self) -> &ScopePath {
        &self.scope
    }

    /// Parse the whole input, forwarding every event to `scanner`.
    pub fn drive<S: Scanner + ?Sized>(mut self, scanner: &mut S) -> SaveResult<()> {
        while let Some(event) = self.next_event()? {
            event
                .dispatch(scanner)
                .map_err(|e| self.attach_name(e))?;
        }
        Ok(())
    }

    /// Parse the next event from the stream.
    pub fn next_event(&mut self) -> SaveResult<Option<Event>> {
        match self.advance() {
            Ok(event) => Ok(event),
            Err(e) => {
                self.finished = true;
                self.queue.clear();
                Err(self.attach_name(e))
            }
        }
    }

    fn attach_name(&self, err: SaveError) -> SaveError {
        match &self.config.name {
            Some(name) => err.with_name(name.clone()),
            None => err,
        }
    }

    fn advance(&mut self) -> SaveResult<Option<Event>> {
        loop {
            if let Some(event) = self.queue.pop_front() {
                return Ok(Some(event));
            }
            if self.finished {
                return Ok(None);
            }
            match self.tokens.next_token()? {
                Some(token) => self.feed(token)?,
                None => self.finish()?,
            }
        }
    }

    fn feed(&mut self, token: Token) -> SaveResult<()> {
        if token.kind == TokenKind::Error {
            let ch = match token.value {
                Value::Char(c) => c,
                _ => token.text.chars().next().unwrap_or('\u{fffd}'),
            };
            return Err(SaveError::lexical(ch, token.line));
        }

        match std::mem::replace(&mut self.pending, Pending::Empty) {
            Pending::Empty => self.feed_empty(token),
            Pending::Key(key) => {
                if token.kind == TokenKind::Equals {
                    self.pending = Pending::KeyEquals(key);
                    return Ok(());
                }
                self.queue.push_back(Event::Value {
                    value: key,
                    scope: self.scope.clone(),
                });
                self.feed_empty(token)
            }
            Pending::KeyEquals(key) => match token.kind {
                TokenKind::OpenBrace => self.open_scope(Some(key), token.line),
                kind if kind.is_value() => {
                    self.queue.push_back(Event::Assign {
                        key,
                        value: token,
                        scope: self.scope.clone(),
                    });
                    Ok(())
                }
                _ => Err(unexpected(&token)),
            },
        }
    }

    fn feed_empty(&mut self, token: Token) -> SaveResult<()> {
        match token.kind {
            TokenKind::BareString | TokenKind::Number | TokenKind::Date => {
                self.pending = Pending::Key(token);
                Ok(())
            }
            TokenKind::QuotedString => {
                self.queue.push_back(Event::Value {
                    value: token,
                    scope: self.scope.clone(),
                });
                Ok(())
            }
            TokenKind::CloseBrace => {
                if self.scope.is_empty() {
                    return Err(SaveError::unmatched_close(token.line));
                }
                self.queue.push_back(Event::CloseScope {
                    scope: self.scope.clone(),
                });
                self.scope.pop();
                Ok(())
            }
            TokenKind::OpenBrace => self.open_scope(None, token.line),
            _ => Err(unexpected(&token)),
        }
    }

    fn open_scope(&mut self, header: Option<Token>, line: usize) -> SaveResult<()> {
        if self.scope.len() >= self.config.max_scope_depth {
            return Err(SaveError::limit(
                format!(
                    "scope depth exceeds limit {}",
                    self.config.max_scope_depth
                ),
                line,
            ));
        }
        let label = header
            .as_ref()
            .map(|t| t.value.clone())
            .unwrap_or_else(Value::anonymous);
        self.queue.push_back(Event::OpenScope {
            parent: self.scope.clone(),
            header,
        });
        self.scope.push(label);
        Ok(())
    }

    fn finish(&mut self) -> SaveResult<()> {
        self.finished = true;
        match std::mem::replace(&mut self.pending, Pending::Empty) {
            Pending::Empty => {}
            Pending::Key(key) => return Err(SaveError::leftover_tokens(1, key.line)),
            Pending::KeyEquals(key) => return Err(SaveError::leftover_tokens(2, key.line)),
        }
        if !self.scope.is_empty() {
            return Err(SaveError::syntax(
                format!(
                    "{} unclosed scope(s) at end of input ({})",
                    self.scope.len(),
                    self.scope
                ),
                self.tokens.line_number(),
            ));
        }
        self.queue.push_back(Event::Done);
        Ok(())
    }
}

impl<R: Read> Iterator for ScopeParser<R> {
    type Item = SaveResult<Event>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_event().transpose()
    }
}

fn unexpected(token: &Token) -> SaveError {
    SaveError::syntax(format!("unexpected {} token", token.kind), token.line)
}

/// Parse `reader`, driving `scanner` with every event.
pub fn parse<R: Read, S: Scanner + ?Sized>(reader: R, scanner: &mut S) -> SaveResult<()> {
    ScopeParser::new(reader).drive(scanner)
}

/// Parse `reader` with custom configuration.
pub fn parse_with_config<R: Read, S: Scanner + ?Sized>(
    reader: R,
    config: ParserConfig,
    scanner: &mut S,
) -> SaveResult<()> {
    ScopeParser::with_config(reader, config).drive(scanner)
}

/// Parse an in-memory string.
pub fn parse_str<S: Scanner + ?Sized>(input: &str, scanner: &mut S) -> SaveResult<()> {
    parse(input.as_bytes(), scanner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SaveErrorKind;
    use crate::scanner::EventCollector;

    fn events(input: &str) -> Vec<Event> {
        ScopeParser::new(input.as_bytes())
            .collect::<SaveResult<Vec<_>>>()
            .unwrap()
    }

    fn error(input: &str) -> SaveError {
        ScopeParser::new(input.as_bytes())
            .collect::<SaveResult<Vec<_>>>()
            .unwrap_err()
    }

    fn path(labels: &[&str]) -> ScopePath {
        ScopePath::from(labels.iter().map(|s| Value::from(*s)).collect::<Vec<_>>())
    }

    // ==================== Basic shape tests ====================

    #[test]
    fn test_empty_input() {
        assert_eq!(events(""), vec![Event::Done]);
        assert_eq!(events("\n  \n"), vec![Event::Done]);
    }

    #[test]
    fn test_named_scope() {
        let evs = events("a={ b=1 c=2 }");
        assert_eq!(evs.len(), 5);

        match &evs[0] {
            Event::OpenScope { parent, header } => {
                assert!(parent.is_empty());
                assert_eq!(header.as_ref().unwrap().text, "a");
            }
            other => panic!("expected OpenScope, got {:?}", other),
        }
        for (event, (key, value)) in evs[1..3].iter().zip([("b", 1), ("c", 2)]) {
            match event {
                Event::Assign { key: k, value: v, scope } => {
                    assert_eq!(k.text, key);
                    assert_eq!(v.value, Value::Int(value));
                    assert_eq!(scope, &path(&["a"]));
                }
                other => panic!("expected Assign, got {:?}", other),
            }
        }
        assert_eq!(evs[3], Event::CloseScope { scope: path(&["a"]) });
        assert_eq!(evs[4], Event::Done);
    }

    #[test]
    fn test_anonymous_list_scope() {
        let evs = events("{ 1 2 3 }");
        assert_eq!(
            evs[0],
            Event::OpenScope {
                parent: ScopePath::new(),
                header: None
            }
        );
        let values: Vec<_> = evs[1..4]
            .iter()
            .map(|e| match e {
                Event::Value { value, scope } => {
                    assert_eq!(scope, &path(&[""]));
                    value.value.clone()
                }
                other => panic!("expected Value, got {:?}", other),
            })
            .collect();
        assert_eq!(values, vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
        assert_eq!(evs[4], Event::CloseScope { scope: path(&[""]) });
    }

    #[test]
    fn test_numeric_scope_label() {
        let evs = events("living={ 42={ birth=1.1.1 } }");
        match &evs[2] {
            Event::Assign { scope, .. } => {
                assert_eq!(
                    scope,
                    &ScopePath::from(vec![Value::from("living"), Value::Int(42)])
                );
            }
            other => panic!("expected Assign, got {:?}", other),
        }
    }

    #[test]
    fn test_quoted_string_is_never_a_key() {
        let evs = events("\"x\" y=1");
        assert!(matches!(&evs[0], Event::Value { value, .. } if value.text == "x"));
        assert!(matches!(&evs[1], Event::Assign { key, .. } if key.text == "y"));

        let err = error("\"x\" = 1");
        assert_eq!(err.kind, SaveErrorKind::Syntax);
    }

    #[test]
    fn test_quoted_assign_value() {
        let evs = events("name=\"Hugues Capet\"");
        match &evs[0] {
            Event::Assign { value, .. } => {
                assert_eq!(value.kind, TokenKind::QuotedString);
                assert_eq!(value.value, Value::from("Hugues Capet"));
            }
            other => panic!("expected Assign, got {:?}", other),
        }
    }

    #[test]
    fn test_bare_value_flushed_before_close() {
        let evs = events("a={ x }");
        assert!(matches!(&evs[1], Event::Value { value, .. } if value.text == "x"));
        assert!(evs[2].is_close());
    }

    #[test]
    fn test_bare_value_flushed_before_open() {
        let evs = events("x { }");
        assert!(matches!(&evs[0], Event::Value { value, .. } if value.text == "x"));
        assert!(evs[1].is_open());
    }

    #[test]
    fn test_key_value_split_across_lines() {
        let evs = events("a\n=\n1");
        match &evs[0] {
            Event::Assign { key, value, .. } => {
                assert_eq!(key.line, 1);
                assert_eq!(value.line, 3);
            }
            other => panic!("expected Assign, got {:?}", other),
        }
    }

    #[test]
    fn test_date_and_number_keys() {
        let evs = events("867.1.1=yes 12=no");
        assert!(matches!(&evs[0], Event::Assign { key, .. } if key.kind == TokenKind::Date));
        assert!(matches!(&evs[1], Event::Assign { key, .. } if key.kind == TokenKind::Number));
    }

    // ==================== Error tests ====================

    #[test]
    fn test_unmatched_close() {
        let err = error("a=1\n}");
        assert_eq!(err.kind, SaveErrorKind::UnmatchedClose);
        assert_eq!(err.line, Some(2));
    }

    #[test]
    fn test_lexical_error() {
        let err = error("a=1\nb=#");
        assert_eq!(err.kind, SaveErrorKind::Lexical);
        assert_eq!(err.line, Some(2));
        assert!(err.message.contains('#'));
    }

    #[test]
    fn test_plus_signed_number_is_lexical_error() {
        let err = error("a=+3");
        assert_eq!(err.kind, SaveErrorKind::Lexical);
        assert!(err.message.contains("unexpected character \"+\""));
    }

    #[test]
    fn test_leading_equals() {
        let err = error("= 1");
        assert_eq!(err.kind, SaveErrorKind::Syntax);
        assert!(err.message.contains("Equals"));
    }

    #[test]
    fn test_double_equals() {
        let err = error("a = = 1");
        assert_eq!(err.kind, SaveErrorKind::Syntax);
    }

    #[test]
    fn test_close_after_equals() {
        let err = error("x={ a = }");
        assert_eq!(err.kind, SaveErrorKind::Syntax);
        assert!(err.message.contains("CloseBrace"));
    }

    #[test]
    fn test_leftover_key() {
        let err = error("a=1 b");
        assert_eq!(err.kind, SaveErrorKind::LeftoverTokens);
        assert_eq!(err.line, Some(1));
    }

    #[test]
    fn test_leftover_key_equals() {
        let err = error("a=1\nb=");
        assert_eq!(err.kind, SaveErrorKind::LeftoverTokens);
        assert_eq!(err.line, Some(2));
    }

    #[test]
    fn test_unclosed_scope_at_eof() {
        let err = error("a={ b=1");
        assert_eq!(err.kind, SaveErrorKind::Syntax);
        assert!(err.message.contains("unclosed"));
    }

    #[test]
    fn test_iterator_ends_after_error() {
        let mut parser = ScopeParser::new("}\na=1".as_bytes());
        assert!(parser.next().unwrap().is_err());
        assert!(parser.next().is_none());
    }

    // ==================== Configuration tests ====================

    #[test]
    fn test_name_attached_to_errors() {
        let parser = ScopeParser::with_config("}".as_bytes(), ParserConfig::named("autosave"));
        let err = parser.drive(&mut EventCollector::default()).unwrap_err();
        assert_eq!(err.name.as_deref(), Some("autosave"));
        assert!(err.to_string().starts_with("autosave:1:"));
    }

    #[test]
    fn test_first_line_offset() {
        let config = ParserConfig {
            first_line: 2,
            ..ParserConfig::default()
        };
        let err = ScopeParser::with_config("a=1\n}".as_bytes(), config)
            .collect::<SaveResult<Vec<_>>>()
            .unwrap_err();
        assert_eq!(err.line, Some(3));
    }

    #[test]
    fn test_max_scope_depth() {
        let config = ParserConfig {
            max_scope_depth: 2,
            ..ParserConfig::default()
        };
        let err = ScopeParser::with_config("a={ b={ c={ } } }".as_bytes(), config)
            .collect::<SaveResult<Vec<_>>>()
            .unwrap_err();
        assert_eq!(err.kind, SaveErrorKind::Limit);

        let config = ParserConfig {
            max_scope_depth: 3,
            ..ParserConfig::default()
        };
        assert!(ScopeParser::with_config("a={ b={ c={ } } }".as_bytes(), config)
            .collect::<SaveResult<Vec<_>>>()
            .is_ok());
    }

    // ==================== Scanner driving tests ====================

    #[test]
    fn test_drive_matches_iterator() {
        let input = "date=867.1.1 living={ 5={ traits={ 1 2 } } }";
        let mut collector = EventCollector::default();
        parse_str(input, &mut collector).unwrap();
        assert_eq!(collector.events, events(input));
    }

    #[test]
    fn test_scanner_error_aborts_with_name() {
        struct Refuse;
        impl Scanner for Refuse {
            fn value(&mut self, value: &Token, _scope: &ScopePath) -> SaveResult<()> {
                Err(SaveError::semantic("no values please", value.line))
            }
        }
        let err = parse_with_config("a=1\nb".as_bytes(), ParserConfig::named("s"), &mut Refuse)
            .unwrap_err();
        // `b` alone is flushed only at end of input, which is a leftover error.
        assert_eq!(err.kind, SaveErrorKind::LeftoverTokens);

        let err = parse_with_config("{ x }".as_bytes(), ParserConfig::named("s"), &mut Refuse)
            .unwrap_err();
        assert_eq!(err.kind, SaveErrorKind::Semantic);
        assert_eq!(err.name.as_deref(), Some("s"));
    }
}
