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

//! Token types produced by the [`Tokenizer`](crate::Tokenizer).

use crate::date::Date;
use std::fmt;

/// The kind of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Unquoted identifier: `k_france`, `dead_data`, `yes`
    BareString,
    /// `=`
    Equals,
    /// `{`
    OpenBrace,
    /// `}`
    CloseBrace,
    /// Integer or float: `42`, `-3`, `0.25`, `.5`
    Number,
    /// `YYYY.MM.DD`
    Date,
    /// `"..."` with the quotes stripped
    QuotedString,
    /// A single character no other rule matched
    Error,
}

impl TokenKind {
    /// Whether a token of this kind may start a `key = ...` pair.
    #[inline]
    pub fn is_key(&self) -> bool {
        matches!(self, Self::BareString | Self::Number | Self::Date)
    }

    /// Whether a token of this kind may appear on the right of `=`.
    #[inline]
    pub fn is_value(&self) -> bool {
        self.is_key() || *self == Self::QuotedString
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::BareString => "BareString",
            Self::Equals => "Equals",
            Self::OpenBrace => "OpenBrace",
            Self::CloseBrace => "CloseBrace",
            Self::Number => "Number",
            Self::Date => "Date",
            Self::QuotedString => "QuotedString",
            Self::Error => "Error",
        };
        f.write_str(name)
    }
}

/// The decoded value of a token.
///
/// Also used as a scope label: a named scope is labelled with its key's
/// decoded value, an anonymous scope with an empty string.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Int(i64),
    Float(f64),
    Date(Date),
    /// The offending character of an [`TokenKind::Error`] token.
    Char(char),
}

impl Value {
    /// The empty label pushed for `{` without a key.
    pub fn anonymous() -> Self {
        Self::Str(String::new())
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    #[inline]
    pub fn as_date(&self) -> Option<Date> {
        match self {
            Self::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// The value as an entity id: a non-negative integer.
    #[inline]
    pub fn as_id(&self) -> Option<u64> {
        self.as_int().and_then(|i| u64::try_from(i).ok())
    }

    /// Short name of the variant, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Str(_) => "string",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::Date(_) => "date",
            Self::Char(_) => "character",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(i) => write!(f, "{}", i),
            Self::Float(x) => write!(f, "{}", x),
            Self::Date(d) => write!(f, "{}", d),
            Self::Char(c) => write!(f, "{}", c),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

/// A token with its kind, source text, decoded value and line.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Source text. For quoted strings the quotes are stripped.
    pub text: String,
    pub value: Value,
    /// 1-based line number.
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, value: Value, line: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            value,
            line,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_and_value_kinds() {
        assert!(TokenKind::BareString.is_key());
        assert!(TokenKind::Number.is_key());
        assert!(TokenKind::Date.is_key());
        assert!(!TokenKind::QuotedString.is_key());
        assert!(TokenKind::QuotedString.is_value());
        assert!(!TokenKind::Equals.is_value());
        assert!(!TokenKind::OpenBrace.is_value());
        assert!(!TokenKind::Error.is_value());
    }

    #[test]
    fn test_value_as_id() {
        assert_eq!(Value::Int(42).as_id(), Some(42));
        assert_eq!(Value::Int(-1).as_id(), None);
        assert_eq!(Value::Float(1.0).as_id(), None);
        assert_eq!(Value::from("42").as_id(), None);
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::from("living").to_string(), "living");
        assert_eq!(Value::Int(-7).to_string(), "-7");
        assert_eq!(Value::Float(0.5).to_string(), "0.5");
        assert_eq!(Value::Date(Date::new(867, 1, 1)).to_string(), "867.1.1");
        assert_eq!(Value::anonymous().to_string(), "");
    }
}
