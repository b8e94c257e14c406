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

//! Error types for save-file parsing.
//!
//! Every fatal error carries the line it was detected on (when one is known)
//! and, once the parser attaches it, the name of the save being read. Callers
//! can locate the offending input from the rendered message alone:
//!
//! ```rust
//! use ck3_core::SaveError;
//!
//! let err = SaveError::unmatched_close(12).with_name("autosave");
//! assert_eq!(err.line, Some(12));
//! assert_eq!(err.to_string(), "autosave:12: UnmatchedClose: unmatched }");
//! ```

use std::fmt;
use thiserror::Error;

/// The kind of error that occurred while reading a save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SaveErrorKind {
    /// A character matched none of the token patterns.
    Lexical,
    /// A token appeared where the grammar does not allow it.
    Syntax,
    /// A `}` with no open scope.
    UnmatchedClose,
    /// Input ended while a key or `key =` was still pending.
    LeftoverTokens,
    /// Well-formed input that the object builder cannot interpret.
    Semantic,
    /// The input is not a save file (bad container, bad encoding).
    Format,
    /// A configured resource limit was exceeded.
    Limit,
    /// Reading the underlying stream failed.
    Io,
}

impl fmt::Display for SaveErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lexical => write!(f, "LexicalError"),
            Self::Syntax => write!(f, "SyntaxError"),
            Self::UnmatchedClose => write!(f, "UnmatchedClose"),
            Self::LeftoverTokens => write!(f, "LeftoverTokens"),
            Self::Semantic => write!(f, "SemanticError"),
            Self::Format => write!(f, "FormatError"),
            Self::Limit => write!(f, "LimitError"),
            Self::Io => write!(f, "IOError"),
        }
    }
}

/// An error that aborted a parse.
#[derive(Debug, Clone, Error)]
#[error("{}{kind}: {message}", location(.name, .line))]
pub struct SaveError {
    /// The kind of error.
    pub kind: SaveErrorKind,
    /// Human-readable error message.
    pub message: String,
    /// Line number (1-based), if the error is tied to a position.
    pub line: Option<usize>,
    /// Name of the save being read, if known.
    pub name: Option<String>,
}

fn location(name: &Option<String>, line: &Option<usize>) -> String {
    let mut s = String::new();
    if let Some(name) = name {
        s.push_str(name);
        s.push(':');
    }
    if let Some(line) = line {
        s.push_str(&line.to_string());
        s.push(':');
    }
    if !s.is_empty() {
        s.push(' ');
    }
    s
}

impl SaveError {
    /// Create a new error tied to a line.
    pub fn new(kind: SaveErrorKind, message: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            message: message.into(),
            line: Some(line),
            name: None,
        }
    }

    /// Attach the save name. An already attached name is kept.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        if self.name.is_none() {
            self.name = Some(name.into());
        }
        self
    }

    pub fn lexical(ch: char, line: usize) -> Self {
        Self::new(
            SaveErrorKind::Lexical,
            format!("unexpected character \"{}\"", ch),
            line,
        )
    }

    pub fn syntax(message: impl Into<String>, line: usize) -> Self {
        Self::new(SaveErrorKind::Syntax, message, line)
    }

    pub fn unmatched_close(line: usize) -> Self {
        Self::new(SaveErrorKind::UnmatchedClose, "unmatched }", line)
    }

    pub fn leftover_tokens(count: usize, line: usize) -> Self {
        Self::new(
            SaveErrorKind::LeftoverTokens,
            format!("input ended with {} unresolved token(s)", count),
            line,
        )
    }

    pub fn semantic(message: impl Into<String>, line: usize) -> Self {
        Self::new(SaveErrorKind::Semantic, message, line)
    }

    pub fn limit(message: impl Into<String>, line: usize) -> Self {
        Self::new(SaveErrorKind::Limit, message, line)
    }

    /// Container or encoding problem. `line` is `None` when the error is
    /// detected before any line was read.
    pub fn format(message: impl Into<String>, line: Option<usize>) -> Self {
        Self {
            kind: SaveErrorKind::Format,
            message: message.into(),
            line,
            name: None,
        }
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self {
            kind: SaveErrorKind::Io,
            message: message.into(),
            line: None,
            name: None,
        }
    }
}

impl From<std::io::Error> for SaveError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string())
    }
}

/// Result type for save parsing.
pub type SaveResult<T> = Result<T, SaveError>;

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Kind display tests ====================

    #[test]
    fn test_kind_display() {
        assert_eq!(SaveErrorKind::Lexical.to_string(), "LexicalError");
        assert_eq!(SaveErrorKind::Syntax.to_string(), "SyntaxError");
        assert_eq!(SaveErrorKind::UnmatchedClose.to_string(), "UnmatchedClose");
        assert_eq!(SaveErrorKind::LeftoverTokens.to_string(), "LeftoverTokens");
        assert_eq!(SaveErrorKind::Semantic.to_string(), "SemanticError");
        assert_eq!(SaveErrorKind::Format.to_string(), "FormatError");
        assert_eq!(SaveErrorKind::Limit.to_string(), "LimitError");
        assert_eq!(SaveErrorKind::Io.to_string(), "IOError");
    }

    // ==================== Rendering tests ====================

    #[test]
    fn test_display_with_name_and_line() {
        let err = SaveError::syntax("unexpected Equals token", 7).with_name("ironman");
        assert_eq!(
            err.to_string(),
            "ironman:7: SyntaxError: unexpected Equals token"
        );
    }

    #[test]
    fn test_display_line_only() {
        let err = SaveError::lexical('#', 3);
        assert_eq!(err.to_string(), "3: LexicalError: unexpected character \"#\"");
    }

    #[test]
    fn test_display_name_only() {
        let err = SaveError::format("not a savefile", None).with_name("broken");
        assert_eq!(err.to_string(), "broken: FormatError: not a savefile");
    }

    #[test]
    fn test_display_bare() {
        let err = SaveError::io("disk on fire");
        assert_eq!(err.to_string(), "IOError: disk on fire");
    }

    // ==================== Builder tests ====================

    #[test]
    fn test_with_name_keeps_first() {
        let err = SaveError::unmatched_close(1)
            .with_name("first")
            .with_name("second");
        assert_eq!(err.name.as_deref(), Some("first"));
    }

    #[test]
    fn test_leftover_tokens_message() {
        let err = SaveError::leftover_tokens(2, 99);
        assert_eq!(err.kind, SaveErrorKind::LeftoverTokens);
        assert_eq!(err.line, Some(99));
        assert!(err.message.contains('2'));
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: SaveError = io.into();
        assert_eq!(err.kind, SaveErrorKind::Io);
        assert_eq!(err.line, None);
        assert!(err.message.contains("gone"));
    }

    #[test]
    fn test_error_is_std_error() {
        fn accepts_error<E: std::error::Error>(_: E) {}
        accepts_error(SaveError::syntax("test", 1));
    }
}
