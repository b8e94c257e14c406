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

//! Event sinks for the scope-tracking parser.
//!
//! The parser drives a [`Scanner`] synchronously, in file order. Scanners
//! override only the callbacks they care about:
//!
//! ```rust
//! use ck3_core::{parse_str, Scanner, SaveResult, ScopePath, Token};
//!
//! #[derive(Default)]
//! struct CountAssignments(usize);
//!
//! impl Scanner for CountAssignments {
//!     fn assign(&mut self, _key: &Token, _value: &Token, _scope: &ScopePath) -> SaveResult<()> {
//!         self.0 += 1;
//!         Ok(())
//!     }
//! }
//!
//! let mut counter = CountAssignments::default();
//! parse_str("a=1 b={ c=2 }", &mut counter).unwrap();
//! assert_eq!(counter.0, 2);
//! ```

use crate::error::{SaveError, SaveResult};
use crate::event::Event;
use crate::scope::ScopePath;
use crate::token::Token;

/// Consumer of parse events.
///
/// All methods have no-op default implementations. Returning an error from
/// any callback aborts the parse with that error.
pub trait Scanner {
    /// A scope opened. `header` is `None` for an anonymous `{`.
    fn open_scope(&mut self, _header: Option<&Token>, _parent: &ScopePath) -> SaveResult<()> {
        Ok(())
    }

    /// The scope at `scope` closed.
    fn close_scope(&mut self, _scope: &ScopePath) -> SaveResult<()> {
        Ok(())
    }

    /// A `key = value` pair inside `scope`.
    fn assign(&mut self, _key: &Token, _value: &Token, _scope: &ScopePath) -> SaveResult<()> {
        Ok(())
    }

    /// A bare value inside `scope`.
    fn value(&mut self, _value: &Token, _scope: &ScopePath) -> SaveResult<()> {
        Ok(())
    }

    /// The input ended cleanly.
    fn done(&mut self) -> SaveResult<()> {
        Ok(())
    }
}

impl<S: Scanner + ?Sized> Scanner for &mut S {
    fn open_scope(&mut self, header: Option<&Token>, parent: &ScopePath) -> SaveResult<()> {
        (**self).open_scope(header, parent)
    }

    fn close_scope(&mut self, scope: &ScopePath) -> SaveResult<()> {
        (**self).close_scope(scope)
    }

    fn assign(&mut self, key: &Token, value: &Token, scope: &ScopePath) -> SaveResult<()> {
        (**self).assign(key, value, scope)
    }

    fn value(&mut self, value: &Token, scope: &ScopePath) -> SaveResult<()> {
        (**self).value(value, scope)
    }

    fn done(&mut self) -> SaveResult<()> {
        (**self).done()
    }
}

/// Scanner that ignores every event. Parsing into it only checks syntax.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullScanner;

impl Scanner for NullScanner {}

/// Scanner that checks brace balancing and gathers counts.
///
/// Fails if a close event's path does not match its own view of the stack,
/// or if the input ends with scopes still open.
#[derive(Debug, Default, Clone)]
pub struct BalanceValidator {
    pub opens: usize,
    pub closes: usize,
    pub assignments: usize,
    pub values: usize,
    pub max_depth: usize,
    depth: usize,
    last_line: usize,
}

impl BalanceValidator {
    /// Current nesting depth.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }
}

impl Scanner for BalanceValidator {
    fn open_scope(&mut self, header: Option<&Token>, parent: &ScopePath) -> SaveResult<()> {
        if let Some(header) = header {
            self.last_line = header.line;
        }
        if parent.len() != self.depth {
            return Err(SaveError::syntax(
                format!(
                    "scope opened at depth {} but validator is at depth {}",
                    parent.len(),
                    self.depth
                ),
                self.last_line,
            ));
        }
        self.opens += 1;
        self.depth += 1;
        self.max_depth = self.max_depth.max(self.depth);
        Ok(())
    }

    fn close_scope(&mut self, scope: &ScopePath) -> SaveResult<()> {
        if self.depth == 0 || scope.len() != self.depth {
            return Err(SaveError::syntax(
                format!(
                    "scope {:?} closed at depth {} but validator is at depth {}",
                    scope.to_string(),
                    scope.len(),
                    self.depth
                ),
                self.last_line,
            ));
        }
        self.closes += 1;
        self.depth -= 1;
        Ok(())
    }

    fn assign(&mut self, key: &Token, _value: &Token, _scope: &ScopePath) -> SaveResult<()> {
        self.last_line = key.line;
        self.assignments += 1;
        Ok(())
    }

    fn value(&mut self, value: &Token, _scope: &ScopePath) -> SaveResult<()> {
        self.last_line = value.line;
        self.values += 1;
        Ok(())
    }

    fn done(&mut self) -> SaveResult<()> {
        if self.depth != 0 || self.opens != self.closes {
            return Err(SaveError::syntax(
                format!("{} scope(s) still open at end of input", self.depth),
                self.last_line,
            ));
        }
        Ok(())
    }
}

/// Scanner that records every event it receives.
#[derive(Debug, Default, Clone)]
pub struct EventCollector {
    pub events: Vec<Event>,
}

impl Scanner for EventCollector {
    fn open_scope(&mut self, header: Option<&Token>, parent: &ScopePath) -> SaveResult<()> {
        self.events.push(Event::OpenScope {
            parent: parent.clone(),
            header: header.cloned(),
        });
        Ok(())
    }

    fn close_scope(&mut self, scope: &ScopePath) -> SaveResult<()> {
        self.events.push(Event::CloseScope {
            scope: scope.clone(),
        });
        Ok(())
    }

    fn assign(&mut self, key: &Token, value: &Token, scope: &ScopePath) -> SaveResult<()> {
        self.events.push(Event::Assign {
            key: key.clone(),
            value: value.clone(),
            scope: scope.clone(),
        });
        Ok(())
    }

    fn value(&mut self, value: &Token, scope: &ScopePath) -> SaveResult<()> {
        self.events.push(Event::Value {
            value: value.clone(),
            scope: scope.clone(),
        });
        Ok(())
    }

    fn done(&mut self) -> SaveResult<()> {
        self.events.push(Event::Done);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SaveErrorKind;
    use crate::token::{TokenKind, Value};

    fn path(labels: &[&str]) -> ScopePath {
        ScopePath::from(labels.iter().map(|s| Value::from(*s)).collect::<Vec<_>>())
    }

    fn bare(text: &str) -> Token {
        Token::new(TokenKind::BareString, text, Value::from(text), 1)
    }

    // ==================== NullScanner tests ====================

    #[test]
    fn test_null_scanner_accepts_everything() {
        let mut s = NullScanner;
        assert!(s.open_scope(None, &path(&[])).is_ok());
        assert!(s.assign(&bare("a"), &bare("b"), &path(&["x"])).is_ok());
        assert!(s.value(&bare("a"), &path(&["x"])).is_ok());
        assert!(s.close_scope(&path(&["x"])).is_ok());
        assert!(s.done().is_ok());
    }

    // ==================== BalanceValidator tests ====================

    #[test]
    fn test_validator_counts() {
        let mut v = BalanceValidator::default();
        v.open_scope(Some(&bare("a")), &path(&[])).unwrap();
        v.open_scope(None, &path(&["a"])).unwrap();
        v.value(&bare("x"), &path(&["a", ""])).unwrap();
        v.close_scope(&path(&["a", ""])).unwrap();
        v.assign(&bare("k"), &bare("v"), &path(&["a"])).unwrap();
        v.close_scope(&path(&["a"])).unwrap();
        v.done().unwrap();

        assert_eq!(v.opens, 2);
        assert_eq!(v.closes, 2);
        assert_eq!(v.values, 1);
        assert_eq!(v.assignments, 1);
        assert_eq!(v.max_depth, 2);
        assert_eq!(v.depth(), 0);
    }

    #[test]
    fn test_validator_rejects_close_without_open() {
        let mut v = BalanceValidator::default();
        let err = v.close_scope(&path(&["a"])).unwrap_err();
        assert_eq!(err.kind, SaveErrorKind::Syntax);
    }

    #[test]
    fn test_validator_rejects_unclosed_at_done() {
        let mut v = BalanceValidator::default();
        v.open_scope(None, &path(&[])).unwrap();
        assert_eq!(v.done().unwrap_err().kind, SaveErrorKind::Syntax);
    }

    #[test]
    fn test_validator_rejects_depth_mismatch() {
        let mut v = BalanceValidator::default();
        assert!(v.open_scope(None, &path(&["phantom"])).is_err());
    }

    // ==================== Forwarding tests ====================

    #[test]
    fn test_mut_ref_forwards() {
        let mut collector = EventCollector::default();
        {
            let mut by_ref = &mut collector;
            Scanner::done(&mut by_ref).unwrap();
        }
        assert_eq!(collector.events, vec![Event::Done]);
    }
}
