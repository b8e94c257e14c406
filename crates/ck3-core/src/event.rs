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

//! Parse events yielded by [`ScopeParser`](crate::ScopeParser).
//!
//! # Example Event Sequence
//!
//! For this input:
//!
//! ```text
//! date=867.1.1
//! living={
//!     5={ birth=840.3.2 traits={ 12 40 } }
//! }
//! ```
//!
//! The parser yields:
//!
//! ```text
//! Assign   date = 867.1.1          scope ()
//! OpenScope header=living          parent ()
//! OpenScope header=5               parent (living)
//! Assign   birth = 840.3.2         scope (living, 5)
//! OpenScope header=traits          parent (living, 5)
//! Value    12                      scope (living, 5, traits)
//! Value    40                      scope (living, 5, traits)
//! CloseScope                       scope (living, 5, traits)
//! CloseScope                       scope (living, 5)
//! CloseScope                       scope (living)
//! Done
//! ```

use crate::error::SaveResult;
use crate::scanner::Scanner;
use crate::scope::ScopePath;
use crate::token::Token;

/// Event emitted by the scope-tracking parser.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A scope opened. `header` is the key token for `key = {`, `None` for
    /// an anonymous `{`. `parent` is the path outside the new scope.
    OpenScope {
        parent: ScopePath,
        header: Option<Token>,
    },
    /// A scope closed. `scope` is the full path of the scope being closed.
    CloseScope { scope: ScopePath },
    /// A `key = value` pair.
    Assign {
        key: Token,
        value: Token,
        scope: ScopePath,
    },
    /// A bare value with no key, as found in list-like scopes.
    Value { value: Token, scope: ScopePath },
    /// End of a well-formed input.
    Done,
}

impl Event {
    /// Forward this event to a scanner.
    pub fn dispatch<S: Scanner + ?Sized>(&self, scanner: &mut S) -> SaveResult<()> {
        match self {
            Self::OpenScope { parent, header } => scanner.open_scope(header.as_ref(), parent),
            Self::CloseScope { scope } => scanner.close_scope(scope),
            Self::Assign { key, value, scope } => scanner.assign(key, value, scope),
            Self::Value { value, scope } => scanner.value(value, scope),
            Self::Done => scanner.done(),
        }
    }

    /// Source line, when the event carries a token.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::OpenScope { header, .. } => header.as_ref().map(|t| t.line),
            Self::Assign { key, .. } => Some(key.line),
            Self::Value { value, .. } => Some(value.line),
            Self::CloseScope { .. } | Self::Done => None,
        }
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        matches!(self, Self::OpenScope { .. })
    }

    #[inline]
    pub fn is_close(&self) -> bool {
        matches!(self, Self::CloseScope { .. })
    }
}
