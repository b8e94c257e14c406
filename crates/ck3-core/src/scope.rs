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

//! Scope paths: the chain of enclosing scope labels, outermost first.

use crate::token::Value;
use std::fmt;

/// Ordered chain of scope labels locating a position in the file.
///
/// ```rust
/// use ck3_core::{ScopePath, Value};
///
/// let path = ScopePath::from(vec![Value::from("living"), Value::Int(7)]);
/// assert!(path.starts_with_names(&["living"]));
/// assert_eq!(path.to_string(), "living/7");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScopePath(Vec<Value>);

impl ScopePath {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn labels(&self) -> &[Value] {
        &self.0
    }

    #[inline]
    pub fn last(&self) -> Option<&Value> {
        self.0.last()
    }

    pub fn push(&mut self, label: Value) {
        self.0.push(label);
    }

    pub fn pop(&mut self) -> Option<Value> {
        self.0.pop()
    }

    /// A copy of this path with `label` appended.
    pub fn child(&self, label: Value) -> Self {
        let mut labels = Vec::with_capacity(self.0.len() + 1);
        labels.extend_from_slice(&self.0);
        labels.push(label);
        Self(labels)
    }

    /// Whether `prefix` is a (non-strict) prefix of this path.
    pub fn starts_with(&self, prefix: &ScopePath) -> bool {
        self.0.len() >= prefix.0.len() && self.0[..prefix.0.len()] == prefix.0[..]
    }

    /// Whether the path begins with the given string labels.
    pub fn starts_with_names(&self, names: &[&str]) -> bool {
        self.0.len() >= names.len()
            && self
                .0
                .iter()
                .zip(names)
                .all(|(label, name)| label.as_str() == Some(*name))
    }

    /// Whether the path consists of exactly the given string labels.
    pub fn is(&self, names: &[&str]) -> bool {
        self.0.len() == names.len() && self.starts_with_names(names)
    }

    /// Labels after `base`, joined with `/`, with `key` appended if given.
    ///
    /// Returns `None` when `base` is not a prefix of this path. This is how
    /// the object builder turns an event deep inside an entity into a single
    /// field key such as `dead_data/date`.
    pub fn relative_key(&self, base: &ScopePath, key: Option<&Value>) -> Option<String> {
        if !self.starts_with(base) {
            return None;
        }
        let mut out = String::new();
        for (i, label) in self.0[base.0.len()..].iter().chain(key).enumerate() {
            if i > 0 {
                out.push('/');
            }
            out.push_str(&label.to_string());
        }
        Some(out)
    }
}

impl From<Vec<Value>> for ScopePath {
    fn from(labels: Vec<Value>) -> Self {
        Self(labels)
    }
}

impl fmt::Display for ScopePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, label) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{}", label)?;
        }
        Ok(())
    }
}
