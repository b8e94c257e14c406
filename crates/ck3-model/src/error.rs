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

//! Errors raised while interpreting entity fields.
//!
//! These never escape a parse directly: the game-state builder turns them
//! into a [`SaveError`](ck3_core::SaveError) of kind `Semantic` carrying the
//! line of the offending token.

use thiserror::Error;

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// An entity field could not be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// A title key starts with a letter that names no rank.
    #[error("unknown title rank letter '{0}'")]
    UnknownRank(char),

    /// A title key is the empty string.
    #[error("title key is empty")]
    EmptyTitleKey,

    /// Age was requested for a character with no birth date.
    #[error("character {id} has no birth date")]
    MissingBirthDate { id: u64 },

    /// A field's value token has the wrong type.
    #[error("field '{field}' expects {expected}, found {found}")]
    FieldType {
        field: String,
        expected: &'static str,
        found: &'static str,
    },
}
