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

//! Field tables shared by the entity types.
//!
//! An entity declares two static tables mapping a relative key path (such as
//! `dead_data/date`) to a setter: one for `key = value` events and one for
//! bare values. Keys not in the tables are ignored.

use crate::error::{ModelError, ModelResult};
use ck3_core::{Date, Token};

/// Numeric entity id.
pub type EntityId = u64;

/// Setter invoked for a matching field key.
pub type Setter<T> = fn(&mut T, &str, &Token) -> ModelResult<()>;

/// A static `(key, setter)` table.
pub type FieldTable<T> = &'static [(&'static str, Setter<T>)];

/// An object built from the events inside one save-file scope.
pub trait Entity: Sized + 'static {
    /// Name used in log output.
    const KIND: &'static str;

    fn new(id: EntityId) -> Self;

    /// Setters for `key = value` events.
    fn assign_fields() -> FieldTable<Self>;

    /// Setters for bare values inside a list scope.
    fn value_fields() -> FieldTable<Self>;

    /// Apply an assignment at the relative key `key`.
    fn assign(&mut self, key: &str, token: &Token) -> ModelResult<()> {
        apply(Self::assign_fields(), self, key, token)
    }

    /// Apply a bare value found in the list scope `key`.
    fn value(&mut self, key: &str, token: &Token) -> ModelResult<()> {
        apply(Self::value_fields(), self, key, token)
    }
}

fn apply<T: 'static>(
    table: FieldTable<T>,
    target: &mut T,
    key: &str,
    token: &Token,
) -> ModelResult<()> {
    match table.iter().find(|(name, _)| *name == key) {
        Some((_, setter)) => setter(target, key, token),
        None => Ok(()),
    }
}

fn mismatch(field: &str, expected: &'static str, token: &Token) -> ModelError {
    ModelError::FieldType {
        field: field.to_string(),
        expected,
        found: token.value.type_name(),
    }
}

pub(crate) fn date(field: &str, token: &Token) -> ModelResult<Date> {
    token
        .value
        .as_date()
        .ok_or_else(|| mismatch(field, "date", token))
}

pub(crate) fn id(field: &str, token: &Token) -> ModelResult<EntityId> {
    token.value.as_id().ok_or_else(|| mismatch(field, "id", token))
}

pub(crate) fn string(field: &str, token: &Token) -> ModelResult<String> {
    token
        .value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| mismatch(field, "string", token))
}

/// `yes` / `no`.
pub(crate) fn boolean(field: &str, token: &Token) -> ModelResult<bool> {
    match token.value.as_str() {
        Some("yes") => Ok(true),
        Some("no") => Ok(false),
        _ => Err(mismatch(field, "yes or no", token)),
    }
}
