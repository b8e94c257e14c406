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

//! Landed titles.

use crate::entity::{self, Entity, EntityId, FieldTable, Setter};
use crate::error::{ModelError, ModelResult};
use crate::rank::Rank;
use ck3_core::Token;

/// Numeric id of a title.
pub type TitleId = EntityId;

/// A landed title from `landed_titles={ landed_titles={ ... } }`.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Title {
    pub id: TitleId,
    /// Title key such as `k_france`. `None` until the `key` field is read.
    pub key: Option<String>,
    /// Display name, when the save records one.
    pub name: Option<String>,
    /// Rank derived from the first letter of `key`.
    pub rank: Rank,
}

impl Title {
    /// The key, or an empty string when unset.
    pub fn key(&self) -> &str {
        self.key.as_deref().unwrap_or_default()
    }

    fn set_key(&mut self, field: &str, token: &Token) -> ModelResult<()> {
        let key = entity::string(field, token)?;
        if key.is_empty() {
            return Err(ModelError::EmptyTitleKey);
        }
        self.rank = Rank::from_key(&key)?;
        self.key = Some(key);
        Ok(())
    }

    fn set_name(&mut self, field: &str, token: &Token) -> ModelResult<()> {
        self.name = Some(entity::string(field, token)?);
        Ok(())
    }
}

static ASSIGN_FIELDS: [(&str, Setter<Title>); 2] =
    [("key", Title::set_key), ("name", Title::set_name)];

impl Entity for Title {
    const KIND: &'static str = "title";

    fn new(id: TitleId) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    fn assign_fields() -> FieldTable<Self> {
        &ASSIGN_FIELDS
    }

    fn value_fields() -> FieldTable<Self> {
        &[]
    }
}
