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

//! Characters and their derived relationships.
//!
//! A character only stores ids. Anything involving another entity (rank,
//! landedness, parentage) is computed on demand against a [`GameState`].

use crate::entity::{self, Entity, EntityId, FieldTable, Setter};
use crate::error::{ModelError, ModelResult};
use crate::rank::Rank;
use crate::state::GameState;
use crate::title::{Title, TitleId};
use ck3_core::{Date, Token};

/// Numeric id of a character.
pub type CharacterId = EntityId;

/// A living or dead character.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Character {
    pub id: CharacterId,
    pub first_name: Option<String>,
    pub female: bool,
    pub birth_date: Option<Date>,
    pub death_date: Option<Date>,
    /// Owned titles, in file order.
    pub domain: Vec<TitleId>,
    /// Declared children, in file order.
    pub children: Vec<CharacterId>,
    /// Biological father as recorded on this character.
    pub real_father: Option<CharacterId>,
    pub primary_spouse: Option<CharacterId>,
    pub traits: Vec<u64>,
    pub flags: Vec<String>,
}

impl Character {
    #[inline]
    pub fn is_female(&self) -> bool {
        self.female
    }

    /// Whether no death date has been recorded.
    #[inline]
    pub fn alive(&self) -> bool {
        self.death_date.is_none()
    }

    /// Age in whole years on `at`.
    pub fn age(&self, at: &Date) -> ModelResult<i32> {
        self.birth_date
            .map(|birth| birth.age(at))
            .ok_or(ModelError::MissingBirthDate { id: self.id })
    }

    /// Owned titles that exist in `state`, in domain order.
    pub fn titles<'a>(&'a self, state: &'a GameState) -> impl Iterator<Item = &'a Title> + 'a {
        self.domain.iter().filter_map(move |id| state.title(*id))
    }

    /// Highest rank among owned titles.
    pub fn rank(&self, state: &GameState) -> Rank {
        self.titles(state)
            .map(|t| t.rank)
            .max()
            .unwrap_or(Rank::NoRank)
    }

    /// Whether the character holds at least one barony.
    pub fn landed(&self, state: &GameState) -> bool {
        self.titles(state).any(|t| t.rank == Rank::Barony)
    }

    /// The recorded biological father, if he exists in `state`.
    pub fn real_father<'a>(&self, state: &'a GameState) -> Option<&'a Character> {
        self.real_father.and_then(|id| state.character(id))
    }

    /// Biological children.
    ///
    /// For a woman these are the declared children. For a man, declared
    /// children fathered by someone else are dropped, and characters naming
    /// him as real father are added even if he never declared them. Declared
    /// ids come first in file order, then the extra ids in ascending order.
    /// Declared ids with no matching character are kept.
    pub fn real_children(&self, state: &GameState) -> Vec<CharacterId> {
        if self.female {
            return self.children.clone();
        }

        let mut out: Vec<CharacterId> = self
            .children
            .iter()
            .copied()
            .filter(|child| {
                state
                    .character(*child)
                    .and_then(|c| c.real_father)
                    .map_or(true, |father| father == self.id)
            })
            .collect();

        out.extend(
            state
                .characters
                .values()
                .filter(|c| c.real_father == Some(self.id) && !self.children.contains(&c.id))
                .map(|c| c.id),
        );
        out
    }

    fn set_first_name(&mut self, field: &str, token: &Token) -> ModelResult<()> {
        self.first_name = Some(entity::string(field, token)?);
        Ok(())
    }

    fn set_female(&mut self, field: &str, token: &Token) -> ModelResult<()> {
        self.female = entity::boolean(field, token)?;
        Ok(())
    }

    fn set_birth(&mut self, field: &str, token: &Token) -> ModelResult<()> {
        self.birth_date = Some(entity::date(field, token)?);
        Ok(())
    }

    fn set_death(&mut self, field: &str, token: &Token) -> ModelResult<()> {
        self.death_date = Some(entity::date(field, token)?);
        Ok(())
    }

    fn set_real_father(&mut self, field: &str, token: &Token) -> ModelResult<()> {
        self.real_father = Some(entity::id(field, token)?);
        Ok(())
    }

    fn set_primary_spouse(&mut self, field: &str, token: &Token) -> ModelResult<()> {
        self.primary_spouse = Some(entity::id(field, token)?);
        Ok(())
    }

    fn add_child(&mut self, field: &str, token: &Token) -> ModelResult<()> {
        self.children.push(entity::id(field, token)?);
        Ok(())
    }

    fn add_title(&mut self, field: &str, token: &Token) -> ModelResult<()> {
        self.domain.push(entity::id(field, token)?);
        Ok(())
    }

    fn add_trait(&mut self, field: &str, token: &Token) -> ModelResult<()> {
        self.traits.push(entity::id(field, token)?);
        Ok(())
    }

    fn add_flag(&mut self, field: &str, token: &Token) -> ModelResult<()> {
        self.flags.push(entity::string(field, token)?);
        Ok(())
    }
}

static ASSIGN_FIELDS: [(&str, Setter<Character>); 7] = [
    ("first_name", Character::set_first_name),
    ("female", Character::set_female),
    ("birth", Character::set_birth),
    ("dead_data/date", Character::set_death),
    ("family_data/real_father", Character::set_real_father),
    ("family_data/primary_spouse", Character::set_primary_spouse),
    ("family_data/child", Character::add_child),
];

static VALUE_FIELDS: [(&str, Setter<Character>); 4] = [
    ("family_data/child", Character::add_child),
    ("landed_data/domain", Character::add_title),
    ("traits", Character::add_trait),
    ("flags", Character::add_flag),
];

impl Entity for Character {
    const KIND: &'static str = "character";

    fn new(id: CharacterId) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    fn assign_fields() -> FieldTable<Self> {
        &ASSIGN_FIELDS
    }

    fn value_fields() -> FieldTable<Self> {
        &VALUE_FIELDS
    }
}
