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

//! The game-state aggregate.

use crate::builder::GameStateBuilder;
use crate::character::{Character, CharacterId};
use crate::title::{Title, TitleId};
use ck3_core::{parse_with_config, Date, ParserConfig, SaveResult};
use std::collections::BTreeMap;
use std::io::Read;

/// Everything read from one save: the current date plus every character and
/// title, keyed by id.
///
/// # Examples
///
/// ```rust
/// use ck3_model::{GameState, Rank};
///
/// let state = GameState::parse_str(
///     "date=867.1.1
///      living={ 5={ birth=840.3.2 landed_data={ domain={ 1 } } } }
///      landed_titles={ landed_titles={ 1={ key=\"k_france\" } } }",
/// )
/// .unwrap();
///
/// let king = state.character(5).unwrap();
/// assert_eq!(king.rank(&state), Rank::Kingdom);
/// assert_eq!(king.age(&state.date.unwrap()).unwrap(), 26);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    /// Current in-game date, from the top-level `date` field.
    pub date: Option<Date>,
    pub characters: BTreeMap<CharacterId, Character>,
    pub titles: BTreeMap<TitleId, Title>,
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a game state from decoded save text.
    pub fn from_reader<R: Read>(reader: R, config: ParserConfig) -> SaveResult<Self> {
        let mut builder = GameStateBuilder::new();
        parse_with_config(reader, config, &mut builder)?;
        Ok(builder.finish())
    }

    /// Read a game state from an in-memory string.
    pub fn parse_str(input: &str) -> SaveResult<Self> {
        Self::from_reader(input.as_bytes(), ParserConfig::default())
    }

    #[inline]
    pub fn character(&self, id: CharacterId) -> Option<&Character> {
        self.characters.get(&id)
    }

    #[inline]
    pub fn title(&self, id: TitleId) -> Option<&Title> {
        self.titles.get(&id)
    }

    /// Characters with no death date, in id order.
    pub fn living(&self) -> impl Iterator<Item = &Character> {
        self.characters.values().filter(|c| c.alive())
    }

    /// Titles owned by `character` that exist in this state.
    pub fn titles_of<'a>(&'a self, character: &'a Character) -> impl Iterator<Item = &'a Title> + 'a {
        character.titles(self)
    }
}
