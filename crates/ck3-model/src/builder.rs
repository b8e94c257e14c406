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

//! The default scanner: builds a [`GameState`] from parse events.
//!
//! Entities start at trigger scopes. An open scope whose header is a numeric
//! id, directly under one of these paths, starts a new entity:
//!
//! | parent path                       | entity      |
//! |-----------------------------------|-------------|
//! | `living`                          | character   |
//! | `dead_unprunable`                 | character   |
//! | `characters/dead_prunable`        | character   |
//! | `landed_titles/landed_titles`     | title       |
//!
//! While an entity is being built, events below its scope are routed to it
//! under a key made of the path relative to the entity scope, plus the
//! assignment key, joined with `/`. `dead_data={ date=900.1.1 }` inside a
//! character becomes `dead_data/date`.

use crate::character::Character;
use crate::entity::{Entity, EntityId};
use crate::state::GameState;
use crate::title::Title;
use ck3_core::{SaveError, SaveResult, Scanner, ScopePath, Token};
use std::collections::btree_map::{BTreeMap, Entry};
use tracing::{debug, warn};

/// What a trigger path builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Character,
    Title,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Character => Character::KIND,
            Self::Title => Title::KIND,
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

const TRIGGERS: &[(&[&str], EntityKind)] = &[
    (&["living"], EntityKind::Character),
    (&["dead_unprunable"], EntityKind::Character),
    (&["characters", "dead_prunable"], EntityKind::Character),
    (&["landed_titles", "landed_titles"], EntityKind::Title),
];

/// The entity kind started by an open scope under `parent`, if any.
pub fn trigger(parent: &ScopePath) -> Option<EntityKind> {
    TRIGGERS
        .iter()
        .find(|(path, _)| parent.is(path))
        .map(|(_, kind)| *kind)
}

/// The entity currently receiving events.
#[derive(Debug)]
struct Build {
    kind: EntityKind,
    id: EntityId,
    scope: ScopePath,
}

/// Scanner that builds a [`GameState`].
///
/// Duplicate ids are logged and skipped: the first entity with an id wins
/// and the second record is ignored entirely.
#[derive(Debug, Default)]
pub struct GameStateBuilder {
    state: GameState,
    build: Option<Build>,
    duplicates: Vec<(EntityKind, EntityId)>,
}

impl GameStateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// The state built so far.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Ids that appeared more than once, in the order they were skipped.
    pub fn duplicates(&self) -> &[(EntityKind, EntityId)] {
        &self.duplicates
    }

    /// Kind and id of the entity under construction.
    pub fn building(&self) -> Option<(EntityKind, EntityId)> {
        self.build.as_ref().map(|b| (b.kind, b.id))
    }

    pub fn finish(self) -> GameState {
        self.state
    }

    /// Insert a fresh entity, or report the id as a duplicate.
    fn start<E: Entity>(
        map: &mut BTreeMap<EntityId, E>,
        duplicates: &mut Vec<(EntityKind, EntityId)>,
        kind: EntityKind,
        id: EntityId,
        line: usize,
    ) -> bool {
        match map.entry(id) {
            Entry::Vacant(slot) => {
                slot.insert(E::new(id));
                true
            }
            Entry::Occupied(_) => {
                warn!(line, "duplicate {} id {}, skipping record", kind, id);
                duplicates.push((kind, id));
                false
            }
        }
    }

    fn route(&mut self, key: Option<&Token>, token: &Token, scope: &ScopePath) -> SaveResult<()> {
        let Some(build) = &self.build else {
            return Ok(());
        };
        let Some(field) = scope.relative_key(&build.scope, key.map(|k| &k.value)) else {
            return Ok(());
        };

        let result = match build.kind {
            EntityKind::Character => self
                .state
                .characters
                .get_mut(&build.id)
                .map_or(Ok(()), |c| match key {
                    Some(_) => c.assign(&field, token),
                    None => c.value(&field, token),
                }),
            EntityKind::Title => self
                .state
                .titles
                .get_mut(&build.id)
                .map_or(Ok(()), |t| match key {
                    Some(_) => t.assign(&field, token),
                    None => t.value(&field, token),
                }),
        };

        result.map_err(|e| {
            SaveError::semantic(
                format!("{} {}: {}", build.kind, build.id, e),
                token.line,
            )
        })
    }
}

impl Scanner for GameStateBuilder {
    fn open_scope(&mut self, header: Option<&Token>, parent: &ScopePath) -> SaveResult<()> {
        if self.build.is_some() {
            return Ok(());
        }
        let (Some(header), Some(kind)) = (header, trigger(parent)) else {
            return Ok(());
        };
        let Some(id) = header.value.as_id() else {
            return Ok(());
        };

        let started = match kind {
            EntityKind::Character => Self::start(
                &mut self.state.characters,
                &mut self.duplicates,
                kind,
                id,
                header.line,
            ),
            EntityKind::Title => Self::start(
                &mut self.state.titles,
                &mut self.duplicates,
                kind,
                id,
                header.line,
            ),
        };

        if started {
            debug!(line = header.line, "building {} {}", kind, id);
            self.build = Some(Build {
                kind,
                id,
                scope: parent.child(header.value.clone()),
            });
        }
        Ok(())
    }

    fn close_scope(&mut self, scope: &ScopePath) -> SaveResult<()> {
        if self.build.as_ref().is_some_and(|b| b.scope == *scope) {
            if let Some(build) = self.build.take() {
                debug!("finished {} {}", build.kind, build.id);
            }
        }
        Ok(())
    }

    fn assign(&mut self, key: &Token, value: &Token, scope: &ScopePath) -> SaveResult<()> {
        if scope.is_empty() && key.value.as_str() == Some("date") {
            let date = value.value.as_date().ok_or_else(|| {
                SaveError::semantic(
                    format!("date must be a date, found {}", value.value.type_name()),
                    value.line,
                )
            })?;
            self.state.date = Some(date);
            return Ok(());
        }
        self.route(Some(key), value, scope)
    }

    fn value(&mut self, value: &Token, scope: &ScopePath) -> SaveResult<()> {
        self.route(None, value, scope)
    }

    fn done(&mut self) -> SaveResult<()> {
        debug!(
            characters = self.state.characters.len(),
            titles = self.state.titles.len(),
            duplicates = self.duplicates.len(),
            "game state complete"
        );
        Ok(())
    }
}
