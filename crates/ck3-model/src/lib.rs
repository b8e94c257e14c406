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

//! Crusader Kings III Save Reader: Game-State Model
//!
//! Builds a typed object graph of characters and titles from the event
//! stream produced by `ck3-core`.
//!
//! Entities refer to each other by numeric id only. Relationships such as a
//! character's rank or real children are computed on demand against the
//! owning [`GameState`], never cached.
//!
//! # Example
//!
//! ```rust
//! use ck3_model::GameState;
//!
//! let state = GameState::parse_str(
//!     "date=900.1.1
//!      living={
//!          1={ birth=860.5.1 family_data={ child=2 } }
//!          2={ birth=880.1.1 family_data={ real_father=1 } }
//!      }",
//! )
//! .unwrap();
//!
//! let father = state.character(1).unwrap();
//! assert_eq!(father.real_children(&state), vec![2]);
//! assert_eq!(state.character(2).unwrap().real_father(&state).unwrap().id, 1);
//! ```
//!
//! # Features
//!
//! - `serde`: `Serialize`/`Deserialize` for [`GameState`] and its entities

mod builder;
mod character;
mod entity;
mod error;
mod rank;
mod state;
mod title;

pub use builder::{trigger, EntityKind, GameStateBuilder};
pub use character::{Character, CharacterId};
pub use entity::{Entity, EntityId, FieldTable, Setter};
pub use error::{ModelError, ModelResult};
pub use rank::Rank;
pub use state::GameState;
pub use title::{Title, TitleId};

/// Re-export core types for convenience.
pub use ck3_core::{Date, ParserConfig, SaveError, SaveErrorKind, SaveResult};
