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

//! Title ranks.

use crate::error::{ModelError, ModelResult};
use std::fmt;

/// Rank of a landed title, ordered from lowest to highest.
///
/// ```
/// use ck3_model::Rank;
///
/// assert_eq!(Rank::from_letter('k').unwrap(), Rank::Kingdom);
/// assert!(Rank::Barony < Rank::Empire);
/// assert!(Rank::from_letter('q').is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rank {
    #[default]
    NoRank,
    Barony,
    County,
    Duchy,
    Kingdom,
    Empire,
}

impl Rank {
    /// Rank named by the first letter of a title key.
    ///
    /// `x` marks dynamically created titles, which are all treated as duchies.
    pub fn from_letter(c: char) -> ModelResult<Self> {
        match c {
            'b' => Ok(Self::Barony),
            'c' => Ok(Self::County),
            'd' | 'x' => Ok(Self::Duchy),
            'k' => Ok(Self::Kingdom),
            'e' => Ok(Self::Empire),
            other => Err(ModelError::UnknownRank(other)),
        }
    }

    /// Rank of a title key such as `k_france`.
    pub fn from_key(key: &str) -> ModelResult<Self> {
        key.chars()
            .next()
            .ok_or(ModelError::EmptyTitleKey)
            .and_then(Self::from_letter)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoRank => "none",
            Self::Barony => "barony",
            Self::County => "county",
            Self::Duchy => "duchy",
            Self::Kingdom => "kingdom",
            Self::Empire => "empire",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
