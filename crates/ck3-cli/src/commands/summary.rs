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

//! Summary command - read the game state and report on it

use crate::error::CliError;
use crate::savefile::load;
use ck3_model::{Character, GameState, Rank};
use std::collections::BTreeMap;
use std::path::Path;

/// Build the game state and print counts, or the full state as JSON.
pub fn summary(path: &Path, json: bool, top: usize) -> Result<(), CliError> {
    let state = load(path)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&state)?);
        return Ok(());
    }

    print!("{}", render(&state, top));
    Ok(())
}

/// Text report for a game state.
pub(crate) fn render(state: &GameState, top: usize) -> String {
    let mut out = String::new();
    let date = state
        .date
        .map(|d| d.to_string())
        .unwrap_or_else(|| "unknown".to_string());

    let living = state.living().count();
    out.push_str(&format!("Date: {}\n", date));
    out.push_str(&format!(
        "Characters: {} ({} living, {} dead)\n",
        state.characters.len(),
        living,
        state.characters.len() - living
    ));

    let mut by_rank: BTreeMap<Rank, usize> = BTreeMap::new();
    for title in state.titles.values() {
        *by_rank.entry(title.rank).or_default() += 1;
    }
    out.push_str(&format!("Titles: {}\n", state.titles.len()));
    for (rank, count) in by_rank.iter().rev() {
        out.push_str(&format!("  {}: {}\n", rank, count));
    }

    let mut rulers: Vec<(Rank, &Character)> = state
        .living()
        .map(|c| (c.rank(state), c))
        .filter(|(rank, _)| *rank > Rank::NoRank)
        .collect();
    rulers.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.id.cmp(&b.1.id)));

    if top > 0 && !rulers.is_empty() {
        out.push_str("Rulers:\n");
        for (rank, c) in rulers.into_iter().take(top) {
            let age = state
                .date
                .and_then(|d| c.age(&d).ok())
                .map(|a| a.to_string())
                .unwrap_or_else(|| "?".to_string());
            out.push_str(&format!(
                "  {:>8}  {:<20} {:<8} age {}\n",
                c.id,
                c.first_name.as_deref().unwrap_or("-"),
                rank,
                age
            ));
        }
    }
    out
}
