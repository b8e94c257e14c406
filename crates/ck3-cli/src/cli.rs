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

//! CLI command definitions and argument parsing.

use crate::commands;
use crate::error::CliError;
use crate::savefile::SaveLocator;
use clap::Subcommand;

/// ck3 commands.
///
/// Every command takes a save NAME. A bare name is searched for in the save
/// directories (with `.ck3` appended if missing); a name with a directory
/// component is opened as given.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check that a save parses and its scopes balance
    Validate {
        /// Save name or path
        #[arg(value_name = "NAME")]
        name: String,
    },

    /// Read characters and titles and print an overview
    Summary {
        /// Save name or path
        #[arg(value_name = "NAME")]
        name: String,

        /// Print the full game state as JSON instead
        #[arg(long)]
        json: bool,

        /// Number of highest-ranked living rulers to list
        #[arg(long, default_value = "10")]
        top: usize,
    },

    /// Print the raw parse event stream (debug)
    Events {
        /// Save name or path
        #[arg(value_name = "NAME")]
        name: String,

        /// Stop after this many events
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
}

impl Commands {
    /// Execute the command, resolving the save through `locator`.
    pub fn execute(self, locator: &SaveLocator) -> Result<(), CliError> {
        match self {
            Commands::Validate { name } => commands::validate(&locator.locate(&name)?),
            Commands::Summary { name, json, top } => {
                commands::summary(&locator.locate(&name)?, json, top)
            }
            Commands::Events { name, limit } => commands::events(&locator.locate(&name)?, limit),
        }
    }
}
