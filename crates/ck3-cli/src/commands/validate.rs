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

//! Validate command - syntax and brace-balance check

use crate::error::CliError;
use crate::savefile::open_save;
use ck3_core::{parse_with_config, BalanceValidator};
use colored::Colorize;
use std::path::Path;

/// Parse a save without building any entities.
///
/// Prints a summary to stdout including:
/// - Validation status (✓ or ✗)
/// - Scope, assignment and bare value counts
/// - Maximum nesting depth
pub fn validate(path: &Path) -> Result<(), CliError> {
    let (reader, config) = open_save(path)?;
    let mut validator = BalanceValidator::default();

    match parse_with_config(reader, config, &mut validator) {
        Ok(()) => {
            println!("{} {}", "✓".green().bold(), path.display());
            println!("  Scopes: {}", validator.opens);
            println!("  Assignments: {}", validator.assignments);
            println!("  Values: {}", validator.values);
            println!("  Max depth: {}", validator.max_depth);
            Ok(())
        }
        Err(e) => {
            println!("{} {}", "✗".red().bold(), path.display());
            Err(e.into())
        }
    }
}
