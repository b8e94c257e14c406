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

//! ck3 CLI library for command-line parsing and execution.
//!
//! # Commands
//!
//! - **validate**: parse a save and check that its scopes balance
//! - **summary**: build the game state and print an overview (or JSON)
//! - **events**: dump the parse event stream, for debugging
//!
//! # Save lookup
//!
//! ```no_run
//! use ck3_cli::savefile::{load, SaveLocator};
//!
//! # fn main() -> Result<(), ck3_cli::error::CliError> {
//! let locator = SaveLocator::from_env();
//! let state = load(&locator.locate("autosave")?)?;
//! println!("{} characters", state.characters.len());
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod savefile;
