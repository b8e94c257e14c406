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

//! ck3 Command Line Interface

use ck3_cli::cli::Commands;
use ck3_cli::savefile::SaveLocator;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// ck3 - Crusader Kings III save reader
///
/// # Examples
///
/// ```bash
/// # Check a save from the default save directory
/// ck3 validate autosave
///
/// # Overview of a save in another directory
/// ck3 --save-dir ~/backups summary ironman_1066
///
/// # First 50 parse events of a file given by path
/// ck3 events ./saves/test.ck3 -n 50
/// ```
#[derive(Parser)]
#[command(name = "ck3")]
#[command(author, version, about = "ck3 - Crusader Kings III save reader", long_about = None)]
struct Cli {
    /// Directory to search for saves (repeatable; overrides CK3_SAVE_DIRS)
    #[arg(long = "save-dir", value_name = "DIR", global = true)]
    save_dirs: Vec<PathBuf>,

    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let locator = SaveLocator::with_overrides(cli.save_dirs);
    match cli.command.execute(&locator) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
