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

//! Locating and opening save files.
//!
//! Saves are looked up by name in an ordered list of directories. The list
//! comes from `--save-dir`, else from the `CK3_SAVE_DIRS` environment
//! variable, else from the default Linux save directory under `$HOME`.
//!
//! Only uncompressed saves are read: a plain-text gamestate whose first line
//! is a checksum header starting with `SAV`. Compressed (zip) saves are
//! detected and rejected.

use crate::error::CliError;
use ck3_core::{ParserConfig, SaveError, SaveResult};
use ck3_model::GameState;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable holding the search path, in platform path-list form.
pub const SAVE_DIRS_ENV: &str = "CK3_SAVE_DIRS";

/// Default save directory, relative to `$HOME`.
pub const DEFAULT_SAVE_SUBDIR: &str = ".local/share/Paradox Interactive/Crusader Kings III/save games";

/// Save file extension.
pub const EXTENSION: &str = "ck3";

const ZIP_SIGNATURE: &[u8] = b"PK\x03\x04";
const CHECKSUM_PREFIX: &[u8] = b"SAV";

/// Ordered list of directories searched for saves.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SaveLocator {
    dirs: Vec<PathBuf>,
}

impl SaveLocator {
    pub fn new(dirs: Vec<PathBuf>) -> Self {
        Self { dirs }
    }

    /// Search path from the environment, falling back to the default
    /// directory.
    pub fn from_env() -> Self {
        match std::env::var_os(SAVE_DIRS_ENV) {
            Some(list) if !list.is_empty() => Self::new(std::env::split_paths(&list).collect()),
            _ => Self::new(default_dirs()),
        }
    }

    /// Explicit directories if any were given, otherwise [`from_env`](Self::from_env).
    pub fn with_overrides(dirs: Vec<PathBuf>) -> Self {
        if dirs.is_empty() {
            Self::from_env()
        } else {
            Self::new(dirs)
        }
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// Resolve a save name to a path.
    ///
    /// A name with a directory component is used as-is. Otherwise `.ck3` is
    /// appended if missing and the directories are searched in order.
    pub fn locate(&self, name: &str) -> Result<PathBuf, CliError> {
        let path = Path::new(name);
        if path.parent().is_some_and(|p| !p.as_os_str().is_empty()) {
            return Ok(path.to_path_buf());
        }

        let file_name = if path.extension().is_some_and(|e| e == EXTENSION) {
            name.to_string()
        } else {
            format!("{}.{}", name, EXTENSION)
        };

        for dir in &self.dirs {
            let candidate = dir.join(&file_name);
            if candidate.is_file() {
                debug!(path = %candidate.display(), "found save");
                return Ok(candidate);
            }
        }
        Err(CliError::not_found(file_name, &self.dirs))
    }
}

fn default_dirs() -> Vec<PathBuf> {
    std::env::var_os("HOME")
        .map(|home| vec![PathBuf::from(home).join(DEFAULT_SAVE_SUBDIR)])
        .unwrap_or_default()
}

/// Save name used in error messages: the file stem.
pub fn save_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Check the first line of a save.
pub fn check_header(first_line: &[u8]) -> SaveResult<()> {
    if first_line.starts_with(ZIP_SIGNATURE) {
        return Err(SaveError::format(
            "compressed saves are not supported, save with compression disabled",
            None,
        ));
    }
    if !first_line.starts_with(CHECKSUM_PREFIX) {
        return Err(SaveError::format("not a savefile", Some(1)));
    }
    Ok(())
}

/// Open a save and consume its checksum line.
///
/// Returns the reader positioned at line 2 and a parser configuration that
/// numbers lines from 2 and names errors after the save.
pub fn open_save(path: &Path) -> Result<(BufReader<File>, ParserConfig), CliError> {
    let file = File::open(path).map_err(|e| CliError::io_error(path, e))?;
    let mut reader = BufReader::new(file);

    let head = reader.fill_buf().map_err(|e| CliError::io_error(path, e))?;
    check_header(head).map_err(|e| e.with_name(path.display().to_string()))?;

    let mut checksum = Vec::new();
    reader
        .read_until(b'\n', &mut checksum)
        .map_err(|e| CliError::io_error(path, e))?;
    debug!(bytes = checksum.len(), "skipped checksum line");

    let config = ParserConfig {
        name: Some(save_name(path)),
        first_line: 2,
        ..ParserConfig::default()
    };
    Ok((reader, config))
}

/// Open and fully read a save.
pub fn load(path: &Path) -> Result<GameState, CliError> {
    let (reader, config) = open_save(path)?;
    Ok(GameState::from_reader(reader, config)?)
}
