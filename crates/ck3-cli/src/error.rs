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

//! Structured error types for the ck3 CLI.
//!
//! All CLI operations return `Result<T, CliError>`; `main` prints the error
//! and exits with a failure status.

use ck3_core::SaveError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for ck3 CLI operations.
#[derive(Error, Debug, Clone)]
pub enum CliError {
    /// I/O operation failed (open, read, or write).
    #[error("I/O error for '{}': {message}", .path.display())]
    Io {
        /// The file path that caused the error
        path: PathBuf,
        /// The error message
        message: String,
    },

    /// No save with this name exists in any search directory.
    #[error("savefile '{name}' not found (searched: {})", display_paths(.searched))]
    NotFound {
        /// The name as given on the command line
        name: String,
        /// Directories searched, in order
        searched: Vec<PathBuf>,
    },

    /// Reading or interpreting the save failed.
    #[error(transparent)]
    Save(#[from] SaveError),

    /// JSON serialization failed.
    #[error("JSON format error: {message}")]
    Json {
        /// The error message
        message: String,
    },
}

impl CliError {
    /// Create an I/O error with file path context.
    pub fn io_error(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    pub fn not_found(name: impl Into<String>, searched: &[PathBuf]) -> Self {
        Self::NotFound {
            name: name.into(),
            searched: searched.to_vec(),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json {
            message: err.to_string(),
        }
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        return "no directories".to_string();
    }
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use ck3_core::SaveErrorKind;

    #[test]
    fn test_io_error_display() {
        let err = CliError::io_error(
            "game.ck3",
            io::Error::new(io::ErrorKind::NotFound, "no such file"),
        );
        assert_eq!(err.to_string(), "I/O error for 'game.ck3': no such file");
    }

    #[test]
    fn test_not_found_display() {
        let err = CliError::not_found("autosave.ck3", &[PathBuf::from("/a"), PathBuf::from("/b")]);
        assert_eq!(
            err.to_string(),
            "savefile 'autosave.ck3' not found (searched: /a, /b)"
        );
        let err = CliError::not_found("x.ck3", &[]);
        assert!(err.to_string().contains("no directories"));
    }

    #[test]
    fn test_save_error_is_transparent() {
        let err: CliError = SaveError::unmatched_close(3).with_name("game").into();
        assert_eq!(err.to_string(), "game:3: UnmatchedClose: unmatched }");
        assert!(matches!(err, CliError::Save(ref e) if e.kind == SaveErrorKind::UnmatchedClose));
    }
}
