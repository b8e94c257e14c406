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

//! Events command - dump the raw parse event stream (debug)

use crate::error::CliError;
use crate::savefile::open_save;
use ck3_core::{Event, ScopeParser, Value};
use std::io::Write;
use std::path::Path;

/// Print parse events, one per line, stopping after `limit` if given.
pub fn events(path: &Path, limit: Option<usize>) -> Result<(), CliError> {
    let (reader, config) = open_save(path)?;
    let parser = ScopeParser::with_config(reader, config);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for event in parser.take(limit.unwrap_or(usize::MAX)) {
        let event = event?;
        writeln!(out, "{}", format_event(&event)).map_err(|e| CliError::io_error("<stdout>", e))?;
    }
    Ok(())
}

/// One-line rendering of an event, prefixed with its source line.
pub fn format_event(event: &Event) -> String {
    let line = event
        .line()
        .map(|l| l.to_string())
        .unwrap_or_else(|| "-".to_string());
    let body = match event {
        Event::OpenScope { parent, header } => {
            let label = header
                .as_ref()
                .map(|t| t.value.clone())
                .unwrap_or_else(Value::anonymous);
            format!("open   /{}", parent.child(label))
        }
        Event::CloseScope { scope } => format!("close  /{}", scope),
        Event::Assign { key, value, scope } => {
            format!("assign /{} {} = {}", scope, key.text, value.text)
        }
        Event::Value { value, scope } => format!("value  /{} {}", scope, value.text),
        Event::Done => "done".to_string(),
    };
    format!("{:>6}  {}", line, body)
}
