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

//! Line reader feeding the tokenizer.
//!
//! Reads UTF-8 input line by line, strips LF/CRLF endings and numbers each
//! line. Lines are never joined: the tokenizer relies on that to keep tokens
//! from spanning lines.

use crate::error::{SaveError, SaveResult};
use std::io::{BufRead, BufReader, ErrorKind, Read};

/// Buffered line reader with line number tracking.
///
/// # Examples
///
/// ```rust
/// use ck3_core::LineReader;
/// use std::io::Cursor;
///
/// let mut reader = LineReader::new(Cursor::new("date=867.1.1\r\nliving={\n"));
///
/// assert_eq!(reader.next_line().unwrap(), Some((1, "date=867.1.1".to_string())));
/// assert_eq!(reader.next_line().unwrap(), Some((2, "living={".to_string())));
/// assert_eq!(reader.next_line().unwrap(), None);
/// ```
pub struct LineReader<R: Read> {
    reader: BufReader<R>,
    line_number: usize,
    max_line_length: usize,
    buffer: String,
}

impl<R: Read> LineReader<R> {
    /// Create a new line reader with a 64 KiB buffer and no line length limit.
    pub fn new(reader: R) -> Self {
        Self::with_capacity(reader, 64 * 1024)
    }

    /// Create with a specific buffer capacity.
    pub fn with_capacity(reader: R, capacity: usize) -> Self {
        Self {
            reader: BufReader::with_capacity(capacity, reader),
            line_number: 0,
            max_line_length: usize::MAX,
            buffer: String::new(),
        }
    }

    /// Reject lines longer than `max` bytes with a limit error.
    pub fn max_line_length(mut self, max: usize) -> Self {
        self.max_line_length = max;
        self
    }

    /// Number the first line read `first` instead of 1.
    ///
    /// Used when a header line was consumed before the reader was built.
    pub fn first_line(mut self, first: usize) -> Self {
        self.line_number = first.saturating_sub(1);
        self
    }

    /// Number of the last line returned (0 before the first read).
    #[inline]
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Read the next line.
    pub fn next_line(&mut self) -> SaveResult<Option<(usize, String)>> {
        self.buffer.clear();

        match self.reader.read_line(&mut self.buffer) {
            Ok(0) => Ok(None),
            Ok(_) => {
                self.line_number += 1;

                if self.buffer.ends_with('\n') {
                    self.buffer.pop();
                    if self.buffer.ends_with('\r') {
                        self.buffer.pop();
                    }
                }

                if self.buffer.len() > self.max_line_length {
                    return Err(SaveError::limit(
                        format!(
                            "line length {} exceeds limit {}",
                            self.buffer.len(),
                            self.max_line_length
                        ),
                        self.line_number,
                    ));
                }

                Ok(Some((self.line_number, self.buffer.clone())))
            }
            Err(e) if e.kind() == ErrorKind::InvalidData => Err(SaveError::format(
                "input is not valid UTF-8",
                Some(self.line_number + 1),
            )),
            Err(e) => Err(e.into()),
        }
    }
}

impl<R: Read> Iterator for LineReader<R> {
    type Item = SaveResult<(usize, String)>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line().transpose()
    }
}
