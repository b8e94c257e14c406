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

//! Crusader Kings III Save Reader: Core
//!
//! This crate turns the plain-text gamestate of a CK3 save into a stream of
//! scope-aware events. It knows nothing about characters or titles; see
//! `ck3-model` for the object graph built on top of it.
//!
//! # Layers
//!
//! - [`LineReader`]: buffered line reading with line numbers and a line
//!   length limit
//! - [`Tokenizer`]: ordered first-match lexing into [`Token`]s with decoded
//!   [`Value`]s
//! - [`ScopeParser`]: the scope-tracking parser, an iterator of [`Event`]s
//! - [`Scanner`]: callback sink driven by [`parse`]
//!
//! # Example
//!
//! ```rust
//! use ck3_core::{parse_str, BalanceValidator};
//!
//! let mut validator = BalanceValidator::default();
//! parse_str("date=867.1.1\nliving={ 5={ birth=840.3.2 } }", &mut validator).unwrap();
//!
//! assert_eq!(validator.opens, 2);
//! assert_eq!(validator.assignments, 2);
//! assert_eq!(validator.max_depth, 2);
//! ```
//!
//! # Error Handling
//!
//! Every failure is a [`SaveError`] carrying a [`SaveErrorKind`], the line it
//! happened on and, if configured, the save name. Errors are fatal: no
//! partial result survives a failed parse.

mod date;
mod error;
mod event;
mod parser;
mod reader;
mod scanner;
mod scope;
mod token;
mod tokenizer;

pub use date::{Date, DateParseError};
pub use error::{SaveError, SaveErrorKind, SaveResult};
pub use event::Event;
pub use parser::{parse, parse_str, parse_with_config, ParserConfig, ScopeParser};
pub use reader::LineReader;
pub use scanner::{BalanceValidator, EventCollector, NullScanner, Scanner};
pub use scope::ScopePath;
pub use token::{Token, TokenKind, Value};
pub use tokenizer::{tokenize, Tokenizer};
