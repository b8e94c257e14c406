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

//! Integration tests for ck3-core

use ck3_core::{
    parse, parse_str, parse_with_config, BalanceValidator, Event, EventCollector, NullScanner,
    ParserConfig, SaveErrorKind, ScopeParser, ScopePath, TokenKind, Value,
};
use std::io::Cursor;

const SAMPLE: &str = r#"date=867.1.1
bookmark_date=867.1.1
living={
	5={
		first_name="Hugues"
		birth=840.3.2
		female=yes
		traits={ 12 40 }
		family_data={
			real_father=7
			child=9 child=10
		}
	}
}
landed_titles={
	landed_titles={
		1={ key="e_francia" }
	}
}
"#;

fn collect(input: &str) -> Vec<Event> {
    let mut collector = EventCollector::default();
    parse_str(input, &mut collector).unwrap();
    collector.events
}

// ==================== Realistic document tests ====================

#[test]
fn test_sample_balances() {
    let mut validator = BalanceValidator::default();
    parse_str(SAMPLE, &mut validator).unwrap();

    assert_eq!(validator.opens, validator.closes);
    assert_eq!(validator.opens, 7);
    assert_eq!(validator.max_depth, 3);
    assert_eq!(validator.values, 2);
    assert_eq!(validator.depth(), 0);
}

#[test]
fn test_sample_scope_paths() {
    let events = collect(SAMPLE);

    let father = events
        .iter()
        .find_map(|e| match e {
            Event::Assign { key, value, scope } if key.text == "real_father" => {
                Some((value.value.clone(), scope.clone()))
            }
            _ => None,
        })
        .unwrap();
    assert_eq!(father.0, Value::Int(7));
    assert_eq!(
        father.1,
        ScopePath::from(vec![
            Value::from("living"),
            Value::Int(5),
            Value::from("family_data"),
        ])
    );

    // The repeated `child` key is reported twice, in order.
    let children: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            Event::Assign { key, value, .. } if key.text == "child" => value.value.as_int(),
            _ => None,
        })
        .collect();
    assert_eq!(children, vec![9, 10]);
}

#[test]
fn test_sample_last_event_is_done() {
    let events = collect(SAMPLE);
    assert_eq!(events.last(), Some(&Event::Done));
    assert_eq!(events.iter().filter(|e| **e == Event::Done).count(), 1);
}

#[test]
fn test_every_close_matches_its_open() {
    let mut stack: Vec<ScopePath> = Vec::new();
    for event in collect(SAMPLE) {
        match event {
            Event::OpenScope { parent, header } => {
                let label = header.map(|t| t.value).unwrap_or_else(Value::anonymous);
                stack.push(parent.child(label));
            }
            Event::CloseScope { scope } => assert_eq!(stack.pop(), Some(scope)),
            Event::Assign { scope, .. } | Event::Value { scope, .. } => {
                assert_eq!(scope, stack.last().cloned().unwrap_or_default());
            }
            Event::Done => assert!(stack.is_empty()),
        }
    }
}

#[test]
fn test_crlf_input() {
    let input = SAMPLE.replace('\n', "\r\n");
    assert_eq!(collect(&input), collect(SAMPLE));
}

#[test]
fn test_parse_from_reader() {
    let mut scanner = NullScanner;
    assert!(parse(Cursor::new(SAMPLE.as_bytes().to_vec()), &mut scanner).is_ok());
}

// ==================== Error reporting tests ====================

#[test]
fn test_error_display_with_name_and_line() {
    let err = parse_with_config(
        Cursor::new("a=1\nb={\n}\n}\n"),
        ParserConfig::named("ironman.ck3"),
        &mut NullScanner,
    )
    .unwrap_err();

    assert_eq!(err.kind, SaveErrorKind::UnmatchedClose);
    assert_eq!(err.to_string(), "ironman.ck3:4: UnmatchedClose: unmatched }");
}

#[test]
fn test_invalid_utf8_is_format_error() {
    let bytes: &[u8] = b"a=1\nb=\xff\xfe\n";
    let err = parse(bytes, &mut NullScanner).unwrap_err();
    assert_eq!(err.kind, SaveErrorKind::Format);
}

#[test]
fn test_long_line_limit() {
    let config = ParserConfig {
        max_line_length: 16,
        ..ParserConfig::default()
    };
    let input = format!("a=1\nname=\"{}\"\n", "x".repeat(64));
    let err = parse_with_config(input.as_bytes(), config, &mut NullScanner).unwrap_err();
    assert_eq!(err.kind, SaveErrorKind::Limit);
    assert_eq!(err.line, Some(2));
}

#[test]
fn test_no_events_after_failure() {
    let mut collector = EventCollector::default();
    let result = parse_str("a=1 b=2 } c=3", &mut collector);
    assert!(result.is_err());
    // Events before the failing token were delivered; nothing after it.
    assert_eq!(collector.events.len(), 2);
    assert!(!collector.events.contains(&Event::Done));
}

// ==================== Iterator tests ====================

#[test]
fn test_iterator_and_scope_accessor() {
    let mut parser = ScopeParser::new(Cursor::new("a={ b={ c=1 } }"));
    assert!(parser.scope().is_empty());

    let first = parser.next().unwrap().unwrap();
    assert!(first.is_open());
    assert_eq!(parser.scope().len(), 1);

    let rest: Vec<_> = parser.collect::<Result<_, _>>().unwrap();
    assert_eq!(rest.len(), 5);
}

#[test]
fn test_header_token_kinds() {
    let events = collect("867.1.1={ } 42={ } name={ }");
    let kinds: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            Event::OpenScope {
                header: Some(h), ..
            } => Some(h.kind),
            _ => None,
        })
        .collect();
    assert_eq!(
        kinds,
        vec![TokenKind::Date, TokenKind::Number, TokenKind::BareString]
    );
}
