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

//! Tokenizer and parser throughput on synthetic gamestates.

use ck3_core::{parse_str, tokenize, BalanceValidator, NullScanner};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

const CHARACTER_COUNTS: [usize; 3] = [100, 1_000, 10_000];

fn generate_gamestate(characters: usize) -> String {
    let mut out = String::from("date=1066.9.15\nliving={\n");
    for id in 0..characters {
        out.push_str(&format!(
            "\t{id}={{\n\t\tfirst_name=\"Name{id}\"\n\t\tbirth={}.{}.{}\n\t\ttraits={{ 12 40 {} }}\n\t\tfamily_data={{ real_father={} child={} }}\n\t\tweight=0.35\n\t}}\n",
            1000 + id % 60,
            1 + id % 12,
            1 + id % 28,
            id % 300,
            id / 2,
            id * 2 + 1,
        ));
    }
    out.push_str("}\n");
    out
}

fn bench_tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize");
    for &count in &CHARACTER_COUNTS {
        let input = generate_gamestate(count);
        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &input, |b, input| {
            b.iter(|| tokenize(black_box(input)).map(|t| t.len()))
        });
    }
    group.finish();
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for &count in &CHARACTER_COUNTS {
        let input = generate_gamestate(count);
        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_with_input(BenchmarkId::new("null", count), &input, |b, input| {
            b.iter(|| parse_str(black_box(input), &mut NullScanner))
        });
        group.bench_with_input(BenchmarkId::new("validate", count), &input, |b, input| {
            b.iter(|| {
                let mut validator = BalanceValidator::default();
                parse_str(black_box(input), &mut validator).map(|_| validator.opens)
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_tokenize, bench_parse);
criterion_main!(benches);
