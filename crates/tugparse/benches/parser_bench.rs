// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Performance benchmarks for the tugparse tokenizer, parser and codegen.
//!
//! Run with:
//! ```bash
//! cargo bench -p tugparse
//! ```
//!
//! # Benchmark Categories
//!
//! 1. **Tokenizing**: the token stream alone
//! 2. **Parsing**: parse_module on generated code and fixtures
//! 3. **Traversal**: span collection over a parsed tree
//! 4. **Codegen**: tree back to source, and the full round trip

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::fs;
use std::hint::black_box;
use std::path::PathBuf;
use tugparse::{parse_module, tokenize, Codegen, CodegenState, SpanCollector};

// =============================================================================
// Test Data Generation
// =============================================================================

/// Generate simple functions with a little control flow.
fn generate_simple_code(num_funcs: usize) -> String {
    let mut code = String::new();
    for i in 0..num_funcs {
        code.push_str(&format!(
            r#"def func_{i}(arg1, arg2, arg3=None):
    """Docstring for func_{i}."""
    result = arg1 + arg2
    if arg3:
        result *= arg3
    return result

"#
        ));
    }
    code
}

/// Generate classes and methods.
fn generate_class_code(num_classes: usize) -> String {
    let mut code = String::new();
    for i in 0..num_classes {
        code.push_str(&format!(
            r#"class MyClass{i}:
    """Class {i} docstring."""

    def __init__(self, value):
        self.value = value

    def process(self, data):
        return self.value + data

    def transform(self, items):
        result = []
        for item in items:
            result.append(self.process(item))
        return result

"#
        ));
    }
    code
}

/// Generate comprehensions of every bracket kind.
fn generate_comprehension_code(num_comps: usize) -> String {
    let mut code = String::new();
    for i in 0..num_comps {
        code.push_str(&format!(
            r#"list_{i} = [x * 2 for x in range({i} + 10) if x % 2 == 0]
dict_{i} = {{k: v for k, v in enumerate(list_{i})}}
set_{i} = {{x ** 2 for x in list_{i}}}
gen_{i} = (x + 1 for x in list_{i} if x > 5)

"#
        ));
    }
    code
}

/// Load a fixture file for benchmarking.
fn load_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);

    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", name, e))
}

// =============================================================================
// Tokenizer Benchmarks
// =============================================================================

fn bench_tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize");

    for size in [10, 100, 200].iter() {
        let code = generate_class_code(*size);
        group.throughput(Throughput::Bytes(code.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_classes", size)),
            &code,
            |b, code| {
                b.iter(|| {
                    let _ = black_box(tokenize(code).unwrap());
                });
            },
        );
    }

    group.finish();
}

// =============================================================================
// Parsing Benchmarks
// =============================================================================

fn bench_parse_generated(c: &mut Criterion) {
    let inputs = [
        ("parse_simple", generate_simple_code as fn(usize) -> String),
        ("parse_classes", generate_class_code),
        ("parse_comprehensions", generate_comprehension_code),
    ];

    for (group_name, generate) in inputs {
        let mut group = c.benchmark_group(group_name);
        for size in [10, 50, 100].iter() {
            let code = generate(*size);
            group.throughput(Throughput::Bytes(code.len() as u64));
            group.bench_with_input(BenchmarkId::from_parameter(size), &code, |b, code| {
                b.iter(|| {
                    let _ = black_box(parse_module(code).unwrap());
                });
            });
        }
        group.finish();
    }
}

fn bench_parse_fixtures(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_fixtures");

    let fixtures = [
        ("expressions.py", load_fixture("expressions.py")),
        ("functions.py", load_fixture("functions.py")),
        ("compound.py", load_fixture("compound.py")),
    ];

    for (name, code) in fixtures.iter() {
        group.throughput(Throughput::Bytes(code.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), code, |b, code| {
            b.iter(|| {
                let _ = black_box(parse_module(code).unwrap());
            });
        });
    }

    group.finish();
}

// =============================================================================
// Traversal Benchmarks
// =============================================================================

fn bench_span_collection(c: &mut Criterion) {
    let mut group = c.benchmark_group("span_collection");

    for size in [50, 100].iter() {
        let code = generate_class_code(*size);
        let module = parse_module(&code).unwrap();

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_classes", size)),
            &module,
            |b, module| {
                b.iter(|| {
                    let _ = black_box(SpanCollector::collect_module(module));
                });
            },
        );
    }

    group.finish();
}

// =============================================================================
// Codegen Benchmarks
// =============================================================================

fn bench_codegen(c: &mut Criterion) {
    let mut group = c.benchmark_group("codegen");

    for size in [50, 100, 200].iter() {
        let code = generate_class_code(*size);
        let module = parse_module(&code).unwrap();

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_classes", size)),
            &module,
            |b, module| {
                b.iter(|| {
                    let mut state = CodegenState::default();
                    module.codegen(&mut state);
                    let _ = black_box(state.to_string());
                });
            },
        );
    }

    group.finish();
}

fn bench_roundtrip(c: &mut Criterion) {
    let mut group = c.benchmark_group("roundtrip");

    for size in [50, 100].iter() {
        let code = generate_class_code(*size);
        group.throughput(Throughput::Bytes(code.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_classes", size)),
            &code,
            |b, code| {
                b.iter(|| {
                    let module = parse_module(code).unwrap();
                    let _ = black_box(module.to_source());
                });
            },
        );
    }

    group.finish();
}

// =============================================================================
// Benchmark Groups
// =============================================================================

criterion_group!(
    parsing,
    bench_tokenize,
    bench_parse_generated,
    bench_parse_fixtures,
);

criterion_group!(traversal, bench_span_collection,);

criterion_group!(codegen, bench_codegen, bench_roundtrip,);

criterion_main!(parsing, traversal, codegen);
