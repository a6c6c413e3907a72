// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Round-trip tests for the tugparse tokenizer and parser.
//!
//! These tests verify that `parse(code).codegen() == code` and that the
//! concatenated token stream reproduces the input, for every valid source.
//!
//! # Test Organization
//!
//! - Fixture-based tests: one test per fixture file in `tests/fixtures/`,
//!   plus a sweep over the whole directory
//! - Inline tests: individual cases for specific constructs

use difference::assert_diff;
use itertools::Itertools;
use std::path::PathBuf;
use tugparse::{parse_module, prettify_error, tokenize, Codegen, CodegenState};

/// Helper to visualize whitespace differences in test output
fn visualize(s: &str) -> String {
    s.replace(' ', "▩").replace('\t', "→").lines().join("↩\n")
}

fn assert_same(expected: &str, generated: &str) {
    if generated != expected {
        let got = visualize(generated);
        let expected = visualize(expected);
        assert_diff!(expected.as_ref(), got.as_ref(), "", 0);
    }
}

/// Helper to perform round-trip test on source code
fn assert_roundtrip(input: &str, label: &str) {
    let tokens = match tokenize(input) {
        Ok(tokens) => tokens,
        Err(e) => panic!("{}", prettify_error(&e, input, label)),
    };
    let rebuilt: String = tokens.iter().map(|token| token.full_text()).collect();
    assert_same(input, &rebuilt);

    let module = match parse_module(input) {
        Ok(m) => m,
        Err(e) => panic!("{}", prettify_error(&e, input, label)),
    };

    let mut state = CodegenState::default();
    module.codegen(&mut state);
    assert_same(input, &state.to_string());
}

fn fixtures_dir() -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path
}

/// Helper to load and test a fixture file
fn assert_roundtrip_fixture(fixture_name: &str) {
    let path = fixtures_dir().join(fixture_name);
    let contents = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", fixture_name, e));

    assert_roundtrip(&contents, fixture_name);
}

// =============================================================================
// Fixture-based round-trip tests
// =============================================================================

#[test]
fn roundtrip_fixture_comments() {
    assert_roundtrip_fixture("comments.py");
}

#[test]
fn roundtrip_fixture_compound() {
    assert_roundtrip_fixture("compound.py");
}

#[test]
fn roundtrip_fixture_containers() {
    assert_roundtrip_fixture("containers.py");
}

#[test]
fn roundtrip_fixture_expressions() {
    assert_roundtrip_fixture("expressions.py");
}

#[test]
fn roundtrip_fixture_functions() {
    assert_roundtrip_fixture("functions.py");
}

#[test]
fn roundtrip_fixture_no_newline() {
    assert_roundtrip_fixture("no_newline.py");
}

#[test]
fn roundtrip_fixture_statements() {
    assert_roundtrip_fixture("statements.py");
}

#[test]
fn roundtrip_fixture_type_comments() {
    assert_roundtrip_fixture("type_comments.py");
}

#[test]
fn roundtrip_fixture_whitespace() {
    assert_roundtrip_fixture("whitespace.py");
}

#[test]
fn roundtrip_all_fixtures() {
    let entries = fixtures_dir().read_dir().expect("read_dir");
    let mut count = 0;
    for entry in entries {
        let path = entry.expect("dir entry").path();
        let input = std::fs::read_to_string(&path).expect("reading file");
        assert_roundtrip(&input, &format!("{:#?}", path));
        count += 1;
    }
    assert!(count > 0, "no fixtures found");
}

// =============================================================================
// Inline round-trip tests
// =============================================================================

#[test]
fn roundtrip_empty_module() {
    assert_roundtrip("", "empty_module");
}

#[test]
fn roundtrip_only_trivia() {
    assert_roundtrip("  \n\n# just a comment", "only_trivia");
    assert_roundtrip("\n\n\n", "only_newlines");
}

#[test]
fn roundtrip_simple_function() {
    assert_roundtrip(
        r#"def greet(name):
    return "Hello, " + name
"#,
        "simple_function",
    );
}

#[test]
fn roundtrip_class_method_staticmethod() {
    assert_roundtrip(
        r#"class Counter:
    count = 0

    @classmethod
    def increment(cls):
        cls.count += 1

    @staticmethod
    def reset():
        Counter.count = 0
"#,
        "class_method_staticmethod",
    );
}

#[test]
fn roundtrip_nested_comprehension() {
    assert_roundtrip(
        r#"matrix = [[i * j for j in range(5)] for i in range(5)]
"#,
        "nested_comprehension",
    );
}

#[test]
fn roundtrip_mixed_line_endings() {
    assert_roundtrip("if a:\r\n    b = 1\r    c = 2\n", "mixed_line_endings");
}

#[test]
fn roundtrip_indents_but_no_eol_before_eof() {
    assert_roundtrip("if x:\n    if y:\n        pass", "indents_no_eol");
}

#[test]
fn roundtrip_trailing_whitespace() {
    assert_roundtrip("x = 1   \ny = 2\t\n   ", "trailing_whitespace");
}

#[test]
fn roundtrip_line_continuations() {
    assert_roundtrip(
        "total = a + \\\n    b + \\\r\n    c\nassert \\\n    x\n",
        "line_continuations",
    );
}

#[test]
fn roundtrip_unicode_identifiers() {
    assert_roundtrip(
        r#"变量 = 42
def 函数(参数):
    return 参数 * 2
"#,
        "unicode_identifiers",
    );
}

#[test]
fn roundtrip_module_docstring() {
    assert_roundtrip(
        r#""""Module docstring.

This module does important things.
"""

import sys
"#,
        "module_docstring",
    );
}

#[test]
fn roundtrip_semicolons() {
    assert_roundtrip("a = 1; b = 2;\nif x: c; d\n", "semicolons");
}

#[test]
fn roundtrip_single_statement_parts() {
    let source = "def f(a, *, b=1):\n    return a\n\nx = f(1, b=2)\n";
    let module = parse_module(source).expect("parse error");
    let joined: String = module
        .statements
        .iter()
        .map(|statement| statement.to_source())
        .chain(std::iter::once(module.end_of_file.full_text()))
        .collect();
    assert_same(source, &joined);
}
