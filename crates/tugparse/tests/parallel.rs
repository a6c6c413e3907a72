// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Independent parses share no state, so they can run on any number of
//! threads and must agree with a sequential run.

use rayon::prelude::*;
use tugparse::{parse_module, Codegen, ModuleNode, ParseOptions, SpanCollector, Token};

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_tree_types_are_send_and_sync() {
    assert_send_sync::<ModuleNode<'static>>();
    assert_send_sync::<Token<'static>>();
    assert_send_sync::<tugparse::ParserError<'static>>();
    assert_send_sync::<ParseOptions>();
}

fn generate_sources(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            format!(
                "class C{i}(Base):\n    def method(self, x={i}):\n        return [y * {i} for y in range(x) if y]\n\nvalue_{i} = C{i}().method()  # trailing\n"
            )
        })
        .collect()
}

#[test]
fn test_parallel_parses_match_sequential() {
    let sources = generate_sources(64);

    let sequential: Vec<_> = sources
        .iter()
        .map(|source| {
            let module = parse_module(source).expect("parse error");
            (module.to_source(), SpanCollector::collect_module(&module).len())
        })
        .collect();

    let parallel: Vec<_> = sources
        .par_iter()
        .map(|source| {
            let module = parse_module(source).expect("parse error");
            (module.to_source(), SpanCollector::collect_module(&module).len())
        })
        .collect();

    assert_eq!(sequential, parallel);
    for (source, (generated, _)) in sources.iter().zip(&parallel) {
        assert_eq!(source, generated);
    }
}

#[test]
fn test_parallel_errors_are_independent() {
    let sources: Vec<String> = (0..32)
        .map(|i| {
            if i % 2 == 0 {
                format!("x_{i} = {i}\n")
            } else {
                format!("x_{i} = ({i}\n")
            }
        })
        .collect();

    let results: Vec<bool> = sources
        .par_iter()
        .map(|source| parse_module(source).is_ok())
        .collect();

    for (i, ok) in results.iter().enumerate() {
        assert_eq!(*ok, i % 2 == 0, "source {}", i);
    }
}

#[test]
fn test_options_from_json() {
    let options: ParseOptions = serde_json::from_str(r#"{"tab_size": 4}"#).expect("json");
    let sources = ["if a:\n\tb\n    c\n"; 8];
    let results: Vec<bool> = sources
        .par_iter()
        .map(|source| tugparse::parse_module_with_options(source, options).is_ok())
        .collect();
    assert!(results.iter().all(|ok| *ok));
}
