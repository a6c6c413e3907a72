// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! SpanCollector: flatten a tree into `(kind, span, depth)` records.
//!
//! The records come out in pre-order, so a node's descendants follow it
//! directly with a greater depth. Tools use this to answer "what is at this
//! offset" without matching on every node variant, and the test suite uses
//! it to check that child spans nest inside their parents.
//!
//! ```ignore
//! let module = tugparse::parse_module("x = f(1)\n")?;
//! let spans = SpanCollector::collect_module(&module);
//! let innermost = SpanCollector::innermost_at(&spans, 6);
//! ```

use std::ops::ControlFlow;

use tugparse_core::Span;

use super::traits::{VisitResult, Visitor};
use super::walk::{walk_expression, walk_module};
use crate::nodes::{ExpressionNode, ModuleNode, Spanned, StatementNode};

/// One node of a flattened tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeSpan {
    /// The node's variant name, as returned by `kind_name()`.
    pub kind: &'static str,
    pub span: Span,
    /// Nesting depth; roots of the walk have depth 0.
    pub depth: usize,
}

/// A visitor that records every expression and statement it enters.
#[derive(Debug, Default)]
pub struct SpanCollector {
    spans: Vec<NodeSpan>,
    depth: usize,
}

impl SpanCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect every node below a module, statements and expressions alike.
    pub fn collect_module(module: &ModuleNode<'_>) -> Vec<NodeSpan> {
        let mut collector = Self::new();
        let _ = walk_module(&mut collector, module);
        collector.spans
    }

    /// Collect an expression and everything below it.
    pub fn collect_expression(expression: &ExpressionNode<'_>) -> Vec<NodeSpan> {
        let mut collector = Self::new();
        let _ = walk_expression(&mut collector, expression);
        collector.spans
    }

    /// The records gathered so far.
    pub fn spans(&self) -> &[NodeSpan] {
        &self.spans
    }

    pub fn into_spans(self) -> Vec<NodeSpan> {
        self.spans
    }

    /// The deepest non-empty node whose span contains `offset`.
    ///
    /// Ties at equal depth go to the later record, which is the later node in
    /// source order.
    pub fn innermost_at(spans: &[NodeSpan], offset: u32) -> Option<&NodeSpan> {
        spans
            .iter()
            .filter(|node| !node.span.is_empty() && node.span.contains_offset(offset))
            .max_by_key(|node| node.depth)
    }

    /// Find the first record whose span escapes its nearest enclosing record.
    ///
    /// Returns `(parent, child)` for the violation, or `None` when every
    /// child nests inside its parent.
    pub fn find_nesting_violation(spans: &[NodeSpan]) -> Option<(NodeSpan, NodeSpan)> {
        let mut ancestors: Vec<NodeSpan> = Vec::new();
        for node in spans {
            ancestors.truncate(node.depth);
            if let Some(parent) = ancestors.last() {
                if !parent.span.contains(&node.span) {
                    return Some((*parent, *node));
                }
            }
            ancestors.push(*node);
        }
        None
    }

    fn record(&mut self, kind: &'static str, span: Span) {
        self.spans.push(NodeSpan {
            kind,
            span,
            depth: self.depth,
        });
        self.depth += 1;
    }
}

impl<'a> Visitor<'a> for SpanCollector {
    fn visit_expression(&mut self, node: &ExpressionNode<'a>) -> VisitResult {
        self.record(node.kind_name(), node.span());
        VisitResult::Continue
    }

    fn leave_expression(&mut self, _node: &ExpressionNode<'a>) {
        self.depth -= 1;
    }

    fn visit_statement(&mut self, node: &StatementNode<'a>) -> VisitResult {
        self.record(node.kind_name(), node.span());
        VisitResult::Continue
    }

    fn leave_statement(&mut self, _node: &StatementNode<'a>) {
        self.depth -= 1;
    }
}

/// Collect spans while descending only until `limit` records exist.
///
/// Stops the walk early through [`VisitResult::Stop`].
pub fn collect_first<'a>(module: &ModuleNode<'a>, limit: usize) -> Vec<NodeSpan> {
    struct Limited {
        inner: SpanCollector,
        limit: usize,
    }

    impl<'a> Visitor<'a> for Limited {
        fn visit_expression(&mut self, node: &ExpressionNode<'a>) -> VisitResult {
            if self.inner.spans.len() >= self.limit {
                return VisitResult::Stop;
            }
            self.inner.visit_expression(node)
        }

        fn leave_expression(&mut self, node: &ExpressionNode<'a>) {
            self.inner.leave_expression(node);
        }

        fn visit_statement(&mut self, node: &StatementNode<'a>) -> VisitResult {
            if self.inner.spans.len() >= self.limit {
                return VisitResult::Stop;
            }
            self.inner.visit_statement(node)
        }

        fn leave_statement(&mut self, node: &StatementNode<'a>) {
            self.inner.leave_statement(node);
        }
    }

    let mut limited = Limited {
        inner: SpanCollector::new(),
        limit,
    };
    if let ControlFlow::Break(()) = walk_module(&mut limited, module) {
        tracing::trace!(limit, "span collection stopped early");
    }
    limited.inner.spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_module;

    fn kinds(spans: &[NodeSpan]) -> Vec<&'static str> {
        spans.iter().map(|node| node.kind).collect()
    }

    #[test]
    fn test_collects_in_pre_order() {
        let module = parse_module("x = a + 1\n").expect("parse error");
        let spans = SpanCollector::collect_module(&module);
        assert_eq!(
            kinds(&spans),
            vec!["Simple", "Assign", "Expression", "Name", "Expression", "Plus", "Name", "Number"]
        );
        assert_eq!(spans[0].depth, 0);
        assert_eq!(spans[5].depth, 3);
        assert_eq!(spans[6].depth, 4);
    }

    #[test]
    fn test_spans_match_source() {
        let source = "def add(a, b):\n    return a + b\n";
        let module = parse_module(source).expect("parse error");
        let spans = SpanCollector::collect_module(&module);

        let plus = spans
            .iter()
            .find(|node| node.kind == "Plus")
            .expect("no Plus node");
        assert_eq!(plus.span.slice(source), Some("a + b"));

        let func = spans
            .iter()
            .find(|node| node.kind == "FuncDef")
            .expect("no FuncDef node");
        assert_eq!(func.span.start, 0);
    }

    #[test]
    fn test_children_nest_inside_parents() {
        let source = "\
@decorator
class C(Base):
    def method(self, *args, key=None, **kwargs) -> int:
        if x:
            return [i for i in range(10) if i % 2]
        elif y:
            pass
        else:
            raise ValueError from err
";
        let module = parse_module(source).expect("parse error");
        let spans = SpanCollector::collect_module(&module);
        assert!(!spans.is_empty());
        assert_eq!(SpanCollector::find_nesting_violation(&spans), None);
    }

    #[test]
    fn test_innermost_at() {
        let source = "result = obj.attr(42)\n";
        let module = parse_module(source).expect("parse error");
        let spans = SpanCollector::collect_module(&module);

        let offset = source.find("42").expect("literal") as u32;
        let node = SpanCollector::innermost_at(&spans, offset).expect("no node at offset");
        assert_eq!(node.kind, "Number");

        assert!(SpanCollector::innermost_at(&spans, 1000).is_none());
    }

    #[test]
    fn test_collect_expression() {
        let expression = crate::parse_expression("-x ** 2").expect("parse error");
        let spans = SpanCollector::collect_expression(&expression.body);
        assert_eq!(kinds(&spans), vec!["UnaryMinus", "Power", "Name", "Number"]);
        assert_eq!(spans[0].depth, 0);
    }

    #[test]
    fn test_collect_first_stops_early() {
        let module = parse_module("a = 1\nb = 2\nc = 3\n").expect("parse error");
        let spans = collect_first(&module, 3);
        assert_eq!(spans.len(), 3);
        assert_eq!(kinds(&spans), vec!["Simple", "Assign", "Expression"]);
    }
}
