// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Visitor trait definitions for tree traversal.

use crate::nodes::{ExpressionNode, StatementNode};
use crate::tokenizer::Token;

/// Result of visiting a node - controls traversal behavior.
///
/// When a visitor method returns a `VisitResult`, it controls how the walker
/// proceeds with traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VisitResult {
    /// Continue traversal into children.
    ///
    /// After visiting children, `leave_*` will be called for this node.
    #[default]
    Continue,

    /// Skip children, continue with siblings.
    ///
    /// The walker will not descend into this node's children (including its
    /// tokens), but `leave_*` will still be called for this node.
    SkipChildren,

    /// Stop traversal entirely.
    ///
    /// No further `visit_*` or `leave_*` methods will be called. The walk
    /// function will return immediately.
    Stop,
}

/// Read-only traversal of a syntax tree.
///
/// Nodes are visited depth-first in source order: `visit_*` before a node's
/// children, `leave_*` after them. Every token stored in the tree reaches
/// [`visit_token`](Self::visit_token) exactly once, in source order, so a
/// visitor that only looks at tokens sees the same stream the tokenizer
/// produced.
pub trait Visitor<'a> {
    #[allow(unused_variables)]
    fn visit_expression(&mut self, node: &ExpressionNode<'a>) -> VisitResult {
        VisitResult::Continue
    }

    #[allow(unused_variables)]
    fn leave_expression(&mut self, node: &ExpressionNode<'a>) {}

    #[allow(unused_variables)]
    fn visit_statement(&mut self, node: &StatementNode<'a>) -> VisitResult {
        VisitResult::Continue
    }

    #[allow(unused_variables)]
    fn leave_statement(&mut self, node: &StatementNode<'a>) {}

    /// Visit a token. Only `Stop` has an effect; tokens have no children.
    #[allow(unused_variables)]
    fn visit_token(&mut self, token: &Token<'a>) -> VisitResult {
        VisitResult::Continue
    }
}
