// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Visitor infrastructure for syntax tree traversal.
//!
//! # Traversal Order
//!
//! - **Depth-first, pre-order** for `visit_*` methods
//! - **Post-order** for `leave_*` methods
//! - Children and tokens are visited in source order
//!
//! # Visitor Pattern
//!
//! ```ignore
//! use tugparse::visitor::{walk_module, Visitor, VisitResult};
//!
//! struct NameCounter {
//!     count: usize,
//! }
//!
//! impl<'a> Visitor<'a> for NameCounter {
//!     fn visit_expression(&mut self, node: &ExpressionNode<'a>) -> VisitResult {
//!         if matches!(node, ExpressionNode::Name(_)) {
//!             self.count += 1;
//!         }
//!         VisitResult::Continue
//!     }
//! }
//! ```

mod span_collector;
mod traits;
mod walk;

pub use span_collector::{collect_first, NodeSpan, SpanCollector};
pub use traits::{VisitResult, Visitor};
pub use walk::{
    walk_eval_input, walk_expression, walk_func_type_input, walk_module, walk_statement,
    walk_token,
};
