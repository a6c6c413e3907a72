// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! The concrete syntax tree.
//!
//! Nodes are immutable once built and own their children outright: no
//! parent links, no sharing, no cycles. Every token that the parser
//! consumed is stored somewhere in the tree, which is what lets
//! [`Codegen`](crate::Codegen) reproduce the input byte for byte.

pub mod expression;
pub mod module;
pub mod statement;
pub mod traits;

pub use expression::*;
pub use module::{EvalInputNode, FuncTypeInputNode, ModuleNode};
pub use statement::*;
pub use traits::Spanned;
