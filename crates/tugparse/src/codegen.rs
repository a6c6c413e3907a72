// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Source regeneration.
//!
//! Every token in a tree carries its leading trivia, so writing each token's
//! prefix and text in walk order reproduces the input byte for byte.
//!
//! ```ignore
//! let module = tugparse::parse_module(source)?;
//! let mut state = CodegenState::default();
//! module.codegen(&mut state);
//! assert_eq!(state.to_string(), source);
//! ```

use std::fmt;

use crate::nodes::{EvalInputNode, ExpressionNode, FuncTypeInputNode, ModuleNode, StatementNode};
use crate::tokenizer::Token;
use crate::visitor::{
    walk_eval_input, walk_expression, walk_func_type_input, walk_module, walk_statement,
    VisitResult, Visitor,
};

/// Accumulates regenerated source text.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CodegenState {
    tokens: String,
}

impl CodegenState {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            tokens: String::with_capacity(capacity),
        }
    }

    /// Append raw text.
    pub fn add_token(&mut self, text: &str) {
        self.tokens.push_str(text);
    }

    /// Append a token's trivia prefix followed by its text.
    pub fn add_full_token(&mut self, token: &Token<'_>) {
        for trivia in &token.prefix {
            self.tokens.push_str(trivia.text);
        }
        self.tokens.push_str(token.text);
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn into_string(self) -> String {
        self.tokens
    }
}

impl fmt::Display for CodegenState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tokens)
    }
}

/// Writes a node back to source text.
pub trait Codegen<'a> {
    fn codegen(&self, state: &mut CodegenState);

    /// Regenerate this node into a fresh string.
    fn to_source(&self) -> String {
        let mut state = CodegenState::default();
        self.codegen(&mut state);
        state.into_string()
    }
}

struct TokenWriter<'s> {
    state: &'s mut CodegenState,
}

impl<'a> Visitor<'a> for TokenWriter<'_> {
    fn visit_token(&mut self, token: &Token<'a>) -> VisitResult {
        self.state.add_full_token(token);
        VisitResult::Continue
    }
}

impl<'a> Codegen<'a> for ModuleNode<'a> {
    fn codegen(&self, state: &mut CodegenState) {
        let flow = walk_module(&mut TokenWriter { state }, self);
        debug_assert!(flow.is_continue());
    }
}

impl<'a> Codegen<'a> for EvalInputNode<'a> {
    fn codegen(&self, state: &mut CodegenState) {
        let flow = walk_eval_input(&mut TokenWriter { state }, self);
        debug_assert!(flow.is_continue());
    }
}

impl<'a> Codegen<'a> for FuncTypeInputNode<'a> {
    fn codegen(&self, state: &mut CodegenState) {
        let flow = walk_func_type_input(&mut TokenWriter { state }, self);
        debug_assert!(flow.is_continue());
    }
}

impl<'a> Codegen<'a> for ExpressionNode<'a> {
    fn codegen(&self, state: &mut CodegenState) {
        let flow = walk_expression(&mut TokenWriter { state }, self);
        debug_assert!(flow.is_continue());
    }
}

impl<'a> Codegen<'a> for StatementNode<'a> {
    fn codegen(&self, state: &mut CodegenState) {
        let flow = walk_statement(&mut TokenWriter { state }, self);
        debug_assert!(flow.is_continue());
    }
}

impl<'a> Codegen<'a> for Token<'a> {
    fn codegen(&self, state: &mut CodegenState) {
        state.add_full_token(self);
    }
}

impl<'a, T: Codegen<'a>> Codegen<'a> for Box<T> {
    fn codegen(&self, state: &mut CodegenState) {
        (**self).codegen(state);
    }
}

impl<'a, T: Codegen<'a>> Codegen<'a> for Option<T> {
    fn codegen(&self, state: &mut CodegenState) {
        if let Some(node) = self {
            node.codegen(state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse_expression, parse_func_type, parse_module};

    #[test]
    fn test_module_roundtrip() {
        let source = "# header\n\nimport os  # trailing\n\nif x:\n\tpass\n";
        let module = parse_module(source).expect("parse error");
        let mut state = CodegenState::default();
        module.codegen(&mut state);
        assert_eq!(state.to_string(), source);
    }

    #[test]
    fn test_statement_codegen_includes_leading_trivia() {
        let source = "a = 1\n\n# note\nb = 2\n";
        let module = parse_module(source).expect("parse error");
        assert_eq!(module.statements.len(), 2);
        assert_eq!(module.statements[0].to_source(), "a = 1\n");
        assert_eq!(module.statements[1].to_source(), "\n# note\nb = 2\n");
    }

    #[test]
    fn test_expression_and_func_type() {
        let expression = parse_expression("a if b else c  \n").expect("parse error");
        assert_eq!(expression.to_source(), "a if b else c  \n");

        let func_type = parse_func_type("(int, *str) -> None").expect("parse error");
        assert_eq!(func_type.to_source(), "(int, *str) -> None");
    }

    #[test]
    fn test_state_accumulates() {
        let mut state = CodegenState::with_capacity(8);
        assert!(state.is_empty());
        state.add_token("x");
        state.add_token(" = 1");
        assert_eq!(state.len(), 5);
        assert_eq!(state.into_string(), "x = 1");
    }
}
