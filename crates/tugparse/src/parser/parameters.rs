// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Parameter lists for `def` (`typedargslist`) and `lambda` (`varargslist`).
//!
//! Both share one loop; the typed form additionally accepts `: annotation`
//! after a parameter name.

use super::{Parser, Result};
use crate::nodes::{
    Annotation, DoubleStarParamNode, ParameterListNode, SingleTokenNode, StarParamNode,
    StatementNode, VfpDefAssignNode, VfpDefNode,
};
use crate::tokenizer::TokenKind;

impl<'a> Parser<'a> {
    /// The parameters between `def f(` and `)`.
    pub(super) fn parse_typed_args_list(&mut self) -> Result<'a, StatementNode<'a>> {
        let list = self.parse_parameter_list(true, TokenKind::RightParen)?;
        Ok(StatementNode::TypedArgsList(list))
    }

    /// The parameters between `lambda` and `:`.
    pub(super) fn parse_var_args_list(&mut self) -> Result<'a, StatementNode<'a>> {
        let list = self.parse_parameter_list(false, TokenKind::Colon)?;
        Ok(StatementNode::VarArgsList(list))
    }

    fn parse_parameter_list(
        &mut self,
        typed: bool,
        closer: TokenKind,
    ) -> Result<'a, ParameterListNode<'a>> {
        let start = self.start();
        let mut params = Vec::new();
        let mut separators = Vec::new();
        loop {
            let param = self.parse_parameter(typed)?;
            let is_var_keyword = matches!(param, StatementNode::DoubleStarParam(_));
            params.push(param);
            if !self.at(TokenKind::Comma) {
                break;
            }
            separators.push(self.bump()?);
            if self.at(closer) {
                break;
            }
            if is_var_keyword {
                return Err(self.error("Arguments cannot follow var-keyword argument"));
            }
        }
        Ok(ParameterListNode {
            span: self.span_from(start),
            params,
            separators,
        })
    }

    fn parse_parameter(&mut self, typed: bool) -> Result<'a, StatementNode<'a>> {
        let start = self.start();
        match self.kind() {
            TokenKind::Star => {
                let star = self.bump()?;
                let param = if self.at(TokenKind::Name) {
                    Some(Box::new(self.parse_vfp_def(typed)?))
                } else {
                    None
                };
                Ok(StatementNode::StarParam(StarParamNode {
                    span: self.span_from(start),
                    star,
                    param,
                }))
            }
            TokenKind::DoubleStar => {
                let op = self.bump()?;
                let param = self.parse_vfp_def(typed)?;
                Ok(StatementNode::DoubleStarParam(DoubleStarParamNode {
                    span: self.span_from(start),
                    op,
                    param: Box::new(param),
                }))
            }
            TokenKind::Slash => Ok(StatementNode::PositionalOnly(SingleTokenNode::new(
                self.bump()?,
            ))),
            TokenKind::Name => {
                let param = self.parse_vfp_def(typed)?;
                if !self.at(TokenKind::Equal) {
                    return Ok(param);
                }
                let assign = self.bump()?;
                let default = self.parse_test()?;
                Ok(StatementNode::VfpDefAssign(VfpDefAssignNode {
                    span: self.span_from(start),
                    param: Box::new(param),
                    assign,
                    default,
                }))
            }
            _ => Err(self.error(format!(
                "Expected parameter, found {}",
                self.current().describe()
            ))),
        }
    }

    /// `tfpdef: NAME [':' test]`, or a bare `NAME` when untyped.
    fn parse_vfp_def(&mut self, typed: bool) -> Result<'a, StatementNode<'a>> {
        let start = self.start();
        let name = self.expect(TokenKind::Name)?;
        let annotation = if typed && self.at(TokenKind::Colon) {
            let annotation_start = self.start();
            let colon = self.bump()?;
            let value = self.parse_test()?;
            Some(Annotation {
                span: self.span_from(annotation_start),
                colon,
                value,
            })
        } else {
            None
        };
        Ok(StatementNode::VfpDef(VfpDefNode {
            span: self.span_from(start),
            name,
            annotation,
        }))
    }
}
