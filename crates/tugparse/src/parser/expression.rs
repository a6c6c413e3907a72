// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! The expression grammar, loosest binding first.

use super::{Parser, Result};
use crate::nodes::{
    ArgumentNode, AtomExprNode, BinaryNode, BracketNode, CompForNode, CompIfNode,
    CompoundOpNode, ComprehensionNode, ConditionalNode, DictEntryNode, DotNameNode,
    ExpressionNode, LambdaNode, LeafNode, SequenceNode, SliceNode, StringNode, UnaryNode,
    YieldFromNode, YieldNode,
};
use crate::tokenizer::TokenKind;

type BinaryCtor<'a> = fn(BinaryNode<'a>) -> ExpressionNode<'a>;
type SequenceCtor<'a> = fn(SequenceNode<'a>) -> ExpressionNode<'a>;
type ElementParser<'a> = fn(&mut Parser<'a>) -> Result<'a, ExpressionNode<'a>>;
type ContinuesList = fn(TokenKind) -> bool;

/// A subscript may open with the colon of a slice whose lower bound is omitted.
fn starts_subscript(kind: TokenKind) -> bool {
    kind == TokenKind::Colon || kind.starts_expression()
}

fn bit_or_op<'a>(kind: TokenKind) -> Option<BinaryCtor<'a>> {
    (kind == TokenKind::Pipe).then_some(ExpressionNode::BitOr as BinaryCtor<'a>)
}

fn bit_xor_op<'a>(kind: TokenKind) -> Option<BinaryCtor<'a>> {
    (kind == TokenKind::Caret).then_some(ExpressionNode::BitXor as BinaryCtor<'a>)
}

fn bit_and_op<'a>(kind: TokenKind) -> Option<BinaryCtor<'a>> {
    (kind == TokenKind::Ampersand).then_some(ExpressionNode::BitAnd as BinaryCtor<'a>)
}

fn shift_op<'a>(kind: TokenKind) -> Option<BinaryCtor<'a>> {
    let ctor: BinaryCtor<'a> = match kind {
        TokenKind::LeftShift => ExpressionNode::ShiftLeft,
        TokenKind::RightShift => ExpressionNode::ShiftRight,
        _ => return None,
    };
    Some(ctor)
}

fn arith_op<'a>(kind: TokenKind) -> Option<BinaryCtor<'a>> {
    let ctor: BinaryCtor<'a> = match kind {
        TokenKind::Plus => ExpressionNode::Plus,
        TokenKind::Minus => ExpressionNode::Minus,
        _ => return None,
    };
    Some(ctor)
}

fn term_op<'a>(kind: TokenKind) -> Option<BinaryCtor<'a>> {
    let ctor: BinaryCtor<'a> = match kind {
        TokenKind::Star => ExpressionNode::Mul,
        TokenKind::At => ExpressionNode::MatMul,
        TokenKind::Slash => ExpressionNode::Div,
        TokenKind::Percent => ExpressionNode::Modulo,
        TokenKind::DoubleSlash => ExpressionNode::FloorDiv,
        _ => return None,
    };
    Some(ctor)
}

fn and_op<'a>(kind: TokenKind) -> Option<BinaryCtor<'a>> {
    (kind == TokenKind::And).then_some(ExpressionNode::And as BinaryCtor<'a>)
}

fn or_op<'a>(kind: TokenKind) -> Option<BinaryCtor<'a>> {
    (kind == TokenKind::Or).then_some(ExpressionNode::Or as BinaryCtor<'a>)
}

/// Single-token comparison operators. `not in` and `is not` are handled by
/// the comparison loop itself.
fn comparison_op<'a>(kind: TokenKind) -> Option<BinaryCtor<'a>> {
    let ctor: BinaryCtor<'a> = match kind {
        TokenKind::Less => ExpressionNode::Less,
        TokenKind::LessEqual => ExpressionNode::LessEqual,
        TokenKind::EqualEqual => ExpressionNode::Equal,
        TokenKind::NotEqual | TokenKind::LessGreater => ExpressionNode::NotEqual,
        TokenKind::Greater => ExpressionNode::Greater,
        TokenKind::GreaterEqual => ExpressionNode::GreaterEqual,
        TokenKind::In => ExpressionNode::In,
        _ => return None,
    };
    Some(ctor)
}

impl<'a> Parser<'a> {
    // ------------------------------------------------------------------------
    // Sequences
    // ------------------------------------------------------------------------

    /// `element (',' element)* [',']`
    ///
    /// A single element without a comma is returned as itself. A comma only
    /// continues the sequence when the next token can start an element.
    pub(super) fn parse_comma_list(
        &mut self,
        parse_element: ElementParser<'a>,
        wrap: SequenceCtor<'a>,
    ) -> Result<'a, ExpressionNode<'a>> {
        self.parse_comma_list_with(parse_element, wrap, TokenKind::starts_expression)
    }

    /// Like [`parse_comma_list`](Self::parse_comma_list), with `continues`
    /// deciding which tokens after a comma start another element.
    fn parse_comma_list_with(
        &mut self,
        parse_element: ElementParser<'a>,
        wrap: SequenceCtor<'a>,
        continues: ContinuesList,
    ) -> Result<'a, ExpressionNode<'a>> {
        let start = self.start();
        let first = parse_element(self)?;
        if !self.at(TokenKind::Comma) {
            return Ok(first);
        }
        self.finish_comma_list_with(start, first, parse_element, wrap, continues)
    }

    /// Continue a comma list whose first element has been parsed.
    fn finish_comma_list(
        &mut self,
        start: u32,
        first: ExpressionNode<'a>,
        parse_element: ElementParser<'a>,
        wrap: SequenceCtor<'a>,
    ) -> Result<'a, ExpressionNode<'a>> {
        self.finish_comma_list_with(
            start,
            first,
            parse_element,
            wrap,
            TokenKind::starts_expression,
        )
    }

    fn finish_comma_list_with(
        &mut self,
        start: u32,
        first: ExpressionNode<'a>,
        parse_element: ElementParser<'a>,
        wrap: SequenceCtor<'a>,
        continues: ContinuesList,
    ) -> Result<'a, ExpressionNode<'a>> {
        let mut elements = vec![first];
        let mut separators = Vec::new();
        while self.at(TokenKind::Comma) {
            separators.push(self.bump()?);
            if !continues(self.kind()) {
                break;
            }
            elements.push(parse_element(self)?);
        }
        Ok(wrap(SequenceNode {
            span: self.span_from(start),
            elements,
            separators,
        }))
    }

    /// `testlist: test (',' test)* [',']`
    pub(super) fn parse_test_list(&mut self) -> Result<'a, ExpressionNode<'a>> {
        self.parse_comma_list(Self::parse_test, ExpressionNode::TestList)
    }

    /// `exprlist: (expr|star_expr) (',' (expr|star_expr))* [',']`
    pub(super) fn parse_expr_list(&mut self) -> Result<'a, ExpressionNode<'a>> {
        self.parse_comma_list(Self::parse_expr_or_star, ExpressionNode::ExprList)
    }

    /// `typelist: (test|'*' test|'**' test) (',' ...)*`
    pub(super) fn parse_type_list(&mut self) -> Result<'a, ExpressionNode<'a>> {
        self.parse_comma_list(Self::parse_type_element, ExpressionNode::TypeList)
    }

    fn parse_type_element(&mut self) -> Result<'a, ExpressionNode<'a>> {
        match self.kind() {
            TokenKind::Star => self.parse_prefixed(Self::parse_test, ExpressionNode::StarExpr),
            TokenKind::DoubleStar => {
                self.parse_prefixed(Self::parse_test, ExpressionNode::DoubleStarExpr)
            }
            _ => self.parse_test(),
        }
    }

    /// An element of a `testlist_star_expr`: `test | star_expr`.
    pub(super) fn parse_test_or_star(&mut self) -> Result<'a, ExpressionNode<'a>> {
        if self.at(TokenKind::Star) {
            self.parse_star_expr()
        } else {
            self.parse_test()
        }
    }

    fn parse_expr_or_star(&mut self) -> Result<'a, ExpressionNode<'a>> {
        if self.at(TokenKind::Star) {
            self.parse_star_expr()
        } else {
            self.parse_expr()
        }
    }

    fn parse_named_or_star(&mut self) -> Result<'a, ExpressionNode<'a>> {
        if self.at(TokenKind::Star) {
            self.parse_star_expr()
        } else {
            self.parse_namedexpr_test()
        }
    }

    /// `star_expr: '*' expr`
    fn parse_star_expr(&mut self) -> Result<'a, ExpressionNode<'a>> {
        self.parse_prefixed(Self::parse_expr, ExpressionNode::StarExpr)
    }

    /// Consume a prefix operator and parse its operand.
    fn parse_prefixed(
        &mut self,
        operand: ElementParser<'a>,
        wrap: fn(UnaryNode<'a>) -> ExpressionNode<'a>,
    ) -> Result<'a, ExpressionNode<'a>> {
        let start = self.start();
        let op = self.bump()?;
        let operand = operand(self)?;
        Ok(wrap(UnaryNode {
            span: self.span_from(start),
            op,
            operand: Box::new(operand),
        }))
    }

    // ------------------------------------------------------------------------
    // Tests
    // ------------------------------------------------------------------------

    /// `namedexpr_test: test [':=' test]`
    pub(super) fn parse_namedexpr_test(&mut self) -> Result<'a, ExpressionNode<'a>> {
        let start = self.start();
        let left = self.parse_test()?;
        if !self.at(TokenKind::ColonEqual) {
            return Ok(left);
        }
        if !matches!(left, ExpressionNode::Name(_)) {
            return Err(self.error("Expected a name before ':='"));
        }
        let op = self.bump()?;
        let right = self.parse_test()?;
        Ok(ExpressionNode::NamedExpr(BinaryNode {
            span: self.span_from(start),
            left: Box::new(left),
            op,
            right: Box::new(right),
        }))
    }

    /// `test: or_test ['if' or_test 'else' test] | lambdef`
    pub(super) fn parse_test(&mut self) -> Result<'a, ExpressionNode<'a>> {
        if self.at(TokenKind::Lambda) {
            return self.parse_lambda(Self::parse_test);
        }
        let start = self.start();
        let body = self.parse_or_test()?;
        if !self.at(TokenKind::If) {
            return Ok(body);
        }
        let if_token = self.bump()?;
        let condition = self.parse_or_test()?;
        let else_token = self.expect(TokenKind::Else)?;
        let orelse = self.parse_test()?;
        Ok(ExpressionNode::Conditional(ConditionalNode {
            span: self.span_from(start),
            body: Box::new(body),
            if_token,
            condition: Box::new(condition),
            else_token,
            orelse: Box::new(orelse),
        }))
    }

    /// `test_nocond: or_test | lambdef_nocond`
    fn parse_test_nocond(&mut self) -> Result<'a, ExpressionNode<'a>> {
        if self.at(TokenKind::Lambda) {
            self.parse_lambda(Self::parse_test_nocond)
        } else {
            self.parse_or_test()
        }
    }

    /// `lambdef: 'lambda' [varargslist] ':' body`
    fn parse_lambda(&mut self, body: ElementParser<'a>) -> Result<'a, ExpressionNode<'a>> {
        let start = self.start();
        let lambda = self.bump()?;
        let params = if self.at(TokenKind::Colon) {
            None
        } else {
            Some(Box::new(self.parse_var_args_list()?))
        };
        let colon = self.expect(TokenKind::Colon)?;
        let body = body(self)?;
        Ok(ExpressionNode::Lambda(LambdaNode {
            span: self.span_from(start),
            lambda,
            params,
            colon,
            body: Box::new(body),
        }))
    }

    /// Fold `operand (op operand)*` to the left.
    fn parse_left_fold(
        &mut self,
        operand: ElementParser<'a>,
        operator: fn(TokenKind) -> Option<BinaryCtor<'a>>,
    ) -> Result<'a, ExpressionNode<'a>> {
        let start = self.start();
        let mut left = operand(self)?;
        while let Some(ctor) = operator(self.kind()) {
            let op = self.bump()?;
            let right = operand(self)?;
            left = ctor(BinaryNode {
                span: self.span_from(start),
                left: Box::new(left),
                op,
                right: Box::new(right),
            });
        }
        Ok(left)
    }

    pub(super) fn parse_or_test(&mut self) -> Result<'a, ExpressionNode<'a>> {
        self.parse_left_fold(Self::parse_and_test, or_op)
    }

    fn parse_and_test(&mut self) -> Result<'a, ExpressionNode<'a>> {
        self.parse_left_fold(Self::parse_not_test, and_op)
    }

    /// `not_test: 'not' not_test | comparison`
    fn parse_not_test(&mut self) -> Result<'a, ExpressionNode<'a>> {
        if self.at(TokenKind::Not) {
            self.parse_prefixed(Self::parse_not_test, ExpressionNode::Not)
        } else {
            self.parse_comparison()
        }
    }

    /// `comparison: expr (comp_op expr)*`
    ///
    /// Chains fold to the left: `a < b > c` is `Greater(Less(a, b), c)`.
    fn parse_comparison(&mut self) -> Result<'a, ExpressionNode<'a>> {
        let start = self.start();
        let mut left = self.parse_expr()?;
        loop {
            if let Some(ctor) = comparison_op(self.kind()) {
                let op = self.bump()?;
                let right = self.parse_expr()?;
                left = ctor(BinaryNode {
                    span: self.span_from(start),
                    left: Box::new(left),
                    op,
                    right: Box::new(right),
                });
                continue;
            }
            match self.kind() {
                TokenKind::Not => {
                    let first = self.bump()?;
                    let second = self.expect(TokenKind::In)?;
                    let right = self.parse_expr()?;
                    left = ExpressionNode::NotIn(CompoundOpNode {
                        span: self.span_from(start),
                        left: Box::new(left),
                        first,
                        second,
                        right: Box::new(right),
                    });
                }
                TokenKind::Is => {
                    let first = self.bump()?;
                    if self.at(TokenKind::Not) {
                        let second = self.bump()?;
                        let right = self.parse_expr()?;
                        left = ExpressionNode::IsNot(CompoundOpNode {
                            span: self.span_from(start),
                            left: Box::new(left),
                            first,
                            second,
                            right: Box::new(right),
                        });
                    } else {
                        let right = self.parse_expr()?;
                        left = ExpressionNode::Is(BinaryNode {
                            span: self.span_from(start),
                            left: Box::new(left),
                            op: first,
                            right: Box::new(right),
                        });
                    }
                }
                _ => return Ok(left),
            }
        }
    }

    // ------------------------------------------------------------------------
    // Arithmetic
    // ------------------------------------------------------------------------

    /// `expr: xor_expr ('|' xor_expr)*`
    pub(super) fn parse_expr(&mut self) -> Result<'a, ExpressionNode<'a>> {
        self.parse_left_fold(Self::parse_xor_expr, bit_or_op)
    }

    fn parse_xor_expr(&mut self) -> Result<'a, ExpressionNode<'a>> {
        self.parse_left_fold(Self::parse_and_expr, bit_xor_op)
    }

    fn parse_and_expr(&mut self) -> Result<'a, ExpressionNode<'a>> {
        self.parse_left_fold(Self::parse_shift_expr, bit_and_op)
    }

    fn parse_shift_expr(&mut self) -> Result<'a, ExpressionNode<'a>> {
        self.parse_left_fold(Self::parse_arith_expr, shift_op)
    }

    fn parse_arith_expr(&mut self) -> Result<'a, ExpressionNode<'a>> {
        self.parse_left_fold(Self::parse_term, arith_op)
    }

    fn parse_term(&mut self) -> Result<'a, ExpressionNode<'a>> {
        self.parse_left_fold(Self::parse_factor, term_op)
    }

    /// `factor: ('+'|'-'|'~') factor | power`
    fn parse_factor(&mut self) -> Result<'a, ExpressionNode<'a>> {
        match self.kind() {
            TokenKind::Plus => self.parse_prefixed(Self::parse_factor, ExpressionNode::UnaryPlus),
            TokenKind::Minus => {
                self.parse_prefixed(Self::parse_factor, ExpressionNode::UnaryMinus)
            }
            TokenKind::Tilde => self.parse_prefixed(Self::parse_factor, ExpressionNode::BitInvert),
            _ => self.parse_power(),
        }
    }

    /// `power: atom_expr ['**' factor]`, right-associative through `factor`.
    fn parse_power(&mut self) -> Result<'a, ExpressionNode<'a>> {
        let start = self.start();
        let base = self.parse_atom_expr()?;
        if !self.at(TokenKind::DoubleStar) {
            return Ok(base);
        }
        let op = self.bump()?;
        let exponent = self.parse_factor()?;
        Ok(ExpressionNode::Power(BinaryNode {
            span: self.span_from(start),
            left: Box::new(base),
            op,
            right: Box::new(exponent),
        }))
    }

    // ------------------------------------------------------------------------
    // Atoms and trailers
    // ------------------------------------------------------------------------

    /// `atom_expr: ['await'] atom trailer*`
    fn parse_atom_expr(&mut self) -> Result<'a, ExpressionNode<'a>> {
        let start = self.start();
        let await_token = self.eat(TokenKind::Await)?;
        let atom = self.parse_atom()?;
        let mut trailers = Vec::new();
        loop {
            let trailer = match self.kind() {
                TokenKind::Dot => {
                    let trailer_start = self.start();
                    let dot = self.bump()?;
                    let name = self.expect(TokenKind::Name)?;
                    ExpressionNode::DotName(DotNameNode {
                        span: self.span_from(trailer_start),
                        dot,
                        name,
                    })
                }
                TokenKind::LeftParen => self.parse_bracketed(
                    TokenKind::RightParen,
                    ExpressionNode::Call,
                    Self::parse_arg_list,
                )?,
                TokenKind::LeftBracket => self.parse_bracketed(
                    TokenKind::RightBracket,
                    ExpressionNode::Index,
                    Self::parse_subscript_list,
                )?,
                _ => break,
            };
            trailers.push(trailer);
        }

        if await_token.is_none() && trailers.is_empty() {
            return Ok(atom);
        }
        Ok(ExpressionNode::AtomExpr(AtomExprNode {
            span: self.span_from(start),
            await_token,
            atom: Box::new(atom),
            trailers,
        }))
    }

    /// `open body? close`, where an immediate closer means no body.
    fn parse_bracketed(
        &mut self,
        closer: TokenKind,
        wrap: fn(BracketNode<'a>) -> ExpressionNode<'a>,
        body: ElementParser<'a>,
    ) -> Result<'a, ExpressionNode<'a>> {
        let start = self.start();
        let open = self.bump()?;
        let body = if self.at(closer) {
            None
        } else {
            Some(Box::new(body(self)?))
        };
        let close = self.expect(closer)?;
        Ok(wrap(BracketNode {
            span: self.span_from(start),
            open,
            body,
            close,
        }))
    }

    fn parse_atom(&mut self) -> Result<'a, ExpressionNode<'a>> {
        let leaf: fn(LeafNode<'a>) -> ExpressionNode<'a> = match self.kind() {
            TokenKind::LeftParen => {
                return self.parse_bracketed(
                    TokenKind::RightParen,
                    ExpressionNode::Tuple,
                    Self::parse_paren_body,
                );
            }
            TokenKind::LeftBracket => {
                return self.parse_bracketed(
                    TokenKind::RightBracket,
                    ExpressionNode::List,
                    Self::parse_test_list_comp,
                );
            }
            TokenKind::LeftBrace => return self.parse_brace_display(),
            TokenKind::String => return self.parse_strings(),
            TokenKind::Name => ExpressionNode::Name,
            TokenKind::Number => ExpressionNode::Number,
            TokenKind::Ellipsis => ExpressionNode::Ellipsis,
            TokenKind::None => ExpressionNode::None,
            TokenKind::True => ExpressionNode::True,
            TokenKind::False => ExpressionNode::False,
            _ => return Err(self.error("Illegal literal!")),
        };
        Ok(leaf(LeafNode::new(self.bump()?)))
    }

    /// Adjacent string literals form one `String` node.
    fn parse_strings(&mut self) -> Result<'a, ExpressionNode<'a>> {
        let start = self.start();
        let mut tokens = Vec::new();
        while self.at(TokenKind::String) {
            tokens.push(self.bump()?);
        }
        Ok(ExpressionNode::String(StringNode {
            span: self.span_from(start),
            tokens,
        }))
    }

    /// The inside of `( ... )`: a yield expression or a `testlist_comp`.
    fn parse_paren_body(&mut self) -> Result<'a, ExpressionNode<'a>> {
        if self.at(TokenKind::Yield) {
            self.parse_yield_expr()
        } else {
            self.parse_test_list_comp()
        }
    }

    /// `testlist_comp: (namedexpr_test|star_expr) (comp_for | (',' ...)* [','])`
    fn parse_test_list_comp(&mut self) -> Result<'a, ExpressionNode<'a>> {
        let start = self.start();
        let first = self.parse_named_or_star()?;
        if self.at_comp_for() {
            return self.parse_comprehension(start, first);
        }
        if !self.at(TokenKind::Comma) {
            return Ok(first);
        }
        self.finish_comma_list(
            start,
            first,
            Self::parse_named_or_star,
            ExpressionNode::TestListComp,
        )
    }

    /// `{}` is an empty dict; otherwise the first element decides between a
    /// dict and a set display.
    fn parse_brace_display(&mut self) -> Result<'a, ExpressionNode<'a>> {
        let start = self.start();
        let open = self.bump()?;
        if self.at(TokenKind::RightBrace) {
            let close = self.bump()?;
            return Ok(ExpressionNode::Dictionary(BracketNode {
                span: self.span_from(start),
                open,
                body: None,
                close,
            }));
        }

        let body_start = self.start();
        let first = self.parse_dict_or_set_element(None)?;
        let is_dict = matches!(
            first,
            ExpressionNode::DictEntry(_) | ExpressionNode::DoubleStarExpr(_)
        );
        let body = if self.at_comp_for() {
            if matches!(first, ExpressionNode::DoubleStarExpr(_)) {
                return Err(self.error("Dict unpacking cannot be used in dict comprehension"));
            }
            self.parse_comprehension(body_start, first)?
        } else if self.at(TokenKind::Comma) {
            let element: ElementParser<'a> = if is_dict {
                Self::parse_dict_element
            } else {
                Self::parse_set_element
            };
            let wrap: SequenceCtor<'a> = if is_dict {
                ExpressionNode::DictMaker
            } else {
                ExpressionNode::SetMaker
            };
            self.finish_comma_list(body_start, first, element, wrap)?
        } else {
            first
        };

        let close = self.expect(TokenKind::RightBrace)?;
        let bracket = BracketNode {
            span: self.span_from(start),
            open,
            body: Some(Box::new(body)),
            close,
        };
        Ok(if is_dict {
            ExpressionNode::Dictionary(bracket)
        } else {
            ExpressionNode::Set(bracket)
        })
    }

    fn parse_dict_element(&mut self) -> Result<'a, ExpressionNode<'a>> {
        self.parse_dict_or_set_element(Some(true))
    }

    fn parse_set_element(&mut self) -> Result<'a, ExpressionNode<'a>> {
        self.parse_dict_or_set_element(Some(false))
    }

    /// One element of a brace display. `dict` is `None` for the first
    /// element, which may be either kind.
    fn parse_dict_or_set_element(
        &mut self,
        dict: Option<bool>,
    ) -> Result<'a, ExpressionNode<'a>> {
        match self.kind() {
            TokenKind::DoubleStar if dict != Some(false) => {
                return self.parse_prefixed(Self::parse_expr, ExpressionNode::DoubleStarExpr);
            }
            TokenKind::Star if dict != Some(true) => return self.parse_star_expr(),
            _ => {}
        }
        let start = self.start();
        let key = self.parse_test()?;
        if dict == Some(false) || (dict.is_none() && !self.at(TokenKind::Colon)) {
            return Ok(key);
        }
        let colon = self.expect(TokenKind::Colon)?;
        let value = self.parse_test()?;
        Ok(ExpressionNode::DictEntry(DictEntryNode {
            span: self.span_from(start),
            key: Box::new(key),
            colon,
            value: Box::new(value),
        }))
    }

    // ------------------------------------------------------------------------
    // Comprehensions
    // ------------------------------------------------------------------------

    fn at_comp_for(&self) -> bool {
        matches!(self.kind(), TokenKind::For | TokenKind::Async)
    }

    fn parse_comprehension(
        &mut self,
        start: u32,
        element: ExpressionNode<'a>,
    ) -> Result<'a, ExpressionNode<'a>> {
        let comp_for = self.parse_comp_for()?;
        Ok(ExpressionNode::Comprehension(ComprehensionNode {
            span: self.span_from(start),
            element: Box::new(element),
            comp_for: Box::new(comp_for),
        }))
    }

    /// `comp_for: ['async'] 'for' exprlist 'in' or_test [comp_iter]`
    fn parse_comp_for(&mut self) -> Result<'a, ExpressionNode<'a>> {
        let start = self.start();
        let async_token = self.eat(TokenKind::Async)?;
        let for_token = self.expect(TokenKind::For)?;
        let targets = self.parse_expr_list()?;
        let in_token = self.expect(TokenKind::In)?;
        let iter = self.parse_or_test()?;
        let next = self.parse_comp_iter()?;
        Ok(ExpressionNode::CompFor(CompForNode {
            span: self.span_from(start),
            async_token,
            for_token,
            targets: Box::new(targets),
            in_token,
            iter: Box::new(iter),
            next,
        }))
    }

    /// `comp_if: 'if' test_nocond [comp_iter]`
    fn parse_comp_if(&mut self) -> Result<'a, ExpressionNode<'a>> {
        let start = self.start();
        let if_token = self.bump()?;
        let condition = self.parse_test_nocond()?;
        let next = self.parse_comp_iter()?;
        Ok(ExpressionNode::CompIf(CompIfNode {
            span: self.span_from(start),
            if_token,
            condition: Box::new(condition),
            next,
        }))
    }

    fn parse_comp_iter(&mut self) -> Result<'a, Option<Box<ExpressionNode<'a>>>> {
        let next = if self.at_comp_for() {
            self.parse_comp_for()?
        } else if self.at(TokenKind::If) {
            self.parse_comp_if()?
        } else {
            return Ok(None);
        };
        Ok(Some(Box::new(next)))
    }

    // ------------------------------------------------------------------------
    // Call arguments and subscripts
    // ------------------------------------------------------------------------

    /// `arglist: argument (',' argument)* [',']`
    ///
    /// A lone argument is returned as itself; a generator argument must be
    /// the only one.
    pub(super) fn parse_arg_list(&mut self) -> Result<'a, ExpressionNode<'a>> {
        let start = self.start();
        let first = self.parse_argument()?;
        if self.at_comp_for() {
            return self.parse_comprehension(start, first);
        }
        if !self.at(TokenKind::Comma) {
            return Ok(first);
        }
        self.finish_comma_list(start, first, Self::parse_argument, ExpressionNode::ArgList)
    }

    /// `argument: test [comp_for] | test ':=' test | test '=' test | '**' test | '*' test`
    ///
    /// The `comp_for` case is handled by [`parse_arg_list`](Self::parse_arg_list).
    fn parse_argument(&mut self) -> Result<'a, ExpressionNode<'a>> {
        match self.kind() {
            TokenKind::Star => {
                return self.parse_prefixed(Self::parse_test, ExpressionNode::StarExpr);
            }
            TokenKind::DoubleStar => {
                return self.parse_prefixed(Self::parse_test, ExpressionNode::DoubleStarExpr);
            }
            _ => {}
        }
        let start = self.start();
        let name = self.parse_namedexpr_test()?;
        if !self.at(TokenKind::Equal) {
            return Ok(name);
        }
        if !matches!(name, ExpressionNode::Name(_)) {
            return Err(self.error("Expected a parameter name before '='"));
        }
        let equal = self.bump()?;
        let value = self.parse_test()?;
        Ok(ExpressionNode::Argument(ArgumentNode {
            span: self.span_from(start),
            name: Box::new(name),
            equal,
            value: Box::new(value),
        }))
    }

    /// `subscriptlist: subscript (',' subscript)* [',']`
    fn parse_subscript_list(&mut self) -> Result<'a, ExpressionNode<'a>> {
        self.parse_comma_list_with(
            Self::parse_subscript,
            ExpressionNode::SubscriptList,
            starts_subscript,
        )
    }

    /// `subscript: test | [test] ':' [test] [':' [test]]`
    fn parse_subscript(&mut self) -> Result<'a, ExpressionNode<'a>> {
        let start = self.start();
        let lower = if self.at(TokenKind::Colon) {
            None
        } else {
            let lower = self.parse_test()?;
            if !self.at(TokenKind::Colon) {
                return Ok(lower);
            }
            Some(Box::new(lower))
        };
        let first_colon = self.bump()?;
        let stop = self.parse_optional_test()?;
        let (second_colon, step) = match self.eat(TokenKind::Colon)? {
            Some(colon) => (Some(colon), self.parse_optional_test()?),
            None => (None, None),
        };
        Ok(ExpressionNode::Slice(SliceNode {
            span: self.span_from(start),
            start: lower,
            first_colon,
            stop,
            second_colon,
            step,
        }))
    }

    fn parse_optional_test(&mut self) -> Result<'a, Option<Box<ExpressionNode<'a>>>> {
        if self.kind().starts_expression() {
            Ok(Some(Box::new(self.parse_test()?)))
        } else {
            Ok(None)
        }
    }

    // ------------------------------------------------------------------------
    // Yield
    // ------------------------------------------------------------------------

    /// `yield_expr: 'yield' ['from' test | testlist_star_expr]`
    pub(super) fn parse_yield_expr(&mut self) -> Result<'a, ExpressionNode<'a>> {
        let start = self.start();
        let yield_token = self.expect(TokenKind::Yield)?;
        if self.at(TokenKind::From) {
            let from_token = self.bump()?;
            let value = self.parse_test()?;
            return Ok(ExpressionNode::YieldFrom(YieldFromNode {
                span: self.span_from(start),
                yield_token,
                from_token,
                value: Box::new(value),
            }));
        }
        let value = if self.kind().starts_expression() {
            let value = self.parse_comma_list(Self::parse_test_or_star, ExpressionNode::TestList)?;
            Some(Box::new(value))
        } else {
            None
        };
        Ok(ExpressionNode::Yield(YieldNode {
            span: self.span_from(start),
            yield_token,
            value,
        }))
    }
}
