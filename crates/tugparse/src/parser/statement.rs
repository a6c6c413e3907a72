// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! The statement grammar.

use super::{Parser, Result};
use crate::nodes::{
    AnnAssignNode, AsName, AsTarget, AssertMessage, AssertNode, AssignNode, AssignedValue,
    AugAssignNode, BlockClause, ClassDefNode, Decorator, DelNode, DottedAsName, DottedName,
    ElifClause, ExceptClause, ExpressionNode, ExpressionStatementNode, ForNode, FromClause,
    FuncDefNode, IfNode, ImportAsName, ImportFromNode, ImportNamesNode, ImportNode,
    ImportTargets, NameListNode, RaiseNode, ReturnAnnotation, ReturnNode,
    SimpleStatementsNode, SingleTokenNode, Spanned, StatementNode, SuiteNode, TryNode,
    WhileNode, WithItem, WithNode,
};
use crate::tokenizer::{Token, TokenKind};

impl<'a> Parser<'a> {
    /// `stmt: simple_stmt | compound_stmt`
    pub(super) fn parse_statement(&mut self) -> Result<'a, StatementNode<'a>> {
        match self.kind() {
            TokenKind::If => self.parse_if(),
            TokenKind::While => self.parse_while(),
            TokenKind::For => self.parse_for(None, self.start()),
            TokenKind::Try => self.parse_try(),
            TokenKind::With => self.parse_with(None, self.start()),
            TokenKind::Def => self.parse_func_def(Vec::new(), None, self.start()),
            TokenKind::Class => self.parse_class_def(Vec::new(), self.start()),
            TokenKind::At => self.parse_decorated(),
            TokenKind::Async => self.parse_async_statement(),
            TokenKind::Indent => Err(self.error("Unexpected indent")),
            _ => self.parse_simple_statements(),
        }
    }

    // ------------------------------------------------------------------------
    // Simple statements
    // ------------------------------------------------------------------------

    fn at_line_end(&self) -> bool {
        matches!(
            self.kind(),
            TokenKind::Newline | TokenKind::EndOfFile | TokenKind::Dedent | TokenKind::TypeComment
        )
    }

    /// `simple_stmt: small_stmt (';' small_stmt)* [';'] [TYPE_COMMENT] NEWLINE`
    ///
    /// The newline may be missing when the line is the last one in a block
    /// or in the file.
    fn parse_simple_statements(&mut self) -> Result<'a, StatementNode<'a>> {
        let start = self.start();
        let mut statements = Vec::new();
        let mut semicolons = Vec::new();
        loop {
            statements.push(self.parse_small_statement()?);
            if !self.at(TokenKind::Semicolon) {
                break;
            }
            semicolons.push(self.bump()?);
            if self.at_line_end() {
                break;
            }
        }

        let type_comment = self.eat(TokenKind::TypeComment)?;
        let newline = match self.kind() {
            TokenKind::Newline => Some(self.bump()?),
            TokenKind::EndOfFile | TokenKind::Dedent => None,
            _ => {
                return Err(self.error(format!(
                    "Expected newline, found {}",
                    self.current().describe()
                )));
            }
        };
        Ok(StatementNode::Simple(SimpleStatementsNode {
            span: self.span_from(start),
            statements,
            semicolons,
            type_comment,
            newline,
        }))
    }

    fn parse_small_statement(&mut self) -> Result<'a, StatementNode<'a>> {
        match self.kind() {
            TokenKind::Pass => Ok(StatementNode::Pass(SingleTokenNode::new(self.bump()?))),
            TokenKind::Break => Ok(StatementNode::Break(SingleTokenNode::new(self.bump()?))),
            TokenKind::Continue => {
                Ok(StatementNode::Continue(SingleTokenNode::new(self.bump()?)))
            }
            TokenKind::Return => self.parse_return(),
            TokenKind::Raise => self.parse_raise(),
            TokenKind::Del => self.parse_del(),
            TokenKind::Global => Ok(StatementNode::Global(self.parse_name_list()?)),
            TokenKind::Nonlocal => Ok(StatementNode::Nonlocal(self.parse_name_list()?)),
            TokenKind::Assert => self.parse_assert(),
            TokenKind::Import => self.parse_import(),
            TokenKind::From => self.parse_import_from(),
            _ => self.parse_expression_statement(),
        }
    }

    /// `testlist_star_expr: (test|star_expr) (',' (test|star_expr))* [',']`
    ///
    /// A single element becomes an `Expression` statement.
    fn parse_test_list_star_expr(&mut self) -> Result<'a, StatementNode<'a>> {
        let value = self.parse_comma_list(Self::parse_test_or_star, ExpressionNode::TestList)?;
        Ok(match value {
            ExpressionNode::TestList(sequence) => StatementNode::TestListStarExpr(sequence),
            value => StatementNode::Expression(ExpressionStatementNode {
                span: value.span(),
                value,
            }),
        })
    }

    /// The right-hand side of an assignment: `yield_expr | testlist_star_expr`.
    fn parse_assigned_value(&mut self) -> Result<'a, StatementNode<'a>> {
        if !self.at(TokenKind::Yield) {
            return self.parse_test_list_star_expr();
        }
        let value = self.parse_yield_expr()?;
        Ok(StatementNode::Expression(ExpressionStatementNode {
            span: value.span(),
            value,
        }))
    }

    /// `expr_stmt: testlist_star_expr (annassign | augassign (yield_expr|testlist) |
    ///             ('=' (yield_expr|testlist_star_expr))*)`
    fn parse_expression_statement(&mut self) -> Result<'a, StatementNode<'a>> {
        let start = self.start();
        let first = self.parse_assigned_value()?;

        match self.kind() {
            TokenKind::Colon => {
                let target = self.single_target(first, "Only a single target can be annotated")?;
                let colon = self.bump()?;
                let annotation = self.parse_test()?;
                let value = if self.at(TokenKind::Equal) {
                    let value_start = self.start();
                    let assign = self.bump()?;
                    let value = self.parse_assigned_value()?;
                    Some(AssignedValue {
                        span: self.span_from(value_start),
                        assign,
                        value: Box::new(value),
                    })
                } else {
                    None
                };
                Ok(StatementNode::AnnAssign(AnnAssignNode {
                    span: self.span_from(start),
                    target,
                    colon,
                    annotation,
                    value,
                }))
            }
            kind if kind.is_augmented_assign() => {
                let target = self.single_target(
                    first,
                    "Only a single target can be used with augmented assignment",
                )?;
                let op = self.bump()?;
                let value = if self.at(TokenKind::Yield) {
                    self.parse_assigned_value()?
                } else {
                    let value = self.parse_test_list()?;
                    StatementNode::Expression(ExpressionStatementNode {
                        span: value.span(),
                        value,
                    })
                };
                Ok(StatementNode::AugAssign(AugAssignNode {
                    span: self.span_from(start),
                    target,
                    op,
                    value: Box::new(value),
                }))
            }
            TokenKind::Equal => {
                let mut targets = vec![first];
                let mut operators = Vec::new();
                let value = loop {
                    operators.push(self.bump()?);
                    let next = self.parse_assigned_value()?;
                    if !self.at(TokenKind::Equal) {
                        break next;
                    }
                    targets.push(next);
                };
                Ok(StatementNode::Assign(AssignNode {
                    span: self.span_from(start),
                    targets,
                    operators,
                    value: Box::new(value),
                }))
            }
            _ => Ok(first),
        }
    }

    /// Unwrap an `Expression` statement, or fail at the current token.
    fn single_target(
        &self,
        statement: StatementNode<'a>,
        message: &str,
    ) -> Result<'a, ExpressionNode<'a>> {
        match statement {
            StatementNode::Expression(expression) => Ok(expression.value),
            _ => Err(self.error(message)),
        }
    }

    fn parse_return(&mut self) -> Result<'a, StatementNode<'a>> {
        let start = self.start();
        let keyword = self.bump()?;
        let value = if self.at_line_end() || self.at(TokenKind::Semicolon) {
            None
        } else {
            Some(Box::new(self.parse_test_list_star_expr()?))
        };
        Ok(StatementNode::Return(ReturnNode {
            span: self.span_from(start),
            keyword,
            value,
        }))
    }

    /// `raise_stmt: 'raise' [test ['from' test]]`
    fn parse_raise(&mut self) -> Result<'a, StatementNode<'a>> {
        let start = self.start();
        let keyword = self.bump()?;
        let mut exception = None;
        let mut cause = None;
        if !self.at_line_end() && !self.at(TokenKind::Semicolon) {
            exception = Some(self.parse_test()?);
            if self.at(TokenKind::From) {
                let from_start = self.start();
                let from = self.bump()?;
                let value = self.parse_test()?;
                cause = Some(FromClause {
                    span: self.span_from(from_start),
                    from,
                    value,
                });
            }
        }
        Ok(StatementNode::Raise(RaiseNode {
            span: self.span_from(start),
            keyword,
            exception,
            cause,
        }))
    }

    /// `del_stmt: 'del' exprlist`
    fn parse_del(&mut self) -> Result<'a, StatementNode<'a>> {
        let start = self.start();
        let keyword = self.bump()?;
        let targets = self.parse_expr_list()?;
        Ok(StatementNode::Del(DelNode {
            span: self.span_from(start),
            keyword,
            targets,
        }))
    }

    /// `('global' | 'nonlocal') NAME (',' NAME)*`
    fn parse_name_list(&mut self) -> Result<'a, NameListNode<'a>> {
        let start = self.start();
        let keyword = self.bump()?;
        let mut names = vec![self.expect(TokenKind::Name)?];
        let mut separators = Vec::new();
        while self.at(TokenKind::Comma) {
            separators.push(self.bump()?);
            names.push(self.expect(TokenKind::Name)?);
        }
        Ok(NameListNode {
            span: self.span_from(start),
            keyword,
            names,
            separators,
        })
    }

    /// `assert_stmt: 'assert' test [',' test]`
    fn parse_assert(&mut self) -> Result<'a, StatementNode<'a>> {
        let start = self.start();
        let keyword = self.bump()?;
        let test = self.parse_test()?;
        let message = if self.at(TokenKind::Comma) {
            let message_start = self.start();
            let comma = self.bump()?;
            let value = self.parse_test()?;
            Some(AssertMessage {
                span: self.span_from(message_start),
                comma,
                value,
            })
        } else {
            None
        };
        Ok(StatementNode::Assert(AssertNode {
            span: self.span_from(start),
            keyword,
            test,
            message,
        }))
    }

    // ------------------------------------------------------------------------
    // Imports
    // ------------------------------------------------------------------------

    /// `import_name: 'import' dotted_as_name (',' dotted_as_name)*`
    fn parse_import(&mut self) -> Result<'a, StatementNode<'a>> {
        let start = self.start();
        let keyword = self.bump()?;
        let mut names = vec![self.parse_dotted_as_name()?];
        let mut separators = Vec::new();
        while self.at(TokenKind::Comma) {
            separators.push(self.bump()?);
            names.push(self.parse_dotted_as_name()?);
        }
        Ok(StatementNode::Import(ImportNode {
            span: self.span_from(start),
            keyword,
            names,
            separators,
        }))
    }

    fn parse_dotted_as_name(&mut self) -> Result<'a, DottedAsName<'a>> {
        let start = self.start();
        let name = self.parse_dotted_name()?;
        let alias = self.parse_as_name()?;
        Ok(DottedAsName {
            span: self.span_from(start),
            name,
            alias,
        })
    }

    /// `dotted_name: NAME ('.' NAME)*`
    fn parse_dotted_name(&mut self) -> Result<'a, DottedName<'a>> {
        let start = self.start();
        let mut names = vec![self.expect(TokenKind::Name)?];
        let mut dots = Vec::new();
        while self.at(TokenKind::Dot) {
            dots.push(self.bump()?);
            names.push(self.expect(TokenKind::Name)?);
        }
        Ok(DottedName {
            span: self.span_from(start),
            names,
            dots,
        })
    }

    /// `['as' NAME]`
    fn parse_as_name(&mut self) -> Result<'a, Option<AsName<'a>>> {
        if !self.at(TokenKind::As) {
            return Ok(None);
        }
        let start = self.start();
        let as_token = self.bump()?;
        let name = self.expect(TokenKind::Name)?;
        Ok(Some(AsName {
            span: self.span_from(start),
            as_token,
            name,
        }))
    }

    /// `import_from: 'from' (('.' | '...')* dotted_name | ('.' | '...')+)
    ///               'import' ('*' | '(' import_as_names ')' | import_as_names)`
    fn parse_import_from(&mut self) -> Result<'a, StatementNode<'a>> {
        let start = self.start();
        let from = self.bump()?;
        let mut dots = Vec::new();
        while matches!(self.kind(), TokenKind::Dot | TokenKind::Ellipsis) {
            dots.push(self.bump()?);
        }
        let module = if self.at(TokenKind::Name) || dots.is_empty() {
            Some(self.parse_dotted_name()?)
        } else {
            None
        };
        let import = self.expect(TokenKind::Import)?;
        let targets = if self.at(TokenKind::Star) {
            ImportTargets::Star(self.bump()?)
        } else {
            ImportTargets::Names(self.parse_import_names()?)
        };
        Ok(StatementNode::ImportFrom(ImportFromNode {
            span: self.span_from(start),
            from,
            dots,
            module,
            import,
            targets,
        }))
    }

    /// `import_as_names`, with a trailing comma allowed only in parentheses.
    fn parse_import_names(&mut self) -> Result<'a, ImportNamesNode<'a>> {
        let start = self.start();
        let open = self.eat(TokenKind::LeftParen)?;
        let mut names = vec![self.parse_import_as_name()?];
        let mut separators = Vec::new();
        while self.at(TokenKind::Comma) {
            separators.push(self.bump()?);
            if open.is_some() && self.at(TokenKind::RightParen) {
                break;
            }
            names.push(self.parse_import_as_name()?);
        }
        let close = match open {
            Some(_) => Some(self.expect(TokenKind::RightParen)?),
            None => None,
        };
        Ok(ImportNamesNode {
            span: self.span_from(start),
            open,
            names,
            separators,
            close,
        })
    }

    fn parse_import_as_name(&mut self) -> Result<'a, ImportAsName<'a>> {
        let start = self.start();
        let name = self.expect(TokenKind::Name)?;
        let alias = self.parse_as_name()?;
        Ok(ImportAsName {
            span: self.span_from(start),
            name,
            alias,
        })
    }

    // ------------------------------------------------------------------------
    // Compound statements
    // ------------------------------------------------------------------------

    /// `suite: simple_stmt | [TYPE_COMMENT] NEWLINE INDENT stmt+ DEDENT`
    fn parse_suite(&mut self) -> Result<'a, StatementNode<'a>> {
        if !matches!(self.kind(), TokenKind::Newline | TokenKind::TypeComment) {
            return self.parse_simple_statements();
        }
        let start = self.start();
        let type_comment = self.eat(TokenKind::TypeComment)?;
        let newline = self.expect(TokenKind::Newline)?;
        if !self.at(TokenKind::Indent) {
            return Err(self.error("Expected an indented block"));
        }
        let indent = self.bump()?;
        let mut statements = Vec::new();
        while !self.at(TokenKind::Dedent) {
            if self.at(TokenKind::EndOfFile) {
                return Err(self.error("Expected dedent, found end of file"));
            }
            statements.push(self.parse_statement()?);
        }
        let dedent = self.bump()?;
        Ok(StatementNode::Suite(SuiteNode {
            span: self.span_from(start),
            type_comment,
            newline,
            indent,
            statements,
            dedent,
        }))
    }

    /// `keyword ':' suite`, for `else` and `finally`.
    fn parse_block_clause(&mut self) -> Result<'a, BlockClause<'a>> {
        let start = self.start();
        let keyword = self.bump()?;
        let colon = self.expect(TokenKind::Colon)?;
        let body = self.parse_suite()?;
        Ok(BlockClause {
            span: self.span_from(start),
            keyword,
            colon,
            body: Box::new(body),
        })
    }

    fn parse_else_clause(&mut self) -> Result<'a, Option<BlockClause<'a>>> {
        if self.at(TokenKind::Else) {
            Ok(Some(self.parse_block_clause()?))
        } else {
            Ok(None)
        }
    }

    /// `if_stmt: 'if' namedexpr_test ':' suite ('elif' namedexpr_test ':' suite)* ['else' ':' suite]`
    fn parse_if(&mut self) -> Result<'a, StatementNode<'a>> {
        let start = self.start();
        let if_token = self.bump()?;
        let condition = self.parse_namedexpr_test()?;
        let colon = self.expect(TokenKind::Colon)?;
        let body = self.parse_suite()?;

        let mut elif_clauses = Vec::new();
        while self.at(TokenKind::Elif) {
            let elif_start = self.start();
            let elif = self.bump()?;
            let condition = self.parse_namedexpr_test()?;
            let colon = self.expect(TokenKind::Colon)?;
            let body = self.parse_suite()?;
            elif_clauses.push(ElifClause {
                span: self.span_from(elif_start),
                elif,
                condition,
                colon,
                body: Box::new(body),
            });
        }
        let else_clause = self.parse_else_clause()?;

        Ok(StatementNode::If(IfNode {
            span: self.span_from(start),
            if_token,
            condition,
            colon,
            body: Box::new(body),
            elif_clauses,
            else_clause,
        }))
    }

    /// `while_stmt: 'while' namedexpr_test ':' suite ['else' ':' suite]`
    fn parse_while(&mut self) -> Result<'a, StatementNode<'a>> {
        let start = self.start();
        let while_token = self.bump()?;
        let condition = self.parse_namedexpr_test()?;
        let colon = self.expect(TokenKind::Colon)?;
        let body = self.parse_suite()?;
        let else_clause = self.parse_else_clause()?;
        Ok(StatementNode::While(WhileNode {
            span: self.span_from(start),
            while_token,
            condition,
            colon,
            body: Box::new(body),
            else_clause,
        }))
    }

    /// `for_stmt: 'for' exprlist 'in' testlist ':' [TYPE_COMMENT] suite ['else' ':' suite]`
    fn parse_for(
        &mut self,
        async_token: Option<Token<'a>>,
        start: u32,
    ) -> Result<'a, StatementNode<'a>> {
        let for_token = self.expect(TokenKind::For)?;
        let targets = self.parse_expr_list()?;
        let in_token = self.expect(TokenKind::In)?;
        let iter = self.parse_test_list()?;
        let colon = self.expect(TokenKind::Colon)?;
        let body = self.parse_suite()?;
        let else_clause = self.parse_else_clause()?;
        Ok(StatementNode::For(ForNode {
            span: self.span_from(start),
            async_token,
            for_token,
            targets,
            in_token,
            iter,
            colon,
            body: Box::new(body),
            else_clause,
        }))
    }

    /// `try_stmt: 'try' ':' suite ((except_clause ':' suite)+ ['else' ':' suite]
    ///            ['finally' ':' suite] | 'finally' ':' suite)`
    fn parse_try(&mut self) -> Result<'a, StatementNode<'a>> {
        let start = self.start();
        let try_token = self.bump()?;
        let colon = self.expect(TokenKind::Colon)?;
        let body = self.parse_suite()?;

        let mut handlers = Vec::new();
        while self.at(TokenKind::Except) {
            handlers.push(self.parse_except_clause()?);
        }
        let else_clause = if handlers.is_empty() {
            None
        } else {
            self.parse_else_clause()?
        };
        let finally_clause = if self.at(TokenKind::Finally) {
            Some(self.parse_block_clause()?)
        } else {
            None
        };
        if handlers.is_empty() && finally_clause.is_none() {
            return Err(self.error(format!(
                "Expected 'except' or 'finally' block, found {}",
                self.current().describe()
            )));
        }

        Ok(StatementNode::Try(TryNode {
            span: self.span_from(start),
            try_token,
            colon,
            body: Box::new(body),
            handlers,
            else_clause,
            finally_clause,
        }))
    }

    /// `except_clause: 'except' [test ['as' NAME]]`
    fn parse_except_clause(&mut self) -> Result<'a, ExceptClause<'a>> {
        let start = self.start();
        let except = self.bump()?;
        let (test, alias) = if self.at(TokenKind::Colon) {
            (None, None)
        } else {
            let test = self.parse_test()?;
            (Some(test), self.parse_as_name()?)
        };
        let colon = self.expect(TokenKind::Colon)?;
        let body = self.parse_suite()?;
        Ok(ExceptClause {
            span: self.span_from(start),
            except,
            test,
            alias,
            colon,
            body: Box::new(body),
        })
    }

    /// `with_stmt: 'with' with_item (',' with_item)* ':' [TYPE_COMMENT] suite`
    fn parse_with(
        &mut self,
        async_token: Option<Token<'a>>,
        start: u32,
    ) -> Result<'a, StatementNode<'a>> {
        let with_token = self.expect(TokenKind::With)?;
        let mut items = vec![self.parse_with_item()?];
        let mut separators = Vec::new();
        while self.at(TokenKind::Comma) {
            separators.push(self.bump()?);
            items.push(self.parse_with_item()?);
        }
        let colon = self.expect(TokenKind::Colon)?;
        let body = self.parse_suite()?;
        Ok(StatementNode::With(WithNode {
            span: self.span_from(start),
            async_token,
            with_token,
            items,
            separators,
            colon,
            body: Box::new(body),
        }))
    }

    /// `with_item: test ['as' expr]`
    fn parse_with_item(&mut self) -> Result<'a, WithItem<'a>> {
        let start = self.start();
        let context = self.parse_test()?;
        let target = if self.at(TokenKind::As) {
            let as_start = self.start();
            let as_token = self.bump()?;
            let target = self.parse_expr()?;
            Some(AsTarget {
                span: self.span_from(as_start),
                as_token,
                target,
            })
        } else {
            None
        };
        Ok(WithItem {
            span: self.span_from(start),
            context,
            target,
        })
    }

    /// `async_stmt: 'async' (funcdef | with_stmt | for_stmt)`
    fn parse_async_statement(&mut self) -> Result<'a, StatementNode<'a>> {
        let start = self.start();
        let async_token = self.bump()?;
        match self.kind() {
            TokenKind::Def => self.parse_func_def(Vec::new(), Some(async_token), start),
            TokenKind::For => self.parse_for(Some(async_token), start),
            TokenKind::With => self.parse_with(Some(async_token), start),
            _ => Err(self.error(format!(
                "Expected 'def', 'for' or 'with' after 'async', found {}",
                self.current().describe()
            ))),
        }
    }

    /// `decorated: decorator+ (classdef | funcdef | async_funcdef)`
    fn parse_decorated(&mut self) -> Result<'a, StatementNode<'a>> {
        let start = self.start();
        let mut decorators = Vec::new();
        while self.at(TokenKind::At) {
            let decorator_start = self.start();
            let at = self.bump()?;
            let expression = self.parse_namedexpr_test()?;
            let type_comment = self.eat(TokenKind::TypeComment)?;
            let newline = self.expect(TokenKind::Newline)?;
            decorators.push(Decorator {
                span: self.span_from(decorator_start),
                at,
                expression,
                type_comment,
                newline,
            });
        }
        match self.kind() {
            TokenKind::Def => self.parse_func_def(decorators, None, start),
            TokenKind::Class => self.parse_class_def(decorators, start),
            TokenKind::Async => {
                let async_token = self.bump()?;
                if !self.at(TokenKind::Def) {
                    return Err(self.error(format!(
                        "Expected 'def' after 'async', found {}",
                        self.current().describe()
                    )));
                }
                self.parse_func_def(decorators, Some(async_token), start)
            }
            _ => Err(self.error(format!(
                "Expected 'def' or 'class' after decorator, found {}",
                self.current().describe()
            ))),
        }
    }

    /// `funcdef: 'def' NAME '(' [typedargslist] ')' ['->' test] ':' [TYPE_COMMENT] suite`
    fn parse_func_def(
        &mut self,
        decorators: Vec<Decorator<'a>>,
        async_token: Option<Token<'a>>,
        start: u32,
    ) -> Result<'a, StatementNode<'a>> {
        let def = self.expect(TokenKind::Def)?;
        let name = self.expect(TokenKind::Name)?;
        let open = self.expect(TokenKind::LeftParen)?;
        let params = if self.at(TokenKind::RightParen) {
            None
        } else {
            Some(Box::new(self.parse_typed_args_list()?))
        };
        let close = self.expect(TokenKind::RightParen)?;
        let returns = if self.at(TokenKind::Arrow) {
            let returns_start = self.start();
            let arrow = self.bump()?;
            let value = self.parse_test()?;
            Some(ReturnAnnotation {
                span: self.span_from(returns_start),
                arrow,
                value,
            })
        } else {
            None
        };
        let colon = self.expect(TokenKind::Colon)?;
        let body = self.parse_suite()?;
        Ok(StatementNode::FuncDef(FuncDefNode {
            span: self.span_from(start),
            decorators,
            async_token,
            def,
            name,
            open,
            params,
            close,
            returns,
            colon,
            body: Box::new(body),
        }))
    }

    /// `classdef: 'class' NAME ['(' [arglist] ')'] ':' suite`
    fn parse_class_def(
        &mut self,
        decorators: Vec<Decorator<'a>>,
        start: u32,
    ) -> Result<'a, StatementNode<'a>> {
        let class = self.expect(TokenKind::Class)?;
        let name = self.expect(TokenKind::Name)?;
        let (open, arguments, close) = match self.eat(TokenKind::LeftParen)? {
            Some(open) => {
                let arguments = if self.at(TokenKind::RightParen) {
                    None
                } else {
                    Some(self.parse_arg_list()?)
                };
                let close = self.expect(TokenKind::RightParen)?;
                (Some(open), arguments, Some(close))
            }
            None => (None, None, None),
        };
        let colon = self.expect(TokenKind::Colon)?;
        let body = self.parse_suite()?;
        Ok(StatementNode::ClassDef(ClassDefNode {
            span: self.span_from(start),
            decorators,
            class,
            name,
            open,
            arguments,
            close,
            colon,
            body: Box::new(body),
        }))
    }
}
