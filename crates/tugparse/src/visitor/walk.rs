// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Walk functions: visit a node's children and tokens in source order.
//!
//! Every walk function returns `ControlFlow::Break(())` as soon as the
//! visitor asks to stop, so callers can propagate with `?`.

use std::ops::ControlFlow;

use super::traits::{VisitResult, Visitor};
use crate::nodes::{
    AsName, BlockClause, Decorator, DottedAsName, DottedName, EvalInputNode, ExceptClause,
    ExpressionNode, FuncTypeInputNode, ImportAsName, ImportTargets, ModuleNode, SequenceNode,
    StatementNode, WithItem,
};
use crate::tokenizer::Token;

type Flow = ControlFlow<()>;

const CONTINUE: Flow = ControlFlow::Continue(());

// ============================================================================
// Roots
// ============================================================================

pub fn walk_module<'a, V: Visitor<'a>>(visitor: &mut V, node: &ModuleNode<'a>) -> Flow {
    for statement in &node.statements {
        walk_statement(visitor, statement)?;
    }
    walk_token(visitor, &node.end_of_file)
}

pub fn walk_eval_input<'a, V: Visitor<'a>>(visitor: &mut V, node: &EvalInputNode<'a>) -> Flow {
    walk_expression(visitor, &node.body)?;
    walk_tokens(visitor, &node.newlines)?;
    walk_token(visitor, &node.end_of_file)
}

pub fn walk_func_type_input<'a, V: Visitor<'a>>(
    visitor: &mut V,
    node: &FuncTypeInputNode<'a>,
) -> Flow {
    walk_token(visitor, &node.open)?;
    walk_optional_expression(visitor, node.argument_types.as_ref())?;
    walk_token(visitor, &node.close)?;
    walk_token(visitor, &node.arrow)?;
    walk_expression(visitor, &node.returns)?;
    walk_tokens(visitor, &node.newlines)?;
    walk_token(visitor, &node.end_of_file)
}

// ============================================================================
// Helpers
// ============================================================================

pub fn walk_token<'a, V: Visitor<'a>>(visitor: &mut V, token: &Token<'a>) -> Flow {
    match visitor.visit_token(token) {
        VisitResult::Stop => ControlFlow::Break(()),
        VisitResult::Continue | VisitResult::SkipChildren => CONTINUE,
    }
}

fn walk_tokens<'a, V: Visitor<'a>>(visitor: &mut V, tokens: &[Token<'a>]) -> Flow {
    for token in tokens {
        walk_token(visitor, token)?;
    }
    CONTINUE
}

fn walk_optional_token<'a, V: Visitor<'a>>(visitor: &mut V, token: Option<&Token<'a>>) -> Flow {
    match token {
        Some(token) => walk_token(visitor, token),
        None => CONTINUE,
    }
}

fn walk_optional_expression<'a, V: Visitor<'a>>(
    visitor: &mut V,
    node: Option<&ExpressionNode<'a>>,
) -> Flow {
    match node {
        Some(node) => walk_expression(visitor, node),
        None => CONTINUE,
    }
}

fn walk_optional_statement<'a, V: Visitor<'a>>(
    visitor: &mut V,
    node: Option<&StatementNode<'a>>,
) -> Flow {
    match node {
        Some(node) => walk_statement(visitor, node),
        None => CONTINUE,
    }
}

/// Walk `items[0] separators[0] items[1] separators[1] ...`.
fn walk_separated<'a, V: Visitor<'a>, T>(
    visitor: &mut V,
    items: &[T],
    separators: &[Token<'a>],
    mut walk_item: impl FnMut(&mut V, &T) -> Flow,
) -> Flow {
    for (index, item) in items.iter().enumerate() {
        walk_item(visitor, item)?;
        walk_optional_token(visitor, separators.get(index))?;
    }
    CONTINUE
}

fn walk_sequence<'a, V: Visitor<'a>>(visitor: &mut V, node: &SequenceNode<'a>) -> Flow {
    walk_separated(visitor, &node.elements, &node.separators, |v, element| {
        walk_expression(v, element)
    })
}

// ============================================================================
// Expressions
// ============================================================================

pub fn walk_expression<'a, V: Visitor<'a>>(visitor: &mut V, node: &ExpressionNode<'a>) -> Flow {
    match visitor.visit_expression(node) {
        VisitResult::Stop => return ControlFlow::Break(()),
        VisitResult::SkipChildren => {}
        VisitResult::Continue => walk_expression_children(visitor, node)?,
    }
    visitor.leave_expression(node);
    CONTINUE
}

fn walk_expression_children<'a, V: Visitor<'a>>(
    visitor: &mut V,
    node: &ExpressionNode<'a>,
) -> Flow {
    use ExpressionNode as E;

    match node {
        E::Name(n) | E::Number(n) | E::Ellipsis(n) | E::None(n) | E::True(n) | E::False(n) => {
            walk_token(visitor, &n.token)
        }
        E::String(n) => walk_tokens(visitor, &n.tokens),
        E::Tuple(n) | E::List(n) | E::Dictionary(n) | E::Set(n) | E::Call(n) | E::Index(n) => {
            walk_token(visitor, &n.open)?;
            walk_optional_expression(visitor, n.body.as_deref())?;
            walk_token(visitor, &n.close)
        }
        E::AtomExpr(n) => {
            walk_optional_token(visitor, n.await_token.as_ref())?;
            walk_expression(visitor, &n.atom)?;
            for trailer in &n.trailers {
                walk_expression(visitor, trailer)?;
            }
            CONTINUE
        }
        E::DotName(n) => {
            walk_token(visitor, &n.dot)?;
            walk_token(visitor, &n.name)
        }
        E::Power(n)
        | E::Mul(n)
        | E::MatMul(n)
        | E::Div(n)
        | E::Modulo(n)
        | E::FloorDiv(n)
        | E::Plus(n)
        | E::Minus(n)
        | E::ShiftLeft(n)
        | E::ShiftRight(n)
        | E::BitAnd(n)
        | E::BitXor(n)
        | E::BitOr(n)
        | E::Less(n)
        | E::LessEqual(n)
        | E::Equal(n)
        | E::NotEqual(n)
        | E::Greater(n)
        | E::GreaterEqual(n)
        | E::In(n)
        | E::Is(n)
        | E::And(n)
        | E::Or(n)
        | E::NamedExpr(n) => {
            walk_expression(visitor, &n.left)?;
            walk_token(visitor, &n.op)?;
            walk_expression(visitor, &n.right)
        }
        E::UnaryPlus(n)
        | E::UnaryMinus(n)
        | E::BitInvert(n)
        | E::Not(n)
        | E::StarExpr(n)
        | E::DoubleStarExpr(n) => {
            walk_token(visitor, &n.op)?;
            walk_expression(visitor, &n.operand)
        }
        E::NotIn(n) | E::IsNot(n) => {
            walk_expression(visitor, &n.left)?;
            walk_token(visitor, &n.first)?;
            walk_token(visitor, &n.second)?;
            walk_expression(visitor, &n.right)
        }
        E::Lambda(n) => {
            walk_token(visitor, &n.lambda)?;
            walk_optional_statement(visitor, n.params.as_deref())?;
            walk_token(visitor, &n.colon)?;
            walk_expression(visitor, &n.body)
        }
        E::Conditional(n) => {
            walk_expression(visitor, &n.body)?;
            walk_token(visitor, &n.if_token)?;
            walk_expression(visitor, &n.condition)?;
            walk_token(visitor, &n.else_token)?;
            walk_expression(visitor, &n.orelse)
        }
        E::Yield(n) => {
            walk_token(visitor, &n.yield_token)?;
            walk_optional_expression(visitor, n.value.as_deref())
        }
        E::YieldFrom(n) => {
            walk_token(visitor, &n.yield_token)?;
            walk_token(visitor, &n.from_token)?;
            walk_expression(visitor, &n.value)
        }
        E::Comprehension(n) => {
            walk_expression(visitor, &n.element)?;
            walk_expression(visitor, &n.comp_for)
        }
        E::CompFor(n) => {
            walk_optional_token(visitor, n.async_token.as_ref())?;
            walk_token(visitor, &n.for_token)?;
            walk_expression(visitor, &n.targets)?;
            walk_token(visitor, &n.in_token)?;
            walk_expression(visitor, &n.iter)?;
            walk_optional_expression(visitor, n.next.as_deref())
        }
        E::CompIf(n) => {
            walk_token(visitor, &n.if_token)?;
            walk_expression(visitor, &n.condition)?;
            walk_optional_expression(visitor, n.next.as_deref())
        }
        E::DictEntry(n) => {
            walk_expression(visitor, &n.key)?;
            walk_token(visitor, &n.colon)?;
            walk_expression(visitor, &n.value)
        }
        E::Argument(n) => {
            walk_expression(visitor, &n.name)?;
            walk_token(visitor, &n.equal)?;
            walk_expression(visitor, &n.value)
        }
        E::Slice(n) => {
            walk_optional_expression(visitor, n.start.as_deref())?;
            walk_token(visitor, &n.first_colon)?;
            walk_optional_expression(visitor, n.stop.as_deref())?;
            walk_optional_token(visitor, n.second_colon.as_ref())?;
            walk_optional_expression(visitor, n.step.as_deref())
        }
        E::TestList(n)
        | E::ExprList(n)
        | E::TestListComp(n)
        | E::SubscriptList(n)
        | E::ArgList(n)
        | E::DictMaker(n)
        | E::SetMaker(n)
        | E::TypeList(n) => walk_sequence(visitor, n),
    }
}

// ============================================================================
// Statements
// ============================================================================

pub fn walk_statement<'a, V: Visitor<'a>>(visitor: &mut V, node: &StatementNode<'a>) -> Flow {
    match visitor.visit_statement(node) {
        VisitResult::Stop => return ControlFlow::Break(()),
        VisitResult::SkipChildren => {}
        VisitResult::Continue => walk_statement_children(visitor, node)?,
    }
    visitor.leave_statement(node);
    CONTINUE
}

fn walk_statement_children<'a, V: Visitor<'a>>(
    visitor: &mut V,
    node: &StatementNode<'a>,
) -> Flow {
    use StatementNode as S;

    match node {
        S::Simple(n) => {
            walk_separated(visitor, &n.statements, &n.semicolons, |v, statement| {
                walk_statement(v, statement)
            })?;
            walk_optional_token(visitor, n.type_comment.as_ref())?;
            walk_optional_token(visitor, n.newline.as_ref())
        }
        S::Expression(n) => walk_expression(visitor, &n.value),
        S::TestListStarExpr(n) => walk_sequence(visitor, n),
        S::Assign(n) => {
            walk_separated(visitor, &n.targets, &n.operators, |v, target| {
                walk_statement(v, target)
            })?;
            walk_statement(visitor, &n.value)
        }
        S::AnnAssign(n) => {
            walk_expression(visitor, &n.target)?;
            walk_token(visitor, &n.colon)?;
            walk_expression(visitor, &n.annotation)?;
            if let Some(value) = &n.value {
                walk_token(visitor, &value.assign)?;
                walk_statement(visitor, &value.value)?;
            }
            CONTINUE
        }
        S::AugAssign(n) => {
            walk_expression(visitor, &n.target)?;
            walk_token(visitor, &n.op)?;
            walk_statement(visitor, &n.value)
        }
        S::Pass(n) | S::Break(n) | S::Continue(n) | S::PositionalOnly(n) => {
            walk_token(visitor, &n.token)
        }
        S::Return(n) => {
            walk_token(visitor, &n.keyword)?;
            walk_optional_statement(visitor, n.value.as_deref())
        }
        S::Raise(n) => {
            walk_token(visitor, &n.keyword)?;
            walk_optional_expression(visitor, n.exception.as_ref())?;
            if let Some(cause) = &n.cause {
                walk_token(visitor, &cause.from)?;
                walk_expression(visitor, &cause.value)?;
            }
            CONTINUE
        }
        S::Del(n) => {
            walk_token(visitor, &n.keyword)?;
            walk_expression(visitor, &n.targets)
        }
        S::Global(n) | S::Nonlocal(n) => {
            walk_token(visitor, &n.keyword)?;
            walk_separated(visitor, &n.names, &n.separators, |v, name| walk_token(v, name))
        }
        S::Assert(n) => {
            walk_token(visitor, &n.keyword)?;
            walk_expression(visitor, &n.test)?;
            if let Some(message) = &n.message {
                walk_token(visitor, &message.comma)?;
                walk_expression(visitor, &message.value)?;
            }
            CONTINUE
        }
        S::Import(n) => {
            walk_token(visitor, &n.keyword)?;
            walk_separated(visitor, &n.names, &n.separators, walk_dotted_as_name)
        }
        S::ImportFrom(n) => {
            walk_token(visitor, &n.from)?;
            walk_tokens(visitor, &n.dots)?;
            if let Some(module) = &n.module {
                walk_dotted_name(visitor, module)?;
            }
            walk_token(visitor, &n.import)?;
            match &n.targets {
                ImportTargets::Star(star) => walk_token(visitor, star),
                ImportTargets::Names(names) => {
                    walk_optional_token(visitor, names.open.as_ref())?;
                    walk_separated(visitor, &names.names, &names.separators, walk_import_as_name)?;
                    walk_optional_token(visitor, names.close.as_ref())
                }
            }
        }
        S::If(n) => {
            walk_token(visitor, &n.if_token)?;
            walk_expression(visitor, &n.condition)?;
            walk_token(visitor, &n.colon)?;
            walk_statement(visitor, &n.body)?;
            for clause in &n.elif_clauses {
                walk_token(visitor, &clause.elif)?;
                walk_expression(visitor, &clause.condition)?;
                walk_token(visitor, &clause.colon)?;
                walk_statement(visitor, &clause.body)?;
            }
            walk_block_clause(visitor, n.else_clause.as_ref())
        }
        S::While(n) => {
            walk_token(visitor, &n.while_token)?;
            walk_expression(visitor, &n.condition)?;
            walk_token(visitor, &n.colon)?;
            walk_statement(visitor, &n.body)?;
            walk_block_clause(visitor, n.else_clause.as_ref())
        }
        S::For(n) => {
            walk_optional_token(visitor, n.async_token.as_ref())?;
            walk_token(visitor, &n.for_token)?;
            walk_expression(visitor, &n.targets)?;
            walk_token(visitor, &n.in_token)?;
            walk_expression(visitor, &n.iter)?;
            walk_token(visitor, &n.colon)?;
            walk_statement(visitor, &n.body)?;
            walk_block_clause(visitor, n.else_clause.as_ref())
        }
        S::Try(n) => {
            walk_token(visitor, &n.try_token)?;
            walk_token(visitor, &n.colon)?;
            walk_statement(visitor, &n.body)?;
            for handler in &n.handlers {
                walk_except_clause(visitor, handler)?;
            }
            walk_block_clause(visitor, n.else_clause.as_ref())?;
            walk_block_clause(visitor, n.finally_clause.as_ref())
        }
        S::With(n) => {
            walk_optional_token(visitor, n.async_token.as_ref())?;
            walk_token(visitor, &n.with_token)?;
            walk_separated(visitor, &n.items, &n.separators, walk_with_item)?;
            walk_token(visitor, &n.colon)?;
            walk_statement(visitor, &n.body)
        }
        S::FuncDef(n) => {
            for decorator in &n.decorators {
                walk_decorator(visitor, decorator)?;
            }
            walk_optional_token(visitor, n.async_token.as_ref())?;
            walk_token(visitor, &n.def)?;
            walk_token(visitor, &n.name)?;
            walk_token(visitor, &n.open)?;
            walk_optional_statement(visitor, n.params.as_deref())?;
            walk_token(visitor, &n.close)?;
            if let Some(returns) = &n.returns {
                walk_token(visitor, &returns.arrow)?;
                walk_expression(visitor, &returns.value)?;
            }
            walk_token(visitor, &n.colon)?;
            walk_statement(visitor, &n.body)
        }
        S::ClassDef(n) => {
            for decorator in &n.decorators {
                walk_decorator(visitor, decorator)?;
            }
            walk_token(visitor, &n.class)?;
            walk_token(visitor, &n.name)?;
            walk_optional_token(visitor, n.open.as_ref())?;
            walk_optional_expression(visitor, n.arguments.as_ref())?;
            walk_optional_token(visitor, n.close.as_ref())?;
            walk_token(visitor, &n.colon)?;
            walk_statement(visitor, &n.body)
        }
        S::Suite(n) => {
            walk_optional_token(visitor, n.type_comment.as_ref())?;
            walk_token(visitor, &n.newline)?;
            walk_token(visitor, &n.indent)?;
            for statement in &n.statements {
                walk_statement(visitor, statement)?;
            }
            walk_token(visitor, &n.dedent)
        }
        S::VarArgsList(n) | S::TypedArgsList(n) => {
            walk_separated(visitor, &n.params, &n.separators, |v, param| {
                walk_statement(v, param)
            })
        }
        S::VfpDef(n) => {
            walk_token(visitor, &n.name)?;
            if let Some(annotation) = &n.annotation {
                walk_token(visitor, &annotation.colon)?;
                walk_expression(visitor, &annotation.value)?;
            }
            CONTINUE
        }
        S::VfpDefAssign(n) => {
            walk_statement(visitor, &n.param)?;
            walk_token(visitor, &n.assign)?;
            walk_expression(visitor, &n.default)
        }
        S::StarParam(n) => {
            walk_token(visitor, &n.star)?;
            walk_optional_statement(visitor, n.param.as_deref())
        }
        S::DoubleStarParam(n) => {
            walk_token(visitor, &n.op)?;
            walk_statement(visitor, &n.param)
        }
    }
}

fn walk_block_clause<'a, V: Visitor<'a>>(
    visitor: &mut V,
    clause: Option<&BlockClause<'a>>,
) -> Flow {
    let Some(clause) = clause else {
        return CONTINUE;
    };
    walk_token(visitor, &clause.keyword)?;
    walk_token(visitor, &clause.colon)?;
    walk_statement(visitor, &clause.body)
}

fn walk_except_clause<'a, V: Visitor<'a>>(visitor: &mut V, clause: &ExceptClause<'a>) -> Flow {
    walk_token(visitor, &clause.except)?;
    walk_optional_expression(visitor, clause.test.as_ref())?;
    walk_as_name(visitor, clause.alias.as_ref())?;
    walk_token(visitor, &clause.colon)?;
    walk_statement(visitor, &clause.body)
}

fn walk_with_item<'a, V: Visitor<'a>>(visitor: &mut V, item: &WithItem<'a>) -> Flow {
    walk_expression(visitor, &item.context)?;
    if let Some(target) = &item.target {
        walk_token(visitor, &target.as_token)?;
        walk_expression(visitor, &target.target)?;
    }
    CONTINUE
}

fn walk_decorator<'a, V: Visitor<'a>>(visitor: &mut V, decorator: &Decorator<'a>) -> Flow {
    walk_token(visitor, &decorator.at)?;
    walk_expression(visitor, &decorator.expression)?;
    walk_optional_token(visitor, decorator.type_comment.as_ref())?;
    walk_token(visitor, &decorator.newline)
}

fn walk_dotted_name<'a, V: Visitor<'a>>(visitor: &mut V, name: &DottedName<'a>) -> Flow {
    walk_separated(visitor, &name.names, &name.dots, |v, part| walk_token(v, part))
}

fn walk_dotted_as_name<'a, V: Visitor<'a>>(visitor: &mut V, name: &DottedAsName<'a>) -> Flow {
    walk_dotted_name(visitor, &name.name)?;
    walk_as_name(visitor, name.alias.as_ref())
}

fn walk_import_as_name<'a, V: Visitor<'a>>(visitor: &mut V, name: &ImportAsName<'a>) -> Flow {
    walk_token(visitor, &name.name)?;
    walk_as_name(visitor, name.alias.as_ref())
}

fn walk_as_name<'a, V: Visitor<'a>>(visitor: &mut V, alias: Option<&AsName<'a>>) -> Flow {
    let Some(alias) = alias else {
        return CONTINUE;
    };
    walk_token(visitor, &alias.as_token)?;
    walk_token(visitor, &alias.name)
}
