// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Statement nodes, including the parameter-list shapes shared by `def`
//! and `lambda`.

use super::expression::{ExpressionNode, SequenceNode};
use super::traits::Spanned;
use crate::tokenizer::Token;
use tugparse_core::Span;

// ============================================================================
// Simple statements
// ============================================================================

/// One logical line of `;`-separated small statements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleStatementsNode<'a> {
    pub span: Span,
    pub statements: Vec<StatementNode<'a>>,
    pub semicolons: Vec<Token<'a>>,
    pub type_comment: Option<Token<'a>>,
    /// Absent when the line ends at a dedent or at the end of input.
    pub newline: Option<Token<'a>>,
}

/// A bare expression used as a statement (or as one side of an assignment).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpressionStatementNode<'a> {
    pub span: Span,
    pub value: ExpressionNode<'a>,
}

/// `target = target = ... = value`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignNode<'a> {
    pub span: Span,
    pub targets: Vec<StatementNode<'a>>,
    /// One `=` per target.
    pub operators: Vec<Token<'a>>,
    pub value: Box<StatementNode<'a>>,
}

/// The `= value` part of an annotated assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignedValue<'a> {
    pub span: Span,
    pub assign: Token<'a>,
    pub value: Box<StatementNode<'a>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnAssignNode<'a> {
    pub span: Span,
    pub target: ExpressionNode<'a>,
    pub colon: Token<'a>,
    pub annotation: ExpressionNode<'a>,
    pub value: Option<AssignedValue<'a>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AugAssignNode<'a> {
    pub span: Span,
    pub target: ExpressionNode<'a>,
    pub op: Token<'a>,
    pub value: Box<StatementNode<'a>>,
}

/// A statement or marker consisting of exactly one token: `pass`, `break`,
/// `continue`, or the `/` positional-only marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingleTokenNode<'a> {
    pub span: Span,
    pub token: Token<'a>,
}

impl<'a> SingleTokenNode<'a> {
    pub fn new(token: Token<'a>) -> Self {
        Self {
            span: token.span,
            token,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnNode<'a> {
    pub span: Span,
    pub keyword: Token<'a>,
    pub value: Option<Box<StatementNode<'a>>>,
}

/// `from value`, the cause of a `raise`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FromClause<'a> {
    pub span: Span,
    pub from: Token<'a>,
    pub value: ExpressionNode<'a>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RaiseNode<'a> {
    pub span: Span,
    pub keyword: Token<'a>,
    pub exception: Option<ExpressionNode<'a>>,
    pub cause: Option<FromClause<'a>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelNode<'a> {
    pub span: Span,
    pub keyword: Token<'a>,
    pub targets: ExpressionNode<'a>,
}

/// `global a, b` or `nonlocal a, b`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameListNode<'a> {
    pub span: Span,
    pub keyword: Token<'a>,
    pub names: Vec<Token<'a>>,
    pub separators: Vec<Token<'a>>,
}

/// `, message` in an `assert`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssertMessage<'a> {
    pub span: Span,
    pub comma: Token<'a>,
    pub value: ExpressionNode<'a>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssertNode<'a> {
    pub span: Span,
    pub keyword: Token<'a>,
    pub test: ExpressionNode<'a>,
    pub message: Option<AssertMessage<'a>>,
}

// ============================================================================
// Imports
// ============================================================================

/// `a.b.c`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DottedName<'a> {
    pub span: Span,
    pub names: Vec<Token<'a>>,
    pub dots: Vec<Token<'a>>,
}

impl DottedName<'_> {
    /// The dotted path without trivia, e.g. `os.path`.
    pub fn dotted(&self) -> String {
        self.names
            .iter()
            .map(|name| name.text)
            .collect::<Vec<_>>()
            .join(".")
    }
}

/// `as name`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsName<'a> {
    pub span: Span,
    pub as_token: Token<'a>,
    pub name: Token<'a>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DottedAsName<'a> {
    pub span: Span,
    pub name: DottedName<'a>,
    pub alias: Option<AsName<'a>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportNode<'a> {
    pub span: Span,
    pub keyword: Token<'a>,
    pub names: Vec<DottedAsName<'a>>,
    pub separators: Vec<Token<'a>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportAsName<'a> {
    pub span: Span,
    pub name: Token<'a>,
    pub alias: Option<AsName<'a>>,
}

/// The names after `from ... import`, optionally parenthesized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportNamesNode<'a> {
    pub span: Span,
    pub open: Option<Token<'a>>,
    pub names: Vec<ImportAsName<'a>>,
    pub separators: Vec<Token<'a>>,
    pub close: Option<Token<'a>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportTargets<'a> {
    Star(Token<'a>),
    Names(ImportNamesNode<'a>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportFromNode<'a> {
    pub span: Span,
    pub from: Token<'a>,
    /// Leading `.` and `...` tokens of a relative import.
    pub dots: Vec<Token<'a>>,
    pub module: Option<DottedName<'a>>,
    pub import: Token<'a>,
    pub targets: ImportTargets<'a>,
}

// ============================================================================
// Compound statements
// ============================================================================

/// `keyword : body`, for `else` and `finally` clauses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockClause<'a> {
    pub span: Span,
    pub keyword: Token<'a>,
    pub colon: Token<'a>,
    pub body: Box<StatementNode<'a>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElifClause<'a> {
    pub span: Span,
    pub elif: Token<'a>,
    pub condition: ExpressionNode<'a>,
    pub colon: Token<'a>,
    pub body: Box<StatementNode<'a>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IfNode<'a> {
    pub span: Span,
    pub if_token: Token<'a>,
    pub condition: ExpressionNode<'a>,
    pub colon: Token<'a>,
    pub body: Box<StatementNode<'a>>,
    pub elif_clauses: Vec<ElifClause<'a>>,
    pub else_clause: Option<BlockClause<'a>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhileNode<'a> {
    pub span: Span,
    pub while_token: Token<'a>,
    pub condition: ExpressionNode<'a>,
    pub colon: Token<'a>,
    pub body: Box<StatementNode<'a>>,
    pub else_clause: Option<BlockClause<'a>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForNode<'a> {
    pub span: Span,
    pub async_token: Option<Token<'a>>,
    pub for_token: Token<'a>,
    pub targets: ExpressionNode<'a>,
    pub in_token: Token<'a>,
    pub iter: ExpressionNode<'a>,
    pub colon: Token<'a>,
    pub body: Box<StatementNode<'a>>,
    pub else_clause: Option<BlockClause<'a>>,
}

/// `except test? (as name)? : body`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExceptClause<'a> {
    pub span: Span,
    pub except: Token<'a>,
    pub test: Option<ExpressionNode<'a>>,
    pub alias: Option<AsName<'a>>,
    pub colon: Token<'a>,
    pub body: Box<StatementNode<'a>>,
}

/// At least one of `handlers` and `finally_clause` is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TryNode<'a> {
    pub span: Span,
    pub try_token: Token<'a>,
    pub colon: Token<'a>,
    pub body: Box<StatementNode<'a>>,
    pub handlers: Vec<ExceptClause<'a>>,
    pub else_clause: Option<BlockClause<'a>>,
    pub finally_clause: Option<BlockClause<'a>>,
}

/// `as target` in a `with` item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsTarget<'a> {
    pub span: Span,
    pub as_token: Token<'a>,
    pub target: ExpressionNode<'a>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithItem<'a> {
    pub span: Span,
    pub context: ExpressionNode<'a>,
    pub target: Option<AsTarget<'a>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithNode<'a> {
    pub span: Span,
    pub async_token: Option<Token<'a>>,
    pub with_token: Token<'a>,
    pub items: Vec<WithItem<'a>>,
    pub separators: Vec<Token<'a>>,
    pub colon: Token<'a>,
    pub body: Box<StatementNode<'a>>,
}

/// `@expression [TYPE_COMMENT] NEWLINE`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decorator<'a> {
    pub span: Span,
    pub at: Token<'a>,
    pub expression: ExpressionNode<'a>,
    pub type_comment: Option<Token<'a>>,
    pub newline: Token<'a>,
}

/// `-> value`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnAnnotation<'a> {
    pub span: Span,
    pub arrow: Token<'a>,
    pub value: ExpressionNode<'a>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncDefNode<'a> {
    pub span: Span,
    pub decorators: Vec<Decorator<'a>>,
    pub async_token: Option<Token<'a>>,
    pub def: Token<'a>,
    pub name: Token<'a>,
    pub open: Token<'a>,
    /// A `TypedArgsList`, absent for `def f():`.
    pub params: Option<Box<StatementNode<'a>>>,
    pub close: Token<'a>,
    pub returns: Option<ReturnAnnotation<'a>>,
    pub colon: Token<'a>,
    pub body: Box<StatementNode<'a>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDefNode<'a> {
    pub span: Span,
    pub decorators: Vec<Decorator<'a>>,
    pub class: Token<'a>,
    pub name: Token<'a>,
    pub open: Option<Token<'a>>,
    pub arguments: Option<ExpressionNode<'a>>,
    pub close: Option<Token<'a>>,
    pub colon: Token<'a>,
    pub body: Box<StatementNode<'a>>,
}

/// An indented block: `NEWLINE INDENT statement+ DEDENT`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteNode<'a> {
    pub span: Span,
    pub type_comment: Option<Token<'a>>,
    pub newline: Token<'a>,
    pub indent: Token<'a>,
    pub statements: Vec<StatementNode<'a>>,
    pub dedent: Token<'a>,
}

// ============================================================================
// Parameters
// ============================================================================

/// The parameters of a `def` (`TypedArgsList`) or `lambda` (`VarArgsList`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterListNode<'a> {
    pub span: Span,
    pub params: Vec<StatementNode<'a>>,
    pub separators: Vec<Token<'a>>,
}

/// `: annotation` on a `def` parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation<'a> {
    pub span: Span,
    pub colon: Token<'a>,
    pub value: ExpressionNode<'a>,
}

/// A parameter name with an optional annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VfpDefNode<'a> {
    pub span: Span,
    pub name: Token<'a>,
    pub annotation: Option<Annotation<'a>>,
}

/// `param = default`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VfpDefAssignNode<'a> {
    pub span: Span,
    pub param: Box<StatementNode<'a>>,
    pub assign: Token<'a>,
    pub default: ExpressionNode<'a>,
}

/// `*param` or the bare `*` separator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StarParamNode<'a> {
    pub span: Span,
    pub star: Token<'a>,
    pub param: Option<Box<StatementNode<'a>>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoubleStarParamNode<'a> {
    pub span: Span,
    pub op: Token<'a>,
    pub param: Box<StatementNode<'a>>,
}

// ============================================================================
// StatementNode
// ============================================================================

#[allow(clippy::large_enum_variant)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatementNode<'a> {
    Simple(SimpleStatementsNode<'a>),
    Expression(ExpressionStatementNode<'a>),
    TestListStarExpr(SequenceNode<'a>),
    Assign(AssignNode<'a>),
    AnnAssign(AnnAssignNode<'a>),
    AugAssign(AugAssignNode<'a>),
    Pass(SingleTokenNode<'a>),
    Break(SingleTokenNode<'a>),
    Continue(SingleTokenNode<'a>),
    Return(ReturnNode<'a>),
    Raise(RaiseNode<'a>),
    Del(DelNode<'a>),
    Global(NameListNode<'a>),
    Nonlocal(NameListNode<'a>),
    Assert(AssertNode<'a>),
    Import(ImportNode<'a>),
    ImportFrom(ImportFromNode<'a>),
    If(IfNode<'a>),
    While(WhileNode<'a>),
    For(ForNode<'a>),
    Try(TryNode<'a>),
    With(WithNode<'a>),
    FuncDef(FuncDefNode<'a>),
    ClassDef(ClassDefNode<'a>),
    Suite(SuiteNode<'a>),
    VarArgsList(ParameterListNode<'a>),
    TypedArgsList(ParameterListNode<'a>),
    VfpDef(VfpDefNode<'a>),
    VfpDefAssign(VfpDefAssignNode<'a>),
    StarParam(StarParamNode<'a>),
    DoubleStarParam(DoubleStarParamNode<'a>),
    PositionalOnly(SingleTokenNode<'a>),
}

impl<'a> StatementNode<'a> {
    /// The variant name, for diagnostics and tests.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Simple(_) => "Simple",
            Self::Expression(_) => "Expression",
            Self::TestListStarExpr(_) => "TestListStarExpr",
            Self::Assign(_) => "Assign",
            Self::AnnAssign(_) => "AnnAssign",
            Self::AugAssign(_) => "AugAssign",
            Self::Pass(_) => "Pass",
            Self::Break(_) => "Break",
            Self::Continue(_) => "Continue",
            Self::Return(_) => "Return",
            Self::Raise(_) => "Raise",
            Self::Del(_) => "Del",
            Self::Global(_) => "Global",
            Self::Nonlocal(_) => "Nonlocal",
            Self::Assert(_) => "Assert",
            Self::Import(_) => "Import",
            Self::ImportFrom(_) => "ImportFrom",
            Self::If(_) => "If",
            Self::While(_) => "While",
            Self::For(_) => "For",
            Self::Try(_) => "Try",
            Self::With(_) => "With",
            Self::FuncDef(_) => "FuncDef",
            Self::ClassDef(_) => "ClassDef",
            Self::Suite(_) => "Suite",
            Self::VarArgsList(_) => "VarArgsList",
            Self::TypedArgsList(_) => "TypedArgsList",
            Self::VfpDef(_) => "VfpDef",
            Self::VfpDefAssign(_) => "VfpDefAssign",
            Self::StarParam(_) => "StarParam",
            Self::DoubleStarParam(_) => "DoubleStarParam",
            Self::PositionalOnly(_) => "PositionalOnly",
        }
    }

    /// The statements of a `Simple` line, or a `Suite` block.
    pub fn children(&self) -> &[StatementNode<'a>] {
        match self {
            Self::Simple(n) => &n.statements,
            Self::Suite(n) => &n.statements,
            _ => &[],
        }
    }

    /// Returns whether this is a compound (block-introducing) statement.
    pub fn is_compound(&self) -> bool {
        matches!(
            self,
            Self::If(_)
                | Self::While(_)
                | Self::For(_)
                | Self::Try(_)
                | Self::With(_)
                | Self::FuncDef(_)
                | Self::ClassDef(_)
        )
    }
}

impl Spanned for StatementNode<'_> {
    fn span(&self) -> Span {
        match self {
            Self::Simple(n) => n.span,
            Self::Expression(n) => n.span,
            Self::TestListStarExpr(n) => n.span,
            Self::Assign(n) => n.span,
            Self::AnnAssign(n) => n.span,
            Self::AugAssign(n) => n.span,
            Self::Pass(n) | Self::Break(n) | Self::Continue(n) | Self::PositionalOnly(n) => n.span,
            Self::Return(n) => n.span,
            Self::Raise(n) => n.span,
            Self::Del(n) => n.span,
            Self::Global(n) | Self::Nonlocal(n) => n.span,
            Self::Assert(n) => n.span,
            Self::Import(n) => n.span,
            Self::ImportFrom(n) => n.span,
            Self::If(n) => n.span,
            Self::While(n) => n.span,
            Self::For(n) => n.span,
            Self::Try(n) => n.span,
            Self::With(n) => n.span,
            Self::FuncDef(n) => n.span,
            Self::ClassDef(n) => n.span,
            Self::Suite(n) => n.span,
            Self::VarArgsList(n) | Self::TypedArgsList(n) => n.span,
            Self::VfpDef(n) => n.span,
            Self::VfpDefAssign(n) => n.span,
            Self::StarParam(n) => n.span,
            Self::DoubleStarParam(n) => n.span,
        }
    }
}
