// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Expression nodes.
//!
//! [`ExpressionNode`] is one closed enum with a variant per grammar shape.
//! Variants that share a layout share a payload struct: every binary
//! operator is a [`BinaryNode`], every bracketed container a
//! [`BracketNode`], every comma sequence a [`SequenceNode`].

use super::statement::StatementNode;
use super::traits::Spanned;
use crate::tokenizer::Token;
use tugparse_core::Span;

/// A node wrapping exactly one token: names, numbers and constants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafNode<'a> {
    pub span: Span,
    pub token: Token<'a>,
}

impl<'a> LeafNode<'a> {
    pub fn new(token: Token<'a>) -> Self {
        Self {
            span: token.span,
            token,
        }
    }

    /// The token's source text.
    pub fn text(&self) -> &'a str {
        self.token.text
    }
}

/// One or more adjacent string literal tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringNode<'a> {
    pub span: Span,
    pub tokens: Vec<Token<'a>>,
}

/// `open body? close`, for tuples, lists, dicts, sets, calls and subscripts.
///
/// For `Call` and `Index` the callee is not stored here; it is the preceding
/// element of the enclosing [`AtomExprNode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BracketNode<'a> {
    pub span: Span,
    pub open: Token<'a>,
    pub body: Option<Box<ExpressionNode<'a>>>,
    pub close: Token<'a>,
}

/// An atom followed by trailers, optionally preceded by `await`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtomExprNode<'a> {
    pub span: Span,
    pub await_token: Option<Token<'a>>,
    pub atom: Box<ExpressionNode<'a>>,
    /// `DotName`, `Call` and `Index` nodes, in source order.
    pub trailers: Vec<ExpressionNode<'a>>,
}

/// A `.name` trailer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotNameNode<'a> {
    pub span: Span,
    pub dot: Token<'a>,
    pub name: Token<'a>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryNode<'a> {
    pub span: Span,
    pub left: Box<ExpressionNode<'a>>,
    pub op: Token<'a>,
    pub right: Box<ExpressionNode<'a>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnaryNode<'a> {
    pub span: Span,
    pub op: Token<'a>,
    pub operand: Box<ExpressionNode<'a>>,
}

/// A binary operator spelled with two keywords: `not in`, `is not`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundOpNode<'a> {
    pub span: Span,
    pub left: Box<ExpressionNode<'a>>,
    pub first: Token<'a>,
    pub second: Token<'a>,
    pub right: Box<ExpressionNode<'a>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LambdaNode<'a> {
    pub span: Span,
    pub lambda: Token<'a>,
    /// A `VarArgsList`, absent for `lambda: ...`.
    pub params: Option<Box<StatementNode<'a>>>,
    pub colon: Token<'a>,
    pub body: Box<ExpressionNode<'a>>,
}

/// `body if condition else orelse`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionalNode<'a> {
    pub span: Span,
    pub body: Box<ExpressionNode<'a>>,
    pub if_token: Token<'a>,
    pub condition: Box<ExpressionNode<'a>>,
    pub else_token: Token<'a>,
    pub orelse: Box<ExpressionNode<'a>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YieldNode<'a> {
    pub span: Span,
    pub yield_token: Token<'a>,
    pub value: Option<Box<ExpressionNode<'a>>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YieldFromNode<'a> {
    pub span: Span,
    pub yield_token: Token<'a>,
    pub from_token: Token<'a>,
    pub value: Box<ExpressionNode<'a>>,
}

/// An element followed by a `for` clause chain.
///
/// The enclosing brackets decide what is built: a generator in `()`, a list
/// comprehension in `[]`, a set or dict comprehension in `{}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComprehensionNode<'a> {
    pub span: Span,
    pub element: Box<ExpressionNode<'a>>,
    /// Always a `CompFor`.
    pub comp_for: Box<ExpressionNode<'a>>,
}

/// `async? for targets in iter` followed by an optional `for`/`if` clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompForNode<'a> {
    pub span: Span,
    pub async_token: Option<Token<'a>>,
    pub for_token: Token<'a>,
    pub targets: Box<ExpressionNode<'a>>,
    pub in_token: Token<'a>,
    pub iter: Box<ExpressionNode<'a>>,
    pub next: Option<Box<ExpressionNode<'a>>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompIfNode<'a> {
    pub span: Span,
    pub if_token: Token<'a>,
    pub condition: Box<ExpressionNode<'a>>,
    pub next: Option<Box<ExpressionNode<'a>>>,
}

/// `key: value` inside a dict display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictEntryNode<'a> {
    pub span: Span,
    pub key: Box<ExpressionNode<'a>>,
    pub colon: Token<'a>,
    pub value: Box<ExpressionNode<'a>>,
}

/// A keyword argument `name=value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentNode<'a> {
    pub span: Span,
    pub name: Box<ExpressionNode<'a>>,
    pub equal: Token<'a>,
    pub value: Box<ExpressionNode<'a>>,
}

/// `start? : stop? (: step?)?`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliceNode<'a> {
    pub span: Span,
    pub start: Option<Box<ExpressionNode<'a>>>,
    pub first_colon: Token<'a>,
    pub stop: Option<Box<ExpressionNode<'a>>>,
    pub second_colon: Option<Token<'a>>,
    pub step: Option<Box<ExpressionNode<'a>>>,
}

/// A comma-separated sequence.
///
/// `separators` holds every comma in order, so a trailing comma is the case
/// where `separators.len() == elements.len()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceNode<'a> {
    pub span: Span,
    pub elements: Vec<ExpressionNode<'a>>,
    pub separators: Vec<Token<'a>>,
}

impl SequenceNode<'_> {
    pub fn has_trailing_separator(&self) -> bool {
        !self.elements.is_empty() && self.separators.len() == self.elements.len()
    }
}

#[allow(clippy::large_enum_variant)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpressionNode<'a> {
    // Atoms
    Name(LeafNode<'a>),
    Number(LeafNode<'a>),
    String(StringNode<'a>),
    Ellipsis(LeafNode<'a>),
    None(LeafNode<'a>),
    True(LeafNode<'a>),
    False(LeafNode<'a>),
    Tuple(BracketNode<'a>),
    List(BracketNode<'a>),
    Dictionary(BracketNode<'a>),
    Set(BracketNode<'a>),

    // Trailers
    AtomExpr(AtomExprNode<'a>),
    DotName(DotNameNode<'a>),
    Call(BracketNode<'a>),
    Index(BracketNode<'a>),

    // Arithmetic
    Power(BinaryNode<'a>),
    UnaryPlus(UnaryNode<'a>),
    UnaryMinus(UnaryNode<'a>),
    BitInvert(UnaryNode<'a>),
    Mul(BinaryNode<'a>),
    MatMul(BinaryNode<'a>),
    Div(BinaryNode<'a>),
    Modulo(BinaryNode<'a>),
    FloorDiv(BinaryNode<'a>),
    Plus(BinaryNode<'a>),
    Minus(BinaryNode<'a>),
    ShiftLeft(BinaryNode<'a>),
    ShiftRight(BinaryNode<'a>),
    BitAnd(BinaryNode<'a>),
    BitXor(BinaryNode<'a>),
    BitOr(BinaryNode<'a>),

    // Comparison
    Less(BinaryNode<'a>),
    LessEqual(BinaryNode<'a>),
    Equal(BinaryNode<'a>),
    /// `!=` or `<>`
    NotEqual(BinaryNode<'a>),
    Greater(BinaryNode<'a>),
    GreaterEqual(BinaryNode<'a>),
    In(BinaryNode<'a>),
    NotIn(CompoundOpNode<'a>),
    Is(BinaryNode<'a>),
    IsNot(CompoundOpNode<'a>),

    // Boolean
    Not(UnaryNode<'a>),
    And(BinaryNode<'a>),
    Or(BinaryNode<'a>),

    Lambda(LambdaNode<'a>),
    Conditional(ConditionalNode<'a>),
    NamedExpr(BinaryNode<'a>),
    StarExpr(UnaryNode<'a>),
    DoubleStarExpr(UnaryNode<'a>),
    Yield(YieldNode<'a>),
    YieldFrom(YieldFromNode<'a>),

    // Comprehensions
    Comprehension(ComprehensionNode<'a>),
    CompFor(CompForNode<'a>),
    CompIf(CompIfNode<'a>),

    // Container parts
    DictEntry(DictEntryNode<'a>),
    Argument(ArgumentNode<'a>),
    Slice(SliceNode<'a>),

    // Sequences
    TestList(SequenceNode<'a>),
    ExprList(SequenceNode<'a>),
    TestListComp(SequenceNode<'a>),
    SubscriptList(SequenceNode<'a>),
    ArgList(SequenceNode<'a>),
    DictMaker(SequenceNode<'a>),
    SetMaker(SequenceNode<'a>),
    TypeList(SequenceNode<'a>),
}

impl<'a> ExpressionNode<'a> {
    /// The variant name, for diagnostics and tests.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Name(_) => "Name",
            Self::Number(_) => "Number",
            Self::String(_) => "String",
            Self::Ellipsis(_) => "Ellipsis",
            Self::None(_) => "None",
            Self::True(_) => "True",
            Self::False(_) => "False",
            Self::Tuple(_) => "Tuple",
            Self::List(_) => "List",
            Self::Dictionary(_) => "Dictionary",
            Self::Set(_) => "Set",
            Self::AtomExpr(_) => "AtomExpr",
            Self::DotName(_) => "DotName",
            Self::Call(_) => "Call",
            Self::Index(_) => "Index",
            Self::Power(_) => "Power",
            Self::UnaryPlus(_) => "UnaryPlus",
            Self::UnaryMinus(_) => "UnaryMinus",
            Self::BitInvert(_) => "BitInvert",
            Self::Mul(_) => "Mul",
            Self::MatMul(_) => "MatMul",
            Self::Div(_) => "Div",
            Self::Modulo(_) => "Modulo",
            Self::FloorDiv(_) => "FloorDiv",
            Self::Plus(_) => "Plus",
            Self::Minus(_) => "Minus",
            Self::ShiftLeft(_) => "ShiftLeft",
            Self::ShiftRight(_) => "ShiftRight",
            Self::BitAnd(_) => "BitAnd",
            Self::BitXor(_) => "BitXor",
            Self::BitOr(_) => "BitOr",
            Self::Less(_) => "Less",
            Self::LessEqual(_) => "LessEqual",
            Self::Equal(_) => "Equal",
            Self::NotEqual(_) => "NotEqual",
            Self::Greater(_) => "Greater",
            Self::GreaterEqual(_) => "GreaterEqual",
            Self::In(_) => "In",
            Self::NotIn(_) => "NotIn",
            Self::Is(_) => "Is",
            Self::IsNot(_) => "IsNot",
            Self::Not(_) => "Not",
            Self::And(_) => "And",
            Self::Or(_) => "Or",
            Self::Lambda(_) => "Lambda",
            Self::Conditional(_) => "Conditional",
            Self::NamedExpr(_) => "NamedExpr",
            Self::StarExpr(_) => "StarExpr",
            Self::DoubleStarExpr(_) => "DoubleStarExpr",
            Self::Yield(_) => "Yield",
            Self::YieldFrom(_) => "YieldFrom",
            Self::Comprehension(_) => "Comprehension",
            Self::CompFor(_) => "CompFor",
            Self::CompIf(_) => "CompIf",
            Self::DictEntry(_) => "DictEntry",
            Self::Argument(_) => "Argument",
            Self::Slice(_) => "Slice",
            Self::TestList(_) => "TestList",
            Self::ExprList(_) => "ExprList",
            Self::TestListComp(_) => "TestListComp",
            Self::SubscriptList(_) => "SubscriptList",
            Self::ArgList(_) => "ArgList",
            Self::DictMaker(_) => "DictMaker",
            Self::SetMaker(_) => "SetMaker",
            Self::TypeList(_) => "TypeList",
        }
    }

    /// The payload of a binary operator variant.
    pub fn as_binary(&self) -> Option<&BinaryNode<'a>> {
        match self {
            Self::Power(n)
            | Self::Mul(n)
            | Self::MatMul(n)
            | Self::Div(n)
            | Self::Modulo(n)
            | Self::FloorDiv(n)
            | Self::Plus(n)
            | Self::Minus(n)
            | Self::ShiftLeft(n)
            | Self::ShiftRight(n)
            | Self::BitAnd(n)
            | Self::BitXor(n)
            | Self::BitOr(n)
            | Self::Less(n)
            | Self::LessEqual(n)
            | Self::Equal(n)
            | Self::NotEqual(n)
            | Self::Greater(n)
            | Self::GreaterEqual(n)
            | Self::In(n)
            | Self::Is(n)
            | Self::And(n)
            | Self::Or(n)
            | Self::NamedExpr(n) => Some(n),
            _ => None,
        }
    }

    /// The payload of a comma-sequence variant.
    pub fn as_sequence(&self) -> Option<&SequenceNode<'a>> {
        match self {
            Self::TestList(n)
            | Self::ExprList(n)
            | Self::TestListComp(n)
            | Self::SubscriptList(n)
            | Self::ArgList(n)
            | Self::DictMaker(n)
            | Self::SetMaker(n)
            | Self::TypeList(n) => Some(n),
            _ => None,
        }
    }

    /// The payload of a bracketed variant.
    pub fn as_bracket(&self) -> Option<&BracketNode<'a>> {
        match self {
            Self::Tuple(n)
            | Self::List(n)
            | Self::Dictionary(n)
            | Self::Set(n)
            | Self::Call(n)
            | Self::Index(n) => Some(n),
            _ => None,
        }
    }

    /// The identifier, for `Name` nodes.
    pub fn name(&self) -> Option<&'a str> {
        match self {
            Self::Name(leaf) => Some(leaf.text()),
            _ => None,
        }
    }
}

impl Spanned for ExpressionNode<'_> {
    fn span(&self) -> Span {
        match self {
            Self::Name(n)
            | Self::Number(n)
            | Self::Ellipsis(n)
            | Self::None(n)
            | Self::True(n)
            | Self::False(n) => n.span,
            Self::String(n) => n.span,
            Self::Tuple(n)
            | Self::List(n)
            | Self::Dictionary(n)
            | Self::Set(n)
            | Self::Call(n)
            | Self::Index(n) => n.span,
            Self::AtomExpr(n) => n.span,
            Self::DotName(n) => n.span,
            Self::Power(n)
            | Self::Mul(n)
            | Self::MatMul(n)
            | Self::Div(n)
            | Self::Modulo(n)
            | Self::FloorDiv(n)
            | Self::Plus(n)
            | Self::Minus(n)
            | Self::ShiftLeft(n)
            | Self::ShiftRight(n)
            | Self::BitAnd(n)
            | Self::BitXor(n)
            | Self::BitOr(n)
            | Self::Less(n)
            | Self::LessEqual(n)
            | Self::Equal(n)
            | Self::NotEqual(n)
            | Self::Greater(n)
            | Self::GreaterEqual(n)
            | Self::In(n)
            | Self::Is(n)
            | Self::And(n)
            | Self::Or(n)
            | Self::NamedExpr(n) => n.span,
            Self::UnaryPlus(n)
            | Self::UnaryMinus(n)
            | Self::BitInvert(n)
            | Self::Not(n)
            | Self::StarExpr(n)
            | Self::DoubleStarExpr(n) => n.span,
            Self::NotIn(n) | Self::IsNot(n) => n.span,
            Self::Lambda(n) => n.span,
            Self::Conditional(n) => n.span,
            Self::Yield(n) => n.span,
            Self::YieldFrom(n) => n.span,
            Self::Comprehension(n) => n.span,
            Self::CompFor(n) => n.span,
            Self::CompIf(n) => n.span,
            Self::DictEntry(n) => n.span,
            Self::Argument(n) => n.span,
            Self::Slice(n) => n.span,
            Self::TestList(n)
            | Self::ExprList(n)
            | Self::TestListComp(n)
            | Self::SubscriptList(n)
            | Self::ArgList(n)
            | Self::DictMaker(n)
            | Self::SetMaker(n)
            | Self::TypeList(n) => n.span,
        }
    }
}
