// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! A lossless tokenizer and Concrete Syntax Tree (CST) parser for
//! Python-like source.
//!
//! # Overview
//!
//! - **Tokenizing**: [`tokenize`] produces the full token stream. Every token
//!   carries the whitespace, comments and line breaks before it as trivia, so
//!   concatenating prefixes and texts rebuilds the input exactly.
//! - **Parsing**: [`parse_module`], [`parse_expression`] and
//!   [`parse_func_type`] build a typed tree with a byte [`Span`] on every node.
//! - **Code Generation**: [`Codegen`] writes a tree back to source.
//! - **Traversal**: the [`visitor`] module walks trees in source order.
//!
//! # Quick Start
//!
//! ```
//! use tugparse::{parse_module, Codegen, CodegenState};
//!
//! let source = "def hello(): print('world')\n";
//! let module = parse_module(source).expect("parse error");
//!
//! // Round-trip: convert back to source
//! let mut state = CodegenState::default();
//! module.codegen(&mut state);
//! assert_eq!(state.to_string(), source);
//! ```

use tracing::debug;

// ============================================================================
// Public modules and re-exports
// ============================================================================

mod codegen;
pub use codegen::{Codegen, CodegenState};

mod nodes;
pub use nodes::*;

/// Configuration shared by the tokenizer and parser.
pub mod options;
pub use options::{ParseOptions, DEFAULT_TAB_SIZE};

mod parser;
pub use parser::{Parser, ParserError, Result};

/// Tokenizer for Python-like source.
pub mod tokenizer;
pub use tokenizer::{Token, TokenKind, Tokenizer, Trivia, TriviaKind};

/// Visitor infrastructure for tree traversal.
pub mod visitor;
pub use visitor::{
    walk_eval_input, walk_expression, walk_func_type_input, walk_module, walk_statement,
    NodeSpan, SpanCollector, VisitResult, Visitor,
};

pub use tugparse_core::Span;

// ============================================================================
// Entry points
// ============================================================================

/// Tokenizes source text into a vector ending with `EndOfFile`.
///
/// # Errors
///
/// Returns a [`ParserError::LexicalError`] for the first malformed token.
///
/// # Example
///
/// ```
/// use tugparse::{tokenize, TokenKind};
///
/// let tokens = tokenize("x = 1").expect("tokenize error");
/// assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::EndOfFile));
/// ```
pub fn tokenize(text: &str) -> Result<'_, Vec<Token<'_>>> {
    tokenize_with_options(text, ParseOptions::default())
}

/// Tokenizes source text with the given options.
pub fn tokenize_with_options(text: &str, options: ParseOptions) -> Result<'_, Vec<Token<'_>>> {
    debug!(len = text.len(), tab_size = options.tab_size(), "tokenizing");
    let tokens = tokenizer::tokenize(text, &options).inspect_err(|err| {
        debug!(%err, "tokenize failed");
    })?;
    debug!(tokens = tokens.len(), "tokenized");
    Ok(tokens)
}

/// Parses a whole source file.
///
/// # Example
///
/// ```
/// use tugparse::parse_module;
///
/// let module = parse_module("x = 1\n").expect("parse error");
/// assert_eq!(module.statements.len(), 1);
/// ```
pub fn parse_module(text: &str) -> Result<'_, ModuleNode<'_>> {
    parse_module_with_options(text, ParseOptions::default())
}

/// Parses a whole source file with the given options.
///
/// The input is taken as-is: a leading byte order mark is not stripped and
/// becomes a lexical error, since the text is expected to be decoded already.
pub fn parse_module_with_options(text: &str, options: ParseOptions) -> Result<'_, ModuleNode<'_>> {
    debug!(len = text.len(), tab_size = options.tab_size(), "parsing module");
    let module = Parser::new(text, &options)
        .and_then(Parser::parse_module)
        .inspect_err(|err| {
            debug!(%err, "module parse failed");
        })?;
    debug!(statements = module.statements.len(), "parsed module");
    Ok(module)
}

/// Parses an expression list as accepted by `eval`, optionally followed by
/// newlines.
///
/// # Example
///
/// ```
/// use tugparse::{parse_expression, ExpressionNode};
///
/// let input = parse_expression("1 + 2").expect("parse error");
/// assert!(matches!(input.body, ExpressionNode::Plus(_)));
/// ```
pub fn parse_expression(text: &str) -> Result<'_, EvalInputNode<'_>> {
    parse_expression_with_options(text, ParseOptions::default())
}

pub fn parse_expression_with_options(
    text: &str,
    options: ParseOptions,
) -> Result<'_, EvalInputNode<'_>> {
    debug!(len = text.len(), "parsing expression");
    let input = Parser::new(text, &options)
        .and_then(Parser::parse_eval_input)
        .inspect_err(|err| {
            debug!(%err, "expression parse failed");
        })?;
    debug!(kind = input.body.kind_name(), "parsed expression");
    Ok(input)
}

/// Parses a function type signature such as `(int, str) -> bool`.
pub fn parse_func_type(text: &str) -> Result<'_, FuncTypeInputNode<'_>> {
    parse_func_type_with_options(text, ParseOptions::default())
}

pub fn parse_func_type_with_options(
    text: &str,
    options: ParseOptions,
) -> Result<'_, FuncTypeInputNode<'_>> {
    debug!(len = text.len(), "parsing function type");
    let input = Parser::new(text, &options)
        .and_then(Parser::parse_func_type_input)
        .inspect_err(|err| {
            debug!(%err, "function type parse failed");
        })?;
    debug!("parsed function type");
    Ok(input)
}

// ============================================================================
// Error formatting
// ============================================================================

/// Lines of source shown above and below the error line.
const CONTEXT_LINES: u32 = 1;

/// Formats a parser error into a human-readable string with source context.
///
/// # Arguments
///
/// * `err` - The parser error to format.
/// * `source` - The text that was being parsed.
/// * `label` - A label for the error (e.g., file name).
///
/// # Example
///
/// ```
/// use tugparse::{parse_module, prettify_error};
///
/// let source = "def";
/// if let Err(e) = parse_module(source) {
///     let formatted = prettify_error(&e, source, "example.py");
///     assert!(formatted.contains("example.py"));
/// }
/// ```
pub fn prettify_error(err: &ParserError<'_>, source: &str, label: &str) -> String {
    use annotate_snippets::{Level, Renderer, Snippet};
    use tugparse_core::text::LineIndex;

    let index = LineIndex::new(source);
    let source_len = source.len() as u32;
    let offset = err.offset().min(source_len);
    let line = index.line_of(offset).max(1);
    let first_line = line.saturating_sub(CONTEXT_LINES).max(1);
    let window_start = index.line_start(first_line).unwrap_or(0);
    let window_end = index
        .line_start(line + CONTEXT_LINES + 1)
        .unwrap_or(source_len);
    let Some(window) = source.get(window_start as usize..window_end as usize) else {
        return format!("Parse error for {}: {}", label, err);
    };

    let start = (offset - window_start) as usize;
    let end = match err.token() {
        Some(token) => (token.end().min(window_end).max(offset) - window_start) as usize,
        None => start,
    };
    let end = if start == end {
        (end + 1).min(window.len() + 1)
    } else {
        end
    };

    let (line_number, column) = tugparse_core::text::byte_offset_to_position(source, offset);
    let title = format!("{} at {}:{}", err.message(), line_number, column);
    let kind = if err.is_lexical() {
        "lexical error"
    } else {
        "syntax error"
    };

    let message = Level::Error.title(&title).snippet(
        Snippet::source(window)
            .origin(label)
            .line_start(first_line as usize)
            .fold(false)
            .annotation(Level::Error.span(start..end).label(kind)),
    );
    let renderer = Renderer::plain();
    let rendered = renderer.render(message);
    rendered.to_string()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod test {
    use super::*;

    fn body(source: &str) -> ExpressionNode<'_> {
        parse_expression(source).expect("parse error").body
    }

    fn binary<'n, 'a>(node: &'n ExpressionNode<'a>, kind: &str) -> &'n BinaryNode<'a> {
        assert_eq!(node.kind_name(), kind);
        node.as_binary().expect("binary node")
    }

    #[test]
    fn test_power_is_right_associative() {
        let node = body("a ** b ** c");
        let outer = binary(&node, "Power");
        assert_eq!(outer.left.name(), Some("a"));
        let inner = binary(&outer.right, "Power");
        assert_eq!(inner.left.name(), Some("b"));
        assert_eq!(inner.right.name(), Some("c"));
    }

    #[test]
    fn test_multiplication_binds_tighter_than_addition() {
        let node = body("a + b * c");
        let plus = binary(&node, "Plus");
        assert_eq!(plus.left.name(), Some("a"));
        let mul = binary(&plus.right, "Mul");
        assert_eq!(mul.left.name(), Some("b"));
        assert_eq!(mul.right.name(), Some("c"));
    }

    #[test]
    fn test_parenthesized_forms() {
        let empty = body("()");
        assert_eq!(empty.kind_name(), "Tuple");
        assert!(empty.as_bracket().expect("bracket").body.is_none());

        let single = body("( a )");
        assert_eq!(single.kind_name(), "Tuple");
        let inner = single.as_bracket().and_then(|b| b.body.as_deref()).expect("body");
        assert_eq!(inner.name(), Some("a"));

        let tuple = body("( a, )");
        let inner = tuple.as_bracket().and_then(|b| b.body.as_deref()).expect("body");
        assert_eq!(inner.kind_name(), "TestListComp");
        let sequence = inner.as_sequence().expect("sequence");
        assert_eq!(sequence.elements.len(), 1);
        assert_eq!(sequence.separators.len(), 1);
    }

    #[test]
    fn test_illegal_literal() {
        let err = parse_expression(".").expect_err("should fail");
        assert!(!err.is_lexical());
        assert_eq!(err.offset(), 0);
        assert_eq!(err.message(), "Illegal literal!");
    }

    #[test]
    fn test_inconsistent_dedent_is_lexical() {
        let err = parse_module("if a:\n    b\n  c\n").expect_err("should fail");
        assert!(err.is_lexical());
        assert_eq!(err.offset(), 14);
    }

    #[test]
    fn test_bare_minimum_funcdef() {
        parse_module("def f(): ...").expect("parse error");
    }

    #[test]
    fn test_funcdef_params() {
        parse_module("def g(a, b=1, /, *args, c: int = 2, **kw) -> None: ...")
            .expect("parse error");
    }

    #[test]
    fn test_single_statement_with_no_newline() {
        for src in &[
            "(\n \\\n)",
            "(\n  \\\n)",
            "(\n    '''\n''')",
            "del _",
            "if _:\n    '''\n)'''",
            "if _:\n    ('''\n''')",
            "if _:\n     '''\n  '''",
            "if _:\n        '''\n    ''' ",
        ] {
            parse_module(src).unwrap_or_else(|e| panic!("'{}' doesn't parse: {}", src, e));
        }
    }

    #[test]
    fn test_module_span_covers_tokens() {
        let source = "  # leading comment\nx = 1\n";
        let module = parse_module(source).expect("parse error");
        assert_eq!(module.span.start, 20);
        assert_eq!(module.span.end, source.len() as u32);
    }

    #[test]
    fn test_tokenize_entry_point() {
        let tokens = tokenize("False").expect("tokenize error");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].kind, TokenKind::False);
        assert_eq!(tokens[0].span, Span::new(0, 5));
        assert_eq!(tokens[1].kind, TokenKind::EndOfFile);
    }

    #[test]
    fn test_options_change_tab_measurement() {
        // One tab and four spaces line up only when tabs are four wide.
        let source = "if a:\n\tb\n    c\n";
        assert!(parse_module(source).is_err());
        parse_module_with_options(source, ParseOptions::new().with_tab_size(4))
            .expect("parse error");
    }

    #[test]
    fn test_func_type_entry_point() {
        let input = parse_func_type("(int, str) -> bool\n").expect("parse error");
        let types = input.argument_types.as_ref().expect("argument types");
        assert_eq!(types.kind_name(), "TypeList");
        assert_eq!(input.returns.name(), Some("bool"));
        assert_eq!(input.newlines.len(), 1);

        let empty = parse_func_type("() -> None").expect("parse error");
        assert!(empty.argument_types.is_none());
    }

    #[test]
    fn test_prettify_syntax_error() {
        let source = "x = 1\ny = (\nz = 2\n";
        let err = parse_module(source).expect_err("should fail");
        let formatted = prettify_error(&err, source, "example.py");
        assert!(formatted.contains("example.py"));
        assert!(formatted.contains("syntax error"));
        assert!(formatted.contains(err.message()));
    }

    #[test]
    fn test_prettify_lexical_error_at_end_of_input() {
        let source = "s = 'abc";
        let err = parse_module(source).expect_err("should fail");
        assert!(err.is_lexical());
        let formatted = prettify_error(&err, source, "input");
        assert!(formatted.contains("Unterminated string literal"));
        assert!(formatted.contains("lexical error"));
    }
}
