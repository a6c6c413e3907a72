// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

/// Tests for the functionality in `tokenizer::core`.
use super::{tokenize, Token, TokenKind, Tokenizer, TriviaKind, MAX_BRACKET_DEPTH};
use crate::options::ParseOptions;
use crate::parser::ParserError;
use tugparse_core::Span;

fn tokenize_with_end_marker<'t>(
    text: &'t str,
    options: &ParseOptions,
) -> Result<Vec<Token<'t>>, ParserError<'t>> {
    tokenize(text, options)
}

fn tokenize_all(text: &str) -> Result<Vec<(TokenKind, &str)>, ParserError<'_>> {
    let mut result: Vec<_> = tokenize_with_end_marker(text, &ParseOptions::default())?
        .into_iter()
        .map(|tok| (tok.kind, tok.text))
        .collect();
    // Remove the EndOfFile, since it's on every non-error token stream.
    assert_eq!(result.pop().expect("EndOfFile").0, TokenKind::EndOfFile);
    Ok(result)
}

fn kinds(text: &str) -> Vec<TokenKind> {
    tokenize_all(text)
        .expect("tokenize")
        .into_iter()
        .map(|(kind, _)| kind)
        .collect()
}

fn assert_lossless(text: &str) {
    let tokens = tokenize_with_end_marker(text, &ParseOptions::default()).expect("tokenize");
    let rebuilt: String = tokens.iter().map(Token::full_text).collect();
    assert_eq!(rebuilt, text);
}

#[test]
fn test_identifier() {
    assert_eq!(
        tokenize_all("test input"),
        Ok(vec![(TokenKind::Name, "test"), (TokenKind::Name, "input")])
    );

    assert_eq!(
        tokenize_all("__with_underscores"),
        Ok(vec![(TokenKind::Name, "__with_underscores")])
    );

    assert_eq!(
        tokenize_all("{ends_with_op}"),
        Ok(vec![
            (TokenKind::LeftBrace, "{"),
            (TokenKind::Name, "ends_with_op"),
            (TokenKind::RightBrace, "}")
        ])
    );

    assert_eq!(
        tokenize_all("\u{0100}\u{0101}\u{0102}unicode"),
        Ok(vec![(TokenKind::Name, "\u{0100}\u{0101}\u{0102}unicode")])
    );
}

#[test]
fn test_keywords() {
    assert_eq!(
        tokenize_all("False None x"),
        Ok(vec![
            (TokenKind::False, "False"),
            (TokenKind::None, "None"),
            (TokenKind::Name, "x"),
        ])
    );

    let tokens = tokenize_with_end_marker("False", &ParseOptions::default()).expect("tokenize");
    assert_eq!(tokens[0].span, Span::new(0, 5));
    assert!(tokens[0].prefix.is_empty());

    // Keywords are case sensitive
    assert_eq!(tokenize_all("false"), Ok(vec![(TokenKind::Name, "false")]));
    assert_eq!(
        tokenize_all("async await"),
        Ok(vec![(TokenKind::Async, "async"), (TokenKind::Await, "await")])
    );
}

#[test]
fn test_indentation() {
    assert_eq!(
        tokenize_all("if x:\n    y\n    z\nw\n"),
        Ok(vec![
            (TokenKind::If, "if"),
            (TokenKind::Name, "x"),
            (TokenKind::Colon, ":"),
            (TokenKind::Newline, "\n"),
            (TokenKind::Indent, ""),
            (TokenKind::Name, "y"),
            (TokenKind::Newline, "\n"),
            (TokenKind::Name, "z"),
            (TokenKind::Newline, "\n"),
            (TokenKind::Dedent, ""),
            (TokenKind::Name, "w"),
            (TokenKind::Newline, "\n"),
        ])
    );
}

#[test]
fn test_indent_is_zero_width_at_first_token() {
    let text = "if x:\n    # c\n    y\n";
    let tokens = tokenize_with_end_marker(text, &ParseOptions::default()).expect("tokenize");
    let indent = &tokens[4];
    assert_eq!(indent.kind, TokenKind::Indent);
    assert_eq!(indent.span, Span::empty(18));
    assert!(indent.prefix.is_empty());

    // The real token owns the line's trivia, including the comment line
    let y = &tokens[5];
    assert_eq!(y.text, "y");
    let prefix: Vec<_> = y.prefix.iter().map(|t| t.kind).collect();
    assert_eq!(
        prefix,
        vec![
            TriviaKind::Whitespace,
            TriviaKind::Comment,
            TriviaKind::Newline,
            TriviaKind::Whitespace,
        ]
    );
}

#[test]
fn test_dedents_at_end_of_file() {
    assert_eq!(
        kinds("if x:\n  if y:\n    z"),
        vec![
            TokenKind::If,
            TokenKind::Name,
            TokenKind::Colon,
            TokenKind::Newline,
            TokenKind::Indent,
            TokenKind::If,
            TokenKind::Name,
            TokenKind::Colon,
            TokenKind::Newline,
            TokenKind::Indent,
            TokenKind::Name,
            TokenKind::Dedent,
            TokenKind::Dedent,
        ]
    );

    // Trailing comments end up in front of the EndOfFile, after the dedent
    let tokens =
        tokenize_with_end_marker("if x:\n  y\n# end\n", &ParseOptions::default()).expect("ok");
    let n = tokens.len();
    assert_eq!(tokens[n - 2].kind, TokenKind::Dedent);
    assert_eq!(tokens[n - 1].kind, TokenKind::EndOfFile);
    assert_eq!(tokens[n - 1].prefix[0].text, "# end");
}

#[test]
fn test_inconsistent_dedent() {
    assert_eq!(
        tokenize_all("if x:\n    y\n  z\n"),
        Err(ParserError::lexical(14, "Inconsistent indentation level"))
    );
}

#[test]
fn test_blank_and_comment_lines_are_trivia() {
    assert_eq!(
        tokenize_all("\n\n# c\nx\n   \n"),
        Ok(vec![(TokenKind::Name, "x"), (TokenKind::Newline, "\n")])
    );
}

#[test]
fn test_tab_stops() {
    // A tab and eight spaces land on the same column with the default tab size
    assert_eq!(
        kinds("if x:\n\ty\n        z\n")
            .iter()
            .filter(|k| **k == TokenKind::Indent)
            .count(),
        1
    );

    // With four-column tabs the eight spaces are a deeper level
    let options = ParseOptions::new().with_tab_size(4);
    let tokens = tokenize_with_end_marker("if x:\n\ty\n        z\n", &options).expect("ok");
    assert_eq!(
        tokens.iter().filter(|t| t.is(TokenKind::Indent)).count(),
        2
    );

    // A form feed resets the column
    assert_eq!(
        kinds("if x:\n    y\n\x0cz\n")
            .iter()
            .filter(|k| **k == TokenKind::Dedent)
            .count(),
        1
    );
}

#[test]
fn test_brackets_join_lines() {
    assert_eq!(
        tokenize_all("(a,\n    b)\n"),
        Ok(vec![
            (TokenKind::LeftParen, "("),
            (TokenKind::Name, "a"),
            (TokenKind::Comma, ","),
            (TokenKind::Name, "b"),
            (TokenKind::RightParen, ")"),
            (TokenKind::Newline, "\n"),
        ])
    );

    let tokens = tokenize_with_end_marker("[\n  1]", &ParseOptions::default()).expect("ok");
    let prefix: Vec<_> = tokens[1].prefix.iter().map(|t| t.kind).collect();
    assert_eq!(prefix, vec![TriviaKind::Newline, TriviaKind::Whitespace]);
}

#[test]
fn test_bracket_errors() {
    assert_eq!(
        tokenize_all("x)"),
        Err(ParserError::lexical(1, "Unmatched ')'"))
    );
    assert_eq!(
        tokenize_all("(]"),
        Err(ParserError::lexical(
            1,
            "Closing bracket ']' does not match opening bracket '('"
        ))
    );
}

#[test]
fn test_bracket_nesting_limit() {
    let deepest = format!(
        "{}x{}",
        "([{".repeat(MAX_BRACKET_DEPTH / 3) + "(".repeat(MAX_BRACKET_DEPTH % 3).as_str(),
        ")".repeat(MAX_BRACKET_DEPTH % 3) + "}])".repeat(MAX_BRACKET_DEPTH / 3).as_str(),
    );
    assert_lossless(&deepest);

    let too_deep = "(".repeat(MAX_BRACKET_DEPTH + 1);
    assert_eq!(
        tokenize_all(&too_deep),
        Err(ParserError::lexical(
            MAX_BRACKET_DEPTH as u32,
            "Too many nested parentheses"
        ))
    );
}

#[test]
fn test_bracket_depth() {
    let mut tokenizer = Tokenizer::new("([x", &ParseOptions::default()).expect("ok");
    tokenizer.advance().expect("ok");
    // One token of lookahead has been scanned
    assert_eq!(tokenizer.bracket_depth(), 2);
}

#[test]
fn test_numbers() {
    for text in [
        "0", "00", "0_0", "1_000", "0x_1f", "0XFF", "0o17", "0b1_0", "1.5", "1.", ".5", "1e10",
        "1.5e-3", "1E+2", ".5j", "10J", "012.5", "0777e1", "1_0.0_1",
    ] {
        assert_eq!(
            tokenize_all(text),
            Ok(vec![(TokenKind::Number, text)]),
            "{}",
            text
        );
    }
}

#[test]
fn test_number_boundaries() {
    assert_eq!(
        tokenize_all("1._25"),
        Ok(vec![(TokenKind::Number, "1."), (TokenKind::Name, "_25")])
    );
    assert_eq!(
        tokenize_all("1else"),
        Ok(vec![(TokenKind::Number, "1"), (TokenKind::Else, "else")])
    );
    assert_eq!(
        tokenize_all("x.y"),
        Ok(vec![
            (TokenKind::Name, "x"),
            (TokenKind::Dot, "."),
            (TokenKind::Name, "y"),
        ])
    );
    assert_eq!(
        tokenize_all("x[...]"),
        Ok(vec![
            (TokenKind::Name, "x"),
            (TokenKind::LeftBracket, "["),
            (TokenKind::Ellipsis, "..."),
            (TokenKind::RightBracket, "]"),
        ])
    );
}

#[test]
fn test_invalid_numbers() {
    assert_eq!(
        tokenize_all("0b12"),
        Err(ParserError::lexical(3, "Invalid digit '2' in binary literal"))
    );
    assert_eq!(
        tokenize_all("0o8"),
        Err(ParserError::lexical(2, "Invalid digit '8' in octal literal"))
    );
    assert_eq!(
        tokenize_all("0x"),
        Err(ParserError::lexical(2, "Invalid hexadecimal literal"))
    );
    assert_eq!(
        tokenize_all("0xfg"),
        Err(ParserError::lexical(3, "Invalid hexadecimal literal"))
    );
    assert_eq!(
        tokenize_all("1__0"),
        Err(ParserError::lexical(1, "Invalid decimal literal"))
    );
    assert_eq!(
        tokenize_all("100_"),
        Err(ParserError::lexical(3, "Invalid decimal literal"))
    );
    assert_eq!(
        tokenize_all("1e+"),
        Err(ParserError::lexical(
            1,
            "Invalid decimal literal: exponent has no digits"
        ))
    );
    assert_eq!(
        tokenize_all("x = 0123"),
        Err(ParserError::lexical(
            4,
            "Leading zeros in decimal integer literals are not permitted"
        ))
    );
}

#[test]
fn test_strings() {
    for text in [
        "'abc'",
        "\"def\"",
        "''",
        "\"\"\"\"\"\"",
        "'''multi\nline'''",
        "'a\\'b'",
        "'line\\\ncontinued'",
        "b'x'",
        "rb\"y\"",
        "Rb'y'",
        "f'{z}'",
        "u'text'",
        "'''a''b'''",
    ] {
        assert_eq!(
            tokenize_all(text),
            Ok(vec![(TokenKind::String, text)]),
            "{}",
            text
        );
    }

    // Not a valid prefix: the name and the string are separate tokens
    assert_eq!(
        tokenize_all("xy'a'"),
        Ok(vec![(TokenKind::Name, "xy"), (TokenKind::String, "'a'")])
    );

    // Adjacent strings stay separate tokens
    assert_eq!(
        tokenize_all("'a' 'b'"),
        Ok(vec![(TokenKind::String, "'a'"), (TokenKind::String, "'b'")])
    );
}

#[test]
fn test_unterminated_strings() {
    assert_eq!(
        tokenize_all("'abc\n"),
        Err(ParserError::lexical(0, "Unterminated string literal"))
    );
    assert_eq!(
        tokenize_all("x = b'abc"),
        Err(ParserError::lexical(4, "Unterminated string literal"))
    );
    assert_eq!(
        tokenize_all("'''hey'there's''quotes'here, but not '' three'"),
        Err(ParserError::lexical(
            0,
            "Unterminated triple-quoted string literal"
        ))
    );
    assert_eq!(
        tokenize_all("'ends with escape\\"),
        Err(ParserError::lexical(0, "Unterminated string literal"))
    );
}

#[test]
fn test_operators() {
    assert_eq!(
        kinds("a <> b != c"),
        vec![
            TokenKind::Name,
            TokenKind::LessGreater,
            TokenKind::Name,
            TokenKind::NotEqual,
            TokenKind::Name,
        ]
    );
    assert_eq!(
        kinds("**= ** *= // //= /= -> -= := <<= >>= << >> <= >= == @= ~"),
        vec![
            TokenKind::DoubleStarEqual,
            TokenKind::DoubleStar,
            TokenKind::StarEqual,
            TokenKind::DoubleSlash,
            TokenKind::DoubleSlashEqual,
            TokenKind::SlashEqual,
            TokenKind::Arrow,
            TokenKind::MinusEqual,
            TokenKind::ColonEqual,
            TokenKind::LeftShiftEqual,
            TokenKind::RightShiftEqual,
            TokenKind::LeftShift,
            TokenKind::RightShift,
            TokenKind::LessEqual,
            TokenKind::GreaterEqual,
            TokenKind::EqualEqual,
            TokenKind::AtEqual,
            TokenKind::Tilde,
        ]
    );
}

#[test]
fn test_invalid_characters() {
    assert_eq!(
        tokenize_all("a ! b"),
        Err(ParserError::lexical(2, "Invalid character '!'"))
    );
    assert_eq!(
        tokenize_all("$"),
        Err(ParserError::lexical(0, "Invalid character '$'"))
    );
}

#[test]
fn test_type_comments() {
    assert_eq!(
        tokenize_all("x = 1  # type: int\n"),
        Ok(vec![
            (TokenKind::Name, "x"),
            (TokenKind::Equal, "="),
            (TokenKind::Number, "1"),
            (TokenKind::TypeComment, "# type: int"),
            (TokenKind::Newline, "\n"),
        ])
    );

    // On a line of its own it is ordinary trivia
    assert_eq!(
        tokenize_all("# type: int\nx\n"),
        Ok(vec![(TokenKind::Name, "x"), (TokenKind::Newline, "\n")])
    );

    // Inside brackets it is ordinary trivia
    assert_eq!(
        kinds("(x  # type: int\n)"),
        vec![TokenKind::LeftParen, TokenKind::Name, TokenKind::RightParen]
    );

    // Only the exact prefix qualifies
    assert_eq!(
        kinds("x  #type: int\n"),
        vec![TokenKind::Name, TokenKind::Newline]
    );
}

#[test]
fn test_line_continuation() {
    assert_eq!(
        kinds("x = 1 + \\\n  2\n"),
        vec![
            TokenKind::Name,
            TokenKind::Equal,
            TokenKind::Number,
            TokenKind::Plus,
            TokenKind::Number,
            TokenKind::Newline,
        ]
    );
    assert_eq!(
        tokenize_all("x \\ y"),
        Err(ParserError::lexical(
            2,
            "Unexpected character after line continuation character"
        ))
    );
    assert_eq!(
        tokenize_all("x\\"),
        Err(ParserError::lexical(
            1,
            "Unexpected end of file after line continuation character"
        ))
    );
}

#[test]
fn test_line_endings() {
    assert_eq!(
        tokenize_all("x\r\ny\rz\n"),
        Ok(vec![
            (TokenKind::Name, "x"),
            (TokenKind::Newline, "\r\n"),
            (TokenKind::Name, "y"),
            (TokenKind::Newline, "\r"),
            (TokenKind::Name, "z"),
            (TokenKind::Newline, "\n"),
        ])
    );
}

#[test]
fn test_end_of_file_repeats() {
    let mut tokenizer = Tokenizer::new("x", &ParseOptions::default()).expect("ok");
    assert_eq!(tokenizer.advance().expect("ok").kind, TokenKind::Name);
    for _ in 0..3 {
        let tok = tokenizer.advance().expect("ok");
        assert_eq!(tok.kind, TokenKind::EndOfFile);
        assert_eq!(tok.span, Span::empty(1));
    }
}

#[test]
fn test_lossless() {
    for text in [
        "",
        "\n",
        "   ",
        "# only a comment",
        "x = 1\n",
        "def f(a, b):\n    return a + b  # sum\n\n\n",
        "if x:\r\n\ty = [1,\r\n  2]\r\nelse:\r\n\tpass",
        "x = 1 + \\\n    2\n",
        "\x0c\nclass A:\n    '''doc'''\n    # trailing\n",
        "s = ('a'\n     'b')  # type: str\n",
    ] {
        assert_lossless(text);
    }
}
