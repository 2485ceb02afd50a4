//! Tokenization of `.bom` source text using `nom`.
//!
//! Produces a stream of [`Token`]s from raw input for the parser to consume.
//! Whitespace and `//` line comments are discarded between tokens.

use bomline_common::error::{BomlineError, Result};
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    character::complete::{char, multispace1, not_line_ending},
    combinator::value,
    multi::many0,
    sequence::preceded,
};

/// A token in the `.bom` language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// `DESCRIPTOR` keyword.
    Descriptor,
    /// `REPOSITORY` keyword.
    Repository,
    /// `PLATFORM` keyword.
    Platform,
    /// `REQUIRE` keyword.
    Require,
    /// `PROFILE` keyword.
    Profile,
    /// An identifier (descriptor name, property name).
    Identifier(String),
    /// A double-quoted string literal.
    StringLiteral(String),
    /// `{` opening brace.
    BraceOpen,
    /// `}` closing brace.
    BraceClose,
    /// `[` opening bracket.
    BracketOpen,
    /// `]` closing bracket.
    BracketClose,
    /// `=` assignment.
    Equals,
    /// `,` comma separator.
    Comma,
}

/// Skippable items: whitespace or line comments.
fn skip_trivia(input: &str) -> IResult<&str, ()> {
    let comment = value((), preceded(tag("//"), not_line_ending));
    let ws = value((), multispace1);
    let (input, _) = many0(alt((ws, comment))).parse(input)?;
    Ok((input, ()))
}

/// Parses a double-quoted string literal with basic escape support.
fn string_literal(input: &str) -> IResult<&str, Token> {
    let (input, _) = char('"')(input)?;
    let mut result = String::new();
    let mut chars = input.char_indices();
    loop {
        match chars.next() {
            Some((idx, '"')) => {
                let remaining = &input[idx + 1..];
                return Ok((remaining, Token::StringLiteral(result)));
            }
            Some((_, '\\')) => match chars.next() {
                Some((_, 'n')) => result.push('\n'),
                Some((_, 't')) => result.push('\t'),
                Some((_, '\\')) => result.push('\\'),
                Some((_, '"')) => result.push('"'),
                Some((_, c)) => {
                    result.push('\\');
                    result.push(c);
                }
                None => {
                    return Err(nom::Err::Failure(nom::error::Error::new(
                        input,
                        nom::error::ErrorKind::Char,
                    )));
                }
            },
            Some((_, c)) => result.push(c),
            None => {
                return Err(nom::Err::Failure(nom::error::Error::new(
                    input,
                    nom::error::ErrorKind::Char,
                )));
            }
        }
    }
}

const fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

const fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// Parses an identifier or keyword.
fn identifier_or_keyword(input: &str) -> IResult<&str, Token> {
    let (input, first) = take_while1(is_ident_start)(input)?;
    let (input, rest) = take_while(is_ident_continue)(input)?;
    let word = format!("{first}{rest}");
    let token = match word.as_str() {
        "DESCRIPTOR" => Token::Descriptor,
        "REPOSITORY" => Token::Repository,
        "PLATFORM" => Token::Platform,
        "REQUIRE" => Token::Require,
        "PROFILE" => Token::Profile,
        _ => Token::Identifier(word),
    };
    Ok((input, token))
}

/// Parses a symbol token.
fn symbol(input: &str) -> IResult<&str, Token> {
    alt((
        value(Token::BraceOpen, char('{')),
        value(Token::BraceClose, char('}')),
        value(Token::BracketOpen, char('[')),
        value(Token::BracketClose, char(']')),
        value(Token::Equals, char('=')),
        value(Token::Comma, char(',')),
    ))
    .parse(input)
}

/// Parses a single token (after trivia has been skipped).
fn single_token(input: &str) -> IResult<&str, Token> {
    alt((string_literal, symbol, identifier_or_keyword)).parse(input)
}

/// Tokenizes a `.bom` source string into a vector of tokens.
///
/// Whitespace and `//` line comments are discarded.
///
/// # Errors
///
/// Returns an error if the input contains characters that cannot be tokenized.
pub fn tokenize(input: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut remaining = input;

    loop {
        let (rest, ()) = skip_trivia(remaining).map_err(|e| BomlineError::Parse {
            message: format!("lexer error skipping whitespace: {e}"),
        })?;
        remaining = rest;

        if remaining.is_empty() {
            break;
        }

        let (rest, token) = single_token(remaining).map_err(|e| BomlineError::Parse {
            message: format!(
                "unexpected character at: \"{}\" ({e})",
                &remaining[..remaining.len().min(20)]
            ),
        })?;
        tokens.push(token);
        remaining = rest;
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_keywords() {
        let tokens =
            tokenize("DESCRIPTOR REPOSITORY PLATFORM REQUIRE PROFILE").expect("should tokenize");
        assert_eq!(
            tokens,
            vec![
                Token::Descriptor,
                Token::Repository,
                Token::Platform,
                Token::Require,
                Token::Profile,
            ]
        );
    }

    #[test]
    fn tokenize_symbols() {
        let tokens = tokenize("{ } [ ] = ,").expect("should tokenize");
        assert_eq!(
            tokens,
            vec![
                Token::BraceOpen,
                Token::BraceClose,
                Token::BracketOpen,
                Token::BracketClose,
                Token::Equals,
                Token::Comma,
            ]
        );
    }

    #[test]
    fn tokenize_string_literal() {
        let tokens = tokenize(r#""org.openrewrite:rewrite-java""#).expect("should tokenize");
        assert_eq!(
            tokens,
            vec![Token::StringLiteral("org.openrewrite:rewrite-java".into())]
        );
    }

    #[test]
    fn tokenize_string_with_escapes() {
        let tokens = tokenize(r#""line\nnew\ttab\\slash\"quote""#).expect("should tokenize");
        assert_eq!(
            tokens,
            vec![Token::StringLiteral("line\nnew\ttab\\slash\"quote".into())]
        );
    }

    #[test]
    fn tokenize_identifier_with_dashes() {
        let tokens = tokenize("recipe-bundle test_runtime").expect("should tokenize");
        assert_eq!(
            tokens,
            vec![
                Token::Identifier("recipe-bundle".into()),
                Token::Identifier("test_runtime".into()),
            ]
        );
    }

    #[test]
    fn tokenize_discards_comments() {
        let tokens = tokenize("// header comment\nREQUIRE // trailing\n\"a:b\"")
            .expect("should tokenize");
        assert_eq!(
            tokens,
            vec![Token::Require, Token::StringLiteral("a:b".into())]
        );
    }

    #[test]
    fn tokenize_unterminated_string_fails() {
        let result = tokenize(r#""unterminated"#);
        assert!(result.is_err());
    }

    #[test]
    fn tokenize_empty_input() {
        let tokens = tokenize("").expect("should tokenize");
        assert!(tokens.is_empty());
    }
}
