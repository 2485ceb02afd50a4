//! `.bom` file parser built on `nom`.
//!
//! Transforms raw `.bom` text into a validated AST through
//! lexing, parsing, and static analysis phases.

pub mod ast;
pub mod lexer;
pub mod validator;

use bomline_common::error::{BomlineError, Result};

use self::ast::{
    DescriptorFile, ExcludeDecl, HeaderDecl, PlatformDecl, ProfileDecl, RepositoryDecl,
    RequireDecl,
};
use self::lexer::Token;

/// Cursor into a token stream for recursive-descent parsing.
struct TokenCursor<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> TokenCursor<'a> {
    const fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&Token> {
        let tok = self.tokens.get(self.pos);
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn expect_identifier(&mut self) -> Result<String> {
        match self.advance() {
            Some(Token::Identifier(s)) => Ok(s.clone()),
            other => Err(parse_err(format!("expected identifier, got {other:?}"))),
        }
    }

    fn expect_token(&mut self, expected: &Token) -> Result<()> {
        match self.advance() {
            Some(tok) if tok == expected => Ok(()),
            other => Err(parse_err(format!("expected {expected:?}, got {other:?}"))),
        }
    }

    fn expect_string(&mut self) -> Result<String> {
        match self.advance() {
            Some(Token::StringLiteral(s)) => Ok(s.clone()),
            other => Err(parse_err(format!("expected string literal, got {other:?}"))),
        }
    }

    const fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }
}

const fn parse_err(message: String) -> BomlineError {
    BomlineError::Parse { message }
}

fn skip_optional_comma(cursor: &mut TokenCursor<'_>) {
    if cursor.peek() == Some(&Token::Comma) {
        let _ = cursor.advance();
    }
}

/// Parses a `.bom` build descriptor from its source text.
///
/// # Errors
///
/// Returns an error if the input contains syntax errors or fails validation.
pub fn parse_descriptor(input: &str) -> Result<DescriptorFile> {
    tracing::info!("parsing .bom input");
    let tokens = lexer::tokenize(input)?;
    let mut cursor = TokenCursor::new(&tokens);
    let file = parse_file(&mut cursor)?;
    validator::validate(&file)?;
    Ok(file)
}

fn parse_file(cursor: &mut TokenCursor<'_>) -> Result<DescriptorFile> {
    let mut file = DescriptorFile::default();

    while let Some(tok) = cursor.peek() {
        match tok {
            Token::Descriptor => {
                if file.header.is_some() {
                    return Err(parse_err("duplicate DESCRIPTOR block".into()));
                }
                file.header = Some(parse_header(cursor)?);
            }
            Token::Repository => file.repositories.push(parse_repository(cursor)?),
            Token::Platform => {
                if file.platform.is_some() {
                    return Err(parse_err("duplicate PLATFORM declaration".into()));
                }
                file.platform = Some(parse_platform(cursor)?);
            }
            Token::Require => file.requirements.push(parse_require(cursor)?),
            Token::Profile => file.profiles.push(parse_profile(cursor)?),
            other => {
                return Err(parse_err(format!(
                    "expected DESCRIPTOR, REPOSITORY, PLATFORM, REQUIRE, or PROFILE at top level, got {other:?}"
                )));
            }
        }
    }

    Ok(file)
}

fn parse_header(cursor: &mut TokenCursor<'_>) -> Result<HeaderDecl> {
    cursor.expect_token(&Token::Descriptor)?;
    let name = cursor.expect_identifier()?;
    cursor.expect_token(&Token::BraceOpen)?;

    let mut header = HeaderDecl {
        name,
        ..HeaderDecl::default()
    };

    while cursor.peek() != Some(&Token::BraceClose) {
        if cursor.at_end() {
            return Err(parse_err(
                "unexpected end of input inside DESCRIPTOR block".into(),
            ));
        }
        let key = cursor.expect_identifier()?;
        cursor.expect_token(&Token::Equals)?;
        match key.as_str() {
            "group" => header.group = Some(cursor.expect_string()?),
            "description" => header.description = Some(cursor.expect_string()?),
            _ => {
                return Err(parse_err(format!("unknown descriptor property: {key}")));
            }
        }
        skip_optional_comma(cursor);
    }

    cursor.expect_token(&Token::BraceClose)?;
    Ok(header)
}

fn parse_repository(cursor: &mut TokenCursor<'_>) -> Result<RepositoryDecl> {
    cursor.expect_token(&Token::Repository)?;
    let url = cursor.expect_string()?;

    let mut repo = RepositoryDecl {
        url,
        excludes: Vec::new(),
    };

    if cursor.peek() != Some(&Token::BraceOpen) {
        return Ok(repo);
    }
    cursor.expect_token(&Token::BraceOpen)?;

    while cursor.peek() != Some(&Token::BraceClose) {
        if cursor.at_end() {
            return Err(parse_err(
                "unexpected end of input inside REPOSITORY block".into(),
            ));
        }
        let key = cursor.expect_identifier()?;
        cursor.expect_token(&Token::Equals)?;
        match key.as_str() {
            "exclude" => repo.excludes.push(parse_exclude(cursor)?),
            _ => {
                return Err(parse_err(format!("unknown repository property: {key}")));
            }
        }
        skip_optional_comma(cursor);
    }

    cursor.expect_token(&Token::BraceClose)?;
    Ok(repo)
}

fn parse_exclude(cursor: &mut TokenCursor<'_>) -> Result<ExcludeDecl> {
    cursor.expect_token(&Token::BraceOpen)?;

    let mut group = None;
    let mut name = None;
    let mut version = None;

    while cursor.peek() != Some(&Token::BraceClose) {
        if cursor.at_end() {
            return Err(parse_err(
                "unexpected end of input inside exclude block".into(),
            ));
        }
        let key = cursor.expect_identifier()?;
        cursor.expect_token(&Token::Equals)?;
        match key.as_str() {
            "group" => group = Some(cursor.expect_string()?),
            "name" => name = Some(cursor.expect_string()?),
            "version" => version = Some(cursor.expect_string()?),
            _ => {
                return Err(parse_err(format!("unknown exclude property: {key}")));
            }
        }
        skip_optional_comma(cursor);
    }

    cursor.expect_token(&Token::BraceClose)?;

    match (group, name, version) {
        (Some(group), Some(name), Some(version)) => Ok(ExcludeDecl {
            group,
            name,
            version,
        }),
        _ => Err(parse_err(
            "exclude block requires group, name, and version patterns".into(),
        )),
    }
}

fn parse_platform(cursor: &mut TokenCursor<'_>) -> Result<PlatformDecl> {
    cursor.expect_token(&Token::Platform)?;
    let coordinate = cursor.expect_string()?;
    let version = cursor.expect_string()?;
    Ok(PlatformDecl {
        coordinate,
        version,
    })
}

fn parse_require(cursor: &mut TokenCursor<'_>) -> Result<RequireDecl> {
    cursor.expect_token(&Token::Require)?;
    let coordinate = cursor.expect_string()?;

    let mut req = RequireDecl {
        coordinate,
        ..RequireDecl::default()
    };

    if cursor.peek() != Some(&Token::BraceOpen) {
        return Ok(req);
    }
    cursor.expect_token(&Token::BraceOpen)?;

    while cursor.peek() != Some(&Token::BraceClose) {
        if cursor.at_end() {
            return Err(parse_err(
                "unexpected end of input inside REQUIRE block".into(),
            ));
        }
        let key = cursor.expect_identifier()?;
        cursor.expect_token(&Token::Equals)?;
        match key.as_str() {
            "kind" => req.kind = Some(cursor.expect_string()?),
            "version" => req.version = Some(cursor.expect_string()?),
            "axis" => req.axis = Some(cursor.expect_string()?),
            _ => {
                return Err(parse_err(format!("unknown requirement property: {key}")));
            }
        }
        skip_optional_comma(cursor);
    }

    cursor.expect_token(&Token::BraceClose)?;
    Ok(req)
}

fn parse_profile(cursor: &mut TokenCursor<'_>) -> Result<ProfileDecl> {
    cursor.expect_token(&Token::Profile)?;
    let axis = cursor.expect_string()?;
    cursor.expect_token(&Token::Equals)?;
    cursor.expect_token(&Token::BracketOpen)?;

    let mut candidates = Vec::new();
    while cursor.peek() != Some(&Token::BracketClose) {
        if cursor.at_end() {
            return Err(parse_err(
                "unexpected end of input inside PROFILE list".into(),
            ));
        }
        candidates.push(cursor.expect_string()?);
        skip_optional_comma(cursor);
    }

    cursor.expect_token(&Token::BracketClose)?;
    Ok(ProfileDecl { axis, candidates })
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "DESCRIPTOR recipe-bundle { }\n";

    #[test]
    fn parse_minimal_descriptor() {
        let file = parse_descriptor(HEADER).expect("should parse");
        let header = file.header.expect("header should exist");
        assert_eq!(header.name, "recipe-bundle");
        assert!(header.group.is_none());
        assert!(file.requirements.is_empty());
    }

    #[test]
    fn parse_header_properties() {
        let input = r#"DESCRIPTOR recipe-bundle {
    group = "org.example.recipe"
    description = "Aggregates language front-end modules."
}"#;
        let file = parse_descriptor(input).expect("should parse");
        let header = file.header.expect("header should exist");
        assert_eq!(header.group.as_deref(), Some("org.example.recipe"));
        assert_eq!(
            header.description.as_deref(),
            Some("Aggregates language front-end modules.")
        );
    }

    #[test]
    fn parse_repository_without_filters() {
        let input = format!("{HEADER}REPOSITORY \"https://repo.example.org/releases/\"");
        let file = parse_descriptor(&input).expect("should parse");
        assert_eq!(file.repositories.len(), 1);
        assert_eq!(file.repositories[0].url, "https://repo.example.org/releases/");
        assert!(file.repositories[0].excludes.is_empty());
    }

    #[test]
    fn parse_repository_with_exclude_filter() {
        let input = format!(
            r#"{HEADER}REPOSITORY "https://repo.gradle.org/gradle/libs-releases/" {{
    exclude = {{ group = ".+", name = ".+", version = ".+-rc-?[0-9]*" }}
}}"#
        );
        let file = parse_descriptor(&input).expect("should parse");
        let repo = &file.repositories[0];
        assert_eq!(repo.excludes.len(), 1);
        assert_eq!(repo.excludes[0].group, ".+");
        assert_eq!(repo.excludes[0].name, ".+");
        assert_eq!(repo.excludes[0].version, ".+-rc-?[0-9]*");
    }

    #[test]
    fn parse_platform_declaration() {
        let input = format!("{HEADER}PLATFORM \"org.openrewrite:rewrite-bom\" \"latest\"");
        let file = parse_descriptor(&input).expect("should parse");
        let platform = file.platform.expect("platform should exist");
        assert_eq!(platform.coordinate, "org.openrewrite:rewrite-bom");
        assert_eq!(platform.version, "latest");
    }

    #[test]
    fn parse_require_without_block_defaults() {
        let input = format!(
            "{HEADER}PLATFORM \"org.openrewrite:rewrite-bom\" \"8.23.1\"\nREQUIRE \"org.openrewrite:rewrite-java\""
        );
        let file = parse_descriptor(&input).expect("should parse");
        let req = &file.requirements[0];
        assert_eq!(req.coordinate, "org.openrewrite:rewrite-java");
        assert!(req.kind.is_none());
        assert!(req.version.is_none());
        assert!(req.axis.is_none());
    }

    #[test]
    fn parse_require_all_properties() {
        let input = format!(
            r#"{HEADER}REQUIRE "org.openrewrite:rewrite-java-21" {{
    kind = "test-runtime-only"
    version = "8.23.1"
    axis = "test-runtime"
}}"#
        );
        let file = parse_descriptor(&input).expect("should parse");
        let req = &file.requirements[0];
        assert_eq!(req.kind.as_deref(), Some("test-runtime-only"));
        assert_eq!(req.version.as_deref(), Some("8.23.1"));
        assert_eq!(req.axis.as_deref(), Some("test-runtime"));
    }

    #[test]
    fn parse_profile_priority_list() {
        let input = format!(
            r#"{HEADER}PROFILE "test-runtime" = ["org.openrewrite:rewrite-java-21", "org.openrewrite:rewrite-java-17"]"#
        );
        let file = parse_descriptor(&input).expect("should parse");
        assert_eq!(file.profiles.len(), 1);
        assert_eq!(file.profiles[0].axis, "test-runtime");
        assert_eq!(
            file.profiles[0].candidates,
            vec![
                "org.openrewrite:rewrite-java-21",
                "org.openrewrite:rewrite-java-17"
            ]
        );
    }

    #[test]
    fn parse_full_descriptor() {
        let input = r#"// Recipe bundle descriptor.
DESCRIPTOR recipe-bundle {
    group = "org.example.recipe"
    description = "Language front-end aggregation."
}

REPOSITORY "https://repo.gradle.org/gradle/libs-releases/" {
    exclude = { group = ".+", name = ".+", version = ".+-rc-?[0-9]*" }
}

PLATFORM "org.openrewrite:rewrite-bom" "latest"

REQUIRE "org.projectlombok:lombok" {
    kind = "compile-only"
    version = "latest"
}
REQUIRE "org.openrewrite:rewrite-java"
REQUIRE "org.openrewrite:rewrite-cobol" {
    version = "8.1.2"
}
REQUIRE "org.openrewrite:rewrite-java-21" {
    kind = "test-runtime-only"
    axis = "test-runtime"
}

PROFILE "test-runtime" = ["org.openrewrite:rewrite-java-21"]"#;

        let file = parse_descriptor(input).expect("should parse full descriptor");
        assert_eq!(file.repositories.len(), 1);
        assert_eq!(file.requirements.len(), 4);
        assert_eq!(file.profiles.len(), 1);
        assert!(file.platform.is_some());
    }

    #[test]
    fn parse_error_unknown_property() {
        let input = format!(
            r#"{HEADER}REQUIRE "a:b" {{
    bogus = "val"
}}"#
        );
        let result = parse_descriptor(&input);
        assert!(result.is_err());
    }

    #[test]
    fn parse_error_missing_brace() {
        let input = r#"DESCRIPTOR x {
    group = "g"
"#;
        let result = parse_descriptor(input);
        assert!(result.is_err());
    }

    #[test]
    fn parse_error_duplicate_platform() {
        let input = format!(
            "{HEADER}PLATFORM \"a:bom\" \"1.0.0\"\nPLATFORM \"a:bom\" \"2.0.0\""
        );
        let result = parse_descriptor(&input);
        let msg = result.unwrap_err().to_string();
        assert!(msg.contains("duplicate PLATFORM"), "got: {msg}");
    }

    #[test]
    fn parse_error_duplicate_header() {
        let input = format!("{HEADER}{HEADER}");
        let result = parse_descriptor(&input);
        let msg = result.unwrap_err().to_string();
        assert!(msg.contains("duplicate DESCRIPTOR"), "got: {msg}");
    }

    #[test]
    fn parse_comments_ignored() {
        let input = r#"// File header
DESCRIPTOR bundle {
    // Group coordinate
    group = "org.example" // trailing comment
}"#;
        let file = parse_descriptor(input).expect("should parse with comments");
        let header = file.header.expect("header should exist");
        assert_eq!(header.group.as_deref(), Some("org.example"));
    }

    #[test]
    fn parse_properties_with_commas() {
        let input = r#"DESCRIPTOR bundle {
    group = "org.example",
    description = "desc",
}"#;
        let file = parse_descriptor(input).expect("should parse");
        let header = file.header.expect("header should exist");
        assert_eq!(header.group.as_deref(), Some("org.example"));
        assert_eq!(header.description.as_deref(), Some("desc"));
    }
}
