//! # bomline-descriptor
//!
//! Parser for the `.bom` build descriptor language.
//!
//! Handles:
//! - **Lexer**: Tokenization of `.bom` source text.
//! - **Parser**: AST construction from the token stream.
//! - **Validator**: Static analysis of the parsed descriptor.

pub mod parser;
