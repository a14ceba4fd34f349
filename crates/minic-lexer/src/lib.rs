//! MiniC Lexer
//!
//! Tokenizes MiniC source text into a stream of coarsely categorized tokens.
//! Handles the structural symbols, one- and two-character operators, reserved
//! words, identifiers, integer and real literals, and both comment forms.
//!
//! Lexing never fails: anything the scanner cannot classify is reported as a
//! [`LexicalError`] alongside the tokens, and scanning continues.
//!
//! # Example
//!
//! ```
//! use minic_lexer::Scanner;
//!
//! let (tokens, errors) = Scanner::analyze("");
//! assert!(tokens.is_empty());
//! assert!(errors.is_empty());
//! ```

pub mod scanner;
pub mod token;

pub use scanner::Scanner;
pub use token::{Token, TokenKind};

/// Lexical error with position information.
///
/// Both variants are advisory: the scanner records them and keeps going.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexicalError {
    /// A character no classification rule accepts.
    #[error("Lexical error at line {line}, column {column}: unrecognized character '{character}'")]
    UnrecognizedCharacter {
        character: char,
        line: usize,
        column: usize,
    },

    /// A `/*` comment still open at end of input. The position is the
    /// opening delimiter, not the end of the file.
    #[error("Block comment opened at line {line}, column {column} is never closed")]
    UnterminatedBlockComment { line: usize, column: usize },
}
