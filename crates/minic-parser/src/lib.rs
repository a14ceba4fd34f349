//! MiniC Parser
//!
//! Parses a token stream into an abstract syntax tree by recursive descent,
//! with panic-mode recovery: a syntax fault is recorded, the cursor skips to
//! the next `;`, `{` or `}`, and parsing resumes. The parse always completes
//! and always returns a `Program` root; accumulated faults are appended as a
//! trailing `Errors` subtree.

pub mod ast;
pub mod parser;

pub use ast::{AstNode, NodeLabel};
pub use parser::Parser;

/// Parser error with position information.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Parse error at line {line}, column {column}: {message}")]
pub struct ParseError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}
