//! hamlite Parser
//!
//! Builds a typed tree from an indentation-sensitive markup template.
//! Logical lines from `hamlite-lexer` are classified by their leading
//! marker, nested by indentation width, and element lines are broken into
//! tag, shorthand classes/id, attribute blocks and inline content.
//!
//! ```
//! use hamlite_parser::{parse, Node};
//!
//! let root = parse("%p Hello").unwrap();
//! match &root.children[0] {
//!     Node::Element(el) => assert_eq!(el.tag, "p"),
//!     other => panic!("Expected element, got {other:?}"),
//! }
//! ```

pub mod ast;
pub mod element;
pub mod indent;
pub mod options;
pub mod outline;
pub mod parser;

pub use ast::{Code, Element, Node, Root};
pub use options::ParserOptions;
pub use parser::Parser;

/// Categories of fatal parse errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    InvalidDoctype,
    InvalidElementDeclaration,
    /// `=` or `-` (or an inline `=`) with nothing after it.
    EmptyCodeExpression,
    /// Unbalanced `{...}` or `(...)` attribute block.
    UnmatchedBrace,
    UnexpectedIndentLevel,
    /// Indented content below a node that cannot own children.
    IllegalNesting,
}

/// Fatal parse error. The first one aborts the parse.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} at line {line}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub message: String,
    /// 1-based source line.
    pub line: usize,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, message: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            message: message.into(),
            line,
        }
    }
}

/// Parse a template with default options.
pub fn parse(source: &str) -> Result<Root, ParseError> {
    Parser::new().parse(source)
}
