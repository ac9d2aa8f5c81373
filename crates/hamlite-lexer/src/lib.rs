//! hamlite Lexer
//!
//! Line-level lexical layer for `.haml`-style templates.
//! Reassembles raw source lines into logical lines (resolving ` |`
//! continuation groups) and classifies the leading keyword of a line
//! so the parser can tell control-flow continuations (`- else`) apart
//! from new statements.
//!
//! # Example
//!
//! ```
//! use hamlite_lexer::{is_mid_block, Preprocessor};
//!
//! let lines = Preprocessor::logical_lines("%p\n  = foo(a, |\n      b) |\n");
//! assert_eq!(lines.len(), 2);
//! assert_eq!(lines[1].text, "= foo(a, b)");
//! assert!(is_mid_block("- else"));
//! ```

pub mod keyword;
pub mod line;
pub mod lines;

pub use keyword::{block_keyword, is_mid_block, BlockKeyword};
pub use line::LogicalLine;
pub use lines::Preprocessor;
