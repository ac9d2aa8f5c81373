//! Template parser.
//!
//! Reads the logical lines produced by `hamlite-lexer`, moves the
//! insertion point according to indentation, and turns each line into a
//! node based on its leading marker:
//!
//! | Marker | Node |
//! |---|---|
//! | `%` | element (see [`crate::element`]) |
//! | `.` `#` | element with implicit `div` |
//! | `!` | doctype, must start with `!!!` |
//! | `/` | HTML comment |
//! | `=` | script |
//! | `-` | silent script |
//! | other | plain text |

use hamlite_lexer::{LogicalLine, Preprocessor};

use crate::ast::{Code, Node, Root};
use crate::element::parse_element;
use crate::indent::IndentTracker;
use crate::options::ParserOptions;
use crate::{ParseError, ParseErrorKind};

pub const ELEMENT: char = '%';
pub const DIV_CLASS: char = '.';
pub const DIV_ID: char = '#';
pub const COMMENT: char = '/';
pub const DOCTYPE: char = '!';
pub const SCRIPT: char = '=';
pub const SILENT_SCRIPT: char = '-';

const DOCTYPE_PREFIX: &str = "!!!";

/// Template parser.
///
/// Holds only configuration; every call to [`Parser::parse`] builds its own
/// indentation state, so one parser can be reused for any number of inputs.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    options: ParserOptions,
}

impl Parser {
    /// Create a parser with default options.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ParserOptions) -> Self {
        options.log_ignored();
        Self { options }
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Parse template source into a tree. The first error aborts the parse.
    pub fn parse(&self, source: &str) -> Result<Root, ParseError> {
        let lines = Preprocessor::logical_lines(source);
        log::debug!("parsing {} logical line(s)", lines.len());

        let tracker = build_tree(&lines)?;
        let pushes = tracker.pushes();
        let root = tracker.finish();
        log::debug!(
            "parsed {} node(s), {} indent level change(s)",
            root.node_count(),
            pushes
        );
        Ok(root)
    }

}

/// Feed logical lines through the indentation tracker, leaving the last
/// line's blocks open. Blank lines are skipped without touching the stack.
pub(crate) fn build_tree(lines: &[LogicalLine]) -> Result<IndentTracker, ParseError> {
    let mut tracker = IndentTracker::new();
    for line in lines.iter().filter(|l| !l.is_blank()) {
        log::trace!("line {} (indent {}): {}", line.line, line.indent, line.text);
        tracker.advance(line)?;
        if let Some(node) = build_node(&line.text, line.line)? {
            tracker.append(node);
        }
    }
    Ok(tracker)
}

/// Classify one line of text (indentation already stripped) and build its
/// node. Empty text produces no node.
fn build_node(text: &str, line: usize) -> Result<Option<Node>, ParseError> {
    let Some(marker) = text.chars().next() else {
        return Ok(None);
    };

    let node = match marker {
        ELEMENT => Node::Element(parse_element(text, line)?),

        // `.foo` and `#bar` are shorthand for `%div.foo` / `%div#bar`
        DIV_CLASS | DIV_ID => return build_node(&format!("{ELEMENT}div{text}"), line),

        DOCTYPE => {
            if !text.starts_with(DOCTYPE_PREFIX) {
                return Err(ParseError::new(
                    ParseErrorKind::InvalidDoctype,
                    format!("Invalid doctype declaration '{text}'"),
                    line,
                ));
            }
            Node::Doctype(text.to_string())
        }

        COMMENT => Node::HtmlComment(text[1..].trim().to_string()),

        SCRIPT => Node::Script(Code::new(code_after_marker(SCRIPT, &text[1..], line)?)),

        SILENT_SCRIPT => {
            Node::SilentScript(Code::new(code_after_marker(SILENT_SCRIPT, &text[1..], line)?))
        }

        _ => Node::Text(text.to_string()),
    };
    Ok(Some(node))
}

/// Code following a `=`/`-` marker, left-trimmed. Empty code is an error.
pub(crate) fn code_after_marker(marker: char, rest: &str, line: usize) -> Result<String, ParseError> {
    let code = rest.trim_start();
    if code.is_empty() {
        return Err(ParseError::new(
            ParseErrorKind::EmptyCodeExpression,
            format!("There's no code for {marker} to evaluate"),
            line,
        ));
    }
    Ok(code.to_string())
}
