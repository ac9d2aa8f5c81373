//! Indentation tracking.
//!
//! Keeps the stack of indent widths seen so far and the node whose
//! children currently receive new siblings. Open nodes are owned by the
//! tracker while their block is being filled and are handed back to their
//! parent when a dedent closes them.

use hamlite_lexer::{is_mid_block, LogicalLine};

use crate::ast::{Node, Root};
use crate::{ParseError, ParseErrorKind};

/// Per-parse indentation state.
///
/// Invariant: `open.len() == widths.len() - 1`. `open[i]` is the node
/// whose children live at width `widths[i + 1]`.
#[derive(Debug)]
pub struct IndentTracker {
    widths: Vec<usize>,
    open: Vec<Node>,
    root: Vec<Node>,
    pushes: usize,
}

impl IndentTracker {
    pub fn new() -> Self {
        Self {
            widths: vec![0],
            open: Vec::new(),
            root: Vec::new(),
            pushes: 0,
        }
    }

    /// Indent widths currently on the stack, outermost first.
    pub fn widths(&self) -> &[usize] {
        &self.widths
    }

    /// Number of indent increases seen so far.
    pub fn pushes(&self) -> usize {
        self.pushes
    }

    /// Move the insertion point to where `line` belongs.
    pub fn advance(&mut self, line: &LogicalLine) -> Result<(), ParseError> {
        let top = self.top();
        if line.indent > top {
            self.descend(line.indent, line.line)
        } else if line.indent < top {
            self.ascend(line.indent, &line.text, line.line)
        } else {
            Ok(())
        }
    }

    /// Attach a node at the current insertion point.
    pub fn append(&mut self, node: Node) {
        self.insertion_point().push(node);
    }

    /// Dedent back to width 0, closing every open block. Afterwards the
    /// stack is `[0]` and the insertion point is the root.
    pub fn close_all(&mut self) {
        // Empty text never matches a block keyword.
        self.close_to(0, "");
    }

    /// Close every open block and return the finished tree.
    pub fn finish(mut self) -> Root {
        self.close_all();
        Root {
            children: self.root,
        }
    }

    fn descend(&mut self, width: usize, line: usize) -> Result<(), ParseError> {
        match self.insertion_point().last() {
            None => {
                return Err(ParseError::new(
                    ParseErrorKind::UnexpectedIndentLevel,
                    "Indenting at the beginning of the document is illegal",
                    line,
                ));
            }
            Some(leaf) if leaf.children().is_none() => {
                return Err(ParseError::new(
                    ParseErrorKind::IllegalNesting,
                    format!("Illegal nesting: nesting within {} is illegal", leaf.kind_name()),
                    line,
                ));
            }
            Some(_) => {}
        }

        if let Some(parent) = self.insertion_point().pop() {
            log::trace!("indent to {width} under {} at line {line}", parent.kind_name());
            self.widths.push(width);
            self.open.push(parent);
            self.pushes += 1;
        }
        Ok(())
    }

    fn ascend(&mut self, width: usize, text: &str, line: usize) -> Result<(), ParseError> {
        self.close_to(width, text);

        if self.top() != width {
            return Err(ParseError::new(
                ParseErrorKind::UnexpectedIndentLevel,
                format!("Inconsistent indentation: {width} spaces do not match any outer level"),
                line,
            ));
        }
        Ok(())
    }

    /// Pop every level deeper than `width`, deciding for each closed script
    /// whether `text` continues it.
    fn close_to(&mut self, width: usize, text: &str) {
        while width < self.top() {
            self.widths.pop();
            let Some(mut node) = self.open.pop() else {
                break;
            };
            if let Some(code) = node.code_mut() {
                code.mid_block_keyword = is_mid_block(text);
            }
            log::trace!("dedent to {width}, closing {}", node.kind_name());
            self.insertion_point().push(node);
        }
    }

    fn top(&self) -> usize {
        self.widths.last().copied().unwrap_or(0)
    }

    fn insertion_point(&mut self) -> &mut Vec<Node> {
        match self.open.last_mut().and_then(Node::children_mut) {
            Some(children) => children,
            None => &mut self.root,
        }
    }
}
