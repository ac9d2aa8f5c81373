//! Element line parser.
//!
//! Grammar, in order:
//!
//! ```text
//! %tag  (.class | #id)*  ( {old-style} | (new-style) ){0,2}  content?
//! ```
//!
//! Each attribute block kind may appear once, in either order. Meeting a
//! block of a kind already captured ends attribute scanning and the rest
//! of the line becomes content. Block interiors are kept verbatim.

use crate::ast::{Code, Element, Node};
use crate::parser::{code_after_marker, ELEMENT, SCRIPT};
use crate::{ParseError, ParseErrorKind};

/// Parse an element line (text starting with `%`) into an `Element`.
pub fn parse_element(text: &str, line: usize) -> Result<Element, ParseError> {
    ElementScanner::new(text, line).parse()
}

struct ElementScanner<'a> {
    source: &'a str,
    chars: Vec<char>,
    pos: usize,
    line: usize,
}

impl<'a> ElementScanner<'a> {
    fn new(source: &'a str, line: usize) -> Self {
        Self {
            source,
            chars: source.chars().collect(),
            pos: 0,
            line,
        }
    }

    fn parse(mut self) -> Result<Element, ParseError> {
        if self.peek() == Some(ELEMENT) {
            self.advance();
        }

        // Stage 1: tag name
        let tag = self.take_while(is_tag_char);
        if tag.is_empty() {
            return Err(ParseError::new(
                ParseErrorKind::InvalidElementDeclaration,
                format!("Invalid element declaration '{}'", self.source),
                self.line,
            ));
        }

        // Stage 2: .class / #id shorthand
        let mut classes: Vec<String> = Vec::new();
        let mut static_id = None;

        while let Some(prefix @ ('.' | '#')) = self.peek() {
            self.advance();
            let name = self.take_while(is_name_char);
            if name.is_empty() {
                continue;
            }
            if prefix == '.' {
                classes.push(name);
            } else {
                static_id = Some(name);
            }
        }

        // Stage 3: attribute blocks, each kind at most once
        let mut old_attributes = None;
        let mut new_attributes = None;

        loop {
            match self.peek() {
                Some('{') if old_attributes.is_none() => {
                    old_attributes = Some(self.scan_balanced('{', '}', "brace")?);
                }
                Some('(') if new_attributes.is_none() => {
                    new_attributes = Some(self.scan_balanced('(', ')', "parenthesis")?);
                }
                _ => break,
            }
        }

        // Stage 4: inline content
        let rest: String = self.chars[self.pos..].iter().collect();
        let inline = self.parse_inline(rest.trim_start())?;

        log::trace!(
            "element %{tag} at line {}: {} class(es), id={static_id:?}",
            self.line,
            classes.len()
        );

        Ok(Element {
            tag,
            static_class: classes.join(" "),
            static_id,
            old_attributes,
            new_attributes,
            inline,
            children: Vec::new(),
        })
    }

    fn parse_inline(&self, rest: &str) -> Result<Option<Box<Node>>, ParseError> {
        if let Some(code) = rest.strip_prefix(SCRIPT) {
            let code = code_after_marker(SCRIPT, code, self.line)?;
            return Ok(Some(Box::new(Node::Script(Code::new(code)))));
        }
        if rest.is_empty() {
            return Ok(None);
        }
        Ok(Some(Box::new(Node::Text(rest.to_string()))))
    }

    /// Capture a balanced `open ... close` span starting at the current
    /// position and return its interior.
    fn scan_balanced(&mut self, open: char, close: char, name: &str) -> Result<String, ParseError> {
        let start = self.pos;
        let mut depth = 0usize;

        while let Some(c) = self.peek() {
            self.advance();
            if c == open {
                depth += 1;
            } else if c == close {
                depth -= 1;
                if depth == 0 {
                    return Ok(self.chars[start + 1..self.pos - 1].iter().collect());
                }
            }
        }

        Err(ParseError::new(
            ParseErrorKind::UnmatchedBrace,
            format!("Unmatched {name} in attribute list"),
            self.line,
        ))
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> String {
        let start = self.pos;
        while self.peek().is_some_and(&pred) {
            self.advance();
        }
        self.chars[start..self.pos].iter().collect()
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn advance(&mut self) {
        if self.pos < self.chars.len() {
            self.pos += 1;
        }
    }
}

fn is_tag_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | ':' | '_')
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn element(text: &str) -> Element {
        parse_element(text, 1).unwrap()
    }

    fn error(text: &str) -> ParseError {
        parse_element(text, 7).unwrap_err()
    }

    // =========================================================================
    // Tag names
    // =========================================================================

    #[test]
    fn test_bare_tag() {
        assert_eq!(
            element("%br"),
            Element {
                tag: "br".into(),
                ..Element::default()
            }
        );
    }

    #[test]
    fn test_tag_with_namespace_and_hyphen() {
        assert_eq!(element("%fb:like-box_2").tag, "fb:like-box_2");
    }

    #[test]
    fn test_missing_tag_name() {
        let err = error("%.foo");
        assert_eq!(err.kind, ParseErrorKind::InvalidElementDeclaration);
        assert_eq!(err.line, 7);
        assert_eq!(err.to_string(), "Invalid element declaration '%.foo' at line 7");
    }

    #[test]
    fn test_lone_marker() {
        assert_eq!(error("%").kind, ParseErrorKind::InvalidElementDeclaration);
    }

    // =========================================================================
    // Class / id shorthand
    // =========================================================================

    #[test]
    fn test_classes_and_id() {
        let el = element("%div.a.b#c");
        assert_eq!(el.static_class, "a b");
        assert_eq!(el.static_id.as_deref(), Some("c"));
    }

    #[test]
    fn test_id_before_classes() {
        let el = element("%div#c.a.b");
        assert_eq!(el.static_class, "a b");
        assert_eq!(el.static_id.as_deref(), Some("c"));
    }

    #[test]
    fn test_last_id_wins() {
        assert_eq!(element("%p#one.x#two").static_id.as_deref(), Some("two"));
    }

    #[test]
    fn test_empty_shorthand_skipped() {
        let el = element("%p..a#");
        assert_eq!(el.static_class, "a");
        assert_eq!(el.static_id, None);
        assert!(el.inline.is_none());
    }

    #[test]
    fn test_hyphenated_class() {
        assert_eq!(element("%span.text-2xl.bg_blue").static_class, "text-2xl bg_blue");
    }

    // =========================================================================
    // Attribute blocks
    // =========================================================================

    #[test]
    fn test_old_style_attributes() {
        let el = element("%a{:href => '/', :title => 'Home'}");
        assert_eq!(el.old_attributes.as_deref(), Some(":href => '/', :title => 'Home'"));
        assert_eq!(el.new_attributes, None);
    }

    #[test]
    fn test_nested_braces_captured_verbatim() {
        let el = element("%div{foo: {bar: 1}} text");
        assert_eq!(el.old_attributes.as_deref(), Some("foo: {bar: 1}"));
        assert_eq!(el.inline, Some(Box::new(Node::Text("text".into()))));
    }

    #[test]
    fn test_new_style_attributes() {
        let el = element("%input(type=\"text\" value=(x))");
        assert_eq!(el.new_attributes.as_deref(), Some("type=\"text\" value=(x)"));
    }

    #[test]
    fn test_both_blocks_either_order() {
        let a = element("%a{:b => 1}(c=2)");
        let b = element("%a(c=2){:b => 1}");
        assert_eq!(a.old_attributes.as_deref(), Some(":b => 1"));
        assert_eq!(a.new_attributes.as_deref(), Some("c=2"));
        assert_eq!(a, b);
    }

    #[test]
    fn test_repeated_block_becomes_content() {
        let el = element("%a{x}{y}");
        assert_eq!(el.old_attributes.as_deref(), Some("x"));
        assert_eq!(el.inline, Some(Box::new(Node::Text("{y}".into()))));
    }

    #[test]
    fn test_space_before_block_is_content() {
        let el = element("%p {a}");
        assert_eq!(el.old_attributes, None);
        assert_eq!(el.inline, Some(Box::new(Node::Text("{a}".into()))));
    }

    #[test]
    fn test_unmatched_brace() {
        let err = error("%div{foo: {bar: 1}");
        assert_eq!(err.kind, ParseErrorKind::UnmatchedBrace);
        assert_eq!(err.line, 7);
    }

    #[test]
    fn test_unmatched_paren() {
        let err = error("%div(a=(1)");
        assert_eq!(err.kind, ParseErrorKind::UnmatchedBrace);
        assert!(err.message.contains("parenthesis"));
    }

    // =========================================================================
    // Inline content
    // =========================================================================

    #[test]
    fn test_inline_text() {
        let el = element("%p Hello");
        assert_eq!(el.tag, "p");
        assert_eq!(el.inline, Some(Box::new(Node::Text("Hello".into()))));
    }

    #[test]
    fn test_inline_script() {
        let el = element("%p= hello");
        assert_eq!(el.inline, Some(Box::new(Node::Script(Code::new("hello")))));
    }

    #[test]
    fn test_inline_script_after_attributes() {
        let el = element("%p.x{:a => 1}  =  user.name");
        assert_eq!(el.inline, Some(Box::new(Node::Script(Code::new("user.name")))));
    }

    #[test]
    fn test_empty_inline_script() {
        let err = error("%p=   ");
        assert_eq!(err.kind, ParseErrorKind::EmptyCodeExpression);
        assert_eq!(err.line, 7);
    }

    #[test]
    fn test_no_inline_content() {
        assert!(element("%p.a#b").inline.is_none());
    }
}
