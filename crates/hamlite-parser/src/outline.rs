//! Plain-text outline of a parsed tree, one node per line.
//!
//! Used by `hamlite tree` to show how a template nested. This is a debugging
//! view, not a renderer.

use std::fmt::{self, Write};

use crate::ast::{Code, Element, Node, Root};

impl Root {
    pub fn outline(&self) -> String {
        let mut out = String::new();
        for node in &self.children {
            outline_node(node, &mut out, 0);
        }
        out
    }
}

impl fmt::Display for Root {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.outline())
    }
}

fn outline_node(node: &Node, out: &mut String, depth: usize) {
    out.push_str(&"  ".repeat(depth));
    out.push_str(&node_label(node));
    out.push('\n');

    if let Some(children) = node.children() {
        for child in children {
            outline_node(child, out, depth + 1);
        }
    }
}

fn node_label(node: &Node) -> String {
    match node {
        Node::Element(el) => element_label(el),
        Node::Script(code) => code_label('=', code),
        Node::SilentScript(code) => code_label('-', code),
        Node::Doctype(text) => text.clone(),
        Node::HtmlComment(text) => format!("/ {text}"),
        Node::Text(text) => format!("{text:?}"),
    }
}

fn element_label(el: &Element) -> String {
    let mut label = format!("%{}", el.tag);
    for class in el.static_class.split_whitespace() {
        let _ = write!(label, ".{class}");
    }
    if let Some(id) = &el.static_id {
        let _ = write!(label, "#{id}");
    }
    if let Some(attrs) = &el.old_attributes {
        let _ = write!(label, "{{{attrs}}}");
    }
    if let Some(attrs) = &el.new_attributes {
        let _ = write!(label, "({attrs})");
    }
    if let Some(inline) = &el.inline {
        label.push(' ');
        label.push_str(&node_label(inline));
    }
    label
}

fn code_label(marker: char, code: &Code) -> String {
    if code.mid_block_keyword {
        format!("{marker} {} [mid-block]", code.code)
    } else {
        format!("{marker} {}", code.code)
    }
}

#[cfg(test)]
mod tests {
    use crate::parse;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_outline() {
        assert_eq!(parse("").unwrap().outline(), "");
    }

    #[test]
    fn test_outline_nesting() {
        let root = parse(
            "!!!\n%div.a.b#c{:x => 1}(y=2)= title\n  - if ok\n    hello\n  - else\n    / nope",
        )
        .unwrap();
        assert_eq!(
            root.to_string(),
            "!!!\n\
             %div.a.b#c{:x => 1}(y=2) = title\n\
             \x20 - if ok [mid-block]\n\
             \x20   \"hello\"\n\
             \x20 - else\n\
             \x20   / nope\n"
        );
    }
}
