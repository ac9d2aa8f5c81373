//! Syntax tree for hamlite templates.
//!
//! The tree is a strict forest under a single `Root`. Nesting mirrors the
//! indentation of the source; element attribute blocks and script code are
//! kept verbatim and never interpreted.

use serde::Serialize;

/// A complete parsed template.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Root {
    pub children: Vec<Node>,
}

/// A node in the template tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Node {
    /// `%tag.class#id{...}(...) content`
    Element(Element),

    /// `= code`, output of an evaluated expression.
    Script(Code),

    /// `- code`, evaluated without output.
    SilentScript(Code),

    /// `!!! ...`, stored as written.
    Doctype(String),

    /// `/ text`, with the marker stripped and the text trimmed.
    HtmlComment(String),

    /// Any other line, stored as written.
    Text(String),
}

/// An element declaration.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Element {
    pub tag: String,
    /// Shorthand classes in source order, space-joined. Empty when none.
    pub static_class: String,
    /// Last `#id` shorthand on the line.
    pub static_id: Option<String>,
    /// Interior of the `{...}` block.
    pub old_attributes: Option<String>,
    /// Interior of the `(...)` block.
    pub new_attributes: Option<String>,
    /// Content on the same line as the tag: text or an inline `=` script.
    pub inline: Option<Box<Node>>,
    pub children: Vec<Node>,
}

/// Body of a `Script` or `SilentScript` node.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Code {
    pub code: String,
    /// Set when the line that closed this node's nested block continues
    /// the construct (`- else` after `- if`).
    pub mid_block_keyword: bool,
    pub children: Vec<Node>,
}

impl Code {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            ..Self::default()
        }
    }
}

impl Node {
    /// Nested children for container nodes; `None` for leaves.
    pub fn children(&self) -> Option<&Vec<Node>> {
        match self {
            Node::Element(el) => Some(&el.children),
            Node::Script(code) | Node::SilentScript(code) => Some(&code.children),
            Node::Doctype(_) | Node::HtmlComment(_) | Node::Text(_) => None,
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Element(el) => Some(&mut el.children),
            Node::Script(code) | Node::SilentScript(code) => Some(&mut code.children),
            Node::Doctype(_) | Node::HtmlComment(_) | Node::Text(_) => None,
        }
    }

    /// The script body, for the two script variants.
    pub fn code_mut(&mut self) -> Option<&mut Code> {
        match self {
            Node::Script(code) | Node::SilentScript(code) => Some(code),
            _ => None,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Element(_) => "element",
            Node::Script(_) => "script",
            Node::SilentScript(_) => "silent script",
            Node::Doctype(_) => "doctype",
            Node::HtmlComment(_) => "comment",
            Node::Text(_) => "plain text",
        }
    }
}

impl Root {
    /// Every node in document order, parents before their children.
    pub fn walk(&self) -> impl Iterator<Item = &Node> {
        let mut stack: Vec<&Node> = self.children.iter().rev().collect();
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            if let Some(children) = node.children() {
                stack.extend(children.iter().rev());
            }
            Some(node)
        })
    }

    pub fn node_count(&self) -> usize {
        self.walk().count()
    }
}
