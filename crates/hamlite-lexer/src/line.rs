/// One logical line: the joined text of a raw line plus any ` |` continuation
/// lines that follow it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalLine {
    /// Text with the leading indentation stripped.
    pub text: String,
    /// Number of leading spaces.
    pub indent: usize,
    /// 1-based number of the first raw line in the group.
    pub line: usize,
}

impl LogicalLine {
    pub fn new(text: impl Into<String>, indent: usize, line: usize) -> Self {
        Self {
            text: text.into(),
            indent,
            line,
        }
    }

    /// Split a joined, right-trimmed buffer into indentation and text.
    pub fn from_joined(buffer: &str, line: usize) -> Self {
        let text = buffer.trim_start_matches(' ');
        Self::new(text, buffer.len() - text.len(), line)
    }

    pub fn is_blank(&self) -> bool {
        self.text.is_empty()
    }
}
