use std::sync::LazyLock;

use regex::Regex;

use crate::line::LogicalLine;

/// Trailing character that joins a raw line with the next one.
pub const MULTILINE_MARKER: char = '|';

/// Block signatures such as `- list.each do | a, b |` end in a spaced pipe
/// but are never continuation lines.
static BLOCK_WITH_SPACES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"do\s*\|\s*[^|]*\s+\|$").expect("block signature pattern is valid")
});

/// Template line preprocessor.
///
/// Splits source text into raw lines, trims trailing whitespace from each,
/// and folds ` |` continuation groups into single logical lines. Blank
/// logical lines are dropped: they produce no node and never move the
/// indentation stack.
pub struct Preprocessor<'a> {
    raw: Vec<&'a str>,
    pos: usize,
    lines: Vec<LogicalLine>,
}

impl<'a> Preprocessor<'a> {
    /// Create a preprocessor over already-normalized source text.
    fn new(source: &'a str) -> Self {
        Self {
            raw: source.split('\n').map(str::trim_end).collect(),
            pos: 0,
            lines: Vec::new(),
        }
    }

    /// Reassemble the source into its logical lines.
    pub fn logical_lines(source: &str) -> Vec<LogicalLine> {
        let normalized = normalize_line_endings(source);
        let mut preprocessor = Preprocessor::new(&normalized);
        preprocessor.scan_lines();
        preprocessor.lines
    }

    fn scan_lines(&mut self) {
        while self.pos < self.raw.len() {
            let start = self.pos;
            let first = self.raw[start];
            self.pos += 1;

            let logical = if is_multiline(first) {
                let mut buffer = strip_marker(first).to_string();
                while self.pos < self.raw.len() && is_multiline(self.raw[self.pos]) {
                    buffer.push_str(strip_marker(self.raw[self.pos].trim_start()));
                    self.pos += 1;
                }
                log::trace!(
                    "joined raw lines {}..={} into one logical line",
                    start + 1,
                    self.pos
                );
                LogicalLine::from_joined(buffer.trim_end(), start + 1)
            } else {
                LogicalLine::from_joined(first, start + 1)
            };

            if !logical.is_blank() {
                self.lines.push(logical);
            }
        }
    }
}

/// Whether a right-trimmed raw line opens or continues a ` |` group.
pub fn is_multiline(line: &str) -> bool {
    let Some(body) = line.strip_suffix(MULTILINE_MARKER) else {
        return false;
    };
    body.ends_with(char::is_whitespace) && !BLOCK_WITH_SPACES.is_match(line)
}

fn strip_marker(line: &str) -> &str {
    line.strip_suffix(MULTILINE_MARKER).unwrap_or(line)
}

fn normalize_line_endings(source: &str) -> String {
    source.replace("\r\n", "\n").replace('\r', "\n")
}
