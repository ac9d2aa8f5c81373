//! Block keyword detection.
//!
//! When a dedent hands control back to an enclosing script node, the line
//! that caused the dedent may continue that construct (`- else` under
//! `- if`) rather than start a new statement. This is a purely lexical
//! check over a closed keyword vocabulary; the embedded code is never
//! parsed.

use std::sync::LazyLock;

use regex::Regex;

/// Keywords that continue an already-open control construct.
pub const MID_BLOCK_KEYWORDS: &[&str] = &["else", "elsif", "rescue", "ensure", "end", "when"];

/// Keywords that open a control construct.
pub const START_BLOCK_KEYWORDS: &[&str] = &["if", "begin", "case", "unless"];

static MID_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^-?\s*({})\b", MID_BLOCK_KEYWORDS.join("|")))
        .expect("mid-block keyword pattern is valid")
});

// `x = if cond` and `a, b = case v` open blocks too.
static START_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^-?\s*(?:\w+(?:\s*,\s*\w+)*\s*=\s*)?({})\b",
        START_BLOCK_KEYWORDS.join("|")
    ))
    .expect("start-block keyword pattern is valid")
});

/// The control keyword a line leads with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKeyword {
    /// `else`, `elsif`, `rescue`, `ensure`, `end`, `when`
    Mid(&'static str),
    /// `if`, `begin`, `case`, `unless`
    Start(&'static str),
}

impl BlockKeyword {
    pub fn keyword(self) -> &'static str {
        match self {
            BlockKeyword::Mid(k) | BlockKeyword::Start(k) => k,
        }
    }

    pub fn is_mid_block(self) -> bool {
        matches!(self, BlockKeyword::Mid(_))
    }
}

/// Classify the leading keyword of a line's text (indentation already
/// stripped). The mid-block alternation is tried before the start-block one.
pub fn block_keyword(text: &str) -> Option<BlockKeyword> {
    if let Some(keyword) = capture(&MID_BLOCK, text, MID_BLOCK_KEYWORDS) {
        return Some(BlockKeyword::Mid(keyword));
    }
    capture(&START_BLOCK, text, START_BLOCK_KEYWORDS).map(BlockKeyword::Start)
}

/// Whether `text` continues the construct it dedents back into.
pub fn is_mid_block(text: &str) -> bool {
    let mid = block_keyword(text).is_some_and(BlockKeyword::is_mid_block);
    log::trace!("block keyword check {text:?}: mid_block={mid}");
    mid
}

fn capture(pattern: &Regex, text: &str, vocabulary: &[&'static str]) -> Option<&'static str> {
    let found = pattern.captures(text)?.get(1)?.as_str();
    vocabulary.iter().copied().find(|k| *k == found)
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Mid-block keywords
    // =========================================================================

    #[test]
    fn test_all_mid_block_keywords() {
        for &keyword in MID_BLOCK_KEYWORDS {
            let line = format!("- {keyword}");
            assert_eq!(block_keyword(&line), Some(BlockKeyword::Mid(keyword)));
            assert!(is_mid_block(&line), "{line} should be mid-block");
        }
    }

    #[test]
    fn test_elsif_with_condition() {
        assert_eq!(block_keyword("- elsif x > 1"), Some(BlockKeyword::Mid("elsif")));
    }

    #[test]
    fn test_marker_optional() {
        assert!(is_mid_block("else"));
        assert!(is_mid_block("-else"));
        assert!(is_mid_block("-   else"));
    }

    #[test]
    fn test_when_with_value() {
        assert!(is_mid_block("- when 1, 2"));
    }

    #[test]
    fn test_keyword_needs_word_boundary() {
        assert!(!is_mid_block("- elsewhere"));
        assert!(!is_mid_block("- ending = 1"));
        assert_eq!(block_keyword("- iffy"), None);
    }

    #[test]
    fn test_keyword_not_leading() {
        assert!(!is_mid_block("- foo else"));
        assert!(!is_mid_block("= else"));
        assert!(!is_mid_block("%p else"));
    }

    #[test]
    fn test_plain_text_starting_with_keyword() {
        // lexical heuristic: prose starting with `end` still counts
        assert!(is_mid_block("end of story"));
    }

    // =========================================================================
    // Start-block keywords
    // =========================================================================

    #[test]
    fn test_start_block_keywords() {
        for &keyword in START_BLOCK_KEYWORDS {
            let line = format!("- {keyword} x");
            assert_eq!(block_keyword(&line), Some(BlockKeyword::Start(keyword)));
            assert!(!is_mid_block(&line));
        }
    }

    #[test]
    fn test_assignment_prefixed_start_block() {
        assert_eq!(block_keyword("- x = if y"), Some(BlockKeyword::Start("if")));
        assert_eq!(block_keyword("- a, b = case v"), Some(BlockKeyword::Start("case")));
        assert_eq!(block_keyword("- a,b=begin"), Some(BlockKeyword::Start("begin")));
    }

    #[test]
    fn test_unrelated_lines() {
        assert_eq!(block_keyword(""), None);
        assert_eq!(block_keyword("%p"), None);
        assert_eq!(block_keyword("- foo.bar = if x"), None);
        assert!(!is_mid_block(""));
    }

    #[test]
    fn test_keyword_accessors() {
        assert_eq!(BlockKeyword::Mid("else").keyword(), "else");
        assert_eq!(BlockKeyword::Start("if").keyword(), "if");
        assert!(!BlockKeyword::Start("if").is_mid_block());
    }
}
