//! Preview script formatting and parsing.

use crate::Segment;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*\[(\d+)s\s*-\s*(\d+)s\]\s*(.*)$").expect("Valid timestamp tag regex")
});

/// One tagged line of a preview script.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimedLine {
    /// Start offset in seconds
    pub start: u32,
    /// End offset in seconds
    pub end: u32,
    /// Text following the tag
    pub text: String,
}

impl TimedLine {
    /// Length of the line's time range.
    pub fn duration(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }
}

/// Format segments as `[start s-end s] description` lines with cumulative offsets.
pub(crate) fn format_preview(segments: &[Segment]) -> String {
    let mut start = 0;
    segments
        .iter()
        .map(|segment| {
            let end = start + segment.duration;
            let line = format!("[{}s-{}s] {}", start, end, segment.description.trim());
            start = end;
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Re-derive timed lines from preview text.
///
/// Untagged lines are folded into the text of the preceding tagged line.
/// Text before the first tag is ignored.
///
/// # Examples
///
/// ```
/// use reelsmith_storyboard::parse_preview;
///
/// let lines = parse_preview("[0s-4s] A\n[4s-10s] B\nstill B");
/// assert_eq!(lines.len(), 2);
/// assert_eq!((lines[1].start, lines[1].end), (4, 10));
/// assert_eq!(lines[1].text, "B still B");
/// ```
pub fn parse_preview(text: &str) -> Vec<TimedLine> {
    let mut lines: Vec<TimedLine> = Vec::new();
    for raw in text.lines() {
        if let Some(caps) = TAG.captures(raw) {
            let start = caps[1].parse().unwrap_or(u32::MAX);
            let end = caps[2].parse().unwrap_or(u32::MAX);
            lines.push(TimedLine {
                start,
                end,
                text: caps[3].trim().to_string(),
            });
        } else if let Some(last) = lines.last_mut() {
            let extra = raw.trim();
            if !extra.is_empty() {
                if !last.text.is_empty() {
                    last.text.push(' ');
                }
                last.text.push_str(extra);
            }
        }
    }
    lines
}

/// Collapse runs of line breaks and the blank space around them to one `\n`.
///
/// # Examples
///
/// ```
/// use reelsmith_storyboard::collapse_separators;
///
/// assert_eq!(collapse_separators("  a \n\n\n  b\r\n \n c  "), "a\nb\nc");
/// ```
pub fn collapse_separators(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(id: u32, duration: u32, description: &str) -> Segment {
        Segment {
            id,
            duration,
            description: description.to_string(),
        }
    }

    #[test]
    fn format_uses_cumulative_offsets() {
        let text = format_preview(&[segment(1, 3, "a"), segment(2, 2, " b "), segment(3, 5, "c")]);
        assert_eq!(text, "[0s-3s] a\n[3s-5s] b\n[5s-10s] c");
    }

    #[test]
    fn parse_ignores_preamble() {
        let lines = parse_preview("intro\n[0s-2s] x");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "x");
        assert_eq!(lines[0].duration(), 2);
    }

    #[test]
    fn parse_accepts_spaced_dash() {
        let lines = parse_preview("[0s - 5s] wide");
        assert_eq!((lines[0].start, lines[0].end), (0, 5));
    }

    #[test]
    fn collapse_of_blank_text_is_empty() {
        assert_eq!(collapse_separators(" \n\n \t\n"), "");
    }
}
