//! Snippet construction (§4.9): `2·context + 1` lines centered on the sink
//! line, highlighting the sink line.

use codepathfinder_common::{Snippet, SnippetLine};

pub const DEFAULT_CONTEXT: usize = 3;

/// Build a snippet window from 1-indexed `file_lines` centered on
/// `sink_line`, clamped to the file's bounds.
pub fn build(file_lines: &[String], sink_line: usize, context: usize) -> Snippet {
    if sink_line == 0 || file_lines.is_empty() {
        return Snippet::default();
    }
    let total = file_lines.len();
    let start = sink_line.saturating_sub(context).max(1);
    let end = (sink_line + context).min(total);

    let lines = (start..=end)
        .filter_map(|n| {
            file_lines.get(n - 1).map(|text| SnippetLine {
                number: n,
                text: text.clone(),
                highlighted: n == sink_line,
            })
        })
        .collect();
    Snippet { lines }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn file(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("line{i}")).collect()
    }

    #[test]
    fn centers_window_on_sink_line() {
        let snippet = build(&file(20), 10, 3);
        assert_eq!(snippet.lines.len(), 7);
        assert_eq!(snippet.lines[0].number, 7);
        assert_eq!(snippet.lines.last().unwrap().number, 13);
        assert!(snippet.lines[3].highlighted);
        assert_eq!(snippet.lines[3].number, 10);
    }

    #[test]
    fn clamps_at_file_start() {
        let snippet = build(&file(20), 2, 3);
        assert_eq!(snippet.lines.first().unwrap().number, 1);
        assert!(snippet.lines.iter().any(|l| l.number == 2 && l.highlighted));
    }

    #[test]
    fn clamps_at_file_end() {
        let snippet = build(&file(20), 19, 3);
        assert_eq!(snippet.lines.last().unwrap().number, 20);
    }

    #[test]
    fn empty_file_yields_empty_snippet() {
        let snippet = build(&[], 5, 3);
        assert!(snippet.lines.is_empty());
    }
}
