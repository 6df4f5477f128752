//! Text utilities for TUI rendering.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Wrap text at word boundaries, prefixing every line with `indent`.
///
/// Widths are display columns, so full-width characters count as two.
pub fn wrap_text_indented(text: &str, width: usize, indent: &str) -> Vec<String> {
    let effective_width = width.saturating_sub(UnicodeWidthStr::width(indent));

    if effective_width == 0 {
        return vec![format!("{}{}", indent, text)];
    }

    let mut lines = Vec::new();

    for line in text.lines() {
        if line.is_empty() {
            lines.push(indent.to_string());
            continue;
        }

        let chars: Vec<char> = line.chars().collect();
        let mut start = 0;

        while start < chars.len() {
            // Longest run starting at `start` that fits the width
            let mut end = start;
            let mut used = 0;
            while end < chars.len() {
                let ch_width = UnicodeWidthChar::width(chars[end]).unwrap_or(1);
                if used + ch_width > effective_width {
                    break;
                }
                used += ch_width;
                end += 1;
            }

            if end == chars.len() {
                let rest: String = chars[start..].iter().collect();
                lines.push(format!("{}{}", indent, rest));
                break;
            }

            // A single character wider than the pane still has to advance
            if end == start {
                end = start + 1;
            }

            // Break at the last space inside the window, or hard-break
            let break_at = chars[start..end]
                .iter()
                .rposition(|c| *c == ' ')
                .filter(|&offset| offset > 0)
                .map(|offset| start + offset)
                .unwrap_or(end);

            let chunk: String = chars[start..break_at].iter().collect();
            lines.push(format!("{}{}", indent, chunk.trim_end()));

            start = break_at;
            while start < chars.len() && chars[start] == ' ' {
                start += 1;
            }
        }
    }

    if lines.is_empty() {
        lines.push(indent.to_string());
    }

    lines
}

/// Truncate a string to fit within a given width, adding ellipsis if needed.
pub fn truncate(text: &str, max_width: usize) -> String {
    if max_width < 3 {
        return text.chars().take(max_width).collect();
    }

    let total: usize = text
        .chars()
        .map(|ch| UnicodeWidthChar::width(ch).unwrap_or(1))
        .sum();
    if total <= max_width {
        return text.to_string();
    }

    let mut width = 0;
    let mut result = String::new();
    for ch in text.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(1);
        if width + ch_width > max_width - 3 {
            break;
        }
        result.push(ch);
        width += ch_width;
    }
    result.push_str("...");
    result
}
