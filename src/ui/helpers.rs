//! Shared rendering utilities.
//!
//! Everything here works on character indices rather than bytes, since book
//! titles and author names are routinely non-ASCII.

use crate::ui::theme::Theme;

/// Positions the cursor at a 1-indexed row and column.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Shortens `text` to at most `max` characters, ending in `...` when cut.
///
/// # Example
///
/// ```rust
/// use libris::ui::helpers::truncate;
///
/// assert_eq!(truncate("Dune", 10), "Dune");
/// assert_eq!(truncate("Dune Messiah", 8), "Dune ...");
/// ```
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    if max <= 3 {
        return text.chars().take(max).collect();
    }
    let mut out: String = text.chars().take(max - 3).collect();
    out.push_str("...");
    out
}

/// Pads `text` with spaces to `width` characters.
#[must_use]
pub fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{text}{}", " ".repeat(width.saturating_sub(len)))
}

/// Renders text with highlighted character ranges for filter matches.
///
/// Ranges are `(start, end)` character indices, end exclusive. Ranges past
/// the end of `text` are clipped. Highlighting is skipped on the selected row
/// so it does not fight the selection background.
pub fn render_highlighted_text(text: &str, ranges: &[(usize, usize)], theme: &Theme, is_selected: bool) {
    if ranges.is_empty() || is_selected {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut pos = 0;

    for &(start, end) in ranges {
        let start = start.clamp(pos, chars.len());
        let end = end.clamp(start, chars.len());

        let normal: String = chars[pos..start].iter().collect();
        print!("{normal}");

        let highlighted: String = chars[start..end].iter().collect();
        print!(
            "{}{}{highlighted}{}",
            Theme::fg(&theme.colors.match_highlight_fg),
            Theme::bg(&theme.colors.match_highlight_bg),
            Theme::reset()
        );
        print!("{}", Theme::fg(&theme.colors.text_normal));

        pos = end;
    }

    let remaining: String = chars[pos..].iter().collect();
    print!("{remaining}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_counts_characters_not_bytes() {
        assert_eq!(truncate("Élan vital", 10), "Élan vital");
        assert_eq!(truncate("Świat według Kiepskich", 8), "Świat...");
    }

    #[test]
    fn truncate_tiny_widths() {
        assert_eq!(truncate("Dune", 2), "Du");
        assert_eq!(truncate("Dune", 0), "");
    }

    #[test]
    fn pad_fills_to_width() {
        assert_eq!(pad("ab", 4), "ab  ");
        assert_eq!(pad("abcdef", 4), "abcdef");
    }
}
