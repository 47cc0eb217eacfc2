//! Input box component for the search query and the bookmark filter.
//!
//! ```text
//!      ┌────────────────────────────────┐
//!      │ Search: dune messiah_          │
//!      └────────────────────────────────┘
//! ```

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::InputBarInfo;

const INPUT_BOX_MARGIN: usize = 5;

/// Renders the three-row input box. The border is dimmed while the field
/// does not have focus.
///
/// Returns the next free row.
pub fn render_input_bar(row: usize, input: &InputBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(INPUT_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let border = if input.is_focused {
        &theme.colors.search_bar_border
    } else {
        &theme.colors.border
    };

    position_cursor(row, 1);
    print!("{}", " ".repeat(INPUT_BOX_MARGIN));
    print!("{}┌{}┐{}", Theme::fg(border), "─".repeat(inner_width), Theme::reset());

    let cursor = if input.is_focused { "_" } else { "" };
    let prefix = format!(" {}: ", input.label);
    let room = inner_width.saturating_sub(prefix.chars().count() + cursor.len());
    let text_len = input.text.chars().count();
    // Keep the end of long input visible, where the user is typing.
    let visible: String = input.text.chars().skip(text_len.saturating_sub(room)).collect();
    let used = prefix.chars().count() + visible.chars().count() + cursor.len();

    position_cursor(row + 1, 1);
    print!("{}", " ".repeat(INPUT_BOX_MARGIN));
    print!("{}│", Theme::fg(border));
    print!("{}{prefix}", Theme::fg(&theme.colors.text_dim));
    print!("{}{visible}{cursor}", Theme::fg(&theme.colors.text_normal));
    print!("{}", " ".repeat(inner_width.saturating_sub(used)));
    print!("{}│{}", Theme::fg(border), Theme::reset());

    position_cursor(row + 2, 1);
    print!("{}", " ".repeat(INPUT_BOX_MARGIN));
    print!("{}└{}┘{}", Theme::fg(border), "─".repeat(inner_width), Theme::reset());

    row + 3
}
