//! Previous/next page controls.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::PaginationInfo;

/// Renders `‹ prev   page N · results A-B of ~T   next ›`, dimming the
/// controls that are disabled.
pub fn render_pagination(row: usize, pagination: &PaginationInfo, theme: &Theme, cols: usize) -> usize {
    let prev = "‹ prev (p)";
    let next = "(n) next ›";
    let middle = if pagination.range_label.is_empty() {
        format!("page {}", pagination.page)
    } else {
        format!("page {} · {}", pagination.page, pagination.range_label)
    };

    let control = |enabled: bool| {
        if enabled {
            Theme::fg(&theme.colors.text_normal)
        } else {
            format!("{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim))
        }
    };

    let used = prev.chars().count() + middle.chars().count() + next.chars().count();
    let gap = cols.saturating_sub(used + 4) / 2;

    position_cursor(row, 1);
    print!("  {}{prev}{}", control(pagination.has_previous), Theme::reset());
    print!("{}", " ".repeat(gap));
    print!("{}{middle}{}", Theme::fg(&theme.colors.text_dim), Theme::reset());
    print!("{}", " ".repeat(gap));
    print!("{}{next}{}", control(pagination.has_next), Theme::reset());
    print!("{}", " ".repeat(cols.saturating_sub(used + 2 + gap * 2)));
    row + 1
}
