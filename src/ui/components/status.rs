//! Status line: searching indicator, search errors and bookmark notices.

use crate::ui::helpers::{pad, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{StatusKind, StatusLine};

/// Renders the status message, or a blank line when there is none.
pub fn render_status(row: usize, status: Option<&StatusLine>, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    let Some(status) = status else {
        print!("{}", " ".repeat(cols));
        return row + 1;
    };

    let color = match status.kind {
        StatusKind::Info => &theme.colors.text_normal,
        StatusKind::Error => &theme.colors.error_fg,
    };

    let text = truncate(&format!("  {}", status.message), cols);
    print!("{}{}{}", Theme::fg(color), pad(&text, cols), Theme::reset());
    row + 1
}
