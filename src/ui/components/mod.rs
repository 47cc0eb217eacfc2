//! Composable UI component renderers.
//!
//! # Components
//!
//! - [`header`]: Title bar
//! - [`input`]: Query / filter input box
//! - [`status`]: Status message line
//! - [`table`]: Book list with columns (★, TITLE, AUTHORS, SAVED)
//! - [`empty`]: Empty state message in place of the rows
//! - [`pagination`]: Previous/next controls
//! - [`footer`]: Keybinding hints
//!
//! # Layout
//!
//! ```text
//! [Header]
//! [Border]
//! [Input Box - 3 lines]
//! [Status]
//! [Table Headers]
//! [Table Rows | Empty State]
//! [Blank padding]
//! [Pagination]
//! [Border]
//! [Footer]
//! ```

mod empty;
mod footer;
mod header;
mod input;
mod pagination;
mod status;
mod table;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

use empty::render_empty_state;
use footer::render_footer;
use header::render_header;
use input::render_input_bar;
use pagination::render_pagination;
use status::render_status;
use table::{render_table_headers, render_table_rows};

/// Renders a horizontal border line and returns the next row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}{}{}", Theme::fg(color), "─".repeat(cols), Theme::reset());
    row + 1
}

/// Renders the full screen for a view model.
///
/// The bottom three rows (pagination, border, footer) are anchored to the
/// pane bottom; table rows fill the space between.
pub fn render_layout(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 1;

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    current_row = render_input_bar(current_row, &vm.input_bar, theme, cols);
    current_row = render_status(current_row, vm.status.as_ref(), theme, cols);
    current_row = render_table_headers(current_row, &vm.columns, theme, cols);

    if let Some(empty) = &vm.empty_state {
        render_empty_state(current_row, empty, theme, cols);
    } else {
        render_table_rows(current_row, &vm.display_items, &vm.columns, theme, cols);
    }

    let footer_row = rows;
    let border_row = footer_row.saturating_sub(1);
    let pagination_row = border_row.saturating_sub(1);

    if let Some(pagination) = &vm.pagination {
        render_pagination(pagination_row, pagination, theme, cols);
    }
    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_row, &vm.footer, theme, cols);
}
