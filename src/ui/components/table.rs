//! Book table component: column headers and rows.
//!
//! Columns are `★ | TITLE | AUTHORS | [SAVED]`; widths come precomputed in
//! [`ColumnLayout`] and cell text arrives already truncated.

use crate::ui::helpers::{self, pad, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ColumnLayout, DisplayItem};

const BOOKMARK_MARKER: &str = "★";

pub fn render_table_headers(row: usize, columns: &ColumnLayout, theme: &Theme, cols: usize) -> usize {
    let line = format!(
        "{}{}{}{}",
        " ".repeat(columns.marker),
        pad("TITLE", columns.title),
        pad("AUTHORS", columns.authors),
        columns.detail_label
    );

    position_cursor(row, 1);
    print!("{}{}", Theme::bold(), Theme::fg(&theme.colors.header_fg));
    print!("{}", pad(&line, cols));
    print!("{}", Theme::reset());
    row + 1
}

pub fn render_table_rows(
    row: usize,
    items: &[DisplayItem],
    columns: &ColumnLayout,
    theme: &Theme,
    cols: usize,
) -> usize {
    let mut current_row = row;
    for item in items {
        current_row = render_table_row(current_row, item, columns, theme, cols);
    }
    current_row
}

fn base_style(item: &DisplayItem, theme: &Theme) -> String {
    if item.is_selected {
        format!(
            "{}{}",
            Theme::fg(&theme.colors.selection_fg),
            Theme::bg(&theme.colors.selection_bg)
        )
    } else {
        Theme::fg(&theme.colors.text_normal)
    }
}

fn render_table_row(
    row: usize,
    item: &DisplayItem,
    columns: &ColumnLayout,
    theme: &Theme,
    cols: usize,
) -> usize {
    let style = base_style(item, theme);
    position_cursor(row, 1);
    print!("{style}");

    if item.is_bookmarked {
        print!("{}{}{style}", Theme::fg(&theme.colors.bookmark_fg), pad(BOOKMARK_MARKER, columns.marker));
    } else {
        print!("{}", " ".repeat(columns.marker));
    }

    helpers::render_highlighted_text(&item.title, &item.highlight_ranges, theme, item.is_selected);
    print!("{style}");
    print!("{}", " ".repeat(columns.title.saturating_sub(item.title.chars().count())));

    print!("{}", pad(&item.authors, columns.authors));

    if columns.detail > 0 {
        if !item.is_selected {
            print!("{}", Theme::fg(&theme.colors.text_dim));
        }
        print!("{}", pad(&item.detail, columns.detail));
    }

    let used = columns.marker + columns.title + columns.authors + columns.detail;
    print!("{}", " ".repeat(cols.saturating_sub(used)));
    print!("{}", Theme::reset());
    row + 1
}
