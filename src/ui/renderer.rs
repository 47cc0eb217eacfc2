//! Top-level rendering coordinator.
//!
//! Rendering is two steps: compute a [`UIViewModel`] from `AppState`, then
//! hand it to the layout in [`components`].

use crate::app::AppState;
use crate::ui::components;
use crate::ui::viewmodel::UIViewModel;

/// Renders the plugin UI for a `rows` x `cols` pane to stdout.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel: UIViewModel = state.compute_viewmodel(rows, cols);
    components::render_layout(&viewmodel, &state.theme, cols, rows);
}
