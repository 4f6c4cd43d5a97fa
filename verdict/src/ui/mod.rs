//! UI rendering for verdict.
//!
//! [`render`] is the single entry point called from the event loop's
//! `terminal.draw()` closure. Layout arithmetic lives in `layout`; each panel
//! has its own module.

mod detail;
mod header;
mod layout;
mod overlay;
mod record_list;
pub mod keybindings;

use ratatui::Frame;

use crate::app::{AppState, Mode};
use crate::theme::Theme;
use layout::{compute_layout, render_status_bar};

/// Renders one complete frame.
///
/// Panel areas are written back into `state` so mouse events arriving before
/// the next frame can be hit-tested against them.
pub fn render(frame: &mut Frame, state: &mut AppState, theme: &Theme) {
    let regions = compute_layout(frame);
    state.list_area = regions.list;
    state.search_area = regions.search;

    header::render_filter_tabs(frame, regions.tabs, state, theme);
    header::render_search(frame, regions.search, state, theme);
    header::render_progress(frame, regions.progress, state, theme);

    if regions.list.width > 0 {
        record_list::render_record_list(frame, regions.list, state, theme);
    }
    detail::render_detail(frame, regions.detail, state, theme);

    render_status_bar(frame, regions.status_bar, state, theme);

    if state.dispatcher.help_visible() {
        overlay::render_help_overlay(frame, theme);
    }
    if state.mode == Mode::ConfirmQuit {
        overlay::render_confirm_quit(frame, state, theme);
    }
}
