//! Header row: filter tabs, search field, and progress gauge.

use ratatui::{
    Frame,
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, Paragraph, Tabs},
};
use verdict_core::{Filter, InputMode};

use crate::app::AppState;
use crate::theme::Theme;
use crate::ui::layout::{inner_rect, panel_block};

/// Renders the four filter tabs with per-filter counts, e.g. `Accepted (3)`.
pub fn render_filter_tabs(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let counts = state.session.counts();
    let titles = Filter::ALL.iter().map(|&f| {
        let color = match f {
            Filter::All => theme.status_bar_fg,
            Filter::Accepted => theme.accepted,
            Filter::Rejected => theme.rejected,
            Filter::Undecided => theme.muted,
        };
        Line::from(vec![
            Span::styled(f.label(), Style::default().fg(color)),
            Span::raw(format!(" ({})", counts.for_filter(f))),
        ])
    });

    let tabs = Tabs::new(titles)
        .block(panel_block(" Filter  f / 1-4 ", false, theme))
        .select(state.session.filter().position())
        .highlight_style(
            Style::default()
                .fg(theme.selection)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        );
    frame.render_widget(tabs, area);
}

/// Renders the search field.
///
/// While the field has focus its border is active and the terminal cursor is
/// placed after the text.
pub fn render_search(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let focused = state.dispatcher.mode() == InputMode::TextEntry && state.open_prompt.is_none();
    let term = state.session.search_term();
    let inner = inner_rect(area);

    let content = if term.is_empty() && !focused {
        Line::from(Span::styled("press s to search", Style::default().fg(theme.muted)))
    } else {
        // Keep the tail visible when the term is wider than the field.
        let width = inner.width.saturating_sub(1) as usize;
        let chars = term.chars().count();
        let visible: String = term.chars().skip(chars.saturating_sub(width)).collect();
        Line::raw(visible)
    };

    frame.render_widget(
        Paragraph::new(content).block(panel_block(" Search ", focused, theme)),
        area,
    );

    if focused && inner.width > 0 {
        let typed = term.chars().count().min(inner.width.saturating_sub(1) as usize) as u16;
        frame.set_cursor_position(Position { x: inner.x + typed, y: inner.y });
    }
}

/// Renders the share of records that carry a decision.
pub fn render_progress(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let counts = state.session.counts();
    let ratio = state.session.progress().clamp(0.0, 1.0);
    let label = format!(
        "{}/{} ({:.0}%)",
        counts.accepted + counts.rejected,
        counts.total,
        ratio * 100.0
    );
    let gauge = Gauge::default()
        .block(panel_block(" Progress ", false, theme))
        .gauge_style(Style::default().fg(theme.gauge))
        .ratio(ratio)
        .label(label);
    frame.render_widget(gauge, area);
}
