//! Layout engine for verdict.
//!
//! Pure layout arithmetic; called inside `terminal.draw()` on every render so
//! each frame reflects the current terminal size.
//!
//! ```text
//! ┌ Filter ─────────────────┬ Search ──────┬ Progress ─┐
//! ├ Records ─────┬ Item ────┴──────────────┴───────────┤
//! │              │                                     │
//! └──────────────┴─────────────────────────────────────┘
//!  NORMAL  status / notification
//! ```
//!
//! Below 80 columns the record list collapses and the detail panel fills the
//! width. `Spacing::Overlap(1)` with `MergeStrategy::Fuzzy` lets neighbouring
//! borders share a column.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Margin, Position, Rect, Spacing},
    style::{Modifier, Style},
    symbols::merge::MergeStrategy,
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph},
};
use verdict_core::InputMode;

use crate::app::{AppState, Mode, NoticeKind};
use crate::theme::Theme;

/// Terminal width below which the record list is hidden.
const COLLAPSE_WIDTH: u16 = 80;

/// Panel rectangles for one frame. Never store across frames.
#[derive(Debug, Clone, Copy)]
pub struct Regions {
    pub tabs: Rect,
    pub search: Rect,
    pub progress: Rect,
    pub list: Rect,
    pub detail: Rect,
    pub status_bar: Rect,
}

pub fn compute_layout(frame: &Frame) -> Regions {
    let area = frame.area();

    let [header, main_area, status_bar] = area.layout(&Layout::vertical([
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(1),
    ]));

    let [tabs, search, progress] = header.layout(
        &Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Length(32),
            Constraint::Length(24),
        ])
        .spacing(Spacing::Overlap(1)),
    );

    let main = if area.width >= COLLAPSE_WIDTH {
        Layout::horizontal([Constraint::Percentage(35), Constraint::Fill(1)])
    } else {
        Layout::horizontal([Constraint::Length(0), Constraint::Fill(1)])
    };
    let [list, detail] = main_area.layout(&main.spacing(Spacing::Overlap(1)));

    Regions { tabs, search, progress, list, detail, status_bar }
}

/// Inner `Rect` of a panel after removing the 1-cell border on each side.
pub fn inner_rect(area: Rect) -> Rect {
    area.inner(Margin { vertical: 1, horizontal: 1 })
}

/// Bordered `Block` for a panel.
///
/// Focused panels get a thick border in `border_active`. `MergeStrategy::Fuzzy`
/// is required because `Exact` produces wrong junctions between `Thick` and
/// `Plain` borders.
pub fn panel_block<'a>(title: impl Into<Line<'a>>, is_focused: bool, theme: &Theme) -> Block<'a> {
    let border_style = if is_focused {
        Style::default().fg(theme.border_active)
    } else {
        Style::default().fg(theme.border_inactive)
    };
    let border_type = if is_focused { BorderType::Thick } else { BorderType::Plain };

    Block::bordered()
        .title(title)
        .border_type(border_type)
        .border_style(border_style)
        .merge_borders(MergeStrategy::Fuzzy)
}

/// Renders the 1-row status bar.
///
/// Left: mode indicator. Middle: the open-file prompt while it is active,
/// else the active notification, else key hints. Right: loading indicator or
/// the source file name.
pub fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let (mode_text, mode_fg) = match (state.mode, state.dispatcher.mode()) {
        (Mode::ConfirmQuit, _) => (" QUIT? ", theme.notice_error),
        (Mode::Review, InputMode::TextEntry) if state.open_prompt.is_some() => {
            (" OPEN ", theme.status_mode_search)
        }
        (Mode::Review, InputMode::TextEntry) => (" SEARCH ", theme.status_mode_search),
        (Mode::Review, InputMode::Normal) => (" NORMAL ", theme.status_mode_normal),
    };
    let mut spans = vec![Span::styled(
        mode_text,
        Style::default().fg(mode_fg).add_modifier(Modifier::BOLD),
    )];

    let mut prompt_cursor = None;
    match (&state.open_prompt, &state.notice) {
        (Some(path), _) => {
            let label = " Open: ";
            let offset = mode_text.chars().count() + label.chars().count() + path.chars().count();
            prompt_cursor = Some(area.x.saturating_add(offset as u16));
            spans.push(Span::styled(label, Style::default().fg(theme.muted)));
            spans.push(Span::raw(path.clone()));
        }
        (None, Some(notice)) => {
            let fg = match notice.kind {
                NoticeKind::Info => theme.notice_info,
                NoticeKind::Error => theme.notice_error,
            };
            spans.push(Span::styled(format!(" {}", notice.text), Style::default().fg(fg)));
        }
        (None, None) => {
            let hints = match state.dispatcher.mode() {
                InputMode::TextEntry => " type to filter · Enter/Esc done · Ctrl-k help",
                InputMode::Normal => {
                    " ←/→ move · a accept · r reject · u reset · s search · o open · e export · Ctrl-k help"
                }
            };
            spans.push(Span::raw(hints));
        }
    }

    let right = if state.loading {
        " loading… ".to_owned()
    } else if state.has_unexported_changes() {
        " ● unexported ".to_owned()
    } else {
        state
            .source
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|n| format!(" {} ", n.to_string_lossy()))
            .unwrap_or_default()
    };

    let [left_area, right_area] = area.layout(&Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(right.chars().count() as u16),
    ]));

    let style = Style::default().bg(theme.status_bar_bg).fg(theme.status_bar_fg);
    frame.render_widget(Paragraph::new(Line::from(spans)).style(style), left_area);
    frame.render_widget(Paragraph::new(right).style(style), right_area);

    if let Some(x) = prompt_cursor.filter(|&x| x < left_area.right()) {
        frame.set_cursor_position(Position { x, y: area.y });
    }
}
