//! Record list panel.
//!
//! One row per entry of the current view: a decision mark and the record's
//! label (its `filePath`, or `Item N`). The row under the cursor is highlighted.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem},
};
use verdict_core::{Decision, InputMode, Record};

use crate::app::AppState;
use crate::theme::Theme;
use crate::ui::layout::panel_block;

const MAX_LABEL_LEN: usize = 48;

pub fn render_record_list(frame: &mut Frame, area: Rect, state: &mut AppState, theme: &Theme) {
    let focused = state.dispatcher.mode() == InputMode::Normal;
    let view = state.session.view();
    let total = state.session.records().len();
    let title = if total > 0 {
        format!(" Records ({}/{}) ", view.len(), total)
    } else {
        " Records ".to_owned()
    };

    let items: Vec<ListItem> = if view.is_empty() {
        let msg = if state.loading {
            "Loading..."
        } else if total == 0 {
            "No records"
        } else {
            "No matches"
        };
        vec![ListItem::new(Line::styled(msg, Style::default().fg(theme.muted)))]
    } else {
        let records = state.session.records();
        let decisions = state.session.decisions();
        view.iter()
            .map(|&i| record_item(&records[i], i, decisions[i], theme))
            .collect()
    };

    let selected = (!view.is_empty()).then(|| state.session.cursor());
    state.list_state.select(selected);

    let list = List::new(items)
        .block(panel_block(title, focused, theme))
        .highlight_style(Style::default().fg(theme.selection).add_modifier(Modifier::BOLD))
        .highlight_symbol("▶ ");

    frame.render_stateful_widget(list, area, &mut state.list_state);
}

/// `[✓] src/main.rs` style row.
fn record_item(record: &Record, index: usize, decision: Decision, theme: &Theme) -> ListItem<'static> {
    let mark = match decision {
        Decision::Accepted => "[✓] ",
        Decision::Rejected => "[✗] ",
        Decision::Undecided => "[ ] ",
    };
    let mark = Span::styled(mark, Style::default().fg(theme.decision(decision)));

    let label = record.label(index);
    let label = truncate_front(&label, MAX_LABEL_LEN);
    let label = if record.file_path().is_some() {
        Span::raw(label)
    } else {
        Span::styled(label, Style::default().fg(theme.muted))
    };
    ListItem::new(Line::from(vec![mark, label]))
}

/// Keeps the end of `s` (the file name) when it is longer than `max` chars.
fn truncate_front(s: &str, max: usize) -> String {
    let len = s.chars().count();
    if len <= max {
        return s.to_owned();
    }
    let tail: String = s.chars().skip(len - (max - 1)).collect();
    format!("…{tail}")
}
