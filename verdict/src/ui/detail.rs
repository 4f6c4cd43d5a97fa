//! Detail panel: the record under the cursor.
//!
//! Shows the position (`Item X of N`), the decision badge, token usage, and
//! the pre-rendered response body. `i` swaps the body for the record's
//! metadata and its full JSON object. When nothing can be shown it explains
//! why: no batch loaded yet, or nothing matching the filter/search.
//!
//! Scrolling is measured in wrapped rows, so the last row of a long
//! single-line response can always be reached.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Paragraph, Wrap},
};
use verdict_core::{Decision, Record, Usage};

use crate::app::{AppState, DetailView};
use crate::theme::Theme;
use crate::ui::layout::{inner_rect, panel_block};

const NO_MATCHES: &str =
    "No items match your current filter or search criteria. Try changing your filters or search term.";

pub fn render_detail(frame: &mut Frame, area: Rect, state: &mut AppState, theme: &Theme) {
    let inner = inner_rect(area);
    state.detail_viewport_height = inner.height;

    let (Some(index), Some(record), Some(decision)) = (
        state.session.current_index(),
        state.session.current_record(),
        state.session.current_decision(),
    ) else {
        state.detail_line_count = 0;
        let msg = if state.loading {
            "Loading...".to_owned()
        } else if state.session.records().is_empty() {
            "No records loaded. Start verdict with a JSON file: verdict <FILE>".to_owned()
        } else {
            NO_MATCHES.to_owned()
        };
        frame.render_widget(
            Paragraph::new(Line::styled(msg, Style::default().fg(theme.muted)))
                .block(panel_block(" Item ", false, theme))
                .wrap(Wrap { trim: true }),
            area,
        );
        return;
    };

    let title = match state.detail_view {
        DetailView::Response => format!(" {} ", record.label(index)),
        DetailView::Raw => format!(" {}  details ", record.label(index)),
    };
    let position = format!(
        "Item {} of {}",
        state.session.cursor() + 1,
        state.session.view().len()
    );

    let mut lines = vec![Line::from(vec![
        Span::styled(position, Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("  "),
        decision_badge(decision, theme),
    ])];
    match state.detail_view {
        DetailView::Response => {
            lines.push(usage_line(record.usage(), theme));
            lines.push(Line::raw(""));
            if record.response().is_none() {
                lines.push(Line::styled("(no response)", Style::default().fg(theme.muted)));
            } else {
                lines.extend(state.current_lines().iter().cloned());
            }
        }
        DetailView::Raw => {
            lines.push(Line::raw(""));
            lines.extend(metadata_lines(record, decision, index, theme));
            lines.push(Line::raw(""));
            lines.extend(raw_json_lines(record));
        }
    }

    let body = Paragraph::new(Text::from(lines)).wrap(Wrap { trim: false });
    let rows = body.line_count(inner.width);
    state.detail_line_count = u16::try_from(rows).unwrap_or(u16::MAX);
    state.detail_scroll = state.detail_scroll.min(state.max_detail_scroll());

    frame.render_widget(panel_block(title, false, theme), area);
    frame.render_widget(body.scroll((state.detail_scroll, 0)), inner);
}

/// File path, status, token counts, and the record's 0-based position in the
/// imported array.
fn metadata_lines(
    record: &Record,
    decision: Decision,
    index: usize,
    theme: &Theme,
) -> Vec<Line<'static>> {
    let usage = record.usage().copied().unwrap_or_default();
    let field = |name: &'static str, value: String| {
        Line::from(vec![
            Span::styled(format!("{name:<18}"), Style::default().fg(theme.muted)),
            Span::raw(value),
        ])
    };
    vec![
        field("File Path", record.file_path().unwrap_or("N/A").to_owned()),
        field("Status", decision.as_str().to_owned()),
        field("Prompt Tokens", format_tokens(usage.prompt_tokens)),
        field("Completion Tokens", format_tokens(usage.completion_tokens)),
        field("Total Tokens", format_tokens(usage.total_tokens)),
        field("Index", index.to_string()),
    ]
}

/// The imported object, pretty-printed with two-space indentation.
fn raw_json_lines(record: &Record) -> Vec<Line<'static>> {
    match serde_json::to_string_pretty(record.raw()) {
        Ok(json) => json.lines().map(|l| Line::raw(l.to_owned())).collect(),
        Err(e) => vec![Line::raw(format!("(unprintable: {e})"))],
    }
}

fn decision_badge(decision: Decision, theme: &Theme) -> Span<'static> {
    let text = match decision {
        Decision::Accepted => " ACCEPTED ",
        Decision::Rejected => " REJECTED ",
        Decision::Undecided => " UNDECIDED ",
    };
    Span::styled(
        text,
        Style::default()
            .fg(theme.decision(decision))
            .add_modifier(Modifier::BOLD | Modifier::REVERSED),
    )
}

/// `Tokens  prompt 12 · completion 30 · total 42`, with `N/A` for gaps.
fn usage_line(usage: Option<&Usage>, theme: &Theme) -> Line<'static> {
    let usage = usage.copied().unwrap_or_default();
    let muted = Style::default().fg(theme.muted);
    Line::from(vec![
        Span::styled("Tokens  ", muted),
        Span::raw(format!("prompt {}", format_tokens(usage.prompt_tokens))),
        Span::styled(" · ", muted),
        Span::raw(format!("completion {}", format_tokens(usage.completion_tokens))),
        Span::styled(" · ", muted),
        Span::raw(format!("total {}", format_tokens(usage.total_tokens))),
    ])
}

/// Integral counts print without a fractional part.
fn format_tokens(value: Option<f64>) -> String {
    match value {
        None => "N/A".to_owned(),
        Some(v) if v.fract() == 0.0 && v.abs() < 1e15 => format!("{}", v as i64),
        Some(v) => v.to_string(),
    }
}
