//! Modal overlays: the help screen and the quit confirmation.
//!
//! Both are drawn last inside the same `terminal.draw()` closure, erasing
//! their area with `Clear` first.

use ratatui::{
    Frame,
    layout::Constraint,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Clear, Paragraph, Wrap},
};

use crate::app::AppState;
use crate::theme::Theme;

/// Renders the keyboard reference as a centred modal.
///
/// Skipped on terminals narrower than 50 columns.
pub fn render_help_overlay(frame: &mut Frame, theme: &Theme) {
    if frame.area().width < 50 {
        return;
    }

    let area = frame
        .area()
        .centered(Constraint::Percentage(70), Constraint::Percentage(80));
    frame.render_widget(Clear, area);

    let block = Block::bordered()
        .title(" Keyboard shortcuts  Ctrl-k to close ")
        .border_style(Style::default().fg(theme.border_active));

    frame.render_widget(
        Paragraph::new(build_help_text(theme))
            .block(block)
            .wrap(Wrap { trim: false }),
        area,
    );
}

fn build_help_text(theme: &Theme) -> Text<'static> {
    let heading = |s: &'static str| {
        Line::styled(s, Style::default().fg(theme.selection).add_modifier(Modifier::BOLD))
    };
    Text::from(vec![
        heading("Review"),
        Line::from("  → / ←         Next / previous item"),
        Line::from("  a             Accept current item"),
        Line::from("  r             Reject current item"),
        Line::from("  u             Clear the decision"),
        Line::from(""),
        heading("Filter & search"),
        Line::from("  f             Cycle filter: All → Accepted → Rejected → Undecided"),
        Line::from("  1 2 3 4       All / Accepted / Rejected / Undecided"),
        Line::from("  s             Focus the search field"),
        Line::from("  Esc / Enter   Leave the search field"),
        Line::from(""),
        heading("Detail"),
        Line::from("  ↑ / ↓  j / k  Scroll the response"),
        Line::from("  PgUp / PgDn   Scroll a page"),
        Line::from("  Ctrl-u / d    Scroll half a page"),
        Line::from("  Home / End    First / last item"),
        Line::from("  i             Toggle item details (metadata and raw JSON)"),
        Line::from(""),
        heading("General"),
        Line::from("  o             Open another JSON file"),
        Line::from("  e             Export the reviewed batch"),
        Line::from("  Ctrl-k        Toggle this help"),
        Line::from("  q / Ctrl-c    Quit"),
    ])
}

/// Renders the "quit without exporting?" dialog.
pub fn render_confirm_quit(frame: &mut Frame, state: &AppState, theme: &Theme) {
    let area = frame.area().centered(Constraint::Length(52), Constraint::Length(7));
    frame.render_widget(Clear, area);

    let block = Block::bordered()
        .title(" Unexported decisions ")
        .border_style(Style::default().fg(theme.notice_error));

    let key = |k: &'static str| Span::styled(k, Style::default().add_modifier(Modifier::BOLD));
    let text = Text::from(vec![
        Line::raw(format!(
            "Decisions have not been written to {}.",
            state.export_path.display()
        )),
        Line::raw(""),
        Line::from(vec![
            key("e"),
            Span::raw(" export and quit   "),
            key("y"),
            Span::raw(" quit   "),
            key("n"),
            Span::raw(" cancel"),
        ]),
    ]);

    frame.render_widget(Paragraph::new(text).block(block).wrap(Wrap { trim: true }), area);
}
