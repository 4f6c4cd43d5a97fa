//! Keybinding handling for verdict.
//!
//! Raw crossterm events are translated into the engine's [`KeyInput`] and fed
//! to the `Dispatcher`, which owns the review bindings. Keys the dispatcher
//! does not consume fall through to front-end handlers: typing into the search
//! field or the open-file prompt, scrolling the detail panel, and jumping to
//! the ends of the list. The quit-confirmation dialog intercepts everything
//! while it is open.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;
use verdict_core::{Command, InputMode, Key, KeyInput};

use crate::app::{AppState, Mode, QuitRequest};

/// Lines moved per mouse-wheel notch.
const WHEEL_LINES: u16 = 3;

/// Control-flow signal returned to the event loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Continue,
    Quit,
}

/// Dispatches a key event according to the current mode.
pub fn handle_key(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match state.mode {
        Mode::ConfirmQuit => handle_confirm_quit(key, state),
        Mode::Review => handle_review(key, state),
    }
}

/// Converts a crossterm key event into engine input.
///
/// Ctrl and Super (Cmd on macOS, when the terminal reports it) both count as
/// the command modifier.
pub fn to_key_input(key: &KeyEvent) -> KeyInput {
    let command_modifier = key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::SUPER);
    let key = match key.code {
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Esc => Key::Esc,
        KeyCode::Char(c) => Key::Char(c),
        _ => Key::Other,
    };
    KeyInput { key, command_modifier }
}

// ---------------------------------------------------------------------------
// Review mode
// ---------------------------------------------------------------------------

fn quit(state: &mut AppState) -> KeyAction {
    match state.request_quit() {
        QuitRequest::Quit => KeyAction::Quit,
        QuitRequest::NeedsConfirmation => KeyAction::Continue,
    }
}

fn handle_review(key: KeyEvent, state: &mut AppState) -> KeyAction {
    // Raw mode delivers Ctrl-C as a key; treat it like `q` in every input mode.
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        state.cancel_open();
        return quit(state);
    }

    let input = to_key_input(&key);
    if let Some(command) = state.dispatcher.dispatch(input, &mut state.session) {
        let action = match command {
            Command::Export => {
                state.export();
                KeyAction::Continue
            }
            Command::Quit => quit(state),
            Command::Open => {
                state.begin_open();
                KeyAction::Continue
            }
            Command::BlurSearch => {
                state.cancel_open();
                KeyAction::Continue
            }
            _ => KeyAction::Continue,
        };
        state.sync_detail_scroll();
        return action;
    }

    match state.dispatcher.mode() {
        InputMode::TextEntry => handle_text_entry(key, state),
        InputMode::Normal => handle_navigation_key(key, state),
    }
    state.sync_detail_scroll();
    KeyAction::Continue
}

/// Edits the open-file prompt if it is active, otherwise the search term.
fn handle_text_entry(key: KeyEvent, state: &mut AppState) {
    let ctrl = key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::SUPER);
    if let Some(path) = state.open_prompt.as_mut() {
        match key.code {
            KeyCode::Char('u') if ctrl => path.clear(),
            KeyCode::Char(c) if !ctrl => path.push(c),
            KeyCode::Backspace => {
                path.pop();
            }
            KeyCode::Enter => state.submit_open(),
            _ => {}
        }
        return;
    }
    match key.code {
        KeyCode::Char('u') if ctrl => state.session.set_search_term(""),
        KeyCode::Char(c) if !ctrl => state.session.push_search_char(c),
        KeyCode::Backspace => state.session.pop_search_char(),
        KeyCode::Enter => state.dispatcher.blur(),
        _ => {}
    }
}

/// Detail scrolling, list jumps and the details toggle in Normal mode.
fn handle_navigation_key(key: KeyEvent, state: &mut AppState) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => state.scroll_detail_down(1),
        KeyCode::Up | KeyCode::Char('k') => state.scroll_detail_up(1),
        KeyCode::Char('d') if ctrl => state.scroll_detail_down(state.half_page()),
        KeyCode::Char('u') if ctrl => state.scroll_detail_up(state.half_page()),
        KeyCode::PageDown => state.scroll_detail_down(state.detail_viewport_height.max(1)),
        KeyCode::PageUp => state.scroll_detail_up(state.detail_viewport_height.max(1)),
        KeyCode::Home => state.session.select(0),
        KeyCode::End => state.session.select(usize::MAX),
        KeyCode::Char('i') if !ctrl => {
            state.detail_view = state.detail_view.toggle();
            state.detail_scroll = 0;
        }
        _ => {}
    }
}

// ---------------------------------------------------------------------------
// ConfirmQuit mode
// ---------------------------------------------------------------------------

/// `y` quits, `e` exports then quits, `n`/`Esc` cancels. A failed export
/// keeps the dialog closed so the error stays visible.
fn handle_confirm_quit(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => KeyAction::Quit,
        KeyCode::Char('e') | KeyCode::Char('E') => {
            if state.export() {
                KeyAction::Quit
            } else {
                state.mode = Mode::Review;
                KeyAction::Continue
            }
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            state.mode = Mode::Review;
            KeyAction::Continue
        }
        _ => KeyAction::Continue,
    }
}

// ---------------------------------------------------------------------------
// Mouse events
// ---------------------------------------------------------------------------

/// Click a row to select it, click the search field to focus it, wheel to
/// scroll the detail panel.
pub fn handle_mouse(mouse: MouseEvent, state: &mut AppState) -> KeyAction {
    if state.mode == Mode::ConfirmQuit {
        return KeyAction::Continue;
    }
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => handle_mouse_click(mouse.column, mouse.row, state),
        MouseEventKind::ScrollUp => state.scroll_detail_up(WHEEL_LINES),
        MouseEventKind::ScrollDown => state.scroll_detail_down(WHEEL_LINES),
        _ => {}
    }
    KeyAction::Continue
}

fn handle_mouse_click(col: u16, row: u16, state: &mut AppState) {
    let pos = Position { x: col, y: row };

    if state.search_area.contains(pos) {
        state.cancel_open();
        state.dispatcher.focus();
        return;
    }
    if state.dispatcher.mode() == InputMode::TextEntry {
        state.cancel_open();
        state.dispatcher.blur();
    }

    let list = state.list_area;
    if list.width == 0 || !list.contains(pos) {
        return;
    }
    // First and last rows are the border.
    if row <= list.y || row >= list.y + list.height.saturating_sub(1) {
        return;
    }
    let position = state.list_state.offset() + usize::from(row - list.y - 1);
    if position < state.session.view().len() {
        state.session.select(position);
        state.sync_detail_scroll();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState};
    use pretty_assertions::assert_eq;
    use ratatui::layout::Rect;
    use std::path::PathBuf;
    use verdict_core::{codec, Decision, Filter};

    use crate::app::{DetailView, NoticeKind};
    use crate::loader::types::{LoadRequest, LoadResult, LoadedBatch};
    use crate::loader::worker;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn typed(state: &mut AppState, text: &str) {
        for c in text.chars() {
            handle_key(press(KeyCode::Char(c)), state);
        }
    }

    fn state_with(dir: &tempfile::TempDir, json: &str) -> AppState {
        let mut state = AppState::new(dir.path().join("reviewed.json"));
        let items = codec::import(json).unwrap();
        let rendered = crate::loader::worker::render_responses(&items, false);
        state.apply_load(LoadResult {
            path: PathBuf::from("batch.json"),
            outcome: Ok(LoadedBatch { items, rendered }),
        });
        state
    }

    const THREE: &str = r#"[
        {"filePath": "a.rs", "response": "alpha"},
        {"filePath": "b.rs", "response": "beta"},
        {"filePath": "c.rs", "response": "gamma"}
    ]"#;

    #[test]
    fn ctrl_and_super_are_the_command_modifier() {
        assert!(to_key_input(&ctrl('k')).command_modifier);
        let sup = KeyEvent::new(KeyCode::Char('k'), KeyModifiers::SUPER);
        assert!(to_key_input(&sup).command_modifier);
        assert!(!to_key_input(&press(KeyCode::Char('k'))).command_modifier);
        assert_eq!(to_key_input(&press(KeyCode::Tab)).key, Key::Other);
    }

    #[test]
    fn review_keys_reach_the_session() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_with(&dir, THREE);

        handle_key(press(KeyCode::Char('a')), &mut state);
        handle_key(press(KeyCode::Right), &mut state);
        handle_key(press(KeyCode::Char('r')), &mut state);
        handle_key(press(KeyCode::Char('3')), &mut state);

        assert_eq!(
            state.session.decisions(),
            &[Decision::Accepted, Decision::Rejected, Decision::Undecided]
        );
        assert_eq!(state.session.filter(), Filter::Rejected);
        assert_eq!(state.session.view(), &[1]);
    }

    #[test]
    fn typing_in_search_does_not_trigger_commands() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_with(&dir, THREE);

        handle_key(press(KeyCode::Char('s')), &mut state);
        assert_eq!(state.dispatcher.mode(), InputMode::TextEntry);
        typed(&mut state, "gamma");
        assert_eq!(state.session.search_term(), "gamma");
        assert_eq!(state.session.view(), &[2]);
        assert!(state.session.decisions().iter().all(|d| *d == Decision::Undecided));

        handle_key(press(KeyCode::Backspace), &mut state);
        assert_eq!(state.session.search_term(), "gamm");

        handle_key(press(KeyCode::Esc), &mut state);
        assert_eq!(state.dispatcher.mode(), InputMode::Normal);
        assert_eq!(state.session.search_term(), "gamm");
    }

    #[test]
    fn enter_leaves_search_and_ctrl_u_clears_it() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_with(&dir, THREE);

        handle_key(press(KeyCode::Char('s')), &mut state);
        typed(&mut state, "beta");
        handle_key(ctrl('u'), &mut state);
        assert_eq!(state.session.search_term(), "");
        handle_key(press(KeyCode::Enter), &mut state);
        assert_eq!(state.dispatcher.mode(), InputMode::Normal);
    }

    #[test]
    fn ctrl_k_toggles_help_in_both_modes() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_with(&dir, THREE);

        handle_key(ctrl('k'), &mut state);
        assert!(state.dispatcher.help_visible());
        handle_key(press(KeyCode::Char('s')), &mut state);
        handle_key(ctrl('k'), &mut state);
        assert!(!state.dispatcher.help_visible());
        assert_eq!(state.session.search_term(), "");
    }

    #[test]
    fn quit_without_changes_exits_immediately() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_with(&dir, THREE);
        assert_eq!(handle_key(press(KeyCode::Char('q')), &mut state), KeyAction::Quit);
    }

    #[test]
    fn quit_with_unexported_changes_asks_first() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_with(&dir, THREE);
        handle_key(press(KeyCode::Char('a')), &mut state);

        assert_eq!(handle_key(press(KeyCode::Char('q')), &mut state), KeyAction::Continue);
        assert_eq!(state.mode, Mode::ConfirmQuit);

        // Review keys are ignored while the dialog is open.
        handle_key(press(KeyCode::Char('r')), &mut state);
        assert_eq!(state.session.decisions()[0], Decision::Accepted);

        assert_eq!(handle_key(press(KeyCode::Char('n')), &mut state), KeyAction::Continue);
        assert_eq!(state.mode, Mode::Review);

        handle_key(press(KeyCode::Char('q')), &mut state);
        assert_eq!(handle_key(press(KeyCode::Char('e')), &mut state), KeyAction::Quit);
        assert!(dir.path().join("reviewed.json").exists());
    }

    #[test]
    fn export_key_writes_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_with(&dir, THREE);
        handle_key(press(KeyCode::Char('r')), &mut state);
        handle_key(press(KeyCode::Char('e')), &mut state);

        let reread = codec::import(
            &std::fs::read_to_string(dir.path().join("reviewed.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(reread[0]["status"], "rejected");
        assert_eq!(reread[1]["status"], "none");
        assert!(!state.has_unexported_changes());
    }

    #[test]
    fn ctrl_c_quits_like_q() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_with(&dir, THREE);
        assert_eq!(handle_key(ctrl('c'), &mut state), KeyAction::Quit);

        handle_key(press(KeyCode::Char('a')), &mut state);
        handle_key(press(KeyCode::Char('s')), &mut state);
        assert_eq!(handle_key(ctrl('c'), &mut state), KeyAction::Continue);
        assert_eq!(state.mode, Mode::ConfirmQuit);
        assert_eq!(state.session.search_term(), "");
        assert_eq!(handle_key(press(KeyCode::Char('y')), &mut state), KeyAction::Quit);
    }

    /// Runs whatever the prompt queued through the loader and installs it.
    fn finish_load(state: &mut AppState, rx: &crossbeam_channel::Receiver<LoadRequest>) {
        let request = rx.try_recv().unwrap();
        state.apply_load(worker::handle_request(request, false));
    }

    #[test]
    fn failed_open_leaves_the_session_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_with(&dir, THREE);
        let (tx, rx) = crossbeam_channel::unbounded();
        state.loader_tx = Some(tx);

        handle_key(press(KeyCode::Char('r')), &mut state);
        handle_key(press(KeyCode::Right), &mut state);

        handle_key(press(KeyCode::Char('o')), &mut state);
        assert_eq!(state.open_prompt.as_deref(), Some("batch.json"));
        assert_eq!(state.dispatcher.mode(), InputMode::TextEntry);
        handle_key(ctrl('u'), &mut state);
        let missing = dir.path().join("missing.json");
        typed(&mut state, &missing.display().to_string());
        // Prompt keystrokes never reach the search term or the review bindings.
        assert_eq!(state.session.search_term(), "");
        assert_eq!(state.session.decisions()[1], Decision::Undecided);

        handle_key(press(KeyCode::Enter), &mut state);
        assert_eq!(state.open_prompt, None);
        assert_eq!(state.dispatcher.mode(), InputMode::Normal);
        assert!(state.loading);

        finish_load(&mut state, &rx);
        assert!(!state.loading);
        assert_eq!(state.session.records().len(), 3);
        assert_eq!(
            state.session.decisions(),
            &[Decision::Rejected, Decision::Undecided, Decision::Undecided]
        );
        assert_eq!(state.session.cursor(), 1);
        assert_eq!(state.source, Some(PathBuf::from("batch.json")));
        assert!(state.has_unexported_changes());
        assert_eq!(state.notice.as_ref().map(|n| n.kind), Some(NoticeKind::Error));
    }

    #[test]
    fn open_replaces_the_batch() {
        let dir = tempfile::tempdir().unwrap();
        let next = dir.path().join("next.json");
        std::fs::write(&next, r#"[{"filePath": "z.rs", "status": "accepted"}]"#).unwrap();
        let mut state = state_with(&dir, THREE);
        let (tx, rx) = crossbeam_channel::unbounded();
        state.loader_tx = Some(tx);
        handle_key(press(KeyCode::Char('a')), &mut state);

        handle_key(press(KeyCode::Char('o')), &mut state);
        handle_key(ctrl('u'), &mut state);
        typed(&mut state, &next.display().to_string());
        handle_key(press(KeyCode::Enter), &mut state);
        finish_load(&mut state, &rx);

        assert_eq!(state.session.decisions(), &[Decision::Accepted]);
        assert_eq!(state.source, Some(next));
        assert!(!state.has_unexported_changes());
    }

    #[test]
    fn esc_cancels_the_open_prompt() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_with(&dir, THREE);
        let (tx, rx) = crossbeam_channel::unbounded();
        state.loader_tx = Some(tx);

        handle_key(press(KeyCode::Char('o')), &mut state);
        typed(&mut state, "x");
        handle_key(press(KeyCode::Esc), &mut state);

        assert_eq!(state.open_prompt, None);
        assert_eq!(state.dispatcher.mode(), InputMode::Normal);
        assert!(rx.try_recv().is_err());
        assert!(!state.loading);
    }

    #[test]
    fn i_toggles_the_details_view() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_with(&dir, THREE);
        state.detail_line_count = 40;
        state.detail_viewport_height = 10;
        state.scroll_detail_down(5);

        handle_key(press(KeyCode::Char('i')), &mut state);
        assert_eq!(state.detail_view, DetailView::Raw);
        assert_eq!(state.detail_scroll, 0);
        handle_key(press(KeyCode::Char('i')), &mut state);
        assert_eq!(state.detail_view, DetailView::Response);

        // In the search field `i` is just a character.
        handle_key(press(KeyCode::Char('s')), &mut state);
        handle_key(press(KeyCode::Char('i')), &mut state);
        assert_eq!(state.session.search_term(), "i");
        assert_eq!(state.detail_view, DetailView::Response);
    }

    #[test]
    fn home_and_end_jump_within_the_view() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_with(&dir, THREE);
        handle_key(press(KeyCode::End), &mut state);
        assert_eq!(state.session.cursor(), 2);
        handle_key(press(KeyCode::Home), &mut state);
        assert_eq!(state.session.cursor(), 0);
    }

    #[test]
    fn clicking_a_row_selects_it() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_with(&dir, THREE);
        state.list_area = Rect::new(0, 3, 30, 10);
        state.search_area = Rect::new(40, 0, 32, 3);

        let click = |column, row| MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        };

        handle_mouse(click(5, 6), &mut state);
        assert_eq!(state.session.cursor(), 2);

        // Border row and rows past the view are ignored.
        handle_mouse(click(5, 3), &mut state);
        handle_mouse(click(5, 9), &mut state);
        assert_eq!(state.session.cursor(), 2);

        handle_mouse(click(45, 1), &mut state);
        assert_eq!(state.dispatcher.mode(), InputMode::TextEntry);
        handle_mouse(click(5, 4), &mut state);
        assert_eq!(state.dispatcher.mode(), InputMode::Normal);
        assert_eq!(state.session.cursor(), 0);
    }
}
