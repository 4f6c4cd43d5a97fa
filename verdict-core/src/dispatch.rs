//! Keyboard command dispatch.
//!
//! The dispatcher is a two-state machine. In [`InputMode::Normal`] single keys
//! drive navigation and decisions; in [`InputMode::TextEntry`] (the search
//! field has focus) those keys are left alone so they can be typed. The
//! command-modifier help toggle and `Esc` work in both modes.
//!
//! Input arrives as a [`KeyInput`], a terminal-agnostic description of the key.
//! The front end translates its own key events into this type and notifies the
//! dispatcher of focus changes with [`Dispatcher::focus`] / [`Dispatcher::blur`].

use crate::session::Session;
use crate::types::Filter;

/// Which keybinding set is active.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Single-key commands are live.
    #[default]
    Normal,
    /// A text field has focus; plain keys are text.
    TextEntry,
}

/// The part of a key press the dispatcher cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Esc,
    Char(char),
    /// Any key with no binding of its own (Enter, Backspace, arrows up/down...).
    Other,
}

/// A key press plus whether the command modifier (Ctrl, or Cmd/Super) was held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInput {
    pub key: Key,
    pub command_modifier: bool,
}

impl KeyInput {
    pub fn plain(key: Key) -> Self {
        Self { key, command_modifier: false }
    }

    pub fn with_command(key: Key) -> Self {
        Self { key, command_modifier: true }
    }
}

/// Everything a key can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Next,
    Previous,
    Accept,
    Reject,
    Reset,
    FocusSearch,
    BlurSearch,
    ToggleHelp,
    CycleFilter,
    SetFilter(Filter),
    /// Write the reviewed batch out. Executed by the front end.
    Export,
    /// Leave the application. Executed by the front end.
    Quit,
    /// Load another batch, replacing the current one. Executed by the front end.
    Open,
}

/// Maps key input to commands and applies the engine-level ones.
#[derive(Debug, Default, Clone)]
pub struct Dispatcher {
    mode: InputMode,
    help_visible: bool,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn help_visible(&self) -> bool {
        self.help_visible
    }

    /// A text field gained focus.
    pub fn focus(&mut self) {
        self.mode = InputMode::TextEntry;
    }

    /// The text field lost focus.
    pub fn blur(&mut self) {
        self.mode = InputMode::Normal;
    }

    /// Resolves `input` to a command for the current mode without side effects.
    pub fn resolve(&self, input: KeyInput) -> Option<Command> {
        if input.command_modifier {
            return match input.key {
                Key::Char('k') | Key::Char('K') => Some(Command::ToggleHelp),
                _ => None,
            };
        }
        if input.key == Key::Esc {
            return Some(Command::BlurSearch);
        }
        if self.mode == InputMode::TextEntry {
            return None;
        }
        match input.key {
            Key::Right => Some(Command::Next),
            Key::Left => Some(Command::Previous),
            Key::Char('a') => Some(Command::Accept),
            Key::Char('r') => Some(Command::Reject),
            Key::Char('u') => Some(Command::Reset),
            Key::Char('s') => Some(Command::FocusSearch),
            Key::Char('f') => Some(Command::CycleFilter),
            Key::Char('1') => Some(Command::SetFilter(Filter::All)),
            Key::Char('2') => Some(Command::SetFilter(Filter::Accepted)),
            Key::Char('3') => Some(Command::SetFilter(Filter::Rejected)),
            Key::Char('4') => Some(Command::SetFilter(Filter::Undecided)),
            Key::Char('e') => Some(Command::Export),
            Key::Char('q') => Some(Command::Quit),
            Key::Char('o') => Some(Command::Open),
            _ => None,
        }
    }

    /// Resolves `input` and applies the result to `session` and to the
    /// dispatcher's own mode and help flag.
    ///
    /// Returns the command when the key was consumed; the caller must then
    /// suppress any default handling of the key (for instance inserting it into
    /// the search field). `Export`, `Quit` and `Open` are returned unapplied
    /// for the caller to carry out. `None` means the key is not a command.
    pub fn dispatch(&mut self, input: KeyInput, session: &mut Session) -> Option<Command> {
        let command = self.resolve(input)?;
        tracing::debug!(?command, mode = ?self.mode, "dispatching command");
        self.apply(command, session);
        Some(command)
    }

    /// Carries out `command` against `session`.
    pub fn apply(&mut self, command: Command, session: &mut Session) {
        match command {
            Command::Next => session.next(),
            Command::Previous => session.previous(),
            Command::Accept => session.accept(),
            Command::Reject => session.reject(),
            Command::Reset => session.reset(),
            Command::FocusSearch => self.focus(),
            Command::BlurSearch => self.blur(),
            Command::ToggleHelp => self.help_visible = !self.help_visible,
            Command::CycleFilter => session.set_filter(session.filter().next()),
            Command::SetFilter(filter) => session.set_filter(filter),
            Command::Export | Command::Quit | Command::Open => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Decision;
    use pretty_assertions::assert_eq;

    fn loaded() -> Session {
        let mut s = Session::new();
        s.import(r#"[{"filePath":"a.txt","response":"hello"},{"filePath":"b.txt","response":"world"}]"#)
            .unwrap();
        s
    }

    fn ch(c: char) -> KeyInput {
        KeyInput::plain(Key::Char(c))
    }

    #[test]
    fn normal_mode_keys_drive_the_session() {
        let mut d = Dispatcher::new();
        let mut s = loaded();

        assert_eq!(d.dispatch(KeyInput::plain(Key::Right), &mut s), Some(Command::Next));
        assert_eq!(s.cursor(), 1);
        assert_eq!(d.dispatch(ch('r'), &mut s), Some(Command::Reject));
        assert_eq!(s.decisions()[1], Decision::Rejected);
        assert_eq!(d.dispatch(KeyInput::plain(Key::Left), &mut s), Some(Command::Previous));
        assert_eq!(d.dispatch(ch('a'), &mut s), Some(Command::Accept));
        assert_eq!(s.decisions(), &[Decision::Accepted, Decision::Rejected]);
        assert_eq!(d.dispatch(ch('u'), &mut s), Some(Command::Reset));
        assert_eq!(s.decisions()[0], Decision::Undecided);
    }

    #[test]
    fn search_key_enters_text_entry_and_typing_is_not_intercepted() {
        let mut d = Dispatcher::new();
        let mut s = loaded();

        assert_eq!(d.dispatch(ch('s'), &mut s), Some(Command::FocusSearch));
        assert_eq!(d.mode(), InputMode::TextEntry);

        for c in ['a', 'r', 's', 'q', 'e', '1'] {
            assert_eq!(d.dispatch(ch(c), &mut s), None);
        }
        assert_eq!(d.dispatch(KeyInput::plain(Key::Right), &mut s), None);
        assert_eq!(s.decisions(), &[Decision::Undecided, Decision::Undecided]);
        assert_eq!(s.cursor(), 0);
    }

    #[test]
    fn escape_blurs_from_either_mode() {
        let mut d = Dispatcher::new();
        let mut s = loaded();
        d.focus();
        assert_eq!(d.dispatch(KeyInput::plain(Key::Esc), &mut s), Some(Command::BlurSearch));
        assert_eq!(d.mode(), InputMode::Normal);
        assert_eq!(d.dispatch(KeyInput::plain(Key::Esc), &mut s), Some(Command::BlurSearch));
        assert_eq!(d.mode(), InputMode::Normal);
    }

    #[test]
    fn help_toggle_works_in_both_modes() {
        let mut d = Dispatcher::new();
        let mut s = loaded();
        let toggle = KeyInput::with_command(Key::Char('k'));

        assert_eq!(d.dispatch(toggle, &mut s), Some(Command::ToggleHelp));
        assert!(d.help_visible());
        d.focus();
        assert_eq!(d.dispatch(toggle, &mut s), Some(Command::ToggleHelp));
        assert!(!d.help_visible());
        assert_eq!(d.mode(), InputMode::TextEntry);
    }

    #[test]
    fn plain_k_is_not_the_help_toggle() {
        let d = Dispatcher::new();
        assert_eq!(d.resolve(ch('k')), None);
        assert_eq!(d.resolve(KeyInput::with_command(Key::Char('a'))), None);
    }

    #[test]
    fn filter_keys_reset_cursor() {
        let mut d = Dispatcher::new();
        let mut s = loaded();
        s.next();
        assert_eq!(d.dispatch(ch('f'), &mut s), Some(Command::CycleFilter));
        assert_eq!(s.filter(), Filter::Accepted);
        assert!(s.view().is_empty());
        assert_eq!(d.dispatch(ch('4'), &mut s), Some(Command::SetFilter(Filter::Undecided)));
        assert_eq!(s.view(), &[0, 1]);
        assert_eq!(s.cursor(), 0);
    }

    #[test]
    fn export_quit_and_open_are_left_to_the_caller() {
        let mut d = Dispatcher::new();
        let mut s = loaded();
        assert_eq!(d.dispatch(ch('e'), &mut s), Some(Command::Export));
        assert_eq!(d.dispatch(ch('q'), &mut s), Some(Command::Quit));
        assert_eq!(d.dispatch(ch('o'), &mut s), Some(Command::Open));
        assert_eq!(d.mode(), InputMode::Normal);
        assert!(!s.has_unexported_changes());
        assert_eq!(s.decisions(), &[Decision::Undecided, Decision::Undecided]);

        d.focus();
        assert_eq!(d.dispatch(ch('o'), &mut s), None);
    }
}
