//! Central application state for verdict.
//!
//! `AppState` wraps the review engine (`Session` + `Dispatcher`) together with
//! the UI-only state around it: the pre-rendered response bodies, scroll
//! offsets, cached panel geometry, notifications, the open-file prompt, and
//! the handle to the loader thread. No
//! ratatui rendering happens here; `ui` reads this struct and `keybindings`
//! mutates it.

use std::path::PathBuf;

use crossbeam_channel::Sender;
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::ListState;
use verdict_core::{codec, Dispatcher, Session};

use crate::loader::types::{LoadRequest, LoadResult};

/// How many ticks (250 ms each) a notification stays in the status bar.
const NOTICE_TICKS: u16 = 16;

/// Top-level interaction mode.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Reviewing records; keys go to the dispatcher.
    #[default]
    Review,
    /// Quit-confirmation dialog shown when decisions have not been exported.
    ConfirmQuit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// A transient status-bar message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub kind: NoticeKind,
    pub ticks_left: u16,
}

/// What the detail panel shows for the current record.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum DetailView {
    /// Position, decision, usage and the highlighted response.
    #[default]
    Response,
    /// Metadata plus the full imported object as pretty-printed JSON.
    Raw,
}

impl DetailView {
    pub fn toggle(self) -> Self {
        match self {
            DetailView::Response => DetailView::Raw,
            DetailView::Raw => DetailView::Response,
        }
    }
}

/// Whether quitting may proceed immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuitRequest {
    Quit,
    NeedsConfirmation,
}

/// All mutable state passed through every render cycle.
pub struct AppState {
    pub session: Session,
    pub dispatcher: Dispatcher,
    pub mode: Mode,

    /// Highlighted response body per record, index-aligned with `session.records()`.
    pub rendered: Vec<Vec<Line<'static>>>,
    /// File the current batch came from.
    pub source: Option<PathBuf>,
    /// True while the loader thread is working on a request.
    pub loading: bool,

    /// Destination of the export command.
    pub export_path: PathBuf,

    /// Request side of the loader thread's channel.
    pub loader_tx: Option<Sender<LoadRequest>>,
    /// Path being typed after `o`; `Some` while the prompt owns text entry.
    pub open_prompt: Option<String>,
    pub detail_view: DetailView,

    pub notice: Option<Notice>,

    /// Stateful list widget backing the record list.
    pub list_state: ListState,
    /// Vertical scroll offset of the detail panel.
    pub detail_scroll: u16,
    /// Inner height of the detail panel, cached after each render.
    pub detail_viewport_height: u16,
    /// Rows the detail body occupies after wrapping, cached after each render.
    pub detail_line_count: u16,

    /// Record-list outer area, cached after each render for mouse hit-testing.
    pub list_area: Rect,
    /// Search field outer area, cached after each render for mouse hit-testing.
    pub search_area: Rect,

    /// Record index the detail scroll belongs to.
    detail_index: Option<usize>,
}

impl AppState {
    pub fn new(export_path: PathBuf) -> Self {
        Self {
            session: Session::new(),
            dispatcher: Dispatcher::new(),
            mode: Mode::Review,
            rendered: Vec::new(),
            source: None,
            loading: false,
            export_path,
            loader_tx: None,
            open_prompt: None,
            detail_view: DetailView::Response,
            notice: None,
            list_state: ListState::default(),
            detail_scroll: 0,
            detail_viewport_height: 0,
            detail_line_count: 0,
            list_area: Rect::default(),
            search_area: Rect::default(),
            detail_index: None,
        }
    }

    /// Installs a finished load.
    ///
    /// On success the session is replaced wholesale. On failure the previous
    /// batch, decisions and view are left exactly as they were and the error
    /// is surfaced as a notification.
    pub fn apply_load(&mut self, result: LoadResult) {
        self.loading = false;
        match result.outcome {
            Ok(batch) => {
                let count = batch.items.len();
                self.session.load(batch.items);
                self.rendered = batch.rendered;
                self.source = Some(result.path);
                self.detail_index = None;
                self.sync_detail_scroll();
                self.notify(NoticeKind::Info, format!("Loaded {count} records"));
            }
            Err(e) => {
                self.notify(NoticeKind::Error, e.to_string());
            }
        }
    }

    /// Writes the reviewed batch to `export_path`.
    ///
    /// Returns `true` on success. Either way the outcome is shown in the status bar.
    pub fn export(&mut self) -> bool {
        match codec::write_export(&self.export_path, self.session.store()) {
            Ok(_) => {
                self.session.mark_exported();
                let text = format!(
                    "Exported {} records to {}",
                    self.session.records().len(),
                    self.export_path.display()
                );
                self.notify(NoticeKind::Info, text);
                true
            }
            Err(e) => {
                tracing::error!(path = %self.export_path.display(), error = %e, "export failed");
                self.notify(NoticeKind::Error, format!("Export failed: {e}"));
                false
            }
        }
    }

    /// True when decisions differ from the last export or load.
    pub fn has_unexported_changes(&self) -> bool {
        self.session.has_unexported_changes()
    }

    /// Asks the loader thread to read `path`. The current batch stays in
    /// place until the result arrives, and for good if loading fails.
    pub fn open(&mut self, path: PathBuf) {
        let Some(tx) = &self.loader_tx else {
            self.notify(NoticeKind::Error, "loader thread is not running");
            return;
        };
        tracing::info!(path = %path.display(), "load requested");
        if tx.send(LoadRequest::Open(path)).is_err() {
            self.loader_tx = None;
            self.notify(NoticeKind::Error, "loader thread is not running");
        } else {
            self.loading = true;
        }
    }

    /// Starts the open-file prompt, prefilled with the current source path.
    pub fn begin_open(&mut self) {
        let initial = self
            .source
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        self.open_prompt = Some(initial);
        self.dispatcher.focus();
    }

    /// Submits the prompt. An empty path just closes it.
    pub fn submit_open(&mut self) {
        self.dispatcher.blur();
        let Some(input) = self.open_prompt.take() else {
            return;
        };
        let path = input.trim();
        if !path.is_empty() {
            self.open(PathBuf::from(path));
        }
    }

    pub fn cancel_open(&mut self) {
        self.open_prompt = None;
    }

    /// Asks to quit; switches to the confirmation dialog if work would be lost.
    pub fn request_quit(&mut self) -> QuitRequest {
        if self.has_unexported_changes() {
            self.mode = Mode::ConfirmQuit;
            QuitRequest::NeedsConfirmation
        } else {
            QuitRequest::Quit
        }
    }

    pub fn notify(&mut self, kind: NoticeKind, text: impl Into<String>) {
        self.notice = Some(Notice { text: text.into(), kind, ticks_left: NOTICE_TICKS });
    }

    /// Ages the current notification by one tick.
    pub fn tick(&mut self) {
        if let Some(notice) = &mut self.notice {
            notice.ticks_left = notice.ticks_left.saturating_sub(1);
            if notice.ticks_left == 0 {
                self.notice = None;
            }
        }
    }

    /// Pre-rendered body of the record under the cursor.
    pub fn current_lines(&self) -> &[Line<'static>] {
        self.session
            .current_index()
            .and_then(|i| self.rendered.get(i))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Resets the detail scroll when the cursor lands on a different record.
    pub fn sync_detail_scroll(&mut self) {
        let current = self.session.current_index();
        if current != self.detail_index {
            self.detail_index = current;
            self.detail_scroll = 0;
        }
    }

    /// Largest offset that still fills the viewport.
    pub fn max_detail_scroll(&self) -> u16 {
        self.detail_line_count.saturating_sub(self.detail_viewport_height)
    }

    pub fn scroll_detail_down(&mut self, n: u16) {
        self.detail_scroll = self.detail_scroll.saturating_add(n).min(self.max_detail_scroll());
    }

    pub fn scroll_detail_up(&mut self, n: u16) {
        self.detail_scroll = self.detail_scroll.saturating_sub(n);
    }

    /// Half the detail viewport, at least one line.
    pub fn half_page(&self) -> u16 {
        (self.detail_viewport_height / 2).max(1)
    }
}
