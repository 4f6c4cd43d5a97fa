//! Background thread that reads batches and highlights responses.
//!
//! Responses are markdown-ish prose produced by a model, so they are run
//! through syntect's Markdown grammar. Highlighting happens here, once per
//! load, so the render loop only clones ready-made `Line`s.

use std::path::Path;
use std::sync::LazyLock;

use crossbeam_channel::Receiver;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use syntect::easy::HighlightLines;
use syntect::highlighting::{FontStyle, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;
use tokio::sync::mpsc::UnboundedSender;
use verdict_core::{codec, RawItem, Record};

use crate::event::AppEvent;
use crate::loader::types::{LoadError, LoadRequest, LoadResult, LoadedBatch};

static PS: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static TS: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

const SYNTAX_THEME: &str = "base16-ocean.dark";

/// Entry point for the loader thread.
///
/// Loops until every sender of `rx` is dropped. Each request produces exactly
/// one `AppEvent::Loaded`.
pub fn loader_loop(rx: Receiver<LoadRequest>, event_tx: UnboundedSender<AppEvent>, highlight: bool) {
    if highlight {
        // Warm the statics so the first load doesn't pay for them.
        let _ = &*PS;
        let _ = &*TS;
    }

    for request in rx {
        let result = handle_request(request, highlight);
        if event_tx.send(AppEvent::Loaded(Box::new(result))).is_err() {
            break;
        }
    }
    tracing::debug!("loader thread exiting");
}

/// Runs one request to completion.
pub fn handle_request(request: LoadRequest, highlight: bool) -> LoadResult {
    match request {
        LoadRequest::Open(path) => {
            let outcome = read_batch(&path).map(|items| {
                let rendered = render_responses(&items, highlight);
                LoadedBatch { items, rendered }
            });
            match &outcome {
                Ok(batch) => {
                    tracing::info!(path = %path.display(), records = batch.items.len(), "batch loaded")
                }
                Err(e) => tracing::warn!(path = %path.display(), error = %e, "batch load failed"),
            }
            LoadResult { path, outcome }
        }
    }
}

fn read_batch(path: &Path) -> Result<Vec<RawItem>, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(codec::import(&text)?)
}

/// Renders the response of every item, in order.
pub fn render_responses(items: &[RawItem], highlight: bool) -> Vec<Vec<Line<'static>>> {
    items
        .iter()
        .map(|item| {
            let record = Record::from_raw(item.clone());
            match (record.response(), highlight) {
                (None, _) => Vec::new(),
                (Some(text), true) => highlight_markdown(text),
                (Some(text), false) => plain_lines(text),
            }
        })
        .collect()
}

fn plain_lines(text: &str) -> Vec<Line<'static>> {
    text.lines().map(|l| Line::raw(l.to_owned())).collect()
}

/// Highlights `text` as Markdown, one `Line` per source line.
///
/// Falls back to plain lines if the grammar or theme is unavailable.
pub fn highlight_markdown(text: &str) -> Vec<Line<'static>> {
    let Some(syntax) = PS.find_syntax_by_extension("md") else {
        return plain_lines(text);
    };
    let Some(theme) = TS.themes.get(SYNTAX_THEME) else {
        return plain_lines(text);
    };
    let mut h = HighlightLines::new(syntax, theme);

    LinesWithEndings::from(text)
        .map(|line| match h.highlight_line(line, &PS) {
            Ok(ranges) => Line::from(
                ranges
                    .into_iter()
                    .filter_map(|(style, piece)| {
                        let piece = piece.trim_end_matches(['\n', '\r']);
                        (!piece.is_empty()).then(|| syntect_to_span(style, piece))
                    })
                    .collect::<Vec<_>>(),
            ),
            Err(_) => Line::raw(line.trim_end_matches(['\n', '\r']).to_owned()),
        })
        .collect()
}

/// Converts a syntect (Style, &str) pair to an owned ratatui Span.
///
/// Only the foreground is carried over so the panel keeps the UI theme's
/// background.
fn syntect_to_span(style: syntect::highlighting::Style, content: &str) -> Span<'static> {
    let fg = style.foreground;
    let mut ratatui_style = Style::default();
    if fg.a > 0 {
        ratatui_style = ratatui_style.fg(Color::Rgb(fg.r, fg.g, fg.b));
    }
    if style.font_style.contains(FontStyle::BOLD) {
        ratatui_style = ratatui_style.add_modifier(Modifier::BOLD);
    }
    if style.font_style.contains(FontStyle::ITALIC) {
        ratatui_style = ratatui_style.add_modifier(Modifier::ITALIC);
    }
    if style.font_style.contains(FontStyle::UNDERLINE) {
        ratatui_style = ratatui_style.add_modifier(Modifier::UNDERLINED);
    }
    Span::styled(content.to_owned(), ratatui_style)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn text_of(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn highlighted_lines_keep_the_text() {
        let lines = highlight_markdown("# Title\n\nsome *emphasis* here\n");
        let texts: Vec<String> = lines.iter().map(text_of).collect();
        assert_eq!(texts, vec!["# Title", "", "some *emphasis* here"]);
    }

    #[test]
    fn missing_response_renders_nothing() {
        let batch = codec::import(r#"[{"filePath": "a"}, {"response": "x\ny"}]"#).unwrap();
        let rendered = render_responses(&batch, false);
        assert_eq!(rendered.len(), 2);
        assert!(rendered[0].is_empty());
        assert_eq!(rendered[1].len(), 2);
    }

    #[test]
    fn open_reads_and_parses_a_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"filePath": "a.rs", "response": "ok"}}]"#).unwrap();

        let result = handle_request(LoadRequest::Open(file.path().to_path_buf()), true);
        let batch = result.outcome.unwrap();
        assert_eq!(batch.items.len(), 1);
        assert_eq!(batch.rendered.len(), 1);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = handle_request(LoadRequest::Open(dir.path().join("absent.json")), false);
        assert!(matches!(result.outcome, Err(LoadError::Read { .. })));
    }

    #[test]
    fn non_array_is_an_import_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"filePath": "a.rs"}}"#).unwrap();

        let result = handle_request(LoadRequest::Open(file.path().to_path_buf()), false);
        assert!(matches!(
            result.outcome,
            Err(LoadError::Import(verdict_core::ImportError::NotAnArray))
        ));
    }

    #[test]
    fn worker_answers_every_request() {
        let (req_tx, req_rx) = crossbeam_channel::unbounded();
        let (event_tx, mut event_rx) = tokio::sync::mpsc::unbounded_channel();
        let handle = std::thread::spawn(move || loader_loop(req_rx, event_tx, false));

        req_tx.send(LoadRequest::Open("/nonexistent/verdict.json".into())).unwrap();
        drop(req_tx);
        handle.join().unwrap();

        match event_rx.try_recv() {
            Ok(AppEvent::Loaded(result)) => assert!(result.outcome.is_err()),
            other => panic!("expected a Loaded event, got {other:?}"),
        }
    }
}
