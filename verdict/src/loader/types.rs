//! Owned data types exchanged with the loader thread.
//!
//! Everything here is `Send` and free of borrowed lifetimes so it can move from
//! the worker into `AppState` without copying.

use std::path::PathBuf;

use ratatui::text::Line;
use thiserror::Error;
use verdict_core::{ImportError, RawItem};

/// Work the loader thread accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadRequest {
    /// Read, parse and render the batch at this path.
    Open(PathBuf),
}

/// Why a batch could not be loaded.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Import(#[from] ImportError),
}

/// A parsed batch plus the pre-rendered body of every response.
///
/// `rendered[i]` belongs to `items[i]`; an absent response renders as no lines.
#[derive(Debug, Clone)]
pub struct LoadedBatch {
    pub items: Vec<RawItem>,
    pub rendered: Vec<Vec<Line<'static>>>,
}

/// Outcome of one [`LoadRequest`].
#[derive(Debug)]
pub struct LoadResult {
    pub path: PathBuf,
    pub outcome: Result<LoadedBatch, LoadError>,
}
