//! verdict-core — the review session engine behind `verdict`.
//!
//! Holds a batch of generated records, one accept/reject/undecided decision per
//! record, and the filtered view and cursor the reviewer moves through. Nothing
//! in this crate touches the terminal; the `verdict` binary renders a
//! [`Session`] and feeds key input through a [`Dispatcher`].
//!
//! # Modules
//!
//! - [`types`]: records, decisions, filters
//! - [`store`]: the record batch and its parallel decision vector
//! - [`view`]: view index computation
//! - [`cursor`]: cursor clamping and stepping
//! - [`session`]: the session controller and decision engine
//! - [`dispatch`]: key-to-command dispatch with text-entry awareness
//! - [`codec`]: JSON import and export
//! - [`error`]: import and export errors

pub mod codec;
pub mod cursor;
pub mod dispatch;
pub mod error;
pub mod session;
pub mod store;
pub mod types;
pub mod view;

pub use dispatch::{Command, Dispatcher, InputMode, Key, KeyInput};
pub use error::{ExportError, ImportError};
pub use session::{DecisionCounts, Session};
pub use store::RecordStore;
pub use types::{Decision, Filter, RawItem, Record, Usage};
