//! Batch loading off the UI thread.
//!
//! A `std::thread` worker receives [`types::LoadRequest`]s over a crossbeam
//! channel, reads and parses the file, pre-renders every response, and posts
//! the outcome back to the event bus as `AppEvent::Loaded`. Large batches never
//! stall rendering or input.
pub mod types;
pub mod worker;
