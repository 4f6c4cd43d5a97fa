//! Cursor arithmetic over a view of `len` records.
//!
//! All three functions are total: an empty view always yields position 0.

/// Pulls `cursor` back inside a view of `len` entries.
///
/// Only ever moves the cursor down. A cursor that is still in range is returned
/// unchanged so a shrinking view keeps the user as close as possible to where
/// they were.
pub fn clamp(cursor: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else if cursor >= len {
        len - 1
    } else {
        cursor
    }
}

/// Advances one position; stays put on the last entry.
pub fn next(cursor: usize, len: usize) -> usize {
    cursor.saturating_add(1).min(len.saturating_sub(1))
}

/// Retreats one position; stays put on the first entry.
pub fn previous(cursor: usize, _len: usize) -> usize {
    cursor.saturating_sub(1)
}
