//! Fixed-size sequential pages over a dataset.
//!
//! Paging keeps no state of its own: the caller carries the [`PageCursor`]
//! and may restart from any offset.

use crate::dataset::TripRecord;

/// Rows per page.
pub const PAGE_SIZE: usize = 5;

/// Offset of the next page into a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct PageCursor(usize);

impl PageCursor {
    pub fn at(offset: usize) -> Self {
        PageCursor(offset)
    }

    pub fn offset(&self) -> usize {
        self.0
    }
}

/// One page of rows and the cursor for the page after it.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a> {
    pub rows: &'a [TripRecord],
    pub next: PageCursor,
    /// Set when the cursor was already past the end; `rows` is then empty.
    pub exhausted: bool,
}

/// Returns up to [`PAGE_SIZE`] records starting at `cursor`.
///
/// The cursor always advances by a full page, even when the final page is
/// short. A cursor at or past the end yields no rows, `exhausted = true`
/// and an unchanged cursor.
pub fn next_page(records: &[TripRecord], cursor: PageCursor) -> Page<'_> {
    let start = cursor.offset();
    if start >= records.len() {
        return Page {
            rows: &[],
            next: cursor,
            exhausted: true,
        };
    }

    let end = start.saturating_add(PAGE_SIZE).min(records.len());
    Page {
        rows: &records[start..end],
        next: PageCursor(start.saturating_add(PAGE_SIZE)),
        exhausted: false,
    }
}
