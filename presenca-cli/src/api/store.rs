//! Remote store boundary consumed by the sync engine.
//!
//! The engine never talks HTTP directly; it goes through [`SheetStore`] so
//! the same fetch/locate/update logic runs against the real Sheets API in
//! production and against an in-memory sheet in tests.

use async_trait::async_trait;

use crate::errors::SheetResult;

/// Handle to one bound worksheet of a remote spreadsheet.
///
/// Produced by [`SheetStore::open_table`] once per session and passed back
/// into every subsequent store call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableHandle {
    /// Spreadsheet id as used in API paths.
    pub spreadsheet_id: String,
    /// Document title, for logs and operator messages.
    pub spreadsheet_title: String,
    /// Title of the bound worksheet (always the first worksheet).
    pub worksheet_title: String,
}

/// Opaque reference to one remote row. Rows are 1-indexed and row 1 is the
/// header, so the first guest lives on row 2.
///
/// A `RowRef` is only ever produced by a live search of the sheet, never
/// derived from a position in a previously fetched record set: the sheet may
/// have been reordered since that fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowRef(pub(crate) u32);

impl RowRef {
    /// The 1-indexed sheet row this reference points at.
    pub fn number(&self) -> u32 {
        self.0
    }
}

/// The four operations the engine needs from a remote tabular store.
#[async_trait]
pub trait SheetStore {
    /// Resolve a locator (full URL or document title) and bind to the first
    /// worksheet of the matching spreadsheet.
    async fn open_table(&self, locator: &str) -> SheetResult<TableHandle>;

    /// Read the entire worksheet, row-major. Row 1 is the header row. The
    /// grid is returned exactly as stored; rows may be shorter than the
    /// header when trailing cells are blank.
    async fn read_all(&self, table: &TableHandle) -> SheetResult<Vec<Vec<String>>>;

    /// Search the live sheet for the first cell exactly equal to `text`,
    /// scanning rows top to bottom. Returns `None` when no cell matches.
    async fn find_row(&self, table: &TableHandle, text: &str) -> SheetResult<Option<RowRef>>;

    /// Write a single cell. `row` and `col` are 1-based.
    async fn write_cell(
        &self,
        table: &TableHandle,
        row: u32,
        col: u32,
        value: &str,
    ) -> SheetResult<()>;
}
