//! Unified error type for the sheet client and the sync engine.
//! Everything that talks to the remote store returns `SheetResult` so the
//! CLI can report failures with one consistent taxonomy.

use thiserror::Error;

use crate::engine::columns::GuestField;
use crate::engine::update::CellWrite;

#[derive(Debug, Error)]
pub enum SheetError {
    // ---------------------------
    // Store access
    // ---------------------------
    #[error("cannot reach the sheet service")]
    Network(#[from] reqwest::Error),

    #[error("sheet service rejected the request (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("credentials unusable: {0}")]
    Credentials(String),

    #[error("no spreadsheet matches '{0}'")]
    SpreadsheetNotFound(String),

    #[error("unexpected response from the sheet service: {0}")]
    UnexpectedResponse(String),

    // ---------------------------
    // Record location
    // ---------------------------
    /// The identity was not found when searching the live sheet, even though
    /// it may still exist in the last fetched record set. Re-fetching is the
    /// recovery path.
    #[error("guest '{0}' not found in the live sheet")]
    GuestNotFound(String),

    // ---------------------------
    // Updates
    // ---------------------------
    /// One cell write failed after earlier writes in the same update already
    /// landed. The remote row is left as-is; `written` lists what did land.
    #[error(
        "update of row {row} stopped after {}/{requested} cell write(s): the {field} write failed",
        .written.len()
    )]
    PartialUpdate {
        row: u32,
        requested: usize,
        written: Vec<CellWrite>,
        field: GuestField,
        #[source]
        source: Box<SheetError>,
    },
}

pub type SheetResult<T> = Result<T, SheetError>;
