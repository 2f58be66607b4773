//! One operator session against one spreadsheet.

use super::columns::ColumnLayout;
use super::fetch::fetch_records;
use super::locator::locate_guest;
use super::records::RecordSet;
use super::update::{FieldUpdate, UpdateReport, apply_update};
use crate::api::{RowRef, SheetStore, TableHandle};
use crate::errors::SheetResult;

/// Owns the store connection and the table it was opened on. Built once per
/// invocation; reconnecting means building a new one. All remote calls go
/// out sequentially from whoever holds the session.
pub struct Session<S: SheetStore> {
    store: S,
    table: TableHandle,
}

impl<S: SheetStore> Session<S> {
    /// Open `locator` (URL or spreadsheet title) and bind its first
    /// worksheet.
    pub async fn connect(store: S, locator: &str) -> SheetResult<Self> {
        let table = store.open_table(locator).await?;
        Ok(Self { store, table })
    }

    pub fn table(&self) -> &TableHandle {
        &self.table
    }

    /// Fresh snapshot of the whole table.
    pub async fn fetch(&self) -> SheetResult<RecordSet> {
        fetch_records(&self.store, &self.table).await
    }

    /// Live row number for an identity.
    pub async fn locate(&self, identity: &str) -> SheetResult<RowRef> {
        locate_guest(&self.store, &self.table, identity).await
    }

    /// Apply field updates to a located row.
    pub async fn update(
        &self,
        row: &RowRef,
        layout: &ColumnLayout,
        updates: &[FieldUpdate],
    ) -> SheetResult<UpdateReport> {
        apply_update(&self.store, &self.table, row, layout, updates).await
    }
}
