//! Field-level writes back to the live sheet.
//!
//! Each requested field becomes one cell write at (row, resolved column).
//! Writes go out sequentially and there is no transaction: a mid-sequence
//! failure leaves the row partially updated, and the error says exactly how
//! far it got. Fields whose column is missing are skipped with a warning,
//! never silently dropped.

use log::{info, warn};

use super::columns::{ColumnBinding, ColumnLayout, GuestField};
use crate::api::{RowRef, SheetStore, TableHandle};
use crate::errors::{SheetError, SheetResult};

/// One requested field change carrying its semantic value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    Phone(String),
    Rsvp(bool),
    Attendance(bool),
}

impl FieldUpdate {
    pub fn field(&self) -> GuestField {
        match self {
            FieldUpdate::Phone(_) => GuestField::Phone,
            FieldUpdate::Rsvp(_) => GuestField::Rsvp,
            FieldUpdate::Attendance(_) => GuestField::Attendance,
        }
    }

    /// Cell text for this value. RSVP writes "Sim"/"Não"; attendance writes
    /// "Ok" or clears the cell, since an empty cell means no check-in was
    /// recorded.
    pub fn encoded(&self) -> String {
        match self {
            FieldUpdate::Phone(value) => value.clone(),
            FieldUpdate::Rsvp(true) => "Sim".to_string(),
            FieldUpdate::Rsvp(false) => "Não".to_string(),
            FieldUpdate::Attendance(true) => "Ok".to_string(),
            FieldUpdate::Attendance(false) => String::new(),
        }
    }
}

/// A cell write that completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellWrite {
    pub field: GuestField,
    pub column: String,
    pub value: String,
}

/// What an update run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateReport {
    pub row: u32,
    pub written: Vec<CellWrite>,
    pub skipped_missing_column: Vec<GuestField>,
}

/// Write `updates` to `row`, one cell at a time in the given order.
///
/// A failure on the first write surfaces the store error as-is; a failure
/// after at least one success surfaces [`SheetError::PartialUpdate`] carrying
/// the writes that did land.
pub async fn apply_update<S: SheetStore + ?Sized>(
    store: &S,
    table: &TableHandle,
    row: &RowRef,
    layout: &ColumnLayout,
    updates: &[FieldUpdate],
) -> SheetResult<UpdateReport> {
    let row_number = row.number();
    let requested = updates
        .iter()
        .filter(|update| layout.binding(update.field()).is_present())
        .count();

    let mut report = UpdateReport {
        row: row_number,
        written: Vec::new(),
        skipped_missing_column: Vec::new(),
    };

    for update in updates {
        let field = update.field();
        let (column, index) = match layout.binding(field) {
            ColumnBinding::Present { name, index } => (name.clone(), *index),
            ColumnBinding::Absent => {
                warn!(
                    "sheet has no '{}' column, skipping the {} field",
                    field.expected_column(),
                    field
                );
                report.skipped_missing_column.push(field);
                continue;
            }
        };

        let value = update.encoded();
        if let Err(source) = store.write_cell(table, row_number, index, &value).await {
            if report.written.is_empty() {
                return Err(source);
            }
            return Err(SheetError::PartialUpdate {
                row: row_number,
                requested,
                written: report.written,
                field,
                source: Box::new(source),
            });
        }
        report.written.push(CellWrite { field, column, value });
    }

    info!(
        "row {}: {} cell(s) written, {} field(s) skipped",
        row_number,
        report.written.len(),
        report.skipped_missing_column.len()
    );
    Ok(report)
}
