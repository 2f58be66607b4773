//! In-memory store double for engine tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::api::{RowRef, SheetStore, TableHandle};
use crate::errors::{SheetError, SheetResult};

/// In-memory sheet addressed 1-based like the real store. A single read or
/// a single write can be armed to fail for error-path tests.
pub struct FakeSheet {
    grid: Mutex<Vec<Vec<String>>>,
    fail_at: Mutex<Option<(u32, u32)>>,
    fail_read: Mutex<bool>,
}

impl FakeSheet {
    pub fn new(rows: &[&[&str]]) -> Self {
        let grid = rows
            .iter()
            .map(|row| row.iter().map(|s| s.to_string()).collect())
            .collect();
        Self {
            grid: Mutex::new(grid),
            fail_at: Mutex::new(None),
            fail_read: Mutex::new(false),
        }
    }

    /// Arm a one-shot failure for the next write landing on (row, col).
    pub fn fail_next_write_at(&self, row: u32, col: u32) {
        *self.fail_at.lock().unwrap() = Some((row, col));
    }

    /// Arm a one-shot failure for the next whole-grid read.
    pub fn fail_next_read(&self) {
        *self.fail_read.lock().unwrap() = true;
    }

    pub fn cell(&self, row: u32, col: u32) -> String {
        self.grid.lock().unwrap()[row as usize - 1]
            .get(col as usize - 1)
            .cloned()
            .unwrap_or_default()
    }

    pub fn handle() -> TableHandle {
        TableHandle {
            spreadsheet_id: "fake-spreadsheet".into(),
            spreadsheet_title: "Fake".into(),
            worksheet_title: "Página1".into(),
        }
    }
}

#[async_trait]
impl SheetStore for FakeSheet {
    async fn open_table(&self, _locator: &str) -> SheetResult<TableHandle> {
        Ok(Self::handle())
    }

    async fn read_all(&self, _table: &TableHandle) -> SheetResult<Vec<Vec<String>>> {
        {
            let mut fail_read = self.fail_read.lock().unwrap();
            if *fail_read {
                *fail_read = false;
                return Err(SheetError::Api {
                    status: 500,
                    message: "injected read failure".into(),
                });
            }
        }
        Ok(self.grid.lock().unwrap().clone())
    }

    async fn find_row(&self, _table: &TableHandle, text: &str) -> SheetResult<Option<RowRef>> {
        let grid = self.grid.lock().unwrap();
        for (i, row) in grid.iter().enumerate() {
            if row.iter().any(|cell| cell == text) {
                return Ok(Some(RowRef(i as u32 + 1)));
            }
        }
        Ok(None)
    }

    async fn write_cell(
        &self,
        _table: &TableHandle,
        row: u32,
        col: u32,
        value: &str,
    ) -> SheetResult<()> {
        let armed = {
            let mut fail_at = self.fail_at.lock().unwrap();
            if fail_at.is_some_and(|(r, c)| r == row && c == col) {
                fail_at.take()
            } else {
                None
            }
        };
        if armed.is_some() {
            return Err(SheetError::Api {
                status: 500,
                message: "injected write failure".into(),
            });
        }

        let mut grid = self.grid.lock().unwrap();
        let row_idx = row as usize - 1;
        if grid.len() <= row_idx {
            grid.resize(row_idx + 1, Vec::new());
        }
        let cells = &mut grid[row_idx];
        let col_idx = col as usize - 1;
        if cells.len() <= col_idx {
            cells.resize(col_idx + 1, String::new());
        }
        cells[col_idx] = value.to_string();
        Ok(())
    }
}
