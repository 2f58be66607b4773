//! In-memory snapshot of the guest table.

use super::columns::{ColumnBinding, ColumnLayout, resolve_columns};

/// One guest row. Cells line up with the header of the owning [`RecordSet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestRecord {
    cells: Vec<String>,
}

impl GuestRecord {
    /// Cell value for a resolved column, `None` when the role is absent.
    /// Present bindings always have a cell since rows are padded to the
    /// header width.
    pub fn cell(&self, binding: &ColumnBinding) -> Option<&str> {
        let index = binding.index()?;
        self.cells.get(index as usize - 1).map(String::as_str)
    }

    /// All cells in header order.
    pub fn cells(&self) -> &[String] {
        &self.cells
    }
}

/// Ordered guest rows plus the header they were read under. Rebuilt from
/// scratch on every fetch, and discarded after any successful update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSet {
    columns: Vec<String>,
    records: Vec<GuestRecord>,
}

impl RecordSet {
    /// Shape a raw grid: row 1 becomes the header, every following row
    /// becomes a record padded (or truncated) to the header width.
    pub fn from_grid(grid: Vec<Vec<String>>) -> Self {
        let mut rows = grid.into_iter();
        let columns = rows.next().unwrap_or_default();
        let width = columns.len();
        let records = rows
            .map(|mut cells| {
                cells.resize(width, String::new());
                GuestRecord { cells }
            })
            .collect();
        Self { columns, records }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn records(&self) -> &[GuestRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn layout(&self) -> ColumnLayout {
        resolve_columns(&self.columns)
    }

    /// First record whose identity cell equals `identity` exactly.
    pub fn guest<'a>(&'a self, layout: &ColumnLayout, identity: &str) -> Option<&'a GuestRecord> {
        self.records
            .iter()
            .find(|record| record.cell(&layout.name) == Some(identity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|row| row.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    #[test]
    fn first_row_is_the_header() {
        let set = RecordSet::from_grid(grid(&[&["Nome", "Cidade"], &["Ana", "Lisboa"]]));
        assert_eq!(set.columns(), ["Nome", "Cidade"]);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn short_rows_are_padded_to_the_header_width() {
        let set = RecordSet::from_grid(grid(&[
            &["Nome", "Cidade", "Telefone"],
            &["Ana"],
            &["Bruno", "Porto", "912345678", "extra"],
        ]));
        let layout = set.layout();

        let ana = &set.records()[0];
        assert_eq!(ana.cell(&layout.city), Some(""));
        assert_eq!(ana.cell(&layout.phone), Some(""));

        // Cells beyond the header are dropped.
        let bruno = &set.records()[1];
        assert_eq!(bruno.cell(&layout.phone), Some("912345678"));
    }

    #[test]
    fn empty_grid_yields_an_empty_set() {
        let set = RecordSet::from_grid(Vec::new());
        assert!(set.is_empty());
        assert!(set.columns().is_empty());
    }

    #[test]
    fn guest_lookup_is_exact_and_first_match() {
        let set = RecordSet::from_grid(grid(&[
            &["Nome", "Cidade"],
            &["Ana Silva", "Lisboa"],
            &["Ana", "Porto"],
            &["Ana", "Braga"],
        ]));
        let layout = set.layout();

        let ana = set.guest(&layout, "Ana").unwrap();
        assert_eq!(ana.cell(&layout.city), Some("Porto"));
        assert!(set.guest(&layout, "ana").is_none());
    }

    #[test]
    fn guest_lookup_without_a_name_column_finds_nothing() {
        let set = RecordSet::from_grid(grid(&[&["Cidade"], &["Lisboa"]]));
        let layout = set.layout();
        assert!(set.guest(&layout, "Lisboa").is_none());
    }
}
