//! Pull the whole table into memory.

use log::{info, warn};

use super::records::RecordSet;
use crate::api::{SheetStore, TableHandle};
use crate::errors::SheetResult;

/// Read the entire worksheet into a fresh [`RecordSet`]. All-or-nothing:
/// any store failure surfaces before a single record is produced.
pub async fn fetch_records<S: SheetStore + ?Sized>(
    store: &S,
    table: &TableHandle,
) -> SheetResult<RecordSet> {
    let grid = store.read_all(table).await?;
    let set = RecordSet::from_grid(grid);

    let missing = set.layout().missing_fields();
    if !missing.is_empty() {
        let columns: Vec<&str> = missing.iter().map(|field| field.expected_column()).collect();
        warn!(
            "worksheet '{}' is missing column(s): {}",
            table.worksheet_title,
            columns.join(", ")
        );
    }

    info!(
        "fetched {} guest(s) from '{}'",
        set.len(),
        table.worksheet_title
    );
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testing::FakeSheet;
    use crate::errors::SheetError;

    #[tokio::test]
    async fn shapes_the_grid_into_header_and_records() {
        let sheet = FakeSheet::new(&[
            &["Nome", "Cidade", "Telefone", "Presença", "Comparecimento"],
            &["Ana", "Lisboa", "911111111", "Sim", "Ok"],
            &["Bruno", "Porto", "", "Não", ""],
        ]);
        let table = FakeSheet::handle();

        let set = fetch_records(&sheet, &table).await.unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.columns().len(), 5);
        assert!(set.layout().missing_fields().is_empty());
    }

    #[tokio::test]
    async fn empty_worksheet_fetches_an_empty_set() {
        let sheet = FakeSheet::new(&[]);
        let table = FakeSheet::handle();

        let set = fetch_records(&sheet, &table).await.unwrap();
        assert!(set.is_empty());
    }

    #[tokio::test]
    async fn store_failure_surfaces_instead_of_a_partial_set() {
        let sheet = FakeSheet::new(&[&["Nome", "Cidade"], &["Ana", "Lisboa"]]);
        let table = FakeSheet::handle();

        sheet.fail_next_read();
        let err = fetch_records(&sheet, &table).await.unwrap_err();
        assert!(matches!(err, SheetError::Api { status: 500, .. }));

        // The next fetch sees the full table again.
        let set = fetch_records(&sheet, &table).await.unwrap();
        assert_eq!(set.len(), 1);
    }
}
