//! Live-row lookup by identity.

use log::debug;

use crate::api::{RowRef, SheetStore, TableHandle};
use crate::errors::{SheetError, SheetResult};

/// Find the live row holding `identity` by searching the sheet itself, not
/// a local snapshot, so the write target survives rows being inserted or
/// removed after the last fetch. When identities repeat, the first match
/// (top to bottom) wins.
pub async fn locate_guest<S: SheetStore + ?Sized>(
    store: &S,
    table: &TableHandle,
    identity: &str,
) -> SheetResult<RowRef> {
    match store.find_row(table, identity).await? {
        Some(row) => {
            debug!("'{}' found at row {}", identity, row.number());
            Ok(row)
        }
        None => Err(SheetError::GuestNotFound(identity.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testing::FakeSheet;

    #[tokio::test]
    async fn finds_the_live_row_number() {
        let sheet = FakeSheet::new(&[&["Nome"], &["Ana"], &["Bruno"]]);
        let table = FakeSheet::handle();

        let row = locate_guest(&sheet, &table, "Bruno").await.unwrap();
        assert_eq!(row.number(), 3);
    }

    #[tokio::test]
    async fn vanished_identity_is_a_not_found_error() {
        let sheet = FakeSheet::new(&[&["Nome"], &["Ana"]]);
        let table = FakeSheet::handle();

        let err = locate_guest(&sheet, &table, "Carla").await.unwrap_err();
        match err {
            SheetError::GuestNotFound(name) => assert_eq!(name, "Carla"),
            other => panic!("expected not-found, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn duplicate_identities_resolve_to_the_first_row() {
        let sheet = FakeSheet::new(&[&["Nome"], &["Ana"], &["Ana"]]);
        let table = FakeSheet::handle();

        let row = locate_guest(&sheet, &table, "Ana").await.unwrap();
        assert_eq!(row.number(), 2);
    }

    #[tokio::test]
    async fn match_is_exact_not_substring() {
        let sheet = FakeSheet::new(&[&["Nome"], &["Ana Silva"]]);
        let table = FakeSheet::handle();

        let err = locate_guest(&sheet, &table, "Ana").await.unwrap_err();
        assert!(matches!(err, SheetError::GuestNotFound(_)));
    }
}
