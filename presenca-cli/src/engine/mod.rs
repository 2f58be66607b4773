//! The record synchronization engine.
//!
//! Pure request/response over a [`SheetStore`](crate::api::SheetStore):
//! fetch a snapshot, resolve its columns, derive metrics and filtered
//! views, locate the live row for a guest, and write field updates back.
//! Nothing in here renders output or reads input, so the whole engine is
//! exercised directly by the tests below it.

pub mod columns;
pub mod fetch;
pub mod locator;
pub mod metrics;
pub mod query;
pub mod records;
pub mod session;
#[cfg(test)]
pub mod testing;
pub mod update;

pub use columns::{ColumnBinding, ColumnLayout, GuestField};
pub use metrics::compute_metrics;
pub use query::{CityFilter, GuestFilter, distinct_cities, filter_guests};
pub use records::GuestRecord;
pub use session::Session;
pub use update::FieldUpdate;
