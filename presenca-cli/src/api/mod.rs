//! Google Sheets API module.
//!
//! Everything that talks to the network lives here: credential bootstrap,
//! the REST client, and the [`SheetStore`] trait the rest of the crate
//! programs against. The engine never sees a URL.

pub mod auth;
pub mod client;
pub mod constants;
pub mod models;
pub mod store;

pub use auth::TokenProvider;
pub use client::SheetsClient;
pub use store::{RowRef, SheetStore, TableHandle};
