//! HTTP client for the Google Sheets and Drive APIs.
//!
//! Implements [`SheetStore`] over the REST endpoints: spreadsheet lookup by
//! URL or Drive title, whole-grid reads, live text search, and single-cell
//! writes with `USER_ENTERED` input semantics.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, error, info};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::auth::TokenProvider;
use super::constants::{DRIVE_FILES_URL, SHEETS_BASE_URL, SPREADSHEET_MIME};
use super::models::{
    ApiErrorBody, DriveFileList, SpreadsheetMeta, UpdateValuesResponse, ValueRange, cell_text,
};
use super::store::{RowRef, SheetStore, TableHandle};
use crate::errors::{SheetError, SheetResult};

static SPREADSHEET_URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/spreadsheets/d/([a-zA-Z0-9_-]+)").unwrap());

/// Authenticated client for one session.
pub struct SheetsClient {
    http: Client,
    tokens: TokenProvider,
}

impl SheetsClient {
    pub fn new(tokens: TokenProvider) -> SheetResult<Self> {
        let http = Client::builder().timeout(Duration::from_secs(30)).build()?;
        Ok(Self { http, tokens })
    }

    /// Resolve a plain spreadsheet title through the Drive search endpoint.
    async fn lookup_by_title(&self, title: &str) -> SheetResult<String> {
        let query = format!(
            "name = '{}' and mimeType = '{}' and trashed = false",
            title.replace('\'', "\\'"),
            SPREADSHEET_MIME
        );
        let url = format!(
            "{}?q={}&fields=files(id)&pageSize=10",
            DRIVE_FILES_URL,
            urlencoding::encode(&query)
        );

        let list: DriveFileList = self.get_json(&url, "searching Drive by title").await?;
        match list.files.into_iter().next() {
            Some(file) => {
                debug!("title '{}' resolved to spreadsheet {}", title, file.id);
                Ok(file.id)
            }
            None => Err(SheetError::SpreadsheetNotFound(title.to_string())),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, context: &str) -> SheetResult<T> {
        let bearer = self.tokens.bearer(&self.http).await?;
        let response = self.http.get(url).bearer_auth(bearer).send().await?;
        if !response.status().is_success() {
            return Err(api_error(response, context).await);
        }
        Ok(response.json().await?)
    }

    async fn put_json<T: DeserializeOwned, B: Serialize>(
        &self,
        url: &str,
        body: &B,
        context: &str,
    ) -> SheetResult<T> {
        let bearer = self.tokens.bearer(&self.http).await?;
        let response = self
            .http
            .put(url)
            .bearer_auth(bearer)
            .json(body)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(api_error(response, context).await);
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl SheetStore for SheetsClient {
    async fn open_table(&self, locator: &str) -> SheetResult<TableHandle> {
        let spreadsheet_id = match extract_spreadsheet_id(locator) {
            Some(id) => id.to_string(),
            None => self.lookup_by_title(locator).await?,
        };

        let url = format!(
            "{}/{}?fields=properties.title,sheets.properties",
            SHEETS_BASE_URL, spreadsheet_id
        );
        let meta: SpreadsheetMeta = match self.get_json(&url, "loading spreadsheet").await {
            Err(SheetError::Api { status: 404, .. }) => {
                return Err(SheetError::SpreadsheetNotFound(locator.to_string()));
            }
            other => other?,
        };

        let spreadsheet_title = meta.properties.title;
        // Bind the first worksheet, same as the sheet tab order in the UI.
        let first = meta.sheets.into_iter().next().ok_or_else(|| {
            SheetError::UnexpectedResponse(format!(
                "spreadsheet '{spreadsheet_title}' has no worksheets"
            ))
        })?;

        info!(
            "opened spreadsheet '{}' (worksheet '{}')",
            spreadsheet_title, first.properties.title
        );
        Ok(TableHandle {
            spreadsheet_id,
            spreadsheet_title,
            worksheet_title: first.properties.title,
        })
    }

    async fn read_all(&self, table: &TableHandle) -> SheetResult<Vec<Vec<String>>> {
        let url = format!(
            "{}/{}/values/{}",
            SHEETS_BASE_URL,
            table.spreadsheet_id,
            urlencoding::encode(&quote_worksheet(&table.worksheet_title))
        );
        let range: ValueRange = self.get_json(&url, "reading values").await?;
        debug!("read {} row(s) from '{}'", range.values.len(), table.worksheet_title);
        Ok(range
            .values
            .into_iter()
            .map(|row| row.iter().map(cell_text).collect())
            .collect())
    }

    async fn find_row(&self, table: &TableHandle, text: &str) -> SheetResult<Option<RowRef>> {
        // Search against a fresh read so concurrent edits are seen.
        let grid = self.read_all(table).await?;
        for (i, row) in grid.iter().enumerate() {
            if row.iter().any(|cell| cell == text) {
                return Ok(Some(RowRef(i as u32 + 1)));
            }
        }
        Ok(None)
    }

    async fn write_cell(&self, table: &TableHandle, row: u32, col: u32, value: &str) -> SheetResult<()> {
        let range = cell_range(&table.worksheet_title, row, col);
        let url = format!(
            "{}/{}/values/{}?valueInputOption=USER_ENTERED",
            SHEETS_BASE_URL,
            table.spreadsheet_id,
            urlencoding::encode(&range)
        );
        let body = serde_json::json!({ "range": range, "values": [[value]] });

        let updated: UpdateValuesResponse = self.put_json(&url, &body, "writing cell").await?;
        debug!(
            "wrote {} ({} cell(s) updated)",
            updated.updated_range.as_deref().unwrap_or(&range),
            updated.updated_cells.unwrap_or(0)
        );
        Ok(())
    }
}

/// Turn a non-success response into an [`SheetError::Api`], preferring the
/// message from the standard error envelope over the raw body.
async fn api_error(response: reqwest::Response, context: &str) -> SheetError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    error_from_body(status, &body, context)
}

fn error_from_body(status: u16, body: &str, context: &str) -> SheetError {
    let message = match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(envelope) => envelope.error.message,
        Err(_) => {
            let mut raw = body.trim().to_string();
            if raw.len() > 200 {
                let mut cut = 200;
                while !raw.is_char_boundary(cut) {
                    cut -= 1;
                }
                raw.truncate(cut);
                raw.push_str("...");
            }
            raw
        }
    };
    error!("{context} failed (HTTP {status}): {message}");
    SheetError::Api {
        status,
        message: format!("{context}: {message}"),
    }
}

/// Spreadsheet id from a full URL, or `None` when the locator is a title.
fn extract_spreadsheet_id(locator: &str) -> Option<&str> {
    SPREADSHEET_URL_RE
        .captures(locator)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// 1-based column number to its letter form (1 -> A, 27 -> AA).
fn column_letter(mut col: u32) -> String {
    let mut letters = Vec::new();
    while col > 0 {
        let rem = ((col - 1) % 26) as u8;
        letters.push(b'A' + rem);
        col = (col - 1) / 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

/// Worksheet title quoted for an A1 range (embedded quotes doubled).
fn quote_worksheet(title: &str) -> String {
    format!("'{}'", title.replace('\'', "''"))
}

fn cell_range(worksheet: &str, row: u32, col: u32) -> String {
    format!("{}!{}{}", quote_worksheet(worksheet), column_letter(col), row)
}
