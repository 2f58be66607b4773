//! Endpoint constants for the Google Sheets and Drive REST APIs.

/// Base URL for the Sheets v4 API.
pub const SHEETS_BASE_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Drive v3 file listing, used to resolve a spreadsheet by title.
pub const DRIVE_FILES_URL: &str = "https://www.googleapis.com/drive/v3/files";

/// OAuth2 token endpoint for refreshing authorized-user credentials.
pub const OAUTH_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// MIME type Drive assigns to Google Sheets documents.
pub const SPREADSHEET_MIME: &str = "application/vnd.google-apps.spreadsheet";

/// Environment variable holding a ready-made bearer token. When set, the
/// credentials file is never read.
pub const ACCESS_TOKEN_ENV: &str = "GOOGLE_OAUTH_ACCESS_TOKEN";
