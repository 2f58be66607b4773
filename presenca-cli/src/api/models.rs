//! Credential and wire models for the Google Sheets and Drive APIs.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Authorized-user credential file, as written by `gcloud auth` or the
/// Google client libraries (client id/secret plus a long-lived refresh
/// token).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorizedUserCredentials {
    #[serde(rename = "type", default)]
    pub credential_type: Option<String>,
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
}

impl AuthorizedUserCredentials {
    /// Whether the file declares itself as an authorized-user credential.
    /// Service-account keys use the same on-disk shape family but cannot be
    /// exchanged with a plain refresh grant.
    pub fn is_authorized_user(&self) -> bool {
        match self.credential_type.as_deref() {
            Some(kind) => kind == "authorized_user",
            // Older files omit the field; the three credential fields being
            // present is good enough.
            None => true,
        }
    }
}

/// A bearer token plus the moment it stops being usable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenInfo {
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

impl TokenInfo {
    /// Build from a token endpoint response, shaving a safety margin off the
    /// advertised lifetime so we refresh before the server-side cutoff.
    pub fn from_response(response: TokenResponse) -> Self {
        let lifetime = Duration::seconds(response.expires_in.saturating_sub(60) as i64);
        Self {
            access_token: response.access_token,
            expires_at: Utc::now() + lifetime,
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

/// Body returned by the OAuth2 token endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: u64,
}

/// `values.get` / `values.update` payload: a rectangular block of cells.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major_dimension: Option<String>,
    /// Absent entirely when the requested range is empty.
    #[serde(default)]
    pub values: Vec<Vec<Value>>,
}

/// Response to a `values.update` call.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateValuesResponse {
    #[serde(default)]
    pub updated_range: Option<String>,
    #[serde(default)]
    pub updated_cells: Option<u32>,
}

/// Spreadsheet metadata, trimmed to the fields we request.
#[derive(Debug, Clone, Deserialize)]
pub struct SpreadsheetMeta {
    #[serde(default)]
    pub properties: SpreadsheetProperties,
    #[serde(default)]
    pub sheets: Vec<SheetMeta>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpreadsheetProperties {
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SheetMeta {
    pub properties: SheetProperties,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SheetProperties {
    #[serde(default)]
    pub title: String,
}

/// Drive `files.list` response, used for title-based lookup.
#[derive(Debug, Clone, Deserialize)]
pub struct DriveFileList {
    #[serde(default)]
    pub files: Vec<DriveFile>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DriveFile {
    pub id: String,
}

/// Standard Google API error envelope. Only the message is consumed; the
/// envelope's code and status fields duplicate the HTTP response line.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub message: String,
}

/// Render one cell value as the string the rest of the engine works with.
/// The sheet has no strong typing, but the API still returns numbers and
/// booleans as JSON scalars.
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn cell_text_flattens_scalars() {
        assert_eq!(cell_text(&json!("Ana")), "Ana");
        assert_eq!(cell_text(&json!(42)), "42");
        assert_eq!(cell_text(&json!(true)), "true");
        assert_eq!(cell_text(&Value::Null), "");
    }

    #[test]
    fn value_range_defaults_to_empty_grid() {
        let range: ValueRange = serde_json::from_str(r#"{"range":"'Guests'!A1:Z1000"}"#).unwrap();
        assert!(range.values.is_empty());
    }

    #[test]
    fn authorized_user_type_check() {
        let creds: AuthorizedUserCredentials = serde_json::from_value(json!({
            "type": "authorized_user",
            "client_id": "id",
            "client_secret": "secret",
            "refresh_token": "tok",
        }))
        .unwrap();
        assert!(creds.is_authorized_user());

        let service: AuthorizedUserCredentials = serde_json::from_value(json!({
            "type": "service_account",
            "client_id": "id",
            "client_secret": "secret",
            "refresh_token": "tok",
        }))
        .unwrap();
        assert!(!service.is_authorized_user());
    }
}
