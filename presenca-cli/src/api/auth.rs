//! Credential bootstrap for the Google APIs.
//!
//! Two sources only: a ready-made bearer token from the environment, or an
//! authorized-user credentials file whose refresh token is exchanged for
//! short-lived access tokens as needed. No other flow is supported here.

use std::env;
use std::fs;
use std::path::Path;

use log::{debug, error};
use serde::Deserialize;
use tokio::sync::Mutex;

use super::constants::{ACCESS_TOKEN_ENV, OAUTH_TOKEN_URL};
use super::models::{AuthorizedUserCredentials, TokenInfo, TokenResponse};
use crate::errors::{SheetError, SheetResult};

/// Where bearer tokens come from for one session.
#[derive(Debug)]
enum TokenSource {
    /// Fixed token supplied by the operator (env override); never refreshed.
    Static(String),
    /// Authorized-user credentials, refreshed through the token endpoint.
    AuthorizedUser(AuthorizedUserCredentials),
}

/// Hands out bearer tokens, refreshing and caching behind the scenes.
#[derive(Debug)]
pub struct TokenProvider {
    source: TokenSource,
    cached: Mutex<Option<TokenInfo>>,
}

/// Error body shape of the OAuth token endpoint (distinct from the regular
/// API error envelope).
#[derive(Debug, Deserialize)]
struct OAuthErrorBody {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

fn declared_credential_type(raw: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(raw).ok()?;
    value
        .get("type")
        .and_then(|t| t.as_str())
        .map(|t| t.to_string())
}

fn wrong_kind_error(path: &Path, kind: &str) -> SheetError {
    SheetError::Credentials(format!(
        "credentials file {} is a '{}' key; only authorized-user files are supported \
         (or export {})",
        path.display(),
        kind,
        ACCESS_TOKEN_ENV
    ))
}

/// Build the error for a failed token-endpoint call.
fn refresh_failure(status: u16, body: &str) -> SheetError {
    let detail = match serde_json::from_str::<OAuthErrorBody>(body) {
        Ok(err) => match err.error_description {
            Some(desc) => format!("{}: {}", err.error, desc),
            None => err.error,
        },
        Err(_) => body.to_string(),
    };
    error!("token refresh failed (HTTP {status}): {detail}");
    SheetError::Credentials(format!("token refresh failed (HTTP {status}): {detail}"))
}

impl TokenProvider {
    /// Build a provider from the `GOOGLE_OAUTH_ACCESS_TOKEN` override if it
    /// is set, otherwise from the credentials file at `path`.
    pub fn from_environment(path: &Path) -> SheetResult<Self> {
        if let Ok(token) = env::var(ACCESS_TOKEN_ENV) {
            if !token.trim().is_empty() {
                debug!("using access token from {ACCESS_TOKEN_ENV}");
                return Ok(Self::with_static_token(token.trim().to_string()));
            }
        }
        Self::from_credentials_file(path)
    }

    /// Build a provider from an authorized-user credentials file.
    pub fn from_credentials_file(path: &Path) -> SheetResult<Self> {
        let raw = fs::read_to_string(path).map_err(|e| {
            SheetError::Credentials(format!(
                "cannot read credentials file {} ({}); run 'presenca-cli config set \
                 credentials <file>' to point at one, or export {}",
                path.display(),
                e,
                ACCESS_TOKEN_ENV
            ))
        })?;

        let creds: AuthorizedUserCredentials = match serde_json::from_str(&raw) {
            Ok(creds) => creds,
            Err(e) => {
                // Service-account keys are valid JSON of a different shape;
                // name them instead of surfacing a field-level serde error.
                if let Some(kind) = declared_credential_type(&raw) {
                    if kind != "authorized_user" {
                        return Err(wrong_kind_error(path, &kind));
                    }
                }
                return Err(SheetError::Credentials(format!(
                    "credentials file {} is not a valid authorized-user file: {}",
                    path.display(),
                    e
                )));
            }
        };

        if !creds.is_authorized_user() {
            let kind = creds.credential_type.as_deref().unwrap_or("unknown");
            return Err(wrong_kind_error(path, kind));
        }

        Ok(Self {
            source: TokenSource::AuthorizedUser(creds),
            cached: Mutex::new(None),
        })
    }

    /// Provider around a fixed token. Used for the env override and in tests.
    pub fn with_static_token(token: String) -> Self {
        Self {
            source: TokenSource::Static(token),
            cached: Mutex::new(None),
        }
    }

    /// Current bearer token, refreshing through the token endpoint when the
    /// cached one is missing or stale.
    pub async fn bearer(&self, http: &reqwest::Client) -> SheetResult<String> {
        let creds = match &self.source {
            TokenSource::Static(token) => return Ok(token.clone()),
            TokenSource::AuthorizedUser(creds) => creds,
        };

        let mut cached = self.cached.lock().await;
        if let Some(token) = cached.as_ref() {
            if !token.is_expired() {
                return Ok(token.access_token.clone());
            }
            debug!("cached access token expired, refreshing");
        } else {
            debug!("no cached access token, refreshing");
        }

        let response = http
            .post(OAUTH_TOKEN_URL)
            .form(&[
                ("client_id", creds.client_id.as_str()),
                ("client_secret", creds.client_secret.as_str()),
                ("refresh_token", creds.refresh_token.as_str()),
                ("grant_type", "refresh_token"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(refresh_failure(status.as_u16(), &body));
        }

        let token: TokenResponse = response.json().await?;
        let info = TokenInfo::from_response(token);
        let bearer = info.access_token.clone();
        *cached = Some(info);
        Ok(bearer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn static_token_is_returned_verbatim() {
        let provider = TokenProvider::with_static_token("tok-123".to_string());
        let http = reqwest::Client::new();
        assert_eq!(provider.bearer(&http).await.unwrap(), "tok-123");
    }

    #[test]
    fn missing_credentials_file_is_a_credentials_error() {
        let missing = Path::new("/definitely/not/here/credentials.json");
        let err = TokenProvider::from_credentials_file(missing).unwrap_err();
        assert!(matches!(err, SheetError::Credentials(_)));
    }

    #[test]
    fn refresh_failures_name_the_oauth_error() {
        let body =
            r#"{"error":"invalid_grant","error_description":"Token has been expired or revoked."}"#;
        match refresh_failure(400, body) {
            SheetError::Credentials(msg) => {
                assert!(msg.contains("HTTP 400"));
                assert!(msg.contains("invalid_grant: Token has been expired or revoked."));
            }
            other => panic!("expected credentials error, got {other:?}"),
        }

        // Non-JSON bodies pass through as-is.
        match refresh_failure(502, "Bad Gateway") {
            SheetError::Credentials(msg) => assert!(msg.contains("Bad Gateway")),
            other => panic!("expected credentials error, got {other:?}"),
        }
    }

    #[test]
    fn service_account_key_is_rejected() {
        let dir = env::temp_dir();
        let path = dir.join(format!("presenca-test-sa-{}.json", std::process::id()));
        fs::write(
            &path,
            r#"{"type":"service_account","project_id":"p","private_key_id":"k","client_email":"x@p.iam.gserviceaccount.com"}"#,
        )
        .unwrap();

        let err = TokenProvider::from_credentials_file(&path).unwrap_err();
        let _ = fs::remove_file(&path);

        match err {
            SheetError::Credentials(msg) => assert!(msg.contains("service_account")),
            other => panic!("expected credentials error, got {other:?}"),
        }
    }
}
