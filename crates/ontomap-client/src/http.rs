//! Shared HTTP plumbing for the service clients

use crate::ClientError;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Default timeout for a single request (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Build a reqwest client with the given per-request timeout
pub fn build_http_client(timeout: Duration) -> Result<reqwest::Client, ClientError> {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("ontomap/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

/// Reject non-success statuses, then decode the body as JSON
pub(crate) async fn decode_json<T>(response: reqwest::Response) -> Result<T, ClientError>
where
    T: DeserializeOwned,
{
    let status = response.status();
    if !status.is_success() {
        return Err(ClientError::Status {
            status: status.as_u16(),
            url: response.url().to_string(),
        });
    }

    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

/// Join a base URL and a path without doubling the slash
pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}
