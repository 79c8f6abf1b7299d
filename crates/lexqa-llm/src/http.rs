//! Shared JSON-over-HTTP plumbing for the hosted providers

use crate::LlmError;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

/// Build the HTTP client shared by a provider's calls
///
/// No request timeout is set; the transport defaults apply.
pub(crate) fn build_client() -> Result<reqwest::Client, LlmError> {
    reqwest::Client::builder()
        .build()
        .map_err(|e| LlmError::Config(format!("Failed to build HTTP client: {}", e)))
}

/// POST a JSON body with bearer auth and decode the JSON response
pub(crate) async fn post_json<B, R>(
    client: &reqwest::Client,
    url: &str,
    api_key: &str,
    model: &str,
    body: &B,
) -> Result<R, LlmError>
where
    B: Serialize + ?Sized,
    R: DeserializeOwned,
{
    debug!("POST {}", url);

    let response = client
        .post(url)
        .bearer_auth(api_key)
        .json(body)
        .send()
        .await
        .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

    let status = response.status();
    if status.is_success() {
        return response
            .json::<R>()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)));
    }

    let error_text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());

    Err(match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => LlmError::Unauthorized(error_text),
        StatusCode::NOT_FOUND => LlmError::ModelNotAvailable(model.to_string()),
        StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimitExceeded,
        _ => LlmError::Communication(format!("HTTP {}: {}", status, error_text)),
    })
}
