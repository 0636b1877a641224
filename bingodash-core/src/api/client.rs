use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use url::Url;

use super::envelope::{Envelope, extract_error_message};
use crate::error::{ApiError, ApiResult};

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the admin REST API with bearer-token support.
#[derive(Clone)]
pub struct HttpApiClient {
    client: Client,
    base_url: String,
    token_store: Arc<RwLock<Option<String>>>,
}

impl std::fmt::Debug for HttpApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpApiClient")
            .field("base_url", &self.base_url)
            .field(
                "has_token",
                &self
                    .token_store
                    .try_read()
                    .map(|t| t.is_some())
                    .unwrap_or(false),
            )
            .finish()
    }
}

/// Adds `http://` when no scheme is given and trims trailing slashes.
pub fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    }
}

impl HttpApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> ApiResult<Self> {
        let normalized = normalize_base_url(base_url);
        if normalized != base_url {
            warn!(
                "[HttpApiClient] Normalized base URL from '{}' to '{}'",
                base_url, normalized
            );
        }
        Url::parse(&normalized).map_err(|err| {
            ApiError::Transport(format!("invalid base URL {normalized}: {err}"))
        })?;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ApiError::from)?;

        info!(
            "[HttpApiClient] Creating API client with base URL: {}",
            normalized
        );

        Ok(Self {
            client,
            base_url: normalized,
            token_store: Arc::new(RwLock::new(None)),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_url(&self, path: impl AsRef<str>) -> String {
        let path = path.as_ref();
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn set_token(&self, token: Option<String>) {
        *self.token_store.write().await = token;
    }

    pub async fn get_token(&self) -> Option<String> {
        self.token_store.read().await.clone()
    }

    async fn build_request(&self, builder: RequestBuilder) -> RequestBuilder {
        if let Some(token) = self.token_store.read().await.as_ref() {
            builder.bearer_auth(token)
        } else {
            builder
        }
    }

    /// Sends `request` and returns the raw body of a 2xx response.
    ///
    /// A 401 clears the stored token and yields [`ApiError::AuthExpired`].
    async fn send(&self, request: RequestBuilder) -> ApiResult<Vec<u8>> {
        let request = self.build_request(request).await;
        let response = request.send().await?;
        let status = response.status();

        match status {
            status if status.is_success() => {
                let body = response.bytes().await?;
                Ok(body.to_vec())
            }
            StatusCode::UNAUTHORIZED => {
                warn!("[HttpApiClient] Session rejected by server (401)");
                self.set_token(None).await;
                Err(ApiError::AuthExpired)
            }
            status => {
                let body = response.bytes().await.unwrap_or_default();
                let message = extract_error_message(&body);
                debug!(
                    "[HttpApiClient] Request failed with status {}: {}",
                    status, message
                );
                Err(ApiError::Request {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> ApiResult<Envelope<T>> {
        let body = self.send(request).await?;
        Envelope::decode(&body)
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ApiResult<Envelope<T>> {
        let request = self.client.get(self.build_url(path)).query(query);
        self.execute(request).await
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<Envelope<T>> {
        let request = self.client.post(self.build_url(path)).json(body);
        self.execute(request).await
    }

    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<Envelope<T>> {
        let request = self.client.put(self.build_url(path)).json(body);
        self.execute(request).await
    }

    pub async fn patch<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<Envelope<T>> {
        let request = self.client.patch(self.build_url(path)).json(body);
        self.execute(request).await
    }

    /// POST without a body whose response payload is ignored.
    pub async fn post_empty(&self, path: &str) -> ApiResult<()> {
        let request = self.client.post(self.build_url(path));
        self.send(request).await.map(drop)
    }

    /// DELETE whose response payload is ignored.
    pub async fn delete(&self, path: &str) -> ApiResult<()> {
        let request = self.client.delete(self.build_url(path));
        self.send(request).await.map(drop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_missing_scheme_and_trailing_slash() {
        assert_eq!(
            normalize_base_url(" localhost:4000/ "),
            "http://localhost:4000"
        );
        assert_eq!(
            normalize_base_url("https://api.healthbingo.app//"),
            "https://api.healthbingo.app"
        );
    }

    #[test]
    fn builds_urls_against_base() {
        let client =
            HttpApiClient::new("http://localhost:4000/", DEFAULT_TIMEOUT)
                .unwrap();
        assert_eq!(
            client.build_url("/api/promo"),
            "http://localhost:4000/api/promo"
        );
    }
}
