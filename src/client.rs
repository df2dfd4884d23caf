use crate::config::ClientConfig;
use crate::errors::{LookupError, StatusCodeError};
use crate::models::LookupResult;
use crate::validation::{mask_bin, validate_bin};
use reqwest::{header, Response, StatusCode};

/// Most of a non-200 body that is read and logged.
const MAX_LOGGED_ERROR_BODY: usize = 512;

/// Client for the binlist.net BIN/IIN lookup service.
///
/// Holds no per-call state; clone it or share it behind an `Arc` across tasks.
#[derive(Debug, Clone)]
pub struct BinLookupClient {
    http: reqwest::Client,
    base_url: String,
}

impl BinLookupClient {
    /// Creates a new `BinLookupClient` with a transport built from `config`.
    ///
    /// # Arguments
    ///
    /// * `config` - Base URL, timeout and connection pool settings.
    pub fn new(config: ClientConfig) -> Result<Self, LookupError> {
        config.validate()?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| LookupError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Self::with_http_client(http, &config)
    }

    /// Creates a client on top of a caller-owned `reqwest::Client`.
    ///
    /// Only `config.base_url` is read (and validated); timeout and pooling are
    /// whatever `http` was built with.
    pub fn with_http_client(
        http: reqwest::Client,
        config: &ClientConfig,
    ) -> Result<Self, LookupError> {
        config.validate_base_url()?;

        Ok(Self {
            http,
            base_url: config.normalized_base_url().to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL a lookup for `bin` is sent to.
    pub fn lookup_url(&self, bin: &str) -> String {
        format!("{}/{}", self.base_url, bin)
    }

    /// Looks up a BIN upstream.
    ///
    /// Sends exactly one GET request and never retries. Errors:
    ///
    /// * `Validation` - `bin` is not 4-16 digits starting with 1-9 (nothing is sent).
    /// * `Transport` - connection, timeout or body read failure.
    /// * `Status` - upstream answered with anything but 200. Upstream documents
    ///   404 for unknown BINs and 429 when throttling.
    /// * `Decode` - a 200 whose body is not the expected JSON.
    ///
    /// Only the masked BIN (see [`mask_bin`]) is logged.
    pub async fn search(&self, bin: &str) -> Result<LookupResult, LookupError> {
        validate_bin(bin)?;

        let masked = mask_bin(bin);
        tracing::info!("Looking up BIN {}", masked);

        let response = self
            .http
            .get(self.lookup_url(bin))
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                let err = LookupError::from(e);
                tracing::error!("BIN lookup request for {} failed: {}", masked, err);
                err
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            let error_text = error_body_snippet(response).await;
            tracing::warn!("BIN lookup for {} returned {}: {}", masked, status, error_text);
            return Err(StatusCodeError::from(status).into());
        }

        let body = response.bytes().await.map_err(|e| {
            let err = LookupError::from(e);
            tracing::error!("Failed to read BIN lookup response for {}: {}", masked, err);
            err
        })?;

        let result: LookupResult = serde_json::from_slice(&body).map_err(|e| {
            tracing::error!("Failed to parse BIN lookup response for {}: {}", masked, e);
            LookupError::Decode(e)
        })?;

        tracing::debug!(
            "BIN {} resolved: scheme={:?} brand={:?} country={:?}",
            masked,
            result.scheme,
            result.brand,
            result.country.alpha2
        );
        Ok(result)
    }
}

/// Reads at most `MAX_LOGGED_ERROR_BODY` bytes of an error body for logging.
///
/// The rest is never read; dropping the response releases the connection.
async fn error_body_snippet(mut response: Response) -> String {
    let mut buf = Vec::new();
    while buf.len() < MAX_LOGGED_ERROR_BODY {
        match response.chunk().await {
            Ok(Some(chunk)) => buf.extend_from_slice(&chunk),
            Ok(None) => break,
            Err(_) => {
                if buf.is_empty() {
                    return "Unknown error".to_string();
                }
                break;
            }
        }
    }
    buf.truncate(MAX_LOGGED_ERROR_BODY);
    String::from_utf8_lossy(&buf).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_client_creation() {
        let client = BinLookupClient::new(ClientConfig::default());
        assert!(client.is_ok());
        assert_eq!(client.unwrap().base_url(), "https://lookup.binlist.net");
    }

    #[test]
    fn test_client_rejects_invalid_config() {
        let config = ClientConfig::default().with_timeout(Duration::ZERO);
        assert!(matches!(
            BinLookupClient::new(config),
            Err(LookupError::Config(_))
        ));
    }

    #[test]
    fn test_lookup_url() {
        let config = ClientConfig::default().with_base_url("http://127.0.0.1:8080/");
        let client = BinLookupClient::with_http_client(reqwest::Client::new(), &config).unwrap();
        assert_eq!(client.lookup_url("45717360"), "http://127.0.0.1:8080/45717360");
    }

    #[test]
    fn test_injected_client_rejects_bad_base_url() {
        let config = ClientConfig::default().with_base_url("lookup.binlist.net");
        let result = BinLookupClient::with_http_client(reqwest::Client::new(), &config);
        assert!(matches!(result, Err(LookupError::Config(_))));
    }

    #[tokio::test]
    async fn test_transport_error_does_not_carry_bin() {
        let pan = "4111111111111111";
        let config = ClientConfig::default().with_base_url("http://127.0.0.1:9");
        let client = BinLookupClient::new(config).unwrap();

        let err = client.search(pan).await.unwrap_err();
        assert!(matches!(err, LookupError::Transport(_)));
        assert!(!err.to_string().contains(pan));
        assert!(!format!("{:?}", err).contains(pan));
    }

    #[tokio::test]
    async fn test_search_rejects_invalid_bin_before_sending() {
        // Unroutable base URL: a request would fail with Transport, not Validation.
        let config = ClientConfig::default().with_base_url("http://127.0.0.1:9");
        let client = BinLookupClient::new(config).unwrap();

        let err = client.search("0812436").await.unwrap_err();
        assert!(matches!(err, LookupError::Validation { .. }));
    }

    #[test]
    fn test_client_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<BinLookupClient>();
    }
}
