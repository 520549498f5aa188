//! HTTP client for the CryptoChassis API.

use bytes::Bytes;
use depthdump_types::{DepthError, Market};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

use crate::response::UrlsResponse;
use crate::url::{BASE_URL, market_depth_url, trade_url};

/// Configuration for the API client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL, without a trailing slash.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// User agent string.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            timeout: Duration::from_secs(60),
            user_agent: format!("depthdump/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Errors that can occur while talking to the API.
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with something other than 200.
    #[error("Unexpected status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body.
        body: String,
    },

    /// Response body was not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A required field was missing from the response.
    #[error("Missing field in response: {0}")]
    MissingField(&'static str),
}

impl From<FetchError> for DepthError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Http(e) => Self::Http(e.to_string()),
            FetchError::Status { status, body } => Self::Status { status, body },
            e @ (FetchError::Json(_) | FetchError::MissingField(_)) => {
                Self::Response(e.to_string())
            }
        }
    }
}

/// HTTP client bound to one API base URL.
///
/// Every call is a single attempt: any status other than 200 is returned as
/// [`FetchError::Status`] with the response body attached.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    config: ClientConfig,
}

impl ApiClient {
    /// Creates a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: ClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(&config.user_agent)
            .build()?;
        Ok(Self { client, config })
    }

    /// Creates a client with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_defaults() -> Result<Self, reqwest::Error> {
        Self::new(ClientConfig::default())
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Resolves the end of the available data window starting at `start_time`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-200 status, or a body
    /// without `urls[0].endTime.seconds`.
    pub async fn end_time(&self, market: &Market, start_time: i64) -> Result<i64, FetchError> {
        let url = trade_url(&self.config.base_url, market, start_time);
        let body = self.get_text(&url).await?;
        UrlsResponse::parse(&body)?.end_time()
    }

    /// Resolves the download URL of the market-depth file for `day`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-200 status, or a body
    /// without `urls[0].url`.
    pub async fn file_url(&self, market: &Market, day: i64) -> Result<String, FetchError> {
        let url = market_depth_url(&self.config.base_url, market, day);
        let body = self.get_text(&url).await?;
        UrlsResponse::parse(&body)?.file_url().map(str::to_string)
    }

    /// Downloads a file, returning the raw (still compressed) bytes.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or non-200 status.
    pub async fn download(&self, url: &str) -> Result<Bytes, FetchError> {
        debug!(%url, "downloading");
        let response = self.client.get(url).send().await?;
        if response.status() != StatusCode::OK {
            return Err(Self::status_error(response).await);
        }
        let bytes = response.bytes().await?;
        debug!(%url, len = bytes.len(), "download complete");
        Ok(bytes)
    }

    async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        info!("GET  {url}");
        let response = self.client.get(url).send().await?;
        if response.status() != StatusCode::OK {
            return Err(Self::status_error(response).await);
        }
        Ok(response.text().await?)
    }

    async fn status_error(response: reqwest::Response) -> FetchError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        FetchError::Status { status, body }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serves one canned response per connection and returns the base URL.
    async fn serve(responses: Vec<(&'static str, &'static str)>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            for (status, body) in responses {
                let (mut socket, _) = listener.accept().await.unwrap();
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    let n = socket.read(&mut buf).await.unwrap();
                    if n == 0 {
                        break;
                    }
                    request.extend_from_slice(&buf[..n]);
                }
                let response = if status.starts_with("204") {
                    format!("HTTP/1.1 {status}\r\nConnection: close\r\n\r\n")
                } else {
                    format!(
                        "HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                        body.len()
                    )
                };
                socket.write_all(response.as_bytes()).await.unwrap();
                let _ = socket.shutdown().await;
            }
        });
        format!("http://{addr}/v1")
    }

    fn client(base_url: String) -> ApiClient {
        ApiClient::new(ClientConfig {
            base_url,
            timeout: Duration::from_secs(5),
            ..Default::default()
        })
        .unwrap()
    }

    fn market() -> Market {
        Market::new("coinbase", "btc-usd")
    }

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "https://api.cryptochassis.com/v1");
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert!(config.user_agent.starts_with("depthdump/"));
    }

    #[tokio::test]
    async fn test_client_creation() {
        let client = ApiClient::with_defaults();
        assert!(client.is_ok());
    }

    #[test]
    fn test_status_error_maps_to_depth_error() {
        let err: DepthError = FetchError::Status {
            status: 400,
            body: "bad startTime".to_string(),
        }
        .into();
        assert!(matches!(
            err,
            DepthError::Status { status: 400, ref body } if body == "bad startTime"
        ));
    }

    #[test]
    fn test_missing_field_maps_to_response_error() {
        let err: DepthError = FetchError::MissingField("urls[0].url").into();
        assert!(matches!(err, DepthError::Response(_)));
    }

    #[tokio::test]
    async fn test_end_time_parses_ok_body() {
        let base = serve(vec![(
            "200 OK",
            r#"{"urls":[{"url":"https://files/x.csv.gz","endTime":{"seconds":1609632000}}]}"#,
        )])
        .await;
        let end = client(base).end_time(&market(), 1_609_459_200).await.unwrap();
        assert_eq!(end, 1_609_632_000);
    }

    #[tokio::test]
    async fn test_file_url_and_download() {
        let base = serve(vec![
            ("200 OK", r#"{"urls":[{"url":"https://files/x.csv.gz"}]}"#),
            ("200 OK", "payload"),
        ])
        .await;
        let client = client(base.clone());
        let url = client.file_url(&market(), 1_609_459_200).await.unwrap();
        assert_eq!(url, "https://files/x.csv.gz");

        let bytes = client.download(&format!("{base}/file")).await.unwrap();
        assert_eq!(&bytes[..], b"payload");
    }

    #[tokio::test]
    async fn test_not_found_carries_body() {
        let base = serve(vec![("404 Not Found", "unknown instrument")]).await;
        let err = client(base)
            .file_url(&market(), 1_609_459_200)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            FetchError::Status { status: 404, ref body } if body == "unknown instrument"
        ));
        assert_eq!(err.to_string(), "Unexpected status 404: unknown instrument");
    }

    #[tokio::test]
    async fn test_no_content_is_rejected() {
        let base = serve(vec![("204 No Content", "")]).await;
        let err = client(base)
            .end_time(&market(), 1_609_459_200)
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 204, .. }));
    }

    #[tokio::test]
    async fn test_download_error_status() {
        let base = serve(vec![("500 Internal Server Error", "boom")]).await;
        let err = client(base.clone())
            .download(&format!("{base}/file"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            FetchError::Status { status: 500, ref body } if body == "boom"
        ));
    }
}
