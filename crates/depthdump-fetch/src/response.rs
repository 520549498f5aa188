//! JSON bodies returned by the API.

use serde::Deserialize;

use crate::FetchError;

/// Body shared by the `trade` and `market-depth` endpoints.
///
/// Only the fields the pipeline reads are modelled; everything else is
/// ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct UrlsResponse {
    /// One entry per file covering the requested window.
    #[serde(default)]
    pub urls: Vec<UrlEntry>,
}

/// A single entry of `urls`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlEntry {
    /// Download location of a gzip payload.
    pub url: Option<String>,
    /// End of the window this entry covers.
    pub end_time: Option<Timestamp>,
}

/// Protobuf-style timestamp as serialized by the API.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Timestamp {
    /// Seconds since the UNIX epoch.
    pub seconds: i64,
}

impl UrlsResponse {
    /// Parses a response body.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not valid JSON of the expected shape.
    pub fn parse(body: &str) -> Result<Self, FetchError> {
        Ok(serde_json::from_str(body)?)
    }

    fn first(&self) -> Result<&UrlEntry, FetchError> {
        self.urls.first().ok_or(FetchError::MissingField("urls[0]"))
    }

    /// Returns `urls[0].endTime.seconds`.
    ///
    /// # Errors
    ///
    /// Returns an error if the field is absent.
    pub fn end_time(&self) -> Result<i64, FetchError> {
        self.first()?
            .end_time
            .map(|ts| ts.seconds)
            .ok_or(FetchError::MissingField("urls[0].endTime.seconds"))
    }

    /// Returns `urls[0].url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the field is absent.
    pub fn file_url(&self) -> Result<&str, FetchError> {
        self.first()?
            .url
            .as_deref()
            .ok_or(FetchError::MissingField("urls[0].url"))
    }
}
