//! The data source the download pipeline is written against.

use async_trait::async_trait;
use bytes::Bytes;
use depthdump_types::{DepthError, Market};

use crate::ApiClient;

/// Remote operations the pipeline needs.
///
/// [`ApiClient`] is the production implementation; tests substitute
/// in-memory sources.
#[async_trait]
pub trait DepthSource: Send + Sync {
    /// Resolves the end timestamp of the data window starting at `start_time`.
    async fn end_time(&self, market: &Market, start_time: i64) -> Result<i64, DepthError>;

    /// Resolves the download URL of the file covering `day`.
    async fn file_url(&self, market: &Market, day: i64) -> Result<String, DepthError>;

    /// Downloads the gzip payload at `url`.
    async fn download(&self, url: &str) -> Result<Bytes, DepthError>;
}

#[async_trait]
impl DepthSource for ApiClient {
    async fn end_time(&self, market: &Market, start_time: i64) -> Result<i64, DepthError> {
        Ok(Self::end_time(self, market, start_time).await?)
    }

    async fn file_url(&self, market: &Market, day: i64) -> Result<String, DepthError> {
        Ok(Self::file_url(self, market, day).await?)
    }

    async fn download(&self, url: &str) -> Result<Bytes, DepthError> {
        Ok(Self::download(self, url).await?)
    }
}

#[async_trait]
impl<S: DepthSource + ?Sized> DepthSource for &S {
    async fn end_time(&self, market: &Market, start_time: i64) -> Result<i64, DepthError> {
        (**self).end_time(market, start_time).await
    }

    async fn file_url(&self, market: &Market, day: i64) -> Result<String, DepthError> {
        (**self).file_url(market, day).await
    }

    async fn download(&self, url: &str) -> Result<Bytes, DepthError> {
        (**self).download(url).await
    }
}
