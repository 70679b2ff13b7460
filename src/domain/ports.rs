use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Method;
use std::time::Duration;

/// The single I/O boundary: sends one request to the build service API.
///
/// `route` is the path below the API root (e.g. `/source/home:alice/_meta`).
/// Implementations return the raw response body on success and an error for
/// transport failures and non-2xx statuses alike.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn api_request(
        &self,
        route: &str,
        method: Method,
        params: &[(&str, &str)],
        payload: Option<Vec<u8>>,
    ) -> Result<Vec<u8>>;
}

pub trait ConnectionSettings: Send + Sync {
    fn api_url(&self) -> &str;
    fn username(&self) -> Option<&str>;
    fn password(&self) -> Option<&str>;
    fn timeout(&self) -> Duration;
}
