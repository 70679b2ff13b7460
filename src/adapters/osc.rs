use crate::domain::document::XmlDocument;
use crate::domain::model::ApiStatus;
use crate::domain::ports::{ConnectionSettings, Transport};
use crate::utils::error::{ObsError, Result};
use crate::utils::validation::validate_url;
use async_trait::async_trait;
use reqwest::{Client, Method};
use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// HTTP transport for the build service API.
#[derive(Debug, Clone)]
pub struct Osc {
    api_url: String,
    username: Option<String>,
    password: Option<String>,
    client: Client,
}

impl Osc {
    pub fn new(api_url: impl Into<String>) -> Result<Self> {
        Self::build(api_url.into(), None, None, DEFAULT_TIMEOUT)
    }

    pub fn from_settings<C: ConnectionSettings + ?Sized>(settings: &C) -> Result<Self> {
        Self::build(
            settings.api_url().to_string(),
            settings.username().map(str::to_string),
            settings.password().map(str::to_string),
            settings.timeout(),
        )
    }

    fn build(
        api_url: String,
        username: Option<String>,
        password: Option<String>,
        timeout: Duration,
    ) -> Result<Self> {
        validate_url("api_url", &api_url)?;
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            username,
            password,
            client,
        })
    }

    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn url_for(&self, route: &str) -> String {
        format!("{}/{}", self.api_url, route.trim_start_matches('/'))
    }
}

#[async_trait]
impl Transport for Osc {
    async fn api_request(
        &self,
        route: &str,
        method: Method,
        params: &[(&str, &str)],
        payload: Option<Vec<u8>>,
    ) -> Result<Vec<u8>> {
        let url = self.url_for(route);
        tracing::debug!("Making API request: {} {} {:?}", method, url, params);

        let mut request = self.client.request(method.clone(), &url);

        if !params.is_empty() {
            request = request.query(params);
        }

        if let Some(username) = &self.username {
            request = request.basic_auth(username, self.password.as_ref());
        }

        if let Some(body) = payload {
            request = request.body(body);
        }

        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        let body = response.bytes().await?;

        if status.is_success() {
            return Ok(body.to_vec());
        }

        // 服務端錯誤通常附帶 <status> 文件
        let api_status = ApiStatus::from_document(&body).ok();
        let code = api_status.as_ref().and_then(|s| s.code.clone());
        let summary = api_status
            .and_then(|s| s.summary)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string());

        tracing::debug!("API request {} {} failed: {} ({:?})", method, route, summary, code);

        Err(ObsError::Status {
            method: method.to_string(),
            route: route.to_string(),
            status: status.as_u16(),
            code,
            summary,
        })
    }
}
