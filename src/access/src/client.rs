//! HTTP directory client

use crate::config::{AccessConfig, ApiBase};
use crate::error::Result;
use async_trait::async_trait;
use tracing::debug;
use volunteerverse_core::{CoreError, DirectoryRecord, DirectoryService};

/// Directory endpoint resolving the bearer token's own user record
pub const USERS_ME_PATH: &str = "/api/users/me";

/// Build the shared reqwest client with the configured timeout
pub fn http_client(config: &AccessConfig) -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .timeout(config.request_timeout())
        .build()?)
}

/// Map a reqwest failure onto the collaborator error taxonomy
pub(crate) fn transport_error(err: reqwest::Error) -> CoreError {
    if err.is_timeout() {
        CoreError::Timeout
    } else if err.is_decode() {
        CoreError::serialization(err.to_string())
    } else {
        CoreError::transport(err.to_string())
    }
}

/// [`DirectoryService`] backed by `GET {api_base}/api/users/me`
#[derive(Clone)]
pub struct HttpDirectory {
    http: reqwest::Client,
    api: ApiBase,
}

impl HttpDirectory {
    pub fn new(config: &AccessConfig) -> Result<Self> {
        Ok(Self::with_client(http_client(config)?, config.api()?))
    }

    pub fn with_client(http: reqwest::Client, api: ApiBase) -> Self {
        Self { http, api }
    }
}

#[async_trait]
impl DirectoryService for HttpDirectory {
    async fn lookup(&self, token: &str) -> volunteerverse_core::Result<DirectoryRecord> {
        let url = self.api.url(USERS_ME_PATH);
        debug!("Directory lookup: GET {}", url);

        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(CoreError::Status {
                status: status.as_u16(),
                url,
            });
        }

        response.json::<DirectoryRecord>().await.map_err(transport_error)
    }
}
