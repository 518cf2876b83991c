use reqwest::header::{ACCEPT, CONTENT_TYPE};
use thiserror::Error;

use crate::ProbeSettings;

/// Status line and content type of a header-only response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResponse {
    pub status: u16,
    pub content_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("timed out")]
    Timeout,
    #[error("{0}")]
    Network(String),
}

/// Transport that performs the lightweight availability request.
#[async_trait::async_trait]
pub trait Prober: Send + Sync {
    async fn probe(&self, url: &str) -> Result<ProbeResponse, ProbeError>;
}

/// Sends `HEAD <url>` with the configured `Accept` header.
#[derive(Debug, Clone)]
pub struct ReqwestProber {
    client: reqwest::Client,
    accept: String,
}

impl ReqwestProber {
    pub fn new(settings: &ProbeSettings) -> Result<Self, ProbeError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.timeout)
            .build()
            .map_err(|err| ProbeError::Network(err.to_string()))?;
        Ok(Self {
            client,
            accept: settings.accept.clone(),
        })
    }
}

#[async_trait::async_trait]
impl Prober for ReqwestProber {
    async fn probe(&self, url: &str) -> Result<ProbeResponse, ProbeError> {
        let parsed =
            reqwest::Url::parse(url).map_err(|err| ProbeError::InvalidUrl(err.to_string()))?;

        let response = self
            .client
            .head(parsed)
            .header(ACCEPT, self.accept.as_str())
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        Ok(ProbeResponse {
            status: response.status().as_u16(),
            content_type,
        })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ProbeError {
    if err.is_timeout() {
        return ProbeError::Timeout;
    }
    ProbeError::Network(err.to_string())
}
