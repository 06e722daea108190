//! reqwest-backed transport for the H2O REST API

use crate::client::{ApiRequest, ClientError, ConnectionConfig, H2oTransport, Method};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

/// Transport that sends requests to a live H2O server over HTTP
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    config: ConnectionConfig,
}

impl ReqwestTransport {
    /// Create a new transport
    ///
    /// # Errors
    /// Returns `ClientError` if the configured URL is not an http(s) URL or
    /// the underlying client cannot be built.
    pub fn new(config: ConnectionConfig) -> Result<Self, ClientError> {
        config.validate()?;

        let mut builder =
            reqwest::Client::builder().user_agent(concat!("h2o-assembly/", env!("CARGO_PKG_VERSION")));
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            config,
        })
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.config.url, path)
    }
}

#[async_trait]
impl H2oTransport for ReqwestTransport {
    async fn send(&self, request: &ApiRequest) -> Result<Vec<u8>, ClientError> {
        let url = self.url_for(&request.path);
        debug!("{} {} ({} params)", request.method.as_str(), url, request.params.len());

        let mut builder = self.client.request(request.method.into(), &url);
        if !request.params.is_empty() {
            builder = match request.method {
                Method::Get => builder.query(&request.params),
                Method::Post => builder.form(&request.params),
            };
        }
        if let Some(user) = &self.config.username {
            builder = builder.basic_auth(user, self.config.password.as_ref());
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            warn!("{} failed with status {}", request, status.as_u16());
            return Err(ClientError::from_response(
                &request.to_string(),
                status.as_u16(),
                &body,
            ));
        }

        debug!("{} returned {} bytes", request, body.len());
        Ok(body.to_vec())
    }

    fn base_url(&self) -> &str {
        &self.config.url
    }
}
