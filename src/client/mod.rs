//! H2O REST client: transport seam, connection and request types

pub mod config;
pub mod error;
pub mod http;
pub mod request;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::debug;

pub use config::ConnectionConfig;
pub use error::{ClientError, ServerErrorPayload};
pub use http::ReqwestTransport;
pub use request::{ApiRequest, Method};

/// Trait for sending requests to H2O - allows for different implementations
#[async_trait]
pub trait H2oTransport: Send + Sync {
    /// Send a request and return the raw body of a successful response
    async fn send(&self, request: &ApiRequest) -> Result<Vec<u8>, ClientError>;

    /// Base URL the transport talks to
    fn base_url(&self) -> &str;
}

#[derive(Debug, Deserialize)]
struct SessionResponse {
    session_key: String,
}

/// Connection to an H2O server
///
/// Cheap to clone; clones share the transport and the Rapids session.
#[derive(Clone)]
pub struct H2oConnection {
    transport: Arc<dyn H2oTransport>,
    session: Arc<OnceCell<String>>,
}

impl fmt::Debug for H2oConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("H2oConnection")
            .field("base_url", &self.transport.base_url())
            .field("session", &self.session.get())
            .finish()
    }
}

impl H2oConnection {
    /// Connect over HTTP using the given configuration
    pub fn new(config: ConnectionConfig) -> Result<Self, ClientError> {
        Ok(Self::with_transport(ReqwestTransport::new(config)?))
    }

    /// Use a custom transport (e.g. a mock in tests)
    pub fn with_transport<T: H2oTransport + 'static>(transport: T) -> Self {
        Self {
            transport: Arc::new(transport),
            session: Arc::new(OnceCell::new()),
        }
    }

    pub fn base_url(&self) -> &str {
        self.transport.base_url()
    }

    /// Send a request and decode the JSON response
    pub async fn api<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ClientError> {
        let body = self.transport.send(&request).await?;
        serde_json::from_slice(&body).map_err(|source| ClientError::Decode {
            endpoint: request.to_string(),
            source,
        })
    }

    /// Send a request and return the response body as text
    pub async fn api_text(&self, request: ApiRequest) -> Result<String, ClientError> {
        let body = self.transport.send(&request).await?;
        Ok(String::from_utf8_lossy(&body).into_owned())
    }

    /// Fetch a static asset served under `/3/`, e.g. `h2o-genmodel.jar`
    pub async fn download(&self, asset: &str) -> Result<Vec<u8>, ClientError> {
        let request = ApiRequest::parse("GET /3")?.segment(asset.trim_start_matches('/'));
        self.transport.send(&request).await
    }

    /// Rapids session id, requested from the server on first use
    pub async fn session_id(&self) -> Result<String, ClientError> {
        let id = self
            .session
            .get_or_try_init(|| async {
                let response: SessionResponse = self.api(ApiRequest::parse("POST /4/sessions")?).await?;
                debug!("Opened Rapids session {}", response.session_key);
                Ok::<_, ClientError>(response.session_key)
            })
            .await?;
        Ok(id.clone())
    }
}
