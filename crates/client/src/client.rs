//! [`A2eClient`]: the public face of the crate.

use async_trait::async_trait;
use protocol::{
    A2eError, AuthRequest, AuthResult, ExecuteRequest, ExecuteResult, ProtocolDocument,
    SearchRequest, SearchResult, ServiceId, ServiceMarketplace, TransportErrorKind,
};

use crate::config::ClientConfig;
use crate::engine::Engine;
use crate::routes::Route;
use crate::wire::{AuthBody, ExecuteBody, SearchBody};

/// HTTP client for the A2E open API.
///
/// Cheap to clone; clones share the connection pool and the read-only
/// configuration. Calls may be issued concurrently from any number of tasks.
#[derive(Debug, Clone)]
pub struct A2eClient {
    engine: Engine,
}

impl A2eClient {
    /// Creates a client with its own connection pool.
    pub fn new(config: ClientConfig) -> Result<Self, A2eError> {
        let http = reqwest::Client::builder().build().map_err(|e| {
            A2eError::transport(
                TransportErrorKind::Request,
                format!("failed to build HTTP client: {e}"),
            )
        })?;
        Ok(Self::with_http_client(config, http))
    }

    /// Creates a client on top of an existing [`reqwest::Client`] (e.g. one
    /// configured with a proxy). The configured timeout still bounds every
    /// call.
    pub fn with_http_client(config: ClientConfig, http: reqwest::Client) -> Self {
        Self {
            engine: Engine::new(config, http),
        }
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        self.engine.config()
    }

    /// `POST /api/v1/open/services/search`
    pub async fn search_services(&self, request: &SearchRequest) -> Result<SearchResult, A2eError> {
        let body = SearchBody::from(request);
        self.engine.send(Route::SearchServices, Some(&body)).await
    }

    /// `GET /api/v1/open/services/{service_id}/protocol`
    pub async fn get_protocol(&self, service_id: &ServiceId) -> Result<ProtocolDocument, A2eError> {
        self.engine
            .send::<(), _>(Route::GetProtocol { service_id }, None)
            .await
    }

    /// `POST /api/v1/open/services/{service_id}/execute/{endpoint}`
    pub async fn execute(&self, request: &ExecuteRequest) -> Result<ExecuteResult, A2eError> {
        let route = Route::Execute {
            service_id: &request.service_id,
            endpoint: &request.endpoint,
        };
        let body = ExecuteBody::from(request);
        self.engine.send(route, Some(&body)).await
    }

    /// `POST /api/v1/open/platform/get_user_token`
    pub async fn get_consumer_token(&self, request: &AuthRequest) -> Result<AuthResult, A2eError> {
        let body = AuthBody::from(request);
        self.engine.send(Route::GetConsumerToken, Some(&body)).await
    }
}

#[async_trait]
impl ServiceMarketplace for A2eClient {
    async fn search_services(&self, request: &SearchRequest) -> Result<SearchResult, A2eError> {
        A2eClient::search_services(self, request).await
    }

    async fn get_protocol(&self, service_id: &ServiceId) -> Result<ProtocolDocument, A2eError> {
        A2eClient::get_protocol(self, service_id).await
    }

    async fn execute(&self, request: &ExecuteRequest) -> Result<ExecuteResult, A2eError> {
        A2eClient::execute(self, request).await
    }

    async fn get_consumer_token(&self, request: &AuthRequest) -> Result<AuthResult, A2eError> {
        A2eClient::get_consumer_token(self, request).await
    }
}
