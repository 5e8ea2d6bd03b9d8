//! The port trait implemented by marketplace transports.

use async_trait::async_trait;

use crate::{
    A2eError, AuthRequest, AuthResult, ExecuteRequest, ExecuteResult, ProtocolDocument,
    SearchRequest, SearchResult, ServiceId,
};

/// The four A2E marketplace operations.
///
/// Implemented by `client::A2eClient` over HTTP. Every call is attempted
/// exactly once; failures are returned as the normalized [`A2eError`] and do
/// not affect later calls.
#[async_trait]
pub trait ServiceMarketplace: Send + Sync {
    /// Searches published services by keyword.
    async fn search_services(&self, request: &SearchRequest) -> Result<SearchResult, A2eError>;

    /// Fetches the protocol document describing how to call `service_id`.
    async fn get_protocol(&self, service_id: &ServiceId) -> Result<ProtocolDocument, A2eError>;

    /// Invokes one endpoint of a service on behalf of a consumer.
    async fn execute(&self, request: &ExecuteRequest) -> Result<ExecuteResult, A2eError>;

    /// Exchanges an authorization code for a consumer token.
    async fn get_consumer_token(&self, request: &AuthRequest) -> Result<AuthResult, A2eError>;
}
