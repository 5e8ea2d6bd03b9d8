//! Core domain for the A2E (Agent-to-EveryThing) marketplace protocol.
//!
//! This crate contains every value record exchanged with the marketplace, the
//! newtype identifiers callers use to address services, the response envelope
//! every reply is wrapped in, and the single normalized error type surfaced to
//! callers. Transport crates implement [`ServiceMarketplace`]; they never add
//! domain rules.
//!
//! ## Architectural Layer
//!
//! **Domain types + port definitions.** This crate has no I/O dependencies.
//! It defines *what* is exchanged; the `client` crate defines *how* it travels.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers (`ServiceId`, `EndpointName`, `ConsumerToken`, etc.) |
//! | [`types`] | Search, execute, and auth request/result records |
//! | [`document`] | The machine-readable service protocol document |
//! | [`envelope`] | The `{code, message, data}` wrapper around every reply |
//! | [`errors`] | The normalized [`A2eError`] taxonomy |
//! | [`marketplace`] | The [`ServiceMarketplace`] port trait |

pub mod document;
pub mod envelope;
pub mod errors;
pub mod identifiers;
pub mod marketplace;
mod nullable;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use document::{
    AuthInfo, AuthMethod, Endpoint, ErrorCodeEntry, ErrorHandling, Permission, PermissionInfo,
    ProtocolDocument, SemanticInfo, ServiceInfo,
};
pub use envelope::ApiEnvelope;
pub use errors::{A2eError, TransportErrorKind};
pub use identifiers::{AuthCode, AuthType, ConsumerToken, EndpointName, ServiceId};
pub use marketplace::ServiceMarketplace;
pub use types::{
    AuthRequest, AuthResult, ExecuteError, ExecuteRequest, ExecuteResult, Location, Provider,
    SearchRequest, SearchResult, Service, UserInfo, DEFAULT_PAGE, DEFAULT_PAGE_SIZE,
};
