//! A2E marketplace HTTP client.
//!
//! Implements the [`protocol::ServiceMarketplace`] trait over the A2E open
//! API: a JSON request/response protocol carried on HTTPS in which every reply
//! is wrapped in a `{code, message, data}` envelope.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** URL composition, header construction, the per-call
//! deadline, envelope unwrapping, and error normalization all live here. The
//! [`protocol`] crate sees none of it; callers see only typed results and
//! [`protocol::A2eError`].
//!
//! ## Usage
//!
//! ```no_run
//! use client::{A2eClient, ClientConfig};
//! use protocol::SearchRequest;
//!
//! # async fn run() -> Result<(), protocol::A2eError> {
//! let client = A2eClient::new(
//!     ClientConfig::default()
//!         .with_app_id("app-123")
//!         .with_timeout(std::time::Duration::from_secs(10)),
//! )?;
//!
//! let page = client.search_services(&SearchRequest::new("cleaning")).await?;
//! for service in &page.list {
//!     println!("{}: {}", service.id, service.name);
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod engine;
mod routes;
mod wire;

pub use client::A2eClient;
pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
