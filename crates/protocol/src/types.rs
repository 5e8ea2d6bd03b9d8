//! Request and result records for the marketplace operations.
//!
//! Requests are built by callers and carry typed identifiers; the transport
//! crate maps them onto wire bodies. Results are decoded from the `data` field
//! of a successful [`crate::ApiEnvelope`]. Wire field names are `snake_case`,
//! matching the Rust field names, and every result field tolerates absence or
//! an explicit `null` by falling back to its default.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{AuthCode, AuthType, ConsumerToken, EndpointName, ServiceId};

/// Page requested when a [`SearchRequest`] does not specify one (1-based).
pub const DEFAULT_PAGE: u32 = 1;

/// Page size requested when a [`SearchRequest`] does not specify one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// A geographic point used to bias search results.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Degrees north of the equator; negative in the southern hemisphere.
    pub latitude: f64,
    /// Degrees east of Greenwich; negative in the western hemisphere.
    pub longitude: f64,
}

impl Location {
    /// Creates a point from decimal degrees.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Query for services by keyword.
///
/// `page` and `size` are left unset unless the caller chooses them; the
/// defaults ([`DEFAULT_PAGE`], [`DEFAULT_PAGE_SIZE`]) are applied when the
/// request is put on the wire, not stored here.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub keyword: String,
    pub service_type: Option<String>,
    pub location: Option<Location>,
    pub page: Option<u32>,
    pub size: Option<u32>,
}

impl SearchRequest {
    /// Creates a search for `keyword` with no filters and default paging.
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            service_type: None,
            location: None,
            page: None,
            size: None,
        }
    }

    /// Restricts results to one service type (e.g. `"food"`).
    pub fn with_type(mut self, service_type: impl Into<String>) -> Self {
        self.service_type = Some(service_type.into());
        self
    }

    /// Biases results toward services near `location`.
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// Selects a 1-based page and a page size.
    pub fn with_page(mut self, page: u32, size: u32) -> Self {
        self.page = Some(page);
        self.size = Some(size);
        self
    }

    /// Page to send. Absent or zero means [`DEFAULT_PAGE`].
    pub fn effective_page(&self) -> u32 {
        self.page.filter(|p| *p > 0).unwrap_or(DEFAULT_PAGE)
    }

    /// Page size to send. Absent or zero means [`DEFAULT_PAGE_SIZE`].
    pub fn effective_size(&self) -> u32 {
        self.size.filter(|s| *s > 0).unwrap_or(DEFAULT_PAGE_SIZE)
    }
}

/// The operator of a service.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Provider {
    #[serde(deserialize_with = "crate::nullable::null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "crate::nullable::null_as_default")]
    pub name: String,
    /// Certification label assigned by the platform (e.g. `"verified"`).
    #[serde(deserialize_with = "crate::nullable::null_as_default")]
    pub certification: String,
}

/// A discoverable service as listed in search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: ServiceId,
    #[serde(default, deserialize_with = "crate::nullable::null_as_default")]
    pub name: String,
    #[serde(rename = "type", default, deserialize_with = "crate::nullable::null_as_default")]
    pub service_type: String,
    #[serde(default, deserialize_with = "crate::nullable::null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "crate::nullable::null_as_default")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "crate::nullable::null_as_default")]
    pub certification_level: u32,
    #[serde(default, deserialize_with = "crate::nullable::null_as_default")]
    pub provider: Provider,
}

/// One page of search results, in server order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResult {
    /// Total number of matches across all pages.
    #[serde(deserialize_with = "crate::nullable::null_as_default")]
    pub total: u64,
    #[serde(deserialize_with = "crate::nullable::null_as_default")]
    pub list: Vec<Service>,
}

// ---------------------------------------------------------------------------
// Execute
// ---------------------------------------------------------------------------

/// A single invocation of one service endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecuteRequest {
    pub service_id: ServiceId,
    pub endpoint: EndpointName,
    pub consumer_token: ConsumerToken,
    /// Opaque endpoint input; normally a JSON object shaped by the endpoint's
    /// `input_schema`. Not validated by the library.
    pub input: Value,
}

impl ExecuteRequest {
    pub fn new(
        service_id: ServiceId,
        endpoint: EndpointName,
        consumer_token: ConsumerToken,
        input: Value,
    ) -> Self {
        Self {
            service_id,
            endpoint,
            consumer_token,
            input,
        }
    }
}

/// Structured failure reported by a service endpoint inside a successful
/// envelope.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecuteError {
    #[serde(deserialize_with = "crate::nullable::null_as_default")]
    pub code: String,
    #[serde(deserialize_with = "crate::nullable::null_as_default")]
    pub message: String,
    /// Remediation hint intended for the calling agent.
    #[serde(deserialize_with = "crate::nullable::null_as_default")]
    pub suggestion: String,
}

impl std::fmt::Display for ExecuteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ExecuteError {}

/// Outcome of an endpoint invocation.
///
/// `error` is present only when `status` denotes failure.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecuteResult {
    #[serde(deserialize_with = "crate::nullable::null_as_default")]
    pub execution_id: String,
    #[serde(deserialize_with = "crate::nullable::null_as_default")]
    pub status: String,
    pub output: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ExecuteError>,
}

impl ExecuteResult {
    /// Returns `true` if the endpoint reported a structured error.
    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }

    /// Converts the result into the endpoint output, or the endpoint's error.
    pub fn into_output(self) -> Result<Value, ExecuteError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.output),
        }
    }
}

// ---------------------------------------------------------------------------
// Authentication
// ---------------------------------------------------------------------------

/// Exchange of an authorization code for a [`ConsumerToken`].
#[derive(Debug, Clone, PartialEq)]
pub struct AuthRequest {
    pub auth_type: AuthType,
    pub auth_code: AuthCode,
}

impl AuthRequest {
    pub fn new(auth_type: AuthType, auth_code: AuthCode) -> Self {
        Self {
            auth_type,
            auth_code,
        }
    }
}

/// Minimal profile of the user a token was issued for.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserInfo {
    #[serde(deserialize_with = "crate::nullable::null_as_default")]
    pub nickname: String,
    #[serde(deserialize_with = "crate::nullable::null_as_default")]
    pub avatar: String,
}

/// A freshly issued consumer token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResult {
    pub consumer_token: ConsumerToken,
    /// Lifetime of the token in seconds from issue.
    #[serde(default, deserialize_with = "crate::nullable::null_as_default")]
    pub expires_in: u64,
    #[serde(default, deserialize_with = "crate::nullable::null_as_default")]
    pub user_info: UserInfo,
}

impl AuthResult {
    /// Returns the token lifetime as a [`Duration`].
    pub fn expires_in_duration(&self) -> Duration {
        Duration::from_secs(self.expires_in)
    }
}
