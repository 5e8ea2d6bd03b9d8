//! The wire-level wrapper around every A2E reply.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `{ "code": integer, "message": string, "data": <payload> }`
///
/// `data` is meaningful only when `code` equals [`ApiEnvelope::SUCCESS`]; for
/// any other code the payload must be discarded and `code`/`message` become an
/// [`crate::A2eError::Application`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope {
    pub code: i64,
    #[serde(default, deserialize_with = "crate::nullable::null_as_default")]
    pub message: String,
    #[serde(default)]
    pub data: Value,
}

impl ApiEnvelope {
    /// The canonical success code.
    pub const SUCCESS: i64 = 0;

    /// Returns `true` if `code` is [`Self::SUCCESS`].
    pub fn is_success(&self) -> bool {
        self.code == Self::SUCCESS
    }
}
