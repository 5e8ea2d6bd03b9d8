//! Client configuration.

use std::time::Duration;

/// Production endpoint used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://api.a2e-platform.com";

/// Deadline applied to each call when no timeout is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(30_000);

/// Where and how an [`crate::A2eClient`] talks to the marketplace.
///
/// Fixed for the lifetime of a client. The only normalization performed is
/// stripping trailing `/` from the base URL; a malformed URL surfaces as a
/// transport error on the first call.
///
/// The app secret is accepted and kept, but no request signing scheme exists
/// yet, so it is never placed on the wire. It is redacted from `Debug`.
#[derive(Clone)]
pub struct ClientConfig {
    base_url: String,
    app_id: Option<String>,
    app_secret: Option<String>,
    timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            app_id: None,
            app_secret: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Creates a configuration pointing at `base_url` with default timeout and
    /// no app credentials.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::default().with_base_url(base_url)
    }

    /// Sets the marketplace base URL, stripping any trailing `/`.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets the app identity sent as `X-App-ID`. An empty id is treated as
    /// unset.
    pub fn with_app_id(mut self, app_id: impl Into<String>) -> Self {
        self.app_id = Some(app_id.into()).filter(|id| !id.is_empty());
        self
    }

    /// Sets the app secret. Kept locally; an empty secret is treated as unset.
    pub fn with_app_secret(mut self, app_secret: impl Into<String>) -> Self {
        self.app_secret = Some(app_secret.into()).filter(|s| !s.is_empty());
        self
    }

    /// Sets the per-call deadline. A zero duration falls back to
    /// [`DEFAULT_TIMEOUT`].
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = if timeout.is_zero() {
            DEFAULT_TIMEOUT
        } else {
            timeout
        };
        self
    }

    /// Base URL with trailing `/` removed.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// App identity, if configured.
    pub fn app_id(&self) -> Option<&str> {
        self.app_id.as_deref()
    }

    /// App secret, if configured. Never sent to the server.
    pub fn app_secret(&self) -> Option<&str> {
        self.app_secret.as_deref()
    }

    /// Deadline applied to each call.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Joins `path` (which must start with `/`) onto the base URL.
    pub(crate) fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("app_id", &self.app_id)
            .field("app_secret", &self.app_secret.as_ref().map(|_| "***"))
            .field("timeout", &self.timeout)
            .finish()
    }
}
