//! Request execution engine.
//!
//! Every marketplace operation funnels through [`Engine::send`]. It is the only
//! place with branching or failure handling:
//!
//! 1. build headers (`Content-Type` always, `X-App-ID` when configured);
//! 2. serialise the body, if any;
//! 3. issue the call under the configured deadline;
//! 4. parse the reply as an [`ApiEnvelope`], whatever the HTTP status;
//! 5. map a non-zero envelope code to [`A2eError::Application`];
//! 6. decode `data` into the caller's result type.
//!
//! Every failure outside step 5 becomes [`A2eError::Transport`]. Calls are
//! single-shot: no retry, no backoff, no shared mutable state.

use std::sync::Arc;
use std::time::Duration;

use protocol::{A2eError, ApiEnvelope, TransportErrorKind};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::Instrument;

use crate::config::ClientConfig;
use crate::routes::Route;

/// Identity header carrying the configured app id.
const APP_ID_HEADER: &str = "x-app-id";

/// Cloning shares both the connection pool and the configuration.
#[derive(Debug, Clone)]
pub(crate) struct Engine {
    http: reqwest::Client,
    config: Arc<ClientConfig>,
}

impl Engine {
    pub(crate) fn new(config: ClientConfig, http: reqwest::Client) -> Self {
        Self {
            http,
            config: Arc::new(config),
        }
    }

    pub(crate) fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Executes `route` with an optional JSON body and decodes the envelope
    /// payload as `T`.
    pub(crate) async fn send<B, T>(&self, route: Route<'_>, body: Option<&B>) -> Result<T, A2eError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let method = route.method();
        let path = route.path();
        let span = tracing::debug_span!(
            "a2e.request",
            operation = route.operation(),
            method = %method,
            path = %path,
        );

        async move {
            let deadline = self.config.timeout();

            // The deadline owns its timer; it is released when this future
            // completes or is dropped, on every exit path.
            let envelope = match tokio::time::timeout(
                deadline,
                self.round_trip(method, &path, body),
            )
            .await
            {
                Ok(result) => result,
                Err(_) => Err(deadline_exceeded(deadline)),
            };

            let outcome = envelope.and_then(unwrap_envelope::<T>);
            match &outcome {
                Ok(_) => tracing::debug!("request succeeded"),
                Err(err) => tracing::debug!(code = %err.code(), error = %err, "request failed"),
            }
            outcome
        }
        .instrument(span)
        .await
    }

    async fn round_trip<B>(
        &self,
        method: reqwest::Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<ApiEnvelope, A2eError>
    where
        B: Serialize + ?Sized,
    {
        let mut request = self
            .http
            .request(method, self.config.url_for(path))
            .headers(self.headers()?);

        if let Some(body) = body {
            let bytes = serde_json::to_vec(body).map_err(|e| {
                A2eError::transport(
                    TransportErrorKind::Request,
                    format!("failed to serialise request body: {e}"),
                )
            })?;
            request = request.body(bytes);
        }

        let response = request.send().await.map_err(classify)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(classify)?;

        serde_json::from_slice::<ApiEnvelope>(&bytes).map_err(|e| {
            A2eError::transport(
                TransportErrorKind::Decode,
                format!("invalid response envelope (HTTP {status}): {e}"),
            )
        })
    }

    fn headers(&self) -> Result<HeaderMap, A2eError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        // No signature header; the app secret never leaves the process.
        if let Some(app_id) = self.config.app_id() {
            let value = HeaderValue::from_str(app_id).map_err(|e| {
                A2eError::transport(
                    TransportErrorKind::Request,
                    format!("invalid X-App-ID header value: {e}"),
                )
            })?;
            headers.insert(APP_ID_HEADER, value);
        }

        Ok(headers)
    }
}

/// Returns the envelope payload as `T`, or the envelope's application error.
fn unwrap_envelope<T: DeserializeOwned>(envelope: ApiEnvelope) -> Result<T, A2eError> {
    if !envelope.is_success() {
        return Err(A2eError::application(envelope.code, envelope.message));
    }

    serde_json::from_value(envelope.data).map_err(|e| {
        A2eError::transport(
            TransportErrorKind::Decode,
            format!("unexpected payload shape: {e}"),
        )
    })
}

fn deadline_exceeded(deadline: Duration) -> A2eError {
    A2eError::transport(
        TransportErrorKind::Timeout,
        format!(
            "request cancelled after exceeding deadline of {} ms",
            deadline.as_millis()
        ),
    )
}

fn classify(err: reqwest::Error) -> A2eError {
    let kind = if err.is_timeout() {
        TransportErrorKind::Timeout
    } else if err.is_builder() {
        TransportErrorKind::Request
    } else if err.is_decode() {
        TransportErrorKind::Decode
    } else {
        TransportErrorKind::Connect
    };
    A2eError::transport(kind, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn envelope(code: i64, message: &str, data: Value) -> ApiEnvelope {
        ApiEnvelope {
            code,
            message: message.to_string(),
            data,
        }
    }

    #[test]
    fn success_returns_payload_unmodified() {
        let payloads = [
            json!(null),
            json!(42),
            json!("text"),
            json!([1, "two", { "three": 3.5 }]),
            json!({ "nested": { "list": [true, false], "empty": {} } }),
        ];
        for payload in payloads {
            let out: Value = unwrap_envelope(envelope(0, "ok", payload.clone())).unwrap();
            assert_eq!(out, payload);
        }
    }

    #[test]
    fn non_zero_code_becomes_application_error() {
        for code in [-1_i64, 1, 403, 40001, 99_999_999] {
            let err = unwrap_envelope::<Value>(envelope(code, "nope", json!({ "ignored": 1 })))
                .unwrap_err();
            assert_eq!(
                err,
                A2eError::Application {
                    code,
                    message: "nope".to_string()
                }
            );
            assert_eq!(err.code(), code.to_string());
        }
    }

    #[test]
    fn payload_shape_mismatch_is_a_decode_failure() {
        let err = unwrap_envelope::<Vec<u32>>(envelope(0, "ok", json!({ "not": "a list" })))
            .unwrap_err();
        assert!(matches!(
            err,
            A2eError::Transport {
                kind: TransportErrorKind::Decode,
                ..
            }
        ));
        assert_eq!(err.code(), "NETWORK_ERROR");
    }

    #[test]
    fn reqwest_builder_errors_classify_as_request() {
        let err = reqwest::Client::new().get("not a url").build().unwrap_err();
        let normalized = classify(err);
        assert!(matches!(
            normalized,
            A2eError::Transport {
                kind: TransportErrorKind::Request,
                ..
            }
        ));
        assert_eq!(normalized.code(), "NETWORK_ERROR");
    }

    #[test]
    fn clones_share_one_configuration() {
        let engine = Engine::new(
            ClientConfig::new("http://localhost:9").with_app_id("app-1"),
            reqwest::Client::new(),
        );
        let cloned = engine.clone();
        assert!(Arc::ptr_eq(&engine.config, &cloned.config));
        assert_eq!(cloned.config().app_id(), Some("app-1"));
    }

    #[tokio::test]
    async fn send_without_body_issues_bodyless_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/open/services/svc-1/protocol"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "code": 0, "message": "ok", "data": { "v": [1, 2] } })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let engine = Engine::new(ClientConfig::new(server.uri()), reqwest::Client::new());
        let service_id = protocol::ServiceId::new("svc-1").unwrap();
        let data: Value = engine
            .send::<(), _>(
                Route::GetProtocol {
                    service_id: &service_id,
                },
                None,
            )
            .await
            .unwrap();
        assert_eq!(data, json!({ "v": [1, 2] }));

        let requests = server.received_requests().await.unwrap();
        assert!(requests[0].body.is_empty());
        assert_eq!(
            requests[0].headers.get("content-type").unwrap(),
            "application/json"
        );
    }
}
