//! Route table: the verb and path of every marketplace operation.
//!
//! Operations carry no logic of their own. Each one picks a [`Route`], maps its
//! request onto a wire body (see [`crate::wire`]), and hands both to the
//! engine.

use protocol::{EndpointName, ServiceId};
use reqwest::Method;

const SEARCH_PATH: &str = "/api/v1/open/services/search";
const SERVICES_PREFIX: &str = "/api/v1/open/services";
const USER_TOKEN_PATH: &str = "/api/v1/open/platform/get_user_token";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Route<'a> {
    SearchServices,
    GetProtocol {
        service_id: &'a ServiceId,
    },
    Execute {
        service_id: &'a ServiceId,
        endpoint: &'a EndpointName,
    },
    GetConsumerToken,
}

impl Route<'_> {
    /// Stable operation name used in tracing spans.
    pub(crate) fn operation(&self) -> &'static str {
        match self {
            Self::SearchServices => "search_services",
            Self::GetProtocol { .. } => "get_protocol",
            Self::Execute { .. } => "execute",
            Self::GetConsumerToken => "get_consumer_token",
        }
    }

    pub(crate) fn method(&self) -> Method {
        match self {
            Self::GetProtocol { .. } => Method::GET,
            Self::SearchServices | Self::Execute { .. } | Self::GetConsumerToken => Method::POST,
        }
    }

    /// Path relative to the configured base URL, always starting with `/`.
    pub(crate) fn path(&self) -> String {
        match self {
            Self::SearchServices => SEARCH_PATH.to_string(),
            Self::GetProtocol { service_id } => {
                format!("{SERVICES_PREFIX}/{service_id}/protocol")
            }
            Self::Execute {
                service_id,
                endpoint,
            } => format!("{SERVICES_PREFIX}/{service_id}/execute/{endpoint}"),
            Self::GetConsumerToken => USER_TOKEN_PATH.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_routes() {
        assert_eq!(Route::SearchServices.method(), Method::POST);
        assert_eq!(Route::SearchServices.path(), "/api/v1/open/services/search");
        assert_eq!(Route::GetConsumerToken.method(), Method::POST);
        assert_eq!(
            Route::GetConsumerToken.path(),
            "/api/v1/open/platform/get_user_token"
        );
    }

    #[test]
    fn templated_routes_render_identifiers() {
        let service_id = ServiceId::new("svc-42").unwrap();
        let endpoint = EndpointName::new("get_menu").unwrap();

        let protocol = Route::GetProtocol {
            service_id: &service_id,
        };
        assert_eq!(protocol.method(), Method::GET);
        assert_eq!(protocol.path(), "/api/v1/open/services/svc-42/protocol");
        assert_eq!(protocol.operation(), "get_protocol");

        let execute = Route::Execute {
            service_id: &service_id,
            endpoint: &endpoint,
        };
        assert_eq!(execute.method(), Method::POST);
        assert_eq!(
            execute.path(),
            "/api/v1/open/services/svc-42/execute/get_menu"
        );
    }
}
