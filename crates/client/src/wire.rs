//! Request bodies as they appear on the wire.
//!
//! The wire uses `snake_case` names and omits absent search filters. Paging
//! defaults are applied here, at the call boundary.

use protocol::{
    AuthCode, AuthRequest, AuthType, ConsumerToken, ExecuteRequest, Location, SearchRequest,
};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Serialize)]
pub(crate) struct SearchBody<'a> {
    keyword: &'a str,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    service_type: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<Location>,
    page: u32,
    size: u32,
}

impl<'a> From<&'a SearchRequest> for SearchBody<'a> {
    fn from(request: &'a SearchRequest) -> Self {
        Self {
            keyword: &request.keyword,
            service_type: request.service_type.as_deref(),
            location: request.location,
            page: request.effective_page(),
            size: request.effective_size(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ExecuteBody<'a> {
    consumer_token: &'a ConsumerToken,
    input: &'a Value,
}

impl<'a> From<&'a ExecuteRequest> for ExecuteBody<'a> {
    fn from(request: &'a ExecuteRequest) -> Self {
        Self {
            consumer_token: &request.consumer_token,
            input: &request.input,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct AuthBody<'a> {
    auth_type: &'a AuthType,
    auth_code: &'a AuthCode,
}

impl<'a> From<&'a AuthRequest> for AuthBody<'a> {
    fn from(request: &'a AuthRequest) -> Self {
        Self {
            auth_type: &request.auth_type,
            auth_code: &request.auth_code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use protocol::{EndpointName, ServiceId};
    use serde_json::json;

    #[test]
    fn search_body_fills_paging_and_omits_absent_filters() {
        let request = SearchRequest::new("cleaning");
        let body = serde_json::to_value(SearchBody::from(&request)).unwrap();
        assert_eq!(body, json!({ "keyword": "cleaning", "page": 1, "size": 10 }));
    }

    #[test]
    fn search_body_carries_filters() {
        let request = SearchRequest::new("tea")
            .with_type("food")
            .with_location(Location::new(31.23, 121.47))
            .with_page(2, 5);
        let body = serde_json::to_value(SearchBody::from(&request)).unwrap();
        assert_eq!(
            body,
            json!({
                "keyword": "tea",
                "type": "food",
                "location": { "latitude": 31.23, "longitude": 121.47 },
                "page": 2,
                "size": 5
            })
        );
    }

    #[test]
    fn execute_body_renames_consumer_token() {
        let request = ExecuteRequest::new(
            ServiceId::new("svc").unwrap(),
            EndpointName::new("get_menu").unwrap(),
            ConsumerToken::new("tok").unwrap(),
            json!({ "a": 1 }),
        );
        let body = serde_json::to_string(&ExecuteBody::from(&request)).unwrap();
        assert_eq!(body, r#"{"consumer_token":"tok","input":{"a":1}}"#);
    }

    #[test]
    fn auth_body_renames_fields() {
        let request = AuthRequest::new(
            AuthType::new("oauth").unwrap(),
            AuthCode::new("c1").unwrap(),
        );
        let body = serde_json::to_string(&AuthBody::from(&request)).unwrap();
        assert_eq!(body, r#"{"auth_type":"oauth","auth_code":"c1"}"#);
    }
}
