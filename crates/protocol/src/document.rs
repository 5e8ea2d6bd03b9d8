//! The machine-readable protocol document a service publishes.
//!
//! A protocol document tells a calling agent what a service does, how to
//! authenticate, which permissions it needs, which endpoints exist, and how to
//! interpret its error codes. Endpoint input/output schemas are JSON-Schema
//! shaped but are kept as opaque [`serde_json::Value`]s: the library never
//! validates payloads against them.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::{Provider, ServiceId};

/// Full protocol document returned by `get_protocol`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtocolDocument {
    /// Protocol document format version (e.g. `"1.0.0"`).
    #[serde(deserialize_with = "crate::nullable::null_as_default")]
    pub version: String,
    #[serde(deserialize_with = "crate::nullable::null_as_default")]
    pub service: ServiceInfo,
    #[serde(deserialize_with = "crate::nullable::null_as_default")]
    pub semantic: SemanticInfo,
    #[serde(deserialize_with = "crate::nullable::null_as_default")]
    pub authentication: AuthInfo,
    #[serde(deserialize_with = "crate::nullable::null_as_default")]
    pub permissions: PermissionInfo,
    /// Endpoints in the order the server listed them.
    #[serde(deserialize_with = "crate::nullable::null_as_default")]
    pub endpoints: Vec<Endpoint>,
    #[serde(deserialize_with = "crate::nullable::null_as_default")]
    pub error_handling: ErrorHandling,
}

impl ProtocolDocument {
    /// Looks up an endpoint by name. The first match in server order wins.
    pub fn endpoint(&self, name: &str) -> Option<&Endpoint> {
        self.endpoints.iter().find(|e| e.name == name)
    }

    /// Looks up an entry in the service's error-code catalog.
    pub fn error_code(&self, code: &str) -> Option<&ErrorCodeEntry> {
        self.error_handling.codes.iter().find(|c| c.code == code)
    }
}

// ---------------------------------------------------------------------------
// Identity and semantics
// ---------------------------------------------------------------------------

/// Identity of the service a document describes.
///
/// `id` is `None` when the server leaves it blank; look the document up by the
/// [`ServiceId`] it was requested with instead.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceInfo {
    #[serde(
        deserialize_with = "crate::nullable::blank_service_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<ServiceId>,
    #[serde(deserialize_with = "crate::nullable::null_as_default")]
    pub name: String,
    #[serde(rename = "type", deserialize_with = "crate::nullable::null_as_default")]
    pub service_type: String,
    #[serde(deserialize_with = "crate::nullable::null_as_default")]
    pub provider: Provider,
}

/// Natural-language description aimed at the calling agent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SemanticInfo {
    #[serde(deserialize_with = "crate::nullable::null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "crate::nullable::null_as_default")]
    pub keywords: Vec<String>,
    #[serde(deserialize_with = "crate::nullable::null_as_default")]
    pub capabilities: Vec<String>,
    #[serde(deserialize_with = "crate::nullable::null_as_default")]
    pub constraints: Vec<String>,
}

// ---------------------------------------------------------------------------
// Authentication and permissions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthInfo {
    #[serde(deserialize_with = "crate::nullable::null_as_default")]
    pub required: bool,
    #[serde(deserialize_with = "crate::nullable::null_as_default")]
    pub methods: Vec<AuthMethod>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthMethod {
    #[serde(rename = "type", deserialize_with = "crate::nullable::null_as_default")]
    pub method_type: String,
    #[serde(deserialize_with = "crate::nullable::null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "crate::nullable::null_as_default")]
    pub endpoint: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PermissionInfo {
    #[serde(deserialize_with = "crate::nullable::null_as_default")]
    pub required: Vec<Permission>,
    #[serde(deserialize_with = "crate::nullable::null_as_default")]
    pub optional: Vec<Permission>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Permission {
    #[serde(deserialize_with = "crate::nullable::null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "crate::nullable::null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "crate::nullable::null_as_default")]
    pub endpoint: String,
}

// ---------------------------------------------------------------------------
// Endpoints
// ---------------------------------------------------------------------------

/// One callable endpoint of a service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoint {
    #[serde(deserialize_with = "crate::nullable::null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "crate::nullable::null_as_default")]
    pub path: String,
    #[serde(deserialize_with = "null_as_post")]
    pub method: String,
    #[serde(deserialize_with = "crate::nullable::null_as_default")]
    pub description: String,
    /// Whether invoking this endpoint triggers a platform payment flow.
    #[serde(deserialize_with = "crate::nullable::null_as_default")]
    pub requires_payment: bool,
    #[serde(deserialize_with = "null_as_empty_schema")]
    pub input_schema: Value,
    #[serde(deserialize_with = "null_as_empty_schema")]
    pub output_schema: Value,
    #[serde(deserialize_with = "crate::nullable::null_as_default")]
    pub output_description: String,
}

fn null_as_post<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(|| "POST".to_string()))
}

fn null_as_empty_schema<'de, D>(deserializer: D) -> Result<Value, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(Value::Object(Default::default())),
        schema => Ok(schema),
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self {
            name: String::new(),
            path: String::new(),
            method: "POST".to_string(),
            description: String::new(),
            requires_payment: false,
            input_schema: Value::Object(Default::default()),
            output_schema: Value::Object(Default::default()),
            output_description: String::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Error catalog
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorHandling {
    #[serde(deserialize_with = "crate::nullable::null_as_default")]
    pub codes: Vec<ErrorCodeEntry>,
}

/// A service-defined error code with guidance for the calling agent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorCodeEntry {
    #[serde(deserialize_with = "crate::nullable::null_as_default")]
    pub code: String,
    #[serde(deserialize_with = "crate::nullable::null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "crate::nullable::null_as_default")]
    pub suggestion: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> ProtocolDocument {
        serde_json::from_value(json!({
            "version": "1.0.0",
            "service": {
                "id": "svc-tea",
                "name": "Tea House",
                "type": "food",
                "provider": { "id": "p1", "name": "Tea Co", "certification": "verified" }
            },
            "semantic": {
                "description": "Bubble tea ordering",
                "keywords": ["tea"],
                "capabilities": ["menu", "order"],
                "constraints": ["open 9-21"]
            },
            "authentication": {
                "required": true,
                "methods": [{ "type": "consumer_token", "description": "", "endpoint": "" }]
            },
            "permissions": {
                "required": [{ "name": "phone", "description": "delivery contact", "endpoint": "create_order" }],
                "optional": []
            },
            "endpoints": [
                {
                    "name": "get_menu",
                    "path": "/menu",
                    "method": "GET",
                    "description": "List products",
                    "requires_payment": false,
                    "input_schema": { "type": "object" },
                    "output_schema": { "type": "object", "properties": { "items": { "type": "array" } } },
                    "output_description": "menu"
                },
                {
                    "name": "create_order",
                    "path": "/orders",
                    "requires_payment": true
                }
            ],
            "error_handling": {
                "codes": [{ "code": "SHOP_CLOSED", "description": "outside hours", "suggestion": "retry later" }]
            }
        }))
        .unwrap()
    }

    #[test]
    fn endpoints_keep_server_order_and_schemas_stay_opaque() {
        let doc = sample();
        let names: Vec<_> = doc.endpoints.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["get_menu", "create_order"]);
        assert_eq!(
            doc.endpoints[0].output_schema["properties"]["items"]["type"],
            json!("array")
        );
    }

    #[test]
    fn missing_endpoint_fields_use_defaults() {
        let doc = sample();
        let order = doc.endpoint("create_order").unwrap();
        assert_eq!(order.method, "POST");
        assert!(order.requires_payment);
        assert_eq!(order.input_schema, json!({}));
    }

    #[test]
    fn lookups_find_endpoints_and_error_codes() {
        let doc = sample();
        assert_eq!(doc.endpoint("get_menu").unwrap().method, "GET");
        assert!(doc.endpoint("refund").is_none());
        assert_eq!(doc.error_code("SHOP_CLOSED").unwrap().suggestion, "retry later");
        assert!(doc.error_code("UNKNOWN").is_none());
        assert_eq!(doc.service.provider.certification, "verified");
        assert_eq!(doc.service.id.as_ref().unwrap().as_str(), "svc-tea");
        assert!(doc.authentication.required);
    }

    #[test]
    fn empty_document_decodes() {
        let doc: ProtocolDocument = serde_json::from_value(json!({})).unwrap();
        assert!(doc.endpoints.is_empty());
        assert!(doc.service.id.is_none());
    }

    #[test]
    fn null_sections_and_fields_decode_as_defaults() {
        let doc: ProtocolDocument = serde_json::from_value(json!({
            "version": null,
            "service": { "id": "", "name": "Tea House", "type": null, "provider": null },
            "semantic": { "description": "tea", "keywords": null, "capabilities": null },
            "authentication": null,
            "permissions": { "required": null, "optional": null },
            "endpoints": [
                { "name": "get_menu", "method": null, "input_schema": null, "output_schema": null }
            ],
            "error_handling": { "codes": null }
        }))
        .unwrap();

        assert_eq!(doc.version, "");
        assert!(doc.service.id.is_none());
        assert_eq!(doc.service.name, "Tea House");
        assert_eq!(doc.service.provider, Provider::default());
        assert!(doc.semantic.keywords.is_empty());
        assert_eq!(doc.authentication, AuthInfo::default());
        assert!(doc.permissions.required.is_empty());
        assert!(doc.error_handling.codes.is_empty());

        let menu = doc.endpoint("get_menu").unwrap();
        assert_eq!(menu.method, "POST");
        assert_eq!(menu.input_schema, json!({}));
        assert_eq!(menu.output_schema, json!({}));
    }

    #[test]
    fn null_endpoint_list_decodes_as_empty() {
        let doc: ProtocolDocument =
            serde_json::from_value(json!({ "endpoints": null, "service": { "id": "svc-1" } }))
                .unwrap();
        assert!(doc.endpoints.is_empty());
        assert_eq!(doc.service.id.unwrap().as_str(), "svc-1");
    }
}
