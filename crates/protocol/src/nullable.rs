//! Field deserializers for payloads that send `null` in place of a value.
//!
//! `#[serde(default)]` only covers a missing key. The platform also emits
//! explicit `null` for empty lists, absent sub-objects and blank strings, so
//! every defaulted result field routes through [`null_as_default`].

use serde::{Deserialize, Deserializer};

use crate::ServiceId;

/// Decodes `T`, mapping an explicit `null` to `T::default()`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decodes an optional service id; `null` and `""` both become `None`.
pub(crate) fn blank_service_id<'de, D>(deserializer: D) -> Result<Option<ServiceId>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.and_then(ServiceId::new))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "null_as_default")]
        tags: Vec<String>,
        #[serde(default, deserialize_with = "null_as_default")]
        label: String,
        #[serde(default, deserialize_with = "blank_service_id")]
        id: Option<ServiceId>,
    }

    #[test]
    fn null_and_missing_fall_back_to_default() {
        let nulls: Holder =
            serde_json::from_value(json!({ "tags": null, "label": null, "id": null })).unwrap();
        assert!(nulls.tags.is_empty());
        assert_eq!(nulls.label, "");
        assert!(nulls.id.is_none());

        let missing: Holder = serde_json::from_value(json!({})).unwrap();
        assert!(missing.tags.is_empty());
        assert!(missing.id.is_none());
    }

    #[test]
    fn present_values_pass_through() {
        let holder: Holder =
            serde_json::from_value(json!({ "tags": ["a"], "label": "x", "id": "svc-1" })).unwrap();
        assert_eq!(holder.tags, ["a"]);
        assert_eq!(holder.label, "x");
        assert_eq!(holder.id.unwrap().as_str(), "svc-1");
    }

    #[test]
    fn blank_service_id_is_none() {
        let holder: Holder = serde_json::from_value(json!({ "id": "" })).unwrap();
        assert!(holder.id.is_none());
    }

    #[test]
    fn wrong_type_is_still_rejected() {
        assert!(serde_json::from_value::<Holder>(json!({ "tags": 5 })).is_err());
    }
}
