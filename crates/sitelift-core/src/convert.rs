// ── API type → domain type conversions ──
//
// The single boundary where wire types from sitelift-api cross into core.
// Also holds the property-map unmarshaling helpers the typed bindings use.

use uuid::Uuid;

use sitelift_api::engine_types::{DeploymentSummaryResponse, EngineInfoResponse, PropertyMap};

use crate::error::CoreError;

// ── Engine views ────────────────────────────────────────────────────

/// Engine build/protocol info as consumers see it.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct EngineInfo {
    pub version: String,
    pub protocol_version: u32,
}

impl From<EngineInfoResponse> for EngineInfo {
    fn from(resp: EngineInfoResponse) -> Self {
        Self {
            version: resp.version,
            protocol_version: resp.protocol_version,
        }
    }
}

/// Closing summary of a deployment.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct DeploymentSummary {
    pub id: Uuid,
    pub resource_count: u32,
    pub status: String,
}

impl From<DeploymentSummaryResponse> for DeploymentSummary {
    fn from(resp: DeploymentSummaryResponse) -> Self {
        Self {
            id: resp.id,
            resource_count: resp.resource_count,
            status: resp.status,
        }
    }
}

// ── Property-map unmarshaling ───────────────────────────────────────

/// Extract a required string output, failing with `MissingOutput` when the
/// key is absent or not a string.
pub(crate) fn required_string(
    outputs: &PropertyMap,
    key: &str,
    resource: &str,
) -> Result<String, CoreError> {
    outputs
        .get(key)
        .and_then(|value| value.as_str())
        .map(str::to_owned)
        .ok_or_else(|| CoreError::MissingOutput {
            resource: resource.to_owned(),
            output: key.to_owned(),
        })
}

/// Extract an optional string output. Absent keys and JSON nulls both
/// yield `None`.
pub(crate) fn optional_string(outputs: &PropertyMap, key: &str) -> Option<String> {
    outputs
        .get(key)
        .and_then(|value| value.as_str())
        .map(str::to_owned)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn outputs() -> PropertyMap {
        let mut map = PropertyMap::new();
        map.insert("originURL".into(), json!("https://origin.example/"));
        map.insert("cdnURL".into(), json!(null));
        map
    }

    #[test]
    fn required_string_present() {
        let value = required_string(&outputs(), "originURL", "Website").unwrap();
        assert_eq!(value, "https://origin.example/");
    }

    #[test]
    fn required_string_absent_is_missing_output() {
        let err = required_string(&outputs(), "resourceGroupName", "Website").unwrap_err();
        assert!(matches!(
            err,
            CoreError::MissingOutput { ref output, .. } if output == "resourceGroupName"
        ));
    }

    #[test]
    fn optional_string_null_and_absent_are_none() {
        assert_eq!(optional_string(&outputs(), "cdnURL"), None);
        assert_eq!(optional_string(&outputs(), "customDomainURL"), None);
    }
}
