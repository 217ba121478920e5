//! Wire types for the sitelift deployment engine API (v1).
//!
//! All types match the JSON bodies of `/api/v1/` endpoints.
//! Field names use camelCase via `#[serde(rename_all = "camelCase")]`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Property bag exchanged with the engine: resource inputs on the way in,
/// provider-populated outputs on the way out. Values are opaque JSON — the
/// typed bindings in `sitelift-core` own their interpretation.
pub type PropertyMap = serde_json::Map<String, Value>;

// ── Engine info ──────────────────────────────────────────────────────

/// Engine build and protocol info — from `GET /v1/info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineInfoResponse {
    pub version: String,
    pub protocol_version: u32,
}

// ── Deployments ──────────────────────────────────────────────────────

/// Open a deployment session — body of `POST /v1/deployments`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentCreateRequest {
    pub project: String,
    pub stack: String,
}

/// Deployment session — from `POST /v1/deployments`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentResponse {
    pub id: Uuid,
    pub project: String,
    pub stack: String,
    pub created_at: DateTime<Utc>,
}

/// Closing summary — from `POST /v1/deployments/{id}/complete`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentSummaryResponse {
    pub id: Uuid,
    pub resource_count: u32,
    /// One of: `SUCCEEDED`, `FAILED`, `CANCELLED`.
    pub status: String,
}

// ── Resource registration ────────────────────────────────────────────

/// Caller-supplied registration options forwarded to the engine.
///
/// The engine uses `depends_on` as ordering hints when it schedules
/// resource operations across the deployment graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResourceOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protect: Option<bool>,
    /// Explicit provider plugin selection (e.g. a version-pinned plugin).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
}

/// Register a resource — body of `POST /v1/deployments/{id}/resources`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResourceRequest {
    /// Component type token, e.g. `azure-static-website:index:Website`.
    #[serde(rename = "type")]
    pub type_token: String,
    /// Logical resource name, unique within the deployment.
    pub name: String,
    /// `true` for component resources provisioned by an out-of-process
    /// provider plugin.
    pub remote: bool,
    pub inputs: PropertyMap,
    #[serde(default)]
    pub options: RegisterResourceOptions,
}

/// Registration result — from `POST /v1/deployments/{id}/resources`.
///
/// `outputs` carries whatever properties the provider plugin populated;
/// which keys are present depends on the inputs (a component without a CDN
/// reports no CDN endpoint, for example).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResourceResponse {
    pub urn: String,
    /// Physical provider ID, absent for pure component resources.
    pub id: Option<String>,
    #[serde(default)]
    pub outputs: PropertyMap,
}

/// Publish component outputs — body of `POST /v1/deployments/{id}/outputs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterOutputsRequest {
    pub urn: String,
    pub outputs: PropertyMap,
}
