// ── Resource identity and registration options ──
//
// Urn is the engine-assigned identity every registered resource carries.
// ResourceOptions is what callers attach to a registration; the engine
// consumes them as scheduling hints.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use sitelift_api::engine_types::PropertyMap;

// ── Urn ─────────────────────────────────────────────────────────────

/// Uniform resource name assigned by the engine at registration time.
///
/// Format: `urn:sitelift:<stack>::<project>::<type>::<name>`. Treated as
/// opaque by the runtime; the accessors only split the trailing segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Urn(String);

impl Urn {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The component type token segment, if the URN is well-formed.
    pub fn type_token(&self) -> Option<&str> {
        self.0.split("::").nth(2)
    }

    /// The logical resource name segment, if the URN is well-formed.
    pub fn name(&self) -> Option<&str> {
        self.0.split("::").nth(3)
    }
}

impl fmt::Display for Urn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Urn {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<String> for Urn {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Urn {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ── ResourceOptions ─────────────────────────────────────────────────

/// Caller-supplied options for a resource registration.
///
/// `depends_on` entries become ordering hints for the engine's scheduler;
/// dependencies carried by deferred input values are added automatically
/// during marshaling.
#[derive(Debug, Clone, Default)]
pub struct ResourceOptions {
    /// Parent resource in the deployment graph.
    pub parent: Option<Urn>,
    /// Explicit ordering dependencies.
    pub depends_on: Vec<Urn>,
    /// Ask the engine to refuse deletion of the provisioned resources.
    pub protect: bool,
    /// Explicit provider plugin selection (e.g. a version-pinned plugin).
    pub provider: Option<String>,
}

// ── RegisteredComponent ─────────────────────────────────────────────

/// Raw result of a component registration, consumed by typed bindings.
#[derive(Debug, Clone)]
pub struct RegisteredComponent {
    pub urn: Urn,
    /// Physical provider ID, absent for pure component resources.
    pub id: Option<String>,
    /// Provider-populated output properties, uninterpreted.
    pub outputs: PropertyMap,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn urn_segments() {
        let urn = Urn::new(
            "urn:sitelift:prod::marketing-site::azure-static-website:index:Website::site",
        );
        assert_eq!(urn.type_token(), Some("azure-static-website:index:Website"));
        assert_eq!(urn.name(), Some("site"));
    }

    #[test]
    fn urn_opaque_string_has_no_segments() {
        let urn = Urn::new("not-a-urn");
        assert_eq!(urn.type_token(), None);
        assert_eq!(urn.name(), None);
    }

    #[test]
    fn urn_display_roundtrip() {
        let urn: Urn = "urn:sitelift:dev::main::t::n".parse().unwrap();
        assert_eq!(urn.to_string(), "urn:sitelift:dev::main::t::n");
    }
}
