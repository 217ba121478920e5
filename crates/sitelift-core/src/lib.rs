// sitelift-core: Deployment runtime between sitelift-api and consumers (CLI/programs).

pub mod config;
pub mod context;
pub mod convert;
pub mod error;
pub mod model;
pub mod output;
pub mod resource;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{EngineConfig, EngineCredentials, TlsVerification};
pub use context::{Context, DeploymentState, engine_info};
pub use convert::{DeploymentSummary, EngineInfo};
pub use error::CoreError;
pub use output::{Input, Output, OutputError, OutputResolver};
pub use resource::{RegisteredComponent, ResourceOptions, Urn};

// Re-export binding types at the crate root for ergonomics.
pub use model::{WEBSITE_TYPE, Website, WebsiteArgs, WebsiteArray, WebsiteMap};
