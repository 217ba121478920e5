// Deployment engine API client.
//
// Hand-crafted async HTTP client for the engine's v1 REST surface.
// Uses bearer-token authentication and JSON endpoints under /api/v1/.

pub mod client;
pub mod types;

pub use client::EngineClient;
