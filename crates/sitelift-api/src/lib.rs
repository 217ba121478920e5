// sitelift-api: Async Rust client for the sitelift deployment engine API.

pub mod engine;
pub mod error;
pub mod transport;

pub use engine::EngineClient;
pub use engine::types as engine_types;
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
