// ── Typed resource bindings ──
//
// Each module is the typed proxy for one remote component type. The
// bindings validate arguments, marshal them to the wire property map,
// and unmarshal provider outputs into deferred values. All provisioning
// happens engine-side.

pub mod website;

pub use website::{WEBSITE_TYPE, Website, WebsiteArgs, WebsiteArray, WebsiteMap};
