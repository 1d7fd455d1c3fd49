//! External messaging applications known to GifShare.

mod external_app;
mod registry;

pub use external_app::ExternalApp;
pub use registry::{CapabilityRegistry, PROTOCOL_TARGET_ID, PROTOCOL_TARGET_SCHEME};
