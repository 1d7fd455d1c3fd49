//! Handoff use cases
//!
//! caller
//!   ↓
//! InstallationProber          → which path / which targets
//!   ↓
//! AssetStager (port)
//!   ↓
//! GenericHandoffDispatcher    → ShareToApp / ShareOpen
//! ShareViaProtocol            → pasteboard + capability-scheme activation

pub mod dispatch_generic;
pub mod probe_installation;
pub mod share_open;
pub mod share_to_app;
pub mod share_via_protocol;

pub use dispatch_generic::GenericHandoffDispatcher;
pub use probe_installation::InstallationProber;
pub use share_open::ShareOpen;
pub use share_to_app::ShareToApp;
pub use share_via_protocol::ShareViaProtocol;
