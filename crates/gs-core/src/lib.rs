//! # gs-core
//!
//! Core domain models and port definitions for GifShare.
//!
//! This crate contains the handoff domain without any infrastructure
//! dependencies: the capability registry, the protocol message model and its
//! state machine, the share outcome taxonomy, and the ports every adapter
//! implements.

pub mod app;
pub mod asset;
pub mod config;
pub mod handoff;
pub mod ids;
pub mod ports;
pub mod share;

// Re-export commonly used types at the crate root
pub use app::{CapabilityRegistry, ExternalApp};
pub use asset::{AssetHandle, MimeType, StagedAsset};
pub use config::{ProbeStrategy, ShareConfig};
pub use handoff::{HandoffMessage, HandoffState, Scene};
pub use ids::StagedAssetId;
pub use share::{ShareError, ShareErrorKind, ShareOutcome, ShareRequest};
