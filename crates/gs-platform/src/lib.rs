//! # gs-platform
//!
//! Platform-specific implementations for GifShare.
//!
//! This crate contains the adapters that talk to the operating environment:
//! the shared pasteboard, capability-scheme resolution and activation,
//! installed-package metadata and the share sheet. In-memory adapters with
//! the same contracts back dry runs and tests.

pub mod adapters;
pub mod app_dirs;
pub mod capability;
pub mod desktop_entry;

pub use capability::{detect_probe_capability, resolve_probe_strategy, ProbeCapability};
