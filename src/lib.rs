//! GifShare host bootstrap: configuration, tracing and dependency wiring for
//! the share service exposed by `gs-app`.

pub mod bootstrap;

pub use gs_app::{GifShareService, HostCall, HostChannel, HostResponse};
pub use gs_core::{ShareErrorKind, ShareOutcome};
