//! GifShare Application Orchestration Layer
//!
//! This crate contains the handoff use cases and the caller-facing service.

pub mod deps;
pub mod host;
pub mod service;
pub mod transfer_gate;
pub mod usecases;

pub use deps::ShareDeps;
pub use host::{HostCall, HostChannel, HostResponse};
pub use service::{GifShareService, ServiceSettings};
pub use transfer_gate::TransferGate;
