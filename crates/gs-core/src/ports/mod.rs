//! Port interfaces for the application layer
//!
//! Ports are the collaborator interfaces the handoff core consumes from the
//! operating environment: package metadata, capability-scheme activation,
//! share sheets, the shared pasteboard and the staging area. Infrastructure
//! and platform crates implement them; use cases only see the traits.

mod app_dirs;
mod asset_stager;
mod clock;
mod handoff_codec;
mod package_query;
mod pasteboard;
mod share_sheet;
mod thumbnail;
mod url_launcher;

pub use app_dirs::{AppDirs, AppDirsError, AppDirsPort};
pub use asset_stager::AssetStagerPort;
pub use clock::ClockPort;
pub use handoff_codec::HandoffCodecPort;
pub use package_query::{PackageInfo, PackageQueryPort};
pub use pasteboard::PasteboardPort;
pub use share_sheet::ShareSheetPort;
pub use thumbnail::ThumbnailPort;
pub use url_launcher::UrlLauncherPort;
