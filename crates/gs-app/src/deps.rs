//! Dependency bundle handed to the service.

use std::sync::Arc;

use gs_core::ports::{
    AssetStagerPort, HandoffCodecPort, PackageQueryPort, PasteboardPort, ShareSheetPort,
    ThumbnailPort, UrlLauncherPort,
};
use gs_core::CapabilityRegistry;

use crate::transfer_gate::TransferGate;

/// Every port the share use cases depend on.
///
/// All transfers going through the same pasteboard must share one
/// [`TransferGate`].
#[derive(Clone)]
pub struct ShareDeps {
    pub registry: Arc<CapabilityRegistry>,
    pub stager: Arc<dyn AssetStagerPort>,
    pub thumbnails: Arc<dyn ThumbnailPort>,
    pub codec: Arc<dyn HandoffCodecPort>,
    pub packages: Arc<dyn PackageQueryPort>,
    pub launcher: Arc<dyn UrlLauncherPort>,
    pub share_sheet: Arc<dyn ShareSheetPort>,
    pub pasteboard: Arc<dyn PasteboardPort>,
    pub transfer_gate: Arc<TransferGate>,
}
