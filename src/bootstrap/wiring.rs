//! # Dependency Injection / 依赖注入模块
//!
//! The only place that depends on gs-infra, gs-platform and gs-app at once.
//! It assembles ports into [`ShareDeps`] and makes no share decisions.

use std::sync::Arc;
use std::time::Duration;

use gs_app::{GifShareService, ServiceSettings, ShareDeps, TransferGate};
use gs_core::config::ShareConfig;
use gs_core::ports::{
    AssetStagerPort, ClockPort, PackageQueryPort, PasteboardPort, ShareSheetPort,
    UrlLauncherPort,
};
use gs_core::CapabilityRegistry;
use gs_infra::{FsAssetStager, JpegThumbnailDeriver, PlistHandoffCodec, StagingJanitor, SystemClock};
use gs_platform::adapters::{
    DesktopPackageQuery, DesktopShareSheet, InMemoryPackageQuery, InMemoryPasteboard,
    InMemoryShareSheet, InMemoryUrlLauncher, SystemPasteboard, SystemUrlLauncher,
};
use gs_platform::desktop_entry::DesktopEntryIndex;
use gs_platform::resolve_probe_strategy;
use tracing::info;

/// Result type for wiring operations
pub type WiringResult<T> = Result<T, WiringError>;

/// Errors during dependency injection
/// 依赖注入错误（平台初始化失败）
#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("Pasteboard initialization failed: {0}")]
    PasteboardInit(String),
}

/// Which adapters back the environment ports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WiringMode {
    /// Real pasteboard, launcher, package metadata and share sheet.
    System,
    /// In-memory adapters. Every registered app is reported installed and
    /// nothing outside the staging directory is touched.
    DryRun,
}

struct PlatformLayer {
    packages: Arc<dyn PackageQueryPort>,
    launcher: Arc<dyn UrlLauncherPort>,
    share_sheet: Arc<dyn ShareSheetPort>,
    pasteboard: Arc<dyn PasteboardPort>,
}

fn create_platform_layer(
    mode: WiringMode,
    registry: &CapabilityRegistry,
    stager: Arc<dyn AssetStagerPort>,
) -> WiringResult<PlatformLayer> {
    match mode {
        WiringMode::System => {
            let pasteboard = SystemPasteboard::new()
                .map_err(|e| WiringError::PasteboardInit(e.to_string()))?;
            let index = DesktopEntryIndex::system();
            Ok(PlatformLayer {
                packages: Arc::new(DesktopPackageQuery::new(index.clone())),
                launcher: Arc::new(SystemUrlLauncher::new()),
                share_sheet: Arc::new(DesktopShareSheet::new(index, stager)),
                pasteboard: Arc::new(pasteboard),
            })
        }
        WiringMode::DryRun => {
            let ids = registry.all_known_identifiers();
            let packages = ids.iter().fold(InMemoryPackageQuery::new(), |packages, id| {
                packages.with_package(id, Some("dry-run"))
            });
            let schemes = registry
                .apps()
                .iter()
                .filter_map(|app| app.url_scheme.clone());
            Ok(PlatformLayer {
                packages: Arc::new(packages),
                launcher: Arc::new(InMemoryUrlLauncher::new(schemes)),
                share_sheet: Arc::new(InMemoryShareSheet::new(ids)),
                pasteboard: Arc::new(InMemoryPasteboard::new()),
            })
        }
    }
}

/// Wire all dependencies together.
/// 将所有依赖连接在一起。
///
/// The janitor shares the stager held by the returned deps, so its sweeps
/// retire live read grants along with their files.
pub fn wire_dependencies(
    config: &ShareConfig,
    mode: WiringMode,
) -> WiringResult<(ShareDeps, StagingJanitor)> {
    let registry = Arc::new(CapabilityRegistry::builtin());
    let clock: Arc<dyn ClockPort> = Arc::new(SystemClock);

    let fs_stager = Arc::new(FsAssetStager::new(
        config.staging_dir.clone(),
        config.provider_authority.clone(),
        clock.clone(),
    ));
    let janitor = StagingJanitor::new(
        config.staging_dir.clone(),
        clock,
        Duration::from_secs(config.staging_ttl_secs),
    )
    .with_stager(fs_stager.clone());
    let stager: Arc<dyn AssetStagerPort> = fs_stager;

    let platform = create_platform_layer(mode, &registry, stager.clone())?;

    let deps = ShareDeps {
        registry,
        stager,
        thumbnails: Arc::new(JpegThumbnailDeriver::new(
            config.thumbnail_edge,
            config.thumbnail_quality,
        )),
        codec: Arc::new(PlistHandoffCodec::new()),
        packages: platform.packages,
        launcher: platform.launcher,
        share_sheet: platform.share_sheet,
        pasteboard: platform.pasteboard,
        transfer_gate: Arc::new(TransferGate::new()),
    };
    Ok((deps, janitor))
}

/// Build the service with the probe strategy resolved for this platform,
/// plus the janitor for its staging area. Long-lived hosts run the janitor
/// periodically; one-shot callers run it once.
pub fn build_service(
    config: &ShareConfig,
    mode: WiringMode,
) -> WiringResult<(GifShareService, StagingJanitor)> {
    let (deps, janitor) = wire_dependencies(config, mode)?;
    let mut settings = ServiceSettings::from(config);
    settings.probe_strategy = resolve_probe_strategy(config.probe_strategy);
    info!(?mode, strategy = ?settings.probe_strategy, "Share service wired");
    Ok((GifShareService::new(deps, settings), janitor))
}
