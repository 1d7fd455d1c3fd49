//! Caller-facing share service.
//!
//! 面向宿主的分享服务：安装探测、通用分享与协议移交的统一入口。

use std::sync::Arc;

use gs_core::app::PROTOCOL_TARGET_ID;
use gs_core::config::{ProbeStrategy, ShareConfig, DEFAULT_CHOOSER_TITLE};
use gs_core::share::ShareError;
use gs_core::{CapabilityRegistry, ShareOutcome};
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::deps::ShareDeps;
use crate::host::{HostCall, HostChannel, HostResponse};
use crate::usecases::{
    GenericHandoffDispatcher, InstallationProber, ShareOpen, ShareToApp, ShareViaProtocol,
};

/// Service knobs taken from [`ShareConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSettings {
    pub chooser_title: String,
    /// Already resolved for the current platform.
    pub probe_strategy: ProbeStrategy,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            chooser_title: DEFAULT_CHOOSER_TITLE.to_string(),
            probe_strategy: ProbeStrategy::PackageMetadata,
        }
    }
}

impl From<&ShareConfig> for ServiceSettings {
    fn from(config: &ShareConfig) -> Self {
        Self {
            chooser_title: config.chooser_title.clone(),
            probe_strategy: config.probe_strategy,
        }
    }
}

pub struct GifShareService {
    registry: Arc<CapabilityRegistry>,
    prober: InstallationProber,
    share_to_app: ShareToApp,
    share_open: ShareOpen,
    share_via_protocol: ShareViaProtocol,
}

impl GifShareService {
    pub fn new(deps: ShareDeps, settings: ServiceSettings) -> Self {
        let dispatcher = Arc::new(GenericHandoffDispatcher::new(
            deps.share_sheet.clone(),
            settings.chooser_title,
        ));

        Self {
            prober: InstallationProber::new(
                deps.registry.clone(),
                deps.packages.clone(),
                deps.launcher.clone(),
                settings.probe_strategy,
            ),
            share_to_app: ShareToApp::new(deps.stager.clone(), dispatcher.clone()),
            share_open: ShareOpen::new(deps.stager.clone(), dispatcher),
            share_via_protocol: ShareViaProtocol::new(
                deps.stager,
                deps.thumbnails,
                deps.codec,
                deps.pasteboard,
                deps.launcher,
                deps.transfer_gate,
            ),
            registry: deps.registry,
        }
    }

    pub fn registry(&self) -> &CapabilityRegistry {
        &self.registry
    }

    pub async fn share_to_app(&self, gif_data: &[u8], target_id: &str) -> ShareOutcome {
        self.share_to_app.execute(gif_data, target_id).await.into()
    }

    pub async fn share_open(&self, gif_data: &[u8]) -> ShareOutcome {
        self.share_open.execute(gif_data).await.into()
    }

    pub async fn share_via_protocol(
        &self,
        gif_data: &[u8],
        app_id: &str,
        scene: Option<&str>,
    ) -> ShareOutcome {
        self.share_via_protocol
            .execute(gif_data, app_id, scene)
            .await
            .into()
    }

    pub async fn list_installed_targets(&self) -> Vec<String> {
        self.prober.installed_apps().await
    }

    pub async fn is_target_installed(&self, identifier: &str) -> bool {
        self.prober.is_installed(identifier).await
    }

    pub async fn target_version(&self, identifier: &str) -> Option<String> {
        self.prober.version_of(identifier).await
    }

    /// Whether `weixin://` resolves, independent of the probe strategy.
    pub async fn is_protocol_target_installed(&self) -> bool {
        self.prober.is_protocol_target_installed().await
    }

    /// Dispatch a host method call.
    pub async fn handle(&self, call: &HostCall) -> HostResponse {
        debug!(channel = ?call.channel, method = %call.method, "Host call received");
        let args = call.args();

        match (call.channel, call.method.as_str()) {
            (HostChannel::Messaging, "shareGif") => {
                let outcome = match (args.gif_data, args.package_name) {
                    (Some(gif_data), Some(package_name)) => {
                        self.share_to_app(&gif_data, &package_name).await
                    }
                    _ => missing_args("gifData, packageName"),
                };
                HostResponse::Outcome(outcome)
            }
            (HostChannel::Messaging, "shareGifGeneric") => {
                let outcome = match args.gif_data {
                    Some(gif_data) => self.share_open(&gif_data).await,
                    None => missing_args("gifData"),
                };
                HostResponse::Outcome(outcome)
            }
            (HostChannel::Messaging, "getInstalledApps") => {
                HostResponse::Value(json!(self.list_installed_targets().await))
            }
            (HostChannel::Messaging, "isAppInstalled") => {
                let installed = match args.package_name {
                    Some(id) => self.is_target_installed(&id).await,
                    None => false,
                };
                HostResponse::Value(Value::Bool(installed))
            }
            (HostChannel::Protocol, "shareGif") | (_, "shareGifProtocol") => {
                let outcome = match (args.gif_data, args.app_id) {
                    (Some(gif_data), Some(app_id)) => {
                        self.share_via_protocol(&gif_data, &app_id, args.scene.as_deref())
                            .await
                    }
                    _ => missing_args("gifData, appId"),
                };
                HostResponse::Outcome(outcome)
            }
            (HostChannel::Protocol, "isWeChatInstalled") => {
                HostResponse::Value(Value::Bool(self.is_protocol_target_installed().await))
            }
            (HostChannel::Protocol, "getWeChatVersion") => HostResponse::Value(
                self.target_version(PROTOCOL_TARGET_ID)
                    .await
                    .map(Value::String)
                    .unwrap_or(Value::Null),
            ),
            (channel, method) => {
                info!(?channel, method, "Host method not implemented");
                HostResponse::NotImplemented
            }
        }
    }
}

fn missing_args(names: &str) -> ShareOutcome {
    ShareError::InvalidArgs(names.to_string()).into()
}
