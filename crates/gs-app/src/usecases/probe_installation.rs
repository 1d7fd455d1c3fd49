//! Installation probing.
//!
//! Absence of a target is the common case, so every negative signal (not
//! found, permission denied, malformed identifier, unresolvable scheme)
//! collapses to `false`. Nothing is cached: install state may change between
//! calls and install events are not observed.
//!
//! Strategy per platform:
//! - `PackageMetadata`: a successful metadata lookup means installed.
//! - `UrlScheme`: the target's registered scheme (see the registry) must be
//!   resolvable. This only proves a handler exists, and targets without a
//!   scheme always report `false`.
//!
//! The protocol target is always probed through its bare capability scheme,
//! whatever the strategy: the protocol path needs that handler, and a
//! package record alone does not prove one exists.

use std::sync::Arc;

use gs_core::app::PROTOCOL_TARGET_ID;
use gs_core::config::ProbeStrategy;
use gs_core::ports::{PackageQueryPort, UrlLauncherPort};
use gs_core::CapabilityRegistry;
use tracing::{debug, info};
use url::Url;

/// Version reported when only a scheme handler is observable.
pub const SCHEME_ONLY_VERSION: &str = "installed";

pub struct InstallationProber {
    registry: Arc<CapabilityRegistry>,
    packages: Arc<dyn PackageQueryPort>,
    launcher: Arc<dyn UrlLauncherPort>,
    strategy: ProbeStrategy,
}

impl InstallationProber {
    pub fn new(
        registry: Arc<CapabilityRegistry>,
        packages: Arc<dyn PackageQueryPort>,
        launcher: Arc<dyn UrlLauncherPort>,
        strategy: ProbeStrategy,
    ) -> Self {
        Self {
            registry,
            packages,
            launcher,
            strategy,
        }
    }

    pub fn strategy(&self) -> ProbeStrategy {
        self.strategy
    }

    pub async fn is_installed(&self, identifier: &str) -> bool {
        match self.strategy {
            ProbeStrategy::UrlScheme => self.scheme_resolvable(identifier).await,
            ProbeStrategy::PackageMetadata | ProbeStrategy::Auto => {
                match self.packages.package_info(identifier) {
                    Ok(_) => true,
                    Err(err) => {
                        debug!(identifier, error = %err, "Treating lookup failure as not installed");
                        false
                    }
                }
            }
        }
    }

    /// Known identifiers that are installed, in registry order.
    pub async fn installed_apps(&self) -> Vec<String> {
        let mut installed = Vec::new();
        for id in self.registry.all_known_identifiers() {
            if self.is_installed(id).await {
                installed.push(id.to_string());
            }
        }
        info!(count = installed.len(), apps = ?installed, "Detected installed targets");
        installed
    }

    /// Installed version, when the platform exposes one.
    pub async fn version_of(&self, identifier: &str) -> Option<String> {
        match self.strategy {
            ProbeStrategy::UrlScheme => self
                .scheme_resolvable(identifier)
                .await
                .then(|| SCHEME_ONLY_VERSION.to_string()),
            ProbeStrategy::PackageMetadata | ProbeStrategy::Auto => self
                .packages
                .package_info(identifier)
                .ok()
                .and_then(|info| info.version_name),
        }
    }

    /// Whether the bare capability scheme of the protocol target resolves.
    pub async fn is_protocol_target_installed(&self) -> bool {
        self.scheme_resolvable(PROTOCOL_TARGET_ID).await
    }

    async fn scheme_resolvable(&self, identifier: &str) -> bool {
        let Some(probe) = self.registry.get(identifier).and_then(|app| app.probe_uri()) else {
            debug!(identifier, "No capability scheme registered for target");
            return false;
        };
        match Url::parse(&probe) {
            Ok(url) => self.launcher.can_open(&url).await,
            Err(err) => {
                debug!(identifier, error = %err, "Unparseable probe URI");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{anyhow, Result};
    use async_trait::async_trait;
    use gs_core::ports::PackageInfo;
    use gs_core::ExternalApp;
    use std::collections::HashSet;

    struct MockPackages {
        installed: HashSet<&'static str>,
    }

    impl PackageQueryPort for MockPackages {
        fn package_info(&self, identifier: &str) -> Result<PackageInfo> {
            if identifier == "com.locked.app" {
                return Err(anyhow!("permission denied"));
            }
            if self.installed.contains(identifier) {
                Ok(PackageInfo {
                    identifier: identifier.to_string(),
                    version_name: Some("1.0".to_string()),
                })
            } else {
                Err(anyhow!("not found"))
            }
        }
    }

    struct MockLauncher {
        schemes: HashSet<&'static str>,
    }

    #[async_trait]
    impl UrlLauncherPort for MockLauncher {
        async fn can_open(&self, url: &Url) -> bool {
            self.schemes.contains(url.scheme())
        }

        async fn open(&self, _url: &Url) -> Result<bool> {
            Ok(true)
        }
    }

    fn prober_with(
        strategy: ProbeStrategy,
        packages: &[&'static str],
        schemes: &[&'static str],
    ) -> InstallationProber {
        let registry = CapabilityRegistry::new(vec![
            ExternalApp::new("com.tencent.mm", "WeChat").with_scheme("weixin"),
            ExternalApp::new("com.whatsapp", "WhatsApp").with_scheme("whatsapp"),
            ExternalApp::new("com.locked.app", "Locked"),
            ExternalApp::new("jp.naver.line.android", "LINE").with_scheme("line"),
        ]);
        InstallationProber::new(
            Arc::new(registry),
            Arc::new(MockPackages {
                installed: packages.iter().copied().collect(),
            }),
            Arc::new(MockLauncher {
                schemes: schemes.iter().copied().collect(),
            }),
            strategy,
        )
    }

    fn prober(strategy: ProbeStrategy) -> InstallationProber {
        prober_with(
            strategy,
            &["com.tencent.mm", "jp.naver.line.android"],
            &["whatsapp", "line"],
        )
    }

    #[tokio::test]
    async fn test_package_metadata_strategy() {
        let prober = prober(ProbeStrategy::PackageMetadata);
        assert!(prober.is_installed("com.tencent.mm").await);
        assert!(!prober.is_installed("com.whatsapp").await);
        assert!(!prober.is_installed("com.locked.app").await);
        assert!(!prober.is_installed("").await);
        assert_eq!(
            prober.installed_apps().await,
            vec!["com.tencent.mm", "jp.naver.line.android"]
        );
        assert_eq!(
            prober.version_of("com.tencent.mm").await.as_deref(),
            Some("1.0")
        );
        assert_eq!(prober.version_of("com.whatsapp").await, None);
    }

    #[tokio::test]
    async fn test_url_scheme_strategy() {
        let prober = prober(ProbeStrategy::UrlScheme);
        assert!(!prober.is_installed("com.tencent.mm").await);
        assert!(prober.is_installed("com.whatsapp").await);
        assert!(!prober.is_installed("com.locked.app").await);
        assert!(!prober.is_installed("not.in.registry").await);
        assert_eq!(
            prober.installed_apps().await,
            vec!["com.whatsapp", "jp.naver.line.android"]
        );
        assert_eq!(
            prober.version_of("com.whatsapp").await.as_deref(),
            Some(SCHEME_ONLY_VERSION)
        );
    }

    #[tokio::test]
    async fn test_auto_behaves_like_package_metadata() {
        let prober = prober(ProbeStrategy::Auto);
        assert!(prober.is_installed("com.tencent.mm").await);
        assert!(!prober.is_installed("com.whatsapp").await);
    }

    #[tokio::test]
    async fn test_protocol_target_needs_scheme_handler_under_every_strategy() {
        for strategy in [
            ProbeStrategy::PackageMetadata,
            ProbeStrategy::Auto,
            ProbeStrategy::UrlScheme,
        ] {
            // Package record present, no weixin handler.
            let prober = prober_with(strategy, &["com.tencent.mm"], &[]);
            assert!(!prober.is_protocol_target_installed().await, "{strategy:?}");

            // Handler present, no package record.
            let prober = prober_with(strategy, &[], &["weixin"]);
            assert!(prober.is_protocol_target_installed().await, "{strategy:?}");
        }
    }
}
