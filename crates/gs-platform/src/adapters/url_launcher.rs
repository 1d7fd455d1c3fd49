//! Capability-scheme resolution and activation through the desktop's URL
//! handler registry.
//!
//! - **Linux**: `xdg-mime query default x-scheme-handler/<scheme>` /
//!   `xdg-open`
//! - **Windows**: `HKCR\<scheme>` with a `URL Protocol` value / `start`
//! - **macOS**: activation through `open`; handler lookup is not available
//!   without LaunchServices bindings, so resolution reports `false`.

use anyhow::{Context, Result};
use async_trait::async_trait;
use gs_core::ports::UrlLauncherPort;
use tokio::process::Command;
use tracing::{debug, info};
use url::Url;

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemUrlLauncher;

impl SystemUrlLauncher {
    pub fn new() -> Self {
        Self
    }

    #[cfg(target_os = "linux")]
    async fn has_scheme_handler(scheme: &str) -> bool {
        Command::new("xdg-mime")
            .args(["query", "default", &format!("x-scheme-handler/{scheme}")])
            .output()
            .await
            .map(|out| out.status.success() && !String::from_utf8_lossy(&out.stdout).trim().is_empty())
            .unwrap_or(false)
    }

    #[cfg(target_os = "windows")]
    async fn has_scheme_handler(scheme: &str) -> bool {
        Command::new("reg")
            .args(["query", &format!("HKCR\\{scheme}"), "/v", "URL Protocol"])
            .output()
            .await
            .map(|out| out.status.success())
            .unwrap_or(false)
    }

    #[cfg(not(any(target_os = "linux", target_os = "windows")))]
    async fn has_scheme_handler(_scheme: &str) -> bool {
        false
    }

    fn open_command(url: &Url) -> Command {
        #[cfg(target_os = "windows")]
        {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", "start", ""]).arg(url.as_str());
            cmd
        }
        #[cfg(target_os = "macos")]
        {
            let mut cmd = Command::new("open");
            cmd.arg(url.as_str());
            cmd
        }
        #[cfg(not(any(target_os = "windows", target_os = "macos")))]
        {
            let mut cmd = Command::new("xdg-open");
            cmd.arg(url.as_str());
            cmd
        }
    }
}

#[async_trait]
impl UrlLauncherPort for SystemUrlLauncher {
    async fn can_open(&self, url: &Url) -> bool {
        let resolvable = Self::has_scheme_handler(url.scheme()).await;
        debug!(scheme = url.scheme(), resolvable, "Scheme handler lookup");
        resolvable
    }

    async fn open(&self, url: &Url) -> Result<bool> {
        let status = Self::open_command(url)
            .status()
            .await
            .with_context(|| format!("launch handler for {}", url.scheme()))?;
        info!(scheme = url.scheme(), accepted = status.success(), "Activation requested");
        Ok(status.success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(flavor = "current_thread")]
    async fn test_unregistered_scheme_is_not_resolvable() {
        let launcher = SystemUrlLauncher::new();
        let url = Url::parse("gifshare-unregistered-scheme://share").unwrap();

        assert!(!launcher.can_open(&url).await);
    }
}
