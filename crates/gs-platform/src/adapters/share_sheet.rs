//! Desktop share sheet.
//!
//! Targeted shares launch the receiver's desktop entry with the staged file
//! (`gtk-launch <id> <file>`). The open chooser is delegated to `xdg-open`,
//! which hands the file to the desktop's handler selection for `image/gif`.

use std::path::Path;
use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use gs_core::ports::{AssetStagerPort, ShareSheetPort};
use gs_core::share::ShareRequest;
use tokio::process::Command;
use tracing::{debug, info};

use crate::desktop_entry::DesktopEntryIndex;

/// Recipient name used for read grants handed to the desktop chooser.
pub const CHOOSER_RECIPIENT: &str = "xdg-open";

pub struct DesktopShareSheet {
    index: DesktopEntryIndex,
    stager: Arc<dyn AssetStagerPort>,
}

impl DesktopShareSheet {
    pub fn new(index: DesktopEntryIndex, stager: Arc<dyn AssetStagerPort>) -> Self {
        Self { index, stager }
    }

    fn readable_path(&self, request: &ShareRequest, recipient: &str) -> Result<std::path::PathBuf> {
        if request.grant_read {
            self.stager.grant_read(&request.stream, recipient)?;
        }
        Ok(self.stager.resolve(&request.stream, recipient)?)
    }

    async fn spawn(program: &str, args: &[&str], path: &Path) -> Result<()> {
        let mut cmd = Command::new(program);
        cmd.args(args).arg(path);
        // Detached receivers outlive this request.
        let child = cmd
            .spawn()
            .with_context(|| format!("spawn {program}"))?;
        debug!(program, pid = child.id(), "Receiver launched");
        Ok(())
    }
}

#[async_trait]
impl ShareSheetPort for DesktopShareSheet {
    fn can_resolve(&self, request: &ShareRequest) -> Result<bool> {
        let mime = request.mime_type.as_str();
        let resolvable = match &request.target {
            Some(target) => self
                .index
                .find(target)
                .map(|entry| entry.accepts(mime))
                .unwrap_or(false),
            None => !self.index.entries_for_mime(mime).is_empty(),
        };
        Ok(resolvable)
    }

    async fn present(&self, request: &ShareRequest) -> Result<()> {
        let target = request
            .target
            .as_deref()
            .ok_or_else(|| anyhow!("targeted share without a target"))?;
        let path = self.readable_path(request, target)?;
        Self::spawn("gtk-launch", &[target], &path).await?;
        info!(target, handle = %request.stream, "Share delivered to target");
        Ok(())
    }

    async fn present_chooser(&self, request: &ShareRequest, title: &str) -> Result<()> {
        if request.target.is_some() {
            bail!("chooser request must not carry a target");
        }
        let path = self.readable_path(request, CHOOSER_RECIPIENT)?;
        Self::spawn("xdg-open", &[], &path).await?;
        info!(title, handle = %request.stream, "Chooser presented");
        Ok(())
    }
}
