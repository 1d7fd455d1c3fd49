use std::collections::HashSet;
use std::sync::Mutex;

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use gs_core::ports::ShareSheetPort;
use gs_core::share::ShareRequest;

/// In-memory share sheet with a fixed set of GIF-capable receivers.
#[derive(Default)]
pub struct InMemoryShareSheet {
    receivers: Mutex<HashSet<String>>,
    presented: Mutex<Vec<ShareRequest>>,
    chooser_titles: Mutex<Vec<String>>,
    fail_present: bool,
}

impl InMemoryShareSheet {
    pub fn new<I, S>(receivers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            receivers: Mutex::new(receivers.into_iter().map(Into::into).collect()),
            ..Default::default()
        }
    }

    /// Share sheet whose presentation step errors.
    pub fn failing(mut self) -> Self {
        self.fail_present = true;
        self
    }

    pub fn presented(&self) -> Vec<ShareRequest> {
        self.presented.lock().map(|p| p.clone()).unwrap_or_default()
    }

    pub fn chooser_titles(&self) -> Vec<String> {
        self.chooser_titles
            .lock()
            .map(|t| t.clone())
            .unwrap_or_default()
    }

    fn record(&self, request: &ShareRequest) -> Result<()> {
        self.presented
            .lock()
            .map_err(|_| anyhow!("share sheet lock poisoned"))?
            .push(request.clone());
        Ok(())
    }
}

#[async_trait]
impl ShareSheetPort for InMemoryShareSheet {
    fn can_resolve(&self, request: &ShareRequest) -> Result<bool> {
        if !request.mime_type.is_gif() {
            return Ok(false);
        }
        let receivers = self
            .receivers
            .lock()
            .map_err(|_| anyhow!("share sheet lock poisoned"))?;
        Ok(match &request.target {
            Some(target) => receivers.contains(target),
            None => !receivers.is_empty(),
        })
    }

    async fn present(&self, request: &ShareRequest) -> Result<()> {
        if self.fail_present {
            bail!("activity launch failed");
        }
        self.record(request)
    }

    async fn present_chooser(&self, request: &ShareRequest, title: &str) -> Result<()> {
        if self.fail_present {
            bail!("chooser launch failed");
        }
        self.chooser_titles
            .lock()
            .map_err(|_| anyhow!("share sheet lock poisoned"))?
            .push(title.to_string());
        self.record(request)
    }
}
