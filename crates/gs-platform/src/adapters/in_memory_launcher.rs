use std::collections::HashSet;
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;
use gs_core::ports::UrlLauncherPort;
use url::Url;

/// In-memory URL launcher with a configurable set of registered schemes.
pub struct InMemoryUrlLauncher {
    schemes: Mutex<HashSet<String>>,
    accept_activation: bool,
    opened: Mutex<Vec<Url>>,
}

impl InMemoryUrlLauncher {
    pub fn new<I, S>(schemes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            schemes: Mutex::new(schemes.into_iter().map(Into::into).collect()),
            accept_activation: true,
            opened: Mutex::new(Vec::new()),
        }
    }

    /// Launcher whose activation requests resolve but are refused.
    pub fn refusing(mut self) -> Self {
        self.accept_activation = false;
        self
    }

    pub fn register(&self, scheme: &str) {
        if let Ok(mut schemes) = self.schemes.lock() {
            schemes.insert(scheme.to_string());
        }
    }

    pub fn unregister(&self, scheme: &str) {
        if let Ok(mut schemes) = self.schemes.lock() {
            schemes.remove(scheme);
        }
    }

    pub fn opened(&self) -> Vec<Url> {
        self.opened.lock().map(|o| o.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl UrlLauncherPort for InMemoryUrlLauncher {
    async fn can_open(&self, url: &Url) -> bool {
        self.schemes
            .lock()
            .map(|s| s.contains(url.scheme()))
            .unwrap_or(false)
    }

    async fn open(&self, url: &Url) -> Result<bool> {
        if !self.can_open(url).await {
            return Ok(false);
        }
        if let Ok(mut opened) = self.opened.lock() {
            opened.push(url.clone());
        }
        Ok(self.accept_activation)
    }
}
