use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use clipboard_rs::{Clipboard, ClipboardContext};
use gs_core::ports::PasteboardPort;
use tokio::task::spawn_blocking;
use tracing::debug;

fn map_clipboard_err<T>(
    result: std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>,
) -> Result<T> {
    result.map_err(|e| anyhow!(e))
}

/// System clipboard used as the cross-application transfer medium.
///
/// clipboard-rs 调用是同步的（X11 往返等），统一放到阻塞线程池执行。
pub struct SystemPasteboard {
    inner: Arc<Mutex<ClipboardContext>>,
}

impl SystemPasteboard {
    pub fn new() -> Result<Self> {
        let context = map_clipboard_err(ClipboardContext::new())?;
        Ok(Self {
            inner: Arc::new(Mutex::new(context)),
        })
    }
}

fn lock(
    inner: &Arc<Mutex<ClipboardContext>>,
) -> Result<std::sync::MutexGuard<'_, ClipboardContext>> {
    inner
        .lock()
        .map_err(|_| anyhow!("clipboard context lock poisoned"))
}

#[async_trait]
impl PasteboardPort for SystemPasteboard {
    async fn write_item(&self, type_tag: &str, bytes: Vec<u8>) -> Result<()> {
        let inner = self.inner.clone();
        let tag = type_tag.to_string();
        let size = bytes.len();
        spawn_blocking(move || -> Result<()> {
            let ctx = lock(&inner)?;
            map_clipboard_err(ctx.set_buffer(&tag, bytes))
        })
        .await
        .map_err(|e| anyhow!("clipboard write task failed: {e}"))??;
        debug!(type_tag, size, "Pasteboard item written");
        Ok(())
    }

    async fn read_item(&self, type_tag: &str) -> Result<Option<Vec<u8>>> {
        let inner = self.inner.clone();
        let tag = type_tag.to_string();
        spawn_blocking(move || -> Result<Option<Vec<u8>>> {
            let ctx = lock(&inner)?;
            let available = map_clipboard_err(ctx.available_formats())?;
            if !available.iter().any(|f| *f == tag) {
                return Ok(None);
            }
            Ok(Some(map_clipboard_err(ctx.get_buffer(&tag))?))
        })
        .await
        .map_err(|e| anyhow!("clipboard read task failed: {e}"))?
    }
}
