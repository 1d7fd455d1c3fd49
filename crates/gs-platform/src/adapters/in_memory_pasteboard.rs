use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use gs_core::ports::PasteboardPort;

/// In-memory pasteboard.
///
/// 内存版剪贴板：单一全局内容，写入会替换全部条目，与系统剪贴板语义一致。
#[derive(Default)]
pub struct InMemoryPasteboard {
    state: Mutex<PasteboardState>,
}

#[derive(Default)]
struct PasteboardState {
    items: HashMap<String, Vec<u8>>,
    write_count: usize,
}

impl InMemoryPasteboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_count(&self) -> usize {
        self.state.lock().map(|s| s.write_count).unwrap_or_default()
    }
}

#[async_trait]
impl PasteboardPort for InMemoryPasteboard {
    async fn write_item(&self, type_tag: &str, bytes: Vec<u8>) -> Result<()> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| anyhow!("pasteboard lock poisoned"))?;
        state.items.clear();
        state.items.insert(type_tag.to_string(), bytes);
        state.write_count += 1;
        Ok(())
    }

    async fn read_item(&self, type_tag: &str) -> Result<Option<Vec<u8>>> {
        let state = self
            .state
            .lock()
            .map_err(|_| anyhow!("pasteboard lock poisoned"))?;
        Ok(state.items.get(type_tag).cloned())
    }
}
