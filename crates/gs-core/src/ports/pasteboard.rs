use anyhow::Result;
use async_trait::async_trait;

/// System-wide pasteboard used as the transfer medium.
///
/// 系统剪贴板（跨应用传输介质）。单一全局槽位：调用方负责串行化写入。
#[async_trait]
pub trait PasteboardPort: Send + Sync {
    /// Replace the pasteboard content with `bytes` under `type_tag`.
    async fn write_item(&self, type_tag: &str, bytes: Vec<u8>) -> Result<()>;

    /// Read the bytes stored under `type_tag`, if any.
    async fn read_item(&self, type_tag: &str) -> Result<Option<Vec<u8>>>;
}
