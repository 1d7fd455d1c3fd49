use std::path::PathBuf;

use async_trait::async_trait;

use crate::asset::{AssetHandle, StagedAsset};
use crate::share::StagingError;

/// Writes assets to a transient, access-controlled location.
///
/// 资源暂存端口：生成其他进程可解引用的受控句柄。
///
/// # Behavior / 行为
/// - Every `stage` call produces a fresh handle.
/// - Handles are readable only by recipients granted through `grant_read`.
/// - `release` is best-effort and never fails a share.
#[async_trait]
pub trait AssetStagerPort: Send + Sync {
    async fn stage(&self, bytes: &[u8]) -> Result<StagedAsset, StagingError>;

    fn grant_read(&self, handle: &AssetHandle, recipient: &str) -> Result<(), StagingError>;

    /// Resolve `handle` for `recipient`. Fails unless read was granted.
    fn resolve(&self, handle: &AssetHandle, recipient: &str) -> Result<PathBuf, StagingError>;

    async fn release(&self, handle: &AssetHandle);
}
