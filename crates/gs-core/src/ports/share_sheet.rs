use anyhow::Result;
use async_trait::async_trait;

use crate::share::ShareRequest;

/// Platform share sheet.
///
/// 系统分享面板端口。
#[async_trait]
pub trait ShareSheetPort: Send + Sync {
    /// Whether some receiver can handle `request` (type and target).
    fn can_resolve(&self, request: &ShareRequest) -> Result<bool>;

    /// Deliver `request` to its target.
    async fn present(&self, request: &ShareRequest) -> Result<()>;

    /// Present a chooser listing every capable receiver. Returns once the
    /// chooser is shown; the pick is not observable.
    async fn present_chooser(&self, request: &ShareRequest, title: &str) -> Result<()>;
}
