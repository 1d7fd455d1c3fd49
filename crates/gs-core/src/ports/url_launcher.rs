use anyhow::Result;
use async_trait::async_trait;
use url::Url;

/// Capability-scheme resolution and activation.
///
/// URL scheme 解析与激活端口。
#[async_trait]
pub trait UrlLauncherPort: Send + Sync {
    /// Whether a handler is registered for `url`.
    async fn can_open(&self, url: &Url) -> bool;

    /// Ask the environment to switch to the handler of `url`.
    ///
    /// The returned flag only reports whether the switch request was
    /// accepted, never whether the target processed anything.
    async fn open(&self, url: &Url) -> Result<bool>;
}
