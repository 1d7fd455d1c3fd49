use serde::{Deserialize, Serialize};

/// An external application that can receive a shared GIF.
///
/// 可以接收 GIF 分享的外部应用。
///
/// Entries are defined at build time and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalApp {
    /// Platform package / bundle identifier, e.g. `com.tencent.mm`.
    ///
    /// 平台包名 / Bundle 标识符。
    pub identifier: String,
    /// Human-readable name.
    ///
    /// 可读名称。
    pub display_name: String,
    /// Capability scheme registered by the application (without `://`).
    ///
    /// Used when installation has to be inferred from URL handler
    /// registration instead of package metadata.
    ///
    /// 应用注册的 URL scheme，在无法查询包元数据的平台上用于推断安装状态。
    pub url_scheme: Option<String>,
}

impl ExternalApp {
    pub fn new(identifier: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            display_name: display_name.into(),
            url_scheme: None,
        }
    }

    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.url_scheme = Some(scheme.into());
        self
    }

    /// Bare probe URI for the application's scheme (`<scheme>://`).
    pub fn probe_uri(&self) -> Option<String> {
        self.url_scheme.as_ref().map(|scheme| format!("{scheme}://"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_uri_uses_scheme() {
        let app = ExternalApp::new("com.tencent.mm", "WeChat").with_scheme("weixin");
        assert_eq!(app.probe_uri().as_deref(), Some("weixin://"));
    }

    #[test]
    fn test_probe_uri_absent_without_scheme() {
        let app = ExternalApp::new("com.example.viewer", "Viewer");
        assert!(app.probe_uri().is_none());
    }
}
