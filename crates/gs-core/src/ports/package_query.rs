use anyhow::Result;

/// Metadata of an installed package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageInfo {
    pub identifier: String,
    pub version_name: Option<String>,
}

/// Installed-application metadata query.
///
/// 已安装应用元数据查询端口。
///
/// # Error semantics / 错误语义
/// Not found, permission denied and malformed identifiers are all reported
/// as `Err`. Callers collapse every error to "not installed".
pub trait PackageQueryPort: Send + Sync {
    fn package_info(&self, identifier: &str) -> Result<PackageInfo>;
}
