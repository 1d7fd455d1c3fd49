use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure kind reported to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShareErrorKind {
    InvalidArgs,
    #[serde(rename = "STAGING_ERROR")]
    Staging,
    AppNotAvailable,
    AppNotInstalled,
    #[serde(rename = "SERIALIZATION_ERROR")]
    Serialization,
    #[serde(rename = "SHARE_ERROR")]
    Share,
}

impl ShareErrorKind {
    /// Stable code the host sees.
    pub fn code(self) -> &'static str {
        match self {
            ShareErrorKind::InvalidArgs => "INVALID_ARGS",
            ShareErrorKind::Staging => "STAGING_ERROR",
            ShareErrorKind::AppNotAvailable => "APP_NOT_AVAILABLE",
            ShareErrorKind::AppNotInstalled => "APP_NOT_INSTALLED",
            ShareErrorKind::Serialization => "SERIALIZATION_ERROR",
            ShareErrorKind::Share => "SHARE_ERROR",
        }
    }
}

impl std::fmt::Display for ShareErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Share failure taxonomy.
///
/// 分享失败分类。所有错误都以带标签的结果返回给调用方，不会使进程崩溃。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShareError {
    #[error("Missing required arguments: {0}")]
    InvalidArgs(String),

    #[error("Failed to stage asset: {0}")]
    Staging(String),

    #[error("App is not available: {0}")]
    AppNotAvailable(String),

    #[error("App is not installed: {0}")]
    AppNotInstalled(String),

    #[error("Failed to serialize data: {0}")]
    Serialization(String),

    #[error("Failed to share: {0}")]
    Share(String),
}

impl ShareError {
    pub fn kind(&self) -> ShareErrorKind {
        match self {
            ShareError::InvalidArgs(_) => ShareErrorKind::InvalidArgs,
            ShareError::Staging(_) => ShareErrorKind::Staging,
            ShareError::AppNotAvailable(_) => ShareErrorKind::AppNotAvailable,
            ShareError::AppNotInstalled(_) => ShareErrorKind::AppNotInstalled,
            ShareError::Serialization(_) => ShareErrorKind::Serialization,
            ShareError::Share(_) => ShareErrorKind::Share,
        }
    }
}

impl From<StagingError> for ShareError {
    fn from(err: StagingError) -> Self {
        ShareError::Staging(err.to_string())
    }
}

/// Errors raised by an asset stager.
#[derive(Debug, Error)]
pub enum StagingError {
    #[error("cannot create staging directory {path}: {source}")]
    CreateDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write staged asset {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("unknown asset handle: {0}")]
    UnknownHandle(String),

    #[error("{recipient} has no read grant for {handle}")]
    AccessDenied { handle: String, recipient: String },
}
