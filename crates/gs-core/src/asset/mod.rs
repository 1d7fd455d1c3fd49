//! Staged assets and the locators other processes use to read them.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::ids::StagedAssetId;

/// MIME type newtype.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MimeType(pub String);

impl MimeType {
    pub const IMAGE_GIF: &'static str = "image/gif";

    pub fn image_gif() -> Self {
        Self(Self::IMAGE_GIF.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_gif(&self) -> bool {
        self.0.eq_ignore_ascii_case(Self::IMAGE_GIF)
    }
}

impl std::fmt::Display for MimeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Capability-scoped locator for a staged asset.
///
/// 暂存资源的受控定位符（类似 content:// URI），而不是本地路径。
///
/// A handle is only dereferenceable by recipients that were explicitly
/// granted read access by the stager that issued it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetHandle(String);

impl AssetHandle {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AssetHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Asset bytes written to the staging area for one share request.
///
/// Owned by the stager until handed to a dispatcher. Never reused across
/// requests.
#[derive(Debug, Clone)]
pub struct StagedAsset {
    pub id: StagedAssetId,
    pub bytes: Bytes,
    pub handle: AssetHandle,
    pub mime_type: MimeType,
    /// Creation time in epoch milliseconds.
    pub created_at_ms: i64,
}

impl StagedAsset {
    pub fn size_bytes(&self) -> usize {
        self.bytes.len()
    }
}
