//! # Configuration DTO / 配置数据
//!
//! Pure data: TOML → DTO mapping and production defaults. Values read from
//! the file are taken as facts; nothing here validates them.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// How installation of a target is detected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeStrategy {
    /// Let the platform adapter decide.
    #[default]
    Auto,
    /// Query package/bundle metadata.
    PackageMetadata,
    /// Infer installation from a resolvable capability scheme.
    UrlScheme,
}

impl ProbeStrategy {
    pub fn parse(value: &str) -> Self {
        match value {
            "package_metadata" => ProbeStrategy::PackageMetadata,
            "url_scheme" => ProbeStrategy::UrlScheme,
            _ => ProbeStrategy::Auto,
        }
    }
}

/// Share configuration.
///
/// 分享配置。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareConfig {
    /// Directory staged assets are written to.
    pub staging_dir: PathBuf,
    /// Authority component of issued asset handles.
    pub provider_authority: String,
    /// Age after which staged assets are swept.
    pub staging_ttl_secs: u64,
    /// Thumbnail edge length in pixels.
    pub thumbnail_edge: u32,
    /// JPEG quality of thumbnails (1-100).
    pub thumbnail_quality: u8,
    /// Title of the system chooser.
    pub chooser_title: String,
    pub probe_strategy: ProbeStrategy,
}

pub const STAGING_DIR_NAME: &str = "shared_gifs";
pub const DEFAULT_AUTHORITY: &str = "gifshare.fileprovider";
pub const DEFAULT_STAGING_TTL_SECS: u64 = 60 * 60;
pub const DEFAULT_THUMBNAIL_EDGE: u32 = 100;
pub const DEFAULT_THUMBNAIL_QUALITY: u8 = 70;
pub const DEFAULT_CHOOSER_TITLE: &str = "Share GIF";

impl ShareConfig {
    /// Production defaults rooted at `cache_dir`.
    pub fn with_defaults(cache_dir: &Path) -> Self {
        Self {
            staging_dir: cache_dir.join(STAGING_DIR_NAME),
            provider_authority: DEFAULT_AUTHORITY.to_string(),
            staging_ttl_secs: DEFAULT_STAGING_TTL_SECS,
            thumbnail_edge: DEFAULT_THUMBNAIL_EDGE,
            thumbnail_quality: DEFAULT_THUMBNAIL_QUALITY,
            chooser_title: DEFAULT_CHOOSER_TITLE.to_string(),
            probe_strategy: ProbeStrategy::Auto,
        }
    }

    /// Overlay the values present in `toml_value`; absent keys keep their
    /// current value.
    pub fn apply_toml(mut self, toml_value: &toml::Value) -> Self {
        let get = |section: &str, key: &str| toml_value.get(section).and_then(|s| s.get(key));

        if let Some(dir) = get("staging", "dir").and_then(|v| v.as_str()) {
            self.staging_dir = PathBuf::from(dir);
        }
        if let Some(authority) = get("staging", "authority").and_then(|v| v.as_str()) {
            self.provider_authority = authority.to_string();
        }
        if let Some(ttl) = get("staging", "ttl_secs").and_then(|v| v.as_integer()) {
            self.staging_ttl_secs = ttl.max(0) as u64;
        }
        if let Some(edge) = get("thumbnail", "edge").and_then(|v| v.as_integer()) {
            self.thumbnail_edge = edge.clamp(0, u32::MAX as i64) as u32;
        }
        if let Some(quality) = get("thumbnail", "quality").and_then(|v| v.as_integer()) {
            self.thumbnail_quality = quality.clamp(0, u8::MAX as i64) as u8;
        }
        if let Some(title) = get("share", "chooser_title").and_then(|v| v.as_str()) {
            self.chooser_title = title.to_string();
        }
        if let Some(strategy) = get("probe", "strategy").and_then(|v| v.as_str()) {
            self.probe_strategy = ProbeStrategy::parse(strategy);
        }

        self
    }
}
