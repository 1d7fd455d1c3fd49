//! # Configuration Loader / 配置加载器
//!
//! Reads the TOML file and overlays it on the production defaults rooted at
//! the cache directory. Values in the file are taken as they are.

use std::path::{Path, PathBuf};

use anyhow::Context;
use gs_core::config::ShareConfig;
use gs_core::ports::AppDirs;

/// File name looked up in the config directory when no path is given.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Load configuration from a TOML file
/// 从 TOML 文件加载配置
///
/// Keys missing from the file keep their default value.
///
/// # Errors / 错误
///
/// Returns error if the file cannot be read or is not valid TOML.
pub fn load_config(config_path: PathBuf, cache_dir: &Path) -> anyhow::Result<ShareConfig> {
    let content = std::fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    Ok(ShareConfig::with_defaults(cache_dir).apply_toml(&toml_value))
}

/// Configuration for this run.
///
/// An explicit path must exist. Without one, `<config dir>/config.toml` is
/// used when present and the defaults otherwise.
pub fn resolve_config(explicit: Option<PathBuf>, dirs: &AppDirs) -> anyhow::Result<ShareConfig> {
    if let Some(path) = explicit {
        return load_config(path, &dirs.app_cache_root);
    }

    let default_path = dirs.app_config_root.join(CONFIG_FILE_NAME);
    if default_path.is_file() {
        load_config(default_path, &dirs.app_cache_root)
    } else {
        Ok(ShareConfig::with_defaults(&dirs.app_cache_root))
    }
}
