use std::path::PathBuf;

/// Application directories resolved by the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppDirs {
    pub app_cache_root: PathBuf,
    pub app_config_root: PathBuf,
    pub logs_dir: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum AppDirsError {
    #[error("system cache directory unavailable")]
    CacheDirUnavailable,

    #[error("system config directory unavailable")]
    ConfigDirUnavailable,
}

pub trait AppDirsPort: Send + Sync {
    fn get_app_dirs(&self) -> Result<AppDirs, AppDirsError>;
}
