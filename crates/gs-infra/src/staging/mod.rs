//! Staging area for assets handed to other applications.
//! 供其他应用读取的资源暂存区。

mod fs_stager;
mod janitor;

pub use fs_stager::FsAssetStager;
pub use janitor::StagingJanitor;
