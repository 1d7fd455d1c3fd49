//! Sweeps staged assets older than the configured TTL.
//! 清理过期的暂存文件。

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use gs_core::ports::ClockPort;
use tokio::fs;
use tracing::{debug, warn};

use super::fs_stager::{expiry_cutoff_ms, FsAssetStager};

pub struct StagingJanitor {
    root: PathBuf,
    clock: Arc<dyn ClockPort>,
    ttl: Duration,
    stager: Option<Arc<FsAssetStager>>,
}

impl StagingJanitor {
    pub fn new(root: PathBuf, clock: Arc<dyn ClockPort>, ttl: Duration) -> Self {
        Self {
            root,
            clock,
            ttl,
            stager: None,
        }
    }

    /// Also retire the live grants of `stager` on every sweep.
    pub fn with_stager(mut self, stager: Arc<FsAssetStager>) -> Self {
        self.stager = Some(stager);
        self
    }

    /// Remove expired staged files. Returns the number removed.
    ///
    /// Grants tracked by the attached stager go first, together with their
    /// files. The directory scan then catches files no grant knows about,
    /// such as leftovers of an earlier process. Individual failures are
    /// logged and skipped; a missing staging directory means there is nothing
    /// to sweep.
    pub async fn run_once(&self) -> Result<usize> {
        let cutoff_ms = expiry_cutoff_ms(self.clock.now_ms(), self.ttl);
        let mut removed = match &self.stager {
            Some(stager) => stager.sweep_expired(cutoff_ms).await,
            None => 0,
        };

        let mut dir = match fs::read_dir(&self.root).await {
            Ok(dir) => dir,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(removed),
            Err(err) => return Err(err.into()),
        };

        while let Some(entry) = dir.next_entry().await? {
            let path = entry.path();
            let modified_ms = match entry.metadata().await.and_then(|m| m.modified()) {
                Ok(modified) => chrono::DateTime::<chrono::Utc>::from(modified).timestamp_millis(),
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "Cannot stat staged file");
                    continue;
                }
            };

            if modified_ms > cutoff_ms {
                continue;
            }

            match fs::remove_file(&path).await {
                Ok(()) => {
                    debug!(path = %path.display(), "Expired staged file removed");
                    removed += 1;
                }
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "Failed to delete expired staged file");
                }
            }
        }

        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    struct FixedClock {
        now_ms: i64,
    }

    impl ClockPort for FixedClock {
        fn now_ms(&self) -> i64 {
            self.now_ms
        }
    }

    #[tokio::test]
    async fn test_missing_directory_sweeps_nothing() {
        let dir = TempDir::new().unwrap();
        let janitor = StagingJanitor::new(
            dir.path().join("absent"),
            Arc::new(FixedClock { now_ms: 0 }),
            Duration::from_secs(60),
        );
        assert_eq!(janitor.run_once().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_removes_only_expired_files() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("share_old.gif"), b"old").unwrap();

        let now_ms = chrono::Utc::now().timestamp_millis();

        // Clock one hour ahead: the fresh file is past a 60 s TTL.
        let janitor = StagingJanitor::new(
            dir.path().to_path_buf(),
            Arc::new(FixedClock {
                now_ms: now_ms + 3_600_000,
            }),
            Duration::from_secs(60),
        );
        assert_eq!(janitor.run_once().await.unwrap(), 1);
        assert!(!dir.path().join("share_old.gif").exists());

        std::fs::write(dir.path().join("share_new.gif"), b"new").unwrap();
        let janitor = StagingJanitor::new(
            dir.path().to_path_buf(),
            Arc::new(FixedClock { now_ms }),
            Duration::from_secs(3_600),
        );
        assert_eq!(janitor.run_once().await.unwrap(), 0);
        assert!(dir.path().join("share_new.gif").exists());
    }

    #[tokio::test]
    async fn test_oversized_ttl_keeps_everything() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("share_a.gif"), b"a").unwrap();

        let janitor = StagingJanitor::new(
            dir.path().to_path_buf(),
            Arc::new(FixedClock { now_ms: i64::MIN + 1 }),
            Duration::from_secs(u64::MAX),
        );
        assert_eq!(janitor.run_once().await.unwrap(), 0);
        assert!(dir.path().join("share_a.gif").exists());
    }
}
