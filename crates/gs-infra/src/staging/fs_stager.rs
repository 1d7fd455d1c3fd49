use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use gs_core::asset::{AssetHandle, MimeType, StagedAsset};
use gs_core::ids::StagedAssetId;
use gs_core::ports::{AssetStagerPort, ClockPort};
use gs_core::share::StagingError;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

const STAGED_FILE_PREFIX: &str = "share_";
const STAGED_FILE_EXTENSION: &str = "gif";

struct Grant {
    path: PathBuf,
    created_at_ms: i64,
    recipients: HashSet<String>,
}

/// Start of the retention window: entries created at or before it are expired.
pub(crate) fn expiry_cutoff_ms(now_ms: i64, ttl: Duration) -> i64 {
    let ttl_ms = i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX);
    now_ms.saturating_sub(ttl_ms)
}

/// Filesystem stager issuing `content://<authority>/<dir>/<file>` handles.
///
/// Files are created owner-only. A handle resolves to its file only for
/// recipients granted read access, mirroring a file provider's per-URI
/// permission grants.
pub struct FsAssetStager {
    root: PathBuf,
    authority: String,
    clock: Arc<dyn ClockPort>,
    grants: Mutex<HashMap<AssetHandle, Grant>>,
}

impl FsAssetStager {
    pub fn new(root: PathBuf, authority: impl Into<String>, clock: Arc<dyn ClockPort>) -> Self {
        Self {
            root,
            authority: authority.into(),
            clock,
            grants: Mutex::new(HashMap::new()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn handle_for(&self, file_name: &str) -> AssetHandle {
        let dir = self
            .root
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("staged");
        AssetHandle::new(format!("content://{}/{}/{}", self.authority, dir, file_name))
    }

    fn lock_grants(&self) -> std::sync::MutexGuard<'_, HashMap<AssetHandle, Grant>> {
        // A poisoned map still holds consistent entries; keep serving them.
        self.grants.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Drop grants created at or before `cutoff_ms` and delete their files.
    ///
    /// Successful generic shares keep their asset for the receiver, so this is
    /// the only path that retires those grants. Returns the number retired.
    pub async fn sweep_expired(&self, cutoff_ms: i64) -> usize {
        let expired: Vec<(AssetHandle, PathBuf)> = {
            let mut grants = self.lock_grants();
            let handles: Vec<AssetHandle> = grants
                .iter()
                .filter(|(_, grant)| grant.created_at_ms <= cutoff_ms)
                .map(|(handle, _)| handle.clone())
                .collect();
            handles
                .into_iter()
                .filter_map(|handle| grants.remove(&handle).map(|g| (handle, g.path)))
                .collect()
        };

        for (handle, path) in &expired {
            match fs::remove_file(path).await {
                Ok(()) => debug!(handle = %handle, "Expired staged asset retired"),
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                    debug!(handle = %handle, "Expired grant had no file left");
                }
                Err(err) => {
                    warn!(handle = %handle, error = %err, "Failed to delete expired staged asset");
                }
            }
        }
        expired.len()
    }

    /// Number of handles currently tracked.
    pub fn tracked(&self) -> usize {
        self.lock_grants().len()
    }

    async fn write_owner_only(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
        let mut options = fs::OpenOptions::new();
        options.write(true).create_new(true);
        #[cfg(unix)]
        options.mode(0o600);

        let mut file = options.open(path).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        Ok(())
    }
}

#[async_trait]
impl AssetStagerPort for FsAssetStager {
    async fn stage(&self, bytes: &[u8]) -> Result<StagedAsset, StagingError> {
        fs::create_dir_all(&self.root)
            .await
            .map_err(|source| StagingError::CreateDir {
                path: self.root.display().to_string(),
                source,
            })?;

        let id = StagedAssetId::new();
        let created_at_ms = self.clock.now_ms();
        let file_name = format!(
            "{STAGED_FILE_PREFIX}{created_at_ms}_{}.{STAGED_FILE_EXTENSION}",
            id.compact()
        );
        let path = self.root.join(&file_name);

        if let Err(source) = Self::write_owner_only(&path, bytes).await {
            // Partial files must not linger under a fresh name.
            let _ = fs::remove_file(&path).await;
            return Err(StagingError::Write {
                path: path.display().to_string(),
                source,
            });
        }

        let handle = self.handle_for(&file_name);
        self.lock_grants().insert(
            handle.clone(),
            Grant {
                path,
                created_at_ms,
                recipients: HashSet::new(),
            },
        );

        debug!(handle = %handle, size = bytes.len(), "Asset staged");

        Ok(StagedAsset {
            id,
            bytes: Bytes::copy_from_slice(bytes),
            handle,
            mime_type: MimeType::image_gif(),
            created_at_ms,
        })
    }

    fn grant_read(&self, handle: &AssetHandle, recipient: &str) -> Result<(), StagingError> {
        let mut grants = self.lock_grants();
        let grant = grants
            .get_mut(handle)
            .ok_or_else(|| StagingError::UnknownHandle(handle.to_string()))?;
        grant.recipients.insert(recipient.to_string());
        debug!(handle = %handle, recipient, "Read access granted");
        Ok(())
    }

    fn resolve(&self, handle: &AssetHandle, recipient: &str) -> Result<PathBuf, StagingError> {
        let mut grants = self.lock_grants();
        let grant = grants
            .get(handle)
            .ok_or_else(|| StagingError::UnknownHandle(handle.to_string()))?;
        if !grant.path.is_file() {
            // Removed behind our back (external cleanup, janitor of another process).
            grants.remove(handle);
            debug!(handle = %handle, "Pruned grant whose file is gone");
            return Err(StagingError::UnknownHandle(handle.to_string()));
        }
        if !grant.recipients.contains(recipient) {
            return Err(StagingError::AccessDenied {
                handle: handle.to_string(),
                recipient: recipient.to_string(),
            });
        }
        Ok(grant.path.clone())
    }

    async fn release(&self, handle: &AssetHandle) {
        let removed = self.lock_grants().remove(handle);
        if let Some(grant) = removed {
            if let Err(err) = fs::remove_file(&grant.path).await {
                warn!(handle = %handle, error = %err, "Failed to delete staged asset");
            }
        }
    }
}
