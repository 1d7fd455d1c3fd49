//! Protocol handoff: pasteboard message plus capability-scheme activation.
//!
//! 协议移交：先把消息写入系统剪贴板，再通过 URL scheme 唤起目标应用。
//!
//! Success only means the environment accepted the application switch. A
//! receiver that rejects the framed message internally is invisible here.

use std::sync::Arc;

use gs_core::handoff::{activation_uri, is_valid_app_id, HandoffMessage, PASTEBOARD_TYPE};
use gs_core::ports::{
    AssetStagerPort, HandoffCodecPort, PasteboardPort, ThumbnailPort, UrlLauncherPort,
};
use gs_core::share::ShareError;
use gs_core::{HandoffState, Scene};
use tracing::{debug, info, info_span, warn, Instrument};

use crate::transfer_gate::TransferGate;

/// Tracks one run through the handoff state machine.
struct HandoffProgress {
    state: HandoffState,
}

impl HandoffProgress {
    fn new() -> Self {
        Self {
            state: HandoffState::Idle,
        }
    }

    fn advance(&mut self, to: HandoffState) -> Result<(), ShareError> {
        self.state = self
            .state
            .transition(to)
            .map_err(|e| ShareError::Share(e.to_string()))?;
        debug!(state = ?self.state, "Handoff state advanced");
        Ok(())
    }

    fn fail(&mut self, err: ShareError) -> ShareError {
        let failed = HandoffState::Failed(err.kind());
        match self.state.transition(failed) {
            Ok(state) => self.state = state,
            Err(e) => warn!(error = %e, "Failure reported from terminal state"),
        }
        warn!(state = ?self.state, error = %err, "Protocol handoff failed");
        err
    }
}

pub struct ShareViaProtocol {
    stager: Arc<dyn AssetStagerPort>,
    thumbnails: Arc<dyn ThumbnailPort>,
    codec: Arc<dyn HandoffCodecPort>,
    pasteboard: Arc<dyn PasteboardPort>,
    launcher: Arc<dyn UrlLauncherPort>,
    gate: Arc<TransferGate>,
}

impl ShareViaProtocol {
    pub fn new(
        stager: Arc<dyn AssetStagerPort>,
        thumbnails: Arc<dyn ThumbnailPort>,
        codec: Arc<dyn HandoffCodecPort>,
        pasteboard: Arc<dyn PasteboardPort>,
        launcher: Arc<dyn UrlLauncherPort>,
        gate: Arc<TransferGate>,
    ) -> Self {
        Self {
            stager,
            thumbnails,
            codec,
            pasteboard,
            launcher,
            gate,
        }
    }

    /// Run one protocol handoff of `gif_data` to `app_id`.
    ///
    /// `scene` is the caller's selector (`"timeline"`, `"favorite"`);
    /// anything else, including `None`, sends to a chat session.
    pub async fn execute(
        &self,
        gif_data: &[u8],
        app_id: &str,
        scene: Option<&str>,
    ) -> Result<(), ShareError> {
        let span = info_span!(
            "usecase.share_via_protocol.execute",
            app_id,
            scene = scene.unwrap_or("chat"),
            size = gif_data.len()
        );

        async move {
            let mut progress = HandoffProgress::new();
            match self.run(&mut progress, gif_data, app_id, scene).await {
                Ok(()) => {
                    info!("Protocol handoff completed");
                    Ok(())
                }
                Err(err) => Err(progress.fail(err)),
            }
        }
        .instrument(span)
        .await
    }

    async fn run(
        &self,
        progress: &mut HandoffProgress,
        gif_data: &[u8],
        app_id: &str,
        scene: Option<&str>,
    ) -> Result<(), ShareError> {
        if gif_data.is_empty() {
            return Err(ShareError::InvalidArgs("gifData".to_string()));
        }
        let app_id = app_id.trim();
        if app_id.is_empty() {
            return Err(ShareError::InvalidArgs("appId".to_string()));
        }
        if !is_valid_app_id(app_id) {
            return Err(ShareError::InvalidArgs(format!(
                "appId {app_id}: reserved URL characters"
            )));
        }
        let scene = Scene::from_selector(scene);
        let activation = activation_uri(app_id)
            .map_err(|e| ShareError::InvalidArgs(format!("appId {app_id}: {e}")))?;
        progress.advance(HandoffState::Validated)?;

        let staged = self.stager.stage(gif_data).await?;
        progress.advance(HandoffState::Staged)?;

        let result = self
            .handoff(progress, staged.bytes.to_vec(), app_id, scene, &activation)
            .await;

        // The message carries its own copy of the bytes.
        self.stager.release(&staged.handle).await;
        result
    }

    async fn handoff(
        &self,
        progress: &mut HandoffProgress,
        file_data: Vec<u8>,
        app_id: &str,
        scene: Scene,
        activation: &url::Url,
    ) -> Result<(), ShareError> {
        let thumb_data = self.derive_thumbnail(&file_data).await;
        progress.advance(HandoffState::ThumbnailDerived)?;

        let message = HandoffMessage::gif(file_data, thumb_data, scene);
        let encoded = self
            .codec
            .encode(app_id, &message)
            .map_err(|e| ShareError::Serialization(e.to_string()))?;
        debug!(
            encoded_len = encoded.len(),
            thumb_len = message.thumb_data.len(),
            scene = %scene,
            "Handoff message encoded"
        );
        progress.advance(HandoffState::Encoded)?;

        // Held until the activation request returns.
        let _permit = self.gate.enter().await;

        self.pasteboard
            .write_item(PASTEBOARD_TYPE, encoded)
            .await
            .map_err(|e| ShareError::Share(format!("pasteboard write failed: {e}")))?;
        progress.advance(HandoffState::Transferred)?;

        if !self.launcher.can_open(activation).await {
            return Err(ShareError::AppNotInstalled(format!(
                "no handler for {}",
                activation.scheme()
            )));
        }

        progress.advance(HandoffState::Activated)?;
        let accepted = self
            .launcher
            .open(activation)
            .await
            .map_err(|e| ShareError::Share(e.to_string()))?;
        if !accepted {
            return Err(ShareError::Share(
                "application switch was refused".to_string(),
            ));
        }

        progress.advance(HandoffState::Completed)?;
        Ok(())
    }

    async fn derive_thumbnail(&self, file_data: &[u8]) -> Vec<u8> {
        let thumbnails = self.thumbnails.clone();
        let bytes = file_data.to_vec();
        match tokio::task::spawn_blocking(move || thumbnails.derive(&bytes)).await {
            Ok(thumb) => {
                if thumb.is_empty() {
                    info!("No thumbnail derived, sending empty thumbData");
                }
                thumb
            }
            Err(err) => {
                warn!(error = %err, "Thumbnail task failed, sending empty thumbData");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{anyhow, bail, Result};
    use async_trait::async_trait;
    use gs_core::asset::{AssetHandle, MimeType, StagedAsset};
    use gs_core::ids::StagedAssetId;
    use gs_core::share::{ShareErrorKind, StagingError};
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use url::Url;

    #[derive(Default)]
    struct FakeStager {
        released: AtomicUsize,
    }

    #[async_trait]
    impl AssetStagerPort for FakeStager {
        async fn stage(&self, bytes: &[u8]) -> Result<StagedAsset, StagingError> {
            Ok(StagedAsset {
                id: StagedAssetId::new(),
                bytes: bytes.to_vec().into(),
                handle: AssetHandle::new("content://test/shared_gifs/share_0.gif"),
                mime_type: MimeType::image_gif(),
                created_at_ms: 0,
            })
        }

        fn grant_read(&self, _handle: &AssetHandle, _recipient: &str) -> Result<(), StagingError> {
            Ok(())
        }

        fn resolve(&self, handle: &AssetHandle, _recipient: &str) -> Result<PathBuf, StagingError> {
            Err(StagingError::UnknownHandle(handle.to_string()))
        }

        async fn release(&self, _handle: &AssetHandle) {
            self.released.fetch_add(1, Ordering::SeqCst);
        }
    }

    struct FixedThumbnail(Vec<u8>);

    impl ThumbnailPort for FixedThumbnail {
        fn derive(&self, _image_bytes: &[u8]) -> Vec<u8> {
            self.0.clone()
        }
    }

    /// Records what was encoded instead of producing a real plist.
    #[derive(Default)]
    struct RecordingCodec {
        encoded: Mutex<Vec<(String, HandoffMessage)>>,
        fail: bool,
    }

    impl HandoffCodecPort for RecordingCodec {
        fn encode(&self, app_id: &str, message: &HandoffMessage) -> Result<Vec<u8>> {
            if self.fail {
                bail!("unsupported value");
            }
            self.encoded
                .lock()
                .unwrap()
                .push((app_id.to_string(), message.clone()));
            Ok(app_id.as_bytes().to_vec())
        }

        fn decode(&self, _bytes: &[u8]) -> Result<(String, HandoffMessage)> {
            Err(anyhow!("not used"))
        }
    }

    #[derive(Default)]
    struct FakePasteboard {
        writes: Mutex<Vec<(String, Vec<u8>)>>,
    }

    #[async_trait]
    impl PasteboardPort for FakePasteboard {
        async fn write_item(&self, type_tag: &str, bytes: Vec<u8>) -> Result<()> {
            self.writes
                .lock()
                .unwrap()
                .push((type_tag.to_string(), bytes));
            Ok(())
        }

        async fn read_item(&self, type_tag: &str) -> Result<Option<Vec<u8>>> {
            Ok(self
                .writes
                .lock()
                .unwrap()
                .iter()
                .rev()
                .find(|(tag, _)| tag == type_tag)
                .map(|(_, bytes)| bytes.clone()))
        }
    }

    struct FakeLauncher {
        handler: bool,
        accept: bool,
        opened: Mutex<Vec<Url>>,
    }

    impl FakeLauncher {
        fn new(handler: bool, accept: bool) -> Self {
            Self {
                handler,
                accept,
                opened: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl UrlLauncherPort for FakeLauncher {
        async fn can_open(&self, _url: &Url) -> bool {
            self.handler
        }

        async fn open(&self, url: &Url) -> Result<bool> {
            self.opened.lock().unwrap().push(url.clone());
            Ok(self.accept)
        }
    }

    struct Harness {
        stager: Arc<FakeStager>,
        codec: Arc<RecordingCodec>,
        pasteboard: Arc<FakePasteboard>,
        launcher: Arc<FakeLauncher>,
        usecase: ShareViaProtocol,
    }

    fn harness(codec: RecordingCodec, thumb: Vec<u8>, launcher: FakeLauncher) -> Harness {
        let stager = Arc::new(FakeStager::default());
        let codec = Arc::new(codec);
        let pasteboard = Arc::new(FakePasteboard::default());
        let launcher = Arc::new(launcher);
        let usecase = ShareViaProtocol::new(
            stager.clone(),
            Arc::new(FixedThumbnail(thumb)),
            codec.clone(),
            pasteboard.clone(),
            launcher.clone(),
            Arc::new(TransferGate::new()),
        );
        Harness {
            stager,
            codec,
            pasteboard,
            launcher,
            usecase,
        }
    }

    #[tokio::test]
    async fn test_handoff_writes_pasteboard_then_activates() {
        let h = harness(
            RecordingCodec::default(),
            vec![0xFF, 0xD8],
            FakeLauncher::new(true, true),
        );

        h.usecase
            .execute(b"GIF89a-data", "wx1234", Some("timeline"))
            .await
            .unwrap();

        let encoded = h.codec.encoded.lock().unwrap();
        assert_eq!(encoded.len(), 1);
        let (key, message) = &encoded[0];
        assert_eq!(key, "wx1234");
        assert_eq!(message.scene, "1");
        assert_eq!(message.file_data, b"GIF89a-data");
        assert_eq!(message.thumb_data, vec![0xFF, 0xD8]);

        let writes = h.pasteboard.writes.lock().unwrap();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].0, "content");

        let opened = h.launcher.opened.lock().unwrap();
        assert_eq!(opened[0].as_str(), "weixin://app/wx1234/sendreq/?");
        assert_eq!(h.stager.released.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_empty_thumbnail_does_not_block_handoff() {
        let h = harness(RecordingCodec::default(), Vec::new(), FakeLauncher::new(true, true));

        h.usecase.execute(b"not a gif", "wx1234", None).await.unwrap();

        let encoded = h.codec.encoded.lock().unwrap();
        assert!(encoded[0].1.thumb_data.is_empty());
        assert_eq!(encoded[0].1.scene, "0");
    }

    #[tokio::test]
    async fn test_unknown_scene_sends_to_chat() {
        let h = harness(RecordingCodec::default(), Vec::new(), FakeLauncher::new(true, true));

        h.usecase
            .execute(b"GIF89a", "wx1234", Some("moments"))
            .await
            .unwrap();

        assert_eq!(h.codec.encoded.lock().unwrap()[0].1.scene, "0");
    }

    #[tokio::test]
    async fn test_missing_inputs_fail_before_staging() {
        let h = harness(RecordingCodec::default(), Vec::new(), FakeLauncher::new(true, true));

        let err = h.usecase.execute(&[], "wx1234", None).await.unwrap_err();
        assert_eq!(err.kind(), ShareErrorKind::InvalidArgs);

        let err = h.usecase.execute(b"GIF89a", "", None).await.unwrap_err();
        assert_eq!(err, ShareError::InvalidArgs("appId".to_string()));

        assert!(h.pasteboard.writes.lock().unwrap().is_empty());
        assert_eq!(h.stager.released.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_app_id_with_url_delimiters_is_rejected() {
        let h = harness(RecordingCodec::default(), Vec::new(), FakeLauncher::new(true, true));

        for app_id in ["wx1/../evil", "wx1?scene=1", "wx1#x"] {
            let err = h.usecase.execute(b"GIF89a", app_id, None).await.unwrap_err();
            assert_eq!(err.kind(), ShareErrorKind::InvalidArgs, "{app_id}");
        }

        assert!(h.codec.encoded.lock().unwrap().is_empty());
        assert!(h.pasteboard.writes.lock().unwrap().is_empty());
        assert!(h.launcher.opened.lock().unwrap().is_empty());
        assert_eq!(h.stager.released.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_serialization_failure_never_touches_pasteboard() {
        let codec = RecordingCodec {
            fail: true,
            ..Default::default()
        };
        let h = harness(codec, Vec::new(), FakeLauncher::new(true, true));

        let err = h.usecase.execute(b"GIF89a", "wx1234", None).await.unwrap_err();

        assert_eq!(err.kind(), ShareErrorKind::Serialization);
        assert!(h.pasteboard.writes.lock().unwrap().is_empty());
        assert!(h.launcher.opened.lock().unwrap().is_empty());
        assert_eq!(h.stager.released.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unresolvable_scheme_is_app_not_installed() {
        let h = harness(RecordingCodec::default(), Vec::new(), FakeLauncher::new(false, true));

        let err = h.usecase.execute(b"GIF89a", "wx1234", None).await.unwrap_err();

        assert_eq!(err.kind(), ShareErrorKind::AppNotInstalled);
        assert!(h.launcher.opened.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_refused_switch_is_share_error() {
        let h = harness(RecordingCodec::default(), Vec::new(), FakeLauncher::new(true, false));

        let err = h.usecase.execute(b"GIF89a", "wx1234", None).await.unwrap_err();

        assert_eq!(err.kind(), ShareErrorKind::Share);
        assert_eq!(h.launcher.opened.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_progress_records_failure_kind() {
        let mut progress = HandoffProgress::new();
        progress.advance(HandoffState::Validated).unwrap();
        let err = progress.fail(ShareError::Staging("disk full".to_string()));

        assert_eq!(err.kind(), ShareErrorKind::Staging);
        assert_eq!(progress.state, HandoffState::Failed(ShareErrorKind::Staging));
    }
}
