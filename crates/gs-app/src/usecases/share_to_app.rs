//! Targeted generic handoff.

use std::sync::Arc;

use gs_core::ports::AssetStagerPort;
use gs_core::share::ShareError;
use tracing::{info, info_span, warn, Instrument};

use super::GenericHandoffDispatcher;

/// Stage `gif_data` and hand it to `target`, or to a chooser.
///
/// The staged asset is released when dispatch fails. On success it stays in
/// place for the receiver and is left to the staging janitor.
pub(super) async fn stage_and_dispatch(
    stager: &dyn AssetStagerPort,
    dispatcher: &GenericHandoffDispatcher,
    gif_data: &[u8],
    target: Option<&str>,
) -> Result<(), ShareError> {
    if gif_data.is_empty() {
        return Err(ShareError::InvalidArgs("gifData".to_string()));
    }

    let staged = stager.stage(gif_data).await?;
    info!(
        handle = %staged.handle,
        size = staged.size_bytes(),
        "GIF staged for generic handoff"
    );

    if let Err(err) = dispatcher.dispatch(&staged, target).await {
        warn!(handle = %staged.handle, error = %err, "Generic handoff failed");
        stager.release(&staged.handle).await;
        return Err(err);
    }

    Ok(())
}

pub struct ShareToApp {
    stager: Arc<dyn AssetStagerPort>,
    dispatcher: Arc<GenericHandoffDispatcher>,
}

impl ShareToApp {
    pub fn new(stager: Arc<dyn AssetStagerPort>, dispatcher: Arc<GenericHandoffDispatcher>) -> Self {
        Self { stager, dispatcher }
    }

    /// Deliver `gif_data` to the application identified by `target_id`.
    ///
    /// Fails with `AppNotAvailable` when no receiver matches; nothing is
    /// launched in that case.
    pub async fn execute(&self, gif_data: &[u8], target_id: &str) -> Result<(), ShareError> {
        let span = info_span!(
            "usecase.share_to_app.execute",
            target = target_id,
            size = gif_data.len()
        );

        async move {
            if target_id.trim().is_empty() {
                return Err(ShareError::InvalidArgs("packageName".to_string()));
            }
            stage_and_dispatch(
                self.stager.as_ref(),
                &self.dispatcher,
                gif_data,
                Some(target_id),
            )
            .await
        }
        .instrument(span)
        .await
    }
}
