//! Generic handoff through the platform share sheet.

use std::sync::Arc;

use gs_core::ports::ShareSheetPort;
use gs_core::share::{ShareError, ShareRequest};
use gs_core::StagedAsset;
use tracing::{debug, info, warn};

pub struct GenericHandoffDispatcher {
    share_sheet: Arc<dyn ShareSheetPort>,
    chooser_title: String,
}

impl GenericHandoffDispatcher {
    pub fn new(share_sheet: Arc<dyn ShareSheetPort>, chooser_title: impl Into<String>) -> Self {
        Self {
            share_sheet,
            chooser_title: chooser_title.into(),
        }
    }

    /// Hand `staged` to `target`, or to a chooser when `target` is `None`.
    ///
    /// A targeted share first checks that a receiver resolves for the exact
    /// request and returns `AppNotAvailable` without launching anything
    /// otherwise. A chooser share succeeds once the chooser is presented; the
    /// user's pick is not observable here.
    pub async fn dispatch(
        &self,
        staged: &StagedAsset,
        target: Option<&str>,
    ) -> Result<(), ShareError> {
        let request = ShareRequest::send_gif(staged.handle.clone());

        match target {
            Some(target) => {
                let request = request.with_target(target);
                let resolvable = self
                    .share_sheet
                    .can_resolve(&request)
                    .map_err(|e| ShareError::Share(e.to_string()))?;
                if !resolvable {
                    info!(target, "No receiver resolves for targeted share");
                    return Err(ShareError::AppNotAvailable(target.to_string()));
                }

                self.share_sheet
                    .present(&request)
                    .await
                    .map_err(|e| ShareError::Share(e.to_string()))?;
                info!(target, handle = %staged.handle, "Targeted share presented");
            }
            None => {
                match self.share_sheet.can_resolve(&request) {
                    Ok(true) => {}
                    Ok(false) => warn!("Presenting chooser with no known GIF receiver"),
                    Err(err) => debug!(error = %err, "Receiver lookup failed before chooser"),
                }

                self.share_sheet
                    .present_chooser(&request, &self.chooser_title)
                    .await
                    .map_err(|e| ShareError::Share(e.to_string()))?;
                info!(handle = %staged.handle, "Chooser presented");
            }
        }

        Ok(())
    }
}
