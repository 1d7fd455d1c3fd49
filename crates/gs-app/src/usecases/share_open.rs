//! Open chooser handoff.

use std::sync::Arc;

use gs_core::ports::AssetStagerPort;
use gs_core::share::ShareError;
use tracing::{info_span, Instrument};

use super::share_to_app::stage_and_dispatch;
use super::GenericHandoffDispatcher;

/// Let the user pick the receiving application.
pub struct ShareOpen {
    stager: Arc<dyn AssetStagerPort>,
    dispatcher: Arc<GenericHandoffDispatcher>,
}

impl ShareOpen {
    pub fn new(stager: Arc<dyn AssetStagerPort>, dispatcher: Arc<GenericHandoffDispatcher>) -> Self {
        Self { stager, dispatcher }
    }

    /// Succeeds once the chooser is presented, whatever the user picks.
    pub async fn execute(&self, gif_data: &[u8]) -> Result<(), ShareError> {
        let span = info_span!("usecase.share_open.execute", size = gif_data.len());
        stage_and_dispatch(self.stager.as_ref(), &self.dispatcher, gif_data, None)
            .instrument(span)
            .await
    }
}
