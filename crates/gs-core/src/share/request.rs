use serde::{Deserialize, Serialize};

use crate::asset::{AssetHandle, MimeType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShareAction {
    /// Single-item send.
    Send,
}

/// Platform share request.
///
/// The MIME type is always `image/gif`: receivers dispatch rendering on the
/// declared type, so no generic binary fallback exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareRequest {
    pub action: ShareAction,
    pub mime_type: MimeType,
    pub stream: AssetHandle,
    /// Receiving application, `None` for an open chooser.
    pub target: Option<String>,
    /// Grant the receiver read access to `stream`.
    pub grant_read: bool,
    /// Start the receiver in its own task.
    pub new_task: bool,
}

impl ShareRequest {
    pub fn send_gif(stream: AssetHandle) -> Self {
        Self {
            action: ShareAction::Send,
            mime_type: MimeType::image_gif(),
            stream,
            target: None,
            grant_read: true,
            new_task: true,
        }
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }
}
