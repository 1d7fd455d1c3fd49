//! Protocol handoff state machine.
//!
//! Linear flow, no transition back:
//! `Idle → Validated → Staged → ThumbnailDerived → Encoded → Transferred →
//! Activated → Completed`, with `Failed` reachable from every non-terminal
//! state.

use serde::{Deserialize, Serialize};

use crate::share::ShareErrorKind;

/// Protocol handoff state.
///
/// 协议移交状态。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandoffState {
    Idle,
    /// Inputs present, scene resolved, activation URI well-formed.
    Validated,
    /// Asset written to the staging area.
    Staged,
    /// Thumbnail derived, possibly empty.
    ThumbnailDerived,
    /// Message serialized.
    Encoded,
    /// Message written to the shared pasteboard.
    Transferred,
    /// Application switch requested.
    Activated,
    /// The environment accepted the switch request.
    Completed,
    Failed(ShareErrorKind),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid handoff transition: {from:?} -> {to:?}")]
pub struct InvalidTransition {
    pub from: HandoffState,
    pub to: HandoffState,
}

impl HandoffState {
    /// The only successor on the success path, `None` for terminal states.
    pub fn successor(self) -> Option<HandoffState> {
        match self {
            HandoffState::Idle => Some(HandoffState::Validated),
            HandoffState::Validated => Some(HandoffState::Staged),
            HandoffState::Staged => Some(HandoffState::ThumbnailDerived),
            HandoffState::ThumbnailDerived => Some(HandoffState::Encoded),
            HandoffState::Encoded => Some(HandoffState::Transferred),
            HandoffState::Transferred => Some(HandoffState::Activated),
            HandoffState::Activated => Some(HandoffState::Completed),
            HandoffState::Completed | HandoffState::Failed(_) => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, HandoffState::Completed | HandoffState::Failed(_))
    }

    /// Pure transition function.
    pub fn transition(self, to: HandoffState) -> Result<HandoffState, InvalidTransition> {
        let allowed = match to {
            HandoffState::Failed(_) => !self.is_terminal(),
            _ => self.successor() == Some(to),
        };

        if allowed {
            Ok(to)
        } else {
            Err(InvalidTransition { from: self, to })
        }
    }
}
