use serde::{Deserialize, Serialize};

use super::{ShareError, ShareErrorKind};

/// Tagged result returned across the caller boundary.
///
/// `Success` means the environment accepted the request (chooser presented,
/// target launched, application switch accepted). It never means the
/// receiving application processed the asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ShareOutcome {
    Success,
    Failure {
        kind: ShareErrorKind,
        message: String,
    },
}

impl ShareOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ShareOutcome::Success)
    }

    pub fn failure_kind(&self) -> Option<ShareErrorKind> {
        match self {
            ShareOutcome::Success => None,
            ShareOutcome::Failure { kind, .. } => Some(*kind),
        }
    }
}

impl From<ShareError> for ShareOutcome {
    fn from(err: ShareError) -> Self {
        ShareOutcome::Failure {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl From<Result<(), ShareError>> for ShareOutcome {
    fn from(result: Result<(), ShareError>) -> Self {
        match result {
            Ok(()) => ShareOutcome::Success,
            Err(err) => err.into(),
        }
    }
}
