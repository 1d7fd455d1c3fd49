//! Share requests, errors and outcomes.

mod error;
mod outcome;
mod request;

pub use error::{ShareError, ShareErrorKind, StagingError};
pub use outcome::ShareOutcome;
pub use request::{ShareAction, ShareRequest};
