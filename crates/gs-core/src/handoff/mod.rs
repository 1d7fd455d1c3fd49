//! Protocol handoff model.
//!
//! The protocol target expects a fixed property-list message on the shared
//! pasteboard followed by a capability-scheme activation. Field names, the
//! outer keying by app id and the pasteboard type tag are dictated by the
//! receiver; any deviation is rejected silently on its side.

mod message;
mod scene;
mod state;

pub use message::{
    activation_uri, is_valid_app_id, HandoffMessage, COMMAND_SEND_REQUEST, OBJECT_TYPE_GIF, PASTEBOARD_TYPE,
    RESULT_FLAG, RETURN_FROM_APP_FLAG, SDK_VERSION,
};
pub use scene::Scene;
pub use state::{HandoffState, InvalidTransition};
