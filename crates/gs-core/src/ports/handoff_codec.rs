use anyhow::Result;

use crate::handoff::HandoffMessage;

/// Serialization of protocol messages.
pub trait HandoffCodecPort: Send + Sync {
    /// Encode `{ app_id: message }`.
    fn encode(&self, app_id: &str, message: &HandoffMessage) -> Result<Vec<u8>>;

    /// Decode an encoded message back into its outer key and message.
    fn decode(&self, bytes: &[u8]) -> Result<(String, HandoffMessage)>;
}
