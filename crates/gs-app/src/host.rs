//! Host method-call boundary.
//!
//! 宿主方法调用边界：宿主通过方法名 + 参数字典调用，结果为 JSON 值或分享结果。
//!
//! Two channels are exposed. The messaging channel covers the generic share
//! path and installation queries; the protocol channel covers the protocol
//! target. Arguments arrive as a JSON map with camelCase keys.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use gs_core::ShareOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HostChannel {
    Messaging,
    Protocol,
}

impl HostChannel {
    pub const MESSAGING_NAME: &'static str = "gifshare/messaging_share";
    pub const PROTOCOL_NAME: &'static str = "gifshare/protocol_share";

    pub fn name(self) -> &'static str {
        match self {
            HostChannel::Messaging => Self::MESSAGING_NAME,
            HostChannel::Protocol => Self::PROTOCOL_NAME,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            Self::MESSAGING_NAME => Some(HostChannel::Messaging),
            Self::PROTOCOL_NAME => Some(HostChannel::Protocol),
            _ => None,
        }
    }
}

/// One method call from the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostCall {
    pub channel: HostChannel,
    pub method: String,
    #[serde(default)]
    pub arguments: Value,
}

impl HostCall {
    pub fn new(channel: HostChannel, method: impl Into<String>, arguments: Value) -> Self {
        Self {
            channel,
            method: method.into(),
            arguments,
        }
    }

    /// Decode the argument map. Missing or mistyped keys become `None`.
    pub(crate) fn args(&self) -> CallArgs {
        serde_json::from_value(self.arguments.clone()).unwrap_or_default()
    }
}

/// Response handed back to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "body", rename_all = "snake_case")]
pub enum HostResponse {
    /// Plain query result.
    Value(Value),
    /// Result of a share operation.
    Outcome(ShareOutcome),
    /// The channel has no method of that name.
    NotImplemented,
}

impl HostResponse {
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            HostResponse::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_outcome(&self) -> Option<&ShareOutcome> {
        match self {
            HostResponse::Outcome(outcome) => Some(outcome),
            _ => None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CallArgs {
    #[serde(default, deserialize_with = "lenient")]
    pub gif_data: Option<Vec<u8>>,
    #[serde(default, deserialize_with = "lenient")]
    pub package_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub app_id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub scene: Option<String>,
}

/// Mistyped values read as absent instead of failing the whole map.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}
