use serde::{Deserialize, Serialize};
use url::Url;

use super::Scene;
use crate::app::PROTOCOL_TARGET_SCHEME;

/// Object type tag for an animated GIF (emoticon) payload.
pub const OBJECT_TYPE_GIF: &str = "8";
/// Command code of a send request.
pub const COMMAND_SEND_REQUEST: &str = "1010";
pub const RESULT_FLAG: &str = "1";
pub const RETURN_FROM_APP_FLAG: &str = "1";
pub const SDK_VERSION: &str = "1.5";

/// Pasteboard type the receiver listens for. Data under any other type is
/// treated as ordinary clipboard content.
pub const PASTEBOARD_TYPE: &str = "content";

/// Protocol message placed on the pasteboard, keyed by the destination app id.
///
/// 协议消息：以目标 app id 为外层键写入剪贴板。
///
/// `thumb_data` is always present on the wire, empty when no thumbnail could
/// be derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandoffMessage {
    #[serde(rename = "objectType")]
    pub object_type: String,
    #[serde(rename = "fileData", with = "serde_bytes")]
    pub file_data: Vec<u8>,
    #[serde(rename = "thumbData", with = "serde_bytes")]
    pub thumb_data: Vec<u8>,
    pub command: String,
    pub scene: String,
    pub result: String,
    #[serde(rename = "returnFromApp")]
    pub return_from_app: String,
    #[serde(rename = "sdkver")]
    pub sdk_version: String,
}

impl HandoffMessage {
    /// Build a GIF message. Everything except the payloads and the scene is a
    /// protocol constant.
    pub fn gif(file_data: Vec<u8>, thumb_data: Vec<u8>, scene: Scene) -> Self {
        Self {
            object_type: OBJECT_TYPE_GIF.to_string(),
            file_data,
            thumb_data,
            command: COMMAND_SEND_REQUEST.to_string(),
            scene: scene.code().to_string(),
            result: RESULT_FLAG.to_string(),
            return_from_app: RETURN_FROM_APP_FLAG.to_string(),
            sdk_version: SDK_VERSION.to_string(),
        }
    }
}

/// Whether `app_id` can be used both as the outer message key and as a single
/// path segment of the activation URI.
///
/// Only ASCII alphanumerics, `_`, `-` and `.` are accepted, so reserved URL
/// characters (`/`, `?`, `#`, `%`) never reach the URI.
pub fn is_valid_app_id(app_id: &str) -> bool {
    !app_id.is_empty()
        && app_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

/// Activation URI for `app_id`: `weixin://app/<app_id>/sendreq/?`.
///
/// Callers check [`is_valid_app_id`] first.
pub fn activation_uri(app_id: &str) -> Result<Url, url::ParseError> {
    Url::parse(&format!("{PROTOCOL_TARGET_SCHEME}://app/{app_id}/sendreq/?"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gif_message_uses_protocol_constants() {
        let msg = HandoffMessage::gif(vec![1, 2, 3], vec![], Scene::Timeline);
        assert_eq!(msg.object_type, "8");
        assert_eq!(msg.command, "1010");
        assert_eq!(msg.scene, "1");
        assert_eq!(msg.result, "1");
        assert_eq!(msg.return_from_app, "1");
        assert_eq!(msg.sdk_version, "1.5");
        assert!(msg.thumb_data.is_empty());
    }

    #[test]
    fn test_field_names_on_the_wire() {
        let msg = HandoffMessage::gif(vec![], vec![], Scene::Chat);
        let value = serde_json::to_value(&msg).unwrap();
        let obj = value.as_object().unwrap();
        let mut keys: Vec<_> = obj.keys().cloned().collect();
        keys.sort();
        assert_eq!(
            keys,
            vec![
                "command",
                "fileData",
                "objectType",
                "result",
                "returnFromApp",
                "scene",
                "sdkver",
                "thumbData"
            ]
        );
    }

    #[test]
    fn test_app_id_must_be_a_single_path_segment() {
        assert!(is_valid_app_id("wx1234abcd"));
        assert!(is_valid_app_id("wx_demo-1.2"));
        for bad in ["", "wx/evil", "wx?x=1", "wx#frag", "wx%2F", "wx 1", "微信"] {
            assert!(!is_valid_app_id(bad), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn test_activation_uri_embeds_app_id() {
        let url = activation_uri("wx1234").unwrap();
        assert_eq!(url.scheme(), "weixin");
        assert_eq!(url.as_str(), "weixin://app/wx1234/sendreq/?");
    }
}
