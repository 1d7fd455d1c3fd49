//! Binary property-list codec for protocol messages.
//!
//! Wire layout: a binary plist whose root dictionary has exactly one key, the
//! destination app id, mapping to the message dictionary. Payload fields are
//! plist `data`, every other field a plist `string`.

use std::collections::BTreeMap;
use std::io::Cursor;

use anyhow::{anyhow, Context, Result};
use gs_core::handoff::HandoffMessage;
use gs_core::ports::HandoffCodecPort;

#[derive(Debug, Default, Clone, Copy)]
pub struct PlistHandoffCodec;

impl PlistHandoffCodec {
    pub fn new() -> Self {
        Self
    }
}

impl HandoffCodecPort for PlistHandoffCodec {
    fn encode(&self, app_id: &str, message: &HandoffMessage) -> Result<Vec<u8>> {
        let mut root = BTreeMap::new();
        root.insert(app_id, message);

        let mut buf = Vec::new();
        plist::to_writer_binary(&mut buf, &root).context("serialize handoff message to plist")?;
        Ok(buf)
    }

    fn decode(&self, bytes: &[u8]) -> Result<(String, HandoffMessage)> {
        let root: BTreeMap<String, HandoffMessage> =
            plist::from_reader(Cursor::new(bytes)).context("parse handoff plist")?;

        let mut entries = root.into_iter();
        let entry = entries
            .next()
            .ok_or_else(|| anyhow!("handoff plist has no app id key"))?;
        if entries.next().is_some() {
            return Err(anyhow!("handoff plist has more than one app id key"));
        }
        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gs_core::handoff::Scene;

    fn sample(scene: Scene) -> HandoffMessage {
        HandoffMessage::gif(b"GIF89a-bytes".to_vec(), vec![0xff, 0xd8, 0xff], scene)
    }

    #[test]
    fn test_encoded_output_is_binary_plist() {
        let bytes = PlistHandoffCodec::new()
            .encode("wx1234", &sample(Scene::Chat))
            .unwrap();
        assert!(bytes.starts_with(b"bplist00"));
    }

    #[test]
    fn test_outer_key_and_field_types() {
        let bytes = PlistHandoffCodec::new()
            .encode("wx1234", &sample(Scene::Timeline))
            .unwrap();

        let value = plist::Value::from_reader(Cursor::new(&bytes)).unwrap();
        let root = value.as_dictionary().unwrap();
        assert_eq!(root.len(), 1);

        let message = root.get("wx1234").and_then(|v| v.as_dictionary()).unwrap();
        assert_eq!(message.get("scene").and_then(|v| v.as_string()), Some("1"));
        assert_eq!(message.get("objectType").and_then(|v| v.as_string()), Some("8"));
        assert_eq!(message.get("command").and_then(|v| v.as_string()), Some("1010"));
        assert_eq!(message.get("sdkver").and_then(|v| v.as_string()), Some("1.5"));
        assert_eq!(
            message.get("fileData").and_then(|v| v.as_data()),
            Some(&b"GIF89a-bytes"[..])
        );
        assert_eq!(
            message.get("thumbData").and_then(|v| v.as_data()),
            Some(&[0xff, 0xd8, 0xff][..])
        );
    }

    #[test]
    fn test_empty_thumbnail_is_still_present() {
        let message = HandoffMessage::gif(b"gif".to_vec(), Vec::new(), Scene::Chat);
        let bytes = PlistHandoffCodec::new().encode("wxabc", &message).unwrap();

        let value = plist::Value::from_reader(Cursor::new(&bytes)).unwrap();
        let thumb = value
            .as_dictionary()
            .and_then(|root| root.get("wxabc"))
            .and_then(|v| v.as_dictionary())
            .and_then(|m| m.get("thumbData"))
            .and_then(|v| v.as_data());
        assert_eq!(thumb, Some(&[][..]));
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let codec = PlistHandoffCodec::new();
        let a = codec.encode("wx1234", &sample(Scene::Favorite)).unwrap();
        let b = codec.encode("wx1234", &sample(Scene::Favorite)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_decode_recovers_key_and_message() {
        let codec = PlistHandoffCodec::new();
        let bytes = codec.encode("wx1234", &sample(Scene::Chat)).unwrap();
        let (app_id, message) = codec.decode(&bytes).unwrap();
        assert_eq!(app_id, "wx1234");
        assert_eq!(message, sample(Scene::Chat));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(PlistHandoffCodec::new().decode(b"not a plist").is_err());
    }
}
