//! Capability registry.
//!
//! Static mapping from external-application identifiers to display names.
//! Adding a target only means adding an entry here; dispatch logic never
//! matches on identifiers.

use once_cell::sync::Lazy;

use super::ExternalApp;

/// Identifier of the single target that requires protocol framing.
pub const PROTOCOL_TARGET_ID: &str = "com.tencent.mm";

/// Capability scheme of the protocol target.
pub const PROTOCOL_TARGET_SCHEME: &str = "weixin";

static BUILTIN_APPS: Lazy<Vec<ExternalApp>> = Lazy::new(|| {
    vec![
        ExternalApp::new(PROTOCOL_TARGET_ID, "WeChat").with_scheme(PROTOCOL_TARGET_SCHEME),
        ExternalApp::new("com.tencent.mobileqq", "QQ").with_scheme("mqq"),
        ExternalApp::new("com.whatsapp", "WhatsApp").with_scheme("whatsapp"),
        ExternalApp::new("org.telegram.messenger", "Telegram").with_scheme("tg"),
        ExternalApp::new("com.discord", "Discord").with_scheme("discord"),
        ExternalApp::new("com.facebook.orca", "Messenger").with_scheme("fb-messenger"),
        ExternalApp::new("jp.naver.line.android", "LINE").with_scheme("line"),
        ExternalApp::new("com.twitter.android", "X").with_scheme("twitter"),
    ]
});

/// Ordered, immutable registry of known target applications.
#[derive(Debug, Clone)]
pub struct CapabilityRegistry {
    apps: Vec<ExternalApp>,
}

impl CapabilityRegistry {
    /// Build a registry from an explicit list. Order is preserved and
    /// duplicate identifiers keep their first occurrence.
    pub fn new(apps: Vec<ExternalApp>) -> Self {
        let mut seen = std::collections::HashSet::new();
        let apps = apps
            .into_iter()
            .filter(|app| seen.insert(app.identifier.clone()))
            .collect();
        Self { apps }
    }

    /// Registry of the messaging applications supported out of the box.
    pub fn builtin() -> Self {
        Self::new(BUILTIN_APPS.clone())
    }

    pub fn lookup(&self, identifier: &str) -> Option<&str> {
        self.get(identifier).map(|app| app.display_name.as_str())
    }

    pub fn get(&self, identifier: &str) -> Option<&ExternalApp> {
        self.apps.iter().find(|app| app.identifier == identifier)
    }

    /// All identifiers in registry order.
    pub fn all_known_identifiers(&self) -> Vec<&str> {
        self.apps.iter().map(|app| app.identifier.as_str()).collect()
    }

    pub fn apps(&self) -> &[ExternalApp] {
        &self.apps
    }

    pub fn len(&self) -> usize {
        self.apps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }
}

impl Default for CapabilityRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
