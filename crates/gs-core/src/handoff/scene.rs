use serde::{Deserialize, Serialize};

/// Destination scene inside the protocol target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scene {
    /// Chat session. Also the fallback for unrecognized selectors.
    ///
    /// 聊天（默认）。
    #[default]
    Chat,
    /// Moments timeline.
    ///
    /// 朋友圈。
    Timeline,
    /// Favorites.
    ///
    /// 收藏。
    Favorite,
}

impl Scene {
    /// Parse a caller-supplied selector.
    ///
    /// Unknown selectors map to [`Scene::Chat`]: the protocol has no code for
    /// an unknown scene. `None` means the caller omitted the selector.
    pub fn from_selector(selector: Option<&str>) -> Self {
        match selector {
            Some("timeline") => Scene::Timeline,
            Some("favorite") => Scene::Favorite,
            _ => Scene::Chat,
        }
    }

    /// Wire code of the scene.
    pub fn code(self) -> &'static str {
        match self {
            Scene::Chat => "0",
            Scene::Timeline => "1",
            Scene::Favorite => "2",
        }
    }
}

impl std::fmt::Display for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Scene::Chat => "chat",
            Scene::Timeline => "timeline",
            Scene::Favorite => "favorite",
        };
        f.write_str(name)
    }
}
