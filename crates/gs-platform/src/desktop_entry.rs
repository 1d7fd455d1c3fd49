//! Freedesktop desktop-entry lookup.
//!
//! On desktop Linux an installed application is represented by
//! `<identifier>.desktop` in one of the XDG `applications` directories
//! (flatpak exports included). The entry carries the MIME types the
//! application accepts, which is what share-receiver resolution needs.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};

const DESKTOP_GROUP: &str = "[Desktop Entry]";
const MAX_IDENTIFIER_LEN: usize = 255;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopEntry {
    pub id: String,
    pub path: PathBuf,
    pub name: Option<String>,
    pub mime_types: Vec<String>,
    pub version: Option<String>,
}

impl DesktopEntry {
    /// Whether the entry declares `mime` directly or through a `type/*` wildcard.
    pub fn accepts(&self, mime: &str) -> bool {
        let major = mime.split('/').next().unwrap_or_default();
        self.mime_types.iter().any(|m| {
            m.eq_ignore_ascii_case(mime)
                || m.strip_suffix("/*")
                    .is_some_and(|prefix| prefix.eq_ignore_ascii_case(major))
        })
    }

    pub fn parse(id: &str, path: &Path, content: &str) -> Self {
        let mut entry = DesktopEntry {
            id: id.to_string(),
            path: path.to_path_buf(),
            name: None,
            mime_types: Vec::new(),
            version: None,
        };

        let mut in_group = false;
        for line in content.lines().map(str::trim) {
            if line.starts_with('[') {
                in_group = line == DESKTOP_GROUP;
                continue;
            }
            if !in_group || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let value = value.trim();
            match key.trim() {
                "Name" => entry.name = Some(value.to_string()),
                "MimeType" => {
                    entry.mime_types = value
                        .split(';')
                        .filter(|m| !m.is_empty())
                        .map(str::to_string)
                        .collect()
                }
                "X-AppVersion" => entry.version = Some(value.to_string()),
                _ => {}
            }
        }

        entry
    }
}

/// Reverse-DNS style identifier check.
pub fn is_valid_identifier(identifier: &str) -> bool {
    !identifier.is_empty()
        && identifier.len() <= MAX_IDENTIFIER_LEN
        && !identifier.starts_with('.')
        && !identifier.ends_with('.')
        && !identifier.contains("..")
        && identifier
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
}

/// Ordered set of `applications` directories to search.
#[derive(Debug, Clone)]
pub struct DesktopEntryIndex {
    search_dirs: Vec<PathBuf>,
}

impl DesktopEntryIndex {
    pub fn with_dirs(search_dirs: Vec<PathBuf>) -> Self {
        Self { search_dirs }
    }

    /// User data dir first, then `$XDG_DATA_DIRS`, then flatpak exports.
    pub fn system() -> Self {
        let mut search_dirs = Vec::new();
        if let Some(data) = dirs::data_dir() {
            search_dirs.push(data.join("applications"));
            search_dirs.push(data.join("flatpak/exports/share/applications"));
        }

        let xdg_data_dirs = std::env::var("XDG_DATA_DIRS")
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| "/usr/local/share:/usr/share".to_string());
        search_dirs.extend(
            xdg_data_dirs
                .split(':')
                .filter(|d| !d.is_empty())
                .map(|d| PathBuf::from(d).join("applications")),
        );
        search_dirs.push(PathBuf::from("/var/lib/flatpak/exports/share/applications"));

        Self { search_dirs }
    }

    pub fn find(&self, identifier: &str) -> Result<DesktopEntry> {
        if !is_valid_identifier(identifier) {
            bail!("malformed application identifier: {identifier:?}");
        }

        let file_name = format!("{identifier}.desktop");
        let path = self
            .search_dirs
            .iter()
            .map(|dir| dir.join(&file_name))
            .find(|path| path.is_file())
            .ok_or_else(|| anyhow!("application not found: {identifier}"))?;

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("read desktop entry {}", path.display()))?;
        Ok(DesktopEntry::parse(identifier, &path, &content))
    }

    /// Entries accepting `mime`, first occurrence of each id wins.
    pub fn entries_for_mime(&self, mime: &str) -> Vec<DesktopEntry> {
        let mut seen = std::collections::HashSet::new();
        let mut entries = Vec::new();

        for dir in &self.search_dirs {
            let Ok(read_dir) = std::fs::read_dir(dir) else {
                continue;
            };
            for item in read_dir.flatten() {
                let path = item.path();
                let Some(id) = path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .and_then(|n| n.strip_suffix(".desktop"))
                else {
                    continue;
                };
                if !seen.insert(id.to_string()) {
                    continue;
                }
                let Ok(content) = std::fs::read_to_string(&path) else {
                    continue;
                };
                let entry = DesktopEntry::parse(id, &path, &content);
                if entry.accepts(mime) {
                    entries.push(entry);
                }
            }
        }

        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const WECHAT_ENTRY: &str = "\
[Desktop Entry]
Name=WeChat
Exec=wechat %U
MimeType=image/gif;image/png;
X-AppVersion=8.0.49

[Desktop Action New]
Name=Ignored
MimeType=text/plain;
";

    #[test]
    fn test_parse_reads_main_group_only() {
        let entry = DesktopEntry::parse("com.tencent.mm", Path::new("/x"), WECHAT_ENTRY);
        assert_eq!(entry.name.as_deref(), Some("WeChat"));
        assert_eq!(entry.mime_types, vec!["image/gif", "image/png"]);
        assert_eq!(entry.version.as_deref(), Some("8.0.49"));
    }

    #[test]
    fn test_accepts_exact_and_wildcard() {
        let mut entry = DesktopEntry::parse("a", Path::new("/x"), WECHAT_ENTRY);
        assert!(entry.accepts("image/gif"));
        assert!(!entry.accepts("text/plain"));

        entry.mime_types = vec!["image/*".to_string()];
        assert!(entry.accepts("image/gif"));
        assert!(!entry.accepts("video/mp4"));
    }

    #[test]
    fn test_identifier_validation() {
        assert!(is_valid_identifier("com.tencent.mm"));
        assert!(is_valid_identifier("org.telegram-desktop"));
        assert!(!is_valid_identifier(""));
        assert!(!is_valid_identifier("../etc/passwd"));
        assert!(!is_valid_identifier("com..example"));
        assert!(!is_valid_identifier("com/example"));
        assert!(!is_valid_identifier("com.example "));
    }

    #[test]
    fn test_find_in_later_dir_and_list_by_mime() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        std::fs::write(second.path().join("com.tencent.mm.desktop"), WECHAT_ENTRY).unwrap();
        std::fs::write(
            second.path().join("org.editor.desktop"),
            "[Desktop Entry]\nName=Editor\nMimeType=text/plain;\n",
        )
        .unwrap();

        let index = DesktopEntryIndex::with_dirs(vec![
            first.path().to_path_buf(),
            second.path().to_path_buf(),
        ]);

        let entry = index.find("com.tencent.mm").unwrap();
        assert_eq!(entry.path, second.path().join("com.tencent.mm.desktop"));

        assert!(index.find("com.whatsapp").is_err());
        assert!(index.find("../com.tencent.mm").is_err());

        let gif_receivers: Vec<_> = index
            .entries_for_mime("image/gif")
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(gif_receivers, vec!["com.tencent.mm"]);
    }
}
