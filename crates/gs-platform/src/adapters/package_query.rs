use anyhow::Result;
use gs_core::ports::{PackageInfo, PackageQueryPort};

use crate::desktop_entry::DesktopEntryIndex;

/// Installed-package metadata from desktop entries.
pub struct DesktopPackageQuery {
    index: DesktopEntryIndex,
}

impl DesktopPackageQuery {
    pub fn new(index: DesktopEntryIndex) -> Self {
        Self { index }
    }

    pub fn system() -> Self {
        Self::new(DesktopEntryIndex::system())
    }
}

impl PackageQueryPort for DesktopPackageQuery {
    fn package_info(&self, identifier: &str) -> Result<PackageInfo> {
        let entry = self.index.find(identifier)?;
        Ok(PackageInfo {
            identifier: entry.id,
            version_name: entry.version,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_package_info_from_entry() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("org.telegram.messenger.desktop"),
            "[Desktop Entry]\nName=Telegram\nX-AppVersion=10.2\n",
        )
        .unwrap();

        let query =
            DesktopPackageQuery::new(DesktopEntryIndex::with_dirs(vec![dir.path().to_path_buf()]));

        let info = query.package_info("org.telegram.messenger").unwrap();
        assert_eq!(info.identifier, "org.telegram.messenger");
        assert_eq!(info.version_name.as_deref(), Some("10.2"));
        assert!(query.package_info("com.discord").is_err());
        assert!(query.package_info("").is_err());
    }
}
