use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::{anyhow, bail, Result};
use gs_core::ports::{PackageInfo, PackageQueryPort};

use crate::desktop_entry::is_valid_identifier;

/// In-memory package database. Install state can change between queries.
#[derive(Default)]
pub struct InMemoryPackageQuery {
    installed: Mutex<HashMap<String, Option<String>>>,
}

impl InMemoryPackageQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_package(self, identifier: &str, version: Option<&str>) -> Self {
        self.install(identifier, version);
        self
    }

    pub fn install(&self, identifier: &str, version: Option<&str>) {
        if let Ok(mut installed) = self.installed.lock() {
            installed.insert(identifier.to_string(), version.map(str::to_string));
        }
    }

    pub fn uninstall(&self, identifier: &str) {
        if let Ok(mut installed) = self.installed.lock() {
            installed.remove(identifier);
        }
    }
}

impl PackageQueryPort for InMemoryPackageQuery {
    fn package_info(&self, identifier: &str) -> Result<PackageInfo> {
        if !is_valid_identifier(identifier) {
            bail!("malformed application identifier: {identifier:?}");
        }
        let installed = self
            .installed
            .lock()
            .map_err(|_| anyhow!("package table lock poisoned"))?;
        let version_name = installed
            .get(identifier)
            .ok_or_else(|| anyhow!("application not found: {identifier}"))?
            .clone();
        Ok(PackageInfo {
            identifier: identifier.to_string(),
            version_name,
        })
    }
}
