//! Installation-probe capability detection.
//!
//! Detects whether the platform lets us read installed-package metadata or
//! whether installation has to be inferred from capability-scheme handlers.

use gs_core::config::ProbeStrategy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeCapability {
    /// Package metadata can be queried directly (Android, desktop Linux, Windows).
    PackageMetadata,
    /// Metadata queries are restricted; only URL handler registration is
    /// observable (iOS, macOS).
    UrlSchemeOnly,
}

/// Detect the probe capability of the current platform.
///
/// # Detection Logic
///
/// - **iOS / macOS**: `UrlSchemeOnly`. Bundle lookups for other apps are
///   not permitted, `canOpenURL`-style resolution is.
/// - **Everything else**: `PackageMetadata`.
pub fn detect_probe_capability() -> ProbeCapability {
    if cfg!(any(target_os = "ios", target_os = "macos")) {
        ProbeCapability::UrlSchemeOnly
    } else {
        ProbeCapability::PackageMetadata
    }
}

/// Resolve `Auto` against the detected capability; explicit strategies win.
pub fn resolve_probe_strategy(configured: ProbeStrategy) -> ProbeStrategy {
    match configured {
        ProbeStrategy::Auto => match detect_probe_capability() {
            ProbeCapability::PackageMetadata => ProbeStrategy::PackageMetadata,
            ProbeCapability::UrlSchemeOnly => ProbeStrategy::UrlScheme,
        },
        explicit => explicit,
    }
}
