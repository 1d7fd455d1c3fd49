pub mod in_memory_launcher;
pub mod in_memory_packages;
pub mod in_memory_pasteboard;
pub mod in_memory_share_sheet;
pub mod package_query;
pub mod pasteboard;
pub mod share_sheet;
pub mod url_launcher;

pub use in_memory_launcher::InMemoryUrlLauncher;
pub use in_memory_packages::InMemoryPackageQuery;
pub use in_memory_pasteboard::InMemoryPasteboard;
pub use in_memory_share_sheet::InMemoryShareSheet;
pub use package_query::DesktopPackageQuery;
pub use pasteboard::SystemPasteboard;
pub use share_sheet::DesktopShareSheet;
pub use url_launcher::SystemUrlLauncher;
