pub mod handoff;
pub mod staging;
pub mod thumbnail;
pub mod time;

pub use handoff::PlistHandoffCodec;
pub use staging::{FsAssetStager, StagingJanitor};
pub use thumbnail::JpegThumbnailDeriver;
pub use time::SystemClock;
