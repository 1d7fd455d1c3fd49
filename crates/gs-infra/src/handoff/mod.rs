mod plist_codec;

pub use plist_codec::PlistHandoffCodec;
