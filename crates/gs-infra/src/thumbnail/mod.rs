mod jpeg_thumbnail;

pub use jpeg_thumbnail::JpegThumbnailDeriver;
