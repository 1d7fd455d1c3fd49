use anyhow::{Context, Result};
use gs_core::ports::ThumbnailPort;
use image::{codecs::jpeg::JpegEncoder, imageops::FilterType, ColorType};
use tracing::{debug, warn};

/// Square JPEG preview of the first frame of an image.
pub struct JpegThumbnailDeriver {
    edge: u32,
    quality: u8,
}

impl JpegThumbnailDeriver {
    pub fn new(edge: u32, quality: u8) -> Self {
        Self {
            edge: edge.max(1),
            quality: quality.clamp(1, 100),
        }
    }

    fn try_derive(&self, image_bytes: &[u8]) -> Result<Vec<u8>> {
        // GIF decoding yields the first frame.
        let decoded =
            image::load_from_memory(image_bytes).context("decode image bytes for thumbnail")?;

        let rgb = image::imageops::resize(
            &decoded.to_rgb8(),
            self.edge,
            self.edge,
            FilterType::Triangle,
        );

        let mut thumbnail_bytes = Vec::new();
        let mut encoder = JpegEncoder::new_with_quality(&mut thumbnail_bytes, self.quality);
        encoder
            .encode(rgb.as_raw(), self.edge, self.edge, ColorType::Rgb8.into())
            .context("encode thumbnail to jpeg")?;

        Ok(thumbnail_bytes)
    }
}

impl ThumbnailPort for JpegThumbnailDeriver {
    fn derive(&self, image_bytes: &[u8]) -> Vec<u8> {
        match self.try_derive(image_bytes) {
            Ok(bytes) => {
                debug!(size = bytes.len(), edge = self.edge, "Thumbnail derived");
                bytes
            }
            Err(err) => {
                warn!(error = %err, "Thumbnail derivation failed, using empty thumbnail");
                Vec::new()
            }
        }
    }
}
