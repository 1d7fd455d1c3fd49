/// Derives a small preview of an image.
///
/// 缩略图生成端口。
pub trait ThumbnailPort: Send + Sync {
    /// Compressed still preview of the first frame of `image_bytes`.
    ///
    /// Returns an empty vector when the image cannot be decoded.
    fn derive(&self, image_bytes: &[u8]) -> Vec<u8>;
}
