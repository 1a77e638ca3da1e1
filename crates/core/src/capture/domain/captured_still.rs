use std::time::Duration;

use crate::capture::domain::photo_slot::PhotoSlot;
use crate::shared::frame::Frame;

/// A composited, PNG-encoded photo frozen at one instant.
///
/// Immutable once created; a later capture into the same slot replaces
/// the whole value.
#[derive(Clone, Debug, PartialEq)]
pub struct CapturedStill {
    slot: PhotoSlot,
    png: Vec<u8>,
    width: u32,
    height: u32,
    captured_at: Duration,
}

impl CapturedStill {
    pub fn new(slot: PhotoSlot, png: Vec<u8>, width: u32, height: u32, captured_at: Duration) -> Self {
        Self {
            slot,
            png,
            width,
            height,
            captured_at,
        }
    }

    pub fn slot(&self) -> PhotoSlot {
        self.slot
    }

    pub fn png(&self) -> &[u8] {
        &self.png
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn captured_at(&self) -> Duration {
        self.captured_at
    }

    /// Decodes the PNG back into an RGBA frame.
    pub fn decode(&self) -> Result<Frame, image::ImageError> {
        let img = image::load_from_memory_with_format(&self.png, image::ImageFormat::Png)?;
        Ok(Frame::from_rgba_image(img.to_rgba8(), 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn encode(img: &image::RgbaImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_decode_returns_pixels() {
        let img = image::RgbaImage::from_pixel(3, 2, image::Rgba([9, 8, 7, 255]));
        let still = CapturedStill::new(PhotoSlot::Photo1, encode(&img), 3, 2, Duration::ZERO);
        let frame = still.decode().unwrap();
        assert_eq!((frame.width(), frame.height()), (3, 2));
        assert_eq!(&frame.data()[..4], &[9, 8, 7, 255]);
    }

    #[test]
    fn test_decode_garbage_fails() {
        let still = CapturedStill::new(PhotoSlot::Photo2, vec![1, 2, 3], 1, 1, Duration::ZERO);
        assert!(still.decode().is_err());
    }
}
