use std::io::Cursor;
use std::time::Duration;

use image::imageops::{self, FilterType};
use thiserror::Error;

use crate::capture::domain::captured_still::CapturedStill;
use crate::capture::domain::photo_slot::PhotoSlot;
use crate::shared::constants::{CAPTURE_HEIGHT, CAPTURE_WIDTH};
use crate::shared::frame::Frame;

#[derive(Error, Debug)]
pub enum CompositeError {
    #[error("failed to encode {slot} as PNG: {source}")]
    Encode {
        slot: PhotoSlot,
        #[source]
        source: image::ImageError,
    },
}

/// Flattens the live video and its overlay into one still.
///
/// The video is mirrored so the photo matches what the subject saw;
/// the overlay is laid on top unmirrored. Both are scaled to the output
/// resolution before blending.
pub struct StillCompositor {
    width: u32,
    height: u32,
}

impl StillCompositor {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn compose(
        &self,
        video: &Frame,
        overlay: &Frame,
        slot: PhotoSlot,
        captured_at: Duration,
    ) -> Result<CapturedStill, CompositeError> {
        let mut base = self.fit(video.mirrored().to_rgba_image());
        let top = self.fit(overlay.to_rgba_image());
        imageops::overlay(&mut base, &top, 0, 0);

        let mut png = Vec::new();
        base.write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
            .map_err(|source| CompositeError::Encode { slot, source })?;

        Ok(CapturedStill::new(slot, png, self.width, self.height, captured_at))
    }

    fn fit(&self, img: image::RgbaImage) -> image::RgbaImage {
        if img.dimensions() == (self.width, self.height) {
            img
        } else {
            imageops::resize(&img, self.width, self.height, FilterType::Triangle)
        }
    }
}

impl Default for StillCompositor {
    fn default() -> Self {
        Self::new(CAPTURE_WIDTH, CAPTURE_HEIGHT)
    }
}
