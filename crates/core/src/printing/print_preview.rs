use image::imageops::{self, FilterType};

use crate::capture::domain::captured_still::CapturedStill;
use crate::printing::domain::preview_renderer::PreviewRenderer;
use crate::shared::constants::{DEFAULT_PRINT_DPI, PRINT_HEIGHT_MM, PRINT_WIDTH_MM};
use crate::shared::frame::Frame;

const MM_PER_INCH: f64 = 25.4;

/// Physical print surface and the raster size it maps to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PrintSurface {
    pub width_mm: f64,
    pub height_mm: f64,
    pub dpi: u32,
}

impl PrintSurface {
    pub fn new(width_mm: f64, height_mm: f64, dpi: u32) -> Self {
        Self {
            width_mm,
            height_mm,
            dpi,
        }
    }

    pub fn with_dpi(dpi: u32) -> Self {
        Self::new(PRINT_WIDTH_MM, PRINT_HEIGHT_MM, dpi)
    }

    pub fn pixel_size(&self) -> (u32, u32) {
        let to_px = |mm: f64| ((mm / MM_PER_INCH * self.dpi as f64).round() as u32).max(1);
        (to_px(self.width_mm), to_px(self.height_mm))
    }
}

impl PreviewRenderer for PrintSurface {
    /// Decodes the still and stretches it to fill the surface.
    fn render(&self, still: &CapturedStill) -> Result<Frame, image::ImageError> {
        let (w, h) = self.pixel_size();
        let decoded = still.decode()?.to_rgba_image();
        let scaled = if decoded.dimensions() == (w, h) {
            decoded
        } else {
            imageops::resize(&decoded, w, h, FilterType::Triangle)
        };
        Ok(Frame::from_rgba_image(scaled, 0))
    }
}

impl Default for PrintSurface {
    fn default() -> Self {
        Self::with_dpi(DEFAULT_PRINT_DPI)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::domain::photo_slot::PhotoSlot;
    use std::io::Cursor;
    use std::time::Duration;

    fn still_of(w: u32, h: u32) -> CapturedStill {
        let img = image::RgbaImage::from_pixel(w, h, image::Rgba([30, 60, 90, 255]));
        let mut png = Vec::new();
        img.write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();
        CapturedStill::new(PhotoSlot::Photo2, png, w, h, Duration::ZERO)
    }

    #[test]
    fn test_default_surface_is_54_by_86_mm_at_300_dpi() {
        let surface = PrintSurface::default();
        assert_eq!(surface.width_mm, 54.0);
        assert_eq!(surface.height_mm, 86.0);
        assert_eq!(surface.pixel_size(), (638, 1016));
    }

    #[test]
    fn test_pixel_size_tracks_dpi() {
        assert_eq!(PrintSurface::with_dpi(100).pixel_size(), (213, 339));
    }

    #[test]
    fn test_render_fills_surface() {
        let surface = PrintSurface::with_dpi(25);
        let (w, h) = surface.pixel_size();
        let preview = surface.render(&still_of(108, 192)).unwrap();
        assert_eq!((preview.width(), preview.height()), (w, h));
        let px = &preview.data()[..4];
        for (got, want) in px.iter().zip([30u8, 60, 90, 255]) {
            assert!(got.abs_diff(want) <= 1, "pixel {px:?}");
        }
    }
}
