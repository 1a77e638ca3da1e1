use ndarray::{s, ArrayView3};

pub const RGB_CHANNELS: u8 = 3;
pub const RGBA_CHANNELS: u8 = 4;

/// A single camera frame or drawing surface: contiguous pixel bytes in
/// row-major order, either RGB or RGBA.
///
/// Format conversion happens at I/O boundaries only; the domain layer
/// treats pixel data as opaque.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
    index: usize,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, channels: u8, index: usize) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * (channels as usize),
            "data length must equal width * height * channels"
        );
        Self {
            data,
            width,
            height,
            channels,
            index,
        }
    }

    /// Fully transparent RGBA surface.
    pub fn transparent(width: u32, height: u32) -> Self {
        let len = (width as usize) * (height as usize) * RGBA_CHANNELS as usize;
        Self::new(vec![0; len], width, height, RGBA_CHANNELS, 0)
    }

    pub fn from_rgba_image(image: image::RgbaImage, index: usize) -> Self {
        let (width, height) = image.dimensions();
        Self::new(image.into_raw(), width, height, RGBA_CHANNELS, index)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Resets every byte to zero (transparent black for RGBA surfaces).
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Copies the frame into an RGBA image, expanding RGB with opaque alpha.
    pub fn to_rgba_image(&self) -> image::RgbaImage {
        let rgba = match self.channels {
            RGBA_CHANNELS => self.data.clone(),
            _ => {
                let channels = self.channels as usize;
                let mut out = Vec::with_capacity(self.pixel_count() * 4);
                for px in self.data.chunks_exact(channels) {
                    let r = px[0];
                    let g = px.get(1).copied().unwrap_or(r);
                    let b = px.get(2).copied().unwrap_or(r);
                    out.extend_from_slice(&[r, g, b, 255]);
                }
                out
            }
        };
        image::RgbaImage::from_raw(self.width, self.height, rgba)
            .expect("Frame data length must match dimensions")
    }

    /// Returns a copy flipped left-to-right.
    pub fn mirrored(&self) -> Frame {
        let data: Vec<u8> = self
            .as_ndarray()
            .slice(s![.., ..;-1, ..])
            .iter()
            .copied()
            .collect();
        Frame::new(data, self.width, self.height, self.channels, self.index)
    }

    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        ArrayView3::from_shape(self.shape(), &self.data)
            .expect("Frame data length must match dimensions")
    }

    fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    fn shape(&self) -> (usize, usize, usize) {
        (
            self.height as usize,
            self.width as usize,
            self.channels as usize,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_and_accessors() {
        let data = vec![0u8; 12]; // 2x2x3
        let frame = Frame::new(data.clone(), 2, 2, 3, 5);
        assert_eq!(frame.width(), 2);
        assert_eq!(frame.height(), 2);
        assert_eq!(frame.channels(), 3);
        assert_eq!(frame.index(), 5);
        assert_eq!(frame.data(), &data[..]);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "data length must equal width * height * channels")]
    fn test_mismatched_data_length_panics_in_debug() {
        let data = vec![0u8; 10]; // wrong size for 2x2x3
        Frame::new(data, 2, 2, 3, 0);
    }

    #[test]
    fn test_transparent_is_rgba_zeroed() {
        let frame = Frame::transparent(3, 2);
        assert_eq!(frame.channels(), RGBA_CHANNELS);
        assert_eq!(frame.data().len(), 24);
        assert!(frame.data().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_clear_zeroes_painted_surface() {
        let mut frame = Frame::transparent(2, 2);
        frame.data_mut()[3] = 255;
        frame.clear();
        assert!(frame.data().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_mirrored_swaps_columns() {
        // 2x1 RGB: red then blue
        let frame = Frame::new(vec![255, 0, 0, 0, 0, 255], 2, 1, 3, 7);
        let mirrored = frame.mirrored();
        assert_eq!(mirrored.data(), &[0, 0, 255, 255, 0, 0]);
        assert_eq!(mirrored.index(), 7);
    }

    #[test]
    fn test_mirrored_keeps_rows() {
        // 1x2 RGB column stays in place
        let frame = Frame::new(vec![1, 2, 3, 4, 5, 6], 1, 2, 3, 0);
        assert_eq!(frame.mirrored().data(), frame.data());
    }

    #[test]
    fn test_to_rgba_image_adds_opaque_alpha() {
        let frame = Frame::new(vec![10, 20, 30], 1, 1, 3, 0);
        let img = frame.to_rgba_image();
        assert_eq!(img.get_pixel(0, 0).0, [10, 20, 30, 255]);
    }

    #[test]
    fn test_rgba_image_round_trip_keeps_alpha() {
        let img = image::RgbaImage::from_pixel(2, 2, image::Rgba([1, 2, 3, 4]));
        let frame = Frame::from_rgba_image(img.clone(), 9);
        assert_eq!(frame.index(), 9);
        assert_eq!(frame.to_rgba_image(), img);
    }

    #[test]
    fn test_as_ndarray_pixel_access() {
        // 2x2 RGB: set pixel (row=1, col=0) to red
        let mut data = vec![0u8; 12];
        data[6] = 255;
        let frame = Frame::new(data, 2, 2, 3, 0);
        let arr = frame.as_ndarray();
        assert_eq!(arr.shape(), &[2, 2, 3]);
        assert_eq!(arr[[1, 0, 0]], 255);
        assert_eq!(arr[[1, 0, 1]], 0);
    }
}
