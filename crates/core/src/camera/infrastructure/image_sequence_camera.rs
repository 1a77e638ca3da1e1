use std::fs;
use std::path::{Path, PathBuf};

use crate::camera::domain::camera::{Camera, CameraError, StreamInfo};
use crate::shared::constants::IMAGE_EXTENSIONS;
use crate::shared::frame::{Frame, RGB_CHANNELS};

/// Replays a directory of still images as a looping camera feed.
///
/// Files are ordered by name. The first image fixes the stream size;
/// later images of a different size are resized to match.
pub struct ImageSequenceCamera {
    dir: PathBuf,
    images: Vec<image::RgbImage>,
    stream: Option<StreamInfo>,
    next_index: usize,
}

impl ImageSequenceCamera {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            images: Vec::new(),
            stream: None,
            next_index: 0,
        }
    }

    pub fn frame_count(&self) -> usize {
        self.images.len()
    }
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

fn list_images(dir: &Path) -> Result<Vec<PathBuf>, CameraError> {
    let entries = fs::read_dir(dir)
        .map_err(|e| CameraError::AccessDenied(format!("{}: {e}", dir.display())))?;
    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && is_image(p))
        .collect();
    paths.sort();
    Ok(paths)
}

impl Camera for ImageSequenceCamera {
    fn open(&mut self) -> Result<StreamInfo, CameraError> {
        let paths = list_images(&self.dir)?;
        if paths.is_empty() {
            return Err(CameraError::NoFrames(self.dir.clone()));
        }

        let mut images = Vec::with_capacity(paths.len());
        for path in &paths {
            let img = image::open(path)
                .map_err(|source| CameraError::Decode {
                    path: path.clone(),
                    source,
                })?
                .to_rgb8();
            images.push(img);
        }

        let (width, height) = images[0].dimensions();
        for img in images.iter_mut().skip(1) {
            if img.dimensions() != (width, height) {
                *img = image::imageops::resize(&*img, width, height, image::imageops::FilterType::Triangle);
            }
        }

        log::info!(
            "Camera opened: {} frames at {width}x{height} from {}",
            images.len(),
            self.dir.display()
        );
        let info = StreamInfo { width, height };
        self.images = images;
        self.stream = Some(info);
        self.next_index = 0;
        Ok(info)
    }

    fn next_frame(&mut self) -> Option<Frame> {
        let info = self.stream?;
        let img = &self.images[self.next_index % self.images.len()];
        let frame = Frame::new(
            img.as_raw().clone(),
            info.width,
            info.height,
            RGB_CHANNELS,
            self.next_index,
        );
        self.next_index += 1;
        Some(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_png(dir: &Path, name: &str, w: u32, h: u32, value: u8) {
        let img = image::RgbImage::from_pixel(w, h, image::Rgb([value, value, value]));
        img.save(dir.join(name)).unwrap();
    }

    #[test]
    fn test_open_missing_dir_is_access_denied() {
        let mut camera = ImageSequenceCamera::new("/nonexistent/camera");
        assert!(matches!(camera.open(), Err(CameraError::AccessDenied(_))));
    }

    #[test]
    fn test_open_empty_dir_has_no_frames() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("notes.txt"), "not an image").unwrap();
        let mut camera = ImageSequenceCamera::new(dir.path());
        assert!(matches!(camera.open(), Err(CameraError::NoFrames(_))));
    }

    #[test]
    fn test_next_frame_before_open_is_none() {
        let mut camera = ImageSequenceCamera::new("/nonexistent/camera");
        assert!(camera.next_frame().is_none());
    }

    #[test]
    fn test_frames_in_name_order_and_loop() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "b.png", 4, 6, 20);
        write_png(dir.path(), "a.png", 4, 6, 10);

        let mut camera = ImageSequenceCamera::new(dir.path());
        let info = camera.open().unwrap();
        assert_eq!(info, StreamInfo { width: 4, height: 6 });
        assert_eq!(camera.frame_count(), 2);

        let f0 = camera.next_frame().unwrap();
        let f1 = camera.next_frame().unwrap();
        let f2 = camera.next_frame().unwrap();
        assert_eq!(f0.data()[0], 10);
        assert_eq!(f1.data()[0], 20);
        assert_eq!(f2.data()[0], 10);
        assert_eq!(f2.index(), 2);
        assert_eq!(f0.channels(), RGB_CHANNELS);
    }

    #[test]
    fn test_mismatched_sizes_are_resized() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "0.png", 8, 8, 50);
        write_png(dir.path(), "1.png", 16, 4, 50);

        let mut camera = ImageSequenceCamera::new(dir.path());
        camera.open().unwrap();
        camera.next_frame();
        let second = camera.next_frame().unwrap();
        assert_eq!((second.width(), second.height()), (8, 8));
    }
}
