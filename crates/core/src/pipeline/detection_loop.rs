use crate::camera::domain::camera::{Camera, CameraError, StreamInfo};
use crate::landmarks::domain::landmark_source::LandmarkSource;
use crate::overlay::domain::filter_variant::FilterVariant;
use crate::pipeline::overlay_renderer::OverlayRenderer;
use crate::shared::frame::Frame;

/// Pulls camera frames and keeps the overlay in step with them.
///
/// Cooperative: nothing runs between calls to `tick`. Each tick handles
/// at most one frame, so the caller's polling rate is the frame rate.
pub struct DetectionLoop {
    camera: Box<dyn Camera>,
    landmarks: Box<dyn LandmarkSource>,
    overlay: OverlayRenderer,
    running: bool,
    current: Option<Frame>,
}

impl DetectionLoop {
    pub fn new(
        camera: Box<dyn Camera>,
        landmarks: Box<dyn LandmarkSource>,
        overlay: OverlayRenderer,
    ) -> Self {
        Self {
            camera,
            landmarks,
            overlay,
            running: false,
            current: None,
        }
    }

    /// Opens the camera and starts accepting ticks. An unready landmark
    /// model is not an error: frames still flow, undecorated.
    pub fn start(&mut self) -> Result<StreamInfo, CameraError> {
        let info = self.camera.open()?;
        if !self.landmarks.is_ready() {
            log::warn!("Landmark model not ready, running without decorations");
        }
        log::info!("Camera open at {}x{}", info.width, info.height);
        self.running = true;
        Ok(info)
    }

    pub fn stop(&mut self) {
        if self.running {
            log::info!("Detection loop stopped");
        }
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Runs one detect-and-draw cycle. Returns `false` when no frame was
    /// processed.
    pub fn tick(&mut self, filter: FilterVariant) -> bool {
        if !self.running {
            return false;
        }
        let Some(frame) = self.camera.next_frame() else {
            log::warn!("Camera stream ended");
            self.stop();
            return false;
        };

        let faces = if self.landmarks.is_ready() {
            self.landmarks.detect(&frame).unwrap_or_else(|e| {
                log::warn!("Landmark detection failed on frame {}: {e}", frame.index());
                Vec::new()
            })
        } else {
            Vec::new()
        };

        match self.overlay.render_cycle(&frame, &faces, filter) {
            Ok(n) => log::debug!("Frame {}: {n} of {} faces decorated", frame.index(), faces.len()),
            Err(e) => log::warn!("Overlay render failed on frame {}: {e}", frame.index()),
        }
        self.current = Some(frame);
        true
    }

    pub fn video_frame(&self) -> Option<&Frame> {
        self.current.as_ref()
    }

    pub fn overlay_frame(&self) -> &Frame {
        self.overlay.surface()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::domain::face_anchors::test_support::frontal_mesh;
    use crate::landmarks::domain::landmark_set::DetectedFace;
    use crate::landmarks::infrastructure::scripted_landmark_source::ScriptedLandmarkSource;
    use crate::landmarks::infrastructure::unavailable_landmark_source::UnavailableLandmarkSource;
    use crate::overlay::infrastructure::cpu_rasterizer::CpuRasterizer;

    // --- Stubs ---

    struct StubCamera {
        frames: Vec<Frame>,
        fail_open: bool,
    }

    impl StubCamera {
        fn with_frames(n: usize) -> Self {
            let frames = (0..n)
                .map(|i| Frame::new(vec![0; 1080 * 1000 * 3], 1080, 1000, 3, i))
                .collect();
            Self {
                frames,
                fail_open: false,
            }
        }
    }

    impl Camera for StubCamera {
        fn open(&mut self) -> Result<StreamInfo, CameraError> {
            if self.fail_open {
                return Err(CameraError::AccessDenied("permission denied".into()));
            }
            Ok(StreamInfo {
                width: 1080,
                height: 1000,
            })
        }

        fn next_frame(&mut self) -> Option<Frame> {
            if self.frames.is_empty() {
                None
            } else {
                Some(self.frames.remove(0))
            }
        }
    }

    struct FailingLandmarks;

    impl LandmarkSource for FailingLandmarks {
        fn is_ready(&self) -> bool {
            true
        }

        fn detect(&mut self, _frame: &Frame) -> Result<Vec<DetectedFace>, Box<dyn std::error::Error>> {
            Err("inference failed".into())
        }
    }

    fn one_face() -> Box<dyn LandmarkSource> {
        Box::new(ScriptedLandmarkSource::new(vec![vec![DetectedFace::with_mesh(
            frontal_mesh(),
        )]]))
    }

    fn make_loop(camera: StubCamera, landmarks: Box<dyn LandmarkSource>) -> DetectionLoop {
        DetectionLoop::new(
            Box::new(camera),
            landmarks,
            OverlayRenderer::new(Box::new(CpuRasterizer::new())),
        )
    }

    fn overlay_alpha(lp: &DetectionLoop) -> u64 {
        lp.overlay_frame()
            .data()
            .chunks_exact(4)
            .map(|px| px[3] as u64)
            .sum()
    }

    #[test]
    fn test_tick_before_start_does_nothing() {
        let mut lp = make_loop(StubCamera::with_frames(1), one_face());
        assert!(!lp.tick(FilterVariant::Mask));
        assert!(lp.video_frame().is_none());
    }

    #[test]
    fn test_start_reports_stream_info() {
        let mut lp = make_loop(StubCamera::with_frames(1), one_face());
        let info = lp.start().unwrap();
        assert_eq!((info.width, info.height), (1080, 1000));
        assert!(lp.is_running());
    }

    #[test]
    fn test_camera_failure_keeps_loop_stopped() {
        let mut camera = StubCamera::with_frames(1);
        camera.fail_open = true;
        let mut lp = make_loop(camera, one_face());
        assert!(matches!(lp.start(), Err(CameraError::AccessDenied(_))));
        assert!(!lp.is_running());
        assert!(!lp.tick(FilterVariant::Mask));
    }

    #[test]
    fn test_tick_decorates_detected_face() {
        let mut lp = make_loop(StubCamera::with_frames(1), one_face());
        lp.start().unwrap();
        assert!(lp.tick(FilterVariant::Mask));
        assert_eq!(lp.video_frame().map(Frame::index), Some(0));
        assert!(overlay_alpha(&lp) > 0);
    }

    #[test]
    fn test_unready_model_draws_nothing() {
        let mut lp = make_loop(
            StubCamera::with_frames(1),
            Box::new(UnavailableLandmarkSource),
        );
        lp.start().unwrap();
        assert!(lp.tick(FilterVariant::PartyHat));
        assert!(lp.video_frame().is_some());
        assert_eq!(overlay_alpha(&lp), 0);
    }

    #[test]
    fn test_detection_error_draws_nothing() {
        let mut lp = make_loop(StubCamera::with_frames(1), Box::new(FailingLandmarks));
        lp.start().unwrap();
        assert!(lp.tick(FilterVariant::Crown));
        assert_eq!(overlay_alpha(&lp), 0);
    }

    #[test]
    fn test_stream_end_stops_loop() {
        let mut lp = make_loop(StubCamera::with_frames(1), one_face());
        lp.start().unwrap();
        assert!(lp.tick(FilterVariant::Blush));
        assert!(!lp.tick(FilterVariant::Blush));
        assert!(!lp.is_running());
        // last good frame is kept for capture
        assert!(lp.video_frame().is_some());
    }

    #[test]
    fn test_stop_halts_ticks() {
        let mut lp = make_loop(StubCamera::with_frames(3), one_face());
        lp.start().unwrap();
        lp.stop();
        assert!(!lp.tick(FilterVariant::Blush));
    }
}
